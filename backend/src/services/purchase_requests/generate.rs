//! # Purchase Request Download
//!
//! `GET /generate_pr/{encoding}` renders the spares currently below the
//! threshold and streams the file back as an attachment.
//!
//! ## Workflow:
//!
//! 1.  **Encoding**: the path segment is parsed into a `DocumentEncoding`.
//!     Anything other than `pdf`, `excel` (or `xlsx`) and `csv` is a 404.
//! 2.  **Rendering**: selection and rendering run on the blocking pool through
//!     `pipeline::generate`, which writes a fresh `purchase_request_<uuid>` file.
//! 3.  **Response**: with nothing below the threshold the handler answers with
//!     the "No low-stock items" fragment. Otherwise the file is served with
//!     `Content-Disposition: attachment; filename="purchase_request.<ext>"`.

use crate::error::AppError;
use crate::purchase::pipeline::{self, NO_LOW_STOCK_MESSAGE};
use crate::state::AppState;
use crate::store;
use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use mms_common::purchase::DocumentEncoding;
use serde_json::json;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    encoding: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let encoding: DocumentEncoding = encoding
        .parse()
        .map_err(|_| AppError::NotFound(format!("document encoding {:?}", encoding.as_str())))?;

    let threshold = state.config.low_stock_threshold;
    let output = state.config.document_output();
    let document = store::with_connection(&state.config.database_path, move |conn| {
        pipeline::generate(conn, threshold, encoding, &output)
    })
    .await?;

    let Some(document) = document else {
        return state
            .views
            .page("outcome", &json!({ "message": NO_LOW_STOCK_MESSAGE }));
    };

    info!("Serving {} as {}", document.file_name(), document.download_name());
    let file = NamedFile::open(&document.path)?.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(document.download_name())],
    });
    Ok(file.into_response(&req))
}
