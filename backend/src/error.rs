use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

/// Failures that abort a request.
///
/// Empty selections and mail delivery problems are not errors; they are
/// outcomes of the purchase-request pipeline.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] genpdf::error::Error),
    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("CSV generation failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("background task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Blocking(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Io(_)
            | AppError::Pdf(_)
            | AppError::Spreadsheet(_)
            | AppError::Csv(_)
            | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
