//! # Purchase Request Mailing
//!
//! `GET /send_pr_ui` runs the whole request pipeline once: select, render in
//! the configured encoding, look up supplier addresses and mail. The answer is
//! a one-line HTML fragment describing the outcome, in red when nothing was
//! delivered. A failed delivery is still a `200 OK`.

use crate::error::AppError;
use crate::purchase::pipeline::{self, PipelineOutcome};
use crate::state::AppState;
use crate::store;
use actix_web::{web, HttpResponse};
use log::debug;
use serde_json::json;

pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let settings = state.config.pipeline_settings();
    let notifier = state.notifier.clone();
    let outcome = store::with_connection(&state.config.database_path, move |conn| {
        pipeline::run(conn, &settings, notifier.as_ref())
    })
    .await?;
    if let Some(document) = outcome.document() {
        debug!("Purchase request kept at {}", document.path.display());
    }

    state.views.page(
        "outcome",
        &json!({
            "message": outcome.message(),
            "failure": outcome.is_failure(),
            "back": matches!(outcome, PipelineOutcome::Notified { .. }),
        }),
    )
}
