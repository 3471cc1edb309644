//! Dashboard and low-stock alert pages.
//!
//! Both use `AppConfig::low_stock_threshold`, the same value the purchase
//! request pipeline selects with.

use crate::error::AppError;
use crate::purchase::selector::select_low_stock;
use crate::state::AppState;
use crate::store::{self, logs, machines, spares};
use actix_web::web;
use actix_web::HttpResponse;
use log::info;
use mms_common::purchase::PurchaseRequestLine;
use serde_json::json;

const RECENT_LOGS: usize = 5;

/// Registers:
///
/// *   **`GET /`** and **`GET /index`**: machine, spare and low-stock counts,
///     the five newest maintenance logs and the log entry form.
/// *   **`GET /low_stock_alerts`**: every spare under the threshold with its
///     suggested reorder quantity.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/index", web::get().to(index))
        .route("/low_stock_alerts", web::get().to(low_stock_alerts));
}

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let threshold = state.config.low_stock_threshold;
    let data = store::with_connection(&state.config.database_path, move |conn| {
        Ok(json!({
            "total_machines": machines::count(conn)?,
            "total_spares": spares::count(conn)?,
            "low_stock_count": spares::count_below(conn, threshold)?,
            "threshold": threshold,
            "recent_logs": logs::recent(conn, RECENT_LOGS)?,
            "machines": machines::list(conn, None)?,
        }))
    })
    .await?;
    state.views.page("index", &data)
}

pub async fn low_stock_alerts(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let threshold = state.config.low_stock_threshold;
    let low = store::with_connection(&state.config.database_path, move |conn| {
        Ok(select_low_stock(conn, threshold)?)
    })
    .await?;
    info!("Low stock listing: {} spare(s) below {}", low.len(), threshold);

    let lines: Vec<PurchaseRequestLine> = low
        .iter()
        .map(|spare| PurchaseRequestLine::from_spare(spare, threshold))
        .collect();
    state
        .views
        .page("low_stock", &json!({ "threshold": threshold, "lines": lines }))
}
