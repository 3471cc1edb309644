//! Maintenance log entry, as JSON for scripts and as a dashboard form.

use crate::error::AppError;
use crate::services::{parse_id, required, see_other};
use crate::state::AppState;
use crate::store::{self, logs};
use actix_web::{web, HttpResponse};
use log::info;
use mms_common::model::maintenance_log::NewMaintenanceLog;
use mms_common::requests::LogForm;
use serde_json::json;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/logs", web::post().to(add_json))
        .route("/add_log_ui", web::post().to(add_form));
}

fn validate(log: NewMaintenanceLog) -> Result<NewMaintenanceLog, AppError> {
    Ok(NewMaintenanceLog {
        machine_id: log.machine_id,
        description: required("description", &log.description)?,
        date: required("date", &log.date)?,
    })
}

async fn insert(state: &AppState, log: NewMaintenanceLog) -> Result<i64, AppError> {
    let id = store::with_connection(&state.config.database_path, move |conn| {
        Ok(logs::insert(conn, &log)?)
    })
    .await?;
    info!("Maintenance log {} recorded", id);
    Ok(id)
}

pub async fn add_json(
    state: web::Data<AppState>,
    body: web::Json<NewMaintenanceLog>,
) -> Result<HttpResponse, AppError> {
    insert(&state, validate(body.into_inner())?).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Log added successfully" })))
}

pub async fn add_form(
    state: web::Data<AppState>,
    form: web::Form<LogForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let log = validate(NewMaintenanceLog {
        machine_id: parse_id("machine_id", &form.machine_id)?,
        description: form.description,
        date: form.date,
    })?;
    insert(&state, log).await?;
    Ok(see_other("/"))
}
