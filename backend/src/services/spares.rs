//! Spare-part screens.
//!
//! Stock must be a non-negative whole number. The machine link is optional
//! and left blank in the form when the spare is generic.

use crate::error::AppError;
use crate::services::{parse_id, required, see_other};
use crate::state::AppState;
use crate::store::{self, spares};
use actix_web::{web, HttpResponse};
use mms_common::model::spare::NewSpare;
use mms_common::requests::{SearchQuery, SpareForm};
use serde_json::json;

const LIST_PATH: &str = "/spares_ui";

/// Registers:
///
/// *   **`GET /spares_ui?q=`**: spare list with low-stock rows highlighted.
/// *   **`POST /add_spare_ui`**, **`POST /edit_spare/{id}`**,
///     **`POST /delete_spare/{id}`**: form actions redirecting to the list.
///     Deleting a spare keeps its suppliers.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(LIST_PATH, web::get().to(list))
        .route("/add_spare_ui", web::post().to(add))
        .route("/edit_spare/{id}", web::post().to(edit))
        .route("/delete_spare/{id}", web::post().to(delete));
}

pub(crate) fn parse_form(form: SpareForm) -> Result<NewSpare, AppError> {
    let name = required("name", &form.name)?;
    let stock: i64 = form.stock.trim().parse().map_err(|_| {
        AppError::Validation(format!("stock must be a whole number, got {:?}", form.stock))
    })?;
    if stock < 0 {
        return Err(AppError::Validation(format!(
            "stock cannot be negative, got {}",
            stock
        )));
    }
    let machine_id = match form.machine_id.trim() {
        "" => None,
        raw => Some(parse_id("machine_id", raw)?),
    };
    Ok(NewSpare {
        name,
        stock,
        location: form.location.trim().to_string(),
        machine_id,
    })
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let term = query.term().map(str::to_string);
    let threshold = state.config.low_stock_threshold;
    let found = store::with_connection(&state.config.database_path, move |conn| {
        Ok(spares::list(conn, term.as_deref())?)
    })
    .await?;

    let rows: Vec<_> = found
        .iter()
        .map(|spare| json!({ "spare": spare, "low": spare.stock < threshold }))
        .collect();
    state
        .views
        .page("spares", &json!({ "spares": rows, "query": query.q }))
}

pub async fn add(
    state: web::Data<AppState>,
    form: web::Form<SpareForm>,
) -> Result<HttpResponse, AppError> {
    let spare = parse_form(form.into_inner())?;
    store::with_connection(&state.config.database_path, move |conn| {
        Ok(spares::insert(conn, &spare)?)
    })
    .await?;
    Ok(see_other(LIST_PATH))
}

pub async fn edit(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    form: web::Form<SpareForm>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let spare = parse_form(form.into_inner())?;
    let updated = store::with_connection(&state.config.database_path, move |conn| {
        Ok(spares::update(conn, id, &spare)?)
    })
    .await?;
    if !updated {
        return Err(AppError::NotFound(format!("spare {}", id)));
    }
    Ok(see_other(LIST_PATH))
}

pub async fn delete(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    store::with_connection(&state.config.database_path, move |conn| {
        Ok(spares::delete(conn, id)?)
    })
    .await?;
    Ok(see_other(LIST_PATH))
}
