//! Supplier screens, always scoped to one spare part.
//!
//! A supplier belongs to exactly one spare. The listing still works for a
//! spare that has been deleted so orphaned suppliers can be cleaned up.

use crate::error::AppError;
use crate::services::{required, see_other};
use crate::state::AppState;
use crate::store::{self, spares, suppliers};
use actix_web::{web, HttpResponse};
use mms_common::model::supplier::NewSupplier;
use mms_common::requests::{SearchQuery, SupplierForm};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern")
});

/// Registers:
///
/// *   **`GET /suppliers_ui/{spare_id}?q=`**
/// *   **`POST /add_supplier_ui/{spare_id}`**
/// *   **`POST /edit_supplier/{supplier_id}/{spare_id}`**
/// *   **`POST /delete_supplier/{supplier_id}/{spare_id}`**
///
/// The trailing `spare_id` of the write routes only selects the page to
/// return to.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/suppliers_ui/{spare_id}", web::get().to(list))
        .route("/add_supplier_ui/{spare_id}", web::post().to(add))
        .route("/edit_supplier/{supplier_id}/{spare_id}", web::post().to(edit))
        .route(
            "/delete_supplier/{supplier_id}/{spare_id}",
            web::post().to(delete),
        );
}

fn list_path(spare_id: i64) -> String {
    format!("/suppliers_ui/{}", spare_id)
}

/// Trimmed name and address, rejecting blanks and malformed addresses.
pub(crate) fn parse_form(form: &SupplierForm) -> Result<(String, String), AppError> {
    let name = required("name", &form.name)?;
    let email = required("email", &form.email)?;
    if !EMAIL_RE.is_match(&email) {
        return Err(AppError::Validation(format!(
            "{:?} is not a valid email address",
            email
        )));
    }
    Ok((name, email))
}

pub async fn list(
    state: web::Data<AppState>,
    spare_id: web::Path<i64>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let spare_id = spare_id.into_inner();
    let query = query.into_inner();
    let term = query.term().map(str::to_string);
    let (spare, found) = store::with_connection(&state.config.database_path, move |conn| {
        Ok((
            spares::get(conn, spare_id)?,
            suppliers::list_for_spare(conn, spare_id, term.as_deref())?,
        ))
    })
    .await?;
    state.views.page(
        "suppliers",
        &json!({
            "spare": spare,
            "spare_id": spare_id,
            "query": query.q,
            "suppliers": found,
        }),
    )
}

pub async fn add(
    state: web::Data<AppState>,
    spare_id: web::Path<i64>,
    form: web::Form<SupplierForm>,
) -> Result<HttpResponse, AppError> {
    let spare_id = spare_id.into_inner();
    let (name, email) = parse_form(&form)?;
    let supplier = NewSupplier {
        spare_id,
        name,
        email,
    };
    store::with_connection(&state.config.database_path, move |conn| {
        if spares::get(conn, spare_id)?.is_none() {
            return Err(AppError::NotFound(format!("spare {}", spare_id)));
        }
        Ok(suppliers::insert(conn, &supplier)?)
    })
    .await?;
    Ok(see_other(&list_path(spare_id)))
}

pub async fn edit(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    form: web::Form<SupplierForm>,
) -> Result<HttpResponse, AppError> {
    let (supplier_id, spare_id) = path.into_inner();
    let (name, email) = parse_form(&form)?;
    let updated = store::with_connection(&state.config.database_path, move |conn| {
        Ok(suppliers::update(conn, supplier_id, &name, &email)?)
    })
    .await?;
    if !updated {
        return Err(AppError::NotFound(format!("supplier {}", supplier_id)));
    }
    Ok(see_other(&list_path(spare_id)))
}

pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (supplier_id, spare_id) = path.into_inner();
    store::with_connection(&state.config.database_path, move |conn| {
        Ok(suppliers::delete(conn, supplier_id)?)
    })
    .await?;
    Ok(see_other(&list_path(spare_id)))
}
