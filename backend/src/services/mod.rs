//! HTTP surface of the application.
//!
//! Each sub-module registers its own routes through `configure_routes`.
//! Modules with a shared path prefix return an actix `Scope` instead.
//! Screens are plain HTML forms: successful writes answer with
//! `303 See Other` back to the list they came from.

pub mod dashboard;
pub mod logs;
pub mod machines;
pub mod purchase_requests;
pub mod spares;
pub mod static_files;
pub mod suppliers;

use crate::error::AppError;
use actix_web::http::header;
use actix_web::{web, HttpResponse};

/// Registers every application route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    dashboard::configure_routes(cfg);
    machines::configure_routes(cfg);
    spares::configure_routes(cfg);
    suppliers::configure_routes(cfg);
    logs::configure_routes(cfg);
    cfg.service(purchase_requests::configure_routes())
        .service(purchase_requests::send_resource());
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Trimmed form value that must not be blank.
pub(crate) fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

/// Trimmed form value, `None` when blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn parse_id(field: &str, value: &str) -> Result<i64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a numeric id, got {:?}", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_helpers() {
        assert_eq!(required("name", "  Lathe ").unwrap(), "Lathe");
        assert!(matches!(required("name", "   "), Err(AppError::Validation(_))));
        assert_eq!(optional(" "), None);
        assert_eq!(optional(" Hall B"), Some("Hall B".to_string()));
        assert_eq!(parse_id("machine_id", " 7 ").unwrap(), 7);
        assert!(parse_id("machine_id", "seven").is_err());
    }
}
