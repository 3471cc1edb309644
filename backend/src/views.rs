//! Server-side HTML pages.
//!
//! Templates live in `backend/templates` and are compiled into the binary.
//! Files whose name starts with `_` are registered as partials under the
//! remaining name (`_header.hbs` becomes `{{> header}}`).

use crate::error::AppError;
use actix_web::HttpResponse;
use handlebars::{Handlebars, TemplateError};
use include_dir::{include_dir, Dir};
use log::debug;
use serde::Serialize;

static TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn load() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        for file in TEMPLATES.files() {
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("hbs") {
                continue;
            }
            let (Some(stem), Some(source)) = (
                path.file_stem().and_then(|s| s.to_str()),
                file.contents_utf8(),
            ) else {
                continue;
            };
            match stem.strip_prefix('_') {
                Some(partial) => registry.register_partial(partial, source)?,
                None => registry.register_template_string(stem, source)?,
            }
            debug!("Registered template {}", path.display());
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, AppError> {
        Ok(self.registry.render(name, data)?)
    }

    /// Renders `name` as a `200 OK` HTML page.
    pub fn page<T: Serialize>(&self, name: &str, data: &T) -> Result<HttpResponse, AppError> {
        Ok(html(self.render(name, data)?))
    }
}

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
