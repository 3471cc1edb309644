mod generate;
mod send;

use actix_web::web;

const API_PATH: &str = "/generate_pr";

/// Configures and returns the `Scope` for document downloads:
/// **`GET /generate_pr/{encoding}`** with `pdf`, `excel` or `csv`.
pub fn configure_routes() -> actix_web::Scope {
    web::scope(API_PATH).route("/{encoding}", web::get().to(generate::process))
}

/// **`GET /send_pr_ui`**: generate the request and mail it to every supplier
/// of the selected spares. Lives at the root, outside the download scope.
pub fn send_resource() -> actix_web::Resource {
    web::resource("/send_pr_ui").route(web::get().to(send::process))
}
