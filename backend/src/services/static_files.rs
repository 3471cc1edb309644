use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Fallback service: serves assets compiled in from `backend/static`.
pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');

    match STATIC_DIR.get_file(path) {
        Some(file) if !path.is_empty() => {
            let mime = from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        _ => HttpResponse::NotFound().body("Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn serves_stylesheet_and_404s_the_rest() {
        let app = test::init_service(
            App::new().default_service(web::route().to(serve_embedded)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/style.css").to_request()).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap().to_str().unwrap(),
            "text/css"
        );

        let resp = test::call_service(&app, test::TestRequest::get().uri("/nope.js").to_request()).await;
        assert_eq!(resp.status(), 404);
    }
}
