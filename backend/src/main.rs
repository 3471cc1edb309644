mod config;
mod error;
mod purchase;
mod services;
mod state;
mod store;
#[cfg(test)]
mod test_support;
mod views;

use crate::config::AppConfig;
use crate::purchase::notifier::SmtpNotifier;
use crate::services::static_files::serve_embedded;
use crate::state::AppState;
use crate::views::Views;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring .env: {}", e);
        }
    }
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    if config.smtp.username.is_empty() {
        warn!("SMTP_USERNAME is not set, purchase request mail will be rejected by the server");
    }

    let conn = store::open(&config.database_path).map_err(io::Error::other)?;
    store::init_schema(&conn).map_err(io::Error::other)?;
    drop(conn);
    info!("Database ready at {}", config.database_path.display());

    let views = Views::load().map_err(io::Error::other)?;
    let notifier = Arc::new(SmtpNotifier::new(config.smtp.clone()));

    let host = config.host.clone();
    let port = config.port;
    let url = format!("http://{}:{}", host, port);

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!(
        "Low stock threshold {}, pipeline encoding {}",
        config.low_stock_threshold, config.pipeline_encoding
    );
    let state = AppState::new(config, views, notifier);

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
