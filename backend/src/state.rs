//! Read-only state shared by every worker.

use crate::config::AppConfig;
use crate::purchase::notifier::Notifier;
use crate::views::Views;
use std::sync::Arc;

/// Built once in `main` and cloned into each actix worker as `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub views: Arc<Views>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: AppConfig, views: Views, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            views: Arc::new(views),
            notifier,
        }
    }
}
