//! Fixtures shared by handler and pipeline tests.

use crate::config::AppConfig;
use crate::purchase::document::GeneratedDocument;
use crate::purchase::notifier::{Delivery, Notifier, NotifyError};
use crate::state::AppState;
use crate::store;
use crate::views::Views;
use mms_common::model::spare::NewSpare;
use mms_common::model::supplier::NewSupplier;
use rusqlite::Connection;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Records every call and answers with a canned result.
#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(
        &self,
        _document: &GeneratedDocument,
        recipients: &[String],
    ) -> Result<Delivery, NotifyError> {
        self.calls.lock().unwrap().push(recipients.to_vec());
        if self.fail {
            Err(NotifyError::NoRecipients)
        } else {
            Ok(Delivery {
                recipients: recipients.to_vec(),
            })
        }
    }
}

/// Application state backed by a database file in a temporary directory.
/// Pipeline documents are written as CSV so no fonts are needed.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default())
    }

    pub fn with_notifier(notifier: RecordingNotifier) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let vars: HashMap<&str, String> = HashMap::from([
            ("DATABASE_PATH", dir.path().join("mms.sqlite").display().to_string()),
            ("MMS_OUTPUT_DIR", dir.path().join("generated").display().to_string()),
            ("MMS_FONTS_DIR", dir.path().join("fonts").display().to_string()),
            ("MMS_PR_ENCODING", "csv".to_string()),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("config");

        let conn = store::open(&config.database_path).expect("open db");
        store::init_schema(&conn).expect("schema");

        let notifier = Arc::new(notifier);
        let state = AppState::new(
            config,
            Views::load().expect("templates"),
            notifier.clone(),
        );
        Self {
            dir,
            state,
            notifier,
        }
    }

    pub fn conn(&self) -> Connection {
        store::open(&self.state.config.database_path).expect("open db")
    }

    pub fn add_spare(&self, name: &str, stock: i64, location: &str) -> i64 {
        store::spares::insert(
            &self.conn(),
            &NewSpare {
                name: name.into(),
                stock,
                location: location.into(),
                machine_id: None,
            },
        )
        .expect("insert spare")
    }

    pub fn add_supplier(&self, spare_id: i64, name: &str, email: &str) -> i64 {
        store::suppliers::insert(
            &self.conn(),
            &NewSupplier {
                spare_id,
                name: name.into(),
                email: email.into(),
            },
        )
        .expect("insert supplier")
    }
}
