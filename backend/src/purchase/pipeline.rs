//! # Request Pipeline
//!
//! Select low-stock spares, render the purchase request, collect supplier
//! addresses and mail the document. Each step runs once. Two early exits are
//! ordinary outcomes rather than errors:
//!
//! 1. nothing is below the threshold: no document, no mail;
//! 2. no supplier is linked to the selected spares: the document stays on
//!    disk, no mail.
//!
//! Store and file failures abort with `AppError`. Mail failures never do; they
//! are carried in the outcome.

use crate::error::AppError;
use crate::purchase::document::{write_document, DocumentOutput, GeneratedDocument, PurchaseRequest};
use crate::purchase::notifier::{describe, Delivery, Notifier, NotifyError};
use crate::purchase::selector::select_low_stock;
use crate::store::suppliers;
use chrono::{Local, NaiveDate};
use log::info;
use mms_common::model::spare::Spare;
use mms_common::purchase::DocumentEncoding;
use rusqlite::Connection;
use std::collections::HashSet;

pub const NO_LOW_STOCK_MESSAGE: &str = "✅ No low-stock items";
pub const NO_SUPPLIERS_MESSAGE: &str = "❌ No suppliers linked";

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub threshold: i64,
    pub encoding: DocumentEncoding,
    /// Drop repeated addresses before mailing, keeping first occurrences.
    pub dedup_recipients: bool,
    pub output: DocumentOutput,
}

#[derive(Debug)]
pub enum PipelineOutcome {
    NoLowStock,
    NoSuppliersLinked {
        document: GeneratedDocument,
    },
    Notified {
        document: GeneratedDocument,
        result: Result<Delivery, NotifyError>,
    },
}

impl PipelineOutcome {
    pub fn message(&self) -> String {
        match self {
            PipelineOutcome::NoLowStock => NO_LOW_STOCK_MESSAGE.to_string(),
            PipelineOutcome::NoSuppliersLinked { .. } => NO_SUPPLIERS_MESSAGE.to_string(),
            PipelineOutcome::Notified { result, .. } => describe(result),
        }
    }

    /// True when the request ended without mail being handed to the server.
    pub fn is_failure(&self) -> bool {
        match self {
            PipelineOutcome::NoLowStock => false,
            PipelineOutcome::NoSuppliersLinked { .. } => true,
            PipelineOutcome::Notified { result, .. } => result.is_err(),
        }
    }

    pub fn document(&self) -> Option<&GeneratedDocument> {
        match self {
            PipelineOutcome::NoLowStock => None,
            PipelineOutcome::NoSuppliersLinked { document }
            | PipelineOutcome::Notified { document, .. } => Some(document),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn render(
    spares: &[Spare],
    threshold: i64,
    encoding: DocumentEncoding,
    output: &DocumentOutput,
) -> Result<GeneratedDocument, AppError> {
    let request = PurchaseRequest::from_spares(spares, threshold, today());
    write_document(&request, encoding, output)
}

/// Selection and rendering only, for direct downloads.
///
/// Returns `None` when no spare is below the threshold.
pub fn generate(
    conn: &Connection,
    threshold: i64,
    encoding: DocumentEncoding,
    output: &DocumentOutput,
) -> Result<Option<GeneratedDocument>, AppError> {
    let spares = select_low_stock(conn, threshold)?;
    if spares.is_empty() {
        return Ok(None);
    }
    render(&spares, threshold, encoding, output).map(Some)
}

/// Supplier addresses for `spares`, in spare order then supplier order.
pub fn collect_recipients(
    conn: &Connection,
    spares: &[Spare],
    dedup: bool,
) -> rusqlite::Result<Vec<String>> {
    let mut recipients = Vec::new();
    for spare in spares {
        recipients.extend(suppliers::emails_for_spare(conn, spare.id)?);
    }
    if dedup {
        let mut seen = HashSet::new();
        recipients.retain(|email| seen.insert(email.clone()));
    }
    Ok(recipients)
}

pub fn run(
    conn: &Connection,
    settings: &PipelineSettings,
    notifier: &dyn Notifier,
) -> Result<PipelineOutcome, AppError> {
    let spares = select_low_stock(conn, settings.threshold)?;
    if spares.is_empty() {
        info!("Purchase request skipped: no spare below {}", settings.threshold);
        return Ok(PipelineOutcome::NoLowStock);
    }

    let document = render(&spares, settings.threshold, settings.encoding, &settings.output)?;

    let recipients = collect_recipients(conn, &spares, settings.dedup_recipients)?;
    if recipients.is_empty() {
        info!(
            "Purchase request {} not sent: no supplier linked to {} spare(s)",
            document.file_name(),
            spares.len()
        );
        return Ok(PipelineOutcome::NoSuppliersLinked { document });
    }

    info!(
        "Mailing purchase request {} to {} recipient(s)",
        document.file_name(),
        recipients.len()
    );
    let result = notifier.send(&document, &recipients);
    Ok(PipelineOutcome::Notified { document, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purchase::document::tests::output_in;
    use crate::store::{memory, spares};
    use crate::test_support::RecordingNotifier;
    use mms_common::model::spare::NewSpare;
    use mms_common::model::supplier::NewSupplier;
    use std::path::Path;

    fn settings(dir: &Path) -> PipelineSettings {
        PipelineSettings {
            threshold: 5,
            encoding: DocumentEncoding::Csv,
            dedup_recipients: false,
            output: output_in(dir),
        }
    }

    fn seed_bolt_and_nut(conn: &Connection) {
        for (name, stock, location) in [("Bolt", 2, "A1"), ("Nut", 10, "A2")] {
            spares::insert(
                conn,
                &NewSpare {
                    name: name.into(),
                    stock,
                    location: location.into(),
                    machine_id: None,
                },
            )
            .unwrap();
        }
    }

    fn link(conn: &Connection, spare_id: i64, email: &str) {
        suppliers::insert(
            conn,
            &NewSupplier {
                spare_id,
                name: "Supplier".into(),
                email: email.into(),
            },
        )
        .unwrap();
    }

    fn generated_files(dir: &Path) -> usize {
        std::fs::read_dir(dir.join("generated"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[test]
    fn nothing_low_short_circuits_before_any_document() {
        let dir = tempfile::tempdir().unwrap();
        let conn = memory();
        spares::insert(
            &conn,
            &NewSpare {
                name: "Nut".into(),
                stock: 10,
                location: "A2".into(),
                machine_id: None,
            },
        )
        .unwrap();
        let notifier = RecordingNotifier::default();

        let outcome = run(&conn, &settings(dir.path()), &notifier).unwrap();

        assert!(matches!(outcome, PipelineOutcome::NoLowStock));
        assert_eq!(outcome.message(), "✅ No low-stock items");
        assert!(!outcome.is_failure());
        assert_eq!(generated_files(dir.path()), 0);
        assert!(notifier.calls().is_empty());
    }

    #[test]
    fn no_linked_supplier_keeps_document_and_skips_mail() {
        let dir = tempfile::tempdir().unwrap();
        let conn = memory();
        seed_bolt_and_nut(&conn);
        // Linked to the spare that is not low.
        link(&conn, 2, "nuts@x.com");
        let notifier = RecordingNotifier::default();

        let outcome = run(&conn, &settings(dir.path()), &notifier).unwrap();

        assert!(matches!(outcome, PipelineOutcome::NoSuppliersLinked { .. }));
        assert_eq!(outcome.message(), "❌ No suppliers linked");
        assert!(outcome.is_failure());
        assert!(outcome.document().unwrap().path.exists());
        assert!(notifier.calls().is_empty());
    }

    #[test]
    fn mails_exactly_the_linked_supplier() {
        let dir = tempfile::tempdir().unwrap();
        let conn = memory();
        seed_bolt_and_nut(&conn);
        link(&conn, 1, "s@x.com");
        let notifier = RecordingNotifier::default();

        let outcome = run(&conn, &settings(dir.path()), &notifier).unwrap();

        assert_eq!(notifier.calls(), vec![vec!["s@x.com".to_string()]]);
        assert_eq!(outcome.message(), "✅ Email sent to s@x.com");
        assert!(!outcome.is_failure());

        let document = outcome.document().unwrap();
        let written = std::fs::read_to_string(&document.path).unwrap();
        assert_eq!(
            written,
            "ID,Name,Stock,Location,Suggested Qty\n1,Bolt,2,A1,8\n"
        );
    }

    #[test]
    fn mail_failure_is_an_outcome_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let conn = memory();
        seed_bolt_and_nut(&conn);
        link(&conn, 1, "s@x.com");

        let outcome = run(&conn, &settings(dir.path()), &RecordingNotifier::failing()).unwrap();

        assert!(outcome.is_failure());
        assert_eq!(outcome.message(), "❌ Failed to send email: no recipients");
        assert!(outcome.document().unwrap().path.exists());
    }

    #[test]
    fn duplicates_kept_unless_dedup_enabled() {
        let conn = memory();
        seed_bolt_and_nut(&conn);
        spares::insert(
            &conn,
            &NewSpare {
                name: "Washer".into(),
                stock: 0,
                location: "A3".into(),
                machine_id: None,
            },
        )
        .unwrap();
        link(&conn, 3, "b@x.com");
        link(&conn, 1, "a@x.com");
        link(&conn, 3, "a@x.com");
        link(&conn, 1, "a@x.com");
        let low = select_low_stock(&conn, 5).unwrap();

        assert_eq!(
            collect_recipients(&conn, &low, false).unwrap(),
            ["a@x.com", "a@x.com", "b@x.com", "a@x.com"]
        );
        assert_eq!(
            collect_recipients(&conn, &low, true).unwrap(),
            ["a@x.com", "b@x.com"]
        );
    }

    #[test]
    fn generate_returns_none_when_nothing_is_low() {
        let dir = tempfile::tempdir().unwrap();
        let conn = memory();
        let output = output_in(dir.path());

        assert!(generate(&conn, 5, DocumentEncoding::Excel, &output)
            .unwrap()
            .is_none());

        seed_bolt_and_nut(&conn);
        let document = generate(&conn, 5, DocumentEncoding::Excel, &output)
            .unwrap()
            .unwrap();
        assert_eq!(document.encoding, DocumentEncoding::Excel);
        assert!(document.path.exists());
    }
}
