//! CSV attribute import: reconcile parsed rows against the store's files.
//!
//! Rows are applied one at a time in file order. A row naming an unknown
//! file, or whose update the service rejects, is recorded in the summary
//! and the import moves on.

use crate::csv::{parse_import, ImportRow};
use crate::error::AdminResult;
use crate::session::Session;
use crate::vstore::VectorStoreApi;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRow {
    pub file_name: String,
    pub reason: String,
}

/// Outcome of one import, in input row order within each bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub succeeded: Vec<String>,
    pub not_found: Vec<String>,
    pub failed: Vec<FailedRow>,
    /// Set when reloading the file list after the import failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_error: Option<String>,
}

impl ImportSummary {
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn not_found_count(&self) -> usize {
        self.not_found.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded_count() + self.not_found_count() + self.failed_count()
    }

    /// True when every row was applied.
    pub fn is_clean(&self) -> bool {
        self.not_found.is_empty() && self.failed.is_empty()
    }
}

/// Apply parsed rows against the session's current file list.
pub async fn reconcile<A: VectorStoreApi>(
    session: &mut Session<A>,
    rows: Vec<ImportRow>,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for row in rows {
        let Some(file_id) = session
            .index()
            .find_by_name(&row.file_name)
            .map(|r| r.id.clone())
        else {
            warn!(file_name = %row.file_name, "no file matches import row");
            summary.not_found.push(row.file_name);
            continue;
        };

        match session.update_attributes(&file_id, row.attributes).await {
            Ok(()) => summary.succeeded.push(row.file_name),
            Err(e) => {
                warn!(file_name = %row.file_name, error = %e, "import row failed");
                summary.failed.push(FailedRow {
                    file_name: row.file_name,
                    reason: e.to_string(),
                });
            }
        }
    }
    summary
}

/// Parse `csv_text`, apply its rows, then reload the file list.
///
/// Parse-stage errors are returned before any update is attempted.
pub async fn run_import<A: VectorStoreApi>(
    session: &mut Session<A>,
    csv_text: &str,
) -> AdminResult<ImportSummary> {
    let rows = parse_import(csv_text)?;
    info!(rows = rows.len(), "importing attributes");

    let mut summary = reconcile(session, rows).await;
    // Per-row notices are folded into the summary.
    session.take_notices();

    if let Err(e) = session.refresh().await {
        warn!(error = %e, "could not reload file list after import");
        summary.refresh_error = Some(e.to_string());
    }
    info!(
        succeeded = summary.succeeded_count(),
        not_found = summary.not_found_count(),
        failed = summary.failed_count(),
        "import finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts() {
        let summary = ImportSummary {
            succeeded: vec!["a.pdf".into()],
            not_found: vec!["b".into(), "c".into()],
            failed: vec![FailedRow {
                file_name: "d.pdf".into(),
                reason: "HTTP 500".into(),
            }],
            refresh_error: None,
        };
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.not_found_count(), 2);
        assert!(!summary.is_clean());
        assert!(ImportSummary::default().is_clean());
    }
}
