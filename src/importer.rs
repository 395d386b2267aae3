//! Target-list import from a delimited text export. The only contract:
//! yield `{title, url}` pairs filtered to the accepted profile-URL shape.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use pagereach_core_types::{Target, TargetFilter};

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub targets: Vec<Target>,
    /// Rows dropped for shape or URL reasons.
    pub rejected: usize,
    /// Data rows inspected (header excluded).
    pub scanned: usize,
}

/// Read a CSV export (`order,title,url` with a header row; two-column
/// `title,url` files are accepted too) and keep the rows whose URL passes
/// the profile filter.
pub fn import_targets(path: &Path, filter: &TargetFilter) -> Result<ImportSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open target list {}", path.display()))?;

    let mut summary = ImportSummary::default();
    for record in reader.records() {
        let record = record.context("malformed row in target list")?;
        summary.scanned += 1;

        let (title, url) = match record.len() {
            0 | 1 => {
                summary.rejected += 1;
                continue;
            }
            2 => (record[0].trim(), record[1].trim()),
            _ => (record[1].trim(), record[2].trim()),
        };

        if url.is_empty() || !filter.accepts(url) {
            debug!(url, "row rejected by profile filter");
            summary.rejected += 1;
            continue;
        }
        match Target::new(title, url) {
            Ok(target) => summary.targets.push(target),
            Err(err) => {
                debug!(url, error = %err, "row rejected, unparseable url");
                summary.rejected += 1;
            }
        }
    }
    Ok(summary)
}
