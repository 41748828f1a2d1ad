// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The `import` subcommand.

use hotel_desk_api::{
    CsvImportResult, CsvKind, CsvPreviewResult, CsvRowResult, CsvRowStatus, import_csv,
    preview_csv,
};
use hotel_desk_persistence::Persistence;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// CSV files named on the command line.
#[derive(Debug, Default)]
pub struct ImportFiles {
    pub rooms: Option<PathBuf>,
    pub guests: Option<PathBuf>,
    pub bookings: Option<PathBuf>,
}

impl ImportFiles {
    /// Files in dependency order: bookings reference guests and rooms.
    fn ordered(&self) -> Vec<(CsvKind, &Path)> {
        [
            (CsvKind::Rooms, self.rooms.as_deref()),
            (CsvKind::Guests, self.guests.as_deref()),
            (CsvKind::Bookings, self.bookings.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|p| (kind, p)))
        .collect()
    }
}

/// Per-file counts reported by the import command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub total_rows: usize,
    /// Valid rows when previewing, imported rows otherwise.
    pub accepted: usize,
    pub rejected: usize,
}

fn log_rejected_rows(kind: CsvKind, rows: &[CsvRowResult]) {
    for row in rows {
        if matches!(row.status, CsvRowStatus::Invalid | CsvRowStatus::Failed) {
            warn!(
                kind = kind.as_str(),
                row = row.row_number,
                record = row.description.as_deref().unwrap_or("-"),
                errors = %row.errors.join("; "),
                "Row rejected"
            );
        }
    }
}

/// Previews or imports one CSV document.
///
/// # Errors
///
/// Returns an error if the document's headers cannot be read.
pub fn process_csv(
    persistence: &mut Persistence,
    kind: CsvKind,
    content: &str,
    preview: bool,
) -> Result<ImportSummary, hotel_desk_api::ApiError> {
    let summary: ImportSummary = if preview {
        let result: CsvPreviewResult = preview_csv(persistence, kind, content)?;
        log_rejected_rows(kind, &result.rows);
        ImportSummary {
            total_rows: result.total_rows,
            accepted: result.valid_count,
            rejected: result.invalid_count,
        }
    } else {
        let result: CsvImportResult = import_csv(persistence, kind, content)?;
        log_rejected_rows(kind, &result.rows);
        ImportSummary {
            total_rows: result.total_rows,
            accepted: result.imported_count,
            rejected: result.failed_count,
        }
    };
    info!(
        kind = kind.as_str(),
        preview,
        total = summary.total_rows,
        accepted = summary.accepted,
        rejected = summary.rejected,
        "Processed CSV file"
    );
    Ok(summary)
}

/// Runs the import command over every file given.
///
/// In preview mode nothing is written, so booking rows are only checked
/// against guests and rooms already in the database.
///
/// # Errors
///
/// Returns an error if a file cannot be read or has unreadable headers.
pub fn run_import(
    persistence: &mut Persistence,
    files: &ImportFiles,
    preview: bool,
) -> Result<Vec<ImportSummary>, Box<dyn std::error::Error>> {
    let ordered: Vec<(CsvKind, &Path)> = files.ordered();
    if ordered.is_empty() {
        warn!("No CSV files given; nothing to import");
    }

    let mut summaries: Vec<ImportSummary> = Vec::with_capacity(ordered.len());
    for (kind, path) in ordered {
        info!(kind = kind.as_str(), path = %path.display(), "Reading CSV file");
        let content: String = std::fs::read_to_string(path)?;
        summaries.push(process_csv(persistence, kind, &content, preview)?);
    }
    Ok(summaries)
}
