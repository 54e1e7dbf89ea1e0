// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report exporters.
//!
//! Every exporter lays out the same columns in the same order, so any
//! renderer downstream (including a PDF rasterizer) can rely on it.

use contactwave_core::{DeliveryOutcome, WaveError};
use tracing::debug;

use crate::reconcile::Report;

/// Column titles, in output order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "First Name",
    "Middle Name",
    "Last Name",
    "Mobile",
    "Email",
    "Message Sent",
];

/// Renders a [`Report`] into a binary document.
pub trait ReportExporter {
    /// MIME type of the produced document.
    fn content_type(&self) -> &'static str;

    fn export(&self, report: &Report) -> Result<Vec<u8>, WaveError>;
}

/// Cell values of one outcome in [`REPORT_COLUMNS`] order.
fn row_cells(outcome: &DeliveryOutcome) -> [&str; 6] {
    let id = &outcome.identity;
    [
        id.first_name.as_str(),
        id.middle_name.as_str(),
        id.last_name.as_str(),
        id.phone.as_str(),
        id.email.as_str(),
        if outcome.status.is_success() {
            "success"
        } else {
            "failure"
        },
    ]
}

/// Comma-separated export with a header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl ReportExporter for CsvExporter {
    fn content_type(&self) -> &'static str {
        "text/csv"
    }

    fn export(&self, report: &Report) -> Result<Vec<u8>, WaveError> {
        let csv_err = |e: csv::Error| WaveError::Export {
            message: format!("failed to write CSV report: {e}"),
            source: Some(Box::new(e)),
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(REPORT_COLUMNS).map_err(csv_err)?;
        for outcome in report.outcomes() {
            writer.write_record(row_cells(outcome)).map_err(csv_err)?;
        }
        let bytes = writer.into_inner().map_err(|e| WaveError::Export {
            message: format!("failed to flush CSV report: {e}"),
            source: None,
        })?;
        debug!(rows = report.len(), bytes = bytes.len(), "CSV report exported");
        Ok(bytes)
    }
}

/// Fixed-width text table for terminals, followed by a totals line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExporter;

impl ReportExporter for TableExporter {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn export(&self, report: &Report) -> Result<Vec<u8>, WaveError> {
        let rows: Vec<[&str; 6]> = report.outcomes().iter().map(row_cells).collect();

        let mut widths = REPORT_COLUMNS.map(|c| c.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let mut push_line = |cells: &[&str; 6]| {
            let line: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        };

        push_line(&REPORT_COLUMNS);
        let rule = widths.map(|w| "-".repeat(w));
        push_line(&rule.each_ref().map(String::as_str));
        for row in &rows {
            push_line(row);
        }

        out.push_str(&format!(
            "\n{} sent, {} failed\n",
            report.success_count(),
            report.failure_count()
        ));
        debug!(rows = report.len(), "table report rendered");
        Ok(out.into_bytes())
    }
}
