// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery reports for ContactWave.
//!
//! [`Report`] wraps the per-recipient outcomes returned by a dispatch call,
//! in submission order, with success and failure counts. Exporters render a
//! report into a portable byte form; rasterized PDF output is left to the
//! presentation layer.

pub mod export;
pub mod reconcile;

pub use export::{CsvExporter, ReportExporter, TableExporter, REPORT_COLUMNS};
pub use reconcile::{to_report, Report};
