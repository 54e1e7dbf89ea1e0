// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipient resolution for ContactWave.
//!
//! Spreadsheets from different sources spell their columns differently.
//! [`columns`] maps each semantic [`ColumnRole`] to a fixed, ordered alias
//! list and finds it in a header set; [`normalize`] turns selected rows into
//! [`Recipient`](contactwave_core::Recipient) records using those positions.
//! Everything here is pure and performs no I/O.

pub mod columns;
pub mod normalize;

pub use columns::{resolve, ColumnLayout, ColumnRole};
pub use normalize::{normalize, normalize_row, normalize_test};
