// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for ContactWave.
//!
//! This crate provides the data model of a broadcast (headers, rows,
//! recipients, requests, outcomes), the shared error type, and the adapter
//! traits for the remote header directory and dispatch transport.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WaveError;
pub use types::{
    Attachment, Channel, DeliveryOutcome, DeliveryStatus, DispatchRequest, DispatchResponse,
    HeaderSet, RawRow, Recipient, RecipientIdentity, SendKind, SourceId,
};

pub use traits::{DispatchTransport, HeaderDirectory};
