// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait for delivering a broadcast to the messaging server.

use async_trait::async_trait;

use crate::error::WaveError;
use crate::types::{DispatchRequest, DispatchResponse};

/// Delivers a whole [`DispatchRequest`] in a single call.
///
/// The remote side fans out per recipient and answers with one outcome per
/// recipient in submission order. Partial delivery failure shows up only as
/// `failure` outcomes; an `Err` means the batch was not accepted at all.
#[async_trait]
pub trait DispatchTransport: Send + Sync {
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchResponse, WaveError>;
}
