// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Header directory trait: which data source is active and what its columns are.

use async_trait::async_trait;

use crate::error::WaveError;
use crate::types::{HeaderSet, SourceId};

/// Read-only view of the account's contact spreadsheets.
///
/// Both queries are idempotent. Callers issue them in order (source, then
/// headers) before any normalization work.
#[async_trait]
pub trait HeaderDirectory: Send + Sync {
    /// Returns the currently active data source.
    ///
    /// Fails with [`WaveError::NoActiveSource`] when none is configured.
    async fn active_source(&self) -> Result<SourceId, WaveError>;

    /// Returns the ordered column names of `source`.
    ///
    /// Fails with [`WaveError::EmptyHeaderSet`] when the source has no columns.
    async fn headers(&self, source: &SourceId) -> Result<HeaderSet, WaveError>;
}
