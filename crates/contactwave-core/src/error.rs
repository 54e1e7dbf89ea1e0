// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for ContactWave.

use thiserror::Error;

/// The primary error type used across all ContactWave adapters and operations.
#[derive(Debug, Error)]
pub enum WaveError {
    /// No data source is currently marked active for the account.
    #[error("no active data source is configured")]
    NoActiveSource,

    /// The active data source exists but has no columns.
    #[error("data source {source_id} has no column headers")]
    EmptyHeaderSet { source_id: String },

    /// A dispatch request (or one of its parts) failed local validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The remote transport rejected the call or could not be reached.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Login was refused or the supplied credentials are malformed.
    #[error("session error: {message}")]
    Session { message: String },

    /// A report could not be rendered by an exporter.
    #[error("export error: {message}")]
    Export {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid TOML, bad URL, missing values).
    #[error("configuration error: {0}")]
    Config(String),
}

impl WaveError {
    /// Shorthand for a transport error without an underlying cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// True for errors that stem from account or client configuration.
    ///
    /// These are fatal to a send attempt and are never retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoActiveSource | Self::EmptyHeaderSet { .. } | Self::Config(_)
        )
    }

    /// True for errors raised before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    /// True when the remote call itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
