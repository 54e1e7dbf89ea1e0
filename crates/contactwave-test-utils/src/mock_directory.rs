// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock header directory.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use contactwave_core::{HeaderDirectory, HeaderSet, SourceId, WaveError};

/// Shared count of directory queries, readable after the mock is moved.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A directory with one fixed source and header set.
///
/// An empty header set makes `headers()` fail with `EmptyHeaderSet`, the
/// same as the real server.
pub struct MockDirectory {
    source: Option<SourceId>,
    headers: HeaderSet,
    calls: CallCounter,
}

impl MockDirectory {
    pub fn new(source: &str, headers: HeaderSet) -> Self {
        Self {
            source: Some(SourceId(source.to_string())),
            headers,
            calls: CallCounter::default(),
        }
    }

    /// A directory with no active source.
    pub fn without_source() -> Self {
        Self {
            source: None,
            headers: HeaderSet::default(),
            calls: CallCounter::default(),
        }
    }

    pub fn call_counter(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl HeaderDirectory for MockDirectory {
    async fn active_source(&self) -> Result<SourceId, WaveError> {
        self.calls.bump();
        self.source.clone().ok_or(WaveError::NoActiveSource)
    }

    async fn headers(&self, source: &SourceId) -> Result<HeaderSet, WaveError> {
        self.calls.bump();
        if self.headers.is_empty() {
            return Err(WaveError::EmptyHeaderSet {
                source_id: source.to_string(),
            });
        }
        Ok(self.headers.clone())
    }
}
