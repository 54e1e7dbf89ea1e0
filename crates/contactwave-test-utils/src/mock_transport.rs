// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock dispatch transport.
//!
//! `MockTransport` records every request it receives. Answers come from a
//! script when one is queued; otherwise, in echo mode, it reports `success`
//! for each recipient with a phone number and `failure` for the rest.

use std::collections::VecDeque;

use async_trait::async_trait;
use contactwave_core::{
    DeliveryOutcome, DeliveryStatus, DispatchRequest, DispatchResponse, DispatchTransport,
    WaveError,
};
use tokio::sync::Mutex;

enum Fallback {
    Echo,
    Fail(String),
}

pub struct MockTransport {
    script: Mutex<VecDeque<Result<DispatchResponse, WaveError>>>,
    sent: Mutex<Vec<DispatchRequest>>,
    fallback: Fallback,
}

impl MockTransport {
    /// Echo mode: one outcome per recipient, decided by phone presence.
    pub fn echo() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            fallback: Fallback::Echo,
        }
    }

    /// Every call fails with a transport error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fallback: Fallback::Fail(message.to_string()),
            ..Self::echo()
        }
    }

    /// Answers the first call with `response`, then falls back to echo.
    pub fn scripted(response: Result<DispatchResponse, WaveError>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([response])),
            ..Self::echo()
        }
    }

    /// Queue another scripted answer.
    pub async fn push_response(&self, response: Result<DispatchResponse, WaveError>) {
        self.script.lock().await.push_back(response);
    }

    /// All requests received so far.
    pub async fn sent_requests(&self) -> Vec<DispatchRequest> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

fn echo_response(request: &DispatchRequest) -> DispatchResponse {
    let results = request
        .recipients
        .iter()
        .map(|r| DeliveryOutcome {
            identity: r.identity().clone(),
            status: if r.phone().is_empty() {
                DeliveryStatus::Failure
            } else {
                DeliveryStatus::Success
            },
        })
        .collect();
    DispatchResponse {
        message: format!("{} messages processed", request.recipients.len()),
        results,
    }
}

#[async_trait]
impl DispatchTransport for MockTransport {
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchResponse, WaveError> {
        self.sent.lock().await.push(request.clone());

        if let Some(scripted) = self.script.lock().await.pop_front() {
            return scripted;
        }
        match &self.fallback {
            Fallback::Echo => Ok(echo_response(request)),
            Fallback::Fail(message) => Err(WaveError::transport(message.clone())),
        }
    }
}
