// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result reconciliation: outcome list to [`Report`].

use contactwave_core::{DeliveryOutcome, DeliveryStatus};
use serde::Serialize;

/// Ordered delivery outcomes plus aggregate counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    outcomes: Vec<DeliveryOutcome>,
    success: usize,
    failure: usize,
}

impl Report {
    /// Outcomes in the order the recipients were submitted.
    pub fn outcomes(&self) -> &[DeliveryOutcome] {
        &self.outcomes
    }

    pub fn success_count(&self) -> usize {
        self.success
    }

    pub fn failure_count(&self) -> usize {
        self.failure
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes that did not deliver.
    pub fn failures(&self) -> impl Iterator<Item = &DeliveryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == DeliveryStatus::Failure)
    }
}

/// Build a report from transport outcomes, keeping their order.
///
/// Counts are taken in a single pass; outcomes are not modified.
pub fn to_report(outcomes: Vec<DeliveryOutcome>) -> Report {
    let success = outcomes.iter().filter(|o| o.status.is_success()).count();
    let failure = outcomes.len() - success;
    Report {
        outcomes,
        success,
        failure,
    }
}
