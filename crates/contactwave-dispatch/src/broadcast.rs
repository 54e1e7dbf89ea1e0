// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The send pipeline: directory lookup, normalization, dispatch, report.
//!
//! Steps run strictly in order and every intermediate value is passed
//! explicitly; nothing is cached between sends. Concurrent sends are not
//! coordinated here, so callers serialize them.

use std::sync::Arc;

use contactwave_core::{
    Attachment, Channel, DispatchRequest, DispatchTransport, HeaderDirectory, RawRow, SendKind,
    WaveError,
};
use contactwave_recipients::{normalize, normalize_test, resolve, ColumnRole};
use contactwave_report::{to_report, Report};
use tracing::{info, warn};

use crate::router::{build_request, check_content};

/// What a completed send hands back to the user.
#[derive(Debug, Clone)]
pub struct BroadcastOutcome {
    /// Notice text returned by the server.
    pub notice: String,
    pub report: Report,
}

/// Runs bulk and test sends against a directory and a transport.
#[derive(Clone)]
pub struct Broadcaster {
    directory: Arc<dyn HeaderDirectory>,
    transport: Arc<dyn DispatchTransport>,
}

impl Broadcaster {
    pub fn new(directory: Arc<dyn HeaderDirectory>, transport: Arc<dyn DispatchTransport>) -> Self {
        Self {
            directory,
            transport,
        }
    }

    /// Sends to the selected rows of the active data source.
    ///
    /// Content and selection are validated before any network call.
    pub async fn send_bulk(
        &self,
        channel: Channel,
        message: &str,
        rows: &[RawRow],
        attachments: Vec<Attachment>,
    ) -> Result<BroadcastOutcome, WaveError> {
        check_content(message, &attachments)?;
        if rows.is_empty() {
            return Err(WaveError::InvalidRequest(
                "select at least one recipient".into(),
            ));
        }

        let source = self.directory.active_source().await?;
        info!(source_id = %source, "active data source resolved");
        let headers = self.directory.headers(&source).await?;

        if resolve(ColumnRole::Phone, &headers).is_none() {
            warn!(
                source_id = %source,
                "no phone column found, recipients will be sent with an empty phone"
            );
        }

        let recipients = normalize(rows, &headers);
        let request = build_request(
            channel,
            SendKind::Bulk,
            message,
            recipients,
            attachments,
            source,
        )?;
        self.dispatch(request).await
    }

    /// Sends to a single manually entered number.
    pub async fn send_test(
        &self,
        channel: Channel,
        message: &str,
        phone: &str,
        attachments: Vec<Attachment>,
    ) -> Result<BroadcastOutcome, WaveError> {
        check_content(message, &attachments)?;
        let recipient = normalize_test(phone);
        if recipient.phone().is_empty() {
            return Err(WaveError::InvalidRequest(
                "enter a test mobile number".into(),
            ));
        }

        let source = self.directory.active_source().await?;
        let request = build_request(
            channel,
            SendKind::Test,
            message,
            vec![recipient],
            attachments,
            source,
        )?;
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: DispatchRequest) -> Result<BroadcastOutcome, WaveError> {
        let submitted = request.recipients.len();
        info!(
            channel = %request.channel,
            kind = %request.kind,
            recipients = submitted,
            attachments = request.attachments.len(),
            "dispatching broadcast"
        );

        let response = self.transport.send(&request).await?;
        if response.results.len() != submitted {
            warn!(
                submitted,
                received = response.results.len(),
                "transport returned a different number of outcomes than recipients"
            );
        }

        let report = to_report(response.results);
        info!(
            success = report.success_count(),
            failure = report.failure_count(),
            "delivery report ready"
        );
        Ok(BroadcastOutcome {
            notice: response.message,
            report,
        })
    }
}
