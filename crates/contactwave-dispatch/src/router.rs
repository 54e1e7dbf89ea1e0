// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel routing and dispatch request construction.

use contactwave_core::{
    Attachment, Channel, DispatchRequest, Recipient, SendKind, SourceId, WaveError,
};

/// Server path that delivers over `channel`.
pub const fn endpoint(channel: Channel) -> &'static str {
    match channel {
        Channel::Sms => "/send-sms",
        Channel::Whatsapp => "/send-whatsapp",
        Channel::Telegram => "/send-telegram",
    }
}

/// Fails unless there is a non-blank message or at least one attachment.
pub fn check_content(message: &str, attachments: &[Attachment]) -> Result<(), WaveError> {
    if message.trim().is_empty() && attachments.is_empty() {
        return Err(WaveError::InvalidRequest(
            "enter a message or attach at least one image".into(),
        ));
    }
    if let Some(bad) = attachments
        .iter()
        .find(|a| !a.content_type.starts_with("image/"))
    {
        return Err(WaveError::InvalidRequest(format!(
            "{}: only image attachments are accepted, got {}",
            bad.file_name, bad.content_type
        )));
    }
    Ok(())
}

/// Build and validate a [`DispatchRequest`].
///
/// A bulk send needs at least one recipient. A test send needs exactly one
/// recipient with a non-empty phone number. Either kind needs a message or
/// an attachment.
pub fn build_request(
    channel: Channel,
    kind: SendKind,
    message: impl Into<String>,
    recipients: Vec<Recipient>,
    attachments: Vec<Attachment>,
    source_id: SourceId,
) -> Result<DispatchRequest, WaveError> {
    let message = message.into();
    check_content(&message, &attachments)?;

    match kind {
        SendKind::Bulk if recipients.is_empty() => {
            return Err(WaveError::InvalidRequest(
                "select at least one recipient".into(),
            ));
        }
        SendKind::Test if recipients.len() != 1 => {
            return Err(WaveError::InvalidRequest(format!(
                "a test send has exactly one recipient, got {}",
                recipients.len()
            )));
        }
        SendKind::Test if recipients[0].phone().is_empty() => {
            return Err(WaveError::InvalidRequest(
                "enter a test mobile number".into(),
            ));
        }
        _ => {}
    }

    Ok(DispatchRequest {
        channel,
        kind,
        message,
        recipients,
        attachments,
        source_id,
    })
}
