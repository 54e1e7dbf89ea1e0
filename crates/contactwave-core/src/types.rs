// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the directory, normalizer, router, and report.

use std::fmt;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};

use crate::error::WaveError;

/// Opaque handle to the active data source (the spreadsheet id on the server).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub String);

impl SourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered column names of one data source.
///
/// Order defines the positional index of every cell in a [`RawRow`], so the
/// set is never reordered or edited once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderSet(Vec<String>);

impl HeaderSet {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Index of the first column whose name equals `name` exactly.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One spreadsheet row, positionally aligned with the [`HeaderSet`] it was
/// fetched with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(Vec<String>);

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Trimmed cell at `index`, or `""` when the row is shorter than that.
    pub fn cell(&self, index: usize) -> &str {
        self.0.get(index).map(|c| c.trim()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RawRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Delivery channel for a broadcast.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Whatsapp,
    Telegram,
}

/// Identity fields every recipient carries, regardless of source layout.
///
/// Serialized with the camelCase keys the messaging server expects; the
/// same fields come back in each [`DeliveryOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipientIdentity {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub unique_id: String,
}

/// Wire keys owned by [`RecipientIdentity`]. A header with one of these
/// names is written under the identity key rather than on its own.
pub const IDENTITY_KEYS: [&str; 6] = [
    "firstName",
    "middleName",
    "lastName",
    "phone",
    "email",
    "uniqueId",
];

impl RecipientIdentity {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("firstName", self.first_name.as_str()),
            ("middleName", self.middle_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("uniqueId", self.unique_id.as_str()),
        ]
    }
}

/// A normalized, channel-agnostic recipient.
///
/// Holds every header of the source with its trimmed value plus the resolved
/// identity fields. Built once per send attempt and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    identity: RecipientIdentity,
    fields: Vec<(String, String)>,
}

impl Recipient {
    pub fn new(identity: RecipientIdentity, fields: Vec<(String, String)>) -> Self {
        Self { identity, fields }
    }

    /// A recipient carrying nothing but a manually entered phone number.
    pub fn test(phone: &str) -> Self {
        Self {
            identity: RecipientIdentity {
                phone: phone.trim().to_string(),
                ..Default::default()
            },
            fields: Vec::new(),
        }
    }

    pub fn identity(&self) -> &RecipientIdentity {
        &self.identity
    }

    pub fn phone(&self) -> &str {
        &self.identity.phone
    }

    /// Value of the header column `name`, if the source has it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// Header fields go out first, then the identity keys.
///
/// The resolved phone always wins over a header literally named `phone`.
/// Any other identity key that came out empty falls back to the value of a
/// header with that exact name, so sheet data is never blanked.
impl Serialize for Recipient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in &self.fields {
            if !IDENTITY_KEYS.contains(&name.as_str()) {
                map.serialize_entry(name, value)?;
            }
        }
        for (key, value) in self.identity.entries() {
            let value = match self.field(key) {
                Some(header) if key != "phone" && value.is_empty() => header,
                _ => value,
            };
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A binary file sent along with the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Wraps in-memory bytes, accepting image content types only.
    pub fn image(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, WaveError> {
        let file_name = file_name.into();
        let content_type = content_type.into();
        if !content_type.starts_with("image/") {
            return Err(WaveError::InvalidRequest(format!(
                "{file_name}: only image attachments are accepted, got {content_type}"
            )));
        }
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Reads an image from disk, guessing the content type from its extension.
    pub fn from_path(path: &Path, max_bytes: u64) -> Result<Self, WaveError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        // Reject on type before touching the file contents.
        if !content_type.starts_with("image/") {
            return Err(WaveError::InvalidRequest(format!(
                "{file_name}: only image attachments are accepted, got {content_type}"
            )));
        }

        let size = std::fs::metadata(path)
            .map_err(|e| WaveError::InvalidRequest(format!("{}: {e}", path.display())))?
            .len();
        if size > max_bytes {
            return Err(WaveError::InvalidRequest(format!(
                "{file_name}: {size} bytes exceeds the {max_bytes} byte attachment limit"
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| WaveError::InvalidRequest(format!("{}: {e}", path.display())))?;
        Self::image(file_name, content_type, bytes)
    }
}

/// Whether a request targets selected rows or a single manual test number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SendKind {
    Bulk,
    Test,
}

/// A validated outbound broadcast. Built by the dispatch router.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub channel: Channel,
    pub kind: SendKind,
    pub message: String,
    pub recipients: Vec<Recipient>,
    pub attachments: Vec<Attachment>,
    pub source_id: SourceId,
}

impl DispatchRequest {
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Per-recipient delivery status reported by the transport.
///
/// Anything other than `"success"` on the wire is treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DeliveryStatus {
    Success,
    Failure,
}

impl From<String> for DeliveryStatus {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("success") {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

impl DeliveryStatus {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result for one recipient, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    #[serde(flatten)]
    pub identity: RecipientIdentity,
    pub status: DeliveryStatus,
}

/// Body returned by a dispatch endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchResponse {
    /// Human-readable notice from the server.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub results: Vec<DeliveryOutcome>,
}
