// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login credentials and their local validation.

use std::sync::LazyLock;

use contactwave_core::WaveError;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid mobile regex"));

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Email address or mobile number plus password, checked before login.
pub struct Credentials {
    identity: String,
    password: SecretString,
}

impl Credentials {
    /// Validates both parts; no network call is made for malformed input.
    pub fn new(identity: &str, password: SecretString) -> Result<Self, WaveError> {
        let identity = identity.trim();
        if !is_valid_identity(identity) {
            return Err(WaveError::Session {
                message: "enter a valid email or mobile number".into(),
            });
        }
        if !is_strong_password(password.expose_secret()) {
            return Err(WaveError::Session {
                message: "password must be at least 8 characters long and contain an \
                          uppercase letter, a lowercase letter, a number, and one of @$!%*?&"
                    .into(),
            });
        }
        Ok(Self {
            identity: identity.to_string(),
            password,
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub(crate) fn login_body(&self) -> LoginBody<'_> {
        LoginBody {
            email_or_mobile: &self.identity,
            password: self.password.expose_secret(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// An email address, or a 10-digit ASCII mobile number starting with 6-9.
pub fn is_valid_identity(identity: &str) -> bool {
    EMAIL_RE.is_match(identity) || MOBILE_RE.is_match(identity)
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, with at least one
/// uppercase letter, lowercase letter, digit, and special character.
pub fn is_strong_password(password: &str) -> bool {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    allowed
        && password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginBody<'a> {
    pub email_or_mobile: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub success: bool,
}
