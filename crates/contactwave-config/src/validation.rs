// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as a parseable http(s) server URL and non-zero limits.

use crate::diagnostic::ConfigError;
use crate::model::WaveConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &WaveConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut invalid = |message: String| errors.push(ConfigError::Validation { message });

    let base_url = config.server.base_url.trim();
    match url::Url::parse(base_url) {
        Err(e) => invalid(format!("server.base_url `{base_url}` is not a valid URL: {e}")),
        Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => invalid(format!(
            "server.base_url `{base_url}` must use http or https, not {}",
            parsed.scheme()
        )),
        Ok(parsed) if parsed.host().is_none() => {
            invalid(format!("server.base_url `{base_url}` has no host"))
        }
        Ok(_) => {}
    }

    if config.server.timeout_secs == 0 {
        invalid("server.timeout_secs must be greater than zero".to_string());
    }

    if config.attachments.max_bytes == 0 {
        invalid("attachments.max_bytes must be greater than zero".to_string());
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        invalid(format!(
            "logging.level `{}` is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if let Some(cookie) = &config.session.cookie
        && !cookie.contains('=')
    {
        invalid("session.cookie must look like `name=value`".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
