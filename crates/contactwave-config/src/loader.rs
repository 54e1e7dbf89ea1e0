// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./contactwave.toml` > `~/.config/contactwave/contactwave.toml`
//! > `/etc/contactwave/contactwave.toml` with environment variable overrides via
//! the `CONTACTWAVE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::WaveConfig;

pub(crate) const LOCAL_CONFIG: &str = "contactwave.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/contactwave/contactwave.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub(crate) fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("contactwave").join(LOCAL_CONFIG))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/contactwave/contactwave.toml` (system-wide)
/// 3. `~/.config/contactwave/contactwave.toml` (user XDG config)
/// 4. `./contactwave.toml` (local directory)
/// 5. `CONTACTWAVE_*` environment variables
pub fn load_config() -> Result<WaveConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<WaveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WaveConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WaveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WaveConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the standard hierarchy before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(WaveConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `CONTACTWAVE_SERVER_BASE_URL` must become `server.base_url`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("CONTACTWAVE_")
        .ignore(&["PASSWORD"])
        .map(|key| {
            let mapped = key
                .as_str()
                .replacen("server_", "server.", 1)
                .replacen("session_", "session.", 1)
                .replacen("logging_", "logging.", 1)
                .replacen("attachments_", "attachments.", 1);
            mapped.into()
        })
}
