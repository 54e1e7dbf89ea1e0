// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client construction and interactive login.

use contactwave_config::WaveConfig;
use contactwave_core::WaveError;
use contactwave_dispatch::{Credentials, WaveClient};
use secrecy::SecretString;

/// Environment variable checked before prompting for a password.
const PASSWORD_ENV: &str = "CONTACTWAVE_PASSWORD";

/// Builds a client and, when an identity is given, logs in with it.
///
/// The session cookie set by the login response is kept by the client
/// for every later call.
pub async fn connect(config: &WaveConfig, identity: Option<&str>) -> Result<WaveClient, WaveError> {
    let client = WaveClient::new(&config.server, &config.session)?;

    if let Some(identity) = identity {
        let credentials = Credentials::new(identity, read_password()?)?;
        client.login(&credentials).await?;
    }

    Ok(client)
}

fn read_password() -> Result<SecretString, WaveError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(password));
    }
    rpassword::prompt_password("Password: ")
        .map(SecretString::from)
        .map_err(|e| WaveError::Session {
            message: format!("failed to read password: {e}"),
        })
}
