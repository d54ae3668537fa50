// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Test scenarios derived from the environment.
//!
//! Every run gets the public scenario. Each key family whose variables are present adds a
//! USER_DATA and a TRADE scenario.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use crate::{
    common::{
        consts::{
            BINANCE_API_KEY, BINANCE_ED25519_API_KEY, BINANCE_ED25519_PRIVATE_KEY_PATH,
            BINANCE_RSA_API_KEY, BINANCE_RSA_PRIVATE_KEY_PATH, BINANCE_SECRET_KEY,
        },
        credential::BinanceAuth,
        enums::{BinanceEnvironment, KeyType},
    },
    config::BinanceWsConfig,
    error::{BinanceError, BinanceResult},
    websocket::BinanceWebSocketClient,
};

/// Authorization scope a scenario exercises.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AuthType {
    None,
    UserData,
    UserStream,
    Trade,
}

impl Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::UserData => write!(f, "USER_DATA"),
            Self::UserStream => write!(f, "USER_STREAM"),
            Self::Trade => write!(f, "TRADE"),
        }
    }
}

/// One authentication scenario of the suite.
#[derive(Clone, PartialEq, Eq)]
pub struct BinanceTestConfig {
    pub name: String,
    pub key_type: KeyType,
    pub auth_type: AuthType,
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    pub private_key_path: Option<PathBuf>,
    pub description: String,
}

impl std::fmt::Debug for BinanceTestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(BinanceTestConfig))
            .field("name", &self.name)
            .field("key_type", &self.key_type)
            .field("auth_type", &self.auth_type)
            .field("has_api_key", &self.api_key.is_some())
            .field("has_secret_key", &self.secret_key.is_some())
            .field("private_key_path", &self.private_key_path)
            .finish()
    }
}

impl BinanceTestConfig {
    /// Scenario for endpoints that need no authentication.
    #[must_use]
    pub fn public() -> Self {
        Self {
            name: "Public-NoAuth".to_string(),
            key_type: KeyType::Hmac,
            auth_type: AuthType::None,
            api_key: None,
            secret_key: None,
            private_key_path: None,
            description: "Test public endpoints that don't require authentication".to_string(),
        }
    }

    fn authenticated(
        key_type: KeyType,
        auth_type: AuthType,
        api_key: &str,
        secret_key: Option<&str>,
        private_key_path: Option<&Path>,
    ) -> Self {
        let (suffix, scope) = match auth_type {
            AuthType::Trade => ("Trade", "TRADE"),
            AuthType::UserStream => ("UserStream", "USER_STREAM"),
            _ => ("UserData", "USER_DATA"),
        };
        Self {
            name: format!("{key_type}-{suffix}"),
            key_type,
            auth_type,
            api_key: Some(api_key.to_string()),
            secret_key: secret_key.map(str::to_string),
            private_key_path: private_key_path.map(Path::to_path_buf),
            description: format!("Test {scope} endpoints with {key_type} authentication"),
        }
    }

    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.auth_type != AuthType::None
    }

    /// Builds the credentials of this scenario, or `None` for the public scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if key material is missing or the key file cannot be loaded.
    pub fn auth(&self) -> BinanceResult<Option<BinanceAuth>> {
        if !self.requires_auth() {
            return Ok(None);
        }

        match self.key_type {
            KeyType::Hmac => match (&self.api_key, &self.secret_key) {
                (Some(api_key), Some(secret_key)) => {
                    Ok(Some(BinanceAuth::hmac(api_key.clone(), secret_key)?))
                }
                _ => Err(BinanceError::Config(format!(
                    "HMAC auth requires both api_key and secret_key (api_key: {}, secret_key: {})",
                    presence(self.api_key.is_some()),
                    presence(self.secret_key.is_some()),
                ))),
            },
            KeyType::Rsa | KeyType::Ed25519 => match (&self.api_key, &self.private_key_path) {
                (Some(api_key), Some(path)) => Ok(Some(BinanceAuth::from_key_file(
                    api_key.clone(),
                    path,
                    self.key_type,
                )?)),
                _ => Err(BinanceError::Config(format!(
                    "{} auth requires both api_key and private_key_path (api_key: {}, private_key_path: {})",
                    self.key_type,
                    presence(self.api_key.is_some()),
                    presence(self.private_key_path.is_some()),
                ))),
            },
        }
    }

    /// Client settings used by the suite: testnet, no reconnect, 20 s pings.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be built.
    pub fn ws_config(&self) -> BinanceResult<BinanceWsConfig> {
        Ok(BinanceWsConfig {
            environment: BinanceEnvironment::Testnet,
            auth: self.auth()?.map(Arc::new),
            auto_reconnect: false,
            ping_interval: Duration::from_secs(20),
            ping_timeout: Duration::from_secs(10),
            ..BinanceWsConfig::default()
        })
    }
}

const fn presence(present: bool) -> &'static str {
    if present {
        "set"
    } else {
        "missing"
    }
}

/// Returns the scenarios available from the process environment.
#[must_use]
pub fn get_test_configs() -> Vec<BinanceTestConfig> {
    test_configs_from(|name| std::env::var(name).ok())
}

/// Returns the scenarios available from `lookup`; empty values count as absent.
pub fn test_configs_from<F>(lookup: F) -> Vec<BinanceTestConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
    let mut configs = vec![BinanceTestConfig::public()];

    if let (Some(api_key), Some(secret_key)) = (var(BINANCE_API_KEY), var(BINANCE_SECRET_KEY)) {
        for auth_type in [AuthType::UserData, AuthType::Trade] {
            configs.push(BinanceTestConfig::authenticated(
                KeyType::Hmac,
                auth_type,
                &api_key,
                Some(&secret_key),
                None,
            ));
        }
    }

    let key_file_families = [
        (KeyType::Rsa, BINANCE_RSA_API_KEY, BINANCE_RSA_PRIVATE_KEY_PATH),
        (
            KeyType::Ed25519,
            BINANCE_ED25519_API_KEY,
            BINANCE_ED25519_PRIVATE_KEY_PATH,
        ),
    ];
    for (key_type, api_key_var, path_var) in key_file_families {
        let (Some(api_key), Some(path)) = (var(api_key_var), var(path_var)) else {
            continue;
        };
        let path = PathBuf::from(path);
        if !path.exists() {
            tracing::warn!("{path_var} points to a missing file: {}", path.display());
            continue;
        }
        for auth_type in [AuthType::UserData, AuthType::Trade] {
            configs.push(BinanceTestConfig::authenticated(
                key_type,
                auth_type,
                &api_key,
                None,
                Some(&path),
            ));
        }
    }

    configs
}

/// First scenario that carries credentials.
#[must_use]
pub fn first_authenticated(configs: &[BinanceTestConfig]) -> Option<&BinanceTestConfig> {
    configs.iter().find(|config| config.requires_auth())
}

#[must_use]
pub fn first_with_auth_type(
    configs: &[BinanceTestConfig],
    auth_type: AuthType,
) -> Option<&BinanceTestConfig> {
    configs.iter().find(|config| config.auth_type == auth_type)
}

/// First Ed25519 scenario; session logon only accepts Ed25519 keys.
#[must_use]
pub fn ed25519_session_config(configs: &[BinanceTestConfig]) -> Option<&BinanceTestConfig> {
    configs
        .iter()
        .find(|config| config.key_type == KeyType::Ed25519 && config.requires_auth())
}

/// Builds and connects a client for `config`.
///
/// # Errors
///
/// Returns an error if credentials are incomplete or the connection fails.
pub async fn setup_client_with_config(
    config: &BinanceTestConfig,
) -> BinanceResult<BinanceWebSocketClient> {
    tracing::info!(
        "Setting up client for {} (auth: {}, key: {})",
        config.name,
        config.auth_type,
        config.key_type
    );

    let client = BinanceWebSocketClient::new(config.ws_config()?);
    client.connect().await?;

    tracing::info!(
        "Client ready for {}: connected={}, credentials={}",
        config.name,
        client.is_connected(),
        client.has_credentials()
    );
    Ok(client)
}
