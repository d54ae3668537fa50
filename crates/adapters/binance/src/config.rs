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

//! Configuration for the Binance Spot WebSocket API client.

use std::{fmt::Debug, sync::Arc, time::Duration};

use derive_builder::Builder;
use url::Url;

use crate::common::{
    consts::{
        DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PING_INTERVAL_SECS, DEFAULT_PING_TIMEOUT_SECS,
        DEFAULT_REQUEST_TIMEOUT_SECS,
    },
    credential::BinanceAuth,
    enums::BinanceEnvironment,
    urls::ws_api_url,
};

/// Connection settings for [`crate::websocket::BinanceWebSocketClient`].
#[derive(Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct BinanceWsConfig {
    /// Network to connect to when no explicit URL is given.
    #[builder(default)]
    pub environment: BinanceEnvironment,
    /// Overrides the endpoint derived from `environment`.
    #[builder(default, setter(strip_option))]
    pub base_url: Option<String>,
    /// Credentials for signed, user stream and session methods.
    #[builder(default, setter(strip_option))]
    pub auth: Option<Arc<BinanceAuth>>,
    /// Reconnect after the connection drops.
    #[builder(default)]
    pub auto_reconnect: bool,
    #[builder(default = "Duration::from_secs(DEFAULT_PING_INTERVAL_SECS)")]
    pub ping_interval: Duration,
    /// Time to wait for a pong before the connection is treated as lost.
    #[builder(default = "Duration::from_secs(DEFAULT_PING_TIMEOUT_SECS)")]
    pub ping_timeout: Duration,
    #[builder(default = "Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)")]
    pub request_timeout: Duration,
    #[builder(default = "Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)")]
    pub connect_timeout: Duration,
    #[builder(default = "5")]
    pub reconnect_max_attempts: u32,
    #[builder(default = "Duration::from_millis(500)")]
    pub reconnect_initial_delay: Duration,
    #[builder(default = "Duration::from_secs(10)")]
    pub reconnect_max_delay: Duration,
}

impl Debug for BinanceWsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(BinanceWsConfig))
            .field("url", &self.url())
            .field("auth", &self.auth.as_ref().map(|a| a.key_type()))
            .field("auto_reconnect", &self.auto_reconnect)
            .field("ping_interval", &self.ping_interval)
            .field("ping_timeout", &self.ping_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Default for BinanceWsConfig {
    fn default() -> Self {
        Self {
            environment: BinanceEnvironment::Testnet,
            base_url: None,
            auth: None,
            auto_reconnect: false,
            ping_interval: Duration::from_secs(DEFAULT_PING_INTERVAL_SECS),
            ping_timeout: Duration::from_secs(DEFAULT_PING_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            reconnect_max_attempts: 5,
            reconnect_initial_delay: Duration::from_millis(500),
            reconnect_max_delay: Duration::from_secs(10),
        }
    }
}

impl BinanceWsConfig {
    #[must_use]
    pub fn builder() -> BinanceWsConfigBuilder {
        BinanceWsConfigBuilder::default()
    }

    /// Testnet configuration with optional credentials.
    #[must_use]
    pub fn testnet(auth: Option<BinanceAuth>) -> Self {
        Self {
            environment: BinanceEnvironment::Testnet,
            auth: auth.map(Arc::new),
            ..Self::default()
        }
    }

    /// Mainnet configuration with optional credentials.
    #[must_use]
    pub fn mainnet(auth: Option<BinanceAuth>) -> Self {
        Self {
            environment: BinanceEnvironment::Mainnet,
            auth: auth.map(Arc::new),
            ..Self::default()
        }
    }

    /// Returns the WebSocket endpoint to connect to.
    #[must_use]
    pub fn url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| ws_api_url(self.environment).to_string())
    }

    /// Delay before the given reconnect attempt (1-based), doubling up to the max.
    #[must_use]
    pub fn reconnect_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.reconnect_initial_delay
            .saturating_mul(factor)
            .min(self.reconnect_max_delay)
    }
}

impl BinanceWsConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("ping_interval", self.ping_interval),
            ("ping_timeout", self.ping_timeout),
            ("request_timeout", self.request_timeout),
            ("connect_timeout", self.connect_timeout),
        ] {
            if value == Some(Duration::ZERO) {
                return Err(format!("{name} must be greater than zero"));
            }
        }

        if let Some(Some(base_url)) = &self.base_url {
            let parsed =
                Url::parse(base_url).map_err(|e| format!("invalid base_url {base_url}: {e}"))?;
            if !matches!(parsed.scheme(), "ws" | "wss") {
                return Err(format!(
                    "base_url must use ws or wss, was {}",
                    parsed.scheme()
                ));
            }
        }
        Ok(())
    }
}
