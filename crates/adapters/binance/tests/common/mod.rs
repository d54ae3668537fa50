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

//! Fixtures shared by the integration test crates.

#![allow(dead_code)]

use std::{future::Future, path::PathBuf, time::Duration};

use binance_spot_ws::{
    testing::{
        first_authenticated, first_with_auth_type, get_test_configs, init_test_logging,
        setup_client_with_config, AuthType, BinanceTestConfig,
    },
    BinanceWebSocketClient,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const TEST_SYMBOL: &str = "BTCUSDT";

/// Quantity used for test orders.
pub const SMALL_QUANTITY: Decimal = dec!(0.001);

/// Skips the current test when the scenario lookup yields nothing.
#[allow(unused_macros)]
macro_rules! require_config {
    ($config:expr, $what:expr) => {
        match $config {
            Some(config) => config,
            None => {
                tracing::warn!("Skipping: no {} configuration available", $what);
                return Ok(());
            }
        }
    };
}

pub fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(filename)
}

pub fn load_fixture(filename: &str) -> serde_json::Value {
    let path = fixture_path(filename);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid JSON in {}: {e}", path.display()))
}

/// Polls `condition` until it holds, panicking after `timeout`.
pub async fn wait_until_async<F, Fut>(mut condition: F, timeout: Duration)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while !condition().await {
        assert!(
            tokio::time::Instant::now() < deadline,
            "Condition not met within {timeout:?}"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Connects a testnet client for the public scenario.
pub async fn public_client() -> anyhow::Result<BinanceWebSocketClient> {
    init_test_logging();
    Ok(setup_client_with_config(&BinanceTestConfig::public()).await?)
}

/// Connects a client for the first scenario carrying credentials.
pub async fn authenticated_client(
) -> anyhow::Result<Option<(BinanceTestConfig, BinanceWebSocketClient)>> {
    init_test_logging();
    let configs = get_test_configs();
    connect_optional(first_authenticated(&configs)).await
}

/// Connects a client for the first scenario of `auth_type`.
pub async fn client_for_auth_type(
    auth_type: AuthType,
) -> anyhow::Result<Option<(BinanceTestConfig, BinanceWebSocketClient)>> {
    init_test_logging();
    let configs = get_test_configs();
    connect_optional(first_with_auth_type(&configs, auth_type)).await
}

async fn connect_optional(
    config: Option<&BinanceTestConfig>,
) -> anyhow::Result<Option<(BinanceTestConfig, BinanceWebSocketClient)>> {
    match config {
        Some(config) => {
            let client = setup_client_with_config(config).await?;
            Ok(Some((config.clone(), client)))
        }
        None => Ok(None),
    }
}
