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

//! User data stream management against the Spot testnet.

#[macro_use]
mod common;

use anyhow::ensure;
use binance_spot_ws::testing::{
    assertions::ensure_response, ed25519_session_config, get_test_configs, init_test_logging,
    run_endpoint_test, setup_client_with_config, AuthType, DEFAULT_TEST_TIMEOUT,
};
use common::client_for_auth_type;
use rstest::rstest;

#[rstest]
#[tokio::test]
#[ignore = "requires Binance testnet credentials"]
async fn test_listen_key_lifecycle() -> anyhow::Result<()> {
    let (config, client) = require_config!(client_for_auth_type(AuthType::Trade).await?, "TRADE");

    let started = run_endpoint_test(
        &client,
        &format!("user_data_stream_start[{}]", config.name),
        || async {
            let response = client.user_data_stream_start().await?;
            ensure_response(&response)?;
            let listen_key = response.into_result()?.listen_key;
            ensure!(!listen_key.is_empty(), "listen key should not be empty");
            Ok(listen_key)
        },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;
    assert!(started.success, "Stream start failed: {:?}", started.error);
    let listen_key = started.into_result()?;

    let pinged = run_endpoint_test(
        &client,
        &format!("user_data_stream_ping[{}]", config.name),
        || async {
            let response = client.user_data_stream_ping(&listen_key).await?;
            ensure_response(&response)?;
            Ok(())
        },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;

    let stopped = run_endpoint_test(
        &client,
        &format!("user_data_stream_stop[{}]", config.name),
        || async {
            let response = client.user_data_stream_stop(&listen_key).await?;
            ensure_response(&response)?;
            Ok(())
        },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;

    client.disconnect().await;
    assert!(pinged.success, "Stream ping failed: {:?}", pinged.error);
    assert!(stopped.success, "Stream stop failed: {:?}", stopped.error);
    Ok(())
}

#[rstest]
#[tokio::test]
#[ignore = "requires Binance testnet Ed25519 credentials"]
async fn test_session_subscription() -> anyhow::Result<()> {
    init_test_logging();
    let configs = get_test_configs();
    let config = require_config!(ed25519_session_config(&configs), "Ed25519");
    let client = setup_client_with_config(config).await?;

    let result = run_endpoint_test(
        &client,
        &format!("user_data_stream_subscribe[{}]", config.name),
        || async {
            client.session_logon().await?;

            let response = client.user_data_stream_subscribe().await?;
            ensure_response(&response)?;
            let subscription_id = response.into_result()?.subscription_id;

            let status = client.session_status().await?.into_result()?;
            ensure!(
                status.user_data_stream == Some(true),
                "session should report an active user data stream"
            );

            let response = client.user_data_stream_unsubscribe(subscription_id).await?;
            ensure_response(&response)?;
            Ok(subscription_id)
        },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;

    client.disconnect().await;
    assert!(result.success, "Stream subscription failed: {:?}", result.error);
    Ok(())
}
