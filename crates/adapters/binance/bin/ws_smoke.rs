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

//! Connectivity smoke check against the Spot testnet.
//!
//! Runs the public market data checks, plus an account check when credentials are set,
//! and prints a pass rate summary.

use binance_spot_ws::{
    testing::{
        assertions::{ensure_positive_decimal, ensure_response},
        first_authenticated, get_test_configs, run_endpoint_test, session_banner,
        setup_client_with_config, BinanceTestConfig, TestOutcome, TestSuite, DEFAULT_TEST_TIMEOUT,
    },
    websocket::query::{AccountStatusParams, DepthParams, ExchangeInfoParams, TickerPriceParams},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SYMBOL: &str = "BTCUSDT";
const PUBLIC_CHECKS: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let configs = get_test_configs();
    for line in session_banner(&configs).lines() {
        info!("{line}");
    }

    let mut suite = TestSuite::new();
    suite.set_collected(PUBLIC_CHECKS + 1);

    let client = setup_client_with_config(&BinanceTestConfig::public()).await?;

    let result = run_endpoint_test(
        &client,
        "ping",
        || async {
            let response = client.ping().await?;
            ensure_response(&response)?;
            Ok(())
        },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;
    suite.record(&result);

    let result = run_endpoint_test(
        &client,
        "time",
        || async { Ok(client.time().await?.into_result()?.server_time) },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;
    suite.record(&result);

    let result = run_endpoint_test(
        &client,
        "exchange_info",
        || async {
            let info = client
                .exchange_info(&ExchangeInfoParams::for_symbol(SYMBOL))
                .await?
                .into_result()?;
            anyhow::ensure!(info.symbol(SYMBOL).is_some(), "{SYMBOL} not listed");
            Ok(info.symbols.len())
        },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;
    suite.record(&result);

    let result = run_endpoint_test(
        &client,
        "depth",
        || async {
            let response = client.depth(&DepthParams::new(SYMBOL).with_limit(5)).await?;
            ensure_response(&response)?;
            Ok(response.into_result()?.last_update_id)
        },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;
    suite.record(&result);

    let result = run_endpoint_test(
        &client,
        "ticker_price",
        || async {
            let tickers = client
                .ticker_price(&TickerPriceParams::new(SYMBOL))
                .await?
                .into_result()?;
            let price = tickers
                .first()
                .map(|ticker| ticker.price)
                .ok_or_else(|| anyhow::anyhow!("empty ticker result"))?;
            ensure_positive_decimal("price", price)?;
            info!("{SYMBOL} last price {price}");
            Ok(price)
        },
        DEFAULT_TEST_TIMEOUT,
    )
    .await;
    suite.record(&result);

    client.disconnect().await;

    match first_authenticated(&configs) {
        Some(config) => {
            let client = setup_client_with_config(config).await?;
            let result = run_endpoint_test(
                &client,
                &format!("account_status[{}]", config.name),
                || async {
                    let response = client.account_status(&AccountStatusParams::default()).await?;
                    ensure_response(&response)?;
                    Ok(response.into_result()?.can_trade)
                },
                DEFAULT_TEST_TIMEOUT,
            )
            .await;
            suite.record(&result);
            client.disconnect().await;
        }
        None => {
            info!("No credentials configured, skipping account check");
            suite.record_outcome(TestOutcome::Skipped);
        }
    }

    suite.log_summary();
    anyhow::ensure!(suite.failed() == 0, "{} check(s) failed", suite.failed());
    Ok(())
}
