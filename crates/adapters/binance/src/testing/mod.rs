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

//! Testnet integration harness.
//!
//! Scenario selection from the environment, a shared rate limiter, a runner that wraps each
//! endpoint check in a timeout, result bookkeeping and market-relative order pricing. Used
//! by the integration tests and the `binance-ws-smoke` binary.

pub mod assertions;
pub mod pricing;
pub mod rate_limit;
pub mod runner;
pub mod scenario;
pub mod suite;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub use runner::{run_endpoint_test, EndpointTestResult, DEFAULT_TEST_TIMEOUT};
pub use scenario::{
    ed25519_session_config, first_authenticated, first_with_auth_type, get_test_configs,
    setup_client_with_config, AuthType, BinanceTestConfig,
};
pub use suite::{session_banner, SuiteStatus, TestOutcome, TestSuite};

/// Installs a `tracing` subscriber filtered by `RUST_LOG` (default `info`) that writes
/// through the test harness, so output is captured per test. Safe to call more than once.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .is_err()
        {
            tracing::debug!("A global subscriber is already installed");
        }
    });
}
