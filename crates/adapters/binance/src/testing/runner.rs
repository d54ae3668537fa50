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

//! Runs one endpoint check under the shared rate limiter and a timeout.

use std::{future::Future, time::Duration};

use tokio::time::Instant;

use super::rate_limit::{global_rate_limiter, RateLimiter};
use crate::websocket::BinanceWebSocketClient;

/// Default time budget of one endpoint check.
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one endpoint check.
#[derive(Clone, Debug)]
pub struct EndpointTestResult<T> {
    pub test_name: String,
    pub success: bool,
    pub duration: Duration,
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> EndpointTestResult<T> {
    fn passed(test_name: &str, duration: Duration, value: T) -> Self {
        Self {
            test_name: test_name.to_string(),
            success: true,
            duration,
            result: Some(value),
            error: None,
        }
    }

    fn failed(test_name: &str, duration: Duration, error: String) -> Self {
        Self {
            test_name: test_name.to_string(),
            success: false,
            duration,
            result: None,
            error: Some(error),
        }
    }

    /// Converts the record back into a result, for `?` in test bodies.
    ///
    /// # Errors
    ///
    /// Returns the recorded error if the check failed.
    pub fn into_result(self) -> anyhow::Result<T> {
        match self.result {
            Some(value) if self.success => Ok(value),
            _ => Err(anyhow::anyhow!(
                "{} failed: {}",
                self.test_name,
                self.error.unwrap_or_else(|| "no result".to_string())
            )),
        }
    }
}

/// Runs `test_fn` after waiting on the process-wide rate limiter.
pub async fn run_endpoint_test<T, F, Fut>(
    client: &BinanceWebSocketClient,
    test_name: &str,
    test_fn: F,
    timeout: Duration,
) -> EndpointTestResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    run_endpoint_test_with(global_rate_limiter(), client, test_name, test_fn, timeout).await
}

/// Runs `test_fn` after waiting on `limiter`, bounded by `timeout`.
///
/// The recorded duration includes the time spent waiting on the limiter.
pub async fn run_endpoint_test_with<T, F, Fut>(
    limiter: &RateLimiter,
    client: &BinanceWebSocketClient,
    test_name: &str,
    test_fn: F,
    timeout: Duration,
) -> EndpointTestResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    tracing::info!("Starting test: {test_name}");
    tracing::info!(
        "Client state: connected={}, credentials={}, session_authenticated={}",
        client.is_connected(),
        client.has_credentials(),
        client.is_authenticated()
    );

    let start = Instant::now();
    limiter.wait().await;
    let outcome = tokio::time::timeout(timeout, test_fn()).await;
    let duration = start.elapsed();

    match outcome {
        Ok(Ok(value)) => {
            tracing::info!("Test {test_name} passed in {duration:?}");
            EndpointTestResult::passed(test_name, duration, value)
        }
        Ok(Err(e)) => {
            tracing::error!("Test {test_name} failed: {e:?}");
            EndpointTestResult::failed(test_name, duration, e.to_string())
        }
        Err(_) => {
            let error = format!("Test timed out after {} seconds", timeout.as_secs_f64());
            tracing::error!("Test {test_name}: {error}");
            EndpointTestResult::failed(test_name, duration, error)
        }
    }
}
