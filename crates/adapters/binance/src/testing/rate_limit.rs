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

//! Spacing between requests so the testnet does not ban the IP.

use std::{sync::OnceLock, time::Duration};

use tokio::{sync::Mutex, time::Instant};

/// Default spacing between requests.
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_secs(2);

/// Enforces a minimum delay between successive [`RateLimiter::wait`] calls.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_LIMIT_DELAY)
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps until `delay` has passed since the previous call, and returns the time slept.
    ///
    /// Concurrent callers are queued, each one spaced from the one before it.
    pub async fn wait(&self) -> Duration {
        let mut last_request = self.last_request.lock().await;

        let mut slept = Duration::ZERO;
        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                slept = self.delay - elapsed;
                tracing::debug!("Rate limiting: sleeping {slept:?}");
                tokio::time::sleep(slept).await;
            }
        }

        *last_request = Some(Instant::now());
        slept
    }
}

/// Process-wide limiter shared by every harness call.
pub fn global_rate_limiter() -> &'static RateLimiter {
    static LIMITER: OnceLock<RateLimiter> = OnceLock::new();
    LIMITER.get_or_init(RateLimiter::default)
}
