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

//! Response checks that fail with `anyhow` errors, for use inside endpoint checks.

use anyhow::{ensure, Context};
use rust_decimal::Decimal;

use crate::{
    common::consts::BINANCE_OK_STATUS,
    websocket::{RateLimit, WsApiResponse},
};

/// Checks the response status is 200.
///
/// # Errors
///
/// Returns an error naming the request id and status otherwise.
pub fn ensure_ok_status<T>(response: &WsApiResponse<T>) -> anyhow::Result<()> {
    ensure!(
        response.status == BINANCE_OK_STATUS,
        "response {} has status {}, expected {BINANCE_OK_STATUS}",
        response.id,
        response.status
    );
    Ok(())
}

/// Checks each rate limit entry carries a window and a usage count.
///
/// # Errors
///
/// Returns an error describing the first malformed entry.
pub fn ensure_rate_limits_shape(rate_limits: &[RateLimit]) -> anyhow::Result<()> {
    ensure!(!rate_limits.is_empty(), "rateLimits is empty");
    for (i, limit) in rate_limits.iter().enumerate() {
        ensure!(limit.interval_num > 0, "rateLimits[{i}].intervalNum is 0");
        ensure!(limit.limit > 0, "rateLimits[{i}].limit is 0");
        let count = limit
            .count
            .with_context(|| format!("rateLimits[{i}] has no count"))?;
        ensure!(
            count <= limit.limit,
            "rateLimits[{i}].count {count} exceeds limit {}",
            limit.limit
        );
    }
    Ok(())
}

/// Checks the envelope status and, when present, its rate limits.
///
/// # Errors
///
/// Returns the first failed check.
pub fn ensure_response<T>(response: &WsApiResponse<T>) -> anyhow::Result<()> {
    ensure_ok_status(response)?;
    if let Some(rate_limits) = &response.rate_limits {
        ensure_rate_limits_shape(rate_limits)?;
    }
    Ok(())
}

/// Checks `value` is strictly positive.
///
/// # Errors
///
/// Returns an error naming the field otherwise.
pub fn ensure_positive_decimal(field: &str, value: Decimal) -> anyhow::Result<()> {
    ensure!(value > Decimal::ZERO, "{field} must be positive, was {value}");
    Ok(())
}
