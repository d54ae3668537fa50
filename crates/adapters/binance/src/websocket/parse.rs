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

//! Parsing of incoming WebSocket API frames.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    error::{BinanceWsError, BinanceWsResult},
    messages::{WsApiErrorBody, WsApiResponse, WsFrame},
};
use crate::common::consts::BINANCE_OK_STATUS;

/// Splits a text frame into a correlated response or an uncorrelated event.
///
/// Numeric ids are matched by their decimal string form.
///
/// # Errors
///
/// Returns an error if the text is not JSON.
pub fn parse_frame(text: &str) -> BinanceWsResult<WsFrame> {
    let value: Value = serde_json::from_str(text)?;

    let id = match value.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    };

    Ok(match id {
        Some(id) => WsFrame::Response { id, payload: value },
        None => WsFrame::Event(value),
    })
}

/// Converts a raw response payload into a typed response.
///
/// Any payload with an `error` object or a non-200 status becomes
/// [`BinanceWsError::Api`].
///
/// # Errors
///
/// Returns an error for API error envelopes or if the result does not match `T`.
pub fn parse_response<T: DeserializeOwned>(payload: Value) -> BinanceWsResult<WsApiResponse<T>> {
    let status = payload
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .ok_or_else(|| {
            BinanceWsError::UnexpectedResponse(format!("missing status in {payload}"))
        })?;

    if let Some(error) = payload.get("error") {
        let body: WsApiErrorBody = serde_json::from_value(error.clone())?;
        return Err(BinanceWsError::Api {
            status,
            code: body.code,
            msg: body.msg,
        });
    }

    if status != BINANCE_OK_STATUS {
        return Err(BinanceWsError::Api {
            status,
            code: 0,
            msg: format!("Request failed with status {status}"),
        });
    }

    Ok(serde_json::from_value(payload)?)
}
