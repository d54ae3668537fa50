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

//! Request and response envelopes for the Spot WebSocket API.
//!
//! Every request is a JSON text frame `{"id", "method", "params"}`. Every response echoes
//! the `id` with a `status`, and either a `result` or an `error` object. Messages without
//! an `id` are user data stream events.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::common::enums::{BinanceRateLimitInterval, BinanceRateLimitType, SecurityType};

/// WebSocket API method names.
pub mod method {
    pub const PING: &str = "ping";
    pub const TIME: &str = "time";
    pub const EXCHANGE_INFO: &str = "exchangeInfo";
    pub const DEPTH: &str = "depth";
    pub const KLINES: &str = "klines";
    pub const UI_KLINES: &str = "uiKlines";
    pub const TICKER_24HR: &str = "ticker.24hr";
    pub const TICKER_PRICE: &str = "ticker.price";
    pub const TICKER_BOOK: &str = "ticker.book";
    pub const TICKER_TRADING_DAY: &str = "ticker.tradingDay";
    pub const TICKER: &str = "ticker";
    pub const AVG_PRICE: &str = "avgPrice";
    pub const TRADES_AGGREGATE: &str = "trades.aggregate";
    pub const TRADES_HISTORICAL: &str = "trades.historical";
    pub const TRADES_RECENT: &str = "trades.recent";

    pub const ACCOUNT_STATUS: &str = "account.status";
    pub const ACCOUNT_COMMISSION: &str = "account.commission";
    pub const ACCOUNT_RATE_LIMITS_ORDERS: &str = "account.rateLimits.orders";
    pub const MY_TRADES: &str = "myTrades";
    pub const MY_ALLOCATIONS: &str = "myAllocations";
    pub const MY_PREVENTED_MATCHES: &str = "myPreventedMatches";
    pub const ALL_ORDERS: &str = "allOrders";
    pub const ALL_ORDER_LISTS: &str = "allOrderLists";
    pub const OPEN_ORDERS_STATUS: &str = "openOrders.status";
    pub const OPEN_ORDER_LISTS_STATUS: &str = "openOrderLists.status";
    pub const ORDER_STATUS: &str = "order.status";

    pub const ORDER_TEST: &str = "order.test";
    pub const ORDER_PLACE: &str = "order.place";
    pub const ORDER_CANCEL: &str = "order.cancel";
    pub const OPEN_ORDERS_CANCEL_ALL: &str = "openOrders.cancelAll";
    pub const SOR_ORDER_TEST: &str = "sor.order.test";
    pub const ORDER_LIST_PLACE_OCO: &str = "orderList.place.oco";
    pub const ORDER_LIST_PLACE_OTO: &str = "orderList.place.oto";
    pub const ORDER_LIST_CANCEL: &str = "orderList.cancel";

    pub const SESSION_LOGON: &str = "session.logon";
    pub const SESSION_STATUS: &str = "session.status";
    pub const SESSION_LOGOUT: &str = "session.logout";

    pub const USER_DATA_STREAM_START: &str = "userDataStream.start";
    pub const USER_DATA_STREAM_PING: &str = "userDataStream.ping";
    pub const USER_DATA_STREAM_STOP: &str = "userDataStream.stop";
    pub const USER_DATA_STREAM_SUBSCRIBE: &str = "userDataStream.subscribe";
    pub const USER_DATA_STREAM_UNSUBSCRIBE: &str = "userDataStream.unsubscribe";
}

/// Binds a request parameter type to its method name, security and result type.
pub trait WsApiMethod: Serialize {
    const METHOD: &'static str;
    const SECURITY: SecurityType;
    type Output: DeserializeOwned;
}

/// Outgoing request frame.
#[derive(Clone, Debug, Serialize)]
pub struct WsApiRequest {
    pub id: String,
    pub method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl WsApiRequest {
    #[must_use]
    pub fn new(id: impl Into<String>, method: &'static str, params: Option<Value>) -> Self {
        Self {
            id: id.into(),
            method,
            params,
        }
    }
}

/// Successful response with a typed result.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsApiResponse<T> {
    pub id: String,
    pub status: u16,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default)]
    pub rate_limits: Option<Vec<RateLimit>>,
}

impl<T> WsApiResponse<T> {
    /// Returns the result, or an error naming the request if the exchange sent none.
    ///
    /// # Errors
    ///
    /// Returns an error if `result` is absent.
    pub fn into_result(self) -> Result<T, super::error::BinanceWsError> {
        self.result.ok_or_else(|| {
            super::error::BinanceWsError::UnexpectedResponse(format!(
                "response {} has no result",
                self.id
            ))
        })
    }
}

/// Usage counters attached to responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub rate_limit_type: BinanceRateLimitType,
    pub interval: BinanceRateLimitInterval,
    pub interval_num: u32,
    pub limit: u64,
    #[serde(default)]
    pub count: Option<u64>,
}

/// Error body of a failed request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WsApiErrorBody {
    pub code: i64,
    pub msg: String,
}

/// Frame read off the socket, before correlation.
#[derive(Clone, Debug)]
pub enum WsFrame {
    /// Response carrying the id of a request.
    Response { id: String, payload: Value },
    /// Message without an id.
    Event(Value),
}

/// Commands sent from the client to the handler task.
#[derive(Debug)]
pub enum HandlerCommand {
    Send(String),
    Disconnect,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn test_request_serializes_without_empty_params() {
        let request = WsApiRequest::new("abc", method::PING, None);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"id": "abc", "method": "ping"})
        );
    }

    #[rstest]
    fn test_request_serializes_params() {
        let request = WsApiRequest::new("abc", method::DEPTH, Some(json!({"symbol": "BTCUSDT"})));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"id": "abc", "method": "depth", "params": {"symbol": "BTCUSDT"}})
        );
    }

    #[rstest]
    fn test_rate_limit_deserializes() {
        let value = json!({
            "rateLimitType": "REQUEST_WEIGHT",
            "interval": "MINUTE",
            "intervalNum": 1,
            "limit": 6000,
            "count": 2
        });
        let rate_limit: RateLimit = serde_json::from_value(value).unwrap();
        assert_eq!(rate_limit.rate_limit_type, BinanceRateLimitType::RequestWeight);
        assert_eq!(rate_limit.interval, BinanceRateLimitInterval::Minute);
        assert_eq!(rate_limit.interval_num, 1);
        assert_eq!(rate_limit.limit, 6000);
        assert_eq!(rate_limit.count, Some(2));
    }

    #[rstest]
    fn test_into_result_without_result_is_error() {
        let response: WsApiResponse<Value> =
            serde_json::from_value(json!({"id": "1", "status": 200})).unwrap();
        assert!(response.into_result().is_err());
    }
}
