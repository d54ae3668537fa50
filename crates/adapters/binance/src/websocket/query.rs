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

//! Request parameters for the Spot WebSocket API.
//!
//! Each type implements [`WsApiMethod`], binding it to a method name, a security type,
//! and the result it decodes to. Single-purpose queries use `new(..).with_*()`; order
//! requests with many optional fields also derive a builder.

use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{
    messages::{method, RateLimit, WsApiMethod},
    models::{
        AccountCommission, AccountStatus, AccountTrade, AggTrade, Allocation, AvgPrice,
        CancelAllEntry, Depth, EmptyResult, ExchangeInfo, Kline, ListenKey, OneOrMany,
        OrderListReport, OrderReport, OrderTestResult, PreventedMatch, RollingTicker,
        ServerTime, SessionStatus, Ticker24hr, TickerBook, TickerPrice, Trade,
        UserDataSubscription,
    },
};
use crate::common::enums::{
    BinanceCancelRestrictions, BinanceOrderResponseType, BinanceOrderType, BinanceSide,
    BinanceTimeInForce, KlineInterval, SecurityType,
};

macro_rules! ws_api_method {
    ($params:ty, $method:expr, $security:ident, $output:ty) => {
        impl WsApiMethod for $params {
            const METHOD: &'static str = $method;
            const SECURITY: SecurityType = SecurityType::$security;
            type Output = $output;
        }
    };
}

macro_rules! empty_params {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, Serialize)]
        pub struct $name;
    };
}

empty_params!(PingParams);
empty_params!(TimeParams);
empty_params!(
    /// Session status works with or without a logged on session.
    SessionStatusParams
);
empty_params!(SessionLogoutParams);
empty_params!(UserDataStreamStartParams);
empty_params!(
    /// Subscribes the logged on session to its account's user data events.
    UserDataStreamSubscribeParams
);

ws_api_method!(PingParams, method::PING, None, EmptyResult);
ws_api_method!(TimeParams, method::TIME, None, ServerTime);
ws_api_method!(SessionStatusParams, method::SESSION_STATUS, Session, SessionStatus);
ws_api_method!(SessionLogoutParams, method::SESSION_LOGOUT, Session, SessionStatus);
ws_api_method!(
    UserDataStreamStartParams,
    method::USER_DATA_STREAM_START,
    UserStream,
    ListenKey
);
ws_api_method!(
    UserDataStreamSubscribeParams,
    method::USER_DATA_STREAM_SUBSCRIBE,
    Session,
    UserDataSubscription
);

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfoParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_permission_sets: Option<bool>,
}

impl ExchangeInfoParams {
    #[must_use]
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_symbols<S: Into<String>>(symbols: impl IntoIterator<Item = S>) -> Self {
        Self {
            symbols: Some(symbols.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }
}

ws_api_method!(ExchangeInfoParams, method::EXCHANGE_INFO, None, ExchangeInfo);

#[derive(Clone, Debug, Serialize)]
pub struct DepthParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl DepthParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

ws_api_method!(DepthParams, method::DEPTH, None, Depth);

/// Parameters for `klines`; wrap in [`UiKlinesParams`] for `uiKlines`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KlinesParams {
    pub symbol: String,
    pub interval: KlineInterval,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl KlinesParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>, interval: KlineInterval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            start_time: None,
            end_time: None,
            time_zone: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_range(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }
}

ws_api_method!(KlinesParams, method::KLINES, None, Vec<Kline>);

/// Same parameters as [`KlinesParams`], sent to `uiKlines`.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct UiKlinesParams(pub KlinesParams);

impl From<KlinesParams> for UiKlinesParams {
    fn from(params: KlinesParams) -> Self {
        Self(params)
    }
}

ws_api_method!(UiKlinesParams, method::UI_KLINES, None, Vec<Kline>);

/// Selects one symbol or a list of symbols for ticker methods.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SymbolSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
}

impl SymbolSelection {
    #[must_use]
    pub fn one(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            symbols: None,
        }
    }

    #[must_use]
    pub fn many<S: Into<String>>(symbols: impl IntoIterator<Item = S>) -> Self {
        Self {
            symbol: None,
            symbols: Some(symbols.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Ticker24hrParams {
    #[serde(flatten)]
    pub selection: SymbolSelection,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticker_type: Option<String>,
}

impl Ticker24hrParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            selection: SymbolSelection::one(symbol),
            ticker_type: None,
        }
    }

    #[must_use]
    pub fn for_symbols<S: Into<String>>(symbols: impl IntoIterator<Item = S>) -> Self {
        Self {
            selection: SymbolSelection::many(symbols),
            ticker_type: None,
        }
    }

    /// Requests the `MINI` ticker instead of `FULL`.
    #[must_use]
    pub fn mini(mut self) -> Self {
        self.ticker_type = Some("MINI".to_string());
        self
    }
}

ws_api_method!(Ticker24hrParams, method::TICKER_24HR, None, OneOrMany<Ticker24hr>);

#[derive(Clone, Debug, Serialize)]
pub struct TickerPriceParams {
    #[serde(flatten)]
    pub selection: SymbolSelection,
}

impl TickerPriceParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            selection: SymbolSelection::one(symbol),
        }
    }
}

ws_api_method!(TickerPriceParams, method::TICKER_PRICE, None, OneOrMany<TickerPrice>);

#[derive(Clone, Debug, Serialize)]
pub struct TickerBookParams {
    #[serde(flatten)]
    pub selection: SymbolSelection,
}

impl TickerBookParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            selection: SymbolSelection::one(symbol),
        }
    }
}

ws_api_method!(TickerBookParams, method::TICKER_BOOK, None, OneOrMany<TickerBook>);

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerTradingDayParams {
    #[serde(flatten)]
    pub selection: SymbolSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl TickerTradingDayParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            selection: SymbolSelection::one(symbol),
            time_zone: None,
        }
    }
}

ws_api_method!(
    TickerTradingDayParams,
    method::TICKER_TRADING_DAY,
    None,
    OneOrMany<RollingTicker>
);

/// Rolling window ticker (`ticker`); window sizes like `1m`, `4h`, `1d`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingTickerParams {
    #[serde(flatten)]
    pub selection: SymbolSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_size: Option<String>,
}

impl RollingTickerParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            selection: SymbolSelection::one(symbol),
            window_size: None,
        }
    }

    #[must_use]
    pub fn with_window_size(mut self, window_size: impl Into<String>) -> Self {
        self.window_size = Some(window_size.into());
        self
    }
}

ws_api_method!(RollingTickerParams, method::TICKER, None, OneOrMany<RollingTicker>);

#[derive(Clone, Debug, Serialize)]
pub struct AvgPriceParams {
    pub symbol: String,
}

impl AvgPriceParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

ws_api_method!(AvgPriceParams, method::AVG_PRICE, None, AvgPrice);

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggTradesParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl AggTradesParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            from_id: None,
            start_time: None,
            end_time: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }
}

ws_api_method!(AggTradesParams, method::TRADES_AGGREGATE, None, Vec<AggTrade>);

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalTradesParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl HistoricalTradesParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            from_id: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }
}

ws_api_method!(HistoricalTradesParams, method::TRADES_HISTORICAL, None, Vec<Trade>);

#[derive(Clone, Debug, Serialize)]
pub struct RecentTradesParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl RecentTradesParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

ws_api_method!(RecentTradesParams, method::TRADES_RECENT, None, Vec<Trade>);

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatusParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omit_zero_balances: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl AccountStatusParams {
    #[must_use]
    pub fn omit_zero_balances(mut self) -> Self {
        self.omit_zero_balances = Some(true);
        self
    }
}

ws_api_method!(AccountStatusParams, method::ACCOUNT_STATUS, Signed, AccountStatus);

#[derive(Clone, Debug, Serialize)]
pub struct AccountCommissionParams {
    pub symbol: String,
}

impl AccountCommissionParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

ws_api_method!(
    AccountCommissionParams,
    method::ACCOUNT_COMMISSION,
    Signed,
    AccountCommission
);

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRateLimitsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

ws_api_method!(
    OrderRateLimitsParams,
    method::ACCOUNT_RATE_LIMITS_ORDERS,
    Signed,
    Vec<RateLimit>
);

/// Shared shape of the per-symbol history queries.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolHistoryParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl SymbolHistoryParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            start_time: None,
            end_time: None,
            from_id: None,
            limit: None,
            recv_window: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }
}

macro_rules! symbol_history_params {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub SymbolHistoryParams);

        impl $name {
            #[must_use]
            pub fn new(symbol: impl Into<String>) -> Self {
                Self(SymbolHistoryParams::new(symbol))
            }

            #[must_use]
            pub fn with_limit(self, limit: u32) -> Self {
                Self(self.0.with_limit(limit))
            }

            #[must_use]
            pub fn with_order_id(self, order_id: i64) -> Self {
                Self(self.0.with_order_id(order_id))
            }
        }
    };
}

symbol_history_params!(MyTradesParams);
symbol_history_params!(AllOrdersParams);
symbol_history_params!(MyAllocationsParams);

ws_api_method!(MyTradesParams, method::MY_TRADES, Signed, Vec<AccountTrade>);
ws_api_method!(AllOrdersParams, method::ALL_ORDERS, Signed, Vec<OrderReport>);
ws_api_method!(MyAllocationsParams, method::MY_ALLOCATIONS, Signed, Vec<Allocation>);

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrdersStatusParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl OpenOrdersStatusParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            recv_window: None,
        }
    }
}

ws_api_method!(
    OpenOrdersStatusParams,
    method::OPEN_ORDERS_STATUS,
    Signed,
    Vec<OrderReport>
);

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllOrderListsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl AllOrderListsParams {
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

ws_api_method!(
    AllOrderListsParams,
    method::ALL_ORDER_LISTS,
    Signed,
    Vec<OrderListReport>
);

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrderListsStatusParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

ws_api_method!(
    OpenOrderListsStatusParams,
    method::OPEN_ORDER_LISTS_STATUS,
    Signed,
    Vec<OrderListReport>
);

/// `myPreventedMatches` takes exactly one of the id filters.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPreventedMatchesParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevented_match_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_prevented_match_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl MyPreventedMatchesParams {
    #[must_use]
    pub fn by_order_id(symbol: impl Into<String>, order_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            prevented_match_id: None,
            order_id: Some(order_id),
            from_prevented_match_id: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn by_prevented_match_id(symbol: impl Into<String>, prevented_match_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            prevented_match_id: Some(prevented_match_id),
            order_id: None,
            from_prevented_match_id: None,
            limit: None,
        }
    }
}

ws_api_method!(
    MyPreventedMatchesParams,
    method::MY_PREVENTED_MATCHES,
    Signed,
    Vec<PreventedMatch>
);

/// Identifies one order by exchange id or client id.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl OrderStatusParams {
    #[must_use]
    pub fn by_order_id(symbol: impl Into<String>, order_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
            recv_window: None,
        }
    }

    #[must_use]
    pub fn by_client_order_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
            recv_window: None,
        }
    }
}

ws_api_method!(OrderStatusParams, method::ORDER_STATUS, Signed, OrderReport);

// ---------------------------------------------------------------------------
// Trading
// ---------------------------------------------------------------------------

/// Parameters for `order.place`.
#[derive(Clone, Debug, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct NewOrderParams {
    pub symbol: String,
    pub side: BinanceSide,
    #[serde(rename = "type")]
    pub order_type: BinanceOrderType,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<BinanceTimeInForce>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_order_qty: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_client_order_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_order_resp_type: Option<BinanceOrderResponseType>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_trade_prevention_mode: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl NewOrderParams {
    #[must_use]
    pub fn builder() -> NewOrderParamsBuilder {
        NewOrderParamsBuilder::default()
    }

    /// GTC limit order.
    #[must_use]
    pub fn limit(
        symbol: impl Into<String>,
        side: BinanceSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: BinanceOrderType::Limit,
            time_in_force: Some(BinanceTimeInForce::Gtc),
            quantity: Some(quantity),
            quote_order_qty: None,
            price: Some(price),
            stop_price: None,
            new_client_order_id: None,
            new_order_resp_type: None,
            self_trade_prevention_mode: None,
            recv_window: None,
        }
    }

    #[must_use]
    pub fn market(symbol: impl Into<String>, side: BinanceSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: BinanceOrderType::Market,
            time_in_force: None,
            quantity: Some(quantity),
            quote_order_qty: None,
            price: None,
            stop_price: None,
            new_client_order_id: None,
            new_order_resp_type: None,
            self_trade_prevention_mode: None,
            recv_window: None,
        }
    }

    #[must_use]
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_response_type(mut self, resp_type: BinanceOrderResponseType) -> Self {
        self.new_order_resp_type = Some(resp_type);
        self
    }
}

ws_api_method!(NewOrderParams, method::ORDER_PLACE, Signed, OrderReport);

/// Parameters for `order.test`: a new order validated without reaching the book.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTestParams {
    #[serde(flatten)]
    pub order: NewOrderParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_commission_rates: Option<bool>,
}

impl OrderTestParams {
    #[must_use]
    pub fn with_commission_rates(mut self) -> Self {
        self.compute_commission_rates = Some(true);
        self
    }
}

impl From<NewOrderParams> for OrderTestParams {
    fn from(order: NewOrderParams) -> Self {
        Self {
            order,
            compute_commission_rates: None,
        }
    }
}

ws_api_method!(OrderTestParams, method::ORDER_TEST, Signed, OrderTestResult);

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_restrictions: Option<BinanceCancelRestrictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl CancelOrderParams {
    #[must_use]
    pub fn by_order_id(symbol: impl Into<String>, order_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
            new_client_order_id: None,
            cancel_restrictions: None,
            recv_window: None,
        }
    }

    #[must_use]
    pub fn by_client_order_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
            new_client_order_id: None,
            cancel_restrictions: None,
            recv_window: None,
        }
    }

    #[must_use]
    pub fn with_cancel_restrictions(mut self, restrictions: BinanceCancelRestrictions) -> Self {
        self.cancel_restrictions = Some(restrictions);
        self
    }
}

ws_api_method!(CancelOrderParams, method::ORDER_CANCEL, Signed, OrderReport);

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOpenOrdersParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl CancelOpenOrdersParams {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            recv_window: None,
        }
    }
}

ws_api_method!(
    CancelOpenOrdersParams,
    method::OPEN_ORDERS_CANCEL_ALL,
    Signed,
    Vec<CancelAllEntry>
);

/// Parameters for `sor.order.test` (smart order routing).
#[derive(Clone, Debug, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct SorOrderTestParams {
    pub symbol: String,
    pub side: BinanceSide,
    #[serde(rename = "type")]
    pub order_type: BinanceOrderType,
    pub quantity: Decimal,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<BinanceTimeInForce>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_client_order_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_commission_rates: Option<bool>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl SorOrderTestParams {
    #[must_use]
    pub fn builder() -> SorOrderTestParamsBuilder {
        SorOrderTestParamsBuilder::default()
    }
}

ws_api_method!(SorOrderTestParams, method::SOR_ORDER_TEST, Signed, OrderTestResult);

/// Parameters for `orderList.place.oco`.
///
/// One leg sits above the market price and one below; each is described by
/// `above*` / `below*` fields.
#[derive(Clone, Debug, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct OcoOrderParams {
    pub symbol: String,
    pub side: BinanceSide,
    pub quantity: Decimal,
    pub above_type: BinanceOrderType,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above_price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above_stop_price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above_time_in_force: Option<BinanceTimeInForce>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above_client_order_id: Option<String>,
    pub below_type: BinanceOrderType,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below_price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below_stop_price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below_time_in_force: Option<BinanceTimeInForce>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below_client_order_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_client_order_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_order_resp_type: Option<BinanceOrderResponseType>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl OcoOrderParams {
    #[must_use]
    pub fn builder() -> OcoOrderParamsBuilder {
        OcoOrderParamsBuilder::default()
    }
}

ws_api_method!(OcoOrderParams, method::ORDER_LIST_PLACE_OCO, Signed, OrderListReport);

/// Parameters for `orderList.place.oto`.
///
/// The pending order is only placed once the working order fills.
#[derive(Clone, Debug, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct OtoOrderParams {
    pub symbol: String,
    pub working_type: BinanceOrderType,
    pub working_side: BinanceSide,
    pub working_price: Decimal,
    pub working_quantity: Decimal,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_time_in_force: Option<BinanceTimeInForce>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_client_order_id: Option<String>,
    pub pending_type: BinanceOrderType,
    pub pending_side: BinanceSide,
    pub pending_quantity: Decimal,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_stop_price: Option<Decimal>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_time_in_force: Option<BinanceTimeInForce>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_client_order_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_client_order_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl OtoOrderParams {
    #[must_use]
    pub fn builder() -> OtoOrderParamsBuilder {
        OtoOrderParamsBuilder::default()
    }
}

ws_api_method!(OtoOrderParams, method::ORDER_LIST_PLACE_OTO, Signed, OrderListReport);

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderListParams {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_list_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl CancelOrderListParams {
    #[must_use]
    pub fn by_order_list_id(symbol: impl Into<String>, order_list_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_list_id: Some(order_list_id),
            list_client_order_id: None,
            new_client_order_id: None,
            recv_window: None,
        }
    }

    #[must_use]
    pub fn by_list_client_order_id(
        symbol: impl Into<String>,
        list_client_order_id: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            order_list_id: None,
            list_client_order_id: Some(list_client_order_id.into()),
            new_client_order_id: None,
            recv_window: None,
        }
    }
}

ws_api_method!(CancelOrderListParams, method::ORDER_LIST_CANCEL, Signed, OrderListReport);

// ---------------------------------------------------------------------------
// Session and user data stream
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLogonParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

ws_api_method!(SessionLogonParams, method::SESSION_LOGON, Logon, SessionStatus);

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenKeyParams {
    pub listen_key: String,
}

impl ListenKeyParams {
    #[must_use]
    pub fn new(listen_key: impl Into<String>) -> Self {
        Self {
            listen_key: listen_key.into(),
        }
    }
}

/// `userDataStream.ping` for a listen key.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct UserDataStreamPingParams(pub ListenKeyParams);

/// `userDataStream.stop` for a listen key.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct UserDataStreamStopParams(pub ListenKeyParams);

impl UserDataStreamPingParams {
    #[must_use]
    pub fn new(listen_key: impl Into<String>) -> Self {
        Self(ListenKeyParams::new(listen_key))
    }
}

impl UserDataStreamStopParams {
    #[must_use]
    pub fn new(listen_key: impl Into<String>) -> Self {
        Self(ListenKeyParams::new(listen_key))
    }
}

ws_api_method!(
    UserDataStreamPingParams,
    method::USER_DATA_STREAM_PING,
    UserStream,
    EmptyResult
);
ws_api_method!(
    UserDataStreamStopParams,
    method::USER_DATA_STREAM_STOP,
    UserStream,
    EmptyResult
);

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataStreamUnsubscribeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<u64>,
}

ws_api_method!(
    UserDataStreamUnsubscribeParams,
    method::USER_DATA_STREAM_UNSUBSCRIBE,
    Session,
    EmptyResult
);
