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

//! Binance Spot WebSocket API client.
//!
//! ## Connection details
//!
//! - Endpoint: `ws-api.testnet.binance.vision/ws-api/v3` (testnet), `ws-api.binance.com:443/ws-api/v3`
//! - Authentication: per request signature, or once per connection via `session.logon`
//! - Ping/pong: every 20 seconds by default
//!
//! The client is cheap to clone; clones share one connection and can issue requests
//! concurrently. Responses are matched to requests by UUID request id.

use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use dashmap::DashMap;
use serde_json::{Map, Value};
use tokio::sync::{mpsc, oneshot, RwLock};
use uuid::Uuid;

use super::{
    error::{BinanceWsError, BinanceWsResult},
    handler::{open_connection, PendingRequests, WsApiHandler},
    messages::{method, HandlerCommand, RateLimit, WsApiMethod, WsApiRequest, WsApiResponse},
    models::{
        AccountCommission, AccountStatus, AccountTrade, AggTrade, Allocation, AvgPrice,
        CancelAllEntry, Depth, EmptyResult, ExchangeInfo, Kline, ListenKey, OneOrMany,
        OrderListReport, OrderReport, OrderTestResult, PreventedMatch, RollingTicker,
        ServerTime, SessionStatus, Ticker24hr, TickerBook, TickerPrice, Trade,
        UserDataSubscription,
    },
    parse::parse_response,
    query::{
        AccountCommissionParams, AccountStatusParams, AggTradesParams, AllOrderListsParams,
        AllOrdersParams, AvgPriceParams, CancelOpenOrdersParams, CancelOrderListParams,
        CancelOrderParams, DepthParams, ExchangeInfoParams, HistoricalTradesParams,
        KlinesParams, MyAllocationsParams, MyPreventedMatchesParams, MyTradesParams,
        NewOrderParams, OcoOrderParams, OpenOrderListsStatusParams, OpenOrdersStatusParams,
        OrderRateLimitsParams, OrderStatusParams, OrderTestParams, OtoOrderParams, PingParams,
        RecentTradesParams, RollingTickerParams, SessionLogonParams, SessionLogoutParams,
        SessionStatusParams, SorOrderTestParams, Ticker24hrParams, TickerBookParams,
        TickerPriceParams, TickerTradingDayParams, TimeParams, UiKlinesParams,
        UserDataStreamPingParams, UserDataStreamStartParams, UserDataStreamStopParams,
        UserDataStreamSubscribeParams, UserDataStreamUnsubscribeParams,
    },
};
use crate::{
    common::{
        credential::BinanceAuth,
        enums::SecurityType,
        parse::{build_signature_payload, timestamp_ms},
        urls::url_host,
    },
    config::BinanceWsConfig,
};

const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the Binance Spot WebSocket API.
#[derive(Clone)]
pub struct BinanceWebSocketClient {
    config: Arc<BinanceWsConfig>,
    cmd_tx: Arc<RwLock<Option<mpsc::UnboundedSender<HandlerCommand>>>>,
    pending: PendingRequests,
    event_tx: mpsc::UnboundedSender<Value>,
    event_rx: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<Value>>>,
    connected: Arc<AtomicBool>,
    session_authenticated: Arc<AtomicBool>,
    task_handle: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
}

impl Debug for BinanceWebSocketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(BinanceWebSocketClient))
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .field("session_authenticated", &self.is_authenticated())
            .field("pending_requests", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl BinanceWebSocketClient {
    /// Creates a new [`BinanceWebSocketClient`]; call [`Self::connect`] before use.
    #[must_use]
    pub fn new(config: BinanceWsConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            config: Arc::new(config),
            cmd_tx: Arc::new(RwLock::new(None)),
            pending: Arc::new(DashMap::new()),
            event_tx,
            event_rx: Arc::new(tokio::sync::Mutex::new(event_rx)),
            connected: Arc::new(AtomicBool::new(false)),
            session_authenticated: Arc::new(AtomicBool::new(false)),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a testnet client with optional credentials.
    #[must_use]
    pub fn testnet(auth: Option<BinanceAuth>) -> Self {
        Self::new(BinanceWsConfig::testnet(auth))
    }

    #[must_use]
    pub fn config(&self) -> &BinanceWsConfig {
        &self.config
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Returns true once `session.logon` succeeded on the current connection.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session_authenticated.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.config.auth.is_some()
    }

    /// Number of requests still waiting for a response.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Connects and spawns the handler task. Does nothing if already connected.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established within the connect timeout.
    pub async fn connect(&self) -> BinanceWsResult<()> {
        if self.is_connected() {
            return Ok(());
        }

        install_crypto_provider();

        let url = self.config.url();
        tracing::info!("Connecting to {}", url_host(&url));

        let stream = open_connection(&self.config).await?;
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        self.session_authenticated.store(false, Ordering::SeqCst);
        self.connected.store(true, Ordering::SeqCst);

        let handler = WsApiHandler::new(
            self.config.clone(),
            stream,
            cmd_rx,
            self.event_tx.clone(),
            self.pending.clone(),
            self.connected.clone(),
            self.session_authenticated.clone(),
        );

        *self.cmd_tx.write().await = Some(cmd_tx);
        let handle = tokio::spawn(handler.run());
        if let Ok(mut guard) = self.task_handle.lock() {
            *guard = Some(handle);
        }

        tracing::info!("Connected to {}", url_host(&url));
        Ok(())
    }

    /// Closes the connection and waits for the handler task to stop.
    ///
    /// Pending requests fail with [`BinanceWsError::ConnectionClosed`].
    pub async fn disconnect(&self) {
        if let Some(tx) = self.cmd_tx.write().await.take() {
            if tx.send(HandlerCommand::Disconnect).is_err() {
                tracing::debug!("Handler already stopped");
            }
        }

        let handle = self.task_handle.lock().ok().and_then(|mut guard| guard.take());
        if let Some(mut handle) = handle {
            if tokio::time::timeout(DISCONNECT_TIMEOUT, &mut handle).await.is_err() {
                tracing::warn!("Handler did not stop within {DISCONNECT_TIMEOUT:?}, aborting");
                handle.abort();
            }
        }

        self.connected.store(false, Ordering::SeqCst);
        self.session_authenticated.store(false, Ordering::SeqCst);
        tracing::info!("Disconnected");
    }

    /// Waits for the next message that is not a response, such as a user data event.
    ///
    /// Returns `None` once the client and all its clones are dropped.
    pub async fn next_event(&self) -> Option<Value> {
        self.event_rx.lock().await.recv().await
    }

    /// Sends any request type and decodes its typed response.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is not connected, the request times out, the
    /// connection drops, or the exchange answers with an error envelope.
    pub async fn call<R: WsApiMethod>(
        &self,
        params: &R,
    ) -> BinanceWsResult<WsApiResponse<R::Output>> {
        let params = serde_json::to_value(params)?;
        let payload = self.send_request(R::METHOD, R::SECURITY, params).await?;
        let response = parse_response::<R::Output>(payload)?;

        match R::METHOD {
            method::SESSION_LOGON => {
                self.session_authenticated.store(true, Ordering::SeqCst);
                tracing::info!("Session logged on");
            }
            method::SESSION_LOGOUT => {
                self.session_authenticated.store(false, Ordering::SeqCst);
                tracing::info!("Session logged out");
            }
            _ => {}
        }

        Ok(response)
    }

    async fn send_request(
        &self,
        method: &'static str,
        security: SecurityType,
        params: Value,
    ) -> BinanceWsResult<Value> {
        let tx = self
            .cmd_tx
            .read()
            .await
            .clone()
            .ok_or(BinanceWsError::NotConnected)?;

        let params = self.prepare_params(method, security, params)?;
        let id = Uuid::new_v4().to_string();
        let request = WsApiRequest::new(id.clone(), method, params);
        let text = serde_json::to_string(&request)?;

        let (response_tx, response_rx) = oneshot::channel();
        self.pending.insert(id.clone(), response_tx);

        tracing::debug!("Sending request id={id} method={method}");
        if tx.send(HandlerCommand::Send(text)).is_err() {
            self.pending.remove(&id);
            return Err(BinanceWsError::NotConnected);
        }

        match tokio::time::timeout(self.config.request_timeout, response_rx).await {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(_)) => Err(BinanceWsError::ConnectionClosed),
            Err(_) => {
                self.pending.remove(&id);
                Err(BinanceWsError::Timeout {
                    method: method.to_string(),
                    timeout: self.config.request_timeout,
                })
            }
        }
    }

    /// Adds authentication parameters according to the method's security type.
    fn prepare_params(
        &self,
        method: &'static str,
        security: SecurityType,
        params: Value,
    ) -> BinanceWsResult<Option<Value>> {
        let mut params = match params {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(BinanceWsError::InvalidParams {
                    method,
                    reason: format!("expected an object, was {other}"),
                })
            }
        };

        match security {
            SecurityType::None | SecurityType::Session => {}
            SecurityType::UserStream => {
                let auth = self.auth(method)?;
                params
                    .entry("apiKey")
                    .or_insert_with(|| Value::from(auth.api_key()));
            }
            SecurityType::Signed | SecurityType::Logon => {
                let auth = self.auth(method)?;
                params
                    .entry("timestamp")
                    .or_insert_with(|| Value::from(timestamp_ms()));

                // A logged on session authorizes signed methods without a signature
                if security == SecurityType::Logon || !self.is_authenticated() {
                    params.insert("apiKey".to_string(), Value::from(auth.api_key()));
                    let payload = build_signature_payload(&params);
                    params.insert("signature".to_string(), Value::from(auth.sign(&payload)));
                }
            }
        }

        Ok((!params.is_empty()).then_some(Value::Object(params)))
    }

    fn auth(&self, method: &'static str) -> BinanceWsResult<&BinanceAuth> {
        self.config
            .auth
            .as_deref()
            .ok_or(BinanceWsError::MissingCredentials(method))
    }

    // -- Market data ------------------------------------------------------------------------

    /// Tests connectivity.
    pub async fn ping(&self) -> BinanceWsResult<WsApiResponse<EmptyResult>> {
        self.call(&PingParams).await
    }

    pub async fn time(&self) -> BinanceWsResult<WsApiResponse<ServerTime>> {
        self.call(&TimeParams).await
    }

    pub async fn exchange_info(
        &self,
        params: &ExchangeInfoParams,
    ) -> BinanceWsResult<WsApiResponse<ExchangeInfo>> {
        self.call(params).await
    }

    pub async fn depth(&self, params: &DepthParams) -> BinanceWsResult<WsApiResponse<Depth>> {
        self.call(params).await
    }

    pub async fn klines(&self, params: &KlinesParams) -> BinanceWsResult<WsApiResponse<Vec<Kline>>> {
        self.call(params).await
    }

    /// Klines tuned for presentation.
    pub async fn ui_klines(
        &self,
        params: &UiKlinesParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<Kline>>> {
        self.call(params).await
    }

    pub async fn ticker_24hr(
        &self,
        params: &Ticker24hrParams,
    ) -> BinanceWsResult<WsApiResponse<OneOrMany<Ticker24hr>>> {
        self.call(params).await
    }

    pub async fn ticker_price(
        &self,
        params: &TickerPriceParams,
    ) -> BinanceWsResult<WsApiResponse<OneOrMany<TickerPrice>>> {
        self.call(params).await
    }

    pub async fn ticker_book(
        &self,
        params: &TickerBookParams,
    ) -> BinanceWsResult<WsApiResponse<OneOrMany<TickerBook>>> {
        self.call(params).await
    }

    pub async fn ticker_trading_day(
        &self,
        params: &TickerTradingDayParams,
    ) -> BinanceWsResult<WsApiResponse<OneOrMany<RollingTicker>>> {
        self.call(params).await
    }

    /// Rolling window price change statistics (`ticker`).
    pub async fn ticker(
        &self,
        params: &RollingTickerParams,
    ) -> BinanceWsResult<WsApiResponse<OneOrMany<RollingTicker>>> {
        self.call(params).await
    }

    pub async fn avg_price(
        &self,
        params: &AvgPriceParams,
    ) -> BinanceWsResult<WsApiResponse<AvgPrice>> {
        self.call(params).await
    }

    pub async fn trades_aggregate(
        &self,
        params: &AggTradesParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<AggTrade>>> {
        self.call(params).await
    }

    pub async fn trades_historical(
        &self,
        params: &HistoricalTradesParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<Trade>>> {
        self.call(params).await
    }

    pub async fn trades_recent(
        &self,
        params: &RecentTradesParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<Trade>>> {
        self.call(params).await
    }

    // -- Account ----------------------------------------------------------------------------

    pub async fn account_status(
        &self,
        params: &AccountStatusParams,
    ) -> BinanceWsResult<WsApiResponse<AccountStatus>> {
        self.call(params).await
    }

    pub async fn account_commission(
        &self,
        params: &AccountCommissionParams,
    ) -> BinanceWsResult<WsApiResponse<AccountCommission>> {
        self.call(params).await
    }

    /// Current unfilled order counts per rate limit window.
    pub async fn account_rate_limits_orders(
        &self,
        params: &OrderRateLimitsParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<RateLimit>>> {
        self.call(params).await
    }

    pub async fn my_trades(
        &self,
        params: &MyTradesParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<AccountTrade>>> {
        self.call(params).await
    }

    pub async fn my_allocations(
        &self,
        params: &MyAllocationsParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<Allocation>>> {
        self.call(params).await
    }

    pub async fn my_prevented_matches(
        &self,
        params: &MyPreventedMatchesParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<PreventedMatch>>> {
        self.call(params).await
    }

    pub async fn all_orders(
        &self,
        params: &AllOrdersParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<OrderReport>>> {
        self.call(params).await
    }

    pub async fn all_order_lists(
        &self,
        params: &AllOrderListsParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<OrderListReport>>> {
        self.call(params).await
    }

    pub async fn open_orders_status(
        &self,
        params: &OpenOrdersStatusParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<OrderReport>>> {
        self.call(params).await
    }

    pub async fn open_order_lists_status(
        &self,
        params: &OpenOrderListsStatusParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<OrderListReport>>> {
        self.call(params).await
    }

    pub async fn order_status(
        &self,
        params: &OrderStatusParams,
    ) -> BinanceWsResult<WsApiResponse<OrderReport>> {
        self.call(params).await
    }

    // -- Trading ----------------------------------------------------------------------------

    /// Validates an order without sending it to the matching engine.
    pub async fn order_test(
        &self,
        params: &OrderTestParams,
    ) -> BinanceWsResult<WsApiResponse<OrderTestResult>> {
        self.call(params).await
    }

    pub async fn order_place(
        &self,
        params: &NewOrderParams,
    ) -> BinanceWsResult<WsApiResponse<OrderReport>> {
        self.call(params).await
    }

    pub async fn order_cancel(
        &self,
        params: &CancelOrderParams,
    ) -> BinanceWsResult<WsApiResponse<OrderReport>> {
        self.call(params).await
    }

    /// Cancels all open orders and order lists on a symbol.
    pub async fn open_orders_cancel_all(
        &self,
        params: &CancelOpenOrdersParams,
    ) -> BinanceWsResult<WsApiResponse<Vec<CancelAllEntry>>> {
        self.call(params).await
    }

    pub async fn sor_order_test(
        &self,
        params: &SorOrderTestParams,
    ) -> BinanceWsResult<WsApiResponse<OrderTestResult>> {
        self.call(params).await
    }

    pub async fn order_list_place_oco(
        &self,
        params: &OcoOrderParams,
    ) -> BinanceWsResult<WsApiResponse<OrderListReport>> {
        self.call(params).await
    }

    pub async fn order_list_place_oto(
        &self,
        params: &OtoOrderParams,
    ) -> BinanceWsResult<WsApiResponse<OrderListReport>> {
        self.call(params).await
    }

    pub async fn order_list_cancel(
        &self,
        params: &CancelOrderListParams,
    ) -> BinanceWsResult<WsApiResponse<OrderListReport>> {
        self.call(params).await
    }

    // -- Session ----------------------------------------------------------------------------

    /// Authenticates the connection; later signed requests skip the signature.
    ///
    /// Binance only accepts Ed25519 keys for session logon.
    pub async fn session_logon(&self) -> BinanceWsResult<WsApiResponse<SessionStatus>> {
        self.call(&SessionLogonParams::default()).await
    }

    pub async fn session_status(&self) -> BinanceWsResult<WsApiResponse<SessionStatus>> {
        self.call(&SessionStatusParams).await
    }

    pub async fn session_logout(&self) -> BinanceWsResult<WsApiResponse<SessionStatus>> {
        self.call(&SessionLogoutParams).await
    }

    // -- User data stream -------------------------------------------------------------------

    pub async fn user_data_stream_start(&self) -> BinanceWsResult<WsApiResponse<ListenKey>> {
        self.call(&UserDataStreamStartParams).await
    }

    pub async fn user_data_stream_ping(
        &self,
        listen_key: &str,
    ) -> BinanceWsResult<WsApiResponse<EmptyResult>> {
        self.call(&UserDataStreamPingParams::new(listen_key)).await
    }

    pub async fn user_data_stream_stop(
        &self,
        listen_key: &str,
    ) -> BinanceWsResult<WsApiResponse<EmptyResult>> {
        self.call(&UserDataStreamStopParams::new(listen_key)).await
    }

    /// Subscribes the logged on session to user data events, read with [`Self::next_event`].
    pub async fn user_data_stream_subscribe(
        &self,
    ) -> BinanceWsResult<WsApiResponse<UserDataSubscription>> {
        self.call(&UserDataStreamSubscribeParams).await
    }

    pub async fn user_data_stream_unsubscribe(
        &self,
        subscription_id: Option<u64>,
    ) -> BinanceWsResult<WsApiResponse<EmptyResult>> {
        self.call(&UserDataStreamUnsubscribeParams { subscription_id })
            .await
    }
}

fn install_crypto_provider() {
    // Fails when a provider is already installed, which is fine
    let _ = rustls::crypto::ring::default_provider().install_default();
}
