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

//! Client tests against a local mock of the Spot WebSocket API.

#[macro_use]
mod common;

use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use binance_spot_ws::{
    common::{enums::KeyType, parse::build_signature_payload},
    config::BinanceWsConfigBuilder,
    testing::assertions::ensure_response,
    websocket::query::{
        AccountStatusParams, DepthParams, ExchangeInfoParams, RecentTradesParams,
        TickerPriceParams,
    },
    BinanceAuth, BinanceWebSocketClient, BinanceWsConfig, BinanceWsError,
};
use common::{fixture_path, load_fixture, wait_until_async};
use futures::future::join_all;
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Clone, Default)]
struct MockState {
    received: Arc<tokio::sync::Mutex<Vec<Value>>>,
    connections: Arc<AtomicUsize>,
    pings: Arc<AtomicUsize>,
}

impl MockState {
    async fn received(&self) -> Vec<Value> {
        self.received.lock().await.clone()
    }

    async fn requests_for(&self, method: &str) -> Vec<Value> {
        self.received()
            .await
            .into_iter()
            .filter(|r| r["method"] == method)
            .collect()
    }
}

fn rate_limits() -> Value {
    json!([{
        "rateLimitType": "REQUEST_WEIGHT",
        "interval": "MINUTE",
        "intervalNum": 1,
        "limit": 6000,
        "count": 2
    }])
}

fn ok(id: &str, result: Value) -> Value {
    json!({"id": id, "status": 200, "result": result, "rateLimits": rate_limits()})
}

fn api_error(id: &str, status: u16, code: i64, msg: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "error": {"code": code, "msg": msg},
        "rateLimits": rate_limits()
    })
}

fn session_status(api_key: &Value) -> Value {
    let authorized_since = if api_key.is_null() {
        Value::Null
    } else {
        json!(1_649_729_878_532_i64)
    };
    json!({
        "apiKey": api_key,
        "authorizedSince": authorized_since,
        "connectedSince": 1_649_729_873_021_i64,
        "returnRateLimits": false,
        "serverTime": 1_649_729_878_630_i64
    })
}

async fn handle_websocket(ws: WebSocketUpgrade, State(state): State<MockState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

// Unanswered methods (such as exchangeInfo) let tests exercise timeouts and disconnects.
// trades.recent makes the server close the connection.
async fn handle_socket(mut socket: WebSocket, state: MockState) {
    state.connections.fetch_add(1, Ordering::SeqCst);
    let mut held_tickers: Vec<Value> = Vec::new();
    let mut logged_on_key = Value::Null;

    while let Some(Ok(msg)) = socket.recv().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Ping(_) => {
                state.pings.fetch_add(1, Ordering::SeqCst);
                continue;
            }
            Message::Close(_) => break,
            _ => continue,
        };

        let Ok(request) = serde_json::from_str::<Value>(text.as_str()) else {
            continue;
        };
        state.received.lock().await.push(request.clone());

        let id = request["id"].as_str().unwrap_or_default().to_string();
        let params = request.get("params").cloned().unwrap_or(Value::Null);

        let outgoing: Vec<Value> = match request["method"].as_str().unwrap_or_default() {
            "ping" => vec![ok(&id, json!({}))],
            "time" => vec![ok(&id, json!({"serverTime": 1_656_400_526_260_i64}))],
            "depth" if params["symbol"] == "INVALID" => {
                vec![api_error(&id, 400, -1121, "Invalid symbol.")]
            }
            "depth" => vec![ok(&id, load_fixture("ws_depth.json"))],
            "ticker.price" => {
                // Answer in reverse order once three requests are queued
                held_tickers.push(ok(
                    &id,
                    json!({"symbol": params["symbol"], "price": "100.00000000"}),
                ));
                if held_tickers.len() < 3 {
                    continue;
                }
                held_tickers.drain(..).rev().collect()
            }
            "account.status" => vec![ok(&id, load_fixture("ws_account_status.json"))],
            "session.logon" => {
                logged_on_key = params["apiKey"].clone();
                vec![ok(&id, session_status(&logged_on_key))]
            }
            "session.status" => vec![ok(&id, session_status(&logged_on_key))],
            "session.logout" => {
                logged_on_key = Value::Null;
                vec![ok(&id, session_status(&logged_on_key))]
            }
            "userDataStream.subscribe" => vec![
                ok(&id, json!({"subscriptionId": 0})),
                json!({
                    "subscriptionId": 0,
                    "event": {
                        "e": "balanceUpdate",
                        "E": 1_573_200_697_110_i64,
                        "a": "BTC",
                        "d": "100.00000000",
                        "T": 1_573_200_697_068_i64
                    }
                }),
            ],
            "trades.recent" => {
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
            _ => continue,
        };

        for value in outgoing {
            if socket
                .send(Message::Text(value.to_string().into()))
                .await
                .is_err()
            {
                return;
            }
        }
    }
}

async fn start_mock_server() -> (SocketAddr, MockState) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = MockState::default();
    let router = Router::new()
        .route("/ws-api/v3", get(handle_websocket))
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, state)
}

fn mock_client(
    addr: &SocketAddr,
    customize: impl FnOnce(&mut BinanceWsConfigBuilder),
) -> BinanceWebSocketClient {
    let mut builder = BinanceWsConfig::builder();
    builder.base_url(format!("ws://{addr}/ws-api/v3"));
    customize(&mut builder);
    BinanceWebSocketClient::new(builder.build().unwrap())
}

fn hmac_auth() -> BinanceAuth {
    BinanceAuth::hmac("test-key", "test-secret").unwrap()
}

fn ed25519_auth() -> BinanceAuth {
    BinanceAuth::from_key_file(
        "ed-key",
        fixture_path("ed25519_private_key.pem"),
        KeyType::Ed25519,
    )
    .unwrap()
}

async fn connected_client(
    customize: impl FnOnce(&mut BinanceWsConfigBuilder),
) -> (BinanceWebSocketClient, MockState) {
    let (addr, state) = start_mock_server().await;
    let client = mock_client(&addr, customize);
    client.connect().await.unwrap();
    (client, state)
}

#[rstest]
#[tokio::test]
async fn test_ping_request_envelope() {
    let (client, state) = connected_client(|_| {}).await;
    assert!(client.is_connected());

    let response = client.ping().await.unwrap();
    ensure_response(&response).unwrap();

    let requests = state.received().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["method"], "ping");
    assert!(requests[0].get("params").is_none());

    let id = requests[0]["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
    assert_eq!(response.id, id);

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_depth_request_and_typed_result() {
    let (client, state) = connected_client(|_| {}).await;

    let depth = client
        .depth(&DepthParams::new("BTCUSDT").with_limit(5))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(depth.last_update_id, 2_731_179_239);
    assert_eq!(depth.best_bid(), Some((dec!(66231.98), dec!(0.69517))));

    let requests = state.requests_for("depth").await;
    assert_eq!(requests[0]["params"], json!({"symbol": "BTCUSDT", "limit": 5}));

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_error_envelope_becomes_api_error() {
    let (client, _state) = connected_client(|_| {}).await;

    let err = client
        .depth(&DepthParams::new("INVALID"))
        .await
        .unwrap_err();

    match err {
        BinanceWsError::Api { status, code, msg } => {
            assert_eq!(status, 400);
            assert_eq!(code, -1121);
            assert_eq!(msg, "Invalid symbol.");
        }
        other => panic!("Expected API error, was {other:?}"),
    }
    assert!(client.is_connected());

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_concurrent_requests_are_correlated_by_id() {
    let (client, _state) = connected_client(|_| {}).await;

    let symbols = ["BTCUSDT", "ETHUSDT", "BNBUSDT"];
    let calls = symbols.iter().map(|symbol| {
        let client = client.clone();
        async move { client.ticker_price(&TickerPriceParams::new(*symbol)).await }
    });
    let responses = join_all(calls).await;

    assert_eq!(responses.len(), 3);
    for (symbol, response) in symbols.iter().zip(responses) {
        let tickers = response.unwrap().into_result().unwrap();
        assert_eq!(tickers.first().unwrap().symbol, *symbol);
    }
    assert_eq!(client.pending_requests(), 0);

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_request_timeout_removes_pending_entry() {
    let (client, _state) = connected_client(|b| {
        b.request_timeout(Duration::from_millis(200));
    })
    .await;

    let err = client
        .exchange_info(&ExchangeInfoParams::default())
        .await
        .unwrap_err();

    assert!(
        matches!(&err, BinanceWsError::Timeout { method, .. } if method == "exchangeInfo"),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.to_string(), "Request exchangeInfo timed out after 200ms");
    assert_eq!(client.pending_requests(), 0);
    assert!(client.is_connected());

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_signed_request_carries_valid_signature() {
    let (client, state) = connected_client(|b| {
        b.auth(hmac_auth());
    })
    .await;

    let account = client
        .account_status(&AccountStatusParams::default())
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(account.account_type, "SPOT");

    let requests = state.requests_for("account.status").await;
    let mut params = requests[0]["params"].as_object().unwrap().clone();
    assert_eq!(params["apiKey"], "test-key");
    assert!(params["timestamp"].as_i64().unwrap() > 0);

    let signature = params.remove("signature").unwrap();
    let expected = hmac_auth().sign(&build_signature_payload(&params));
    assert_eq!(signature, expected);

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_session_logon_switches_signed_requests_to_session_mode() {
    let (client, state) = connected_client(|b| {
        b.auth(ed25519_auth());
    })
    .await;
    assert!(!client.is_authenticated());

    let status = client.session_logon().await.unwrap().into_result().unwrap();
    assert!(status.is_logged_on());
    assert!(client.is_authenticated());

    let logon = state.requests_for("session.logon").await;
    assert_eq!(logon[0]["params"]["apiKey"], "ed-key");
    assert!(logon[0]["params"].get("signature").is_some());

    client
        .account_status(&AccountStatusParams::default())
        .await
        .unwrap();
    let account_requests = state.requests_for("account.status").await;
    let session_params = &account_requests[0]["params"];
    assert!(session_params.get("timestamp").is_some());
    assert!(session_params.get("apiKey").is_none());
    assert!(session_params.get("signature").is_none());

    let status = client.session_status().await.unwrap().into_result().unwrap();
    assert_eq!(status.api_key.as_deref(), Some("ed-key"));

    let status = client.session_logout().await.unwrap().into_result().unwrap();
    assert!(!status.is_logged_on());
    assert!(!client.is_authenticated());

    client
        .account_status(&AccountStatusParams::default())
        .await
        .unwrap();
    let account_requests = state.requests_for("account.status").await;
    assert!(account_requests[1]["params"].get("signature").is_some());

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_events_without_id_reach_next_event() {
    let (client, _state) = connected_client(|b| {
        b.auth(ed25519_auth());
    })
    .await;

    client.session_logon().await.unwrap();
    let subscription = client
        .user_data_stream_subscribe()
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(subscription.subscription_id, Some(0));

    let event = tokio::time::timeout(WAIT, client.next_event())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event["subscriptionId"], 0);
    assert_eq!(event["event"]["e"], "balanceUpdate");
    assert_eq!(event["event"]["a"], "BTC");

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_disconnect_fails_pending_calls() {
    let (client, state) = connected_client(|_| {}).await;

    let caller = client.clone();
    let task =
        tokio::spawn(async move { caller.exchange_info(&ExchangeInfoParams::default()).await });

    wait_until_async(
        || async { !state.requests_for("exchangeInfo").await.is_empty() },
        WAIT,
    )
    .await;
    assert_eq!(client.pending_requests(), 1);

    client.disconnect().await;

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(err, BinanceWsError::ConnectionClosed), "{err:?}");
    assert!(!client.is_connected());
    assert_eq!(client.pending_requests(), 0);

    let err = client.ping().await.unwrap_err();
    assert!(matches!(err, BinanceWsError::NotConnected));
}

#[rstest]
#[tokio::test]
async fn test_server_close_fails_pending_call() {
    let (client, _state) = connected_client(|_| {}).await;

    let err = client
        .trades_recent(&RecentTradesParams::new("BTCUSDT"))
        .await
        .unwrap_err();
    assert!(matches!(err, BinanceWsError::ConnectionClosed), "{err:?}");

    let watched = client.clone();
    wait_until_async(|| async { !watched.is_connected() }, WAIT).await;

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_reconnect_after_server_close_resets_session() {
    let (client, state) = connected_client(|b| {
        b.auth(ed25519_auth())
            .auto_reconnect(true)
            .reconnect_initial_delay(Duration::from_millis(50));
    })
    .await;

    client.session_logon().await.unwrap();
    assert!(client.is_authenticated());

    let err = client
        .trades_recent(&RecentTradesParams::new("BTCUSDT"))
        .await
        .unwrap_err();
    assert!(err.is_connection_error(), "{err:?}");

    let connections = state.connections.clone();
    wait_until_async(
        || {
            let connections = connections.clone();
            async move { connections.load(Ordering::SeqCst) == 2 }
        },
        WAIT,
    )
    .await;

    assert!(!client.is_authenticated());
    let response = client.ping().await.unwrap();
    assert_eq!(response.status, 200);
    assert!(client.is_connected());

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_keepalive_pings_are_sent() {
    let (client, state) = connected_client(|b| {
        b.ping_interval(Duration::from_millis(100))
            .ping_timeout(Duration::from_secs(2));
    })
    .await;

    let pings = state.pings.clone();
    wait_until_async(
        || {
            let pings = pings.clone();
            async move { pings.load(Ordering::SeqCst) >= 2 }
        },
        WAIT,
    )
    .await;

    assert!(client.is_connected());
    client.time().await.unwrap();

    client.disconnect().await;
}

#[rstest]
#[tokio::test]
async fn test_missing_pong_drops_connection() {
    // Server completes the handshake and then never reads, so no pong is ever written
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let _ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let client = mock_client(&addr, |b| {
        b.ping_interval(Duration::from_millis(100))
            .ping_timeout(Duration::from_millis(300))
            .request_timeout(Duration::from_secs(5));
    });
    client.connect().await.unwrap();
    assert!(client.is_connected());

    let pending = {
        let client = client.clone();
        tokio::spawn(async move { client.time().await })
    };

    let result = tokio::time::timeout(WAIT, pending).await.unwrap().unwrap();
    assert!(matches!(result, Err(BinanceWsError::ConnectionClosed)));

    wait_until_async(|| async { !client.is_connected() }, WAIT).await;
    assert!(!client.is_connected());
}
