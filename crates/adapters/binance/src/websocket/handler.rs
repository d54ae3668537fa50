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

//! Connection handler for the Spot WebSocket API.
//!
//! The handler runs in a dedicated Tokio task and exclusively owns the socket. The client
//! talks to it through an unbounded command channel and waits for responses on oneshot
//! channels registered in the shared pending map.
//!
//! - Text frames with an `id` complete the matching pending request.
//! - Text frames without an `id` are forwarded to the event channel.
//! - A ping is sent every `ping_interval`; a missing pong after `ping_timeout` drops the
//!   connection.
//! - On connection loss every pending request is failed. With `auto_reconnect` the handler
//!   reconnects with exponential backoff, otherwise it exits.

use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use dashmap::DashMap;
use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde_json::Value;
use tokio::{
    net::TcpStream,
    sync::{mpsc, oneshot},
    time::Instant,
};
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};

use super::{
    error::{BinanceWsError, BinanceWsResult},
    messages::{HandlerCommand, WsFrame},
    parse::parse_frame,
};
use crate::{common::urls::url_host, config::BinanceWsConfig};

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Requests awaiting a response, keyed by request id.
pub(crate) type PendingRequests = Arc<DashMap<String, oneshot::Sender<Value>>>;

/// Opens a WebSocket connection bounded by the configured connect timeout.
pub(crate) async fn open_connection(config: &BinanceWsConfig) -> BinanceWsResult<WsStream> {
    let url = config.url();
    let (stream, response) = tokio::time::timeout(config.connect_timeout, connect_async(url.as_str()))
        .await
        .map_err(|_| {
            BinanceWsError::Connection(format!(
                "connect to {} timed out after {:?}",
                url_host(&url),
                config.connect_timeout
            ))
        })??;
    tracing::debug!(
        "WebSocket handshake with {} completed: {}",
        url_host(&url),
        response.status()
    );
    Ok(stream)
}

enum Exit {
    Disconnect,
    ConnectionLost(String),
}

pub(crate) struct WsApiHandler {
    config: Arc<BinanceWsConfig>,
    sink: WsSink,
    source: WsSource,
    cmd_rx: mpsc::UnboundedReceiver<HandlerCommand>,
    event_tx: mpsc::UnboundedSender<Value>,
    pending: PendingRequests,
    connected: Arc<AtomicBool>,
    session_authenticated: Arc<AtomicBool>,
    pong_deadline: Option<Instant>,
}

impl Debug for WsApiHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(WsApiHandler))
            .field("url", &self.config.url())
            .field("pending_requests", &self.pending.len())
            .field("pong_deadline", &self.pong_deadline)
            .finish_non_exhaustive()
    }
}

impl WsApiHandler {
    pub(crate) fn new(
        config: Arc<BinanceWsConfig>,
        stream: WsStream,
        cmd_rx: mpsc::UnboundedReceiver<HandlerCommand>,
        event_tx: mpsc::UnboundedSender<Value>,
        pending: PendingRequests,
        connected: Arc<AtomicBool>,
        session_authenticated: Arc<AtomicBool>,
    ) -> Self {
        let (sink, source) = stream.split();
        Self {
            config,
            sink,
            source,
            cmd_rx,
            event_tx,
            pending,
            connected,
            session_authenticated,
            pong_deadline: None,
        }
    }

    /// Runs until the client disconnects or the connection is lost for good.
    pub(crate) async fn run(mut self) {
        loop {
            match self.run_connection().await {
                Exit::Disconnect => {
                    tracing::debug!("Handler received disconnect command");
                    if let Err(e) = self.sink.close().await {
                        tracing::debug!("Error closing WebSocket: {e}");
                    }
                    break;
                }
                Exit::ConnectionLost(reason) => {
                    tracing::warn!("WebSocket connection lost: {reason}");
                    self.session_authenticated.store(false, Ordering::SeqCst);
                    self.fail_pending_requests();

                    if !self.config.auto_reconnect || !self.reconnect().await {
                        break;
                    }
                }
            }
        }

        self.shutdown();
    }

    async fn run_connection(&mut self) -> Exit {
        let mut ping_timer = tokio::time::interval(self.config.ping_interval);
        // First tick completes immediately
        ping_timer.tick().await;

        loop {
            tokio::select! {
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(HandlerCommand::Send(text)) => {
                        if let Err(e) = self.sink.send(Message::Text(text.into())).await {
                            return Exit::ConnectionLost(format!("send failed: {e}"));
                        }
                    }
                    Some(HandlerCommand::Disconnect) | None => return Exit::Disconnect,
                },
                msg = self.source.next() => match msg {
                    Some(Ok(Message::Text(text))) => self.handle_text(text.as_str()),
                    Some(Ok(Message::Ping(_))) => {
                        // The pong is queued by tungstenite and written on flush
                        if let Err(e) = self.sink.flush().await {
                            return Exit::ConnectionLost(format!("pong failed: {e}"));
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {
                        tracing::trace!("Received pong");
                        self.pong_deadline = None;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        return Exit::ConnectionLost(format!("closed by server: {frame:?}"));
                    }
                    Some(Ok(Message::Binary(data))) => {
                        tracing::warn!("Ignoring unexpected binary frame ({} bytes)", data.len());
                    }
                    Some(Ok(Message::Frame(_))) => {}
                    Some(Err(e)) => return Exit::ConnectionLost(e.to_string()),
                    None => return Exit::ConnectionLost("stream ended".to_string()),
                },
                _ = ping_timer.tick() => {
                    if self.pong_deadline.is_none() {
                        self.pong_deadline = Some(Instant::now() + self.config.ping_timeout);
                    }
                    if let Err(e) = self.sink.send(Message::Ping(Vec::new().into())).await {
                        return Exit::ConnectionLost(format!("ping failed: {e}"));
                    }
                    tracing::trace!("Sent ping");
                }
                () = sleep_until(self.pong_deadline), if self.pong_deadline.is_some() => {
                    return Exit::ConnectionLost(format!(
                        "no pong within {:?}",
                        self.config.ping_timeout
                    ));
                }
            }
        }
    }

    fn handle_text(&self, text: &str) {
        match parse_frame(text) {
            Ok(WsFrame::Response { id, payload }) => match self.pending.remove(&id) {
                Some((_, tx)) => {
                    if tx.send(payload).is_err() {
                        tracing::debug!("Caller for request {id} is gone");
                    }
                }
                None => tracing::warn!("Received response for unknown request id {id}"),
            },
            Ok(WsFrame::Event(value)) => {
                if value.get("error").is_some() {
                    tracing::warn!("Received error without request id: {value}");
                }
                if let Err(e) = self.event_tx.send(value) {
                    tracing::debug!("Dropping event, no receiver: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to parse text frame: {e}"),
        }
    }

    /// Drops every pending sender so waiting callers see a closed connection.
    fn fail_pending_requests(&self) {
        if self.pending.is_empty() {
            return;
        }
        tracing::warn!(
            "Failing {} pending requests after connection loss",
            self.pending.len()
        );
        self.pending.clear();
    }

    async fn reconnect(&mut self) -> bool {
        let max_attempts = self.config.reconnect_max_attempts;

        for attempt in 1..=max_attempts {
            let delay = self.config.reconnect_delay(attempt);
            tracing::info!("Reconnecting in {delay:?} (attempt {attempt}/{max_attempts})");
            tokio::time::sleep(delay).await;

            match open_connection(&self.config).await {
                Ok(stream) => {
                    let (sink, source) = stream.split();
                    self.sink = sink;
                    self.source = source;
                    self.pong_deadline = None;
                    tracing::info!("Reconnected to {}", url_host(&self.config.url()));
                    return true;
                }
                Err(e) => tracing::warn!("Reconnect attempt {attempt} failed: {e}"),
            }
        }

        tracing::error!("Giving up after {max_attempts} reconnect attempts");
        false
    }

    fn shutdown(&mut self) {
        self.connected.store(false, Ordering::SeqCst);
        self.session_authenticated.store(false, Ordering::SeqCst);

        // Commands queued before the channel closed still hold pending entries
        self.cmd_rx.close();
        while self.cmd_rx.try_recv().is_ok() {}
        self.pending.clear();
        tracing::debug!("Handler stopped");
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
