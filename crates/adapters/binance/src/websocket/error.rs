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

//! WebSocket API error types.

use std::{fmt::Debug, time::Duration};

use thiserror::Error;

use crate::common::credential::CredentialError;

#[derive(Error, Debug)]
pub enum BinanceWsError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Send error: {0}")]
    Send(String),

    #[error("Request {method} timed out after {timeout:?}")]
    Timeout { method: String, timeout: Duration },

    #[error("API error (status {status}, code {code}): {msg}")]
    Api { status: u16, code: i64, msg: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid params for {method}: {reason}")]
    InvalidParams { method: &'static str, reason: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Not connected")]
    NotConnected,

    #[error("Connection closed before response received")]
    ConnectionClosed,

    #[error("Method {0} requires credentials")]
    MissingCredentials(&'static str),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}

impl BinanceWsError {
    /// Returns the exchange error code for API errors.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if the request never reached a response.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Send(_) | Self::NotConnected | Self::ConnectionClosed
        )
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for BinanceWsError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Connection(err.to_string())
    }
}

pub type BinanceWsResult<T> = Result<T, BinanceWsError>;
