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

//! Constants for the Binance Spot WebSocket API.

/// Spot WebSocket API endpoint (mainnet).
pub const BINANCE_SPOT_WS_API_URL: &str = "wss://ws-api.binance.com:443/ws-api/v3";

/// Spot WebSocket API endpoint (testnet).
pub const BINANCE_SPOT_WS_API_TESTNET_URL: &str = "wss://ws-api.testnet.binance.vision/ws-api/v3";

/// Status code of a successful WebSocket API response.
pub const BINANCE_OK_STATUS: u16 = 200;

/// Default keepalive ping interval in seconds.
pub const DEFAULT_PING_INTERVAL_SECS: u64 = 20;

/// Default time to wait for a pong in seconds.
pub const DEFAULT_PING_TIMEOUT_SECS: u64 = 10;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the HMAC API key.
pub const BINANCE_API_KEY: &str = "BINANCE_API_KEY";

/// Environment variable holding the HMAC secret key.
pub const BINANCE_SECRET_KEY: &str = "BINANCE_SECRET_KEY";

/// Environment variable holding the RSA API key.
pub const BINANCE_RSA_API_KEY: &str = "BINANCE_RSA_API_KEY";

/// Environment variable holding the path to the RSA private key PEM.
pub const BINANCE_RSA_PRIVATE_KEY_PATH: &str = "BINANCE_RSA_PRIVATE_KEY_PATH";

/// Environment variable holding the Ed25519 API key.
pub const BINANCE_ED25519_API_KEY: &str = "BINANCE_ED25519_API_KEY";

/// Environment variable holding the path to the Ed25519 private key PEM.
pub const BINANCE_ED25519_PRIVATE_KEY_PATH: &str = "BINANCE_ED25519_PRIVATE_KEY_PATH";
