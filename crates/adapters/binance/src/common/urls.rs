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

//! URL resolution for the Spot WebSocket API.

use url::Url;

use super::{
    consts::{BINANCE_SPOT_WS_API_TESTNET_URL, BINANCE_SPOT_WS_API_URL},
    enums::BinanceEnvironment,
};

/// Returns the WebSocket API endpoint for the given environment.
#[must_use]
pub const fn ws_api_url(environment: BinanceEnvironment) -> &'static str {
    match environment {
        BinanceEnvironment::Mainnet => BINANCE_SPOT_WS_API_URL,
        BinanceEnvironment::Testnet => BINANCE_SPOT_WS_API_TESTNET_URL,
    }
}

/// Returns the host part of a URL for log lines, or the input itself if it does not parse.
#[must_use]
pub fn url_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_string())
}
