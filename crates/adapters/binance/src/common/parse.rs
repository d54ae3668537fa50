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

//! Helpers for building signed request parameters.

use serde_json::{Map, Value};

/// Returns the current UNIX time in milliseconds.
#[must_use]
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Renders a parameter value the way it appears in a signature payload.
///
/// Strings are written without quotes; arrays and objects as compact JSON.
#[must_use]
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builds the `key=value&...` payload to sign, with keys in alphabetical order.
///
/// Null values and any existing `signature` are skipped.
#[must_use]
pub fn build_signature_payload(params: &Map<String, Value>) -> String {
    let mut pairs: Vec<(&String, &Value)> = params
        .iter()
        .filter(|(key, value)| key.as_str() != "signature" && !value.is_null())
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={}", param_to_string(value)))
        .collect::<Vec<_>>()
        .join("&")
}
