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

//! Order prices far enough from the market to rest on the book without filter violations.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    common::enums::BinanceSide,
    websocket::{query::TickerPriceParams, BinanceWebSocketClient},
};

/// Default distance from the market price (10%).
pub const DEFAULT_PRICE_OFFSET: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Returns a price `offset` below the market for BUY and above it for SELL.
///
/// Falls back to [`fallback_price`] if the ticker cannot be fetched.
pub async fn realistic_price(
    client: &BinanceWebSocketClient,
    symbol: &str,
    side: BinanceSide,
    offset: Decimal,
) -> Decimal {
    let ticker = client
        .ticker_price(&TickerPriceParams::new(symbol))
        .await
        .map_err(|e| e.to_string())
        .and_then(|response| response.into_result().map_err(|e| e.to_string()))
        .and_then(|tickers| {
            tickers
                .first()
                .map(|t| t.price)
                .ok_or_else(|| "empty ticker result".to_string())
        });

    match ticker {
        Ok(market) => {
            let price = price_from_ticker(market, side, offset);
            tracing::debug!("{symbol} {side} test price {price} (market {market})");
            price
        }
        Err(e) => {
            let price = fallback_price(symbol, side);
            tracing::warn!("Ticker for {symbol} unavailable ({e}), using fallback price {price}");
            price
        }
    }
}

/// Applies `offset` to `market` and rounds to 2 decimal places.
#[must_use]
pub fn price_from_ticker(market: Decimal, side: BinanceSide, offset: Decimal) -> Decimal {
    let factor = match side {
        BinanceSide::Buy => Decimal::ONE - offset,
        BinanceSide::Sell => Decimal::ONE + offset,
    };
    let mut price =
        (market * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(2);
    price
}

/// Static prices used when the ticker is unavailable.
#[must_use]
pub fn fallback_price(symbol: &str, side: BinanceSide) -> Decimal {
    let (buy, sell) = match symbol {
        "BTCUSDT" => (60_000, 80_000),
        "ETHUSDT" => (2_500, 3_500),
        "BNBUSDT" => (300, 400),
        _ => (100, 200),
    };
    let units = match side {
        BinanceSide::Buy => buy,
        BinanceSide::Sell => sell,
    };
    Decimal::new(units * 100, 2)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case(dec!(66231.98), BinanceSide::Buy, dec!(59608.78))]
    #[case(dec!(66231.98), BinanceSide::Sell, dec!(72855.18))]
    #[case(dec!(100), BinanceSide::Buy, dec!(90.00))]
    fn test_price_from_ticker(
        #[case] market: Decimal,
        #[case] side: BinanceSide,
        #[case] expected: Decimal,
    ) {
        assert_eq!(price_from_ticker(market, side, DEFAULT_PRICE_OFFSET), expected);
    }

    #[rstest]
    fn test_price_has_two_decimals() {
        let price = price_from_ticker(dec!(100), BinanceSide::Sell, dec!(0.05));
        assert_eq!(price.to_string(), "105.00");
    }

    #[rstest]
    #[case("BTCUSDT", BinanceSide::Buy, "60000.00")]
    #[case("BTCUSDT", BinanceSide::Sell, "80000.00")]
    #[case("ETHUSDT", BinanceSide::Buy, "2500.00")]
    #[case("BNBUSDT", BinanceSide::Sell, "400.00")]
    #[case("XRPUSDT", BinanceSide::Buy, "100.00")]
    #[case("XRPUSDT", BinanceSide::Sell, "200.00")]
    fn test_fallback_price(#[case] symbol: &str, #[case] side: BinanceSide, #[case] expected: &str) {
        assert_eq!(fallback_price(symbol, side).to_string(), expected);
    }

    #[tokio::test]
    async fn test_disconnected_client_gets_fallback() {
        let client = BinanceWebSocketClient::testnet(None);
        let price = realistic_price(&client, "ETHUSDT", BinanceSide::Sell, DEFAULT_PRICE_OFFSET).await;
        assert_eq!(price, dec!(3500.00));
    }
}
