use crate::core::{FsClient, FsError, net};
use crate::source::RawQuote;

use super::wire::{V7Envelope, V7QuoteNode};

/// Fetches one symbol from the v7 quote endpoint.
#[tracing::instrument(skip(client), err)]
pub(crate) async fn fetch_quote(client: &FsClient, symbol: &str) -> Result<RawQuote, FsError> {
    let mut url = client.base_quote_v7().clone();
    url.query_pairs_mut().append_pair("symbols", symbol);

    let resp = client
        .send(
            client
                .http()
                .get(url)
                .header("accept", "application/json"),
        )
        .await?;
    let body = net::get_text(resp, "quote_v7", symbol, "json").await?;

    let env: V7Envelope = serde_json::from_str(&body)?;
    let response = env
        .quote_response
        .ok_or_else(|| FsError::Data("quoteResponse missing".into()))?;

    if let Some(err) = response.error.filter(|e| !e.is_null()) {
        return Err(FsError::Data(format!("yahoo quote error: {err}")));
    }

    let node = response
        .result
        .unwrap_or_default()
        .into_iter()
        .find(|n| {
            n.symbol
                .as_deref()
                .is_none_or(|s| s.eq_ignore_ascii_case(symbol))
        })
        .ok_or_else(|| FsError::MissingData(format!("no quote result found for symbol {symbol}")))?;

    tracing::debug!(symbol, "quote received");
    Ok(node.into())
}

impl From<V7QuoteNode> for RawQuote {
    fn from(n: V7QuoteNode) -> Self {
        Self {
            long_name: n.long_name.or(n.short_name),
            regular_market_price: n.regular_market_price,
            previous_close: n.regular_market_previous_close,
            market_cap: n.market_cap,
            volume: n.regular_market_volume,
            avg_volume: n.average_daily_volume_3_month,
            day_high: n.regular_market_day_high,
            day_low: n.regular_market_day_low,
            fifty_two_week_high: n.fifty_two_week_high,
            fifty_two_week_low: n.fifty_two_week_low,
            trailing_pe: n.trailing_pe,
            price_to_book: n.price_to_book,
            dividend_yield: n.dividend_yield.or(n.trailing_annual_dividend_yield),
            beta: n.beta,
        }
    }
}
