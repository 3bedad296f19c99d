use anyhow::{Context, Result};
use reqwest::Client;
use rust_decimal::{Decimal, prelude::FromPrimitive};

use super::{
    utils::{make_request, parse_response_object},
    yahoo_dto::YahooChartMetaDto,
};

const BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo quotes currency pairs as chart symbols; TWD=X is USD→TWD.
const USD_TWD_SYMBOL: &str = "TWD=X";

pub async fn get_quote(symbol: &str, client: &Client) -> Result<YahooChartMetaDto> {
    let endpoint = format!("v8/finance/chart/{}", symbol);
    let res = make_request(client, BASE_URL, &endpoint).await?;

    let meta = res
        .get("chart")
        .and_then(|chart| chart.get("result"))
        .and_then(|result| result.get(0))
        .and_then(|first| first.get("meta"))
        .ok_or_else(|| anyhow::anyhow!("Failed to find chart meta in the response"))?;

    parse_response_object::<YahooChartMetaDto>(
        meta.clone(),
        &format!("No quote for symbol {}", symbol),
    )
    .await
}

pub async fn get_latest_price(symbol: &str, client: &Client) -> Result<Decimal> {
    let quote = get_quote(symbol, client).await?;
    Decimal::from_f64(*quote.regular_market_price())
        .with_context(|| format!("Yahoo ({}): Failed to parse price", symbol))
}

pub async fn get_usd_twd_rate(client: &Client) -> Result<Decimal> {
    get_latest_price(USD_TWD_SYMBOL, client).await
}
