use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::utils::make_text_request;

/// Label preceding the net asset value on MoneyDJ-style fund pages.
const NAV_LABEL: &str = "淨值";

/// Fetches a fund NAV from the asset's data url. The pages are plain HTML
/// without a stable API, so the value is pulled out of the markup: the
/// first decimal number following the NAV label, thousands separators
/// stripped.
pub async fn get_fund_nav(url: &str, client: &Client) -> Result<Decimal> {
    if !url.contains("http") {
        return Err(anyhow::anyhow!("Invalid NAV url '{}'", url));
    }

    let html = make_text_request(client, url).await?;
    extract_nav(&html).with_context(|| format!("No NAV found at {}", url))
}

pub fn extract_nav(html: &str) -> Result<Decimal> {
    let number = Regex::new(r"[0-9][0-9,]*\.[0-9]+")?;

    let window = match html.find(NAV_LABEL) {
        Some(pos) => &html[pos..],
        None => html,
    };

    let value = number
        .find(window)
        .ok_or_else(|| anyhow::anyhow!("No numeric NAV value in page"))?;

    Decimal::from_str(&value.as_str().replace(',', ""))
        .with_context(|| format!("Failed to parse NAV value '{}'", value.as_str()))
}
