use derive_getters::Getters;
use derive_new::new;
use serde::Deserialize;

/// Meta block of the Yahoo Finance chart response; the regular market
/// price is the only field the ledger consumes.
#[derive(Debug, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct YahooChartMetaDto {
    symbol: String,
    currency: Option<String>,
    regular_market_price: f64,
}
