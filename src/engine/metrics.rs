use std::collections::BTreeMap;

use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Asset, Dividend, Realization};

/// Headline figures for the holdings view.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct HoldingsStats {
    total_invested: Decimal,
    market_value: Decimal,
    total_dividends: Decimal,
    value_plus_dividends: Decimal,
    unrealized_roi: Decimal,
    total_roi: Decimal,
}

pub fn holdings_stats(assets: &[Asset], dividends: &[Dividend]) -> HoldingsStats {
    let total_invested: Decimal = assets.iter().map(|asset| *asset.total_cost()).sum();
    let market_value: Decimal = assets
        .iter()
        .map(|asset| asset.units() * asset.current_price())
        .sum();
    let total_dividends: Decimal = dividends.iter().map(|dividend| *dividend.net()).sum();
    let value_plus_dividends = market_value + total_dividends;

    HoldingsStats::new(
        total_invested,
        market_value,
        total_dividends,
        value_plus_dividends,
        percent_of(market_value - total_invested, total_invested),
        percent_of(value_plus_dividends - total_invested, total_invested),
    )
}

/// Headline figures for the dividends view.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct DividendStats {
    total_net: Decimal,
    total_net_twd: Decimal,
    est_monthly: Decimal,
    yield_rate: Decimal,
}

pub fn dividend_stats(dividends: &[Dividend], assets: &[Asset]) -> DividendStats {
    let total_net: Decimal = dividends.iter().map(|dividend| *dividend.net()).sum();
    let total_net_twd: Decimal = dividends.iter().map(|dividend| *dividend.net_twd()).sum();
    let total_invested: Decimal = assets.iter().map(|asset| *asset.total_cost()).sum();

    // Flat six-month average, same estimate the household sheet used.
    let est_monthly = total_net / dec!(6);

    DividendStats::new(
        total_net,
        total_net_twd,
        est_monthly,
        percent_of(total_net, total_invested),
    )
}

/// Headline figures for the realized-history view. Realized ROI is the
/// total pnl against the cost basis actually consumed by the disposals.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct RealizedStats {
    total_pnl: Decimal,
    total_roi: Decimal,
}

pub fn realized_stats(realizations: &[Realization]) -> RealizedStats {
    let total_pnl: Decimal = realizations.iter().map(|item| *item.pnl()).sum();
    let disposed_cost: Decimal = realizations
        .iter()
        .map(|item| item.avg_buy_price() * item.units())
        .sum();

    RealizedStats::new(total_pnl, percent_of(total_pnl, disposed_cost))
}

/// Groups dividends by ticker for display, tickers in alphabetical order
/// and entries newest ex-date first within each group.
pub fn group_by_ticker(dividends: &[Dividend]) -> Vec<(String, Vec<Dividend>)> {
    let mut groups: BTreeMap<String, Vec<Dividend>> = BTreeMap::new();
    for dividend in dividends {
        groups
            .entry(dividend.ticker().clone())
            .or_default()
            .push(dividend.clone());
    }

    groups
        .into_iter()
        .map(|(ticker, mut entries)| {
            entries.sort_by(|a, b| b.ex_date().cmp(a.ex_date()));
            (ticker, entries)
        })
        .collect()
}

fn percent_of(part: Decimal, base: Decimal) -> Decimal {
    if base > Decimal::ZERO {
        part / base * dec!(100)
    } else {
        Decimal::ZERO
    }
}
