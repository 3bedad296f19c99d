use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::{
    Asset, AssetKind, DistributionFrequency, Dividend, Lot, Owner, Realization,
};

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64> {
    row.try_get::<i64, _>(column)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_opt_string_from_row(row: &SqliteRow, column: &str) -> Result<Option<String>> {
    row.try_get::<Option<String>, _>(column)
        .with_context(|| format!("Failed to parse optional String from column '{}'", column))
}

pub fn parse_f64_from_row(row: &SqliteRow, column: &str) -> Result<f64> {
    let value: f64 = row
        .try_get(column)
        .with_context(|| format!("Failed to parse f64 from column '{}'", column))?;
    Ok(value)
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let value = parse_f64_from_row(row, column)?;
    Decimal::from_f64(value)
        .with_context(|| format!("Failed to convert f64 to Decimal for column '{}'", column))
}

pub fn parse_date_from_row(row: &SqliteRow, column: &str) -> Result<NaiveDate> {
    let date_str = parse_string_from_row(row, column)?;
    NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date from column '{}'", column))
}

pub fn parse_owner(row: &SqliteRow) -> Result<Owner> {
    Ok(Owner::new(
        parse_string_from_row(row, "id")?,
        parse_string_from_row(row, "name")?,
    ))
}

pub fn parse_lot(row: &SqliteRow) -> Result<Lot> {
    Ok(Lot::new(
        parse_i64_from_row(row, "id")?,
        parse_date_from_row(row, "lot_date")?,
        parse_decimal_from_row(row, "price")?,
        parse_decimal_from_row(row, "units")?,
        parse_string_from_row(row, "rate_note")?,
    ))
}

/// Maps an asset row without its lots; the read path attaches those from
/// the lots table afterwards.
pub fn parse_asset(row: &SqliteRow) -> Result<Asset> {
    let kind_str = parse_string_from_row(row, "kind")?;
    let frequency_str = parse_string_from_row(row, "frequency")?;

    Ok(Asset::new(
        parse_i64_from_row(row, "id")?,
        parse_string_from_row(row, "owner_id")?,
        parse_string_from_row(row, "ticker")?,
        parse_opt_string_from_row(row, "name")?,
        AssetKind::parse_str(&kind_str)
            .with_context(|| "Failed to parse AssetKind from column 'kind'")?,
        DistributionFrequency::parse_str(&frequency_str)
            .with_context(|| "Failed to parse DistributionFrequency from column 'frequency'")?,
        parse_string_from_row(row, "currency")?,
        parse_opt_string_from_row(row, "data_url")?,
        Vec::new(),
        parse_decimal_from_row(row, "units")?,
        parse_decimal_from_row(row, "total_cost")?,
        parse_decimal_from_row(row, "avg_cost")?,
        parse_decimal_from_row(row, "current_price")?,
    ))
}

pub fn parse_dividend(row: &SqliteRow) -> Result<Dividend> {
    Ok(Dividend::new(
        parse_i64_from_row(row, "id")?,
        parse_string_from_row(row, "owner_id")?,
        parse_string_from_row(row, "ticker")?,
        parse_date_from_row(row, "ex_date")?,
        parse_date_from_row(row, "pay_date")?,
        parse_decimal_from_row(row, "per_unit")?,
        parse_decimal_from_row(row, "units")?,
        parse_decimal_from_row(row, "gross")?,
        parse_decimal_from_row(row, "tax")?,
        parse_decimal_from_row(row, "net")?,
        parse_decimal_from_row(row, "net_twd")?,
    ))
}

pub fn parse_realization(row: &SqliteRow) -> Result<Realization> {
    Ok(Realization::new(
        parse_i64_from_row(row, "id")?,
        parse_string_from_row(row, "owner_id")?,
        parse_string_from_row(row, "ticker")?,
        parse_opt_string_from_row(row, "name")?,
        parse_date_from_row(row, "sell_date")?,
        parse_decimal_from_row(row, "sell_price")?,
        parse_decimal_from_row(row, "avg_buy_price")?,
        parse_decimal_from_row(row, "units")?,
        parse_decimal_from_row(row, "pnl")?,
        parse_decimal_from_row(row, "pnl_percent")?,
        parse_string_from_row(row, "currency")?,
    ))
}
