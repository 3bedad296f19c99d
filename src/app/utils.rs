use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn parse_date(field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date '{}'", field))
}

pub fn parse_decimal(field: &str, field_name: &str) -> Result<Decimal> {
    field
        .parse::<Decimal>()
        .with_context(|| format!("Failed to parse {} '{}'", field_name, field))
}
