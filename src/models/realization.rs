use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Owned;

/// The outcome of one disposal, written exactly once when the sale
/// executes. `avg_buy_price` is the weighted cost basis per disposed unit,
/// covering only the quantity sold. Deleting a realization is a pure
/// removal of the history row; it does not restock the asset's lots.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Realization {
    id: i64,
    owner_id: String,
    ticker: String,
    name: Option<String>,
    sell_date: NaiveDate,
    sell_price: Decimal,
    avg_buy_price: Decimal,
    units: Decimal,
    pnl: Decimal,
    pnl_percent: Decimal,
    currency: String,
}

impl Owned for Realization {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
