use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Owned;

/// A recorded distribution. Amounts are fixed at entry time from the
/// per-unit amount, unit count, withholding flag and the USD→TWD rate
/// observed that day; later lot mutations never touch them.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Dividend {
    id: i64,
    owner_id: String,
    ticker: String,
    ex_date: NaiveDate,
    pay_date: NaiveDate,
    per_unit: Decimal,
    units: Decimal,
    gross: Decimal,
    tax: Decimal,
    net: Decimal,
    net_twd: Decimal,
}

impl Owned for Dividend {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
