use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single purchase of an instrument. Each lot keeps its own price and
/// quantity; disposals consume lots oldest-first. The rate note is a
/// free-form annotation of the exchange rate at purchase time and never
/// enters any computation.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Lot {
    id: i64,
    date: NaiveDate,
    price: Decimal,
    units: Decimal,
    rate_note: String,
}

impl Lot {
    pub fn set_units(&mut self, units: Decimal) {
        self.units = units;
    }

    pub fn update(&mut self, date: NaiveDate, price: Decimal, units: Decimal, rate_note: String) {
        self.date = date;
        self.price = price;
        self.units = units;
        self.rate_note = rate_note;
    }
}
