use anyhow::Result;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use super::{Lot, Owned};
use crate::engine::aggregate::LotTotals;

/// A held instrument together with its purchase lots and the derived
/// aggregate fields. The derived fields (units, total cost, average cost)
/// are never maintained incrementally; after any lot mutation the command
/// handler recomputes them from the full lot collection and stores them
/// back through `apply_totals`.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct Asset {
    id: i64,
    owner_id: String,
    ticker: String,
    name: Option<String>,
    kind: AssetKind,
    frequency: DistributionFrequency,
    currency: String,
    data_url: Option<String>,
    lots: Vec<Lot>,
    units: Decimal,
    total_cost: Decimal,
    avg_cost: Decimal,
    current_price: Decimal,
}

impl Asset {
    pub fn push_lot(&mut self, lot: Lot) {
        self.lots.push(lot);
    }

    pub fn replace_lots(&mut self, lots: Vec<Lot>) {
        self.lots = lots;
    }

    pub fn remove_lot(&mut self, lot_id: i64) -> bool {
        let before = self.lots.len();
        self.lots.retain(|lot| *lot.id() != lot_id);
        self.lots.len() < before
    }

    pub fn lot_mut(&mut self, lot_id: i64) -> Option<&mut Lot> {
        self.lots.iter_mut().find(|lot| *lot.id() == lot_id)
    }

    pub fn apply_totals(&mut self, totals: &LotTotals) {
        self.units = *totals.units();
        self.total_cost = *totals.total_cost();
        self.avg_cost = *totals.avg_cost();
    }

    pub fn set_meta(
        &mut self,
        ticker: String,
        kind: AssetKind,
        frequency: DistributionFrequency,
        data_url: Option<String>,
    ) {
        self.ticker = ticker;
        self.kind = kind;
        self.frequency = frequency;
        self.data_url = data_url;
    }

    pub fn set_current_price(&mut self, price: Decimal) {
        self.current_price = price;
    }
}

impl Owned for Asset {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

#[derive(Clone, Copy, Debug, Deserialize, EnumIter, Eq, PartialEq, Serialize)]
pub enum AssetKind {
    Stock,
    Etf,
    Fund,
}

impl AssetKind {
    pub fn parse_str(s: &str) -> Result<AssetKind> {
        match s {
            "Stock" => Ok(AssetKind::Stock),
            "ETF" => Ok(AssetKind::Etf),
            "Fund" => Ok(AssetKind::Fund),
            _ => Err(anyhow::anyhow!("Unknown asset kind '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            AssetKind::Stock => "Stock",
            AssetKind::Etf => "ETF",
            AssetKind::Fund => "Fund",
        }
    }
}

/// How often an instrument distributes, as classified at entry time. Purely
/// informational; the dividend ledger records whatever actually arrived.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, Eq, PartialEq, Serialize)]
pub enum DistributionFrequency {
    Weekly,
    Monthly,
    Quarterly,
    Unscheduled,
}

impl DistributionFrequency {
    pub fn parse_str(s: &str) -> Result<DistributionFrequency> {
        match s {
            "Weekly" => Ok(DistributionFrequency::Weekly),
            "Monthly" => Ok(DistributionFrequency::Monthly),
            "Quarterly" => Ok(DistributionFrequency::Quarterly),
            "Unscheduled" => Ok(DistributionFrequency::Unscheduled),
            _ => Err(anyhow::anyhow!("Unknown distribution frequency '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            DistributionFrequency::Weekly => "Weekly",
            DistributionFrequency::Monthly => "Monthly",
            DistributionFrequency::Quarterly => "Quarterly",
            DistributionFrequency::Unscheduled => "Unscheduled",
        }
    }
}
