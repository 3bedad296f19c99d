use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use crate::models::Lot;

/// Derived aggregate of a lot collection.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct LotTotals {
    units: Decimal,
    total_cost: Decimal,
    avg_cost: Decimal,
}

/// Recomputes an asset's aggregate fields from its full lot collection.
/// Runs after every structural lot change; summing from scratch instead of
/// adjusting the previous totals keeps rounding drift out of the aggregate.
pub fn recompute(lots: &[Lot]) -> LotTotals {
    let units: Decimal = lots.iter().map(|lot| *lot.units()).sum();
    let total_cost: Decimal = lots.iter().map(|lot| lot.units() * lot.price()).sum();
    let avg_cost = if units.is_zero() {
        Decimal::ZERO
    } else {
        total_cost / units
    };

    LotTotals::new(units, total_cost, avg_cost)
}
