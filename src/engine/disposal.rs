use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::{LedgerError, LedgerResult};
use crate::models::Lot;

/// Outcome of matching a sell request against a lot collection.
#[derive(Clone, Debug, Getters, new)]
pub struct Disposal {
    consumed_cost: Decimal,
    remaining_lots: Vec<Lot>,
    pnl: Decimal,
    pnl_percent: Decimal,
    avg_buy_price: Decimal,
}

/// Consumes lots oldest-first to satisfy `requested_units`.
///
/// Lots are sorted ascending by acquisition date (stable, so same-day lots
/// keep their entry order). A lot that fits entirely within the remaining
/// request is consumed whole and dropped; a partially consumed lot survives
/// with its units reduced; lots past the request pass through unchanged.
/// Requesting more than the collection holds fails without touching
/// anything; requesting exactly the held total is a full liquidation and
/// leaves no survivors.
pub fn dispose_lots(
    lots: &[Lot],
    requested_units: Decimal,
    sell_price: Decimal,
) -> LedgerResult<Disposal> {
    let held: Decimal = lots.iter().map(|lot| *lot.units()).sum();
    if requested_units > held {
        return Err(LedgerError::InsufficientUnits {
            requested: requested_units,
            held,
        });
    }

    let mut sorted = lots.to_vec();
    sorted.sort_by_key(|lot| *lot.date());

    let mut to_satisfy = requested_units;
    let mut consumed_cost = Decimal::ZERO;
    let mut remaining_lots = Vec::new();

    for lot in sorted {
        if to_satisfy.is_zero() {
            remaining_lots.push(lot);
            continue;
        }

        if *lot.units() <= to_satisfy {
            consumed_cost += lot.units() * lot.price();
            to_satisfy -= *lot.units();
        } else {
            consumed_cost += to_satisfy * lot.price();
            let mut kept = lot.clone();
            kept.set_units(lot.units() - to_satisfy);
            remaining_lots.push(kept);
            to_satisfy = Decimal::ZERO;
        }
    }

    let pnl = requested_units * sell_price - consumed_cost;
    let pnl_percent = if consumed_cost > Decimal::ZERO {
        pnl / consumed_cost * dec!(100)
    } else {
        Decimal::ZERO
    };
    let avg_buy_price = if requested_units > Decimal::ZERO {
        consumed_cost / requested_units
    } else {
        Decimal::ZERO
    };

    Ok(Disposal::new(
        consumed_cost,
        remaining_lots,
        pnl,
        pnl_percent,
        avg_buy_price,
    ))
}
