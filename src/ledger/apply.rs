use rust_decimal::Decimal;

use crate::engine::{aggregate, disposal, dividend};
use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::{Command, LedgerSnapshot};
use crate::models::{Asset, Dividend, Lot, Realization};

/// A whole-entity write for the store. Entities carrying id 0 are new and
/// get their id assigned on insert.
#[derive(Clone, Debug)]
pub enum Effect {
    UpsertAsset(Asset),
    DeleteAsset(i64),
    UpsertDividend(Dividend),
    DeleteDividend(i64),
    InsertRealization(Realization),
    DeleteRealization(i64),
}

/// The result of one command: the next snapshot plus the store effects
/// that make it durable.
#[derive(Clone, Debug)]
pub struct Applied {
    pub snapshot: LedgerSnapshot,
    pub effects: Vec<Effect>,
}

/// Executes one command against a snapshot. Either the whole command
/// applies and the new snapshot comes back with its store effects, or a
/// `LedgerError` comes back and the ledger is untouched. Aggregation
/// re-runs as the final step of every lot-set change, so derived asset
/// fields are never observed stale.
pub fn apply(snapshot: &LedgerSnapshot, command: Command) -> LedgerResult<Applied> {
    let mut next = snapshot.clone();
    let mut effects = Vec::new();

    match command {
        Command::AddLot {
            owner_id,
            ticker,
            kind,
            frequency,
            currency,
            data_url,
            date,
            price,
            units,
            rate_note,
        } => {
            validate_lot(units, price)?;
            let ticker = ticker.to_uppercase();
            let lot = Lot::new(0, date, price, units, rate_note);

            match next.asset_index_by_ticker(&owner_id, &ticker) {
                Some(index) => {
                    let asset = &mut next.assets[index];
                    asset.push_lot(lot);
                    refresh_totals(asset);
                    effects.push(Effect::UpsertAsset(asset.clone()));
                }
                None => {
                    let mut asset = Asset::new(
                        0,
                        owner_id,
                        ticker,
                        None,
                        kind,
                        frequency,
                        currency,
                        data_url,
                        vec![lot],
                        Decimal::ZERO,
                        Decimal::ZERO,
                        Decimal::ZERO,
                        price,
                    );
                    refresh_totals(&mut asset);
                    effects.push(Effect::UpsertAsset(asset.clone()));
                    next.assets.push(asset);
                }
            }
        }

        Command::EditLot {
            asset_id,
            lot_id,
            date,
            price,
            units,
            rate_note,
        } => {
            validate_lot(units, price)?;
            let index = next.asset_index(asset_id).ok_or(LedgerError::NotFound {
                kind: "asset",
                id: asset_id,
            })?;
            let asset = &mut next.assets[index];
            let lot = asset.lot_mut(lot_id).ok_or(LedgerError::NotFound {
                kind: "lot",
                id: lot_id,
            })?;
            lot.update(date, price, units, rate_note);
            refresh_totals(asset);
            effects.push(Effect::UpsertAsset(asset.clone()));
        }

        Command::DeleteLot { asset_id, lot_id } => {
            let index = next.asset_index(asset_id).ok_or(LedgerError::NotFound {
                kind: "asset",
                id: asset_id,
            })?;
            let asset = &mut next.assets[index];
            if !asset.remove_lot(lot_id) {
                return Err(LedgerError::NotFound {
                    kind: "lot",
                    id: lot_id,
                });
            }
            // A correction, not a sale: the asset stays even when its last
            // lot goes, with totals recomputed to zero.
            refresh_totals(asset);
            effects.push(Effect::UpsertAsset(asset.clone()));
        }

        Command::EditAssetMeta {
            asset_id,
            ticker,
            kind,
            frequency,
            data_url,
        } => {
            let index = next.asset_index(asset_id).ok_or(LedgerError::NotFound {
                kind: "asset",
                id: asset_id,
            })?;
            let asset = &mut next.assets[index];
            asset.set_meta(ticker.to_uppercase(), kind, frequency, data_url);
            effects.push(Effect::UpsertAsset(asset.clone()));
        }

        Command::UpdatePrice { asset_id, price } => {
            let index = next.asset_index(asset_id).ok_or(LedgerError::NotFound {
                kind: "asset",
                id: asset_id,
            })?;
            let asset = &mut next.assets[index];
            asset.set_current_price(price);
            effects.push(Effect::UpsertAsset(asset.clone()));
        }

        Command::Dispose {
            asset_id,
            units,
            price,
            date,
        } => {
            if units <= Decimal::ZERO {
                return Err(LedgerError::InvalidInput(String::from(
                    "disposal units must be positive",
                )));
            }
            let index = next.asset_index(asset_id).ok_or(LedgerError::NotFound {
                kind: "asset",
                id: asset_id,
            })?;

            let outcome = disposal::dispose_lots(next.assets[index].lots(), units, price)?;

            let realization = {
                let asset = &next.assets[index];
                Realization::new(
                    0,
                    asset.owner_id().clone(),
                    asset.ticker().clone(),
                    asset.name().clone(),
                    date,
                    price,
                    *outcome.avg_buy_price(),
                    units,
                    *outcome.pnl(),
                    *outcome.pnl_percent(),
                    asset.currency().clone(),
                )
            };
            effects.push(Effect::InsertRealization(realization.clone()));
            next.realizations.push(realization);

            if outcome.remaining_lots().is_empty() {
                next.assets.remove(index);
                effects.push(Effect::DeleteAsset(asset_id));
            } else {
                let asset = &mut next.assets[index];
                asset.replace_lots(outcome.remaining_lots().clone());
                refresh_totals(asset);
                effects.push(Effect::UpsertAsset(asset.clone()));
            }
        }

        Command::RecordDividend {
            owner_id,
            ticker,
            ex_date,
            per_unit,
            units,
            taxable,
            usd_twd_rate,
        } => {
            let amounts = dividend::dividend_amounts(per_unit, units, taxable, usd_twd_rate);
            let entry = Dividend::new(
                0,
                owner_id,
                ticker.to_uppercase(),
                ex_date,
                ex_date,
                per_unit,
                units,
                *amounts.gross(),
                *amounts.tax(),
                *amounts.net(),
                *amounts.net_twd(),
            );
            effects.push(Effect::UpsertDividend(entry.clone()));
            next.dividends.push(entry);
        }

        Command::EditDividend {
            dividend_id,
            ticker,
            ex_date,
            per_unit,
            units,
            taxable,
            usd_twd_rate,
        } => {
            let index = next.dividend_index(dividend_id).ok_or(LedgerError::NotFound {
                kind: "dividend",
                id: dividend_id,
            })?;
            let amounts = dividend::dividend_amounts(per_unit, units, taxable, usd_twd_rate);
            let entry = Dividend::new(
                dividend_id,
                next.dividends[index].owner_id().clone(),
                ticker.to_uppercase(),
                ex_date,
                ex_date,
                per_unit,
                units,
                *amounts.gross(),
                *amounts.tax(),
                *amounts.net(),
                *amounts.net_twd(),
            );
            next.dividends[index] = entry.clone();
            effects.push(Effect::UpsertDividend(entry));
        }

        Command::DeleteAsset { asset_id } => {
            let index = next.asset_index(asset_id).ok_or(LedgerError::NotFound {
                kind: "asset",
                id: asset_id,
            })?;
            next.assets.remove(index);
            effects.push(Effect::DeleteAsset(asset_id));
        }

        Command::DeleteDividend { dividend_id } => {
            let index = next.dividend_index(dividend_id).ok_or(LedgerError::NotFound {
                kind: "dividend",
                id: dividend_id,
            })?;
            next.dividends.remove(index);
            effects.push(Effect::DeleteDividend(dividend_id));
        }

        Command::DeleteRealization { realization_id } => {
            let index = next
                .realization_index(realization_id)
                .ok_or(LedgerError::NotFound {
                    kind: "realization",
                    id: realization_id,
                })?;
            next.realizations.remove(index);
            effects.push(Effect::DeleteRealization(realization_id));
        }
    }

    Ok(Applied {
        snapshot: next,
        effects,
    })
}

fn refresh_totals(asset: &mut Asset) {
    let totals = aggregate::recompute(asset.lots());
    asset.apply_totals(&totals);
}

fn validate_lot(units: Decimal, price: Decimal) -> LedgerResult<()> {
    if units <= Decimal::ZERO {
        return Err(LedgerError::InvalidInput(String::from(
            "lot units must be positive",
        )));
    }
    if price < Decimal::ZERO {
        return Err(LedgerError::InvalidInput(String::from(
            "lot price cannot be negative",
        )));
    }
    Ok(())
}
