use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Pool, Sqlite};

use crate::ledger::Effect;
use crate::models::{Asset, Dividend, Owner, Realization, ScopeCtx};

/// Persists one command's effects in a single transaction. Writes are
/// whole-entity: an asset upsert rewrites its lot rows wholesale, so a
/// stale aggregate can never be patched in field by field.
pub async fn apply_effects(
    connection: &Pool<Sqlite>,
    scope: &ScopeCtx,
    effects: &[Effect],
) -> Result<()> {
    let mut tx = connection.begin().await?;

    for effect in effects {
        match effect {
            Effect::UpsertAsset(asset) => {
                upsert_asset(asset, scope, &mut tx).await?;
            }
            Effect::DeleteAsset(id) => delete_asset(*id, &mut tx).await?,
            Effect::UpsertDividend(dividend) => {
                upsert_dividend(dividend, scope, &mut tx).await?;
            }
            Effect::DeleteDividend(id) => {
                sqlx::query("DELETE FROM dividends WHERE id = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            Effect::InsertRealization(item) => {
                insert_realization(item, scope, &mut tx).await?;
            }
            Effect::DeleteRealization(id) => {
                sqlx::query("DELETE FROM realizations WHERE id = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
        }
    }

    tx.commit().await?;

    Ok(())
}

pub async fn upsert_asset(
    asset: &Asset,
    scope: &ScopeCtx,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<i64> {
    let asset_id = if *asset.id() == 0 {
        sqlx::query(
            r#"
            INSERT INTO assets
            (owner_id, scope, identity, ticker, name, kind, frequency, currency, data_url,
             units, total_cost, avg_cost, current_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(asset.owner_id())
        .bind(scope.scope().to_str())
        .bind(scope.identity())
        .bind(asset.ticker())
        .bind(asset.name())
        .bind(asset.kind().to_str())
        .bind(asset.frequency().to_str())
        .bind(asset.currency())
        .bind(asset.data_url())
        .bind(asset.units().round_dp(4).to_f64())
        .bind(asset.total_cost().round_dp(4).to_f64())
        .bind(asset.avg_cost().round_dp(4).to_f64())
        .bind(asset.current_price().round_dp(4).to_f64())
        .execute(&mut **tx)
        .await?
        .last_insert_rowid()
    } else {
        sqlx::query(
            r#"
            UPDATE assets
            SET ticker = ?, name = ?, kind = ?, frequency = ?, currency = ?, data_url = ?,
                units = ?, total_cost = ?, avg_cost = ?, current_price = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(asset.ticker())
        .bind(asset.name())
        .bind(asset.kind().to_str())
        .bind(asset.frequency().to_str())
        .bind(asset.currency())
        .bind(asset.data_url())
        .bind(asset.units().round_dp(4).to_f64())
        .bind(asset.total_cost().round_dp(4).to_f64())
        .bind(asset.avg_cost().round_dp(4).to_f64())
        .bind(asset.current_price().round_dp(4).to_f64())
        .bind(asset.id())
        .execute(&mut **tx)
        .await?;

        *asset.id()
    };

    sqlx::query("DELETE FROM lots WHERE asset_id = ?")
        .bind(asset_id)
        .execute(&mut **tx)
        .await?;

    for lot in asset.lots() {
        sqlx::query(
            r#"
            INSERT INTO lots (asset_id, lot_date, price, units, rate_note)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(asset_id)
        .bind(lot.date().format("%Y-%m-%d").to_string())
        .bind(lot.price().round_dp(4).to_f64())
        .bind(lot.units().round_dp(4).to_f64())
        .bind(lot.rate_note())
        .execute(&mut **tx)
        .await?;
    }

    Ok(asset_id)
}

pub async fn delete_asset(asset_id: i64, tx: &mut sqlx::Transaction<'_, Sqlite>) -> Result<()> {
    sqlx::query("DELETE FROM lots WHERE asset_id = ?")
        .bind(asset_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM assets WHERE id = ?")
        .bind(asset_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn upsert_dividend(
    dividend: &Dividend,
    scope: &ScopeCtx,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<i64> {
    let id = if *dividend.id() == 0 {
        sqlx::query(
            r#"
            INSERT INTO dividends
            (owner_id, scope, identity, ticker, ex_date, pay_date, per_unit, units,
             gross, tax, net, net_twd)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dividend.owner_id())
        .bind(scope.scope().to_str())
        .bind(scope.identity())
        .bind(dividend.ticker())
        .bind(dividend.ex_date().format("%Y-%m-%d").to_string())
        .bind(dividend.pay_date().format("%Y-%m-%d").to_string())
        .bind(dividend.per_unit().round_dp(4).to_f64())
        .bind(dividend.units().round_dp(4).to_f64())
        .bind(dividend.gross().round_dp(4).to_f64())
        .bind(dividend.tax().round_dp(4).to_f64())
        .bind(dividend.net().round_dp(4).to_f64())
        .bind(dividend.net_twd().round_dp(4).to_f64())
        .execute(&mut **tx)
        .await?
        .last_insert_rowid()
    } else {
        sqlx::query(
            r#"
            UPDATE dividends
            SET ticker = ?, ex_date = ?, pay_date = ?, per_unit = ?, units = ?,
                gross = ?, tax = ?, net = ?, net_twd = ?
            WHERE id = ?
            "#,
        )
        .bind(dividend.ticker())
        .bind(dividend.ex_date().format("%Y-%m-%d").to_string())
        .bind(dividend.pay_date().format("%Y-%m-%d").to_string())
        .bind(dividend.per_unit().round_dp(4).to_f64())
        .bind(dividend.units().round_dp(4).to_f64())
        .bind(dividend.gross().round_dp(4).to_f64())
        .bind(dividend.tax().round_dp(4).to_f64())
        .bind(dividend.net().round_dp(4).to_f64())
        .bind(dividend.net_twd().round_dp(4).to_f64())
        .bind(dividend.id())
        .execute(&mut **tx)
        .await?;

        *dividend.id()
    };

    Ok(id)
}

pub async fn insert_realization(
    item: &Realization,
    scope: &ScopeCtx,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO realizations
        (owner_id, scope, identity, ticker, name, sell_date, sell_price, avg_buy_price,
         units, pnl, pnl_percent, currency)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.owner_id())
    .bind(scope.scope().to_str())
    .bind(scope.identity())
    .bind(item.ticker())
    .bind(item.name())
    .bind(item.sell_date().format("%Y-%m-%d").to_string())
    .bind(item.sell_price().round_dp(4).to_f64())
    .bind(item.avg_buy_price().round_dp(4).to_f64())
    .bind(item.units().round_dp(4).to_f64())
    .bind(item.pnl().round_dp(4).to_f64())
    .bind(item.pnl_percent().round_dp(4).to_f64())
    .bind(item.currency())
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn insert_owner(owner: &Owner, connection: &Pool<Sqlite>) -> Result<()> {
    sqlx::query("INSERT OR REPLACE INTO owners (id, name) VALUES (?, ?)")
        .bind(owner.id())
        .bind(owner.name())
        .execute(connection)
        .await?;

    Ok(())
}
