use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::db::utils::{parse_asset, parse_dividend, parse_lot, parse_owner, parse_realization};
use crate::ledger::LedgerSnapshot;
use crate::models::{Owner, ScopeCtx};

/// Loads the full ledger snapshot visible in one scope. Shared rows are
/// visible to every identity; private rows only to the identity that wrote
/// them.
pub async fn load_snapshot(
    connection: &Pool<Sqlite>,
    scope: &ScopeCtx,
) -> Result<LedgerSnapshot> {
    let asset_rows = sqlx::query(
        r#"
        SELECT * FROM assets
        WHERE scope = ?1 AND (?1 = 'shared' OR identity = ?2)
        ORDER BY id
        "#,
    )
    .bind(scope.scope().to_str())
    .bind(scope.identity())
    .fetch_all(connection)
    .await?;

    let mut assets = Vec::with_capacity(asset_rows.len());
    for row in &asset_rows {
        let mut asset = parse_asset(row)?;

        let lot_rows = sqlx::query(
            r#"
            SELECT * FROM lots
            WHERE asset_id = ?
            ORDER BY lot_date, id
            "#,
        )
        .bind(asset.id())
        .fetch_all(connection)
        .await?;

        let mut lots = Vec::with_capacity(lot_rows.len());
        for lot_row in &lot_rows {
            lots.push(parse_lot(lot_row)?);
        }
        asset.replace_lots(lots);
        assets.push(asset);
    }

    let dividend_rows = sqlx::query(
        r#"
        SELECT * FROM dividends
        WHERE scope = ?1 AND (?1 = 'shared' OR identity = ?2)
        ORDER BY ex_date DESC, id DESC
        "#,
    )
    .bind(scope.scope().to_str())
    .bind(scope.identity())
    .fetch_all(connection)
    .await?;

    let mut dividends = Vec::with_capacity(dividend_rows.len());
    for row in &dividend_rows {
        dividends.push(parse_dividend(row)?);
    }

    let realization_rows = sqlx::query(
        r#"
        SELECT * FROM realizations
        WHERE scope = ?1 AND (?1 = 'shared' OR identity = ?2)
        ORDER BY sell_date DESC, id DESC
        "#,
    )
    .bind(scope.scope().to_str())
    .bind(scope.identity())
    .fetch_all(connection)
    .await?;

    let mut realizations = Vec::with_capacity(realization_rows.len());
    for row in &realization_rows {
        realizations.push(parse_realization(row)?);
    }

    Ok(LedgerSnapshot {
        assets,
        dividends,
        realizations,
    })
}

pub async fn list_owners(connection: &Pool<Sqlite>) -> Result<Vec<Owner>> {
    let rows = sqlx::query("SELECT * FROM owners ORDER BY id")
        .fetch_all(connection)
        .await?;

    let mut owners = Vec::with_capacity(rows.len());
    for row in &rows {
        owners.push(parse_owner(row)?);
    }
    Ok(owners)
}
