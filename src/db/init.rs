use sqlx::sqlite::SqliteQueryResult;

pub async fn create_owners(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS owners (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_assets(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            scope TEXT NOT NULL,
            identity TEXT NOT NULL,
            ticker TEXT NOT NULL,
            name TEXT,
            kind TEXT NOT NULL,
            frequency TEXT NOT NULL,
            currency TEXT NOT NULL,
            data_url TEXT,
            units REAL NOT NULL,
            total_cost REAL NOT NULL,
            avg_cost REAL NOT NULL,
            current_price REAL NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_lots(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            asset_id INTEGER NOT NULL REFERENCES assets(id),
            lot_date TEXT NOT NULL,
            price REAL NOT NULL,
            units REAL NOT NULL,
            rate_note TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_dividends(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dividends (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            scope TEXT NOT NULL,
            identity TEXT NOT NULL,
            ticker TEXT NOT NULL,
            ex_date TEXT NOT NULL,
            pay_date TEXT NOT NULL,
            per_unit REAL NOT NULL,
            units REAL NOT NULL,
            gross REAL NOT NULL,
            tax REAL NOT NULL,
            net REAL NOT NULL,
            net_twd REAL NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_realizations(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS realizations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            scope TEXT NOT NULL,
            identity TEXT NOT NULL,
            ticker TEXT NOT NULL,
            name TEXT,
            sell_date TEXT NOT NULL,
            sell_price REAL NOT NULL,
            avg_buy_price REAL NOT NULL,
            units REAL NOT NULL,
            pnl REAL NOT NULL,
            pnl_percent REAL NOT NULL,
            currency TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_tables(connection: &sqlx::Pool<sqlx::Sqlite>) -> Result<(), sqlx::Error> {
    create_owners(connection).await?;
    create_assets(connection).await?;
    create_lots(connection).await?;
    create_dividends(connection).await?;
    create_realizations(connection).await?;
    Ok(())
}
