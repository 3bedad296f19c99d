use anyhow::{Context, Error, Result};
use csv::Reader;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::{Pool, Sqlite};

use crate::api::{moneydj, yahoo};
use crate::app::utils::{parse_date, parse_decimal};
use crate::db::{read, write};
use crate::ledger::{self, Command, LedgerSnapshot};
use crate::models::{Asset, AssetKind, DistributionFrequency, Owner, ScopeCtx};

/// Rate used when the FX source is unreachable.
pub const DEFAULT_USD_TWD_RATE: Decimal = dec!(32.5);

/// Front door of the ledger: loads snapshots from the store, runs commands
/// through the engine, and persists the resulting effects. One instance
/// per scope; independent writers race with last-writer-wins semantics at
/// the store.
pub struct LedgerService {
    connection: Pool<Sqlite>,
    client: Client,
    scope: ScopeCtx,
}

impl LedgerService {
    pub fn new(connection: Pool<Sqlite>, scope: ScopeCtx) -> Self {
        Self {
            connection,
            client: Client::new(),
            scope,
        }
    }

    pub async fn load(&self) -> Result<LedgerSnapshot> {
        read::load_snapshot(&self.connection, &self.scope).await
    }

    /// Applies one command against the freshest snapshot and persists its
    /// effects, then reloads so store-assigned ids are visible.
    pub async fn execute(&self, command: Command) -> Result<LedgerSnapshot> {
        let snapshot = self.load().await?;
        let applied = ledger::apply(&snapshot, command)?;
        write::apply_effects(&self.connection, &self.scope, &applied.effects).await?;
        self.load().await
    }

    /// Current USD→TWD rate, falling back to the fixed default when the
    /// source fails.
    pub async fn usd_twd_rate(&self) -> Decimal {
        match yahoo::get_usd_twd_rate(&self.client).await {
            Ok(rate) => rate,
            Err(err) => {
                eprintln!(
                    "Warning: Failed to fetch USD/TWD rate, using default {}: {}",
                    DEFAULT_USD_TWD_RATE, err
                );
                DEFAULT_USD_TWD_RATE
            }
        }
    }

    /// Refreshes every asset's last-known price. A failed lookup leaves
    /// that asset's stored price unchanged.
    pub async fn refresh_prices(&self) -> Result<LedgerSnapshot> {
        let mut snapshot = self.load().await?;
        let assets = snapshot.assets.clone();
        let mut effects = Vec::new();

        for asset in &assets {
            match self.fetch_price(asset).await {
                Ok(price) => {
                    let applied = ledger::apply(
                        &snapshot,
                        Command::UpdatePrice {
                            asset_id: *asset.id(),
                            price,
                        },
                    )?;
                    snapshot = applied.snapshot;
                    effects.extend(applied.effects);
                }
                Err(err) => {
                    eprintln!(
                        "Warning: Failed to update price for {}: {}",
                        asset.ticker(),
                        err
                    );
                }
            }
        }

        write::apply_effects(&self.connection, &self.scope, &effects).await?;

        Ok(snapshot)
    }

    async fn fetch_price(&self, asset: &Asset) -> Result<Decimal> {
        match asset.data_url() {
            Some(url) => moneydj::get_fund_nav(url, &self.client).await,
            None => yahoo::get_latest_price(asset.ticker(), &self.client).await,
        }
    }

    /// Imports purchase lots from a CSV file with columns
    /// `date,ticker,units,price[,kind,frequency,rate,owner]`. Rows with an
    /// unknown kind or frequency are skipped with a warning.
    pub async fn import_lots(&self, path: &str, default_owner: &str) -> Result<usize> {
        let path = shellexpand::tilde(path).to_string();
        let mut reader = Reader::from_path(&path)
            .with_context(|| format!("Failed to open CSV file at path: {}", path))?;

        let mut imported = 0;
        for (row_idx, record) in reader.records().enumerate() {
            let rec = record
                .with_context(|| format!("Failed to read CSV record at row {}", row_idx + 1))?;

            if rec.len() < 4 {
                return Err(Error::msg(format!(
                    "Invalid CSV format at row {}: expected at least 4 columns, found {}",
                    row_idx + 1,
                    rec.len()
                )));
            }

            let date = parse_date(&rec[0])
                .with_context(|| format!("Failed to parse date at row {}", row_idx + 1))?;
            let ticker = rec[1].to_string();
            let units = parse_decimal(&rec[2], "units")
                .with_context(|| format!("Failed at row {}", row_idx + 1))?;
            let price = parse_decimal(&rec[3], "price")
                .with_context(|| format!("Failed at row {}", row_idx + 1))?;

            let kind = match rec.get(4).filter(|field| !field.is_empty()) {
                Some(field) => match AssetKind::parse_str(field) {
                    Ok(kind) => kind,
                    Err(_) => {
                        eprintln!(
                            "Warning: Skipping unknown asset kind '{}' at row {}",
                            field,
                            row_idx + 1
                        );
                        continue;
                    }
                },
                None => AssetKind::Stock,
            };

            let frequency = match rec.get(5).filter(|field| !field.is_empty()) {
                Some(field) => match DistributionFrequency::parse_str(field) {
                    Ok(frequency) => frequency,
                    Err(_) => {
                        eprintln!(
                            "Warning: Skipping unknown distribution frequency '{}' at row {}",
                            field,
                            row_idx + 1
                        );
                        continue;
                    }
                },
                None => DistributionFrequency::Unscheduled,
            };

            let rate_note = rec.get(6).unwrap_or("").to_string();
            let owner_id = match rec.get(7).filter(|field| !field.is_empty()) {
                Some(field) => field.to_string(),
                None => default_owner.to_string(),
            };

            self.execute(Command::AddLot {
                owner_id,
                ticker,
                kind,
                frequency,
                currency: String::from("USD"),
                data_url: None,
                date,
                price,
                units,
                rate_note,
            })
            .await?;

            imported += 1;
        }

        Ok(imported)
    }

    /// Writes the current snapshot to a JSON file, the same shape the
    /// snapshot has in memory.
    pub async fn export_snapshot(&self, path: &str) -> Result<()> {
        let snapshot = self.load().await?;
        let path = shellexpand::tilde(path).to_string();
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path))?;

        Ok(())
    }

    pub async fn add_owner(&self, id: &str, name: &str) -> Result<()> {
        write::insert_owner(&Owner::new(id.to_string(), name.to_string()), &self.connection).await
    }

    pub async fn owners(&self) -> Result<Vec<Owner>> {
        read::list_owners(&self.connection).await
    }
}
