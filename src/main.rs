use std::env;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use strum::IntoEnumIterator;

use portfolio_ledger::app::{
    LedgerService,
    utils::{parse_date, parse_decimal},
};
use portfolio_ledger::db::init;
use portfolio_ledger::engine::{metrics, owner_filter};
use portfolio_ledger::ledger::{Command, LedgerSnapshot};
use portfolio_ledger::models::{AssetKind, DistributionFrequency, Scope, ScopeCtx};

#[derive(Parser)]
#[command(
    name = "portfolio-ledger",
    about = "Household investment ledger with FIFO lot accounting"
)]
struct Cli {
    /// SQLite database file (falls back to LEDGER_DB, then portfolio.db)
    #[arg(long)]
    db: Option<String>,

    /// Visibility scope: shared or private
    #[arg(long, default_value = "shared")]
    scope: String,

    /// Identity owning private-scope rows (falls back to LEDGER_IDENTITY)
    #[arg(long)]
    identity: Option<String>,

    /// Restrict views to one owner id (default: all owners)
    #[arg(long)]
    owner: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Show holdings with their lots and portfolio statistics
    Assets,
    /// Record a purchase lot (creates the asset on first purchase)
    Add {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        units: String,
        #[arg(long, default_value = "Stock")]
        kind: String,
        #[arg(long, default_value = "Unscheduled")]
        frequency: String,
        #[arg(long, default_value = "USD")]
        currency: String,
        /// NAV page url for fund instruments
        #[arg(long)]
        data_url: Option<String>,
        /// Exchange-rate annotation, informational only
        #[arg(long, default_value = "")]
        rate: String,
    },
    /// Edit a purchase lot
    EditLot {
        #[arg(long)]
        asset: i64,
        #[arg(long)]
        lot: i64,
        #[arg(long)]
        date: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        units: String,
        #[arg(long, default_value = "")]
        rate: String,
    },
    /// Delete a purchase lot (a correction; the asset is kept)
    DeleteLot {
        #[arg(long)]
        asset: i64,
        #[arg(long)]
        lot: i64,
    },
    /// Edit an asset's ticker, kind, frequency or NAV url
    EditAsset {
        #[arg(long)]
        asset: i64,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        frequency: String,
        #[arg(long)]
        data_url: Option<String>,
    },
    /// Delete an asset outright (no realization is written)
    DeleteAsset {
        #[arg(long)]
        asset: i64,
    },
    /// Sell units oldest-lot-first and record the realization
    Sell {
        #[arg(long)]
        asset: i64,
        #[arg(long)]
        units: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        date: String,
    },
    /// Dividend entries
    #[command(subcommand)]
    Dividend(DividendAction),
    /// Show realized history and its statistics
    History,
    /// Delete a history row (does not restock the asset)
    DeleteHistory {
        #[arg(long)]
        id: i64,
    },
    /// Refresh market prices and fund NAVs
    Prices,
    /// Import purchase lots from a CSV file
    Import {
        #[arg(long)]
        file: String,
        /// Owner for rows without an owner column
        #[arg(long)]
        owner: String,
    },
    /// Export the current snapshot as JSON
    Export {
        #[arg(long)]
        file: String,
    },
    /// Owner management
    #[command(subcommand)]
    Owner(OwnerAction),
}

#[derive(Subcommand)]
enum DividendAction {
    /// Record a distribution
    Add {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        ex_date: String,
        #[arg(long)]
        per_unit: String,
        /// Defaults to the owner's current holding of the ticker
        #[arg(long)]
        units: Option<String>,
        /// Skip the 30% withholding
        #[arg(long)]
        tax_free: bool,
    },
    /// Edit a distribution entry
    Edit {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        ex_date: String,
        #[arg(long)]
        per_unit: String,
        #[arg(long)]
        units: String,
        #[arg(long)]
        tax_free: bool,
    },
    /// Delete a distribution entry
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Show distributions grouped by ticker
    List,
}

#[derive(Subcommand)]
enum OwnerAction {
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let db_path = cli
        .db
        .clone()
        .or_else(|| env::var("LEDGER_DB").ok())
        .unwrap_or_else(|| String::from("portfolio.db"));
    let identity = cli
        .identity
        .clone()
        .or_else(|| env::var("LEDGER_IDENTITY").ok())
        .unwrap_or_else(|| String::from("local"));

    let db_connect_options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(db_connect_options).await?;
    init::create_tables(&connection).await?;

    let scope = ScopeCtx::new(Scope::parse_str(&cli.scope)?, identity);
    let service = LedgerService::new(connection, scope);
    let owner_view = cli.owner.as_deref();

    match cli.action {
        Action::Assets => {
            let snapshot = service.load().await?;
            print_assets(&snapshot, owner_view);
        }
        Action::Add {
            owner,
            ticker,
            date,
            price,
            units,
            kind,
            frequency,
            currency,
            data_url,
            rate,
        } => {
            service
                .execute(Command::AddLot {
                    owner_id: owner,
                    ticker,
                    kind: parse_kind(&kind)?,
                    frequency: parse_frequency(&frequency)?,
                    currency,
                    data_url,
                    date: parse_date(&date)?,
                    price: parse_decimal(&price, "price")?,
                    units: parse_decimal(&units, "units")?,
                    rate_note: rate,
                })
                .await?;
            println!("Lot recorded");
        }
        Action::EditLot {
            asset,
            lot,
            date,
            price,
            units,
            rate,
        } => {
            service
                .execute(Command::EditLot {
                    asset_id: asset,
                    lot_id: lot,
                    date: parse_date(&date)?,
                    price: parse_decimal(&price, "price")?,
                    units: parse_decimal(&units, "units")?,
                    rate_note: rate,
                })
                .await?;
            println!("Lot {} updated", lot);
        }
        Action::DeleteLot { asset, lot } => {
            service
                .execute(Command::DeleteLot {
                    asset_id: asset,
                    lot_id: lot,
                })
                .await?;
            println!("Lot {} deleted", lot);
        }
        Action::EditAsset {
            asset,
            ticker,
            kind,
            frequency,
            data_url,
        } => {
            service
                .execute(Command::EditAssetMeta {
                    asset_id: asset,
                    ticker,
                    kind: parse_kind(&kind)?,
                    frequency: parse_frequency(&frequency)?,
                    data_url,
                })
                .await?;
            println!("Asset {} updated", asset);
        }
        Action::DeleteAsset { asset } => {
            service
                .execute(Command::DeleteAsset { asset_id: asset })
                .await?;
            println!("Asset {} deleted", asset);
        }
        Action::Sell {
            asset,
            units,
            price,
            date,
        } => {
            let snapshot = service
                .execute(Command::Dispose {
                    asset_id: asset,
                    units: parse_decimal(&units, "units")?,
                    price: parse_decimal(&price, "price")?,
                    date: parse_date(&date)?,
                })
                .await?;
            print_history(&snapshot, owner_view);
        }
        Action::Dividend(dividend_action) => {
            run_dividend(&service, dividend_action, owner_view).await?;
        }
        Action::History => {
            let snapshot = service.load().await?;
            print_history(&snapshot, owner_view);
        }
        Action::DeleteHistory { id } => {
            eprintln!("Note: Deleting a history row does not restore the asset's lots");
            service
                .execute(Command::DeleteRealization { realization_id: id })
                .await?;
            println!("History row {} deleted", id);
        }
        Action::Prices => {
            let snapshot = service.refresh_prices().await?;
            print_assets(&snapshot, owner_view);
        }
        Action::Import { file, owner } => {
            let imported = service.import_lots(&file, &owner).await?;
            println!("Imported {} lots", imported);
        }
        Action::Export { file } => {
            service.export_snapshot(&file).await?;
            println!("Snapshot written to {}", file);
        }
        Action::Owner(owner_action) => match owner_action {
            OwnerAction::Add { id, name } => {
                service.add_owner(&id, &name).await?;
                println!("Owner {} added", id);
            }
            OwnerAction::List => {
                for owner in service.owners().await? {
                    println!("{:<8} {}", owner.id(), owner.name());
                }
            }
        },
    }

    Ok(())
}

async fn run_dividend(
    service: &LedgerService,
    action: DividendAction,
    owner_view: Option<&str>,
) -> Result<()> {
    match action {
        DividendAction::Add {
            owner,
            ticker,
            ex_date,
            per_unit,
            units,
            tax_free,
        } => {
            let rate = service.usd_twd_rate().await;
            let ticker_upper = ticker.to_uppercase();
            let units = match units {
                Some(units) => parse_decimal(&units, "units")?,
                None => {
                    let snapshot = service.load().await?;
                    snapshot
                        .assets
                        .iter()
                        .find(|asset| {
                            asset.owner_id() == &owner && asset.ticker() == &ticker_upper
                        })
                        .map(|asset| *asset.units())
                        .ok_or_else(|| {
                            anyhow::anyhow!(
                                "No holding of {} for owner {}; pass --units",
                                ticker_upper,
                                owner
                            )
                        })?
                }
            };
            service
                .execute(Command::RecordDividend {
                    owner_id: owner,
                    ticker,
                    ex_date: parse_date(&ex_date)?,
                    per_unit: parse_decimal(&per_unit, "per-unit amount")?,
                    units,
                    taxable: !tax_free,
                    usd_twd_rate: rate,
                })
                .await?;
            println!("Dividend recorded");
        }
        DividendAction::Edit {
            id,
            ticker,
            ex_date,
            per_unit,
            units,
            tax_free,
        } => {
            let rate = service.usd_twd_rate().await;
            service
                .execute(Command::EditDividend {
                    dividend_id: id,
                    ticker,
                    ex_date: parse_date(&ex_date)?,
                    per_unit: parse_decimal(&per_unit, "per-unit amount")?,
                    units: parse_decimal(&units, "units")?,
                    taxable: !tax_free,
                    usd_twd_rate: rate,
                })
                .await?;
            println!("Dividend {} updated", id);
        }
        DividendAction::Delete { id } => {
            service
                .execute(Command::DeleteDividend { dividend_id: id })
                .await?;
            println!("Dividend {} deleted", id);
        }
        DividendAction::List => {
            let snapshot = service.load().await?;
            print_dividends(&snapshot, owner_view);
        }
    }

    Ok(())
}

fn parse_kind(field: &str) -> Result<AssetKind> {
    AssetKind::parse_str(field).with_context(|| {
        format!(
            "Valid kinds: {}",
            AssetKind::iter()
                .map(|kind| kind.to_str().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

fn parse_frequency(field: &str) -> Result<DistributionFrequency> {
    DistributionFrequency::parse_str(field).with_context(|| {
        format!(
            "Valid frequencies: {}",
            DistributionFrequency::iter()
                .map(|frequency| frequency.to_str().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

fn print_assets(snapshot: &LedgerSnapshot, owner_view: Option<&str>) {
    let assets = owner_filter::filter_by_owner(&snapshot.assets, owner_view);
    let dividends = owner_filter::filter_by_owner(&snapshot.dividends, owner_view);
    let stats = metrics::holdings_stats(&assets, &dividends);

    println!(
        "{:<4} {:<6} {:<8} {:<6} {:>12} {:>12} {:>12} {:>14}",
        "ID", "OWNER", "TICKER", "KIND", "UNITS", "AVG COST", "PRICE", "VALUE"
    );
    for asset in &assets {
        println!(
            "{:<4} {:<6} {:<8} {:<6} {:>12} {:>12} {:>12} {:>14}",
            asset.id(),
            asset.owner_id(),
            asset.ticker(),
            asset.kind().to_str(),
            asset.units().round_dp(4),
            asset.avg_cost().round_dp(2),
            asset.current_price().round_dp(2),
            (asset.units() * asset.current_price()).round_dp(2)
        );
        for lot in asset.lots() {
            println!(
                "       lot {:<5} {}  {:>10} @ {:>10}  {}",
                lot.id(),
                lot.date(),
                lot.units().round_dp(4),
                lot.price().round_dp(2),
                lot.rate_note()
            );
        }
    }

    println!();
    println!(
        "Invested: {}  Market value: {}  Dividends: {}  ROI: {}%  ROI incl. dividends: {}%",
        stats.total_invested().round_dp(2),
        stats.market_value().round_dp(2),
        stats.total_dividends().round_dp(2),
        stats.unrealized_roi().round_dp(2),
        stats.total_roi().round_dp(2)
    );
}

fn print_dividends(snapshot: &LedgerSnapshot, owner_view: Option<&str>) {
    let dividends = owner_filter::filter_by_owner(&snapshot.dividends, owner_view);
    let assets = owner_filter::filter_by_owner(&snapshot.assets, owner_view);
    let stats = metrics::dividend_stats(&dividends, &assets);

    for (ticker, entries) in metrics::group_by_ticker(&dividends) {
        println!("{}", ticker);
        for dividend in entries {
            println!(
                "  {:<4} {}  {:>10} x {:>10}  gross {:>10}  tax {:>8}  net {:>10}  NT$ {:>12}",
                dividend.id(),
                dividend.ex_date(),
                dividend.per_unit().round_dp(4),
                dividend.units().round_dp(4),
                dividend.gross().round_dp(2),
                dividend.tax().round_dp(2),
                dividend.net().round_dp(2),
                dividend.net_twd().round_dp(2)
            );
        }
    }

    println!();
    println!(
        "Received: {} (NT$ {})  Est. monthly: {}  Yield: {}%",
        stats.total_net().round_dp(2),
        stats.total_net_twd().round_dp(2),
        stats.est_monthly().round_dp(2),
        stats.yield_rate().round_dp(2)
    );
}

fn print_history(snapshot: &LedgerSnapshot, owner_view: Option<&str>) {
    let realizations = owner_filter::filter_by_owner(&snapshot.realizations, owner_view);
    let stats = metrics::realized_stats(&realizations);

    println!(
        "{:<4} {:<6} {:<8} {:<12} {:>12} {:>12} {:>12} {:>12} {:>10}",
        "ID", "OWNER", "TICKER", "DATE", "UNITS", "AVG BUY", "SELL", "PNL", "PNL %"
    );
    for item in &realizations {
        println!(
            "{:<4} {:<6} {:<8} {:<12} {:>12} {:>12} {:>12} {:>12} {:>10}",
            item.id(),
            item.owner_id(),
            item.ticker(),
            item.sell_date().to_string(),
            item.units().round_dp(4),
            item.avg_buy_price().round_dp(2),
            item.sell_price().round_dp(2),
            item.pnl().round_dp(2),
            item.pnl_percent().round_dp(2)
        );
    }

    println!();
    println!(
        "Realized PnL: {}  Realized ROI: {}%",
        stats.total_pnl().round_dp(2),
        stats.total_roi().round_dp(2)
    );
}
