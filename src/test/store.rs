#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
    use sqlx::{Pool, Sqlite};
    use tempfile::TempDir;

    use crate::db::{init, read, write};
    use crate::ledger::{Command, LedgerSnapshot, apply};
    use crate::models::{AssetKind, DistributionFrequency, Owner, Scope, ScopeCtx};

    async fn open_store() -> (TempDir, Pool<Sqlite>) {
        let dir = tempfile::tempdir().unwrap();
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("ledger.db"))
            .create_if_missing(true);
        let connection = SqlitePool::connect_with(options).await.unwrap();
        init::create_tables(&connection).await.unwrap();
        (dir, connection)
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn buy_lot(owner: &str, ticker: &str) -> Command {
        Command::AddLot {
            owner_id: owner.to_string(),
            ticker: ticker.to_string(),
            kind: AssetKind::Etf,
            frequency: DistributionFrequency::Monthly,
            currency: String::from("USD"),
            data_url: None,
            date: date(1, 15),
            price: dec!(2.5),
            units: dec!(10),
            rate_note: String::from("32.4"),
        }
    }

    #[tokio::test]
    async fn asset_and_lots_round_trip() {
        let (_dir, connection) = open_store().await;
        let scope = ScopeCtx::new(Scope::Shared, String::from("tester"));

        let applied = apply(&LedgerSnapshot::default(), buy_lot("u1", "VOO")).unwrap();
        write::apply_effects(&connection, &scope, &applied.effects)
            .await
            .unwrap();

        let loaded = read::load_snapshot(&connection, &scope).await.unwrap();
        assert_eq!(loaded.assets.len(), 1);
        let asset = &loaded.assets[0];
        assert!(*asset.id() > 0);
        assert_eq!(asset.ticker(), "VOO");
        assert_eq!(*asset.owner_id(), "u1");
        assert_eq!(*asset.units(), dec!(10));
        assert_eq!(*asset.total_cost(), dec!(25));
        assert_eq!(*asset.avg_cost(), dec!(2.5));
        assert_eq!(asset.lots().len(), 1);
        assert_eq!(*asset.lots()[0].date(), date(1, 15));
        assert_eq!(asset.lots()[0].rate_note(), "32.4");
    }

    #[tokio::test]
    async fn disposal_effects_replace_the_asset_wholesale() {
        let (_dir, connection) = open_store().await;
        let scope = ScopeCtx::new(Scope::Shared, String::from("tester"));

        let applied = apply(&LedgerSnapshot::default(), buy_lot("u1", "VOO")).unwrap();
        write::apply_effects(&connection, &scope, &applied.effects)
            .await
            .unwrap();
        let snapshot = read::load_snapshot(&connection, &scope).await.unwrap();

        let asset_id = *snapshot.assets[0].id();
        let applied = apply(
            &snapshot,
            Command::Dispose {
                asset_id,
                units: dec!(4),
                price: dec!(3),
                date: date(6, 1),
            },
        )
        .unwrap();
        write::apply_effects(&connection, &scope, &applied.effects)
            .await
            .unwrap();

        let loaded = read::load_snapshot(&connection, &scope).await.unwrap();
        let asset = &loaded.assets[0];
        assert_eq!(*asset.units(), dec!(6));
        assert_eq!(*asset.total_cost(), dec!(15));
        assert_eq!(asset.lots().len(), 1);

        assert_eq!(loaded.realizations.len(), 1);
        let item = &loaded.realizations[0];
        assert_eq!(*item.units(), dec!(4));
        assert_eq!(*item.avg_buy_price(), dec!(2.5));
        assert_eq!(*item.pnl(), dec!(2));
        assert_eq!(*item.pnl_percent(), dec!(20));
    }

    #[tokio::test]
    async fn full_disposal_deletes_the_asset_rows() {
        let (_dir, connection) = open_store().await;
        let scope = ScopeCtx::new(Scope::Shared, String::from("tester"));

        let applied = apply(&LedgerSnapshot::default(), buy_lot("u1", "VOO")).unwrap();
        write::apply_effects(&connection, &scope, &applied.effects)
            .await
            .unwrap();
        let snapshot = read::load_snapshot(&connection, &scope).await.unwrap();

        let applied = apply(
            &snapshot,
            Command::Dispose {
                asset_id: *snapshot.assets[0].id(),
                units: dec!(10),
                price: dec!(3),
                date: date(6, 1),
            },
        )
        .unwrap();
        write::apply_effects(&connection, &scope, &applied.effects)
            .await
            .unwrap();

        let loaded = read::load_snapshot(&connection, &scope).await.unwrap();
        assert!(loaded.assets.is_empty());
        assert_eq!(loaded.realizations.len(), 1);
    }

    #[tokio::test]
    async fn dividends_round_trip_in_scope() {
        let (_dir, connection) = open_store().await;
        let scope = ScopeCtx::new(Scope::Shared, String::from("tester"));

        let applied = apply(
            &LedgerSnapshot::default(),
            Command::RecordDividend {
                owner_id: String::from("u2"),
                ticker: String::from("JEPQ"),
                ex_date: date(6, 14),
                per_unit: dec!(0.25),
                units: dec!(100),
                taxable: true,
                usd_twd_rate: dec!(32),
            },
        )
        .unwrap();
        write::apply_effects(&connection, &scope, &applied.effects)
            .await
            .unwrap();

        let loaded = read::load_snapshot(&connection, &scope).await.unwrap();
        assert_eq!(loaded.dividends.len(), 1);
        let entry = &loaded.dividends[0];
        assert_eq!(*entry.gross(), dec!(25));
        assert_eq!(*entry.tax(), dec!(7.5));
        assert_eq!(*entry.net(), dec!(17.5));
        assert_eq!(*entry.net_twd(), dec!(560));
    }

    #[tokio::test]
    async fn private_rows_stay_with_their_identity() {
        let (_dir, connection) = open_store().await;
        let alice = ScopeCtx::new(Scope::Private, String::from("alice"));
        let bob = ScopeCtx::new(Scope::Private, String::from("bob"));
        let shared = ScopeCtx::new(Scope::Shared, String::from("alice"));

        let applied = apply(&LedgerSnapshot::default(), buy_lot("u1", "VOO")).unwrap();
        write::apply_effects(&connection, &alice, &applied.effects)
            .await
            .unwrap();

        let alice_view = read::load_snapshot(&connection, &alice).await.unwrap();
        assert_eq!(alice_view.assets.len(), 1);

        let bob_view = read::load_snapshot(&connection, &bob).await.unwrap();
        assert!(bob_view.assets.is_empty());

        let shared_view = read::load_snapshot(&connection, &shared).await.unwrap();
        assert!(shared_view.assets.is_empty());
    }

    #[tokio::test]
    async fn owners_round_trip() {
        let (_dir, connection) = open_store().await;

        write::insert_owner(&Owner::new(String::from("u1"), String::from("Nan")), &connection)
            .await
            .unwrap();
        write::insert_owner(&Owner::new(String::from("u2"), String::from("Pan")), &connection)
            .await
            .unwrap();

        let owners = read::list_owners(&connection).await.unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].id(), "u1");
        assert_eq!(owners[1].name(), "Pan");
    }
}
