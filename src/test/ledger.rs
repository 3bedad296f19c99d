#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::errors::LedgerError;
    use crate::ledger::{Command, Effect, LedgerSnapshot, apply};
    use crate::models::{
        Asset, AssetKind, DistributionFrequency, Dividend, Lot, Realization,
    };

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn add_lot(owner: &str, ticker: &str, day: u32, price: Decimal, units: Decimal) -> Command {
        Command::AddLot {
            owner_id: owner.to_string(),
            ticker: ticker.to_string(),
            kind: AssetKind::Etf,
            frequency: DistributionFrequency::Quarterly,
            currency: String::from("USD"),
            data_url: None,
            date: date(1, day),
            price,
            units,
            rate_note: String::new(),
        }
    }

    /// One asset (id 7) holding 10 units at 1 and 10 units at 2.
    fn seeded_snapshot() -> LedgerSnapshot {
        let lots = vec![
            Lot::new(1, date(1, 1), dec!(1), dec!(10), String::from("32.1")),
            Lot::new(2, date(2, 1), dec!(2), dec!(10), String::new()),
        ];
        let asset = Asset::new(
            7,
            String::from("u1"),
            String::from("VOO"),
            None,
            AssetKind::Etf,
            DistributionFrequency::Quarterly,
            String::from("USD"),
            None,
            lots,
            dec!(20),
            dec!(30),
            dec!(1.5),
            dec!(3),
        );

        LedgerSnapshot {
            assets: vec![asset],
            dividends: Vec::new(),
            realizations: Vec::new(),
        }
    }

    #[test]
    fn first_purchase_creates_the_asset() {
        let applied = apply(
            &LedgerSnapshot::default(),
            add_lot("u1", "voo", 5, dec!(100), dec!(5)),
        )
        .unwrap();

        assert_eq!(applied.snapshot.assets.len(), 1);
        let asset = &applied.snapshot.assets[0];
        assert_eq!(asset.ticker(), "VOO");
        assert_eq!(*asset.units(), dec!(5));
        assert_eq!(*asset.total_cost(), dec!(500));
        assert_eq!(*asset.avg_cost(), dec!(100));
        assert_eq!(*asset.current_price(), dec!(100));
        assert!(matches!(applied.effects[..], [Effect::UpsertAsset(_)]));
    }

    #[test]
    fn repeat_purchase_appends_a_lot_and_recomputes() {
        let applied = apply(&seeded_snapshot(), add_lot("u1", "VOO", 20, dec!(4), dec!(5))).unwrap();

        let asset = &applied.snapshot.assets[0];
        assert_eq!(asset.lots().len(), 3);
        assert_eq!(*asset.units(), dec!(25));
        assert_eq!(*asset.total_cost(), dec!(50));
        assert_eq!(*asset.avg_cost(), dec!(2));
        // The price set at creation time is untouched by later purchases.
        assert_eq!(*asset.current_price(), dec!(3));
    }

    #[test]
    fn editing_a_lot_recomputes_the_aggregate() {
        let applied = apply(
            &seeded_snapshot(),
            Command::EditLot {
                asset_id: 7,
                lot_id: 2,
                date: date(2, 1),
                price: dec!(2),
                units: dec!(30),
                rate_note: String::new(),
            },
        )
        .unwrap();

        let asset = &applied.snapshot.assets[0];
        assert_eq!(*asset.units(), dec!(40));
        assert_eq!(*asset.total_cost(), dec!(70));
        assert_eq!(*asset.avg_cost(), dec!(1.75));
    }

    #[test]
    fn deleting_the_last_lot_keeps_a_zeroed_asset() {
        let snapshot = seeded_snapshot();
        let applied = apply(&snapshot, Command::DeleteLot { asset_id: 7, lot_id: 1 }).unwrap();
        let applied = apply(
            &applied.snapshot,
            Command::DeleteLot { asset_id: 7, lot_id: 2 },
        )
        .unwrap();

        let asset = &applied.snapshot.assets[0];
        assert!(asset.lots().is_empty());
        assert_eq!(*asset.units(), Decimal::ZERO);
        assert_eq!(*asset.total_cost(), Decimal::ZERO);
        assert_eq!(*asset.avg_cost(), Decimal::ZERO);
    }

    #[test]
    fn disposal_writes_one_realization_and_keeps_survivors() {
        let applied = apply(
            &seeded_snapshot(),
            Command::Dispose {
                asset_id: 7,
                units: dec!(15),
                price: dec!(5),
                date: date(3, 1),
            },
        )
        .unwrap();

        assert_eq!(applied.snapshot.realizations.len(), 1);
        let item = &applied.snapshot.realizations[0];
        assert_eq!(*item.owner_id(), "u1");
        assert_eq!(*item.units(), dec!(15));
        assert_eq!(*item.sell_price(), dec!(5));
        assert_eq!(*item.pnl(), dec!(55));
        assert_eq!(*item.pnl_percent(), dec!(275));
        assert_eq!(item.avg_buy_price().round_dp(4), dec!(1.3333));
        assert_eq!(*item.sell_date(), date(3, 1));

        let asset = &applied.snapshot.assets[0];
        assert_eq!(asset.lots().len(), 1);
        assert_eq!(*asset.units(), dec!(5));
        assert_eq!(*asset.total_cost(), dec!(10));
        assert_eq!(*asset.avg_cost(), dec!(2));
    }

    #[test]
    fn full_disposal_removes_the_asset() {
        let applied = apply(
            &seeded_snapshot(),
            Command::Dispose {
                asset_id: 7,
                units: dec!(20),
                price: dec!(5),
                date: date(3, 1),
            },
        )
        .unwrap();

        assert!(applied.snapshot.assets.is_empty());
        assert_eq!(applied.snapshot.realizations.len(), 1);
        assert!(
            applied
                .effects
                .iter()
                .any(|effect| matches!(effect, Effect::DeleteAsset(7)))
        );
    }

    #[test]
    fn overdrawn_disposal_changes_nothing() {
        let snapshot = seeded_snapshot();
        let result = apply(
            &snapshot,
            Command::Dispose {
                asset_id: 7,
                units: dec!(21),
                price: dec!(5),
                date: date(3, 1),
            },
        );

        assert_eq!(
            result.unwrap_err(),
            LedgerError::InsufficientUnits {
                requested: dec!(21),
                held: dec!(20),
            }
        );
        // The input snapshot is still intact for the caller to retry.
        assert_eq!(snapshot.assets[0].lots().len(), 2);
        assert!(snapshot.realizations.is_empty());
    }

    #[test]
    fn deleting_history_does_not_restock_the_asset() {
        let mut snapshot = seeded_snapshot();
        snapshot.realizations.push(Realization::new(
            3,
            String::from("u1"),
            String::from("AMD"),
            None,
            date(2, 2),
            dec!(170),
            dec!(120),
            dec!(4),
            dec!(200),
            dec!(41.67),
            String::from("USD"),
        ));

        let applied = apply(&snapshot, Command::DeleteRealization { realization_id: 3 }).unwrap();

        assert!(applied.snapshot.realizations.is_empty());
        let asset = &applied.snapshot.assets[0];
        assert_eq!(asset.lots().len(), 2);
        assert_eq!(*asset.units(), dec!(20));
        assert_eq!(*asset.total_cost(), dec!(30));
        assert!(matches!(applied.effects[..], [Effect::DeleteRealization(3)]));
    }

    #[test]
    fn recorded_dividend_carries_the_entry_time_rate() {
        let applied = apply(
            &LedgerSnapshot::default(),
            Command::RecordDividend {
                owner_id: String::from("u2"),
                ticker: String::from("jepq"),
                ex_date: date(6, 14),
                per_unit: dec!(2),
                units: dec!(100),
                taxable: true,
                usd_twd_rate: dec!(32),
            },
        )
        .unwrap();

        let entry = &applied.snapshot.dividends[0];
        assert_eq!(entry.ticker(), "JEPQ");
        assert_eq!(*entry.gross(), dec!(200));
        assert_eq!(*entry.tax(), dec!(60.00));
        assert_eq!(*entry.net(), dec!(140.00));
        assert_eq!(*entry.net_twd(), dec!(4480.00));
        assert_eq!(entry.pay_date(), entry.ex_date());
    }

    #[test]
    fn editing_a_dividend_keeps_its_owner() {
        let applied = apply(
            &LedgerSnapshot::default(),
            Command::RecordDividend {
                owner_id: String::from("u2"),
                ticker: String::from("JEPQ"),
                ex_date: date(6, 14),
                per_unit: dec!(2),
                units: dec!(100),
                taxable: true,
                usd_twd_rate: dec!(32),
            },
        )
        .unwrap();
        let mut snapshot = applied.snapshot;
        // Store-assigned ids arrive through the reload path; simulate one.
        snapshot.dividends[0] = dividend_with_id(&snapshot.dividends[0], 11);

        let applied = apply(
            &snapshot,
            Command::EditDividend {
                dividend_id: 11,
                ticker: String::from("JEPQ"),
                ex_date: date(6, 14),
                per_unit: dec!(2),
                units: dec!(100),
                taxable: false,
                usd_twd_rate: dec!(30),
            },
        )
        .unwrap();

        let entry = &applied.snapshot.dividends[0];
        assert_eq!(*entry.owner_id(), "u2");
        assert_eq!(*entry.tax(), Decimal::ZERO);
        assert_eq!(*entry.net(), dec!(200));
        assert_eq!(*entry.net_twd(), dec!(6000));
    }

    fn dividend_with_id(entry: &Dividend, id: i64) -> Dividend {
        Dividend::new(
            id,
            entry.owner_id().clone(),
            entry.ticker().clone(),
            *entry.ex_date(),
            *entry.pay_date(),
            *entry.per_unit(),
            *entry.units(),
            *entry.gross(),
            *entry.tax(),
            *entry.net(),
            *entry.net_twd(),
        )
    }

    #[test]
    fn commands_against_missing_targets_are_rejected() {
        let result = apply(
            &LedgerSnapshot::default(),
            Command::UpdatePrice {
                asset_id: 99,
                price: dec!(1),
            },
        );
        assert_eq!(
            result.unwrap_err(),
            LedgerError::NotFound {
                kind: "asset",
                id: 99
            }
        );

        let result = apply(
            &seeded_snapshot(),
            Command::DeleteLot {
                asset_id: 7,
                lot_id: 42,
            },
        );
        assert_eq!(
            result.unwrap_err(),
            LedgerError::NotFound {
                kind: "lot",
                id: 42
            }
        );
    }

    #[test]
    fn non_positive_lot_units_are_rejected() {
        let result = apply(
            &LedgerSnapshot::default(),
            add_lot("u1", "VOO", 5, dec!(100), Decimal::ZERO),
        );

        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
    }

    #[test]
    fn meta_edits_leave_lots_and_totals_alone() {
        let applied = apply(
            &seeded_snapshot(),
            Command::EditAssetMeta {
                asset_id: 7,
                ticker: String::from("VTI"),
                kind: AssetKind::Fund,
                frequency: DistributionFrequency::Monthly,
                data_url: Some(String::from("https://example.com/nav")),
            },
        )
        .unwrap();

        let asset = &applied.snapshot.assets[0];
        assert_eq!(asset.ticker(), "VTI");
        assert_eq!(*asset.kind(), AssetKind::Fund);
        assert_eq!(asset.lots().len(), 2);
        assert_eq!(*asset.total_cost(), dec!(30));
    }

    #[test]
    fn price_refresh_touches_only_the_price() {
        let applied = apply(
            &seeded_snapshot(),
            Command::UpdatePrice {
                asset_id: 7,
                price: dec!(4.25),
            },
        )
        .unwrap();

        let asset = &applied.snapshot.assets[0];
        assert_eq!(*asset.current_price(), dec!(4.25));
        assert_eq!(*asset.total_cost(), dec!(30));
        assert_eq!(*asset.avg_cost(), dec!(1.5));
    }
}
