#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::engine::aggregate::recompute;
    use crate::models::Lot;

    fn lot(id: i64, day: u32, price: Decimal, units: Decimal) -> Lot {
        Lot::new(
            id,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            price,
            units,
            String::new(),
        )
    }

    #[test]
    fn totals_follow_the_lot_collection() {
        let lots = vec![
            lot(1, 2, dec!(88.85), dec!(20)),
            lot(2, 9, dec!(82.95), dec!(20)),
            lot(3, 16, dec!(109.50), dec!(10)),
        ];

        let totals = recompute(&lots);

        assert_eq!(*totals.units(), dec!(50));
        assert_eq!(*totals.total_cost(), dec!(4531.00));
        assert_eq!(totals.avg_cost() * totals.units(), *totals.total_cost());
    }

    #[test]
    fn empty_collection_has_zero_average() {
        let totals = recompute(&[]);

        assert_eq!(*totals.units(), Decimal::ZERO);
        assert_eq!(*totals.total_cost(), Decimal::ZERO);
        assert_eq!(*totals.avg_cost(), Decimal::ZERO);
    }

    #[test]
    fn fractional_units_stay_exact() {
        let lots = vec![
            lot(1, 3, dec!(412.30), dec!(0.75)),
            lot(2, 17, dec!(405.10), dec!(1.25)),
        ];

        let totals = recompute(&lots);

        assert_eq!(*totals.units(), dec!(2));
        assert_eq!(*totals.total_cost(), dec!(815.600));
        assert_eq!(*totals.avg_cost(), dec!(407.800));
    }
}
