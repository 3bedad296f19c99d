#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::engine::dividend::dividend_amounts;

    #[test]
    fn taxable_distribution_withholds_thirty_percent() {
        let amounts = dividend_amounts(dec!(2), dec!(100), true, dec!(32));

        assert_eq!(*amounts.gross(), dec!(200));
        assert_eq!(*amounts.tax(), dec!(60.00));
        assert_eq!(*amounts.net(), dec!(140.00));
        assert_eq!(*amounts.net_twd(), dec!(4480.00));
    }

    #[test]
    fn tax_free_distribution_keeps_the_gross() {
        let amounts = dividend_amounts(dec!(0.52), dec!(250), false, dec!(32.5));

        assert_eq!(*amounts.gross(), dec!(130.00));
        assert_eq!(*amounts.tax(), Decimal::ZERO);
        assert_eq!(*amounts.net(), dec!(130.00));
        assert_eq!(*amounts.net_twd(), dec!(4225.000));
    }

    #[test]
    fn negative_inputs_propagate_arithmetically() {
        let amounts = dividend_amounts(dec!(-1), dec!(10), true, dec!(30));

        assert_eq!(*amounts.gross(), dec!(-10));
        assert_eq!(*amounts.tax(), dec!(-3.0));
        assert_eq!(*amounts.net(), dec!(-7.0));
        assert_eq!(*amounts.net_twd(), dec!(-210.0));
    }
}
