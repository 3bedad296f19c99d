use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Withholding applied to taxable distributions, fixed at 30%.
pub const WITHHOLDING_TAX_RATE: Decimal = dec!(0.30);

#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct DividendAmounts {
    gross: Decimal,
    tax: Decimal,
    net: Decimal,
    net_twd: Decimal,
}

/// Derives the distribution amounts recorded on a dividend entry. Inputs
/// are taken as given; sign validation belongs to the command boundary, so
/// negative or zero values simply propagate arithmetically.
pub fn dividend_amounts(
    per_unit: Decimal,
    units: Decimal,
    taxable: bool,
    usd_twd_rate: Decimal,
) -> DividendAmounts {
    let gross = per_unit * units;
    let tax = if taxable {
        gross * WITHHOLDING_TAX_RATE
    } else {
        Decimal::ZERO
    };
    let net = gross - tax;

    DividendAmounts::new(gross, tax, net, net * usd_twd_rate)
}
