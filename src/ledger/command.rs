use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AssetKind, DistributionFrequency};

/// Every mutation of the ledger, as one tagged variant dispatched through
/// `apply`. The CLI (or any other front end) translates user input into
/// exactly one of these; there is no free-form mode detection.
#[derive(Clone, Debug)]
pub enum Command {
    /// Records a purchase. Creates the asset on first purchase of a ticker
    /// the owner does not hold yet; on an existing ticker the lot is
    /// appended and the meta fields are ignored.
    AddLot {
        owner_id: String,
        ticker: String,
        kind: AssetKind,
        frequency: DistributionFrequency,
        currency: String,
        data_url: Option<String>,
        date: NaiveDate,
        price: Decimal,
        units: Decimal,
        rate_note: String,
    },
    EditLot {
        asset_id: i64,
        lot_id: i64,
        date: NaiveDate,
        price: Decimal,
        units: Decimal,
        rate_note: String,
    },
    DeleteLot {
        asset_id: i64,
        lot_id: i64,
    },
    EditAssetMeta {
        asset_id: i64,
        ticker: String,
        kind: AssetKind,
        frequency: DistributionFrequency,
        data_url: Option<String>,
    },
    UpdatePrice {
        asset_id: i64,
        price: Decimal,
    },
    /// Sells units against the asset's lots, oldest first. Writes one
    /// realization; removes the asset when no lot survives.
    Dispose {
        asset_id: i64,
        units: Decimal,
        price: Decimal,
        date: NaiveDate,
    },
    RecordDividend {
        owner_id: String,
        ticker: String,
        ex_date: NaiveDate,
        per_unit: Decimal,
        units: Decimal,
        taxable: bool,
        usd_twd_rate: Decimal,
    },
    EditDividend {
        dividend_id: i64,
        ticker: String,
        ex_date: NaiveDate,
        per_unit: Decimal,
        units: Decimal,
        taxable: bool,
        usd_twd_rate: Decimal,
    },
    /// Removes an asset outright. A correction, not a sale; no realization
    /// is written.
    DeleteAsset {
        asset_id: i64,
    },
    DeleteDividend {
        dividend_id: i64,
    },
    /// Removes a history row. Does not restock the originating asset.
    DeleteRealization {
        realization_id: i64,
    },
}
