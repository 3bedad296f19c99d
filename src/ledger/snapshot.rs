use serde::{Deserialize, Serialize};

use crate::models::{Asset, Dividend, Realization};

/// One consistent view of the ledger for a visibility scope. Commands are
/// computed against a snapshot and produce a new one; the store persists
/// whole entities, never field-level patches.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LedgerSnapshot {
    pub assets: Vec<Asset>,
    pub dividends: Vec<Dividend>,
    pub realizations: Vec<Realization>,
}

impl LedgerSnapshot {
    pub fn asset(&self, id: i64) -> Option<&Asset> {
        self.assets.iter().find(|asset| *asset.id() == id)
    }

    pub fn asset_index(&self, id: i64) -> Option<usize> {
        self.assets.iter().position(|asset| *asset.id() == id)
    }

    pub fn asset_index_by_ticker(&self, owner_id: &str, ticker: &str) -> Option<usize> {
        self.assets
            .iter()
            .position(|asset| asset.owner_id() == owner_id && asset.ticker() == ticker)
    }

    pub fn dividend_index(&self, id: i64) -> Option<usize> {
        self.dividends.iter().position(|dividend| *dividend.id() == id)
    }

    pub fn realization_index(&self, id: i64) -> Option<usize> {
        self.realizations.iter().position(|item| *item.id() == id)
    }
}
