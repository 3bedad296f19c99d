use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// An attributable owner of ledger entries. The id is an opaque string
/// chosen at creation time ("u1", "u2", ...); the ledger never
/// authenticates owners, it only tags entities with their id.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct Owner {
    id: String,
    name: String,
}
