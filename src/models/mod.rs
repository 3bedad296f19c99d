pub mod asset;
pub mod dividend;
pub mod lot;
pub mod owner;
pub mod realization;
pub mod scope;

pub use asset::{Asset, AssetKind, DistributionFrequency};
pub use dividend::Dividend;
pub use lot::Lot;
pub use owner::Owner;
pub use realization::Realization;
pub use scope::{Scope, ScopeCtx};

/// Entities attributable to a single owner. The owner view filter operates
/// over this seam instead of knowing each entity type.
pub trait Owned {
    fn owner_id(&self) -> &str;
}
