use crate::models::Owned;

/// Projects an entity collection down to one owner's view. `None` is the
/// aggregate view and returns everything unchanged. Applied independently
/// to assets, dividends and realizations before any metric computation;
/// never mutates the underlying ledger.
pub fn filter_by_owner<T: Owned + Clone>(entities: &[T], owner_id: Option<&str>) -> Vec<T> {
    match owner_id {
        None => entities.to_vec(),
        Some(id) => entities
            .iter()
            .filter(|entity| entity.owner_id() == id)
            .cloned()
            .collect(),
    }
}
