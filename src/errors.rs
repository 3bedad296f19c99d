use rust_decimal::Decimal;
use thiserror::Error;

/// Failure kinds surfaced by the ledger engine. Plumbing layers (db, api,
/// CLI) wrap these in `anyhow::Error`; callers that need to branch on the
/// kind match on this enum before the wrap.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("insufficient units: requested {requested}, holding {held}")]
    InsufficientUnits { requested: Decimal, held: Decimal },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
