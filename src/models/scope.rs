use anyhow::Result;
use derive_getters::Getters;
use derive_new::new;

/// Visibility scope of ledger rows. Shared rows are visible to every
/// identity; private rows only to the identity that wrote them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope {
    Shared,
    Private,
}

impl Scope {
    pub fn parse_str(s: &str) -> Result<Scope> {
        match s {
            "shared" => Ok(Scope::Shared),
            "private" => Ok(Scope::Private),
            _ => Err(anyhow::anyhow!("Unknown scope '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Scope::Shared => "shared",
            Scope::Private => "private",
        }
    }
}

/// Scope plus the caller's identity string, threaded through every store
/// read and write. The identity is opaque; it is only compared for
/// equality on private rows.
#[derive(Clone, Debug, Getters, new)]
pub struct ScopeCtx {
    scope: Scope,
    identity: String,
}
