pub mod apply;
pub mod command;
pub mod snapshot;

pub use apply::{Applied, Effect, apply};
pub use command::Command;
pub use snapshot::LedgerSnapshot;
