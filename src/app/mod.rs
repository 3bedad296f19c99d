pub mod service;
pub mod utils;

pub use service::LedgerService;
