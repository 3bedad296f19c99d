pub mod aggregate;
pub mod disposal;
pub mod dividend;
pub mod metrics;
pub mod owner_filter;
