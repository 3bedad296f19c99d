mod aggregate;
mod dividend;
mod ledger;
mod moneydj;
mod store;
