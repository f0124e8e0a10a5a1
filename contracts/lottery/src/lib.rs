pub mod contract;
pub mod error;
pub mod execute;
pub mod ledger;
pub mod msg;
pub mod query;
pub mod requestor;
pub mod state;
pub mod yield_venue;

pub use crate::error::ContractError;
