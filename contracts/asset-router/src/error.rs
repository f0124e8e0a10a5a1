use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("no venue quotes {offer_denom} -> {ask_denom}")]
    NoRoute {
        offer_denom: String,
        ask_denom: String,
    },

    #[error("best quote {quoted} is below the minimum {minimum}")]
    SlippageExceeded { quoted: Uint128, minimum: Uint128 },

    #[error("must send exactly one non-zero coin")]
    InvalidFunds,

    #[error("venue {address} is already registered")]
    VenueAlreadyExists { address: String },

    #[error("venue {address} is not registered")]
    VenueNotFound { address: String },

    #[error("invalid basis points: {field} = {value} (must be <= 10000)")]
    InvalidBps { field: String, value: u16 },
}
