use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("operation not allowed while round {round_id} is {status}")]
    InvalidPhase { round_id: u64, status: String },

    #[error("ticket cap exceeded: {sold} sold + {requested} requested > {max_tickets}")]
    CapExceeded {
        sold: u64,
        requested: u64,
        max_tickets: u64,
    },

    #[error("a {kind} request is already pending for round {round_id}")]
    RequestAlreadyPending { kind: String, round_id: u64 },

    #[error("no tickets sold in round {round_id}")]
    NoTicketsSold { round_id: u64 },

    #[error("round {round_id} cannot be locked before {unlocks_at} unless the cap is reached")]
    LockConditionsNotMet { round_id: u64, unlocks_at: u64 },

    #[error("no price feed registered for {denom}")]
    NoPriceFeed { denom: String },

    #[error("payment worth {equivalent} does not cover one ticket at {ticket_cost}")]
    InsufficientPayment {
        equivalent: Uint128,
        ticket_cost: Uint128,
    },

    #[error("no funds sent with ticket purchase")]
    NoFundsSent,

    #[error("must send exactly one coin")]
    InvalidFunds,

    #[error("invalid basis points: {field} = {value} (must be <= 10000)")]
    InvalidBps { field: String, value: u16 },

    #[error("ticket cost must be greater than zero")]
    InvalidTicketCost,

    #[error("max tickets {max_tickets} is below the {sold} already sold")]
    InvalidMaxTickets { max_tickets: u64, sold: u64 },

    #[error("insufficient pool balance: need {needed}, have {available}")]
    InsufficientPool { needed: String, available: String },

    #[error("unknown reply id {id}")]
    UnknownReply { id: u64 },

    #[error("no winner found for random result {random_result}")]
    NoWinner { random_result: u64 },

    #[error("randomness must be at least 16 bytes, got {len}")]
    InvalidRandomness { len: usize },
}

impl ContractError {
    pub fn invalid_phase(round_id: u64, status: &yieldpot_common::RoundStatus) -> Self {
        ContractError::InvalidPhase {
            round_id,
            status: status.as_str().to_string(),
        }
    }
}
