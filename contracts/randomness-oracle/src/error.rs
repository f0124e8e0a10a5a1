use cosmwasm_std::StdError;
use thiserror::Error;

use crate::drand::BeaconError;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("beacon for round {round} already exists")]
    BeaconAlreadyExists { round: u64 },

    #[error("BLS verification failed: {0}")]
    VerificationFailed(#[from] BeaconError),

    #[error("invalid hex input: {field}")]
    InvalidHex { field: String },

    #[error("request {request_id} from {consumer} is already registered")]
    RequestAlreadyPending { consumer: String, request_id: u64 },

    #[error("unknown reply id {id}")]
    UnknownReply { id: u64 },
}
