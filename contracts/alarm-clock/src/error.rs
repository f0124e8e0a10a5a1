use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("wait of {wait_seconds}s is outside [{min}, {max}]")]
    InvalidWait {
        wait_seconds: u64,
        min: u64,
        max: u64,
    },

    #[error("minimum wait {min} exceeds maximum wait {max}")]
    InvalidWaitBounds { min: u64, max: u64 },

    #[error("request {request_id} from {consumer} already has a pending alarm")]
    RequestAlreadyPending { consumer: String, request_id: u64 },

    #[error("alarm {alarm_id} is not due until {due_at}")]
    AlarmNotDue { alarm_id: u64, due_at: u64 },

    #[error("alarm {alarm_id} has already fired")]
    AlarmAlreadyFired { alarm_id: u64 },

    #[error("unknown reply id {id}")]
    UnknownReply { id: u64 },
}
