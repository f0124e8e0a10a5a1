//! Message shapes spoken between the lottery and its two oracles.
//!
//! Requests flow from a consumer contract to an oracle; callbacks flow back.
//! A consumer must accept the callback variants in its own `ExecuteMsg`, the
//! JSON encoding of these enums matches those variants.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{HexBinary, Timestamp};

/// Sent by a consumer to the randomness oracle.
#[cw_serde]
pub enum RandomnessRequestMsg {
    RequestRandomness { request_id: u64 },
}

/// Delivered by the randomness oracle to the consumer that asked.
#[cw_serde]
pub enum RandomnessCallbackMsg {
    FulfillRandomness {
        request_id: u64,
        /// 32 bytes of unpredictable output
        randomness: HexBinary,
    },
}

/// Sent by a consumer to the alarm clock.
#[cw_serde]
pub enum AlarmRequestMsg {
    SetAlarm { request_id: u64, wait_seconds: u64 },
}

/// Delivered by the alarm clock once the wait elapsed.
#[cw_serde]
pub enum AlarmCallbackMsg {
    FulfillAlarm { request_id: u64, fired_at: Timestamp },
}
