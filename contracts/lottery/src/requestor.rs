//! Outbound oracle requests and the guard every callback passes through.

use cosmwasm_std::{to_json_binary, CosmosMsg, Env, StdResult, Storage, WasmMsg};
use yieldpot_common::oracle::{AlarmRequestMsg, RandomnessRequestMsg};

use crate::error::ContractError;
use crate::state::{LotteryConfig, PendingRequest, Round, NEXT_REQUEST_ID};

fn next_request_id(storage: &mut dyn Storage) -> StdResult<u64> {
    let id = NEXT_REQUEST_ID.may_load(storage)?.unwrap_or(1);
    NEXT_REQUEST_ID.save(storage, &(id + 1))?;
    Ok(id)
}

/// Ask the alarm clock to call back after the configured draw duration.
pub fn request_alarm(
    storage: &mut dyn Storage,
    env: &Env,
    config: &LotteryConfig,
    round: &mut Round,
) -> Result<CosmosMsg, ContractError> {
    if round.pending_alarm.is_some() {
        return Err(ContractError::RequestAlreadyPending {
            kind: "alarm".to_string(),
            round_id: round.id,
        });
    }

    let request_id = next_request_id(storage)?;
    round.pending_alarm = Some(PendingRequest {
        request_id,
        issued_at: env.block.time,
    });

    Ok(WasmMsg::Execute {
        contract_addr: config.alarm_clock.to_string(),
        msg: to_json_binary(&AlarmRequestMsg::SetAlarm {
            request_id,
            wait_seconds: config.draw_duration_seconds,
        })?,
        funds: vec![],
    }
    .into())
}

pub fn request_randomness(
    storage: &mut dyn Storage,
    env: &Env,
    config: &LotteryConfig,
    round: &mut Round,
) -> Result<CosmosMsg, ContractError> {
    if round.pending_randomness.is_some() {
        return Err(ContractError::RequestAlreadyPending {
            kind: "randomness".to_string(),
            round_id: round.id,
        });
    }

    let request_id = next_request_id(storage)?;
    round.pending_randomness = Some(PendingRequest {
        request_id,
        issued_at: env.block.time,
    });

    Ok(WasmMsg::Execute {
        contract_addr: config.randomness_oracle.to_string(),
        msg: to_json_binary(&RandomnessRequestMsg::RequestRandomness { request_id })?,
        funds: vec![],
    }
    .into())
}

/// True only for the single id currently awaited in this phase.
pub fn matches_pending(pending: &Option<PendingRequest>, request_id: u64) -> bool {
    matches!(pending, Some(p) if p.request_id == request_id)
}
