use cosmwasm_std::{
    from_json, to_json_binary, DepsMut, Env, Event, HexBinary, MessageInfo, Order, Reply,
    Response, StdResult, SubMsg, SubMsgResult, WasmMsg,
};
use cw_storage_plus::Bound;
use yieldpot_common::derive_job_randomness;
use yieldpot_common::oracle::RandomnessCallbackMsg;

use crate::drand::{round_after, verify_beacon};
use crate::error::ContractError;
use crate::state::{
    Job, JobStatus, StoredBeacon, BEACONS, CONFIG, JOBS, LATEST_ROUND, NEXT_JOB_ID, PENDING_JOBS,
    REQUESTS,
};

/// Upper bound on callbacks dispatched by one beacon submission.
pub const MAX_DELIVERIES_PER_BEACON: usize = 10;

pub const DELIVERY_REPLY_ID: u64 = 1;

/// Queue a randomness request for the sender.
pub fn request_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if REQUESTS.has(deps.storage, (&info.sender, request_id)) {
        return Err(ContractError::RequestAlreadyPending {
            consumer: info.sender.to_string(),
            request_id,
        });
    }

    let after = env.block.time.seconds() + config.safety_margin_seconds;
    let target_round = round_after(config.genesis_time, config.period_seconds, after);

    let job_id = NEXT_JOB_ID.may_load(deps.storage)?.unwrap_or(1);
    NEXT_JOB_ID.save(deps.storage, &(job_id + 1))?;

    let job = Job {
        id: job_id,
        consumer: info.sender.clone(),
        request_id,
        target_round,
        requested_at: env.block.time,
        status: JobStatus::Pending,
    };
    JOBS.save(deps.storage, job_id, &job)?;
    PENDING_JOBS.save(deps.storage, (target_round, job_id), &())?;
    REQUESTS.save(deps.storage, (&info.sender, request_id), &job_id)?;

    Ok(Response::new()
        .add_attribute("action", "request_randomness")
        .add_attribute("job_id", job_id.to_string())
        .add_attribute("target_round", target_round.to_string())
        .add_event(
            Event::new("yieldpot_randomness_job")
                .add_attribute("job_id", job_id.to_string())
                .add_attribute("consumer", info.sender.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("target_round", target_round.to_string()),
        ))
}

/// Submit a drand beacon. Only operators can call this.
pub fn submit_beacon(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    round: u64,
    signature_hex: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if !config.operators.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only operators can submit beacons".to_string(),
        });
    }

    if BEACONS.has(deps.storage, round) {
        return Err(ContractError::BeaconAlreadyExists { round });
    }

    let signature = hex::decode(&signature_hex).map_err(|_| ContractError::InvalidHex {
        field: "signature_hex".to_string(),
    })?;
    let randomness = verify_beacon(&config.quicknet_pubkey, round, &signature)?;

    let beacon = StoredBeacon {
        round,
        randomness: randomness.to_vec(),
        signature,
        submitted_at: env.block.time,
        submitted_by: info.sender.clone(),
    };
    BEACONS.save(deps.storage, round, &beacon)?;

    let current_latest = LATEST_ROUND.may_load(deps.storage)?.unwrap_or(0);
    if round > current_latest {
        LATEST_ROUND.save(deps.storage, &round)?;
    }

    // Every job targeting this round or earlier is due
    let due: Vec<(u64, u64)> = PENDING_JOBS
        .keys(
            deps.storage,
            None,
            Some(Bound::inclusive((round, u64::MAX))),
            Order::Ascending,
        )
        .take(MAX_DELIVERIES_PER_BEACON)
        .collect::<StdResult<_>>()?;

    let mut response = Response::new()
        .add_attribute("action", "submit_beacon")
        .add_attribute("round", round.to_string())
        .add_attribute("submitted_by", info.sender.to_string())
        .add_attribute("deliveries", due.len().to_string())
        .add_event(
            Event::new("yieldpot_beacon_submitted")
                .add_attribute("round", round.to_string())
                .add_attribute("randomness", hex::encode(randomness))
                .add_attribute("submitted_by", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        );

    for (target_round, job_id) in due {
        let mut job = JOBS.load(deps.storage, job_id)?;
        let job_randomness = derive_job_randomness(&randomness, job.consumer.as_str(), job.request_id);

        let callback = WasmMsg::Execute {
            contract_addr: job.consumer.to_string(),
            msg: to_json_binary(&RandomnessCallbackMsg::FulfillRandomness {
                request_id: job.request_id,
                randomness: HexBinary::from(job_randomness.to_vec()),
            })?,
            funds: vec![],
        };
        response = response.add_submessage(
            SubMsg::reply_on_error(callback, DELIVERY_REPLY_ID)
                .with_payload(to_json_binary(&job_id)?),
        );

        job.status = JobStatus::Delivered {
            beacon_round: round,
        };
        JOBS.save(deps.storage, job_id, &job)?;
        PENDING_JOBS.remove(deps.storage, (target_round, job_id));
    }

    Ok(response)
}

/// A consumer rejected its callback. The beacon stands; the job is marked failed.
pub fn handle_delivery_failure(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let job_id: u64 = from_json(&msg.payload)?;
    let error = match msg.result {
        SubMsgResult::Err(err) => err,
        SubMsgResult::Ok(_) => return Ok(Response::new()),
    };

    let mut job = JOBS.load(deps.storage, job_id)?;
    let beacon_round = match job.status {
        JobStatus::Delivered { beacon_round } => beacon_round,
        _ => LATEST_ROUND.may_load(deps.storage)?.unwrap_or(0),
    };
    job.status = JobStatus::Failed {
        beacon_round,
        error: error.clone(),
    };
    JOBS.save(deps.storage, job_id, &job)?;

    Ok(Response::new()
        .add_attribute("action", "delivery_failed")
        .add_attribute("job_id", job_id.to_string())
        .add_event(
            Event::new("yieldpot_delivery_failed")
                .add_attribute("job_id", job_id.to_string())
                .add_attribute("consumer", job.consumer.to_string())
                .add_attribute("request_id", job.request_id.to_string())
                .add_attribute("error", error),
        ))
}

/// Update the operator list. Admin only.
pub fn update_operators(
    deps: DepsMut,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update operators".to_string(),
        });
    }

    for addr_str in &remove {
        let addr = deps.api.addr_validate(addr_str)?;
        config.operators.retain(|a| *a != addr);
    }
    for addr_str in &add {
        let addr = deps.api.addr_validate(addr_str)?;
        if !config.operators.contains(&addr) {
            config.operators.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_operators")
        .add_attribute("added", add.join(","))
        .add_attribute("removed", remove.join(",")))
}
