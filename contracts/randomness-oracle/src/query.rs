use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::state::{Job, JobStatus, BEACONS, CONFIG, JOBS, LATEST_ROUND};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_beacon(deps: Deps, round: u64) -> StdResult<Binary> {
    let beacon = BEACONS.may_load(deps.storage, round)?;
    to_json_binary(&beacon)
}

pub fn query_latest_round(deps: Deps) -> StdResult<Binary> {
    let round = LATEST_ROUND.may_load(deps.storage)?.unwrap_or(0);
    to_json_binary(&round)
}

pub fn query_job(deps: Deps, job_id: u64) -> StdResult<Binary> {
    let job = JOBS.may_load(deps.storage, job_id)?;
    to_json_binary(&job)
}

/// Undelivered jobs in job-id order.
pub fn query_pending_jobs(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let jobs: Vec<Job> = JOBS
        .range(deps.storage, start, None, Order::Ascending)
        .filter_map(|r| r.ok())
        .map(|(_, job)| job)
        .filter(|job| job.status == JobStatus::Pending)
        .take(limit)
        .collect();

    to_json_binary(&jobs)
}
