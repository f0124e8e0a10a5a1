use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::state::{Alarm, ALARMS, CONFIG, SCHEDULE};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_alarm(deps: Deps, alarm_id: u64) -> StdResult<Binary> {
    let alarm = ALARMS.may_load(deps.storage, alarm_id)?;
    to_json_binary(&alarm)
}

pub fn query_due_alarms(deps: Deps, env: Env, limit: Option<u32>) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let now = env.block.time.seconds();

    let alarms: Vec<Alarm> = SCHEDULE
        .keys(
            deps.storage,
            None,
            Some(Bound::inclusive((now, u64::MAX))),
            Order::Ascending,
        )
        .take(limit)
        .map(|key| key.and_then(|(_, id)| ALARMS.load(deps.storage, id)))
        .collect::<StdResult<_>>()?;

    to_json_binary(&alarms)
}
