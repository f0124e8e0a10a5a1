use cosmwasm_std::{
    from_json, to_json_binary, DepsMut, Env, Event, MessageInfo, Reply, Response, SubMsg,
    SubMsgResult, WasmMsg,
};
use yieldpot_common::oracle::AlarmCallbackMsg;

use crate::error::ContractError;
use crate::state::{Alarm, AlarmStatus, ALARMS, CONFIG, NEXT_ALARM_ID, PENDING_REQUESTS, SCHEDULE};

pub const FIRE_REPLY_ID: u64 = 1;

pub fn set_alarm(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    wait_seconds: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if wait_seconds < config.min_wait_seconds || wait_seconds > config.max_wait_seconds {
        return Err(ContractError::InvalidWait {
            wait_seconds,
            min: config.min_wait_seconds,
            max: config.max_wait_seconds,
        });
    }
    if PENDING_REQUESTS.has(deps.storage, (&info.sender, request_id)) {
        return Err(ContractError::RequestAlreadyPending {
            consumer: info.sender.to_string(),
            request_id,
        });
    }

    let alarm_id = NEXT_ALARM_ID.may_load(deps.storage)?.unwrap_or(1);
    NEXT_ALARM_ID.save(deps.storage, &(alarm_id + 1))?;

    let due_at = env.block.time.plus_seconds(wait_seconds);
    let alarm = Alarm {
        id: alarm_id,
        consumer: info.sender.clone(),
        request_id,
        set_at: env.block.time,
        due_at,
        status: AlarmStatus::Pending,
    };
    ALARMS.save(deps.storage, alarm_id, &alarm)?;
    SCHEDULE.save(deps.storage, (due_at.seconds(), alarm_id), &())?;
    PENDING_REQUESTS.save(deps.storage, (&info.sender, request_id), &alarm_id)?;

    Ok(Response::new()
        .add_attribute("action", "set_alarm")
        .add_attribute("alarm_id", alarm_id.to_string())
        .add_attribute("due_at", due_at.seconds().to_string())
        .add_event(
            Event::new("yieldpot_alarm_set")
                .add_attribute("alarm_id", alarm_id.to_string())
                .add_attribute("consumer", info.sender.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("due_at", due_at.seconds().to_string()),
        ))
}

/// Deliver a due alarm to its consumer. Keeper-style: any sender.
pub fn fire(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    alarm_id: u64,
) -> Result<Response, ContractError> {
    let mut alarm = ALARMS.load(deps.storage, alarm_id)?;

    if alarm.status != AlarmStatus::Pending {
        return Err(ContractError::AlarmAlreadyFired { alarm_id });
    }
    if env.block.time < alarm.due_at {
        return Err(ContractError::AlarmNotDue {
            alarm_id,
            due_at: alarm.due_at.seconds(),
        });
    }

    let callback = WasmMsg::Execute {
        contract_addr: alarm.consumer.to_string(),
        msg: to_json_binary(&AlarmCallbackMsg::FulfillAlarm {
            request_id: alarm.request_id,
            fired_at: env.block.time,
        })?,
        funds: vec![],
    };

    alarm.status = AlarmStatus::Fired { at: env.block.time };
    ALARMS.save(deps.storage, alarm_id, &alarm)?;
    SCHEDULE.remove(deps.storage, (alarm.due_at.seconds(), alarm_id));
    PENDING_REQUESTS.remove(deps.storage, (&alarm.consumer, alarm.request_id));

    Ok(Response::new()
        .add_submessage(
            SubMsg::reply_on_error(callback, FIRE_REPLY_ID).with_payload(to_json_binary(&alarm_id)?),
        )
        .add_attribute("action", "fire")
        .add_attribute("alarm_id", alarm_id.to_string())
        .add_attribute("keeper", info.sender.to_string())
        .add_event(
            Event::new("yieldpot_alarm_fired")
                .add_attribute("alarm_id", alarm_id.to_string())
                .add_attribute("consumer", alarm.consumer.to_string())
                .add_attribute("request_id", alarm.request_id.to_string())
                .add_attribute("fired_at", env.block.time.seconds().to_string()),
        ))
}

/// The consumer rejected the callback; the alarm stays spent.
pub fn handle_fire_failure(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    let alarm_id: u64 = from_json(&msg.payload)?;
    let error = match msg.result {
        SubMsgResult::Err(err) => err,
        SubMsgResult::Ok(_) => return Ok(Response::new()),
    };

    let mut alarm = ALARMS.load(deps.storage, alarm_id)?;
    alarm.status = AlarmStatus::Failed {
        at: env.block.time,
        error: error.clone(),
    };
    ALARMS.save(deps.storage, alarm_id, &alarm)?;

    Ok(Response::new()
        .add_attribute("action", "fire_failed")
        .add_attribute("alarm_id", alarm_id.to_string())
        .add_event(
            Event::new("yieldpot_alarm_failed")
                .add_attribute("alarm_id", alarm_id.to_string())
                .add_attribute("consumer", alarm.consumer.to_string())
                .add_attribute("error", error),
        ))
}

pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    admin: Option<String>,
    min_wait_seconds: Option<u64>,
    max_wait_seconds: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(new_admin) = admin {
        config.admin = deps.api.addr_validate(&new_admin)?;
    }
    if let Some(min) = min_wait_seconds {
        config.min_wait_seconds = min;
    }
    if let Some(max) = max_wait_seconds {
        config.max_wait_seconds = max;
    }
    if config.min_wait_seconds > config.max_wait_seconds {
        return Err(ContractError::InvalidWaitBounds {
            min: config.min_wait_seconds,
            max: config.max_wait_seconds,
        });
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
