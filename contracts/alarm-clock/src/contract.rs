use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute::{self, FIRE_REPLY_ID};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{ClockConfig, CONFIG, NEXT_ALARM_ID};

const CONTRACT_NAME: &str = "crates.io:yieldpot-alarm-clock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.min_wait_seconds > msg.max_wait_seconds {
        return Err(ContractError::InvalidWaitBounds {
            min: msg.min_wait_seconds,
            max: msg.max_wait_seconds,
        });
    }

    let config = ClockConfig {
        admin: info.sender.clone(),
        min_wait_seconds: msg.min_wait_seconds,
        max_wait_seconds: msg.max_wait_seconds,
    };
    CONFIG.save(deps.storage, &config)?;
    NEXT_ALARM_ID.save(deps.storage, &1u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "alarm-clock")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetAlarm {
            request_id,
            wait_seconds,
        } => execute::set_alarm(deps, env, info, request_id, wait_seconds),
        ExecuteMsg::Fire { alarm_id } => execute::fire(deps, env, info, alarm_id),
        ExecuteMsg::UpdateConfig {
            admin,
            min_wait_seconds,
            max_wait_seconds,
        } => execute::update_config(deps, info, admin, min_wait_seconds, max_wait_seconds),
    }
}

#[entry_point]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        FIRE_REPLY_ID => execute::handle_fire_failure(deps, env, msg),
        id => Err(ContractError::UnknownReply { id }),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Alarm { alarm_id } => query::query_alarm(deps, alarm_id),
        QueryMsg::DueAlarms { limit } => query::query_due_alarms(deps, env, limit),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi};
    use cosmwasm_std::{from_json, to_json_binary, CosmosMsg, ReplyOn, SubMsgResult, WasmMsg};
    use yieldpot_common::oracle::AlarmCallbackMsg;

    use crate::state::{Alarm, AlarmStatus, ALARMS};

    fn setup_contract(deps: DepsMut) {
        let admin = MockApi::default().addr_make("admin");
        let msg = InstantiateMsg {
            min_wait_seconds: 60,
            max_wait_seconds: 30 * 24 * 3600,
        };
        instantiate(deps, mock_env(), message_info(&admin, &[]), msg).unwrap();
    }

    fn set_alarm(deps: DepsMut, request_id: u64, wait_seconds: u64) -> Result<Response, ContractError> {
        let lottery = MockApi::default().addr_make("lottery");
        execute(
            deps,
            mock_env(),
            message_info(&lottery, &[]),
            ExecuteMsg::SetAlarm {
                request_id,
                wait_seconds,
            },
        )
    }

    fn env_at(offset: u64) -> Env {
        let mut env = mock_env();
        env.block.time = env.block.time.plus_seconds(offset);
        env
    }

    fn fire(deps: DepsMut, env: Env, alarm_id: u64) -> Result<Response, ContractError> {
        let keeper = MockApi::default().addr_make("keeper");
        execute(
            deps,
            env,
            message_info(&keeper, &[]),
            ExecuteMsg::Fire { alarm_id },
        )
    }

    #[test]
    fn test_set_alarm() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());

        set_alarm(deps.as_mut(), 1, 3600).unwrap();
        let alarm = ALARMS.load(deps.as_ref().storage, 1).unwrap();
        assert_eq!(alarm.consumer, deps.api.addr_make("lottery"));
        assert_eq!(alarm.due_at, mock_env().block.time.plus_seconds(3600));
        assert_eq!(alarm.status, AlarmStatus::Pending);

        let err = set_alarm(deps.as_mut(), 1, 3600).unwrap_err();
        assert!(matches!(
            err,
            ContractError::RequestAlreadyPending { request_id: 1, .. }
        ));

        let err = set_alarm(deps.as_mut(), 2, 10).unwrap_err();
        assert!(matches!(err, ContractError::InvalidWait { .. }));
        let err = set_alarm(deps.as_mut(), 2, 31 * 24 * 3600).unwrap_err();
        assert!(matches!(err, ContractError::InvalidWait { .. }));
    }

    #[test]
    fn test_fire_not_early_not_twice() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        let lottery = deps.api.addr_make("lottery");
        set_alarm(deps.as_mut(), 5, 3600).unwrap();

        let err = fire(deps.as_mut(), env_at(3599), 1).unwrap_err();
        assert!(matches!(err, ContractError::AlarmNotDue { alarm_id: 1, .. }));

        let env = env_at(3600);
        let res = fire(deps.as_mut(), env.clone(), 1).unwrap();
        assert_eq!(res.messages.len(), 1);
        let sub = &res.messages[0];
        assert_eq!(sub.id, FIRE_REPLY_ID);
        assert_eq!(sub.reply_on, ReplyOn::Error);
        match &sub.msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, &lottery.to_string());
                let decoded: AlarmCallbackMsg = from_json(msg).unwrap();
                assert_eq!(
                    decoded,
                    AlarmCallbackMsg::FulfillAlarm {
                        request_id: 5,
                        fired_at: env.block.time,
                    }
                );
            }
            other => panic!("unexpected message {:?}", other),
        }

        let err = fire(deps.as_mut(), env_at(4000), 1).unwrap_err();
        assert!(matches!(err, ContractError::AlarmAlreadyFired { alarm_id: 1 }));

        // The request id is free again once fired
        set_alarm(deps.as_mut(), 5, 3600).unwrap();
    }

    #[test]
    fn test_due_alarms_query() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        set_alarm(deps.as_mut(), 1, 600).unwrap();
        set_alarm(deps.as_mut(), 2, 60).unwrap();
        set_alarm(deps.as_mut(), 3, 7200).unwrap();

        let due: Vec<Alarm> = from_json(
            query(deps.as_ref(), env_at(600), QueryMsg::DueAlarms { limit: None }).unwrap(),
        )
        .unwrap();
        let ids: Vec<u64> = due.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1]);

        fire(deps.as_mut(), env_at(600), 2).unwrap();
        let due: Vec<Alarm> = from_json(
            query(deps.as_ref(), env_at(600), QueryMsg::DueAlarms { limit: None }).unwrap(),
        )
        .unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, 1);
    }

    #[test]
    fn test_failed_callback_is_recorded() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        set_alarm(deps.as_mut(), 5, 60).unwrap();
        fire(deps.as_mut(), env_at(60), 1).unwrap();

        let res = reply(
            deps.as_mut(),
            env_at(60),
            Reply {
                id: FIRE_REPLY_ID,
                payload: to_json_binary(&1u64).unwrap(),
                gas_used: 0,
                result: SubMsgResult::Err("withdraw failed".to_string()),
            },
        )
        .unwrap();
        assert_eq!(res.events[0].ty, "yieldpot_alarm_failed");

        let alarm = ALARMS.load(deps.as_ref().storage, 1).unwrap();
        assert!(matches!(alarm.status, AlarmStatus::Failed { .. }));
        let err = fire(deps.as_mut(), env_at(120), 1).unwrap_err();
        assert!(matches!(err, ContractError::AlarmAlreadyFired { .. }));
    }

    #[test]
    fn test_update_config() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        let admin = deps.api.addr_make("admin");
        let stranger = deps.api.addr_make("stranger");

        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&stranger, &[]),
            ExecuteMsg::UpdateConfig {
                admin: None,
                min_wait_seconds: Some(1),
                max_wait_seconds: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized { .. }));

        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&admin, &[]),
            ExecuteMsg::UpdateConfig {
                admin: None,
                min_wait_seconds: Some(100),
                max_wait_seconds: Some(50),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidWaitBounds { .. }));

        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&admin, &[]),
            ExecuteMsg::UpdateConfig {
                admin: None,
                min_wait_seconds: Some(1),
                max_wait_seconds: None,
            },
        )
        .unwrap();
        assert_eq!(CONFIG.load(deps.as_ref().storage).unwrap().min_wait_seconds, 1);
    }
}
