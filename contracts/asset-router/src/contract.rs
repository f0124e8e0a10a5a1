use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{RouterConfig, CONFIG, VENUES};

const CONTRACT_NAME: &str = "crates.io:yieldpot-asset-router";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    execute::validate_bps("max_slippage_bps", msg.max_slippage_bps)?;

    let config = RouterConfig {
        admin: info.sender.clone(),
        max_slippage_bps: msg.max_slippage_bps,
    };
    CONFIG.save(deps.storage, &config)?;

    for venue in &msg.venues {
        let addr = deps.api.addr_validate(&venue.address)?;
        if VENUES.has(deps.storage, &addr) {
            return Err(ContractError::VenueAlreadyExists {
                address: venue.address.clone(),
            });
        }
        VENUES.save(deps.storage, &addr, &venue.kind)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "asset-router")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("venues", msg.venues.len().to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Convert {
            ask_denom,
            min_receive,
            recipient,
        } => execute::convert(deps, info, ask_denom, min_receive, recipient),
        ExecuteMsg::AddVenue { address, kind } => execute::add_venue(deps, info, address, kind),
        ExecuteMsg::RemoveVenue { address } => execute::remove_venue(deps, info, address),
        ExecuteMsg::UpdateConfig {
            admin,
            max_slippage_bps,
        } => execute::update_config(deps, info, admin, max_slippage_bps),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Venues {} => query::query_venues(deps),
        QueryMsg::BestQuote { offer, ask_denom } => {
            query::query_best_quote(deps, offer, ask_denom)
        }
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
