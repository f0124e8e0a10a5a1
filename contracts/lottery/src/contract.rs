use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute::{self, CONVERSION_REPLY_ID};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, UpdateConfigParams};
use crate::query;
use crate::state::{LotteryConfig, Round, CONFIG, NEXT_REQUEST_ID, ROUND};

const CONTRACT_NAME: &str = "crates.io:yieldpot-lottery";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.ticket_cost.is_zero() {
        return Err(ContractError::InvalidTicketCost);
    }
    if msg.max_tickets == 0 {
        return Err(ContractError::InvalidMaxTickets {
            max_tickets: 0,
            sold: 0,
        });
    }
    execute::validate_slippage(msg.max_slippage_bps)?;
    execute::validate_payout_policy(&msg.payout_policy)?;

    let config = LotteryConfig {
        admin: info.sender.clone(),
        operator: deps.api.addr_validate(&msg.operator)?,
        asset_router: deps.api.addr_validate(&msg.asset_router)?,
        randomness_oracle: deps.api.addr_validate(&msg.randomness_oracle)?,
        alarm_clock: deps.api.addr_validate(&msg.alarm_clock)?,
        yield_venue: msg.yield_venue.validate(deps.api)?,
        sales_duration_seconds: msg.sales_duration_seconds,
        draw_duration_seconds: msg.draw_duration_seconds,
        max_slippage_bps: msg.max_slippage_bps,
        payout_policy: msg.payout_policy,
    };
    CONFIG.save(deps.storage, &config)?;

    let round = Round::open(
        1,
        msg.ticket_cost,
        msg.max_tickets,
        msg.settlement_denom.clone(),
        env.block.time,
    );
    ROUND.save(deps.storage, &round)?;
    NEXT_REQUEST_ID.save(deps.storage, &1u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "lottery")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("settlement_denom", msg.settlement_denom)
        .add_attribute("ticket_cost", msg.ticket_cost.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::BuyTickets {} => execute::buy_tickets(deps, env, info),
        ExecuteMsg::SendToPool {} => execute::send_to_pool(deps, env, info),
        ExecuteMsg::CompleteDeposit {} => execute::complete_deposit(deps, env, info),
        ExecuteMsg::FulfillAlarm {
            request_id,
            fired_at,
        } => execute::fulfill_alarm(deps, env, info, request_id, fired_at),
        ExecuteMsg::FulfillRandomness {
            request_id,
            randomness,
        } => execute::fulfill_randomness(deps, env, info, request_id, randomness),
        ExecuteMsg::SetTicketCost { ticket_cost } => {
            execute::set_ticket_cost(deps, info, ticket_cost)
        }
        ExecuteMsg::SetMaxTickets { max_tickets } => {
            execute::set_max_tickets(deps, info, max_tickets)
        }
        ExecuteMsg::SetYieldVenue { venue } => execute::set_yield_venue(deps, info, venue),
        ExecuteMsg::SetSettlementDenom { denom } => {
            execute::set_settlement_denom(deps, info, denom)
        }
        ExecuteMsg::SetPriceFeed { denom, feed } => execute::set_price_feed(deps, info, denom, feed),
        ExecuteMsg::RemovePriceFeed { denom } => execute::remove_price_feed(deps, info, denom),
        ExecuteMsg::UpdateConfig {
            admin,
            operator,
            asset_router,
            randomness_oracle,
            alarm_clock,
            sales_duration_seconds,
            draw_duration_seconds,
            max_slippage_bps,
            payout_policy,
        } => execute::update_config(
            deps,
            info,
            UpdateConfigParams {
                admin,
                operator,
                asset_router,
                randomness_oracle,
                alarm_clock,
                sales_duration_seconds,
                draw_duration_seconds,
                max_slippage_bps,
                payout_policy,
            },
        ),
    }
}

#[entry_point]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        CONVERSION_REPLY_ID => execute::handle_conversion_reply(deps, env, msg),
        id => Err(ContractError::UnknownReply { id }),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Round {} => query::query_round(deps),
        QueryMsg::Players { start_after, limit } => {
            query::query_players(deps, start_after, limit)
        }
        QueryMsg::TicketsFor { address } => query::query_tickets_for(deps, address),
        QueryMsg::PriceFeeds {} => query::query_price_feeds(deps),
        QueryMsg::RoundResult { round_id } => query::query_round_result(deps, round_id),
        QueryMsg::RoundHistory { start_after, limit } => {
            query::query_round_history(deps, start_after, limit)
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
