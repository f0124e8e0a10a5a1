use cosmwasm_std::{
    from_json, to_json_binary, Addr, BankMsg, Coin, Deps, DepsMut, Env, Event, HexBinary,
    MessageInfo, Reply, Response, SubMsg, SubMsgResult, Timestamp, Uint128, WasmMsg,
};
use yieldpot_common::exchange::RouterExecuteMsg;
use yieldpot_common::{randomness_to_index, PayoutPolicy, RoundStatus};

use crate::error::ContractError;
use crate::ledger;
use crate::msg::{ExecuteMsg, UpdateConfigParams};
use crate::requestor::{matches_pending, request_alarm, request_randomness};
use crate::state::{
    LotteryConfig, Round, RoundResult, TicketPurchase, CONFIG, PRICE_FEEDS, PURCHASES, ROUND,
    ROUND_RESULTS, SWAP_CHECKPOINT,
};
use crate::yield_venue::YieldVenueInput;

/// Reply id of the per-purchase conversion sub-messages.
pub const CONVERSION_REPLY_ID: u64 = 1;

const MAX_BPS: u16 = 10_000;

fn validate_bps(field: &str, value: u16) -> Result<(), ContractError> {
    if value > MAX_BPS {
        return Err(ContractError::InvalidBps {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

pub fn validate_payout_policy(policy: &PayoutPolicy) -> Result<(), ContractError> {
    if let PayoutPolicy::PrincipalProtected { winner_yield_bps } = policy {
        validate_bps("winner_yield_bps", *winner_yield_bps)?;
    }
    Ok(())
}

pub fn validate_slippage(value: u16) -> Result<(), ContractError> {
    validate_bps("max_slippage_bps", value)
}

fn ensure_admin(config: &LotteryConfig, sender: &Addr, what: &str) -> Result<(), ContractError> {
    if sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: format!("only admin can {}", what),
        });
    }
    Ok(())
}

fn settlement_balance(deps: Deps, env: &Env, denom: &str) -> Result<Uint128, ContractError> {
    Ok(deps
        .querier
        .query_balance(env.contract.address.to_string(), denom)?
        .amount)
}

fn stale_callback(kind: &str, round: &Round, request_id: u64) -> Response {
    Response::new()
        .add_attribute("action", format!("fulfill_{}", kind))
        .add_attribute("result", "stale_callback")
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("yieldpot_stale_callback")
                .add_attribute("kind", kind)
                .add_attribute("round_id", round.id.to_string())
                .add_attribute("status", round.status.as_str())
                .add_attribute("request_id", request_id.to_string()),
        )
}

// ── Ticket purchases ──

/// Buy as many tickets as the single attached coin pays for.
/// Any remainder below one ticket stays in the pool with the purchase.
pub fn buy_tickets(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if info.funds.len() != 1 {
        return Err(ContractError::InvalidFunds);
    }
    let offered = info.funds[0].clone();
    if offered.amount.is_zero() {
        return Err(ContractError::NoFundsSent);
    }

    let mut round = ROUND.load(deps.storage)?;
    if round.status != RoundStatus::Open {
        return Err(ContractError::invalid_phase(round.id, &round.status));
    }

    let equivalent =
        ledger::settlement_equivalent(deps.as_ref(), &offered, &round.settlement_denom)?;
    let quantity = (equivalent / round.ticket_cost).u128();
    if quantity == 0 {
        return Err(ContractError::InsufficientPayment {
            equivalent,
            ticket_cost: round.ticket_cost,
        });
    }
    let quantity = u64::try_from(quantity).map_err(|_| ContractError::CapExceeded {
        sold: round.total_tickets_sold,
        requested: u64::MAX,
        max_tickets: round.max_tickets,
    })?;

    let within_cap = round
        .total_tickets_sold
        .checked_add(quantity)
        .is_some_and(|total| total <= round.max_tickets);
    if !within_cap {
        return Err(ContractError::CapExceeded {
            sold: round.total_tickets_sold,
            requested: quantity,
            max_tickets: round.max_tickets,
        });
    }

    // Deposits already in the settlement asset need no conversion
    let converted = if offered.denom == round.settlement_denom {
        Some(offered.amount)
    } else {
        None
    };
    let purchase = TicketPurchase {
        owner: info.sender.clone(),
        source_denom: offered.denom.clone(),
        deposited_amount: offered.amount,
        settlement_equivalent: equivalent,
        quantity_tickets: quantity,
        converted,
    };
    let index = ledger::record_purchase(deps.storage, &mut round, &purchase)?;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "buy_tickets")
        .add_attribute("buyer", info.sender.to_string())
        .add_attribute("round_id", round.id.to_string())
        .add_attribute("tickets", quantity.to_string())
        .add_event(
            Event::new("yieldpot_tickets_purchased")
                .add_attribute("round_id", round.id.to_string())
                .add_attribute("buyer", info.sender.to_string())
                .add_attribute("purchase_index", index.to_string())
                .add_attribute("deposit", offered.to_string())
                .add_attribute("settlement_equivalent", equivalent.to_string())
                .add_attribute("tickets", quantity.to_string())
                .add_attribute("total_tickets_sold", round.total_tickets_sold.to_string()),
        ))
}

// ── Draw orchestration ──

/// Lock the round and start moving deposits into the yield venue.
/// Admin or operator. Calling it again on a locked round retries the
/// conversions that have not landed yet.
pub fn send_to_pool(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.operator && info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only operator or admin can send to pool".to_string(),
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    let mut response = Response::new().add_attribute("action", "send_to_pool");

    match round.status {
        RoundStatus::Open => {
            if round.total_tickets_sold == 0 {
                return Err(ContractError::NoTicketsSold { round_id: round.id });
            }
            let unlocks_at = round.opened_at.plus_seconds(config.sales_duration_seconds);
            let sold_out = round.total_tickets_sold == round.max_tickets;
            if env.block.time < unlocks_at && !sold_out {
                return Err(ContractError::LockConditionsNotMet {
                    round_id: round.id,
                    unlocks_at: unlocks_at.seconds(),
                });
            }

            round.status = RoundStatus::Locked;
            round.locked_at = Some(env.block.time);
            ROUND.save(deps.storage, &round)?;

            response = response.add_event(
                Event::new("yieldpot_round_locked")
                    .add_attribute("round_id", round.id.to_string())
                    .add_attribute("total_tickets_sold", round.total_tickets_sold.to_string())
                    .add_attribute("num_purchases", round.num_purchases.to_string()),
            );
        }
        RoundStatus::Locked => {}
        _ => return Err(ContractError::invalid_phase(round.id, &round.status)),
    }

    let pending: Vec<(u32, TicketPurchase)> = ledger::load_purchases(deps.storage, round.id)?
        .into_iter()
        .filter(|(_, p)| p.converted.is_none())
        .collect();

    if pending.is_empty() {
        let deposit = complete_deposit_inner(deps, &env, &config, round)?;
        return Ok(response
            .add_attributes(deposit.attributes)
            .add_submessages(deposit.messages)
            .add_events(deposit.events));
    }

    let checkpoint = settlement_balance(deps.as_ref(), &env, &round.settlement_denom)?;
    SWAP_CHECKPOINT.save(deps.storage, &checkpoint)?;

    let slippage_factor = MAX_BPS - config.max_slippage_bps;
    for (index, purchase) in &pending {
        let min_receive = purchase
            .settlement_equivalent
            .multiply_ratio(slippage_factor, MAX_BPS);
        let convert = WasmMsg::Execute {
            contract_addr: config.asset_router.to_string(),
            msg: to_json_binary(&RouterExecuteMsg::Convert {
                ask_denom: round.settlement_denom.clone(),
                min_receive,
                recipient: Some(env.contract.address.to_string()),
            })?,
            funds: vec![Coin {
                denom: purchase.source_denom.clone(),
                amount: purchase.deposited_amount,
            }],
        };
        response = response.add_submessage(
            SubMsg::reply_always(convert, CONVERSION_REPLY_ID).with_payload(to_json_binary(index)?),
        );
    }

    // Runs after every conversion reply has been processed
    let finish = WasmMsg::Execute {
        contract_addr: env.contract.address.to_string(),
        msg: to_json_binary(&ExecuteMsg::CompleteDeposit {})?,
        funds: vec![],
    };

    Ok(response
        .add_message(finish)
        .add_attribute("round_id", round.id.to_string())
        .add_attribute("conversions", pending.len().to_string()))
}

/// Record the outcome of one conversion sub-message.
pub fn handle_conversion_reply(
    deps: DepsMut,
    env: Env,
    msg: Reply,
) -> Result<Response, ContractError> {
    let index: u32 = from_json(&msg.payload)?;
    let round = ROUND.load(deps.storage)?;

    match msg.result {
        SubMsgResult::Ok(_) => {
            let balance = settlement_balance(deps.as_ref(), &env, &round.settlement_denom)?;
            let checkpoint = SWAP_CHECKPOINT.may_load(deps.storage)?.unwrap_or_default();
            let received = balance.saturating_sub(checkpoint);
            SWAP_CHECKPOINT.save(deps.storage, &balance)?;

            let mut purchase = PURCHASES.load(deps.storage, (round.id, index))?;
            purchase.converted = Some(received);
            PURCHASES.save(deps.storage, (round.id, index), &purchase)?;

            Ok(Response::new()
                .add_attribute("action", "conversion_reply")
                .add_attribute("purchase_index", index.to_string())
                .add_attribute("received", received.to_string())
                .add_event(
                    Event::new("yieldpot_conversion_ok")
                        .add_attribute("round_id", round.id.to_string())
                        .add_attribute("purchase_index", index.to_string())
                        .add_attribute("source_denom", purchase.source_denom)
                        .add_attribute("deposited", purchase.deposited_amount.to_string())
                        .add_attribute("received", received.to_string()),
                ))
        }
        SubMsgResult::Err(err) => Ok(Response::new()
            .add_attribute("action", "conversion_reply")
            .add_attribute("purchase_index", index.to_string())
            .add_event(
                Event::new("yieldpot_conversion_failed")
                    .add_attribute("round_id", round.id.to_string())
                    .add_attribute("purchase_index", index.to_string())
                    .add_attribute("error", err),
            )),
    }
}

/// Deposit the converted principal and schedule the draw.
pub fn complete_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != env.contract.address
        && info.sender != config.admin
        && info.sender != config.operator
    {
        return Err(ContractError::Unauthorized {
            reason: "only the lottery, operator or admin can complete a deposit".to_string(),
        });
    }

    let round = ROUND.load(deps.storage)?;
    if round.status != RoundStatus::Locked {
        return Err(ContractError::invalid_phase(round.id, &round.status));
    }

    complete_deposit_inner(deps, &env, &config, round)
}

fn complete_deposit_inner(
    deps: DepsMut,
    env: &Env,
    config: &LotteryConfig,
    mut round: Round,
) -> Result<Response, ContractError> {
    let purchases = ledger::load_purchases(deps.storage, round.id)?;
    let unconverted = purchases
        .iter()
        .filter(|(_, p)| p.converted.is_none())
        .count();
    if unconverted > 0 {
        return Ok(Response::new()
            .add_attribute("action", "complete_deposit")
            .add_attribute("round_id", round.id.to_string())
            .add_attribute("pending_conversions", unconverted.to_string()));
    }

    let principal: Uint128 = purchases
        .iter()
        .map(|(_, p)| p.converted.unwrap_or_default())
        .sum();
    let available = settlement_balance(deps.as_ref(), env, &round.settlement_denom)?;
    if available < principal {
        return Err(ContractError::InsufficientPool {
            needed: principal.to_string(),
            available: available.to_string(),
        });
    }

    let venue = config.yield_venue.clone();
    let source = venue.source();
    let mut response = Response::new();
    if !principal.is_zero() {
        response = response.add_message(source.deposit(
            Coin {
                denom: round.settlement_denom.clone(),
                amount: principal,
            },
            &env.contract.address,
        )?);
    }

    round.principal = principal;
    round.venue = Some(venue.clone());
    let alarm_msg = request_alarm(deps.storage, env, config, &mut round)?;
    round.status = RoundStatus::AwaitingAlarm;
    SWAP_CHECKPOINT.remove(deps.storage);
    ROUND.save(deps.storage, &round)?;

    let alarm_id = round
        .pending_alarm
        .as_ref()
        .map(|p| p.request_id)
        .unwrap_or_default();

    Ok(response
        .add_message(alarm_msg)
        .add_attribute("action", "complete_deposit")
        .add_attribute("round_id", round.id.to_string())
        .add_attribute("principal", principal.to_string())
        .add_event(
            Event::new("yieldpot_deposited")
                .add_attribute("round_id", round.id.to_string())
                .add_attribute("venue_kind", venue.kind())
                .add_attribute("venue", source.address().to_string())
                .add_attribute("principal", principal.to_string())
                .add_attribute("settlement_denom", round.settlement_denom.clone()),
        )
        .add_event(
            Event::new("yieldpot_alarm_requested")
                .add_attribute("round_id", round.id.to_string())
                .add_attribute("request_id", alarm_id.to_string())
                .add_attribute("wait_seconds", config.draw_duration_seconds.to_string()),
        ))
}

/// Alarm fired: pull principal plus yield out of the venue and ask for randomness.
pub fn fulfill_alarm(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    fired_at: Timestamp,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.alarm_clock {
        return Err(ContractError::Unauthorized {
            reason: "only the alarm clock can fulfill alarms".to_string(),
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    if round.status != RoundStatus::AwaitingAlarm
        || !matches_pending(&round.pending_alarm, request_id)
    {
        return Ok(stale_callback("alarm", &round, request_id));
    }

    let venue = round.venue.clone().unwrap_or_else(|| config.yield_venue.clone());
    let source = venue.source();
    let withdrawn = source.balance_of_underlying(
        &deps.querier,
        &env.contract.address,
        &round.settlement_denom,
    )?;

    let mut response = Response::new();
    if !withdrawn.is_zero() {
        response = response.add_message(source.withdraw(
            &round.settlement_denom,
            withdrawn,
            &env.contract.address,
        )?);
    }

    round.withdrawn = withdrawn;
    round.pending_alarm = None;
    let randomness_msg = request_randomness(deps.storage, &env, &config, &mut round)?;
    round.status = RoundStatus::AwaitingRandomness;
    ROUND.save(deps.storage, &round)?;

    let randomness_id = round
        .pending_randomness
        .as_ref()
        .map(|p| p.request_id)
        .unwrap_or_default();

    Ok(response
        .add_message(randomness_msg)
        .add_attribute("action", "fulfill_alarm")
        .add_attribute("round_id", round.id.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("withdrawn", withdrawn.to_string())
        .add_event(
            Event::new("yieldpot_withdrawn")
                .add_attribute("round_id", round.id.to_string())
                .add_attribute("fired_at", fired_at.seconds().to_string())
                .add_attribute("principal", round.principal.to_string())
                .add_attribute("withdrawn", withdrawn.to_string()),
        )
        .add_event(
            Event::new("yieldpot_randomness_requested")
                .add_attribute("round_id", round.id.to_string())
                .add_attribute("request_id", randomness_id.to_string()),
        ))
}

/// Randomness landed: fix the winning ticket and settle the round.
pub fn fulfill_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    randomness: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.randomness_oracle {
        return Err(ContractError::Unauthorized {
            reason: "only the randomness oracle can fulfill randomness".to_string(),
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    if round.status != RoundStatus::AwaitingRandomness
        || !matches_pending(&round.pending_randomness, request_id)
    {
        return Ok(stale_callback("randomness", &round, request_id));
    }

    let random_result = randomness_to_index(randomness.as_slice(), round.total_tickets_sold)
        .ok_or(ContractError::InvalidRandomness {
            len: randomness.len(),
        })?;

    round.random_result = Some(random_result);
    round.pending_randomness = None;
    round.status = RoundStatus::Settling;
    ROUND.save(deps.storage, &round)?;

    let response = settle(deps, &env, &config, round)?;
    Ok(response
        .add_attribute("action", "fulfill_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("random_result", random_result.to_string()))
}

/// Pick the winner, pay out and open the next round.
fn settle(
    deps: DepsMut,
    env: &Env,
    config: &LotteryConfig,
    round: Round,
) -> Result<Response, ContractError> {
    let random_result = round.random_result.unwrap_or_default();
    let purchases: Vec<TicketPurchase> = ledger::load_purchases(deps.storage, round.id)?
        .into_iter()
        .map(|(_, p)| p)
        .collect();

    let winner_idx = ledger::select_winner(&purchases, random_result)
        .ok_or(ContractError::NoWinner { random_result })?;
    let winner = purchases[winner_idx].owner.clone();

    let available = settlement_balance(deps.as_ref(), env, &round.settlement_denom)?;
    if available < round.withdrawn {
        return Err(ContractError::InsufficientPool {
            needed: round.withdrawn.to_string(),
            available: available.to_string(),
        });
    }

    let payouts = ledger::compute_payouts(
        &config.payout_policy,
        &purchases,
        winner_idx,
        round.principal,
        round.withdrawn,
    );
    let winner_payout = payouts
        .iter()
        .find(|(addr, _)| *addr == winner)
        .map(|(_, amount)| *amount)
        .unwrap_or_default();

    let mut response = Response::new();
    for (recipient, amount) in &payouts {
        response = response.add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![Coin {
                denom: round.settlement_denom.clone(),
                amount: *amount,
            }],
        });
    }

    let result = RoundResult {
        round_id: round.id,
        winner: winner.clone(),
        winner_payout,
        random_result,
        total_tickets: round.total_tickets_sold,
        settlement_denom: round.settlement_denom.clone(),
        principal: round.principal,
        withdrawn: round.withdrawn,
        payout_policy: config.payout_policy.clone(),
        settled_at: env.block.time,
    };
    ROUND_RESULTS.save(deps.storage, round.id, &result)?;

    ledger::clear_round(deps.storage, round.id)?;
    let next = round.next(env.block.time);
    ROUND.save(deps.storage, &next)?;

    Ok(response
        .add_attribute("round_id", round.id.to_string())
        .add_attribute("winner", winner.to_string())
        .add_attribute("winner_payout", winner_payout.to_string())
        .add_event(
            Event::new("yieldpot_draw_result")
                .add_attribute("round_id", round.id.to_string())
                .add_attribute("winner", winner.to_string())
                .add_attribute("random_result", random_result.to_string())
                .add_attribute("total_tickets", round.total_tickets_sold.to_string())
                .add_attribute("principal", round.principal.to_string())
                .add_attribute("withdrawn", round.withdrawn.to_string())
                .add_attribute("winner_payout", winner_payout.to_string())
                .add_attribute("payouts", payouts.len().to_string()),
        )
        .add_event(
            Event::new("yieldpot_round_opened")
                .add_attribute("round_id", next.id.to_string())
                .add_attribute("ticket_cost", next.ticket_cost.to_string())
                .add_attribute("max_tickets", next.max_tickets.to_string()),
        ))
}

// ── Admin ──

fn load_open_round(deps: Deps) -> Result<Round, ContractError> {
    let round = ROUND.load(deps.storage)?;
    if round.status != RoundStatus::Open {
        return Err(ContractError::invalid_phase(round.id, &round.status));
    }
    Ok(round)
}

pub fn set_ticket_cost(
    deps: DepsMut,
    info: MessageInfo,
    ticket_cost: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "set ticket cost")?;
    if ticket_cost.is_zero() {
        return Err(ContractError::InvalidTicketCost);
    }

    let mut round = load_open_round(deps.as_ref())?;
    round.ticket_cost = ticket_cost;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "set_ticket_cost")
        .add_attribute("ticket_cost", ticket_cost.to_string()))
}

pub fn set_max_tickets(
    deps: DepsMut,
    info: MessageInfo,
    max_tickets: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "set max tickets")?;

    let mut round = load_open_round(deps.as_ref())?;
    if max_tickets == 0 || max_tickets < round.total_tickets_sold {
        return Err(ContractError::InvalidMaxTickets {
            max_tickets,
            sold: round.total_tickets_sold,
        });
    }
    round.max_tickets = max_tickets;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "set_max_tickets")
        .add_attribute("max_tickets", max_tickets.to_string()))
}

/// Takes effect for the next deposit; a running draw keeps its snapshot.
pub fn set_yield_venue(
    deps: DepsMut,
    info: MessageInfo,
    venue: YieldVenueInput,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "set yield venue")?;
    load_open_round(deps.as_ref())?;

    config.yield_venue = venue.validate(deps.api)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_yield_venue")
        .add_attribute("kind", config.yield_venue.kind())
        .add_attribute("venue", config.yield_venue.source().address().to_string()))
}

pub fn set_settlement_denom(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "set settlement denom")?;

    let mut round = load_open_round(deps.as_ref())?;
    if round.num_purchases > 0 {
        return Err(ContractError::invalid_phase(round.id, &round.status));
    }
    round.settlement_denom = denom.clone();
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "set_settlement_denom")
        .add_attribute("denom", denom))
}

pub fn set_price_feed(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    feed: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "set price feeds")?;

    let feed = deps.api.addr_validate(&feed)?;
    PRICE_FEEDS.save(deps.storage, &denom, &feed)?;

    Ok(Response::new()
        .add_attribute("action", "set_price_feed")
        .add_attribute("denom", denom)
        .add_attribute("feed", feed.to_string()))
}

pub fn remove_price_feed(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "remove price feeds")?;

    PRICE_FEEDS.remove(deps.storage, &denom);

    Ok(Response::new()
        .add_attribute("action", "remove_price_feed")
        .add_attribute("denom", denom))
}

pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    params: UpdateConfigParams,
) -> Result<Response, ContractError> {
    let UpdateConfigParams {
        admin,
        operator,
        asset_router,
        randomness_oracle,
        alarm_clock,
        sales_duration_seconds,
        draw_duration_seconds,
        max_slippage_bps,
        payout_policy,
    } = params;

    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "update config")?;

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(operator) = operator {
        config.operator = deps.api.addr_validate(&operator)?;
    }
    if let Some(router) = asset_router {
        config.asset_router = deps.api.addr_validate(&router)?;
    }
    if let Some(oracle) = randomness_oracle {
        config.randomness_oracle = deps.api.addr_validate(&oracle)?;
    }
    if let Some(clock) = alarm_clock {
        config.alarm_clock = deps.api.addr_validate(&clock)?;
    }
    if let Some(secs) = sales_duration_seconds {
        config.sales_duration_seconds = secs;
    }
    if let Some(secs) = draw_duration_seconds {
        config.draw_duration_seconds = secs;
    }
    if let Some(bps) = max_slippage_bps {
        validate_slippage(bps)?;
        config.max_slippage_bps = bps;
    }
    if let Some(policy) = payout_policy {
        validate_payout_policy(&policy)?;
        config.payout_policy = policy;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
