//! Cross-contract tests for the yieldpot lottery.
//!
//! Each contract runs against its own `cosmwasm_std::testing` mocks. A round
//! is driven end to end by taking the messages one contract emits and feeding
//! them into the entry points of the contract they address, so every wire
//! format between lottery, router, alarm clock and randomness oracle is
//! exercised through real serialization.
//!
//! Run:
//! ```bash
//! cargo test -p yieldpot-integration-tests
//! ```

use cosmwasm_std::testing::{
    message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage,
};
use cosmwasm_std::{
    coin, coins, from_json, to_json_binary, Addr, BankMsg, Binary, Coin, ContractResult,
    CosmosMsg, Decimal, Env, OwnedDeps, Reply, ReplyOn, SubMsg, SubMsgResponse, SubMsgResult,
    SystemError, SystemResult, Timestamp, Uint128, WasmMsg, WasmQuery,
};
use yieldpot_common::exchange::{PairExecuteMsg, PairQueryMsg, SimulationResponse, VenueKind};
use yieldpot_common::lending::{MoneyMarketExecuteMsg, UnderlyingBalanceResponse};
use yieldpot_common::price_feed::PriceResponse;
use yieldpot_common::{randomness_to_index, PayoutPolicy, RoundStatus};

type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

// ─── Constants ───

/// Real drand quicknet public key
const QUICKNET_PK_HEX: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";

/// Real quicknet test vector: round 1000
const TEST_ROUND: u64 = 1000;
const TEST_SIG_HEX: &str = "b44679b9a59af2ec876b1a6b1ad52ea9b1615fc3982b19576350f93447cb1125e342b73a8dd2bacbe47e4b6b63ed5e39";

const SALES_SECONDS: u64 = 3600;
const DRAW_SECONDS: u64 = 86_400;

// ─── Helpers ───

fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

fn env_at(offset: u64) -> Env {
    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(offset);
    env
}

fn env_for(contract: &str, offset: u64) -> Env {
    let mut env = env_at(offset);
    env.contract.address = addr(contract);
    env
}

/// Unpack a wasm execute carried by a sub-message.
fn wasm_execute(sub: &SubMsg) -> (String, Binary, Vec<Coin>) {
    match &sub.msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr,
            msg,
            funds,
        }) => (contract_addr.clone(), msg.clone(), funds.clone()),
        other => panic!("expected wasm execute, got {:?}", other),
    }
}

fn bank_sends(messages: &[SubMsg]) -> Vec<(String, Uint128)> {
    messages
        .iter()
        .filter_map(|sub| match &sub.msg {
            CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
                Some((to_address.clone(), amount[0].amount))
            }
            _ => None,
        })
        .collect()
}

#[allow(deprecated)]
fn ok_reply(id: u64, payload: Binary) -> Reply {
    Reply {
        id,
        payload,
        gas_used: 0,
        result: SubMsgResult::Ok(SubMsgResponse {
            events: vec![],
            data: None,
            msg_responses: vec![],
        }),
    }
}

// ─── Lottery helpers ───

fn lottery_instantiate_msg(policy: PayoutPolicy) -> yieldpot_lottery::msg::InstantiateMsg {
    yieldpot_lottery::msg::InstantiateMsg {
        operator: addr("operator").to_string(),
        asset_router: addr("router").to_string(),
        randomness_oracle: addr("randomness_oracle").to_string(),
        alarm_clock: addr("alarm_clock").to_string(),
        yield_venue: yieldpot_lottery::yield_venue::YieldVenueInput::MoneyMarket {
            address: addr("market").to_string(),
        },
        settlement_denom: "uusd".to_string(),
        ticket_cost: Uint128::new(3),
        max_tickets: 1000,
        sales_duration_seconds: SALES_SECONDS,
        draw_duration_seconds: DRAW_SECONDS,
        max_slippage_bps: 300,
        payout_policy: policy,
    }
}

/// Price feed quoting 1 uatom = 2 uusd, and a money market reporting `underlying`.
fn mock_lottery_externals(deps: &mut MockDeps, underlying: u128) {
    let feed = addr("atom_feed").to_string();
    let market = addr("market").to_string();
    deps.querier.update_wasm(move |query| match query {
        WasmQuery::Smart { contract_addr, .. } if *contract_addr == feed => {
            SystemResult::Ok(ContractResult::Ok(
                to_json_binary(&PriceResponse {
                    price: Decimal::from_ratio(2u128, 1u128),
                    updated_at: Timestamp::from_seconds(0),
                })
                .unwrap(),
            ))
        }
        WasmQuery::Smart { contract_addr, .. } if *contract_addr == market => {
            SystemResult::Ok(ContractResult::Ok(
                to_json_binary(&UnderlyingBalanceResponse {
                    denom: "uusd".to_string(),
                    amount: Uint128::new(underlying),
                })
                .unwrap(),
            ))
        }
        _ => SystemResult::Err(SystemError::NoSuchContract {
            addr: "unknown".to_string(),
        }),
    });
}

fn setup_lottery(deps: &mut MockDeps, policy: PayoutPolicy) {
    let admin = addr("admin");
    yieldpot_lottery::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        lottery_instantiate_msg(policy),
    )
    .unwrap();
    yieldpot_lottery::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        yieldpot_lottery::msg::ExecuteMsg::SetPriceFeed {
            denom: "uatom".to_string(),
            feed: addr("atom_feed").to_string(),
        },
    )
    .unwrap();
    mock_lottery_externals(deps, 0);
}

fn buy(deps: &mut MockDeps, who: &str, funds: &[Coin]) {
    yieldpot_lottery::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&addr(who), funds),
        yieldpot_lottery::msg::ExecuteMsg::BuyTickets {},
    )
    .unwrap();
}

fn lottery_round(deps: &MockDeps) -> yieldpot_lottery::state::Round {
    from_json(
        yieldpot_lottery::contract::query(
            deps.as_ref(),
            mock_env(),
            yieldpot_lottery::msg::QueryMsg::Round {},
        )
        .unwrap(),
    )
    .unwrap()
}

// ─── Router helpers ───

/// Router with a single pair paying 2 uusd per uatom.
fn setup_router() -> MockDeps {
    let mut deps = mock_dependencies();
    yieldpot_asset_router::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&addr("admin"), &[]),
        yieldpot_asset_router::msg::InstantiateMsg {
            max_slippage_bps: 300,
            venues: vec![yieldpot_asset_router::msg::VenueEntry {
                address: addr("pair").to_string(),
                kind: VenueKind::Pair,
            }],
        },
    )
    .unwrap();

    let pair = addr("pair").to_string();
    deps.querier.update_wasm(move |query| match query {
        WasmQuery::Smart { contract_addr, msg } if *contract_addr == pair => {
            let PairQueryMsg::Simulation { offer, .. } = from_json(msg).unwrap();
            SystemResult::Ok(ContractResult::Ok(
                to_json_binary(&SimulationResponse {
                    return_amount: offer.amount * Uint128::new(2),
                })
                .unwrap(),
            ))
        }
        _ => SystemResult::Err(SystemError::Unknown {}),
    });
    deps
}

// ─── Alarm clock helpers ───

fn setup_alarm_clock() -> MockDeps {
    let mut deps = mock_dependencies();
    yieldpot_alarm_clock::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&addr("admin"), &[]),
        yieldpot_alarm_clock::msg::InstantiateMsg {
            min_wait_seconds: 60,
            max_wait_seconds: 7 * DRAW_SECONDS,
        },
    )
    .unwrap();
    deps
}

// ─── Oracle helpers ───

fn setup_oracle() -> MockDeps {
    let mut deps = mock_dependencies();
    yieldpot_randomness_oracle::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&addr("admin"), &[]),
        yieldpot_randomness_oracle::msg::InstantiateMsg {
            operators: vec![addr("beacon_operator").to_string()],
            quicknet_pubkey_hex: QUICKNET_PK_HEX.to_string(),
            chain_hash: "52db9ba70e0cc0f6eaf7803dd07447a1f5477735fd3f661792ba94600c84e971"
                .to_string(),
            genesis_time: 1692803367,
            period_seconds: 3,
            safety_margin_seconds: 30,
        },
    )
    .unwrap();
    deps
}

// ─── Round driver ───

struct RoundOutcome {
    lottery: MockDeps,
    randomness: Vec<u8>,
    payouts: Vec<(String, Uint128)>,
}

/// Alice buys 200 tickets with 600 uusd, Bob 50 tickets with 75 uatom. The
/// uatom converts to 152 uusd, the market grows the 752 principal to 800.
fn play_round(policy: PayoutPolicy) -> RoundOutcome {
    let mut lottery = mock_dependencies();
    let mut router = setup_router();
    let mut alarm_clock = setup_alarm_clock();
    let mut oracle = setup_oracle();
    setup_lottery(&mut lottery, policy);

    let lottery_addr = mock_env().contract.address;
    let operator = addr("operator");

    // 1. Sales
    buy(&mut lottery, "alice", &coins(600, "uusd"));
    buy(&mut lottery, "bob", &coins(75, "uatom"));
    lottery
        .querier
        .bank
        .update_balance(&lottery_addr, vec![coin(600, "uusd"), coin(75, "uatom")]);

    // 2. Lock and dispatch Bob's conversion to the router
    let env = env_at(SALES_SECONDS);
    let res = yieldpot_lottery::contract::execute(
        lottery.as_mut(),
        env.clone(),
        message_info(&operator, &[]),
        yieldpot_lottery::msg::ExecuteMsg::SendToPool {},
    )
    .unwrap();
    assert_eq!(res.messages.len(), 2);
    assert_eq!(res.messages[0].reply_on, ReplyOn::Always);

    let (router_addr, convert_msg, funds) = wasm_execute(&res.messages[0]);
    assert_eq!(router_addr, addr("router").to_string());
    assert_eq!(funds, coins(75, "uatom"));

    let routed = yieldpot_asset_router::contract::execute(
        router.as_mut(),
        env_for("router", SALES_SECONDS),
        message_info(&lottery_addr, &funds),
        from_json(&convert_msg).unwrap(),
    )
    .unwrap();
    let (pair_addr, swap_msg, swap_funds) = wasm_execute(&routed.messages[0]);
    assert_eq!(pair_addr, addr("pair").to_string());
    assert_eq!(swap_funds, coins(75, "uatom"));
    assert_eq!(
        from_json::<PairExecuteMsg>(&swap_msg).unwrap(),
        PairExecuteMsg::Swap {
            ask_denom: "uusd".to_string(),
            min_return: Uint128::new(145),
            to: lottery_addr.to_string(),
        }
    );

    // The pair fills slightly above the floor
    lottery
        .querier
        .bank
        .update_balance(&lottery_addr, coins(752, "uusd"));
    yieldpot_lottery::contract::reply(
        lottery.as_mut(),
        env.clone(),
        ok_reply(res.messages[0].id, res.messages[0].payload.clone()),
    )
    .unwrap();

    // 3. Self-dispatched deposit
    let (self_addr, complete_msg, _) = wasm_execute(&res.messages[1]);
    assert_eq!(self_addr, lottery_addr.to_string());
    let res = yieldpot_lottery::contract::execute(
        lottery.as_mut(),
        env,
        message_info(&lottery_addr, &[]),
        from_json(&complete_msg).unwrap(),
    )
    .unwrap();
    assert_eq!(res.messages.len(), 2);
    let (market_addr, supply_msg, supplied) = wasm_execute(&res.messages[0]);
    assert_eq!(market_addr, addr("market").to_string());
    assert_eq!(supplied, coins(752, "uusd"));
    assert!(matches!(
        from_json::<MoneyMarketExecuteMsg>(&supply_msg).unwrap(),
        MoneyMarketExecuteMsg::Supply { .. }
    ));
    lottery.querier.bank.update_balance(&lottery_addr, vec![]);

    // 4. The alarm clock schedules the draw
    let (clock_addr, set_alarm_msg, _) = wasm_execute(&res.messages[1]);
    assert_eq!(clock_addr, addr("alarm_clock").to_string());
    yieldpot_alarm_clock::contract::execute(
        alarm_clock.as_mut(),
        env_for("alarm_clock", SALES_SECONDS),
        message_info(&lottery_addr, &[]),
        from_json(&set_alarm_msg).unwrap(),
    )
    .unwrap();
    assert_eq!(lottery_round(&lottery).status, RoundStatus::AwaitingAlarm);

    let due_at = SALES_SECONDS + DRAW_SECONDS;
    let keeper = addr("keeper");
    let err = yieldpot_alarm_clock::contract::execute(
        alarm_clock.as_mut(),
        env_for("alarm_clock", due_at - 1),
        message_info(&keeper, &[]),
        yieldpot_alarm_clock::msg::ExecuteMsg::Fire { alarm_id: 1 },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        yieldpot_alarm_clock::ContractError::AlarmNotDue { .. }
    ));

    let fired = yieldpot_alarm_clock::contract::execute(
        alarm_clock.as_mut(),
        env_for("alarm_clock", due_at),
        message_info(&keeper, &[]),
        yieldpot_alarm_clock::msg::ExecuteMsg::Fire { alarm_id: 1 },
    )
    .unwrap();

    // 5. Alarm callback withdraws and asks for randomness
    mock_lottery_externals(&mut lottery, 800);
    let (target, fulfill_alarm, _) = wasm_execute(&fired.messages[0]);
    assert_eq!(target, lottery_addr.to_string());
    let res = yieldpot_lottery::contract::execute(
        lottery.as_mut(),
        env_at(due_at),
        message_info(&addr("alarm_clock"), &[]),
        from_json(&fulfill_alarm).unwrap(),
    )
    .unwrap();
    assert_eq!(res.messages.len(), 2);
    let (_, withdraw_msg, _) = wasm_execute(&res.messages[0]);
    assert_eq!(
        from_json::<MoneyMarketExecuteMsg>(&withdraw_msg).unwrap(),
        MoneyMarketExecuteMsg::Withdraw {
            denom: "uusd".to_string(),
            amount: Uint128::new(800),
            to: Some(lottery_addr.to_string()),
        }
    );
    lottery
        .querier
        .bank
        .update_balance(&lottery_addr, coins(800, "uusd"));

    // 6. Oracle job, fulfilled by a verified beacon
    let (oracle_addr, request_msg, _) = wasm_execute(&res.messages[1]);
    assert_eq!(oracle_addr, addr("randomness_oracle").to_string());
    yieldpot_randomness_oracle::contract::execute(
        oracle.as_mut(),
        env_for("randomness_oracle", due_at),
        message_info(&lottery_addr, &[]),
        from_json(&request_msg).unwrap(),
    )
    .unwrap();

    let submitted = yieldpot_randomness_oracle::contract::execute(
        oracle.as_mut(),
        env_for("randomness_oracle", due_at),
        message_info(&addr("beacon_operator"), &[]),
        yieldpot_randomness_oracle::msg::ExecuteMsg::SubmitBeacon {
            round: TEST_ROUND,
            signature_hex: TEST_SIG_HEX.to_string(),
        },
    )
    .unwrap();
    assert_eq!(submitted.messages.len(), 1);
    let (target, fulfill_randomness, _) = wasm_execute(&submitted.messages[0]);
    assert_eq!(target, lottery_addr.to_string());

    let randomness = match from_json::<yieldpot_lottery::msg::ExecuteMsg>(&fulfill_randomness)
        .unwrap()
    {
        yieldpot_lottery::msg::ExecuteMsg::FulfillRandomness { randomness, .. } => {
            randomness.to_vec()
        }
        other => panic!("unexpected callback {:?}", other),
    };

    // 7. Settlement
    let res = yieldpot_lottery::contract::execute(
        lottery.as_mut(),
        env_at(due_at),
        message_info(&addr("randomness_oracle"), &[]),
        from_json(&fulfill_randomness).unwrap(),
    )
    .unwrap();

    RoundOutcome {
        payouts: bank_sends(&res.messages),
        lottery,
        randomness,
    }
}

/// Alice holds tickets [0, 200), Bob [200, 250).
fn expected_winner(randomness: &[u8]) -> (&'static str, &'static str) {
    let index = randomness_to_index(randomness, 250).unwrap();
    if index < 200 {
        ("alice", "bob")
    } else {
        ("bob", "alice")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_round_winner_takes_all() {
    let outcome = play_round(PayoutPolicy::WinnerTakesAll);
    let (winner, _) = expected_winner(&outcome.randomness);

    assert_eq!(
        outcome.payouts,
        vec![(addr(winner).to_string(), Uint128::new(800))]
    );

    let result: Option<yieldpot_lottery::state::RoundResult> = from_json(
        yieldpot_lottery::contract::query(
            outcome.lottery.as_ref(),
            mock_env(),
            yieldpot_lottery::msg::QueryMsg::RoundResult { round_id: 1 },
        )
        .unwrap(),
    )
    .unwrap();
    let result = result.unwrap();
    assert_eq!(result.winner, addr(winner));
    assert_eq!(result.principal, Uint128::new(752));
    assert_eq!(result.withdrawn, Uint128::new(800));
    assert_eq!(result.total_tickets, 250);

    let round = lottery_round(&outcome.lottery);
    assert_eq!(round.id, 2);
    assert_eq!(round.status, RoundStatus::Open);
    assert_eq!(round.total_tickets_sold, 0);
    assert_eq!(round.random_result, None);
}

#[test]
fn test_full_round_principal_protected() {
    let outcome = play_round(PayoutPolicy::PrincipalProtected {
        winner_yield_bps: 10_000,
    });
    let (winner, loser) = expected_winner(&outcome.randomness);
    let refund = |who: &str| if who == "alice" { 600u128 } else { 152u128 };

    let paid = |who: &str| {
        outcome
            .payouts
            .iter()
            .find(|(to, _)| *to == addr(who).to_string())
            .map(|(_, amount)| amount.u128())
            .unwrap_or_default()
    };

    // The whole 48 uusd of yield goes to the winner, principal goes home
    assert_eq!(paid(loser), refund(loser));
    assert_eq!(paid(winner), refund(winner) + 48);
    let total: u128 = outcome.payouts.iter().map(|(_, a)| a.u128()).sum();
    assert_eq!(total, 800);
}

#[test]
fn test_late_callbacks_after_settlement_are_ignored() {
    let mut outcome = play_round(PayoutPolicy::WinnerTakesAll);

    // Replays of both callbacks for round 1 hit a fresh open round
    let res = yieldpot_lottery::contract::execute(
        outcome.lottery.as_mut(),
        env_at(SALES_SECONDS + DRAW_SECONDS),
        message_info(&addr("alarm_clock"), &[]),
        yieldpot_lottery::msg::ExecuteMsg::FulfillAlarm {
            request_id: 1,
            fired_at: Timestamp::from_seconds(0),
        },
    )
    .unwrap();
    assert!(res.messages.is_empty());
    assert_eq!(res.events[0].ty, "yieldpot_stale_callback");

    let res = yieldpot_lottery::contract::execute(
        outcome.lottery.as_mut(),
        env_at(SALES_SECONDS + DRAW_SECONDS),
        message_info(&addr("randomness_oracle"), &[]),
        yieldpot_lottery::msg::ExecuteMsg::FulfillRandomness {
            request_id: 2,
            randomness: outcome.randomness.clone().into(),
        },
    )
    .unwrap();
    assert!(res.messages.is_empty());
    assert_eq!(lottery_round(&outcome.lottery).id, 2);
}
