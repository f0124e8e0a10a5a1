use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::ledger;
use crate::msg::{
    PlayersResponse, PriceFeedEntry, PriceFeedsResponse, PurchaseEntry, RoundHistoryResponse,
    TicketsForResponse,
};
use crate::state::{CONFIG, PRICE_FEEDS, PURCHASES, ROUND, ROUND_RESULTS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_round(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round)
}

pub fn query_players(
    deps: Deps,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    let limit = limit.unwrap_or(30).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let purchases: Vec<PurchaseEntry> = PURCHASES
        .prefix(round.id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|r| r.map(|(index, purchase)| PurchaseEntry { index, purchase }))
        .collect::<StdResult<_>>()?;

    to_json_binary(&PlayersResponse {
        round_id: round.id,
        purchases,
    })
}

pub fn query_tickets_for(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let round = ROUND.load(deps.storage)?;
    let tickets = ledger::tickets_for(deps.storage, round.id, &addr)?;
    to_json_binary(&TicketsForResponse {
        address,
        round_id: round.id,
        tickets,
    })
}

pub fn query_price_feeds(deps: Deps) -> StdResult<Binary> {
    let feeds: Vec<PriceFeedEntry> = PRICE_FEEDS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|r| {
            r.map(|(denom, feed)| PriceFeedEntry {
                denom,
                feed: feed.to_string(),
            })
        })
        .collect::<StdResult<_>>()?;
    to_json_binary(&PriceFeedsResponse { feeds })
}

pub fn query_round_result(deps: Deps, round_id: u64) -> StdResult<Binary> {
    let result = ROUND_RESULTS.may_load(deps.storage, round_id)?;
    to_json_binary(&result)
}

pub fn query_round_history(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let results = ROUND_RESULTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|r| r.map(|(_, result)| result))
        .collect::<StdResult<_>>()?;

    to_json_binary(&RoundHistoryResponse { results })
}
