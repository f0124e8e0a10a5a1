//! Ticket ledger: purchase records, weighted winner selection and payout split.

use cosmwasm_std::{
    Addr, Coin, Deps, Order, OverflowError, OverflowOperation, StdError, StdResult, Storage,
    Uint128,
};
use yieldpot_common::price_feed::{PriceFeedQueryMsg, PriceResponse};
use yieldpot_common::PayoutPolicy;

use crate::error::ContractError;
use crate::state::{Round, TicketPurchase, PLAYER_TICKETS, PRICE_FEEDS, PURCHASES};

/// Price `offered` in the settlement asset.
///
/// Settlement-denom deposits count one to one; anything else goes through the
/// price feed registered for its denom, rounding down.
pub fn settlement_equivalent(
    deps: Deps,
    offered: &Coin,
    settlement_denom: &str,
) -> Result<Uint128, ContractError> {
    if offered.denom == settlement_denom {
        return Ok(offered.amount);
    }

    let feed = PRICE_FEEDS
        .may_load(deps.storage, &offered.denom)?
        .ok_or(ContractError::NoPriceFeed {
            denom: offered.denom.clone(),
        })?;

    let price: PriceResponse = deps.querier.query_wasm_smart(
        feed.to_string(),
        &PriceFeedQueryMsg::LatestPrice {
            quote_denom: settlement_denom.to_string(),
        },
    )?;

    Ok(offered.amount.mul_floor(price.price))
}

/// Append a purchase to the round and bump its counters.
/// The cap must already have been checked by the caller.
pub fn record_purchase(
    storage: &mut dyn Storage,
    round: &mut Round,
    purchase: &TicketPurchase,
) -> StdResult<u32> {
    let index = round.num_purchases;
    PURCHASES.save(storage, (round.id, index), purchase)?;

    let held = PLAYER_TICKETS
        .may_load(storage, (round.id, &purchase.owner))?
        .unwrap_or(0);
    let held = held
        .checked_add(purchase.quantity_tickets)
        .ok_or_else(|| StdError::overflow(OverflowError::new(OverflowOperation::Add)))?;
    PLAYER_TICKETS.save(storage, (round.id, &purchase.owner), &held)?;

    round.num_purchases = round
        .num_purchases
        .checked_add(1)
        .ok_or_else(|| StdError::overflow(OverflowError::new(OverflowOperation::Add)))?;
    round.total_tickets_sold = round
        .total_tickets_sold
        .checked_add(purchase.quantity_tickets)
        .ok_or_else(|| StdError::overflow(OverflowError::new(OverflowOperation::Add)))?;
    Ok(index)
}

/// All purchases of a round in purchase order.
pub fn load_purchases(
    storage: &dyn Storage,
    round_id: u64,
) -> StdResult<Vec<(u32, TicketPurchase)>> {
    PURCHASES
        .prefix(round_id)
        .range(storage, None, None, Order::Ascending)
        .collect()
}

pub fn tickets_for(storage: &dyn Storage, round_id: u64, owner: &Addr) -> StdResult<u64> {
    Ok(PLAYER_TICKETS
        .may_load(storage, (round_id, owner))?
        .unwrap_or(0))
}

/// Drop every purchase and ticket tally of a settled round.
pub fn clear_round(storage: &mut dyn Storage, round_id: u64) -> StdResult<()> {
    let purchases = load_purchases(storage, round_id)?;
    for (index, purchase) in purchases {
        PURCHASES.remove(storage, (round_id, index));
        PLAYER_TICKETS.remove(storage, (round_id, &purchase.owner));
    }
    Ok(())
}

/// Cumulative-weight selection: the first purchase whose running ticket
/// total exceeds `random_result` wins.
pub fn select_winner(purchases: &[TicketPurchase], random_result: u64) -> Option<usize> {
    let mut cumulative = 0u64;
    for (idx, purchase) in purchases.iter().enumerate() {
        cumulative += purchase.quantity_tickets;
        if cumulative > random_result {
            return Some(idx);
        }
    }
    None
}

/// Split the withdrawn balance per `policy`.
///
/// Returns one entry per distinct owner in first-purchase order. The winner
/// always absorbs rounding dust, so the entries sum to exactly `withdrawn`.
pub fn compute_payouts(
    policy: &PayoutPolicy,
    purchases: &[TicketPurchase],
    winner_idx: usize,
    principal: Uint128,
    withdrawn: Uint128,
) -> Vec<(Addr, Uint128)> {
    let winner = purchases[winner_idx].owner.clone();

    let mut payouts: Vec<(Addr, Uint128)> = Vec::new();
    let mut credit = |owner: &Addr, amount: Uint128| {
        match payouts.iter_mut().find(|(addr, _)| addr == owner) {
            Some((_, total)) => *total += amount,
            None => payouts.push((owner.clone(), amount)),
        }
    };

    match policy {
        PayoutPolicy::WinnerTakesAll => credit(&winner, withdrawn),
        PayoutPolicy::PrincipalProtected { winner_yield_bps } => {
            // A venue loss shrinks every refund proportionally
            let refundable = withdrawn.min(principal);
            let yield_amount = withdrawn - refundable;
            let winner_yield = yield_amount.multiply_ratio(*winner_yield_bps, 10_000u128);
            let shared_yield = yield_amount - winner_yield;
            let total_tickets: u64 = purchases.iter().map(|p| p.quantity_tickets).sum();

            let mut distributed = Uint128::zero();
            for purchase in purchases {
                let converted = purchase.converted.unwrap_or_default();
                let refund = if principal.is_zero() {
                    Uint128::zero()
                } else {
                    converted.multiply_ratio(refundable, principal)
                };
                let share = if total_tickets == 0 {
                    Uint128::zero()
                } else {
                    shared_yield.multiply_ratio(purchase.quantity_tickets, total_tickets)
                };
                distributed += refund + share;
                credit(&purchase.owner, refund + share);
            }

            credit(&winner, withdrawn.saturating_sub(distributed));
        }
    }

    payouts.retain(|(_, amount)| !amount.is_zero());
    payouts
}
