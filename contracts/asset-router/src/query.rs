use cosmwasm_std::{to_json_binary, Binary, Coin, Deps, Order, StdError, StdResult};
use yieldpot_common::exchange::QuoteResponse;

use crate::execute::load_venues;
use crate::msg::{VenueEntry, VenuesResponse};
use crate::state::{CONFIG, VENUES};
use crate::venues::best_quote;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_venues(deps: Deps) -> StdResult<Binary> {
    let venues: Vec<VenueEntry> = VENUES
        .range(deps.storage, None, None, Order::Ascending)
        .map(|r| {
            r.map(|(address, kind)| VenueEntry {
                address: address.to_string(),
                kind,
            })
        })
        .collect::<StdResult<_>>()?;
    to_json_binary(&VenuesResponse { venues })
}

pub fn query_best_quote(deps: Deps, offer: Coin, ask_denom: String) -> StdResult<Binary> {
    let venues = load_venues(deps)?;
    let (idx, return_amount) = best_quote(&deps.querier, &venues, &offer, &ask_denom)
        .ok_or_else(|| {
            StdError::generic_err(format!(
                "no venue quotes {} -> {}",
                offer.denom, ask_denom
            ))
        })?;

    to_json_binary(&QuoteResponse {
        venue: venues[idx].address().to_string(),
        kind: venues[idx].kind(),
        return_amount,
    })
}
