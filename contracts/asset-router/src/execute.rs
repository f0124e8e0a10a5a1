use cosmwasm_std::{Deps, DepsMut, Event, MessageInfo, Order, Response, StdResult, Uint128};
use yieldpot_common::exchange::VenueKind;

use crate::error::ContractError;
use crate::state::{CONFIG, VENUES};
use crate::venues::{best_quote, venue_for, ExchangeVenue};

const MAX_BPS: u16 = 10_000;

pub fn validate_bps(field: &str, value: u16) -> Result<(), ContractError> {
    if value > MAX_BPS {
        return Err(ContractError::InvalidBps {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Every registered venue in registration-key order.
pub fn load_venues(deps: Deps) -> StdResult<Vec<Box<dyn ExchangeVenue>>> {
    VENUES
        .range(deps.storage, None, None, Order::Ascending)
        .map(|r| r.map(|(address, kind)| venue_for(address, &kind)))
        .collect()
}

/// Largest of the caller's minimum and the quote less the configured slippage.
pub fn effective_minimum(quoted: Uint128, min_receive: Uint128, max_slippage_bps: u16) -> Uint128 {
    let floor = quoted.multiply_ratio(MAX_BPS - max_slippage_bps, MAX_BPS);
    floor.max(min_receive)
}

/// Quote every venue now and swap through the best one in the same transaction.
pub fn convert(
    deps: DepsMut,
    info: MessageInfo,
    ask_denom: String,
    min_receive: Uint128,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    if info.funds.len() != 1 || info.funds[0].amount.is_zero() {
        return Err(ContractError::InvalidFunds);
    }
    let offer = info.funds[0].clone();

    let config = CONFIG.load(deps.storage)?;
    let recipient = match recipient {
        Some(addr) => deps.api.addr_validate(&addr)?,
        None => info.sender.clone(),
    };

    let venues = load_venues(deps.as_ref())?;
    let (idx, quoted) = best_quote(&deps.querier, &venues, &offer, &ask_denom).ok_or(
        ContractError::NoRoute {
            offer_denom: offer.denom.clone(),
            ask_denom: ask_denom.clone(),
        },
    )?;

    let minimum = effective_minimum(quoted, min_receive, config.max_slippage_bps);
    if quoted < minimum {
        return Err(ContractError::SlippageExceeded { quoted, minimum });
    }

    let venue = &venues[idx];
    let swap = venue.swap(offer.clone(), &ask_denom, minimum, &recipient)?;

    Ok(Response::new()
        .add_message(swap)
        .add_attribute("action", "convert")
        .add_attribute("venue", venue.address().to_string())
        .add_attribute("quoted", quoted.to_string())
        .add_event(
            Event::new("yieldpot_route")
                .add_attribute("venue", venue.address().to_string())
                .add_attribute("kind", venue.kind().as_str())
                .add_attribute("offer", offer.to_string())
                .add_attribute("ask_denom", ask_denom)
                .add_attribute("quoted", quoted.to_string())
                .add_attribute("minimum", minimum.to_string())
                .add_attribute("recipient", recipient.to_string()),
        ))
}

pub fn add_venue(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
    kind: VenueKind,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can add venues".to_string(),
        });
    }

    let addr = deps.api.addr_validate(&address)?;
    if VENUES.has(deps.storage, &addr) {
        return Err(ContractError::VenueAlreadyExists { address });
    }
    VENUES.save(deps.storage, &addr, &kind)?;

    Ok(Response::new()
        .add_attribute("action", "add_venue")
        .add_attribute("venue", address)
        .add_attribute("kind", kind.as_str()))
}

pub fn remove_venue(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can remove venues".to_string(),
        });
    }

    let addr = deps.api.addr_validate(&address)?;
    if !VENUES.has(deps.storage, &addr) {
        return Err(ContractError::VenueNotFound { address });
    }
    VENUES.remove(deps.storage, &addr);

    Ok(Response::new()
        .add_attribute("action", "remove_venue")
        .add_attribute("venue", address))
}

pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    admin: Option<String>,
    max_slippage_bps: Option<u16>,
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
    if let Some(bps) = max_slippage_bps {
        validate_bps("max_slippage_bps", bps)?;
        config.max_slippage_bps = bps;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
