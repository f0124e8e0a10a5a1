//! Exchange venue adapters behind a single quote/swap interface.

use cosmwasm_std::{
    to_json_binary, Addr, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use yieldpot_common::exchange::{
    GetDyResponse, PairExecuteMsg, PairQueryMsg, SimulationResponse, StablePoolExecuteMsg,
    StablePoolQueryMsg, VenueKind,
};

pub trait ExchangeVenue {
    fn address(&self) -> &Addr;

    fn kind(&self) -> VenueKind;

    /// Output for swapping `offer` into `ask_denom`, or `None` when the venue
    /// does not trade the pair.
    fn quote(&self, querier: &QuerierWrapper, offer: &Coin, ask_denom: &str) -> Option<Uint128>;

    fn swap(
        &self,
        offer: Coin,
        ask_denom: &str,
        min_receive: Uint128,
        recipient: &Addr,
    ) -> StdResult<CosmosMsg>;
}

pub fn venue_for(address: Addr, kind: &VenueKind) -> Box<dyn ExchangeVenue> {
    match kind {
        VenueKind::Pair => Box::new(PairVenue { address }),
        VenueKind::StablePool => Box::new(StablePoolVenue { address }),
    }
}

struct PairVenue {
    address: Addr,
}

impl ExchangeVenue for PairVenue {
    fn address(&self) -> &Addr {
        &self.address
    }

    fn kind(&self) -> VenueKind {
        VenueKind::Pair
    }

    // A pair rejects simulations for assets it does not hold
    fn quote(&self, querier: &QuerierWrapper, offer: &Coin, ask_denom: &str) -> Option<Uint128> {
        let res: SimulationResponse = querier
            .query_wasm_smart(
                self.address.to_string(),
                &PairQueryMsg::Simulation {
                    offer: offer.clone(),
                    ask_denom: ask_denom.to_string(),
                },
            )
            .ok()?;
        Some(res.return_amount).filter(|amount| !amount.is_zero())
    }

    fn swap(
        &self,
        offer: Coin,
        ask_denom: &str,
        min_receive: Uint128,
        recipient: &Addr,
    ) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.address.to_string(),
            msg: to_json_binary(&PairExecuteMsg::Swap {
                ask_denom: ask_denom.to_string(),
                min_return: min_receive,
                to: recipient.to_string(),
            })?,
            funds: vec![offer],
        }
        .into())
    }
}

struct StablePoolVenue {
    address: Addr,
}

impl ExchangeVenue for StablePoolVenue {
    fn address(&self) -> &Addr {
        &self.address
    }

    fn kind(&self) -> VenueKind {
        VenueKind::StablePool
    }

    fn quote(&self, querier: &QuerierWrapper, offer: &Coin, ask_denom: &str) -> Option<Uint128> {
        let coins: Vec<String> = querier
            .query_wasm_smart(self.address.to_string(), &StablePoolQueryMsg::Coins {})
            .ok()?;
        if !coins.contains(&offer.denom) || !coins.iter().any(|c| c == ask_denom) {
            return None;
        }

        let res: GetDyResponse = querier
            .query_wasm_smart(
                self.address.to_string(),
                &StablePoolQueryMsg::GetDy {
                    from_denom: offer.denom.clone(),
                    to_denom: ask_denom.to_string(),
                    dx: offer.amount,
                },
            )
            .ok()?;
        Some(res.dy).filter(|amount| !amount.is_zero())
    }

    fn swap(
        &self,
        offer: Coin,
        ask_denom: &str,
        min_receive: Uint128,
        recipient: &Addr,
    ) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.address.to_string(),
            msg: to_json_binary(&StablePoolExecuteMsg::Exchange {
                to_denom: ask_denom.to_string(),
                min_dy: min_receive,
                receiver: recipient.to_string(),
            })?,
            funds: vec![offer],
        }
        .into())
    }
}

/// Best quote across `venues`, ties going to the first registered.
pub fn best_quote(
    querier: &QuerierWrapper,
    venues: &[Box<dyn ExchangeVenue>],
    offer: &Coin,
    ask_denom: &str,
) -> Option<(usize, Uint128)> {
    let mut best: Option<(usize, Uint128)> = None;
    for (idx, venue) in venues.iter().enumerate() {
        if let Some(amount) = venue.quote(querier, offer, ask_denom) {
            match best {
                Some((_, current)) if current >= amount => {}
                _ => best = Some((idx, amount)),
            }
        }
    }
    best
}
