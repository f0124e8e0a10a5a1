//! Interfaces of the exchange venues the asset router can talk to.
//!
//! Two venue families are supported. A constant-product `Pair` quotes through
//! `Simulation` and swaps with `Swap`. A multi-coin `StablePool` lists its
//! coins, quotes through `GetDy` and swaps with `Exchange`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Uint128};

#[cw_serde]
pub enum VenueKind {
    Pair,
    StablePool,
}

impl VenueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueKind::Pair => "pair",
            VenueKind::StablePool => "stable_pool",
        }
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum PairQueryMsg {
    #[returns(SimulationResponse)]
    Simulation { offer: Coin, ask_denom: String },
}

#[cw_serde]
pub struct SimulationResponse {
    pub return_amount: Uint128,
}

#[cw_serde]
pub enum PairExecuteMsg {
    /// Swap the attached coin into `ask_denom`, reverting when the output is below `min_return`.
    Swap {
        ask_denom: String,
        min_return: Uint128,
        to: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum StablePoolQueryMsg {
    #[returns(Vec<String>)]
    Coins {},
    #[returns(GetDyResponse)]
    GetDy {
        from_denom: String,
        to_denom: String,
        dx: Uint128,
    },
}

#[cw_serde]
pub struct GetDyResponse {
    pub dy: Uint128,
}

#[cw_serde]
pub enum StablePoolExecuteMsg {
    Exchange {
        to_denom: String,
        min_dy: Uint128,
        receiver: String,
    },
}

/// Execute interface of the asset router itself, used by the lottery.
#[cw_serde]
pub enum RouterExecuteMsg {
    Convert {
        ask_denom: String,
        min_receive: Uint128,
        recipient: Option<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum RouterQueryMsg {
    #[returns(QuoteResponse)]
    BestQuote { offer: Coin, ask_denom: String },
}

#[cw_serde]
pub struct QuoteResponse {
    pub venue: String,
    pub kind: VenueKind,
    pub return_amount: Uint128,
}
