use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Uint128};
use yieldpot_common::exchange::{QuoteResponse, VenueKind};

use crate::state::RouterConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub max_slippage_bps: u16,
    pub venues: Vec<VenueEntry>,
}

#[cw_serde]
pub struct VenueEntry {
    pub address: String,
    pub kind: VenueKind,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Swap the attached coin into `ask_denom` through the best-quoting venue.
    Convert {
        ask_denom: String,
        min_receive: Uint128,
        recipient: Option<String>,
    },
    /// Admin only.
    AddVenue { address: String, kind: VenueKind },
    /// Admin only.
    RemoveVenue { address: String },
    /// Admin only.
    UpdateConfig {
        admin: Option<String>,
        max_slippage_bps: Option<u16>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RouterConfig)]
    Config {},
    #[returns(VenuesResponse)]
    Venues {},
    /// Fails when no venue trades the pair.
    #[returns(QuoteResponse)]
    BestQuote { offer: Coin, ask_denom: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct VenuesResponse {
    pub venues: Vec<VenueEntry>,
}
