use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use yieldpot_common::exchange::VenueKind;

pub const CONFIG: Item<RouterConfig> = Item::new("config");
/// Registered exchange venues and the interface each one speaks.
pub const VENUES: Map<&Addr, VenueKind> = Map::new("venues");

#[cw_serde]
pub struct RouterConfig {
    pub admin: Addr,
    /// Floor applied to every conversion on top of the caller's minimum (300 = 3%)
    pub max_slippage_bps: u16,
}
