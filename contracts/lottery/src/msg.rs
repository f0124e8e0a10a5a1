use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{HexBinary, Timestamp, Uint128};
use yieldpot_common::PayoutPolicy;

use crate::state::{LotteryConfig, Round, RoundResult, TicketPurchase};
use crate::yield_venue::YieldVenueInput;

#[cw_serde]
pub struct InstantiateMsg {
    pub operator: String,
    pub asset_router: String,
    pub randomness_oracle: String,
    pub alarm_clock: String,
    pub yield_venue: YieldVenueInput,
    /// Asset every deposit is converted into before it is parked
    pub settlement_denom: String,
    /// Price of one ticket in settlement-asset base units
    pub ticket_cost: Uint128,
    pub max_tickets: u64,
    pub sales_duration_seconds: u64,
    pub draw_duration_seconds: u64,
    pub max_slippage_bps: u16,
    pub payout_policy: PayoutPolicy,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Buy tickets with the single coin attached.
    BuyTickets {},
    /// Lock the round and move deposits into the yield venue. Resumable.
    /// Admin or operator.
    SendToPool {},
    /// Deposit once every purchase is converted. Dispatched by the contract
    /// itself after a conversion batch; admin or operator may also call it.
    CompleteDeposit {},
    /// Alarm clock callback.
    FulfillAlarm { request_id: u64, fired_at: Timestamp },
    /// Randomness oracle callback.
    FulfillRandomness {
        request_id: u64,
        randomness: HexBinary,
    },
    /// Admin only, while the round is open.
    SetTicketCost { ticket_cost: Uint128 },
    /// Admin only, while the round is open.
    SetMaxTickets { max_tickets: u64 },
    /// Admin only, between rounds (while open).
    SetYieldVenue { venue: YieldVenueInput },
    /// Admin only, while the round is open and empty.
    SetSettlementDenom { denom: String },
    /// Register the price-feed aggregator for a source denom. Admin only.
    SetPriceFeed { denom: String, feed: String },
    /// Admin only.
    RemovePriceFeed { denom: String },
    /// Admin only.
    UpdateConfig {
        admin: Option<String>,
        operator: Option<String>,
        asset_router: Option<String>,
        randomness_oracle: Option<String>,
        alarm_clock: Option<String>,
        sales_duration_seconds: Option<u64>,
        draw_duration_seconds: Option<u64>,
        max_slippage_bps: Option<u16>,
        payout_policy: Option<PayoutPolicy>,
    },
}

/// Unpacked `UpdateConfig` fields.
pub struct UpdateConfigParams {
    pub admin: Option<String>,
    pub operator: Option<String>,
    pub asset_router: Option<String>,
    pub randomness_oracle: Option<String>,
    pub alarm_clock: Option<String>,
    pub sales_duration_seconds: Option<u64>,
    pub draw_duration_seconds: Option<u64>,
    pub max_slippage_bps: Option<u16>,
    pub payout_policy: Option<PayoutPolicy>,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(LotteryConfig)]
    Config {},
    #[returns(Round)]
    Round {},
    /// Purchases of the current round in purchase order.
    #[returns(PlayersResponse)]
    Players {
        start_after: Option<u32>,
        limit: Option<u32>,
    },
    #[returns(TicketsForResponse)]
    TicketsFor { address: String },
    #[returns(PriceFeedsResponse)]
    PriceFeeds {},
    #[returns(Option<RoundResult>)]
    RoundResult { round_id: u64 },
    #[returns(RoundHistoryResponse)]
    RoundHistory {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct PurchaseEntry {
    pub index: u32,
    pub purchase: TicketPurchase,
}

#[cw_serde]
pub struct PlayersResponse {
    pub round_id: u64,
    pub purchases: Vec<PurchaseEntry>,
}

#[cw_serde]
pub struct TicketsForResponse {
    pub address: String,
    pub round_id: u64,
    pub tickets: u64,
}

#[cw_serde]
pub struct PriceFeedEntry {
    pub denom: String,
    pub feed: String,
}

#[cw_serde]
pub struct PriceFeedsResponse {
    pub feeds: Vec<PriceFeedEntry>,
}

#[cw_serde]
pub struct RoundHistoryResponse {
    pub results: Vec<RoundResult>,
}
