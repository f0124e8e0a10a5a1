use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use yieldpot_common::{PayoutPolicy, RoundStatus};

use crate::yield_venue::YieldVenue;

pub const CONFIG: Item<LotteryConfig> = Item::new("config");
pub const ROUND: Item<Round> = Item::new("round");
/// Ticket purchases of a round, keyed by (round_id, purchase index) so range order is purchase order.
pub const PURCHASES: Map<(u64, u32), TicketPurchase> = Map::new("purchases");
/// Tickets held per participant within a round.
pub const PLAYER_TICKETS: Map<(u64, &Addr), u64> = Map::new("player_tickets");
/// Price-feed aggregator per source denom.
pub const PRICE_FEEDS: Map<&str, Addr> = Map::new("price_feeds");
pub const ROUND_RESULTS: Map<u64, RoundResult> = Map::new("round_results");
/// Global counter for oracle request ids; ids never repeat across rounds or phases.
pub const NEXT_REQUEST_ID: Item<u64> = Item::new("next_request_id");
/// Settlement balance observed after the last conversion reply of a swap batch.
pub const SWAP_CHECKPOINT: Item<Uint128> = Item::new("swap_checkpoint");

#[cw_serde]
pub struct LotteryConfig {
    pub admin: Addr,
    pub operator: Addr,
    pub asset_router: Addr,
    pub randomness_oracle: Addr,
    pub alarm_clock: Addr,
    pub yield_venue: YieldVenue,
    /// Minimum time a round stays open before it can be locked without hitting the cap
    pub sales_duration_seconds: u64,
    /// Wait requested from the alarm clock once funds are deposited
    pub draw_duration_seconds: u64,
    /// Tolerated shortfall against the quoted conversion (500 = 5%)
    pub max_slippage_bps: u16,
    pub payout_policy: PayoutPolicy,
}

#[cw_serde]
pub struct PendingRequest {
    pub request_id: u64,
    pub issued_at: Timestamp,
}

#[cw_serde]
pub struct Round {
    pub id: u64,
    pub status: RoundStatus,
    pub ticket_cost: Uint128,
    pub max_tickets: u64,
    pub settlement_denom: String,
    pub total_tickets_sold: u64,
    pub num_purchases: u32,
    pub opened_at: Timestamp,
    pub locked_at: Option<Timestamp>,
    /// Venue the principal was deposited into; withdrawal always targets this one
    pub venue: Option<YieldVenue>,
    pub principal: Uint128,
    pub withdrawn: Uint128,
    pub pending_alarm: Option<PendingRequest>,
    pub pending_randomness: Option<PendingRequest>,
    /// `None` until the randomness callback for this round lands
    pub random_result: Option<u64>,
}

impl Round {
    pub fn open(
        id: u64,
        ticket_cost: Uint128,
        max_tickets: u64,
        settlement_denom: String,
        opened_at: Timestamp,
    ) -> Self {
        Round {
            id,
            status: RoundStatus::Open,
            ticket_cost,
            max_tickets,
            settlement_denom,
            total_tickets_sold: 0,
            num_purchases: 0,
            opened_at,
            locked_at: None,
            venue: None,
            principal: Uint128::zero(),
            withdrawn: Uint128::zero(),
            pending_alarm: None,
            pending_randomness: None,
            random_result: None,
        }
    }

    /// Fresh round following this one, carrying over the sale parameters.
    pub fn next(&self, opened_at: Timestamp) -> Self {
        Round::open(
            self.id + 1,
            self.ticket_cost,
            self.max_tickets,
            self.settlement_denom.clone(),
            opened_at,
        )
    }
}

#[cw_serde]
pub struct TicketPurchase {
    pub owner: Addr,
    pub source_denom: String,
    pub deposited_amount: Uint128,
    /// Deposit priced in the settlement asset at purchase time
    pub settlement_equivalent: Uint128,
    pub quantity_tickets: u64,
    /// Settlement amount actually obtained; set once and never converted again
    pub converted: Option<Uint128>,
}

#[cw_serde]
pub struct RoundResult {
    pub round_id: u64,
    pub winner: Addr,
    pub winner_payout: Uint128,
    pub random_result: u64,
    pub total_tickets: u64,
    pub settlement_denom: String,
    pub principal: Uint128,
    pub withdrawn: Uint128,
    pub payout_policy: PayoutPolicy,
    pub settled_at: Timestamp,
}
