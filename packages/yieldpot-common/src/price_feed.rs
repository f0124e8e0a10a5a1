use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal, Timestamp};

/// Query interface of a price-feed aggregator for one asset.
#[cw_serde]
#[derive(QueryResponses)]
pub enum PriceFeedQueryMsg {
    #[returns(PriceResponse)]
    LatestPrice { quote_denom: String },
}

#[cw_serde]
pub struct PriceResponse {
    /// Units of `quote_denom` per unit of the feed's base asset.
    pub price: Decimal,
    pub updated_at: Timestamp,
}
