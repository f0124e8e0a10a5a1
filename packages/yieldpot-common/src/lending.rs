//! Interfaces of the lending venues the lottery can park funds in.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

/// Money-market style venue: supply the attached coin, withdraw by amount.
#[cw_serde]
pub enum MoneyMarketExecuteMsg {
    Supply { on_behalf_of: Option<String> },
    Withdraw {
        denom: String,
        amount: Uint128,
        to: Option<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum MoneyMarketQueryMsg {
    #[returns(UnderlyingBalanceResponse)]
    UnderlyingBalance { account: String, denom: String },
}

#[cw_serde]
pub struct UnderlyingBalanceResponse {
    pub denom: String,
    pub amount: Uint128,
}

/// Share-token vault style venue: mint shares with the attached coin, redeem underlying.
#[cw_serde]
pub enum VaultExecuteMsg {
    Mint {},
    RedeemUnderlying { denom: String, amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum VaultQueryMsg {
    #[returns(Uint128)]
    BalanceOfUnderlying { owner: String, denom: String },
}
