use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Api, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use yieldpot_common::lending::{
    MoneyMarketExecuteMsg, MoneyMarketQueryMsg, UnderlyingBalanceResponse, VaultExecuteMsg,
    VaultQueryMsg,
};

/// The lending venue funds are parked in while a draw runs.
#[cw_serde]
pub enum YieldVenue {
    MoneyMarket { address: Addr },
    Vault { address: Addr },
}

/// Unvalidated form of [`YieldVenue`] accepted in messages.
#[cw_serde]
pub enum YieldVenueInput {
    MoneyMarket { address: String },
    Vault { address: String },
}

impl YieldVenueInput {
    pub fn validate(&self, api: &dyn Api) -> StdResult<YieldVenue> {
        Ok(match self {
            YieldVenueInput::MoneyMarket { address } => YieldVenue::MoneyMarket {
                address: api.addr_validate(address)?,
            },
            YieldVenueInput::Vault { address } => YieldVenue::Vault {
                address: api.addr_validate(address)?,
            },
        })
    }
}

/// Uniform capability set over the supported venues.
pub trait YieldSource {
    fn address(&self) -> &Addr;

    fn deposit(&self, amount: Coin, holder: &Addr) -> StdResult<CosmosMsg>;

    /// Message pulling `amount` of underlying back to `holder`.
    fn withdraw(&self, denom: &str, amount: Uint128, holder: &Addr) -> StdResult<CosmosMsg>;

    /// Principal plus accrued yield currently owed to `holder`.
    fn balance_of_underlying(
        &self,
        querier: &QuerierWrapper,
        holder: &Addr,
        denom: &str,
    ) -> StdResult<Uint128>;
}

impl YieldVenue {
    pub fn source(&self) -> Box<dyn YieldSource> {
        match self {
            YieldVenue::MoneyMarket { address } => Box::new(MoneyMarketSource {
                address: address.clone(),
            }),
            YieldVenue::Vault { address } => Box::new(VaultSource {
                address: address.clone(),
            }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            YieldVenue::MoneyMarket { .. } => "money_market",
            YieldVenue::Vault { .. } => "vault",
        }
    }
}

struct MoneyMarketSource {
    address: Addr,
}

impl YieldSource for MoneyMarketSource {
    fn address(&self) -> &Addr {
        &self.address
    }

    fn deposit(&self, amount: Coin, holder: &Addr) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.address.to_string(),
            msg: to_json_binary(&MoneyMarketExecuteMsg::Supply {
                on_behalf_of: Some(holder.to_string()),
            })?,
            funds: vec![amount],
        }
        .into())
    }

    fn withdraw(&self, denom: &str, amount: Uint128, holder: &Addr) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.address.to_string(),
            msg: to_json_binary(&MoneyMarketExecuteMsg::Withdraw {
                denom: denom.to_string(),
                amount,
                to: Some(holder.to_string()),
            })?,
            funds: vec![],
        }
        .into())
    }

    fn balance_of_underlying(
        &self,
        querier: &QuerierWrapper,
        holder: &Addr,
        denom: &str,
    ) -> StdResult<Uint128> {
        let res: UnderlyingBalanceResponse = querier.query_wasm_smart(
            self.address.to_string(),
            &MoneyMarketQueryMsg::UnderlyingBalance {
                account: holder.to_string(),
                denom: denom.to_string(),
            },
        )?;
        Ok(res.amount)
    }
}

struct VaultSource {
    address: Addr,
}

impl YieldSource for VaultSource {
    fn address(&self) -> &Addr {
        &self.address
    }

    // Vault shares are minted to the sender, so the holder is implicit.
    fn deposit(&self, amount: Coin, _holder: &Addr) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.address.to_string(),
            msg: to_json_binary(&VaultExecuteMsg::Mint {})?,
            funds: vec![amount],
        }
        .into())
    }

    fn withdraw(&self, denom: &str, amount: Uint128, _holder: &Addr) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.address.to_string(),
            msg: to_json_binary(&VaultExecuteMsg::RedeemUnderlying {
                denom: denom.to_string(),
                amount,
            })?,
            funds: vec![],
        }
        .into())
    }

    fn balance_of_underlying(
        &self,
        querier: &QuerierWrapper,
        holder: &Addr,
        denom: &str,
    ) -> StdResult<Uint128> {
        querier.query_wasm_smart(
            self.address.to_string(),
            &VaultQueryMsg::BalanceOfUnderlying {
                owner: holder.to_string(),
                denom: denom.to_string(),
            },
        )
    }
}
