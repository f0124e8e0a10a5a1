use cosmwasm_schema::{cw_serde, QueryResponses};

use crate::state::{Alarm, ClockConfig};

#[cw_serde]
pub struct InstantiateMsg {
    pub min_wait_seconds: u64,
    pub max_wait_seconds: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Schedule a `FulfillAlarm` callback to the sender.
    SetAlarm { request_id: u64, wait_seconds: u64 },
    /// Deliver a due alarm. Anyone may call.
    Fire { alarm_id: u64 },
    /// Admin only.
    UpdateConfig {
        admin: Option<String>,
        min_wait_seconds: Option<u64>,
        max_wait_seconds: Option<u64>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ClockConfig)]
    Config {},

    #[returns(Option<Alarm>)]
    Alarm { alarm_id: u64 },

    /// Unfired alarms whose due time has passed, earliest first.
    #[returns(Vec<Alarm>)]
    DueAlarms { limit: Option<u32> },
}

#[cw_serde]
pub struct MigrateMsg {}
