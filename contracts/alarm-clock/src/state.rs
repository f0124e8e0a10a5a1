use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<ClockConfig> = Item::new("config");
pub const NEXT_ALARM_ID: Item<u64> = Item::new("next_alarm_id");
pub const ALARMS: Map<u64, Alarm> = Map::new("alarms");
/// Unfired alarms keyed by (due_at seconds, alarm_id).
pub const SCHEDULE: Map<(u64, u64), ()> = Map::new("schedule");
/// (consumer, request_id) -> alarm_id while the alarm is unfired.
pub const PENDING_REQUESTS: Map<(&Addr, u64), u64> = Map::new("pending_requests");

#[cw_serde]
pub struct ClockConfig {
    pub admin: Addr,
    pub min_wait_seconds: u64,
    pub max_wait_seconds: u64,
}

#[cw_serde]
pub enum AlarmStatus {
    Pending,
    Fired { at: Timestamp },
    /// The consumer rejected the callback.
    Failed { at: Timestamp, error: String },
}

#[cw_serde]
pub struct Alarm {
    pub id: u64,
    pub consumer: Addr,
    pub request_id: u64,
    pub set_at: Timestamp,
    pub due_at: Timestamp,
    pub status: AlarmStatus,
}
