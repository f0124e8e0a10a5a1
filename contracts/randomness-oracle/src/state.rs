use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<OracleConfig> = Item::new("config");
pub const BEACONS: Map<u64, StoredBeacon> = Map::new("beacons");
pub const LATEST_ROUND: Item<u64> = Item::new("latest_round");
pub const NEXT_JOB_ID: Item<u64> = Item::new("next_job_id");
pub const JOBS: Map<u64, Job> = Map::new("jobs");
/// Undelivered jobs keyed by (target_round, job_id), so due jobs are a prefix range.
pub const PENDING_JOBS: Map<(u64, u64), ()> = Map::new("pending_jobs");
/// (consumer, request_id) -> job_id; a consumer may not reuse a request id.
pub const REQUESTS: Map<(&Addr, u64), u64> = Map::new("requests");

#[cw_serde]
pub struct OracleConfig {
    pub admin: Addr,
    pub operators: Vec<Addr>,
    /// Quicknet public key, 96 bytes (G2 point)
    pub quicknet_pubkey: Vec<u8>,
    pub chain_hash: String,
    /// Genesis time of the drand network (unix seconds)
    pub genesis_time: u64,
    /// Period between rounds in seconds (3 for quicknet)
    pub period_seconds: u64,
    /// Requests wait for a round published at least this long after the request
    pub safety_margin_seconds: u64,
}

#[cw_serde]
pub struct StoredBeacon {
    pub round: u64,
    /// sha256(signature), 32 bytes
    pub randomness: Vec<u8>,
    /// BLS signature on G1, 48 bytes
    pub signature: Vec<u8>,
    pub submitted_at: Timestamp,
    pub submitted_by: Addr,
}

#[cw_serde]
pub enum JobStatus {
    Pending,
    Delivered { beacon_round: u64 },
    /// The consumer rejected the callback; it is not retried.
    Failed { beacon_round: u64, error: String },
}

#[cw_serde]
pub struct Job {
    pub id: u64,
    pub consumer: Addr,
    pub request_id: u64,
    pub target_round: u64,
    pub requested_at: Timestamp,
    pub status: JobStatus,
}
