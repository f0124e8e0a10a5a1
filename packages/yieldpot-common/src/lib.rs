pub mod exchange;
pub mod lending;
pub mod oracle;
pub mod price_feed;
pub mod randomness;
pub mod types;

pub use randomness::{derive_job_randomness, randomness_to_index};
pub use types::{PayoutPolicy, RoundStatus};
