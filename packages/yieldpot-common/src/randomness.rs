use sha2::{Digest, Sha256};

/// Reduce raw oracle output into `[0, bound)`.
///
/// The first 16 bytes are read as a big-endian `u128` and taken modulo `bound`.
/// Returns `None` when `bound` is zero or fewer than 16 bytes were delivered.
pub fn randomness_to_index(randomness: &[u8], bound: u64) -> Option<u64> {
    if bound == 0 || randomness.len() < 16 {
        return None;
    }
    let mut head = [0u8; 16];
    head.copy_from_slice(&randomness[0..16]);
    let raw = u128::from_be_bytes(head);
    Some((raw % bound as u128) as u64)
}

/// Derive per-request randomness from one beacon.
///
/// `sha256( beacon || consumer_bytes || request_id_u64_be )`, so two requests
/// served by the same beacon never see the same value.
pub fn derive_job_randomness(beacon: &[u8], consumer: &str, request_id: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(beacon);
    hasher.update(consumer.as_bytes());
    hasher.update(request_id.to_be_bytes());
    hasher.finalize().into()
}
