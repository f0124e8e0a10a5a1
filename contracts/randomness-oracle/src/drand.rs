//! drand quicknet: beacon verification and round timing.

use drand_verify::Pubkey;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Quicknet public key (G2, 96 bytes), scheme bls-unchained-g1-rfc9380.
pub const QUICKNET_PK_HEX: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";

pub const PUBKEY_LEN: usize = 96;

#[derive(Error, Debug, PartialEq)]
pub enum BeaconError {
    #[error("public key must be 96 bytes, got {0}")]
    PubkeyLength(usize),

    #[error("public key is not a valid G2 point")]
    Pubkey,

    #[error("malformed signature: {0}")]
    Malformed(String),

    #[error("signature does not match round {0}")]
    Mismatch(u64),
}

/// Check a quicknet signature for `round` and return its randomness,
/// `sha256(signature)`.
pub fn verify_beacon(pubkey: &[u8], round: u64, signature: &[u8]) -> Result<[u8; 32], BeaconError> {
    let fixed: [u8; PUBKEY_LEN] = pubkey
        .try_into()
        .map_err(|_| BeaconError::PubkeyLength(pubkey.len()))?;
    let pk = drand_verify::G2PubkeyRfc::from_fixed(fixed).map_err(|_| BeaconError::Pubkey)?;

    // Unchained scheme: no previous signature
    let valid = pk
        .verify(round, &[], signature)
        .map_err(|e| BeaconError::Malformed(format!("{:?}", e)))?;
    if !valid {
        return Err(BeaconError::Mismatch(round));
    }

    Ok(Sha256::digest(signature).into())
}

/// First round published strictly after `time` (unix seconds).
///
/// Round `r` is published at `genesis + (r - 1) * period`.
pub fn round_after(genesis_time: u64, period_seconds: u64, time: u64) -> u64 {
    if time < genesis_time || period_seconds == 0 {
        return 1;
    }
    (time - genesis_time) / period_seconds + 2
}
