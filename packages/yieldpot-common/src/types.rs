use cosmwasm_schema::cw_serde;

/// Lifecycle status of a lottery round. A round is always in exactly one of these.
#[cw_serde]
pub enum RoundStatus {
    /// Ticket purchases accepted.
    Open,
    /// Sales closed; deposits are being converted to the settlement asset.
    Locked,
    /// Funds parked in the yield venue, waiting for the alarm callback.
    AwaitingAlarm,
    /// Funds withdrawn, waiting for the randomness callback.
    AwaitingRandomness,
    /// Winner is being computed and paid.
    Settling,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Open => "open",
            RoundStatus::Locked => "locked",
            RoundStatus::AwaitingAlarm => "awaiting_alarm",
            RoundStatus::AwaitingRandomness => "awaiting_randomness",
            RoundStatus::Settling => "settling",
        }
    }
}

/// How the withdrawn balance is split at settlement.
#[cw_serde]
pub enum PayoutPolicy {
    /// The winner receives the full withdrawn balance, principal and yield.
    WinnerTakesAll,
    /// Every participant gets their principal back. The winner receives
    /// `winner_yield_bps` of the yield, the rest of the yield is shared by
    /// ticket count across all participants (winner included).
    PrincipalProtected { winner_yield_bps: u16 },
}
