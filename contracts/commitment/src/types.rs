use soroban_sdk::{contracttype, Address, String};

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[contracttype]
#[repr(u32)]
pub enum Phase {
    Before = 0,
    Whitelist = 1,
    Public = 2,
    Finished = 3,
}

impl Phase {
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Before => Some(Phase::Whitelist),
            Phase::Whitelist => Some(Phase::Public),
            Phase::Public => Some(Phase::Finished),
            Phase::Finished => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum ValueKind {
    Native = 0,
    Stable = 1,
}

/// Curve allocation held in escrow for a whitelisted contributor.
///
/// Values are value-equivalents (stable units); `ticket_amount` is in units of
/// the reservation's own token.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Reservation {
    pub contributor: Address,
    pub kind: ValueKind,
    pub ticket_amount: u128,
    pub reserved_value: u128,
    pub reserved_reward: u128,
    pub fulfilled_value: u128,
    pub released_reward: u128,
    pub expired: bool,
    pub expired_reward: u128,
}

impl Reservation {
    pub fn remaining_value(&self) -> u128 {
        self.reserved_value - self.fulfilled_value
    }

    pub fn remaining_reward(&self) -> u128 {
        self.reserved_reward - self.released_reward
    }

    pub fn is_live_for(&self, kind: ValueKind) -> bool {
        !self.expired && self.kind == kind && self.remaining_value() > 0
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Ticket {
    pub contributor: Address,
    pub kind: ValueKind,
    pub amount: u128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CommitmentConfig {
    pub policy: Address,
    pub reward_token: Address,
    pub native_token: Address,
    pub stable_token: Address,
    pub native_ledger: Address,
    pub stable_ledger: Address,
    pub platform_wallet: Address,
    pub start_date: u64,
    /// Maximum value-equivalent ever committed.
    pub cap: u128,
    /// Smallest value-equivalent accepted outside a reservation.
    pub min_ticket: u128,
    /// Stable value of one native unit, as a decimal fraction.
    pub native_rate: u128,
}

impl CommitmentConfig {
    pub fn token(&self, kind: ValueKind) -> &Address {
        match kind {
            ValueKind::Native => &self.native_token,
            ValueKind::Stable => &self.stable_token,
        }
    }

    pub fn ledger(&self, kind: ValueKind) -> &Address {
        match kind {
            ValueKind::Native => &self.native_ledger,
            ValueKind::Stable => &self.stable_ledger,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ContributionOutcome {
    pub value: u128,
    /// Released from the contributor's reservation.
    pub reserved_reward: u128,
    /// Priced live from the curve.
    pub live_reward: u128,
    pub platform_share: u128,
    pub contributor_share: u128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Agreement {
    pub version: u32,
    pub uri: String,
    pub amended_at: u64,
}

#[contracttype]
pub enum DataKey {
    Config,
    SettledPhase,
    Aborted,
    TotalValue,
    EscrowedReward,
    Contributors,
    Reservation(Address),
    Agreement,
    AcceptedAt(Address),
}
