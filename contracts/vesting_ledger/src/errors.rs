use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization (3–4) ---
    NotAuthorized = 3,
    NotController = 4,

    // --- State (5) ---
    InvalidLockState = 5,

    // --- Bounds (6–9) ---
    InvalidAmount = 6,
    InvalidFraction = 7,
    Overflow = 8,
    FundsNotReceived = 9,

    // --- Migration (10–14) ---
    MigrationAlreadyEnabled = 10,
    MigrationDisabled = 11,
    MigrationTargetMismatch = 12,
    MigrationSourceAlreadySet = 13,
    NotMigrationSource = 14,

    // --- Reclaim (15) ---
    ReclaimForbidden = 15,
}
