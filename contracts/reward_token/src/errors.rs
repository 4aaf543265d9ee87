use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization (3) ---
    NotAuthorized = 3,

    // --- Amounts (4–8) ---
    NegativeAmount = 4,
    InsufficientBalance = 5,
    InsufficientAllowance = 6,
    InvalidExpiration = 7,
    Overflow = 8,

    // --- History (9) ---
    SnapshotInFuture = 9,
}
