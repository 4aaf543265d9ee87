use issuance_curve::CurveError;
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

    // --- Phase (4–7) ---
    PhaseMismatch = 4,
    Aborted = 5,
    NotWhitelisted = 6,
    AgreementMissing = 7,

    // --- Bounds (8–12) ---
    InvalidAmount = 8,
    BelowMinTicket = 9,
    CapExceeded = 10,
    Overflow = 11,
    InvalidConfig = 12,

    // --- Reservations / reclaim (13–14) ---
    DuplicateReservation = 13,
    ReclaimForbidden = 14,

    // --- Curve (15–17) ---
    InvalidBracket = 15,
    TargetOutOfBracket = 16,
    InsufficientReward = 17,
}

impl From<CurveError> for Error {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::Overflow => Error::Overflow,
            CurveError::InvalidBracket => Error::InvalidBracket,
            CurveError::TargetOutOfBracket => Error::TargetOutOfBracket,
            CurveError::InsufficientReward => Error::InsufficientReward,
        }
    }
}
