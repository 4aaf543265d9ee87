use crate::types::Phase;

pub const WHITELIST_DURATION: u64 = 5 * 24 * 60 * 60;
pub const PUBLIC_DURATION: u64 = 30 * 24 * 60 * 60;

/// Phase in effect at `now` for a commitment starting at `start_date`.
pub fn phase_at(start_date: u64, now: u64) -> Phase {
    let whitelist_end = start_date.saturating_add(WHITELIST_DURATION);
    let public_end = whitelist_end.saturating_add(PUBLIC_DURATION);
    if now < start_date {
        Phase::Before
    } else if now < whitelist_end {
        Phase::Whitelist
    } else if now < public_end {
        Phase::Public
    } else {
        Phase::Finished
    }
}
