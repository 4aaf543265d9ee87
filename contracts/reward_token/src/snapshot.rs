//! Daily balance history.
//!
//! Each account (and the total supply) keeps an ordered run of checkpoints,
//! at most one per snapshot id, stored one entry per checkpoint under
//! consecutive indices. A checkpoint written during snapshot `n` holds the
//! value at the end of `n` until a later snapshot overwrites it, so a query
//! for `n` picks the last checkpoint whose id is `<= n`.

use soroban_sdk::Env;

use crate::storage::{get_checkpoint, get_checkpoint_count, set_checkpoint, set_checkpoint_count};
use crate::types::{Checkpoint, History, SECONDS_PER_SNAPSHOT};

pub fn current_snapshot(env: &Env) -> u64 {
    env.ledger().timestamp() / SECONDS_PER_SNAPSHOT
}

fn last(env: &Env, history: &History) -> Option<(u32, Checkpoint)> {
    let count = get_checkpoint_count(env, history);
    if count == 0 {
        return None;
    }
    get_checkpoint(env, history, count - 1).map(|checkpoint| (count - 1, checkpoint))
}

pub fn latest(env: &Env, history: &History) -> i128 {
    last(env, history).map(|(_, checkpoint)| checkpoint.value).unwrap_or(0)
}

/// Writes `value` for the current snapshot, replacing an earlier write from the same day.
pub fn record(env: &Env, history: &History, value: i128) {
    let snapshot = current_snapshot(env);
    let checkpoint = Checkpoint { snapshot, value };
    match last(env, history) {
        Some((index, previous)) if previous.snapshot == snapshot => {
            set_checkpoint(env, history, index, &checkpoint)
        }
        Some((index, _)) => {
            set_checkpoint(env, history, index + 1, &checkpoint);
            set_checkpoint_count(env, history, index + 2);
        }
        None => {
            set_checkpoint(env, history, 0, &checkpoint);
            set_checkpoint_count(env, history, 1);
        }
    }
}

/// Binary search over the stored checkpoints; reads `O(log n)` entries.
pub fn value_at(env: &Env, history: &History, snapshot: u64) -> i128 {
    let mut low = 0u32;
    let mut high = get_checkpoint_count(env, history);
    while low < high {
        let mid = low + (high - low) / 2;
        match get_checkpoint(env, history, mid) {
            Some(checkpoint) if checkpoint.snapshot <= snapshot => low = mid + 1,
            _ => high = mid,
        }
    }
    if low == 0 {
        return 0;
    }
    get_checkpoint(env, history, low - 1)
        .map(|checkpoint| checkpoint.value)
        .unwrap_or(0)
}
