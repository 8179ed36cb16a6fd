//! Block reward calculation
//!
//! Bitcoin-style halving schedule driven by the profile's
//! `subsidy_decrease_block_count`.

/// Base units per coin (8 decimal places)
pub const COIN: u64 = 100_000_000;

/// Reward of the first halving period
pub const INITIAL_SUBSIDY: u64 = 50 * COIN;

/// Upper bound on the total supply
pub const MAX_MONEY: u64 = 21_000_000 * COIN;

/// Calculate block reward for a given height
///
/// The reward halves every `halving_interval` blocks and is zero once the
/// shift would run past the width of the amount.
pub fn calculate_block_subsidy(height: u64, halving_interval: u64) -> u64 {
    if halving_interval == 0 {
        return 0;
    }
    let halvings = height / halving_interval;
    if halvings >= 64 {
        return 0;
    }
    INITIAL_SUBSIDY >> halvings
}

/// Total subsidy paid out by blocks `0..=height`
pub fn cumulative_subsidy(height: u64, halving_interval: u64) -> u64 {
    if halving_interval == 0 {
        return 0;
    }
    let mut total: u64 = 0;
    let mut start: u64 = 0;
    while start <= height {
        let reward = calculate_block_subsidy(start, halving_interval);
        if reward == 0 {
            break;
        }
        let end = start.saturating_add(halving_interval - 1).min(height);
        total = total.saturating_add(reward.saturating_mul(end - start + 1));
        start = match end.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }
    total
}
