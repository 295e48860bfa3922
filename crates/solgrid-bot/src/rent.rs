//! Rent sweep decision.
//!
//! Retired order accounts hold a rent-exempt reserve that can be
//! reclaimed once nothing rests on the book. Only the decision lives
//! here; the close/transfer mechanics belong to the chain layer.

use tracing::debug;

/// Rent-exempt reserve of a token account in lamports.
pub const TOKEN_ACCOUNT_RENT_LAMPORTS: u64 = 2_039_280;

/// Whether reclaimable rent is worth sweeping this cycle.
///
/// Sweeping while orders rest on the book would close accounts still
/// in use, so any live order blocks the sweep outright.
pub fn should_sweep(reclaimable_lamports: u64, live_orders: usize, min_sweep_lamports: u64) -> bool {
    if live_orders > 0 {
        return false;
    }
    let sweep = reclaimable_lamports >= min_sweep_lamports;
    debug!(reclaimable_lamports, min_sweep_lamports, sweep, "rent sweep evaluated");
    sweep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_orders_block_sweep() {
        assert!(!should_sweep(10 * TOKEN_ACCOUNT_RENT_LAMPORTS, 1, TOKEN_ACCOUNT_RENT_LAMPORTS));
    }

    #[test]
    fn test_sweep_at_threshold() {
        assert!(should_sweep(TOKEN_ACCOUNT_RENT_LAMPORTS, 0, TOKEN_ACCOUNT_RENT_LAMPORTS));
        assert!(!should_sweep(TOKEN_ACCOUNT_RENT_LAMPORTS - 1, 0, TOKEN_ACCOUNT_RENT_LAMPORTS));
    }

    #[test]
    fn test_nothing_to_reclaim() {
        assert!(!should_sweep(0, 0, TOKEN_ACCOUNT_RENT_LAMPORTS));
    }
}
