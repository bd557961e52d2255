/*!
 * Lock-Free Dispatch Statistics
 * Atomic counters updated by execution units without contention
 */

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time dispatch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    /// Units spawned
    pub launched: u64,
    /// Units that passed the readiness gate
    pub released: u64,
    /// Units that finished their simulated service
    pub completed: u64,
}

impl DispatchStats {
    /// Units launched but not yet finished
    pub const fn in_flight(&self) -> u64 {
        self.launched.saturating_sub(self.completed)
    }
}

/// Atomic dispatch statistics for lock-free updates
///
/// # Performance
/// - Cache-line aligned to prevent false sharing between units
/// - Relaxed ordering; joins provide the happens-before for final reads
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct AtomicDispatchStats {
    launched: AtomicU64,
    released: AtomicU64,
    completed: AtomicU64,
}

impl AtomicDispatchStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn inc_launched(&self) {
        self.launched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_released(&self) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of current stats
    ///
    /// # Note
    /// Counters may be mutually inconsistent while units are still running.
    #[inline]
    pub fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            launched: self.launched.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = AtomicDispatchStats::new();
        stats.inc_launched();
        stats.inc_launched();
        stats.inc_released();
        stats.inc_completed();

        let snap = stats.snapshot();
        assert_eq!(
            snap,
            DispatchStats {
                launched: 2,
                released: 1,
                completed: 1
            }
        );
        assert_eq!(snap.in_flight(), 1);
    }
}
