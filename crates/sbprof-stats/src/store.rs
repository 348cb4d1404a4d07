//! Process-wide statistics store.

use std::sync::atomic::{AtomicU64, Ordering};

/// Upper bound (exclusive) on recordable instruction lengths.
///
/// The framework's decoder never produces an instruction longer than
/// this; a length at or past the bound is a contract breach and aborts.
pub const MAX_INSTR_LEN: usize = 16;

/// Page size used to fold store addresses into offsets.
pub const PAGE_SIZE: usize = 4096;

/// Process-wide counters: instruction-length histogram, store-address
/// page-offset histogram, and the cumulative guest-store total.
///
/// All counters are relaxed atomics, so updates from a multi-threaded
/// instrumented subject stay exact. Each update is a single `fetch_add`;
/// nothing here blocks or allocates.
pub struct StatsStore {
    instr_len: [AtomicU64; MAX_INSTR_LEN],
    mem_access: [AtomicU64; PAGE_SIZE],
    stores: AtomicU64,
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsStore {
    /// Create a zero-initialized store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            instr_len: [const { AtomicU64::new(0) }; MAX_INSTR_LEN],
            mem_access: [const { AtomicU64::new(0) }; PAGE_SIZE],
            stores: AtomicU64::new(0),
        }
    }

    /// Record one executed instruction of `len` bytes.
    ///
    /// # Panics
    /// Aborts on a length at or past [`MAX_INSTR_LEN`]; the upstream
    /// decoder guarantees this never happens.
    #[inline]
    pub fn record_instr_len(&self, len: u64) {
        assert!(
            (len as usize) < MAX_INSTR_LEN,
            "instruction length {len} out of range"
        );
        self.instr_len[len as usize].fetch_add(1, Ordering::Relaxed);
    }

    /// Record one store to `addr`, folded to its page offset.
    #[inline]
    pub fn record_mem_access(&self, addr: u64) {
        self.mem_access[(addr as usize) % PAGE_SIZE].fetch_add(1, Ordering::Relaxed);
    }

    /// Add a flushed block-local store tally to the running total.
    #[inline]
    pub fn record_store_count(&self, count: u64) {
        self.stores.fetch_add(count, Ordering::Relaxed);
    }

    /// Count of executed instructions of the given length.
    #[must_use]
    pub fn instr_len_count(&self, len: usize) -> u64 {
        self.instr_len[len].load(Ordering::Relaxed)
    }

    /// Count of stores whose address folded to the given page offset.
    #[must_use]
    pub fn mem_access_count(&self, offset: usize) -> u64 {
        self.mem_access[offset].load(Ordering::Relaxed)
    }

    /// Total executed guest store instructions.
    #[must_use]
    pub fn store_total(&self) -> u64 {
        self.stores.load(Ordering::Relaxed)
    }

    /// Sum of the instruction-length histogram (= instructions executed).
    #[must_use]
    pub fn instr_total(&self) -> u64 {
        self.instr_len
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Sum of the page-offset histogram (= stores executed).
    #[must_use]
    pub fn mem_access_total(&self) -> u64 {
        self.mem_access
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Nonzero page-offset entries in increasing offset order.
    pub fn nonzero_offsets(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.mem_access
            .iter()
            .enumerate()
            .map(|(off, c)| (off, c.load(Ordering::Relaxed)))
            .filter(|&(_, n)| n != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_zeroed() {
        let stats = StatsStore::new();
        assert_eq!(stats.store_total(), 0);
        assert_eq!(stats.instr_total(), 0);
        assert_eq!(stats.mem_access_total(), 0);
        assert_eq!(stats.nonzero_offsets().count(), 0);
    }

    #[test]
    fn test_record_instr_len() {
        let stats = StatsStore::new();
        stats.record_instr_len(4);
        stats.record_instr_len(4);
        stats.record_instr_len(15);
        assert_eq!(stats.instr_len_count(4), 2);
        assert_eq!(stats.instr_len_count(15), 1);
        assert_eq!(stats.instr_total(), 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_record_instr_len_over_bound() {
        StatsStore::new().record_instr_len(MAX_INSTR_LEN as u64);
    }

    #[test]
    fn test_record_mem_access_folds_pages() {
        let stats = StatsStore::new();
        let page = PAGE_SIZE as u64;
        stats.record_mem_access(page * 3 + 10);
        stats.record_mem_access(page * 7 + 10);
        assert_eq!(stats.mem_access_count(10), 2);
        assert_eq!(stats.nonzero_offsets().collect::<Vec<_>>(), vec![(10, 2)]);
    }

    #[test]
    fn test_concurrent_updates_are_exact() {
        let stats = StatsStore::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        stats.record_instr_len(4);
                        stats.record_mem_access(10);
                        stats.record_store_count(1);
                    }
                });
            }
        });
        assert_eq!(stats.instr_len_count(4), 4000);
        assert_eq!(stats.mem_access_count(10), 4000);
        assert_eq!(stats.store_total(), 4000);
    }

    #[test]
    fn test_record_store_count_accumulates() {
        let stats = StatsStore::new();
        stats.record_store_count(3);
        stats.record_store_count(0);
        stats.record_store_count(2);
        assert_eq!(stats.store_total(), 5);
    }
}
