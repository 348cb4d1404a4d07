//! Tool lifecycle.
//!
//! Mirrors the three hooks a host framework drives: construction
//! (post-init, zero-initialized store and resolved hook set), per-block
//! instrumentation with a once-per-block cache, and finalization, which
//! renders the report.

use std::ffi::c_void;
use std::io::{self, Write};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use sbprof_ir::{Block, CalleeResolver, FnEntryResolver, Word};
use sbprof_stats::{StatsStore, write_report};

use crate::instrument::{HookSet, instrument_block};

/// The instrumentation tool: statistics store, resolved hooks, and the
/// instrumented-block cache.
pub struct Tool<W: Word> {
    stats: Box<StatsStore>,
    hooks: HookSet,
    cache: FxHashMap<u64, Arc<Block<W>>>,
}

impl<W: Word> Default for Tool<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word> Tool<W> {
    /// Create a tool using the pass-through callee resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::with_resolver(&FnEntryResolver)
    }

    /// Create a tool resolving collector entry points through `resolver`.
    #[must_use]
    pub fn with_resolver(resolver: &dyn CalleeResolver) -> Self {
        Self {
            stats: Box::new(StatsStore::new()),
            hooks: HookSet::resolve(resolver),
            cache: FxHashMap::default(),
        }
    }

    /// The statistics store.
    #[must_use]
    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    /// Collector context pointer to hand to the executor.
    #[must_use]
    pub fn ctx_ptr(&self) -> *mut c_void {
        self.stats.ctx_ptr()
    }

    /// Instrument the block starting at `pc`, transforming it on first
    /// sight and serving the cached result on every later request.
    pub fn instrument(&mut self, pc: u64, block: &Block<W>) -> Arc<Block<W>> {
        if let Some(cached) = self.cache.get(&pc) {
            return Arc::clone(cached);
        }
        debug!(pc, stmts = block.len(), "instrumenting block");
        let instrumented = Arc::new(instrument_block(block, &self.hooks));
        self.cache.insert(pc, Arc::clone(&instrumented));
        instrumented
    }

    /// Number of distinct blocks instrumented so far.
    #[must_use]
    pub fn blocks_instrumented(&self) -> usize {
        self.cache.len()
    }

    /// Render the final report. The store is only read; the exit code is
    /// echoed into the report, not interpreted.
    ///
    /// # Errors
    /// Propagates writer failures.
    pub fn finish(&self, exit_code: i32, w: &mut impl Write) -> io::Result<()> {
        write_report(&self.stats, exit_code, w)
    }
}
