//! Runtime collector entry points.
//!
//! These are the native functions the pass splices into blocks. They run
//! on every block execution, so each one is a single counter update with
//! no allocation and no branching beyond the null guard.
//!
//! # Safety
//!
//! The host must ensure:
//! - `ctx` is a valid pointer to a [`StatsStore`]
//! - the store outlives all calls to these functions

use std::ffi::c_void;

use crate::store::StatsStore;

/// Reconstruct the store reference from the opaque context pointer.
unsafe fn store_from_ctx<'a>(ctx: *mut c_void) -> Option<&'a StatsStore> {
    unsafe { ctx.cast::<StatsStore>().as_ref() }
}

/// Record the byte length of one executed guest instruction.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sbprof_record_instr_len(ctx: *mut c_void, len: u64) {
    unsafe {
        if let Some(stats) = store_from_ctx(ctx) {
            stats.record_instr_len(len);
        }
    }
}

/// Record the page offset of one executed store address.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sbprof_record_mem_access(ctx: *mut c_void, addr: u64) {
    unsafe {
        if let Some(stats) = store_from_ctx(ctx) {
            stats.record_mem_access(addr);
        }
    }
}

/// Add a flushed block-local store tally to the running total.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sbprof_record_store_count(ctx: *mut c_void, count: u64) {
    unsafe {
        if let Some(stats) = store_from_ctx(ctx) {
            stats.record_store_count(count);
        }
    }
}

impl StatsStore {
    /// Opaque context pointer for the collector entry points.
    #[must_use]
    pub fn ctx_ptr(&self) -> *mut c_void {
        std::ptr::from_ref(self).cast_mut().cast::<c_void>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collectors_update_store() {
        let stats = StatsStore::new();
        let ctx = stats.ctx_ptr();
        unsafe {
            sbprof_record_instr_len(ctx, 4);
            sbprof_record_mem_access(ctx, 0x200a);
            sbprof_record_store_count(ctx, 2);
        }
        assert_eq!(stats.instr_len_count(4), 1);
        assert_eq!(stats.mem_access_count(0x00a), 1);
        assert_eq!(stats.store_total(), 2);
    }

    #[test]
    fn test_collectors_ignore_null_ctx() {
        unsafe {
            sbprof_record_instr_len(std::ptr::null_mut(), 4);
            sbprof_record_store_count(std::ptr::null_mut(), 1);
        }
    }
}
