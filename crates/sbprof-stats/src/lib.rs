//! Statistics store, runtime collectors and reporter for sbprof.
//!
//! The store is a fixed-size, process-lifetime aggregate updated by the
//! collector entry points on every executed block and rendered once by
//! the reporter at termination.

mod collect;
mod report;
mod store;

pub use collect::*;
pub use report::*;
pub use store::*;
