//! Intermediate representation for the sbprof instrumentation pass.
//!
//! This crate provides pure IR types with no knowledge of any particular
//! guest architecture. The host framework decodes guest code into these
//! types; the pass in `sbprof` rewrites them.

mod block;
mod builder;
mod expr;
mod hook;
mod stmt;
mod word;

pub use block::*;
pub use builder::*;
pub use expr::*;
pub use hook::*;
pub use stmt::*;
pub use word::*;
