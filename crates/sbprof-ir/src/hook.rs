//! Hook-call descriptors.
//!
//! An instrumentation pass cannot call a native function directly from
//! inside a rewritten block; it registers a [`Callee`] descriptor that the
//! host invokes later, when the spliced statement is reached at runtime.
//! The descriptor is obtained through the host's [`CalleeResolver`]
//! service, which turns a raw native function pointer into something
//! insertable into a block.

use std::ffi::c_void;

use crate::expr::Expr;
use crate::word::Word;

/// Native hook function: context pointer plus one word-sized argument.
///
/// The context pointer is supplied by the host at invocation time; the
/// argument comes from evaluating the registered argument expression.
pub type HookFn = unsafe extern "C" fn(*mut c_void, u64);

/// Opaque callable descriptor for a native hook function.
#[derive(Clone, Copy, Debug)]
pub struct Callee {
    /// Name used for diagnostics and IR dumps.
    pub name: &'static str,
    /// Number of word-sized arguments the function takes.
    pub arity: u8,
    /// Resolved native entry point.
    pub func: HookFn,
}

impl Callee {
    /// Create a callee descriptor for a one-argument hook.
    #[must_use]
    pub const fn unary(name: &'static str, func: HookFn) -> Self {
        Self {
            name,
            arity: 1,
            func,
        }
    }
}

/// A call to a native hook, spliced into a block by the pass.
#[derive(Clone, Debug)]
pub struct HookCall<W: Word> {
    pub callee: Callee,
    pub args: Vec<Expr<W>>,
}

impl<W: Word> HookCall<W> {
    /// Create a one-argument hook call.
    #[must_use]
    pub fn unary(callee: Callee, arg: Expr<W>) -> Self {
        Self {
            callee,
            args: vec![arg],
        }
    }
}

/// Host service resolving a native function pointer to a [`Callee`].
///
/// The default host resolution is a pass-through, but a host may need to
/// redirect through a trampoline on platforms where a function pointer is
/// not directly the code entry point.
pub trait CalleeResolver {
    fn resolve(&self, name: &'static str, func: HookFn) -> Callee;
}

/// Pass-through resolver: the function pointer is the entry point.
#[derive(Clone, Copy, Debug, Default)]
pub struct FnEntryResolver;

impl CalleeResolver for FnEntryResolver {
    fn resolve(&self, name: &'static str, func: HookFn) -> Callee {
        Callee::unary(name, func)
    }
}
