//! Guest word-size types.
//!
//! These are generic "32 vs 64 bit" types, not tied to any guest ISA.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Marker type for a 32-bit guest word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct W32;

/// Marker type for a 64-bit guest word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct W64;

/// Trait for word-size-dependent operations.
///
/// Uses marker types (W32/W64) with an associated register type so that
/// IR nodes carry immediates at the guest's natural width.
pub trait Word: Copy + Clone + Send + Sync + Default + Debug + 'static {
    /// Value type at guest word width (u32 for W32, u64 for W64).
    type Reg: Copy
        + Clone
        + Default
        + Eq
        + Ord
        + Hash
        + Debug
        + Display
        + Send
        + Sync;

    /// Word width in bits (32 or 64).
    const VALUE: u8;

    /// Bytes per word (4 for 32-bit, 8 for 64-bit).
    const WORD_BYTES: usize;

    /// Convert a u64 to guest word width.
    fn from_u64(val: u64) -> Self::Reg;

    /// Convert a guest word to u64.
    fn to_u64(val: Self::Reg) -> u64;
}

impl Word for W32 {
    type Reg = u32;

    const VALUE: u8 = 32;
    const WORD_BYTES: usize = 4;

    #[inline]
    fn from_u64(val: u64) -> u32 {
        val as u32
    }

    #[inline]
    fn to_u64(val: u32) -> u64 {
        val as u64
    }
}

impl Word for W64 {
    type Reg = u64;

    const VALUE: u8 = 64;
    const WORD_BYTES: usize = 8;

    #[inline]
    fn from_u64(val: u64) -> u64 {
        val
    }

    #[inline]
    fn to_u64(val: u64) -> u64 {
        val
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_w32() {
        assert_eq!(W32::VALUE, 32);
        assert_eq!(W32::WORD_BYTES, 4);
        assert_eq!(W32::from_u64(0x1_0000_0001), 1);
    }

    #[test]
    fn test_word_w64() {
        assert_eq!(W64::VALUE, 64);
        assert_eq!(W64::WORD_BYTES, 8);
        assert_eq!(W64::to_u64(0xFFFF_FFFF_FFFF_FFFF), u64::MAX);
    }
}
