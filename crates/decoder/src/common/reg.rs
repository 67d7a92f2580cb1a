//! Register bitmask helpers.
//!
//! Register masks are plain `u64` values; this module adds the handful of
//! operations extractors and callers need without wrapping the type.

use super::RegisterMask;

/// Convenience operations on [`RegisterMask`].
pub trait RegisterMaskExt {
    /// Mask with only register `idx` set.
    fn of(idx: u32) -> Self;

    /// Returns `true` if register `idx` participates.
    fn has(self, idx: u32) -> bool;

    /// Register indices in ascending order.
    fn registers(self) -> RegisterIter;
}

impl RegisterMaskExt for RegisterMask {
    #[inline(always)]
    fn of(idx: u32) -> Self {
        1u64 << idx
    }

    #[inline(always)]
    fn has(self, idx: u32) -> bool {
        idx < 64 && self & (1u64 << idx) != 0
    }

    fn registers(self) -> RegisterIter {
        RegisterIter { remaining: self }
    }
}

/// Iterator over the set bits of a register mask, lowest first.
#[derive(Clone, Copy, Debug)]
pub struct RegisterIter {
    remaining: RegisterMask,
}

impl Iterator for RegisterIter {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.remaining.trailing_zeros();
        self.remaining &= self.remaining - 1;
        Some(idx)
    }
}
