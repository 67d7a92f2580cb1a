//! Reassembly of scrambled bit ranges.
//!
//! Branch, jump and most compressed immediates are spread over non-adjacent
//! opcode bits. [`Swizzler::extract`] gathers an ordered list of source ranges
//! and packs them into a contiguous value: the first range lands in the least
//! significant bits and every following range is placed directly above the
//! previous one. Ranges are not checked for overlap.

use crate::isa::field::low_bits;

/// An inclusive source bit range `[lo, hi]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitRange {
    lo: u32,
    hi: u32,
}

impl BitRange {
    /// A single source bit.
    pub const fn bit(n: u32) -> Self {
        Self { lo: n, hi: n }
    }

    /// An inclusive span `[lo, hi]`.
    pub const fn span(lo: u32, hi: u32) -> Self {
        assert!(lo <= hi, "bit range must be ordered low to high");
        Self { lo, hi }
    }

    /// Number of bits in the range.
    pub const fn width(&self) -> u32 {
        self.hi - self.lo + 1
    }

    /// Lowest source bit.
    pub const fn lo(&self) -> u32 {
        self.lo
    }
}

/// Stateless helper for swizzled immediates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Swizzler;

impl Swizzler {
    /// Gathers `ranges` from `value`, packing them low to high in listed order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvdecode_core::isa::swizzle::{BitRange, Swizzler};
    ///
    /// let v = Swizzler::extract(0b11010, &[BitRange::bit(6), BitRange::bit(2), BitRange::span(3, 5)]);
    /// assert_eq!(v, 0b01100);
    /// ```
    #[inline]
    pub const fn extract(value: u64, ranges: &[BitRange]) -> u64 {
        let mut out = 0;
        let mut pos = 0;
        let mut i = 0;
        while i < ranges.len() {
            let r = ranges[i];
            let w = r.width();
            out |= ((value >> r.lo) & low_bits(w)) << pos;
            pos += w;
            i += 1;
        }
        out
    }

    /// Total width of the value produced by `ranges`.
    pub const fn width(ranges: &[BitRange]) -> u32 {
        let mut total = 0;
        let mut i = 0;
        while i < ranges.len() {
            total += ranges[i].width();
            i += 1;
        }
        total
    }
}
