//! Named contiguous bit ranges within an encoding.
//!
//! A [`Field`] is the smallest unit of an encoding form: an immutable
//! (low bit, width) pair with a name. All operations are `const fn` so forms can
//! be declared as `static` items and validated at compile time.

use crate::common::Opcode;

/// Returns a mask with the low `width` bits set.
#[inline(always)]
pub const fn low_bits(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Sign-extends the low `bits` bits of `value` to 64 bits.
///
/// # Arguments
///
/// * `value` - The raw value; bits above `bits` are ignored.
/// * `bits` - Width of the signed quantity (1 to 64).
#[inline(always)]
pub const fn sign_extend(value: u64, bits: u32) -> i64 {
    if bits == 0 || bits >= u64::BITS {
        return value as i64;
    }
    let shift = u64::BITS - bits;
    ((value << shift) as i64) >> shift
}

/// A named contiguous bit range `[lsb, lsb + width)` of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    name: &'static str,
    lsb: u32,
    width: u32,
}

impl Field {
    /// Creates a field starting at bit `lsb` spanning `width` bits.
    pub const fn new(name: &'static str, lsb: u32, width: u32) -> Self {
        assert!(width > 0, "field width must be non-zero");
        assert!(lsb + width <= u64::BITS, "field exceeds 64 bits");
        Self { name, lsb, width }
    }

    /// Field name as used by instruction definitions (`rd`, `funct3`, ...).
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Lowest bit position.
    pub const fn lsb(&self) -> u32 {
        self.lsb
    }

    /// Highest bit position (inclusive).
    pub const fn msb(&self) -> u32 {
        self.lsb + self.width - 1
    }

    /// Width in bits.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Extracts the field value from `opcode`.
    #[inline(always)]
    pub const fn extract(&self, opcode: Opcode) -> u64 {
        (opcode >> self.lsb) & low_bits(self.width)
    }

    /// Places `value` at the field position; bits beyond the width are dropped.
    #[inline(always)]
    pub const fn insert(&self, value: u64) -> Opcode {
        (value & low_bits(self.width)) << self.lsb
    }

    /// Opcode-space mask covering the field.
    #[inline(always)]
    pub const fn mask(&self) -> Opcode {
        low_bits(self.width) << self.lsb
    }

    /// Returns `true` if every bit of the field is covered by `fixed_mask`.
    #[inline(always)]
    pub const fn is_fixed(&self, fixed_mask: Opcode) -> bool {
        fixed_mask & self.mask() == self.mask()
    }

    /// Returns `true` if this field shares any bit with `other`.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.mask() & other.mask() != 0
    }
}
