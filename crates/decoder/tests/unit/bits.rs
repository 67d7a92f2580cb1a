//! Field and Swizzle Properties.
//!
//! Verifies the two bit-level primitives every extractor is built on:
//! contiguous [`Field`]s and scrambled-immediate [`Swizzler`] ranges.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rvdecode_core::isa::field::{Field, low_bits, sign_extend};
use rvdecode_core::isa::form;
use rvdecode_core::isa::operand::ImmediateType;
use rvdecode_core::isa::swizzle::{BitRange, Swizzler};

use crate::common::encode::c_lw;
use crate::common::harness::TestContext;

/// Scatters a packed value back into `ranges`; the inverse of `Swizzler::extract`.
fn scatter(value: u64, ranges: &[BitRange]) -> u64 {
    let mut out = 0;
    let mut pos = 0;
    for r in ranges {
        out |= ((value >> pos) & low_bits(r.width())) << r.lo();
        pos += r.width();
    }
    out
}

/// Gapless ranges covering the low bits of a value, in shuffled order.
fn arb_ranges() -> impl Strategy<Value = Vec<BitRange>> {
    proptest::collection::vec(1u32..=6, 1..8).prop_flat_map(|widths| {
        let mut lo = 0;
        let ranges: Vec<BitRange> = widths
            .iter()
            .map(|w| {
                let r = BitRange::span(lo, lo + w - 1);
                lo += w;
                r
            })
            .collect();
        Just(ranges).prop_shuffle()
    })
}

/// Every field of every built-in form.
fn all_fields() -> Vec<Field> {
    form::ALL
        .iter()
        .flat_map(|f| f.fields().iter().copied())
        .collect()
}

// ══════════════════════════════════════════════════════════
// 1. Fields
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn field_reinsert_matches_shift_and_mask(opcode in any::<u32>()) {
        let opcode = u64::from(opcode);
        for field in all_fields() {
            let value = field.extract(opcode);
            prop_assert_eq!(value, (opcode >> field.lsb()) & low_bits(field.width()));
            prop_assert_eq!(field.insert(value), opcode & field.mask());
        }
    }

    #[test]
    fn sign_extend_preserves_low_bits(value in any::<u64>(), bits in 1u32..64) {
        let extended = sign_extend(value, bits) as u64;
        prop_assert_eq!(extended & low_bits(bits), value & low_bits(bits));
    }
}

#[test]
fn field_mask_and_overlap() {
    let rd = Field::new("rd", 7, 5);
    let funct3 = Field::new("funct3", 12, 3);
    assert_eq!(rd.mask(), 0xF80);
    assert_eq!(rd.msb(), 11);
    assert!(!rd.overlaps(&funct3));
    assert!(rd.is_fixed(0xFFF));
    assert!(!rd.is_fixed(0x780));
}

// ══════════════════════════════════════════════════════════
// 2. Swizzler
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn swizzle_round_trips_gapless_ranges(value in any::<u64>(), ranges in arb_ranges()) {
        let width = Swizzler::width(&ranges);
        let packed = Swizzler::extract(value, &ranges);
        prop_assert!(packed <= low_bits(width));
        prop_assert_eq!(scatter(packed, &ranges), value & low_bits(width));
    }
}

#[test]
fn swizzle_documented_range_order() {
    // {6}, {2}, {3..5}: bit 6 lands at bit 0, bit 2 at bit 1, bits 5:3 at bits 4:2.
    let ranges = [BitRange::bit(6), BitRange::bit(2), BitRange::span(3, 5)];
    assert_eq!(Swizzler::extract(0b11010, &ranges), 0b01100);
    assert_eq!(Swizzler::width(&ranges), 5);
}

// ══════════════════════════════════════════════════════════
// 3. Compressed load-word immediate
// ══════════════════════════════════════════════════════════

/// `c.lw` offset layout: uimm[2] at bit 6, uimm[5:3] at bits 12:10, uimm[6] at bit 5.
const C_LW_IMM: [BitRange; 3] = [BitRange::bit(6), BitRange::span(10, 12), BitRange::bit(5)];

#[test]
fn c_lw_immediate_is_swizzled() {
    let mut tc = TestContext::new();
    let opcode = c_lw(10, 9, 44);
    assert_eq!(opcode, 0x54C8);

    let info = tc.decode(opcode);
    assert_eq!(info.mnemonic(), "c.lw");
    assert_eq!(Swizzler::extract(opcode, &C_LW_IMM) << 2, 44);
    assert_eq!(info.immediate(), 44);
    assert_eq!(info.immediate_type(), ImmediateType::Unsigned);
    assert_eq!(info.int_dest_regs(), 1 << 10);
    assert_eq!(info.source_address_regs(), 1 << 9);
}

#[test]
fn c_lw_offsets_decode_exactly() {
    let mut tc = TestContext::new();
    for uimm in (0..128).step_by(4) {
        for (rd, rs1) in [(8, 15), (11, 8), (15, 12)] {
            let info = tc.decode(c_lw(rd, rs1, uimm));
            assert_eq!(info.immediate(), u64::from(uimm), "c.lw x{rd}, {uimm}(x{rs1})");
            assert_eq!(info.byte_len(), 2);
            assert!(info.is_compressed());
        }
    }
}
