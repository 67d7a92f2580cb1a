//! Vector Instructions.
//!
//! Verifies `vtype` decoding of the configuration instructions, the implicit
//! `v0` mask source and the register classes of vector memory accesses.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvdecode_core::RegisterMask;
use rvdecode_core::common::RegisterMaskExt;
use rvdecode_core::isa::metadata::InstructionType as T;
use rvdecode_core::isa::operand::{ImmediateType, OperandFieldId};
use rvdecode_core::isa::special::SpecialField;

use crate::common::encode::{v_type, vsetivli, vsetvli, vtype};
use crate::common::harness::TestContext;

fn regs(list: &[u32]) -> RegisterMask {
    list.iter().fold(0, |m, &r| m | RegisterMask::of(r))
}

// ══════════════════════════════════════════════════════════
// 1. Configuration
// ══════════════════════════════════════════════════════════

#[test]
fn vsetvli_decodes_vtype() {
    let mut tc = TestContext::new();
    // vsetvli a0, a1, e32, m1, ta, ma
    let opcode = vsetvli(10, 11, vtype(0, 2, true, true));
    assert_eq!(opcode, 0x0D05_F557);

    let info = tc.decode(opcode);
    assert_eq!(info.mnemonic(), "vsetvli");
    assert_eq!(info.immediate(), 0xD0);
    assert_eq!(info.immediate_type(), ImmediateType::Unsigned);
    assert_eq!(info.special_field(SpecialField::Sew), Some(32));
    assert_eq!(info.special_field(SpecialField::Lmul), Some(0));
    assert_eq!(info.special_field(SpecialField::Ta), Some(1));
    assert_eq!(info.special_field(SpecialField::Ma), Some(1));
    assert_eq!(info.special_field(SpecialField::Avl), None);
    assert_eq!(info.int_source_regs(), regs(&[11]));
    assert_eq!(info.int_dest_regs(), regs(&[10]));
    assert!(info.is_inst_type(T::VSet));
}

#[rstest]
#[case::e8(0, 8)]
#[case::e16(1, 16)]
#[case::e32(2, 32)]
#[case::e64(3, 64)]
fn selected_element_width_is_in_bits(#[case] vsew: u32, #[case] bits: u64) {
    let mut tc = TestContext::new();
    let info = tc.decode(vsetvli(5, 6, vtype(1, vsew, false, false)));
    assert_eq!(info.special_field(SpecialField::Sew), Some(bits));
    assert_eq!(info.special_field(SpecialField::Lmul), Some(1));
    assert_eq!(info.special_field(SpecialField::Ta), Some(0));
}

#[test]
fn vsetivli_adds_immediate_vector_length() {
    let mut tc = TestContext::new();
    // vsetivli a0, 4, e64, m2, tu, ma
    let info = tc.decode(vsetivli(10, 4, vtype(1, 3, false, true)));
    assert_eq!(info.mnemonic(), "vsetivli");
    assert_eq!(info.special_field(SpecialField::Avl), Some(4));
    assert_eq!(info.special_field(SpecialField::Sew), Some(64));
    assert_eq!(info.special_field(SpecialField::Lmul), Some(1));
    assert_eq!(info.special_field(SpecialField::Ma), Some(1));
    assert_eq!(info.int_source_regs(), 0, "the AVL is an immediate");
    assert_eq!(info.int_dest_regs(), regs(&[10]));
}

// ══════════════════════════════════════════════════════════
// 2. Masking
// ══════════════════════════════════════════════════════════

#[test]
fn masked_op_reads_v0() {
    let mut tc = TestContext::new();
    let opcode = v_type(0, true, 2, 3, 0, 1);
    assert_eq!(opcode, 0x0021_80D7);

    let info = tc.decode(opcode);
    assert_eq!(info.mnemonic(), "vadd.vv");
    assert_eq!(info.vector_source_regs(), regs(&[0, 2, 3]));
    assert_eq!(info.vector_dest_regs(), regs(&[1]));
    assert_eq!(info.int_source_regs(), 0);
    assert_eq!(info.special_field(SpecialField::Vm), Some(0));
    assert!(
        info.source_operands()
            .iter()
            .any(|el| el.field == OperandFieldId::Vm && el.reg == 0)
    );
}

#[test]
fn unmasked_op_has_no_mask_source() {
    let mut tc = TestContext::new();
    let info = tc.decode(v_type(0, false, 2, 3, 0, 1));
    assert_eq!(info.vector_source_regs(), regs(&[2, 3]));
    assert_eq!(info.special_field(SpecialField::Vm), Some(1));
}

#[test]
fn scalar_operand_uses_integer_class() {
    let mut tc = TestContext::new();
    // vadd.vx v1, v2, a0
    let info = tc.decode(v_type(0, false, 2, 10, 4, 1));
    assert_eq!(info.mnemonic(), "vadd.vx");
    assert_eq!(info.int_source_regs(), regs(&[10]));
    assert_eq!(info.vector_source_regs(), regs(&[2]));
}

#[test]
fn vector_immediate_is_signed_five_bits() {
    let mut tc = TestContext::new();
    // vadd.vi v1, v2, -3
    let info = tc.decode(v_type(0, false, 2, (-3_i32 as u32) & 0x1F, 3, 1));
    assert_eq!(info.mnemonic(), "vadd.vi");
    assert_eq!(info.signed_offset(), -3);
    assert_eq!(info.immediate_type(), ImmediateType::Signed);
    assert_eq!(info.vector_source_regs(), regs(&[2]));
}

#[test]
fn pinned_mask_bit_is_not_reported() {
    let mut tc = TestContext::new();
    // vmv.v.i v4, 7
    let info = tc.decode(v_type(0b01_0111, false, 0, 7, 3, 4));
    assert_eq!(info.mnemonic(), "vmv.v.i");
    assert_eq!(info.special_field(SpecialField::Vm), None);
    assert_eq!(info.immediate(), 7);
}

// ══════════════════════════════════════════════════════════
// 3. Memory
// ══════════════════════════════════════════════════════════

#[test]
fn unit_stride_load() {
    let mut tc = TestContext::new();
    // vle32.v v1, (a0)
    let info = tc.decode(0x0205_6087);
    assert_eq!(info.mnemonic(), "vle32.v");
    assert_eq!(info.source_address_regs(), regs(&[10]));
    assert_eq!(info.int_source_regs(), regs(&[10]));
    assert_eq!(info.vector_dest_regs(), regs(&[1]));
    assert_eq!(info.special_field(SpecialField::Nf), None);
    assert!(info.is_inst_type(T::UnitStride));
}

#[test]
fn unit_stride_store_reads_data_vector() {
    let mut tc = TestContext::new();
    // vse32.v v4, (a0)
    let info = tc.decode(0x0205_6227);
    assert_eq!(info.mnemonic(), "vse32.v");
    assert_eq!(info.source_address_regs(), regs(&[10]));
    assert_eq!(info.source_data_regs(), regs(&[4]));
    assert_eq!(info.vector_source_regs(), regs(&[4]));
    assert!(info.dest_operands().is_empty());
}

#[rstest]
#[case::masked(0x0021_80D7, "vadd.vv v1, v2, v3, v0.t")]
#[case::unmasked(0x0221_80D7, "vadd.vv v1, v2, v3")]
#[case::scalar(v_type(0, false, 2, 10, 4, 1), "vadd.vx v1, v2, x10")]
#[case::immediate(v_type(0, false, 2, 29, 3, 1), "vadd.vi v1, v2, -3")]
#[case::accumulate(v_type(0b10_1101, false, 3, 2, 2, 1), "vmacc.vv v1, v2, v3")]
#[case::unit_load(0x0205_6087, "vle32.v v1, (x10)")]
fn vector_disassembly(#[case] opcode: u64, #[case] expected: &str) {
    let mut tc = TestContext::new();
    assert_eq!(tc.dasm(opcode), expected);
}

#[test]
fn accumulator_is_read_and_written() {
    let mut tc = TestContext::new();
    let info = tc.decode(v_type(0b10_1101, true, 3, 2, 2, 1));
    assert_eq!(info.mnemonic(), "vmacc.vv");
    assert_eq!(info.vector_source_regs(), regs(&[0, 1, 2, 3]));
    assert_eq!(info.vector_dest_regs(), regs(&[1]));
    assert!(info.is_inst_type(T::Mac));
}
