//! Operand Extraction.
//!
//! Verifies register masks, immediates, register pairs, hint and reserved
//! predicates, and special fields as reported by [`DecodedInstructionInfo`].

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rvdecode_core::common::RegisterMaskExt;
use rvdecode_core::isa::extract::{Extractor, registry};
use rvdecode_core::isa::form::FixedFields;
use rvdecode_core::isa::info::{DecodedInstructionInfo, InstructionBinding};
use rvdecode_core::isa::metadata::{InstructionType as T, MetaSpec, StaticMetadata};
use rvdecode_core::isa::operand::{ImmediateType, OperandFieldId, RegOperand};
use rvdecode_core::isa::special::SpecialField;
use rvdecode_core::{DecodeError, Opcode, RegisterMask};

use crate::common::encode::{
    AMO, LOAD, MISC_MEM, OP, OP_FP, OP_IMM, STORE, c_addi, i_type, r_type, s_type,
};
use crate::common::harness::TestContext;

fn regs(list: &[u32]) -> RegisterMask {
    list.iter().fold(0, |m, &r| m | RegisterMask::of(r))
}

// ══════════════════════════════════════════════════════════
// 1. Register operands
// ══════════════════════════════════════════════════════════

#[test]
fn add_reports_sources_and_destination() {
    let mut tc = TestContext::new();
    let info = tc.decode(0x0073_02B3);

    assert_eq!(info.mnemonic(), "add");
    assert_eq!(info.opcode(), r_type(OP, 5, 0, 6, 7, 0));
    assert_eq!(info.source_regs(), regs(&[6, 7]));
    assert_eq!(info.dest_regs(), regs(&[5]));
    assert_eq!(info.int_source_regs(), info.source_regs());
    assert_eq!(info.float_source_regs(), 0);
    assert_eq!(info.immediate_type(), ImmediateType::None);
    assert_eq!(info.byte_len(), 4);
    assert!(!info.is_compressed());
    assert!(info.is_inst_type(T::Int));

    let fields: Vec<OperandFieldId> = info.source_operands().iter().map(|el| el.field).collect();
    assert_eq!(fields, [OperandFieldId::Rs1, OperandFieldId::Rs2]);
}

#[test]
fn x0_operands_are_dropped_from_no_x0_lists() {
    let mut tc = TestContext::new();
    let info = tc.decode(r_type(OP, 0, 0, 0, 7, 0));
    assert_eq!(info.source_operands().len(), 2);
    assert_eq!(info.source_operands_no_x0().len(), 1);
    assert_eq!(info.source_operands_no_x0()[0].reg, 7);
    assert!(info.dest_operands_no_x0().is_empty());
}

#[test]
fn load_address_and_store_data_are_split() {
    let mut tc = TestContext::new();

    let lw = tc.decode(i_type(LOAD, 10, 2, 2, 8));
    assert_eq!(lw.mnemonic(), "lw");
    assert_eq!(lw.source_address_regs(), regs(&[2]));
    assert_eq!(lw.source_data_regs(), 0);
    assert_eq!(lw.signed_offset(), 8);
    assert!(lw.is_inst_type(T::Load));

    let sw = tc.decode(s_type(STORE, 2, 2, 11, -4));
    assert_eq!(sw.opcode(), 0xFEB1_2E23);
    assert_eq!(sw.mnemonic(), "sw");
    assert_eq!(sw.source_address_regs(), regs(&[2]));
    assert_eq!(sw.source_data_regs(), regs(&[11]));
    assert_eq!(sw.signed_offset(), -4);
    assert_eq!(sw.immediate_type(), ImmediateType::Signed);
    assert!(sw.dest_operands().is_empty());
    assert!(sw.source_operands().iter().any(|el| el.reg == 11 && el.is_store_data));
}

#[test]
fn fp_arithmetic_uses_float_masks() {
    let mut tc = TestContext::new();
    let info = tc.decode(0x0031_00D3);
    assert_eq!(info.mnemonic(), "fadd.s");
    assert_eq!(info.int_source_regs(), 0);
    assert_eq!(info.float_source_regs(), regs(&[2, 3]));
    assert_eq!(info.float_dest_regs(), regs(&[1]));
    assert!(info.is_inst_type(T::Float));
}

// ══════════════════════════════════════════════════════════
// 2. Register pairs
// ══════════════════════════════════════════════════════════

#[test]
fn pair_load_writes_both_halves() {
    let mut tc = TestContext::rv32_pairs();
    let info = tc.decode(0x0005_3503);
    assert_eq!(info.mnemonic(), "ld");
    assert_eq!(info.dest_regs(), regs(&[10, 11]));
    assert_eq!(info.int_dest_regs(), regs(&[10, 11]));
    let rd2 = info
        .dest_operands()
        .iter()
        .find(|el| el.field == OperandFieldId::Rd2)
        .expect("companion register");
    assert_eq!(rd2.reg, 11);
}

#[test]
fn pair_store_reads_both_halves_as_data() {
    let mut tc = TestContext::rv32_pairs();
    let info = tc.decode(s_type(STORE, 3, 2, 10, 16));
    assert_eq!(info.mnemonic(), "sd");
    assert_eq!(info.source_data_regs(), regs(&[10, 11]));
    assert_eq!(info.source_address_regs(), regs(&[2]));
}

#[rstest]
#[case::odd_load_rd(i_type(LOAD, 11, 3, 10, 0), "ld")]
#[case::last_register(0x0005_3F83, "ld")]
#[case::odd_store_rs2(s_type(STORE, 3, 2, 13, 0), "sd")]
fn odd_pair_base_is_reserved(#[case] opcode: Opcode, #[case] mnemonic: &str) {
    let mut tc = TestContext::rv32_pairs();
    assert_eq!(
        tc.try_decode(opcode).unwrap_err(),
        DecodeError::IllegalOpcode {
            mnemonic: mnemonic.into(),
            opcode,
        }
    );
}

#[test]
fn last_register_never_names_a_companion() {
    // rd = x31 has no x32: the reserved encoding still yields a sane info.
    let binding = InstructionBinding {
        mnemonic: "ld".into(),
        uid: 0,
        extractor: registry::create("I_load_pair", FixedFields::NONE).unwrap(),
        metadata: StaticMetadata::shared(MetaSpec::int(&[T::Int, T::Load])),
        annotation: None,
    };
    let info = DecodedInstructionInfo::new(binding, 0x0005_3F83).unwrap();
    assert!(info.is_illop());
    assert_eq!(info.dest_regs(), regs(&[31]));
    assert!(info.dest_operands().iter().all(|el| el.field != OperandFieldId::Rd2));
}

#[test]
fn pair_on_x0_has_no_companion() {
    let mut tc = TestContext::rv32_pairs();
    let info = tc.decode(i_type(LOAD, 0, 3, 10, 0));
    assert!(!info.is_illop());
    assert!(info.dest_operands().iter().all(|el| el.field != OperandFieldId::Rd2));
    assert_eq!(info.dest_regs() & regs(&[1]), 0);
}

/// Companion bit expected for a pair based at `base`: none for `x0` or an
/// odd base.
fn companion(base: u32) -> RegisterMask {
    if base != 0 && base % 2 == 0 {
        RegisterMask::of(base + 1)
    } else {
        0
    }
}

fn has_field(ops: &[RegOperand], field: OperandFieldId) -> bool {
    ops.iter().any(|op| op.field == field)
}

proptest! {
    #[test]
    fn load_pair_companion_tracks_rd(rd in 0u32..32) {
        let ext = registry::create("I_load_pair", FixedFields::NONE).unwrap();
        let opcode = i_type(LOAD, rd, 3, 10, 0);
        prop_assert_eq!(ext.is_illop(opcode), rd % 2 != 0);
        prop_assert_eq!(ext.dest_regs(opcode) & !RegisterMask::of(rd), companion(rd));
        prop_assert_eq!(has_field(&ext.dest_operands(opcode), OperandFieldId::Rd2), companion(rd) != 0);
    }

    #[test]
    fn stack_load_pair_companion_tracks_rd(rd in 0u32..32) {
        let ext = registry::create("CI_ldsp_pair", FixedFields::NONE).unwrap();
        // c.ldsp rd, 0(sp)
        let opcode = (0b011 << 13) | (u64::from(rd) << 7) | 0b10;
        prop_assert_eq!(ext.is_illop(opcode), rd == 0 || rd % 2 != 0);
        prop_assert_eq!(ext.dest_regs(opcode) & !RegisterMask::of(rd), companion(rd));
        prop_assert_eq!(has_field(&ext.dest_operands(opcode), OperandFieldId::Rd2), companion(rd) != 0);
    }

    #[test]
    fn amo_pair_companions_track_rd_and_rs2(rd in 0u32..32, rs2 in 0u32..32) {
        let ext = registry::create("AMO_pair", FixedFields::NONE).unwrap();
        // amocas.d rd, rs2, (x10)
        let opcode = r_type(AMO, rd, 3, 10, rs2, 0x05 << 2);
        prop_assert_eq!(ext.is_illop(opcode), rd % 2 != 0 || rs2 % 2 != 0);
        prop_assert_eq!(ext.dest_regs(opcode) & !RegisterMask::of(rd), companion(rd));
        prop_assert_eq!(
            ext.source_data_regs(opcode) & !RegisterMask::of(rs2),
            companion(rs2)
        );
        prop_assert_eq!(has_field(&ext.dest_operands(opcode), OperandFieldId::Rd2), companion(rd) != 0);
        prop_assert_eq!(
            has_field(&ext.source_operands(opcode), OperandFieldId::Rs2Pair),
            companion(rs2) != 0
        );
    }
}

// ══════════════════════════════════════════════════════════
// 3. Hints and reserved encodings
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::c_addi_zero(c_addi(10, 0), "c.addi", true)]
#[case::c_addi_nonzero(c_addi(10, 1), "c.addi", false)]
#[case::c_addi_negative(c_addi(10, -32), "c.addi", false)]
#[case::c_srli_zero(0x8001, "c.srli", true)]
#[case::c_li_x0(0x4001 | (5 << 2), "c.li", true)]
#[case::addi_to_x0(i_type(OP_IMM, 0, 0, 10, 5), "addi", true)]
#[case::canonical_nop(i_type(OP_IMM, 0, 0, 0, 0), "nop", false)]
fn hint_detection(#[case] opcode: Opcode, #[case] mnemonic: &str, #[case] hint: bool) {
    let mut tc = TestContext::new();
    let info = tc.decode(opcode);
    assert_eq!(info.mnemonic(), mnemonic);
    assert_eq!(info.is_hint(), hint, "{mnemonic} {opcode:#06x}");
    assert!(!info.is_illop());
}

#[test]
fn c_addi_immediate_is_sign_extended() {
    let mut tc = TestContext::new();
    let info = tc.decode(c_addi(10, -32));
    assert_eq!(info.signed_offset(), -32);
    assert_eq!(info.immediate_type(), ImmediateType::Signed);
    assert_eq!(info.dest_regs(), regs(&[10]));
}

#[test]
fn c_lui_zero_immediate_is_reserved() {
    let mut tc = TestContext::new();
    let opcode = 0x6501;
    assert_eq!(
        tc.try_decode(opcode).unwrap_err(),
        DecodeError::IllegalOpcode {
            mnemonic: "c.lui".into(),
            opcode,
        }
    );
}

// ══════════════════════════════════════════════════════════
// 4. Special fields
// ══════════════════════════════════════════════════════════

#[test]
fn amo_ordering_bits() {
    let mut tc = TestContext::new();
    let info = tc.decode(0x0463_A2AF);
    assert_eq!(info.mnemonic(), "amoadd.w");
    assert_eq!(info.special_field(SpecialField::Aq), Some(1));
    assert_eq!(info.special_field(SpecialField::Rl), Some(0));
    assert_eq!(info.special_field(SpecialField::Wd), Some(0));
    assert_eq!(info.source_address_regs(), regs(&[7]));
    assert_eq!(info.source_data_regs(), regs(&[6]));

    // Same operation discarding the loaded value.
    let discard = tc.decode(r_type(AMO, 0, 2, 7, 6, 0b000_0011));
    assert_eq!(discard.special_field(SpecialField::Wd), Some(1));
    assert_eq!(discard.special_field(SpecialField::Aq), Some(1));
    assert_eq!(discard.special_field(SpecialField::Rl), Some(1));
}

#[test]
fn csr_and_fence_fields() {
    let mut tc = TestContext::new();
    let csrrw = tc.decode(0x3003_12F3);
    assert_eq!(csrrw.special_field(SpecialField::Csr), Some(0x300));

    let fence = tc.decode(0x0330_000F);
    assert_eq!(fence.opcode() & 0x7F, MISC_MEM);
    assert_eq!(fence.special_field(SpecialField::Pred), Some(0b0011));
    assert_eq!(fence.special_field(SpecialField::Succ), Some(0b0011));
    assert_eq!(fence.special_field(SpecialField::Fm), Some(0));
}

#[test]
fn rounding_mode_is_free_only_where_unpinned() {
    let mut tc = TestContext::new();
    let fadd = tc.decode(r_type(OP_FP, 1, 0b011, 2, 3, 0));
    assert_eq!(fadd.special_field(SpecialField::Rm), Some(0b011));

    // add pins funct3, which doubles as the rounding-mode field of the form.
    let add = tc.decode(0x0073_02B3);
    assert_eq!(add.special_field(SpecialField::Rm), None);
    assert!(add.special_fields().is_empty());
}

#[test]
fn pinned_and_foreign_fields_fail_differently() {
    let mut tc = TestContext::new();
    let add = tc.decode(0x0073_02B3);
    let ext = add.extractor();
    let meta = add.metadata().as_ref();

    assert_eq!(
        ext.special_field(SpecialField::Rm, add.opcode(), meta),
        Err(DecodeError::UnsupportedSpecialField {
            field: SpecialField::Rm,
            extractor: "R_arith",
        })
    );
    assert_eq!(
        ext.special_field(SpecialField::Csr, add.opcode(), meta),
        Err(DecodeError::InvalidSpecialField {
            field: SpecialField::Csr,
            extractor: "R_arith",
        })
    );
}
