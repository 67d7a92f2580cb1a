//! Pseudo-Instruction Overlays.
//!
//! Verifies overlay selection at a leaf (most pinned bits first, base must
//! match the leaf) and the built-in pseudo-instructions end to end.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvdecode_core::catalog::OverlayDef;
use rvdecode_core::config::{DecoderConfig, StashConfig};
use rvdecode_core::decode::builder::DecodeTableBuilder;
use rvdecode_core::decode::leaf::Leaf;
use rvdecode_core::decode::overlay::Overlay;
use rvdecode_core::isa::extract::registry;
use rvdecode_core::isa::form::FixedFields;
use rvdecode_core::isa::info::InstructionBinding;
use rvdecode_core::isa::metadata::{InstructionType as T, MetaSpec, StaticMetadata};
use rvdecode_core::isa::operand::OperandFieldId;
use rvdecode_core::{DecodeContext, Opcode};

use crate::common::encode::{
    BRANCH, JAL, JALR, OP, OP_IMM, OP_IMM_32, SYSTEM, b_type, i_type, r_type,
};
use crate::common::harness::{TestContext, def, init_tracing};

const META: MetaSpec = MetaSpec::int(&[T::Int, T::Arith]);

fn binding(mnemonic: &str, uid: u32) -> InstructionBinding {
    InstructionBinding {
        mnemonic: Arc::from(mnemonic),
        uid,
        extractor: registry::create("I_arith", FixedFields::NONE).unwrap(),
        metadata: StaticMetadata::shared(META),
        annotation: None,
    }
}

fn overlay(mnemonic: &str, base: &str, mask: Opcode, uid: u32) -> Overlay {
    Overlay {
        mask,
        value: OP_IMM,
        base: Arc::from(base),
        binding: binding(mnemonic, uid),
    }
}

const ADDI_MASK: Opcode = 0x0000_707F;
const RS1: Opcode = 0x000F_8000;
const RD: Opcode = 0x0000_0F80;
const IMM: Opcode = 0xFFF0_0000;

// ══════════════════════════════════════════════════════════
// 1. Selection at a leaf
// ══════════════════════════════════════════════════════════

#[test]
fn most_pinned_overlay_wins_regardless_of_insertion_order() {
    let mut leaf = Leaf::new(binding("addi", 0), StashConfig::new(4, 8));
    leaf.add_overlay(overlay("mv", "addi", ADDI_MASK | IMM, 1));
    leaf.add_overlay(overlay("nop", "addi", ADDI_MASK | IMM | RS1 | RD, 2));
    leaf.add_overlay(overlay("li", "addi", ADDI_MASK | RS1, 3));

    let order: Vec<&str> = leaf.overlays().iter().map(|o| &*o.binding.mnemonic).collect();
    assert_eq!(order, ["nop", "mv", "li"]);

    assert_eq!(&*leaf.resolve(i_type(OP_IMM, 0, 0, 0, 0)).mnemonic, "nop");
    assert_eq!(&*leaf.resolve(i_type(OP_IMM, 10, 0, 0, 0)).mnemonic, "mv");
    assert_eq!(&*leaf.resolve(i_type(OP_IMM, 10, 0, 0, 5)).mnemonic, "li");
    assert_eq!(&*leaf.resolve(i_type(OP_IMM, 10, 0, 11, 5)).mnemonic, "addi");
}

#[test]
fn overlay_for_another_base_never_applies() {
    let mut leaf = Leaf::new(binding("addi", 0), StashConfig::new(4, 8));
    leaf.add_overlay(overlay("bogus", "xori", ADDI_MASK | RS1, 1));
    let info = leaf.get_info(i_type(OP_IMM, 10, 0, 0, 5)).unwrap();
    assert_eq!(info.mnemonic(), "addi");
}

#[test]
fn adding_an_overlay_flushes_the_leaf() {
    let mut leaf = Leaf::new(binding("addi", 0), StashConfig::new(4, 8));
    let op = i_type(OP_IMM, 10, 0, 11, 0);
    assert_eq!(leaf.get_info(op).unwrap().mnemonic(), "addi");
    assert_eq!(leaf.stash_len(), 1);

    leaf.add_overlay(overlay("mv", "addi", ADDI_MASK | IMM, 1));
    assert_eq!(leaf.stash_len(), 0);
    assert_eq!(leaf.get_info(op).unwrap().mnemonic(), "mv");
}

#[test]
fn misrouted_overlay_is_accepted_but_inert() {
    init_tracing();
    let mut b = DecodeTableBuilder::new(StashConfig::default());
    let _ = b.add_instruction(def("addi")).unwrap();
    let _ = b.add_instruction(def("xori")).unwrap();
    // Stencil carries addi's funct3, so the overlay lands on addi's leaf.
    let misrouted = OverlayDef {
        mnemonic: "bogus",
        base: "xori",
        tag: "I_arith",
        stencil: OP_IMM,
        fixed: &["rs1"],
        meta: META,
    };
    let _ = b.add_overlay(&misrouted).unwrap();
    let mut ctx = DecodeContext::from_table(b.build(), DecoderConfig::default());

    assert_eq!(ctx.decode(i_type(OP_IMM, 10, 0, 0, 5)).unwrap().mnemonic(), "addi");
    assert_eq!(ctx.decode(i_type(OP_IMM, 10, 4, 0, 5)).unwrap().mnemonic(), "xori");
    assert_eq!(ctx.overlay_count(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Built-in pseudo-instructions
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::nop(i_type(OP_IMM, 0, 0, 0, 0), "nop")]
#[case::mv(i_type(OP_IMM, 10, 0, 11, 0), "mv")]
#[case::mv_beats_li(i_type(OP_IMM, 10, 0, 0, 0), "mv")]
#[case::li(i_type(OP_IMM, 10, 0, 0, 5), "li")]
#[case::addi(i_type(OP_IMM, 10, 0, 11, 5), "addi")]
#[case::not(i_type(OP_IMM, 10, 4, 11, -1), "not")]
#[case::xori(i_type(OP_IMM, 10, 4, 11, 1), "xori")]
#[case::neg(r_type(OP, 10, 0, 0, 11, 0x20), "neg")]
#[case::sub(r_type(OP, 10, 0, 12, 11, 0x20), "sub")]
#[case::seqz(i_type(OP_IMM, 10, 3, 11, 1), "seqz")]
#[case::snez(r_type(OP, 10, 3, 0, 11, 0), "snez")]
#[case::sext_w(i_type(OP_IMM_32, 10, 0, 11, 0), "sext.w")]
#[case::beqz(b_type(0, 10, 0, 8), "beqz")]
#[case::beq(b_type(0, 10, 11, 8), "beq")]
#[case::bnez(b_type(1, 10, 0, -4), "bnez")]
#[case::j(JAL, "j")]
#[case::jal(JAL | (1 << 7), "jal")]
#[case::ret(0x0000_8067, "ret")]
#[case::jr(0x0002_8067, "jr")]
#[case::jalr(i_type(JALR, 1, 0, 5, 0), "jalr")]
#[case::csrr(0x3000_22F3, "csrr")]
#[case::csrrs(0x3003_22F3, "csrrs")]
#[case::csrw(i_type(SYSTEM, 0, 1, 6, 0x300), "csrw")]
fn pseudo_instruction_selection(#[case] opcode: Opcode, #[case] expected: &str) {
    let mut tc = TestContext::new();
    assert_eq!(tc.mnemonic(opcode), expected, "opcode {opcode:#010x}");
}

#[test]
fn overlay_keeps_base_operands() {
    let mut tc = TestContext::new();
    let li = tc.decode(i_type(OP_IMM, 10, 0, 0, 5));
    assert_eq!(li.mnemonic(), "li");
    assert!(li.is_inst_type(T::Move));
    assert_eq!(li.int_dest_regs(), 1 << 10);
    assert_eq!(li.immediate(), 5);
    assert_eq!(tc.dasm(li.opcode()), "li x10, 5");

    let beqz = tc.decode(b_type(0, 10, 0, 8));
    assert!(beqz.is_inst_type(T::Conditional));
    assert_eq!(beqz.opcode() & 0x7F, BRANCH);
    assert_eq!(tc.dasm(beqz.opcode()), "beqz x10, 8");
}

#[test]
fn ret_still_reads_the_link_register() {
    let mut tc = TestContext::new();
    let ret = tc.decode(0x0000_8067);
    assert_eq!(ret.mnemonic(), "ret");
    assert_eq!(ret.source_regs(), 1 << 1);
    assert_eq!(ret.int_source_regs(), 1 << 1);
    assert_eq!(ret.dest_regs(), 0);
    let [rs1] = ret.source_operands() else {
        panic!("ret reads exactly one register: {:?}", ret.source_operands());
    };
    assert_eq!((rs1.field, rs1.reg, rs1.is_implied), (OperandFieldId::Rs1, 1, true));
    assert_eq!(tc.dasm(ret.opcode()), "ret");

    // jr keeps rs1 as an explicit operand.
    let jr = tc.decode(0x0001_0067);
    assert_eq!(jr.mnemonic(), "jr");
    assert_eq!(jr.source_regs(), 1 << 2);
}
