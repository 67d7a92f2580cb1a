//! Zcmp Push/Pop and Paired Moves.
//!
//! Verifies register-list expansion, the XLEN-scaled stack adjustment, the
//! reserved register lists and the saved-register pair moves.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvdecode_core::common::RegisterMaskExt;
use rvdecode_core::common::constants::{REG_RA, REG_SP};
use rvdecode_core::config::{DecoderConfig, Extension as X, IsaConfig};
use rvdecode_core::isa::metadata::InstructionType as T;
use rvdecode_core::isa::special::SpecialField;
use rvdecode_core::{DecodeError, Opcode, RegisterMask};

use crate::common::encode::cm_stack;
use crate::common::harness::TestContext;

const PUSH: Opcode = 0xB802;
const POP: Opcode = 0xBA02;
const POPRETZ: Opcode = 0xBC02;
const POPRET: Opcode = 0xBE02;

fn regs(list: &[u32]) -> RegisterMask {
    list.iter().fold(0, |m, &r| m | RegisterMask::of(r))
}

/// `{ra, s0-s1}`.
fn ra_s0_s1() -> RegisterMask {
    regs(&[REG_RA, 8, 9])
}

// ══════════════════════════════════════════════════════════
// 1. Push and pop
// ══════════════════════════════════════════════════════════

#[test]
fn push_stores_list_and_moves_sp_down() {
    let mut tc = TestContext::zcmp();
    let opcode = cm_stack(PUSH, 6, 0);
    assert_eq!(opcode, 0xB862);

    let info = tc.decode(opcode);
    assert_eq!(info.mnemonic(), "cm.push");
    assert_eq!(info.source_regs(), ra_s0_s1() | RegisterMask::of(REG_SP));
    assert_eq!(info.source_data_regs(), ra_s0_s1());
    assert_eq!(info.source_address_regs(), RegisterMask::of(REG_SP));
    assert_eq!(info.dest_regs(), RegisterMask::of(REG_SP));
    assert_eq!(info.stack_adj(), Some(-32));
    assert_eq!(info.special_field(SpecialField::Rlist), Some(6));
    assert!(info.is_inst_type(T::StackList));
    assert_eq!(tc.dasm(opcode), "cm.push {ra, s0-s1}, -32");
}

#[test]
fn pop_loads_list_and_moves_sp_up() {
    let mut tc = TestContext::zcmp();
    let info = tc.decode(cm_stack(POP, 6, 0));
    assert_eq!(info.mnemonic(), "cm.pop");
    assert_eq!(info.source_regs(), RegisterMask::of(REG_SP));
    assert_eq!(info.dest_regs(), ra_s0_s1() | RegisterMask::of(REG_SP));
    assert_eq!(info.stack_adj(), Some(32));
}

#[rstest]
#[case::ra_only(4, 0, 16)]
#[case::ra_s0(5, 0, 16)]
#[case::ra_s0_s1(6, 0, 32)]
#[case::with_spimm(6, 2, 64)]
#[case::full_list(15, 0, 112)]
#[case::full_list_spimm(15, 3, 160)]
fn rv64_stack_adjustment(#[case] rlist: u32, #[case] spimm: u32, #[case] adj: i64) {
    let mut tc = TestContext::zcmp();
    assert_eq!(tc.decode(cm_stack(POP, rlist, spimm)).stack_adj(), Some(adj));
    assert_eq!(tc.decode(cm_stack(PUSH, rlist, spimm)).stack_adj(), Some(-adj));
}

#[test]
fn rv32_adjustment_uses_four_byte_slots() {
    let config = DecoderConfig {
        isa: IsaConfig::rv32(&[X::I, X::M, X::C, X::Zicsr, X::Zcmp]),
        ..DecoderConfig::default()
    };
    let mut tc = TestContext::with_config(config);
    let info = tc.decode(cm_stack(PUSH, 6, 0));
    assert_eq!(info.extractor_tag(), "CM_push.rv32");
    assert_eq!(info.stack_adj(), Some(-16));
    assert_eq!(tc.dasm(cm_stack(PUSH, 8, 1)), "cm.push {ra, s0-s3}, -48");
}

#[test]
fn full_register_list_ends_at_s11() {
    let mut tc = TestContext::zcmp();
    let info = tc.decode(cm_stack(POP, 15, 0));
    // s0-s1 are x8-x9, s2-s11 are x18-x27.
    let saved = regs(&[REG_RA, 8, 9]) | (0x3FF << 18);
    assert_eq!(info.dest_regs(), saved | RegisterMask::of(REG_SP));
    assert_eq!(tc.dasm(info.opcode()), "cm.pop {ra, s0-s11}, 112");
}

#[test]
fn popret_reads_ra_and_popretz_zeroes_a0() {
    let mut tc = TestContext::zcmp();
    let popret = tc.decode(cm_stack(POPRET, 5, 0));
    assert_eq!(popret.mnemonic(), "cm.popret");
    assert_eq!(popret.source_regs(), regs(&[REG_RA, REG_SP]));
    assert!(popret.is_inst_type(T::Jalr));

    let popretz = tc.decode(cm_stack(POPRETZ, 5, 0));
    assert_eq!(popretz.mnemonic(), "cm.popretz");
    assert_ne!(popretz.dest_regs() & RegisterMask::of(10), 0, "a0 is written");
}

#[rstest]
#[case::push(PUSH, "cm.push")]
#[case::pop(POP, "cm.pop")]
#[case::popret(POPRET, "cm.popret")]
fn register_lists_below_ra_are_reserved(#[case] base: Opcode, #[case] mnemonic: &str) {
    let mut tc = TestContext::zcmp();
    for rlist in 0..4 {
        let opcode = cm_stack(base, rlist, 0);
        assert_eq!(
            tc.try_decode(opcode).unwrap_err(),
            DecodeError::IllegalOpcode {
                mnemonic: mnemonic.into(),
                opcode,
            },
            "rlist={rlist}"
        );
    }
}

// ══════════════════════════════════════════════════════════
// 2. Paired moves
// ══════════════════════════════════════════════════════════

/// `cm.mvsa01`/`cm.mva01s` with saved-register codes `r1s` and `r2s`.
fn cm_mv(base: Opcode, r1s: u32, r2s: u32) -> Opcode {
    base | (u64::from(r1s & 7) << 7) | (u64::from(r2s & 7) << 2)
}

#[test]
fn mvsa01_writes_two_saved_registers() {
    let mut tc = TestContext::zcmp();
    let opcode = cm_mv(0xAC22, 0, 1);
    let info = tc.decode(opcode);
    assert_eq!(info.mnemonic(), "cm.mvsa01");
    assert_eq!(info.source_regs(), regs(&[10, 11]));
    assert_eq!(info.dest_regs(), regs(&[8, 9]));
    assert_eq!(tc.dasm(opcode), "cm.mvsa01 x8, x9");
}

#[test]
fn mva01s_reads_two_saved_registers() {
    let mut tc = TestContext::zcmp();
    let opcode = cm_mv(0xAC62, 1, 2);
    let info = tc.decode(opcode);
    assert_eq!(info.mnemonic(), "cm.mva01s");
    assert_eq!(info.source_regs(), regs(&[9, 18]));
    assert_eq!(info.dest_regs(), regs(&[10, 11]));
    assert_eq!(tc.dasm(opcode), "cm.mva01s x9, x18");
}

#[test]
fn mvsa01_to_one_register_is_reserved() {
    let mut tc = TestContext::zcmp();
    let opcode = cm_mv(0xAC22, 3, 3);
    assert_eq!(
        tc.try_decode(opcode).unwrap_err(),
        DecodeError::IllegalOpcode {
            mnemonic: "cm.mvsa01".into(),
            opcode,
        }
    );
    // The reverse direction may read one register twice.
    assert_eq!(tc.mnemonic(cm_mv(0xAC62, 3, 3)), "cm.mva01s");
}

#[test]
fn push_errors_name_the_push_variant() {
    let mut tc = TestContext::zcmp();
    let info = tc.decode(cm_stack(PUSH, 6, 0));
    let ext = info.extractor();
    assert_eq!(
        ext.special_field(SpecialField::Csr, info.opcode(), info.metadata().as_ref()),
        Err(DecodeError::InvalidSpecialField {
            field: SpecialField::Csr,
            extractor: "CM_push",
        })
    );
}
