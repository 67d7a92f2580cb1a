//! Disassembly Text.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvdecode_core::config::{DecoderConfig, DisasmConfig};
use rvdecode_core::{DecodeError, Opcode};

use crate::common::encode::{OP, OP_IMM, b_type, i_type, r_type};
use crate::common::harness::TestContext;

fn abi_context() -> TestContext {
    TestContext::with_config(DecoderConfig {
        disasm: DisasmConfig { abi_names: true },
        ..DecoderConfig::default()
    })
}

#[rstest]
#[case::add(0x0073_02B3, "add x5, x6, x7")]
#[case::lw(0x0081_2503, "lw x10, 8(x2)")]
#[case::sw(0xFEB1_2E23, "sw x11, -4(x2)")]
#[case::beq(b_type(0, 10, 11, 8), "beq x10, x11, 8")]
#[case::beqz(0x0005_0463, "beqz x10, 8")]
#[case::ret(0x0000_8067, "ret")]
#[case::jr(0x0002_8067, "jr x5")]
#[case::li(i_type(OP_IMM, 10, 0, 0, 5), "li x10, 5")]
#[case::mv(i_type(OP_IMM, 10, 0, 11, 0), "mv x10, x11")]
#[case::nop(0x0000_0013, "nop")]
#[case::csrrw(0x3003_12F3, "csrrw x5, 0x300, x6")]
#[case::csrr(0x3000_22F3, "csrr x5, 0x300")]
#[case::fence(0x0330_000F, "fence rw, rw")]
#[case::amo(0x0463_A2AF, "amoadd.w x5, x6, (x7)")]
#[case::fadd(0x0031_00D3, "fadd.s f1, f2, f3")]
fn numeric_register_names(#[case] opcode: Opcode, #[case] expected: &str) {
    let mut tc = TestContext::new();
    assert_eq!(tc.dasm(opcode), expected);
}

#[rstest]
#[case::add(0x0073_02B3, "add t0, t1, t2")]
#[case::lw(0x0081_2503, "lw a0, 8(sp)")]
#[case::sw(0xFEB1_2E23, "sw a1, -4(sp)")]
#[case::zero(r_type(OP, 10, 0, 0, 11, 0), "add a0, zero, a1")]
#[case::csr_number_untouched(0x3003_12F3, "csrrw t0, 0x300, t1")]
#[case::float(0x0031_00D3, "fadd.s ft1, ft2, ft3")]
#[case::vector_untouched(0x0021_80D7, "vadd.vv v1, v2, v3, v0.t")]
fn abi_register_names(#[case] opcode: Opcode, #[case] expected: &str) {
    let mut tc = abi_context();
    assert_eq!(tc.dasm(opcode), expected);
}

#[test]
fn info_display_is_the_numeric_form() {
    let mut tc = abi_context();
    let info = tc.decode(0x0073_02B3);
    assert_eq!(info.to_string(), "add x5, x6, x7");
    assert_eq!(info.dasm(), info.to_string());
}

#[test]
fn undecodable_opcode_has_no_text() {
    let mut tc = TestContext::new();
    assert_eq!(
        tc.ctx.disassemble(0xFFFF_FFFF).unwrap_err(),
        DecodeError::UnknownOpcode { opcode: 0xFFFF_FFFF }
    );
}
