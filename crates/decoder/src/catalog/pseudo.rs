//! Pseudo-instructions layered over the base encodings they alias.
//!
//! When several overlays of one instruction match, the one pinning more
//! opcode bits wins: `addi x0, x0, 0` is `nop`, `addi a0, x0, 0` is `mv`.

use super::OverlayDef;
use super::opcode::{BRANCH, JAL, JALR, OP, OP_32, OP_IMM, OP_IMM_32, SYSTEM};
use super::{enc, enc7};
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const ARITH: MetaSpec = MetaSpec::int(&[T::Int, T::Arith]);
const MOVE: MetaSpec = MetaSpec::int(&[T::Int, T::Move]);
const COMPARE: MetaSpec = MetaSpec::int(&[T::Int, T::Compare]);
const BRANCH_META: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Conditional]);
const JUMP: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Jal]);
const JUMP_REG: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Jalr]);
const CSR: MetaSpec = MetaSpec::int(&[T::Int, T::Csr, T::System]);

const fn overlay(
    mnemonic: &'static str,
    base: &'static str,
    tag: &'static str,
    stencil: u64,
    fixed: &'static [&'static str],
    meta: MetaSpec,
) -> OverlayDef {
    OverlayDef {
        mnemonic,
        base,
        tag,
        stencil,
        fixed,
        meta,
    }
}

/// Built-in pseudo-instructions.
pub const OVERLAYS: &[OverlayDef] = &[
    overlay("nop", "addi", "I_arith", OP_IMM, &["imm", "rs1", "rd"], ARITH),
    overlay("mv", "addi", "I_arith", OP_IMM, &["imm"], MOVE),
    overlay("li", "addi", "I_arith", OP_IMM, &["rs1"], MOVE),
    overlay("not", "xori", "I_arith", (0xFFF << 20) | enc(OP_IMM, 4), &["imm"], ARITH),
    overlay("neg", "sub", "R_arith", enc7(OP, 0, 0b010_0000), &["rs1"], ARITH),
    overlay("negw", "subw", "R_arith", enc7(OP_32, 0, 0b010_0000), &["rs1"], ARITH),
    overlay("sext.w", "addiw", "I_arith", OP_IMM_32, &["imm"], ARITH),
    overlay("seqz", "sltiu", "I_arith", (1 << 20) | enc(OP_IMM, 3), &["imm"], COMPARE),
    overlay("snez", "sltu", "R_arith", enc7(OP, 3, 0), &["rs1"], COMPARE),
    overlay("beqz", "beq", "B", enc(BRANCH, 0), &["rs2"], BRANCH_META),
    overlay("bnez", "bne", "B", enc(BRANCH, 1), &["rs2"], BRANCH_META),
    overlay("j", "jal", "J", JAL, &["rd"], JUMP),
    overlay("jr", "jalr", "I", enc(JALR, 0), &["rd", "imm"], JUMP_REG),
    overlay("ret", "jalr", "I_ret", (1 << 15) | enc(JALR, 0), &["imm", "rs1", "rd"], JUMP_REG),
    overlay("csrr", "csrrs", "CSR", enc(SYSTEM, 2), &["rs1"], CSR),
    overlay("csrw", "csrrw", "CSR", enc(SYSTEM, 1), &["rd"], CSR),
];
