//! C extension: 16-bit compressed encodings of the base, F and D instructions.

use super::{InstDef, cenc};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};
use crate::isa::operand::OperandFieldId as Role;
use crate::isa::operand::OperandType;

const ARITH: MetaSpec = MetaSpec::int(&[T::Int, T::Arith, T::Compressed]);
const MOVE: MetaSpec = MetaSpec::int(&[T::Int, T::Move, T::Compressed]);
const LOAD: MetaSpec = MetaSpec::int(&[T::Int, T::Load, T::Compressed]);
const STORE: MetaSpec = MetaSpec::int(&[T::Int, T::Store, T::Compressed]);
const BRANCH: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Conditional, T::Compressed]);
const JUMP: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Jal, T::Compressed]);
const JUMP_REG: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Jalr, T::Compressed]);
const SYSTEM: MetaSpec = MetaSpec::int(&[T::System, T::Compressed]);

const BASE: &[(Role, OperandType)] = &[(Role::Rs1, OperandType::Long)];
const FLOAD: MetaSpec =
    MetaSpec::uniform(&[T::Float, T::Load, T::Compressed], OperandType::Single).with(BASE);
const FSTORE: MetaSpec =
    MetaSpec::uniform(&[T::Float, T::Store, T::Compressed], OperandType::Single).with(BASE);
const DLOAD: MetaSpec =
    MetaSpec::uniform(&[T::Float, T::Load, T::Compressed], OperandType::Double).with(BASE);
const DSTORE: MetaSpec =
    MetaSpec::uniform(&[T::Float, T::Store, T::Compressed], OperandType::Double).with(BASE);

/// CA encoding from `funct6` and `funct2`.
const fn ca(funct6: u64, funct2: u64) -> u64 {
    (funct6 << 10) | (funct2 << 5) | 0b01
}

/// CBI encoding selected by `funct2`.
const fn cbi(funct2: u64) -> u64 {
    (funct2 << 10) | cenc(1, 4)
}

const CA_ARITH: u64 = 0b10_0011;
const CA_WORD: u64 = 0b10_0111;

/// Compressed instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    // Quadrant 0
    InstDef::new("c.addi4spn", "CIW", cenc(0, 0), ARITH, X::C).via("CIW_addi4spn"),
    InstDef::new("c.fld", "CL", cenc(0, 1), DLOAD, X::C).via("CL_ld").also(X::D),
    InstDef::new("c.lw", "CL", cenc(0, 2), LOAD, X::C),
    InstDef::new("c.flw", "CL", cenc(0, 3), FLOAD, X::C).also(X::F).rv32(),
    InstDef::new("c.ld", "CL", cenc(0, 3), LOAD, X::C).via("CL_ld").rv64(),
    InstDef::new("c.fsd", "CS", cenc(0, 5), DSTORE, X::C).via("CS_sd").also(X::D),
    InstDef::new("c.sw", "CS", cenc(0, 6), STORE, X::C),
    InstDef::new("c.fsw", "CS", cenc(0, 7), FSTORE, X::C).also(X::F).rv32(),
    InstDef::new("c.sd", "CS", cenc(0, 7), STORE, X::C).via("CS_sd").rv64(),
    // Quadrant 1
    InstDef::new("c.nop", "CI", cenc(1, 0), ARITH, X::C)
        .via("CI_nop")
        .pinning(&["rd_rs1"]),
    InstDef::new("c.addi", "CI", cenc(1, 0), ARITH, X::C).via("CI_addi"),
    InstDef::new("c.jal", "CJ", cenc(1, 1), JUMP, X::C).via("CJ_jal").rv32(),
    InstDef::new("c.addiw", "CI", cenc(1, 1), ARITH, X::C).via("CI_addiw").rv64(),
    InstDef::new("c.li", "CI", cenc(1, 2), MOVE, X::C).via("CI_li"),
    InstDef::new("c.addi16sp", "CI", (2 << 7) | cenc(1, 3), ARITH, X::C)
        .via("CI_addi16sp")
        .pinning(&["rd_rs1"]),
    InstDef::new("c.lui", "CI", cenc(1, 3), MOVE, X::C).via("CI_lui"),
    InstDef::new("c.srli", "CBI", cbi(0), ARITH, X::C),
    InstDef::new("c.srai", "CBI", cbi(1), ARITH, X::C),
    InstDef::new("c.andi", "CBI", cbi(2), ARITH, X::C).via("CBI_andi"),
    InstDef::new("c.sub", "CA", ca(CA_ARITH, 0), ARITH, X::C),
    InstDef::new("c.xor", "CA", ca(CA_ARITH, 1), ARITH, X::C),
    InstDef::new("c.or", "CA", ca(CA_ARITH, 2), ARITH, X::C),
    InstDef::new("c.and", "CA", ca(CA_ARITH, 3), ARITH, X::C),
    InstDef::new("c.subw", "CA", ca(CA_WORD, 0), ARITH, X::C).rv64(),
    InstDef::new("c.addw", "CA", ca(CA_WORD, 1), ARITH, X::C).rv64(),
    InstDef::new("c.j", "CJ", cenc(1, 5), JUMP, X::C),
    InstDef::new("c.beqz", "CB", cenc(1, 6), BRANCH, X::C),
    InstDef::new("c.bnez", "CB", cenc(1, 7), BRANCH, X::C),
    // Quadrant 2
    InstDef::new("c.slli", "CI", cenc(2, 0), ARITH, X::C).via("CI_slli"),
    InstDef::new("c.fldsp", "CI", cenc(2, 1), DLOAD, X::C)
        .via("CI_fldsp")
        .also(X::D),
    InstDef::new("c.lwsp", "CI", cenc(2, 2), LOAD, X::C).via("CI_lwsp"),
    InstDef::new("c.flwsp", "CI", cenc(2, 3), FLOAD, X::C)
        .via("CI_flwsp")
        .also(X::F)
        .rv32(),
    InstDef::new("c.ldsp", "CI", cenc(2, 3), LOAD, X::C).via("CI_ldsp").rv64(),
    InstDef::new("c.jr", "CR", 0x8002, JUMP_REG, X::C)
        .via("CR_jr")
        .pinning(&["rs2"]),
    InstDef::new("c.mv", "CR", 0x8002, MOVE, X::C).via("CR_mv"),
    InstDef::new("c.ebreak", "CR", 0x9002, SYSTEM, X::C).pinning(&["rd_rs1", "rs2"]),
    InstDef::new("c.jalr", "CR", 0x9002, JUMP_REG, X::C)
        .via("CR_jalr")
        .pinning(&["rs2"]),
    InstDef::new("c.add", "CR", 0x9002, ARITH, X::C).via("CR_add"),
    InstDef::new("c.fsdsp", "CSS", cenc(2, 5), DSTORE, X::C)
        .via("CSS_sdsp")
        .also(X::D),
    InstDef::new("c.swsp", "CSS", cenc(2, 6), STORE, X::C).via("CSS_swsp"),
    InstDef::new("c.fswsp", "CSS", cenc(2, 7), FSTORE, X::C)
        .via("CSS_swsp")
        .also(X::F)
        .rv32(),
    InstDef::new("c.sdsp", "CSS", cenc(2, 7), STORE, X::C).via("CSS_sdsp").rv64(),
];
