//! RV32I/RV64I base integer instructions and Zifencei.

use super::opcode::{
    AUIPC, BRANCH, JAL, JALR, LOAD, LUI, MISC_MEM, OP, OP_32, OP_IMM, OP_IMM_32, STORE, SYSTEM,
};
use super::{InstDef, enc, enc7};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const ARITH: MetaSpec = MetaSpec::int(&[T::Int, T::Arith]);
const COMPARE: MetaSpec = MetaSpec::int(&[T::Int, T::Compare]);
const UPPER_PC: MetaSpec = MetaSpec::int(&[T::Int, T::Arith, T::Pc]);
const BRANCH_META: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Conditional]);
const JUMP: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Jal]);
const JUMP_REG: MetaSpec = MetaSpec::int(&[T::Int, T::Branch, T::Jalr]);
const LOAD_META: MetaSpec = MetaSpec::int(&[T::Int, T::Load]);
const STORE_META: MetaSpec = MetaSpec::int(&[T::Int, T::Store]);
const FENCE: MetaSpec = MetaSpec::int(&[T::Fence]);
const SYSTEM_META: MetaSpec = MetaSpec::int(&[T::System]);

/// `funct7` selecting the arithmetic variant of `sub`, `sra` and friends.
const ALT: u64 = 0b010_0000;

const fn load(mnemonic: &'static str, funct3: u64) -> InstDef {
    InstDef::new(mnemonic, "I", enc(LOAD, funct3), LOAD_META, X::I).via("I_load")
}

const fn store(mnemonic: &'static str, funct3: u64) -> InstDef {
    InstDef::new(mnemonic, "S", enc(STORE, funct3), STORE_META, X::I)
}

const fn branch(mnemonic: &'static str, funct3: u64) -> InstDef {
    InstDef::new(mnemonic, "B", enc(BRANCH, funct3), BRANCH_META, X::I)
}

const fn op_imm(mnemonic: &'static str, funct3: u64, meta: MetaSpec) -> InstDef {
    InstDef::new(mnemonic, "I", enc(OP_IMM, funct3), meta, X::I).via("I_arith")
}

const fn op(mnemonic: &'static str, major: u64, funct3: u64, funct7: u64, meta: MetaSpec) -> InstDef {
    InstDef::new(mnemonic, "R", enc7(major, funct3, funct7), meta, X::I).via("R_arith")
}

/// Fully pinned `SYSTEM` encodings.
pub(crate) const fn system(mnemonic: &'static str, stencil: u64, ext: X) -> InstDef {
    InstDef::new(mnemonic, "I", stencil, SYSTEM_META, ext)
        .via("I_system")
        .pinning(&["imm", "rs1", "rd"])
}

/// Base integer instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    InstDef::new("lui", "U", LUI, ARITH, X::I),
    InstDef::new("auipc", "U", AUIPC, UPPER_PC, X::I),
    InstDef::new("jal", "J", JAL, JUMP, X::I),
    InstDef::new("jalr", "I", enc(JALR, 0), JUMP_REG, X::I).via("I_jalr"),
    branch("beq", 0),
    branch("bne", 1),
    branch("blt", 4),
    branch("bge", 5),
    branch("bltu", 6),
    branch("bgeu", 7),
    load("lb", 0),
    load("lh", 1),
    load("lw", 2),
    load("ld", 3).rv64(),
    load("lbu", 4),
    load("lhu", 5),
    load("lwu", 6).rv64(),
    store("sb", 0),
    store("sh", 1),
    store("sw", 2),
    store("sd", 3).rv64(),
    op_imm("addi", 0, ARITH),
    op_imm("slti", 2, COMPARE),
    op_imm("sltiu", 3, COMPARE),
    op_imm("xori", 4, ARITH),
    op_imm("ori", 6, ARITH),
    op_imm("andi", 7, ARITH),
    // Shift amounts are 6 bits wide on RV64 and 5 bits wide on RV32.
    InstDef::new("slli", "ISH", enc(OP_IMM, 1), ARITH, X::I).rv64(),
    InstDef::new("srli", "ISH", enc(OP_IMM, 5), ARITH, X::I).rv64(),
    InstDef::new("srai", "ISH", enc(OP_IMM, 5) | (ALT << 25), ARITH, X::I).rv64(),
    InstDef::new("slli", "ISHW", enc(OP_IMM, 1), ARITH, X::I).rv32(),
    InstDef::new("srli", "ISHW", enc(OP_IMM, 5), ARITH, X::I).rv32(),
    InstDef::new("srai", "ISHW", enc7(OP_IMM, 5, ALT), ARITH, X::I).rv32(),
    op("add", OP, 0, 0, ARITH),
    op("sub", OP, 0, ALT, ARITH),
    op("sll", OP, 1, 0, ARITH),
    op("slt", OP, 2, 0, COMPARE),
    op("sltu", OP, 3, 0, COMPARE),
    op("xor", OP, 4, 0, ARITH),
    op("srl", OP, 5, 0, ARITH),
    op("sra", OP, 5, ALT, ARITH),
    op("or", OP, 6, 0, ARITH),
    op("and", OP, 7, 0, ARITH),
    InstDef::new("addiw", "I", enc(OP_IMM_32, 0), ARITH, X::I)
        .via("I_arith")
        .rv64(),
    InstDef::new("slliw", "ISHW", enc(OP_IMM_32, 1), ARITH, X::I).rv64(),
    InstDef::new("srliw", "ISHW", enc(OP_IMM_32, 5), ARITH, X::I).rv64(),
    InstDef::new("sraiw", "ISHW", enc7(OP_IMM_32, 5, ALT), ARITH, X::I).rv64(),
    op("addw", OP_32, 0, 0, ARITH).rv64(),
    op("subw", OP_32, 0, ALT, ARITH).rv64(),
    op("sllw", OP_32, 1, 0, ARITH).rv64(),
    op("srlw", OP_32, 5, 0, ARITH).rv64(),
    op("sraw", OP_32, 5, ALT, ARITH).rv64(),
    InstDef::new("fence", "FENCE", enc(MISC_MEM, 0), FENCE, X::I),
    system("fence.i", enc(MISC_MEM, 1), X::Zifencei),
    system("ecall", SYSTEM, X::I),
    system("ebreak", 0x0010_0000 | SYSTEM, X::I),
];
