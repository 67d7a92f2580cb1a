//! M extension: integer multiply and divide.

use super::opcode::{OP, OP_32};
use super::{InstDef, enc7};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const MUL: MetaSpec = MetaSpec::int(&[T::Int, T::Multiply]);
const DIV: MetaSpec = MetaSpec::int(&[T::Int, T::Divide]);

/// `funct7` shared by every M instruction.
const MULDIV: u64 = 0b000_0001;

const fn muldiv(mnemonic: &'static str, major: u64, funct3: u64, meta: MetaSpec) -> InstDef {
    InstDef::new(mnemonic, "R", enc7(major, funct3, MULDIV), meta, X::M).via("R_arith")
}

/// Multiply and divide instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    muldiv("mul", OP, 0, MUL),
    muldiv("mulh", OP, 1, MUL),
    muldiv("mulhsu", OP, 2, MUL),
    muldiv("mulhu", OP, 3, MUL),
    muldiv("div", OP, 4, DIV),
    muldiv("divu", OP, 5, DIV),
    muldiv("rem", OP, 6, DIV),
    muldiv("remu", OP, 7, DIV),
    muldiv("mulw", OP_32, 0, MUL).rv64(),
    muldiv("divw", OP_32, 4, DIV).rv64(),
    muldiv("divuw", OP_32, 5, DIV).rv64(),
    muldiv("remw", OP_32, 6, DIV).rv64(),
    muldiv("remuw", OP_32, 7, DIV).rv64(),
];
