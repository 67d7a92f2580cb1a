//! Zcb: byte and halfword memory access, unary operations and `c.mul`.

use super::InstDef;
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const LOAD: MetaSpec = MetaSpec::int(&[T::Int, T::Load, T::Compressed]);
const STORE: MetaSpec = MetaSpec::int(&[T::Int, T::Store, T::Compressed]);
const UNARY: MetaSpec = MetaSpec::int(&[T::Int, T::Arith, T::Compressed]);
const MUL: MetaSpec = MetaSpec::int(&[T::Int, T::Multiply, T::Compressed]);

/// CU encoding selected by `funct5`.
const fn unary(funct5: u64) -> u64 {
    0x9C01 | (funct5 << 2)
}

/// Zcb instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    InstDef::new("c.lbu", "CLB", 0x8000, LOAD, X::Zcb),
    InstDef::new("c.lhu", "CLH", 0x8400, LOAD, X::Zcb),
    InstDef::new("c.lh", "CLH", 0x8440, LOAD, X::Zcb),
    InstDef::new("c.sb", "CSB", 0x8800, STORE, X::Zcb),
    InstDef::new("c.sh", "CSH", 0x8C00, STORE, X::Zcb),
    InstDef::new("c.zext.b", "CU", unary(0b11000), UNARY, X::Zcb),
    InstDef::new("c.sext.b", "CU", unary(0b11001), UNARY, X::Zcb),
    InstDef::new("c.zext.h", "CU", unary(0b11010), UNARY, X::Zcb),
    InstDef::new("c.sext.h", "CU", unary(0b11011), UNARY, X::Zcb),
    InstDef::new("c.zext.w", "CU", unary(0b11100), UNARY, X::Zcb).rv64(),
    InstDef::new("c.not", "CU", unary(0b11101), UNARY, X::Zcb),
    InstDef::new("c.mul", "CA", 0x9C41, MUL, X::Zcb),
];
