//! A extension and Zacas.

use super::InstDef;
use super::opcode::AMO;
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const ATOMIC: MetaSpec = MetaSpec::int(&[T::Int, T::Atomic]);
const LOAD_RESERVED: MetaSpec = MetaSpec::int(&[T::Int, T::Atomic, T::Load]);
const STORE_CONDITIONAL: MetaSpec = MetaSpec::int(&[T::Int, T::Atomic, T::Store]);
const CAS_PAIR: MetaSpec = MetaSpec::int(&[T::Int, T::Atomic, T::Pair]);

const WORD: u64 = 2;
const DOUBLE: u64 = 3;
const QUAD: u64 = 4;

const fn amo(mnemonic: &'static str, funct5: u64, funct3: u64, meta: MetaSpec, ext: X) -> InstDef {
    InstDef::new(mnemonic, "AMO", (funct5 << 27) | (funct3 << 12) | AMO, meta, ext)
}

/// Atomic memory operations.
pub const INSTRUCTIONS: &[InstDef] = &[
    amo("lr.w", 0x02, WORD, LOAD_RESERVED, X::A).pinning(&["rs2"]),
    amo("sc.w", 0x03, WORD, STORE_CONDITIONAL, X::A),
    amo("amoswap.w", 0x01, WORD, ATOMIC, X::A),
    amo("amoadd.w", 0x00, WORD, ATOMIC, X::A),
    amo("amoxor.w", 0x04, WORD, ATOMIC, X::A),
    amo("amoand.w", 0x0C, WORD, ATOMIC, X::A),
    amo("amoor.w", 0x08, WORD, ATOMIC, X::A),
    amo("amomin.w", 0x10, WORD, ATOMIC, X::A),
    amo("amomax.w", 0x14, WORD, ATOMIC, X::A),
    amo("amominu.w", 0x18, WORD, ATOMIC, X::A),
    amo("amomaxu.w", 0x1C, WORD, ATOMIC, X::A),
    amo("lr.d", 0x02, DOUBLE, LOAD_RESERVED, X::A).pinning(&["rs2"]).rv64(),
    amo("sc.d", 0x03, DOUBLE, STORE_CONDITIONAL, X::A).rv64(),
    amo("amoswap.d", 0x01, DOUBLE, ATOMIC, X::A).rv64(),
    amo("amoadd.d", 0x00, DOUBLE, ATOMIC, X::A).rv64(),
    amo("amoxor.d", 0x04, DOUBLE, ATOMIC, X::A).rv64(),
    amo("amoand.d", 0x0C, DOUBLE, ATOMIC, X::A).rv64(),
    amo("amoor.d", 0x08, DOUBLE, ATOMIC, X::A).rv64(),
    amo("amomin.d", 0x10, DOUBLE, ATOMIC, X::A).rv64(),
    amo("amomax.d", 0x14, DOUBLE, ATOMIC, X::A).rv64(),
    amo("amominu.d", 0x18, DOUBLE, ATOMIC, X::A).rv64(),
    amo("amomaxu.d", 0x1C, DOUBLE, ATOMIC, X::A).rv64(),
    // Compare-and-swap wider than XLEN works on even/odd register pairs.
    amo("amocas.w", 0x05, WORD, ATOMIC, X::Zacas),
    amo("amocas.d", 0x05, DOUBLE, CAS_PAIR, X::Zacas).via("AMO_pair").rv32(),
    amo("amocas.d", 0x05, DOUBLE, ATOMIC, X::Zacas).rv64(),
    amo("amocas.q", 0x05, QUAD, CAS_PAIR, X::Zacas).via("AMO_pair").rv64(),
];
