//! Zcmp: stack push/pop with register lists and paired `s0`/`s1` moves.
//!
//! The push/pop extractors scale the stack adjustment by XLEN, so each has
//! a variant per base width.

use super::InstDef;
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const STACK_LOAD: MetaSpec = MetaSpec::int(&[T::Int, T::StackList, T::Load, T::Compressed]);
const STACK_STORE: MetaSpec = MetaSpec::int(&[T::Int, T::StackList, T::Store, T::Compressed]);
const STACK_RETURN: MetaSpec = MetaSpec::int(&[
    T::Int,
    T::StackList,
    T::Load,
    T::Branch,
    T::Jalr,
    T::Compressed,
]);
const PAIR_MOVE: MetaSpec = MetaSpec::int(&[T::Int, T::Move, T::Pair, T::Compressed]);

const PUSH: u64 = 0xB802;
const POP: u64 = 0xBA02;
const POPRETZ: u64 = 0xBC02;
const POPRET: u64 = 0xBE02;

/// Zcmp instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    InstDef::new("cm.push", "CMPP", PUSH, STACK_STORE, X::Zcmp)
        .via("CM_push")
        .rv64(),
    InstDef::new("cm.pop", "CMPP", POP, STACK_LOAD, X::Zcmp)
        .via("CM_pop")
        .rv64(),
    InstDef::new("cm.popretz", "CMPP", POPRETZ, STACK_RETURN, X::Zcmp)
        .via("CM_popretz")
        .rv64(),
    InstDef::new("cm.popret", "CMPP", POPRET, STACK_RETURN, X::Zcmp)
        .via("CM_popret")
        .rv64(),
    InstDef::new("cm.push", "CMPP", PUSH, STACK_STORE, X::Zcmp)
        .via("CM_push.rv32")
        .rv32(),
    InstDef::new("cm.pop", "CMPP", POP, STACK_LOAD, X::Zcmp)
        .via("CM_pop.rv32")
        .rv32(),
    InstDef::new("cm.popretz", "CMPP", POPRETZ, STACK_RETURN, X::Zcmp)
        .via("CM_popretz.rv32")
        .rv32(),
    InstDef::new("cm.popret", "CMPP", POPRET, STACK_RETURN, X::Zcmp)
        .via("CM_popret.rv32")
        .rv32(),
    InstDef::new("cm.mvsa01", "CMMV", 0xAC22, PAIR_MOVE, X::Zcmp),
    InstDef::new("cm.mva01s", "CMMV", 0xAC62, PAIR_MOVE, X::Zcmp).via("CM_mva01s"),
];
