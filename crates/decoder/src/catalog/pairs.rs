//! Zilsd and Zclsd: RV32 doubleword loads and stores through even/odd
//! register pairs.

use super::opcode::{LOAD, STORE};
use super::{InstDef, cenc, enc};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const LOAD_PAIR: MetaSpec = MetaSpec::int(&[T::Int, T::Load, T::Pair]);
const STORE_PAIR: MetaSpec = MetaSpec::int(&[T::Int, T::Store, T::Pair]);
const C_LOAD_PAIR: MetaSpec = MetaSpec::int(&[T::Int, T::Load, T::Pair, T::Compressed]);
const C_STORE_PAIR: MetaSpec = MetaSpec::int(&[T::Int, T::Store, T::Pair, T::Compressed]);

/// Register-pair instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    InstDef::new("ld", "I", enc(LOAD, 3), LOAD_PAIR, X::Zilsd)
        .via("I_load_pair")
        .rv32(),
    InstDef::new("sd", "S", enc(STORE, 3), STORE_PAIR, X::Zilsd)
        .via("S_store_pair")
        .rv32(),
    InstDef::new("c.ld", "CL", cenc(0, 3), C_LOAD_PAIR, X::Zclsd)
        .via("CL_ld_pair")
        .also(X::C)
        .rv32(),
    InstDef::new("c.sd", "CS", cenc(0, 7), C_STORE_PAIR, X::Zclsd)
        .via("CS_sd_pair")
        .also(X::C)
        .rv32(),
    InstDef::new("c.ldsp", "CI", cenc(2, 3), C_LOAD_PAIR, X::Zclsd)
        .via("CI_ldsp_pair")
        .also(X::C)
        .rv32(),
    InstDef::new("c.sdsp", "CSS", cenc(2, 7), C_STORE_PAIR, X::Zclsd)
        .via("CSS_sdsp_pair")
        .also(X::C)
        .rv32(),
];
