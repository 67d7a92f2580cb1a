//! Zicsr control and status register access.

use super::opcode::SYSTEM;
use super::{InstDef, enc};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const CSR: MetaSpec = MetaSpec::int(&[T::Int, T::Csr, T::System]);

/// CSR read-modify-write instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    InstDef::new("csrrw", "CSR", enc(SYSTEM, 1), CSR, X::Zicsr),
    InstDef::new("csrrs", "CSR", enc(SYSTEM, 2), CSR, X::Zicsr),
    InstDef::new("csrrc", "CSR", enc(SYSTEM, 3), CSR, X::Zicsr),
    InstDef::new("csrrwi", "CSRI", enc(SYSTEM, 5), CSR, X::Zicsr),
    InstDef::new("csrrsi", "CSRI", enc(SYSTEM, 6), CSR, X::Zicsr),
    InstDef::new("csrrci", "CSRI", enc(SYSTEM, 7), CSR, X::Zicsr),
];
