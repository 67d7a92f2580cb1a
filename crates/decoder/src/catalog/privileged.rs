//! Privileged returns and fences, cache-block management and prefetch hints.

use super::opcode::{MISC_MEM, OP_IMM, SYSTEM};
use super::rv64i::system;
use super::{InstDef, enc};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};

const FENCE: MetaSpec = MetaSpec::int(&[T::Fence, T::System]);
const CBO: MetaSpec = MetaSpec::int(&[T::Int, T::Cache]);
const CBO_ZERO: MetaSpec = MetaSpec::int(&[T::Int, T::Cache, T::Store]);
const PREFETCH: MetaSpec = MetaSpec::int(&[T::Int, T::Prefetch]);

const fn cbo(mnemonic: &'static str, function: u64, ext: X) -> InstDef {
    let meta = if matches!(ext, X::Zicboz) { CBO_ZERO } else { CBO };
    InstDef::new(mnemonic, "I", (function << 20) | enc(MISC_MEM, 2), meta, ext)
        .via("I_cbo")
        .pinning(&["imm", "rd"])
}

const fn prefetch(mnemonic: &'static str, sel: u64) -> InstDef {
    InstDef::new(mnemonic, "PF", (sel << 20) | enc(OP_IMM, 6), PREFETCH, X::Zicbop)
}

/// Privileged and cache-management instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    system("sret", 0x1020_0000 | SYSTEM, X::Privileged),
    system("wfi", 0x1050_0000 | SYSTEM, X::Privileged),
    system("mret", 0x3020_0000 | SYSTEM, X::Privileged),
    InstDef::new("sfence.vma", "R", 0x1200_0000 | SYSTEM, FENCE, X::Privileged).pinning(&["rd"]),
    cbo("cbo.inval", 0, X::Zicbom),
    cbo("cbo.clean", 1, X::Zicbom),
    cbo("cbo.flush", 2, X::Zicbom),
    cbo("cbo.zero", 4, X::Zicboz),
    prefetch("prefetch.i", 0),
    prefetch("prefetch.r", 1),
    prefetch("prefetch.w", 3),
];
