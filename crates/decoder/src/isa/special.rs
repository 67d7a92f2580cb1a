//! Architecturally named special fields.
//!
//! Special fields are sub-values of an encoding that are neither registers nor
//! the primary immediate: CSR numbers, rounding modes, fence ordering bits,
//! atomic ordering bits, vector configuration and Zcmp stack parameters.

use std::fmt;

/// Closed set of special-field identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecialField {
    /// Atomic acquire bit.
    Aq,
    /// Immediate application vector length (`vsetivli`).
    Avl,
    /// CSR number.
    Csr,
    /// Fence mode.
    Fm,
    /// Encoded vector register group multiplier (`vlmul`).
    Lmul,
    /// Vector mask-agnostic bit.
    Ma,
    /// Vector memory extended width bit.
    Mew,
    /// Vector memory addressing mode.
    Mop,
    /// Vector segment count minus one.
    Nf,
    /// Fence predecessor set.
    Pred,
    /// Atomic release bit.
    Rl,
    /// Zcmp register list encoding.
    Rlist,
    /// Floating-point rounding mode.
    Rm,
    /// Selected element width in bits.
    Sew,
    /// Zcmp additional stack adjustment in 16-byte units.
    Spimm,
    /// Zcmp total stack adjustment in bytes (negative for push).
    StackAdj,
    /// Fence successor set.
    Succ,
    /// Vector tail-agnostic bit.
    Ta,
    /// Vector mask bit (`1` means unmasked).
    Vm,
    /// Atomic write-disable: set when the loaded value is discarded (`rd == x0`).
    Wd,
    /// Vector memory element width encoding.
    Width,
}

impl SpecialField {
    /// Every special field, in identifier order.
    pub const ALL: [Self; 21] = [
        Self::Aq,
        Self::Avl,
        Self::Csr,
        Self::Fm,
        Self::Lmul,
        Self::Ma,
        Self::Mew,
        Self::Mop,
        Self::Nf,
        Self::Pred,
        Self::Rl,
        Self::Rlist,
        Self::Rm,
        Self::Sew,
        Self::Spimm,
        Self::StackAdj,
        Self::Succ,
        Self::Ta,
        Self::Vm,
        Self::Wd,
        Self::Width,
    ];

    /// Lower-case name used in diagnostics and disassembly.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aq => "aq",
            Self::Avl => "avl",
            Self::Csr => "csr",
            Self::Fm => "fm",
            Self::Lmul => "lmul",
            Self::Ma => "ma",
            Self::Mew => "mew",
            Self::Mop => "mop",
            Self::Nf => "nf",
            Self::Pred => "pred",
            Self::Rl => "rl",
            Self::Rlist => "rlist",
            Self::Rm => "rm",
            Self::Sew => "sew",
            Self::Spimm => "spimm",
            Self::StackAdj => "stack_adj",
            Self::Succ => "succ",
            Self::Ta => "ta",
            Self::Vm => "vm",
            Self::Wd => "wd",
            Self::Width => "width",
        }
    }
}

impl fmt::Display for SpecialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
