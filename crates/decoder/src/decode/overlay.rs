//! Pseudo-instruction overlays.

use std::sync::Arc;

use crate::common::Opcode;
use crate::isa::info::InstructionBinding;

/// Substitutes a pseudo-instruction binding for a base instruction on a
/// narrower (mask, value) pattern.
#[derive(Clone, Debug)]
pub struct Overlay {
    /// Opcode-space mask of the overlay's pinned fields.
    pub mask: Opcode,
    /// Required value of the masked bits.
    pub value: Opcode,
    /// Mnemonic of the instruction this overlay refines.
    pub base: Arc<str>,
    /// Binding reported in place of the base's.
    pub binding: InstructionBinding,
}

impl Overlay {
    /// Returns `true` if `opcode` carries the overlay's pinned bits.
    #[inline]
    pub const fn matches(&self, opcode: Opcode) -> bool {
        opcode & self.mask == self.value
    }

    /// Number of pinned opcode bits.
    pub const fn specificity(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Returns `true` if the overlay refines `mnemonic`.
    pub fn refines(&self, mnemonic: &str) -> bool {
        *self.base == *mnemonic
    }
}
