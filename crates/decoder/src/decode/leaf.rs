//! Bound instruction at the bottom of the trie.
//!
//! A [`Leaf`] answers every decode that reaches it:
//! 1. **Stash:** A cached info for the opcode is returned as is.
//! 2. **Overlays:** Otherwise the first overlay matching the opcode and
//!    refining the leaf's mnemonic supplies the binding.
//! 3. **Fallback:** Without such an overlay the leaf's own binding is used.
//!
//! The resulting [`DecodedInstructionInfo`] is inserted into the stash.

use std::sync::Arc;

use super::overlay::Overlay;
use super::stash::{Stash, StashStats};
use crate::common::Opcode;
use crate::common::error::DecodeError;
use crate::config::StashConfig;
use crate::isa::info::{DecodedInstructionInfo, InstructionBinding};

/// Bound instruction, its overlays and its stash.
#[derive(Debug)]
pub struct Leaf {
    binding: InstructionBinding,
    overlays: Vec<Overlay>,
    stash: Stash,
}

impl Leaf {
    /// Creates a leaf without overlays.
    ///
    /// # Arguments
    ///
    /// * `binding` - The instruction the leaf decodes to.
    /// * `stash` - Stash layer sizes.
    pub fn new(binding: InstructionBinding, stash: StashConfig) -> Self {
        Self {
            binding,
            overlays: Vec::new(),
            stash: Stash::new(stash),
        }
    }

    /// Mnemonic of the bound instruction.
    pub fn mnemonic(&self) -> &str {
        &self.binding.mnemonic
    }

    /// The bound instruction.
    pub const fn binding(&self) -> &InstructionBinding {
        &self.binding
    }

    /// Mutable access to the bound instruction. Callers flush afterwards.
    pub const fn binding_mut(&mut self) -> &mut InstructionBinding {
        &mut self.binding
    }

    /// Overlays in lookup order.
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Mutable overlays. Callers flush afterwards.
    pub fn overlays_mut(&mut self) -> &mut [Overlay] {
        &mut self.overlays
    }

    /// Inserts `overlay` after every overlay pinning at least as many bits.
    pub fn add_overlay(&mut self, overlay: Overlay) {
        let pos = self
            .overlays
            .iter()
            .position(|o| o.specificity() < overlay.specificity())
            .unwrap_or(self.overlays.len());
        self.overlays.insert(pos, overlay);
        self.stash.flush();
    }

    /// Binding that decodes `opcode`: the first applicable overlay's, else the leaf's.
    pub fn resolve(&self, opcode: Opcode) -> &InstructionBinding {
        self.overlays
            .iter()
            .find(|o| o.matches(opcode) && o.refines(&self.binding.mnemonic))
            .map_or(&self.binding, |o| &o.binding)
    }

    /// Decodes `opcode`, consulting the stash first.
    ///
    /// # Errors
    ///
    /// Propagates special-field lookup failures from
    /// [`DecodedInstructionInfo::new`].
    pub fn get_info(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
        if let Some(info) = self.stash.lookup(opcode) {
            return Ok(info);
        }
        let binding = self.resolve(opcode).clone();
        let info = Arc::new(DecodedInstructionInfo::new(binding, opcode)?);
        self.stash.insert(opcode, Arc::clone(&info));
        Ok(info)
    }

    /// Drops every cached info.
    pub fn flush(&mut self) {
        self.stash.flush();
    }

    /// Stash counters.
    pub const fn stash_stats(&self) -> StashStats {
        self.stash.stats()
    }

    /// Number of cached infos.
    pub fn stash_len(&self) -> usize {
        self.stash.len()
    }
}
