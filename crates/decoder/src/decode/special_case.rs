//! Special-case node: an ordered list of (mask, value) leaves.
//!
//! Entries are kept in decreasing specificity, ties in insertion order, so
//! the first match is always the most constrained encoding. An entry with an
//! empty mask matches everything and therefore acts as the node default.

use std::sync::Arc;

use tracing::trace;

use super::leaf::Leaf;
use super::node::{DecodeNode, TableEntry};
use crate::common::Opcode;
use crate::common::error::{BuildError, DecodeError};
use crate::isa::info::DecodedInstructionInfo;

/// Bottom trie level owning the leaves.
#[derive(Debug)]
pub struct SpecialCaseNode {
    name: String,
    entries: Vec<TableEntry>,
}

impl SpecialCaseNode {
    /// Creates an empty list.
    pub const fn new(name: String) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Entries in match order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    fn first_match(&self, opcode: Opcode) -> Option<usize> {
        self.entries.iter().position(|e| e.matches(opcode))
    }
}

impl DecodeNode for SpecialCaseNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_node(&self, _opcode: Opcode) -> Option<&dyn DecodeNode> {
        None
    }

    fn add_entry(&mut self, entry: TableEntry) -> Result<(), BuildError> {
        if let Some(existing) = self
            .entries
            .iter()
            .find(|e| e.mask == entry.mask && e.value == entry.value)
        {
            return Err(BuildError::OpcodeAlias {
                mnemonic: entry.leaf.mnemonic().to_owned(),
                existing: existing.leaf.mnemonic().to_owned(),
                mask: entry.mask,
                value: entry.value,
            });
        }
        let pos = self
            .entries
            .iter()
            .position(|e| e.specificity < entry.specificity)
            .unwrap_or(self.entries.len());
        trace!(
            node = %self.name,
            mnemonic = entry.leaf.mnemonic(),
            position = pos,
            "special case added"
        );
        self.entries.insert(pos, entry);
        Ok(())
    }

    fn get_info(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
        let idx = self
            .first_match(opcode)
            .ok_or(DecodeError::UnknownOpcode { opcode })?;
        let leaf = &mut self.entries[idx].leaf;
        if leaf.binding().extractor.is_illop(opcode) {
            return Err(DecodeError::IllegalOpcode {
                mnemonic: leaf.mnemonic().to_owned(),
                opcode,
            });
        }
        leaf.get_info(opcode)
    }

    fn leaf_mut(&mut self, opcode: Opcode) -> Option<&mut Leaf> {
        let idx = self.first_match(opcode)?;
        Some(&mut self.entries[idx].leaf)
    }

    fn for_each_leaf_mut(&mut self, f: &mut dyn FnMut(&mut Leaf)) {
        for entry in &mut self.entries {
            f(&mut entry.leaf);
        }
    }

    fn for_each_leaf(&self, f: &mut dyn FnMut(&Leaf)) {
        for entry in &self.entries {
            f(&entry.leaf);
        }
    }
}
