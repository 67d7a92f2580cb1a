//! Selector node: a derived key collapses a wide field onto a small table.

use std::sync::Arc;

use super::layout::NodeShape;
use super::leaf::Leaf;
use super::node::{
    DecodeNode, NodeRef, TableEntry, child_name, get_info_with_default, leaf_with_default,
};
use crate::common::Opcode;
use crate::common::error::{BuildError, DecodeError};
use crate::isa::info::DecodedInstructionInfo;

/// Key derivation of a [`SelectorNode`].
#[derive(Clone, Debug)]
pub struct Selector {
    /// Name used in child node names.
    pub name: &'static str,
    /// Bits the key is derived from. An entry pinning any of them is keyed.
    pub mask: Opcode,
    /// Table size; keys at or above it select nothing.
    pub size: usize,
    /// Key function.
    pub select: fn(Opcode) -> usize,
}

/// Routes on `(selector.select)(opcode)`.
#[derive(Debug)]
pub struct SelectorNode {
    name: String,
    selector: Selector,
    slots: Vec<Option<NodeRef>>,
    child_shape: NodeShape,
    default: Option<NodeRef>,
    default_shape: Option<NodeShape>,
}

impl SelectorNode {
    /// Creates an empty node with `selector.size` slots.
    pub fn new(
        name: String,
        selector: Selector,
        child_shape: NodeShape,
        default_shape: Option<NodeShape>,
    ) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(selector.size, || None);
        Self {
            name,
            selector,
            slots,
            child_shape,
            default: None,
            default_shape,
        }
    }
}

impl DecodeNode for SelectorNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_node(&self, opcode: Opcode) -> Option<&dyn DecodeNode> {
        let key = (self.selector.select)(opcode);
        self.slots
            .get(key)
            .and_then(Option::as_ref)
            .or(self.default.as_ref())
            .map(AsRef::as_ref)
    }

    fn add_entry(&mut self, entry: TableEntry) -> Result<(), BuildError> {
        let key = (self.selector.select)(entry.value);
        let keyed = entry.mask & self.selector.mask != 0 && key < self.slots.len();
        let name = &self.name;
        let slot = if keyed {
            let sel = self.selector.name;
            let shape = &self.child_shape;
            self.slots[key].get_or_insert_with(|| {
                shape.instantiate(child_name(name, format_args!("{sel}={key}")))
            })
        } else if let Some(shape) = &self.default_shape {
            self.default
                .get_or_insert_with(|| shape.instantiate(child_name(name, format_args!("default"))))
        } else {
            return Err(BuildError::UnroutableEntry {
                mnemonic: entry.leaf.mnemonic().to_owned(),
                node: self.name.clone(),
            });
        };
        slot.add_entry(entry)
    }

    fn get_info(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
        let key = (self.selector.select)(opcode);
        let keyed = self.slots.get_mut(key).and_then(Option::as_mut);
        get_info_with_default(keyed, self.default.as_mut(), opcode)
    }

    fn leaf_mut(&mut self, opcode: Opcode) -> Option<&mut Leaf> {
        let key = (self.selector.select)(opcode);
        let keyed = self.slots.get_mut(key).and_then(Option::as_mut);
        leaf_with_default(keyed, self.default.as_mut(), opcode)
    }

    fn for_each_leaf_mut(&mut self, f: &mut dyn FnMut(&mut Leaf)) {
        for child in self.slots.iter_mut().flatten().chain(self.default.as_mut()) {
            child.for_each_leaf_mut(f);
        }
    }

    fn for_each_leaf(&self, f: &mut dyn FnMut(&Leaf)) {
        for child in self.slots.iter().flatten().chain(self.default.as_ref()) {
            child.for_each_leaf(f);
        }
    }
}
