//! Sparse node: a hash map keyed by a bit mask of the opcode.

use std::collections::HashMap;
use std::sync::Arc;

use super::layout::NodeShape;
use super::leaf::Leaf;
use super::node::{
    DecodeNode, NodeRef, TableEntry, child_name, get_info_with_default, leaf_with_default,
};
use crate::common::Opcode;
use crate::common::error::{BuildError, DecodeError};
use crate::isa::info::DecodedInstructionInfo;

/// Routes on `opcode & key_mask`. Suited to wide keys with few populated values.
#[derive(Debug)]
pub struct SparseNode {
    name: String,
    key_mask: Opcode,
    children: HashMap<Opcode, NodeRef>,
    child_shape: NodeShape,
    default: Option<NodeRef>,
    default_shape: Option<NodeShape>,
}

impl SparseNode {
    /// Creates an empty node.
    pub fn new(
        name: String,
        key_mask: Opcode,
        child_shape: NodeShape,
        default_shape: Option<NodeShape>,
    ) -> Self {
        Self {
            name,
            key_mask,
            children: HashMap::new(),
            child_shape,
            default: None,
            default_shape,
        }
    }

    /// Key bits.
    pub const fn key_mask(&self) -> Opcode {
        self.key_mask
    }

    /// Number of populated keys.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if no key is populated.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl DecodeNode for SparseNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_node(&self, opcode: Opcode) -> Option<&dyn DecodeNode> {
        self.children
            .get(&(opcode & self.key_mask))
            .or(self.default.as_ref())
            .map(AsRef::as_ref)
    }

    fn add_entry(&mut self, entry: TableEntry) -> Result<(), BuildError> {
        if entry.mask & self.key_mask == self.key_mask {
            let key = entry.value & self.key_mask;
            let name = &self.name;
            let shape = &self.child_shape;
            return self
                .children
                .entry(key)
                .or_insert_with(|| shape.instantiate(child_name(name, format_args!("{key:#x}"))))
                .add_entry(entry);
        }
        match (&self.default_shape, &mut self.default) {
            (Some(shape), slot) => slot
                .get_or_insert_with(|| {
                    shape.instantiate(child_name(&self.name, format_args!("default")))
                })
                .add_entry(entry),
            (None, _) => Err(BuildError::UnroutableEntry {
                mnemonic: entry.leaf.mnemonic().to_owned(),
                node: self.name.clone(),
            }),
        }
    }

    fn get_info(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
        let keyed = self.children.get_mut(&(opcode & self.key_mask));
        get_info_with_default(keyed, self.default.as_mut(), opcode)
    }

    fn leaf_mut(&mut self, opcode: Opcode) -> Option<&mut Leaf> {
        let keyed = self.children.get_mut(&(opcode & self.key_mask));
        leaf_with_default(keyed, self.default.as_mut(), opcode)
    }

    fn for_each_leaf_mut(&mut self, f: &mut dyn FnMut(&mut Leaf)) {
        for child in self.children.values_mut().chain(self.default.as_mut()) {
            child.for_each_leaf_mut(f);
        }
    }

    fn for_each_leaf(&self, f: &mut dyn FnMut(&Leaf)) {
        for child in self.children.values().chain(self.default.as_ref()) {
            child.for_each_leaf(f);
        }
    }
}
