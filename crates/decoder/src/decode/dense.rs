//! Dense node: a table indexed by the full value range of one field.

use std::sync::Arc;

use super::layout::{NodeShape, SlotShapes};
use super::leaf::Leaf;
use super::node::{
    DecodeNode, NodeRef, TableEntry, child_name, get_info_with_default, leaf_with_default,
};
use crate::common::Opcode;
use crate::common::error::{BuildError, DecodeError};
use crate::isa::field::Field;
use crate::isa::info::DecodedInstructionInfo;

/// Routes on the value of `field`; children are created on first use.
#[derive(Debug)]
pub struct DenseNode {
    name: String,
    field: Field,
    slots: Vec<Option<NodeRef>>,
    shapes: SlotShapes,
    default: Option<NodeRef>,
    default_shape: Option<NodeShape>,
}

impl DenseNode {
    /// Creates an empty node with `1 << field.width()` slots.
    pub fn new(
        name: String,
        field: Field,
        shapes: SlotShapes,
        default_shape: Option<NodeShape>,
    ) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(1 << field.width(), || None);
        Self {
            name,
            field,
            slots,
            shapes,
            default: None,
            default_shape,
        }
    }

    /// Key field.
    pub const fn field(&self) -> Field {
        self.field
    }

    fn slot_index(&self, opcode: Opcode) -> usize {
        self.field.extract(opcode) as usize
    }

    fn keyed_child(&mut self, key: usize) -> &mut NodeRef {
        let name = &self.name;
        let field = self.field;
        let shapes = &self.shapes;
        self.slots[key].get_or_insert_with(|| {
            shapes
                .shape(key as u64)
                .instantiate(child_name(name, format_args!("{}={key}", field.name())))
        })
    }

    fn default_child(&mut self) -> Option<&mut NodeRef> {
        let shape = self.default_shape.as_ref()?;
        let name = &self.name;
        Some(
            self.default
                .get_or_insert_with(|| shape.instantiate(child_name(name, format_args!("default")))),
        )
    }
}

impl DecodeNode for DenseNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_node(&self, opcode: Opcode) -> Option<&dyn DecodeNode> {
        self.slots[self.slot_index(opcode)]
            .as_ref()
            .or(self.default.as_ref())
            .map(AsRef::as_ref)
    }

    fn add_entry(&mut self, entry: TableEntry) -> Result<(), BuildError> {
        let key_mask = self.field.mask();
        if entry.mask & key_mask == key_mask {
            let key = self.slot_index(entry.value);
            return self.keyed_child(key).add_entry(entry);
        }
        match self.default_child() {
            Some(child) => child.add_entry(entry),
            None => Err(BuildError::UnroutableEntry {
                mnemonic: entry.leaf.mnemonic().to_owned(),
                node: self.name.clone(),
            }),
        }
    }

    fn get_info(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
        let key = self.slot_index(opcode);
        get_info_with_default(self.slots[key].as_mut(), self.default.as_mut(), opcode)
    }

    fn leaf_mut(&mut self, opcode: Opcode) -> Option<&mut Leaf> {
        let key = self.slot_index(opcode);
        leaf_with_default(self.slots[key].as_mut(), self.default.as_mut(), opcode)
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
