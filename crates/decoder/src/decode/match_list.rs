//! Match-list node: ordered predicates over one field, first match wins.
//!
//! Unlike the keyed composites a match list never retries: an opcode is
//! decoded by the first arm whose predicate accepts it, or not at all.

use std::sync::Arc;

use super::layout::{ArmShape, NodeShape};
use super::leaf::Leaf;
use super::node::{DecodeNode, NodeRef, TableEntry, child_name};
use crate::common::Opcode;
use crate::common::error::{BuildError, DecodeError};
use crate::isa::field::Field;
use crate::isa::info::DecodedInstructionInfo;

/// One arm of a [`MatchListNode`].
#[derive(Debug)]
pub struct Arm {
    name: &'static str,
    predicate: Option<fn(u64) -> bool>,
    shape: NodeShape,
    node: Option<NodeRef>,
}

impl Arm {
    fn accepts(&self, value: u64) -> bool {
        self.predicate.is_none_or(|p| p(value))
    }

    const fn is_catch_all(&self) -> bool {
        self.predicate.is_none()
    }
}

impl From<ArmShape> for Arm {
    fn from(shape: ArmShape) -> Self {
        Self {
            name: shape.name,
            predicate: shape.predicate,
            shape: shape.shape,
            node: None,
        }
    }
}

/// Routes on the first arm whose predicate accepts `field`'s value.
#[derive(Debug)]
pub struct MatchListNode {
    name: String,
    field: Field,
    arms: Vec<Arm>,
}

impl MatchListNode {
    /// Creates a node with unpopulated arms.
    pub fn new(name: String, field: Field, arms: Vec<Arm>) -> Self {
        Self { name, field, arms }
    }

    fn arm_for(&self, opcode: Opcode) -> Option<usize> {
        let value = self.field.extract(opcode);
        self.arms.iter().position(|arm| arm.accepts(value))
    }
}

impl DecodeNode for MatchListNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_node(&self, opcode: Opcode) -> Option<&dyn DecodeNode> {
        let idx = self.arm_for(opcode)?;
        self.arms[idx].node.as_deref()
    }

    fn add_entry(&mut self, entry: TableEntry) -> Result<(), BuildError> {
        let key_mask = self.field.mask();
        let idx = if entry.mask & key_mask == key_mask {
            self.arm_for(entry.value)
        } else {
            self.arms.iter().position(Arm::is_catch_all)
        };
        let Some(idx) = idx else {
            return Err(BuildError::UnroutableEntry {
                mnemonic: entry.leaf.mnemonic().to_owned(),
                node: self.name.clone(),
            });
        };
        let parent = &self.name;
        let arm = &mut self.arms[idx];
        let name = arm.name;
        let shape = &arm.shape;
        arm.node
            .get_or_insert_with(|| shape.instantiate(child_name(parent, format_args!("{name}"))))
            .add_entry(entry)
    }

    fn get_info(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
        let node = self
            .arm_for(opcode)
            .and_then(|idx| self.arms[idx].node.as_mut());
        match node {
            Some(node) => node.get_info(opcode),
            None => Err(DecodeError::UnknownOpcode { opcode }),
        }
    }

    fn leaf_mut(&mut self, opcode: Opcode) -> Option<&mut Leaf> {
        let idx = self.arm_for(opcode)?;
        self.arms[idx].node.as_mut()?.leaf_mut(opcode)
    }

    fn for_each_leaf_mut(&mut self, f: &mut dyn FnMut(&mut Leaf)) {
        for node in self.arms.iter_mut().filter_map(|arm| arm.node.as_mut()) {
            node.for_each_leaf_mut(f);
        }
    }

    fn for_each_leaf(&self, f: &mut dyn FnMut(&Leaf)) {
        for node in self.arms.iter().filter_map(|arm| arm.node.as_ref()) {
            node.for_each_leaf(f);
        }
    }
}
