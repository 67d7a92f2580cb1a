//! Decode node trait and routing helpers shared by the composite strategies.

use std::fmt;
use std::sync::Arc;

use super::leaf::Leaf;
use crate::common::Opcode;
use crate::common::error::{BuildError, DecodeError};
use crate::isa::info::DecodedInstructionInfo;

/// One level of the decode trie.
///
/// Composite nodes route to children; special-case nodes own leaves. Every
/// decode-time operation takes the opcode that is being decoded.
pub trait DecodeNode: fmt::Debug + Send {
    /// Path-style node name (`root/q3/major=12`).
    fn name(&self) -> &str;

    /// Child the opcode is routed to first, if it exists.
    fn get_node(&self, opcode: Opcode) -> Option<&dyn DecodeNode>;

    /// Routes a build-time entry down to a special-case node.
    ///
    /// # Errors
    ///
    /// [`BuildError::OpcodeAlias`] for a duplicate (mask, value) and
    /// [`BuildError::UnroutableEntry`] when no child accepts the entry.
    fn add_entry(&mut self, entry: TableEntry) -> Result<(), BuildError>;

    /// Decodes `opcode` below this node.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnknownOpcode`] when nothing matches and
    /// [`DecodeError::IllegalOpcode`] for a reserved encoding of a matched
    /// instruction.
    fn get_info(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError>;

    /// Leaf that would serve `opcode`.
    fn leaf_mut(&mut self, opcode: Opcode) -> Option<&mut Leaf>;

    /// Visits every leaf below this node.
    fn for_each_leaf_mut(&mut self, f: &mut dyn FnMut(&mut Leaf));

    /// Visits every leaf below this node.
    fn for_each_leaf(&self, f: &mut dyn FnMut(&Leaf));

    /// Empties the stash of every leaf below this node.
    fn flush_caches(&mut self) {
        self.for_each_leaf_mut(&mut Leaf::flush);
    }
}

/// Owned trie node.
pub type NodeRef = Box<dyn DecodeNode>;

/// A leaf on its way to a special-case node.
#[derive(Debug)]
pub struct TableEntry {
    /// Opcode-space mask of the pinned fields.
    pub mask: Opcode,
    /// Required value of the masked bits.
    pub value: Opcode,
    /// Number of pinned fields.
    pub specificity: u32,
    /// The bound instruction.
    pub leaf: Leaf,
}

impl TableEntry {
    /// Returns `true` if `opcode` carries the entry's pinned bits.
    #[inline]
    pub const fn matches(&self, opcode: Opcode) -> bool {
        opcode & self.mask == self.value
    }
}

/// Decodes through `keyed`, falling back to `default` when the keyed child is
/// absent or reports [`DecodeError::UnknownOpcode`]. Any other error is final.
pub(crate) fn get_info_with_default(
    keyed: Option<&mut NodeRef>,
    default: Option<&mut NodeRef>,
    opcode: Opcode,
) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
    if let Some(child) = keyed {
        match child.get_info(opcode) {
            Err(DecodeError::UnknownOpcode { .. }) => {}
            other => return other,
        }
    }
    match default {
        Some(child) => child.get_info(opcode),
        None => Err(DecodeError::UnknownOpcode { opcode }),
    }
}

/// Leaf lookup with the same fallback as [`get_info_with_default`].
pub(crate) fn leaf_with_default<'a>(
    keyed: Option<&'a mut NodeRef>,
    default: Option<&'a mut NodeRef>,
    opcode: Opcode,
) -> Option<&'a mut Leaf> {
    if let Some(leaf) = keyed.and_then(|child| child.leaf_mut(opcode)) {
        return Some(leaf);
    }
    default.and_then(|child| child.leaf_mut(opcode))
}

/// Child name below `parent`.
pub(crate) fn child_name(parent: &str, key: fmt::Arguments<'_>) -> String {
    format!("{parent}/{key}")
}
