//! Decode trie and the structures hanging off it.
//!
//! An opcode enters at the root node and is routed through composite nodes
//! until a special-case node picks the bound leaf:
//! 1. **Composites:** Dense, sparse, selector and match-list nodes narrow the
//!    opcode space by one field (or one derived key) per level.
//! 2. **Special cases:** Ordered (mask, value) lists; the most specific match wins.
//! 3. **Leaves:** A bound instruction with its pseudo-instruction overlays and
//!    a per-leaf stash of decoded infos.
//!
//! The trie is built once by [`builder::DecodeTableBuilder`] from a
//! [`layout::NodeShape`] skeleton and then owned by a [`context::DecodeContext`].

/// Table construction contract.
pub mod builder;

/// Public decode entry point.
pub mod context;

/// Dense node indexed by one field.
pub mod dense;

/// Shape templates and the standard RISC-V skeleton.
pub mod layout;

/// Bound instruction with overlays and a stash.
pub mod leaf;

/// Ordered-predicate node over one field.
pub mod match_list;

/// Node trait and shared routing helpers.
pub mod node;

/// Pseudo-instruction substitution records.
pub mod overlay;

/// Derived-key node collapsing a wide field onto a small table.
pub mod selector;

/// Hash node keyed by a bit mask.
pub mod sparse;

/// Ordered (mask, value) list of leaves.
pub mod special_case;

/// Per-leaf extraction cache.
pub mod stash;

/// Per-context unique ids.
pub mod uid;

pub use builder::{DecodeTable, DecodeTableBuilder};
pub use context::DecodeContext;
pub use node::{DecodeNode, NodeRef, TableEntry};
pub use stash::StashStats;
