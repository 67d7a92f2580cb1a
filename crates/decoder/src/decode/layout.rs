//! Node shape templates and the standard RISC-V trie skeleton.
//!
//! Composite nodes create their children lazily, the first time an entry is
//! routed to them. A [`NodeShape`] describes what each child looks like, so a
//! whole trie skeleton can be written down as one value and instantiated
//! piecemeal while the catalogue is installed.

use super::dense::DenseNode;
use super::match_list::{Arm, MatchListNode};
use super::node::NodeRef;
use super::selector::{Selector, SelectorNode};
use super::sparse::SparseNode;
use super::special_case::SpecialCaseNode;
use crate::common::Opcode;
use crate::isa::field::Field;

/// Template of one trie node and, recursively, its children.
#[derive(Clone, Debug)]
pub enum NodeShape {
    /// Ordered (mask, value) list of leaves.
    SpecialCase,
    /// Table indexed by the full value range of `field`.
    Dense {
        /// Key field.
        field: Field,
        /// Shape of each keyed child.
        slots: SlotShapes,
        /// Shape of the child taking entries that leave `field` free.
        default: Option<Box<NodeShape>>,
    },
    /// Hash map keyed by `opcode & key_mask`.
    Sparse {
        /// Key bits.
        key_mask: Opcode,
        /// Shape of each keyed child.
        child: Box<NodeShape>,
        /// Shape of the child taking entries that leave key bits free.
        default: Option<Box<NodeShape>>,
    },
    /// Small table indexed by a derived key.
    Selector {
        /// Key derivation.
        selector: Selector,
        /// Shape of each keyed child.
        child: Box<NodeShape>,
        /// Shape of the child taking entries that leave the selector bits free.
        default: Option<Box<NodeShape>>,
    },
    /// Ordered predicates over one field.
    MatchList {
        /// Tested field.
        field: Field,
        /// Arms in match order.
        arms: Vec<ArmShape>,
    },
}

/// Child shapes of a dense node.
#[derive(Clone, Debug)]
pub enum SlotShapes {
    /// Every slot has the same shape.
    Uniform(Box<NodeShape>),
    /// Listed slots override `other`.
    Each {
        /// Per-key shapes.
        overrides: Vec<(u64, NodeShape)>,
        /// Shape of every unlisted slot.
        other: Box<NodeShape>,
    },
}

impl SlotShapes {
    /// Shape of the slot keyed `key`.
    pub fn shape(&self, key: u64) -> &NodeShape {
        match self {
            Self::Uniform(shape) => shape,
            Self::Each { overrides, other } => overrides
                .iter()
                .find(|(k, _)| *k == key)
                .map_or(other.as_ref(), |(_, shape)| shape),
        }
    }
}

/// Template of one match-list arm.
#[derive(Clone, Debug)]
pub struct ArmShape {
    /// Arm name, used in child node names.
    pub name: &'static str,
    /// Predicate over the field value; `None` matches everything.
    pub predicate: Option<fn(u64) -> bool>,
    /// Shape of the arm's node.
    pub shape: NodeShape,
}

impl NodeShape {
    /// Dense node without a default child.
    pub fn dense(field: Field, slots: SlotShapes) -> Self {
        Self::Dense {
            field,
            slots,
            default: None,
        }
    }

    /// Dense node whose every slot is a special-case list.
    pub fn dense_cases(field: Field) -> Self {
        Self::dense(field, SlotShapes::Uniform(Box::new(Self::SpecialCase))).or_cases()
    }

    /// Sparse node keyed by `key_mask` with special-case children.
    pub fn sparse_cases(key_mask: Opcode) -> Self {
        Self::Sparse {
            key_mask,
            child: Box::new(Self::SpecialCase),
            default: Some(Box::new(Self::SpecialCase)),
        }
    }

    /// Adds a special-case default child.
    #[must_use]
    pub fn or_cases(self) -> Self {
        self.with_default(Self::SpecialCase)
    }

    /// Replaces the default child of a dense, sparse or selector shape.
    #[must_use]
    pub fn with_default(self, shape: Self) -> Self {
        let default = Some(Box::new(shape));
        match self {
            Self::Dense { field, slots, .. } => Self::Dense {
                field,
                slots,
                default,
            },
            Self::Sparse { key_mask, child, .. } => Self::Sparse {
                key_mask,
                child,
                default,
            },
            Self::Selector { selector, child, .. } => Self::Selector {
                selector,
                child,
                default,
            },
            other => other,
        }
    }

    /// Creates an empty node of this shape named `name`.
    pub fn instantiate(&self, name: String) -> NodeRef {
        match self {
            Self::SpecialCase => Box::new(SpecialCaseNode::new(name)),
            Self::Dense {
                field,
                slots,
                default,
            } => Box::new(DenseNode::new(
                name,
                *field,
                slots.clone(),
                default.as_deref().cloned(),
            )),
            Self::Sparse {
                key_mask,
                child,
                default,
            } => Box::new(SparseNode::new(
                name,
                *key_mask,
                child.as_ref().clone(),
                default.as_deref().cloned(),
            )),
            Self::Selector {
                selector,
                child,
                default,
            } => Box::new(SelectorNode::new(
                name,
                selector.clone(),
                child.as_ref().clone(),
                default.as_deref().cloned(),
            )),
            Self::MatchList { field, arms } => Box::new(MatchListNode::new(
                name,
                *field,
                arms.iter().cloned().map(Arm::from).collect(),
            )),
        }
    }
}

/// Instruction-length bits.
const QUADRANT: Field = Field::new("quadrant", 0, 2);
/// Compressed major function.
const C_FUNCT3: Field = Field::new("funct3", 13, 3);
/// Compressed `rd`/`rs1`.
const C_RD: Field = Field::new("rd", 7, 5);
/// Compressed arithmetic sub-group.
const C_FUNCT2: Field = Field::new("funct2", 10, 2);
/// 32-bit major opcode above the quadrant.
const MAJOR: Field = Field::new("major", 2, 5);
/// 32-bit minor function.
const FUNCT3: Field = Field::new("funct3", 12, 3);
/// FP load/store width.
const WIDTH: Field = Field::new("width", 12, 3);
/// Vector arithmetic function.
const FUNCT6: Field = Field::new("funct6", 26, 6);

/// Bits 31:25 (`funct7`).
const FUNCT7_MASK: Opcode = 0xFE00_0000;
/// Bits 31:27 (AMO `funct5`).
const FUNCT5_MASK: Opcode = 0xF800_0000;
/// Bits 28:26 (vector `mew` and `mop`).
const MEW_MOP_MASK: Opcode = 0x1C00_0000;

/// Major opcodes (`opcode[6:2]`).
mod major {
    pub const LOAD: u64 = 0;
    pub const LOAD_FP: u64 = 1;
    pub const MISC_MEM: u64 = 3;
    pub const OP_IMM: u64 = 4;
    pub const OP_IMM_32: u64 = 6;
    pub const STORE: u64 = 8;
    pub const STORE_FP: u64 = 9;
    pub const AMO: u64 = 11;
    pub const OP: u64 = 12;
    pub const OP_32: u64 = 14;
    pub const OP_FP: u64 = 20;
    pub const OP_V: u64 = 21;
    pub const BRANCH: u64 = 24;
    pub const JALR: u64 = 25;
    pub const SYSTEM: u64 = 28;
}

/// Key of the `OP-V` `funct3 = 7` configuration instructions.
///
/// `vsetvli` has bit 31 clear, `vsetivli` has bits 31:30 set and `vsetvl`
/// has `funct7 = 1000000`.
pub fn vset_select(opcode: Opcode) -> usize {
    if (opcode >> 31) & 1 == 0 {
        0
    } else if (opcode >> 30) & 0b11 == 0b11 {
        1
    } else if (opcode >> 25) & 0x7F == 0b100_0000 {
        2
    } else {
        3
    }
}

/// Selector over the vector configuration instructions.
pub const VSET_SELECTOR: Selector = Selector {
    name: "vset",
    mask: FUNCT7_MASK,
    size: 4,
    select: vset_select,
};

fn in_scalar_fp_width(width: u64) -> bool {
    (1..=4).contains(&width)
}

fn is_sp(rd: u64) -> bool {
    rd == 2
}

/// FP loads and stores share their major opcode with vector memory accesses.
fn fp_memory() -> NodeShape {
    NodeShape::MatchList {
        field: WIDTH,
        arms: vec![
            ArmShape {
                name: "scalar",
                predicate: Some(in_scalar_fp_width),
                shape: NodeShape::SpecialCase,
            },
            ArmShape {
                name: "vector",
                predicate: None,
                shape: NodeShape::sparse_cases(MEW_MOP_MASK),
            },
        ],
    }
}

fn funct3_then(child: NodeShape) -> NodeShape {
    NodeShape::dense(FUNCT3, SlotShapes::Uniform(Box::new(child))).or_cases()
}

fn quadrant_32() -> NodeShape {
    let by_funct3 = NodeShape::dense_cases(FUNCT3);
    let by_funct7 = NodeShape::sparse_cases(FUNCT7_MASK);
    let op_v = NodeShape::dense(
        FUNCT3,
        SlotShapes::Each {
            overrides: vec![(
                7,
                NodeShape::Selector {
                    selector: VSET_SELECTOR,
                    child: Box::new(NodeShape::SpecialCase),
                    default: None,
                }
                .or_cases(),
            )],
            other: Box::new(NodeShape::dense_cases(FUNCT6)),
        },
    )
    .or_cases();

    NodeShape::dense(
        MAJOR,
        SlotShapes::Each {
            overrides: vec![
                (major::LOAD, by_funct3.clone()),
                (major::LOAD_FP, fp_memory()),
                (major::MISC_MEM, by_funct3.clone()),
                (major::OP_IMM, by_funct3.clone()),
                (major::OP_IMM_32, by_funct3.clone()),
                (major::STORE, by_funct3.clone()),
                (major::STORE_FP, fp_memory()),
                (major::AMO, funct3_then(NodeShape::sparse_cases(FUNCT5_MASK))),
                (major::OP, funct3_then(by_funct7.clone())),
                (major::OP_32, funct3_then(by_funct7.clone())),
                (major::OP_FP, funct3_then(by_funct7.clone()).with_default(by_funct7)),
                (major::OP_V, op_v),
                (major::BRANCH, by_funct3.clone()),
                (major::JALR, by_funct3.clone()),
                (major::SYSTEM, by_funct3),
            ],
            other: Box::new(NodeShape::SpecialCase),
        },
    )
    .or_cases()
}

fn quadrant_1() -> NodeShape {
    NodeShape::dense(
        C_FUNCT3,
        SlotShapes::Each {
            overrides: vec![
                (
                    3,
                    NodeShape::MatchList {
                        field: C_RD,
                        arms: vec![
                            ArmShape {
                                name: "sp",
                                predicate: Some(is_sp),
                                shape: NodeShape::SpecialCase,
                            },
                            ArmShape {
                                name: "other",
                                predicate: None,
                                shape: NodeShape::SpecialCase,
                            },
                        ],
                    },
                ),
                (4, NodeShape::dense_cases(C_FUNCT2)),
            ],
            other: Box::new(NodeShape::SpecialCase),
        },
    )
    .or_cases()
}

/// The standard skeleton: quadrant, then major opcode, then `funct3`, then
/// per-major sparse, selector or match-list levels above the special cases.
pub fn standard() -> NodeShape {
    NodeShape::dense(
        QUADRANT,
        SlotShapes::Each {
            overrides: vec![
                (0, NodeShape::dense_cases(C_FUNCT3)),
                (1, quadrant_1()),
                (2, NodeShape::dense_cases(C_FUNCT3)),
                (3, quadrant_32()),
            ],
            other: Box::new(NodeShape::SpecialCase),
        },
    )
}
