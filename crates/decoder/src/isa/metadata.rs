//! Instruction metadata and annotation collaborators.
//!
//! Metadata tells extractors the declared type of each operand role and the
//! instruction classes a mnemonic belongs to; annotations carry opaque
//! microarchitectural tags. Both are supplied by the table builder and may be
//! hot-reloaded on a live decode context.
//!
//! The crate defines the trait contracts plus simple static implementations
//! used by the built-in catalogue.

use std::fmt;
use std::sync::Arc;

use crate::isa::operand::{OperandFieldId, OperandType};

/// Instruction classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum InstructionType {
    /// Integer operation.
    Int,
    /// Floating-point operation.
    Float,
    /// Arithmetic.
    Arith,
    /// Multiplication.
    Multiply,
    /// Division or remainder.
    Divide,
    /// Fused multiply-add.
    Mac,
    /// Square root.
    Sqrt,
    /// Type or width conversion.
    Convert,
    /// Comparison.
    Compare,
    /// Register move.
    Move,
    /// Classification (`fclass`).
    Classify,
    /// Control transfer.
    Branch,
    /// Conditional control transfer.
    Conditional,
    /// Jump and link.
    Jal,
    /// Indirect jump and link.
    Jalr,
    /// Reads the program counter.
    Pc,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Atomic memory operation.
    Atomic,
    /// Memory ordering fence.
    Fence,
    /// System or privileged instruction.
    System,
    /// CSR access.
    Csr,
    /// Cache-block operation.
    Cache,
    /// Prefetch hint.
    Prefetch,
    /// Vector operation.
    Vector,
    /// Vector configuration.
    VSet,
    /// Maskable vector operation.
    Maskable,
    /// Unit-stride vector memory access.
    UnitStride,
    /// Strided vector memory access.
    Stride,
    /// Indexed vector memory access.
    Indexed,
    /// Whole-register vector memory access.
    Whole,
    /// Vector mask operation.
    Mask,
    /// Compressed encoding.
    Compressed,
    /// Register-pair access.
    Pair,
    /// Zcmp push/pop or paired move.
    StackList,
}

/// A set of [`InstructionType`]s packed into a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InstTypeSet(u64);

impl InstTypeSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a list of types.
    pub const fn of(types: &[InstructionType]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < types.len() {
            bits |= 1 << types[i] as u8;
            i += 1;
        }
        Self(bits)
    }

    /// Returns `true` if `ty` is in the set.
    pub const fn contains(self, ty: InstructionType) -> bool {
        self.0 & (1 << ty as u8) != 0
    }

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Raw bitmask.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns `true` if no type is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Read-only per-mnemonic metadata.
pub trait InstMetadata: fmt::Debug + Send + Sync {
    /// Declared type of the operand in role `field`.
    fn operand_type(&self, field: OperandFieldId) -> OperandType;

    /// Instruction classes of the mnemonic.
    fn inst_types(&self) -> InstTypeSet;

    /// Returns `true` if the mnemonic belongs to class `ty`.
    fn is_inst_type(&self, ty: InstructionType) -> bool {
        self.inst_types().contains(ty)
    }
}

/// Shared metadata handle.
pub type MetadataRef = Arc<dyn InstMetadata>;

/// Metadata that declares every operand as an XLEN integer and no classes.
///
/// Used by the bare disassembly overload, which formats every register with
/// an `x` prefix.
#[derive(Clone, Copy, Debug, Default)]
pub struct UntypedMetadata;

impl InstMetadata for UntypedMetadata {
    fn operand_type(&self, _field: OperandFieldId) -> OperandType {
        OperandType::Long
    }

    fn inst_types(&self) -> InstTypeSet {
        InstTypeSet::EMPTY
    }
}

/// Compile-time description of a mnemonic's metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetaSpec {
    /// Instruction classes.
    pub types: InstTypeSet,
    /// Explicit per-role operand types.
    pub operands: &'static [(OperandFieldId, OperandType)],
    /// Type of every role not listed in `operands`.
    pub default: OperandType,
}

impl MetaSpec {
    /// Integer instruction with XLEN-wide operands.
    pub const fn int(types: &[InstructionType]) -> Self {
        Self {
            types: InstTypeSet::of(types),
            operands: &[],
            default: OperandType::Long,
        }
    }

    /// Instruction whose operands all share `default`.
    pub const fn uniform(types: &[InstructionType], default: OperandType) -> Self {
        Self {
            types: InstTypeSet::of(types),
            operands: &[],
            default,
        }
    }

    /// Overrides the listed operand roles.
    #[must_use]
    pub const fn with(mut self, operands: &'static [(OperandFieldId, OperandType)]) -> Self {
        self.operands = operands;
        self
    }

    /// Resolves the type of `field`.
    pub fn operand_type(&self, field: OperandFieldId) -> OperandType {
        self.operands
            .iter()
            .find(|(f, _)| *f == field)
            .map_or(self.default, |(_, ty)| *ty)
    }
}

/// [`InstMetadata`] backed by a [`MetaSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticMetadata {
    spec: MetaSpec,
}

impl StaticMetadata {
    /// Wraps a spec.
    pub const fn new(spec: MetaSpec) -> Self {
        Self { spec }
    }

    /// Wraps a spec into a shared handle.
    pub fn shared(spec: MetaSpec) -> MetadataRef {
        Arc::new(Self::new(spec))
    }
}

impl InstMetadata for StaticMetadata {
    fn operand_type(&self, field: OperandFieldId) -> OperandType {
        self.spec.operand_type(field)
    }

    fn inst_types(&self) -> InstTypeSet {
        self.spec.types
    }
}

/// Opaque microarchitectural annotation attached to a mnemonic.
pub trait Annotation: fmt::Debug + Send + Sync {
    /// Tags carried by the annotation.
    fn tags(&self) -> &[String];

    /// Returns `true` if `tag` is present.
    fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

/// Shared annotation handle.
pub type AnnotationRef = Arc<dyn Annotation>;

/// Annotation holding a plain list of tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagAnnotation {
    tags: Vec<String>,
}

impl TagAnnotation {
    /// Creates an annotation from a tag list.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Annotation for TagAnnotation {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}
