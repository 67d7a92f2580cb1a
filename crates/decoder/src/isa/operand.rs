//! Operand roles, operand types and operand info lists.
//!
//! Extractors describe the registers an encoding touches as ordered lists of
//! [`RegOperand`]s. Combined with the declared [`OperandType`] of each role
//! (supplied by instruction metadata) they become [`OperandElement`]s, the
//! public operand info consumed by simulators and disassemblers.

use std::fmt;

use crate::common::{RegisterMask, RegisterMaskExt};

/// Role of an operand within an encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperandFieldId {
    /// First source register.
    Rs1,
    /// Second source register.
    Rs2,
    /// Third source register (fused multiply-add).
    Rs3,
    /// Destination register.
    Rd,
    /// Second destination register of a register pair.
    Rd2,
    /// Second source register of a register pair.
    Rs2Pair,
    /// Register taken from a Zcmp register list.
    Rlist,
    /// Vector mask register (`v0`).
    Vm,
}

impl OperandFieldId {
    /// Lower-case role name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rs1 => "rs1",
            Self::Rs2 => "rs2",
            Self::Rs3 => "rs3",
            Self::Rd => "rd",
            Self::Rd2 => "rd2",
            Self::Rs2Pair => "rs2_pair",
            Self::Rlist => "rlist",
            Self::Vm => "vm",
        }
    }
}

impl fmt::Display for OperandFieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register class an operand type belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegClass {
    /// Integer register file (`x0`..`x31`).
    Integer,
    /// Floating-point register file (`f0`..`f31`).
    Float,
    /// Vector register file (`v0`..`v31`).
    Vector,
}

impl RegClass {
    /// Disassembly prefix of the class.
    pub const fn prefix(self) -> char {
        match self {
            Self::Integer => 'x',
            Self::Float => 'f',
            Self::Vector => 'v',
        }
    }
}

/// Declared width/type of an operand, plus the `All`/`None` query wildcards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperandType {
    /// 8-bit integer.
    Byte,
    /// 16-bit floating point.
    Half,
    /// 32-bit integer.
    Word,
    /// 64-bit integer (XLEN-wide register).
    Long,
    /// 32-bit floating point.
    Single,
    /// 64-bit floating point.
    Double,
    /// 128-bit floating point.
    Quad,
    /// Vector register.
    Vector,
    /// Wildcard: every operand regardless of type.
    All,
    /// Wildcard: no operand.
    None,
}

impl OperandType {
    /// The concrete (non-wildcard) operand types.
    pub const CONCRETE: [Self; 8] = [
        Self::Byte,
        Self::Half,
        Self::Word,
        Self::Long,
        Self::Single,
        Self::Double,
        Self::Quad,
        Self::Vector,
    ];

    /// Register class of a concrete type; `None` for the wildcards.
    pub const fn class(self) -> Option<RegClass> {
        match self {
            Self::Byte | Self::Word | Self::Long => Some(RegClass::Integer),
            Self::Half | Self::Single | Self::Double | Self::Quad => Some(RegClass::Float),
            Self::Vector => Some(RegClass::Vector),
            Self::All | Self::None => None,
        }
    }

    /// Returns `true` for integer-class types.
    pub const fn is_integer(self) -> bool {
        matches!(self.class(), Some(RegClass::Integer))
    }

    /// Position in [`OperandType::CONCRETE`], `None` for wildcards.
    pub const fn ordinal(self) -> Option<usize> {
        match self {
            Self::Byte => Some(0),
            Self::Half => Some(1),
            Self::Word => Some(2),
            Self::Long => Some(3),
            Self::Single => Some(4),
            Self::Double => Some(5),
            Self::Quad => Some(6),
            Self::Vector => Some(7),
            Self::All | Self::None => None,
        }
    }
}

/// Sign semantics of an instruction's immediate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImmediateType {
    /// The encoding has no immediate.
    #[default]
    None,
    /// The immediate is sign-extended.
    Signed,
    /// The immediate is zero-extended.
    Unsigned,
}

/// An untyped register operand as produced by an extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegOperand {
    /// Role of the operand.
    pub field: OperandFieldId,
    /// Architectural register index.
    pub reg: u32,
    /// The register supplies data written to memory.
    pub is_store_data: bool,
    /// The register is implied by the instruction and consumes no opcode bits.
    pub is_implied: bool,
}

impl RegOperand {
    /// An operand encoded in the opcode.
    pub const fn explicit(field: OperandFieldId, reg: u32) -> Self {
        Self {
            field,
            reg,
            is_store_data: false,
            is_implied: false,
        }
    }

    /// An operand implied by the instruction.
    pub const fn implied(field: OperandFieldId, reg: u32) -> Self {
        Self {
            field,
            reg,
            is_store_data: false,
            is_implied: true,
        }
    }

    /// Marks the operand as store data.
    #[must_use]
    pub const fn store_data(mut self) -> Self {
        self.is_store_data = true;
        self
    }
}

/// Folds a list of operands into a register mask.
pub fn operand_mask(operands: &[RegOperand]) -> RegisterMask {
    operands
        .iter()
        .filter(|op| op.reg < RegisterMask::BITS)
        .fold(0, |mask, op| mask | RegisterMask::of(op.reg))
}

/// A typed operand of a decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OperandElement {
    /// Role of the operand.
    pub field: OperandFieldId,
    /// Declared operand type.
    pub operand_type: OperandType,
    /// Architectural register index.
    pub reg: u32,
    /// The register supplies data written to memory.
    pub is_store_data: bool,
    /// The register is implied by the instruction and consumes no opcode bits.
    pub is_implied: bool,
}

impl OperandElement {
    /// Register class, defaulting to integer for wildcard types.
    pub fn class(&self) -> RegClass {
        self.operand_type.class().unwrap_or(RegClass::Integer)
    }

    /// Returns `true` for the hard-wired integer zero register.
    pub fn is_int_zero(&self) -> bool {
        self.reg == 0 && self.class() == RegClass::Integer
    }
}

impl fmt::Display for OperandElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class().prefix(), self.reg)
    }
}

/// Ordered operand list. Order is part of the contract: destinations list
/// `rd`, `rd2`, ... and sources list `rs1`, `rs2`, `rs3`, then implied operands.
pub type OperandInfo = Vec<OperandElement>;
