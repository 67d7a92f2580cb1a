//! Derived 32-bit extractors.
//!
//! Each variant wraps a base variant from [`super::base`] and overrides only
//! what differs:
//! 1. **Hint predicates:** Integer arithmetic writing `x0`.
//! 2. **Memory roles:** Address and data registers of loads, `jalr` and cache-block ops.
//! 3. **Register pairs:** Zilsd `ld`/`sd` on RV32 and Zacas pair CAS, where the
//!    second register is the first plus one and an odd first register is reserved.
//! 4. **System:** Operand-less encodings such as `ecall` and `mret`.

use super::base::{AmoType, IType, RType, SType};
use super::{DasmStyle, Extractor, FieldReader, derived_identity};
use crate::common::{Opcode, RegisterMask, RegisterMaskExt};
use crate::isa::form::FixedFields;
use crate::isa::form::base::{I, R, amo, i, r, s};
use crate::isa::operand::{ImmediateType, OperandFieldId as Role, RegOperand};

/// Second register of a pair based at `base`.
///
/// A pair based at `x0` keeps `x0` and adds nothing; an odd base is reserved
/// and reported through `is_illop`, so no companion is produced for it either.
pub fn pair_companion(base: Option<RegOperand>, role: Role) -> Option<RegOperand> {
    let base = base?;
    if base.reg == 0 || base.reg % 2 != 0 {
        return None;
    }
    let companion = RegOperand::explicit(role, base.reg + 1);
    Some(if base.is_store_data {
        companion.store_data()
    } else {
        companion
    })
}

/// `addi`-family arithmetic. Writing `x0` is a hint except for the canonical `nop`.
#[derive(Clone, Copy, Debug)]
pub struct IArith {
    parent: IType,
}

impl IArith {
    /// Canonical `addi x0, x0, 0`.
    pub const NOP: Opcode = 0x0000_0013;

    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: IType::new(fixed),
        }
    }
}

impl Extractor for IArith {
    derived_identity!("I_arith");

    fn is_hint(&self, opcode: Opcode) -> bool {
        opcode != Self::NOP && I.extract(i::RD, opcode) == 0
    }
}

/// Register-register arithmetic. Writing `x0` is a hint.
#[derive(Clone, Copy, Debug)]
pub struct RArith {
    parent: RType,
}

impl RArith {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: RType::new(fixed),
        }
    }
}

impl Extractor for RArith {
    derived_identity!("R_arith");

    fn is_hint(&self, opcode: Opcode) -> bool {
        R.extract(r::RD, opcode) == 0
    }
}

/// Integer and floating-point loads, `rd <- mem[rs1 + imm]`.
#[derive(Clone, Copy, Debug)]
pub struct ILoad {
    parent: IType,
}

impl ILoad {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: IType::new(fixed),
        }
    }
}

impl Extractor for ILoad {
    derived_identity!("I_load");

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        FieldReader::of(self, opcode)
            .reg(i::RS1, Role::Rs1)
            .map_or(0, |op| RegisterMask::of(op.reg))
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Load
    }
}

/// Zilsd `ld` on RV32: loads `rd` and `rd + 1`.
#[derive(Clone, Copy, Debug)]
pub struct ILoadPair {
    parent: ILoad,
}

impl ILoadPair {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: ILoad::new(fixed),
        }
    }
}

impl Extractor for ILoadPair {
    derived_identity!("I_load_pair");

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.dest_operands(opcode);
        let rd = FieldReader::of(self, opcode).reg(i::RD, Role::Rd);
        ops.extend(pair_companion(rd, Role::Rd2));
        ops
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        FieldReader::of(self, opcode).odd(i::RD)
    }
}

/// `jalr rd, imm(rs1)`.
#[derive(Clone, Copy, Debug)]
pub struct IJalr {
    parent: IType,
}

impl IJalr {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: IType::new(fixed),
        }
    }
}

impl Extractor for IJalr {
    derived_identity!("I_jalr");

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Load
    }
}

/// `jalr` with `rs1` pinned (`ret`). The pinned base is still read, so it is
/// reported as an implied source.
#[derive(Clone, Copy, Debug)]
pub struct IRet {
    parent: IJalr,
}

impl IRet {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: IJalr::new(fixed),
        }
    }
}

impl Extractor for IRet {
    derived_identity!("I_ret");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        let mut ops = self.parent.source_operands(opcode);
        if f.pinned(i::RS1) {
            ops.push(RegOperand::implied(Role::Rs1, f.value(i::RS1) as u32));
        }
        ops
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Bare
    }
}

/// Zicbom/Zicboz cache-block operations on the block at `(rs1)`.
#[derive(Clone, Copy, Debug)]
pub struct ICbo {
    parent: IType,
}

impl ICbo {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: IType::new(fixed),
        }
    }
}

impl Extractor for ICbo {
    derived_identity!("I_cbo");

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        self.source_regs(opcode)
    }

    fn immediate(&self, _opcode: Opcode) -> u64 {
        0
    }

    fn signed_offset(&self, _opcode: Opcode) -> i64 {
        0
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::None
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Amo
    }
}

/// Fully pinned system encodings (`ecall`, `ebreak`, `mret`, `wfi`, ...).
#[derive(Clone, Copy, Debug)]
pub struct ISystem {
    parent: IType,
}

impl ISystem {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: IType::new(fixed),
        }
    }
}

impl Extractor for ISystem {
    derived_identity!("I_system");

    fn source_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        Vec::new()
    }

    fn dest_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        Vec::new()
    }

    fn immediate(&self, _opcode: Opcode) -> u64 {
        0
    }

    fn signed_offset(&self, _opcode: Opcode) -> i64 {
        0
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::None
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Bare
    }
}

/// Zilsd `sd` on RV32: stores `rs2` and `rs2 + 1`.
#[derive(Clone, Copy, Debug)]
pub struct SStorePair {
    parent: SType,
}

impl SStorePair {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: SType::new(fixed),
        }
    }
}

impl Extractor for SStorePair {
    derived_identity!("S_store_pair");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.source_operands(opcode);
        let rs2 = FieldReader::of(self, opcode)
            .reg(s::RS2, Role::Rs2)
            .map(RegOperand::store_data);
        ops.extend(pair_companion(rs2, Role::Rs2Pair));
        ops
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        FieldReader::of(self, opcode).odd(s::RS2)
    }
}

/// Zacas pair CAS (`amocas.d` on RV32, `amocas.q` on RV64).
///
/// Both the destination and the data source are pairs; either being odd is
/// reserved.
#[derive(Clone, Copy, Debug)]
pub struct AmoPair {
    parent: AmoType,
}

impl AmoPair {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: AmoType::new(fixed),
        }
    }
}

impl Extractor for AmoPair {
    derived_identity!("AMO_pair");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.source_operands(opcode);
        let rs2 = FieldReader::of(self, opcode)
            .reg(amo::RS2, Role::Rs2)
            .map(RegOperand::store_data);
        ops.extend(pair_companion(rs2, Role::Rs2Pair));
        ops
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.dest_operands(opcode);
        let rd = FieldReader::of(self, opcode).reg(amo::RD, Role::Rd);
        ops.extend(pair_companion(rd, Role::Rd2));
        ops
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        let f = FieldReader::of(self, opcode);
        f.odd(amo::RD) || f.odd(amo::RS2)
    }
}
