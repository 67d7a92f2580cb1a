//! Base extractors of the 32-bit forms.
//!
//! One variant per form in [`crate::isa::form::base`]. Register fields that are
//! pinned by the leaf's fixed-field context are never reported.

use super::{DasmStyle, Extractor, FieldReader, base_identity, operands};
use crate::common::error::DecodeError;
use crate::common::{Opcode, RegisterMask, RegisterMaskExt};
use crate::isa::field::sign_extend;
use crate::isa::form::base::{self as forms, amo, csr, fence, i, ish, ishw, pf, r, r4, s, u};
use crate::isa::form::FixedFields;
use crate::isa::metadata::InstMetadata;
use crate::isa::operand::{ImmediateType, OperandFieldId as Role, RegOperand};
use crate::isa::special::SpecialField;
use crate::isa::swizzle::{BitRange, Swizzler};

/// Branch offset bits 12:1 in source order (bit 0 is always zero).
const B_IMM: &[BitRange] = &[
    BitRange::span(8, 11),
    BitRange::span(25, 30),
    BitRange::bit(7),
    BitRange::bit(31),
];

/// Jump offset bits 20:1 in source order (bit 0 is always zero).
const J_IMM: &[BitRange] = &[
    BitRange::span(21, 30),
    BitRange::bit(20),
    BitRange::span(12, 19),
    BitRange::bit(31),
];

/// Mask with only `rs1` set, or zero when it is pinned.
fn rs1_mask(f: &FieldReader, idx: usize) -> RegisterMask {
    f.reg(idx, Role::Rs1)
        .map_or(0, |op| RegisterMask::of(op.reg))
}

/// `R`: `rd <- rs1 op rs2`, with an optional rounding mode in `funct3`.
#[derive(Clone, Copy, Debug)]
pub struct RType {
    fixed: FixedFields,
}

impl RType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

const R_SPECIAL: &[(SpecialField, usize)] = &[(SpecialField::Rm, r::FUNCT3)];

impl Extractor for RType {
    base_identity!("R", forms::R);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([f.reg(r::RS1, Role::Rs1), f.reg(r::RS2, Role::Rs2)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([f.reg(r::RD, Role::Rd)])
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Rm]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        FieldReader::of(self, opcode).special(self.tag(), R_SPECIAL, field)
    }
}

/// `R4`: fused multiply-add, `rd <- rs1 * rs2 + rs3`.
#[derive(Clone, Copy, Debug)]
pub struct R4Type {
    fixed: FixedFields,
}

impl R4Type {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

const R4_SPECIAL: &[(SpecialField, usize)] = &[(SpecialField::Rm, r4::FUNCT3)];

impl Extractor for R4Type {
    base_identity!("R4", forms::R4);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([
            f.reg(r4::RS1, Role::Rs1),
            f.reg(r4::RS2, Role::Rs2),
            f.reg(r4::RS3, Role::Rs3),
        ])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(r4::RD, Role::Rd)])
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Rm]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        FieldReader::of(self, opcode).special(self.tag(), R4_SPECIAL, field)
    }
}

/// `I`: `rd <- rs1 op imm12`.
#[derive(Clone, Copy, Debug)]
pub struct IType {
    fixed: FixedFields,
}

impl IType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for IType {
    base_identity!("I", forms::I);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(i::RS1, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(i::RD, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::I.extract(i::IMM, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 12)
    }

    /// A pinned immediate (`mv`, `not`, `ret`, ...) is part of the encoding, not an operand.
    fn immediate_type(&self) -> ImmediateType {
        if self.fixed.is_pinned(i::IMM) {
            ImmediateType::None
        } else {
            ImmediateType::Signed
        }
    }
}

/// `ISH`: shift by a 6-bit immediate. `rd == x0` is a hint.
#[derive(Clone, Copy, Debug)]
pub struct IshType {
    fixed: FixedFields,
}

impl IshType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for IshType {
    base_identity!("ISH", forms::ISH);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(ish::RS1, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(ish::RD, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::ISH.extract(ish::SHAMT, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::ISH.extract(ish::RD, opcode) == 0
    }
}

/// `ISHW`: shift by a 5-bit immediate. `rd == x0` is a hint.
#[derive(Clone, Copy, Debug)]
pub struct IshwType {
    fixed: FixedFields,
}

impl IshwType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for IshwType {
    base_identity!("ISHW", forms::ISHW);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(ishw::RS1, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(ishw::RD, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::ISHW.extract(ishw::SHAMT, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::ISHW.extract(ishw::RD, opcode) == 0
    }
}

/// `S`: store `rs2` to `imm(rs1)`.
#[derive(Clone, Copy, Debug)]
pub struct SType {
    fixed: FixedFields,
}

impl SType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for SType {
    base_identity!("S", forms::S);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([
            f.reg(s::RS1, Role::Rs1),
            f.reg(s::RS2, Role::Rs2).map(RegOperand::store_data),
        ])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        rs1_mask(&FieldReader::of(self, opcode), s::RS1)
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        (forms::S.extract(s::IMM7, opcode) << 5) | forms::S.extract(s::IMM5, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 12)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Store
    }
}

/// `B`: conditional branch comparing `rs1` and `rs2`.
#[derive(Clone, Copy, Debug)]
pub struct BType {
    fixed: FixedFields,
}

impl BType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for BType {
    base_identity!("B", forms::B);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([f.reg(s::RS1, Role::Rs1), f.reg(s::RS2, Role::Rs2)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, B_IMM) << 1
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 13)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }
}

/// `U`: upper immediate. The immediate is the raw 20-bit field; the signed
/// offset is the sign-extended `imm20 << 12`. `rd == x0` is a hint.
#[derive(Clone, Copy, Debug)]
pub struct UType {
    fixed: FixedFields,
}

impl UType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for UType {
    base_identity!("U", forms::U);

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(u::RD, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::U.extract(u::IMM20, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode) << 12, 32)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::U.extract(u::RD, opcode) == 0
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Upper
    }
}

/// `J`: jump and link.
#[derive(Clone, Copy, Debug)]
pub struct JType {
    fixed: FixedFields,
}

impl JType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for JType {
    base_identity!("J", forms::J);

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(u::RD, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, J_IMM) << 1
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 21)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }
}

/// `AMO`: atomic read-modify-write of `(rs1)` with `rs2`, old value to `rd`.
#[derive(Clone, Copy, Debug)]
pub struct AmoType {
    fixed: FixedFields,
}

impl AmoType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

const AMO_SPECIAL: &[(SpecialField, usize)] = &[
    (SpecialField::Aq, amo::AQ),
    (SpecialField::Rl, amo::RL),
    (SpecialField::Wd, amo::RD),
];

impl Extractor for AmoType {
    base_identity!("AMO", forms::AMO);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([
            f.reg(amo::RS1, Role::Rs1),
            f.reg(amo::RS2, Role::Rs2).map(RegOperand::store_data),
        ])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(amo::RD, Role::Rd)])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        rs1_mask(&FieldReader::of(self, opcode), amo::RS1)
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Aq, SpecialField::Rl, SpecialField::Wd]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        let raw = FieldReader::of(self, opcode).special(self.tag(), AMO_SPECIAL, field)?;
        Ok(if field == SpecialField::Wd {
            u64::from(raw == 0)
        } else {
            raw
        })
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Amo
    }
}

/// `CSR`: read/modify CSR with a register source.
#[derive(Clone, Copy, Debug)]
pub struct CsrType {
    fixed: FixedFields,
}

impl CsrType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

const CSR_SPECIAL: &[(SpecialField, usize)] = &[(SpecialField::Csr, csr::CSR)];

impl Extractor for CsrType {
    base_identity!("CSR", forms::CSR);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(csr::RS1, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(csr::RD, Role::Rd)])
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Csr]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        FieldReader::of(self, opcode).special(self.tag(), CSR_SPECIAL, field)
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Csr
    }
}

/// `CSRI`: read/modify CSR with a 5-bit zero-extended immediate.
#[derive(Clone, Copy, Debug)]
pub struct CsriType {
    fixed: FixedFields,
}

impl CsriType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CsriType {
    base_identity!("CSRI", forms::CSRI);

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(csr::RD, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::CSRI.extract(csr::RS1, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Csr]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        FieldReader::of(self, opcode).special(self.tag(), CSR_SPECIAL, field)
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Csr
    }
}

/// `FENCE`: memory ordering. An empty predecessor or successor set is a hint.
#[derive(Clone, Copy, Debug)]
pub struct FenceType {
    fixed: FixedFields,
}

impl FenceType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

const FENCE_SPECIAL: &[(SpecialField, usize)] = &[
    (SpecialField::Fm, fence::FM),
    (SpecialField::Pred, fence::PRED),
    (SpecialField::Succ, fence::SUCC),
];

impl Extractor for FenceType {
    base_identity!("FENCE", forms::FENCE);

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::FENCE.extract(fence::PRED, opcode) == 0
            || forms::FENCE.extract(fence::SUCC, opcode) == 0
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Fm, SpecialField::Pred, SpecialField::Succ]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        FieldReader::of(self, opcode).special(self.tag(), FENCE_SPECIAL, field)
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Fence
    }
}

/// `PF`: cache-block prefetch of `imm(rs1)`; the offset's low five bits are zero.
#[derive(Clone, Copy, Debug)]
pub struct PrefetchType {
    fixed: FixedFields,
}

impl PrefetchType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for PrefetchType {
    base_identity!("PF", forms::PF);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(pf::RS1, Role::Rs1)])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        rs1_mask(&FieldReader::of(self, opcode), pf::RS1)
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::PF.extract(pf::IMM7, opcode) << 5
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 12)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }

    fn is_hint(&self, _opcode: Opcode) -> bool {
        true
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Load
    }
}
