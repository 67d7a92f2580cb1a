//! Vector extractors.
//!
//! A cleared `vm` bit adds `v0` as an implicit mask source (role
//! [`Role::Vm`]) after the encoded sources. The operand classes (vector,
//! scalar integer or float) are declared by each mnemonic's metadata.

use super::{DasmStyle, Extractor, FieldReader, base_identity, derived_identity};
use crate::common::constants::VREG_MASK;
use crate::common::error::DecodeError;
use crate::common::{Opcode, RegisterMask, RegisterMaskExt};
use crate::isa::field::sign_extend;
use crate::isa::form::FixedFields;
use crate::isa::form::vector::{self as forms, v, vmem, vsetivli, vsetvli};
use crate::isa::metadata::InstMetadata;
use crate::isa::operand::{ImmediateType, OperandFieldId as Role, RegOperand};
use crate::isa::special::SpecialField;

/// Implicit `v0.t` source when the `vm` field at `idx` is unpinned and clear.
fn mask_source(f: &FieldReader, idx: usize) -> Option<RegOperand> {
    (!f.pinned(idx) && f.value(idx) == 0).then(|| RegOperand::explicit(Role::Vm, VREG_MASK))
}

/// `V`: `vd <- vs2 op vs1|rs1|fs1`.
#[derive(Clone, Copy, Debug)]
pub struct VType {
    fixed: FixedFields,
}

impl VType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

const V_SPECIAL: &[(SpecialField, usize)] = &[(SpecialField::Vm, v::VM)];

impl Extractor for VType {
    base_identity!("V", forms::V);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        [
            f.reg(v::RS1, Role::Rs1),
            f.reg(v::RS2, Role::Rs2),
            mask_source(&f, v::VM),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        FieldReader::of(self, opcode)
            .reg(v::RD, Role::Rd)
            .into_iter()
            .collect()
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Vm]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        FieldReader::of(self, opcode).special(self.tag(), V_SPECIAL, field)
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::VectorArith
    }
}

/// `.vi` shape: the `rs1` field holds a signed 5-bit immediate.
#[derive(Clone, Copy, Debug)]
pub struct VImm {
    parent: VType,
}

impl VImm {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: VType::new(fixed),
        }
    }
}

impl Extractor for VImm {
    derived_identity!("V_vi");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        self.parent
            .source_operands(opcode)
            .into_iter()
            .filter(|op| op.field != Role::Rs1)
            .collect()
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::V.extract(v::RS1, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 5)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }
}

/// `.vi` shape with an unsigned immediate (shifts, slides, gathers).
#[derive(Clone, Copy, Debug)]
pub struct VImmUnsigned {
    parent: VImm,
}

impl VImmUnsigned {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: VImm::new(fixed),
        }
    }
}

impl Extractor for VImmUnsigned {
    derived_identity!("V_viu");

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }
}

/// Multiply-accumulate: `vd` is read as well as written.
#[derive(Clone, Copy, Debug)]
pub struct VAccumulate {
    parent: VType,
}

impl VAccumulate {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: VType::new(fixed),
        }
    }
}

impl Extractor for VAccumulate {
    derived_identity!("V_vd_src");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        [
            f.reg(v::RS1, Role::Rs1),
            f.reg(v::RS2, Role::Rs2),
            f.reg(v::RD, Role::Rs3),
            mask_source(&f, v::VM),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::VectorMac
    }
}

/// `VF_MEM` loads: `vd <- mem[rs1 (+ rs2 | vs2)]`.
#[derive(Clone, Copy, Debug)]
pub struct VMemType {
    fixed: FixedFields,
}

impl VMemType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

const VMEM_SPECIAL: &[(SpecialField, usize)] = &[
    (SpecialField::Vm, vmem::VM),
    (SpecialField::Nf, vmem::NF),
    (SpecialField::Mew, vmem::MEW),
    (SpecialField::Mop, vmem::MOP),
    (SpecialField::Width, vmem::WIDTH),
];

impl Extractor for VMemType {
    base_identity!("VF_MEM", forms::VF_MEM);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        [
            f.reg(vmem::RS1, Role::Rs1),
            f.reg(vmem::RS2, Role::Rs2),
            mask_source(&f, vmem::VM),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        FieldReader::of(self, opcode)
            .reg(vmem::RD, Role::Rd)
            .into_iter()
            .collect()
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        FieldReader::of(self, opcode)
            .reg(vmem::RS1, Role::Rs1)
            .map_or(0, |op| RegisterMask::of(op.reg))
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[
            SpecialField::Vm,
            SpecialField::Nf,
            SpecialField::Mew,
            SpecialField::Mop,
            SpecialField::Width,
        ]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        FieldReader::of(self, opcode).special(self.tag(), VMEM_SPECIAL, field)
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::VectorMem
    }
}

/// `VF_MEM` stores: `vs3` (the `rd` field) is store data.
#[derive(Clone, Copy, Debug)]
pub struct VMemStore {
    parent: VMemType,
}

impl VMemStore {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: VMemType::new(fixed),
        }
    }
}

impl Extractor for VMemStore {
    derived_identity!("VF_mem_store");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        [
            f.reg(vmem::RS1, Role::Rs1),
            f.reg(vmem::RS2, Role::Rs2),
            f.reg(vmem::RD, Role::Rs3).map(RegOperand::store_data),
            mask_source(&f, vmem::VM),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn dest_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        Vec::new()
    }
}

/// `vtype` fields shared by `vsetvli` and `vsetivli`.
fn vtype_field(zimm: u64, field: SpecialField) -> Option<u64> {
    match field {
        SpecialField::Lmul => Some(zimm & 0b111),
        SpecialField::Sew => Some(8 << ((zimm >> 3) & 0b111)),
        SpecialField::Ta => Some((zimm >> 6) & 1),
        SpecialField::Ma => Some((zimm >> 7) & 1),
        _ => None,
    }
}

/// `vsetvli rd, rs1, vtypei`.
#[derive(Clone, Copy, Debug)]
pub struct VsetvliType {
    fixed: FixedFields,
}

impl VsetvliType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for VsetvliType {
    base_identity!("VSETVLI", forms::VSETVLI);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        FieldReader::of(self, opcode)
            .reg(vsetvli::RS1, Role::Rs1)
            .into_iter()
            .collect()
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        FieldReader::of(self, opcode)
            .reg(vsetvli::RD, Role::Rd)
            .into_iter()
            .collect()
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::VSETVLI.extract(vsetvli::ZIMM11, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[
            SpecialField::Sew,
            SpecialField::Lmul,
            SpecialField::Ta,
            SpecialField::Ma,
        ]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        vtype_field(self.immediate(opcode), field).ok_or(DecodeError::InvalidSpecialField {
            field,
            extractor: self.tag(),
        })
    }
}

/// `vsetivli rd, uimm, vtypei`.
#[derive(Clone, Copy, Debug)]
pub struct VsetivliType {
    fixed: FixedFields,
}

impl VsetivliType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for VsetivliType {
    base_identity!("VSETIVLI", forms::VSETIVLI);

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        FieldReader::of(self, opcode)
            .reg(vsetivli::RD, Role::Rd)
            .into_iter()
            .collect()
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::VSETIVLI.extract(vsetivli::ZIMM10, opcode)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[
            SpecialField::Avl,
            SpecialField::Sew,
            SpecialField::Lmul,
            SpecialField::Ta,
            SpecialField::Ma,
        ]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        if field == SpecialField::Avl {
            return FieldReader::of(self, opcode).special(
                self.tag(),
                &[(SpecialField::Avl, vsetivli::UIMM)],
                field,
            );
        }
        vtype_field(self.immediate(opcode), field).ok_or(DecodeError::InvalidSpecialField {
            field,
            extractor: self.tag(),
        })
    }
}
