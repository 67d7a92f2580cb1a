//! Compressed extractors (C, Zcb and Zclsd).
//!
//! Base variants read the 16-bit forms of [`crate::isa::form::compressed`].
//! Derived variants add the implicit stack pointer (`c.*sp`), the implicit
//! link register (`c.jal`, `c.jalr`), per-instruction hint and reserved
//! predicates, and the scrambled immediates of the stack-relative and
//! doubleword encodings.

use super::derived::pair_companion;
use super::{
    DasmStyle, Extractor, FieldReader, base_identity, derived_identity, operands, stack_mask,
};
use crate::common::constants::{REG_RA, REG_SP};
use crate::common::{Opcode, RegisterMask, RegisterMaskExt};
use crate::isa::field::sign_extend;
use crate::isa::form::FixedFields;
use crate::isa::form::compressed::{
    self as forms, ca, cb, cbi, ci, ciw, cl, clb, clh, cr, css, cu,
};
use crate::isa::operand::{ImmediateType, OperandFieldId as Role, RegOperand, operand_mask};
use crate::isa::swizzle::{BitRange, Swizzler};

const CI_IMM: &[BitRange] = &[BitRange::span(2, 6), BitRange::bit(12)];
const ADDI16SP_IMM: &[BitRange] = &[
    BitRange::bit(6),
    BitRange::bit(2),
    BitRange::bit(5),
    BitRange::span(3, 4),
    BitRange::bit(12),
];
const LWSP_IMM: &[BitRange] = &[BitRange::span(4, 6), BitRange::bit(12), BitRange::span(2, 3)];
const LDSP_IMM: &[BitRange] = &[BitRange::span(5, 6), BitRange::bit(12), BitRange::span(2, 4)];
const SWSP_IMM: &[BitRange] = &[BitRange::span(9, 12), BitRange::span(7, 8)];
const SDSP_IMM: &[BitRange] = &[BitRange::span(10, 12), BitRange::span(7, 9)];
const ADDI4SPN_IMM: &[BitRange] = &[
    BitRange::bit(6),
    BitRange::bit(5),
    BitRange::span(11, 12),
    BitRange::span(7, 10),
];
const LW_IMM: &[BitRange] = &[BitRange::bit(6), BitRange::span(10, 12), BitRange::bit(5)];
const LD_IMM: &[BitRange] = &[BitRange::span(10, 12), BitRange::span(5, 6)];
const CB_IMM: &[BitRange] = &[
    BitRange::span(3, 4),
    BitRange::span(10, 11),
    BitRange::bit(2),
    BitRange::span(5, 6),
    BitRange::bit(12),
];
const CJ_IMM: &[BitRange] = &[
    BitRange::span(3, 5),
    BitRange::bit(11),
    BitRange::bit(2),
    BitRange::bit(7),
    BitRange::bit(6),
    BitRange::span(9, 10),
    BitRange::bit(8),
    BitRange::bit(12),
];
const LBU_IMM: &[BitRange] = &[BitRange::bit(6), BitRange::bit(5)];

/// Implied stack pointer source.
const fn sp(role: Role) -> RegOperand {
    RegOperand::implied(role, REG_SP)
}

/// `CR`: `rd_rs1 <- rd_rs1 op rs2`.
#[derive(Clone, Copy, Debug)]
pub struct CrType {
    fixed: FixedFields,
}

impl CrType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CrType {
    base_identity!("CR", forms::CR);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([f.reg(cr::RD_RS1, Role::Rs1), f.reg(cr::RS2, Role::Rs2)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(cr::RD_RS1, Role::Rd)])
    }
}

/// `c.add`. Writing `x0` is a hint.
#[derive(Clone, Copy, Debug)]
pub struct CrAdd {
    parent: CrType,
}

impl CrAdd {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CrType::new(fixed),
        }
    }
}

impl Extractor for CrAdd {
    derived_identity!("CR_add");

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::CR.extract(cr::RD_RS1, opcode) == 0
    }
}

/// `c.mv rd, rs2`. Writing `x0` is a hint.
#[derive(Clone, Copy, Debug)]
pub struct CrMv {
    parent: CrType,
}

impl CrMv {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CrType::new(fixed),
        }
    }
}

impl Extractor for CrMv {
    derived_identity!("CR_mv");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(cr::RS2, Role::Rs2)])
    }

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::CR.extract(cr::RD_RS1, opcode) == 0
    }
}

/// `c.jr rs1`. `rs1 == x0` is reserved.
#[derive(Clone, Copy, Debug)]
pub struct CrJr {
    parent: CrType,
}

impl CrJr {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CrType::new(fixed),
        }
    }
}

impl Extractor for CrJr {
    derived_identity!("CR_jr");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(cr::RD_RS1, Role::Rs1)])
    }

    fn dest_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        Vec::new()
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        forms::CR.extract(cr::RD_RS1, opcode) == 0
    }
}

/// `c.jalr rs1`: links into the implied `ra`.
#[derive(Clone, Copy, Debug)]
pub struct CrJalr {
    parent: CrJr,
}

impl CrJalr {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CrJr::new(fixed),
        }
    }
}

impl Extractor for CrJalr {
    derived_identity!("CR_jalr");

    fn dest_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![RegOperand::implied(Role::Rd, REG_RA)]
    }

    fn is_illop(&self, _opcode: Opcode) -> bool {
        false
    }
}

/// `CI`: `rd_rs1 <- rd_rs1 op imm6`.
#[derive(Clone, Copy, Debug)]
pub struct CiType {
    fixed: FixedFields,
}

impl CiType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CiType {
    base_identity!("CI", forms::CI);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(ci::RD_RS1, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).reg(ci::RD_RS1, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, CI_IMM)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 6)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }
}

/// `c.addi`. A zero immediate with a non-zero destination is a hint.
#[derive(Clone, Copy, Debug)]
pub struct CiAddi {
    parent: CiType,
}

impl CiAddi {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiType::new(fixed),
        }
    }
}

impl Extractor for CiAddi {
    derived_identity!("CI_addi");

    fn is_hint(&self, opcode: Opcode) -> bool {
        let f = FieldReader::of(self, opcode);
        f.value(ci::RD_RS1) != 0 && f.value(ci::IMM1) == 0 && f.value(ci::IMM5) == 0
    }
}

/// `c.nop`. A non-zero immediate is a hint.
#[derive(Clone, Copy, Debug)]
pub struct CiNop {
    parent: CiType,
}

impl CiNop {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiType::new(fixed),
        }
    }
}

impl Extractor for CiNop {
    derived_identity!("CI_nop");

    fn is_hint(&self, opcode: Opcode) -> bool {
        self.immediate(opcode) != 0
    }
}

/// `c.li rd, imm`. Writing `x0` is a hint.
#[derive(Clone, Copy, Debug)]
pub struct CiLi {
    parent: CiType,
}

impl CiLi {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiType::new(fixed),
        }
    }
}

impl Extractor for CiLi {
    derived_identity!("CI_li");

    fn source_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        Vec::new()
    }

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::CI.extract(ci::RD_RS1, opcode) == 0
    }
}

/// `c.lui rd, nzimm`. A zero immediate is reserved; writing `x0` is a hint.
#[derive(Clone, Copy, Debug)]
pub struct CiLui {
    parent: CiType,
}

impl CiLui {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiType::new(fixed),
        }
    }
}

impl Extractor for CiLui {
    derived_identity!("CI_lui");

    fn source_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        Vec::new()
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.parent.signed_offset(opcode) << 12
    }

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::CI.extract(ci::RD_RS1, opcode) == 0
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        self.immediate(opcode) == 0
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Upper
    }
}

/// `c.addi16sp nzimm`: adjusts the implied `sp` by a multiple of 16.
#[derive(Clone, Copy, Debug)]
pub struct CiAddi16sp {
    parent: CiType,
}

impl CiAddi16sp {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiType::new(fixed),
        }
    }
}

impl Extractor for CiAddi16sp {
    derived_identity!("CI_addi16sp");

    fn source_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![sp(Role::Rs1)]
    }

    fn dest_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![sp(Role::Rd)]
    }

    fn source_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.source_operands(opcode)))
    }

    fn dest_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.dest_operands(opcode)))
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, ADDI16SP_IMM) << 4
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 10)
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        self.immediate(opcode) == 0
    }
}

/// `c.slli rd, shamt`. Writing `x0` or a zero shift is a hint.
#[derive(Clone, Copy, Debug)]
pub struct CiSlli {
    parent: CiType,
}

impl CiSlli {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiType::new(fixed),
        }
    }
}

impl Extractor for CiSlli {
    derived_identity!("CI_slli");

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn is_hint(&self, opcode: Opcode) -> bool {
        forms::CI.extract(ci::RD_RS1, opcode) == 0 || self.immediate(opcode) == 0
    }
}

/// `c.addiw`. Writing `x0` is reserved.
#[derive(Clone, Copy, Debug)]
pub struct CiAddiw {
    parent: CiType,
}

impl CiAddiw {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiType::new(fixed),
        }
    }
}

impl Extractor for CiAddiw {
    derived_identity!("CI_addiw");

    fn is_illop(&self, opcode: Opcode) -> bool {
        forms::CI.extract(ci::RD_RS1, opcode) == 0
    }
}

/// `c.lwsp rd, uimm(sp)`. Loading into `x0` is reserved.
#[derive(Clone, Copy, Debug)]
pub struct CiLwsp {
    parent: CiType,
}

impl CiLwsp {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiType::new(fixed),
        }
    }
}

impl Extractor for CiLwsp {
    derived_identity!("CI_lwsp");

    fn source_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![sp(Role::Rs1)]
    }

    fn source_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.source_operands(opcode)))
    }

    fn source_address_regs(&self, _opcode: Opcode) -> RegisterMask {
        RegisterMask::of(REG_SP)
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, LWSP_IMM) << 2
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        forms::CI.extract(ci::RD_RS1, opcode) == 0
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Load
    }
}

/// `c.ldsp rd, uimm(sp)`.
#[derive(Clone, Copy, Debug)]
pub struct CiLdsp {
    parent: CiLwsp,
}

impl CiLdsp {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiLwsp::new(fixed),
        }
    }
}

impl Extractor for CiLdsp {
    derived_identity!("CI_ldsp");

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, LDSP_IMM) << 3
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }
}

/// `c.flwsp`: any float destination is legal.
#[derive(Clone, Copy, Debug)]
pub struct CiFlwsp {
    parent: CiLwsp,
}

impl CiFlwsp {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiLwsp::new(fixed),
        }
    }
}

impl Extractor for CiFlwsp {
    derived_identity!("CI_flwsp");

    fn is_illop(&self, _opcode: Opcode) -> bool {
        false
    }
}

/// `c.fldsp`: any float destination is legal.
#[derive(Clone, Copy, Debug)]
pub struct CiFldsp {
    parent: CiLdsp,
}

impl CiFldsp {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiLdsp::new(fixed),
        }
    }
}

impl Extractor for CiFldsp {
    derived_identity!("CI_fldsp");

    fn is_illop(&self, _opcode: Opcode) -> bool {
        false
    }
}

/// Zclsd `c.ldsp` on RV32: loads `rd` and `rd + 1`.
#[derive(Clone, Copy, Debug)]
pub struct CiLdspPair {
    parent: CiLdsp,
}

impl CiLdspPair {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiLdsp::new(fixed),
        }
    }
}

impl Extractor for CiLdspPair {
    derived_identity!("CI_ldsp_pair");

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.dest_operands(opcode);
        let rd = FieldReader::of(self, opcode).reg(ci::RD_RS1, Role::Rd);
        ops.extend(pair_companion(rd, Role::Rd2));
        ops
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        self.parent.is_illop(opcode) || FieldReader::of(self, opcode).odd(ci::RD_RS1)
    }
}

/// `CSS`: stack-relative store of `rs2`.
#[derive(Clone, Copy, Debug)]
pub struct CssType {
    fixed: FixedFields,
}

impl CssType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CssType {
    base_identity!("CSS", forms::CSS);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([f.reg(css::RS2, Role::Rs2).map(RegOperand::store_data)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, SWSP_IMM) << 2
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Store
    }
}

/// `c.swsp rs2, uimm(sp)`.
#[derive(Clone, Copy, Debug)]
pub struct CssSwsp {
    parent: CssType,
}

impl CssSwsp {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CssType::new(fixed),
        }
    }
}

impl Extractor for CssSwsp {
    derived_identity!("CSS_swsp");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.source_operands(opcode);
        ops.push(sp(Role::Rs1));
        ops
    }

    fn source_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.source_operands(opcode)))
    }

    fn source_address_regs(&self, _opcode: Opcode) -> RegisterMask {
        RegisterMask::of(REG_SP)
    }
}

/// `c.sdsp rs2, uimm(sp)`.
#[derive(Clone, Copy, Debug)]
pub struct CssSdsp {
    parent: CssSwsp,
}

impl CssSdsp {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CssSwsp::new(fixed),
        }
    }
}

impl Extractor for CssSdsp {
    derived_identity!("CSS_sdsp");

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, SDSP_IMM) << 3
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }
}

/// Zclsd `c.sdsp` on RV32: stores `rs2` and `rs2 + 1`.
#[derive(Clone, Copy, Debug)]
pub struct CssSdspPair {
    parent: CssSdsp,
}

impl CssSdspPair {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CssSdsp::new(fixed),
        }
    }
}

impl Extractor for CssSdspPair {
    derived_identity!("CSS_sdsp_pair");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.source_operands(opcode);
        let rs2 = FieldReader::of(self, opcode)
            .reg(css::RS2, Role::Rs2)
            .map(RegOperand::store_data);
        ops.extend(pair_companion(rs2, Role::Rs2Pair));
        ops
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        FieldReader::of(self, opcode).odd(css::RS2)
    }
}

/// `CIW`: wide unsigned immediate into `rd'`.
#[derive(Clone, Copy, Debug)]
pub struct CiwType {
    fixed: FixedFields,
}

impl CiwType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CiwType {
    base_identity!("CIW", forms::CIW);

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(ciw::RD_P, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, ADDI4SPN_IMM) << 2
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }
}

/// `c.addi4spn rd', nzuimm`: `rd' <- sp + nzuimm`. A zero immediate is reserved.
#[derive(Clone, Copy, Debug)]
pub struct CiwAddi4spn {
    parent: CiwType,
}

impl CiwAddi4spn {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CiwType::new(fixed),
        }
    }
}

impl Extractor for CiwAddi4spn {
    derived_identity!("CIW_addi4spn");

    fn source_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![sp(Role::Rs1)]
    }

    fn source_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.source_operands(opcode)))
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        self.immediate(opcode) == 0
    }
}

/// `CL`: `rd' <- mem[rs1' + uimm]` (word offsets).
#[derive(Clone, Copy, Debug)]
pub struct ClType {
    fixed: FixedFields,
}

impl ClType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for ClType {
    base_identity!("CL", forms::CL);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(cl::RS1_P, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(cl::RD_P, Role::Rd)])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        self.source_regs(opcode)
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, LW_IMM) << 2
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Load
    }
}

/// `c.ld` / `c.fld`: doubleword offsets.
#[derive(Clone, Copy, Debug)]
pub struct ClLd {
    parent: ClType,
}

impl ClLd {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: ClType::new(fixed),
        }
    }
}

impl Extractor for ClLd {
    derived_identity!("CL_ld");

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, LD_IMM) << 3
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }
}

/// Zclsd `c.ld` on RV32: loads `rd'` and `rd' + 1`.
#[derive(Clone, Copy, Debug)]
pub struct ClLdPair {
    parent: ClLd,
}

impl ClLdPair {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: ClLd::new(fixed),
        }
    }
}

impl Extractor for ClLdPair {
    derived_identity!("CL_ld_pair");

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.dest_operands(opcode);
        let rd = FieldReader::of(self, opcode).creg(cl::RD_P, Role::Rd);
        ops.extend(pair_companion(rd, Role::Rd2));
        ops
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        FieldReader::of(self, opcode).odd(cl::RD_P)
    }
}

/// `CS`: `mem[rs1' + uimm] <- rs2'` (word offsets).
#[derive(Clone, Copy, Debug)]
pub struct CsType {
    fixed: FixedFields,
}

impl CsType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CsType {
    base_identity!("CS", forms::CS);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([
            f.creg(cl::RS1_P, Role::Rs1),
            f.creg(cl::RD_P, Role::Rs2).map(RegOperand::store_data),
        ])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        FieldReader::of(self, opcode)
            .creg(cl::RS1_P, Role::Rs1)
            .map_or(0, |op| RegisterMask::of(op.reg))
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, LW_IMM) << 2
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Store
    }
}

/// `c.sd` / `c.fsd`: doubleword offsets.
#[derive(Clone, Copy, Debug)]
pub struct CsSd {
    parent: CsType,
}

impl CsSd {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CsType::new(fixed),
        }
    }
}

impl Extractor for CsSd {
    derived_identity!("CS_sd");

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, LD_IMM) << 3
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }
}

/// Zclsd `c.sd` on RV32: stores `rs2'` and `rs2' + 1`.
#[derive(Clone, Copy, Debug)]
pub struct CsSdPair {
    parent: CsSd,
}

impl CsSdPair {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CsSd::new(fixed),
        }
    }
}

impl Extractor for CsSdPair {
    derived_identity!("CS_sd_pair");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.source_operands(opcode);
        let rs2 = FieldReader::of(self, opcode)
            .creg(cl::RD_P, Role::Rs2)
            .map(RegOperand::store_data);
        ops.extend(pair_companion(rs2, Role::Rs2Pair));
        ops
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        FieldReader::of(self, opcode).odd(cl::RD_P)
    }
}

/// `CA`: `rd_rs1' <- rd_rs1' op rs2'`.
#[derive(Clone, Copy, Debug)]
pub struct CaType {
    fixed: FixedFields,
}

impl CaType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CaType {
    base_identity!("CA", forms::CA);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([f.creg(ca::RD_RS1_P, Role::Rs1), f.creg(ca::RS2_P, Role::Rs2)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(ca::RD_RS1_P, Role::Rd)])
    }
}

/// `CB`: branch on `rs1'` against zero.
#[derive(Clone, Copy, Debug)]
pub struct CbType {
    fixed: FixedFields,
}

impl CbType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CbType {
    base_identity!("CB", forms::CB);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(cb::RS1_P, Role::Rs1)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, CB_IMM) << 1
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 9)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }
}

/// `CBI`: shift of `rd_rs1'` by an unsigned amount. A zero shift is a hint.
#[derive(Clone, Copy, Debug)]
pub struct CbiType {
    fixed: FixedFields,
}

impl CbiType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CbiType {
    base_identity!("CBI", forms::CBI);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(cbi::RD_RS1_P, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(cbi::RD_RS1_P, Role::Rd)])
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, CI_IMM)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn is_hint(&self, opcode: Opcode) -> bool {
        self.immediate(opcode) == 0
    }
}

/// `c.andi rd', imm`: signed immediate, no hint space.
#[derive(Clone, Copy, Debug)]
pub struct CbiAndi {
    parent: CbiType,
}

impl CbiAndi {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CbiType::new(fixed),
        }
    }
}

impl Extractor for CbiAndi {
    derived_identity!("CBI_andi");

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 6)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }

    fn is_hint(&self, _opcode: Opcode) -> bool {
        false
    }
}

/// `CJ`: unconditional jump.
#[derive(Clone, Copy, Debug)]
pub struct CjType {
    fixed: FixedFields,
}

impl CjType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CjType {
    base_identity!("CJ", forms::CJ);

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, CJ_IMM) << 1
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        sign_extend(self.immediate(opcode), 12)
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Signed
    }
}

/// `c.jal` (RV32): links into the implied `ra`.
#[derive(Clone, Copy, Debug)]
pub struct CjJal {
    parent: CjType,
}

impl CjJal {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CjType::new(fixed),
        }
    }
}

impl Extractor for CjJal {
    derived_identity!("CJ_jal");

    fn dest_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![RegOperand::implied(Role::Rd, REG_RA)]
    }
}

/// `CU`: unary operation on `rd_rs1'`.
#[derive(Clone, Copy, Debug)]
pub struct CuType {
    fixed: FixedFields,
}

impl CuType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CuType {
    base_identity!("CU", forms::CU);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(cu::RD_RS1_P, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(cu::RD_RS1_P, Role::Rd)])
    }
}

/// `c.lbu rd', uimm(rs1')`.
#[derive(Clone, Copy, Debug)]
pub struct ClbType {
    fixed: FixedFields,
}

impl ClbType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for ClbType {
    base_identity!("CLB", forms::CLB);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(clb::RS1_P, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(clb::RD_P, Role::Rd)])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        self.source_regs(opcode)
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, LBU_IMM)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Load
    }
}

/// `c.lhu` / `c.lh rd', uimm(rs1')`.
#[derive(Clone, Copy, Debug)]
pub struct ClhType {
    fixed: FixedFields,
}

impl ClhType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for ClhType {
    base_identity!("CLH", forms::CLH);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(clh::RS1_P, Role::Rs1)])
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        operands([FieldReader::of(self, opcode).creg(clh::RD_P, Role::Rd)])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        self.source_regs(opcode)
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::CLH.extract(clh::UIMM1, opcode) << 1
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Load
    }
}

/// `c.sb rs2', uimm(rs1')`.
#[derive(Clone, Copy, Debug)]
pub struct CsbType {
    fixed: FixedFields,
}

impl CsbType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CsbType {
    base_identity!("CSB", forms::CSB);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([
            f.creg(clb::RS1_P, Role::Rs1),
            f.creg(clb::RD_P, Role::Rs2).map(RegOperand::store_data),
        ])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        FieldReader::of(self, opcode)
            .creg(clb::RS1_P, Role::Rs1)
            .map_or(0, |op| RegisterMask::of(op.reg))
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        Swizzler::extract(opcode, LBU_IMM)
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Store
    }
}

/// `c.sh rs2', uimm(rs1')`.
#[derive(Clone, Copy, Debug)]
pub struct CshType {
    fixed: FixedFields,
}

impl CshType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CshType {
    base_identity!("CSH", forms::CSH);

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        operands([
            f.creg(clh::RS1_P, Role::Rs1),
            f.creg(clh::RD_P, Role::Rs2).map(RegOperand::store_data),
        ])
    }

    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        FieldReader::of(self, opcode)
            .creg(clh::RS1_P, Role::Rs1)
            .map_or(0, |op| RegisterMask::of(op.reg))
    }

    fn immediate(&self, opcode: Opcode) -> u64 {
        forms::CSH.extract(clh::UIMM1, opcode) << 1
    }

    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.immediate(opcode) as i64
    }

    fn immediate_type(&self) -> ImmediateType {
        ImmediateType::Unsigned
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::Store
    }
}
