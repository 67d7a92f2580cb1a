//! Zcmp push/pop and paired-move extractors.
//!
//! Push/pop variants decode the 4-bit register list (`{ra}`, `{ra, s0}`,
//! `{ra, s0-s1}` ... `{ra, s0-s11}`) and the stack adjustment. The adjustment
//! depends on the register width, so the RV32 specializations are registered
//! under separate `.rv32` tags.
//!
//! `cm.push` reuses `cm.pop`'s operand computation with the roles swapped and
//! negates the adjustment.

use std::sync::Arc;

use super::{
    DasmStyle, Extractor, ExtractorRef, FieldReader, base_identity, derived_identity, stack_mask,
};
use crate::common::constants::{REG_A0, REG_A1, REG_RA, REG_S0, REG_S2, REG_SP};
use crate::common::error::DecodeError;
use crate::common::{Opcode, RegisterMask, RegisterMaskExt};
use crate::isa::form::compressed::{self as forms, cmmv, cmpp};
use crate::isa::form::{FixedFields, Form};
use crate::isa::metadata::InstMetadata;
use crate::isa::operand::{OperandFieldId as Role, RegOperand, operand_mask};
use crate::isa::special::SpecialField;

const CMPP_SPECIAL: &[(SpecialField, usize)] = &[
    (SpecialField::Rlist, cmpp::RLIST),
    (SpecialField::Spimm, cmpp::SPIMM),
];

/// Smallest legal register-list encoding (`{ra}`).
const RLIST_MIN: u64 = 4;

/// Number of registers named by a register-list encoding.
pub const fn rlist_count(rlist: u64) -> u64 {
    match rlist {
        4..=14 => rlist - 3,
        15 => 13,
        _ => 0,
    }
}

/// Registers named by a register-list encoding, `ra` first.
pub fn rlist_registers(rlist: u64) -> Vec<u32> {
    let count = rlist_count(rlist) as u32;
    (0..count)
        .map(|i| match i {
            0 => REG_RA,
            1 | 2 => REG_S0 + (i - 1),
            _ => REG_S2 + (i - 3),
        })
        .collect()
}

/// Base stack adjustment: the saved registers rounded up to 16 bytes.
pub const fn stack_adj_base(rlist: u64, xlen: u32) -> u64 {
    (rlist_count(rlist) * (xlen as u64 / 8)).next_multiple_of(16)
}

/// `CMPP`: register list and stack immediate, no operands.
#[derive(Clone, Copy, Debug)]
pub struct CmppType {
    fixed: FixedFields,
}

impl CmppType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CmppType {
    base_identity!("CMPP", forms::CMPP);

    fn is_illop(&self, opcode: Opcode) -> bool {
        forms::CMPP.extract(cmpp::RLIST, opcode) < RLIST_MIN
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Rlist, SpecialField::Spimm]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        _meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        FieldReader::of(self, opcode).special(self.tag(), CMPP_SPECIAL, field)
    }

    fn dasm_style(&self) -> DasmStyle {
        DasmStyle::StackList
    }
}

/// `cm.pop`: reloads the listed registers and releases the frame.
#[derive(Clone, Copy, Debug)]
pub struct CmPop {
    parent: CmppType,
    xlen: u32,
}

impl CmPop {
    /// Creates the variant for registers of `xlen` bits.
    pub const fn new(fixed: FixedFields, xlen: u32) -> Self {
        Self {
            parent: CmppType::new(fixed),
            xlen,
        }
    }

    /// Register width in bits.
    pub const fn xlen(&self) -> u32 {
        self.xlen
    }

    fn list(&self, opcode: Opcode) -> Vec<RegOperand> {
        rlist_registers(forms::CMPP.extract(cmpp::RLIST, opcode))
            .into_iter()
            .map(|reg| RegOperand::explicit(Role::Rlist, reg))
            .collect()
    }

    /// Unsigned frame size released by the pop.
    fn stack_adj(&self, opcode: Opcode) -> u64 {
        let rlist = forms::CMPP.extract(cmpp::RLIST, opcode);
        let spimm = forms::CMPP.extract(cmpp::SPIMM, opcode);
        stack_adj_base(rlist, self.xlen) + spimm * 16
    }
}

impl Extractor for CmPop {
    fn tag(&self) -> &'static str {
        if self.xlen == 32 { "CM_pop.rv32" } else { "CM_pop" }
    }

    fn form(&self) -> &'static Form {
        &forms::CMPP
    }

    fn fixed(&self) -> FixedFields {
        self.parent.fixed()
    }

    fn parent(&self) -> Option<&dyn Extractor> {
        Some(&self.parent)
    }

    fn special_case_clone(&self, fixed: FixedFields) -> ExtractorRef {
        Arc::new(Self::new(fixed, self.xlen))
    }

    fn source_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![RegOperand::implied(Role::Rs1, REG_SP)]
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.list(opcode);
        ops.push(RegOperand::implied(Role::Rd, REG_SP));
        ops
    }

    fn source_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.source_operands(opcode)))
    }

    fn dest_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.dest_operands(opcode)))
    }

    fn source_address_regs(&self, _opcode: Opcode) -> RegisterMask {
        RegisterMask::of(REG_SP)
    }

    fn special_fields(&self) -> &'static [SpecialField] {
        &[SpecialField::Rlist, SpecialField::Spimm, SpecialField::StackAdj]
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        match field {
            SpecialField::StackAdj => Ok(self.stack_adj(opcode)),
            _ => self
                .parent
                .special_field(field, opcode, meta)
                .map_err(|e| e.reported_by(self.tag())),
        }
    }
}

/// `cm.push`: stores the listed registers and allocates the frame.
#[derive(Clone, Copy, Debug)]
pub struct CmPush {
    parent: CmPop,
}

impl CmPush {
    /// Creates the variant for registers of `xlen` bits.
    pub const fn new(fixed: FixedFields, xlen: u32) -> Self {
        Self {
            parent: CmPop::new(fixed, xlen),
        }
    }
}

/// Turns a pop destination into a push source and vice versa.
const fn swap_role(op: RegOperand) -> RegOperand {
    match op.field {
        Role::Rd => RegOperand { field: Role::Rs1, ..op },
        Role::Rs1 => RegOperand { field: Role::Rd, ..op },
        _ => op.store_data(),
    }
}

impl Extractor for CmPush {
    fn tag(&self) -> &'static str {
        if self.parent.xlen() == 32 { "CM_push.rv32" } else { "CM_push" }
    }

    fn form(&self) -> &'static Form {
        &forms::CMPP
    }

    fn fixed(&self) -> FixedFields {
        self.parent.fixed()
    }

    fn parent(&self) -> Option<&dyn Extractor> {
        Some(&self.parent)
    }

    fn special_case_clone(&self, fixed: FixedFields) -> ExtractorRef {
        Arc::new(Self::new(fixed, self.parent.xlen()))
    }

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        // Stored registers first, then the implied sp.
        let mut ops: Vec<RegOperand> = self
            .parent
            .dest_operands(opcode)
            .into_iter()
            .map(swap_role)
            .collect();
        ops.sort_by_key(|op| op.is_implied);
        ops
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        self.parent
            .source_operands(opcode)
            .into_iter()
            .map(swap_role)
            .collect()
    }

    fn source_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.source_operands(opcode)))
    }

    fn dest_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.dest_operands(opcode)))
    }

    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        let value = self
            .parent
            .special_field(field, opcode, meta)
            .map_err(|e| e.reported_by(self.tag()))?;
        Ok(if field == SpecialField::StackAdj {
            value.wrapping_neg()
        } else {
            value
        })
    }
}

/// `cm.popret`: pop, then return through `ra`.
#[derive(Clone, Copy, Debug)]
pub struct CmPopret {
    parent: CmPop,
}

impl CmPopret {
    /// Creates the variant for registers of `xlen` bits.
    pub const fn new(fixed: FixedFields, xlen: u32) -> Self {
        Self {
            parent: CmPop::new(fixed, xlen),
        }
    }
}

impl Extractor for CmPopret {
    fn tag(&self) -> &'static str {
        if self.parent.xlen() == 32 { "CM_popret.rv32" } else { "CM_popret" }
    }

    fn form(&self) -> &'static Form {
        &forms::CMPP
    }

    fn fixed(&self) -> FixedFields {
        self.parent.fixed()
    }

    fn parent(&self) -> Option<&dyn Extractor> {
        Some(&self.parent)
    }

    fn special_case_clone(&self, fixed: FixedFields) -> ExtractorRef {
        Arc::new(Self::new(fixed, self.parent.xlen()))
    }

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.source_operands(opcode);
        let rlist = forms::CMPP.extract(cmpp::RLIST, opcode);
        if rlist_registers(rlist).contains(&REG_RA) {
            ops.push(RegOperand::implied(Role::Rs2, REG_RA));
        }
        ops
    }

    fn source_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.source_operands(opcode)))
    }
}

/// `cm.popretz`: pop, zero `a0`, then return.
#[derive(Clone, Copy, Debug)]
pub struct CmPopretz {
    parent: CmPopret,
}

impl CmPopretz {
    /// Creates the variant for registers of `xlen` bits.
    pub const fn new(fixed: FixedFields, xlen: u32) -> Self {
        Self {
            parent: CmPopret::new(fixed, xlen),
        }
    }
}

impl Extractor for CmPopretz {
    fn tag(&self) -> &'static str {
        if self.parent.parent.xlen() == 32 {
            "CM_popretz.rv32"
        } else {
            "CM_popretz"
        }
    }

    fn form(&self) -> &'static Form {
        &forms::CMPP
    }

    fn fixed(&self) -> FixedFields {
        self.parent.fixed()
    }

    fn parent(&self) -> Option<&dyn Extractor> {
        Some(&self.parent)
    }

    fn special_case_clone(&self, fixed: FixedFields) -> ExtractorRef {
        Arc::new(Self::new(fixed, self.parent.parent.xlen()))
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let mut ops = self.parent.dest_operands(opcode);
        ops.push(RegOperand::implied(Role::Rd2, REG_A0));
        ops
    }

    fn dest_regs(&self, opcode: Opcode) -> RegisterMask {
        stack_mask(operand_mask(&self.dest_operands(opcode)))
    }
}

/// Maps a 3-bit `sreg` field onto `s0`, `s1`, `s2`..`s7`.
pub const fn sreg(code: u64) -> u32 {
    let code = code as u32;
    if code < 2 { REG_S0 + code } else { REG_S2 + code - 2 }
}

fn render_pair(mnemonic: &str, opcode: Opcode) -> String {
    let r1 = sreg(forms::CMMV.extract(cmmv::R1S, opcode));
    let r2 = sreg(forms::CMMV.extract(cmmv::R2S, opcode));
    format!("{mnemonic} x{r1}, x{r2}")
}

/// `cm.mvsa01 r1s, r2s`: moves `a0`/`a1` into two saved registers.
/// Naming the same register twice is reserved.
#[derive(Clone, Copy, Debug)]
pub struct CmmvType {
    fixed: FixedFields,
}

impl CmmvType {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self { fixed }
    }
}

impl Extractor for CmmvType {
    base_identity!("CMMV", forms::CMMV);

    fn source_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![
            RegOperand::implied(Role::Rs1, REG_A0),
            RegOperand::implied(Role::Rs2, REG_A1),
        ]
    }

    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        vec![
            RegOperand::explicit(Role::Rd, sreg(f.value(cmmv::R1S))),
            RegOperand::explicit(Role::Rd2, sreg(f.value(cmmv::R2S))),
        ]
    }

    fn is_illop(&self, opcode: Opcode) -> bool {
        forms::CMMV.extract(cmmv::R1S, opcode) == forms::CMMV.extract(cmmv::R2S, opcode)
    }

    fn dasm_with_meta(&self, mnemonic: &str, opcode: Opcode, _meta: &dyn InstMetadata) -> String {
        render_pair(mnemonic, opcode)
    }
}

/// `cm.mva01s r1s, r2s`: moves two saved registers into `a0`/`a1`.
#[derive(Clone, Copy, Debug)]
pub struct CmMva01s {
    parent: CmmvType,
}

impl CmMva01s {
    /// Creates the variant.
    pub const fn new(fixed: FixedFields) -> Self {
        Self {
            parent: CmmvType::new(fixed),
        }
    }
}

impl Extractor for CmMva01s {
    derived_identity!("CM_mva01s");

    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        let f = FieldReader::of(self, opcode);
        vec![
            RegOperand::explicit(Role::Rs1, sreg(f.value(cmmv::R1S))),
            RegOperand::explicit(Role::Rs2, sreg(f.value(cmmv::R2S))),
        ]
    }

    fn dest_operands(&self, _opcode: Opcode) -> Vec<RegOperand> {
        vec![
            RegOperand::implied(Role::Rd, REG_A0),
            RegOperand::implied(Role::Rd2, REG_A1),
        ]
    }

    fn is_illop(&self, _opcode: Opcode) -> bool {
        false
    }

    fn dasm_with_meta(&self, mnemonic: &str, opcode: Opcode, _meta: &dyn InstMetadata) -> String {
        render_pair(mnemonic, opcode)
    }
}
