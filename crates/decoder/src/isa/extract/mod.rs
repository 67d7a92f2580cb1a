//! Extractor framework.
//!
//! An extractor turns the raw bits of one encoding shape into registers,
//! immediates, special fields and disassembly text. This module provides:
//! 1. **`Extractor`:** The capability trait. Every operation has a safe default
//!    that delegates to [`Extractor::parent`] when the variant declares one.
//! 2. **Base variants:** One per [`Form`], in `base`, `compressed`, `zcmp`
//!    and `vector`.
//! 3. **Derived variants:** Hold a named parent by value and override only what
//!    differs (register pairs, implied stack pointer or link register, hint and
//!    illegal predicates, scrambled immediates).
//! 4. **Registry:** Tag to factory mapping used to specialize an extractor per
//!    decode-trie leaf (see [`registry`]).
//!
//! Extractors are immutable after construction and shared through
//! [`ExtractorRef`].

/// 32-bit base-form extractors.
pub mod base;

/// Compressed-form extractors (C and Zcb).
pub mod compressed;

/// Disassembly rendering shared by all extractors.
pub mod dasm;

/// Derived 32-bit extractors (loads, pairs, hints, system).
pub mod derived;

/// Tag to factory registry.
pub mod registry;

/// Vector extractors.
pub mod vector;

/// Zcmp push/pop and paired-move extractors.
pub mod zcmp;

use std::fmt;
use std::sync::Arc;

use crate::common::constants::{COMPRESSED_REG_BASE, REG_SP};
use crate::common::error::DecodeError;
use crate::common::{Opcode, RegisterMask, RegisterMaskExt};
use crate::isa::form::{FixedFields, Form};
use crate::isa::metadata::{InstMetadata, UntypedMetadata};
use crate::isa::operand::{
    ImmediateType, OperandFieldId, OperandInfo, OperandElement, OperandType, RegOperand,
    operand_mask,
};
use crate::isa::special::SpecialField;

pub use dasm::DasmStyle;

/// Shared extractor handle.
pub type ExtractorRef = Arc<dyn Extractor>;

/// Capability interface of every extractor.
///
/// Only identity and specialization are required; everything else defaults to
/// the parent's behavior, or to zero/empty for a variant without a parent.
pub trait Extractor: fmt::Debug + Send + Sync {
    /// Registry tag of the variant (`"R"`, `"CI_lwsp"`, ...).
    fn tag(&self) -> &'static str;

    /// Encoding form the variant reads.
    fn form(&self) -> &'static Form;

    /// Fixed-field context of this instance.
    fn fixed(&self) -> FixedFields;

    /// Creates an instance of the same variant specialized to `fixed`.
    fn special_case_clone(&self, fixed: FixedFields) -> ExtractorRef;

    /// The variant this one refines, if any.
    fn parent(&self) -> Option<&dyn Extractor> {
        None
    }

    /// Untyped source operands in contract order.
    fn source_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        self.parent().map_or_else(Vec::new, |p| p.source_operands(opcode))
    }

    /// Untyped destination operands in contract order.
    fn dest_operands(&self, opcode: Opcode) -> Vec<RegOperand> {
        self.parent().map_or_else(Vec::new, |p| p.dest_operands(opcode))
    }

    /// Registers read by the instruction.
    fn source_regs(&self, opcode: Opcode) -> RegisterMask {
        operand_mask(&self.source_operands(opcode))
    }

    /// Registers written by the instruction.
    fn dest_regs(&self, opcode: Opcode) -> RegisterMask {
        operand_mask(&self.dest_operands(opcode))
    }

    /// Registers forming a memory address.
    fn source_address_regs(&self, opcode: Opcode) -> RegisterMask {
        self.parent().map_or(0, |p| p.source_address_regs(opcode))
    }

    /// Registers supplying data written to memory.
    fn source_data_regs(&self, opcode: Opcode) -> RegisterMask {
        let data: Vec<RegOperand> = self
            .source_operands(opcode)
            .into_iter()
            .filter(|op| op.is_store_data)
            .collect();
        operand_mask(&data)
    }

    /// Typed source operands. `suppress_x0` drops integer `x0` from the list only.
    fn source_operand_info(
        &self,
        opcode: Opcode,
        meta: &dyn InstMetadata,
        suppress_x0: bool,
    ) -> OperandInfo {
        typed(&self.source_operands(opcode), meta, suppress_x0)
    }

    /// Typed destination operands. `suppress_x0` drops integer `x0` from the list only.
    fn dest_operand_info(
        &self,
        opcode: Opcode,
        meta: &dyn InstMetadata,
        suppress_x0: bool,
    ) -> OperandInfo {
        typed(&self.dest_operands(opcode), meta, suppress_x0)
    }

    /// Source registers whose declared type is `ty`.
    ///
    /// [`OperandType::All`] returns the unfiltered mask; [`OperandType::None`]
    /// returns zero.
    fn source_oper_type_regs(
        &self,
        opcode: Opcode,
        meta: &dyn InstMetadata,
        ty: OperandType,
    ) -> RegisterMask {
        match ty {
            OperandType::All => self.source_regs(opcode),
            OperandType::None => 0,
            _ => mask_of_type(&self.source_operand_info(opcode, meta, false), ty),
        }
    }

    /// Destination registers whose declared type is `ty`.
    ///
    /// [`OperandType::All`] returns the unfiltered mask; [`OperandType::None`]
    /// returns zero.
    fn dest_oper_type_regs(
        &self,
        opcode: Opcode,
        meta: &dyn InstMetadata,
        ty: OperandType,
    ) -> RegisterMask {
        match ty {
            OperandType::All => self.dest_regs(opcode),
            OperandType::None => 0,
            _ => mask_of_type(&self.dest_operand_info(opcode, meta, false), ty),
        }
    }

    /// Post-swizzle raw immediate.
    fn immediate(&self, opcode: Opcode) -> u64 {
        self.parent().map_or(0, |p| p.immediate(opcode))
    }

    /// Immediate sign-extended at the form's width.
    fn signed_offset(&self, opcode: Opcode) -> i64 {
        self.parent().map_or(0, |p| p.signed_offset(opcode))
    }

    /// Sign semantics of the immediate.
    fn immediate_type(&self) -> ImmediateType {
        self.parent().map_or(ImmediateType::None, |p| p.immediate_type())
    }

    /// Returns `true` for reserved encodings. Checked before any other extraction.
    fn is_illop(&self, opcode: Opcode) -> bool {
        self.parent().is_some_and(|p| p.is_illop(opcode))
    }

    /// Returns `true` when the encoding is an architectural hint.
    fn is_hint(&self, opcode: Opcode) -> bool {
        self.parent().is_some_and(|p| p.is_hint(opcode))
    }

    /// Special fields of the instruction family.
    fn special_fields(&self) -> &'static [SpecialField] {
        match self.parent() {
            Some(p) => p.special_fields(),
            None => &[],
        }
    }

    /// Value of special field `field`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidSpecialField`] when the field never applies to the
    /// family, [`DecodeError::UnsupportedSpecialField`] when it is pinned at
    /// this specialization.
    fn special_field(
        &self,
        field: SpecialField,
        opcode: Opcode,
        meta: &dyn InstMetadata,
    ) -> Result<u64, DecodeError> {
        match self.parent() {
            Some(p) => p
                .special_field(field, opcode, meta)
                .map_err(|e| e.reported_by(self.tag())),
            None => Err(DecodeError::InvalidSpecialField {
                field,
                extractor: self.tag(),
            }),
        }
    }

    /// Operand layout used by disassembly.
    fn dasm_style(&self) -> DasmStyle {
        self.parent().map_or(DasmStyle::Generic, |p| p.dasm_style())
    }

    /// Disassembly with every register formatted as an integer register.
    fn dasm(&self, mnemonic: &str, opcode: Opcode) -> String {
        self.dasm_with_meta(mnemonic, opcode, &UntypedMetadata)
    }

    /// Disassembly with register prefixes chosen from declared operand types.
    fn dasm_with_meta(&self, mnemonic: &str, opcode: Opcode, meta: &dyn InstMetadata) -> String {
        dasm::render(self, mnemonic, opcode, meta)
    }
}

/// Attaches declared types to untyped operands.
pub fn typed(operands: &[RegOperand], meta: &dyn InstMetadata, suppress_x0: bool) -> OperandInfo {
    operands
        .iter()
        .map(|op| OperandElement {
            field: op.field,
            operand_type: meta.operand_type(op.field),
            reg: op.reg,
            is_store_data: op.is_store_data,
            is_implied: op.is_implied,
        })
        .filter(|el| !(suppress_x0 && el.is_int_zero()))
        .collect()
}

/// Mask of the operands declared with type `ty`.
fn mask_of_type(info: &[OperandElement], ty: OperandType) -> RegisterMask {
    info.iter()
        .filter(|el| el.operand_type == ty && el.reg < RegisterMask::BITS)
        .fold(0, |mask, el| mask | (1u64 << el.reg))
}

/// Reads fields of one opcode through a form and its fixed-field context.
#[derive(Clone, Copy, Debug)]
pub struct FieldReader {
    form: &'static Form,
    fixed: FixedFields,
    opcode: Opcode,
}

impl FieldReader {
    /// Creates a reader.
    pub const fn new(form: &'static Form, fixed: FixedFields, opcode: Opcode) -> Self {
        Self {
            form,
            fixed,
            opcode,
        }
    }

    /// Reader for `ext` over `opcode`.
    pub fn of<E: Extractor + ?Sized>(ext: &E, opcode: Opcode) -> Self {
        Self::new(ext.form(), ext.fixed(), opcode)
    }

    /// Raw value of field `idx`.
    #[inline]
    pub fn value(&self, idx: usize) -> u64 {
        self.form.extract(idx, self.opcode)
    }

    /// Returns `true` if field `idx` is pinned.
    #[inline]
    pub const fn pinned(&self, idx: usize) -> bool {
        self.fixed.is_pinned(idx)
    }

    /// Register operand held in field `idx`, or `None` when the field is pinned.
    #[inline]
    pub fn reg(&self, idx: usize, role: OperandFieldId) -> Option<RegOperand> {
        if self.pinned(idx) {
            None
        } else {
            Some(RegOperand::explicit(role, self.value(idx) as u32))
        }
    }

    /// Returns `true` when the register field `idx` holds an odd index.
    #[inline]
    pub fn odd(&self, idx: usize) -> bool {
        !self.pinned(idx) && self.value(idx) % 2 != 0
    }

    /// Register operand held in a 3-bit compressed field (`x8`..`x15`).
    #[inline]
    pub fn creg(&self, idx: usize, role: OperandFieldId) -> Option<RegOperand> {
        if self.pinned(idx) {
            None
        } else {
            Some(RegOperand::explicit(
                role,
                COMPRESSED_REG_BASE + self.value(idx) as u32,
            ))
        }
    }

    /// Resolves a special field through a (field, form index) table.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidSpecialField`] if `field` is not in `table`,
    /// [`DecodeError::UnsupportedSpecialField`] if its form field is pinned.
    pub fn special(
        &self,
        tag: &'static str,
        table: &[(SpecialField, usize)],
        field: SpecialField,
    ) -> Result<u64, DecodeError> {
        let (_, idx) = table
            .iter()
            .find(|(f, _)| *f == field)
            .ok_or(DecodeError::InvalidSpecialField {
                field,
                extractor: tag,
            })?;
        if self.pinned(*idx) {
            return Err(DecodeError::UnsupportedSpecialField {
                field,
                extractor: tag,
            });
        }
        Ok(self.value(*idx))
    }
}

/// Collects the present operands in order.
pub(crate) fn operands<const N: usize>(ops: [Option<RegOperand>; N]) -> Vec<RegOperand> {
    ops.into_iter().flatten().collect()
}

/// Stack-relative mask rule: `sp` is always present and `x0` never is.
pub(crate) fn stack_mask(mask: RegisterMask) -> RegisterMask {
    (mask | RegisterMask::of(REG_SP)) & !1
}

/// Identity methods of a base variant holding `fixed: FixedFields`.
macro_rules! base_identity {
    ($tag:expr, $form:expr) => {
        fn tag(&self) -> &'static str {
            $tag
        }

        fn form(&self) -> &'static $crate::isa::form::Form {
            &$form
        }

        fn fixed(&self) -> $crate::isa::form::FixedFields {
            self.fixed
        }

        fn special_case_clone(
            &self,
            fixed: $crate::isa::form::FixedFields,
        ) -> $crate::isa::extract::ExtractorRef {
            std::sync::Arc::new(Self::new(fixed))
        }
    };
}

/// Identity methods of a derived variant holding `parent`.
macro_rules! derived_identity {
    ($tag:expr) => {
        fn tag(&self) -> &'static str {
            $tag
        }

        fn form(&self) -> &'static $crate::isa::form::Form {
            self.parent.form()
        }

        fn fixed(&self) -> $crate::isa::form::FixedFields {
            self.parent.fixed()
        }

        fn parent(&self) -> Option<&dyn $crate::isa::extract::Extractor> {
            Some(&self.parent)
        }

        fn special_case_clone(
            &self,
            fixed: $crate::isa::form::FixedFields,
        ) -> $crate::isa::extract::ExtractorRef {
            std::sync::Arc::new(Self::new(fixed))
        }
    };
}

pub(crate) use base_identity;
pub(crate) use derived_identity;
