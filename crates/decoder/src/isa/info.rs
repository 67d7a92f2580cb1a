//! Immutable decoded-instruction snapshot.
//!
//! A [`DecodedInstructionInfo`] is built once from an [`InstructionBinding`]
//! and an opcode. Every derived value is computed in the constructor:
//! 1. **Operands:** Typed source and destination lists, with and without integer `x0`.
//! 2. **Masks:** Per register class, per declared operand type, plus the
//!    address and store-data subsets.
//! 3. **Immediate:** Raw value, signed offset and sign semantics.
//! 4. **Flags:** Hint and reserved-encoding predicates.
//! 5. **Special fields:** Every field of the family that is not pinned.
//!
//! Only the disassembly text is produced on demand.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::common::error::DecodeError;
use crate::common::{Opcode, RegisterMask, RegisterMaskExt};
use crate::isa::extract::ExtractorRef;
use crate::isa::metadata::{AnnotationRef, InstTypeSet, InstructionType, MetadataRef};
use crate::isa::operand::{ImmediateType, OperandElement, OperandInfo, OperandType, RegClass};
use crate::isa::special::SpecialField;

/// Everything bound to one mnemonic: identity, extractor and collaborators.
#[derive(Clone, Debug)]
pub struct InstructionBinding {
    /// Instruction mnemonic.
    pub mnemonic: Arc<str>,
    /// Per-context unique id.
    pub uid: u32,
    /// Extractor specialized to the mnemonic's fixed fields.
    pub extractor: ExtractorRef,
    /// Operand types and instruction classes.
    pub metadata: MetadataRef,
    /// Optional microarchitectural annotation.
    pub annotation: Option<AnnotationRef>,
}

/// Per-class and per-type register masks of one operand direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Masks {
    all: RegisterMask,
    int: RegisterMask,
    float: RegisterMask,
    vector: RegisterMask,
    by_type: [RegisterMask; OperandType::CONCRETE.len()],
}

impl Masks {
    fn from_operands(all: RegisterMask, info: &[OperandElement]) -> Self {
        let mut masks = Self {
            all,
            ..Self::default()
        };
        for el in info.iter().filter(|el| el.reg < RegisterMask::BITS) {
            let bit = RegisterMask::of(el.reg);
            match el.class() {
                RegClass::Integer => masks.int |= bit,
                RegClass::Float => masks.float |= bit,
                RegClass::Vector => masks.vector |= bit,
            }
            if let Some(idx) = el.operand_type.ordinal() {
                masks.by_type[idx] |= bit;
            }
        }
        masks
    }

    fn of_type(&self, ty: OperandType) -> RegisterMask {
        match ty {
            OperandType::All => self.all,
            OperandType::None => 0,
            _ => ty.ordinal().map_or(0, |idx| self.by_type[idx]),
        }
    }
}

/// Decoded view of one opcode at one leaf.
#[derive(Clone, Debug)]
pub struct DecodedInstructionInfo {
    binding: InstructionBinding,
    opcode: Opcode,
    sources: OperandInfo,
    dests: OperandInfo,
    sources_no_x0: OperandInfo,
    dests_no_x0: OperandInfo,
    source_masks: Masks,
    dest_masks: Masks,
    source_address_regs: RegisterMask,
    source_data_regs: RegisterMask,
    immediate: u64,
    signed_offset: i64,
    immediate_type: ImmediateType,
    is_hint: bool,
    is_illop: bool,
    special_fields: BTreeMap<SpecialField, u64>,
}

impl DecodedInstructionInfo {
    /// Extracts everything about `opcode` through `binding`.
    ///
    /// # Errors
    ///
    /// Propagates any special-field error other than
    /// [`DecodeError::UnsupportedSpecialField`], which marks a pinned field
    /// and is skipped.
    pub fn new(binding: InstructionBinding, opcode: Opcode) -> Result<Self, DecodeError> {
        let ext = &binding.extractor;
        let meta = binding.metadata.as_ref();

        let sources = ext.source_operand_info(opcode, meta, false);
        let dests = ext.dest_operand_info(opcode, meta, false);
        let sources_no_x0 = ext.source_operand_info(opcode, meta, true);
        let dests_no_x0 = ext.dest_operand_info(opcode, meta, true);
        let source_masks = Masks::from_operands(ext.source_regs(opcode), &sources);
        let dest_masks = Masks::from_operands(ext.dest_regs(opcode), &dests);

        let mut special_fields = BTreeMap::new();
        for &field in ext.special_fields() {
            match ext.special_field(field, opcode, meta) {
                Ok(value) => {
                    let _ = special_fields.insert(field, value);
                }
                Err(DecodeError::UnsupportedSpecialField { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(Self {
            opcode,
            source_address_regs: ext.source_address_regs(opcode),
            source_data_regs: ext.source_data_regs(opcode),
            immediate: ext.immediate(opcode),
            signed_offset: ext.signed_offset(opcode),
            immediate_type: ext.immediate_type(),
            is_hint: ext.is_hint(opcode),
            is_illop: ext.is_illop(opcode),
            sources,
            dests,
            sources_no_x0,
            dests_no_x0,
            source_masks,
            dest_masks,
            special_fields,
            binding,
        })
    }

    /// Instruction mnemonic.
    pub fn mnemonic(&self) -> &str {
        &self.binding.mnemonic
    }

    /// Per-context unique id of the mnemonic.
    pub const fn uid(&self) -> u32 {
        self.binding.uid
    }

    /// The decoded opcode.
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Name of the encoding form.
    pub fn form(&self) -> &'static str {
        self.binding.extractor.form().name()
    }

    /// Encoding length in bytes.
    pub fn byte_len(&self) -> usize {
        (self.binding.extractor.form().width() / 8) as usize
    }

    /// Returns `true` for 16-bit encodings.
    pub fn is_compressed(&self) -> bool {
        self.byte_len() == 2
    }

    /// Registry tag of the bound extractor.
    pub fn extractor_tag(&self) -> &'static str {
        self.binding.extractor.tag()
    }

    /// The bound extractor.
    pub const fn extractor(&self) -> &ExtractorRef {
        &self.binding.extractor
    }

    /// Metadata the snapshot was built with.
    pub const fn metadata(&self) -> &MetadataRef {
        &self.binding.metadata
    }

    /// Annotation the snapshot was built with.
    pub const fn annotation(&self) -> Option<&AnnotationRef> {
        self.binding.annotation.as_ref()
    }

    /// Instruction classes declared by the metadata.
    pub fn inst_types(&self) -> InstTypeSet {
        self.binding.metadata.inst_types()
    }

    /// Returns `true` if the metadata declares class `ty`.
    pub fn is_inst_type(&self, ty: InstructionType) -> bool {
        self.binding.metadata.is_inst_type(ty)
    }

    /// Typed source operands in contract order.
    pub fn source_operands(&self) -> &[OperandElement] {
        &self.sources
    }

    /// Typed destination operands in contract order.
    pub fn dest_operands(&self) -> &[OperandElement] {
        &self.dests
    }

    /// Source operands without integer `x0`.
    pub fn source_operands_no_x0(&self) -> &[OperandElement] {
        &self.sources_no_x0
    }

    /// Destination operands without integer `x0`.
    pub fn dest_operands_no_x0(&self) -> &[OperandElement] {
        &self.dests_no_x0
    }

    /// Every register read.
    pub const fn source_regs(&self) -> RegisterMask {
        self.source_masks.all
    }

    /// Every register written.
    pub const fn dest_regs(&self) -> RegisterMask {
        self.dest_masks.all
    }

    /// Integer registers read.
    pub const fn int_source_regs(&self) -> RegisterMask {
        self.source_masks.int
    }

    /// Integer registers written.
    pub const fn int_dest_regs(&self) -> RegisterMask {
        self.dest_masks.int
    }

    /// Floating-point registers read.
    pub const fn float_source_regs(&self) -> RegisterMask {
        self.source_masks.float
    }

    /// Floating-point registers written.
    pub const fn float_dest_regs(&self) -> RegisterMask {
        self.dest_masks.float
    }

    /// Vector registers read.
    pub const fn vector_source_regs(&self) -> RegisterMask {
        self.source_masks.vector
    }

    /// Vector registers written.
    pub const fn vector_dest_regs(&self) -> RegisterMask {
        self.dest_masks.vector
    }

    /// Registers forming a memory address.
    pub const fn source_address_regs(&self) -> RegisterMask {
        self.source_address_regs
    }

    /// Registers supplying data written to memory.
    pub const fn source_data_regs(&self) -> RegisterMask {
        self.source_data_regs
    }

    /// Source registers declared with type `ty` (`All`: every source, `None`: zero).
    pub fn source_oper_type_regs(&self, ty: OperandType) -> RegisterMask {
        self.source_masks.of_type(ty)
    }

    /// Destination registers declared with type `ty` (`All`: every destination, `None`: zero).
    pub fn dest_oper_type_regs(&self, ty: OperandType) -> RegisterMask {
        self.dest_masks.of_type(ty)
    }

    /// Post-swizzle raw immediate.
    pub const fn immediate(&self) -> u64 {
        self.immediate
    }

    /// Sign-extended immediate.
    pub const fn signed_offset(&self) -> i64 {
        self.signed_offset
    }

    /// Sign semantics of the immediate.
    pub const fn immediate_type(&self) -> ImmediateType {
        self.immediate_type
    }

    /// Returns `true` for architectural hints.
    pub const fn is_hint(&self) -> bool {
        self.is_hint
    }

    /// Returns `true` for reserved encodings.
    pub const fn is_illop(&self) -> bool {
        self.is_illop
    }

    /// Every extracted special field.
    pub const fn special_fields(&self) -> &BTreeMap<SpecialField, u64> {
        &self.special_fields
    }

    /// Value of `field`, if the family defines it and it is not pinned.
    pub fn special_field(&self, field: SpecialField) -> Option<u64> {
        self.special_fields.get(&field).copied()
    }

    /// Zcmp stack adjustment in bytes, negative for pushes.
    pub fn stack_adj(&self) -> Option<i64> {
        self.special_field(SpecialField::StackAdj).map(|v| v as i64)
    }

    /// Disassembly text with register prefixes from the declared operand types.
    pub fn dasm(&self) -> String {
        self.binding.extractor.dasm_with_meta(
            &self.binding.mnemonic,
            self.opcode,
            self.binding.metadata.as_ref(),
        )
    }
}

impl fmt::Display for DecodedInstructionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dasm())
    }
}
