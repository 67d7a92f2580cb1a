//! Static encoding forms and fixed-field contexts.
//!
//! A [`Form`] is the bit-layout schema of one encoding shape: an ordered set of
//! named, non-overlapping [`Field`]s plus the subset that identifies an
//! instruction within the form. Forms are `static` items; their constructor
//! is a `const fn` that rejects overlapping or out-of-range fields, so a
//! malformed form fails at compile time.
//!
//! Each form module also exports a small index module (`r::RD`, `ci::IMM5`, ...)
//! naming the position of every field for extractors.

/// 32-bit base encoding forms.
pub mod base;

/// 16-bit compressed encoding forms.
pub mod compressed;

/// Vector extension encoding forms.
pub mod vector;

use crate::common::Opcode;
use crate::common::error::BuildError;
use crate::isa::field::Field;

/// Bit-layout schema of one encoding shape.
#[derive(Debug, PartialEq, Eq)]
pub struct Form {
    name: &'static str,
    width: u32,
    fields: &'static [Field],
    opcode_fields: &'static [usize],
}

impl Form {
    /// Creates a form, validating it at compile time.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `static`) if a field exceeds the
    /// encoding width, two fields overlap, or an opcode field index is out of
    /// range.
    pub const fn new(
        name: &'static str,
        width: u32,
        fields: &'static [Field],
        opcode_fields: &'static [usize],
    ) -> Self {
        let mut i = 0;
        while i < fields.len() {
            assert!(fields[i].msb() < width, "form field exceeds encoding width");
            let mut j = i + 1;
            while j < fields.len() {
                assert!(!fields[i].overlaps(&fields[j]), "form fields overlap");
                j += 1;
            }
            i += 1;
        }
        let mut k = 0;
        while k < opcode_fields.len() {
            assert!(opcode_fields[k] < fields.len(), "opcode field index out of range");
            k += 1;
        }
        Self {
            name,
            width,
            fields,
            opcode_fields,
        }
    }

    /// Form name (`"R"`, `"CI"`, `"V"`, ...).
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Encoding width in bits (16 or 32).
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// All fields in declaration order.
    pub const fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Indices of the fields identifying an instruction within the form.
    pub const fn opcode_fields(&self) -> &'static [usize] {
        self.opcode_fields
    }

    /// Field at `idx`, if any.
    pub fn field(&self, idx: usize) -> Option<&'static Field> {
        self.fields.get(idx)
    }

    /// Extracts field `idx` from `opcode`; unknown indices read as zero.
    #[inline]
    pub fn extract(&self, idx: usize, opcode: Opcode) -> u64 {
        self.fields.get(idx).map_or(0, |f| f.extract(opcode))
    }

    /// Index of the field called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Index of the field called `name`, or [`BuildError::UnknownField`].
    ///
    /// # Errors
    ///
    /// Fails when the form has no such field.
    pub fn require_field(&self, name: &str) -> Result<usize, BuildError> {
        self.field_index(name).ok_or_else(|| BuildError::UnknownField {
            form: self.name,
            field: name.to_owned(),
        })
    }

    /// Union of the opcode-space masks of the identifying fields.
    pub fn opcode_mask(&self) -> Opcode {
        self.opcode_fields
            .iter()
            .filter_map(|&i| self.fields.get(i))
            .fold(0, |m, f| m | f.mask())
    }
}

/// Every built-in form.
pub static ALL: &[&Form] = &[
    &base::R,
    &base::R4,
    &base::I,
    &base::ISH,
    &base::ISHW,
    &base::S,
    &base::B,
    &base::U,
    &base::J,
    &base::AMO,
    &base::CSR,
    &base::CSRI,
    &base::FENCE,
    &base::PF,
    &vector::V,
    &vector::VF_MEM,
    &vector::VSETVLI,
    &vector::VSETIVLI,
    &compressed::CR,
    &compressed::CI,
    &compressed::CSS,
    &compressed::CIW,
    &compressed::CL,
    &compressed::CS,
    &compressed::CA,
    &compressed::CB,
    &compressed::CBI,
    &compressed::CJ,
    &compressed::CU,
    &compressed::CLB,
    &compressed::CLH,
    &compressed::CSB,
    &compressed::CSH,
    &compressed::CMPP,
    &compressed::CMMV,
];

/// Looks up a built-in form by name.
pub fn lookup(name: &str) -> Option<&'static Form> {
    ALL.iter().copied().find(|f| f.name() == name)
}

/// Fields pinned to a constant on the decode path of one leaf.
///
/// `mask` is the union of the pinned fields' opcode-space masks; bit *i* of
/// `set` is set when field index *i* of the form is pinned. Extractors never
/// report a pinned field as a register or special field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FixedFields {
    mask: Opcode,
    set: u64,
}

impl FixedFields {
    /// No pinned fields.
    pub const NONE: Self = Self { mask: 0, set: 0 };

    /// Creates a context from raw masks.
    pub const fn new(mask: Opcode, set: u64) -> Self {
        Self { mask, set }
    }

    /// Pins the fields at `indices` of `form`.
    pub fn from_indices<I>(form: &Form, indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        indices.into_iter().fold(Self::NONE, |acc, idx| match form.field(idx) {
            Some(f) => Self {
                mask: acc.mask | f.mask(),
                set: acc.set | (1 << idx),
            },
            None => acc,
        })
    }

    /// Opcode-space mask of the pinned fields.
    pub const fn mask(&self) -> Opcode {
        self.mask
    }

    /// Field-index set of the pinned fields.
    pub const fn set(&self) -> u64 {
        self.set
    }

    /// Returns `true` if field index `idx` is pinned.
    #[inline(always)]
    pub const fn is_pinned(&self, idx: usize) -> bool {
        idx < 64 && self.set & (1 << idx) != 0
    }

    /// Number of pinned fields; higher means more specific.
    pub const fn specificity(&self) -> u32 {
        self.set.count_ones()
    }
}
