//! Decode and build error definitions.
//!
//! This module defines the two error taxonomies of the decoder:
//! 1. **Decode errors:** Surfaced per opcode while walking the trie or querying an extractor.
//! 2. **Build errors:** Surfaced while constructing a decode table; always fatal for that table.
//!
//! Decode failures are ordinary `Result` values so simulators and disassemblers can
//! handle malformed input without crashing.

use thiserror::Error;

use super::Opcode;
use crate::isa::special::SpecialField;

/// Errors produced while decoding an opcode or querying an extractor.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// No trie path matches the opcode.
    #[error("unknown opcode {opcode:#010x}")]
    UnknownOpcode {
        /// The opcode that failed to decode.
        opcode: Opcode,
    },

    /// The opcode matched an instruction but the encoding is architecturally reserved.
    #[error("illegal encoding of `{mnemonic}`: {opcode:#010x}")]
    IllegalOpcode {
        /// Mnemonic of the matched instruction.
        mnemonic: String,
        /// The reserved opcode.
        opcode: Opcode,
    },

    /// The special field never applies to this instruction family.
    #[error("special field `{field}` is not defined for extractor `{extractor}`")]
    InvalidSpecialField {
        /// Requested field.
        field: SpecialField,
        /// Tag of the extractor that was asked.
        extractor: &'static str,
    },

    /// The special field applies to the family but is pinned at this specialization.
    #[error("special field `{field}` is pinned in this specialization of `{extractor}`")]
    UnsupportedSpecialField {
        /// Requested field.
        field: SpecialField,
        /// Tag of the extractor that was asked.
        extractor: &'static str,
    },

    /// A byte stream ended before a complete instruction.
    #[error("truncated instruction: need {needed} bytes, have {available}")]
    TruncatedInput {
        /// Bytes required by the length encoding.
        needed: usize,
        /// Bytes available in the input.
        available: usize,
    },
}

impl DecodeError {
    /// Attributes a special-field error to `tag`.
    ///
    /// Derived extractors answer through their parent; the error must still
    /// name the variant that was asked. Other errors pass through unchanged.
    #[must_use]
    pub fn reported_by(self, tag: &'static str) -> Self {
        match self {
            Self::InvalidSpecialField { field, .. } => Self::InvalidSpecialField {
                field,
                extractor: tag,
            },
            Self::UnsupportedSpecialField { field, .. } => Self::UnsupportedSpecialField {
                field,
                extractor: tag,
            },
            other => other,
        }
    }
}

/// Errors produced while building a decode table.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// No form or extractor factory with that name exists.
    #[error("unknown form `{0}`")]
    UnknownForm(String),

    /// The named field does not exist in the form.
    #[error("form `{form}` has no field named `{field}`")]
    UnknownField {
        /// Form that was searched.
        form: &'static str,
        /// Missing field name.
        field: String,
    },

    /// No extractor is registered under the tag.
    #[error("no extractor registered under `{0}`")]
    UnknownExtractor(String),

    /// A mnemonic was added twice.
    #[error("mnemonic `{0}` is already defined")]
    DuplicateMnemonic(String),

    /// Two entries resolve to the same (mask, value) pair.
    #[error("`{mnemonic}` aliases `{existing}` (mask {mask:#010x}, value {value:#010x})")]
    OpcodeAlias {
        /// Mnemonic being added.
        mnemonic: String,
        /// Mnemonic already occupying the encoding.
        existing: String,
        /// Shared decode mask.
        mask: Opcode,
        /// Shared decode value.
        value: Opcode,
    },

    /// An overlay names a base mnemonic that is not in the table.
    #[error("overlay `{overlay}` requires base instruction `{base}`")]
    MissingOverlayBase {
        /// Overlay mnemonic.
        overlay: String,
        /// Missing base mnemonic.
        base: String,
    },

    /// The entry cannot be routed through a node (no matching arm).
    #[error("`{mnemonic}` cannot be routed through node `{node}`")]
    UnroutableEntry {
        /// Mnemonic being added.
        mnemonic: String,
        /// Node that rejected the entry.
        node: String,
    },

    /// The configuration is inconsistent.
    #[error("invalid decoder configuration: {0}")]
    InvalidConfig(String),
}
