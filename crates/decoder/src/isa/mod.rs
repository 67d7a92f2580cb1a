//! Instruction Set Architecture (ISA) model.
//!
//! Contains the bit-level primitives, encoding forms and per-form extraction
//! logic the decode trie binds to its leaves.
//!
//! # Layers
//!
//! * `field` / `swizzle`: contiguous and scrambled bit-range extraction.
//! * `form`: static bit-layout schemas (32-bit, compressed, vector).
//! * `operand` / `special` / `metadata`: value types shared by extractors.
//! * `extract`: the extractor trait, its per-form variants and the tag registry.
//! * `info`: the immutable decoded-instruction snapshot.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Extractor trait, per-form variants and the specialization registry.
pub mod extract;

/// Named contiguous bit ranges.
pub mod field;

/// Static encoding forms and fixed-field contexts.
pub mod form;

/// Immutable decoded-instruction snapshot.
pub mod info;

/// Instruction metadata and annotation collaborators.
pub mod metadata;

/// Operand roles, operand types and operand info lists.
pub mod operand;

/// Architecturally named special fields.
pub mod special;

/// Reassembly of scrambled bit ranges.
pub mod swizzle;
