//! # Unit Components
//!
//! Tests grouped by decoder component, from bit primitives up to the public
//! decode context.

/// Field and swizzle properties.
///
/// Proptest round-trips of contiguous fields and scrambled immediates, plus
/// the compressed load-word immediate layout.
pub mod bits;

/// Table construction contract and its errors.
pub mod builder;

/// Configuration parsing and validation.
pub mod config;

/// Disassembly text of every operand layout.
pub mod disasm;

/// Extractor semantics reached through full decodes.
///
/// Covers operand masks, immediates, hint and reserved-encoding predicates,
/// register pairs and special fields.
pub mod extract;

/// Pseudo-instruction overlays.
pub mod overlay;

/// Hot reload of metadata and annotations, uid lookup.
pub mod reload;

/// Per-leaf stash behavior and statistics.
pub mod stash;

/// Trie routing, default retry and decode errors.
pub mod trie;

/// Vector configuration, arithmetic and memory instructions.
pub mod vector;

/// Zcmp push/pop and paired moves.
pub mod zcmp;
