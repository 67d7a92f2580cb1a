//! Table-driven RISC-V instruction decoder.
//!
//! This crate turns raw RISC-V instruction encodings into immutable, queryable
//! records with the following pieces:
//! 1. **Bits:** Field and swizzle primitives for contiguous and scrambled bit ranges.
//! 2. **Forms:** Static bit-layout schemas for every 32-bit, compressed and vector encoding shape.
//! 3. **Extractors:** One trait with safe defaults, a base variant per form, and derived
//!    variants that delegate to a named parent and override only what differs.
//! 4. **Decode trie:** Dense, sparse, selector, match-list and special-case nodes that route
//!    an opcode to a bound leaf, with a per-leaf extraction stash and pseudo-instruction overlays.
//! 5. **Catalogue:** The built-in instruction set (RV64/RV32 I, M, A, F, D, C, V and friends).
//!
//! # Usage
//!
//! ```
//! use rvdecode_core::{DecodeContext, DecoderConfig};
//!
//! let mut ctx = DecodeContext::new(DecoderConfig::default()).unwrap();
//! let info = ctx.decode(0x007302B3).unwrap(); // add x5, x6, x7
//! assert_eq!(info.mnemonic(), "add");
//! assert_eq!(info.int_dest_regs(), 1 << 5);
//! ```

/// Common types, register constants and error definitions.
pub mod common;
/// Decoder configuration (ISA selection, stash sizing, disassembly options).
pub mod config;
/// Built-in instruction and pseudo-instruction catalogue.
pub mod catalog;
/// Decode trie, leaves, stash, overlays, builder and decode context.
pub mod decode;
/// Instruction set model (fields, forms, operands, extractors, decoded info).
pub mod isa;

/// Error types surfaced by decoding and table construction.
pub use crate::common::error::{BuildError, DecodeError};
/// Raw opcode and register mask aliases.
pub use crate::common::{Opcode, RegisterMask};
/// Root configuration type; use `DecoderConfig::default()` or deserialize from JSON.
pub use crate::config::DecoderConfig;
/// Decode entry point; owns one trie and its caches.
pub use crate::decode::context::DecodeContext;
/// Immutable decoded instruction snapshot.
pub use crate::isa::info::DecodedInstructionInfo;
