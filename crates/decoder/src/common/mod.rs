//! Common utilities and types used throughout the decoder.
//!
//! This module provides the fundamental building blocks shared by every other
//! part of the crate:
//! 1. **Aliases:** Raw opcode and register mask types.
//! 2. **Constants:** Architectural register indices and encoding widths.
//! 3. **Register Masks:** Helpers for building and iterating register bitmasks.
//! 4. **Error Handling:** Decode-time and build-time error taxonomies.

/// Architectural register indices and encoding constants.
pub mod constants;

/// Error types for decoding and table construction.
pub mod error;

/// Register bitmask helpers.
pub mod reg;

pub use constants::{REG_RA, REG_SP, REG_ZERO};
pub use error::{BuildError, DecodeError};
pub use reg::RegisterMaskExt;

/// Raw instruction bit pattern. Compressed encodings occupy the low 16 bits.
pub type Opcode = u64;

/// Bit *i* set means register *i* participates.
pub type RegisterMask = u64;
