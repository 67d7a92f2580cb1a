//! Configuration system for the decoder.
//!
//! This module defines the configuration structures used to parameterize a
//! [`DecodeContext`](crate::DecodeContext). It provides:
//! 1. **Defaults:** Baseline ISA selection and cache sizing.
//! 2. **Structures:** ISA, stash and disassembly configuration.
//! 3. **Enums:** Register width and extension identifiers.
//!
//! Configuration is supplied as JSON (see [`DecoderConfig::from_json`]) or built with
//! `DecoderConfig::default()`.

use serde::Deserialize;

use crate::common::error::BuildError;

/// Default configuration constants for the decoder.
mod defaults {
    use super::Extension;

    /// Direct-mapped stash slots per leaf.
    ///
    /// Must be a power of two; the slot index is taken from the low opcode bits
    /// above the quadrant.
    pub const STASH_DIRECT_SLOTS: usize = 16;

    /// Entries kept in each leaf's overflow layer before the oldest is evicted.
    pub const STASH_OVERFLOW_CAPACITY: usize = 256;

    /// Extensions enabled when none are configured (RV64GC plus the vector
    /// extension and the common Z* additions).
    pub const EXTENSIONS: &[Extension] = &[
        Extension::I,
        Extension::M,
        Extension::A,
        Extension::F,
        Extension::D,
        Extension::C,
        Extension::Zicsr,
        Extension::Zifencei,
        Extension::Privileged,
        Extension::Zicbom,
        Extension::Zicbop,
        Extension::Zicboz,
        Extension::Zacas,
        Extension::Zcb,
        Extension::V,
    ];
}

/// Base register width.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
pub enum Xlen {
    /// 32-bit base ISA.
    #[serde(alias = "rv32", alias = "32")]
    Rv32,
    /// 64-bit base ISA.
    #[default]
    #[serde(alias = "rv64", alias = "64")]
    Rv64,
}

impl Xlen {
    /// Register width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
        }
    }
}

/// ISA extensions known to the built-in catalogue.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extension {
    /// Base integer instruction set.
    I,
    /// Integer multiply/divide.
    M,
    /// Atomics.
    A,
    /// Single-precision floating point.
    F,
    /// Double-precision floating point.
    D,
    /// Compressed instructions.
    C,
    /// Vector extension.
    V,
    /// CSR instructions.
    Zicsr,
    /// Instruction-fetch fence.
    Zifencei,
    /// Machine/supervisor system instructions.
    Privileged,
    /// Cache-block management (`cbo.clean`, `cbo.flush`, `cbo.inval`).
    Zicbom,
    /// Cache-block prefetch hints.
    Zicbop,
    /// Cache-block zero.
    Zicboz,
    /// Compare-and-swap with register pairs.
    Zacas,
    /// Additional simple compressed instructions.
    Zcb,
    /// Compressed push/pop and paired moves.
    Zcmp,
    /// Register-pair loads and stores on RV32.
    Zilsd,
    /// Compressed register-pair loads and stores on RV32.
    Zclsd,
}

/// Root configuration structure for a decode context.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DecoderConfig {
    /// ISA selection.
    #[serde(default)]
    pub isa: IsaConfig,
    /// Per-leaf extraction stash sizing.
    #[serde(default)]
    pub stash: StashConfig,
    /// Disassembly options.
    #[serde(default)]
    pub disasm: DisasmConfig,
}

impl DecoderConfig {
    /// Parses a JSON configuration document and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfig`] for malformed JSON or an
    /// inconsistent configuration.
    pub fn from_json(text: &str) -> Result<Self, BuildError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| BuildError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfig`] when the stash size is not a power
    /// of two, when the overflow layer has no room, or when mutually exclusive
    /// extensions are enabled together.
    pub fn validate(&self) -> Result<(), BuildError> {
        if !self.stash.direct_slots.is_power_of_two() {
            return Err(BuildError::InvalidConfig(format!(
                "stash.direct_slots must be a power of two, got {}",
                self.stash.direct_slots
            )));
        }
        if self.stash.overflow_capacity == 0 {
            return Err(BuildError::InvalidConfig(
                "stash.overflow_capacity must be at least 1".into(),
            ));
        }
        if self.isa.has(Extension::Zcmp) && self.isa.has(Extension::C) && self.isa.has(Extension::D)
        {
            return Err(BuildError::InvalidConfig(
                "Zcmp reuses the compressed double-precision load/store encodings; disable D or C"
                    .into(),
            ));
        }
        if self.isa.xlen == Xlen::Rv64
            && (self.isa.has(Extension::Zilsd) || self.isa.has(Extension::Zclsd))
        {
            return Err(BuildError::InvalidConfig(
                "Zilsd and Zclsd are only defined for RV32".into(),
            ));
        }
        if self.isa.has(Extension::Zclsd) && self.isa.has(Extension::C) && self.isa.has(Extension::F)
        {
            return Err(BuildError::InvalidConfig(
                "Zclsd reuses the compressed single-precision load/store encodings; disable F or C"
                    .into(),
            ));
        }
        Ok(())
    }
}

/// ISA selection.
#[derive(Clone, Debug, Deserialize)]
pub struct IsaConfig {
    /// Base register width.
    #[serde(default)]
    pub xlen: Xlen,

    /// Enabled extensions.
    #[serde(default = "IsaConfig::default_extensions")]
    pub extensions: Vec<Extension>,
}

impl IsaConfig {
    /// Returns the default extension list.
    fn default_extensions() -> Vec<Extension> {
        defaults::EXTENSIONS.to_vec()
    }

    /// Returns `true` if `ext` is enabled.
    pub fn has(&self, ext: Extension) -> bool {
        self.extensions.contains(&ext)
    }

    /// RV32 configuration with the given extensions.
    pub fn rv32(extensions: &[Extension]) -> Self {
        Self {
            xlen: Xlen::Rv32,
            extensions: extensions.to_vec(),
        }
    }
}

impl Default for IsaConfig {
    fn default() -> Self {
        Self {
            xlen: Xlen::Rv64,
            extensions: Self::default_extensions(),
        }
    }
}

/// Per-leaf stash sizing.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct StashConfig {
    /// Direct-mapped slots behind the MRU entry (power of two).
    #[serde(default = "StashConfig::default_direct_slots")]
    pub direct_slots: usize,

    /// Overflow entries kept per leaf; the oldest is evicted first.
    #[serde(default = "StashConfig::default_overflow_capacity")]
    pub overflow_capacity: usize,
}

impl StashConfig {
    /// Stash with the given layer sizes.
    pub const fn new(direct_slots: usize, overflow_capacity: usize) -> Self {
        Self {
            direct_slots,
            overflow_capacity,
        }
    }

    /// Returns the default direct-mapped slot count.
    fn default_direct_slots() -> usize {
        defaults::STASH_DIRECT_SLOTS
    }

    /// Returns the default overflow capacity.
    fn default_overflow_capacity() -> usize {
        defaults::STASH_OVERFLOW_CAPACITY
    }
}

impl Default for StashConfig {
    fn default() -> Self {
        Self::new(defaults::STASH_DIRECT_SLOTS, defaults::STASH_OVERFLOW_CAPACITY)
    }
}

/// Disassembly options.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct DisasmConfig {
    /// Render integer registers with ABI names (`a0`, `sp`) in operand listings.
    #[serde(default)]
    pub abi_names: bool,
}
