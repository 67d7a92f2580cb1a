//! Built-in instruction catalogue.
//!
//! Every supported instruction is described by a static [`InstDef`]:
//! 1. **Identity:** Mnemonic, form and an optional specialized extractor tag.
//! 2. **Encoding:** A stencil carrying the identifying field values, the
//!    extra fields pinned for this mnemonic and opcode fields left free.
//! 3. **Metadata:** Operand types and instruction classes.
//! 4. **Availability:** The extensions and base width it belongs to.
//!
//! Pseudo-instructions are [`OverlayDef`]s refining a base instruction.
//! [`install`] filters both lists by the configured ISA and feeds the
//! survivors to a [`DecodeTableBuilder`].

/// Atomics and compare-and-swap.
pub mod a;
/// Double-precision floating point.
pub mod d;
/// Single-precision floating point.
pub mod f;
/// Integer multiply and divide.
pub mod m;
/// Zilsd and Zclsd register-pair loads and stores.
pub mod pairs;
/// Machine and supervisor system instructions, cache-block operations.
pub mod privileged;
/// Pseudo-instruction overlays.
pub mod pseudo;
/// Base integer instruction set.
pub mod rv64i;
/// C compressed extension.
pub mod rvc;
/// Vector extension subset.
pub mod rvv;
/// Zcb simple compressed additions.
pub mod zcb;
/// Zcmp push/pop and paired moves.
pub mod zcmp;
/// CSR access.
pub mod zicsr;

use tracing::debug;

use crate::common::Opcode;
use crate::common::error::BuildError;
use crate::config::{Extension, IsaConfig, Xlen};
use crate::decode::builder::DecodeTableBuilder;
use crate::isa::metadata::MetaSpec;

/// Static description of one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstDef {
    /// Mnemonic.
    pub mnemonic: &'static str,
    /// Encoding form name.
    pub form: &'static str,
    /// Specialized extractor tag; the form name when `None`.
    pub xform: Option<&'static str>,
    /// Encoding with every identifying field set.
    pub stencil: Opcode,
    /// Non-opcode fields pinned for this mnemonic.
    pub fixed: &'static [&'static str],
    /// Opcode fields left free (rounding modes).
    pub ignore: &'static [&'static str],
    /// Operand types and classes.
    pub meta: MetaSpec,
    /// Owning extension.
    pub ext: Extension,
    /// Second required extension.
    pub also: Option<Extension>,
    /// Base width restriction.
    pub xlen: Option<Xlen>,
}

impl InstDef {
    /// Instruction decoded by the form's base extractor on both widths.
    pub const fn new(
        mnemonic: &'static str,
        form: &'static str,
        stencil: Opcode,
        meta: MetaSpec,
        ext: Extension,
    ) -> Self {
        Self {
            mnemonic,
            form,
            xform: None,
            stencil,
            fixed: &[],
            ignore: &[],
            meta,
            ext,
            also: None,
            xlen: None,
        }
    }

    /// Decodes through the extractor registered under `tag`.
    pub const fn via(mut self, tag: &'static str) -> Self {
        self.xform = Some(tag);
        self
    }

    /// Pins `fields` in addition to the opcode fields.
    pub const fn pinning(mut self, fields: &'static [&'static str]) -> Self {
        self.fixed = fields;
        self
    }

    /// Leaves the opcode fields `fields` free.
    pub const fn ignoring(mut self, fields: &'static [&'static str]) -> Self {
        self.ignore = fields;
        self
    }

    /// Also requires `ext`.
    pub const fn also(mut self, ext: Extension) -> Self {
        self.also = Some(ext);
        self
    }

    /// Restricts the instruction to RV64.
    pub const fn rv64(mut self) -> Self {
        self.xlen = Some(Xlen::Rv64);
        self
    }

    /// Restricts the instruction to RV32.
    pub const fn rv32(mut self) -> Self {
        self.xlen = Some(Xlen::Rv32);
        self
    }

    /// Extractor tag.
    pub fn tag(&self) -> &'static str {
        self.xform.unwrap_or(self.form)
    }

    /// Returns `true` if the instruction exists under `isa`.
    pub fn enabled(&self, isa: &IsaConfig) -> bool {
        self.xlen.is_none_or(|x| x == isa.xlen)
            && isa.has(self.ext)
            && self.also.is_none_or(|ext| isa.has(ext))
    }
}

/// Static description of one pseudo-instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayDef {
    /// Pseudo-instruction mnemonic.
    pub mnemonic: &'static str,
    /// Mnemonic of the refined instruction.
    pub base: &'static str,
    /// Extractor tag of the pseudo-instruction.
    pub tag: &'static str,
    /// Encoding with the base's and the pinned fields set.
    pub stencil: Opcode,
    /// Fields pinned beyond the form's opcode fields.
    pub fixed: &'static [&'static str],
    /// Operand types and classes.
    pub meta: MetaSpec,
}

/// Major opcodes, quadrant bits included.
pub mod opcode {
    use crate::common::Opcode;

    /// Integer loads.
    pub const LOAD: Opcode = 0x03;
    /// FP and vector loads.
    pub const LOAD_FP: Opcode = 0x07;
    /// Fences and cache-block operations.
    pub const MISC_MEM: Opcode = 0x0F;
    /// Register-immediate arithmetic.
    pub const OP_IMM: Opcode = 0x13;
    /// Add upper immediate to pc.
    pub const AUIPC: Opcode = 0x17;
    /// 32-bit register-immediate arithmetic.
    pub const OP_IMM_32: Opcode = 0x1B;
    /// Integer stores.
    pub const STORE: Opcode = 0x23;
    /// FP and vector stores.
    pub const STORE_FP: Opcode = 0x27;
    /// Atomics.
    pub const AMO: Opcode = 0x2F;
    /// Register-register arithmetic.
    pub const OP: Opcode = 0x33;
    /// Load upper immediate.
    pub const LUI: Opcode = 0x37;
    /// 32-bit register-register arithmetic.
    pub const OP_32: Opcode = 0x3B;
    /// Fused multiply-add.
    pub const MADD: Opcode = 0x43;
    /// Fused multiply-subtract.
    pub const MSUB: Opcode = 0x47;
    /// Negated fused multiply-subtract.
    pub const NMSUB: Opcode = 0x4B;
    /// Negated fused multiply-add.
    pub const NMADD: Opcode = 0x4F;
    /// FP arithmetic.
    pub const OP_FP: Opcode = 0x53;
    /// Vector arithmetic and configuration.
    pub const OP_V: Opcode = 0x57;
    /// Conditional branches.
    pub const BRANCH: Opcode = 0x63;
    /// Indirect jump.
    pub const JALR: Opcode = 0x67;
    /// Direct jump.
    pub const JAL: Opcode = 0x6F;
    /// System, CSR and privileged instructions.
    pub const SYSTEM: Opcode = 0x73;
}

/// Major opcode plus `funct3`.
pub const fn enc(major: Opcode, funct3: u64) -> Opcode {
    (funct3 << 12) | major
}

/// Major opcode plus `funct3` and `funct7`.
pub const fn enc7(major: Opcode, funct3: u64, funct7: u64) -> Opcode {
    (funct7 << 25) | enc(major, funct3)
}

/// Compressed quadrant plus `funct3`.
pub const fn cenc(quadrant: u64, funct3: u64) -> Opcode {
    (funct3 << 13) | quadrant
}

fn instructions() -> impl Iterator<Item = &'static InstDef> {
    [
        rv64i::INSTRUCTIONS,
        m::INSTRUCTIONS,
        a::INSTRUCTIONS,
        f::INSTRUCTIONS,
        d::INSTRUCTIONS,
        zicsr::INSTRUCTIONS,
        privileged::INSTRUCTIONS,
        rvc::INSTRUCTIONS,
        zcb::INSTRUCTIONS,
        zcmp::INSTRUCTIONS,
        pairs::INSTRUCTIONS,
        rvv::INSTRUCTIONS,
    ]
    .into_iter()
    .flatten()
}

/// Every built-in instruction definition, enabled or not.
pub fn all() -> Vec<&'static InstDef> {
    instructions().collect()
}

/// Installs every instruction and overlay available under `isa`.
///
/// Overlays whose base instruction is not installed are skipped.
///
/// # Errors
///
/// Propagates the first [`BuildError`] raised by the builder.
pub fn install(builder: &mut DecodeTableBuilder, isa: &IsaConfig) -> Result<(), BuildError> {
    let mut skipped = 0_usize;
    for def in instructions() {
        if def.enabled(isa) {
            let _ = builder.add_instruction(def)?;
        } else {
            skipped += 1;
        }
    }
    for def in pseudo::OVERLAYS {
        if builder.contains(def.base) {
            let _ = builder.add_overlay(def)?;
        } else {
            debug!(overlay = def.mnemonic, base = def.base, "overlay base not installed");
        }
    }
    debug!(skipped, "catalogue installed");
    Ok(())
}
