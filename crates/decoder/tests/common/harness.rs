use std::sync::Arc;

use rvdecode_core::catalog::{self, InstDef};
use rvdecode_core::config::{DecoderConfig, Extension as X, IsaConfig};
use rvdecode_core::{DecodeContext, DecodeError, DecodedInstructionInfo, Opcode};
use tracing_subscriber::EnvFilter;

/// Installs a subscriber writing through the test harness. `RUST_LOG`
/// selects the level; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// RV32 with the register-pair extensions (F is left out since Zclsd
/// reuses `c.flw`/`c.fsw`).
pub fn rv32_pairs_config() -> DecoderConfig {
    DecoderConfig {
        isa: IsaConfig::rv32(&[X::I, X::M, X::A, X::C, X::Zicsr, X::Zilsd, X::Zclsd]),
        ..DecoderConfig::default()
    }
}

/// RV64 with Zcmp (D is left out since Zcmp reuses `c.fsdsp`/`c.fldsp`).
pub fn zcmp_config() -> DecoderConfig {
    DecoderConfig {
        isa: IsaConfig {
            extensions: vec![X::I, X::M, X::A, X::F, X::C, X::Zicsr, X::Zcb, X::Zcmp],
            ..IsaConfig::default()
        },
        ..DecoderConfig::default()
    }
}

/// Catalogue definition of `mnemonic` (the first one when several widths exist).
pub fn def(mnemonic: &str) -> &'static InstDef {
    catalog::all()
        .into_iter()
        .find(|d| d.mnemonic == mnemonic)
        .unwrap_or_else(|| panic!("no catalogue entry for {mnemonic}"))
}

pub struct TestContext {
    pub ctx: DecodeContext,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Default configuration: RV64GC plus V and the common Z* extensions.
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        init_tracing();
        let ctx = DecodeContext::new(config).expect("catalogue should build");
        Self { ctx }
    }

    pub fn rv32_pairs() -> Self {
        Self::with_config(rv32_pairs_config())
    }

    pub fn zcmp() -> Self {
        Self::with_config(zcmp_config())
    }

    /// Decodes `opcode`, failing the test on any error.
    pub fn decode(&mut self, opcode: Opcode) -> Arc<DecodedInstructionInfo> {
        match self.ctx.decode(opcode) {
            Ok(info) => info,
            Err(e) => panic!("decode of {opcode:#010x} failed: {e}"),
        }
    }

    pub fn try_decode(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
        self.ctx.decode(opcode)
    }

    /// Disassembly of `opcode` with the context's register naming.
    pub fn dasm(&mut self, opcode: Opcode) -> String {
        match self.ctx.disassemble(opcode) {
            Ok(text) => text,
            Err(e) => panic!("disassembly of {opcode:#010x} failed: {e}"),
        }
    }

    pub fn mnemonic(&mut self, opcode: Opcode) -> String {
        self.decode(opcode).mnemonic().to_owned()
    }
}
