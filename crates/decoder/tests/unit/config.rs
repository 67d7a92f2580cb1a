//! Configuration Loading.
//!
//! Verifies JSON parsing with its aliases and defaults, cross-field
//! validation and the effect of the ISA selection on what decodes.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvdecode_core::config::{Extension as X, IsaConfig, StashConfig, Xlen};
use rvdecode_core::{BuildError, DecodeContext, DecodeError, DecoderConfig};

use crate::common::encode::{OP, OP_IMM_32, i_type, r_type};
use crate::common::harness::TestContext;

fn invalid(result: Result<DecoderConfig, BuildError>) -> String {
    match result {
        Err(BuildError::InvalidConfig(msg)) => msg,
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════
// 1. Parsing
// ══════════════════════════════════════════════════════════

#[test]
fn empty_document_uses_defaults() {
    let config = DecoderConfig::from_json("{}").unwrap();
    assert_eq!(config.isa.xlen, Xlen::Rv64);
    assert_eq!(config.stash.direct_slots, 16);
    assert_eq!(config.stash.overflow_capacity, 256);
    assert!(!config.disasm.abi_names);
    assert_eq!(config.isa.extensions, IsaConfig::default().extensions);
    assert!(config.isa.has(X::V));
    assert!(!config.isa.has(X::Zcmp));
}

#[rstest]
#[case::short("rv32", Xlen::Rv32)]
#[case::numeric("32", Xlen::Rv32)]
#[case::variant("Rv32", Xlen::Rv32)]
#[case::rv64("rv64", Xlen::Rv64)]
#[case::numeric64("64", Xlen::Rv64)]
fn xlen_aliases(#[case] text: &str, #[case] expected: Xlen) {
    let json = format!(r#"{{ "isa": {{ "xlen": "{text}", "extensions": ["I"] }} }}"#);
    let config = DecoderConfig::from_json(&json).unwrap();
    assert_eq!(config.isa.xlen, expected);
    assert_eq!(config.isa.xlen.bits(), if expected == Xlen::Rv32 { 32 } else { 64 });
}

#[test]
fn full_document() {
    let json = r#"{
        "isa": { "xlen": "rv32", "extensions": ["I", "M", "C", "Zicsr", "Zcmp"] },
        "stash": { "direct_slots": 64, "overflow_capacity": 32 },
        "disasm": { "abi_names": true }
    }"#;
    let config = DecoderConfig::from_json(json).unwrap();
    assert_eq!(config.isa.extensions, [X::I, X::M, X::C, X::Zicsr, X::Zcmp]);
    assert_eq!(config.stash.direct_slots, 64);
    assert_eq!(config.stash.overflow_capacity, 32);
    assert!(config.disasm.abi_names);
}

#[rstest]
#[case::not_json("isa = rv32")]
#[case::unknown_extension(r#"{ "isa": { "extensions": ["Q9"] } }"#)]
#[case::bad_xlen(r#"{ "isa": { "xlen": "rv128" } }"#)]
#[case::negative_slots(r#"{ "stash": { "direct_slots": -1 } }"#)]
fn malformed_documents_are_rejected(#[case] json: &str) {
    let _ = invalid(DecoderConfig::from_json(json));
}

// ══════════════════════════════════════════════════════════
// 2. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::zero(0)]
#[case::twelve(12)]
#[case::hundred(100)]
fn stash_must_be_a_power_of_two(#[case] slots: usize) {
    let config = DecoderConfig {
        stash: StashConfig::new(slots, 256),
        ..DecoderConfig::default()
    };
    let msg = invalid(config.validate().map(|()| config.clone()));
    assert!(msg.contains("power of two"), "{msg}");
}

#[test]
fn overflow_layer_needs_room() {
    let msg = invalid(DecoderConfig::from_json(r#"{ "stash": { "overflow_capacity": 0 } }"#));
    assert!(msg.contains("overflow_capacity"), "{msg}");
}

#[rstest]
#[case::zcmp_with_c_and_d(
    IsaConfig { extensions: vec![X::I, X::C, X::D, X::Zcmp], ..IsaConfig::default() },
    "Zcmp"
)]
#[case::zilsd_on_rv64(
    IsaConfig { extensions: vec![X::I, X::Zilsd], ..IsaConfig::default() },
    "RV32"
)]
#[case::zclsd_with_c_and_f(IsaConfig::rv32(&[X::I, X::C, X::F, X::Zclsd]), "Zclsd")]
fn conflicting_extensions(#[case] isa: IsaConfig, #[case] needle: &str) {
    let config = DecoderConfig {
        isa,
        ..DecoderConfig::default()
    };
    let msg = invalid(config.validate().map(|()| config.clone()));
    assert!(msg.contains(needle), "{msg}");
}

#[test]
fn context_refuses_an_invalid_config() {
    let config = DecoderConfig {
        stash: StashConfig::new(12, 256),
        ..DecoderConfig::default()
    };
    assert!(matches!(
        DecodeContext::new(config),
        Err(BuildError::InvalidConfig(_))
    ));
}

// ══════════════════════════════════════════════════════════
// 3. ISA selection
// ══════════════════════════════════════════════════════════

#[test]
fn rv64_only_instructions_are_absent_on_rv32() {
    let addiw = i_type(OP_IMM_32, 10, 0, 11, 1);
    let mut rv64 = TestContext::new();
    assert_eq!(rv64.mnemonic(addiw), "addiw");

    let mut rv32 = TestContext::with_config(DecoderConfig {
        isa: IsaConfig::rv32(&[X::I, X::M, X::C, X::Zicsr]),
        ..DecoderConfig::default()
    });
    assert_eq!(
        rv32.try_decode(addiw).unwrap_err(),
        DecodeError::UnknownOpcode { opcode: addiw }
    );
}

#[test]
fn disabled_extension_does_not_decode() {
    let mul = r_type(OP, 5, 0, 6, 7, 1);
    let mut tc = TestContext::with_config(DecoderConfig {
        isa: IsaConfig {
            extensions: vec![X::I, X::Zicsr],
            ..IsaConfig::default()
        },
        ..DecoderConfig::default()
    });
    assert_eq!(
        tc.try_decode(mul).unwrap_err(),
        DecodeError::UnknownOpcode { opcode: mul }
    );
    assert_eq!(tc.mnemonic(r_type(OP, 5, 0, 6, 7, 0)), "add");
    assert!(tc.ctx.uid("mul").is_none());
}
