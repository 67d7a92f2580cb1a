//! Trie Routing and Decode Errors.
//!
//! Verifies routing through the standard skeleton, the default-child retry
//! rule (unknown opcodes retry, reserved encodings do not), byte-stream
//! decoding and the decode error values.

use pretty_assertions::assert_eq;
use rvdecode_core::config::{DecoderConfig, StashConfig};
use rvdecode_core::decode::builder::DecodeTableBuilder;
use rvdecode_core::decode::layout::NodeShape;
use rvdecode_core::isa::field::Field;
use rvdecode_core::isa::metadata::{InstructionType as T, MetaSpec, StaticMetadata};
use rvdecode_core::{DecodeContext, DecodeError};

use crate::common::encode::{LOAD, OP, OP_FP, i_type, le_bytes, r_type};
use crate::common::harness::{TestContext, init_tracing};

const META: MetaSpec = MetaSpec::int(&[T::Int]);

/// Root dense on `funct3` with a default child, populated with:
/// - `ld` (pair load, odd `rd` reserved) keyed on `funct3 = 3`;
/// - `only.x0` keyed on `funct3 = 1`, matching only `rd = x0`;
/// - `catchall` on the default child, matching every `LOAD` opcode.
fn retry_context() -> DecodeContext {
    init_tracing();
    let shape = NodeShape::dense_cases(Field::new("funct3", 12, 3));
    let mut builder = DecodeTableBuilder::with_layout(&shape, StashConfig::new(4, 8));
    let meta = StaticMetadata::shared(META);
    let _ = builder
        .add_special_case("I_load_pair", "ld", i_type(LOAD, 0, 3, 0, 0), &[], meta.clone())
        .unwrap();
    let _ = builder
        .add_special_case("I", "only.x0", i_type(LOAD, 0, 1, 0, 0), &["rd"], meta.clone())
        .unwrap();
    let _ = builder.add_special_case("U", "catchall", LOAD, &[], meta).unwrap();
    DecodeContext::from_table(builder.build(), DecoderConfig::default())
}

// ══════════════════════════════════════════════════════════
// 1. Default retry
// ══════════════════════════════════════════════════════════

#[test]
fn keyed_match_wins_over_default() {
    let mut ctx = retry_context();
    let info = ctx.decode(i_type(LOAD, 10, 3, 5, 8)).unwrap();
    assert_eq!(info.mnemonic(), "ld");
}

#[test]
fn empty_slot_falls_back_to_default() {
    let mut ctx = retry_context();
    let info = ctx.decode(i_type(LOAD, 10, 2, 5, 8)).unwrap();
    assert_eq!(info.mnemonic(), "catchall");
}

#[test]
fn unknown_in_keyed_child_is_retried_on_default() {
    let mut ctx = retry_context();
    assert_eq!(ctx.decode(i_type(LOAD, 0, 1, 5, 8)).unwrap().mnemonic(), "only.x0");
    // rd != x0 misses the keyed special case and lands on the default.
    assert_eq!(ctx.decode(i_type(LOAD, 11, 1, 5, 8)).unwrap().mnemonic(), "catchall");
}

#[test]
fn illegal_in_keyed_child_is_not_retried() {
    let mut ctx = retry_context();
    let opcode = i_type(LOAD, 11, 3, 5, 8);
    assert_eq!(
        ctx.decode(opcode).unwrap_err(),
        DecodeError::IllegalOpcode {
            mnemonic: "ld".into(),
            opcode,
        }
    );
}

#[test]
fn nothing_matches_anywhere() {
    let mut ctx = retry_context();
    let opcode = 0x0000_0013;
    assert_eq!(ctx.decode(opcode).unwrap_err(), DecodeError::UnknownOpcode { opcode });
}

#[test]
fn fp_arithmetic_ignoring_rounding_mode_is_found_through_default() {
    // fadd.s with rm = 0 shares its funct3 slot with fsgnj.s and fmin.s, whose
    // sparse child has no funct7 = 0 entry.
    let mut tc = TestContext::new();
    for rm in [0, 1, 4, 7] {
        let info = tc.decode(r_type(OP_FP, 1, rm, 2, 3, 0));
        assert_eq!(info.mnemonic(), "fadd.s", "rm={rm}");
        assert_eq!(info.float_dest_regs(), 1 << 1);
        assert_eq!(info.float_source_regs(), (1 << 2) | (1 << 3));
    }
}

// ══════════════════════════════════════════════════════════
// 2. Errors through the standard catalogue
// ══════════════════════════════════════════════════════════

#[test]
fn unassigned_major_opcode_is_unknown() {
    let mut tc = TestContext::new();
    let opcode = 0xFFFF_FFFF;
    assert_eq!(tc.try_decode(opcode).unwrap_err(), DecodeError::UnknownOpcode { opcode });
}

#[test]
fn all_zero_halfword_is_reserved() {
    let mut tc = TestContext::new();
    let err = tc.try_decode(0x0000).unwrap_err();
    assert_eq!(
        err,
        DecodeError::IllegalOpcode {
            mnemonic: "c.addi4spn".into(),
            opcode: 0,
        }
    );
    assert!(err.to_string().contains("c.addi4spn"), "got '{err}'");
}

#[test]
fn bits_above_the_encoded_length_are_ignored() {
    let mut tc = TestContext::new();
    let add = r_type(OP, 5, 0, 6, 7, 0);
    assert_eq!(tc.mnemonic(0xDEAD_0000_0000_0000 | add), "add");
    // A compressed opcode with junk in the upper halfword.
    assert_eq!(tc.mnemonic(0xFFFF_0000 | 0x4501), "c.li");
}

// ══════════════════════════════════════════════════════════
// 3. Byte streams
// ══════════════════════════════════════════════════════════

#[test]
fn decode_bytes_reads_little_endian_and_reports_length() {
    let mut tc = TestContext::new();
    let (info, len) = tc.ctx.decode_bytes(&le_bytes(r_type(OP, 5, 0, 6, 7, 0), 4)).unwrap();
    assert_eq!((info.mnemonic(), len), ("add", 4));

    // c.li a0, 0 followed by the start of another instruction.
    let (info, len) = tc.ctx.decode_bytes(&[0x01, 0x45, 0x13, 0x05]).unwrap();
    assert_eq!((info.mnemonic(), len), ("c.li", 2));
}

#[test]
fn decode_bytes_rejects_truncated_input() {
    let mut tc = TestContext::new();
    assert_eq!(
        tc.ctx.decode_bytes(&[0xB3, 0x02]).unwrap_err(),
        DecodeError::TruncatedInput {
            needed: 4,
            available: 2,
        }
    );
    assert_eq!(
        tc.ctx.decode_bytes(&[]).unwrap_err(),
        DecodeError::TruncatedInput {
            needed: 2,
            available: 0,
        }
    );
    assert_eq!(
        tc.ctx.decode_bytes(&[0x01]).unwrap_err(),
        DecodeError::TruncatedInput {
            needed: 2,
            available: 1,
        }
    );
}

// ══════════════════════════════════════════════════════════
// 4. Route inspection
// ══════════════════════════════════════════════════════════

#[test]
fn route_names_every_level() {
    let tc = TestContext::new();
    let path = tc.ctx.route(r_type(OP, 5, 0, 6, 7, 0));
    assert_eq!(
        path,
        vec![
            "root",
            "root/quadrant=3",
            "root/quadrant=3/major=12",
            "root/quadrant=3/major=12/funct3=0",
            "root/quadrant=3/major=12/funct3=0/0x0",
        ]
    );
}

#[test]
fn route_of_compressed_opcode_stays_in_its_quadrant() {
    let tc = TestContext::new();
    let path = tc.ctx.route(0x4501);
    assert_eq!(path.first().map(String::as_str), Some("root"));
    assert!(path[1].ends_with("quadrant=1"), "got {path:?}");
}
