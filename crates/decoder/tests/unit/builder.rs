//! Decode Table Construction.
//!
//! Verifies the build-time errors of [`DecodeTableBuilder`] and the uid
//! table it hands to the context.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvdecode_core::BuildError;
use rvdecode_core::catalog::opcode::{LUI, OP_IMM};
use rvdecode_core::catalog::{InstDef, OverlayDef, enc};
use rvdecode_core::config::StashConfig;
use rvdecode_core::decode::builder::DecodeTableBuilder;
use rvdecode_core::decode::layout::{NodeShape, SlotShapes};
use rvdecode_core::isa::field::Field;
use rvdecode_core::isa::metadata::{InstructionType as T, MetaSpec, StaticMetadata};

use crate::common::harness::{TestContext, def, init_tracing};

const META: MetaSpec = MetaSpec::int(&[T::Int]);

fn builder() -> DecodeTableBuilder {
    init_tracing();
    DecodeTableBuilder::new(StashConfig::default())
}

// ══════════════════════════════════════════════════════════
// 1. Rejected entries
// ══════════════════════════════════════════════════════════

#[test]
fn identical_encoding_is_an_alias() {
    let mut b = builder();
    let _ = b.add_instruction(def("addi")).unwrap();
    let err = b
        .add_special_case("I_arith", "addi2", enc(OP_IMM, 0), &[], StaticMetadata::shared(META))
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::OpcodeAlias {
            mnemonic: "addi2".into(),
            existing: "addi".into(),
            mask: 0x707F,
            value: 0x13,
        }
    );
}

#[test]
fn mnemonic_cannot_be_added_twice() {
    let mut b = builder();
    let _ = b.add_instruction(def("addi")).unwrap();
    assert_eq!(
        b.add_instruction(def("addi")).unwrap_err(),
        BuildError::DuplicateMnemonic("addi".into())
    );
}

#[test]
fn overlay_requires_its_base() {
    let mut b = builder();
    let mv = OverlayDef {
        mnemonic: "mv",
        base: "addi",
        tag: "I_arith",
        stencil: OP_IMM,
        fixed: &["imm"],
        meta: META,
    };
    assert_eq!(
        b.add_overlay(&mv).unwrap_err(),
        BuildError::MissingOverlayBase {
            overlay: "mv".into(),
            base: "addi".into(),
        }
    );
    let _ = b.add_instruction(def("addi")).unwrap();
    assert!(b.add_overlay(&mv).is_ok());
}

#[test]
fn overlay_mnemonic_collides_with_instruction() {
    let mut b = builder();
    let _ = b.add_instruction(def("addi")).unwrap();
    let _ = b.add_instruction(def("xori")).unwrap();
    let shadow = OverlayDef {
        mnemonic: "xori",
        base: "addi",
        tag: "I_arith",
        stencil: OP_IMM,
        fixed: &["imm"],
        meta: META,
    };
    assert_eq!(
        b.add_overlay(&shadow).unwrap_err(),
        BuildError::DuplicateMnemonic("xori".into())
    );
}

#[rstest]
#[case::unknown_tag("NOPE", &[], BuildError::UnknownExtractor("NOPE".into()))]
#[case::unknown_field("I", &["shamt"], BuildError::UnknownField { form: "I", field: "shamt".into() })]
fn special_case_arguments_are_checked(
    #[case] tag: &str,
    #[case] fixed: &[&str],
    #[case] expected: BuildError,
) {
    let mut b = builder();
    let err = b
        .add_special_case(tag, "custom", enc(OP_IMM, 0), fixed, StaticMetadata::shared(META))
        .unwrap_err();
    assert_eq!(err, expected);
}

#[test]
fn unknown_form_is_rejected() {
    let mut b = builder();
    let bogus = InstDef {
        form: "Q9",
        ..*def("addi")
    };
    assert_eq!(
        b.add_instruction(&bogus).unwrap_err(),
        BuildError::UnknownForm("Q9".into())
    );
}

#[test]
fn dense_node_without_default_rejects_free_key() {
    init_tracing();
    let shape = NodeShape::dense(
        Field::new("funct3", 12, 3),
        SlotShapes::Uniform(Box::new(NodeShape::SpecialCase)),
    );
    let mut b = DecodeTableBuilder::with_layout(&shape, StashConfig::new(4, 8));
    // U-type leaves funct3 free.
    let err = b
        .add_special_case("U", "lui", LUI, &[], StaticMetadata::shared(META))
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::UnroutableEntry {
            mnemonic: "lui".into(),
            node: "root".into(),
        }
    );
}

#[test]
fn errors_render_their_subject() {
    let err = BuildError::MissingOverlayBase {
        overlay: "mv".into(),
        base: "addi".into(),
    };
    assert_eq!(err.to_string(), "overlay `mv` requires base instruction `addi`");
}

// ══════════════════════════════════════════════════════════
// 2. Uids
// ══════════════════════════════════════════════════════════

#[test]
fn uids_round_trip_through_the_context() {
    let tc = TestContext::new();
    for mnemonic in ["add", "addi", "lw", "vadd.vv", "mv", "ret"] {
        let uid = tc.ctx.uid(mnemonic).unwrap_or_else(|| panic!("no uid for {mnemonic}"));
        assert_eq!(tc.ctx.mnemonic(uid), Some(mnemonic));
    }
    assert_eq!(tc.ctx.uid("nosuch"), None);
}

#[test]
fn overlays_get_their_own_uid() {
    let mut tc = TestContext::new();
    let addi = tc.ctx.uid("addi").unwrap();
    let mv = tc.ctx.uid("mv").unwrap();
    assert_ne!(addi, mv);

    // addi x10, x11, 0
    let info = tc.decode(0x0005_8513);
    assert_eq!(info.mnemonic(), "mv");
    assert_eq!(info.uid(), mv);
}

#[test]
fn builder_returns_allocated_uids() {
    let mut b = builder();
    let addi = b.add_instruction(def("addi")).unwrap();
    let xori = b.add_instruction(def("xori")).unwrap();
    assert_ne!(addi, xori);
    assert!(b.contains("addi"));
    assert!(!b.contains("ori"));
}

#[test]
fn counts_cover_instructions_and_overlays() {
    let tc = TestContext::new();
    assert!(tc.ctx.instruction_count() > 200, "got {}", tc.ctx.instruction_count());
    assert!(tc.ctx.overlay_count() >= 10, "got {}", tc.ctx.overlay_count());
}
