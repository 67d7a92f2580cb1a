//! Metadata and Annotation Reload.
//!
//! Verifies that rebinding a mnemonic replaces what later decodes report and
//! that cached results from before the reload are not served again.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rvdecode_core::common::RegisterMaskExt;
use rvdecode_core::isa::metadata::{Annotation, AnnotationRef, InstructionType as T, TagAnnotation};
use rvdecode_core::isa::operand::OperandType;
use rvdecode_core::{Opcode, RegisterMask};

use crate::common::encode::{OP_IMM, i_type};
use crate::common::harness::TestContext;
use crate::common::mocks::{shared, uniform_metadata};

const ADD: Opcode = 0x0073_02B3;

fn regs(list: &[u32]) -> RegisterMask {
    list.iter().fold(0, |m, &r| m | RegisterMask::of(r))
}

#[test]
fn annotation_is_attached_and_removed() {
    let mut tc = TestContext::new();
    assert!(tc.decode(ADD).annotation().is_none());

    let tags: AnnotationRef = Arc::new(TagAnnotation::new(["alu", "single-cycle"]));
    assert!(tc.ctx.reload_annotation("add", Some(tags)));

    let info = tc.decode(ADD);
    let annotation = info.annotation().expect("annotation after reload");
    assert!(annotation.has_tag("alu"));
    assert!(!annotation.has_tag("mul"));
    assert_eq!(annotation.tags().len(), 2);

    assert!(tc.ctx.reload_annotation("add", None));
    assert!(tc.decode(ADD).annotation().is_none());
}

#[test]
fn unknown_mnemonic_is_reported() {
    let mut tc = TestContext::new();
    let before = tc.decode(ADD);
    assert!(!tc.ctx.reload_annotation("nosuch", None));
    assert!(!tc.ctx.reload_metadata("nosuch", shared(uniform_metadata(OperandType::Long, &[]))));
    // Nothing was flushed.
    assert!(Arc::ptr_eq(&before, &tc.decode(ADD)));
}

#[test]
fn reload_drops_cached_results() {
    let mut tc = TestContext::new();
    let before = tc.decode(ADD);
    assert!(Arc::ptr_eq(&before, &tc.decode(ADD)));

    assert!(tc.ctx.reload_annotation("add", Some(Arc::new(TagAnnotation::new(["alu"])))));
    let after = tc.decode(ADD);
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(before.annotation().is_none(), "earlier results are immutable");
    assert!(after.annotation().is_some());
}

#[test]
fn metadata_reload_changes_register_classes() {
    let mut tc = TestContext::new();
    assert_eq!(tc.decode(ADD).int_source_regs(), regs(&[6, 7]));

    let float = shared(uniform_metadata(OperandType::Single, &[T::Float]));
    assert!(format!("{float:?}").starts_with("MockMetadata"));
    assert!(tc.ctx.reload_metadata("add", Arc::clone(&float)));

    let info = tc.decode(ADD);
    assert_eq!(info.int_source_regs(), 0);
    assert_eq!(info.float_source_regs(), regs(&[6, 7]));
    assert_eq!(info.float_dest_regs(), regs(&[5]));
    assert!(info.is_inst_type(T::Float));
    assert!(!info.is_inst_type(T::Int));
    assert_eq!(tc.dasm(ADD), "add f5, f6, f7");
}

#[test]
fn overlay_mnemonics_can_be_reloaded() {
    let mut tc = TestContext::new();
    let mv = i_type(OP_IMM, 10, 0, 11, 0);
    let addi = i_type(OP_IMM, 10, 0, 11, 5);

    assert!(tc.ctx.reload_annotation("mv", Some(Arc::new(TagAnnotation::new(["move-elim"])))));

    let info = tc.decode(mv);
    assert_eq!(info.mnemonic(), "mv");
    assert!(info.annotation().is_some_and(|a| a.has_tag("move-elim")));
    // The base instruction keeps its own binding.
    assert!(tc.decode(addi).annotation().is_none());
}
