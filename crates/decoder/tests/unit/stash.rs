//! Per-Leaf Stash Behavior.
//!
//! Verifies the MRU / direct-mapped / overflow lookup order, that repeated
//! decodes share one info, and that cached and fresh decodes agree.

use std::cell::RefCell;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::test_runner::TestRunner;
use rvdecode_core::config::{DecoderConfig, StashConfig};
use rvdecode_core::decode::stash::StashStats;

use crate::common::encode::{OP, OP_IMM, i_type, r_type};
use crate::common::harness::TestContext;

/// `add x5, x6, x7`: direct slot 8 of a 16-slot stash.
fn add_a() -> u64 {
    r_type(OP, 5, 0, 6, 7, 0)
}

/// `add x5, x6, x8`: direct slot 7.
fn add_b() -> u64 {
    r_type(OP, 5, 0, 6, 8, 0)
}

/// `add x4, x6, x6`: direct slot 8, colliding with [`add_a`].
fn add_c() -> u64 {
    r_type(OP, 4, 0, 6, 6, 0)
}

// ══════════════════════════════════════════════════════════
// 1. Lookup order
// ══════════════════════════════════════════════════════════

#[test]
fn repeated_opcode_hits_mru_and_shares_info() {
    let mut tc = TestContext::new();
    let first = tc.decode(add_a());
    let second = tc.decode(add_a());
    assert!(Arc::ptr_eq(&first, &second), "second decode should come from the stash");
    assert_eq!(
        tc.ctx.stash_stats(),
        StashStats {
            mru_hits: 1,
            misses: 1,
            ..StashStats::default()
        }
    );
}

#[test]
fn displaced_mru_is_found_in_direct_table() {
    let mut tc = TestContext::new();
    assert_eq!(tc.ctx.config().stash.direct_slots, 16);
    let a = tc.decode(add_a());
    let _ = tc.decode(add_b());
    let again = tc.decode(add_a());

    assert!(Arc::ptr_eq(&a, &again));
    assert_eq!(
        tc.ctx.stash_stats(),
        StashStats {
            direct_hits: 1,
            misses: 2,
            ..StashStats::default()
        }
    );
}

#[test]
fn direct_collision_falls_through_to_overflow() {
    let mut tc = TestContext::new();
    let a = tc.decode(add_a());
    let _ = tc.decode(add_c());
    let again = tc.decode(add_a());

    assert!(Arc::ptr_eq(&a, &again));
    let stats = tc.ctx.stash_stats();
    assert_eq!(stats.overflow_hits, 1, "{stats:?}");
    assert_eq!(stats.hits(), 1);
    assert_eq!(stats.lookups(), 3);
}

#[test]
fn flush_forces_a_fresh_info() {
    let mut tc = TestContext::new();
    let before = tc.decode(add_a());
    tc.ctx.flush_caches();
    let after = tc.decode(add_a());

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.dasm(), after.dasm());
    assert_eq!(tc.ctx.stash_stats().misses, 2, "counters survive a flush");
}

#[test]
fn hot_leaf_stays_bounded() {
    let mut tc = TestContext::with_config(DecoderConfig {
        stash: StashConfig::new(4, 8),
        ..DecoderConfig::default()
    });
    // 32 distinct `addi x5, x6, imm` encodings all land on one leaf.
    let first = tc.decode(i_type(OP_IMM, 5, 0, 6, 100));
    for imm in 101..132 {
        let _ = tc.decode(i_type(OP_IMM, 5, 0, 6, imm));
    }
    let stats = tc.ctx.stash_stats();
    assert_eq!(stats.misses, 32);
    assert_eq!(stats.evictions, 24, "{stats:?}");

    // The oldest encoding was evicted and is rebuilt, with identical content.
    let again = tc.decode(i_type(OP_IMM, 5, 0, 6, 100));
    assert!(!Arc::ptr_eq(&first, &again));
    assert_eq!(first.dasm(), again.dasm());

    tc.ctx.flush_caches();
    let _ = tc.decode(i_type(OP_IMM, 5, 0, 6, 131));
    assert_eq!(tc.ctx.stash_stats().misses, 34, "flush empties the bounded layers too");
}

#[test]
fn errors_are_not_cached() {
    let mut tc = TestContext::new();
    for _ in 0..3 {
        assert!(tc.try_decode(0xFFFF_FFFF).is_err());
    }
    assert_eq!(tc.ctx.stash_stats().lookups(), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Cache transparency
// ══════════════════════════════════════════════════════════

/// Comparable summary of one decode.
fn summary(tc: &mut TestContext, opcode: u64) -> Result<(String, u64, u64, u64), String> {
    tc.try_decode(opcode)
        .map(|i| (i.dasm(), i.source_regs(), i.dest_regs(), i.immediate()))
        .map_err(|e| e.to_string())
}

#[test]
fn cached_and_fresh_decodes_agree() {
    let warm = RefCell::new(TestContext::new());
    let cold = RefCell::new(TestContext::new());
    let mut runner = TestRunner::default();
    runner
        .run(&any::<u32>(), |op| {
            let op = u64::from(op);
            let mut warm = warm.borrow_mut();
            let mut cold = cold.borrow_mut();
            let first = summary(&mut warm, op);
            let cached = summary(&mut warm, op);
            cold.ctx.flush_caches();
            let fresh = summary(&mut cold, op);
            prop_assert_eq!(&first, &cached);
            prop_assert_eq!(&first, &fresh);
            Ok(())
        })
        .unwrap();
}
