//! Per-leaf extraction cache.
//!
//! A stash memoizes the [`DecodedInstructionInfo`] built for each opcode seen
//! at one leaf. Lookups search three layers in order:
//! 1. **MRU:** The most recently returned entry.
//! 2. **Direct:** A direct-mapped table indexed by the opcode bits above the
//!    quadrant, sized by `stash.direct_slots`.
//! 3. **Overflow:** A hash map of up to `stash.overflow_capacity` entries.
//!    When full, the oldest insertion is evicted (FIFO).
//!
//! A miss is filled into all three layers by the owning leaf.

use std::collections::{HashMap, VecDeque};
use std::ops::AddAssign;
use std::sync::Arc;

use tracing::trace;

use crate::common::Opcode;
use crate::config::StashConfig;
use crate::isa::info::DecodedInstructionInfo;

/// Hit and miss counters of one or more stashes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StashStats {
    /// Hits in the MRU slot.
    pub mru_hits: u64,
    /// Hits in the direct-mapped table.
    pub direct_hits: u64,
    /// Hits in the overflow map.
    pub overflow_hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries dropped from a full overflow map.
    pub evictions: u64,
}

impl StashStats {
    /// Total hits over every layer.
    pub const fn hits(&self) -> u64 {
        self.mru_hits + self.direct_hits + self.overflow_hits
    }

    /// Total lookups.
    pub const fn lookups(&self) -> u64 {
        self.hits() + self.misses
    }
}

impl AddAssign for StashStats {
    fn add_assign(&mut self, rhs: Self) {
        self.mru_hits += rhs.mru_hits;
        self.direct_hits += rhs.direct_hits;
        self.overflow_hits += rhs.overflow_hits;
        self.misses += rhs.misses;
        self.evictions += rhs.evictions;
    }
}

/// A direct-mapped slot.
#[derive(Clone, Debug)]
struct StashEntry {
    /// Full opcode used to verify the slot.
    tag: Opcode,
    info: Arc<DecodedInstructionInfo>,
}

/// Three-layer cache of decoded infos for one leaf.
#[derive(Debug)]
pub struct Stash {
    mru: Option<StashEntry>,
    direct: Vec<Option<StashEntry>>,
    overflow: HashMap<Opcode, Arc<DecodedInstructionInfo>>,
    /// Overflow keys, oldest first.
    order: VecDeque<Opcode>,
    capacity: usize,
    stats: StashStats,
}

impl Stash {
    /// Creates an empty stash.
    ///
    /// # Arguments
    ///
    /// * `config` - Layer sizes. The direct-mapped size must be a power of 2;
    ///   zero sizes are treated as one.
    pub fn new(config: StashConfig) -> Self {
        let capacity = config.overflow_capacity.max(1);
        Self {
            mru: None,
            direct: vec![None; config.direct_slots.max(1)],
            overflow: HashMap::with_capacity(capacity.min(64)),
            order: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            stats: StashStats::default(),
        }
    }

    /// Direct-mapped index of `opcode`. Every opcode at one leaf shares its
    /// major opcode bits, so the register fields are folded in.
    fn index(&self, opcode: Opcode) -> usize {
        let folded = (opcode >> 2) ^ (opcode >> 7) ^ (opcode >> 15) ^ (opcode >> 20);
        (folded as usize) & (self.direct.len() - 1)
    }

    /// Looks up `opcode`, promoting a lower-layer hit to the MRU slot.
    ///
    /// # Returns
    ///
    /// The cached info, or `None` on a miss.
    pub fn lookup(&mut self, opcode: Opcode) -> Option<Arc<DecodedInstructionInfo>> {
        if let Some(entry) = self.mru.as_ref().filter(|e| e.tag == opcode) {
            self.stats.mru_hits += 1;
            trace!(opcode = format_args!("{opcode:#x}"), layer = "mru", "stash hit");
            return Some(Arc::clone(&entry.info));
        }

        let idx = self.index(opcode);
        let direct = self.direct[idx]
            .as_ref()
            .filter(|e| e.tag == opcode)
            .map(|e| Arc::clone(&e.info));
        let (info, layer) = match direct {
            Some(info) => {
                self.stats.direct_hits += 1;
                (info, "direct")
            }
            None => match self.overflow.get(&opcode) {
                Some(info) => {
                    self.stats.overflow_hits += 1;
                    (Arc::clone(info), "overflow")
                }
                None => {
                    self.stats.misses += 1;
                    trace!(opcode = format_args!("{opcode:#x}"), "stash miss");
                    return None;
                }
            },
        };
        trace!(opcode = format_args!("{opcode:#x}"), layer, "stash hit");
        self.mru = Some(StashEntry {
            tag: opcode,
            info: Arc::clone(&info),
        });
        Some(info)
    }

    /// Fills every layer with `info`.
    pub fn insert(&mut self, opcode: Opcode, info: Arc<DecodedInstructionInfo>) {
        let idx = self.index(opcode);
        let entry = StashEntry {
            tag: opcode,
            info: Arc::clone(&info),
        };
        self.direct[idx] = Some(entry.clone());
        self.mru = Some(entry);
        if self.overflow.insert(opcode, info).is_some() {
            return;
        }
        self.order.push_back(opcode);
        while self.order.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            let _ = self.overflow.remove(&oldest);
            self.stats.evictions += 1;
            trace!(opcode = format_args!("{oldest:#x}"), "stash eviction");
        }
    }

    /// Drops every cached entry. Counters are kept.
    pub fn flush(&mut self) {
        self.mru = None;
        self.direct.iter_mut().for_each(|slot| *slot = None);
        self.overflow.clear();
        self.order.clear();
    }

    /// Number of opcodes held by the overflow map.
    pub fn len(&self) -> usize {
        self.overflow.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.overflow.is_empty()
    }

    /// Hit and miss counters.
    pub const fn stats(&self) -> StashStats {
        self.stats
    }
}
