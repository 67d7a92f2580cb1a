//! Decode context: the public entry point owning one trie.
//!
//! A [`DecodeContext`] is built from a [`DecoderConfig`] and holds every
//! piece of mutable decode state (the per-leaf stashes). Decoding therefore
//! takes `&mut self`; share work across threads by building one context per
//! thread.

use std::sync::Arc;

use tracing::{debug, info};

use super::builder::{DecodeTable, DecodeTableBuilder};
use super::node::{DecodeNode, NodeRef};
use super::stash::StashStats;
use super::uid::UidAllocator;
use crate::catalog;
use crate::common::Opcode;
use crate::common::constants::{COMPRESSED_OPCODE_MASK, STANDARD_OPCODE_MASK, STANDARD_QUADRANT};
use crate::common::error::{BuildError, DecodeError};
use crate::config::DecoderConfig;
use crate::isa::abi;
use crate::isa::info::{DecodedInstructionInfo, InstructionBinding};
use crate::isa::metadata::{AnnotationRef, MetadataRef};

/// Length in bytes of the instruction starting with `opcode`'s low bits.
pub const fn instruction_length(opcode: Opcode) -> usize {
    if opcode & STANDARD_QUADRANT == STANDARD_QUADRANT {
        4
    } else {
        2
    }
}

/// Drops the bits above the encoded instruction length.
pub const fn truncate(opcode: Opcode) -> Opcode {
    if opcode & STANDARD_QUADRANT == STANDARD_QUADRANT {
        opcode & STANDARD_OPCODE_MASK
    } else {
        opcode & COMPRESSED_OPCODE_MASK
    }
}

/// Owns a decode trie, its uid table and its caches.
#[derive(Debug)]
pub struct DecodeContext {
    config: DecoderConfig,
    root: NodeRef,
    uids: UidAllocator,
    instructions: usize,
    overlays: usize,
}

impl DecodeContext {
    /// Builds the built-in catalogue for `config`.
    ///
    /// # Errors
    ///
    /// [`BuildError::InvalidConfig`] for an inconsistent configuration, or any
    /// error raised while installing the catalogue.
    pub fn new(config: DecoderConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let mut builder = DecodeTableBuilder::new(config.stash);
        catalog::install(&mut builder, &config.isa)?;
        let ctx = Self::from_table(builder.build(), config);
        info!(
            xlen = ctx.config.isa.xlen.bits(),
            extensions = ctx.config.isa.extensions.len(),
            instructions = ctx.instructions,
            overlays = ctx.overlays,
            "decode context ready"
        );
        Ok(ctx)
    }

    /// Wraps a table built elsewhere.
    pub fn from_table(table: DecodeTable, config: DecoderConfig) -> Self {
        let DecodeTable {
            root,
            uids,
            instructions,
            overlays,
        } = table;
        Self {
            config,
            root,
            uids,
            instructions,
            overlays,
        }
    }

    /// Configuration the context was built with.
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes one opcode. Bits above the encoded length are ignored.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnknownOpcode`] when no instruction matches,
    /// [`DecodeError::IllegalOpcode`] for a reserved encoding.
    pub fn decode(&mut self, opcode: Opcode) -> Result<Arc<DecodedInstructionInfo>, DecodeError> {
        self.root.get_info(truncate(opcode))
    }

    /// Decodes the instruction at the start of a little-endian byte stream.
    ///
    /// # Returns
    ///
    /// The decoded info and the number of bytes consumed (2 or 4).
    ///
    /// # Errors
    ///
    /// [`DecodeError::TruncatedInput`] when the stream ends inside the
    /// instruction, plus every error of [`decode`](Self::decode).
    pub fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Arc<DecodedInstructionInfo>, usize), DecodeError> {
        let needed = match bytes {
            [first, ..] => instruction_length(Opcode::from(*first)),
            [] => 2,
        };
        let Some(encoding) = bytes.get(..needed) else {
            return Err(DecodeError::TruncatedInput {
                needed,
                available: bytes.len(),
            });
        };
        let opcode = encoding
            .iter()
            .rev()
            .fold(0, |acc: Opcode, &b| (acc << 8) | Opcode::from(b));
        Ok((self.decode(opcode)?, needed))
    }

    /// Disassembles one opcode, with ABI register names when
    /// `disasm.abi_names` is set.
    ///
    /// # Errors
    ///
    /// Every error of [`decode`](Self::decode).
    pub fn disassemble(&mut self, opcode: Opcode) -> Result<String, DecodeError> {
        let text = self.decode(opcode)?.dasm();
        Ok(if self.config.disasm.abi_names {
            abi::rename_registers(&text)
        } else {
            text
        })
    }

    /// Node names along the decode path of `opcode`, root first.
    ///
    /// Keyed children are preferred over defaults, so the path shows where the
    /// first lookup goes.
    pub fn route(&self, opcode: Opcode) -> Vec<String> {
        let opcode = truncate(opcode);
        let mut node: &dyn DecodeNode = self.root.as_ref();
        let mut path = vec![node.name().to_owned()];
        while let Some(next) = node.get_node(opcode) {
            path.push(next.name().to_owned());
            node = next;
        }
        path
    }

    /// Empties every stash.
    pub fn flush_caches(&mut self) {
        debug!("flushing decode caches");
        self.root.flush_caches();
    }

    fn rebind(&mut self, mnemonic: &str, update: &dyn Fn(&mut InstructionBinding)) -> bool {
        let mut found = false;
        self.root.for_each_leaf_mut(&mut |leaf| {
            if leaf.mnemonic() == mnemonic {
                update(leaf.binding_mut());
                found = true;
            }
            for overlay in leaf.overlays_mut() {
                if &*overlay.binding.mnemonic == mnemonic {
                    update(&mut overlay.binding);
                    found = true;
                }
            }
        });
        if found {
            self.flush_caches();
        }
        found
    }

    /// Replaces the metadata of `mnemonic` (instruction or overlay) and
    /// flushes every cache.
    ///
    /// # Returns
    ///
    /// `false` if no instruction or overlay has that mnemonic.
    pub fn reload_metadata(&mut self, mnemonic: &str, metadata: MetadataRef) -> bool {
        self.rebind(mnemonic, &|binding: &mut InstructionBinding| {
            binding.metadata = Arc::clone(&metadata);
        })
    }

    /// Replaces the annotation of `mnemonic` and flushes every cache.
    ///
    /// # Returns
    ///
    /// `false` if no instruction or overlay has that mnemonic.
    pub fn reload_annotation(&mut self, mnemonic: &str, annotation: Option<AnnotationRef>) -> bool {
        self.rebind(mnemonic, &|binding: &mut InstructionBinding| {
            binding.annotation.clone_from(&annotation);
        })
    }

    /// Uid of `mnemonic`.
    pub fn uid(&self, mnemonic: &str) -> Option<u32> {
        self.uids.uid(mnemonic)
    }

    /// Mnemonic behind `uid`.
    pub fn mnemonic(&self, uid: u32) -> Option<&str> {
        self.uids.mnemonic(uid)
    }

    /// Stash counters summed over every leaf.
    pub fn stash_stats(&self) -> StashStats {
        let mut total = StashStats::default();
        self.root.for_each_leaf(&mut |leaf| total += leaf.stash_stats());
        total
    }

    /// Number of real instructions.
    pub const fn instruction_count(&self) -> usize {
        self.instructions
    }

    /// Number of pseudo-instruction overlays.
    pub const fn overlay_count(&self) -> usize {
        self.overlays
    }
}
