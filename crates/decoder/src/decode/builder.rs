//! Decode table construction.
//!
//! The builder owns the trie while it is being populated. Each instruction
//! goes through the same steps:
//! 1. **Extractor:** The canonical instance for the tag is created once.
//! 2. **Specialization:** The pinned fields (opcode fields, minus ignored
//!    ones, plus named special-case fields) produce a [`FixedFields`]; one
//!    specialized extractor is shared per (tag, fixed fields).
//! 3. **Binding:** The mnemonic gets a uid and a leaf with an empty stash.
//! 4. **Routing:** The leaf is routed from the root down to a special-case node.
//!
//! Overlays are attached afterwards to the leaf their match value routes to.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use super::layout::{self, NodeShape};
use super::leaf::Leaf;
use super::node::{NodeRef, TableEntry};
use super::overlay::Overlay;
use super::uid::UidAllocator;
use crate::catalog::{InstDef, OverlayDef};
use crate::common::Opcode;
use crate::common::error::BuildError;
use crate::config::StashConfig;
use crate::isa::extract::{ExtractorRef, registry};
use crate::isa::form::{self, FixedFields, Form};
use crate::isa::info::InstructionBinding;
use crate::isa::metadata::{MetadataRef, StaticMetadata};

/// A finished trie with its uid table.
#[derive(Debug)]
pub struct DecodeTable {
    pub(crate) root: NodeRef,
    pub(crate) uids: UidAllocator,
    pub(crate) instructions: usize,
    pub(crate) overlays: usize,
}

impl DecodeTable {
    /// Number of real instructions.
    pub const fn instruction_count(&self) -> usize {
        self.instructions
    }

    /// Number of pseudo-instruction overlays.
    pub const fn overlay_count(&self) -> usize {
        self.overlays
    }
}

/// Populates a decode trie.
#[derive(Debug)]
pub struct DecodeTableBuilder {
    stash: StashConfig,
    root: NodeRef,
    uids: UidAllocator,
    canonical: HashMap<&'static str, ExtractorRef>,
    specialized: HashMap<(&'static str, FixedFields), ExtractorRef>,
    instructions: HashSet<Arc<str>>,
    overlays: HashSet<Arc<str>>,
}

impl DecodeTableBuilder {
    /// Creates a builder over the standard RISC-V skeleton.
    ///
    /// # Arguments
    ///
    /// * `stash` - Stash layer sizes of every leaf.
    pub fn new(stash: StashConfig) -> Self {
        Self::with_layout(&layout::standard(), stash)
    }

    /// Creates a builder over a custom skeleton.
    pub fn with_layout(shape: &NodeShape, stash: StashConfig) -> Self {
        Self {
            stash,
            root: shape.instantiate("root".to_owned()),
            uids: UidAllocator::new(),
            canonical: HashMap::new(),
            specialized: HashMap::new(),
            instructions: HashSet::new(),
            overlays: HashSet::new(),
        }
    }

    /// Returns `true` if `mnemonic` is a real instruction of the table.
    pub fn contains(&self, mnemonic: &str) -> bool {
        self.instructions.contains(mnemonic)
    }

    fn is_defined(&self, mnemonic: &str) -> bool {
        self.instructions.contains(mnemonic) || self.overlays.contains(mnemonic)
    }

    /// The unspecialized extractor registered under `tag`.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownExtractor`] for an unregistered tag.
    pub fn extractor(&mut self, tag: &str) -> Result<ExtractorRef, BuildError> {
        if let Some(ext) = self.canonical.get(tag) {
            return Ok(Arc::clone(ext));
        }
        let ext = registry::create(tag, FixedFields::NONE)?;
        let _ = self.canonical.insert(ext.tag(), Arc::clone(&ext));
        Ok(ext)
    }

    fn specialize(&mut self, canonical: &ExtractorRef, fixed: FixedFields) -> ExtractorRef {
        let shared = self
            .specialized
            .entry((canonical.tag(), fixed))
            .or_insert_with(|| canonical.special_case_clone(fixed));
        Arc::clone(shared)
    }

    /// Pins the opcode fields of `form` plus the fields called `names`.
    fn pin(form: &Form, names: &[&str], ignore: &[&str]) -> Result<FixedFields, BuildError> {
        let ignored = ignore
            .iter()
            .map(|name| form.require_field(name))
            .collect::<Result<Vec<_>, _>>()?;
        let mut indices: Vec<usize> = form
            .opcode_fields()
            .iter()
            .copied()
            .filter(|idx| !ignored.contains(idx))
            .collect();
        for name in names {
            indices.push(form.require_field(name)?);
        }
        Ok(FixedFields::from_indices(form, indices))
    }

    /// Adds an instruction whose extractor is `tag` specialized to the form's
    /// opcode fields plus `fixed_fields`.
    ///
    /// # Errors
    ///
    /// Fails for an unknown tag or field name, a duplicate mnemonic, an
    /// encoding alias or an unroutable entry.
    pub fn add_special_case(
        &mut self,
        tag: &str,
        mnemonic: &str,
        stencil: Opcode,
        fixed_fields: &[&str],
        metadata: MetadataRef,
    ) -> Result<u32, BuildError> {
        let canonical = self.extractor(tag)?;
        let fixed = Self::pin(canonical.form(), fixed_fields, &[])?;
        let ext = self.specialize(&canonical, fixed);
        self.add_entry(mnemonic, stencil, ext, metadata)
    }

    /// Adds an instruction bound to an already specialized extractor.
    ///
    /// The entry's mask and specificity come from the extractor's fixed fields.
    ///
    /// # Returns
    ///
    /// The uid allocated to `mnemonic`.
    ///
    /// # Errors
    ///
    /// [`BuildError::DuplicateMnemonic`], [`BuildError::OpcodeAlias`] or
    /// [`BuildError::UnroutableEntry`].
    pub fn add_entry(
        &mut self,
        mnemonic: &str,
        stencil: Opcode,
        extractor: ExtractorRef,
        metadata: MetadataRef,
    ) -> Result<u32, BuildError> {
        if self.is_defined(mnemonic) {
            return Err(BuildError::DuplicateMnemonic(mnemonic.to_owned()));
        }
        let fixed = extractor.fixed();
        let mask = fixed.mask();
        let value = stencil & mask;
        let (uid, name) = self.uids.allocate(mnemonic);
        debug!(
            mnemonic,
            uid,
            extractor = extractor.tag(),
            mask = format_args!("{mask:#010x}"),
            value = format_args!("{value:#010x}"),
            "adding instruction"
        );
        let binding = InstructionBinding {
            mnemonic: Arc::clone(&name),
            uid,
            extractor,
            metadata,
            annotation: None,
        };
        self.root.add_entry(TableEntry {
            mask,
            value,
            specificity: fixed.specificity(),
            leaf: Leaf::new(binding, self.stash),
        })?;
        let _ = self.instructions.insert(name);
        Ok(uid)
    }

    /// Adds a catalogue instruction.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownForm`] when the form does not exist or the
    /// extractor belongs to another form, plus every error of
    /// [`add_entry`](Self::add_entry).
    pub fn add_instruction(&mut self, def: &InstDef) -> Result<u32, BuildError> {
        let form = form::lookup(def.form).ok_or_else(|| BuildError::UnknownForm(def.form.to_owned()))?;
        let canonical = self.extractor(def.tag())?;
        if canonical.form().name() != form.name() {
            return Err(BuildError::UnknownForm(format!(
                "{} (extractor `{}` decodes form `{}`)",
                def.form,
                canonical.tag(),
                canonical.form().name()
            )));
        }
        let fixed = Self::pin(form, def.fixed, def.ignore)?;
        let ext = self.specialize(&canonical, fixed);
        self.add_entry(def.mnemonic, def.stencil, ext, StaticMetadata::shared(def.meta))
    }

    /// Attaches a pseudo-instruction to the leaf its encoding routes to.
    ///
    /// # Errors
    ///
    /// [`BuildError::MissingOverlayBase`] when the base is not in the table
    /// or nothing routes the overlay's value, and
    /// [`BuildError::DuplicateMnemonic`] for a reused mnemonic.
    pub fn add_overlay(&mut self, def: &OverlayDef) -> Result<u32, BuildError> {
        let missing = || BuildError::MissingOverlayBase {
            overlay: def.mnemonic.to_owned(),
            base: def.base.to_owned(),
        };
        if !self.contains(def.base) {
            return Err(missing());
        }
        if self.is_defined(def.mnemonic) {
            return Err(BuildError::DuplicateMnemonic(def.mnemonic.to_owned()));
        }
        let canonical = self.extractor(def.tag)?;
        let fixed = Self::pin(canonical.form(), def.fixed, &[])?;
        let extractor = self.specialize(&canonical, fixed);
        let mask = fixed.mask();
        let value = def.stencil & mask;

        let Some(leaf) = self.root.leaf_mut(value) else {
            return Err(missing());
        };
        if leaf.mnemonic() != def.base {
            warn!(
                overlay = def.mnemonic,
                base = def.base,
                leaf = leaf.mnemonic(),
                "overlay routed to a different instruction; it will never apply"
            );
        }
        let (_, base) = self.uids.allocate(def.base);
        let (uid, name) = self.uids.allocate(def.mnemonic);
        debug!(
            overlay = def.mnemonic,
            base = def.base,
            uid,
            mask = format_args!("{mask:#010x}"),
            value = format_args!("{value:#010x}"),
            "adding overlay"
        );
        leaf.add_overlay(Overlay {
            mask,
            value,
            base,
            binding: InstructionBinding {
                mnemonic: Arc::clone(&name),
                uid,
                extractor,
                metadata: StaticMetadata::shared(def.meta),
                annotation: None,
            },
        });
        let _ = self.overlays.insert(name);
        Ok(uid)
    }

    /// Finishes the table.
    pub fn build(self) -> DecodeTable {
        debug!(
            instructions = self.instructions.len(),
            overlays = self.overlays.len(),
            extractors = self.specialized.len(),
            "decode table built"
        );
        DecodeTable {
            root: self.root,
            uids: self.uids,
            instructions: self.instructions.len(),
            overlays: self.overlays.len(),
        }
    }
}
