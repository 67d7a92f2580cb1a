//! Per-context unique id allocation.

use std::collections::HashMap;
use std::sync::Arc;

/// Hands out dense ids to mnemonics in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct UidAllocator {
    ids: HashMap<Arc<str>, u32>,
    names: Vec<Arc<str>>,
}

impl UidAllocator {
    /// Creates an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `name`, allocating the next one on first use.
    ///
    /// The interned name is returned alongside so bindings can share it.
    pub fn allocate(&mut self, name: &str) -> (u32, Arc<str>) {
        if let Some((interned, &uid)) = self.ids.get_key_value(name) {
            return (uid, Arc::clone(interned));
        }
        let uid = self.names.len() as u32;
        let interned: Arc<str> = Arc::from(name);
        self.names.push(Arc::clone(&interned));
        let _ = self.ids.insert(Arc::clone(&interned), uid);
        (uid, interned)
    }

    /// Id of `name`, if allocated.
    pub fn uid(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// Name behind `uid`, if allocated.
    pub fn mnemonic(&self, uid: u32) -> Option<&str> {
        self.names.get(uid as usize).map(AsRef::as_ref)
    }

    /// Number of allocated ids.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no id was allocated.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
