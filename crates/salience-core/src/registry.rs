//! Tracked-item storage

use crate::types::TrackedItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The set of tracked items and their current scores/metadata.
///
/// Storage only; all scoring behavior lives in the [`Scorer`], which owns
/// exactly one `Registry` for its lifetime. Serializable so a host can
/// snapshot it at process boundaries.
///
/// [`Scorer`]: crate::Scorer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    items: HashMap<String, TrackedItem>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&TrackedItem> {
        self.items.get(path)
    }

    pub(crate) fn get_mut(&mut self, path: &str) -> Option<&mut TrackedItem> {
        self.items.get_mut(path)
    }

    pub(crate) fn insert(&mut self, path: String, item: TrackedItem) {
        self.items.insert(path, item);
    }

    pub(crate) fn remove(&mut self, path: &str) -> Option<TrackedItem> {
        self.items.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.items.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TrackedItem)> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut TrackedItem)> {
        self.items.iter_mut()
    }
}
