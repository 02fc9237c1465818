use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::library::Library;
use crate::types::identifiers::LibraryName;

/// Name-keyed collection of libraries.
///
/// Every mutation is a single insert or remove under the write lock, so
/// readers never observe a half-built library. Iteration order is ascending
/// by name.
#[derive(Debug, Default)]
pub struct LibraryStore {
    libraries: RwLock<BTreeMap<LibraryName, Arc<Library>>>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace wholesale. Returns the library that was replaced, if any.
    pub fn save(&self, library: Library) -> Option<Arc<Library>> {
        let mut guard = self.libraries.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(library.name.clone(), Arc::new(library))
    }

    pub fn get(&self, name: &LibraryName) -> Option<Arc<Library>> {
        let guard = self.libraries.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(name).cloned()
    }

    /// Remove `name`. Returns whether anything was removed.
    pub fn delete(&self, name: &LibraryName) -> bool {
        let mut guard = self.libraries.write().unwrap_or_else(PoisonError::into_inner);
        guard.remove(name).is_some()
    }

    pub fn list(&self) -> Vec<Arc<Library>> {
        let guard = self.libraries.read().unwrap_or_else(PoisonError::into_inner);
        guard.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.libraries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
