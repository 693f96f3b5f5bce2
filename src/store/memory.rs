//! # In-Memory Collections
//!
//! `RwLock`-guarded map backend for [`DocumentStore`].

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::document::{Document, DocumentStore};
use super::errors::{StoreError, StoreResult};

/// In-memory collection
#[derive(Debug)]
pub struct InMemoryCollection<D: Document> {
    docs: RwLock<HashMap<Uuid, D>>,
}

impl<D: Document> Default for InMemoryCollection<D> {
    fn default() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
        }
    }
}

impl<D: Document> InMemoryCollection<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<Uuid, D>>> {
        self.docs
            .read()
            .map_err(|_| StoreError::LockPoisoned(D::COLLECTION))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<Uuid, D>>> {
        self.docs
            .write()
            .map_err(|_| StoreError::LockPoisoned(D::COLLECTION))
    }
}

impl<D: Document> DocumentStore<D> for InMemoryCollection<D> {
    fn insert(&self, doc: D) -> StoreResult<D> {
        self.insert_unique(doc, &|_, _| false)
    }

    fn insert_unique(&self, doc: D, conflicts: &dyn Fn(&D, &D) -> bool) -> StoreResult<D> {
        let mut docs = self.write()?;

        let id = doc.id();
        if docs.contains_key(&id) {
            return Err(StoreError::IdTaken {
                collection: D::COLLECTION,
                id,
            });
        }
        if docs.values().any(|existing| conflicts(existing, &doc)) {
            return Err(StoreError::Duplicate(D::COLLECTION));
        }

        docs.insert(id, doc.clone());
        Ok(doc)
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<D>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn find(&self, filter: &dyn Fn(&D) -> bool) -> StoreResult<Vec<D>> {
        Ok(self
            .read()?
            .values()
            .filter(|doc| filter(doc))
            .cloned()
            .collect())
    }

    fn update(&self, id: Uuid, mutate: &mut dyn FnMut(&mut D) -> bool) -> StoreResult<Option<D>> {
        let mut docs = self.write()?;

        let Some(stored) = docs.get_mut(&id) else {
            return Ok(None);
        };

        let mut draft = stored.clone();
        if mutate(&mut draft) {
            *stored = draft;
        }
        Ok(Some(stored.clone()))
    }

    fn remove(&self, id: Uuid) -> StoreResult<Option<D>> {
        Ok(self.write()?.remove(&id))
    }

    fn remove_where(&self, filter: &dyn Fn(&D) -> bool) -> StoreResult<Vec<D>> {
        let mut docs = self.write()?;

        let ids: Vec<Uuid> = docs
            .iter()
            .filter(|(_, doc)| filter(doc))
            .map(|(id, _)| *id)
            .collect();

        Ok(ids.into_iter().filter_map(|id| docs.remove(&id)).collect())
    }
}
