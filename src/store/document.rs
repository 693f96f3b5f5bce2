//! # Documents and Collections
//!
//! The storage seam shared by every service. A collection holds documents of
//! one type keyed by their id.
//!
//! ## Atomicity
//! `update` is the only read-modify-write primitive. The mutation runs on a
//! copy of the stored document while the collection is locked for writing and
//! is committed only when the mutation accepts it, so a rejected or concurrent
//! update never observes or leaves a half-applied document.

use uuid::Uuid;

use super::errors::{StoreError, StoreResult};

/// A record stored in a collection
pub trait Document: Clone + Send + Sync + 'static {
    /// Collection name, used in errors and logs
    const COLLECTION: &'static str;

    /// Document identifier
    fn id(&self) -> Uuid;
}

/// Collection of documents of one type
///
/// Object-safe so services can hold `Arc<dyn DocumentStore<D>>` and tests can
/// swap the backend.
pub trait DocumentStore<D: Document>: Send + Sync {
    /// Insert a new document
    fn insert(&self, doc: D) -> StoreResult<D>;

    /// Insert a new document unless an existing one conflicts with it
    ///
    /// `conflicts(existing, candidate)` is evaluated under the same write lock
    /// as the insert.
    fn insert_unique(&self, doc: D, conflicts: &dyn Fn(&D, &D) -> bool) -> StoreResult<D>;

    /// Get a document by id
    fn get(&self, id: Uuid) -> StoreResult<Option<D>>;

    /// All documents matching the predicate, in no particular order
    fn find(&self, filter: &dyn Fn(&D) -> bool) -> StoreResult<Vec<D>>;

    /// Atomically mutate one document
    ///
    /// Returns `None` if the document does not exist, otherwise the stored
    /// document after the call. The mutation returns `false` to abandon the
    /// change.
    fn update(&self, id: Uuid, mutate: &mut dyn FnMut(&mut D) -> bool) -> StoreResult<Option<D>>;

    /// Remove a document by id
    fn remove(&self, id: Uuid) -> StoreResult<Option<D>>;

    /// Remove every document matching the predicate
    fn remove_where(&self, filter: &dyn Fn(&D) -> bool) -> StoreResult<Vec<D>>;

    /// First document matching the predicate
    fn find_one(&self, filter: &dyn Fn(&D) -> bool) -> StoreResult<Option<D>> {
        Ok(self.find(filter)?.into_iter().next())
    }
}

/// Fallible updates on top of [`DocumentStore::update`]
pub trait DocumentStoreExt<D: Document>: DocumentStore<D> {
    /// Atomically mutate one document, aborting with the mutation's error
    ///
    /// When the mutation fails the stored document is left untouched.
    fn try_update<E, F>(&self, id: Uuid, mut mutate: F) -> Result<Option<D>, E>
    where
        E: From<StoreError>,
        F: FnMut(&mut D) -> Result<(), E>,
    {
        let mut failure = None;
        let updated = self.update(id, &mut |doc| match mutate(doc) {
            Ok(()) => true,
            Err(e) => {
                failure = Some(e);
                false
            }
        })?;

        match failure {
            Some(e) => Err(e),
            None => Ok(updated),
        }
    }
}

impl<D: Document, S: DocumentStore<D> + ?Sized> DocumentStoreExt<D> for S {}
