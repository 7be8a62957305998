//! The seam between docunit and an actual document store.

use docunit_core::DocUnitError;

use crate::wire::WireDocument;

/// Minimal store surface needed by seeding, snapshotting and clearing.
///
/// Implementations adapt a real driver (or [`crate::MemoryStore`] for
/// tests). Backend failures are surfaced as `DocUnitError::Backend`; docunit
/// never retries.
pub trait StoreHandle {
    /// Names of every collection currently present, in store order.
    fn list_collection_names(&self) -> Result<Vec<String>, DocUnitError>;

    /// Drop a collection and its documents. Dropping an absent collection
    /// is a no-op.
    fn drop_collection(&mut self, name: &str) -> Result<(), DocUnitError>;

    /// Append documents to a collection, creating it if absent.
    fn insert_many(&mut self, name: &str, docs: Vec<WireDocument>)
        -> Result<(), DocUnitError>;

    /// All documents of a collection, in insertion order. An absent
    /// collection reads as empty.
    fn find_all(&self, name: &str) -> Result<Vec<WireDocument>, DocUnitError>;
}
