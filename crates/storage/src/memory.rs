//! An in-memory [`StoreHandle`] for tests and embedders.

use docunit_core::DocUnitError;

use crate::traits::StoreHandle;
use crate::wire::WireDocument;

/// Ordered in-memory store. Collections appear in creation order and
/// documents in insertion order, so snapshots are deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Vec<(String, Vec<WireDocument>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl StoreHandle for MemoryStore {
    fn list_collection_names(&self) -> Result<Vec<String>, DocUnitError> {
        Ok(self.collections.iter().map(|(name, _)| name.clone()).collect())
    }

    fn drop_collection(&mut self, name: &str) -> Result<(), DocUnitError> {
        self.collections.retain(|(n, _)| n != name);
        Ok(())
    }

    fn insert_many(
        &mut self,
        name: &str,
        docs: Vec<WireDocument>,
    ) -> Result<(), DocUnitError> {
        match self.collections.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => existing.extend(docs),
            None => self.collections.push((name.to_string(), docs)),
        }
        Ok(())
    }

    fn find_all(&self, name: &str) -> Result<Vec<WireDocument>, DocUnitError> {
        Ok(self
            .collections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, docs)| docs.clone())
            .unwrap_or_default())
    }
}
