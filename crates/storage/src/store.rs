//! Seeding, snapshotting, clearing and exporting through a [`StoreHandle`].

use std::collections::BTreeSet;

use tracing::{error, trace};

use docunit_core::{CodecConfig, Collection, Dataset, DocUnitError};
use docunit_interchange::write_dataset;

use crate::codec::{extract_document, reconstruct_document};
use crate::traits::StoreHandle;
use crate::wire::WireDocument;

/// Insert every document of `dataset` into the store.
///
/// Each collection is converted fully before anything is inserted for it, so
/// a conversion failure leaves that collection untouched. Collections seeded
/// earlier in the dataset are NOT rolled back; seeding is not transactional.
/// Nothing is dropped; combine with [`clear_store`] for a clean slate.
pub fn seed(dataset: &Dataset, store: &mut dyn StoreHandle) -> Result<(), DocUnitError> {
    for collection in dataset {
        let name = collection.name.as_str();
        trace!(collection = name, documents = collection.documents.len(), "seeding");

        let wire_docs: Vec<WireDocument> = collection
            .documents
            .iter()
            .enumerate()
            .map(|(index, doc)| {
                reconstruct_document(doc)
                    .map_err(|e| e.context(format!("Document array index of '{index}'")))
            })
            .collect::<Result<_, _>>()
            .map_err(|e| {
                let e = e.context(format!("Collection '{name}'"));
                error!("seed conversion failed: {e}");
                e
            })?;

        store.insert_many(name, wire_docs).map_err(|e| {
            error!("seed insert into '{name}' failed: {e}");
            e
        })?;
    }
    Ok(())
}

/// Extract the store contents as a canonical dataset.
///
/// With `collections = None`, every collection is extracted in store order.
/// With a restriction set, exactly the named collections are extracted (still
/// in store order); naming a collection the store does not have is a
/// `Configuration` error.
pub fn snapshot(
    store: &dyn StoreHandle,
    collections: Option<&BTreeSet<String>>,
) -> Result<Dataset, DocUnitError> {
    let store_names = store.list_collection_names()?;

    if let Some(requested) = collections {
        for name in requested {
            if !store_names.iter().any(|n| n == name) {
                let e = DocUnitError::Configuration(format!(
                    "collection '{name}' was not found in the store"
                ));
                error!("snapshot restriction invalid: {e}");
                return Err(e);
            }
        }
    }

    let mut dataset = Dataset::new();
    for name in store_names {
        if let Some(requested) = collections {
            if !requested.contains(&name) {
                continue;
            }
        }
        trace!(collection = name.as_str(), "snapshotting");

        let documents = store
            .find_all(&name)?
            .iter()
            .enumerate()
            .map(|(index, doc)| {
                extract_document(doc)
                    .map_err(|e| e.context(format!("Document array index of '{index}'")))
            })
            .collect::<Result<_, _>>()
            .map_err(|e: DocUnitError| {
                let e = e.context(format!("Collection '{name}'"));
                error!("snapshot extraction failed: {e}");
                e
            })?;

        dataset.push(Collection { name, documents });
    }
    Ok(dataset)
}

/// Drop every collection in the store.
pub fn clear_store(store: &mut dyn StoreHandle) -> Result<(), DocUnitError> {
    for name in store.list_collection_names()? {
        trace!(collection = name.as_str(), "dropping");
        store.drop_collection(&name)?;
    }
    Ok(())
}

/// Snapshot the store and render it as dataset JSON, preserving the kind
/// tags named by `config`.
pub fn export(
    store: &dyn StoreHandle,
    collections: Option<&BTreeSet<String>>,
    config: &CodecConfig,
) -> Result<String, DocUnitError> {
    let dataset = snapshot(store, collections)?;
    write_dataset(&dataset, config)
}
