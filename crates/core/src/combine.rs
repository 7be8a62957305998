//! Dataset combination: merge several datasets (or one dataset with
//! repeated collection names) into one dataset with unique collection
//! names, preserving encounter order of collections and documents.
//!
//! Combination never mutates its inputs. Same-named collections from
//! multiple sources would otherwise alias caller-held document lists when
//! appended in place; fresh copies make concurrent reuse of the inputs safe.

use std::collections::HashMap;

use crate::value::{Collection, Dataset};

/// Merge the collections of every input dataset, in encounter order.
///
/// The first time a collection name is seen, the collection is cloned into
/// the output at that position; every later occurrence of the same name has
/// its documents appended (in order) to the already-placed collection.
/// The result has unique collection names. Associative and
/// order-preserving: `combine([a, b, c])` holds a's documents before b's
/// before c's for any shared name.
pub fn combine<'a, I>(datasets: I) -> Dataset
where
    I: IntoIterator<Item = &'a Dataset>,
{
    let mut combined: Dataset = Vec::new();
    let mut placed: HashMap<String, usize> = HashMap::new();

    for dataset in datasets {
        for collection in dataset {
            match placed.get(&collection.name) {
                Some(&index) => {
                    combined[index]
                        .documents
                        .extend(collection.documents.iter().cloned());
                }
                None => {
                    placed.insert(collection.name.clone(), combined.len());
                    combined.push(collection.clone());
                }
            }
        }
    }

    combined
}

/// Combine exactly two datasets, first dataset's data ordered first.
pub fn combine2(first: &Dataset, second: &Dataset) -> Dataset {
    combine([first, second])
}

/// Collapse repeated collection names within a single dataset.
pub fn combine_repeating(dataset: &Dataset) -> Dataset {
    combine([dataset])
}
