//! docunit-storage: the bridge between canonical datasets and a live
//! document store.
//!
//! Defines the native wire value model ([`WireValue`]), the [`StoreHandle`]
//! seam a driver adapter implements, the store codec translating between
//! wire and canonical values, and the seed/snapshot/clear/export entry
//! points. [`MemoryStore`] is a complete in-process implementation used by
//! tests and embedders.

pub mod codec;
pub mod memory;
pub mod store;
pub mod traits;
pub mod wire;

pub use codec::{extract_document, extract_value, reconstruct_document, reconstruct_value};
pub use memory::MemoryStore;
pub use store::{clear_store, export, seed, snapshot};
pub use traits::StoreHandle;
pub use wire::{WireDocument, WireValue};
