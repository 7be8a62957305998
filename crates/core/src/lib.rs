//! docunit-core: canonical value model and dataset plumbing for the
//! docunit document-store testing toolkit.
//!
//! Datasets are parsed from portable JSON (the `docunit-interchange`
//! crate), extracted from or written to a live store (`docunit-storage`),
//! and compared (`docunit-match`). This crate holds the representation they
//! all share, the dataset combiner, the fixed timestamp format, and the
//! error taxonomy.

pub mod combine;
pub mod config;
pub mod datetime;
pub mod error;
pub mod value;

// ── Convenience re-exports ───────────────────────────────────────────

pub use combine::{combine, combine2, combine_repeating};
pub use config::CodecConfig;
pub use error::DocUnitError;
pub use value::{Collection, Dataset, Document, Operator, RawValue, TypedValue, ValueKind};
