//! docunit-interchange: the portable dataset JSON format.
//!
//! Decodes dataset files (including the marker-based typed-value descriptor
//! convention) into the canonical value model, encodes datasets back to
//! JSON for export, and resolves logical dataset locations to text.

pub mod decode;
pub mod encode;
pub mod source;

pub use decode::parse_dataset;
pub use encode::write_dataset;
pub use source::{load_dataset, DatasetSource, FileDatasetSource};
