//! Dataset-source resolution: turning a logical location into JSON text.
//!
//! The core only needs `load_text`; where files live (under a fixture root,
//! at an absolute path) is the source implementation's business.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, trace};

use docunit_core::{CodecConfig, Dataset, DocUnitError};

use crate::decode::parse_dataset;

/// A provider of raw dataset JSON text for a logical location.
pub trait DatasetSource {
    fn load_text(&self, location: &str) -> Result<String, DocUnitError>;
}

/// Loads datasets from the filesystem. Relative locations resolve under the
/// configured root directory; absolute locations are used as-is.
#[derive(Debug, Clone)]
pub struct FileDatasetSource {
    root: PathBuf,
}

impl FileDatasetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileDatasetSource { root: root.into() }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DatasetSource for FileDatasetSource {
    fn load_text(&self, location: &str) -> Result<String, DocUnitError> {
        let path = self.resolve(location);
        trace!("loading dataset resource from {}", path.display());
        fs::read_to_string(&path).map_err(|e| {
            error!("failed to read dataset at {}: {e}", path.display());
            DocUnitError::ResourceNotFound(location.to_string())
        })
    }
}

/// Load and parse the datasets at every location, concatenated in order.
///
/// Same-named collections are NOT merged here; callers pass the result
/// through [`docunit_core::combine`] explicitly.
pub fn load_dataset(
    source: &dyn DatasetSource,
    locations: &[&str],
    config: &CodecConfig,
) -> Result<Dataset, DocUnitError> {
    let mut dataset = Dataset::new();
    for location in locations {
        let text = source.load_text(location)?;
        dataset.extend(parse_dataset(&text, config)?);
    }
    Ok(dataset)
}
