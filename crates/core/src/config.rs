//! Read-only per-call codec configuration: the marker prefix that flags a
//! typed-value descriptor in dataset JSON, and the set of kinds whose tags
//! survive export.

use std::collections::BTreeSet;

use crate::error::DocUnitError;
use crate::value::ValueKind;

/// Configuration shared by the typed-value encoder/decoder and the store
/// codec. Immutable once constructed; safe to share across calls.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    marker: String,
    preserve_kinds: BTreeSet<ValueKind>,
}

impl CodecConfig {
    /// Default marker prefix flagging a field name as a typed-value
    /// descriptor, e.g. `"$$OBJECT_ID"`.
    pub const DEFAULT_MARKER: &'static str = "$$";

    /// Sibling field carrying the comparison operator in a descriptor.
    pub const COMPARATOR_FIELD: &'static str = "comparator";

    /// Kinds whose tags are preserved on export unless overridden: the two
    /// kinds whose canonical projection is lossy enough to break re-seeding.
    pub fn default_preserve_kinds() -> BTreeSet<ValueKind> {
        [ValueKind::ObjectId, ValueKind::DateTime].into_iter().collect()
    }

    /// Construct a config with a custom marker. An empty marker would make
    /// every field a descriptor trigger, so it is rejected outright.
    pub fn with_marker(marker: impl Into<String>) -> Result<Self, DocUnitError> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(DocUnitError::Configuration(
                "marker prefix must not be empty".to_string(),
            ));
        }
        Ok(CodecConfig {
            marker,
            preserve_kinds: Self::default_preserve_kinds(),
        })
    }

    /// Replace the set of kinds preserved on export.
    pub fn preserve(mut self, kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        self.preserve_kinds = kinds.into_iter().collect();
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn preserve_kinds(&self) -> &BTreeSet<ValueKind> {
        &self.preserve_kinds
    }

    pub fn preserves(&self, kind: ValueKind) -> bool {
        self.preserve_kinds.contains(&kind)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            marker: Self::DEFAULT_MARKER.to_string(),
            preserve_kinds: Self::default_preserve_kinds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_marker_and_preserve_set() {
        let config = CodecConfig::default();
        assert_eq!(config.marker(), "$$");
        assert!(config.preserves(ValueKind::ObjectId));
        assert!(config.preserves(ValueKind::DateTime));
        assert!(!config.preserves(ValueKind::Int64));
    }

    #[test]
    fn empty_marker_rejected() {
        match CodecConfig::with_marker("") {
            Err(DocUnitError::Configuration(_)) => {}
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn custom_marker_and_preserve_override() {
        let config = CodecConfig::with_marker("@@")
            .unwrap()
            .preserve([ValueKind::Decimal128]);
        assert_eq!(config.marker(), "@@");
        assert!(config.preserves(ValueKind::Decimal128));
        assert!(!config.preserves(ValueKind::ObjectId));
    }
}
