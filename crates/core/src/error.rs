/// All fatal errors the docunit core can produce.
///
/// An assertion that simply does not match is NOT an error -- it is the
/// `ok = false` arm of `MatchResult` in the matcher crate. Every variant
/// here aborts the current seed/assert/export call; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocUnitError {
    /// Bad read-only configuration (empty marker, unknown collection named
    /// in a snapshot restriction, mutually exclusive options).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A dataset location could not be resolved to readable text.
    #[error("failed to load dataset resource at location '{0}'")]
    ResourceNotFound(String),

    /// Malformed JSON, or JSON whose shape does not fit the dataset schema.
    #[error("unable to interpret JSON dataset: {0}")]
    Parse(String),

    /// A native wire kind with no canonical mapping was encountered.
    #[error("{0}")]
    UnsupportedKind(String),

    /// A declared kind is incompatible with the runtime shape of its raw value.
    #[error("{0}")]
    TypeConversion(String),

    /// Unknown operator token, or an operator misapplied (e.g. a relational
    /// operator paired with a null expected value).
    #[error("{0}")]
    Comparator(String),

    /// A store backend failure surfaced through a `StoreHandle`.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl DocUnitError {
    /// Build the standard unsupported-kind message for a wire kind token.
    pub fn unsupported_kind(token: &str) -> Self {
        DocUnitError::UnsupportedKind(format!(
            "wire kind '{token}' is not supported by docunit"
        ))
    }

    /// Prepend path context (collection name, document index, field name) to
    /// the error message, preserving the error category.
    pub fn context(self, prefix: impl std::fmt::Display) -> Self {
        match self {
            DocUnitError::Configuration(m) => {
                DocUnitError::Configuration(format!("{prefix}: {m}"))
            }
            DocUnitError::Parse(m) => DocUnitError::Parse(format!("{prefix}: {m}")),
            DocUnitError::UnsupportedKind(m) => {
                DocUnitError::UnsupportedKind(format!("{prefix}: {m}"))
            }
            DocUnitError::TypeConversion(m) => {
                DocUnitError::TypeConversion(format!("{prefix}: {m}"))
            }
            DocUnitError::Comparator(m) => DocUnitError::Comparator(format!("{prefix}: {m}")),
            DocUnitError::Backend(m) => DocUnitError::Backend(format!("{prefix}: {m}")),
            // The location already is the context.
            DocUnitError::ResourceNotFound(_) => self,
        }
    }
}
