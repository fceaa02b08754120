//! Error types for faults that are not an ordinary "no match".
//!
//! A buffer that does not contain a product is reported as `None` by the detection
//! functions. The variants here describe misuse: a detector that could never match
//! anything, or a configuration that cannot be turned into a detector.

/// A detector (or a locator call) was set up with inputs that can never be valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectorError {
    #[error("signature needle is empty")]
    EmptySignature,

    #[error("detector declares no signatures")]
    NoSignatures,

    #[error("product name is empty")]
    EmptyProductName,

    #[error("string count must be at least 1")]
    ZeroStringCount,

    #[error("field `{field}` index {index} is outside the {count} extracted strings")]
    FieldOutOfRange {
        field: &'static str,
        index: usize,
        count: usize,
    },

    #[error("camera mapping needs both platform and revision fields")]
    IncompleteCamera,

    #[error("unknown detector family `{0}` (expected `fixed` or `extended`)")]
    UnknownFamily(String),

    #[error("separator `{0}` is not a single ASCII character")]
    InvalidSeparator(String),
}

/// Failure to load declarative detector definitions.
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("detector `{product}`: {source}")]
    Detector {
        product: String,
        #[source]
        source: DetectorError,
    },
}
