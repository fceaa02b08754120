//! Detectors: a product description plus the shared detection pipeline.
//!
//! A [`Detector`] is a value, not a subclass. Per-product behavior lives in its
//! [`Hooks`] and its gating [`Policy`]; every detector runs the same pipeline.
//!
//! ```
//! use firmsoft::{Detector, Family, StaticSourceProvider, SourceEntry};
//!
//! let detector = Detector::builder("CHDK", Family::FixedSchema)
//!     .signature("CHDK ")
//!     .string_count(5)
//!     .version_field(0)
//!     .language_field(1)
//!     .created_fields(&[2])
//!     .camera_fields(3, 4)
//!     .build()
//!     .unwrap();
//!
//! let sources = StaticSourceProvider::new(vec![SourceEntry {
//!     product: "CHDK".into(),
//!     name: "CHDK".into(),
//!     channel: None,
//!     url: None,
//! }]);
//! let buffer = b"1.3.0\0en\020121201000000\0PLATFORMX\0REV42\0";
//! let info = detector.detect(buffer, 0, &sources).unwrap();
//! assert_eq!(info.product.version.to_string(), "1.3.0");
//! ```

mod hooks;
mod pipeline;
mod policy;

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use crate::binary::{encode_ascii, read_strings, seek_after, ExtractedFields, NUL};
use crate::error::DetectorError;
use crate::fields::ProductVersion;
use crate::software::{SoftwareBuildInfo, SoftwareCameraInfo, SoftwareCompilerInfo, SoftwareInfo};
use crate::source::SourceProvider;

pub use hooks::{
    absent, camera_at, locale_at, split_version_at, text_at, timestamp_at, version_at, FieldHook,
    Hooks,
};
pub use policy::{Family, Policy};

/// Recognizes one product in a buffer and extracts its metadata.
///
/// Stateless apart from the ASCII-encoded signatures, computed on first use and
/// shared by every later call. Safe to share across threads.
pub struct Detector {
    product_name: String,
    category_name: Option<String>,
    signatures: Vec<String>,
    signature_bytes: OnceLock<Vec<Vec<u8>>>,
    string_count: usize,
    policy: Policy,
    hooks: Hooks,
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("product_name", &self.product_name)
            .field("category_name", &self.category_name)
            .field("signatures", &self.signatures)
            .field("string_count", &self.string_count)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Detector {
    pub fn builder(product_name: impl Into<String>, family: Family) -> DetectorBuilder {
        DetectorBuilder::new(product_name.into(), family)
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    pub fn family(&self) -> Family {
        self.policy.family
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Number of strings one extraction pass reads.
    pub fn string_count(&self) -> usize {
        self.string_count
    }

    /// Signature literals, in declaration order.
    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    /// Signature literals encoded as ASCII bytes. Computed once, then reused.
    pub fn signature_bytes(&self) -> &[Vec<u8>] {
        self.signature_bytes
            .get_or_init(|| self.signatures.iter().map(|s| encode_ascii(s)).collect())
    }

    /// Offset right after the leftmost occurrence of the first signature found in `data`.
    ///
    /// Signatures are tried in declaration order.
    pub fn locate(&self, data: &[u8]) -> Option<usize> {
        self.signature_bytes()
            .iter()
            .find_map(|needle| seek_after(data, needle).ok().flatten())
    }

    /// Read this detector's strings at `offset`; `None` unless every one is terminated.
    pub fn extract(&self, data: &[u8], offset: usize) -> Option<ExtractedFields> {
        read_strings(data, offset, self.string_count, self.policy.separator)
    }

    /// Run the full pipeline at `offset`, which is where the first field begins.
    ///
    /// `None` means this detector does not recognize the buffer at that offset.
    pub fn detect(
        &self,
        data: &[u8],
        offset: usize,
        sources: &dyn SourceProvider,
    ) -> Option<SoftwareInfo> {
        pipeline::run(self, data, offset, sources)
    }
}

/// Builder for [`Detector`]. Field positions given here are checked by [`DetectorBuilder::build`].
pub struct DetectorBuilder {
    product_name: String,
    category_name: Option<String>,
    signatures: Vec<String>,
    string_count: usize,
    policy: Policy,
    hooks: Hooks,
    positions: Vec<(&'static str, usize)>,
}

impl DetectorBuilder {
    fn new(product_name: String, family: Family) -> Self {
        Self {
            product_name,
            category_name: None,
            signatures: Vec::new(),
            string_count: 0,
            policy: Policy::for_family(family),
            hooks: Hooks::default(),
            positions: Vec::new(),
        }
    }

    fn at(mut self, field: &'static str, index: usize) -> Self {
        self.positions.push((field, index));
        self
    }

    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    pub fn signature(mut self, literal: impl Into<String>) -> Self {
        self.signatures.push(literal.into());
        self
    }

    pub fn signatures<I, S>(mut self, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signatures.extend(literals.into_iter().map(Into::into));
        self
    }

    pub fn string_count(mut self, count: usize) -> Self {
        self.string_count = count;
        self
    }

    /// String separator; only the extended family may use something other than NUL.
    pub fn separator(mut self, separator: u8) -> Self {
        self.policy.separator = separator;
        self
    }

    /// Make locale and creation timestamp gating.
    pub fn strict(mut self) -> Self {
        self.policy = self.policy.strict();
        self
    }

    pub fn version_field(mut self, index: usize) -> Self {
        self.hooks.version = version_at(index);
        self.at("version", index)
    }

    /// Version embedded in longer text; `strip` is removed from the start first.
    pub fn split_version_field(mut self, index: usize, strip: Option<String>) -> Self {
        self.hooks.version = split_version_at(index, strip);
        self.at("version", index)
    }

    pub fn language_field(mut self, index: usize) -> Self {
        self.hooks.language = locale_at(index);
        self.at("language", index)
    }

    /// Creation timestamp from one or more fields joined with a space.
    pub fn created_fields(mut self, indices: &[usize]) -> Self {
        self.hooks.created = timestamp_at(indices.to_vec());
        for &i in indices {
            self = self.at("created", i);
        }
        self
    }

    pub fn camera_fields(mut self, platform: usize, revision: usize) -> Self {
        self.hooks.camera = camera_at(platform, revision);
        self.at("platform", platform).at("revision", revision)
    }

    pub fn source_field(mut self, index: usize) -> Self {
        self.hooks.source_name = text_at(index);
        self.at("source", index)
    }

    pub fn channel_field(mut self, index: usize) -> Self {
        self.hooks.source_channel = text_at(index);
        self.at("channel", index)
    }

    pub fn version_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtractedFields) -> Option<ProductVersion> + Send + Sync + 'static,
    {
        self.hooks.version = Box::new(hook);
        self
    }

    pub fn language_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtractedFields) -> Option<String> + Send + Sync + 'static,
    {
        self.hooks.language = Box::new(hook);
        self
    }

    pub fn created_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtractedFields) -> Option<DateTime<Utc>> + Send + Sync + 'static,
    {
        self.hooks.created = Box::new(hook);
        self
    }

    pub fn camera_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtractedFields) -> Option<SoftwareCameraInfo> + Send + Sync + 'static,
    {
        self.hooks.camera = Box::new(hook);
        self
    }

    pub fn source_name_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtractedFields) -> Option<String> + Send + Sync + 'static,
    {
        self.hooks.source_name = Box::new(hook);
        self
    }

    pub fn channel_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtractedFields) -> Option<String> + Send + Sync + 'static,
    {
        self.hooks.source_channel = Box::new(hook);
        self
    }

    pub fn build_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtractedFields) -> Option<SoftwareBuildInfo> + Send + Sync + 'static,
    {
        self.hooks.build = Box::new(hook);
        self
    }

    pub fn compiler_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtractedFields) -> Option<SoftwareCompilerInfo> + Send + Sync + 'static,
    {
        self.hooks.compiler = Box::new(hook);
        self
    }

    /// Note a field position read by a custom hook so `build` range-checks it.
    pub fn uses_field(self, field: &'static str, index: usize) -> Self {
        self.at(field, index)
    }

    /// Validate and produce the detector.
    pub fn build(self) -> Result<Detector, DetectorError> {
        if self.product_name.trim().is_empty() {
            return Err(DetectorError::EmptyProductName);
        }
        if self.signatures.is_empty() {
            return Err(DetectorError::NoSignatures);
        }
        if self.signatures.iter().any(String::is_empty) {
            return Err(DetectorError::EmptySignature);
        }
        if self.string_count == 0 {
            return Err(DetectorError::ZeroStringCount);
        }
        if self.policy.family == Family::FixedSchema && self.policy.separator != NUL {
            return Err(DetectorError::InvalidSeparator(
                (self.policy.separator as char).to_string(),
            ));
        }
        if let Some(&(field, index)) = self.positions.iter().find(|(_, i)| *i >= self.string_count)
        {
            return Err(DetectorError::FieldOutOfRange {
                field,
                index,
                count: self.string_count,
            });
        }
        Ok(Detector {
            product_name: self.product_name,
            category_name: self.category_name,
            signatures: self.signatures,
            signature_bytes: OnceLock::new(),
            string_count: self.string_count,
            policy: self.policy,
            hooks: self.hooks,
        })
    }
}
