//! # firmsoft
//!
//! Identify which camera-control software (and which version, build and distribution
//! channel of it) is embedded in a raw firmware image or memory dump, without running it.
//!
//! Each product is described by a [`Detector`]: a set of signature literals, the number
//! of delimited ASCII strings stored right after the signature, and hooks that turn those
//! strings into a [`SoftwareInfo`]. Two layouts are supported:
//!
//! - **fixed-schema**: NUL-terminated strings; camera and source are mandatory.
//! - **extended**: strings split on a configurable byte; adds category, build, compiler
//!   and version prefix/suffix, with camera and source optional.
//!
//! Detection is pure and synchronous. Anything the detector does not recognize (truncated
//! buffer, unterminated string, unparsable version, half a camera pair, no source) comes
//! back as `None`, never as a partially filled result.
//!
//! ## Example
//!
//! ```no_run
//! use firmsoft::{detect_software, Config};
//!
//! let config = Config::load("detectors.toml".as_ref()).unwrap();
//! let detectors = config.detectors().unwrap();
//! let sources = config.source_provider();
//! let bytes = std::fs::read("PS.FI2.dump").unwrap();
//! if let Some(info) = detect_software(&bytes, &detectors, &sources) {
//!     println!("{} {}", info.product.name, info.product.version);
//! }
//! ```

pub mod binary;
#[cfg(feature = "config")]
mod config;
pub mod detector;
mod error;
pub mod fields;
mod software;
mod source;

pub use binary::{read_string, read_strings, seek_after, ExtractedFields};
#[cfg(feature = "config")]
pub use config::{Config, DetectorConfig, FieldMap};
pub use detector::{Detector, DetectorBuilder, Family, Hooks, Policy};
#[cfg(feature = "config")]
pub use error::ConfigError;
pub use error::DetectorError;
pub use fields::{ProductVersion, Version};
pub use software::{
    CategoryInfo, SoftwareBuildInfo, SoftwareCameraInfo, SoftwareCompilerInfo, SoftwareInfo,
    SoftwareProductInfo, SoftwareSourceInfo, SCHEMA_VERSION,
};
pub use source::{NoSources, SourceEntry, SourceProvider, StaticSourceProvider};

/// Where a detector matched and what it found.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Detection {
    /// Offset of the first field, right after the signature.
    pub offset: usize,
    pub info: SoftwareInfo,
}

/// Try each detector in order; the first complete detection wins.
///
/// For each detector, every signature is sought in declaration order and the detector is
/// run at the offset just past the leftmost occurrence.
pub fn detect(
    data: &[u8],
    detectors: &[Detector],
    sources: &dyn SourceProvider,
) -> Option<Detection> {
    detectors.iter().find_map(|detector| {
        detector.signature_bytes().iter().find_map(|needle| {
            let offset = seek_after(data, needle).ok().flatten()?;
            log::trace!(
                "{}: signature found, fields start at {}",
                detector.product_name(),
                offset
            );
            detector
                .detect(data, offset, sources)
                .map(|info| Detection { offset, info })
        })
    })
}

/// [`detect`] without the offset.
#[inline]
pub fn detect_software(
    data: &[u8],
    detectors: &[Detector],
    sources: &dyn SourceProvider,
) -> Option<SoftwareInfo> {
    detect(data, detectors, sources).map(|d| d.info)
}
