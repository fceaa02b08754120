//! Detection result types: what software was found and where it came from.

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::fields::Version;

/// Schema version stamped on every [`SoftwareInfo`].
pub const SCHEMA_VERSION: Version = Version::new(1, 0);

/// Product family a detector belongs to (e.g. "PS" for PowerShot builds).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CategoryInfo {
    pub name: String,
}

/// The software product itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SoftwareProductInfo {
    /// Product name, owned by the detector.
    pub name: String,
    /// Numeric version; decorations live in `version_prefix` / `version_suffix`.
    pub version: Version,
    pub version_prefix: Option<String>,
    pub version_suffix: Option<String>,
    /// Locale identifier of the build (e.g. "en", "de-DE").
    pub language: Option<String>,
    /// Build timestamp, UTC.
    pub created: Option<DateTime<Utc>>,
}

/// Camera the build targets. Both halves are always present together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SoftwareCameraInfo {
    pub platform: String,
    pub revision: String,
}

/// Distribution channel, as resolved by a [`crate::SourceProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SoftwareSourceInfo {
    pub name: String,
    pub channel: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SoftwareBuildInfo {
    pub name: Option<String>,
    pub status: Option<String>,
    pub changeset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SoftwareCompilerInfo {
    pub name: String,
    pub version: Option<Version>,
}

/// Everything known about one detected piece of software.
///
/// Only `product` is always present. A missing sub-record means the product family
/// does not carry that information, not that extraction failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SoftwareInfo {
    /// Schema version of this record.
    pub version: Version,
    pub category: Option<CategoryInfo>,
    pub product: SoftwareProductInfo,
    pub camera: Option<SoftwareCameraInfo>,
    pub source: Option<SoftwareSourceInfo>,
    pub build: Option<SoftwareBuildInfo>,
    pub compiler: Option<SoftwareCompilerInfo>,
}
