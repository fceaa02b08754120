//! Source resolution bridge: maps a detected product to its distribution channel.
//!
//! Resolution itself belongs to the caller. Detectors only build the lookup key and
//! apply their gating policy to whatever comes back.

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::software::{SoftwareProductInfo, SoftwareSourceInfo};

/// Lookup used once a detector has structurally identified a product.
pub trait SourceProvider {
    /// Single-result lookup used by fixed-schema detectors.
    fn source(
        &self,
        product_name: &str,
        source_name: &str,
        channel_name: Option<&str>,
    ) -> Option<SoftwareSourceInfo>;

    /// Ordered candidates used by extended detectors; the first one is taken.
    fn sources(&self, product: &SoftwareProductInfo, source_name: &str) -> Vec<SoftwareSourceInfo>;
}

/// One row of a [`StaticSourceProvider`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct SourceEntry {
    /// Product this source distributes.
    pub product: String,
    /// Source name detectors ask for.
    pub name: String,
    pub channel: Option<String>,
    pub url: Option<String>,
}

impl SourceEntry {
    fn info(&self) -> SoftwareSourceInfo {
        SoftwareSourceInfo {
            name: self.name.clone(),
            channel: self.channel.clone(),
            url: self.url.clone(),
        }
    }
}

/// Table-backed provider. Matching is exact; candidates keep table order.
#[derive(Debug, Clone, Default)]
pub struct StaticSourceProvider {
    entries: Vec<SourceEntry>,
}

impl StaticSourceProvider {
    pub fn new(entries: Vec<SourceEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    fn matching<'a>(
        &'a self,
        product_name: &'a str,
        source_name: &'a str,
    ) -> impl Iterator<Item = &'a SourceEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.product == product_name && e.name == source_name)
    }
}

impl SourceProvider for StaticSourceProvider {
    fn source(
        &self,
        product_name: &str,
        source_name: &str,
        channel_name: Option<&str>,
    ) -> Option<SoftwareSourceInfo> {
        self.matching(product_name, source_name)
            .find(|e| channel_name.is_none() || e.channel.as_deref() == channel_name)
            .map(SourceEntry::info)
    }

    fn sources(&self, product: &SoftwareProductInfo, source_name: &str) -> Vec<SoftwareSourceInfo> {
        self.matching(&product.name, source_name)
            .map(SourceEntry::info)
            .collect()
    }
}

/// Provider that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSources;

impl SourceProvider for NoSources {
    fn source(&self, _: &str, _: &str, _: Option<&str>) -> Option<SoftwareSourceInfo> {
        None
    }

    fn sources(&self, _: &SoftwareProductInfo, _: &str) -> Vec<SoftwareSourceInfo> {
        Vec::new()
    }
}
