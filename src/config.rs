//! Declarative detector definitions loaded from TOML.
//!
//! ```toml
//! [[source]]
//! product = "CHDK"
//! name = "CHDK"
//! channel = "release"
//!
//! [[detector]]
//! product = "CHDK"
//! family = "fixed"
//! signatures = ["CHDK ver "]
//! string_count = 5
//!
//! [detector.fields]
//! version = 0
//! language = 1
//! created = [2]
//! platform = 3
//! revision = 4
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::binary::ExtractedFields;
use crate::detector::{Detector, DetectorBuilder, Family};
use crate::error::{ConfigError, DetectorError};
use crate::fields::{locale_from_table, parse_version};
use crate::software::{SoftwareBuildInfo, SoftwareCompilerInfo};
use crate::source::{SourceEntry, StaticSourceProvider};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceEntry>,
    #[serde(default, rename = "detector")]
    pub detectors: Vec<DetectorConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorConfig {
    pub product: String,
    /// `fixed` (alias `fixed-schema`, `inner`) or `extended` (alias `product`).
    pub family: String,
    pub category: Option<String>,
    pub signatures: Vec<String>,
    pub string_count: usize,
    /// Single ASCII character; NUL when omitted.
    pub separator: Option<String>,
    /// Also gate on locale and creation timestamp.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub fields: FieldMap,
    /// Raw language field value to locale identifier.
    pub languages: Option<HashMap<String, String>>,
}

/// Position of each field within the extracted strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldMap {
    pub version: Option<usize>,
    #[serde(default)]
    pub version_split: bool,
    pub version_strip: Option<String>,
    pub language: Option<usize>,
    #[serde(default)]
    pub created: Vec<usize>,
    pub platform: Option<usize>,
    pub revision: Option<usize>,
    pub source: Option<usize>,
    pub channel: Option<usize>,
    pub build_name: Option<usize>,
    pub build_status: Option<usize>,
    pub build_changeset: Option<usize>,
    pub compiler_name: Option<usize>,
    pub compiler_version: Option<usize>,
}

fn parse_separator(text: &str) -> Result<u8, DetectorError> {
    match text.as_bytes() {
        [] => Ok(0),
        [b] if b.is_ascii() => Ok(*b),
        _ if text == "\\0" => Ok(0),
        _ => Err(DetectorError::InvalidSeparator(text.to_string())),
    }
}

/// Text of field `index`, treating an empty string as absent.
fn non_empty(fields: &ExtractedFields, index: Option<usize>) -> Option<String> {
    fields
        .get(index?)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl DetectorConfig {
    fn apply_fields(&self, mut b: DetectorBuilder) -> DetectorBuilder {
        let f = &self.fields;
        if let Some(i) = f.version {
            b = if f.version_split || f.version_strip.is_some() {
                b.split_version_field(i, f.version_strip.clone())
            } else {
                b.version_field(i)
            };
        }
        if let Some(i) = f.language {
            b = match &self.languages {
                Some(table) => {
                    let table = table.clone();
                    b.language_hook(move |fields| {
                        fields.get(i).and_then(|s| locale_from_table(&table, s))
                    })
                    .uses_field("language", i)
                }
                None => b.language_field(i),
            };
        }
        if !f.created.is_empty() {
            b = b.created_fields(&f.created);
        }
        if let (Some(p), Some(r)) = (f.platform, f.revision) {
            b = b.camera_fields(p, r);
        }
        if let Some(i) = f.source {
            b = b.source_field(i);
        }
        if let Some(i) = f.channel {
            b = b.channel_field(i);
        }
        let build = [
            ("build_name", f.build_name),
            ("build_status", f.build_status),
            ("build_changeset", f.build_changeset),
        ];
        if build.iter().any(|(_, i)| i.is_some()) {
            let (name, status, changeset) = (f.build_name, f.build_status, f.build_changeset);
            b = b.build_hook(move |fields| {
                let info = SoftwareBuildInfo {
                    name: non_empty(fields, name),
                    status: non_empty(fields, status),
                    changeset: non_empty(fields, changeset),
                };
                (info != SoftwareBuildInfo::default()).then_some(info)
            });
            for (field, index) in build {
                if let Some(i) = index {
                    b = b.uses_field(field, i);
                }
            }
        }
        if let Some(ni) = f.compiler_name {
            let vi = f.compiler_version;
            b = b
                .compiler_hook(move |fields| {
                    Some(SoftwareCompilerInfo {
                        name: non_empty(fields, Some(ni))?,
                        version: vi.and_then(|i| fields.get(i)).and_then(parse_version),
                    })
                })
                .uses_field("compiler_name", ni);
            if let Some(i) = vi {
                b = b.uses_field("compiler_version", i);
            }
        }
        b
    }

    /// Turn this definition into a validated detector.
    pub fn to_detector(&self) -> Result<Detector, DetectorError> {
        let family: Family = self.family.parse()?;
        if self.fields.platform.is_some() != self.fields.revision.is_some() {
            return Err(DetectorError::IncompleteCamera);
        }
        let mut b = Detector::builder(self.product.clone(), family)
            .signatures(self.signatures.iter().cloned())
            .string_count(self.string_count);
        if let Some(category) = &self.category {
            b = b.category(category.clone());
        }
        if let Some(sep) = &self.separator {
            b = b.separator(parse_separator(sep)?);
        }
        if self.strict {
            b = b.strict();
        }
        self.apply_fields(b).build()
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Build every declared detector, in file order.
    pub fn detectors(&self) -> Result<Vec<Detector>, ConfigError> {
        self.detectors
            .iter()
            .map(|d| {
                d.to_detector().map_err(|source| ConfigError::Detector {
                    product: d.product.clone(),
                    source,
                })
            })
            .collect()
    }

    pub fn source_provider(&self) -> StaticSourceProvider {
        StaticSourceProvider::new(self.sources.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_forms() {
        assert_eq!(parse_separator("|"), Ok(b'|'));
        assert_eq!(parse_separator(""), Ok(0));
        assert_eq!(parse_separator("\\0"), Ok(0));
        assert!(parse_separator("||").is_err());
        assert!(parse_separator("\u{e9}").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = r#"
            [[detector]]
            product = "CHDK"
            family = "fixed"
            signatures = ["CHDK"]
            string_count = 1
            colour = "red"
        "#;
        assert!(matches!(
            Config::from_toml_str(text),
            Err(ConfigError::Parse(_))
        ));
    }
}
