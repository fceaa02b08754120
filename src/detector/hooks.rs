//! Per-product field hooks and ready-made hooks reading a field by position.

use chrono::{DateTime, Utc};

use crate::binary::ExtractedFields;
use crate::fields::{
    camera_info, parse_locale, parse_timestamp, parse_version, split_version, ProductVersion,
};
use crate::software::{SoftwareBuildInfo, SoftwareCameraInfo, SoftwareCompilerInfo};

/// Pure function from one extraction pass to an optional typed field.
pub type FieldHook<T> = Box<dyn Fn(&ExtractedFields) -> Option<T> + Send + Sync>;

/// The customization points of a detector. Every hook defaults to "absent".
pub struct Hooks {
    pub version: FieldHook<ProductVersion>,
    pub language: FieldHook<String>,
    pub created: FieldHook<DateTime<Utc>>,
    pub camera: FieldHook<SoftwareCameraInfo>,
    /// Source name to resolve; the product name is used when this yields nothing.
    pub source_name: FieldHook<String>,
    /// Channel qualifier, fixed-schema family only.
    pub source_channel: FieldHook<String>,
    pub build: FieldHook<SoftwareBuildInfo>,
    pub compiler: FieldHook<SoftwareCompilerInfo>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            version: absent(),
            language: absent(),
            created: absent(),
            camera: absent(),
            source_name: absent(),
            source_channel: absent(),
            build: absent(),
            compiler: absent(),
        }
    }
}

/// Hook that never yields a value.
pub fn absent<T: 'static>() -> FieldHook<T> {
    Box::new(|_| None)
}

/// Raw text of field `index`.
pub fn text_at(index: usize) -> FieldHook<String> {
    Box::new(move |f| f.get(index).map(str::to_string))
}

/// Field `index` parsed as a bare version.
pub fn version_at(index: usize) -> FieldHook<ProductVersion> {
    Box::new(move |f| f.get(index).and_then(parse_version).map(ProductVersion::plain))
}

/// Field `index` split into prefix, version and suffix, after removing `strip` from its start.
pub fn split_version_at(index: usize, strip: Option<String>) -> FieldHook<ProductVersion> {
    Box::new(move |f| {
        let text = f.get(index)?;
        let text = match strip.as_deref() {
            Some(tag) => text.strip_prefix(tag).unwrap_or(text),
            None => text,
        };
        split_version(text)
    })
}

/// Field `index` as a locale identifier.
pub fn locale_at(index: usize) -> FieldHook<String> {
    Box::new(move |f| f.get(index).and_then(parse_locale))
}

/// Fields at `indices` joined with a space and parsed as a timestamp.
///
/// Lets a date and a time stored as separate strings form one value.
pub fn timestamp_at(indices: Vec<usize>) -> FieldHook<DateTime<Utc>> {
    Box::new(move |f| {
        let parts = indices
            .iter()
            .map(|&i| f.get(i))
            .collect::<Option<Vec<_>>>()?;
        parse_timestamp(&parts.join(" "))
    })
}

/// Platform and revision from two fields; absent unless both are there.
pub fn camera_at(platform: usize, revision: usize) -> FieldHook<SoftwareCameraInfo> {
    Box::new(move |f| camera_info(f.get(platform), f.get(revision)))
}
