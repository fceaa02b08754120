//! The detection pipeline shared by every detector.
//!
//! Stages run in a fixed order: extract, product, camera, source, extras. A stage
//! returning `None` collapses the whole detection; no partial [`SoftwareInfo`] escapes.

use log::{debug, trace};

use crate::binary::ExtractedFields;
use crate::detector::Detector;
use crate::software::{
    CategoryInfo, SoftwareBuildInfo, SoftwareCameraInfo, SoftwareCompilerInfo, SoftwareInfo,
    SoftwareProductInfo, SoftwareSourceInfo, SCHEMA_VERSION,
};
use crate::source::SourceProvider;

/// Log the failed gate and pass the value through.
#[inline]
fn gate<T>(detector: &Detector, stage: &str, offset: usize, value: Option<T>) -> Option<T> {
    if value.is_none() {
        trace!("{}: no {} at offset {}", detector.product_name(), stage, offset);
    }
    value
}

/// Keep an optional field, or fail the stage when the policy requires it.
#[inline]
fn optional<T>(value: Option<T>, required: bool) -> Option<Option<T>> {
    match value {
        None if required => None,
        v => Some(v),
    }
}

pub(crate) fn product_stage(
    detector: &Detector,
    fields: &ExtractedFields,
) -> Option<SoftwareProductInfo> {
    let hooks = detector.hooks();
    let policy = detector.policy();
    let version = (hooks.version)(fields)?;
    let language = optional((hooks.language)(fields), policy.language_required)?;
    let created = optional((hooks.created)(fields), policy.created_required)?;
    Some(SoftwareProductInfo {
        name: detector.product_name().to_string(),
        version: version.version,
        version_prefix: version.prefix,
        version_suffix: version.suffix,
        language,
        created,
    })
}

pub(crate) fn camera_stage(
    detector: &Detector,
    fields: &ExtractedFields,
) -> Option<Option<SoftwareCameraInfo>> {
    optional(
        (detector.hooks().camera)(fields),
        detector.policy().camera_required,
    )
}

pub(crate) fn source_stage(
    detector: &Detector,
    fields: &ExtractedFields,
    product: &SoftwareProductInfo,
    sources: &dyn SourceProvider,
) -> Option<Option<SoftwareSourceInfo>> {
    let hooks = detector.hooks();
    let policy = detector.policy();
    let source_name =
        (hooks.source_name)(fields).unwrap_or_else(|| detector.product_name().to_string());
    let source = if policy.resolves_extras() {
        sources.sources(product, &source_name).into_iter().next()
    } else {
        let channel = (hooks.source_channel)(fields);
        sources.source(detector.product_name(), &source_name, channel.as_deref())
    };
    optional(source, policy.source_required)
}

type Extras = (
    Option<CategoryInfo>,
    Option<SoftwareBuildInfo>,
    Option<SoftwareCompilerInfo>,
);

pub(crate) fn extras_stage(detector: &Detector, fields: &ExtractedFields) -> Extras {
    if !detector.policy().resolves_extras() {
        return (None, None, None);
    }
    let hooks = detector.hooks();
    let category = detector.category_name().map(|name| CategoryInfo {
        name: name.to_string(),
    });
    (category, (hooks.build)(fields), (hooks.compiler)(fields))
}

/// Run every stage for `detector` on `data` starting at `offset`.
pub(crate) fn run(
    detector: &Detector,
    data: &[u8],
    offset: usize,
    sources: &dyn SourceProvider,
) -> Option<SoftwareInfo> {
    let fields = gate(detector, "strings", offset, detector.extract(data, offset))?;
    let product = gate(detector, "product", offset, product_stage(detector, &fields))?;
    let camera = gate(detector, "camera", offset, camera_stage(detector, &fields))?;
    let source = gate(
        detector,
        "source",
        offset,
        source_stage(detector, &fields, &product, sources),
    )?;
    let (category, build, compiler) = extras_stage(detector, &fields);

    debug!(
        "{} {} detected at offset {}",
        product.name, product.version, offset
    );
    Some(SoftwareInfo {
        version: SCHEMA_VERSION,
        category,
        product,
        camera,
        source,
        build,
        compiler,
    })
}
