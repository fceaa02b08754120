//! Field parsers: turn extracted strings into typed product metadata.
//!
//! Every parser returns `Option`; unparsable input is indistinguishable from a missing field.

mod camera;
mod locale;
mod timestamp;
mod version;

pub use camera::camera_info;
pub use locale::{locale_from_table, parse_locale};
pub use timestamp::parse_timestamp;
pub use version::{parse_version, split_version, ParseVersionError, ProductVersion, Version};
