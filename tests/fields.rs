//! Field parser tests.

use chrono::{TimeZone, Utc};
use firmsoft::fields::{
    camera_info, parse_locale, parse_timestamp, parse_version, split_version, Version,
};

#[test]
fn version_is_absent_when_unparsable() {
    assert_eq!(parse_version("1.3.0"), Some(Version::new(1, 3).with_build(0)));
    assert_eq!(parse_version("1.3.0-beta"), None);
    assert_eq!(parse_version("trunk"), None);
}

#[test]
fn split_embedded_version() {
    let v = split_version("SDM 1.86 (dev)").unwrap();
    assert_eq!(v.prefix.as_deref(), Some("SDM "));
    assert_eq!(v.version, Version::new(1, 86));
    assert_eq!(v.suffix.as_deref(), Some(" (dev)"));
}

#[test]
fn split_uses_leftmost_dotted_number() {
    let v = split_version("1.4.1-5123-full 2.0").unwrap();
    assert_eq!(v.version, Version::new(1, 4).with_build(1));
    assert_eq!(v.suffix.as_deref(), Some("-5123-full 2.0"));
}

#[test]
fn timestamp_is_utc() {
    assert_eq!(
        parse_timestamp("20121201000000"),
        Some(Utc.with_ymd_and_hms(2012, 12, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_timestamp("not a date"), None);
}

#[test]
fn locale_identifiers() {
    assert_eq!(parse_locale("en").as_deref(), Some("en"));
    assert_eq!(parse_locale("de_DE").as_deref(), Some("de-DE"));
    assert_eq!(parse_locale("??"), None);
}

#[test]
fn camera_pair_is_all_or_nothing() {
    assert!(camera_info(Some("PLATFORMX"), Some("REV42")).is_some());
    assert!(camera_info(Some("PLATFORMX"), None).is_none());
    assert!(camera_info(None, None).is_none());
}
