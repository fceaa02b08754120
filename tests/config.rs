//! Declarative detector configuration tests.
#![cfg(feature = "config")]

use firmsoft::{detect_software, Config, ConfigError, DetectorError, Family, Version};

const CONFIG: &str = r#"
[[source]]
product = "CHDK"
name = "CHDK"
channel = "release"
url = "https://example.org/chdk"

[[source]]
product = "SDM"
name = "SDM"

[[detector]]
product = "CHDK"
family = "fixed"
signatures = ["CHDK ver "]
string_count = 5

[detector.fields]
version = 0
language = 1
created = [2]
platform = 3
revision = 4

[[detector]]
product = "SDM"
family = "extended"
category = "PS"
signatures = ["SDM|"]
string_count = 5
separator = "|"

[detector.fields]
version = 0
version_strip = "v"
language = 1
platform = 2
revision = 3
compiler_name = 4

[detector.languages]
"0" = "en"
"1" = "de"
"#;

#[test]
fn builds_detectors_in_file_order() {
    let config = Config::from_toml_str(CONFIG).unwrap();
    let detectors = config.detectors().unwrap();
    assert_eq!(detectors.len(), 2);
    assert_eq!(detectors[0].product_name(), "CHDK");
    assert_eq!(detectors[0].family(), Family::FixedSchema);
    assert_eq!(detectors[1].family(), Family::Extended);
    assert_eq!(detectors[1].policy().separator, b'|');
    assert_eq!(detectors[1].category_name(), Some("PS"));
}

#[test]
fn fixed_detector_from_config() {
    let config = Config::from_toml_str(CONFIG).unwrap();
    let detectors = config.detectors().unwrap();
    let data = b"\x00\x00CHDK ver 1.3.0\0en\020121201000000\0PLATFORMX\0REV42\0";
    let info = detect_software(data, &detectors, &config.source_provider()).unwrap();
    assert_eq!(info.product.name, "CHDK");
    assert_eq!(info.source.unwrap().url.as_deref(), Some("https://example.org/chdk"));
}

#[test]
fn extended_detector_from_config() {
    let config = Config::from_toml_str(CONFIG).unwrap();
    let detectors = config.detectors().unwrap();
    let data = b"....SDM|v1.86-rc2|1|a720|100c|gcc|";
    let info = detect_software(data, &detectors, &config.source_provider()).unwrap();
    assert_eq!(info.product.name, "SDM");
    assert_eq!(info.product.version, Version::new(1, 86));
    assert_eq!(info.product.version_suffix.as_deref(), Some("-rc2"));
    assert_eq!(info.product.language.as_deref(), Some("de"));
    assert_eq!(info.compiler.unwrap().name, "gcc");
    assert_eq!(info.camera.unwrap().revision, "100c");
}

#[test]
fn out_of_range_field_is_reported() {
    let text = r#"
        [[detector]]
        product = "CHDK"
        family = "fixed"
        signatures = ["CHDK"]
        string_count = 2

        [detector.fields]
        version = 0
        platform = 1
        revision = 2
    "#;
    let config = Config::from_toml_str(text).unwrap();
    match config.detectors() {
        Err(ConfigError::Detector { product, source }) => {
            assert_eq!(product, "CHDK");
            assert_eq!(
                source,
                DetectorError::FieldOutOfRange {
                    field: "revision",
                    index: 2,
                    count: 2
                }
            );
        }
        other => panic!("expected detector error, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn unknown_family_is_a_detector_error() {
    let text = r#"
        [[detector]]
        product = "CHDK"
        family = "mystery"
        signatures = ["CHDK"]
        string_count = 1
    "#;
    let config = Config::from_toml_str(text).unwrap();
    assert!(matches!(
        config.detectors(),
        Err(ConfigError::Detector {
            source: DetectorError::UnknownFamily(_),
            ..
        })
    ));
}

#[test]
fn family_aliases_are_accepted() {
    let text = r#"
        [[detector]]
        product = "CHDK"
        family = "inner"
        signatures = ["CHDK"]
        string_count = 1

        [[detector]]
        product = "SDM"
        family = "product"
        signatures = ["SDM"]
        string_count = 1
    "#;
    let detectors = Config::from_toml_str(text).unwrap().detectors().unwrap();
    assert_eq!(detectors[0].family(), Family::FixedSchema);
    assert_eq!(detectors[1].family(), Family::Extended);
}

#[test]
fn half_camera_mapping_is_rejected() {
    for half in ["platform = 1", "revision = 1"] {
        let text = format!(
            r#"
            [[detector]]
            product = "CHDK"
            family = "fixed"
            signatures = ["CHDK "]
            string_count = 2

            [detector.fields]
            version = 0
            {half}
            "#
        );
        let config = Config::from_toml_str(&text).unwrap();
        assert!(matches!(
            config.detectors(),
            Err(ConfigError::Detector {
                source: DetectorError::IncompleteCamera,
                ..
            })
        ));
    }
}

#[test]
fn huge_string_count_never_matches() {
    let text = r#"
        [[detector]]
        product = "SDM"
        family = "extended"
        signatures = ["SDM"]
        string_count = 9000000000000000000

        [detector.fields]
        version = 0
    "#;
    let config = Config::from_toml_str(text).unwrap();
    let detectors = config.detectors().unwrap();
    assert!(detect_software(b"SDM1.0\0", &detectors, &config.source_provider()).is_none());
}

#[test]
fn missing_file_is_io_error() {
    let err = Config::load("/nonexistent/firmsoft.toml".as_ref()).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
