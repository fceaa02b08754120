//! Dotted numeric versions and the prefix/version/suffix splitter.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

/// A dotted numeric version with 2 to 4 components (`major.minor[.build[.revision]]`).
///
/// Components that were not written are absent, not zero: `1.3` and `1.3.0` are
/// distinct, and `1.3` orders before `1.3.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

/// Returned by [`Version::from_str`]; carries no detail since callers treat it as absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseVersionError;

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid version string")
    }
}

impl std::error::Error for ParseVersionError {}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    pub const fn with_build(self, build: u32) -> Self {
        Self {
            build: Some(build),
            ..self
        }
    }

    pub const fn with_revision(self, revision: u32) -> Self {
        Self {
            revision: Some(revision),
            ..self
        }
    }

    fn components(&self) -> [Option<u32>; 4] {
        [Some(self.major), Some(self.minor), self.build, self.revision]
    }
}

/// Parse one component: ASCII digits only, value within the signed 32-bit range.
fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u32>().ok().filter(|&v| v <= i32::MAX as u32)
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(ParseVersionError);
        }
        let mut values = [None; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = Some(parse_component(part.trim()).ok_or(ParseVersionError)?);
        }
        match values {
            [Some(major), Some(minor), build, revision] => Ok(Self {
                major,
                minor,
                build,
                revision,
            }),
            _ => Err(ParseVersionError),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
            if let Some(revision) = self.revision {
                write!(f, ".{}", revision)?;
            }
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components().cmp(&other.components())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a whole string as a version; anything unparsable is `None`.
#[inline]
pub fn parse_version(text: &str) -> Option<Version> {
    text.parse().ok()
}

/// A product version together with the non-numeric text around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVersion {
    pub version: Version,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl ProductVersion {
    /// A bare version with no decorations.
    pub fn plain(version: Version) -> Self {
        Self {
            version,
            prefix: None,
            suffix: None,
        }
    }
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(?:\.\d+){1,3}").expect("static version pattern"))
}

/// Split `text` into prefix, numeric version and suffix around the first usable dotted number.
///
/// `prefix + version.to_string() + suffix == text` for every accepted input. A dotted
/// number that would not print back identically (leading zeros, out of range) is
/// skipped and the next one is tried; text where no dotted number qualifies is `None`,
/// so `"CHDK 1.02"` has no version. Empty prefix or suffix is reported as `Some("")`.
pub fn split_version(text: &str) -> Option<ProductVersion> {
    version_pattern().find_iter(text).find_map(|found| {
        let version = parse_version(found.as_str())?;
        if version.to_string() != found.as_str() {
            return None;
        }
        Some(ProductVersion {
            version,
            prefix: Some(text[..found.start()].to_string()),
            suffix: Some(text[found.end()..].to_string()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_to_four_components() {
        assert_eq!(parse_version("1.2"), Some(Version::new(1, 2)));
        assert_eq!(
            parse_version("1.2.3.4"),
            Some(Version::new(1, 2).with_build(3).with_revision(4))
        );
        assert_eq!(parse_version("1"), None);
        assert_eq!(parse_version("1.2.3.4.5"), None);
    }

    #[test]
    fn rejects_garbage_and_negative() {
        assert_eq!(parse_version("1.x"), None);
        assert_eq!(parse_version("-1.2"), None);
        assert_eq!(parse_version("1..2"), None);
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("2147483648.0"), None);
    }

    #[test]
    fn missing_components_order_first() {
        let short = Version::new(1, 3);
        let long = Version::new(1, 3).with_build(0);
        assert!(short < long);
        assert!(long < Version::new(1, 4));
    }

    #[test]
    fn display_keeps_written_components() {
        assert_eq!(parse_version("1.3.0").unwrap().to_string(), "1.3.0");
    }

    #[test]
    fn split_with_suffix() {
        let v = split_version("1.2.3-beta").unwrap();
        assert_eq!(v.prefix.as_deref(), Some(""));
        assert_eq!(v.version, Version::new(1, 2).with_build(3));
        assert_eq!(v.suffix.as_deref(), Some("-beta"));
    }

    #[test]
    fn split_with_prefix() {
        let v = split_version("CHDK-DE 1.4.1").unwrap();
        assert_eq!(v.prefix.as_deref(), Some("CHDK-DE "));
        assert_eq!(v.suffix.as_deref(), Some(""));
    }

    #[test]
    fn split_rejects_non_canonical_and_missing() {
        assert_eq!(split_version("release"), None);
        assert_eq!(split_version("build 7"), None);
        assert_eq!(split_version("v1.02"), None);
        assert_eq!(split_version("CHDK 1.02"), None);
    }

    #[test]
    fn split_skips_unusable_number() {
        let v = split_version("x 99999999999.1 y 1.2").unwrap();
        assert_eq!(v.version, Version::new(1, 2));
        assert_eq!(v.prefix.as_deref(), Some("x 99999999999.1 y "));
        assert_eq!(v.suffix.as_deref(), Some(""));
        let v = split_version("r01.5 build 2.3-a").unwrap();
        assert_eq!(v.version, Version::new(2, 3));
        assert_eq!(v.suffix.as_deref(), Some("-a"));
    }
}
