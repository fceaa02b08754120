//! Gating policy: which missing fields abort a detection for a detector family.

use std::fmt;
use std::str::FromStr;

use crate::binary::NUL;
use crate::error::DetectorError;

/// String-delimiting convention and field layout a detector follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Fixed string count, NUL-terminated, camera and source mandatory.
    FixedSchema,
    /// Configurable separator; adds category, build, compiler and version decorations.
    Extended,
}

impl Family {
    pub fn label(self) -> &'static str {
        match self {
            Family::FixedSchema => "fixed",
            Family::Extended => "extended",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Family {
    type Err = DetectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixed-schema" | "inner" => Ok(Family::FixedSchema),
            "extended" | "product" => Ok(Family::Extended),
            _ => Err(DetectorError::UnknownFamily(s.to_string())),
        }
    }
}

/// Terminator byte plus the field-gating table for one detector.
///
/// A `*_required` flag set to `true` makes absence of that field collapse the whole
/// detection to `None`; otherwise the field is carried through as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub family: Family,
    pub separator: u8,
    pub language_required: bool,
    pub created_required: bool,
    pub camera_required: bool,
    pub source_required: bool,
}

impl Policy {
    /// NUL-terminated strings; camera and source gate, locale and timestamp do not.
    pub const FIXED_SCHEMA: Policy = Policy {
        family: Family::FixedSchema,
        separator: NUL,
        language_required: false,
        created_required: false,
        camera_required: true,
        source_required: true,
    };

    /// Strings split on `separator`; only extraction and version gate.
    pub const fn extended(separator: u8) -> Policy {
        Policy {
            family: Family::Extended,
            separator,
            language_required: false,
            created_required: false,
            camera_required: false,
            source_required: false,
        }
    }

    pub const fn for_family(family: Family) -> Policy {
        match family {
            Family::FixedSchema => Self::FIXED_SCHEMA,
            Family::Extended => Self::extended(NUL),
        }
    }

    /// Also gate on locale and creation timestamp.
    pub const fn strict(self) -> Policy {
        Policy {
            language_required: true,
            created_required: true,
            ..self
        }
    }

    /// Category, build and compiler info are only resolved for the extended family.
    #[inline]
    pub const fn resolves_extras(&self) -> bool {
        matches!(self.family, Family::Extended)
    }
}
