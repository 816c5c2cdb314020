//! Value objects: validated names and interpreter versions.
//!
//! Each type can only be constructed through its parser, so holding a
//! `ModuleName` is proof the identifier check already passed.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Valid Python module identifier: leading letter or underscore, at least
/// two characters, ASCII word characters only.
pub const MODULE_PATTERN: &str = r"^[_a-zA-Z][_a-zA-Z0-9]+$";

static MODULE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MODULE_PATTERN).expect("MODULE_PATTERN is a valid regex"));

// ============================================================================
// ProjectName
// ============================================================================

/// Human-facing project name, also the name of the rendered directory.
///
/// Invariant: non-empty, contains no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(input: impl Into<String>) -> Result<Self, DomainError> {
        let name = input.into();

        if name.is_empty() {
            return Err(DomainError::InvalidProjectName {
                name,
                reason: "can not be empty".into(),
            });
        }
        if name.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidProjectName {
                name,
                reason: "can not contain whitespace".into(),
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// ModuleName
// ============================================================================

/// Importable package identifier (`src/<module>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn parse(input: impl Into<String>) -> Result<Self, DomainError> {
        let name = input.into();
        if MODULE_REGEX.is_match(&name) {
            Ok(Self(name))
        } else {
            Err(DomainError::InvalidModuleName { name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModuleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// InterpreterVersion
// ============================================================================

/// `major.minor.patch` of a Python interpreter.
///
/// Ordering is lexicographic over the fields, so `3.10.0 > 3.9.18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InterpreterVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl InterpreterVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: 0,
        }
    }

    pub const fn with_patch(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for InterpreterVersion {
    type Err = DomainError;

    /// Accepts `3.9`, `3.9.1`, `Python 3.9.1` and pre-release suffixes such
    /// as `3.13.0rc1` (the suffix is dropped).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidVersion {
            input: s.trim().to_string(),
        };

        let raw = s.trim();
        let raw = raw.strip_prefix("Python").map(str::trim).unwrap_or(raw);

        let mut parts = raw.split('.');
        let major = parse_leading_number(parts.next()).ok_or_else(invalid)?;
        let minor = parse_leading_number(parts.next()).ok_or_else(invalid)?;
        let patch = match parts.next() {
            Some(p) => parse_leading_number(Some(p)).ok_or_else(invalid)?,
            None => 0,
        };

        Ok(Self::with_patch(major, minor, patch))
    }
}

fn parse_leading_number(part: Option<&str>) -> Option<u32> {
    let part = part?;
    let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
