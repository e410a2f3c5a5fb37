use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classified state of a status badge.
///
/// The snake_case tokens are the only schema downstream renderers switch on,
/// so `as_str`, serde and `FromStr` all agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusValue {
    Success,
    Failure,
    InProgress,
    Queued,
    #[default]
    Unknown,
}

impl StatusValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::InProgress => "in_progress",
            Self::Queued => "queued",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            "in_progress" => Ok(Self::InProgress),
            "queued" => Ok(Self::Queued),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

/// Coverage read from a badge: a percentage in `[0, 100]` or `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CoverageValue {
    Percent(f64),
    #[default]
    Unknown,
}

impl CoverageValue {
    /// Build a percentage, rounded to one decimal place.
    ///
    /// Returns `None` for values outside `[0, 100]` and for NaN/infinity.
    pub fn percent(value: f64) -> Option<Self> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return None;
        }
        Some(Self::Percent((value * 10.0).round() / 10.0))
    }

    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Self::Percent(value) => Some(*value),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for CoverageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(value) if value.fract() == 0.0 => write!(f, "{:.0}%", value),
            Self::Percent(value) => write!(f, "{:.1}%", value),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

// Serialized as a bare number or the string "unknown".
impl Serialize for CoverageValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Percent(value) => serializer.serialize_f64(*value),
            Self::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for CoverageValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => CoverageValue::percent(value).ok_or_else(|| {
                serde::de::Error::custom(format!("coverage {} outside [0, 100]", value))
            }),
            Raw::Text(text) if text == "unknown" => Ok(CoverageValue::Unknown),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a number or \"unknown\", got \"{}\"",
                text
            ))),
        }
    }
}

/// Which badge a target or reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Build,
    Tests,
    Coverage,
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 3] = [BadgeKind::Build, BadgeKind::Tests, BadgeKind::Coverage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Tests => "tests",
            Self::Coverage => "coverage",
        }
    }

    /// Status badges are classified, the coverage badge is extracted.
    pub fn is_status(&self) -> bool {
        !matches!(self, Self::Coverage)
    }
}

impl fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(Self::Build),
            "tests" => Ok(Self::Tests),
            "coverage" => Ok(Self::Coverage),
            _ => Err(format!("Invalid badge kind: {}", s)),
        }
    }
}

/// Result of reading one badge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BadgeValue {
    Status(StatusValue),
    Coverage(CoverageValue),
}

impl BadgeValue {
    /// The `unknown` reading appropriate for a badge kind.
    pub fn unknown_for(kind: BadgeKind) -> Self {
        if kind.is_status() {
            Self::Status(StatusValue::Unknown)
        } else {
            Self::Coverage(CoverageValue::Unknown)
        }
    }
}

/// Owner/repo pair plus the branch and workflow files badges are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCoordinates {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub workflow_file: String,
    pub test_workflow_file: String,
}

impl RepositoryCoordinates {
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
