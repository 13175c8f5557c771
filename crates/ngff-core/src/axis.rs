//! # Axis Descriptors
//!
//! Defines [`Axis`], the descriptor for a single coordinate dimension of a
//! multiscale image, and [`AxisKind`], the closed-plus-custom category of
//! that dimension.
//!
//! ## Wire Format
//!
//! ```json
//! {"name": "z", "type": "space", "unit": "micrometer"}
//! ```
//!
//! The `type` field carries one of the three well-known categories
//! (`space`, `time`, `channel`) or any other string, which is treated as a
//! custom category tag. Unknown tags are preserved verbatim so that
//! encoding a decoded axis reproduces the original document.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// The category of a coordinate axis.
///
/// The three well-known categories get their own variants so that the
/// axis-census rules can match on them exhaustively; everything else is
/// carried as [`AxisKind::Custom`] with the original tag preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxisKind {
    /// A spatial dimension.
    Space,
    /// A temporal dimension.
    Time,
    /// A channel dimension (e.g. fluorescence channels).
    Channel,
    /// Any category outside the well-known three, tag preserved verbatim.
    Custom(String),
}

impl AxisKind {
    /// Returns the wire-format string for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Space => "space",
            Self::Time => "time",
            Self::Channel => "channel",
            Self::Custom(tag) => tag,
        }
    }

    /// Returns true for [`AxisKind::Space`].
    pub fn is_space(&self) -> bool {
        matches!(self, Self::Space)
    }

    /// Returns true for [`AxisKind::Custom`].
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<String> for AxisKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "space" => Self::Space,
            "time" => Self::Time,
            "channel" => Self::Channel,
            _ => Self::Custom(s),
        }
    }
}

impl From<&str> for AxisKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<AxisKind> for String {
    fn from(kind: AxisKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single coordinate-axis descriptor: name, category, optional unit.
///
/// # Invariants
///
/// - `name` is non-empty. Enforced by [`Axis::new`], which is the only
///   construction path — deserialization routes through the same check.
///
/// Constructed once from decoded attributes and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAxis", into = "RawAxis")]
pub struct Axis {
    name: String,
    kind: AxisKind,
    unit: Option<String>,
}

impl Axis {
    /// Create an axis descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyAxisName`] if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<AxisKind>,
        unit: Option<&str>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::EmptyAxisName);
        }
        Ok(Self {
            name,
            kind: kind.into(),
            unit: unit.map(str::to_string),
        })
    }

    /// The axis name. Unique within a multiscale's axis list.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The axis category.
    pub fn kind(&self) -> &AxisKind {
        &self.kind
    }

    /// The physical unit, if one was declared.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
}

/// Wire form of [`Axis`]. Decoding goes through [`Axis::new`] so the
/// non-empty-name invariant holds on every construction path.
#[derive(Serialize, Deserialize)]
struct RawAxis {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
}

impl TryFrom<RawAxis> for Axis {
    type Error = SchemaError;

    fn try_from(raw: RawAxis) -> Result<Self, Self::Error> {
        Axis::new(raw.name, raw.kind.as_str(), raw.unit.as_deref())
    }
}

impl From<Axis> for RawAxis {
    fn from(axis: Axis) -> Self {
        Self {
            name: axis.name,
            kind: axis.kind.into(),
            unit: axis.unit,
        }
    }
}
