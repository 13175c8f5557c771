//! # Omero Rendering Metadata
//!
//! Typed passthrough for the optional `omero` rendering block that sits
//! next to `multiscales` in image attributes. Only the channel color
//! carries an invariant (6-digit RGB hex); everything else is plain data.

use std::fmt;

use serde::{Deserialize, Serialize};

use ngff_core::SchemaError;

/// The `omero` rendering block: per-channel display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Omero {
    /// Per-channel rendering settings, one entry per channel.
    pub channels: Vec<OmeroChannel>,
}

/// Display settings for one rendered channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmeroChannel {
    /// Render color as a 6-digit RGB hex string.
    pub color: ChannelColor,
    /// Intensity window, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<ChannelWindow>,
    /// Human-readable channel label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the channel is rendered by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Intensity window bounds for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelWindow {
    /// Lowest representable intensity.
    pub min: f64,
    /// Highest representable intensity.
    pub max: f64,
    /// Lower bound of the displayed range.
    pub start: f64,
    /// Upper bound of the displayed range.
    pub end: f64,
}

/// A 6-digit RGB hex color, e.g. `"00FF00"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelColor(String);

impl ChannelColor {
    /// Validate a color string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidChannelColor`] unless the string is
    /// exactly 6 hexadecimal digits.
    pub fn new(color: impl Into<String>) -> Result<Self, SchemaError> {
        let color = color.into();
        if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SchemaError::InvalidChannelColor { got: color });
        }
        Ok(Self(color))
    }

    /// The color as its wire string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChannelColor {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ChannelColor> for String {
    fn from(color: ChannelColor) -> Self {
        color.0
    }
}

impl fmt::Display for ChannelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
