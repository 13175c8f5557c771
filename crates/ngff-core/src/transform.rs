//! # Coordinate Transformations
//!
//! Defines [`Transform`], the closed variant type for the four
//! transformation shapes that may appear in `coordinateTransformations`
//! metadata: a scale or a translation, each either by value (a numeric
//! vector) or by reference (a store-relative path).
//!
//! ## Wire Format
//!
//! ```json
//! {"type": "scale",       "scale":       [1.0, 0.5, 0.5]}
//! {"type": "translation", "translation": [0.0, 10.0, 10.0]}
//! {"type": "scale",       "path": "transforms/s0"}
//! {"type": "translation", "path": "transforms/t0"}
//! ```
//!
//! ## Design
//!
//! An explicit tagged union rather than structural disambiguation:
//! exhaustive `match` in the transformation validators statically
//! guarantees every variant combination is handled. Path variants carry no
//! statically known dimensionality — validators that compare vector
//! lengths skip them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A coordinate transformation mapping array index space to physical
/// coordinate space. Immutable value type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransform", into = "RawTransform")]
pub enum Transform {
    /// A per-axis scale, by value.
    Scale(Vec<f64>),
    /// A per-axis translation, by value.
    Translation(Vec<f64>),
    /// A scale stored elsewhere in the hierarchy, referenced by path.
    ScalePath(String),
    /// A translation stored elsewhere in the hierarchy, referenced by path.
    TranslationPath(String),
}

impl Transform {
    /// The wire-format `type` discriminant: `"scale"` or `"translation"`.
    pub fn wire_kind(&self) -> &'static str {
        match self {
            Self::Scale(_) | Self::ScalePath(_) => "scale",
            Self::Translation(_) | Self::TranslationPath(_) => "translation",
        }
    }

    /// Returns true for the two scale variants.
    pub fn is_scale(&self) -> bool {
        matches!(self, Self::Scale(_) | Self::ScalePath(_))
    }

    /// Returns true for the two translation variants.
    pub fn is_translation(&self) -> bool {
        matches!(self, Self::Translation(_) | Self::TranslationPath(_))
    }

    /// Returns true for the path-referenced variants.
    pub fn is_path(&self) -> bool {
        matches!(self, Self::ScalePath(_) | Self::TranslationPath(_))
    }

    /// The vector length of a by-value transform.
    ///
    /// `None` for path variants: their dimensionality is only known through
    /// the referenced node, which this type does not resolve.
    pub fn dimensionality(&self) -> Option<usize> {
        match self {
            Self::Scale(v) | Self::Translation(v) => Some(v.len()),
            Self::ScalePath(_) | Self::TranslationPath(_) => None,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale(v) => write!(f, "scale({v:?})"),
            Self::Translation(v) => write!(f, "translation({v:?})"),
            Self::ScalePath(p) => write!(f, "scale(path = {p:?})"),
            Self::TranslationPath(p) => write!(f, "translation(path = {p:?})"),
        }
    }
}

/// Wire form of [`Transform`]. A valid encoding carries the `type`
/// discriminant plus exactly one of the vector field matching that type or
/// `path`; everything else is rejected at decode time.
#[derive(Serialize, Deserialize)]
struct RawTransform {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    translation: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl TryFrom<RawTransform> for Transform {
    type Error = SchemaError;

    fn try_from(raw: RawTransform) -> Result<Self, Self::Error> {
        let malformed = |reason: &str| SchemaError::MalformedTransform {
            reason: reason.to_string(),
        };
        let RawTransform {
            kind,
            scale,
            translation,
            path,
        } = raw;
        match (kind.as_str(), scale, translation, path) {
            ("scale", Some(v), None, None) => Ok(Self::Scale(v)),
            ("scale", None, None, Some(p)) => Ok(Self::ScalePath(p)),
            ("scale", _, _, _) => Err(malformed(
                "a scale transform must carry either a `scale` vector or a `path`, and nothing else",
            )),
            ("translation", None, Some(v), None) => Ok(Self::Translation(v)),
            ("translation", None, None, Some(p)) => Ok(Self::TranslationPath(p)),
            ("translation", _, _, _) => Err(malformed(
                "a translation transform must carry either a `translation` vector or a `path`, and nothing else",
            )),
            (other, _, _, _) => Err(SchemaError::MalformedTransform {
                reason: format!("unknown transform type {other:?}, expected \"scale\" or \"translation\""),
            }),
        }
    }
}

impl From<Transform> for RawTransform {
    fn from(tx: Transform) -> Self {
        let kind = tx.wire_kind().to_string();
        match tx {
            Transform::Scale(v) => Self {
                kind,
                scale: Some(v),
                translation: None,
                path: None,
            },
            Transform::Translation(v) => Self {
                kind,
                scale: None,
                translation: Some(v),
                path: None,
            },
            Transform::ScalePath(p) | Transform::TranslationPath(p) => Self {
                kind,
                scale: None,
                translation: None,
                path: Some(p),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_all_four_shapes() {
        let scale: Transform = serde_json::from_value(json!({"type": "scale", "scale": [1.0, 0.5]})).unwrap();
        assert_eq!(scale, Transform::Scale(vec![1.0, 0.5]));

        let translation: Transform =
            serde_json::from_value(json!({"type": "translation", "translation": [0.0, 10.0]})).unwrap();
        assert_eq!(translation, Transform::Translation(vec![0.0, 10.0]));

        let scale_path: Transform =
            serde_json::from_value(json!({"type": "scale", "path": "transforms/s0"})).unwrap();
        assert_eq!(scale_path, Transform::ScalePath("transforms/s0".to_string()));

        let translation_path: Transform =
            serde_json::from_value(json!({"type": "translation", "path": "transforms/t0"})).unwrap();
        assert_eq!(
            translation_path,
            Transform::TranslationPath("transforms/t0".to_string())
        );
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let result: Result<Transform, _> =
            serde_json::from_value(json!({"type": "rotation", "scale": [1.0]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_vector_and_path_together() {
        let result: Result<Transform, _> =
            serde_json::from_value(json!({"type": "scale", "scale": [1.0], "path": "s"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_mismatched_vector_field() {
        // A scale carrying a `translation` vector fits none of the four shapes.
        let result: Result<Transform, _> =
            serde_json::from_value(json!({"type": "scale", "translation": [1.0]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_matches_wire_form() {
        let encoded = serde_json::to_value(Transform::Scale(vec![1.0, 0.5, 0.5])).unwrap();
        assert_eq!(encoded, json!({"type": "scale", "scale": [1.0, 0.5, 0.5]}));

        let encoded = serde_json::to_value(Transform::TranslationPath("t".to_string())).unwrap();
        assert_eq!(encoded, json!({"type": "translation", "path": "t"}));
    }

    #[test]
    fn test_dimensionality_is_static_only_for_vectors() {
        assert_eq!(Transform::Scale(vec![1.0, 1.0, 1.0]).dimensionality(), Some(3));
        assert_eq!(Transform::Translation(vec![0.0]).dimensionality(), Some(1));
        assert_eq!(Transform::ScalePath("s".to_string()).dimensionality(), None);
        assert_eq!(Transform::TranslationPath("t".to_string()).dimensionality(), None);
    }

    #[test]
    fn test_display_names_kind_and_payload() {
        assert_eq!(Transform::Scale(vec![1.0, 2.0]).to_string(), "scale([1.0, 2.0])");
        assert_eq!(
            Transform::ScalePath("s0".to_string()).to_string(),
            "scale(path = \"s0\")"
        );
    }
}
