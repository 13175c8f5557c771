//! # Multiscale Metadata Models
//!
//! The typed representation of one multiscale image pyramid:
//! [`TransformPair`] (an ordered 1-or-2 element transformation sequence),
//! [`Dataset`] (one resolution level), and [`Multiscale`] (the ordered,
//! non-empty collection of resolution levels plus the shared axis list).
//!
//! ## Decoding Is Validating
//!
//! Every type here deserializes through a `try_from` gate that runs the
//! structural rules from [`crate::validate`] plus the cross-field checks,
//! so a decoded value is a validated value. Later pipeline stages never
//! see an invalid tree. Encoding a validated value and decoding it again
//! yields an equal value, and re-validating a validated value is the
//! identity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ngff_core::{Axis, CrossFieldError, NgffError, SchemaError, StorePath, Transform};

use crate::validate::{validate_axes, validate_transforms};

/// An ordered transformation sequence of one scale followed by an
/// optional translation.
///
/// # Invariants
///
/// - Element 0 is [`Transform::Scale`] or [`Transform::ScalePath`].
/// - Element 1, when present, is [`Transform::Translation`] or
///   [`Transform::TranslationPath`].
/// - By-value members carry vectors of equal length.
///
/// The only construction paths are [`TransformPair::new`] and
/// [`TransformPair::build`]; deserialization routes through the same
/// rules, so the invariants hold for every value of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Transform>", into = "Vec<Transform>")]
pub struct TransformPair {
    scale: Transform,
    translation: Option<Transform>,
}

impl TransformPair {
    /// Validate an ordered transformation sequence and take ownership of
    /// it.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule from
    /// [`crate::validate::validate_transforms`].
    pub fn new(transforms: Vec<Transform>) -> Result<Self, SchemaError> {
        validate_transforms(&transforms)?;
        let mut iter = transforms.into_iter();
        let Some(scale) = iter.next() else {
            // validate_transforms rejects empty sequences
            return Err(SchemaError::TransformCount { got: 0 });
        };
        Ok(Self {
            scale,
            translation: iter.next(),
        })
    }

    /// Build a by-value pair from a scale vector and an optional
    /// translation vector.
    pub fn build(scale: Vec<f64>, translation: Option<Vec<f64>>) -> Result<Self, SchemaError> {
        let mut transforms = vec![Transform::Scale(scale)];
        if let Some(t) = translation {
            transforms.push(Transform::Translation(t));
        }
        Self::new(transforms)
    }

    /// The scale transform (element 0).
    pub fn scale(&self) -> &Transform {
        &self.scale
    }

    /// The translation transform (element 1), if present.
    pub fn translation(&self) -> Option<&Transform> {
        self.translation.as_ref()
    }

    /// The dimensionality of the scale transform; `None` when the scale
    /// is path-referenced.
    pub fn dimensionality(&self) -> Option<usize> {
        self.scale.dimensionality()
    }

    /// The sequence as an owned vector, in order.
    pub fn to_vec(&self) -> Vec<Transform> {
        let mut out = vec![self.scale.clone()];
        if let Some(t) = &self.translation {
            out.push(t.clone());
        }
        out
    }
}

impl TryFrom<Vec<Transform>> for TransformPair {
    type Error = SchemaError;

    fn try_from(transforms: Vec<Transform>) -> Result<Self, Self::Error> {
        Self::new(transforms)
    }
}

impl From<TransformPair> for Vec<Transform> {
    fn from(pair: TransformPair) -> Self {
        pair.to_vec()
    }
}

/// One resolution level of a multiscale image: a store-relative array
/// path bound to its transformation pair.
///
/// Construction performs no checks beyond those of its parts — whether
/// the path resolves to a real array is the group-consistency checker's
/// concern, not this type's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    path: StorePath,
    #[serde(rename = "coordinateTransformations")]
    transforms: TransformPair,
}

impl Dataset {
    /// Bind a path to a validated transformation pair.
    pub fn new(path: StorePath, transforms: TransformPair) -> Self {
        Self { path, transforms }
    }

    /// Build a dataset from raw parts: a path string, a scale vector, and
    /// an optional translation vector.
    pub fn build(
        path: &str,
        scale: Vec<f64>,
        translation: Option<Vec<f64>>,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            path: StorePath::new(path)?,
            transforms: TransformPair::build(scale, translation)?,
        })
    }

    /// The array path, relative to the owning group.
    pub fn path(&self) -> &StorePath {
        &self.path
    }

    /// The transformation pair for this resolution level.
    pub fn transforms(&self) -> &TransformPair {
        &self.transforms
    }
}

/// One multiscale image pyramid: a shared axis list, an ordered non-empty
/// list of resolution levels, and an optional collection-level
/// transformation pair applied after the per-dataset ones.
///
/// `version`, `name`, `type`, and `metadata` are opaque passthrough
/// fields: they survive a decode/encode round trip untouched and are
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMultiscale", into = "RawMultiscale")]
pub struct Multiscale {
    axes: Vec<Axis>,
    datasets: Vec<Dataset>,
    transforms: Option<TransformPair>,
    version: Option<String>,
    name: Option<Value>,
    multiscale_type: Option<Value>,
    metadata: Option<Value>,
}

impl Multiscale {
    /// Validate and assemble a multiscale collection.
    ///
    /// Runs the axis rule set, requires a non-empty dataset list, and
    /// performs the two cross-field dimensionality checks (collection
    /// level first, then each dataset in declaration order). The
    /// per-dataset transformation rules already held when each
    /// [`TransformPair`] was constructed.
    ///
    /// # Errors
    ///
    /// The first violated rule, as a [`SchemaError`] or
    /// [`CrossFieldError`].
    pub fn new(
        axes: Vec<Axis>,
        datasets: Vec<Dataset>,
        transforms: Option<TransformPair>,
    ) -> Result<Self, NgffError> {
        validate_axes(&axes)?;
        if datasets.is_empty() {
            return Err(SchemaError::EmptyDatasets.into());
        }

        if let Some(pair) = &transforms {
            if let Some(dimensionality) = pair.dimensionality() {
                if dimensionality != axes.len() {
                    return Err(CrossFieldError::TopLevelTransform {
                        axes: axes.len(),
                        dimensionality,
                    }
                    .into());
                }
            }
        }

        for (index, dataset) in datasets.iter().enumerate() {
            if let Some(dimensionality) = dataset.transforms().dimensionality() {
                if dimensionality != axes.len() {
                    return Err(CrossFieldError::DatasetTransform {
                        index,
                        axes: axes.len(),
                        dimensionality,
                    }
                    .into());
                }
            }
        }

        Ok(Self {
            axes,
            datasets,
            transforms,
            version: None,
            name: None,
            multiscale_type: None,
            metadata: None,
        })
    }

    /// Attach an opaque `version` string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Attach an opaque `name` value.
    pub fn with_name(mut self, name: Value) -> Self {
        self.name = Some(name);
        self
    }

    /// Attach an opaque `type` value.
    pub fn with_type(mut self, multiscale_type: Value) -> Self {
        self.multiscale_type = Some(multiscale_type);
        self
    }

    /// Attach an opaque `metadata` value.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The shared axis list, in declaration order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// The resolution levels, in declaration order.
    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// The collection-level transformation pair, if present.
    pub fn transforms(&self) -> Option<&TransformPair> {
        self.transforms.as_ref()
    }

    /// The opaque `version` passthrough.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The opaque `name` passthrough.
    pub fn name(&self) -> Option<&Value> {
        self.name.as_ref()
    }

    /// The opaque `type` passthrough.
    pub fn multiscale_type(&self) -> Option<&Value> {
        self.multiscale_type.as_ref()
    }

    /// The opaque `metadata` passthrough.
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }
}

/// Wire form of [`Multiscale`]. Decoding routes through
/// [`Multiscale::new`], so the full rule set runs on every decode.
#[derive(Serialize, Deserialize)]
struct RawMultiscale {
    axes: Vec<Axis>,
    datasets: Vec<Dataset>,
    #[serde(
        rename = "coordinateTransformations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    transforms: Option<TransformPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    multiscale_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl TryFrom<RawMultiscale> for Multiscale {
    type Error = NgffError;

    fn try_from(raw: RawMultiscale) -> Result<Self, Self::Error> {
        let mut multiscale = Multiscale::new(raw.axes, raw.datasets, raw.transforms)?;
        multiscale.version = raw.version;
        multiscale.name = raw.name;
        multiscale.multiscale_type = raw.multiscale_type;
        multiscale.metadata = raw.metadata;
        Ok(multiscale)
    }
}

impl From<Multiscale> for RawMultiscale {
    fn from(m: Multiscale) -> Self {
        Self {
            axes: m.axes,
            datasets: m.datasets,
            transforms: m.transforms,
            version: m.version,
            name: m.name,
            multiscale_type: m.multiscale_type,
            metadata: m.metadata,
        }
    }
}
