//! # Error Types — Validation Failure Taxonomy
//!
//! Defines the error types used throughout the NGFF metadata stack. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Structural errors ([`SchemaError`]) are discoverable from the metadata
//!   tree alone and name the offending counts, names, and positions.
//! - Cross-field errors ([`CrossFieldError`]) name both disagreeing values,
//!   and for per-dataset failures the dataset index, so a caller can locate
//!   exactly which dataset is malformed.
//! - Referential errors ([`ReferenceError`]) name the store path that failed
//!   to resolve and what was found there instead.
//!
//! Every validator in the stack fails fast: the first violated rule aborts
//! the whole pipeline. Nothing is aggregated and nothing is auto-corrected.

use thiserror::Error;

/// Top-level error type for the NGFF metadata stack.
#[derive(Error, Debug)]
pub enum NgffError {
    /// Structural violation in the metadata tree.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Two metadata fields disagree with each other.
    #[error(transparent)]
    CrossField(#[from] CrossFieldError),

    /// A declared path does not resolve to the expected node in the store.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The attribute tree could not be decoded into the typed model.
    #[error("metadata decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Structural violation discoverable from the metadata alone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The axis list has a length outside the allowed set.
    #[error("Incorrect number of axes provided ({got}). Only 2, 3, 4, or 5 axes are allowed.")]
    AxisCount {
        /// Number of axes that were provided.
        got: usize,
    },

    /// Two or more axes share a name.
    #[error("Axis names must be unique. Axis names {names:?} are repeated.")]
    AxisNamesNotUnique {
        /// Every repeated name, in first-occurrence order.
        names: Vec<String>,
    },

    /// An axis was declared with an empty name.
    #[error("Axis names must be non-empty.")]
    EmptyAxisName,

    /// Wrong number of axes with kind `space`.
    #[error("Invalid number of space axes: {got}. Only 2 or 3 space axes are allowed.")]
    SpaceAxisCount {
        /// Number of space axes that were provided.
        got: usize,
    },

    /// A space axis appears before a non-space axis.
    #[error("Space axes must come last. Got axes with order: {order:?}.")]
    SpaceAxesNotLast {
        /// The axis kinds in declaration order.
        order: Vec<String>,
    },

    /// More than one axis with kind `time`.
    #[error("Invalid number of time axes: {got}. Only 1 time axis is allowed.")]
    TimeAxisCount {
        /// Number of time axes that were provided.
        got: usize,
    },

    /// More than one axis with kind `channel`.
    #[error("Invalid number of channel axes: {got}. Only 1 channel axis is allowed.")]
    ChannelAxisCount {
        /// Number of channel axes that were provided.
        got: usize,
    },

    /// More than one axis with a custom kind.
    #[error("Invalid number of custom axes: {got}. Only 1 custom axis is allowed.")]
    CustomAxisCount {
        /// Number of custom-kind axes that were provided.
        got: usize,
    },

    /// A transformation sequence with a length other than 1 or 2.
    #[error("Invalid number of transforms: got {got}, expected 1 or 2")]
    TransformCount {
        /// Number of transforms that were provided.
        got: usize,
    },

    /// The first transformation is not a scale.
    #[error("The first element of `coordinateTransformations` must be a scale transform. Got {got} instead.")]
    FirstTransformNotScale {
        /// Rendering of the transform that was received.
        got: String,
    },

    /// The second transformation is not a translation.
    #[error("The second element of `coordinateTransformations` must be a translation transform. Got {got} instead.")]
    SecondTransformNotTranslation {
        /// Rendering of the transform that was received.
        got: String,
    },

    /// Two by-value transforms in the same sequence carry vectors of
    /// different lengths.
    #[error("The transforms have inconsistent dimensionality. Got transforms with dimensionality = {dimensionalities:?}.")]
    InconsistentDimensionality {
        /// Observed vector length of every transform, in order.
        dimensionalities: Vec<usize>,
    },

    /// A transform encoding that fits none of the four valid shapes.
    #[error("Invalid coordinate transformation: {reason}")]
    MalformedTransform {
        /// What was wrong with the encoding.
        reason: String,
    },

    /// A `datasets` list with no entries.
    #[error("`datasets` must contain at least one entry.")]
    EmptyDatasets,

    /// A `multiscales` list with no entries.
    #[error("`multiscales` must contain at least one entry.")]
    EmptyMultiscales,

    /// Two identical entries in a `multiscales` list.
    #[error("Duplicate entries found in `multiscales`.")]
    DuplicateMultiscales,

    /// A group whose attributes lack the mandatory `multiscales` key.
    #[error("Failed to find mandatory `multiscales` key in the attributes of the group at {path}.")]
    MissingMultiscales {
        /// Store path of the group that was inspected.
        path: String,
    },

    /// A labels group whose attributes lack the mandatory `labels` key.
    #[error("Failed to find mandatory `labels` key in the attributes of the group at {path}.")]
    MissingLabelsIndex {
        /// Store path of the labels group that was inspected.
        path: String,
    },

    /// A store path that is not relative and forward-slash separated.
    #[error("Invalid store path {got:?}: {reason}")]
    InvalidStorePath {
        /// The rejected path.
        got: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A rendering channel color that is not a 6-digit RGB hex string.
    #[error("Invalid channel color {got:?}: expected 6 hexadecimal digits.")]
    InvalidChannelColor {
        /// The rejected color string.
        got: String,
    },
}

/// Two metadata fields that must agree, but do not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrossFieldError {
    /// The multiscale-level transformation disagrees with the axis count.
    #[error(
        "The length of axes does not match the dimensionality of the scale \
         transform in coordinateTransformations. Got {axes} axes, but the \
         scale transform has dimensionality {dimensionality}"
    )]
    TopLevelTransform {
        /// Number of declared axes.
        axes: usize,
        /// Dimensionality of the scale transform.
        dimensionality: usize,
    },

    /// A per-dataset transformation disagrees with the axis count.
    #[error(
        "The length of axes does not match the dimensionality of the scale \
         transform in datasets[{index}].coordinateTransformations. Got {axes} \
         axes, but the scale transform has dimensionality {dimensionality}"
    )]
    DatasetTransform {
        /// Index of the offending dataset in declaration order.
        index: usize,
        /// Number of declared axes.
        axes: usize,
        /// Dimensionality of the scale transform.
        dimensionality: usize,
    },
}

/// A declared path that does not resolve to the expected node in the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// Nothing exists at the declared array path.
    #[error("Expected to find an array at {path}, but no array was found there.")]
    ArrayNotFound {
        /// The path that was probed.
        path: String,
    },

    /// A group exists where an array was declared.
    #[error("Expected to find an array at {path}, but a group was found there instead.")]
    GroupInsteadOfArray {
        /// The path that was probed.
        path: String,
    },

    /// An array exists where a group was expected.
    #[error("Expected to find a group at {path}, but an array was found there instead.")]
    ArrayInsteadOfGroup {
        /// The path that was probed.
        path: String,
    },

    /// The array exists but its dimensionality disagrees with the metadata.
    #[error(
        "The multiscale metadata has {axes} axes which does not match the \
         dimensionality of the array found in this group at {path} \
         ({dimensionality}). The number of axes must match the array \
         dimensionality."
    )]
    DimensionalityMismatch {
        /// The path of the resolved array.
        path: String,
        /// Number of axes declared by the owning multiscale.
        axes: usize,
        /// Dimensionality of the array that was found.
        dimensionality: usize,
    },
}
