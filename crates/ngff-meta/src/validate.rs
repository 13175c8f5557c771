//! # Structural Validation Rules
//!
//! The ordered rule sets over axis lists and transformation sequences.
//! Each rule is a pure function `&[T] -> Result<&[T], SchemaError>` that
//! returns its input unchanged on success, so rules compose with
//! `and_then` and the composition order — and therefore which error
//! surfaces first — is an explicit, testable contract.
//!
//! ## Rule Ordering
//!
//! Cheap, highly discriminating checks run first: arity and type checks
//! precede dimensionality comparison, so a sequence with the wrong shape
//! never reaches the dimensionality rule. Every rule fails fast; no rule
//! aggregates multiple violations.
//!
//! One shared rule set serves every metadata version — there are no
//! per-version forks of these functions.

use std::collections::HashMap;

use ngff_core::{Axis, AxisKind, SchemaError, Transform};

/// The allowed axis-list lengths.
pub const VALID_AXIS_COUNTS: [usize; 4] = [2, 3, 4, 5];

/// The maximum number of transforms in a `coordinateTransformations` list.
pub const MAX_TRANSFORMS: usize = 2;

/// Apply the full axis rule set, in order: length, name uniqueness,
/// kind census.
pub fn validate_axes(axes: &[Axis]) -> Result<&[Axis], SchemaError> {
    check_axis_count(axes)
        .and_then(check_axis_names)
        .and_then(check_axis_kinds)
}

/// Rule 1: the axis list has between 2 and 5 entries (inclusive).
pub fn check_axis_count(axes: &[Axis]) -> Result<&[Axis], SchemaError> {
    if !VALID_AXIS_COUNTS.contains(&axes.len()) {
        return Err(SchemaError::AxisCount { got: axes.len() });
    }
    Ok(axes)
}

/// Rule 2: axis names are unique. On violation, every repeated name is
/// reported, in first-occurrence order.
pub fn check_axis_names(axes: &[Axis]) -> Result<&[Axis], SchemaError> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for axis in axes {
        *counts.entry(axis.name()).or_insert(0) += 1;
    }
    let mut repeated: Vec<String> = Vec::new();
    for axis in axes {
        if counts[axis.name()] > 1 && !repeated.iter().any(|n| n == axis.name()) {
            repeated.push(axis.name().to_string());
        }
    }
    if !repeated.is_empty() {
        return Err(SchemaError::AxisNamesNotUnique { names: repeated });
    }
    Ok(axes)
}

/// Rule 3: the axis-kind census.
///
/// - 2 or 3 axes of kind `space`, and they occupy the trailing positions;
/// - at most one `time` axis;
/// - at most one `channel` axis;
/// - at most one axis with a custom kind.
pub fn check_axis_kinds(axes: &[Axis]) -> Result<&[Axis], SchemaError> {
    let num_spaces = axes.iter().filter(|a| a.kind().is_space()).count();
    if num_spaces < 2 || num_spaces > 3 {
        return Err(SchemaError::SpaceAxisCount { got: num_spaces });
    }

    if !axes[axes.len() - num_spaces..]
        .iter()
        .all(|a| a.kind().is_space())
    {
        return Err(SchemaError::SpaceAxesNotLast {
            order: axes.iter().map(|a| a.kind().as_str().to_string()).collect(),
        });
    }

    let num_times = axes
        .iter()
        .filter(|a| *a.kind() == AxisKind::Time)
        .count();
    if num_times > 1 {
        return Err(SchemaError::TimeAxisCount { got: num_times });
    }

    let num_channels = axes
        .iter()
        .filter(|a| *a.kind() == AxisKind::Channel)
        .count();
    if num_channels > 1 {
        return Err(SchemaError::ChannelAxisCount { got: num_channels });
    }

    let num_custom = axes.iter().filter(|a| a.kind().is_custom()).count();
    if num_custom > 1 {
        return Err(SchemaError::CustomAxisCount { got: num_custom });
    }

    Ok(axes)
}

/// Apply the full transformation rule set, in order: arity, typing,
/// dimensionality.
pub fn validate_transforms(transforms: &[Transform]) -> Result<&[Transform], SchemaError> {
    check_transform_count(transforms)
        .and_then(check_scale_translation)
        .and_then(check_transform_dimensionality)
}

/// Rule 1: a transformation sequence has 1 or 2 entries.
pub fn check_transform_count(transforms: &[Transform]) -> Result<&[Transform], SchemaError> {
    if transforms.is_empty() || transforms.len() > MAX_TRANSFORMS {
        return Err(SchemaError::TransformCount {
            got: transforms.len(),
        });
    }
    Ok(transforms)
}

/// Rule 2: the first entry is a scale and the second, if present, a
/// translation.
pub fn check_scale_translation(transforms: &[Transform]) -> Result<&[Transform], SchemaError> {
    if let Some(first) = transforms.first() {
        if !first.is_scale() {
            return Err(SchemaError::FirstTransformNotScale {
                got: first.to_string(),
            });
        }
    }
    if let Some(second) = transforms.get(1) {
        if !second.is_translation() {
            return Err(SchemaError::SecondTransformNotTranslation {
                got: second.to_string(),
            });
        }
    }
    Ok(transforms)
}

/// Rule 3: every by-value entry carries a vector of the same length.
///
/// When any entry is path-referenced, the check is skipped: the
/// dimensionality of a path transform is only known through the referenced
/// node, and resolving it would require a store lookup this validator does
/// not perform.
pub fn check_transform_dimensionality(
    transforms: &[Transform],
) -> Result<&[Transform], SchemaError> {
    let mut dimensionalities = Vec::with_capacity(transforms.len());
    for tx in transforms {
        match tx.dimensionality() {
            Some(dim) => dimensionalities.push(dim),
            None => return Ok(transforms),
        }
    }
    if dimensionalities.windows(2).any(|w| w[0] != w[1]) {
        return Err(SchemaError::InconsistentDimensionality { dimensionalities });
    }
    Ok(transforms)
}
