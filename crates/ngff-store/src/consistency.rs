//! # Group Consistency Checker
//!
//! Cross-references validated multiscale metadata against the physical
//! hierarchy: every declared dataset path must resolve to a real array
//! whose dimensionality matches the owning multiscale's axis count.
//!
//! ## Ordering
//!
//! Lookups run strictly sequentially, in dataset declaration order, and
//! the first failure aborts the walk — later lookups are wasted work once
//! an earlier one has failed. When several datasets are broken, the
//! reported error is therefore always the one with the lowest declaration
//! index.

use tracing::debug;

use ngff_core::{ReferenceError, StorePath};
use ngff_meta::Multiscale;

use crate::store::{Store, StoreNode};

/// A dataset path that resolved to a real array, with the array's
/// descriptor as found in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArray {
    /// Absolute store path of the array.
    pub path: StorePath,
    /// Array shape, slowest-varying dimension first.
    pub shape: Vec<u64>,
    /// Element type, verbatim from the store.
    pub dtype: String,
}

/// Resolve every dataset of every multiscale against the store, rooted
/// at `root`, and confirm existence, array-ness, and dimensionality
/// agreement.
///
/// Returns the resolved array descriptors in declaration order.
///
/// # Errors
///
/// Returns a [`ReferenceError`] naming the offending path when a dataset
/// is missing, is a group, or has a dimensionality different from the
/// owning multiscale's axis count.
pub fn check_multiscale_arrays(
    store: &dyn Store,
    root: &StorePath,
    multiscales: &[Multiscale],
) -> Result<Vec<ResolvedArray>, ReferenceError> {
    let mut resolved = Vec::new();
    for multiscale in multiscales {
        let axes = multiscale.axes().len();
        for dataset in multiscale.datasets() {
            let path = root.join(dataset.path());
            debug!(path = %path, "resolving dataset array");
            match store.resolve(&path) {
                StoreNode::Missing => {
                    return Err(ReferenceError::ArrayNotFound {
                        path: path.to_string(),
                    });
                }
                StoreNode::Group => {
                    return Err(ReferenceError::GroupInsteadOfArray {
                        path: path.to_string(),
                    });
                }
                StoreNode::Array { shape, dtype } => {
                    if shape.len() != axes {
                        return Err(ReferenceError::DimensionalityMismatch {
                            path: path.to_string(),
                            axes,
                            dimensionality: shape.len(),
                        });
                    }
                    resolved.push(ResolvedArray { path, shape, dtype });
                }
            }
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngff_core::{Axis, AxisKind};
    use ngff_meta::Dataset;

    use crate::store::MemoryStore;

    fn yx_multiscale(paths: &[&str]) -> Multiscale {
        let axes = vec![
            Axis::new("y", AxisKind::Space, Some("meter")).unwrap(),
            Axis::new("x", AxisKind::Space, Some("meter")).unwrap(),
        ];
        let datasets = paths
            .iter()
            .map(|p| Dataset::build(p, vec![1.0, 1.0], Some(vec![0.0, 0.0])).unwrap())
            .collect();
        Multiscale::new(axes, datasets, None).unwrap()
    }

    fn path(s: &str) -> StorePath {
        StorePath::new(s).unwrap()
    }

    #[test]
    fn test_all_paths_resolve_to_matching_arrays() {
        let mut store = MemoryStore::new();
        store.insert_array(path("img/s0"), vec![10, 10], "uint8");
        store.insert_array(path("img/s1"), vec![5, 5], "uint8");

        let resolved = check_multiscale_arrays(
            &store,
            &path("img"),
            &[yx_multiscale(&["s0", "s1"])],
        )
        .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].path, path("img/s0"));
        assert_eq!(resolved[0].shape, vec![10, 10]);
        assert_eq!(resolved[1].path, path("img/s1"));
    }

    #[test]
    fn test_missing_array_reports_the_path() {
        let mut store = MemoryStore::new();
        store.insert_array(path("img/s0"), vec![10, 10], "uint8");

        let err = check_multiscale_arrays(
            &store,
            &path("img"),
            &[yx_multiscale(&["s0", "s1"])],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ReferenceError::ArrayNotFound {
                path: "img/s1".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Expected to find an array at img/s1, but no array was found there."
        );
    }

    #[test]
    fn test_group_where_array_expected() {
        let mut store = MemoryStore::new();
        store.insert_group(path("img/s0"));

        let err =
            check_multiscale_arrays(&store, &path("img"), &[yx_multiscale(&["s0"])]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Expected to find an array at img/s0, but a group was found there instead."
        );
    }

    #[test]
    fn test_dimensionality_mismatch_names_both_counts() {
        let mut store = MemoryStore::new();
        store.insert_array(path("img/s0"), vec![10, 10, 10], "uint8");

        let err =
            check_multiscale_arrays(&store, &path("img"), &[yx_multiscale(&["s0"])]).unwrap_err();

        assert_eq!(
            err,
            ReferenceError::DimensionalityMismatch {
                path: "img/s0".to_string(),
                axes: 2,
                dimensionality: 3,
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("has 2 axes"));
        assert!(msg.contains("img/s0 (3)"));
    }

    #[test]
    fn test_first_broken_dataset_wins() {
        // both datasets broken: the lower declaration index is reported
        let store = MemoryStore::new();
        let err = check_multiscale_arrays(
            &store,
            &path("img"),
            &[yx_multiscale(&["s0", "s1"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReferenceError::ArrayNotFound {
                path: "img/s0".to_string(),
            }
        );
    }

    #[test]
    fn test_check_is_relative_to_root() {
        let mut store = MemoryStore::new();
        store.insert_array(path("s0"), vec![10, 10], "uint8");

        // rooted at the store root rather than a subgroup
        let resolved =
            check_multiscale_arrays(&store, &StorePath::root(), &[yx_multiscale(&["s0"])])
                .unwrap();
        assert_eq!(resolved[0].path, path("s0"));
    }
}
