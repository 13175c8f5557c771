//! # Image and Labels Aggregates
//!
//! [`Image`] binds a hierarchy root to its validated [`ImageAttrs`] and
//! to the arrays those attributes reference. The bootstrap
//! ([`Image::from_store`]) is the only place metadata meets the physical
//! store:
//!
//! 1. fetch the attribute tree at the root and require the mandatory
//!    `multiscales` key;
//! 2. decode the typed attributes — decoding runs the full structural
//!    rule set;
//! 3. walk the store with the group-consistency checker;
//! 4. probe the fixed `labels` sibling path: absence is not an error,
//!    anything structurally wrong inside is, and each listed label image
//!    is validated recursively with the same checker.
//!
//! [`Image::check`] re-runs the store walk on an already-built aggregate,
//! for re-validating a hierarchy that may have changed underneath.

use tracing::debug;

use ngff_core::{NgffError, ReferenceError, SchemaError, StorePath};
use ngff_meta::{ImageAttrs, LabelsAttrs};

use crate::consistency::{check_multiscale_arrays, ResolvedArray};
use crate::store::{Store, StoreNode};

/// Fixed relative path of the optional labels sub-hierarchy.
const LABELS_PATH: &str = "labels";

/// A validated multiscale image rooted somewhere in a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    root: StorePath,
    attrs: ImageAttrs,
    arrays: Vec<ResolvedArray>,
    labels: Option<Labels>,
}

impl Image {
    /// Bootstrap an image aggregate from a live store.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MissingMultiscales`] when the root has no
    ///   attribute tree or the tree lacks the `multiscales` key;
    /// - any structural or cross-field error from decoding the
    ///   attributes;
    /// - any [`ReferenceError`] from the group-consistency walk, here or
    ///   inside the labels sub-hierarchy.
    pub fn from_store(store: &dyn Store, root: &StorePath) -> Result<Self, NgffError> {
        let attr_tree = store
            .attributes(root)
            .filter(|tree| tree.get("multiscales").is_some())
            .ok_or_else(|| SchemaError::MissingMultiscales {
                path: root.to_string(),
            })?;

        let attrs: ImageAttrs = serde_json::from_value(attr_tree)?;
        let arrays = check_multiscale_arrays(store, root, attrs.multiscales())?;
        let labels = Labels::discover(store, root)?;

        Ok(Self {
            root: root.clone(),
            attrs,
            arrays,
            labels,
        })
    }

    /// Re-run the group-consistency walk against `store`.
    pub fn check(&self, store: &dyn Store) -> Result<(), ReferenceError> {
        check_multiscale_arrays(store, &self.root, self.attrs.multiscales()).map(|_| ())
    }

    /// The hierarchy root this image was read from.
    pub fn root(&self) -> &StorePath {
        &self.root
    }

    /// The validated image attributes.
    pub fn attrs(&self) -> &ImageAttrs {
        &self.attrs
    }

    /// The resolved dataset arrays, in declaration order.
    pub fn arrays(&self) -> &[ResolvedArray] {
        &self.arrays
    }

    /// The labels sub-hierarchy, if one was discovered.
    pub fn labels(&self) -> Option<&Labels> {
        self.labels.as_ref()
    }
}

/// A validated labels sub-hierarchy: the index of label images plus the
/// label images themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    root: StorePath,
    attrs: LabelsAttrs,
    images: Vec<Image>,
}

impl Labels {
    /// Probe for a labels sub-hierarchy under `image_root`.
    ///
    /// Returns `Ok(None)` when nothing exists at the fixed probe path.
    /// Everything else is validated: the probe target must be a group,
    /// its attributes must carry the `labels` index, and every listed
    /// label image must itself pass the full bootstrap.
    fn discover(store: &dyn Store, image_root: &StorePath) -> Result<Option<Self>, NgffError> {
        let labels_root = image_root.join(&StorePath::new(LABELS_PATH)?);
        match store.resolve(&labels_root) {
            StoreNode::Missing => Ok(None),
            StoreNode::Array { .. } => Err(ReferenceError::ArrayInsteadOfGroup {
                path: labels_root.to_string(),
            }
            .into()),
            StoreNode::Group => {
                let attr_tree = store
                    .attributes(&labels_root)
                    .filter(|tree| tree.get("labels").is_some())
                    .ok_or_else(|| SchemaError::MissingLabelsIndex {
                        path: labels_root.to_string(),
                    })?;
                let attrs: LabelsAttrs = serde_json::from_value(attr_tree)?;

                let mut images = Vec::with_capacity(attrs.labels().len());
                for label_path in attrs.labels() {
                    let label_root = labels_root.join(label_path);
                    debug!(path = %label_root, "validating label image");
                    images.push(Image::from_store(store, &label_root)?);
                }

                Ok(Some(Self {
                    root: labels_root,
                    attrs,
                    images,
                }))
            }
        }
    }

    /// The labels group root.
    pub fn root(&self) -> &StorePath {
        &self.root
    }

    /// The decoded labels index.
    pub fn attrs(&self) -> &LabelsAttrs {
        &self.attrs
    }

    /// The validated label images, in index order.
    pub fn images(&self) -> &[Image] {
        &self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::store::MemoryStore;

    fn path(s: &str) -> StorePath {
        StorePath::new(s).unwrap()
    }

    fn yx_attrs(paths: &[&str]) -> serde_json::Value {
        json!({
            "multiscales": [{
                "axes": [
                    {"name": "y", "type": "space", "unit": "meter"},
                    {"name": "x", "type": "space", "unit": "meter"},
                ],
                "datasets": paths.iter().map(|p| json!({
                    "path": p,
                    "coordinateTransformations": [
                        {"type": "scale", "scale": [1.0, 1.0]},
                    ],
                })).collect::<Vec<_>>(),
            }],
        })
    }

    fn image_store(root: &str, paths: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_group(path(root));
        store.insert_attributes(path(root), yx_attrs(paths));
        for p in paths {
            store.insert_array(path(root).join(&path(p)), vec![10, 10], "uint8");
        }
        store
    }

    #[test]
    fn test_bootstrap_without_labels() {
        let store = image_store("img", &["s0", "s1"]);
        let image = Image::from_store(&store, &path("img")).unwrap();
        assert_eq!(image.arrays().len(), 2);
        assert!(image.labels().is_none());
        assert!(image.check(&store).is_ok());
    }

    #[test]
    fn test_bootstrap_requires_multiscales_key() {
        let mut store = MemoryStore::new();
        store.insert_group(path("img"));
        store.insert_attributes(path("img"), json!({"something": "else"}));

        let err = Image::from_store(&store, &path("img")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to find mandatory `multiscales` key in the attributes of the group at img."
        );
    }

    #[test]
    fn test_bootstrap_requires_attributes_at_all() {
        let mut store = MemoryStore::new();
        store.insert_group(path("img"));

        let err = Image::from_store(&store, &path("img")).unwrap_err();
        assert!(matches!(
            err,
            NgffError::Schema(SchemaError::MissingMultiscales { .. })
        ));
    }

    #[test]
    fn test_bootstrap_surfaces_reference_errors() {
        let mut store = image_store("img", &["s0", "s1"]);
        store.remove(&path("img/s1"));

        let err = Image::from_store(&store, &path("img")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected to find an array at img/s1, but no array was found there."
        );
    }

    #[test]
    fn test_labels_probe_tolerates_absence_only() {
        let mut store = image_store("img", &["s0"]);
        store.insert_array(path("img/labels"), vec![10, 10], "uint8");

        let err = Image::from_store(&store, &path("img")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected to find a group at img/labels, but an array was found there instead."
        );
    }

    #[test]
    fn test_labels_group_needs_an_index() {
        let mut store = image_store("img", &["s0"]);
        store.insert_group(path("img/labels"));

        let err = Image::from_store(&store, &path("img")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to find mandatory `labels` key in the attributes of the group at img/labels."
        );
    }

    #[test]
    fn test_labels_images_validated_recursively() {
        let mut store = image_store("img", &["s0"]);
        store.insert_group(path("img/labels"));
        store.insert_attributes(path("img/labels"), json!({"labels": ["nuclei"]}));
        store.insert_group(path("img/labels/nuclei"));
        store.insert_attributes(path("img/labels/nuclei"), yx_attrs(&["s0"]));
        store.insert_array(path("img/labels/nuclei/s0"), vec![10, 10], "uint32");

        let image = Image::from_store(&store, &path("img")).unwrap();
        let labels = image.labels().unwrap();
        assert_eq!(labels.attrs().labels().len(), 1);
        assert_eq!(labels.images().len(), 1);
        assert_eq!(labels.images()[0].root(), &path("img/labels/nuclei"));
        assert_eq!(labels.images()[0].arrays()[0].dtype, "uint32");
    }

    #[test]
    fn test_broken_label_image_fails_the_bootstrap() {
        let mut store = image_store("img", &["s0"]);
        store.insert_group(path("img/labels"));
        store.insert_attributes(path("img/labels"), json!({"labels": ["nuclei"]}));
        store.insert_group(path("img/labels/nuclei"));
        store.insert_attributes(path("img/labels/nuclei"), yx_attrs(&["s0"]));
        // the label image's array is missing

        let err = Image::from_store(&store, &path("img")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected to find an array at img/labels/nuclei/s0, but no array was found there."
        );
    }
}
