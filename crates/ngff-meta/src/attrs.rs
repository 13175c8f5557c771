//! # Group Attribute Blocks
//!
//! The attribute trees that sit at the top of hierarchy groups:
//! [`ImageAttrs`] for an image group (the mandatory `multiscales` list
//! plus the optional `omero` rendering block) and [`LabelsAttrs`] for a
//! labels group (the index of label image paths).

use serde::{Deserialize, Serialize};

use ngff_core::{SchemaError, StorePath};

use crate::multiscale::Multiscale;
use crate::omero::Omero;

/// Attributes of an image group.
///
/// # Invariants
///
/// - `multiscales` is non-empty and free of duplicate entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawImageAttrs", into = "RawImageAttrs")]
pub struct ImageAttrs {
    multiscales: Vec<Multiscale>,
    omero: Option<Omero>,
}

impl ImageAttrs {
    /// Validate and assemble image attributes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyMultiscales`] for an empty list and
    /// [`SchemaError::DuplicateMultiscales`] when two entries are equal.
    pub fn new(
        multiscales: Vec<Multiscale>,
        omero: Option<Omero>,
    ) -> Result<Self, SchemaError> {
        if multiscales.is_empty() {
            return Err(SchemaError::EmptyMultiscales);
        }
        for (index, multiscale) in multiscales.iter().enumerate() {
            if multiscales[index + 1..].contains(multiscale) {
                return Err(SchemaError::DuplicateMultiscales);
            }
        }
        Ok(Self { multiscales, omero })
    }

    /// The multiscale collections, in declaration order.
    pub fn multiscales(&self) -> &[Multiscale] {
        &self.multiscales
    }

    /// The rendering block, if present.
    pub fn omero(&self) -> Option<&Omero> {
        self.omero.as_ref()
    }
}

#[derive(Serialize, Deserialize)]
struct RawImageAttrs {
    multiscales: Vec<Multiscale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    omero: Option<Omero>,
}

impl TryFrom<RawImageAttrs> for ImageAttrs {
    type Error = SchemaError;

    fn try_from(raw: RawImageAttrs) -> Result<Self, Self::Error> {
        ImageAttrs::new(raw.multiscales, raw.omero)
    }
}

impl From<ImageAttrs> for RawImageAttrs {
    fn from(attrs: ImageAttrs) -> Self {
        Self {
            multiscales: attrs.multiscales,
            omero: attrs.omero,
        }
    }
}

/// Attributes of a labels group: the index of label image paths, each
/// relative to the labels group itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelsAttrs {
    labels: Vec<StorePath>,
}

impl LabelsAttrs {
    /// Wrap an index of label image paths.
    pub fn new(labels: Vec<StorePath>) -> Self {
        Self { labels }
    }

    /// The listed label image paths, in declaration order.
    pub fn labels(&self) -> &[StorePath] {
        &self.labels
    }
}
