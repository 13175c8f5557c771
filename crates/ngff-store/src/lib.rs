//! # ngff-store — Hierarchy Access and Referential Integrity
//!
//! Where validated multiscale metadata meets the physical hierarchy.
//! `ngff-meta` guarantees a tree is structurally sound; this crate checks
//! that the tree tells the truth about the store it describes.
//!
//! ## Design Decision
//!
//! Store access is an injected capability, not ambient state: everything
//! here takes a `&dyn Store`. The metadata layer never learns which
//! backend it is talking to, and every test in this crate runs against
//! [`MemoryStore`] with zero I/O. Lookups are synchronous and strictly
//! sequential in dataset declaration order — the checker stops at the
//! first failure, so the reported error is deterministic even when
//! several datasets are broken.

pub mod consistency;
pub mod image;
pub mod store;

// Re-export primary types for ergonomic imports.
pub use consistency::{check_multiscale_arrays, ResolvedArray};
pub use image::{Image, Labels};
pub use store::{MemoryStore, Store, StoreNode};
