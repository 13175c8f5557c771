//! # ngff-core — Foundational Types for the NGFF Metadata Stack
//!
//! This crate is the bedrock of the NGFF metadata stack. It defines the
//! leaf value types of the multiscale metadata model and the error
//! taxonomy every validator in the workspace reports through. Every other
//! crate in the workspace depends on `ngff-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed variant types at the wire boundary.** [`Transform`] is a
//!    tagged union over the four transformation shapes; [`AxisKind`]
//!    covers the three well-known axis categories plus a custom tag.
//!    Exhaustive `match` makes silently unhandled shapes impossible.
//!
//! 2. **Decoding is validating.** Types with invariants deserialize
//!    through `try_from` gates, so a value that violates its own
//!    invariants can never be materialized — not from JSON, not from code.
//!
//! 3. **Newtype for hierarchy locations.** [`StorePath`] normalizes and
//!    validates store-relative paths once; no bare strings travel between
//!    the metadata layer and the store layer.
//!
//! 4. **Errors carry the offending values.** Counts, names, indices, and
//!    paths are embedded in every error message so a caller can locate
//!    the defect without re-running in a debugger.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ngff-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All wire-facing types derive `Debug`, `Clone`, `PartialEq`, and
//!   implement `Serialize`/`Deserialize`.

pub mod axis;
pub mod error;
pub mod path;
pub mod transform;

// Re-export primary types for ergonomic imports.
pub use axis::{Axis, AxisKind};
pub use error::{CrossFieldError, NgffError, ReferenceError, SchemaError};
pub use path::StorePath;
pub use transform::Transform;
