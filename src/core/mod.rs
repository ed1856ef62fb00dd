//! Core types for the driftwood pipeline
//!
//! This module defines the seams the rest of the crate is built around:
//!
//! - [`ResourceId`] - the opaque, canonical identifier a decoded manifest is
//!   indexed by
//! - [`Resource`] - the contract a decoded manifest object must satisfy
//!   (an identifier plus the source file it was read from)
//! - [`Decoder`] - the pluggable decoding collaborator that turns one
//!   document chunk into zero or one resource
//! - [`ResourceSet`] - the deduplicated accumulator the load pipeline
//!   produces
//! - [`DriftwoodError`] / [`LoadError`] - the crate's error taxonomy
//!
//! The pipeline itself never constructs or interprets identifiers; it only
//! uses them as map keys. Everything about what a document *means* lives
//! behind the [`Decoder`] seam, with [`crate::object`] providing the
//! default implementation.

pub mod error;
pub mod resource;

pub use error::{DriftwoodError, LoadError};
pub use resource::{Decoder, Resource, ResourceId, ResourceSet};
