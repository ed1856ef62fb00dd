//! Driftwood - manifest ingestion for cluster sync tooling
//!
//! Driftwood turns a directory tree of Kubernetes-style YAML manifests into a
//! single, deduplicated, addressable collection of resource definitions, each
//! tagged with the file it came from. It is the ingestion front-end for a
//! larger sync/reconciliation engine: everything downstream (diffing,
//! applying, reconciling against a live cluster) depends on this step
//! producing a correct, complete, collision-free resource set.
//!
//! # Pipeline Overview
//!
//! Loading proceeds through four stages, leaf-first:
//!
//! 1. **Stream splitting** ([`split`]) - a lazy, restartable scan over byte
//!    buffers that yields successive YAML documents delimited by a
//!    line-anchored `---` marker, growing its working buffer as needed.
//! 2. **Document decoding** ([`object`], or any [`core::Decoder`]) - one
//!    chunk becomes zero or one resource; blank and comment-only chunks are
//!    silently skipped.
//! 3. **Multi-document parsing** ([`multidoc`]) - drives the splitter over a
//!    whole file and assembles a per-file mapping from resource identifier
//!    to resource.
//! 4. **Tree loading** ([`loader`]) - walks one or more roots, skips
//!    packaged chart directories, selects `.yaml`/`.yml` files, and merges
//!    per-file results into one [`core::ResourceSet`], failing on any
//!    cross-file identifier collision.
//!
//! # Core Modules
//!
//! - [`core`] - Error types, the [`core::Resource`] and [`core::Decoder`]
//!   seams, and the [`core::ResourceSet`] accumulator
//! - [`split`] - Line-anchored `---` stream splitter and buffered scanner
//! - [`multidoc`] - Multi-document parser for one file's contents
//! - [`object`] - Default manifest object model and decoder
//! - [`loader`] - Directory tree traversal and resource-set assembly
//! - [`values`] - Chart value-override assembly for packaged charts
//!
//! # Example
//!
//! ```rust,no_run
//! use driftwood::loader::Loader;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let loader = Loader::new();
//! let resources =
//!     loader.load(Path::new("/repo"), &[Path::new("/repo/deploy").to_path_buf()])?;
//!
//! for (id, resource) in &resources {
//!     println!("{id} (from {})", driftwood::core::Resource::source(resource));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Guarantees
//!
//! - A returned set never contains two entries decoded from *different
//!   files* with the same identifier; such collisions abort the load with
//!   an error naming the identifier and both source files.
//! - Chart directories (containing both `Chart.yaml` and `values.yaml`) are
//!   skipped entirely, subtree included.
//! - The pipeline is single-threaded and synchronous; failures are fatal to
//!   the current load call and carry the partially built set for
//!   diagnostics only.

pub mod core;
pub mod loader;
pub mod multidoc;
pub mod object;
pub mod split;
pub mod values;

pub use crate::core::{Decoder, DriftwoodError, LoadError, Resource, ResourceId, ResourceSet};
pub use crate::loader::Loader;
pub use crate::object::Object;
