//! Error handling for driftwood
//!
//! The crate uses two layers of error types:
//!
//! - [`DriftwoodError`] - the enumerated failure modes of the load
//!   pipeline. Every variant carries enough context (file path, and for
//!   duplicates both conflicting source labels) for the caller to produce
//!   an actionable message without re-deriving it.
//! - [`LoadError`] - returned by [`crate::loader::Loader::load`], pairing
//!   the failure with whatever partial [`ResourceSet`] had been accumulated
//!   when it occurred. The partial set is diagnostic only: it is not
//!   guaranteed complete or internally consistent.
//!
//! All errors are fatal to the current load call; nothing is retried
//! internally.
//!
//! # Examples
//!
//! ```rust
//! use driftwood::core::{DriftwoodError, ResourceId};
//!
//! let err = DriftwoodError::DuplicateResource {
//!     id: ResourceId::from("v1/ConfigMap/default/foo"),
//!     first_source: "base/cm.yaml".to_string(),
//!     second_source: "overlay/cm.yaml".to_string(),
//! };
//! assert!(err.to_string().contains("base/cm.yaml"));
//! assert!(err.to_string().contains("overlay/cm.yaml"));
//! ```

use std::fmt;
use thiserror::Error;

use crate::core::resource::{ResourceId, ResourceSet};
use crate::split::ScanError;

/// Enumerated failure modes of the load pipeline.
#[derive(Debug, Error)]
pub enum DriftwoodError {
    /// Filesystem-level failure while walking a root (permissions, broken
    /// symlink, I/O failure).
    #[error("walking {path} for manifests")]
    Walk {
        /// The path being traversed when the failure occurred.
        path: String,
        /// The underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// A selected manifest file could not be read.
    #[error("reading file at {path}")]
    Read {
        /// The file that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A manifest path could not be expressed relative to the base
    /// directory supplied to the load call.
    #[error("finding path of {path} relative to {base}")]
    RelativePath {
        /// The manifest path.
        path: String,
        /// The base directory of the load call.
        base: String,
    },

    /// A document chunk was present but structurally invalid.
    #[error("parsing YAML document from {source_label}: {cause:#}")]
    Decode {
        /// The file the chunk came from, relative to the base directory.
        source_label: String,
        /// The decoder's error.
        cause: anyhow::Error,
    },

    /// The stream splitter failed while scanning a multi-document file,
    /// e.g. a single document exceeded the buffer ceiling.
    #[error("scanning multidoc from {source_label}")]
    Scan {
        /// The file being scanned, relative to the base directory.
        source_label: String,
        /// The underlying scan error.
        #[source]
        source: ScanError,
    },

    /// The same resource identifier was produced by two different files.
    #[error("resource '{id}' defined more than once (in {first_source} and {second_source})")]
    DuplicateResource {
        /// The colliding identifier.
        id: ResourceId,
        /// Source label of the file processed first.
        first_source: String,
        /// Source label of the file processed second.
        second_source: String,
    },
}

/// A load failure together with the partially built resource set.
///
/// Mirrors the contract of the load operation: traversal populates the set
/// incrementally, and when something goes wrong the caller still receives
/// whatever had been accumulated so far for diagnostics. Treat the partial
/// set as informative only.
#[derive(Debug)]
pub struct LoadError<R> {
    /// Resources accumulated before the failure.
    pub partial: ResourceSet<R>,
    /// The failure that aborted the load.
    pub error: DriftwoodError,
}

impl<R> LoadError<R> {
    pub(crate) fn new(partial: ResourceSet<R>, error: DriftwoodError) -> Self {
        Self { partial, error }
    }

    /// Splits the failure into the partial set and the underlying error.
    pub fn into_parts(self) -> (ResourceSet<R>, DriftwoodError) {
        (self.partial, self.error)
    }
}

impl<R> fmt::Display for LoadError<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<R: fmt::Debug> std::error::Error for LoadError<R> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
