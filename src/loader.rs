//! Directory tree traversal and resource-set assembly
//!
//! The tree loader is the top of the pipeline: given a base directory (used
//! to compute relative source labels) and one or more roots (directories or
//! individual files), it walks each root depth-first, skips packaged chart
//! directories, selects `.yaml`/`.yml` files, parses each with
//! [`parse_multidoc`], and merges the per-file results into one global
//! [`ResourceSet`].
//!
//! Resources are named by their content, not by file name or directory
//! structure, so the same identifier emerging from two different files is a
//! configuration error: the load aborts with an error naming the
//! identifier and both source files. Traversal is sorted by file name so
//! that "the file processed first" is deterministic and error messages are
//! reproducible.
//!
//! # Chart exclusion
//!
//! A directory that directly contains both `Chart.yaml` and `values.yaml`
//! is assumed to be a packaged chart template tree, not plain manifests,
//! and its entire subtree is skipped. The check is per-directory and
//! pluggable via [`Loader::with_chart_detector`], so an alternative
//! exclusion rule can be substituted without touching the traversal.
//!
//! # Examples
//!
//! ```rust,no_run
//! use driftwood::loader::Loader;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> anyhow::Result<()> {
//! let resources =
//!     Loader::new().load(Path::new("/repo"), &[PathBuf::from("/repo/deploy")])?;
//! println!("loaded {} resources", resources.len());
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::core::{Decoder, DriftwoodError, LoadError, Resource, ResourceSet};
use crate::multidoc::parse_multidoc;
use crate::object::ObjectDecoder;

/// Chart descriptor marker file name.
const CHART_DESCRIPTOR: &str = "Chart.yaml";

/// Chart default-values marker file name.
const CHART_VALUES: &str = "values.yaml";

/// Predicate deciding whether a directory should be skipped as a packaged
/// chart tree.
pub type ChartDetector = fn(&Path) -> bool;

/// Default chart detection: the directory directly contains both mandatory
/// chart files. A heuristic, not a format guarantee, but a directory with
/// both is overwhelmingly likely to be a chart rather than plain manifests.
pub fn looks_like_chart(dir: &Path) -> bool {
    marker_present(&dir.join(CHART_DESCRIPTOR)) && marker_present(&dir.join(CHART_VALUES))
}

/// Only a definite not-found counts as absent. Any other stat failure
/// (permissions, a non-directory in the path) errs toward treating the
/// directory as a chart and skipping it, rather than scanning a tree we
/// cannot fully inspect.
fn marker_present(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(err) => err.kind() != std::io::ErrorKind::NotFound,
    }
}

fn has_yaml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Manifest tree loader.
///
/// Holds the decoding collaborator and the chart-exclusion predicate; the
/// [`ResourceSet`] accumulator itself is created fresh per [`load`] call
/// and owned exclusively by it, so a `Loader` is freely reusable.
///
/// [`load`]: Loader::load
#[derive(Debug, Clone)]
pub struct Loader<D = ObjectDecoder> {
    decoder: D,
    chart_detector: ChartDetector,
}

impl Loader<ObjectDecoder> {
    /// Creates a loader with the default object decoder and chart
    /// detection.
    pub fn new() -> Self {
        Self::with_decoder(ObjectDecoder)
    }
}

impl Default for Loader<ObjectDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Decoder> Loader<D> {
    /// Creates a loader around a custom decoding collaborator.
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            decoder,
            chart_detector: looks_like_chart,
        }
    }

    /// Replaces the chart-exclusion predicate.
    #[must_use]
    pub fn with_chart_detector(mut self, detector: ChartDetector) -> Self {
        self.chart_detector = detector;
        self
    }

    /// Loads every manifest under `roots` into one deduplicated set.
    ///
    /// `base` is only used to compute the relative source label each
    /// resource is tagged with; `roots` may name directories or individual
    /// files and are processed in the order supplied.
    ///
    /// # Errors
    ///
    /// Any traversal, read, decode, scan, or duplicate-identifier failure
    /// aborts the load. The returned [`LoadError`] carries the partially
    /// built set, which is diagnostic only.
    pub fn load(
        &self,
        base: &Path,
        roots: &[PathBuf],
    ) -> Result<ResourceSet<D::Resource>, LoadError<D::Resource>> {
        let mut objs = ResourceSet::new();
        for root in roots {
            if let Err(error) = self.load_root(base, root, &mut objs) {
                return Err(LoadError::new(objs, error));
            }
        }
        Ok(objs)
    }

    fn load_root(
        &self,
        base: &Path,
        root: &Path,
        objs: &mut ResourceSet<D::Resource>,
    ) -> Result<(), DriftwoodError> {
        let mut walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).display().to_string();
                    return Err(DriftwoodError::Walk { path, source: err });
                }
            };
            let path = entry.path();

            if entry.file_type().is_dir() {
                if (self.chart_detector)(path) {
                    debug!(path = %path.display(), "skipping chart directory");
                    walker.skip_current_dir();
                }
                continue;
            }

            if !has_yaml_extension(path) {
                continue;
            }

            self.load_file(base, path, objs)?;
        }

        Ok(())
    }

    fn load_file(
        &self,
        base: &Path,
        path: &Path,
        objs: &mut ResourceSet<D::Resource>,
    ) -> Result<(), DriftwoodError> {
        let bytes = fs::read(path).map_err(|err| DriftwoodError::Read {
            path: path.display().to_string(),
            source: err,
        })?;

        let source_label = path
            .strip_prefix(base)
            .map(|rel| rel.display().to_string())
            .map_err(|_| DriftwoodError::RelativePath {
                path: path.display().to_string(),
                base: base.display().to_string(),
            })?;

        let docs = parse_multidoc(&self.decoder, &bytes, &source_label)?;
        debug!(path = %path.display(), resources = docs.len(), "parsed manifest file");

        for (id, obj) in docs {
            if let Some(existing) = objs.get(&id) {
                return Err(DriftwoodError::DuplicateResource {
                    id,
                    first_source: existing.source().to_string(),
                    second_source: source_label.clone(),
                });
            }
            objs.insert(obj);
        }

        Ok(())
    }
}
