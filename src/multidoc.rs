//! Multi-document parsing for one manifest file
//!
//! [`parse_multidoc`] takes the full byte contents of one file plus its
//! source label (the path relative to the load call's base directory),
//! drives the [`DocScanner`](crate::split::DocScanner) over it, hands each
//! chunk to the decoder, and accumulates the decoded resources into a
//! per-file [`ResourceSet`]. Chunks the decoder skips (blank, comments
//! only) do not count as resources.
//!
//! Decode and scan failures abort the rest of the file and carry the
//! source label; duplicate detection *across* files is the tree loader's
//! responsibility.
//!
//! # Within-file duplicates
//!
//! When the same identifier appears twice within one file, the later
//! document overwrites the earlier one. Templating tools routinely re-emit
//! a document to override an earlier default, so this stage stays
//! permissive on purpose; only cross-file collisions are treated as
//! configuration errors. See `within_file_duplicate_overwrites` in the
//! tests before changing this.

use tracing::trace;

use crate::core::{Decoder, DriftwoodError, ResourceSet};
use crate::split::DocScanner;

/// Parses one file's multi-document contents into a per-file resource set.
///
/// # Errors
///
/// - [`DriftwoodError::Decode`] when a chunk is present but structurally
///   invalid; the error carries `source`.
/// - [`DriftwoodError::Scan`] when the splitter fails, e.g. a single
///   document exceeds the buffer ceiling; the error carries `source`.
///
/// # Examples
///
/// ```rust
/// use driftwood::multidoc::parse_multidoc;
/// use driftwood::object::ObjectDecoder;
///
/// let file = b"apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: a\n---\napiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: b\n";
/// let docs = parse_multidoc(&ObjectDecoder, file, "cm.yaml").unwrap();
/// assert_eq!(docs.len(), 2);
/// ```
pub fn parse_multidoc<D: Decoder>(
    decoder: &D,
    multidoc: &[u8],
    source: &str,
) -> Result<ResourceSet<D::Resource>, DriftwoodError> {
    let mut docs = ResourceSet::new();
    let mut scanner = DocScanner::new(multidoc);

    loop {
        let chunk = match scanner.next_document() {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(err) => {
                return Err(DriftwoodError::Scan {
                    source_label: source.to_string(),
                    source: err,
                });
            }
        };

        trace!(source, chunk_len = chunk.len(), "decoding document chunk");
        match decoder.decode(source, &chunk) {
            Ok(Some(resource)) => {
                // Later documents with the same identifier overwrite
                // earlier ones within a single file.
                docs.insert(resource);
            }
            Ok(None) => {}
            Err(err) => {
                return Err(DriftwoodError::Decode {
                    source_label: source.to_string(),
                    cause: err,
                });
            }
        }
    }

    Ok(docs)
}
