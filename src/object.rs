//! Default manifest object model and decoder
//!
//! The load pipeline only needs a decoding collaborator ([`crate::core::Decoder`])
//! and a resource contract ([`crate::core::Resource`]); this module supplies
//! the default implementations for Kubernetes-style manifests. A decoded
//! [`Object`] keeps the intrinsic identity fields (`apiVersion`, `kind`,
//! `metadata.namespace`, `metadata.name`), the raw document bytes for
//! downstream apply/diff stages, and the source file label.
//!
//! No schema validation happens here: any YAML mapping decodes, missing
//! identity fields simply default to empty, and what a given `kind` means
//! is somebody else's business.
//!
//! # Examples
//!
//! ```rust
//! use driftwood::core::Resource;
//! use driftwood::object::decode_object;
//!
//! let doc = b"apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: foo\n";
//! let object = decode_object("cm.yaml", doc).unwrap().unwrap();
//!
//! assert_eq!(object.id().as_str(), "v1/ConfigMap/default/foo");
//! assert_eq!(object.source(), "cm.yaml");
//! ```

use anyhow::Context;
use serde::Deserialize;

use crate::core::{Decoder, Resource, ResourceId};

/// Namespace used in identifiers when a manifest does not set one.
const DEFAULT_NAMESPACE: &str = "default";

/// Identity fields of a manifest document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// The `metadata.name` field.
    #[serde(default)]
    pub name: String,
    /// The `metadata.namespace` field, when set.
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Serde view of the fields an identifier is derived from. Everything else
/// in the document is carried opaquely in [`Object::bytes`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectHead {
    #[serde(default)]
    api_version: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    metadata: Metadata,
}

/// One decoded manifest document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    source: String,
    bytes: Vec<u8>,
    api_version: String,
    kind: String,
    metadata: Metadata,
}

impl Object {
    /// The document's `apiVersion` field ("" when absent).
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// The document's `kind` field ("" when absent).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The document's identity metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The raw bytes of the document as it appeared in the stream.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Resource for Object {
    fn id(&self) -> ResourceId {
        ResourceId::new(format!(
            "{}/{}/{}/{}",
            self.api_version,
            self.kind,
            self.metadata.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE),
            self.metadata.name,
        ))
    }

    fn source(&self) -> &str {
        &self.source
    }
}

/// Decodes one document chunk into an [`Object`].
///
/// Returns `Ok(None)` for chunks with no content: empty input, whitespace
/// and comments only, or an explicit YAML null. Such chunks are skipped by
/// the multi-document parser without counting as resources. A chunk that
/// decodes to anything other than a mapping (a bare scalar, a sequence) is
/// a decode error.
pub fn decode_object(source: &str, chunk: &[u8]) -> anyhow::Result<Option<Object>> {
    if is_blank(chunk) {
        return Ok(None);
    }

    let value: serde_yaml::Value =
        serde_yaml::from_slice(chunk).context("invalid YAML syntax")?;
    if value.is_null() {
        return Ok(None);
    }

    let head: ObjectHead =
        serde_yaml::from_value(value).context("document is not a manifest mapping")?;

    Ok(Some(Object {
        source: source.to_string(),
        bytes: chunk.to_vec(),
        api_version: head.api_version,
        kind: head.kind,
        metadata: head.metadata,
    }))
}

/// Whether a chunk carries no content worth decoding: every line is blank,
/// a comment, or a bare document marker.
fn is_blank(chunk: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(chunk) else {
        return false;
    };
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// The default [`Decoder`]: decodes chunks via [`decode_object`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectDecoder;

impl Decoder for ObjectDecoder {
    type Resource = Object;

    fn decode(&self, source: &str, chunk: &[u8]) -> anyhow::Result<Option<Object>> {
        decode_object(source, chunk)
    }
}
