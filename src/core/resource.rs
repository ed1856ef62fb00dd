//! Resource identity and the deduplicated resource-set accumulator
//!
//! A [`Resource`] is one decoded configuration document: it knows its
//! canonical identifier and the file it was read from. A [`ResourceSet`] is
//! the mapping from identifier to resource that the load pipeline builds up
//! file-by-file; keys are unique by construction, and the set is a pure
//! mapping with no meaningful insertion order.
//!
//! The set uses a [`BTreeMap`] so that iteration (and therefore anything a
//! caller derives from it, like diff output) is deterministic regardless of
//! filesystem enumeration order.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Canonical identifier for one resource definition.
///
/// Identifiers are opaque to the load pipeline: they are produced by the
/// decoding collaborator from a document's intrinsic properties (API
/// version, kind, namespace, name or equivalent) and used only as map keys.
/// The default object model renders them as
/// `<apiVersion>/<Kind>/<namespace>/<name>`, e.g.
/// `v1/ConfigMap/default/foo`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates an identifier from its canonical string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Contract for decoded configuration documents.
///
/// The load pipeline is parameterized over this trait: it never inspects a
/// resource beyond asking for its identifier (to index it) and its source
/// label (to report collisions). Resources are never mutated once decoded.
pub trait Resource {
    /// The canonical identifier this resource is indexed by.
    fn id(&self) -> ResourceId;

    /// The file this resource was read from, relative to the load call's
    /// base directory.
    fn source(&self) -> &str;
}

/// Pluggable decoding collaborator.
///
/// Given one document chunk and the label of the file it came from, a
/// decoder produces:
///
/// - `Ok(Some(resource))` for a meaningful document;
/// - `Ok(None)` for chunks with no content (empty, comments only, explicit
///   null) - these are silently skipped, not counted as resources;
/// - `Err(_)` when the chunk is present but structurally invalid.
///
/// The default implementation is [`crate::object::ObjectDecoder`].
pub trait Decoder {
    /// The resource type this decoder produces.
    type Resource: Resource;

    /// Decodes one chunk into zero or one resource.
    fn decode(&self, source: &str, chunk: &[u8]) -> anyhow::Result<Option<Self::Resource>>;
}

/// Deduplicated mapping from [`ResourceId`] to resource.
///
/// This is the durable output of a load call. The central invariant is that
/// a returned set never contains two entries that were decoded from
/// different files with the same identifier; the tree loader enforces this
/// and aborts the load on collision.
///
/// # Examples
///
/// ```rust
/// use driftwood::core::{Resource, ResourceId, ResourceSet};
///
/// #[derive(Debug)]
/// struct Note {
///     id: ResourceId,
///     source: String,
/// }
///
/// impl Resource for Note {
///     fn id(&self) -> ResourceId {
///         self.id.clone()
///     }
///     fn source(&self) -> &str {
///         &self.source
///     }
/// }
///
/// let mut set = ResourceSet::new();
/// set.insert(Note {
///     id: ResourceId::from("v1/ConfigMap/default/foo"),
///     source: "cm.yaml".to_string(),
/// });
///
/// assert_eq!(set.len(), 1);
/// assert!(set.contains(&ResourceId::from("v1/ConfigMap/default/foo")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSet<R> {
    entries: BTreeMap<ResourceId, R>,
}

impl<R> ResourceSet<R> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Number of resources in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no resources.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a resource by identifier.
    pub fn get(&self, id: &ResourceId) -> Option<&R> {
        self.entries.get(id)
    }

    /// Whether the set holds a resource with the given identifier.
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterates entries in identifier order.
    pub fn iter(&self) -> btree_map::Iter<'_, ResourceId, R> {
        self.entries.iter()
    }

    /// Iterates identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.entries.keys()
    }
}

impl<R: Resource> ResourceSet<R> {
    /// Inserts a resource keyed by its own identifier.
    ///
    /// Returns the previously held resource when the identifier was already
    /// present. Callers that must treat that as an error (the tree loader's
    /// cross-file duplicate check) inspect the returned value; the
    /// multi-document parser deliberately lets later documents in the same
    /// file overwrite earlier ones.
    pub fn insert(&mut self, resource: R) -> Option<R> {
        self.entries.insert(resource.id(), resource)
    }
}

impl<R> Default for ResourceSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> IntoIterator for ResourceSet<R> {
    type Item = (ResourceId, R);
    type IntoIter = btree_map::IntoIter<ResourceId, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a ResourceSet<R> {
    type Item = (&'a ResourceId, &'a R);
    type IntoIter = btree_map::Iter<'a, ResourceId, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<R: Resource> FromIterator<R> for ResourceSet<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut set = Self::new();
        for resource in iter {
            set.insert(resource);
        }
        set
    }
}
