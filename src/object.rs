//! PDF object model and the indirect-object store.
//!
//! Every serialized entity in the output file (fonts, image XObjects,
//! content streams, page nodes, the page tree, annotations, the catalog)
//! is an [`Object`] held in the [`ObjectStore`] under a 1-based, strictly
//! increasing [`ObjectId`].
//!
//! Forward references — an object that must point at an identity not yet
//! assigned, such as a page node referencing its parent page tree — are a
//! typed [`Object::Placeholder`] variant. After all identities are known a
//! single [`ObjectStore::resolve_placeholder`] pass rewrites every
//! occurrence to a concrete [`Object::Reference`]; any placeholder that
//! survives to serialization is a [`DanglingReference`] engine bug.
//!
//! [`DanglingReference`]: crate::error::Error::DanglingReference

use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Insertion-ordered dictionary used throughout the object graph.
///
/// Insertion order is preserved into the serialized output, which keeps
/// the emitted bytes deterministic without a sort pass.
pub type Dict = IndexMap<String, Object>;

/// Identity of an indirect object: a positive integer, assigned
/// sequentially starting at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// The raw object number.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

/// Resolution key for a forward reference.
///
/// The engine only ever needs one: page nodes are created before the page
/// tree that owns them, so their `/Parent` entry starts out unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKey {
    /// The document's page-tree node.
    PageTree,
}

impl PlaceholderKey {
    /// Stable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            PlaceholderKey::PageTree => "PageTree",
        }
    }
}

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (serialized with a leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs, insertion-ordered)
    Dictionary(Dict),
    /// Stream (dictionary plus raw payload; /Length is filled in from the
    /// payload size at serialization time)
    Stream {
        /// Stream dictionary
        dict: Dict,
        /// Stream payload
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectId),
    /// Forward reference awaiting resolution
    Placeholder(PlaceholderKey),
}

impl Object {
    /// Create a name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a string object from text.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Create a dictionary object from entries, preserving their order.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Create a rectangle array `[llx lly urx ury]` from position and size.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }

    /// Recursively rewrite placeholders for `key` to a reference to `id`.
    fn patch(&mut self, key: PlaceholderKey, id: ObjectId) {
        match self {
            Object::Placeholder(k) if *k == key => *self = Object::Reference(id),
            Object::Array(items) => {
                for item in items {
                    item.patch(key, id);
                }
            },
            Object::Dictionary(dict) | Object::Stream { dict, .. } => {
                for value in dict.values_mut() {
                    value.patch(key, id);
                }
            },
            _ => {},
        }
    }

    /// Whether any placeholder survives anywhere in this object.
    fn has_placeholder(&self) -> Option<PlaceholderKey> {
        match self {
            Object::Placeholder(key) => Some(*key),
            Object::Array(items) => items.iter().find_map(Object::has_placeholder),
            Object::Dictionary(dict) | Object::Stream { dict, .. } => {
                dict.values().find_map(Object::has_placeholder)
            },
            _ => None,
        }
    }
}

/// Central registry assigning sequential identities to emitted objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: Vec<Object>,
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object and return its newly assigned identity.
    ///
    /// Identities are `len + 1` at the time of the call: strictly
    /// increasing from 1 with no gaps or reuse.
    pub fn add(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() as u32)
    }

    /// Look up an object by identity.
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get((id.0 - 1) as usize)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over `(identity, object)` pairs in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, obj)| (ObjectId(i as u32 + 1), obj))
    }

    /// Rewrite every occurrence of the placeholder `key`, anywhere in the
    /// store, to a concrete reference to `id`.
    pub fn resolve_placeholder(&mut self, key: PlaceholderKey, id: ObjectId) {
        for object in &mut self.objects {
            object.patch(key, id);
        }
    }

    /// Verify that no placeholder survives in any stored object.
    pub fn assert_resolved(&self) -> Result<()> {
        for object in &self.objects {
            if let Some(key) = object.has_placeholder() {
                return Err(Error::DanglingReference(key.name()));
            }
        }
        Ok(())
    }
}
