//! A minimal subject/property store backing a document.
//!
//! Each subject (an element id such as `SPDXRef-3` or a license reference
//! such as `LicenseRef-1`) carries named properties holding either one string
//! or a list of strings. [`MemoryStore`] keeps everything in sorted maps and
//! round-trips through JSON.

use std::collections::BTreeMap;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::{Deserialize, Serialize};

use crate::errors::DocumentError;

/// Value of a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A single string.
    Text(String),
    /// An ordered list of strings.
    List(Vec<String>),
}

/// Storage for document subjects and their properties.
pub trait DocumentStore: Send {
    /// Every subject id in the store.
    fn subjects(&self) -> Vec<String>;

    /// A property value, if set.
    fn property(&self, subject: &str, property: &str) -> Option<&PropertyValue>;

    /// Set a property, creating the subject if needed.
    fn set_property(&mut self, subject: &str, property: &str, value: PropertyValue);

    /// Remove a property, returning its previous value.
    fn remove_property(&mut self, subject: &str, property: &str) -> Option<PropertyValue>;

    /// A string property. Lists read as absent.
    fn string_property(&self, subject: &str, property: &str) -> Option<&str> {
        match self.property(subject, property)? {
            PropertyValue::Text(value) => Some(value),
            PropertyValue::List(_) => None,
        }
    }

    /// A list property. A single string reads as a one-element list.
    fn list_property(&self, subject: &str, property: &str) -> Vec<String> {
        match self.property(subject, property) {
            Some(PropertyValue::List(values)) => values.clone(),
            Some(PropertyValue::Text(value)) => vec![value.clone()],
            None => Vec::new(),
        }
    }

    /// Set a string property.
    fn set_string_property(&mut self, subject: &str, property: &str, value: &str) {
        self.set_property(subject, property, PropertyValue::Text(value.to_owned()));
    }

    /// Set a list property.
    fn set_list_property(&mut self, subject: &str, property: &str, values: Vec<String>) {
        self.set_property(subject, property, PropertyValue::List(values));
    }
}

/// An in-memory [`DocumentStore`] that serialises to JSON.
///
/// # Examples
/// ```
/// use spdx_document::{DocumentStore, MemoryStore};
/// let mut store = MemoryStore::default();
/// store.set_string_property("SPDXRef-1", "licenseConcluded", "MIT");
/// let json = store.to_json()?;
/// let reloaded = MemoryStore::from_json(&json)?;
/// assert_eq!(reloaded.string_property("SPDXRef-1", "licenseConcluded"), Some("MIT"));
/// # Ok::<(), spdx_document::DocumentError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    subjects: BTreeMap<String, BTreeMap<String, PropertyValue>>,
}

impl MemoryStore {
    /// Parse a store from its JSON form.
    ///
    /// # Errors
    /// Returns [`DocumentError::Json`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the store as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`DocumentError::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a store from a JSON file.
    ///
    /// # Errors
    /// Returns [`DocumentError::Io`] when the file cannot be read and
    /// [`DocumentError::Json`] when it is malformed.
    pub fn load(path: &Utf8Path) -> Result<Self, DocumentError> {
        let (dir, file) = open_parent(path)?;
        let json = dir.read_to_string(file).map_err(|source| io_error(path, source))?;
        Self::from_json(&json)
    }

    /// Write the store to a JSON file, replacing any existing content.
    ///
    /// # Errors
    /// Returns [`DocumentError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Utf8Path) -> Result<(), DocumentError> {
        let json = self.to_json()?;
        let (dir, file) = open_parent(path)?;
        dir.write(file, json).map_err(|source| io_error(path, source))
    }
}

fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), DocumentError> {
    let file = path.file_name().ok_or_else(|| {
        io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir =
        Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| io_error(path, source))?;
    Ok((dir, file))
}

fn io_error(path: &Utf8Path, source: std::io::Error) -> DocumentError {
    DocumentError::Io {
        path: path.to_owned(),
        source,
    }
}

impl DocumentStore for MemoryStore {
    fn subjects(&self) -> Vec<String> {
        self.subjects.keys().cloned().collect()
    }

    fn property(&self, subject: &str, property: &str) -> Option<&PropertyValue> {
        self.subjects.get(subject)?.get(property)
    }

    fn set_property(&mut self, subject: &str, property: &str, value: PropertyValue) {
        self.subjects
            .entry(subject.to_owned())
            .or_default()
            .insert(property.to_owned(), value);
    }

    fn remove_property(&mut self, subject: &str, property: &str) -> Option<PropertyValue> {
        self.subjects.get_mut(subject)?.remove(property)
    }
}
