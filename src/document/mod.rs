//! Circuit documents: a [Circuit] plus its title, file and properties, saved as JSON.
mod format;
mod manager;

pub use format::KindTag;
pub use manager::*;

use crate::circuit::{Circuit, CircuitError, ComponentHandle};
use crate::components::{Component, ComponentKind, Position};
use auto_from::From;
use format::{ComponentEntry, DocumentFile, Metadata, Settings, WireEntry};
use log::debug;
use serde::de::Error as _;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// Title of a document that was never saved.
pub const UNTITLED: &str = "Untitled Circuit";
/// Version written into the properties of new documents.
pub const FORMAT_VERSION: &str = "2.0";

#[derive(Debug, From)]
pub enum DocumentError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A saved component whose kind tag names no [ComponentKind].
    InvalidKind(KindTag),
    Circuit(CircuitError),
}
impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Io(e) => write!(f, "io error: {}", e),
            DocumentError::Json(e) => write!(f, "malformed document: {}", e),
            DocumentError::InvalidKind(tag) => write!(f, "unknown component type {}", tag),
            DocumentError::Circuit(e) => write!(f, "invalid circuit: {}", e),
        }
    }
}
impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Io(e) => Some(e),
            DocumentError::Json(e) => Some(e),
            DocumentError::InvalidKind(_) => None,
            DocumentError::Circuit(e) => Some(e),
        }
    }
}

/// A circuit being edited, with the file it lives in and free form string properties.
///
/// Structural edits through the document mark it modified, saving or loading clears the flag.
///
/// # Example
/// ```
/// # use logisim_core::{CircuitDocument, ComponentKind, Position};
/// let mut doc = CircuitDocument::new();
/// doc.add_component(ComponentKind::And, Position::new(0, 0));
/// assert!(doc.is_modified());
///
/// let copy = CircuitDocument::from_json(&doc.to_json().unwrap()).unwrap();
/// assert_eq!(copy.circuit().component_count(), 1);
/// assert_eq!(copy.property("version"), Some("2.0"));
/// ```
#[derive(Debug, Clone)]
pub struct CircuitDocument {
    title: String,
    file_path: Option<PathBuf>,
    modified: bool,
    properties: BTreeMap<String, String>,
    circuit: Circuit,
}
impl Default for CircuitDocument {
    fn default() -> Self {
        Self::new()
    }
}
impl CircuitDocument {
    pub fn new() -> Self {
        Self {
            title: UNTITLED.to_string(),
            file_path: None,
            modified: false,
            properties: default_properties(),
            circuit: Circuit::new(),
        }
    }

    /// Empties the document and forgets its file, title and properties.
    pub fn new_document(&mut self) {
        *self = Self::new();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Mutable access to the circuit, marks the document modified.
    pub fn circuit_mut(&mut self) -> &mut Circuit {
        self.modified = true;
        &mut self.circuit
    }

    pub fn add_component(&mut self, kind: ComponentKind, position: Position) -> ComponentHandle {
        self.modified = true;
        self.circuit.add_component(kind, position)
    }

    pub fn remove_component(&mut self, handle: ComponentHandle) -> Result<Component, CircuitError> {
        let removed = self.circuit.remove_component(handle)?;
        self.modified = true;
        Ok(removed)
    }

    /// Removes every component and wire.
    pub fn clear(&mut self) {
        self.circuit.clear();
        self.modified = true;
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Serializes the title, properties, components and wires.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        let mut ordinals = HashMap::new();
        let mut components = Vec::with_capacity(self.circuit.component_count());
        for (ordinal, (handle, component)) in self.circuit.components().enumerate() {
            ordinals.insert(handle, ordinal);
            let position = component.position();
            components.push(ComponentEntry {
                kind: component.kind().into(),
                x: position.x,
                y: position.y,
                rotation: component.rotation(),
                selected: component.is_selected(),
                pins: component.pins().iter().map(|pin| pin.value()).collect(),
                settings: Settings::of(component),
            });
        }

        let wires = self
            .circuit
            .wires()
            .map(|(_, wire)| WireEntry {
                start: (ordinals[&wire.start().component], wire.start().pin),
                end: wire.end().map(|end| (ordinals[&end.component], end.pin)),
                waypoints: wire.waypoints().iter().map(|p| (p.x, p.y)).collect(),
            })
            .collect();

        let file = DocumentFile {
            metadata: Metadata {
                title: self.title.clone(),
                version: self
                    .property("version")
                    .unwrap_or(FORMAT_VERSION)
                    .to_string(),
            },
            properties: self.properties.clone(),
            components,
            wires,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Rebuilds a document from [CircuitDocument::to_json] output. The result is unmodified and
    /// has no file.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let file: DocumentFile = serde_json::from_str(json)?;

        let mut circuit = Circuit::new();
        let mut handles = Vec::with_capacity(file.components.len());
        for entry in &file.components {
            let kind = entry
                .kind
                .resolve()
                .ok_or_else(|| DocumentError::InvalidKind(entry.kind.clone()))?;
            let mut component = Component::new(kind, Position::new(entry.x, entry.y));
            component.set_rotation(entry.rotation);
            component.set_selected(entry.selected);
            entry.settings.apply(&mut component);
            for (pin, value) in component.pins_mut().iter_mut().zip(entry.pins.iter()) {
                pin.set_value(*value);
            }
            handles.push(circuit.insert_component(component));
        }

        let pin = |(ordinal, pin): (usize, usize)| {
            handles
                .get(ordinal)
                .map(|handle| handle.pin(pin))
                .ok_or_else(|| {
                    serde_json::Error::custom(format!("wire references component {}", ordinal))
                })
        };
        for entry in &file.wires {
            let wire = circuit.start_wire(pin(entry.start)?)?;
            if let Some(end) = entry.end {
                circuit.set_end_pin(wire, pin(end)?)?;
            }
            if let Some(wire) = circuit.wire_mut(wire) {
                for (x, y) in &entry.waypoints {
                    wire.add_waypoint(Position::new(*x, *y));
                }
            }
        }

        let mut properties = file.properties;
        properties
            .entry("version".to_string())
            .or_insert(file.metadata.version);
        debug!(
            "loaded {} components and {} wires",
            circuit.component_count(),
            circuit.wire_count()
        );
        Ok(Self {
            title: file.metadata.title,
            file_path: None,
            modified: false,
            properties,
            circuit,
        })
    }

    /// Saves to the document's file.
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = self.file_path.clone().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "the document has no file yet")
        })?;
        self.save_as(path)
    }

    /// Saves to `path`, which becomes the document's file. The title becomes the file name.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        self.set_file(path);
        debug!("saved {}", path.display());
        Ok(())
    }

    /// Loads the document saved at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let mut document = Self::from_json(&std::fs::read_to_string(path)?)?;
        document.set_file(path);
        Ok(document)
    }

    fn set_file(&mut self, path: &Path) {
        if let Some(stem) = path.file_stem() {
            self.title = stem.to_string_lossy().into_owned();
        }
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
    }
}

fn default_properties() -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    properties.insert("version".to_string(), FORMAT_VERSION.to_string());
    properties.insert("description".to_string(), "Logic Circuit Design".to_string());
    properties
}
