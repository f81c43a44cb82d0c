//! The registry of chip templates known to a session.
//!
//! The registry is an explicit value handed to the loader and the editor;
//! there is no global chip table. Templates are immutable once inserted.

use std::collections::HashMap;

use gatesmith_circuit::{ChipTemplate, Circuit, Primitive};

use crate::error::LoadError;

/// Name-indexed chip templates, remembering registration order.
#[derive(Debug, Clone, Default)]
pub struct ChipRegistry {
    templates: HashMap<String, ChipTemplate>,
    order: Vec<String>,
}

impl ChipRegistry {
    /// Creates a registry with no chips at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with every built-in chip.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for p in Primitive::ALL {
            registry.templates.insert(p.name().to_string(), ChipTemplate::BuiltIn(p));
            registry.order.push(p.name().to_string());
        }
        registry
    }

    /// Looks a template up by name.
    pub fn get(&self, name: &str) -> Option<&ChipTemplate> {
        self.templates.get(name)
    }

    /// Returns `true` if a chip with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Publishes a template. Names are unique; a clash is an error and
    /// leaves the existing template in place.
    pub fn insert(&mut self, template: ChipTemplate) -> Result<(), LoadError> {
        let name = template.name().to_string();
        if self.templates.contains_key(&name) {
            return Err(LoadError::DuplicateChip { name });
        }
        self.order.push(name.clone());
        self.templates.insert(name, template);
        Ok(())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of registered chips, built-ins included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The creation index the next packaged chip should receive.
    pub fn next_creation_index(&self) -> u32 {
        self.templates
            .values()
            .filter_map(|t| t.as_custom().map(|c| c.creation_index.saturating_add(1)))
            .max()
            .unwrap_or(0)
    }

    /// Returns an independent, editable copy of a custom chip's internals.
    ///
    /// Built-in chips have no internals and yield `None`.
    pub fn open_for_editing(&self, name: &str) -> Option<Circuit> {
        self.get(name)
            .and_then(ChipTemplate::as_custom)
            .map(|c| c.internals.clone())
    }
}
