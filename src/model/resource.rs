//! Read-only attribute query interface
//!
//! The export engine never owns the attribute data. It reads it through
//! [`AttributeQuery`], which a host implements over its own store.
//! [`AttributeResource`] is the in-memory implementation used by the binary
//! and by tests.

use super::attribute::{Attribute, Definition, ModelEntity};
use crate::domain::ids::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Query interface over attributes, definitions and model entities
pub trait AttributeQuery {
    /// Attributes whose definition is `type_name` or derives from it,
    /// ordered by ascending attribute id
    fn attributes_of_type(&self, type_name: &str) -> Vec<&Attribute>;

    /// Attribute by unique name
    fn attribute(&self, name: &str) -> Option<&Attribute>;

    /// Definition by type name
    fn definition(&self, type_name: &str) -> Option<&Definition>;

    /// Model entity by id
    fn entity(&self, id: EntityId) -> Option<&ModelEntity>;

    /// All model entities, ordered by ascending id
    fn entities(&self) -> Vec<&ModelEntity>;

    /// Whether `type_name` is `ancestor` or derives from it
    fn is_a(&self, type_name: &str, ancestor: &str) -> bool {
        let mut current = Some(type_name);
        let mut seen = HashSet::new();
        while let Some(name) = current {
            if name == ancestor {
                return true;
            }
            if !seen.insert(name) {
                return false;
            }
            current = self
                .definition(name)
                .and_then(|def| def.base_type.as_deref());
        }
        false
    }

    /// Faces and regions, ordered by ascending id
    fn domains(&self) -> Vec<&ModelEntity> {
        self.entities()
            .into_iter()
            .filter(|entity| entity.kind.is_domain())
            .collect()
    }

    /// Whether an attribute's definition belongs to the active categories
    ///
    /// Attributes without a known definition are always written.
    fn is_relevant(&self, attribute: &Attribute, active: &BTreeSet<String>) -> bool {
        match self.definition(&attribute.type_name) {
            Some(def) => def.categories.is_empty() || !def.categories.is_disjoint(active),
            None => true,
        }
    }
}

/// In-memory attribute resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeResource {
    /// Attribute definitions
    #[serde(default)]
    pub definitions: Vec<Definition>,

    /// Attribute instances
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    /// Model entities
    #[serde(default)]
    pub entities: Vec<ModelEntity>,
}

impl AttributeResource {
    /// Creates an empty resource
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition
    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Adds an attribute
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Adds a model entity
    pub fn with_entity(mut self, entity: ModelEntity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Checks structural consistency
    ///
    /// # Errors
    ///
    /// Returns an error naming the first duplicate attribute name, attribute
    /// id within one type, entity id or definition.
    pub fn validate(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for attribute in &self.attributes {
            if !names.insert(attribute.name.as_str()) {
                return Err(format!("Duplicate attribute name '{}'", attribute.name));
            }
            if !ids.insert((attribute.type_name.as_str(), attribute.id)) {
                return Err(format!(
                    "Duplicate id {} for attribute type '{}'",
                    attribute.id, attribute.type_name
                ));
            }
        }

        let mut entity_ids = HashSet::new();
        for entity in &self.entities {
            if !entity_ids.insert(entity.id) {
                return Err(format!("Duplicate model entity id {}", entity.id));
            }
        }

        let mut types = HashSet::new();
        for def in &self.definitions {
            if !types.insert(def.type_name.as_str()) {
                return Err(format!("Duplicate definition '{}'", def.type_name));
            }
        }

        Ok(())
    }
}

impl AttributeQuery for AttributeResource {
    fn attributes_of_type(&self, type_name: &str) -> Vec<&Attribute> {
        let mut found: Vec<&Attribute> = self
            .attributes
            .iter()
            .filter(|attribute| self.is_a(&attribute.type_name, type_name))
            .collect();
        found.sort_by_key(|attribute| attribute.id);
        found
    }

    fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    fn definition(&self, type_name: &str) -> Option<&Definition> {
        self.definitions
            .iter()
            .find(|def| def.type_name == type_name)
    }

    fn entity(&self, id: EntityId) -> Option<&ModelEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    fn entities(&self) -> Vec<&ModelEntity> {
        let mut all: Vec<&ModelEntity> = self.entities.iter().collect();
        all.sort_by_key(|entity| entity.id);
        all
    }
}
