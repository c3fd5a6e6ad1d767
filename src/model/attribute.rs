//! Attributes, definitions and model entities

use super::item::Item;
use crate::domain::ids::{AttributeId, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attribute definition (the attribute's type)
///
/// Definitions form a single-inheritance hierarchy: `SpecifiedHead` derives
/// from `BoundaryCondition`, so a SpecifiedHead attribute is also a
/// BoundaryCondition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Type name
    pub type_name: String,

    /// Parent definition, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    /// Categories attributes of this type belong to; empty means every category
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<String>,
}

impl Definition {
    /// Creates a root definition
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            base_type: None,
            categories: BTreeSet::new(),
        }
    }

    /// Sets the parent definition
    pub fn derived_from(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Restricts the definition to the given categories
    pub fn in_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

/// Attribute instance
///
/// # Examples
///
/// ```
/// use cardex::model::{Attribute, Item};
///
/// let material = Attribute::new("sand", "Material", 1)
///     .with_item(Item::double("Porosity", [0.3]))
///     .associated_with([4, 5]);
/// assert_eq!(material.id.get(), 1);
/// assert!(material.item("Porosity").is_some());
/// assert_eq!(material.associations.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Unique attribute name
    pub name: String,

    /// Definition type name
    pub type_name: String,

    /// Numeric id written on cards
    pub id: AttributeId,

    /// Top-level items
    #[serde(default)]
    pub items: Vec<Item>,

    /// Model entities the attribute applies to
    #[serde(default)]
    pub associations: Vec<EntityId>,
}

impl Attribute {
    /// Creates an attribute without items or associations
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            id: AttributeId::new(id),
            items: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Adds an item
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Associates the attribute with model entities
    pub fn associated_with(mut self, entities: impl IntoIterator<Item = u32>) -> Self {
        self.associations
            .extend(entities.into_iter().map(EntityId::new));
        self
    }

    /// Finds a top-level item by name
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// Kind of model entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Vertex,
    Edge,
    Face,
    Region,
}

impl EntityKind {
    /// Faces and regions receive material assignments
    pub fn is_domain(&self) -> bool {
        matches!(self, EntityKind::Face | EntityKind::Region)
    }
}

/// Geometric model entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntity {
    /// Entity id
    pub id: EntityId,

    /// Entity kind
    pub kind: EntityKind,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ModelEntity {
    /// Creates an unnamed entity
    pub fn new(id: u32, kind: EntityKind) -> Self {
        Self {
            id: EntityId::new(id),
            kind,
            name: None,
        }
    }
}
