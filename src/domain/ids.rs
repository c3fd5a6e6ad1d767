//! Domain identifier types
//!
//! Numeric newtype wrappers for the ids that appear on cards. Keeping them
//! apart prevents writing an entity id where an attribute id belongs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attribute identifier
///
/// The numeric id of an attribute instance. Materials and functions are
/// referenced on cards by this id.
///
/// # Examples
///
/// ```
/// use cardex::domain::ids::AttributeId;
/// use std::str::FromStr;
///
/// let id = AttributeId::from_str("3").unwrap();
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AttributeId(u32);

impl AttributeId {
    /// Creates a new AttributeId
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttributeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|e| format!("Invalid attribute id '{s}': {e}"))
    }
}

impl From<u32> for AttributeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Model entity identifier
///
/// Identifies a vertex, edge, face or region of the model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new EntityId
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|e| format!("Invalid entity id '{s}': {e}"))
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Association identifier
///
/// Sequential string id assigned to one (boundary condition, entity) pair
/// during an export. The first association of a run is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssociationId(u32);

impl AssociationId {
    /// The id handed out first in every export
    pub const FIRST: AssociationId = AssociationId(1);

    /// Returns the raw id
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns the id following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AssociationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
