//! Attribute items
//!
//! An [`Item`] is one named value slot of an attribute. Items hold numbers or
//! text, named sub-items, a discrete selection with the children of the active
//! branch, or a reference to another attribute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One named item of an attribute
///
/// # Examples
///
/// ```
/// use cardex::model::Item;
///
/// let porosity = Item::double("Porosity", [0.3]);
/// assert_eq!(porosity.name(), "Porosity");
/// assert!(!porosity.is_discrete());
///
/// let interval = Item::discrete(
///     "OutputInterval",
///     0,
///     vec![Item::double("FixedInterval", [10.0]), Item::discrete("FixedIntervalUnits", 2, vec![])],
/// );
/// assert_eq!(interval.discrete_index(), Some(0));
/// assert_eq!(interval.active_child(1).map(Item::name), Some("FixedIntervalUnits"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item name, unique within its parent
    pub name: String,

    /// Optional items that are switched off are not written
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Categories the item belongs to; empty means every category
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<String>,

    /// Item contents
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// The shape of an item's contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// Floating point scalar or fixed-arity tuple
    Double { values: Vec<f64> },

    /// Integer scalar or fixed-arity tuple
    Int { values: Vec<i64> },

    /// Text scalar or fixed-arity tuple
    Text { values: Vec<String> },

    /// Vector of named sub-items
    Group { items: Vec<Item> },

    /// Selection among branches; `children` are the active branch's items.
    /// A negative index means nothing is selected.
    Discrete {
        index: i64,
        #[serde(default)]
        children: Vec<Item>,
    },

    /// Reference to another attribute by name
    Reference {
        #[serde(default)]
        target: Option<String>,
    },
}

fn default_enabled() -> bool {
    true
}

impl Item {
    /// Creates an item from its name and contents
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            categories: BTreeSet::new(),
            kind,
        }
    }

    /// Floating point item
    pub fn double(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            name,
            ItemKind::Double {
                values: values.into_iter().collect(),
            },
        )
    }

    /// Integer item
    pub fn int(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            name,
            ItemKind::Int {
                values: values.into_iter().collect(),
            },
        )
    }

    /// Text item
    pub fn text<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            ItemKind::Text {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Group of named sub-items
    pub fn group(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self::new(name, ItemKind::Group { items })
    }

    /// Discrete item with the active branch's children
    pub fn discrete(name: impl Into<String>, index: i64, children: Vec<Item>) -> Self {
        Self::new(name, ItemKind::Discrete { index, children })
    }

    /// Reference to the attribute called `target`
    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            ItemKind::Reference {
                target: Some(target.into()),
            },
        )
    }

    /// Marks the item as switched off
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Restricts the item to the given categories
    pub fn in_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the item is a discrete selection
    pub fn is_discrete(&self) -> bool {
        matches!(self.kind, ItemKind::Discrete { .. })
    }

    /// Selected branch index of a discrete item, negative when unset
    pub fn discrete_index(&self) -> Option<i64> {
        match &self.kind {
            ItemKind::Discrete { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Active child at `position` of a discrete item
    pub fn active_child(&self, position: usize) -> Option<&Item> {
        match &self.kind {
            ItemKind::Discrete { children, .. } => children.get(position),
            _ => None,
        }
    }

    /// Named sub-items of a group, or the active children of a discrete item
    pub fn children(&self) -> &[Item] {
        match &self.kind {
            ItemKind::Group { items } => items,
            ItemKind::Discrete { children, .. } => children,
            _ => &[],
        }
    }

    /// Finds a direct child by name
    pub fn child(&self, name: &str) -> Option<&Item> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Whether the item should be written for the active category set
    pub fn is_member_of(&self, active: &BTreeSet<String>) -> bool {
        self.categories.is_empty() || !self.categories.is_disjoint(active)
    }
}
