//! Value resolution
//!
//! Turns an item into the ordered text tokens written on a card, independent
//! of the card's shape. Resolution only reads the item tree; sub-item name
//! mismatches are recorded on the diagnostics sink and resolution carries on
//! positionally.

pub mod numeric;

use crate::core::export::diagnostics::{DiagnosticKind, Diagnostics};
use crate::domain::errors::CardError;
use crate::model::item::{Item, ItemKind};
use crate::model::resource::AttributeQuery;
use numeric::{format_double, format_int};

/// Resolves items to card tokens
///
/// # Examples
///
/// ```
/// use cardex::core::export::Diagnostics;
/// use cardex::core::resolve::ValueResolver;
/// use cardex::model::{AttributeResource, Item};
///
/// let resource = AttributeResource::new();
/// let resolver = ValueResolver::new(&resource);
/// let mut diagnostics = Diagnostics::new();
///
/// let tokens = resolver
///     .resolve(&Item::double("Porosity", [0.3]), None, &mut diagnostics)
///     .unwrap();
/// assert_eq!(tokens, vec!["0.3"]);
/// ```
pub struct ValueResolver<'a> {
    query: &'a dyn AttributeQuery,
}

impl<'a> ValueResolver<'a> {
    /// Creates a resolver reading references through `query`
    pub fn new(query: &'a dyn AttributeQuery) -> Self {
        Self { query }
    }

    /// Resolves `item` to tokens
    ///
    /// `subitem_names` gives the expected child names of a group item, in
    /// output order.
    ///
    /// # Errors
    ///
    /// Fails for discrete items (they need a custom writer), for references
    /// to unknown attributes and for items without values.
    pub fn resolve(
        &self,
        item: &Item,
        subitem_names: Option<&[String]>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<String>, CardError> {
        let tokens = match &item.kind {
            ItemKind::Double { values } => values.iter().map(|v| format_double(*v)).collect(),
            ItemKind::Int { values } => values.iter().map(|v| format_int(*v)).collect(),
            ItemKind::Text { values } => values.clone(),
            ItemKind::Group { items } => self.resolve_group(item, items, subitem_names, diagnostics)?,
            ItemKind::Discrete { .. } => {
                return Err(CardError::UnsupportedDiscreteItem {
                    item: item.name.clone(),
                })
            }
            ItemKind::Reference { target } => vec![self.resolve_reference(item, target.as_deref())?],
        };

        if tokens.is_empty() {
            return Err(CardError::EmptyItem {
                item: item.name.clone(),
            });
        }
        Ok(tokens)
    }

    /// Resolves a reference to the referenced attribute's id
    fn resolve_reference(&self, item: &Item, target: Option<&str>) -> Result<String, CardError> {
        target
            .and_then(|name| self.query.attribute(name))
            .map(|attribute| attribute.id.to_string())
            .ok_or_else(|| CardError::UnresolvedReference {
                item: item.name.clone(),
                target: target.map(str::to_string),
            })
    }

    fn resolve_group(
        &self,
        item: &Item,
        children: &[Item],
        subitem_names: Option<&[String]>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<String>, CardError> {
        if let Some(expected) = subitem_names {
            if expected.len() != children.len() {
                diagnostics.add_error(
                    DiagnosticKind::UnexpectedSubitem,
                    format!(
                        "Item \"{}\" has {} subitems, expected {}",
                        item.name,
                        children.len(),
                        expected.len()
                    ),
                );
            }
            for (child, name) in children.iter().zip(expected) {
                check_subitem_name(child, name, diagnostics);
            }
        }

        let mut tokens = Vec::new();
        for child in children {
            tokens.extend(self.resolve(child, None, diagnostics)?);
        }
        Ok(tokens)
    }
}

/// Records an error when `child` is not named `expected`
///
/// Returns whether the name matched.
pub fn check_subitem_name(child: &Item, expected: &str, diagnostics: &mut Diagnostics) -> bool {
    if child.name == expected {
        return true;
    }
    diagnostics.add_error(
        DiagnosticKind::UnexpectedSubitem,
        format!("Unexpected subitem type \"{}\"", child.name),
    );
    false
}
