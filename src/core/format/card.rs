//! Card format descriptors
//!
//! A [`CardFormat`] describes how one or more items become one output line:
//! which items feed it, the opcode that leads the line, an optional trailing
//! `!` comment, the expected sub-item order for vector items, and an optional
//! custom writer for items whose shape depends on a discrete choice.

use super::hooks::CustomWriter;
use serde::{Deserialize, Serialize};

/// Descriptor variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// `<opcode> <values> <comment?>`
    Val,
    /// `<opcode> <owner id> <values> <comment?>`, once per owning attribute
    IdVal,
    /// `<opcode> <values of every item> <comment?>`
    MultiVal,
    /// `<opcode> <association id> <values> <comment?>`, once per association
    Bc,
}

/// How items map to a card
///
/// # Examples
///
/// ```
/// use cardex::core::format::{CardFormat, CardKind};
///
/// let card = CardFormat::idval("Porosity", "MP POR").with_comment("! Porosity");
/// assert_eq!(card.kind, CardKind::IdVal);
/// assert_eq!(
///     card.line(Some("1"), &["0.3".to_string()]),
///     "MP POR 1 0.3 ! Porosity"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFormat {
    /// Descriptor variant
    pub kind: CardKind,

    /// Source item names; exactly one except for `MultiVal`
    pub items: Vec<String>,

    /// Leading token(s)
    pub opcode: String,

    /// Trailing comment, written verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Expected sub-item names of a vector item, in output order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subitem_names: Option<Vec<String>>,

    /// Writer used instead of default resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_writer: Option<CustomWriter>,
}

impl CardFormat {
    fn new(kind: CardKind, items: Vec<String>, opcode: impl Into<String>) -> Self {
        Self {
            kind,
            items,
            opcode: opcode.into(),
            comment: None,
            subitem_names: None,
            custom_writer: None,
        }
    }

    /// Single value card
    pub fn val(item: impl Into<String>, opcode: impl Into<String>) -> Self {
        Self::new(CardKind::Val, vec![item.into()], opcode)
    }

    /// Card keyed by the owning attribute's id
    pub fn idval(item: impl Into<String>, opcode: impl Into<String>) -> Self {
        Self::new(CardKind::IdVal, vec![item.into()], opcode)
    }

    /// Several items on one line
    pub fn multival<S: Into<String>>(
        items: impl IntoIterator<Item = S>,
        opcode: impl Into<String>,
    ) -> Self {
        Self::new(
            CardKind::MultiVal,
            items.into_iter().map(Into::into).collect(),
            opcode,
        )
    }

    /// Boundary condition card
    pub fn bc(item: impl Into<String>, opcode: impl Into<String>) -> Self {
        Self::new(CardKind::Bc, vec![item.into()], opcode)
    }

    /// Sets the trailing comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the expected sub-item names
    pub fn with_subitems<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.subitem_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Routes the card through a custom writer
    pub fn with_custom_writer(mut self, writer: CustomWriter) -> Self {
        self.custom_writer = Some(writer);
        self
    }

    /// Name of the (first) source item
    pub fn item_name(&self) -> &str {
        self.items.first().map(String::as_str).unwrap_or_default()
    }

    /// Builds the card line with this descriptor's opcode
    pub fn line(&self, context_id: Option<&str>, tokens: &[String]) -> String {
        self.line_with_opcode(&self.opcode, context_id, tokens)
    }

    /// Builds the card line with another opcode
    ///
    /// Fields are joined by single spaces; surrounding whitespace of the
    /// opcode is dropped. No line terminator is appended.
    pub fn line_with_opcode(
        &self,
        opcode: &str,
        context_id: Option<&str>,
        tokens: &[String],
    ) -> String {
        let mut fields: Vec<&str> = Vec::with_capacity(tokens.len() + 3);
        let opcode = opcode.trim();
        if !opcode.is_empty() {
            fields.push(opcode);
        }
        if let Some(id) = context_id {
            fields.push(id);
        }
        fields.extend(tokens.iter().map(String::as_str));
        if let Some(comment) = &self.comment {
            fields.push(comment.as_str());
        }
        fields.join(" ")
    }

    /// Checks the descriptor is well formed
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.opcode.trim().is_empty() {
            return Err(format!("Card for {:?} has an empty opcode", self.items));
        }
        match self.kind {
            CardKind::MultiVal => {
                if self.items.is_empty() {
                    return Err(format!("multival card '{}' names no items", self.opcode));
                }
                if self.custom_writer.is_some() {
                    return Err(format!(
                        "multival card '{}' cannot use a custom writer",
                        self.opcode
                    ));
                }
            }
            _ => {
                if self.items.len() != 1 {
                    return Err(format!(
                        "card '{}' must name exactly one item, got {}",
                        self.opcode,
                        self.items.len()
                    ));
                }
            }
        }
        if self.items.iter().any(|name| name.trim().is_empty()) {
            return Err(format!("card '{}' has an empty item name", self.opcode));
        }
        Ok(())
    }
}
