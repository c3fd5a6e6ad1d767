//! Attribute model consumed by the exporter.
//!
//! The exporter reads a hierarchical attribute model: named [`Attribute`]s of a
//! [`Definition`] type, each holding [`Item`]s (scalars, tuples, groups of named
//! sub-items, discrete selections and references), plus the [`ModelEntity`]s
//! attributes are associated with. The data is read through the
//! [`AttributeQuery`] trait and never modified.
//!
//! # Example
//!
//! ```rust
//! use cardex::model::{Attribute, AttributeQuery, AttributeResource, Item};
//!
//! let resource = AttributeResource::new().with_attribute(
//!     Attribute::new("sand", "Material", 1).with_item(Item::double("Porosity", [0.3])),
//! );
//! assert_eq!(resource.attributes_of_type("Material").len(), 1);
//! ```

pub mod attribute;
pub mod item;
pub mod resource;
pub mod spec;

pub use attribute::{Attribute, Definition, EntityKind, ModelEntity};
pub use item::{Item, ItemKind};
pub use resource::{AttributeQuery, AttributeResource};
pub use spec::ExportSpec;
