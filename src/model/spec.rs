//! Export spec supplied by the host
//!
//! The spec bundles everything one export needs: where to write, which
//! analyses are selected, how analyses map to categories, the declared
//! constituents and the attribute resource itself.

use super::resource::AttributeResource;
use crate::core::export::diagnostics::Diagnostics;
use crate::domain::errors::CardexError;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Input of one export
///
/// # Examples
///
/// ```
/// use cardex::model::ExportSpec;
///
/// let spec: ExportSpec = toml::from_str(r#"
/// output_path = "run.bc"
/// analysis_types = ["Ground Water Flow"]
/// constituents = ["Salt"]
///
/// [analyses]
/// "Ground Water Flow" = ["Flow"]
/// "#).unwrap();
/// assert_eq!(spec.constituents.len(), 1);
/// assert!(spec.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSpec {
    /// Output file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Selected analysis names
    #[serde(default)]
    pub analysis_types: Vec<String>,

    /// Analysis name to the categories it activates
    #[serde(default)]
    pub analyses: BTreeMap<String, Vec<String>>,

    /// Declared constituent names, in order
    #[serde(default)]
    pub constituents: Vec<String>,

    /// Attribute data
    #[serde(default)]
    pub resource: AttributeResource,

    /// Problems already found upstream; an export refuses to run when this
    /// holds any error
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

impl ExportSpec {
    /// Creates a spec over `resource` with nothing selected
    pub fn new(resource: AttributeResource) -> Self {
        Self {
            resource,
            ..Self::default()
        }
    }

    /// Sets the output path
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Declares an analysis and the categories it activates
    pub fn with_analysis<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        categories: impl IntoIterator<Item = S>,
    ) -> Self {
        self.analyses.insert(
            name.into(),
            categories.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Selects an analysis for export
    pub fn select(mut self, analysis: impl Into<String>) -> Self {
        self.analysis_types.push(analysis.into());
        self
    }

    /// Declares a constituent
    pub fn with_constituent(mut self, name: impl Into<String>) -> Self {
        self.constituents.push(name.into());
        self
    }

    /// Loads a spec from a JSON (`.json`) or TOML (any other extension) file
    ///
    /// Relative output paths are kept as written; they resolve against the
    /// working directory of the export.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// attribute resource is inconsistent.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CardexError::Spec(format!("Failed to read spec file {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let spec: ExportSpec = if is_json {
            serde_json::from_str(&contents).map_err(|e| {
                CardexError::Spec(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            toml::from_str(&contents).map_err(|e| {
                CardexError::Spec(format!("Failed to parse {}: {}", path.display(), e))
            })?
        };

        spec.resource
            .validate()
            .map_err(|e| CardexError::Spec(format!("Invalid attribute resource: {e}")))?;

        tracing::debug!(
            path = %path.display(),
            attributes = spec.resource.attributes.len(),
            entities = spec.resource.entities.len(),
            "Loaded export spec"
        );

        Ok(spec)
    }
}
