//! Per-export state
//!
//! A [`Scope`] is built from an [`ExportSpec`] for one export and dropped at
//! its end. It owns the output stream, the diagnostics sink and the
//! boundary-condition association table, and borrows the attribute data.

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::summary::ExportCounters;
use crate::core::verification::checksum::RunningChecksum;
use crate::domain::ids::{AssociationId, AttributeId, EntityId};
use crate::model::resource::AttributeQuery;
use crate::model::spec::ExportSpec;
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;

/// One (boundary condition, entity) pair with its assigned id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association {
    /// Assigned id, as written on bc and set cards
    pub id: AssociationId,

    /// Boundary condition attribute
    pub attribute: AttributeId,

    /// Model entity the condition applies to
    pub entity: EntityId,
}

/// Mutable state of one export
pub struct Scope<'a> {
    spec: &'a ExportSpec,
    categories: BTreeSet<String>,
    constituents: BTreeSet<String>,
    diagnostics: Diagnostics,
    output: Option<Box<dyn Write + 'a>>,
    checksum: RunningChecksum,
    associations: Vec<Association>,
    next_association: AssociationId,
    counters: ExportCounters,
}

impl<'a> Scope<'a> {
    /// Builds the scope for `spec`
    ///
    /// Upstream diagnostics are carried over. Selected analyses that the spec
    /// does not declare and repeated constituent names are logged as errors.
    pub fn new(spec: &'a ExportSpec) -> Self {
        let mut diagnostics = spec.diagnostics.clone();

        let mut categories = BTreeSet::new();
        for analysis in &spec.analysis_types {
            match spec.analyses.get(analysis) {
                Some(list) => categories.extend(list.iter().cloned()),
                None => diagnostics.add_error(
                    DiagnosticKind::UnknownAnalysisType,
                    format!("Unknown analysis type \"{analysis}\""),
                ),
            }
        }

        let mut constituents = BTreeSet::new();
        for name in &spec.constituents {
            if !constituents.insert(name.clone()) {
                diagnostics.add_error(
                    DiagnosticKind::DuplicateConstituent,
                    format!("Duplicate constituent \"{name}\""),
                );
            }
        }

        tracing::debug!(
            analyses = ?spec.analysis_types,
            categories = ?categories,
            constituents = constituents.len(),
            "Built export scope"
        );

        Self {
            spec,
            categories,
            constituents,
            diagnostics,
            output: None,
            checksum: RunningChecksum::new(),
            associations: Vec::new(),
            next_association: AssociationId::FIRST,
            counters: ExportCounters::default(),
        }
    }

    /// Output path named by the spec
    pub fn output_path(&self) -> Option<&'a Path> {
        let spec: &'a ExportSpec = self.spec;
        spec.output_path.as_deref()
    }

    /// Selected analysis names
    pub fn analysis_types(&self) -> &'a [String] {
        let spec: &'a ExportSpec = self.spec;
        &spec.analysis_types
    }

    /// Categories activated by the selected analyses
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Whether `category` is active
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Number of distinct declared constituents
    pub fn constituent_count(&self) -> usize {
        self.constituents.len()
    }

    /// Attribute data
    pub fn query(&self) -> &'a dyn AttributeQuery {
        let spec: &'a ExportSpec = self.spec;
        &spec.resource
    }

    /// Diagnostics recorded so far
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Diagnostics sink for writers
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Attaches the output stream; the scope owns it until closed
    pub fn attach_output(&mut self, writer: Box<dyn Write + 'a>) {
        self.output = Some(writer);
    }

    /// Whether an output stream is attached
    pub fn is_open(&self) -> bool {
        self.output.is_some()
    }

    /// Writes one line followed by `\n`
    ///
    /// # Errors
    ///
    /// Fails when no output is attached or the stream fails.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let output = self
            .output
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "output is not open"))?;
        output.write_all(line.as_bytes())?;
        output.write_all(b"\n")?;

        self.checksum.update(line.as_bytes());
        self.checksum.update(b"\n");
        self.counters.lines_written += 1;
        Ok(())
    }

    /// Flushes and releases the output stream
    ///
    /// # Errors
    ///
    /// Returns the flush error; the stream is released either way.
    pub fn close_output(&mut self) -> io::Result<()> {
        match self.output.take() {
            Some(mut output) => output.flush(),
            None => Ok(()),
        }
    }

    /// Records a card written from the format table
    pub fn card_written(&mut self) {
        self.counters.cards_written += 1;
    }

    /// Records a card skipped because of a card error
    pub fn card_skipped(&mut self) {
        self.counters.cards_skipped += 1;
    }

    /// Id the next association will receive
    pub fn next_association(&self) -> AssociationId {
        self.next_association
    }

    /// Assigns the next association id to a (condition, entity) pair
    pub fn assign_association(&mut self, attribute: AttributeId, entity: EntityId) -> AssociationId {
        let id = self.next_association;
        self.next_association = id.next();
        self.associations.push(Association {
            id,
            attribute,
            entity,
        });
        self.counters.associations += 1;
        id
    }

    /// Associations assigned so far, in id order
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// Writing counters
    pub fn counters(&self) -> ExportCounters {
        self.counters
    }

    /// Checksum of everything written so far
    pub fn checksum(&self) -> String {
        self.checksum.finalize()
    }

    /// Ends the scope, releasing the output and returning its diagnostics
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}
