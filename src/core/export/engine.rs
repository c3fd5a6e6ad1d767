//! Export engine
//!
//! Drives one export: precondition checks, header, category sections in fixed
//! order, per-entity blocks and the terminator. Card failures are recorded on
//! the scope's diagnostics and the card is skipped; only output failures end a
//! run early.

use super::diagnostics::DiagnosticKind;
use super::scope::Scope;
use super::sections::{self, relevant_attributes};
use super::summary::ExportSummary;
use crate::core::format::card::{CardFormat, CardKind};
use crate::core::format::table::FormatTable;
use crate::core::resolve::ValueResolver;
use crate::domain::errors::{CardError, WriteError};
use crate::model::attribute::Attribute;
use crate::model::item::Item;
use crate::model::spec::ExportSpec;
use std::collections::HashSet;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Category sections, in output order
pub const SECTION_ORDER: [&str; 5] = [
    "Solvers",
    "Time",
    "Material",
    "BoundaryCondition",
    "Globals",
];

/// Section whose cards are keyed by the owning material
pub const MATERIAL_SECTION: &str = "Material";

/// Section written once per association
pub const BOUNDARY_CONDITION_SECTION: &str = "BoundaryCondition";

/// Category that enables the heat transfer header line
pub const HEAT_CATEGORY: &str = "Heat";

/// Category that enables the ground water flow header line
pub const FLOW_CATEGORY: &str = "Flow";

/// Last line of every file
pub const TERMINATOR: &str = "END";

/// Export engine
///
/// # Examples
///
/// ```
/// use cardex::core::export::ExportEngine;
/// use cardex::core::format::FormatTable;
/// use cardex::model::{Attribute, AttributeResource, ExportSpec, Item};
///
/// let resource = AttributeResource::new().with_attribute(
///     Attribute::new("sand", "Material", 1).with_item(Item::double("Porosity", [0.3])),
/// );
/// let spec = ExportSpec::new(resource)
///     .with_analysis("Ground Water Flow", ["Flow"])
///     .select("Ground Water Flow");
///
/// let engine = ExportEngine::new(FormatTable::builtin());
/// let mut out = Vec::new();
/// let summary = engine.export_to_writer(&spec, &mut out);
///
/// assert!(summary.success());
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("MP POR 1 0.3 ! Porosity\n"));
/// assert!(text.ends_with("END\n"));
/// ```
pub struct ExportEngine<'t> {
    table: &'t FormatTable,
    strict: bool,
    checksum: bool,
}

impl<'t> ExportEngine<'t> {
    /// Creates an engine over `table`; strict, with checksums
    pub fn new(table: &'t FormatTable) -> Self {
        Self {
            table,
            strict: true,
            checksum: true,
        }
    }

    /// Sets whether any logged error fails the export
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets whether the summary carries the output checksum
    pub fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    /// Exports `spec` to its output path
    ///
    /// The file is written to a temporary file next to the target and moved
    /// into place only once the terminator is written; on any failure no file
    /// is left behind.
    pub fn export(&self, spec: &ExportSpec) -> ExportSummary {
        let started = Instant::now();
        let mut summary = ExportSummary::new(spec.output_path.clone(), self.strict);
        let mut scope = Scope::new(spec);

        tracing::info!(output = ?spec.output_path, "Starting export");

        let path = match self.check_preconditions(&mut scope, true) {
            Some(path) => path,
            None => return self.finish(summary, scope, started),
        };

        let temp = match open_atomic(path) {
            Ok(temp) => temp,
            Err(e) => {
                scope.diagnostics_mut().add_error(
                    DiagnosticKind::Io,
                    format!("Cannot open output {}: {e}", path.display()),
                );
                return self.finish(summary, scope, started);
            }
        };

        match temp.as_file().try_clone() {
            Ok(file) => scope.attach_output(Box::new(BufWriter::new(file))),
            Err(e) => {
                scope.diagnostics_mut().add_error(
                    DiagnosticKind::Io,
                    format!("Cannot open output {}: {e}", path.display()),
                );
                return self.finish(summary, scope, started);
            }
        }

        let written = self.write_all(&mut scope);
        let closed = scope.close_output();

        match written.and(closed) {
            Ok(()) => match temp.persist(path) {
                Ok(_) => {
                    tracing::info!(path = %path.display(), "Wrote output file");
                    summary.completed = true;
                }
                Err(e) => scope.diagnostics_mut().add_error(
                    DiagnosticKind::Io,
                    format!("Cannot write output {}: {}", path.display(), e.error),
                ),
            },
            Err(e) => scope.diagnostics_mut().add_error(
                DiagnosticKind::Io,
                format!("Export terminated unexpectedly -- output not written: {e}"),
            ),
        }

        self.finish(summary, scope, started)
    }

    /// Exports `spec` into `writer`, ignoring the spec's output path
    pub fn export_to_writer<W: Write>(&self, spec: &ExportSpec, writer: W) -> ExportSummary {
        let started = Instant::now();
        let mut summary = ExportSummary::new(spec.output_path.clone(), self.strict);
        let mut scope = Scope::new(spec);

        if self.check_preconditions(&mut scope, false).is_none() {
            return self.finish(summary, scope, started);
        }

        scope.attach_output(Box::new(writer));
        let written = self.write_all(&mut scope);
        let closed = scope.close_output();

        match written.and(closed) {
            Ok(()) => summary.completed = true,
            Err(e) => scope.diagnostics_mut().add_error(
                DiagnosticKind::Io,
                format!("Export terminated unexpectedly: {e}"),
            ),
        }

        self.finish(summary, scope, started)
    }

    /// Checks everything that must hold before any output is produced
    ///
    /// Returns the output path (or an empty path when none is required) when
    /// the export may proceed.
    fn check_preconditions<'s>(
        &self,
        scope: &mut Scope<'s>,
        require_output_path: bool,
    ) -> Option<&'s Path> {
        if scope.diagnostics().has_errors() {
            tracing::error!(
                errors = scope.diagnostics().errors().len(),
                "FILES NOT WRITTEN because of errors"
            );
            return None;
        }

        if scope.analysis_types().is_empty() {
            scope
                .diagnostics_mut()
                .add_warning(DiagnosticKind::NoAnalysisTypes, "No analysis types selected");
        } else {
            tracing::info!(
                analyses = ?scope.analysis_types(),
                categories = ?scope.categories(),
                "Selected analyses"
            );
        }

        match scope.output_path() {
            Some(path) => Some(path),
            None if !require_output_path => Some(Path::new("")),
            None => {
                scope.diagnostics_mut().add_error(
                    DiagnosticKind::MissingOutputPath,
                    "Cannot export -- output filename missing",
                );
                None
            }
        }
    }

    fn finish(&self, mut summary: ExportSummary, scope: Scope<'_>, started: Instant) -> ExportSummary {
        summary.counters = scope.counters();
        if summary.completed && self.checksum {
            summary.checksum = Some(scope.checksum());
        }
        summary.diagnostics = scope.into_diagnostics();
        summary.duration = started.elapsed();
        summary.log_summary();
        summary
    }

    fn write_all(&self, scope: &mut Scope<'_>) -> io::Result<()> {
        self.write_header(scope)?;

        for section in SECTION_ORDER {
            self.write_section(scope, section)?;
        }

        sections::write_material_ids(scope)?;
        sections::write_functions(scope)?;
        sections::write_material_assignments(scope)?;
        sections::write_bc_sets(scope)?;

        scope.write_line(TERMINATOR)
    }

    fn write_header(&self, scope: &mut Scope<'_>) -> io::Result<()> {
        if scope.has_category(HEAT_CATEGORY) {
            scope.write_line("OP HT")?;
        }
        if scope.has_category(FLOW_CATEGORY) {
            scope.write_line("OP GW")?;
        }
        let count = scope.constituent_count();
        scope.write_line(&format!("OP TRN {count}"))
    }

    /// Writes one category section
    pub fn write_section(&self, scope: &mut Scope<'_>, section: &str) -> io::Result<()> {
        tracing::debug!(section, "Writing section");
        match section {
            BOUNDARY_CONDITION_SECTION => self.write_boundary_conditions(scope),
            MATERIAL_SECTION => {
                let cards = self.table.category(section);
                for material in relevant_attributes(scope, section) {
                    let id = material.id.to_string();
                    for card in cards {
                        self.write_card(scope, card, material, Some(&id))?;
                    }
                }
                Ok(())
            }
            _ => {
                let attributes = relevant_attributes(scope, section);
                for card in self.table.category(section) {
                    for attribute in &attributes {
                        let id = attribute.id.to_string();
                        let context = (card.kind == CardKind::IdVal).then_some(id.as_str());
                        self.write_card(scope, card, attribute, context)?;
                    }
                }
                Ok(())
            }
        }
    }

    /// Writes one card for `attribute`
    ///
    /// Absent, disabled and out-of-category items produce no line. A missing
    /// item of a `multival` card is an error.
    fn write_card(
        &self,
        scope: &mut Scope<'_>,
        card: &CardFormat,
        attribute: &Attribute,
        context_id: Option<&str>,
    ) -> io::Result<()> {
        if card.kind == CardKind::MultiVal {
            return self.write_multival(scope, card, attribute);
        }

        let Some(item) = attribute.item(card.item_name()) else {
            tracing::debug!(
                attribute = %attribute.name,
                item = card.item_name(),
                "Item not present, card skipped"
            );
            return Ok(());
        };
        if !self.is_written(scope, item) {
            return Ok(());
        }

        self.emit(scope, card, item, context_id).map(|_| ())
    }

    fn write_multival(
        &self,
        scope: &mut Scope<'_>,
        card: &CardFormat,
        attribute: &Attribute,
    ) -> io::Result<()> {
        let mut items = Vec::with_capacity(card.items.len());
        for name in &card.items {
            match attribute.item(name) {
                Some(item) => items.push(item),
                None => {
                    scope.diagnostics_mut().add_card_error(&CardError::MissingItem {
                        item: name.clone(),
                        opcode: card.opcode.trim().to_string(),
                    });
                    scope.card_skipped();
                    return Ok(());
                }
            }
        }
        if !items.iter().all(|item| self.is_written(scope, item)) {
            return Ok(());
        }

        let resolver = ValueResolver::new(scope.query());
        let mut tokens = Vec::new();
        for item in items {
            match resolver.resolve(item, card.subitem_names.as_deref(), scope.diagnostics_mut()) {
                Ok(values) => tokens.extend(values),
                Err(e) => {
                    scope.diagnostics_mut().add_card_error(&e);
                    scope.card_skipped();
                    return Ok(());
                }
            }
        }

        scope.write_line(&card.line(None, &tokens))?;
        scope.card_written();
        Ok(())
    }

    fn write_boundary_conditions(&self, scope: &mut Scope<'_>) -> io::Result<()> {
        for condition in relevant_attributes(scope, BOUNDARY_CONDITION_SECTION) {
            let Some(card) = self.boundary_format(scope, &condition.type_name) else {
                scope.diagnostics_mut().add_error(
                    DiagnosticKind::MissingCardFormat,
                    format!(
                        "No card format for boundary condition type \"{}\"",
                        condition.type_name
                    ),
                );
                continue;
            };

            if condition.associations.is_empty() {
                scope.diagnostics_mut().add_warning(
                    DiagnosticKind::UnassociatedBoundaryCondition,
                    format!(
                        "Boundary condition \"{}\" is not associated with any model entity",
                        condition.name
                    ),
                );
                continue;
            }

            let Some(item) = condition.item(card.item_name()) else {
                scope.diagnostics_mut().add_card_error(&CardError::MissingItem {
                    item: card.item_name().to_string(),
                    opcode: card.opcode.trim().to_string(),
                });
                scope.card_skipped();
                continue;
            };
            if !self.is_written(scope, item) {
                continue;
            }

            for &entity in &condition.associations {
                if !sections::check_association(scope, condition, entity) {
                    continue;
                }
                let id = scope.next_association().to_string();
                if self.emit(scope, card, item, Some(&id))? {
                    scope.assign_association(condition.id, entity);
                }
            }
        }
        Ok(())
    }

    /// Descriptor of a boundary condition type, falling back to base types
    fn boundary_format(&self, scope: &Scope<'_>, type_name: &str) -> Option<&'t CardFormat> {
        let query = scope.query();
        let mut current = Some(type_name);
        let mut seen = HashSet::new();
        while let Some(name) = current {
            if let Some(card) = self.table.boundary_condition(name) {
                return Some(card);
            }
            if !seen.insert(name) {
                return None;
            }
            current = query
                .definition(name)
                .and_then(|def| def.base_type.as_deref());
        }
        None
    }

    fn is_written(&self, scope: &Scope<'_>, item: &Item) -> bool {
        item.enabled && item.is_member_of(scope.categories())
    }

    /// Writes the card for one item through its custom writer or the resolver
    ///
    /// Returns whether a line was written. Card errors are recorded and the
    /// card is skipped; output errors are returned.
    fn emit(
        &self,
        scope: &mut Scope<'_>,
        card: &CardFormat,
        item: &Item,
        context_id: Option<&str>,
    ) -> io::Result<bool> {
        let result = match card.custom_writer {
            Some(writer) => writer.write(scope, item, card, context_id),
            None => write_resolved(scope, card, item, context_id),
        };

        match result {
            Ok(()) => {
                scope.card_written();
                Ok(true)
            }
            Err(WriteError::Card(e)) => {
                scope.diagnostics_mut().add_card_error(&e);
                scope.card_skipped();
                Ok(false)
            }
            Err(WriteError::Io(e)) => Err(e),
        }
    }
}

fn write_resolved(
    scope: &mut Scope<'_>,
    card: &CardFormat,
    item: &Item,
    context_id: Option<&str>,
) -> Result<(), WriteError> {
    let resolver = ValueResolver::new(scope.query());
    let tokens = resolver.resolve(item, card.subitem_names.as_deref(), scope.diagnostics_mut())?;
    scope.write_line(&card.line(context_id, &tokens))?;
    Ok(())
}

/// Temporary file in the directory of `path`
fn open_atomic(path: &Path) -> io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::hooks::CustomWriter;
    use crate::model::attribute::{Definition, EntityKind, ModelEntity};
    use crate::model::resource::AttributeResource;
    use tempfile::TempDir;

    fn flow_spec(resource: AttributeResource) -> ExportSpec {
        ExportSpec::new(resource)
            .with_analysis("Ground Water Flow", ["Flow"])
            .select("Ground Water Flow")
    }

    fn export_text(table: &FormatTable, spec: &ExportSpec) -> (String, ExportSummary) {
        let mut out = Vec::new();
        let summary = ExportEngine::new(table).export_to_writer(spec, &mut out);
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_minimal_file() {
        let spec = ExportSpec::new(AttributeResource::new());
        let (text, summary) = export_text(FormatTable::builtin(), &spec);

        assert_eq!(text, "OP TRN 0\nEND\n");
        assert!(summary.success());
        assert_eq!(
            summary
                .diagnostics
                .warning_count(DiagnosticKind::NoAnalysisTypes),
            1
        );
    }

    #[test]
    fn test_upstream_errors_abort_before_output() {
        let mut spec = flow_spec(AttributeResource::new());
        spec.diagnostics
            .add_error(DiagnosticKind::Upstream, "Invalid attribute");
        let (text, summary) = export_text(FormatTable::builtin(), &spec);

        assert!(text.is_empty());
        assert!(!summary.completed);
        assert!(!summary.success());
    }

    #[test]
    fn test_material_cards_per_material_in_descriptor_order() {
        let resource = AttributeResource::new()
            .with_attribute(
                Attribute::new("clay", "Material", 2)
                    .with_item(Item::double("SpecificStorage", [0.001]))
                    .with_item(Item::double("Porosity", [0.45])),
            )
            .with_attribute(
                Attribute::new("sand", "Material", 1).with_item(Item::double("Porosity", [0.3])),
            );
        let table = FormatTable::builtin();
        let (text, _) = export_text(table, &flow_spec(resource));

        let cards: Vec<&str> = text.lines().filter(|l| l.starts_with("MP")).collect();
        assert_eq!(
            cards,
            vec![
                "MP POR 1 0.3 ! Porosity",
                "MP POR 2 0.45 ! Porosity",
                "MP SS 2 0.001 ! Specific storage",
            ]
        );
    }

    #[test]
    fn test_multival_missing_item_skips_card() {
        let resource = AttributeResource::new().with_attribute(
            Attribute::new("globals", "Globals", 1).with_item(Item::int("RayToADHSocket", [5000])),
        );
        let (text, summary) = export_text(FormatTable::builtin(), &flow_spec(resource));

        assert!(!text.contains("OP SOC"));
        assert_eq!(summary.diagnostics.error_count(DiagnosticKind::MissingItem), 1);
        assert!(summary.completed);
        assert!(!summary.success());
    }

    #[test]
    fn test_disabled_and_out_of_category_items_skipped() {
        let resource = AttributeResource::new().with_attribute(
            Attribute::new("globals", "Globals", 1)
                .with_item(Item::double("Gravity", [9.8]).disabled())
                .with_item(Item::double("WaterSpecificHeat", [1.0]).in_categories(["Heat"]))
                .with_item(Item::double("ReferenceDensity", [1000.0])),
        );
        let (text, _) = export_text(FormatTable::builtin(), &flow_spec(resource));

        assert!(!text.contains("MP G "));
        assert!(!text.contains("MP SHW"));
        assert!(text.contains("MP RHO 1000.0 ! Reference density, g/m^3\n"));
    }

    #[test]
    fn test_boundary_condition_lines_and_sets() {
        let resource = AttributeResource::new()
            .with_definition(Definition::new("BoundaryCondition"))
            .with_definition(Definition::new("SpecifiedHead").derived_from("BoundaryCondition"))
            .with_definition(Definition::new("METData").derived_from("BoundaryCondition"))
            .with_entity(ModelEntity::new(7, EntityKind::Edge))
            .with_entity(ModelEntity::new(8, EntityKind::Vertex))
            .with_attribute(
                Attribute::new("head", "SpecifiedHead", 2)
                    .with_item(Item::double("Value", [12.5]))
                    .associated_with([7, 8]),
            )
            .with_attribute(
                Attribute::new("met", "METData", 3)
                    .with_item(Item::int("Value", [4]))
                    .associated_with([8]),
            );
        let (text, summary) = export_text(FormatTable::builtin(), &flow_spec(resource));

        assert!(text.contains(
            "DB FLW 1 12.5 ! Dirichlet boundary condition for flow\n\
             DB FLW 2 12.5 ! Dirichlet boundary condition for flow\n\
             NB MET 3 4\n"
        ));
        assert!(text.contains("EGS 7 1\nNDS 8 2\nNDS 8 3\nEND\n"));
        assert_eq!(summary.counters.associations, 3);
        assert!(summary.success());
    }

    #[test]
    fn test_region_association_writes_no_bc_card() {
        let resource = AttributeResource::new()
            .with_definition(Definition::new("SpecifiedHead").derived_from("BoundaryCondition"))
            .with_entity(ModelEntity::new(5, EntityKind::Region))
            .with_entity(ModelEntity::new(6, EntityKind::Vertex))
            .with_attribute(
                Attribute::new("head", "SpecifiedHead", 1)
                    .with_item(Item::double("Value", [1.0]))
                    .associated_with([5, 42, 6]),
            );
        let (text, summary) = export_text(FormatTable::builtin(), &flow_spec(resource));

        assert_eq!(
            text,
            "OP GW\nOP TRN 0\n\
             DB FLW 1 1.0 ! Dirichlet boundary condition for flow\n\
             NDS 6 1\nEND\n"
        );
        assert_eq!(
            summary
                .diagnostics
                .error_count(DiagnosticKind::InvalidAssociation),
            2
        );
        assert_eq!(summary.counters.associations, 1);
    }

    #[test]
    fn test_unassociated_boundary_condition_emits_nothing() {
        let resource = AttributeResource::new()
            .with_definition(Definition::new("SpecifiedFlux").derived_from("BoundaryCondition"))
            .with_attribute(
                Attribute::new("flux", "SpecifiedFlux", 1).with_item(Item::double("Value", [1.0])),
            );
        let (text, summary) = export_text(FormatTable::builtin(), &flow_spec(resource));

        assert!(!text.contains("NB FLW"));
        assert_eq!(
            summary
                .diagnostics
                .warning_count(DiagnosticKind::UnassociatedBoundaryCondition),
            1
        );
        assert!(summary.success());
    }

    #[test]
    fn test_boundary_format_falls_back_to_base_type() {
        let resource = AttributeResource::new()
            .with_definition(Definition::new("SpecifiedHead").derived_from("BoundaryCondition"))
            .with_definition(Definition::new("TidalHead").derived_from("SpecifiedHead"))
            .with_entity(ModelEntity::new(1, EntityKind::Vertex))
            .with_attribute(
                Attribute::new("tide", "TidalHead", 1)
                    .with_item(Item::double("Value", [2.0]))
                    .associated_with([1]),
            )
            .with_attribute(
                Attribute::new("other", "BoundaryCondition", 2).associated_with([1]),
            );
        let (text, summary) = export_text(FormatTable::builtin(), &flow_spec(resource));

        assert!(text.contains("DB FLW 1 2.0"));
        assert_eq!(
            summary.diagnostics.error_count(DiagnosticKind::MissingCardFormat),
            1
        );
    }

    #[test]
    fn test_failed_bc_card_does_not_consume_association_id() {
        let table = FormatTable::new().with_boundary_condition(
            "Switch",
            CardFormat::bc("Value", "NB SW").with_custom_writer(CustomWriter::OutputInterval),
        );
        let resource = AttributeResource::new()
            .with_definition(Definition::new("Switch").derived_from("BoundaryCondition"))
            .with_entity(ModelEntity::new(1, EntityKind::Vertex))
            .with_attribute(
                Attribute::new("bad", "Switch", 1)
                    .with_item(Item::discrete("Value", 9, vec![]))
                    .associated_with([1]),
            );
        let (text, summary) = export_text(&table, &flow_spec(resource));

        assert_eq!(text, "OP GW\nOP TRN 0\nEND\n");
        assert_eq!(summary.counters.associations, 0);
        assert_eq!(summary.counters.cards_skipped, 1);
    }

    #[test]
    fn test_export_requires_output_path() {
        let temp_files = || {
            std::fs::read_dir(".")
                .unwrap()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tmp"))
                .count()
        };
        let before = temp_files();
        let spec = flow_spec(AttributeResource::new());
        let summary = ExportEngine::new(FormatTable::builtin()).export(&spec);

        assert!(!summary.success());
        assert_eq!(
            summary
                .diagnostics
                .error_count(DiagnosticKind::MissingOutputPath),
            1
        );
        assert_eq!(summary.counters.lines_written, 0);
        assert!(summary.checksum.is_none());
        assert_eq!(temp_files(), before);
    }

    #[test]
    fn test_export_writes_file_and_checksum() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.bc");
        let spec = flow_spec(AttributeResource::new()).with_output(&path);
        let summary = ExportEngine::new(FormatTable::builtin()).export(&spec);

        assert!(summary.success());
        let contents = std::fs::read(&path).unwrap();
        assert_eq!(contents, b"OP GW\nOP TRN 0\nEND\n");
        assert_eq!(
            summary.checksum.as_deref(),
            Some(
                crate::core::verification::checksum::calculate_checksum_bytes(&contents).as_str()
            )
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unopenable_output_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("run.bc");
        let spec = flow_spec(AttributeResource::new()).with_output(&path);
        let summary = ExportEngine::new(FormatTable::builtin()).export(&spec);

        assert!(!summary.completed);
        assert_eq!(summary.diagnostics.error_count(DiagnosticKind::Io), 1);
        assert!(!path.exists());
    }

    #[test]
    fn test_checksum_can_be_disabled() {
        let spec = ExportSpec::new(AttributeResource::new());
        let summary = ExportEngine::new(FormatTable::builtin())
            .with_checksum(false)
            .export_to_writer(&spec, Vec::new());
        assert!(summary.completed);
        assert!(summary.checksum.is_none());
    }
}
