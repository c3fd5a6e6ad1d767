//! End-to-end export tests against the built-in ground water table

use cardex::core::export::{DiagnosticKind, ExportEngine, ExportSummary};
use cardex::core::format::FormatTable;
use cardex::model::{
    Attribute, AttributeResource, Definition, EntityKind, ExportSpec, Item, ModelEntity,
};
use std::fs;
use tempfile::TempDir;

fn heat_and_flow(resource: AttributeResource) -> ExportSpec {
    ExportSpec::new(resource)
        .with_analysis("Heat Transfer", ["Heat"])
        .with_analysis("Ground Water Flow", ["Flow"])
        .select("Heat Transfer")
        .select("Ground Water Flow")
}

fn export_text(spec: &ExportSpec) -> (String, ExportSummary) {
    let engine = ExportEngine::new(FormatTable::builtin());
    let mut out = Vec::new();
    let summary = engine.export_to_writer(spec, &mut out);
    (String::from_utf8(out).unwrap(), summary)
}

fn output_interval(index: i64, children: Vec<Item>) -> AttributeResource {
    AttributeResource::new()
        .with_attribute(Attribute::new("output series", "Function", 7).with_item(Item::group(
            "ValuePairs",
            vec![
                Item::double("X", [0.0, 50.0]),
                Item::double("Value", [5.0, 5.0]),
            ],
        )))
        .with_attribute(
            Attribute::new("time", "Time", 1)
                .with_item(Item::discrete("OutputInterval", index, children)),
        )
}

#[test]
fn test_header_material_and_terminator() {
    let resource = AttributeResource::new().with_attribute(
        Attribute::new("sand", "Material", 1).with_item(Item::double("Porosity", [0.3])),
    );
    let spec = heat_and_flow(resource)
        .with_constituent("Salt")
        .with_constituent("Heat");

    let (text, summary) = export_text(&spec);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(&lines[..3], ["OP HT", "OP GW", "OP TRN 2"]);
    assert!(lines.contains(&"MP POR 1 0.3 ! Porosity"));
    assert!(lines.contains(&"MID 1 ! sand"));
    assert_eq!(lines.last(), Some(&"END"));
    assert!(summary.success());
}

#[test]
fn test_fixed_output_interval() {
    let resource = output_interval(
        0,
        vec![
            Item::double("FixedInterval", [10.0]),
            Item::discrete("FixedIntervalUnits", 2, vec![]),
        ],
    );
    let (text, summary) = export_text(&heat_and_flow(resource));

    assert!(text.contains("OC INT 10.0 2 ! Output time interval\n"));
    assert!(summary.diagnostics.is_empty());
}

#[test]
fn test_function_output_interval() {
    let resource = output_interval(1, vec![Item::reference("IntervalFunction", "output series")]);
    let (text, _) = export_text(&heat_and_flow(resource));

    assert!(text.contains("OC SRS 7 ! Output time interval\n"));
    assert!(!text.contains("OC INT"));
    assert!(text.contains("XY1 7 2 0 0 ! output series\n0.0 5.0\n50.0 5.0\n"));
}

#[test]
fn test_unexpected_output_interval_branch() {
    let resource = output_interval(2, vec![]);
    let (text, summary) = export_text(&heat_and_flow(resource));

    assert!(!text.contains("OC "));
    assert_eq!(
        summary
            .diagnostics
            .error_count(DiagnosticKind::UnexpectedDiscreteValue),
        1
    );
    assert!(summary.completed);
    assert!(!summary.success());
    assert!(text.ends_with("END\n"));
}

#[test]
fn test_section_order_ignores_input_order() {
    let globals = Attribute::new("globals", "Globals", 3).with_item(Item::double("Gravity", [9.8]));
    let material =
        Attribute::new("sand", "Material", 2).with_item(Item::double("Porosity", [0.25]));
    let solvers =
        Attribute::new("solver", "Solvers", 1).with_item(Item::int("MaxNonLinearIters", [10]));

    let forward = AttributeResource::new()
        .with_attribute(globals.clone())
        .with_attribute(material.clone())
        .with_attribute(solvers.clone());
    let backward = AttributeResource::new()
        .with_attribute(solvers)
        .with_attribute(material)
        .with_attribute(globals);

    let (first, _) = export_text(&heat_and_flow(forward));
    let (second, _) = export_text(&heat_and_flow(backward));
    assert_eq!(first, second);

    let solver = first.find("IP NIT 10").unwrap();
    let porosity = first.find("MP POR 2 0.25").unwrap();
    let gravity = first.find("MP G 9.8").unwrap();
    assert!(solver < porosity && porosity < gravity);
}

#[test]
fn test_repeated_exports_are_identical() {
    let dir = TempDir::new().unwrap();
    let resource = AttributeResource::new()
        .with_definition(Definition::new("SpecifiedHead").derived_from("BoundaryCondition"))
        .with_entity(ModelEntity::new(5, EntityKind::Face))
        .with_attribute(
            Attribute::new("sand", "Material", 1)
                .with_item(Item::double("Porosity", [0.3]))
                .associated_with([5]),
        )
        .with_attribute(
            Attribute::new("head", "SpecifiedHead", 2)
                .with_item(Item::double("Value", [12.5]))
                .associated_with([5]),
        );

    let first = dir.path().join("first.bc");
    let second = dir.path().join("second.bc");
    let engine = ExportEngine::new(FormatTable::builtin());

    let a = engine.export(&heat_and_flow(resource.clone()).with_output(&first));
    let b = engine.export(&heat_and_flow(resource).with_output(&second));

    assert!(a.success() && b.success());
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    assert_eq!(a.checksum, b.checksum);
    assert!(a.checksum.is_some());

    let text = fs::read_to_string(&first).unwrap();
    assert!(text.contains("DB FLW 1 12.5 ! Dirichlet boundary condition for flow\n"));
    assert!(text.contains("MTS 5 1\n"));
    assert!(text.contains("FCS 5 1\n"));
}

#[test]
fn test_missing_output_path_writes_nothing() {
    let temp_files = || {
        fs::read_dir(".")
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tmp"))
            .count()
    };
    let before = temp_files();
    let spec = heat_and_flow(AttributeResource::new());

    let summary = ExportEngine::new(FormatTable::builtin()).export(&spec);

    assert!(!summary.completed);
    assert!(!summary.success());
    assert_eq!(
        summary.diagnostics.error_count(DiagnosticKind::MissingOutputPath),
        1
    );
    assert_eq!(summary.counters.lines_written, 0);
    assert!(summary.checksum.is_none());
    assert_eq!(temp_files(), before);
}

#[test]
fn test_upstream_errors_block_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blocked.bc");
    let mut spec = heat_and_flow(AttributeResource::new()).with_output(&path);
    spec.diagnostics
        .add_error(DiagnosticKind::InvalidAssociation, "found upstream");

    let summary = ExportEngine::new(FormatTable::builtin()).export(&spec);

    assert!(!summary.completed);
    assert!(!path.exists());
}

#[test]
fn test_unassociated_boundary_condition_writes_no_lines() {
    let resource = AttributeResource::new()
        .with_definition(Definition::new("SpecifiedFlux").derived_from("BoundaryCondition"))
        .with_attribute(
            Attribute::new("flux", "SpecifiedFlux", 4).with_item(Item::double("Value", [1.0])),
        );

    let (text, summary) = export_text(&heat_and_flow(resource));

    assert!(!text.contains("NB FLW"));
    assert!(!text.contains("NDS") && !text.contains("EGS") && !text.contains("FCS"));
    assert_eq!(
        summary
            .diagnostics
            .warning_count(DiagnosticKind::UnassociatedBoundaryCondition),
        1
    );
    assert_eq!(summary.counters.associations, 0);
}

#[test]
fn test_association_ids_follow_emitted_lines() {
    let resource = AttributeResource::new()
        .with_definition(Definition::new("SpecifiedHead").derived_from("BoundaryCondition"))
        .with_entity(ModelEntity::new(1, EntityKind::Vertex))
        .with_entity(ModelEntity::new(2, EntityKind::Edge))
        .with_attribute(
            Attribute::new("head", "SpecifiedHead", 3)
                .with_item(Item::double("Value", [4.0]))
                .associated_with([1, 2]),
        );

    let (text, summary) = export_text(&heat_and_flow(resource));

    assert!(text.contains("DB FLW 1 4.0 ! Dirichlet boundary condition for flow\n"));
    assert!(text.contains("DB FLW 2 4.0 ! Dirichlet boundary condition for flow\n"));
    assert!(text.contains("NDS 1 1\nEGS 2 2\n"));
    assert_eq!(summary.counters.associations, 2);
}

#[test]
fn test_multival_tokens_follow_descriptor_order() {
    let resource = AttributeResource::new().with_attribute(
        Attribute::new("globals", "Globals", 1)
            .with_item(Item::int("ADHToRaySocket", [5002]))
            .with_item(Item::int("RayToADHSocket", [5001])),
    );

    let (text, _) = export_text(&heat_and_flow(resource));
    assert!(text.contains("OP SOC 5001 5002 ! Socket numbers"));
}

#[test]
fn test_category_filtering_skips_items() {
    let resource = AttributeResource::new().with_attribute(
        Attribute::new("sand", "Material", 1)
            .with_item(Item::double("Albedo", [0.2]).in_categories(["Heat"]))
            .with_item(Item::double("Porosity", [0.3]).in_categories(["Flow"]))
            .with_item(Item::double("Tortuosity", [0.5]).disabled()),
    );
    let spec = ExportSpec::new(resource)
        .with_analysis("Ground Water Flow", ["Flow"])
        .select("Ground Water Flow");

    let (text, summary) = export_text(&spec);

    assert!(text.starts_with("OP GW\nOP TRN 0\n"));
    assert!(text.contains("MP POR 1 0.3"));
    assert!(!text.contains("MP ALB"));
    assert!(!text.contains("MP TOR"));
    assert!(summary.success());
}

#[test]
fn test_export_from_toml_spec_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("model.bc");
    let spec_path = dir.path().join("model.toml");
    let spec_toml = format!(
        r#"
output_path = "{}"
analysis_types = ["Ground Water Flow"]
constituents = ["Salt"]

[analyses]
"Ground Water Flow" = ["Flow"]

[[resource.entities]]
id = 1
kind = "region"

[[resource.attributes]]
name = "sand"
type_name = "Material"
id = 1
associations = [1]

[[resource.attributes.items]]
name = "Porosity"
type = "double"
values = [0.3]
"#,
        output.display().to_string().replace('\\', "\\\\")
    );
    fs::write(&spec_path, spec_toml).unwrap();

    let spec = ExportSpec::from_file(&spec_path).unwrap();
    let summary = ExportEngine::new(FormatTable::builtin()).export(&spec);

    assert!(summary.success(), "{}", summary.diagnostics.render());
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        "OP GW\nOP TRN 1\nMP POR 1 0.3 ! Porosity\nMID 1 ! sand\nMTS 1 1\nEND\n"
    );
}

#[test]
fn test_export_from_json_spec_file() {
    let dir = TempDir::new().unwrap();
    let spec_path = dir.path().join("model.json");
    let json = r#"{
        "analysis_types": ["Heat Transfer"],
        "analyses": {"Heat Transfer": ["Heat"]},
        "resource": {
            "attributes": [{
                "name": "solver",
                "type_name": "Solvers",
                "id": 1,
                "items": [{"name": "MaxNonLinearIters", "type": "int", "values": [25]}]
            }]
        }
    }"#;
    fs::write(&spec_path, json).unwrap();

    let spec = ExportSpec::from_file(&spec_path).unwrap();
    let (text, summary) = export_text(&spec);

    assert_eq!(
        text,
        "OP HT\nOP TRN 0\nIP NIT 25 ! Maximum number of non-linear iterations\nEND\n"
    );
    assert!(summary.success());
}

#[test]
fn test_unwritable_output_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("model.bc");
    let spec = heat_and_flow(AttributeResource::new()).with_output(&path);

    let summary = ExportEngine::new(FormatTable::builtin()).export(&spec);

    assert!(!summary.completed);
    assert!(summary.checksum.is_none());
    assert_eq!(summary.diagnostics.error_count(DiagnosticKind::Io), 1);
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unset_output_interval_skips_only_that_card() {
    let dir = TempDir::new().unwrap();
    let spec_path = dir.path().join("unset.json");
    let json = r#"{
        "analysis_types": ["Ground Water Flow"],
        "analyses": {"Ground Water Flow": ["Flow"]},
        "resource": {
            "attributes": [{
                "name": "time",
                "type_name": "Time",
                "id": 1,
                "items": [
                    {"name": "JulianDay", "type": "int", "values": [120]},
                    {"name": "OutputInterval", "type": "discrete", "index": -1}
                ]
            }]
        }
    }"#;
    fs::write(&spec_path, json).unwrap();

    let spec = ExportSpec::from_file(&spec_path).unwrap();
    let (text, summary) = export_text(&spec);

    assert!(text.contains("TC JUL 120"));
    assert!(!text.contains("OC "));
    assert_eq!(
        summary
            .diagnostics
            .error_count(DiagnosticKind::UnexpectedDiscreteValue),
        1
    );
    assert_eq!(summary.diagnostics.errors().len(), 1);
    assert!(summary.completed);
}
