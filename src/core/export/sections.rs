//! Per-entity card blocks
//!
//! Written after the category sections: material ids, function series,
//! material assignments per domain and boundary condition entity sets.

use super::diagnostics::DiagnosticKind;
use super::scope::Scope;
use crate::core::resolve::numeric::format_double;
use crate::domain::ids::{AttributeId, EntityId};
use crate::model::attribute::{Attribute, EntityKind};
use crate::model::item::{Item, ItemKind};
use std::io;

/// Definition type of material attributes
pub const MATERIAL_TYPE: &str = "Material";

/// Definition type of function (XY series) attributes
pub const FUNCTION_TYPE: &str = "Function";

/// Group item holding a function's points
pub const VALUE_PAIRS_ITEM: &str = "ValuePairs";

/// Attributes of `type_name` that belong to the active categories, by id
pub(crate) fn relevant_attributes<'a>(scope: &Scope<'a>, type_name: &str) -> Vec<&'a Attribute> {
    let query = scope.query();
    query
        .attributes_of_type(type_name)
        .into_iter()
        .filter(|attribute| query.is_relevant(attribute, scope.categories()))
        .collect()
}

/// `MID <id> ! <name>` for every material
pub fn write_material_ids(scope: &mut Scope<'_>) -> io::Result<()> {
    for material in relevant_attributes(scope, MATERIAL_TYPE) {
        scope.write_line(&format!("MID {} ! {}", material.id, material.name))?;
    }
    Ok(())
}

/// `XY1` header plus one `<x> <y>` line per point for every function
///
/// A function whose points are missing or uneven is logged and skipped.
pub fn write_functions(scope: &mut Scope<'_>) -> io::Result<()> {
    for function in relevant_attributes(scope, FUNCTION_TYPE) {
        let Some(points) = function_points(function) else {
            scope.diagnostics_mut().add_error(
                DiagnosticKind::InvalidFunction,
                format!(
                    "Function \"{}\" has no valid {VALUE_PAIRS_ITEM} data",
                    function.name
                ),
            );
            continue;
        };

        scope.write_line(&format!(
            "XY1 {} {} 0 0 ! {}",
            function.id,
            points.len(),
            function.name
        ))?;
        for (x, y) in points {
            scope.write_line(&format!("{} {}", format_double(x), format_double(y)))?;
        }
    }
    Ok(())
}

fn function_points(function: &Attribute) -> Option<Vec<(f64, f64)>> {
    let pairs = function.item(VALUE_PAIRS_ITEM)?;
    let xs = double_values(pairs.child("X")?)?;
    let ys = double_values(pairs.child("Value")?)?;
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    Some(xs.iter().copied().zip(ys.iter().copied()).collect())
}

fn double_values(item: &Item) -> Option<&[f64]> {
    match &item.kind {
        ItemKind::Double { values } => Some(values),
        _ => None,
    }
}

/// `MTS <domain id> <material id>` for every face and region
///
/// A domain without a material is a warning; a domain with several is an
/// error and gets the lowest material id.
pub fn write_material_assignments(scope: &mut Scope<'_>) -> io::Result<()> {
    let materials = relevant_attributes(scope, MATERIAL_TYPE);

    for domain in scope.query().domains() {
        let assigned: Vec<AttributeId> = materials
            .iter()
            .filter(|material| material.associations.contains(&domain.id))
            .map(|material| material.id)
            .collect();

        let Some(&material) = assigned.first() else {
            scope.diagnostics_mut().add_warning(
                DiagnosticKind::UnassignedDomain,
                format!("No material assigned to domain {}", domain.id),
            );
            continue;
        };

        if assigned.len() > 1 {
            scope.diagnostics_mut().add_error(
                DiagnosticKind::MaterialConflict,
                format!(
                    "Domain {} is assigned {} materials, using material {}",
                    domain.id,
                    assigned.len(),
                    material
                ),
            );
        }

        scope.write_line(&format!("MTS {} {}", domain.id, material))?;
    }
    Ok(())
}

/// Set card opcode for an entity kind; regions take no boundary conditions
pub(crate) fn set_opcode(kind: EntityKind) -> Option<&'static str> {
    match kind {
        EntityKind::Vertex => Some("NDS"),
        EntityKind::Edge => Some("EGS"),
        EntityKind::Face => Some("FCS"),
        EntityKind::Region => None,
    }
}

/// Whether a boundary condition may be applied to `entity`
///
/// Regions and unknown entities are logged as `InvalidAssociation`; such an
/// association gets neither a bc card nor an association id.
pub(crate) fn check_association(
    scope: &mut Scope<'_>,
    condition: &Attribute,
    entity: EntityId,
) -> bool {
    let message = match scope.query().entity(entity).map(|entity| entity.kind) {
        Some(kind) if set_opcode(kind).is_some() => return true,
        Some(_) => format!(
            "Boundary condition \"{}\" cannot be applied to region {}",
            condition.name, entity
        ),
        None => format!(
            "Boundary condition \"{}\" is associated with unknown entity {}",
            condition.name, entity
        ),
    };
    scope
        .diagnostics_mut()
        .add_error(DiagnosticKind::InvalidAssociation, message);
    false
}

/// `NDS`/`EGS`/`FCS <entity id> <association id>` for every association
/// assigned while writing boundary conditions
pub fn write_bc_sets(scope: &mut Scope<'_>) -> io::Result<()> {
    let associations = scope.associations().to_vec();

    for association in associations {
        let opcode = scope
            .query()
            .entity(association.entity)
            .and_then(|entity| set_opcode(entity.kind));
        let Some(opcode) = opcode else {
            tracing::debug!(entity = %association.entity, "No set card for association");
            continue;
        };

        scope.write_line(&format!(
            "{opcode} {} {}",
            association.entity, association.id
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::diagnostics::Diagnostics;
    use crate::model::attribute::ModelEntity;
    use crate::model::resource::AttributeResource;
    use crate::model::spec::ExportSpec;

    fn run<F>(resource: AttributeResource, write: F) -> (String, Diagnostics)
    where
        F: FnOnce(&mut Scope<'_>),
    {
        let spec = ExportSpec::new(resource);
        let mut out = Vec::new();
        let diagnostics;
        {
            let mut scope = Scope::new(&spec);
            scope.attach_output(Box::new(&mut out));
            write(&mut scope);
            diagnostics = scope.into_diagnostics();
        }
        (String::from_utf8(out).unwrap(), diagnostics)
    }

    fn series(name: &str, id: u32, xs: Vec<f64>, ys: Vec<f64>) -> Attribute {
        Attribute::new(name, FUNCTION_TYPE, id).with_item(Item::group(
            VALUE_PAIRS_ITEM,
            vec![Item::double("X", xs), Item::double("Value", ys)],
        ))
    }

    #[test]
    fn test_material_ids_by_id() {
        let resource = AttributeResource::new()
            .with_attribute(Attribute::new("clay", MATERIAL_TYPE, 2))
            .with_attribute(Attribute::new("sand", MATERIAL_TYPE, 1));

        let (out, _) = run(resource, |scope| write_material_ids(scope).unwrap());
        assert_eq!(out, "MID 1 ! sand\nMID 2 ! clay\n");
    }

    #[test]
    fn test_functions_written_with_points() {
        let resource = AttributeResource::new()
            .with_attribute(series("dt", 3, vec![0.0, 100.0], vec![1.0, 2.5]));

        let (out, diagnostics) = run(resource, |scope| write_functions(scope).unwrap());
        assert_eq!(out, "XY1 3 2 0 0 ! dt\n0.0 1.0\n100.0 2.5\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_uneven_function_skipped() {
        let resource = AttributeResource::new()
            .with_attribute(series("bad", 1, vec![0.0, 1.0], vec![1.0]))
            .with_attribute(Attribute::new("empty", FUNCTION_TYPE, 2));

        let (out, diagnostics) = run(resource, |scope| write_functions(scope).unwrap());
        assert!(out.is_empty());
        assert_eq!(diagnostics.error_count(DiagnosticKind::InvalidFunction), 2);
    }

    #[test]
    fn test_material_assignments() {
        let resource = AttributeResource::new()
            .with_entity(ModelEntity::new(1, EntityKind::Region))
            .with_entity(ModelEntity::new(2, EntityKind::Region))
            .with_entity(ModelEntity::new(3, EntityKind::Face))
            .with_entity(ModelEntity::new(4, EntityKind::Edge))
            .with_attribute(Attribute::new("clay", MATERIAL_TYPE, 2).associated_with([1, 3]))
            .with_attribute(Attribute::new("sand", MATERIAL_TYPE, 1).associated_with([3]));

        let (out, diagnostics) =
            run(resource, |scope| write_material_assignments(scope).unwrap());
        assert_eq!(out, "MTS 1 2\nMTS 3 1\n");
        assert_eq!(diagnostics.warning_count(DiagnosticKind::UnassignedDomain), 1);
        assert_eq!(diagnostics.error_count(DiagnosticKind::MaterialConflict), 1);
    }

    #[test]
    fn test_bc_sets_by_entity_kind() {
        let resource = AttributeResource::new()
            .with_entity(ModelEntity::new(10, EntityKind::Vertex))
            .with_entity(ModelEntity::new(11, EntityKind::Edge))
            .with_entity(ModelEntity::new(12, EntityKind::Face));

        let (out, diagnostics) = run(resource, |scope| {
            let bc = AttributeId::new(5);
            for entity in [10, 11, 12] {
                scope.assign_association(bc, EntityId::new(entity));
            }
            write_bc_sets(scope).unwrap();
        });
        assert_eq!(out, "NDS 10 1\nEGS 11 2\nFCS 12 3\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_regions_and_unknown_entities_rejected() {
        let resource = AttributeResource::new()
            .with_entity(ModelEntity::new(12, EntityKind::Face))
            .with_entity(ModelEntity::new(13, EntityKind::Region));
        let head = Attribute::new("head", "SpecifiedHead", 5);

        let (out, diagnostics) = run(resource, |scope| {
            assert!(check_association(scope, &head, EntityId::new(12)));
            assert!(!check_association(scope, &head, EntityId::new(13)));
            assert!(!check_association(scope, &head, EntityId::new(99)));
        });
        assert!(out.is_empty());
        assert_eq!(diagnostics.error_count(DiagnosticKind::InvalidAssociation), 2);
    }
}
