//! Custom card writers
//!
//! Some cards change shape with a discrete selection, which no static
//! descriptor can express. Such descriptors name a [`CustomWriter`]. The set of
//! writers is closed; a table file names them by their snake_case tag and the
//! name is resolved when the table is parsed.
//!
//! A writer either writes complete line(s) to the scope's output, or returns a
//! [`CardError`] without having written anything.

use super::card::CardFormat;
use crate::core::export::scope::Scope;
use crate::core::resolve::{check_subitem_name, ValueResolver};
use crate::domain::errors::{CardError, WriteError};
use crate::model::item::Item;
use serde::{Deserialize, Serialize};

/// Opcode of an output interval given as a fixed period
pub const FIXED_INTERVAL_OPCODE: &str = "OC INT";

/// Opcode of an output interval given by a time series
pub const FUNCTION_INTERVAL_OPCODE: &str = "OC SRS";

/// Available custom writers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomWriter {
    /// Output interval: fixed period with units, or a referenced function
    OutputInterval,
}

impl CustomWriter {
    /// Writes the card for `item`
    ///
    /// `context_id` is the owning id for id-keyed cards and the association id
    /// for boundary condition cards.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Card`] when the card cannot be produced (nothing
    /// is written) and [`WriteError::Io`] when the output fails.
    pub fn write(
        &self,
        scope: &mut Scope<'_>,
        item: &Item,
        format: &CardFormat,
        context_id: Option<&str>,
    ) -> Result<(), WriteError> {
        let line = match self {
            CustomWriter::OutputInterval => output_interval_line(scope, item, format, context_id)?,
        };
        scope.write_line(&line)?;
        Ok(())
    }
}

/// Builds the output interval card
///
/// Branch 0 writes `OC INT <interval> <units index>`, branch 1 writes
/// `OC SRS <function id>`.
fn output_interval_line(
    scope: &mut Scope<'_>,
    item: &Item,
    format: &CardFormat,
    context_id: Option<&str>,
) -> Result<String, CardError> {
    let index = item.discrete_index().ok_or_else(|| CardError::NotDiscrete {
        item: item.name.clone(),
    })?;

    let resolver = ValueResolver::new(scope.query());
    let mut tokens = Vec::new();

    let opcode = match index {
        0 => {
            let value = active_child(item, 0, "FixedInterval", FIXED_INTERVAL_OPCODE)?;
            check_subitem_name(value, "FixedInterval", scope.diagnostics_mut());
            tokens.extend(resolver.resolve(value, None, scope.diagnostics_mut())?);

            let units = active_child(item, 1, "FixedIntervalUnits", FIXED_INTERVAL_OPCODE)?;
            check_subitem_name(units, "FixedIntervalUnits", scope.diagnostics_mut());
            let units_index = units.discrete_index().ok_or_else(|| CardError::NotDiscrete {
                item: units.name.clone(),
            })?;
            if units_index < 0 {
                return Err(CardError::UnexpectedDiscreteValue {
                    item: units.name.clone(),
                    index: units_index,
                });
            }
            tokens.push(units_index.to_string());

            FIXED_INTERVAL_OPCODE
        }
        1 => {
            let function = active_child(item, 0, "IntervalFunction", FUNCTION_INTERVAL_OPCODE)?;
            check_subitem_name(function, "IntervalFunction", scope.diagnostics_mut());
            tokens.extend(resolver.resolve(function, None, scope.diagnostics_mut())?);

            FUNCTION_INTERVAL_OPCODE
        }
        other => {
            return Err(CardError::UnexpectedDiscreteValue {
                item: item.name.clone(),
                index: other,
            })
        }
    };

    Ok(format.line_with_opcode(opcode, context_id, &tokens))
}

fn active_child<'i>(
    item: &'i Item,
    position: usize,
    expected: &str,
    opcode: &str,
) -> Result<&'i Item, CardError> {
    item.active_child(position)
        .ok_or_else(|| CardError::MissingItem {
            item: expected.to_string(),
            opcode: opcode.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::diagnostics::{DiagnosticKind, Diagnostics};
    use crate::model::attribute::Attribute;
    use crate::model::resource::AttributeResource;
    use crate::model::spec::ExportSpec;

    fn interval_format() -> CardFormat {
        CardFormat::val("OutputInterval", "OC ")
            .with_comment("! Output time interval")
            .with_custom_writer(CustomWriter::OutputInterval)
    }

    fn run(resource: &AttributeResource, item: &Item) -> (Result<(), WriteError>, String, Diagnostics) {
        let spec = ExportSpec::new(resource.clone());
        let mut out = Vec::new();
        let result;
        let diagnostics;
        {
            let mut scope = Scope::new(&spec);
            scope.attach_output(Box::new(&mut out));
            result = CustomWriter::OutputInterval.write(&mut scope, item, &interval_format(), None);
            diagnostics = scope.into_diagnostics();
        }
        (result, String::from_utf8(out).unwrap(), diagnostics)
    }

    #[test]
    fn test_fixed_interval_branch() {
        let resource = AttributeResource::new();
        let item = Item::discrete(
            "OutputInterval",
            0,
            vec![
                Item::double("FixedInterval", [10.0]),
                Item::discrete("FixedIntervalUnits", 2, vec![]),
            ],
        );

        let (result, out, diagnostics) = run(&resource, &item);
        assert!(result.is_ok());
        assert_eq!(out, "OC INT 10.0 2 ! Output time interval\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_function_interval_branch() {
        let resource =
            AttributeResource::new().with_attribute(Attribute::new("output series", "Function", 4));
        let item = Item::discrete(
            "OutputInterval",
            1,
            vec![Item::reference("IntervalFunction", "output series")],
        );

        let (result, out, _) = run(&resource, &item);
        assert!(result.is_ok());
        assert_eq!(out, "OC SRS 4 ! Output time interval\n");
    }

    #[test]
    fn test_unexpected_branch_writes_nothing() {
        let resource = AttributeResource::new();
        let item = Item::discrete("OutputInterval", 2, vec![]);

        let (result, out, _) = run(&resource, &item);
        assert!(matches!(
            result,
            Err(WriteError::Card(CardError::UnexpectedDiscreteValue { index: 2, .. }))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unset_selection_writes_nothing() {
        let resource = AttributeResource::new();
        let item = Item::discrete("OutputInterval", -1, vec![]);

        let (result, out, _) = run(&resource, &item);
        assert!(matches!(
            result,
            Err(WriteError::Card(CardError::UnexpectedDiscreteValue { index: -1, .. }))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unset_units_writes_nothing() {
        let resource = AttributeResource::new();
        let item = Item::discrete(
            "OutputInterval",
            0,
            vec![
                Item::double("FixedInterval", [5.0]),
                Item::discrete("FixedIntervalUnits", -1, vec![]),
            ],
        );

        let (result, out, _) = run(&resource, &item);
        assert!(matches!(
            result,
            Err(WriteError::Card(CardError::UnexpectedDiscreteValue { index: -1, .. }))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_subitem_name_mismatch_is_not_fatal() {
        let resource = AttributeResource::new();
        let item = Item::discrete(
            "OutputInterval",
            0,
            vec![
                Item::double("Interval", [5.0]),
                Item::discrete("FixedIntervalUnits", 0, vec![]),
            ],
        );

        let (result, out, diagnostics) = run(&resource, &item);
        assert!(result.is_ok());
        assert_eq!(out, "OC INT 5.0 0 ! Output time interval\n");
        assert_eq!(diagnostics.error_count(DiagnosticKind::UnexpectedSubitem), 1);
    }

    #[test]
    fn test_missing_units_fails_without_output() {
        let resource = AttributeResource::new();
        let item = Item::discrete(
            "OutputInterval",
            0,
            vec![Item::double("FixedInterval", [5.0])],
        );

        let (result, out, _) = run(&resource, &item);
        assert!(matches!(
            result,
            Err(WriteError::Card(CardError::MissingItem { .. }))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_discrete_item_fails() {
        let resource = AttributeResource::new();
        let (result, out, _) = run(&resource, &Item::double("OutputInterval", [1.0]));
        assert!(matches!(
            result,
            Err(WriteError::Card(CardError::NotDiscrete { .. }))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_writer_name_in_table_files() {
        let json = serde_json::to_string(&CustomWriter::OutputInterval).unwrap();
        assert_eq!(json, "\"output_interval\"");
    }
}
