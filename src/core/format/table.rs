//! Format table
//!
//! Maps category names to ordered card descriptors, and boundary condition
//! type names to their single `bc` descriptor. A table is built once, checked,
//! and then only read; exports borrow it.

use super::card::{CardFormat, CardKind};
use super::hooks::CustomWriter;
use crate::domain::errors::CardexError;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Category name to card descriptors
///
/// # Examples
///
/// ```
/// use cardex::core::format::FormatTable;
///
/// let table = FormatTable::builtin();
/// assert_eq!(table.category("Solvers")[0].opcode, "IP NIT");
/// assert_eq!(table.boundary_condition("SpecifiedHead").unwrap().opcode, "DB FLW");
/// assert!(table.category("Unknown").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatTable {
    /// Ordinary categories, each an ordered descriptor list
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<CardFormat>>,

    /// Boundary condition type name to its descriptor
    #[serde(default)]
    pub boundary_conditions: BTreeMap<String, CardFormat>,
}

impl FormatTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor to a category
    pub fn with_card(mut self, category: impl Into<String>, card: CardFormat) -> Self {
        self.categories.entry(category.into()).or_default().push(card);
        self
    }

    /// Sets the descriptor of a boundary condition type
    pub fn with_boundary_condition(mut self, type_name: impl Into<String>, card: CardFormat) -> Self {
        self.boundary_conditions.insert(type_name.into(), card);
        self
    }

    /// Descriptors of a category, in output order
    pub fn category(&self, name: &str) -> &[CardFormat] {
        self.categories.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Descriptor of a boundary condition type
    pub fn boundary_condition(&self, type_name: &str) -> Option<&CardFormat> {
        self.boundary_conditions.get(type_name)
    }

    /// Checks every descriptor
    ///
    /// # Errors
    ///
    /// Returns a message naming the first malformed descriptor. Category
    /// lists may not hold `bc` descriptors and boundary condition entries must
    /// be `bc` descriptors.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, cards) in &self.categories {
            for card in cards {
                card.validate()
                    .map_err(|e| format!("category '{name}': {e}"))?;
                if card.kind == CardKind::Bc {
                    return Err(format!(
                        "category '{name}': bc card '{}' belongs in boundary_conditions",
                        card.opcode
                    ));
                }
            }
        }

        for (type_name, card) in &self.boundary_conditions {
            card.validate()
                .map_err(|e| format!("boundary condition '{type_name}': {e}"))?;
            if card.kind != CardKind::Bc {
                return Err(format!(
                    "boundary condition '{type_name}' must use kind \"bc\""
                ));
            }
        }

        Ok(())
    }

    /// Parses and checks a table from TOML
    ///
    /// # Errors
    ///
    /// Returns [`CardexError::FormatTable`] if the text does not parse (an
    /// unknown custom writer name included) or the table is malformed.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: FormatTable = toml::from_str(contents)
            .map_err(|e| CardexError::FormatTable(format!("Failed to parse format table: {e}")))?;
        table.validate().map_err(CardexError::FormatTable)?;
        Ok(table)
    }

    /// Loads and checks a table file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid table.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CardexError::FormatTable(format!(
                "Failed to read format table {}: {}",
                path.display(),
                e
            ))
        })?;
        let table = Self::from_toml_str(&contents)?;

        tracing::debug!(
            path = %path.display(),
            categories = table.categories.len(),
            boundary_conditions = table.boundary_conditions.len(),
            "Loaded format table"
        );
        Ok(table)
    }

    /// Serializes the table as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CardexError::Serialization(format!("Failed to serialize format table: {e}")))
    }

    /// Process-wide built-in ground water table
    pub fn builtin() -> &'static FormatTable {
        static BUILTIN: OnceLock<FormatTable> = OnceLock::new();
        BUILTIN.get_or_init(FormatTable::ground_water)
    }

    /// Card formats of the ground water / heat transport solver
    pub fn ground_water() -> Self {
        const VALUES6: [&str; 6] = ["Value1", "Value2", "Value3", "Value4", "Value5", "Value6"];

        let solvers = vec![
            CardFormat::val("MaxNonLinearIters", "IP NIT")
                .with_comment("! Maximum number of non-linear iterations"),
            CardFormat::val("NonLinearTolMaxNorm", "IP NTL")
                .with_comment("! Non-Linear absolute tolerance"),
            CardFormat::val("NonLinearTolMaxChange", "IP ITL")
                .with_comment("! Non-Linear incremental tolerance"),
            CardFormat::val("MaxLinearIters", "IP MIT")
                .with_comment("! Maximum number of linear iterations"),
            CardFormat::val("MemoryIncrementBlockSize", "OP INC")
                .with_comment("! Incremental memory size"),
            CardFormat::val("PreconditioningBlocks", "OP BLK")
                .with_comment("! Number of blocks per processor for pre-conditioner"),
            CardFormat::val("PreconditionerType", "OP PRE").with_comment("! Preconditioner type"),
        ];

        let time = vec![
            CardFormat::val("JulianDay", "TC JUL")
                .with_comment("! Julian day the simulation starts on, used for the MET file"),
            CardFormat::val("StartTime", "TC T0")
                .with_comment("! Starting time of the simulation")
                .with_subitems(["Value1", "Value2"]),
            CardFormat::val("EndTime", "TC TF")
                .with_comment("! Final time of the simulation")
                .with_subitems(["Value1", "Value2"]),
            CardFormat::val("TimestepSize", "TC IDT")
                .with_comment("! The XY Series that will control the time step size"),
            CardFormat::val("AdaptiveTimeStep", "TC NDP").with_comment(
                "! Non-Adaptive time steps: forces adaptive time stepping to be turned off",
            ),
            CardFormat::val("OutputInterval", "OC ")
                .with_comment("! Output time interval")
                .with_custom_writer(CustomWriter::OutputInterval),
            CardFormat::val("PrintAdaptedMeshes", "OC ADP")
                .with_comment("! Print out the adapted mesh"),
        ];

        let globals = vec![
            CardFormat::multival(["RayToADHSocket", "ADHToRaySocket"], "OP SOC").with_comment(
                "! Socket numbers for adh/raycaster communication (in/out for adh)",
            ),
            CardFormat::val("Gravity", "MP G").with_comment("! Gravity, (m)/(hr^2)"),
            CardFormat::val("WaterSpecificHeat", "MP SHW")
                .with_comment("! Specific heat of water, Units = (W-hr)/(g K)"),
            CardFormat::val("AirSpecificHeat", "MP SHG")
                .with_comment("!  Specific heat of gas, Units = (W-hr)/(g K)"),
            CardFormat::val("WaterSpecificGravity", "MP SGW")
                .with_comment("! Specific gravity of water"),
            CardFormat::val("GasSpecificGravity", "MP SGG")
                .with_comment("! Specific gravity of gas"),
            CardFormat::val("WaterThermalConductivity", "MP TKW")
                .with_comment("! Thermal conductivity of water, Units = (W)/(m K)"),
            CardFormat::val("AirThermalConductivity", "MP TKG")
                .with_comment("! Thermal conductivity of gas, Units = (W)/(m K)"),
            CardFormat::val("ReferenceDensity", "MP RHO")
                .with_comment("! Reference density, g/m^3"),
            CardFormat::val("ReferenceViscosity", "MP VIS")
                .with_comment("! Reference viscosity, Units = ?"),
        ];

        let material = [
            ("Porosity", "MP POR", "! Porosity"),
            ("HydraulicConductivity", "MP K", "! Hydraulic conductivity"),
            ("PresSatCurveIndex", "MP SAT", "! Pressure saturation curve, XY series number"),
            (
                "PresRelCondCurveIndex",
                "MP KR",
                "! Pressure relative conductivity curve, XY series number",
            ),
            ("SpecificStorage", "MP SS", "! Specific storage"),
            ("SolidSpecificHeat", "MP SHS", "! Specific heat of solids"),
            ("SolidSpecificGravity", "MP SGS", "! Specific gravity of solids"),
            ("Albedo", "MP ALB", "! Albedo"),
            ("BulkEmissivity", "MP EMS", "! Bulk emissivity"),
            ("DryThermalConductivity", "MP TKD", "! Dry/Solid Thermal Conductivity"),
            ("SatThermalConductivity", "MP TKS", "! Sat Thermal Conductivity"),
            ("AnisotropyTensor", "MP TKA", "! Anisotropy tensor for thermal conductivity"),
            ("FractionSandGravel", "MP FSG", "! Mass fraction coarse grain (sand and gravel)"),
            ("ResidualSaturation", "MP RSD", "! Residual saturation by gravity drainage"),
            ("QuartzFraction", "MP QTZ", "! Mass fraction quartz"),
            ("VanGenuchtenAlpha", "MP VGA", "! van Genuchten curve alpha (1/L)"),
            ("VanGenuchtenN", "MP VGN", "! van Genuchten curve exponent"),
            ("VanGenuchtenMaxCP", "MP VGP", "! van Genuchten curve max capillary pressure head"),
            ("VanGenuchtenNumXY", "MP VGX", "! number of van Genuchten curve entries"),
            ("Tortuosity", "MP TOR", "! Tortuosity"),
            ("LongitudinalDispersivity", "MP DPL", "! Longitudinal dispersivity"),
            ("TransverseDispersivity", "MP DPT", "! Transverse dispersivity"),
            ("MaxRefineLevels", "MP ML", "! Refinement levels"),
            ("FlowRefineTol", "MP FRT", "! Refinement Tolerance"),
            ("MaterialRGB", "RGB", "! MaterialRGB"),
            ("MaterialTran", "TRAN", "! MaterialTran"),
            ("MaterialEmit", "EMIT", "! MaterialEmit"),
        ]
        .into_iter()
        .map(|(item, opcode, comment)| {
            let card = CardFormat::idval(item, opcode).with_comment(comment);
            match item {
                "HydraulicConductivity" | "AnisotropyTensor" => card.with_subitems(VALUES6),
                _ => card,
            }
        })
        .collect();

        let boundary_conditions = [
            ("SpecifiedHead", "DB FLW", Some("! Dirichlet boundary condition for flow")),
            ("SpecifiedFlux", "NB FLW", Some("! Neumann boundary condition for flow")),
            ("FlowInjectionWell", "WL FLW", Some("! FlowInjectionWell")),
            ("METData", "NB MET", None),
            (
                "GroundSurfaceHeatFlux",
                "NB HFX",
                Some("! Heat Flux boundary condition for temperature"),
            ),
            ("RayCaster", "NB RAY", Some("! RayCaster")),
            (
                "BottomBoundaryTemp",
                "DB TMP",
                Some("! Dirichlet boundary condition for temperature"),
            ),
        ]
        .into_iter()
        .map(|(type_name, opcode, comment)| {
            let card = CardFormat::bc("Value", opcode);
            let card = match comment {
                Some(comment) => card.with_comment(comment),
                None => card,
            };
            (type_name.to_string(), card)
        })
        .collect();

        let categories = [
            ("Solvers", solvers),
            ("Time", time),
            ("Globals", globals),
            ("Material", material),
        ]
        .into_iter()
        .map(|(name, cards)| (name.to_string(), cards))
        .collect();

        Self {
            categories,
            boundary_conditions,
        }
    }
}
