//! Plan de consumo: una fila orientativa por cada fila emparejada del dataset.

use serde::Serialize;
use tracing::warn;

use crate::{
    matcher::DrugMatch,
    models::{Column, DrugRecord, RecordGap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Timing {
    #[serde(rename = "Take with food")]
    WithFood,
    #[serde(rename = "Take without food")]
    WithoutFood,
}

impl Timing {
    /// La búsqueda de "with food" distingue mayúsculas.
    pub fn from_description(description: &str) -> Self {
        if description.contains("with food") {
            Timing::WithFood
        } else {
            Timing::WithoutFood
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timing::WithFood => "Take with food",
            Timing::WithoutFood => "Take without food",
        }
    }
}

pub const NO_FOODS_TO_AVOID: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    pub drug: String,
    pub pharmacodynamics: String,
    pub suggested_timing: Timing,
    pub foods_to_avoid: String,
}

impl PlanRow {
    pub fn from_record(record: &DrugRecord) -> Result<Self, RecordGap> {
        Ok(Self {
            drug: record.require(Column::Name)?.to_string(),
            pharmacodynamics: record.require(Column::Pharmacodynamics)?.to_string(),
            suggested_timing: Timing::from_description(record.require(Column::Description)?),
            foods_to_avoid: record
                .field(Column::FoodInteractions)
                .unwrap_or(NO_FOODS_TO_AVOID)
                .to_string(),
        })
    }
}

/// Bloque de viñetas en markdown, listo para mostrar.
impl std::fmt::Display for PlanRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "- **Drug**: {}", self.drug)?;
        writeln!(f, "- **Pharmacodynamics**: {}", self.pharmacodynamics)?;
        writeln!(f, "- **Suggested Timing**: {}", self.suggested_timing.as_str())?;
        write!(f, "- **Foods to Avoid**: {}", self.foods_to_avoid)
    }
}

/// Una fila del plan por cada fila emparejada, sin deduplicar.
pub fn generate_plan(matches: &[DrugMatch<'_>]) -> Vec<PlanRow> {
    matches
        .iter()
        .flat_map(|m| m.records.iter().map(move |r| (m, *r)))
        .filter_map(|(m, record)| match PlanRow::from_record(record) {
            Ok(row) => Some(row),
            Err(gap) => {
                warn!("Fila omitida del plan para '{}': {gap}", m.query);
                None
            }
        })
        .collect()
}
