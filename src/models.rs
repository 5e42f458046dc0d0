//! Modelos de dominio (filas del dataset de fármacos y columnas conocidas).

use serde::Deserialize;
use thiserror::Error;

/// Columnas del CSV que usa el análisis, con su cabecera exacta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Pharmacodynamics,
    MechanismOfAction,
    Toxicity,
    CasNumber,
    FoodInteractions,
    ChemicalComposition,
    Description,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Name,
        Column::Pharmacodynamics,
        Column::MechanismOfAction,
        Column::Toxicity,
        Column::CasNumber,
        Column::FoodInteractions,
        Column::ChemicalComposition,
        Column::Description,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Pharmacodynamics => "pharmacodynamics",
            Column::MechanismOfAction => "mechanism-of-action",
            Column::Toxicity => "toxicity",
            Column::CasNumber => "cas-number",
            Column::FoodInteractions => "food-interactions",
            Column::ChemicalComposition => "chemical-composition",
            Column::Description => "description",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// Una fila del dataset. Las celdas vacías se leen como `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DrugRecord {
    /// Posición de la fila de datos (0 = primera fila tras la cabecera).
    #[serde(skip)]
    pub row: usize,
    pub name: Option<String>,
    pub pharmacodynamics: Option<String>,
    #[serde(rename = "mechanism-of-action")]
    pub mechanism_of_action: Option<String>,
    pub toxicity: Option<String>,
    #[serde(rename = "cas-number")]
    pub cas_number: Option<String>,
    #[serde(rename = "food-interactions")]
    pub food_interactions: Option<String>,
    #[serde(rename = "chemical-composition")]
    pub chemical_composition: Option<String>,
    pub description: Option<String>,
}

impl DrugRecord {
    pub fn field(&self, column: Column) -> Option<&str> {
        let value = match column {
            Column::Name => &self.name,
            Column::Pharmacodynamics => &self.pharmacodynamics,
            Column::MechanismOfAction => &self.mechanism_of_action,
            Column::Toxicity => &self.toxicity,
            Column::CasNumber => &self.cas_number,
            Column::FoodInteractions => &self.food_interactions,
            Column::ChemicalComposition => &self.chemical_composition,
            Column::Description => &self.description,
        };
        value.as_deref()
    }

    /// Igual que [`DrugRecord::field`], pero la ausencia es un hueco de datos.
    pub fn require(&self, column: Column) -> Result<&str, RecordGap> {
        self.field(column).ok_or(RecordGap::MissingField {
            row: self.row,
            field: column,
        })
    }
}

/// Hueco de integridad en una fila concreta. No aborta el análisis: el
/// componente que necesita el campo omite la fila y lo registra.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordGap {
    #[error("la fila {row} no tiene valor en la columna '{field}'")]
    MissingField { row: usize, field: Column },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_row_and_column() {
        let record = DrugRecord {
            row: 7,
            name: Some("aspirin".into()),
            ..Default::default()
        };

        assert_eq!(record.require(Column::Name), Ok("aspirin"));
        let gap = record.require(Column::Toxicity).unwrap_err();
        assert_eq!(
            gap,
            RecordGap::MissingField { row: 7, field: Column::Toxicity }
        );
        assert_eq!(
            gap.to_string(),
            "la fila 7 no tiene valor en la columna 'toxicity'"
        );
    }
}
