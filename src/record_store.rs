//! Almacén en memoria (sólo lectura) de las filas del dataset de fármacos.
//!
//! Se carga una única vez al arrancar. Las columnas obligatorias se validan
//! contra la cabecera del CSV en la carga, no en cada acceso.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tracing::info;

use crate::models::{Column, DrugRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no se pudo abrir el dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV mal formado: {0}")]
    Csv(#[from] csv::Error),
    #[error("faltan columnas obligatorias en el dataset: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<DrugRecord>,
    loaded_at: DateTime<Utc>,
}

impl RecordStore {
    /// Abre y carga el CSV indicado.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(BufReader::new(file))?;
        info!(
            "Dataset cargado desde {} ({} filas).",
            path.display(),
            store.len()
        );
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<String> = Column::ALL
            .iter()
            .map(|c| c.header())
            .filter(|h| !headers.iter().any(|found| found == *h))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        for (row, result) in rdr.deserialize::<DrugRecord>().enumerate() {
            let mut record = result?;
            record.row = row;
            records.push(record);
        }

        Ok(Self::from_records(records))
    }

    /// Construye el almacén a partir de filas ya tipadas. Renumera `row`.
    pub fn from_records(records: Vec<DrugRecord>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(row, record)| DrugRecord { row, ..record })
            .collect();
        Self {
            records,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[DrugRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
