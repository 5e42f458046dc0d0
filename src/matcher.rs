//! Búsqueda por subcadena (sin distinguir mayúsculas) de los nombres que
//! introduce el usuario contra las columnas del dataset.

use crate::{
    models::{Column, DrugRecord},
    record_store::RecordStore,
};

/// Un fármaco consultado junto con todas las filas cuyo `name` lo contiene.
#[derive(Debug, Clone)]
pub struct DrugMatch<'a> {
    pub query: String,
    pub records: Vec<&'a DrugRecord>,
}

fn rows_matching<'a>(
    store: &'a RecordStore,
    query: &str,
    column: Column,
) -> impl Iterator<Item = &'a DrugRecord> + 'a {
    let needle = query.to_lowercase();
    store
        .records()
        .iter()
        .filter(move |r| {
            r.field(column)
                .is_some_and(|v| v.to_lowercase().contains(needle.as_str()))
        })
}

/// Devuelve, en el orden de entrada y sin deduplicar, las consultas que
/// aparecen en la columna `column` de al menos una fila. Las celdas vacías
/// nunca coinciden.
pub fn match_queries(store: &RecordStore, queries: &[String], column: Column) -> Vec<String> {
    queries
        .iter()
        .filter(|q| rows_matching(store, q, column).next().is_some())
        .cloned()
        .collect()
}

/// Igual que [`match_queries`] sobre la columna `name`, conservando además
/// las filas encontradas para que el grafo y el plan trabajen sobre ellas.
pub fn match_drugs<'a>(store: &'a RecordStore, queries: &[String]) -> Vec<DrugMatch<'a>> {
    queries
        .iter()
        .filter_map(|q| {
            let records: Vec<&DrugRecord> = rows_matching(store, q, Column::Name).collect();
            (!records.is_empty()).then(|| DrugMatch {
                query: q.clone(),
                records,
            })
        })
        .collect()
}

/// `true` si `text` contiene `query`, sin distinguir mayúsculas.
pub fn text_mentions(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(&query.to_lowercase())
}
