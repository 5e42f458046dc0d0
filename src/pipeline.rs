//! Orquestación de un análisis completo:
//!   1. Normalización de las listas introducidas por el usuario.
//!   2. Emparejamiento de fármacos (columna `name`) y alimentos
//!      (columna `food-interactions`) contra el dataset.
//!   3. Si no hay fármacos emparejados (o no se indicó ningún alimento), se
//!      detiene sin más.
//!   4. Construcción del grafo de interacciones.
//!   5. Si el grafo no tiene aristas se avisa; si las tiene, se genera el plan.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    graph::{build_interaction_graph, GraphData},
    matcher::{match_drugs, match_queries},
    models::Column,
    plan::{generate_plan, PlanRow},
    record_store::RecordStore,
};

pub const NO_MATCH_MESSAGE: &str = "No valid drug or food interactions found.";
pub const NO_INTERACTIONS_MESSAGE: &str =
    "No interactions found in the graph. Please check your inputs.";

/// Separa por comas, recorta, pasa a minúsculas y descarta vacíos.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    NoMatch {
        message: String,
    },
    NoInteractions {
        message: String,
        graph: GraphData,
    },
    Interactions {
        graph: GraphData,
        plan: Vec<PlanRow>,
    },
}

/// Resultado de un análisis.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub matched_drugs: Vec<String>,
    pub matched_foods: Vec<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Ejecuta el análisis completo sobre el almacén ya cargado.
pub fn analyze(store: &RecordStore, medicines: &str, foods: &str) -> Analysis {
    let id = Uuid::new_v4();
    let drugs = parse_list(medicines);
    let food_items = parse_list(foods);

    let drug_matches = match_drugs(store, &drugs);
    let matched_drugs: Vec<String> = drug_matches.iter().map(|m| m.query.clone()).collect();
    let matched_foods = match_queries(store, &food_items, Column::FoodInteractions);

    info!(
        "[{id}] Fármacos emparejados: {:?} | Alimentos emparejados: {:?}",
        matched_drugs, matched_foods
    );

    // Un alimento que no aparece en ningún texto de interacciones no detiene
    // el análisis: acaba como grafo sin aristas.
    let outcome = if matched_drugs.is_empty() || food_items.is_empty() {
        info!("[{id}] Sin coincidencias; no se construye el grafo.");
        Outcome::NoMatch {
            message: NO_MATCH_MESSAGE.to_string(),
        }
    } else {
        // El grafo se prueba con todos los alimentos introducidos, no sólo
        // con los emparejados.
        let graph = build_interaction_graph(&drug_matches, &food_items);
        if graph.has_edges() {
            let plan = generate_plan(&drug_matches);
            info!(
                "[{id}] Grafo con {} nodos y {} aristas; plan con {} filas.",
                graph.node_count(),
                graph.edge_count(),
                plan.len()
            );
            Outcome::Interactions {
                graph: graph.to_graph_data(),
                plan,
            }
        } else {
            warn!("[{id}] {NO_INTERACTIONS_MESSAGE}");
            Outcome::NoInteractions {
                message: NO_INTERACTIONS_MESSAGE.to_string(),
                graph: graph.to_graph_data(),
            }
        }
    };

    Analysis {
        id,
        generated_at: Utc::now(),
        matched_drugs,
        matched_foods,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::NodeKind, plan::Timing, severity::Severity};

    const INTERACTION: &str = "Avoid alcohol; severe risk of bleeding";

    fn aspirin_store() -> RecordStore {
        let csv = format!(
            "name,pharmacodynamics,mechanism-of-action,toxicity,cas-number,food-interactions,chemical-composition,description\n\
             aspirin,reduces clotting,COX inhibition,GI irritation,50-78-2,{INTERACTION},,Take with food\n"
        );
        RecordStore::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn parse_list_normalizes_user_input() {
        assert_eq!(
            parse_list(" Aspirin, METFORMIN ,, ,high-fiber foods"),
            vec!["aspirin", "metformin", "high-fiber foods"]
        );
        assert!(parse_list("  ").is_empty());
    }

    #[test]
    fn aspirin_and_alcohol_produce_a_high_edge_and_a_plan() {
        let store = aspirin_store();
        let analysis = analyze(&store, "Aspirin", "alcohol");

        assert_eq!(analysis.matched_drugs, vec!["aspirin"]);
        assert_eq!(analysis.matched_foods, vec!["alcohol"]);
        match analysis.outcome {
            Outcome::Interactions { graph, plan } => {
                assert_eq!(graph.nodes.len(), 2);
                assert_eq!(graph.nodes[0].group, NodeKind::Drug);
                assert_eq!(graph.nodes[0].id, "drug:aspirin");
                assert_eq!(graph.nodes[1].group, NodeKind::Food);
                assert_eq!(graph.nodes[1].id, "food:alcohol");
                assert_eq!(graph.edges.len(), 1);
                assert_eq!(graph.edges[0].severity, Severity::High);

                assert_eq!(plan.len(), 1);
                assert_eq!(plan[0].drug, "aspirin");
                assert_eq!(plan[0].suggested_timing, Timing::WithFood);
                assert_eq!(plan[0].foods_to_avoid, INTERACTION);
            }
            other => panic!("resultado inesperado: {other:?}"),
        }
    }

    #[test]
    fn food_absent_from_text_triggers_empty_graph_warning() {
        let store = aspirin_store();
        let analysis = analyze(&store, "aspirin", "grapefruit");

        assert!(analysis.matched_foods.is_empty());
        match analysis.outcome {
            Outcome::NoInteractions { message, graph } => {
                assert_eq!(message, NO_INTERACTIONS_MESSAGE);
                assert!(graph.edges.is_empty());
                assert!(graph.nodes.iter().all(|n| n.group == NodeKind::Drug));
            }
            other => panic!("resultado inesperado: {other:?}"),
        }
    }

    #[test]
    fn empty_food_list_triggers_no_match() {
        let store = aspirin_store();
        let analysis = analyze(&store, "aspirin", " , ");
        assert!(matches!(analysis.outcome, Outcome::NoMatch { .. }));
    }

    #[test]
    fn matched_food_without_edge_triggers_empty_graph_warning() {
        // "grapefruit" aparece en otra fila, pero no en la de aspirin.
        let csv = "name,pharmacodynamics,mechanism-of-action,toxicity,cas-number,food-interactions,chemical-composition,description\n\
                   aspirin,reduces clotting,COX,GI irritation,50-78-2,Avoid alcohol; severe risk of bleeding,,Take with food\n\
                   simvastatin,lowers LDL,HMG-CoA,myopathy,79902-63-9,Avoid grapefruit juice,,Evening dose\n";
        let store = RecordStore::from_reader(csv.as_bytes()).unwrap();
        let analysis = analyze(&store, "aspirin", "grapefruit");

        assert_eq!(analysis.matched_foods, vec!["grapefruit"]);
        match analysis.outcome {
            Outcome::NoInteractions { message, graph } => {
                assert_eq!(message, NO_INTERACTIONS_MESSAGE);
                assert!(graph.edges.is_empty());
                assert_eq!(graph.nodes.len(), 1);
                assert_eq!(graph.nodes[0].group, NodeKind::Drug);
            }
            other => panic!("resultado inesperado: {other:?}"),
        }
    }

    #[test]
    fn unknown_drug_halts_before_graph() {
        let store = aspirin_store();
        let analysis = analyze(&store, "ibuprofen", "alcohol");

        assert!(analysis.matched_drugs.is_empty());
        match analysis.outcome {
            Outcome::NoMatch { message } => assert_eq!(message, NO_MATCH_MESSAGE),
            other => panic!("resultado inesperado: {other:?}"),
        }
    }

    #[test]
    fn unmatched_foods_still_count_when_building_edges() {
        let csv = "name,pharmacodynamics,mechanism-of-action,toxicity,cas-number,food-interactions,chemical-composition,description\n\
                   warfarin,anticoagulant,VKOR,bleeding,81-81-2,Limit kale; use caution,,Oral\n";
        let store = RecordStore::from_reader(csv.as_bytes()).unwrap();
        let analysis = analyze(&store, "warfarin", "kale, spinach");

        assert_eq!(analysis.matched_foods, vec!["kale"]);
        match analysis.outcome {
            Outcome::Interactions { graph, .. } => {
                assert_eq!(graph.edges.len(), 1);
                assert_eq!(graph.edges[0].severity, Severity::Medium);
            }
            other => panic!("resultado inesperado: {other:?}"),
        }
    }

    #[test]
    fn analysis_serializes_with_status_tag() {
        let store = aspirin_store();
        let json = serde_json::to_value(analyze(&store, "ibuprofen", "alcohol")).unwrap();

        assert_eq!(json["status"], "no_match");
        assert_eq!(json["message"], NO_MATCH_MESSAGE);
        assert!(json["id"].is_string());
        assert!(json["generated_at"].is_string());
    }
}
