//! Grafo no dirigido de interacciones fármaco ↔ alimento.
//!
//! Los nodos se identifican por la clave compuesta (tipo, nombre), así que un
//! fármaco y un alimento con el mismo nombre son nodos distintos. Volver a
//! insertar un nodo o una arista sobrescribe sus atributos (gana la última
//! escritura); nunca hay aristas múltiples.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    matcher::{text_mentions, DrugMatch},
    models::{Column, DrugRecord, RecordGap},
    severity::{classify, Severity},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Drug,
    Food,
}

impl NodeKind {
    fn as_str(self) -> &'static str {
        match self {
            NodeKind::Drug => "drug",
            NodeKind::Food => "food",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NodeKey {
    kind: NodeKind,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphNode {
    Drug {
        name: String,
        pharmacodynamics: String,
        pharmacokinetics: String,
        side_effects: String,
        molecular_structure: String,
    },
    Food {
        name: String,
        composition: String,
        interaction_potential: String,
    },
}

impl GraphNode {
    /// Nodo de fármaco con los atributos de `record`. Falla si falta alguno.
    pub fn drug(name: &str, record: &DrugRecord) -> Result<Self, RecordGap> {
        Ok(GraphNode::Drug {
            name: name.to_string(),
            pharmacodynamics: record.require(Column::Pharmacodynamics)?.to_string(),
            pharmacokinetics: record.require(Column::MechanismOfAction)?.to_string(),
            side_effects: record.require(Column::Toxicity)?.to_string(),
            molecular_structure: record.require(Column::CasNumber)?.to_string(),
        })
    }

    pub fn food(name: &str, record: &DrugRecord, interaction_text: &str) -> Self {
        GraphNode::Food {
            name: name.to_string(),
            composition: record
                .field(Column::ChemicalComposition)
                .unwrap_or("Unknown")
                .to_string(),
            interaction_potential: interaction_text.to_string(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            GraphNode::Drug { .. } => NodeKind::Drug,
            GraphNode::Food { .. } => NodeKind::Food,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GraphNode::Drug { name, .. } | GraphNode::Food { name, .. } => name,
        }
    }

    /// Etiqueta de dos líneas para dibujar el nodo.
    pub fn label(&self) -> String {
        match self {
            GraphNode::Drug { name, pharmacodynamics, .. } => {
                format!("Drug: {name}\nPharmacodynamics: {pharmacodynamics}")
            }
            GraphNode::Food { name, composition, .. } => {
                format!("Food: {name}\nComposition: {composition}")
            }
        }
    }

    fn key(&self) -> NodeKey {
        NodeKey {
            kind: self.kind(),
            name: self.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InteractionEdge {
    pub severity: Severity,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionGraph {
    graph: UnGraph<GraphNode, InteractionEdge>,
    index: HashMap<NodeKey, NodeIndex>,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta el nodo o sustituye los atributos del que ya tenga su clave.
    pub fn upsert_node(&mut self, node: GraphNode) -> NodeIndex {
        let key = node.key();
        match self.index.get(&key) {
            Some(&idx) => {
                self.graph[idx] = node;
                idx
            }
            None => {
                let idx = self.graph.add_node(node);
                self.index.insert(key, idx);
                idx
            }
        }
    }

    /// Crea o sobrescribe la arista entre un fármaco y un alimento.
    pub fn upsert_interaction(&mut self, drug: NodeIndex, food: NodeIndex, severity: Severity) {
        debug_assert_eq!(self.graph[drug].kind(), NodeKind::Drug);
        debug_assert_eq!(self.graph[food].kind(), NodeKind::Food);
        self.graph.update_edge(drug, food, InteractionEdge { severity });
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_edges(&self) -> bool {
        self.edge_count() > 0
    }

    #[cfg(test)]
    pub fn node(&self, kind: NodeKind, name: &str) -> Option<&GraphNode> {
        let key = NodeKey { kind, name: name.to_string() };
        self.index.get(&key).map(|&idx| &self.graph[idx])
    }

    /// Nodos en orden de inserción.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Aristas como (fármaco, alimento, arista), en orden de creación.
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode, &InteractionEdge)> {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((&self.graph[a], &self.graph[b], &self.graph[e]))
        })
    }

    #[cfg(test)]
    pub fn severity_between(&self, drug: &str, food: &str) -> Option<Severity> {
        let a = *self.index.get(&NodeKey { kind: NodeKind::Drug, name: drug.to_string() })?;
        let b = *self.index.get(&NodeKey { kind: NodeKind::Food, name: food.to_string() })?;
        let edge = self.graph.find_edge(a, b)?;
        Some(self.graph[edge].severity)
    }

    /// Instantánea serializable para la capa de presentación.
    pub fn to_graph_data(&self) -> GraphData {
        let node_id = |node: &GraphNode| format!("{}:{}", node.kind().as_str(), node.name());

        let nodes = self
            .nodes()
            .map(|node| NodeView {
                id: node_id(node),
                label: node.label(),
                group: node.kind(),
                attributes: node.clone(),
            })
            .collect();

        let edges = self
            .edges()
            .map(|(drug, food, edge)| EdgeView {
                source: node_id(drug),
                target: node_id(food),
                severity: edge.severity,
            })
            .collect();

        GraphData { nodes, edges }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub group: NodeKind,
    pub attributes: GraphNode,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub source: String,
    pub target: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

/// Construye el grafo a partir de las filas ya emparejadas por el matcher.
///
/// Cada fila crea o actualiza el nodo del fármaco consultado (aunque luego no
/// aparezca ninguna arista). Los alimentos sólo se añaden junto con su arista,
/// cuando el texto de interacciones de la fila menciona el alimento. Las filas
/// sin los atributos del fármaco se omiten con un aviso.
pub fn build_interaction_graph(matches: &[DrugMatch<'_>], foods: &[String]) -> InteractionGraph {
    let mut graph = InteractionGraph::new();

    for m in matches {
        for record in &m.records {
            let drug_node = match GraphNode::drug(&m.query, record) {
                Ok(node) => node,
                Err(gap) => {
                    warn!("Omitiendo fila para el fármaco '{}': {gap}", m.query);
                    continue;
                }
            };
            let drug_idx = graph.upsert_node(drug_node);

            let Some(interaction_text) = record.field(Column::FoodInteractions) else {
                continue;
            };

            for food in foods.iter().filter(|f| text_mentions(interaction_text, f)) {
                let severity = classify(interaction_text);
                let food_idx = graph.upsert_node(GraphNode::food(food, record, interaction_text));
                graph.upsert_interaction(drug_idx, food_idx, severity);
                debug!("Interacción {} ↔ {food}: {severity}", m.query);
            }
        }
    }

    graph
}
