use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::brain::{Category, DocumentRef};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub category: Category,
}

/// A validated reference. Directed in the data, undirected in layout and drawing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphModel {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_empty() {
            "No connections yet".to_owned()
        } else {
            format!(
                "{} nodes, {} connections",
                self.node_count(),
                self.edge_count()
            )
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingReference {
    pub source: String,
    pub target: String,
}

pub fn build_graph(documents: &[DocumentRef]) -> GraphModel {
    let (model, dangling) = build_graph_with_diagnostics(documents);
    if !dangling.is_empty() {
        tracing::debug!(count = dangling.len(), "dropped references to unknown documents");
    }
    model
}

/// Same as [`build_graph`], also returning every reference that was dropped
/// because its target does not exist. Duplicates and self-loops are kept.
pub fn build_graph_with_diagnostics(
    documents: &[DocumentRef],
) -> (GraphModel, Vec<DanglingReference>) {
    let nodes = documents
        .iter()
        .map(|document| GraphNode {
            id: document.id.clone(),
            category: document.category,
        })
        .collect::<Vec<_>>();
    let known_ids = documents
        .iter()
        .map(|document| document.id.as_str())
        .collect::<HashSet<_>>();

    let mut edges = Vec::new();
    let mut dangling = Vec::new();
    for document in documents {
        for reference in &document.references {
            if known_ids.contains(reference.as_str()) {
                edges.push(GraphEdge {
                    source: document.id.clone(),
                    target: reference.clone(),
                });
            } else {
                dangling.push(DanglingReference {
                    source: document.id.clone(),
                    target: reference.clone(),
                });
            }
        }
    }

    (GraphModel { nodes, edges }, dangling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn doc(id: &str, references: &[&str]) -> DocumentRef {
        DocumentRef {
            id: id.to_owned(),
            category: Category::Concept,
            references: references.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn edge_pairs(model: &GraphModel) -> Vec<(&str, &str)> {
        model
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str()))
            .collect()
    }

    #[test]
    fn nodes_preserve_input_order() {
        let model = build_graph(&[doc("b", &[]), doc("a", &[]), doc("c", &[])]);
        let ids = model
            .nodes
            .iter()
            .map(|node| node.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn dangling_references_are_dropped_silently() {
        let (model, dangling) =
            build_graph_with_diagnostics(&[doc("a", &["b", "missing"]), doc("b", &["gone"])]);
        assert_eq!(edge_pairs(&model), vec![("a", "b")]);
        assert_eq!(
            dangling,
            vec![
                DanglingReference {
                    source: "a".into(),
                    target: "missing".into()
                },
                DanglingReference {
                    source: "b".into(),
                    target: "gone".into()
                },
            ]
        );
    }

    #[test]
    fn duplicates_and_self_loops_are_kept() {
        let model = build_graph(&[doc("a", &["a", "b"]), doc("b", &[]), doc("c", &["b"])]);
        assert_eq!(edge_pairs(&model), vec![("a", "a"), ("a", "b"), ("c", "b")]);
    }

    #[test]
    fn empty_input_builds_empty_graph() {
        let model = build_graph(&[]);
        assert!(model.is_empty());
        assert_eq!(model.edge_count(), 0);
        assert_eq!(model.summary(), "No connections yet");
    }

    #[test]
    fn model_serializes_with_type_field() {
        let model = build_graph(&[doc("a", &["a"])]);
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nodes": [{"id": "a", "type": "concept"}],
                "edges": [{"source": "a", "target": "a"}]
            })
        );
    }

    proptest! {
        #[test]
        fn every_edge_endpoint_is_a_node(
            ids in proptest::collection::hash_set("[a-e]", 0..5),
            references in proptest::collection::vec(proptest::collection::vec("[a-h]", 0..6), 5),
        ) {
            let documents = ids
                .iter()
                .zip(references.iter())
                .map(|(id, refs)| DocumentRef {
                    id: id.clone(),
                    category: Category::Journal,
                    references: refs.clone(),
                })
                .collect::<Vec<_>>();

            let (model, dangling) = build_graph_with_diagnostics(&documents);
            let node_ids = model.nodes.iter().map(|node| node.id.as_str()).collect::<HashSet<_>>();
            for edge in &model.edges {
                prop_assert!(node_ids.contains(edge.source.as_str()));
                prop_assert!(node_ids.contains(edge.target.as_str()));
            }
            for reference in &dangling {
                prop_assert!(!node_ids.contains(reference.target.as_str()));
            }
            let total = documents.iter().map(|d| d.references.len()).sum::<usize>();
            prop_assert_eq!(model.edges.len() + dangling.len(), total);
        }
    }
}
