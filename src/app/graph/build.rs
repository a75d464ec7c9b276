use std::collections::HashMap;

use crate::brain::Document;
use crate::graph::{GraphModel, build_graph};

use super::super::ViewModel;

/// Incoming references per document, excluding self-references. A source is
/// listed once even when it links to the same target repeatedly.
fn collect_backlinks(graph: &GraphModel) -> HashMap<String, Vec<String>> {
    let mut backlinks: HashMap<String, Vec<String>> = HashMap::new();
    for edge in &graph.edges {
        if edge.source == edge.target {
            continue;
        }

        let sources = backlinks.entry(edge.target.clone()).or_default();
        if !sources.contains(&edge.source) {
            sources.push(edge.source.clone());
        }
    }
    backlinks
}

impl ViewModel {
    pub(in crate::app) fn rebuild_graph(&mut self) {
        let refs = self
            .documents
            .iter()
            .map(Document::to_ref)
            .collect::<Vec<_>>();
        let graph = build_graph(&refs);

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph rebuilt"
        );

        self.backlinks = collect_backlinks(&graph);
        self.search_match_cache = None;
        self.driver.replace_graph(graph);
        self.graph_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::graph;

    #[test]
    fn backlinks_skip_self_references_and_repeats() {
        let model = graph(
            &["a", "b", "c"],
            &[("a", "c"), ("b", "c"), ("a", "c"), ("c", "c"), ("c", "a")],
        );
        let backlinks = collect_backlinks(&model);

        assert_eq!(backlinks["c"], vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(backlinks["a"], vec!["c".to_owned()]);
        assert!(!backlinks.contains_key("b"));
    }
}
