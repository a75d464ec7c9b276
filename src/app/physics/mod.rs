mod forces;

use std::collections::HashMap;

use eframe::egui::{Pos2, Vec2, vec2};

use crate::brain::Category;
use crate::graph::GraphModel;
use crate::util::stable_pair;

use super::graph::interaction::first_node_within;
use forces::{apply_center_gravity, apply_repulsion, apply_springs, integrate};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct PhysicsConfig {
    pub gravity: f32,
    pub repulsion: f32,
    pub ideal_length: f32,
    pub spring: f32,
    pub damping: f32,
    pub padding: f32,
    pub hit_radius_sq: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.001,
            repulsion: 1000.0,
            ideal_length: 100.0,
            spring: 0.01,
            damping: 0.9,
            padding: 50.0,
            hit_radius_sq: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct SimNode {
    pub id: String,
    pub category: Category,
    pub pos: Vec2,
    pub velocity: Vec2,
}

#[derive(Clone, Debug)]
pub(in crate::app) struct Simulation {
    nodes: Vec<SimNode>,
    index_by_id: HashMap<String, usize>,
    links: Vec<(usize, usize)>,
    size: Vec2,
    config: PhysicsConfig,
}

impl Simulation {
    pub(in crate::app) fn new(config: PhysicsConfig) -> Self {
        Self {
            nodes: Vec::new(),
            index_by_id: HashMap::new(),
            links: Vec::new(),
            size: Vec2::ZERO,
            config,
        }
    }

    pub(in crate::app) fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub(in crate::app) fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    pub(in crate::app) fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    #[cfg(test)]
    pub(in crate::app) fn size(&self) -> Vec2 {
        self.size
    }

    /// Brings the arena in line with `graph`. Positions survive when the node
    /// identifiers are unchanged; otherwise every node is re-seeded. Returns
    /// whether a re-seed happened.
    pub(in crate::app) fn sync(&mut self, graph: &GraphModel, size: Vec2) -> bool {
        self.size = size;

        let unchanged = self.nodes.len() == graph.nodes.len()
            && self
                .nodes
                .iter()
                .zip(&graph.nodes)
                .all(|(node, graph_node)| node.id == graph_node.id);

        if unchanged {
            for (node, graph_node) in self.nodes.iter_mut().zip(&graph.nodes) {
                node.category = graph_node.category;
            }
        } else {
            self.seed(graph);
        }

        self.links = graph
            .edges
            .iter()
            .filter_map(|edge| Some((self.index_of(&edge.source)?, self.index_of(&edge.target)?)))
            .collect();

        !unchanged
    }

    fn seed(&mut self, graph: &GraphModel) {
        let center = self.size * 0.5;
        let spread = self.size * 0.25;

        self.nodes = graph
            .nodes
            .iter()
            .map(|graph_node| {
                let (jx, jy) = stable_pair(&graph_node.id);
                SimNode {
                    id: graph_node.id.clone(),
                    category: graph_node.category,
                    pos: center + vec2(jx * spread.x, jy * spread.y),
                    velocity: Vec2::ZERO,
                }
            })
            .collect();

        self.index_by_id = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();

        tracing::debug!(nodes = self.nodes.len(), "seeded layout");
    }

    pub(in crate::app) fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    pub(in crate::app) fn tick(&mut self) {
        let config = self.config;
        apply_center_gravity(&mut self.nodes, self.size * 0.5, config.gravity);
        apply_repulsion(&mut self.nodes, config.repulsion);
        apply_springs(
            &mut self.nodes,
            &self.links,
            config.ideal_length,
            config.spring,
        );
        integrate(&mut self.nodes, self.size, config.damping, config.padding);
    }

    pub(in crate::app) fn find_node_at(&self, pointer: Pos2) -> Option<&SimNode> {
        first_node_within(&self.nodes, pointer, self.config.hit_radius_sq)
    }

    #[cfg(test)]
    pub(in crate::app) fn place(&mut self, index: usize, pos: Vec2) {
        self.nodes[index].pos = pos;
    }
}
