use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui::{Color32, Pos2, Stroke, vec2};

use crate::brain::Category;
use crate::graph::{GraphEdge, GraphModel, GraphNode};

use super::driver::{FrameHandle, FrameScheduler};
use super::physics::{PhysicsConfig, Simulation};
use super::render::{Glow, Surface};

pub(in crate::app) fn graph(ids: &[&str], edges: &[(&str, &str)]) -> GraphModel {
    GraphModel {
        nodes: ids
            .iter()
            .map(|id| GraphNode {
                id: id.to_string(),
                category: Category::Concept,
            })
            .collect(),
        edges: edges
            .iter()
            .map(|(source, target)| GraphEdge {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect(),
    }
}

pub(in crate::app) fn simulation_at(placed: &[(&str, f32, f32)]) -> Simulation {
    let ids = placed.iter().map(|(id, _, _)| *id).collect::<Vec<_>>();
    let mut simulation = Simulation::new(PhysicsConfig::default());
    simulation.sync(&graph(&ids, &[]), vec2(500.0, 500.0));
    for (index, (_, x, y)) in placed.iter().enumerate() {
        simulation.place(index, vec2(*x, *y));
    }
    simulation
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) enum DrawOp {
    Clear,
    Line(Pos2, Pos2, Stroke),
    Circle(Pos2, f32, Option<Glow>, Color32),
    Text(Pos2, String, f32, Color32),
}

impl DrawOp {
    pub(in crate::app) fn kind(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Line(..) => "line",
            Self::Circle(..) => "circle",
            Self::Text(..) => "text",
        }
    }
}

#[derive(Debug, Default)]
pub(in crate::app) struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub(in crate::app) fn shape_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, DrawOp::Clear))
            .count()
    }

    pub(in crate::app) fn frames(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Clear))
            .count()
    }

    pub(in crate::app) fn circles(&self) -> Vec<(Pos2, f32, Option<Glow>, Color32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle(center, radius, glow, fill) => Some((*center, *radius, *glow, *fill)),
                _ => None,
            })
            .collect()
    }

    pub(in crate::app) fn texts(&self) -> Vec<(Pos2, String)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(anchor, text, _, _) => Some((*anchor, text.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.ops.push(DrawOp::Line(from, to, stroke));
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, glow: Option<Glow>) {
        self.ops.push(DrawOp::Circle(center, radius, glow, fill));
    }

    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32) {
        self.ops
            .push(DrawOp::Text(anchor, text.to_owned(), size, color));
    }
}

#[derive(Debug, Default)]
pub(in crate::app) struct SchedulerLog {
    pub requested: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl SchedulerLog {
    pub(in crate::app) fn outstanding(&self) -> Option<FrameHandle> {
        self.requested
            .last()
            .copied()
            .filter(|handle| !self.cancelled.contains(handle))
    }
}

#[derive(Clone, Debug, Default)]
pub(in crate::app) struct ManualScheduler {
    next: u64,
    pub log: Rc<RefCell<SchedulerLog>>,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle::new(self.next);
        self.log.borrow_mut().requested.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.log.borrow_mut().cancelled.push(handle);
    }
}
