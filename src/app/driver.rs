use std::mem;

use eframe::egui::Context;

use crate::graph::GraphModel;

use super::physics::{PhysicsConfig, Simulation};
use super::render::{Highlights, Surface, Viewport, draw_frame};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) struct FrameHandle(u64);

impl FrameHandle {
    pub(in crate::app) fn new(id: u64) -> Self {
        Self(id)
    }
}

pub(in crate::app) trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Schedules frames through egui's repaint requests.
///
/// egui cannot retract a repaint that was already requested, so a cancelled
/// frame still wakes the UI once; the driver is Idle by then and draws nothing.
pub(in crate::app) struct RepaintScheduler {
    ctx: Context,
    next: u64,
}

impl RepaintScheduler {
    pub(in crate::app) fn new(ctx: Context) -> Self {
        Self { ctx, next: 0 }
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next = self.next.wrapping_add(1);
        self.ctx.request_repaint();
        FrameHandle::new(self.next)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        tracing::trace!(frame = handle.0, "frame cancelled");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum DriverState {
    Idle,
    Running { frame: FrameHandle },
}

pub(in crate::app) struct AnimationDriver<S: FrameScheduler> {
    scheduler: S,
    graph: GraphModel,
    simulation: Simulation,
    viewport: Option<Viewport>,
    state: DriverState,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    pub(in crate::app) fn new(scheduler: S, config: PhysicsConfig) -> Self {
        Self {
            scheduler,
            graph: GraphModel::default(),
            simulation: Simulation::new(config),
            viewport: None,
            state: DriverState::Idle,
        }
    }

    #[cfg(test)]
    pub(in crate::app) fn state(&self) -> DriverState {
        self.state
    }

    pub(in crate::app) fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    #[cfg(test)]
    pub(in crate::app) fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub(in crate::app) fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub(in crate::app) fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The layout pointer input may hit-test against. `None` while Idle, when
    /// the arena can still hold the nodes of a graph that was replaced.
    pub(in crate::app) fn live_simulation(&self) -> Option<&Simulation> {
        self.is_running().then_some(&self.simulation)
    }

    /// Starts animating into `viewport`. Without a viewport the driver stays
    /// Idle and the call can be repeated on a later frame.
    pub(in crate::app) fn mount(&mut self, viewport: Option<Viewport>) -> bool {
        if self.is_running() {
            return true;
        }

        let Some(viewport) = viewport else {
            tracing::debug!("no drawing surface yet, mount deferred");
            return false;
        };

        self.viewport = Some(viewport);
        if self.simulation.sync(&self.graph, viewport.size()) {
            tracing::debug!(
                nodes = self.graph.node_count(),
                edges = self.graph.edge_count(),
                "layout seeded"
            );
        }

        let frame = self.scheduler.request_frame();
        self.state = DriverState::Running { frame };
        tracing::debug!(width = viewport.width, height = viewport.height, "driver mounted");
        true
    }

    pub(in crate::app) fn frame<T: Surface>(
        &mut self,
        surface: &mut T,
        highlights: Highlights<'_>,
    ) -> bool {
        if !self.is_running() {
            return false;
        }

        self.simulation.tick();
        draw_frame(surface, &self.simulation, highlights);

        let frame = self.scheduler.request_frame();
        self.state = DriverState::Running { frame };
        true
    }

    pub(in crate::app) fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(physical = ?viewport.physical_size(), "viewport resized");
        self.viewport = Some(viewport);
        self.simulation.resize(viewport.size());
    }

    pub(in crate::app) fn teardown(&mut self) {
        if let DriverState::Running { frame } = mem::replace(&mut self.state, DriverState::Idle) {
            self.scheduler.cancel_frame(frame);
            tracing::debug!("driver stopped");
        }
    }

    pub(in crate::app) fn replace_graph(&mut self, graph: GraphModel) {
        self.teardown();
        self.graph = graph;
    }
}

impl<S: FrameScheduler> Drop for AnimationDriver<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
