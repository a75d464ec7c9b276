mod painter;

use std::collections::HashSet;

use eframe::egui::{Color32, Pos2, Rect, Stroke, Vec2, vec2};

use crate::util::short_name;

use super::physics::Simulation;
use super::render_utils::{category_color, dim_color};
pub(in crate::app) use painter::PainterSurface;

const EDGE_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
const EDGE_WIDTH: f32 = 1.0;
const NODE_RADIUS: f32 = 8.0;
const HOVERED_NODE_RADIUS: f32 = 12.0;
const GLOW_BLUR: f32 = 20.0;
const LABEL_COLOR: Color32 = Color32::from_rgb(0xed, 0xed, 0xed);
const LABEL_SIZE: f32 = 12.0;
const LABEL_OFFSET: f32 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Glow {
    pub blur: f32,
    pub color: Color32,
}

/// Something frames can be drawn onto. Coordinates are surface-local logical
/// pixels; the implementation owns device scaling.
pub(in crate::app) trait Surface {
    fn clear(&mut self);
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, glow: Option<Glow>);
    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixels_per_point: f32,
}

impl Viewport {
    pub(in crate::app) fn from_rect(rect: Rect, pixels_per_point: f32) -> Option<Self> {
        (rect.width() >= 1.0 && rect.height() >= 1.0 && pixels_per_point > 0.0).then(|| Self {
            width: rect.width(),
            height: rect.height(),
            pixels_per_point,
        })
    }

    pub(in crate::app) fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    pub(in crate::app) fn physical_size(&self) -> [u32; 2] {
        [
            (self.width * self.pixels_per_point).round() as u32,
            (self.height * self.pixels_per_point).round() as u32,
        ]
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(in crate::app) struct Highlights<'a> {
    pub hovered: Option<&'a str>,
    pub matches: Option<&'a HashSet<String>>,
}

impl Highlights<'_> {
    fn is_dimmed(&self, id: &str) -> bool {
        self.matches.is_some_and(|matches| !matches.contains(id))
    }
}

pub(in crate::app) fn draw_frame<S: Surface>(
    surface: &mut S,
    simulation: &Simulation,
    highlights: Highlights<'_>,
) {
    surface.clear();

    let nodes = simulation.nodes();
    let edge_stroke = Stroke::new(EDGE_WIDTH, EDGE_COLOR);
    for &(source, target) in simulation.links() {
        let (Some(from), Some(to)) = (nodes.get(source), nodes.get(target)) else {
            continue;
        };
        surface.line(from.pos.to_pos2(), to.pos.to_pos2(), edge_stroke);
    }

    for node in nodes {
        let center = node.pos.to_pos2();
        let color = category_color(node.category);

        if highlights.hovered == Some(node.id.as_str()) {
            let glow = Glow {
                blur: GLOW_BLUR,
                color,
            };
            surface.circle(center, HOVERED_NODE_RADIUS, color, Some(glow));
            surface.text(
                center - vec2(0.0, LABEL_OFFSET),
                short_name(&node.id),
                LABEL_SIZE,
                LABEL_COLOR,
            );
        } else if highlights.is_dimmed(&node.id) {
            surface.circle(center, NODE_RADIUS, dim_color(color, 0.4), None);
        } else {
            surface.circle(center, NODE_RADIUS, color, None);
        }
    }
}
