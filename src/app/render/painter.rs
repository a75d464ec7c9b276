use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

use super::super::render_utils::{BACKGROUND, to_screen, with_alpha};
use super::{Glow, Surface};

const GLOW_LAYERS: usize = 6;

pub(in crate::app) struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub(in crate::app) fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, BACKGROUND);
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter.line_segment(
            [to_screen(self.rect, from), to_screen(self.rect, to)],
            stroke,
        );
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, glow: Option<Glow>) {
        let center = to_screen(self.rect, center);

        // Canvas-style shadow blur approximated by stacked translucent discs.
        if let Some(glow) = glow {
            for layer in (1..=GLOW_LAYERS).rev() {
                let t = layer as f32 / GLOW_LAYERS as f32;
                let alpha = ((1.0 - t) * 70.0 + 10.0) as u8;
                self.painter.circle_filled(
                    center,
                    radius + glow.blur * t * 0.5,
                    with_alpha(glow.color, alpha),
                );
            }
        }

        self.painter.circle_filled(center, radius, fill);
    }

    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            to_screen(self.rect, anchor),
            Align2::CENTER_BOTTOM,
            text,
            FontId::proportional(size),
            color,
        );
    }
}
