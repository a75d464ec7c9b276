use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, vec2};

use crate::brain::Category;

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(17, 17, 17);
pub(super) const MUTED_TEXT: Color32 = Color32::from_rgb(136, 136, 136);

pub(super) fn category_color(category: Category) -> Color32 {
    match category {
        Category::Concept => Color32::from_rgb(0x8b, 0x5c, 0xf6),
        Category::Journal => Color32::from_rgb(0x3b, 0x82, 0xf6),
        Category::Insight => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        Category::Research => Color32::from_rgb(0x10, 0xb9, 0x81),
    }
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn to_screen(rect: Rect, local: Pos2) -> Pos2 {
    rect.min + local.to_vec2()
}

pub(super) fn to_local(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

pub(super) fn draw_legend(painter: &Painter, rect: Rect) {
    let font = FontId::proportional(13.0);
    let mut cursor = rect.left_bottom() + vec2(16.0, -16.0);
    for category in Category::ALL {
        painter.circle_filled(cursor + vec2(6.0, 0.0), 6.0, category_color(category));
        let label = painter.text(
            cursor + vec2(18.0, 0.0),
            Align2::LEFT_CENTER,
            category.label(),
            font.clone(),
            MUTED_TEXT,
        );
        cursor.x = label.right() + 16.0;
    }
}
