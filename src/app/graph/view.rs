use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, FontId, Sense, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::brain::Document;

use super::super::render::{Highlights, PainterSurface, Viewport};
use super::super::render_utils::{MUTED_TEXT, draw_legend, to_local};
use super::super::{SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn matching_slugs(documents: &[Document], query: &str) -> HashSet<String> {
    let matcher = SkimMatcherV2::default();
    documents
        .iter()
        .filter(|document| {
            [&document.title, &document.slug, &document.excerpt]
                .into_iter()
                .chain(&document.tags)
                .any(|text| fuzzy_match_score(&matcher, text, query).is_some())
        })
        .map(|document| document.slug.clone())
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn search_matches(&mut self) -> Option<Arc<HashSet<String>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let query = query.to_owned();
        let matches = Arc::new(matching_slugs(&self.documents, &query));
        self.search_match_cache = Some(SearchMatchCache {
            query,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);

        let viewport = Viewport::from_rect(rect, ui.ctx().pixels_per_point());
        if self.driver.is_running() {
            if let Some(viewport) = viewport
                && self.driver.viewport() != Some(viewport)
            {
                self.driver.resize(viewport);
            }
        } else {
            self.driver.mount(viewport);
        }

        match (response.hover_pos(), self.driver.live_simulation()) {
            (Some(pointer), Some(simulation)) => {
                let update = self
                    .interaction
                    .pointer_moved(simulation, to_local(rect, pointer));
                if update.changed {
                    ui.ctx().request_repaint();
                }
                ui.output_mut(|output| {
                    output.cursor_icon = update.cursor;
                });
            }
            _ => {
                self.interaction.pointer_left();
            }
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(simulation) = self.driver.live_simulation()
        {
            let mut opened = None;
            self.interaction.clicked(
                simulation,
                to_local(rect, pointer),
                |id| opened = Some(id.to_owned()),
            );
            if let Some(id) = opened {
                self.set_selected(Some(id));
            }
        }

        let matches = self.search_matches();
        let highlights = Highlights {
            hovered: self.interaction.hovered(),
            matches: matches.as_deref(),
        };
        let mut surface = PainterSurface::new(&painter, rect);
        self.driver.frame(&mut surface, highlights);

        if self.driver.graph().is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No documents to visualize yet",
                FontId::proportional(16.0),
                MUTED_TEXT,
            );
            return;
        }

        draw_legend(&painter, rect);
        painter.text(
            rect.left_top() + vec2(16.0, 16.0),
            Align2::LEFT_TOP,
            self.interaction.status_text(),
            FontId::proportional(13.0),
            MUTED_TEXT,
        );
        painter.text(
            rect.right_bottom() - vec2(16.0, 16.0),
            Align2::RIGHT_BOTTOM,
            "Click a node to open that document.",
            FontId::proportional(13.0),
            MUTED_TEXT,
        );
    }
}
