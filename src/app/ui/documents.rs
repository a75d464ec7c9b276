use std::collections::HashSet;

use eframe::egui::{self, RichText, Ui};

use crate::brain::{Category, Document};

use super::super::ViewModel;
use super::super::render_utils::category_color;

fn document_visible(
    document: &Document,
    category: Option<Category>,
    tag: Option<&str>,
    matches: Option<&HashSet<String>>,
) -> bool {
    category.is_none_or(|category| category == document.category)
        && tag.is_none_or(|tag| document.tags.iter().any(|candidate| candidate == tag))
        && matches.is_none_or(|matches| matches.contains(&document.slug))
}

impl ViewModel {
    fn visible_documents(&mut self) -> Vec<usize> {
        let matches = self.search_matches();
        self.documents
            .iter()
            .enumerate()
            .filter(|(_, document)| {
                document_visible(
                    document,
                    self.category_filter,
                    self.active_tag.as_deref(),
                    matches.as_deref(),
                )
            })
            .map(|(index, _)| index)
            .collect()
    }

    pub(in crate::app) fn draw_documents(&mut self, ui: &mut Ui) {
        ui.heading("Documents");
        ui.add_space(6.0);

        ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Search titles, tags and excerpts")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);

        ui.horizontal_wrapped(|ui| {
            ui.selectable_value(&mut self.category_filter, None, "All");
            for category in Category::ALL {
                ui.selectable_value(
                    &mut self.category_filter,
                    Some(category),
                    RichText::new(category.label()).color(category_color(category)),
                )
                .on_hover_text(category.description());
            }
        });

        if let Some(tag) = self.active_tag.clone() {
            ui.horizontal(|ui| {
                ui.label(format!("Tagged #{tag}"));
                if ui.small_button("Clear").clicked() {
                    self.active_tag = None;
                }
            });
        }

        let visible = self.visible_documents();
        ui.small(format!(
            "{} of {} documents",
            visible.len(),
            self.documents.len()
        ));
        ui.separator();

        if visible.is_empty() {
            ui.label("No documents match the current search.");
            return;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("documents_scroll")
            .auto_shrink([false, false])
            .show_rows(ui, 36.0, visible.len(), |ui, row_range| {
                for row in row_range {
                    let Some(document) = visible.get(row).and_then(|&index| self.documents.get(index))
                    else {
                        continue;
                    };

                    let is_selected = self.selected.as_deref() == Some(document.slug.as_str());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("●").color(category_color(document.category)));
                        let response = ui
                            .selectable_label(is_selected, document.title.as_str())
                            .on_hover_text(document.excerpt.as_str());
                        if response.clicked() {
                            clicked = Some(document.slug.clone());
                        }
                        ui.small(document.date.as_str());
                    });
                }
            });

        if let Some(slug) = clicked {
            self.set_selected(Some(slug));
        }
    }
}
