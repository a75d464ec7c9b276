use eframe::egui::{self, RichText, Ui};

use crate::util::short_name;

use super::super::ViewModel;
use super::super::render_utils::{MUTED_TEXT, category_color};

impl ViewModel {
    fn draw_link_list(&self, ui: &mut Ui, slugs: &[String], clicked: &mut Option<String>) {
        for slug in slugs {
            match self.document(slug) {
                Some(target) => {
                    if ui
                        .link(target.title.as_str())
                        .on_hover_text(slug.as_str())
                        .clicked()
                    {
                        *clicked = Some(slug.clone());
                    }
                }
                None => {
                    ui.label(RichText::new(short_name(slug)).color(MUTED_TEXT))
                        .on_hover_text("No document with this name yet");
                }
            }
        }
    }

    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let mut clicked = None;
        let mut toggled_tag = None;

        egui::ScrollArea::vertical()
            .id_salt("details_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Document");
                ui.add_space(6.0);
                self.draw_selected(ui, &mut clicked);

                ui.separator();
                ui.label(RichText::new("Tags").strong());
                if self.tags.is_empty() {
                    ui.label("No tags yet.");
                } else {
                    ui.horizontal_wrapped(|ui| {
                        for tag in &self.tags {
                            let active = self.active_tag.as_deref() == Some(tag.tag.as_str());
                            if ui
                                .selectable_label(active, format!("#{} ({})", tag.tag, tag.count))
                                .on_hover_text("Filter the document list by this tag")
                                .clicked()
                            {
                                toggled_tag = Some(tag.tag.clone());
                            }
                        }
                    });
                }
            });

        if let Some(slug) = clicked {
            self.set_selected(Some(slug));
        }
        if let Some(tag) = toggled_tag {
            self.toggle_tag(&tag);
        }
    }

    fn draw_selected(&self, ui: &mut Ui, clicked: &mut Option<String>) {
        let Some(selected) = self.selected.as_deref() else {
            ui.label("Select a document from the list or the graph.");
            return;
        };

        let Some(document) = self.document(selected) else {
            ui.label("The selected document no longer exists.");
            return;
        };

        ui.label(RichText::new(document.title.as_str()).strong().size(18.0));
        ui.small(document.slug.as_str());
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(document.category.label()).color(category_color(document.category)),
            )
            .on_hover_text(document.category.description());
            ui.label(document.date.as_str());
        });

        if !document.tags.is_empty() {
            ui.label(
                document
                    .tags
                    .iter()
                    .map(|tag| format!("#{tag}"))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }

        ui.add_space(6.0);
        ui.label(document.excerpt.as_str());

        ui.separator();
        ui.label(RichText::new(format!("Links ({})", document.links.len())).strong());
        if document.links.is_empty() {
            ui.label("This document does not link anywhere.");
        } else {
            self.draw_link_list(ui, &document.links, clicked);
        }

        ui.separator();
        let backlinks = self
            .backlinks
            .get(&document.slug)
            .map(Vec::as_slice)
            .unwrap_or_default();
        ui.label(RichText::new(format!("Backlinks ({})", backlinks.len())).strong());
        if backlinks.is_empty() {
            ui.label("Nothing links here yet.");
        } else {
            self.draw_link_list(ui, backlinks, clicked);
        }
    }
}
