use std::collections::HashMap;
use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};

use crate::brain::{Document, tag_counts};

use super::super::driver::{AnimationDriver, RepaintScheduler};
use super::super::graph::interaction::Interaction;
use super::super::physics::PhysicsConfig;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(ctx: &Context, documents: Vec<Document>) -> Self {
        let tags = tag_counts(&documents);
        let driver = AnimationDriver::new(
            RepaintScheduler::new(ctx.clone()),
            PhysicsConfig::default(),
        );

        Self {
            documents,
            tags,
            backlinks: HashMap::new(),
            search: String::new(),
            category_filter: None,
            active_tag: None,
            selected: None,
            graph_dirty: true,
            driver,
            interaction: Interaction::default(),
            search_match_cache: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        brain_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        if self.graph_dirty {
            self.rebuild_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Brain");
                    ui.separator();
                    ui.label(format!("path: {}", brain_path.display()));
                    let reload_button = ui.add_enabled(!is_loading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.driver.graph().summary());
                        if is_loading {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::left("documents")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_documents(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if self.selected == selected {
            return;
        }

        if let Some(slug) = &selected {
            tracing::debug!(%slug, "document opened");
        }
        self.selected = selected;
    }

    pub(in crate::app) fn document(&self, slug: &str) -> Option<&Document> {
        self.documents.iter().find(|document| document.slug == slug)
    }

    /// Selecting the active tag again clears the filter.
    pub(in crate::app) fn toggle_tag(&mut self, tag: &str) {
        if self.active_tag.as_deref() == Some(tag) {
            self.active_tag = None;
        } else {
            self.active_tag = Some(tag.to_owned());
        }
    }
}
