use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::Context as _;
use eframe::egui::{self, Context};

use crate::brain::{Category, Document, TagCount, load_documents};

mod driver;
mod graph;
mod physics;
mod render;
mod render_utils;
#[cfg(test)]
mod testing;
mod ui;

use driver::{AnimationDriver, RepaintScheduler};
use graph::interaction::Interaction;

type LoadResult = Result<Vec<Document>, String>;

pub struct BrainGraphApp {
    brain_path: PathBuf,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    documents: Vec<Document>,
    tags: Vec<TagCount>,
    backlinks: HashMap<String, Vec<String>>,
    search: String,
    category_filter: Option<Category>,
    active_tag: Option<String>,
    selected: Option<String>,
    graph_dirty: bool,
    driver: AnimationDriver<RepaintScheduler>,
    interaction: Interaction,
    search_match_cache: Option<SearchMatchCache>,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<String>>,
}

impl BrainGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, brain_path: PathBuf) -> Self {
        let state = Self::start_load(brain_path.clone());
        Self {
            brain_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(brain_path: PathBuf) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_documents(&brain_path)
                .with_context(|| format!("failed to load brain at {}", brain_path.display()))
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(brain_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(brain_path),
        }
    }

    fn ready(ctx: &Context, result: LoadResult) -> AppState {
        match result {
            Ok(documents) => AppState::Ready(Box::new(ViewModel::new(ctx, documents))),
            Err(error) => {
                tracing::error!(%error, "loading failed");
                AppState::Error(error)
            }
        }
    }
}

impl eframe::App for BrainGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(Self::ready(ctx, result)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading documents...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the brain");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.brain_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.brain_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.brain_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(Self::ready(ctx, result)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
