use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout};
use log::{debug, warn};
use rand::rngs::StdRng;

use watch_constellation::constellation::{ParamsError, Scene, SceneParams};
use watch_constellation::watchlist::place_entries;

use super::super::starfield::Starfield;
use super::super::{Session, ViewModel, WatchAction, unix_now};

impl ViewModel {
    pub(in crate::app) fn new(session: Session, mut rng: StdRng) -> Result<Self, ParamsError> {
        let Session {
            catalog,
            clusters,
            watchlist,
            watchlist_file,
        } = session;

        let starfield = Starfield::new(&mut rng);
        let params = SceneParams::default();
        let mut scene = Scene::new(&clusters, params, rng)?;
        scene.set_items(place_entries(watchlist.entries(), &clusters));

        Ok(Self {
            scene,
            clusters,
            catalog,
            watchlist,
            watchlist_file,
            ticket: None,
            selected: None,
            search: String::new(),
            params,
            params_error: None,
            storage_error: None,
            live_physics: true,
            show_links: true,
            show_skeleton: true,
            starfield,
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        })
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Watch Constellation");
                    ui.separator();
                    ui.label(format!("titles: {}", self.watchlist.len()));
                    ui.label(format!("links: {}", self.scene.similarity_edges().len()));
                    ui.label(format!("constellations: {}", self.clusters.len()));
                    ui.label(format!("saved to: {}", self.watchlist_file.path().display()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_constellation(ui));
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if self.selected == selected {
            return;
        }
        debug!(
            "event=selection_changed id={}",
            selected.as_deref().unwrap_or("-")
        );
        self.selected = selected;
    }

    pub(in crate::app) fn request(&mut self, action: WatchAction) {
        let changed = match action {
            WatchAction::Add(id) => match self.catalog.get(&id) {
                Some(entry) => self.watchlist.add(entry.to_watch_entry(unix_now())),
                None => {
                    warn!("event=add_unknown_title id={id}");
                    false
                }
            },
            WatchAction::Remove(id) => {
                let removed = self.watchlist.remove(&id).is_some();
                if removed && self.selected.as_deref() == Some(id.as_str()) {
                    self.set_selected(None);
                }
                removed
            }
        };
        if !changed {
            return;
        }

        self.scene
            .set_items(place_entries(self.watchlist.entries(), &self.clusters));
        match self.watchlist_file.save(&self.watchlist) {
            Ok(()) => self.storage_error = None,
            Err(error) => {
                warn!("event=watchlist_save_failed error={error:#}");
                self.storage_error = Some(format!("{error:#}"));
            }
        }
    }

    pub(in crate::app) fn apply_params(&mut self, params: SceneParams) {
        match self.scene.set_params(params) {
            Ok(()) => {
                self.params = params;
                self.params_error = None;
            }
            Err(error) => {
                warn!("event=params_rejected error={error}");
                self.params_error = Some(error.to_string());
            }
        }
    }
}
