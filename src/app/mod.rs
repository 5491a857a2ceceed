use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context as _, Result};
use eframe::egui::{self, Context};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use watch_constellation::catalog::{Catalog, load_constellations};
use watch_constellation::constellation::{ClusterDefinition, Scene, SceneParams, ScheduledTick};
use watch_constellation::watchlist::{self, Watchlist, WatchlistFile};

use starfield::Starfield;

mod graph;
mod render_utils;
mod starfield;
mod ui;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub watchlist_path: PathBuf,
    pub constellations_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

pub struct ConstellationApp {
    config: AppConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Session, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct Session {
    catalog: Catalog,
    clusters: Vec<ClusterDefinition>,
    watchlist: Watchlist,
    watchlist_file: WatchlistFile,
}

enum WatchAction {
    Add(String),
    Remove(String),
}

struct ViewModel {
    scene: Scene,
    clusters: Vec<ClusterDefinition>,
    catalog: Catalog,
    watchlist: Watchlist,
    watchlist_file: WatchlistFile,
    ticket: Option<ScheduledTick>,
    selected: Option<String>,
    search: String,
    params: SceneParams,
    params_error: Option<String>,
    storage_error: Option<String>,
    live_physics: bool,
    show_links: bool,
    show_skeleton: bool,
    starfield: Starfield,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

fn load_session(config: &AppConfig) -> Result<Session> {
    let catalog = Catalog::bundled()?;
    let clusters = load_constellations(config.constellations_path.as_deref())
        .context("failed to load constellation definitions")?;
    let watchlist_file = WatchlistFile::new(&config.watchlist_path);
    let watchlist = watchlist::load(&watchlist_file, &catalog, unix_now())?;

    Ok(Session {
        catalog,
        clusters,
        watchlist,
        watchlist_file,
    })
}

impl ConstellationApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let state = Self::start_load(config.clone());
        Self { config, state }
    }

    fn spawn_load(config: AppConfig) -> Receiver<Result<Session, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_session(&config).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(config: AppConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(config),
        }
    }

    fn ready_state(&self, session: Session) -> AppState {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        match ViewModel::new(session, rng) {
            Ok(model) => {
                info!(
                    "event=session_ready items={} seed={}",
                    model.watchlist.len(),
                    self.config
                        .seed
                        .map_or_else(|| "random".to_owned(), |seed| seed.to_string())
                );
                AppState::Ready(Box::new(model))
            }
            Err(error) => {
                error!("event=session_failed error={error}");
                AppState::Error(error.to_string())
            }
        }
    }
}

impl eframe::App for ConstellationApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut retry = false;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(session)) => transition = Some(Ok(session)),
                    Ok(Err(message)) => {
                        error!("event=load_failed error={message}");
                        transition = Some(Err(message));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Charting your constellation...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the watchlist");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        retry = true;
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if retry {
            self.state = Self::start_load(self.config.clone());
        }

        match transition {
            Some(Ok(session)) => self.state = self.ready_state(session),
            Some(Err(message)) => self.state = AppState::Error(message),
            None => {}
        }
    }
}
