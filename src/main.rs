mod app;

use std::path::PathBuf;

use clap::Parser;
use log::error;

use watch_constellation::logging::init_logging;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file holding the saved titles. Created with a starter list when missing.
    #[arg(long, default_value = "watchlist.json")]
    watchlist: PathBuf,

    /// JSON file with cluster definitions replacing the bundled sky.
    #[arg(long)]
    constellations: Option<PathBuf>,

    /// Seed for spawn offsets, shimmer and the starfield.
    #[arg(long)]
    seed: Option<u64>,

    /// trace, debug, info, warn, error or off. Falls back to RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also write rotating log files into this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let _logger = match init_logging(args.log_level.as_deref(), args.log_dir.as_deref()) {
        Ok(handle) => Some(handle),
        Err(error) => {
            eprintln!("logging disabled: {error:#}");
            None
        }
    };

    let config = app::AppConfig {
        watchlist_path: args.watchlist,
        constellations_path: args.constellations,
        seed: args.seed,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Watch Constellation",
        options,
        Box::new(move |cc| Ok(Box::new(app::ConstellationApp::new(cc, config)))),
    );
    if let Err(error) = &result {
        error!("event=app_exit status=error error={error}");
    }
    result
}
