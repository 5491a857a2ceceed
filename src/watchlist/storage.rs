use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use super::entry::{WatchEntry, Watchlist};

#[derive(Clone, Debug)]
pub struct WatchlistFile {
    path: PathBuf,
}

impl WatchlistFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the list, or writes `defaults` and returns them when no file
    /// exists yet.
    pub fn load_or_seed(&self, defaults: &[WatchEntry]) -> Result<Watchlist> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                let list = Watchlist::from_entries(defaults.iter().cloned());
                self.save(&list)
                    .with_context(|| format!("failed to seed {}", self.path.display()))?;
                info!(
                    "event=watchlist_seeded path={} entries={}",
                    self.path.display(),
                    list.len()
                );
                return Ok(list);
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        let entries: Vec<WatchEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("invalid watchlist JSON in {}", self.path.display()))?;
        let total = entries.len();
        let list = Watchlist::from_entries(entries);
        if list.len() != total {
            warn!(
                "event=watchlist_duplicates_dropped path={} dropped={}",
                self.path.display(),
                total - list.len()
            );
        }

        info!(
            "event=watchlist_loaded path={} entries={}",
            self.path.display(),
            list.len()
        );
        Ok(list)
    }

    pub fn save(&self, list: &Watchlist) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let raw =
            serde_json::to_string_pretty(list.entries()).context("failed to encode watchlist")?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, raw)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "failed to move {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        info!(
            "event=watchlist_saved path={} entries={}",
            self.path.display(),
            list.len()
        );
        Ok(())
    }
}
