mod entry;
mod placement;
mod storage;

pub use entry::{WatchEntry, Watchlist};
pub use placement::{home_cluster, place_entries, spiral_offset};
pub use storage::WatchlistFile;

use anyhow::Result;

use crate::catalog::Catalog;

const DEFAULT_TITLES: [&str; 6] = ["1-movie", "6-tv", "9-movie", "10-tv", "8-tv", "14-tv"];

pub fn default_entries(catalog: &Catalog, added_at: u64) -> Vec<WatchEntry> {
    DEFAULT_TITLES
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|entry| entry.to_watch_entry(added_at))
        .collect()
}

pub fn load(file: &WatchlistFile, catalog: &Catalog, added_at: u64) -> Result<Watchlist> {
    file.load_or_seed(&default_entries(catalog, added_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_list_comes_from_the_catalog() {
        let catalog = Catalog::bundled().unwrap();

        let entries = default_entries(&catalog, 7);

        assert_eq!(entries.len(), DEFAULT_TITLES.len());
        assert!(entries.iter().all(|entry| entry.added_at == 7));
        assert_eq!(entries[0].title, "Inception");
    }

    #[test]
    fn first_load_seeds_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = WatchlistFile::new(dir.path().join("watchlist.json"));
        let catalog = Catalog::bundled().unwrap();

        let list = load(&file, &catalog, 0).unwrap();

        assert_eq!(list.len(), DEFAULT_TITLES.len());
        assert!(file.path().exists());
    }
}
