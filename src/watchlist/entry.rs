use serde::{Deserialize, Serialize};

use crate::constellation::ItemKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEntry {
    pub id: String,
    #[serde(default)]
    pub item_id: u64,
    pub title: String,
    pub media_type: ItemKind,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub added_at: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Watchlist {
    entries: Vec<WatchEntry>,
}

impl Watchlist {
    pub fn from_entries(entries: impl IntoIterator<Item = WatchEntry>) -> Self {
        let mut list = Self::default();
        for entry in entries {
            list.add(entry);
        }
        list
    }

    pub fn entries(&self) -> &[WatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn add(&mut self, entry: WatchEntry) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<WatchEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str) -> WatchEntry {
        WatchEntry {
            id: id.to_owned(),
            item_id: 0,
            title: title.to_owned(),
            media_type: ItemKind::Movie,
            genres: Vec::new(),
            release_year: None,
            overview: String::new(),
            rating: 0.0,
            added_at: 0,
        }
    }

    #[test]
    fn add_skips_existing_ids() {
        let mut list =
            Watchlist::from_entries([entry("1-movie", "Inception"), entry("1-movie", "Again")]);

        assert_eq!(list.len(), 1);
        assert!(!list.add(entry("1-movie", "Third")));
        assert!(list.add(entry("2-tv", "Breaking Bad")));
        assert_eq!(list.get("1-movie").map(|e| e.title.as_str()), Some("Inception"));
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut list = Watchlist::from_entries([
            entry("a", "A"),
            entry("b", "B"),
            entry("c", "C"),
        ]);

        assert_eq!(list.remove("b").map(|e| e.id), Some("b".to_owned()));
        assert!(list.remove("b").is_none());
        let ids = list.entries().iter().map(|e| e.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn deserializes_sparse_records() {
        let entry: WatchEntry =
            serde_json::from_str(r#"{"id":"9-movie","title":"Spirited Away","mediaType":"movie"}"#)
                .unwrap();

        assert_eq!(entry.media_type, ItemKind::Movie);
        assert!(entry.genres.is_empty());
        assert_eq!(entry.release_year, None);
    }
}
