use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use log::info;
use serde::{Deserialize, Serialize};

use crate::constellation::{ClusterDefinition, ItemKind};
use crate::watchlist::WatchEntry;

const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");
const BUNDLED_CONSTELLATIONS: &str = include_str!("../assets/constellations.json");

pub fn load_constellations(path: Option<&Path>) -> Result<Vec<ClusterDefinition>> {
    let clusters: Vec<ClusterDefinition> = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid constellation JSON in {}", path.display()))?
        }
        None => serde_json::from_str(BUNDLED_CONSTELLATIONS)
            .context("bundled constellations are invalid")?,
    };

    info!(
        "event=constellations_loaded source={} clusters={}",
        path.map_or_else(|| "bundled".to_owned(), |path| path.display().to_string()),
        clusters.len()
    );
    Ok(clusters)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: u64,
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
}

impl CatalogEntry {
    pub fn watch_id(&self) -> String {
        let kind = match self.media_type {
            ItemKind::Movie => "movie",
            ItemKind::Tv => "tv",
        };
        format!("{}-{kind}", self.id)
    }

    pub fn to_watch_entry(&self, added_at: u64) -> WatchEntry {
        WatchEntry {
            id: self.watch_id(),
            item_id: self.id,
            title: self.title.clone(),
            media_type: self.media_type,
            genres: self.genres.clone(),
            release_year: self.release_year,
            overview: self.overview.clone(),
            rating: self.rating,
            added_at,
        }
    }
}

pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl Catalog {
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG).context("bundled catalog is invalid")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let entries = serde_json::from_str(raw).context("invalid catalog JSON")?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, watch_id: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.watch_id() == watch_id)
    }

    /// Entries whose title fuzzily matches `query`, best match first. An
    /// empty query lists everything in catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CatalogEntry> {
        let query = query.trim();
        if query.is_empty() {
            return self.entries.iter().take(limit).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut ranked = self
            .entries
            .iter()
            .filter_map(|entry| {
                fuzzy_match_score(&matcher, &entry.title, query).map(|score| (score, entry))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.title.cmp(&b.1.title)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(_score, entry)| entry)
            .collect()
    }
}
