use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::entry::WatchEntry;
use crate::constellation::{ClusterDefinition, Item};

const GOLDEN_TURN: f32 = 0.381_966;
const SPIRAL_INNER_RADIUS: f32 = 70.0;
const SPIRAL_STEP: f32 = 34.0;

pub fn home_cluster(entry: &WatchEntry, clusters: &[ClusterDefinition]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, cluster) in clusters.iter().enumerate() {
        let shared = shared_genres(entry, cluster);
        if shared == 0 {
            continue;
        }
        if best.is_none_or(|(_, top)| shared > top) {
            best = Some((index, shared));
        }
    }
    best.map(|(index, _)| index)
}

fn shared_genres(entry: &WatchEntry, cluster: &ClusterDefinition) -> usize {
    entry
        .genres
        .iter()
        .filter(|genre| {
            cluster
                .genre_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(genre))
        })
        .count()
}

pub fn spiral_offset(slot: usize) -> Vec2 {
    let slot = slot as f32;
    let radius = SPIRAL_INNER_RADIUS + SPIRAL_STEP * slot.sqrt();
    let angle = slot * GOLDEN_TURN * TAU;
    vec2(angle.cos(), angle.sin()) * radius
}

/// Turns the saved list into layout items with anchors. Deterministic:
/// the same list and clusters always give the same anchors.
pub fn place_entries(entries: &[WatchEntry], clusters: &[ClusterDefinition]) -> Vec<Item> {
    let mut slots = vec![0usize; clusters.len() + 1];
    let uncharted = clusters.len();

    entries
        .iter()
        .map(|entry| {
            let (bucket, center) = match home_cluster(entry, clusters) {
                Some(index) => (index, clusters[index].center()),
                None => (uncharted, Vec2::ZERO),
            };
            let slot = slots[bucket];
            slots[bucket] += 1;

            Item::new(
                entry.id.clone(),
                entry.title.clone(),
                entry.genres.iter().cloned(),
                entry.media_type,
                center + spiral_offset(slot),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellation::{ItemKind, Point};

    fn cluster(id: &str, tags: &[&str], x: f32, y: f32) -> ClusterDefinition {
        ClusterDefinition {
            id: id.to_owned(),
            name: id.to_owned(),
            genre_tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            center: Point { x, y },
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    fn entry(id: &str, genres: &[&str]) -> WatchEntry {
        WatchEntry {
            id: id.to_owned(),
            item_id: 0,
            title: id.to_owned(),
            media_type: ItemKind::Movie,
            genres: genres.iter().map(|genre| (*genre).to_owned()).collect(),
            release_year: None,
            overview: String::new(),
            rating: 0.0,
            added_at: 0,
        }
    }

    fn clusters() -> Vec<ClusterDefinition> {
        vec![
            cluster("voyager", &["Science Fiction", "Adventure"], 0.0, -420.0),
            cluster("blade", &["Action", "Thriller"], 420.0, 0.0),
            cluster("mask", &["Drama"], 0.0, 420.0),
        ]
    }

    #[test]
    fn most_shared_genres_wins() {
        let clusters = clusters();
        let inception = entry("inception", &["science fiction", "Action", "Thriller"]);

        assert_eq!(home_cluster(&inception, &clusters), Some(1));
    }

    #[test]
    fn ties_go_to_the_first_cluster() {
        let clusters = clusters();
        let tied = entry("tied", &["Adventure", "Drama"]);

        assert_eq!(home_cluster(&tied, &clusters), Some(0));
    }

    #[test]
    fn unmatched_entries_circle_the_origin() {
        let clusters = clusters();
        let items = place_entries(&[entry("doc", &["Documentary"]), entry("none", &[])], &clusters);

        for item in &items {
            let radius = item.anchor.length();
            assert!((SPIRAL_INNER_RADIUS..200.0).contains(&radius), "radius {radius}");
        }
        assert_ne!(items[0].anchor, items[1].anchor);
    }

    #[test]
    fn placement_is_deterministic_and_spreads_slots() {
        let clusters = clusters();
        let entries = [
            entry("a", &["Drama"]),
            entry("b", &["Drama"]),
            entry("c", &["Drama"]),
        ];

        let first = place_entries(&entries, &clusters);
        let second = place_entries(&entries, &clusters);

        assert_eq!(first, second);
        let center = clusters[2].center();
        for (slot, item) in first.iter().enumerate() {
            assert_eq!(item.anchor, center + spiral_offset(slot));
        }
        assert!((first[0].anchor - first[1].anchor).length() > 40.0);
        assert_eq!(first[0].tags.iter().collect::<Vec<_>>(), vec!["drama"]);
    }
}
