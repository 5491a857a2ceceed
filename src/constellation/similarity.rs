use std::collections::HashSet;

use super::item::Item;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimilarityEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

impl SimilarityEdge {
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    pub fn other(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(self.target.as_str())
        } else if self.target == id {
            Some(self.source.as_str())
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimilarityRule {
    pub kind_bonus: u32,
}

impl SimilarityRule {
    pub const TAGS_ONLY: Self = Self { kind_bonus: 0 };
}

impl Default for SimilarityRule {
    fn default() -> Self {
        Self { kind_bonus: 1 }
    }
}

pub fn pair_weight(a: &Item, b: &Item, rule: SimilarityRule) -> u32 {
    let shared = a.tags.intersection(&b.tags).count() as u32;
    if a.kind == b.kind {
        shared + rule.kind_bonus
    } else {
        shared
    }
}

/// Links every pair of items whose weight under `rule` is positive.
///
/// Endpoints are stored in id order and the result is sorted, so any
/// permutation of `items` yields the same edge list. Repeated ids only count
/// once.
pub fn build_similarity_edges(items: &[Item], rule: SimilarityRule) -> Vec<SimilarityEdge> {
    let mut seen = HashSet::with_capacity(items.len());
    let unique = items
        .iter()
        .filter(|item| seen.insert(item.id.as_str()))
        .collect::<Vec<_>>();

    let mut edges = Vec::new();
    for i in 0..unique.len() {
        for j in (i + 1)..unique.len() {
            let weight = pair_weight(unique[i], unique[j], rule);
            if weight == 0 {
                continue;
            }

            let (source, target) = if unique[i].id <= unique[j].id {
                (&unique[i].id, &unique[j].id)
            } else {
                (&unique[j].id, &unique[i].id)
            };
            edges.push(SimilarityEdge {
                source: source.clone(),
                target: target.clone(),
                weight,
            });
        }
    }

    edges.sort_by(|a, b| a.source.cmp(&b.source).then_with(|| a.target.cmp(&b.target)));
    edges
}

pub fn edge_strength(weight: u32) -> f32 {
    (weight as f32 * 0.1).min(0.3)
}

pub fn neighbors<'a>(
    edges: &'a [SimilarityEdge],
    id: &'a str,
) -> impl Iterator<Item = (&'a str, u32)> + 'a {
    edges
        .iter()
        .filter_map(move |edge| edge.other(id).map(|other| (other, edge.weight)))
}

#[cfg(test)]
mod tests {
    use eframe::egui::Vec2;

    use super::*;
    use crate::constellation::item::ItemKind;

    fn item(id: &str, tags: &[&str], kind: ItemKind) -> Item {
        Item::new(id, id, tags.iter().copied(), kind, Vec2::ZERO)
    }

    fn weight_between(edges: &[SimilarityEdge], a: &str, b: &str) -> Option<u32> {
        edges
            .iter()
            .find(|edge| edge.touches(a) && edge.touches(b))
            .map(|edge| edge.weight)
    }

    #[test]
    fn shared_tags_weight_edges() {
        let items = vec![
            item("a", &["sci-fi", "space"], ItemKind::Movie),
            item("b", &["sci-fi", "political", "space"], ItemKind::Tv),
            item("c", &["fantasy"], ItemKind::Movie),
        ];

        let edges = build_similarity_edges(&items, SimilarityRule::TAGS_ONLY);

        assert_eq!(weight_between(&edges, "a", "b"), Some(2));
        assert_eq!(weight_between(&edges, "a", "c"), None);
        assert_eq!(weight_between(&edges, "b", "c"), None);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn tag_case_does_not_split_links() {
        let items = vec![
            item("a", &["Science Fiction"], ItemKind::Movie),
            item("b", &["science fiction"], ItemKind::Tv),
        ];

        let edges = build_similarity_edges(&items, SimilarityRule::TAGS_ONLY);

        assert_eq!(weight_between(&edges, "a", "b"), Some(1));
    }

    #[test]
    fn matching_kind_adds_bonus() {
        let items = vec![
            item("arrival", &["sci-fi", "emotive", "space"], ItemKind::Movie),
            item("expanse", &["sci-fi", "political", "space"], ItemKind::Tv),
            item("spirited-away", &["fantasy", "animated"], ItemKind::Movie),
            item("dark", &["mystery"], ItemKind::Tv),
        ];

        let edges = build_similarity_edges(&items, SimilarityRule::default());

        assert_eq!(weight_between(&edges, "arrival", "expanse"), Some(2));
        assert_eq!(weight_between(&edges, "arrival", "spirited-away"), Some(1));
        assert_eq!(weight_between(&edges, "expanse", "dark"), Some(1));
        assert_eq!(weight_between(&edges, "spirited-away", "dark"), None);
    }

    #[test]
    fn weights_are_symmetric() {
        let a = item("a", &["drama", "crime"], ItemKind::Tv);
        let b = item("b", &["crime", "thriller"], ItemKind::Tv);
        let rule = SimilarityRule::default();

        assert_eq!(pair_weight(&a, &b, rule), pair_weight(&b, &a, rule));
        assert_eq!(pair_weight(&a, &b, rule), 2);
    }

    #[test]
    fn edge_list_ignores_input_order() {
        let items = vec![
            item("dark", &["mystery", "time", "dark"], ItemKind::Tv),
            item("severance", &["mystery", "corporate", "dark"], ItemKind::Tv),
            item("soul", &["animated", "emotive"], ItemKind::Movie),
            item("arrival", &["sci-fi", "emotive", "space"], ItemKind::Movie),
        ];
        let mut reversed = items.clone();
        reversed.reverse();

        let forward = build_similarity_edges(&items, SimilarityRule::default());
        let backward = build_similarity_edges(&reversed, SimilarityRule::default());

        assert_eq!(forward, backward);
        for edge in &forward {
            assert!(edge.source < edge.target);
            assert!(edge.weight > 0);
        }
    }

    #[test]
    fn duplicates_and_empty_tags_degrade_gracefully() {
        let items = vec![
            item("x", &[], ItemKind::Movie),
            item("x", &[], ItemKind::Movie),
            item("y", &[], ItemKind::Tv),
        ];

        let edges = build_similarity_edges(&items, SimilarityRule::default());

        assert!(edges.is_empty());
    }

    #[test]
    fn neighbors_report_the_other_endpoint() {
        let items = vec![
            item("a", &["drama"], ItemKind::Movie),
            item("b", &["drama"], ItemKind::Tv),
            item("c", &["crime"], ItemKind::Tv),
        ];
        let edges = build_similarity_edges(&items, SimilarityRule::default());

        let mut linked = neighbors(&edges, "b").collect::<Vec<_>>();
        linked.sort();

        assert_eq!(linked, vec![("a", 1), ("c", 1)]);
        assert_eq!(edge_strength(1), 0.1);
        assert_eq!(edge_strength(7), 0.3);
    }
}
