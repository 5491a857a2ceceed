use std::collections::{HashMap, HashSet};

use eframe::egui::{Vec2, vec2};
use log::warn;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::particles::{Particle, ParticleStore};
use super::reconcile::spawn_offset;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(point: Point) -> Self {
        vec2(point.x, point.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterLink {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genre_tags: Vec<String>,
    pub center: Point,
    #[serde(default)]
    pub nodes: Vec<ClusterNode>,
    #[serde(default)]
    pub links: Vec<ClusterLink>,
}

impl ClusterDefinition {
    pub fn center(&self) -> Vec2 {
        self.center.into()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkeletonEdge {
    pub cluster_id: String,
    pub source: String,
    pub target: String,
}

pub fn skeleton_particle_id(cluster_id: &str, node_id: &str) -> String {
    format!("{cluster_id}-{node_id}")
}

fn node_owners(clusters: &[ClusterDefinition]) -> HashMap<String, usize> {
    let mut owners = HashMap::new();
    for (index, cluster) in clusters.iter().enumerate() {
        for node in &cluster.nodes {
            owners
                .entry(skeleton_particle_id(&cluster.id, &node.id))
                .or_insert(index);
        }
    }
    owners
}

pub fn build_skeleton_particles(
    clusters: &[ClusterDefinition],
    spawn_spread: f32,
    rng: &mut dyn RngCore,
) -> ParticleStore {
    let owners = node_owners(clusters);
    let mut store = ParticleStore::new();
    for (index, cluster) in clusters.iter().enumerate() {
        let center = cluster.center();
        for node in &cluster.nodes {
            let id = skeleton_particle_id(&cluster.id, &node.id);
            if owners.get(&id) != Some(&index) || store.contains(&id) {
                warn!("event=skeleton_duplicate_node id={id}");
                continue;
            }
            let home = center + vec2(node.x, node.y);
            let position = home + spawn_offset(rng, spawn_spread);
            store.insert(Particle::at_rest(id, position, home));
        }
    }
    store
}

/// Links between nodes of the same cluster, with endpoints as particle ids.
/// Links naming a missing node, self links, repeated pairs and links to a
/// node whose id another cluster already owns are dropped.
pub fn build_skeleton_edges(clusters: &[ClusterDefinition]) -> Vec<SkeletonEdge> {
    let owners = node_owners(clusters);
    let mut edges = Vec::new();
    for (index, cluster) in clusters.iter().enumerate() {
        let mut pairs = HashSet::new();

        for link in &cluster.links {
            let source = skeleton_particle_id(&cluster.id, &link.source);
            let target = skeleton_particle_id(&cluster.id, &link.target);
            if source == target
                || owners.get(&source) != Some(&index)
                || owners.get(&target) != Some(&index)
            {
                warn!(
                    "event=skeleton_link_dropped cluster={} source={} target={}",
                    cluster.id, link.source, link.target
                );
                continue;
            }

            let key = if source < target {
                (source.clone(), target.clone())
            } else {
                (target.clone(), source.clone())
            };
            if !pairs.insert(key) {
                continue;
            }

            edges.push(SkeletonEdge {
                cluster_id: cluster.id.clone(),
                source,
                target,
            });
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn cluster() -> ClusterDefinition {
        serde_json::from_str(
            r#"{
                "id": "voyager",
                "name": "The Voyager",
                "genreTags": ["Science Fiction"],
                "center": { "x": 100.0, "y": -50.0 },
                "nodes": [
                    { "id": "a", "x": 0.0, "y": 0.0 },
                    { "id": "b", "x": 30.0, "y": 10.0 }
                ],
                "links": [
                    { "source": "a", "target": "b" },
                    { "source": "b", "target": "a" },
                    { "source": "a", "target": "ghost" },
                    { "source": "a", "target": "a" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn particles_are_homed_relative_to_center() {
        let mut rng = StdRng::seed_from_u64(1);

        let store = build_skeleton_particles(&[cluster()], 4.0, &mut rng);

        assert_eq!(store.len(), 2);
        let b = store.get("voyager-b").unwrap();
        assert_eq!(b.anchor, vec2(130.0, -40.0));
        assert!((b.position - b.anchor).length() <= 2.0_f32.hypot(2.0));
    }

    #[test]
    fn invalid_and_repeated_links_are_dropped() {
        let edges = build_skeleton_edges(&[cluster()]);

        assert_eq!(
            edges,
            vec![SkeletonEdge {
                cluster_id: "voyager".to_owned(),
                source: "voyager-a".to_owned(),
                target: "voyager-b".to_owned(),
            }]
        );
    }

    #[test]
    fn bundled_edges_only_name_existing_particles() {
        let clusters = crate::catalog::load_constellations(None).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let store = build_skeleton_particles(&clusters, 4.0, &mut rng);
        let edges = build_skeleton_edges(&clusters);

        assert!(!edges.is_empty());
        for edge in &edges {
            assert!(store.contains(&edge.source), "missing {}", edge.source);
            assert!(store.contains(&edge.target), "missing {}", edge.target);
        }
    }

    #[test]
    fn colliding_ids_keep_edges_with_their_owner() {
        let clusters: Vec<ClusterDefinition> = serde_json::from_str(
            r#"[
                {
                    "id": "a-b",
                    "name": "First",
                    "center": { "x": 0.0, "y": 0.0 },
                    "nodes": [
                        { "id": "c", "x": 0.0, "y": 0.0 },
                        { "id": "d", "x": 10.0, "y": 0.0 }
                    ],
                    "links": [{ "source": "c", "target": "d" }]
                },
                {
                    "id": "a",
                    "name": "Second",
                    "center": { "x": 500.0, "y": 0.0 },
                    "nodes": [
                        { "id": "b-c", "x": 0.0, "y": 0.0 },
                        { "id": "e", "x": 10.0, "y": 0.0 }
                    ],
                    "links": [{ "source": "b-c", "target": "e" }]
                }
            ]"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let store = build_skeleton_particles(&clusters, 0.0, &mut rng);
        let edges = build_skeleton_edges(&clusters);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("a-b-c").unwrap().anchor, vec2(0.0, 0.0));
        assert_eq!(
            edges,
            vec![SkeletonEdge {
                cluster_id: "a-b".to_owned(),
                source: "a-b-c".to_owned(),
                target: "a-b-d".to_owned(),
            }]
        );
    }
}
