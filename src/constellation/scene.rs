use eframe::egui::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;

use super::collision::{CollisionParams, resolve_collisions};
use super::integrator::{Integrator, IntegratorParams, ParamsError};
use super::item::Item;
use super::particles::ParticleStore;
use super::reconcile::{ReconcileReport, reconcile};
use super::render_loop::{RenderLoop, ScheduledTick, TickOutcome};
use super::similarity::{SimilarityEdge, SimilarityRule, build_similarity_edges};
use super::skeleton::{
    ClusterDefinition, SkeletonEdge, build_skeleton_edges, build_skeleton_particles,
};
use super::snapshot::WorldSnapshot;
use super::viewport::{PointerEvent, Viewport};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    pub skeleton: IntegratorParams,
    pub items: IntegratorParams,
    pub collision: CollisionParams,
    pub skeleton_spawn_spread: f32,
    pub item_spawn_spread: f32,
    pub similarity: SimilarityRule,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            skeleton: IntegratorParams::SKELETON,
            items: IntegratorParams::ITEMS,
            collision: CollisionParams::default(),
            skeleton_spawn_spread: 4.0,
            item_spawn_spread: 6.0,
            similarity: SimilarityRule::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    NodePressed(String),
    CameraMoved(Vec2),
}

/// Everything one mounted constellation view owns: both particle
/// populations, the derived edges, the camera and the loop lifecycle.
///
/// Dropping a scene stops its loop.
#[derive(Debug)]
pub struct Scene {
    params: SceneParams,
    skeleton: ParticleStore,
    skeleton_edges: Vec<SkeletonEdge>,
    items: ParticleStore,
    item_list: Vec<Item>,
    similarity_edges: Vec<SimilarityEdge>,
    skeleton_integrator: Integrator,
    item_integrator: Integrator,
    viewport: Viewport,
    render_loop: RenderLoop,
    rng: StdRng,
    snapshot: WorldSnapshot,
}

impl Scene {
    pub fn new(
        clusters: &[ClusterDefinition],
        params: SceneParams,
        mut rng: StdRng,
    ) -> Result<Self, ParamsError> {
        let skeleton_integrator = Integrator::from_params(&params.skeleton)?;
        let item_integrator = Integrator::from_params(&params.items)?;
        let skeleton = build_skeleton_particles(clusters, params.skeleton_spawn_spread, &mut rng);
        let skeleton_edges = build_skeleton_edges(clusters);
        let items = ParticleStore::new();
        let snapshot = WorldSnapshot::capture(0, &skeleton, &items);

        info!(
            "event=scene_created clusters={} skeleton_nodes={} skeleton_edges={}",
            clusters.len(),
            skeleton.len(),
            skeleton_edges.len()
        );

        Ok(Self {
            params,
            skeleton,
            skeleton_edges,
            items,
            item_list: Vec::new(),
            similarity_edges: Vec::new(),
            skeleton_integrator,
            item_integrator,
            viewport: Viewport::default(),
            render_loop: RenderLoop::new(),
            rng,
            snapshot,
        })
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    /// Swaps tuning in place. On error the previous parameters stay active.
    pub fn set_params(&mut self, params: SceneParams) -> Result<(), ParamsError> {
        let skeleton_integrator = Integrator::from_params(&params.skeleton)?;
        let item_integrator = Integrator::from_params(&params.items)?;
        let rule_changed = params.similarity != self.params.similarity;

        self.skeleton_integrator = skeleton_integrator;
        self.item_integrator = item_integrator;
        self.params = params;
        if rule_changed {
            self.similarity_edges = build_similarity_edges(&self.item_list, self.params.similarity);
        }
        Ok(())
    }

    pub fn set_items(&mut self, items: Vec<Item>) -> ReconcileReport {
        let report = reconcile(
            &mut self.items,
            &items,
            self.params.item_spawn_spread,
            &mut self.rng,
        );
        self.similarity_edges = build_similarity_edges(&items, self.params.similarity);
        self.item_list = items;
        self.snapshot =
            WorldSnapshot::capture(self.render_loop.frame(), &self.skeleton, &self.items);

        if !report.is_empty() {
            debug!(
                "event=scene_reconciled added={} retargeted={} removed={} particles={} links={}",
                report.added.len(),
                report.retargeted.len(),
                report.removed.len(),
                self.items.len(),
                self.similarity_edges.len()
            );
        }
        report
    }

    pub fn start(&mut self) -> Option<ScheduledTick> {
        if self.items.is_empty() {
            return None;
        }
        self.render_loop.start()
    }

    pub fn stop(&mut self) {
        self.render_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    pub fn tick(&mut self, ticket: ScheduledTick) -> TickOutcome {
        if !self.render_loop.admit(&ticket) {
            return TickOutcome::Dropped;
        }

        self.skeleton_integrator
            .step(&mut self.skeleton, &mut self.rng);
        self.item_integrator.step(&mut self.items, &mut self.rng);
        resolve_collisions(&mut self.items, self.params.collision);

        let next = self.render_loop.reschedule(ticket);
        self.snapshot = WorldSnapshot::capture(next.frame(), &self.skeleton, &self.items);
        TickOutcome::Advanced {
            next,
            snapshot: self.snapshot.clone(),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<SceneEvent> {
        match event {
            PointerEvent::Down {
                target: Some(id), ..
            } if self.items.contains(&id) => Some(SceneEvent::NodePressed(id)),
            PointerEvent::Down { position, .. } => {
                self.viewport.begin_drag(position);
                None
            }
            PointerEvent::Move { position } => self
                .viewport
                .drag_to(position)
                .then(|| SceneEvent::CameraMoved(self.viewport.offset())),
            PointerEvent::Up { .. } | PointerEvent::Leave => {
                self.viewport.end_drag();
                None
            }
        }
    }

    pub fn reset_camera(&mut self) {
        self.viewport.reset();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }

    pub fn items(&self) -> &[Item] {
        &self.item_list
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.item_list.iter().find(|item| item.id == id)
    }

    pub fn item_particles(&self) -> &ParticleStore {
        &self.items
    }

    pub fn skeleton_particles(&self) -> &ParticleStore {
        &self.skeleton
    }

    pub fn skeleton_edges(&self) -> &[SkeletonEdge] {
        &self.skeleton_edges
    }

    pub fn similarity_edges(&self) -> &[SimilarityEdge] {
        &self.similarity_edges
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.render_loop.stop();
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};
    use rand::SeedableRng;

    use super::*;
    use crate::constellation::item::ItemKind;
    use crate::constellation::skeleton::{ClusterLink, ClusterNode, Point};

    fn clusters() -> Vec<ClusterDefinition> {
        vec![ClusterDefinition {
            id: "lantern".to_owned(),
            name: "The Lantern".to_owned(),
            genre_tags: vec!["Mystery".to_owned()],
            center: Point { x: 0.0, y: 0.0 },
            nodes: vec![
                ClusterNode {
                    id: "a".to_owned(),
                    x: -20.0,
                    y: 0.0,
                },
                ClusterNode {
                    id: "b".to_owned(),
                    x: 20.0,
                    y: 10.0,
                },
            ],
            links: vec![ClusterLink {
                source: "a".to_owned(),
                target: "b".to_owned(),
            }],
        }]
    }

    fn items() -> Vec<Item> {
        vec![
            Item::new("dark", "Dark", ["Mystery", "Drama"], ItemKind::Tv, vec2(0.0, 0.0)),
            Item::new("severance", "Severance", ["Mystery"], ItemKind::Tv, vec2(30.0, 0.0)),
            Item::new("soul", "Soul", ["Animation"], ItemKind::Movie, vec2(200.0, 0.0)),
        ]
    }

    fn scene() -> Scene {
        Scene::new(&clusters(), SceneParams::default(), StdRng::seed_from_u64(17)).unwrap()
    }

    #[test]
    fn loop_waits_for_items() {
        let mut scene = scene();
        assert!(scene.start().is_none());

        scene.set_items(items());
        assert!(scene.start().is_some());
        assert!(scene.is_running());
    }

    #[test]
    fn ticks_advance_both_populations() {
        let mut scene = scene();
        scene.set_items(items());
        let before = scene.snapshot().clone();

        let mut ticket = scene.start().unwrap();
        for _ in 0..3 {
            match scene.tick(ticket) {
                TickOutcome::Advanced { next, .. } => ticket = next,
                TickOutcome::Dropped => panic!("live tick was dropped"),
            }
        }

        let after = scene.snapshot();
        assert_eq!(after.frame, 3);
        assert_eq!(after.items.len(), 3);
        assert_eq!(after.skeleton.len(), 2);
        assert_ne!(after.items, before.items);
        assert_ne!(after.skeleton, before.skeleton);
    }

    #[test]
    fn stale_tick_after_stop_is_a_no_op() {
        let mut scene = scene();
        scene.set_items(items());
        let ticket = scene.start().unwrap();
        scene.stop();
        scene.stop();
        let skeleton_before = scene.skeleton_particles().particles().to_vec();
        let items_before = scene.item_particles().particles().to_vec();

        let outcome = scene.tick(ticket);

        assert!(matches!(outcome, TickOutcome::Dropped));
        assert_eq!(scene.skeleton_particles().particles(), skeleton_before.as_slice());
        assert_eq!(scene.item_particles().particles(), items_before.as_slice());
        assert_eq!(scene.snapshot().frame, 0);
    }

    #[test]
    fn removing_mid_simulation_drops_one_particle() {
        let mut scene = scene();
        scene.set_items(items());
        let mut ticket = scene.start().unwrap();
        for _ in 0..10 {
            if let TickOutcome::Advanced { next, .. } = scene.tick(ticket) {
                ticket = next;
            } else {
                panic!("live tick was dropped");
            }
        }
        let dark = scene.item_particles().get("dark").cloned().unwrap();
        let soul = scene.item_particles().get("soul").cloned().unwrap();

        let mut remaining = items();
        remaining.retain(|item| item.id != "severance");
        let report = scene.set_items(remaining);

        assert_eq!(report.removed, vec!["severance"]);
        assert_eq!(scene.item_particles().len(), 2);
        let dark_after = scene.item_particles().get("dark").unwrap();
        let soul_after = scene.item_particles().get("soul").unwrap();
        assert_eq!(dark_after.position, dark.position);
        assert_eq!(dark_after.velocity, dark.velocity);
        assert_eq!(soul_after.position, soul.position);
        assert_eq!(soul_after.velocity, soul.velocity);
        assert!(matches!(scene.tick(ticket), TickOutcome::Advanced { .. }));
    }

    #[test]
    fn similarity_edges_follow_item_list() {
        let mut scene = scene();
        scene.set_items(items());

        let edges = scene.similarity_edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "dark");
        assert_eq!(edges[0].target, "severance");
        assert_eq!(edges[0].weight, 2);

        scene
            .set_params(SceneParams {
                similarity: SimilarityRule::TAGS_ONLY,
                ..SceneParams::default()
            })
            .unwrap();
        assert_eq!(scene.similarity_edges()[0].weight, 1);
    }

    #[test]
    fn background_drag_pans_and_node_press_selects() {
        let mut scene = scene();
        scene.set_items(items());

        let pressed = scene.handle_pointer(PointerEvent::Down {
            position: pos2(10.0, 10.0),
            target: Some("soul".to_owned()),
        });
        assert_eq!(pressed, Some(SceneEvent::NodePressed("soul".to_owned())));
        assert!(!scene.viewport().is_dragging());

        scene.handle_pointer(PointerEvent::Down {
            position: pos2(100.0, 100.0),
            target: None,
        });
        let moved = scene.handle_pointer(PointerEvent::Move {
            position: pos2(140.0, 130.0),
        });
        assert_eq!(moved, Some(SceneEvent::CameraMoved(vec2(40.0, 30.0))));

        scene.handle_pointer(PointerEvent::Up {
            position: pos2(140.0, 130.0),
        });
        assert_eq!(
            scene.handle_pointer(PointerEvent::Move {
                position: pos2(500.0, 500.0)
            }),
            None
        );
        assert_eq!(scene.viewport().offset(), vec2(40.0, 30.0));
    }

    #[test]
    fn invalid_params_are_rejected_without_side_effects() {
        let mut scene = scene();
        let bad = SceneParams {
            items: IntegratorParams {
                damping: 1.2,
                ..IntegratorParams::ITEMS
            },
            ..SceneParams::default()
        };

        assert!(scene.set_params(bad).is_err());
        assert_eq!(scene.params(), &SceneParams::default());
    }
}
