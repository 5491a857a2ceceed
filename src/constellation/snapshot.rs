use eframe::egui::{Pos2, Vec2};

use super::particles::ParticleStore;
use super::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
    pub id: String,
    pub position: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScreenNode {
    pub id: String,
    pub position: Pos2,
    pub selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldSnapshot {
    pub frame: u64,
    pub skeleton: Vec<NodeView>,
    pub items: Vec<NodeView>,
}

fn views(store: &ParticleStore) -> Vec<NodeView> {
    store
        .particles()
        .iter()
        .map(|particle| NodeView {
            id: particle.id.clone(),
            position: particle.position,
        })
        .collect()
}

impl WorldSnapshot {
    pub fn capture(frame: u64, skeleton: &ParticleStore, items: &ParticleStore) -> Self {
        Self {
            frame,
            skeleton: views(skeleton),
            items: views(items),
        }
    }

    pub fn item_position(&self, id: &str) -> Option<Vec2> {
        self.items
            .iter()
            .find(|node| node.id == id)
            .map(|node| node.position)
    }

    pub fn project_items(
        &self,
        viewport: &Viewport,
        origin: Pos2,
        selected: Option<&str>,
    ) -> Vec<ScreenNode> {
        self.items
            .iter()
            .map(|node| ScreenNode {
                id: node.id.clone(),
                position: viewport.project(origin, node.position),
                selected: selected == Some(node.id.as_str()),
            })
            .collect()
    }

    pub fn project_skeleton(&self, viewport: &Viewport, origin: Pos2) -> Vec<ScreenNode> {
        self.skeleton
            .iter()
            .map(|node| ScreenNode {
                id: node.id.clone(),
                position: viewport.project(origin, node.position),
                selected: false,
            })
            .collect()
    }
}
