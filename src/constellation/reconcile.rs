use std::collections::{HashMap, HashSet};

use eframe::egui::{Vec2, vec2};
use rand::{Rng, RngCore};

use super::item::Item;
use super::particles::{Particle, ParticleStore};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub retargeted: Vec<String>,
    pub removed: Vec<String>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.retargeted.is_empty() && self.removed.is_empty()
    }
}

pub fn spawn_offset(rng: &mut dyn RngCore, spread: f32) -> Vec2 {
    if spread <= 0.0 {
        return Vec2::ZERO;
    }
    vec2(
        (rng.random::<f32>() - 0.5) * spread,
        (rng.random::<f32>() - 0.5) * spread,
    )
}

/// Rebuilds `store` so it holds exactly one particle per distinct item id.
///
/// New items spawn at their anchor plus a random offset of at most
/// `spawn_spread / 2` per axis. Known items keep their position and velocity
/// and only take the new anchor. The rebuilt arena replaces the old one in a
/// single assignment.
pub fn reconcile(
    store: &mut ParticleStore,
    items: &[Item],
    spawn_spread: f32,
    rng: &mut dyn RngCore,
) -> ReconcileReport {
    let mut previous = std::mem::take(store)
        .into_particles()
        .into_iter()
        .map(|particle| (particle.id.clone(), particle))
        .collect::<HashMap<_, _>>();

    let mut report = ReconcileReport::default();
    let mut seen = HashSet::with_capacity(items.len());
    let mut next = Vec::with_capacity(items.len());

    for item in items {
        if !seen.insert(item.id.as_str()) {
            continue;
        }

        match previous.remove(&item.id) {
            Some(mut particle) => {
                if particle.anchor != item.anchor {
                    particle.anchor = item.anchor;
                    report.retargeted.push(item.id.clone());
                }
                next.push(particle);
            }
            None => {
                let position = item.anchor + spawn_offset(rng, spawn_spread);
                next.push(Particle::at_rest(item.id.clone(), position, item.anchor));
                report.added.push(item.id.clone());
            }
        }
    }

    report.removed = previous.into_keys().collect();
    report.removed.sort();

    *store = ParticleStore::from_particles(next);
    report
}
