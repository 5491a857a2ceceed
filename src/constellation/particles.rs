use std::collections::HashMap;

use eframe::egui::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub anchor: Vec2,
}

impl Particle {
    pub fn at_rest(id: impl Into<String>, position: Vec2, anchor: Vec2) -> Self {
        Self {
            id: id.into(),
            position,
            velocity: Vec2::ZERO,
            anchor,
        }
    }

    pub fn distance_to_anchor(&self) -> f32 {
        (self.anchor - self.position).length()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Dense particle arena with an id to slot lookup.
///
/// Slots are not stable across removals: `remove` swaps the last particle
/// into the hole, so callers key by id and never hold on to a slot across
/// mutations.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    slot_by_id: HashMap<String, usize>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_particles(particles: impl IntoIterator<Item = Particle>) -> Self {
        let mut store = Self::new();
        for particle in particles {
            if store.slot_by_id.contains_key(&particle.id) {
                continue;
            }
            store
                .slot_by_id
                .insert(particle.id.clone(), store.particles.len());
            store.particles.push(particle);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slot_by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Particle> {
        self.slot_by_id
            .get(id)
            .and_then(|&slot| self.particles.get(slot))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Particle> {
        let slot = *self.slot_by_id.get(id)?;
        self.particles.get_mut(slot)
    }

    /// Inserts a particle, replacing any particle with the same id in place.
    pub fn insert(&mut self, particle: Particle) {
        if let Some(&slot) = self.slot_by_id.get(&particle.id) {
            self.particles[slot] = particle;
            return;
        }

        self.slot_by_id
            .insert(particle.id.clone(), self.particles.len());
        self.particles.push(particle);
    }

    pub fn set_anchor(&mut self, id: &str, anchor: Vec2) -> bool {
        match self.get_mut(id) {
            Some(particle) => {
                particle.anchor = anchor;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Particle> {
        let slot = self.slot_by_id.remove(id)?;
        let removed = self.particles.swap_remove(slot);
        if let Some(moved) = self.particles.get(slot) {
            self.slot_by_id.insert(moved.id.clone(), slot);
        }
        Some(removed)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.particles.iter().map(|particle| particle.id.as_str())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn into_particles(self) -> Vec<Particle> {
        self.particles
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn particle(id: &str, x: f32) -> Particle {
        Particle::at_rest(id, vec2(x, 0.0), vec2(x, 0.0))
    }

    #[test]
    fn from_particles_keeps_first_duplicate() {
        let store = ParticleStore::from_particles([
            particle("a", 1.0),
            particle("b", 2.0),
            particle("a", 3.0),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").map(|p| p.position.x), Some(1.0));
    }

    #[test]
    fn remove_fixes_slot_of_swapped_particle() {
        let mut store = ParticleStore::from_particles([
            particle("a", 1.0),
            particle("b", 2.0),
            particle("c", 3.0),
        ]);

        let removed = store.remove("a");
        assert_eq!(removed.map(|p| p.id), Some("a".to_owned()));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("c").map(|p| p.position.x), Some(3.0));
        assert_eq!(store.get("b").map(|p| p.position.x), Some(2.0));
        assert!(store.get("a").is_none());
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = ParticleStore::from_particles([particle("a", 1.0)]);

        assert!(store.remove("missing").is_none());
        assert!(!store.set_anchor("missing", vec2(5.0, 5.0)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_replaces_existing_id() {
        let mut store = ParticleStore::new();
        store.insert(particle("a", 1.0));
        store.insert(particle("a", 9.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").map(|p| p.position.x), Some(9.0));
    }
}
