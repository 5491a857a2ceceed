use super::integrator::fallback_direction;
use super::particles::ParticleStore;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionParams {
    pub min_separation: f32,
    pub strength: f32,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            min_separation: 50.0,
            strength: 0.005,
        }
    }
}

/// Pushes apart every pair closer than `min_separation`.
///
/// Each pair gets an equal and opposite impulse on velocity, and the same
/// displacement on position so overlapping particles separate this tick.
/// Returns the number of pairs that were pushed.
pub fn resolve_collisions(store: &mut ParticleStore, params: CollisionParams) -> usize {
    let separation = params.min_separation;
    if separation <= 0.0 || params.strength <= 0.0 {
        return 0;
    }

    let particles = store.particles_mut();
    let count = particles.len();
    let mut resolved = 0usize;

    for i in 0..count {
        for j in (i + 1)..count {
            let delta = particles[i].position - particles[j].position;
            let distance = delta.length();
            if distance >= separation {
                continue;
            }

            // coincident pairs get a fixed per-pair axis
            let direction = if distance > 0.0 {
                delta / distance
            } else {
                fallback_direction(i, j)
            };

            let push = direction * ((separation - distance) * params.strength);
            particles[i].velocity += push;
            particles[j].velocity -= push;
            particles[i].position += push;
            particles[j].position -= push;
            resolved += 1;
        }
    }

    resolved
}
