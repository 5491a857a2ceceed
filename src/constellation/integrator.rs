use std::fmt;

use eframe::egui::{Vec2, vec2};
use rand::{Rng, RngCore};
use thiserror::Error;

use super::particles::{Particle, ParticleStore};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("damping must be in (0, 1), got {0}")]
    Damping(f32),

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("spring {spring} with damping {damping} diverges; spring * damping must stay below 1")]
    Unstable { spring: f32, damping: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegratorParams {
    pub spring: f32,
    pub damping: f32,
    pub jitter: f32,
    pub centering: f32,
    pub repulsion: f32,
}

impl IntegratorParams {
    pub const SKELETON: Self = Self {
        spring: 0.012,
        damping: 0.9,
        jitter: 0.1,
        centering: 0.0,
        repulsion: 0.0,
    };

    pub const ITEMS: Self = Self {
        spring: 0.02,
        damping: 0.85,
        jitter: 0.12,
        centering: 0.0,
        repulsion: 0.0,
    };

    /// Free force layout: weak anchors, many-body push and a pull to the
    /// origin instead of strong springs.
    pub const FORCE_LAYOUT: Self = Self {
        spring: 0.004,
        damping: 0.6,
        jitter: 0.0,
        centering: 0.002,
        repulsion: 400.0,
    };

    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("spring", self.spring),
            ("damping", self.damping),
            ("jitter", self.jitter),
            ("centering", self.centering),
            ("repulsion", self.repulsion),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite { name, value });
            }
            if value < 0.0 {
                return Err(ParamsError::Negative { name, value });
            }
        }

        if self.damping <= 0.0 || self.damping >= 1.0 {
            return Err(ParamsError::Damping(self.damping));
        }

        if self.spring * self.damping >= 1.0 {
            return Err(ParamsError::Unstable {
                spring: self.spring,
                damping: self.damping,
            });
        }

        Ok(())
    }
}

pub trait ForceTerm: fmt::Debug {
    fn accumulate(&self, particles: &[Particle], accelerations: &mut [Vec2], rng: &mut dyn RngCore);
}

#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub stiffness: f32,
}

impl ForceTerm for Spring {
    fn accumulate(
        &self,
        particles: &[Particle],
        accelerations: &mut [Vec2],
        _rng: &mut dyn RngCore,
    ) {
        for (particle, acceleration) in particles.iter().zip(accelerations.iter_mut()) {
            *acceleration += (particle.anchor - particle.position) * self.stiffness;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Jitter {
    pub amplitude: f32,
}

impl ForceTerm for Jitter {
    fn accumulate(
        &self,
        _particles: &[Particle],
        accelerations: &mut [Vec2],
        rng: &mut dyn RngCore,
    ) {
        if self.amplitude <= 0.0 {
            return;
        }

        for acceleration in accelerations.iter_mut() {
            let x = (rng.random::<f32>() - 0.5) * self.amplitude;
            let y = (rng.random::<f32>() - 0.5) * self.amplitude;
            *acceleration += vec2(x, y);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Centering {
    pub center: Vec2,
    pub strength: f32,
}

impl ForceTerm for Centering {
    fn accumulate(
        &self,
        particles: &[Particle],
        accelerations: &mut [Vec2],
        _rng: &mut dyn RngCore,
    ) {
        for (particle, acceleration) in particles.iter().zip(accelerations.iter_mut()) {
            *acceleration += (self.center - particle.position) * self.strength;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ManyBodyRepulsion {
    pub strength: f32,
    pub softening: f32,
}

impl ForceTerm for ManyBodyRepulsion {
    fn accumulate(
        &self,
        particles: &[Particle],
        accelerations: &mut [Vec2],
        _rng: &mut dyn RngCore,
    ) {
        let count = particles.len().min(accelerations.len());
        for i in 0..count {
            for j in (i + 1)..count {
                let delta = particles[i].position - particles[j].position;
                let distance_sq = delta.length_sq();
                let distance = distance_sq.sqrt();
                let direction = if distance > 0.0001 {
                    delta / distance
                } else {
                    fallback_direction(i, j)
                };

                let push = direction * (self.strength / (distance_sq + self.softening));
                accelerations[i] += push;
                accelerations[j] -= push;
            }
        }
    }
}

pub(super) fn fallback_direction(i: usize, j: usize) -> Vec2 {
    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

#[derive(Debug)]
pub struct Integrator {
    terms: Vec<Box<dyn ForceTerm>>,
    damping: f32,
    accelerations: Vec<Vec2>,
}

impl Integrator {
    pub fn new(damping: f32) -> Self {
        Self {
            terms: Vec::new(),
            damping,
            accelerations: Vec::new(),
        }
    }

    pub fn with_term(mut self, term: impl ForceTerm + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn from_params(params: &IntegratorParams) -> Result<Self, ParamsError> {
        params.validate()?;

        let mut integrator = Self::new(params.damping)
            .with_term(Spring {
                stiffness: params.spring,
            })
            .with_term(Jitter {
                amplitude: params.jitter,
            });
        if params.centering > 0.0 {
            integrator = integrator.with_term(Centering {
                center: Vec2::ZERO,
                strength: params.centering,
            });
        }
        if params.repulsion > 0.0 {
            integrator = integrator.with_term(ManyBodyRepulsion {
                strength: params.repulsion,
                softening: 620.0,
            });
        }

        Ok(integrator)
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn step(&mut self, store: &mut ParticleStore, rng: &mut dyn RngCore) {
        let count = store.len();
        if count == 0 {
            return;
        }

        self.accelerations.clear();
        self.accelerations.resize(count, Vec2::ZERO);
        for term in &self.terms {
            term.accumulate(store.particles(), &mut self.accelerations, rng);
        }

        for (particle, acceleration) in store
            .particles_mut()
            .iter_mut()
            .zip(self.accelerations.iter())
        {
            particle.velocity = (particle.velocity + *acceleration) * self.damping;
            particle.position += particle.velocity;
        }
    }
}
