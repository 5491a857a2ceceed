use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2, vec2};
use rand::{Rng, RngCore};

use super::render_utils::with_alpha;

const STAR_COUNT: usize = 220;
const WRAP_MARGIN: f32 = 20.0;

#[derive(Clone, Debug, PartialEq)]
struct Star {
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    alpha: f32,
}

pub(super) struct Starfield {
    stars: Vec<Star>,
    bounds: Vec2,
}

impl Starfield {
    pub(super) fn new(rng: &mut dyn RngCore) -> Self {
        Self::with_count(rng, STAR_COUNT)
    }

    fn with_count(rng: &mut dyn RngCore, count: usize) -> Self {
        // unit square until the first frame tells us the canvas size
        let stars = (0..count)
            .map(|_| Star {
                position: vec2(rng.random::<f32>(), rng.random::<f32>()),
                velocity: vec2(
                    (rng.random::<f32>() - 0.5) * 0.08,
                    (rng.random::<f32>() - 0.5) * 0.06,
                ),
                radius: rng.random::<f32>() * 0.9 + 0.2,
                alpha: rng.random::<f32>() * 0.35 + 0.1,
            })
            .collect();

        Self {
            stars,
            bounds: Vec2::ZERO,
        }
    }

    fn fit(&mut self, size: Vec2) {
        if self.bounds == size {
            return;
        }
        if self.bounds == Vec2::ZERO {
            for star in &mut self.stars {
                star.position = star.position * size;
            }
        } else if self.bounds.x > 0.0 && self.bounds.y > 0.0 {
            let scale = size / self.bounds;
            for star in &mut self.stars {
                star.position = star.position * scale;
            }
        }
        self.bounds = size;
    }

    pub(super) fn advance(&mut self, size: Vec2) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        self.fit(size);

        let span = size + Vec2::splat(WRAP_MARGIN * 2.0);
        for star in &mut self.stars {
            let shifted = star.position + star.velocity + Vec2::splat(WRAP_MARGIN);
            star.position = vec2(shifted.x.rem_euclid(span.x), shifted.y.rem_euclid(span.y))
                - Vec2::splat(WRAP_MARGIN);
        }
    }

    pub(super) fn draw(&self, painter: &Painter, rect: Rect) {
        let base = Color32::from_rgb(200, 220, 255);
        for star in &self.stars {
            let position: Pos2 = rect.min + star.position;
            if !rect.expand(2.0).contains(position) {
                continue;
            }
            painter.circle_filled(position, star.radius, with_alpha(base, star.alpha));
        }
    }
}
