//! Cursor particle trail.
//!
//! Pointer movement spawns short-lived particles up to a fixed cap; each
//! animation frame drops the dead ones and steps the rest. There is no
//! recycling of the oldest particle: once the cap is reached, spawning simply
//! stops until particles expire.

use fastrand::Rng;

const LIFE_DECAY: f64 = 0.02;
const SIZE_DECAY: f64 = 0.95;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: f64,
}

impl Particle {
    /// A fresh particle at `(x, y)` with random size in `[1, 4)` and velocity
    /// components in `[-1, 1)`.
    pub fn spawn(x: f64, y: f64, rng: &mut Rng) -> Self {
        Self {
            x,
            y,
            size: rng.f64() * 3.0 + 1.0,
            vx: rng.f64() * 2.0 - 1.0,
            vy: rng.f64() * 2.0 - 1.0,
            life: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= LIFE_DECAY;
        self.size *= SIZE_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug)]
pub struct Trail {
    particles: Vec<Particle>,
    cap: usize,
    rng: Rng,
}

impl Trail {
    pub fn new(cap: usize, rng: Rng) -> Self {
        Self {
            particles: Vec::with_capacity(cap),
            cap,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawn at the pointer unless the cap is reached. Returns whether a
    /// particle was added.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        if self.particles.len() >= self.cap {
            return false;
        }
        self.particles.push(Particle::spawn(x, y, &mut self.rng));
        true
    }

    /// One animation frame: drop dead particles, then step the survivors.
    /// The returned slice is what to paint this frame.
    pub fn frame(&mut self) -> &[Particle] {
        self.particles.retain(Particle::is_alive);
        for p in &mut self.particles {
            p.update();
        }
        &self.particles
    }
}

/// CSS fill for a particle: fixed hue, opacity equal to remaining life.
pub fn fill_style(rgb: [u8; 3], life: f64) -> String {
    let [r, g, b] = rgb;
    format!("rgba({r}, {g}, {b}, {life})")
}
