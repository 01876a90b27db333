//! The particle field: the particle collection plus its shared configuration.
//!
//! The host never touches particles directly. It changes settings through the
//! setters on [`ParticleField`] and calls [`ParticleField::tick`] once per frame.
//!
//! # Example
//!
//! ```ignore
//! let mut field = ParticleField::new(FieldConfig::default(), 1280.0, 720.0);
//! field.set_type(ParticleType::Snowflakes);
//! field.set_pointer(Some(Vec2::new(640.0, 360.0)));
//!
//! let mut surface = PixelSurface::new(1280, 720);
//! surface.clear();
//! field.tick(&mut surface);
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::color::Rgb;
use crate::particle::{Particle, ParticleType};
use crate::surface::Surface;

/// Settings shared by every particle in a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub particle_type: ParticleType,
    /// Target number of particles.
    pub count: usize,
    /// Multiplier on all motion. 1.0 is normal speed.
    pub speed: f32,
    /// Upper bound of per-particle opacity, in `[0, 1]`.
    pub opacity: f32,
    pub color: Rgb,
    /// When false the field is neither updated nor drawn.
    pub active: bool,
    /// Pointer or touch position, `None` when nothing is engaged.
    pub pointer: Option<Vec2>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_type: ParticleType::Bubbles,
            count: 150,
            speed: 1.0,
            opacity: 0.7,
            color: Rgb::WHITE,
            active: true,
            pointer: None,
        }
    }
}

/// Owns the particles and drives them each frame.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    config: FieldConfig,
    bounds: Vec2,
    rng: SmallRng,
}

impl ParticleField {
    /// Create a field on a surface of the given size and populate it.
    pub fn new(config: FieldConfig, width: f32, height: f32) -> Self {
        Self::with_rng(config, width, height, SmallRng::from_entropy())
    }

    /// Like [`new`](Self::new) but with a fixed seed, so runs are repeatable.
    pub fn with_seed(config: FieldConfig, width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(config, width, height, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, width: f32, height: f32, rng: SmallRng) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(config.count),
            config,
            bounds: Vec2::new(width.max(0.0), height.max(0.0)),
            rng,
        };
        field.initialize();
        field
    }

    fn spawn_one(&mut self) -> Particle {
        let kind = self.config.particle_type.resolve(&mut self.rng);
        Particle::spawn(kind, &self.config, self.bounds, &mut self.rng)
    }

    /// Discard every particle and create `config.count` fresh ones.
    pub fn initialize(&mut self) {
        self.particles.clear();
        self.grow_to(self.config.count);
    }

    fn grow_to(&mut self, count: usize) {
        self.particles.reserve(count.saturating_sub(self.particles.len()));
        while self.particles.len() < count {
            let particle = self.spawn_one();
            self.particles.push(particle);
        }
    }

    /// Grow by appending new particles, or shrink by dropping the tail.
    pub fn set_count(&mut self, count: usize) {
        self.config.count = count;
        if count > self.particles.len() {
            self.grow_to(count);
        } else {
            self.particles.truncate(count);
        }
    }

    /// Set the motion multiplier. Negative values clamp to zero and
    /// non-finite values are ignored. Particles pick it up on their next update.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.config.speed = speed.max(0.0);
        }
    }

    /// Set the global opacity and re-roll every particle's jittered opacity.
    ///
    /// Each particle gets a fresh random value in `[0.2 × opacity, opacity]`
    /// rather than being scaled, so repeating the same value still shuffles
    /// brightness.
    pub fn set_opacity(&mut self, opacity: f32) {
        if !opacity.is_finite() {
            return;
        }
        self.config.opacity = opacity.clamp(0.0, 1.0);
        for particle in &mut self.particles {
            particle.apply_opacity(&self.config, &mut self.rng);
        }
    }

    /// Set the base color. Each particle keeps its current opacity.
    pub fn set_color(&mut self, color: Rgb) {
        self.config.color = color;
        for particle in &mut self.particles {
            particle.color = color.with_alpha(particle.opacity);
        }
    }

    /// Change the particle type. This rebuilds the whole field.
    pub fn set_type(&mut self, particle_type: ParticleType) {
        self.config.particle_type = particle_type;
        self.initialize();
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.config.pointer = pointer;
    }

    pub fn set_active(&mut self, active: bool) {
        self.config.active = active;
    }

    /// Flip the active flag and return the new value.
    pub fn toggle_active(&mut self) -> bool {
        self.config.active = !self.config.active;
        self.config.active
    }

    /// Update the surface size. Existing particles stay where they are; the
    /// new size applies to bounds checks and future spawns.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
    }

    /// Pick a new random color for every particle.
    pub fn randomize_color(&mut self) {
        let color = Rgb::random(&mut self.rng);
        self.set_color(color);
    }

    /// Randomize type, count, speed, opacity and color, then rebuild.
    pub fn randomize(&mut self) {
        let rng = &mut self.rng;
        self.config.particle_type = ParticleType::ALL[rng.gen_range(0..ParticleType::ALL.len())];
        self.config.count = rng.gen_range(100..500);
        self.config.speed = round_tenth(rng.gen_range(0.2..=2.0));
        self.config.opacity = round_tenth(rng.gen_range(0.2..=1.0));
        self.config.color = Rgb::random(rng);
        self.initialize();
    }

    /// Advance and draw every particle once, in collection order.
    pub fn tick(&mut self, surface: &mut impl Surface) {
        if !self.config.active {
            return;
        }
        for particle in &mut self.particles {
            particle.update(&self.config, self.bounds, &mut self.rng);
            particle.draw(surface);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.config.active
    }
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
