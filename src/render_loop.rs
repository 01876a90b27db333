//! Per-frame driver.
//!
//! A [`RenderLoop`] owns everything that changes from frame to frame: the
//! particle field, the background gradient cycle and the frame clock. Each
//! frame it advances the background, clears the surface and ticks the field.
//! The loop never pauses itself; `active` only gates the particles.

use crate::field::{FieldConfig, ParticleField};
use crate::gradient::GradientCycle;
use crate::surface::Surface;
use crate::time::Time;

#[derive(Debug, Clone)]
pub struct RenderLoop {
    field: ParticleField,
    background: GradientCycle,
    time: Time,
}

impl RenderLoop {
    pub fn new(field: ParticleField, background: GradientCycle) -> Self {
        Self {
            field,
            background,
            time: Time::new(),
        }
    }

    /// A loop over a default field and the built-in gradient presets.
    pub fn with_config(config: FieldConfig, width: f32, height: f32) -> Self {
        Self::new(ParticleField::new(config, width, height), GradientCycle::default())
    }

    /// Run one frame using wall-clock time since the previous frame.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        let (_, delta) = self.time.update();
        self.step(delta, surface);
    }

    /// Run one frame with an explicit time step in seconds.
    ///
    /// Returns true if the background switched to a new gradient.
    pub fn step(&mut self, delta: f32, surface: &mut impl Surface) -> bool {
        let changed = self
            .background
            .advance(delta, self.field.config().speed);
        surface.clear();
        self.field.tick(surface);
        changed
    }

    /// Switch to a random gradient now.
    pub fn change_gradient(&mut self) {
        self.background.shuffle();
    }

    /// New gradient plus randomized particle settings.
    pub fn randomize_all(&mut self) {
        self.change_gradient();
        self.field.randomize();
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn background(&self) -> &GradientCycle {
        &self.background
    }

    pub fn time(&self) -> &Time {
        &self.time
    }
}
