//! # Backdrop
//!
//! Animated gradient backgrounds with an interactive particle field.
//!
//! A backdrop is a slowly drifting two-stop gradient that switches to a new
//! preset every thirty seconds, with a layer of falling particles on top:
//! bubbles, twinkling stars, streaking lines, rotating snowflakes, or a mix.
//! Particles drift away from the pointer and respawn above the top edge when
//! they leave the screen.
//!
//! ## Quick Start
//!
//! ```ignore
//! use backdrop::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Backdrop::new()
//!         .with_particle_type(ParticleType::Snowflakes)
//!         .with_particle_count(200)
//!         .with_color("#a1c4fd".parse().unwrap())
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] has a position, size, fall speed, heading, opacity and a
//! [`Shape`] carrying the data only its kind needs (star points, snowflake
//! branches, line width). Every particle falls, sways sideways and is pushed
//! away from the pointer; the per-kind part of the update is a `match` on the
//! shape.
//!
//! ### The field
//!
//! [`ParticleField`] owns the particles and a [`FieldConfig`]. Hosts only go
//! through its setters (`set_count`, `set_speed`, `set_opacity`, `set_color`,
//! `set_type`, `set_pointer`) and call `tick` once per frame.
//!
//! ### Surfaces
//!
//! Particles draw through the [`Surface`] trait. [`PixelSurface`] rasterizes
//! into an RGBA image; [`RecordingSurface`] records draw calls, which is what
//! most tests use.
//!
//! ### Running headless
//!
//! [`RenderLoop`] bundles the field, the [`GradientCycle`] and a frame clock.
//! It does not need a window:
//!
//! ```ignore
//! let mut frames = Backdrop::new().with_seed(1).render_loop(640.0, 360.0);
//! let mut pixels = PixelSurface::new(640, 360);
//! frames.step(1.0 / 60.0, &mut pixels);
//! ```
//!
//! ## Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `G` | New gradient |
//! | `R` | Randomize everything |
//! | `Space` | Toggle particles |
//! | `C` | Random particle color |
//! | `1`-`5` | Bubbles, stars, lines, snowflakes, mixed |
//! | `Up` / `Down` | Particle count ±50 |
//! | `Right` / `Left` | Speed ±0.1 |
//! | `W` / `S` | Opacity ±0.1 |
//! | `Esc` | Quit |

mod backdrop;
pub mod color;
pub mod error;
pub mod field;
pub mod gpu;
pub mod gradient;
pub mod input;
pub mod particle;
pub mod render_loop;
pub mod surface;
pub mod time;

pub use backdrop::{Backdrop, MAX_PARTICLES};
pub use color::{Rgb, Rgba};
pub use error::{ColorParseError, GpuError, ParseParticleTypeError, RunError};
pub use field::{FieldConfig, ParticleField};
pub use glam::Vec2;
pub use gradient::{GradientCycle, LinearGradient, PRESETS};
pub use particle::{Particle, ParticleKind, ParticleType, Shape};
pub use render_loop::RenderLoop;
pub use surface::{DrawCommand, PixelSurface, RecordingSurface, Surface};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use backdrop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::Backdrop;
    pub use crate::color::{Rgb, Rgba};
    pub use crate::error::RunError;
    pub use crate::field::{FieldConfig, ParticleField};
    pub use crate::gradient::{GradientCycle, LinearGradient};
    pub use crate::particle::{ParticleKind, ParticleType};
    pub use crate::render_loop::RenderLoop;
    pub use crate::surface::{PixelSurface, RecordingSurface, Surface};
    pub use crate::time::Time;
    pub use crate::Vec2;
}
