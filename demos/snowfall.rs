//! # Snowfall
//!
//! Slow, dense snowflakes over the default gradient cycle.
//!
//! Run with: `cargo run --example snowfall`

use backdrop::prelude::*;

fn main() -> Result<(), RunError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    Backdrop::new()
        .with_title("Snowfall")
        .with_particle_type(ParticleType::Snowflakes)
        .with_particle_count(400)
        .with_speed(0.6)
        .with_opacity(0.9)
        .with_color(Rgb::WHITE)
        .run()
}
