//! # Starfield
//!
//! Twinkling pale-yellow stars that change gradient every ten seconds.
//!
//! Run with: `cargo run --example starfield`

use backdrop::prelude::*;

fn main() -> Result<(), RunError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    Backdrop::new()
        .with_title("Starfield")
        .with_particle_type(ParticleType::Stars)
        .with_particle_count(250)
        .with_speed(0.4)
        .with_color(Rgb::from_hex(0xfff4c2))
        .with_gradient_interval(10.0)
        .with_window_size(1600, 900)
        .run()
}
