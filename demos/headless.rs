//! # Headless
//!
//! Runs the backdrop without a window and reports how much of the particle
//! layer gets covered, frame by frame.
//!
//! Run with: `cargo run --example headless -- [frames]`

use backdrop::prelude::*;
use tracing::info;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

fn coverage(pixels: &PixelSurface) -> f32 {
    let covered = pixels
        .as_bytes()
        .chunks_exact(4)
        .filter(|px| px[3] > 0)
        .count();
    covered as f32 / (WIDTH * HEIGHT) as f32
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let frames: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);

    let mut render_loop = Backdrop::new()
        .with_particle_type(ParticleType::Mixed)
        .with_particle_count(300)
        .with_seed(7)
        .render_loop(WIDTH as f32, HEIGHT as f32);
    render_loop
        .field_mut()
        .set_pointer(Some(Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0)));

    let mut pixels = PixelSurface::new(WIDTH, HEIGHT);

    for frame in 0..frames {
        if render_loop.step(1.0 / 60.0, &mut pixels) {
            let gradient = render_loop.background().current();
            info!(frame, start = %gradient.start, end = %gradient.end, "gradient changed");
        }
        if frame % 60 == 0 {
            info!(
                frame,
                coverage_pct = coverage(&pixels) * 100.0,
                "particle layer"
            );
        }
    }
}
