use std::process::ExitCode;

use backdrop::{Backdrop, ParticleType, MAX_PARTICLES};
use tracing::error;

const USAGE: &str = "usage: backdrop [bubbles|stars|lines|snowflakes|mixed] [count]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let mut settings = Backdrop::new();

    if let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        match arg.parse::<ParticleType>() {
            Ok(particle_type) => settings = settings.with_particle_type(particle_type),
            Err(e) => {
                error!("{e}");
                eprintln!("{USAGE}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(arg) = args.next() {
        match arg.parse::<usize>() {
            Ok(count) => settings = settings.with_particle_count(count.min(MAX_PARTICLES)),
            Err(e) => {
                error!("invalid particle count '{arg}': {e}");
                eprintln!("{USAGE}");
                return ExitCode::FAILURE;
            }
        }
    }

    match settings.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
