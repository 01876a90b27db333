//! Individual particles: spawning, motion, recycling and drawing.
//!
//! Every particle is one of four kinds. The kind-specific state lives in the
//! [`Shape`] enum so motion and drawing are a single `match` each:
//!
//! | Kind | Size | Fall speed | Extra |
//! |------|------|------------|-------|
//! | Bubble | 2-6 | 0.1-0.6 | angular drift ±0.25 |
//! | Star | 1-4 | 0.2-1.0 | 5-8 points, inner radius 0.4×size, spin ±0.01 |
//! | Line | 10-40 | 0.5-1.5 | stroke width 1-3 |
//! | Snowflake | 4-12 | 0.1-0.4 | 4-7 branches, spin ±0.005 |
//!
//! Particles fall in from just above the surface, sway sideways on a sine of
//! their `angle`, get pushed away from the pointer, and respawn at the top
//! once they leave the surface.

use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::{Affine2, Vec2};
use rand::Rng;

use crate::color::Rgba;
use crate::error::ParseParticleTypeError;
use crate::field::FieldConfig;
use crate::surface::Surface;

/// Pointer influence radius in surface units.
pub const REPEL_RADIUS: f32 = 150.0;

/// Distance over which repulsion force grows by one unit.
const REPEL_FALLOFF: f32 = 50.0;

/// How far outside the surface a particle may wander before it respawns.
pub const RESPAWN_MARGIN: f32 = 20.0;

/// The concrete kind of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Bubble,
    Star,
    Line,
    Snowflake,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 4] = [
        ParticleKind::Bubble,
        ParticleKind::Star,
        ParticleKind::Line,
        ParticleKind::Snowflake,
    ];

    /// Pick one of the four kinds uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Peak sideways sway per tick at speed 1.0.
    fn sway(self) -> f32 {
        match self {
            ParticleKind::Bubble => 0.5,
            ParticleKind::Star => 0.8,
            ParticleKind::Line => 1.5,
            ParticleKind::Snowflake => 0.3,
        }
    }
}

/// Field-level particle selection: one kind for everything, or a random mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleType {
    #[default]
    Bubbles,
    Stars,
    Lines,
    Snowflakes,
    /// Every particle independently picks one of the four kinds when created.
    Mixed,
}

impl ParticleType {
    pub const ALL: [ParticleType; 5] = [
        ParticleType::Bubbles,
        ParticleType::Stars,
        ParticleType::Lines,
        ParticleType::Snowflakes,
        ParticleType::Mixed,
    ];

    /// The concrete kind a new particle of this type gets.
    pub fn resolve(self, rng: &mut impl Rng) -> ParticleKind {
        match self {
            ParticleType::Bubbles => ParticleKind::Bubble,
            ParticleType::Stars => ParticleKind::Star,
            ParticleType::Lines => ParticleKind::Line,
            ParticleType::Snowflakes => ParticleKind::Snowflake,
            ParticleType::Mixed => ParticleKind::random(rng),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParticleType::Bubbles => "bubbles",
            ParticleType::Stars => "stars",
            ParticleType::Lines => "lines",
            ParticleType::Snowflakes => "snowflakes",
            ParticleType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParticleType {
    type Err = ParseParticleTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ParticleType::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ParseParticleTypeError(s.to_string()))
    }
}

impl From<ParticleKind> for ParticleType {
    fn from(kind: ParticleKind) -> Self {
        match kind {
            ParticleKind::Bubble => ParticleType::Bubbles,
            ParticleKind::Star => ParticleType::Stars,
            ParticleKind::Line => ParticleType::Lines,
            ParticleKind::Snowflake => ParticleType::Snowflakes,
        }
    }
}

/// Kind-specific particle state.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Bubble {
        /// Added to `angle` every tick.
        drift: f32,
    },
    Star {
        points: u32,
        inner_radius: f32,
        rotation: f32,
        rotation_speed: f32,
        drift: f32,
    },
    Line {
        line_width: f32,
    },
    Snowflake {
        branches: u32,
        rotation: f32,
        rotation_speed: f32,
    },
}

/// A single animated element of the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Center in surface space.
    pub position: Vec2,
    pub size: f32,
    /// Fall distance per tick at speed 1.0.
    pub speed: f32,
    /// Phase of the sideways sway. Lines are also drawn along it.
    pub angle: f32,
    pub opacity: f32,
    /// Base color with `opacity` applied.
    pub color: Rgba,
    pub shape: Shape,
}

/// A jittered per-particle opacity in `[0.2 × global, global]`.
pub fn jitter_opacity(global: f32, rng: &mut impl Rng) -> f32 {
    global * rng.gen_range(0.2..=1.0)
}

/// Displacement applied to a particle at `position` by a pointer at `pointer`.
///
/// Zero outside [`REPEL_RADIUS`] and when the two points coincide.
pub fn pointer_repulsion(position: Vec2, pointer: Vec2, speed_multiplier: f32) -> Vec2 {
    let toward = pointer - position;
    let distance = toward.length();
    if distance >= REPEL_RADIUS || distance <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let force = (REPEL_RADIUS - distance) / REPEL_FALLOFF;
    -(toward / distance) * force * speed_multiplier * 0.5
}

impl Particle {
    /// Create a particle of `kind` just above a surface of size `bounds`.
    pub fn spawn(kind: ParticleKind, config: &FieldConfig, bounds: Vec2, rng: &mut impl Rng) -> Self {
        let (size, speed, shape) = match kind {
            ParticleKind::Bubble => (
                rng.gen_range(2.0..=6.0),
                rng.gen_range(0.1..=0.6),
                Shape::Bubble {
                    drift: rng.gen_range(-0.25..=0.25),
                },
            ),
            ParticleKind::Star => {
                let size = rng.gen_range(1.0..=4.0);
                let speed = rng.gen_range(0.2..=1.0);
                let shape = Shape::Star {
                    points: rng.gen_range(5..=8),
                    inner_radius: size * 0.4,
                    rotation: rng.gen_range(0.0..TAU),
                    rotation_speed: rng.gen_range(-0.01..=0.01),
                    drift: rng.gen_range(-0.25..=0.25),
                };
                (size, speed, shape)
            }
            ParticleKind::Line => (
                rng.gen_range(10.0..=40.0),
                rng.gen_range(0.5..=1.5),
                Shape::Line {
                    line_width: rng.gen_range(1.0..=3.0),
                },
            ),
            ParticleKind::Snowflake => (
                rng.gen_range(4.0..=12.0),
                rng.gen_range(0.1..=0.4),
                Shape::Snowflake {
                    branches: rng.gen_range(4..=7),
                    rotation: rng.gen_range(0.0..TAU),
                    rotation_speed: rng.gen_range(-0.005..=0.005),
                },
            ),
        };

        let x = if bounds.x > 0.0 {
            rng.gen_range(0.0..bounds.x)
        } else {
            0.0
        };
        let y = -RESPAWN_MARGIN - rng.gen_range(0.0..=50.0);
        let opacity = jitter_opacity(config.opacity, rng);

        Self {
            position: Vec2::new(x, y),
            size,
            speed,
            angle: rng.gen_range(0.0..TAU),
            opacity,
            color: config.color.with_alpha(opacity),
            shape,
        }
    }

    pub fn kind(&self) -> ParticleKind {
        match self.shape {
            Shape::Bubble { .. } => ParticleKind::Bubble,
            Shape::Star { .. } => ParticleKind::Star,
            Shape::Line { .. } => ParticleKind::Line,
            Shape::Snowflake { .. } => ParticleKind::Snowflake,
        }
    }

    /// Whether the particle is far enough outside `bounds` to be recycled.
    /// Nothing is checked above the top edge, that is where particles enter.
    pub fn is_out_of_bounds(&self, bounds: Vec2) -> bool {
        self.position.y > bounds.y + RESPAWN_MARGIN
            || self.position.x < -RESPAWN_MARGIN
            || self.position.x > bounds.x + RESPAWN_MARGIN
    }

    /// Advance one tick.
    pub fn update(&mut self, config: &FieldConfig, bounds: Vec2, rng: &mut impl Rng) {
        let speed = config.speed;
        self.position.y += self.speed * speed;
        self.position.x += self.angle.sin() * self.kind().sway() * speed;

        match &mut self.shape {
            Shape::Bubble { drift } => {
                self.angle += *drift * speed;
            }
            Shape::Star {
                drift,
                rotation,
                rotation_speed,
                ..
            } => {
                self.angle += *drift * speed;
                *rotation += *rotation_speed * speed;
            }
            Shape::Line { .. } => {
                self.angle += rng.gen_range(-0.025..0.025) * speed;
            }
            Shape::Snowflake {
                rotation,
                rotation_speed,
                ..
            } => {
                self.angle += rng.gen_range(-0.01..0.01) * speed;
                *rotation += *rotation_speed * speed;
            }
        }

        if let Some(pointer) = config.pointer {
            self.position += pointer_repulsion(self.position, pointer, speed);
        }

        if self.is_out_of_bounds(bounds) {
            self.reset(config, bounds, rng);
        }
    }

    /// Respawn above the surface with freshly rolled state.
    ///
    /// The kind is kept unless the field is set to [`ParticleType::Mixed`].
    pub fn reset(&mut self, config: &FieldConfig, bounds: Vec2, rng: &mut impl Rng) {
        let kind = match config.particle_type {
            ParticleType::Mixed => ParticleKind::random(rng),
            _ => self.kind(),
        };
        *self = Particle::spawn(kind, config, bounds, rng);
    }

    /// Re-roll opacity from the current global value and recolor.
    pub(crate) fn apply_opacity(&mut self, config: &FieldConfig, rng: &mut impl Rng) {
        self.opacity = jitter_opacity(config.opacity, rng);
        self.color = config.color.with_alpha(self.opacity);
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        match &self.shape {
            Shape::Bubble { .. } => self.draw_bubble(surface),
            Shape::Star {
                points,
                inner_radius,
                rotation,
                ..
            } => self.draw_star(surface, *points, *inner_radius, *rotation),
            Shape::Line { line_width } => self.draw_line(surface, *line_width),
            Shape::Snowflake {
                branches, rotation, ..
            } => self.draw_snowflake(surface, *branches, *rotation),
        }
    }

    fn draw_bubble(&self, surface: &mut impl Surface) {
        surface.fill_circle(self.position, self.size, self.color);

        let highlight = self.position + Vec2::new(self.size * 0.3, -self.size * 0.3);
        surface.fill_circle(
            highlight,
            self.size * 0.2,
            Rgba::new(255, 255, 255, self.opacity * 0.5),
        );
    }

    fn draw_star(&self, surface: &mut impl Surface, points: u32, inner_radius: f32, rotation: f32) {
        let local = Affine2::from_angle_translation(rotation, self.position);
        let vertices: Vec<Vec2> = (0..points * 2)
            .map(|i| {
                let radius = if i % 2 == 0 { self.size } else { inner_radius };
                let theta = i as f32 * PI / points as f32;
                local.transform_point2(Vec2::from_angle(theta) * radius)
            })
            .collect();
        surface.fill_polygon(&vertices, self.color);
    }

    fn draw_line(&self, surface: &mut impl Surface, line_width: f32) {
        let local = Affine2::from_angle_translation(self.angle, self.position);
        surface.stroke_line(
            self.position,
            local.transform_point2(Vec2::new(0.0, self.size)),
            line_width,
            self.color,
        );
    }

    fn draw_snowflake(&self, surface: &mut impl Surface, branches: u32, rotation: f32) {
        let size = self.size;
        surface.fill_circle(self.position, size * 0.2, self.color);

        let side_length = size * 0.4;
        for i in 0..branches {
            let theta = rotation + i as f32 * TAU / branches as f32;
            let local = Affine2::from_angle_translation(theta, self.position);
            let at = |x: f32, y: f32| local.transform_point2(Vec2::new(x, y));

            surface.stroke_line(self.position, at(0.0, size), size * 0.15, self.color);

            for j in 1..=2 {
                let along = size * 0.3 * j as f32;
                let tip = along + side_length * 0.3;
                surface.stroke_line(at(0.0, along), at(side_length, tip), size * 0.1, self.color);
                surface.stroke_line(at(0.0, along), at(-side_length, tip), size * 0.1, self.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn config(particle_type: ParticleType) -> FieldConfig {
        FieldConfig {
            particle_type,
            ..FieldConfig::default()
        }
    }

    fn spawn(kind: ParticleKind, rng: &mut SmallRng) -> Particle {
        Particle::spawn(kind, &config(kind.into()), BOUNDS, rng)
    }

    #[test]
    fn test_bubble_ranges() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..500 {
            let p = spawn(ParticleKind::Bubble, &mut rng);
            assert!((2.0..=6.0).contains(&p.size));
            assert!((0.1..=0.6).contains(&p.speed));
            let Shape::Bubble { drift } = p.shape else {
                panic!("expected a bubble");
            };
            assert!((-0.25..=0.25).contains(&drift));
        }
    }

    #[test]
    fn test_star_ranges() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..500 {
            let p = spawn(ParticleKind::Star, &mut rng);
            assert!((1.0..=4.0).contains(&p.size));
            assert!((0.2..=1.0).contains(&p.speed));
            let Shape::Star {
                points,
                inner_radius,
                rotation_speed,
                ..
            } = p.shape
            else {
                panic!("expected a star");
            };
            assert!((5..=8).contains(&points));
            assert!((inner_radius - p.size * 0.4).abs() < 1e-6);
            assert!((-0.01..=0.01).contains(&rotation_speed));
        }
    }

    #[test]
    fn test_line_ranges() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..500 {
            let p = spawn(ParticleKind::Line, &mut rng);
            assert!((10.0..=40.0).contains(&p.size));
            assert!((0.5..=1.5).contains(&p.speed));
            let Shape::Line { line_width } = p.shape else {
                panic!("expected a line");
            };
            assert!((1.0..=3.0).contains(&line_width));
        }
    }

    #[test]
    fn test_snowflake_ranges() {
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..500 {
            let p = spawn(ParticleKind::Snowflake, &mut rng);
            assert!((4.0..=12.0).contains(&p.size));
            assert!((0.1..=0.4).contains(&p.speed));
            let Shape::Snowflake {
                branches,
                rotation_speed,
                ..
            } = p.shape
            else {
                panic!("expected a snowflake");
            };
            assert!((4..=7).contains(&branches));
            assert!((-0.005..=0.005).contains(&rotation_speed));
        }
    }

    #[test]
    fn test_spawn_above_surface() {
        let mut rng = SmallRng::seed_from_u64(5);
        for kind in ParticleKind::ALL {
            for _ in 0..100 {
                let p = spawn(kind, &mut rng);
                assert!(p.position.y <= -20.0 && p.position.y >= -70.0);
                assert!(p.position.x >= 0.0 && p.position.x < BOUNDS.x);
            }
        }
    }

    #[test]
    fn test_spawn_on_zero_width_surface() {
        let mut rng = SmallRng::seed_from_u64(6);
        let p = Particle::spawn(ParticleKind::Bubble, &FieldConfig::default(), Vec2::ZERO, &mut rng);
        assert_eq!(p.position.x, 0.0);
    }

    #[test]
    fn test_opacity_and_color() {
        let mut rng = SmallRng::seed_from_u64(7);
        let config = FieldConfig {
            opacity: 0.5,
            color: Rgb::new(10, 20, 30),
            ..FieldConfig::default()
        };
        for _ in 0..200 {
            let p = Particle::spawn(ParticleKind::Star, &config, BOUNDS, &mut rng);
            assert!(p.opacity >= 0.1 - 1e-6 && p.opacity <= 0.5 + 1e-6);
            assert_eq!(p.color.rgb(), config.color);
            assert_eq!(p.color.a, p.opacity);
        }
    }

    #[test]
    fn test_update_falls_and_sways() {
        let mut rng = SmallRng::seed_from_u64(8);
        let config = config(ParticleType::Bubbles);
        let mut p = Particle::spawn(ParticleKind::Bubble, &config, BOUNDS, &mut rng);
        p.position = Vec2::new(400.0, 300.0);
        p.angle = PI / 2.0;
        let before = p.clone();

        p.update(&config, BOUNDS, &mut rng);

        assert!((p.position.y - (before.position.y + before.speed)).abs() < 1e-4);
        // sin(π/2) = 1, bubble sway amplitude 0.5
        assert!((p.position.x - 400.5).abs() < 1e-4);
    }

    #[test]
    fn test_speed_multiplier_scales_motion() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut config = config(ParticleType::Snowflakes);
        config.speed = 2.0;
        let mut p = Particle::spawn(ParticleKind::Snowflake, &config, BOUNDS, &mut rng);
        p.position = Vec2::new(400.0, 300.0);
        let start_y = p.position.y;

        p.update(&config, BOUNDS, &mut rng);

        assert!((p.position.y - (start_y + p.speed * 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_advances() {
        let mut rng = SmallRng::seed_from_u64(10);
        let config = config(ParticleType::Stars);
        let mut p = Particle::spawn(ParticleKind::Star, &config, BOUNDS, &mut rng);
        p.position = Vec2::new(400.0, 300.0);
        let Shape::Star {
            rotation: before,
            rotation_speed,
            ..
        } = p.shape
        else {
            panic!("expected a star");
        };

        p.update(&config, BOUNDS, &mut rng);

        let Shape::Star { rotation: after, .. } = p.shape else {
            panic!("expected a star");
        };
        assert!((after - (before + rotation_speed)).abs() < 1e-6);
    }

    #[test]
    fn test_leaving_bounds_resets_to_top() {
        let mut rng = SmallRng::seed_from_u64(11);
        for kind in ParticleKind::ALL {
            let config = config(kind.into());
            for start in [
                Vec2::new(400.0, BOUNDS.y + 100.0),
                Vec2::new(-100.0, 300.0),
                Vec2::new(BOUNDS.x + 100.0, 300.0),
            ] {
                let mut p = Particle::spawn(kind, &config, BOUNDS, &mut rng);
                p.position = start;
                p.update(&config, BOUNDS, &mut rng);

                assert!(p.position.y < 0.0);
                assert!(p.position.x >= 0.0 && p.position.x < BOUNDS.x);
                assert_eq!(p.kind(), kind);
            }
        }
    }

    #[test]
    fn test_reset_uses_current_globals() {
        let mut rng = SmallRng::seed_from_u64(12);
        let mut config = config(ParticleType::Lines);
        let mut p = Particle::spawn(ParticleKind::Line, &config, BOUNDS, &mut rng);

        config.opacity = 0.3;
        config.color = Rgb::new(1, 2, 3);
        p.reset(&config, BOUNDS, &mut rng);

        assert!(p.opacity <= 0.3 + 1e-6);
        assert_eq!(p.color.rgb(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_mixed_reset_rerolls_kind() {
        let mut rng = SmallRng::seed_from_u64(13);
        let config = config(ParticleType::Mixed);
        let mut p = Particle::spawn(ParticleKind::Bubble, &config, BOUNDS, &mut rng);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            p.reset(&config, BOUNDS, &mut rng);
            seen.insert(p.kind());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_repulsion_falls_off_with_distance() {
        let pointer = Vec2::new(100.0, 100.0);
        let near = pointer_repulsion(Vec2::new(110.0, 100.0), pointer, 1.0);
        let far = pointer_repulsion(Vec2::new(240.0, 100.0), pointer, 1.0);
        let outside = pointer_repulsion(Vec2::new(251.0, 100.0), pointer, 1.0);

        assert!(near.length() > far.length());
        assert!(far.length() > 0.0);
        assert_eq!(outside, Vec2::ZERO);
        // Pushed away from the pointer
        assert!(near.x > 0.0);
        // (150 - 10) / 50 * 0.5
        assert!((near.length() - 1.4).abs() < 1e-5);
    }

    #[test]
    fn test_repulsion_at_pointer_is_zero() {
        let p = Vec2::new(50.0, 50.0);
        assert_eq!(pointer_repulsion(p, p, 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_update_applies_pointer() {
        let mut rng = SmallRng::seed_from_u64(14);
        let mut config = config(ParticleType::Bubbles);
        let mut free = Particle::spawn(ParticleKind::Bubble, &config, BOUNDS, &mut rng);
        free.position = Vec2::new(400.0, 300.0);
        let mut pushed = free.clone();

        free.update(&config, BOUNDS, &mut rng);
        config.pointer = Some(Vec2::new(400.0, 320.0));
        pushed.update(&config, BOUNDS, &mut rng);

        // Pointer below the particle pushes it up
        assert!(pushed.position.y < free.position.y);
    }

    #[test]
    fn test_draw_bubble() {
        let mut rng = SmallRng::seed_from_u64(15);
        let p = spawn(ParticleKind::Bubble, &mut rng);
        let mut surface = RecordingSurface::new(BOUNDS.x, BOUNDS.y);
        p.draw(&mut surface);

        let commands = surface.take();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            DrawCommand::Circle {
                center: p.position,
                radius: p.size,
                color: p.color,
            }
        );
        let DrawCommand::Circle { radius, color, .. } = commands[1] else {
            panic!("expected highlight circle");
        };
        assert!((radius - p.size * 0.2).abs() < 1e-6);
        assert_eq!(color.rgb(), Rgb::WHITE);
        assert!((color.a - p.opacity * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_draw_star_alternates_radii() {
        let mut rng = SmallRng::seed_from_u64(16);
        let p = spawn(ParticleKind::Star, &mut rng);
        let Shape::Star {
            points,
            inner_radius,
            ..
        } = p.shape
        else {
            panic!("expected a star");
        };
        let mut surface = RecordingSurface::new(BOUNDS.x, BOUNDS.y);
        p.draw(&mut surface);

        let commands = surface.take();
        let DrawCommand::Polygon { points: vertices, .. } = &commands[0] else {
            panic!("expected polygon");
        };
        assert_eq!(vertices.len(), points as usize * 2);
        for (i, v) in vertices.iter().enumerate() {
            let expected = if i % 2 == 0 { p.size } else { inner_radius };
            assert!((v.distance(p.position) - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_draw_line_length() {
        let mut rng = SmallRng::seed_from_u64(17);
        let p = spawn(ParticleKind::Line, &mut rng);
        let mut surface = RecordingSurface::new(BOUNDS.x, BOUNDS.y);
        p.draw(&mut surface);

        let commands = surface.take();
        assert_eq!(commands.len(), 1);
        let DrawCommand::Line { from, to, width, .. } = commands[0] else {
            panic!("expected line");
        };
        assert_eq!(from, p.position);
        assert!((from.distance(to) - p.size).abs() < 1e-3);
        let Shape::Line { line_width } = p.shape else {
            unreachable!()
        };
        assert_eq!(width, line_width);
    }

    #[test]
    fn test_draw_snowflake_strokes() {
        let mut rng = SmallRng::seed_from_u64(18);
        let p = spawn(ParticleKind::Snowflake, &mut rng);
        let Shape::Snowflake { branches, .. } = p.shape else {
            panic!("expected a snowflake");
        };
        let mut surface = RecordingSurface::new(BOUNDS.x, BOUNDS.y);
        p.draw(&mut surface);

        let commands = surface.take();
        // Center dot, then a main stroke and four side strokes per branch
        assert_eq!(commands.len(), 1 + branches as usize * 5);
        assert!(matches!(commands[0], DrawCommand::Circle { .. }));
        let main_strokes = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { from, .. } if *from == p.position))
            .count();
        assert_eq!(main_strokes, branches as usize);
    }

    #[test]
    fn test_particle_type_names() {
        for t in ParticleType::ALL {
            assert_eq!(t.to_string().parse::<ParticleType>().unwrap(), t);
        }
        assert_eq!(" Stars ".parse::<ParticleType>().unwrap(), ParticleType::Stars);
        assert!("sparks".parse::<ParticleType>().is_err());
    }
}
