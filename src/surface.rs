//! Drawing surfaces that particles render onto.
//!
//! Particles only ever need four primitives: clear, filled circles, filled
//! polygons and stroked line segments. Anything that implements [`Surface`]
//! can host a particle field.
//!
//! Two implementations ship with the crate:
//!
//! - [`PixelSurface`] - a small software rasterizer over an [`RgbaImage`].
//!   The windowed host uploads its pixels to the GPU every frame.
//! - [`RecordingSurface`] - keeps a list of [`DrawCommand`]s instead of pixels,
//!   handy for headless inspection and tests.

use glam::Vec2;
use image::{Rgba as Pixel, RgbaImage};

use crate::color::Rgba;

/// A 2D drawing target in surface space (x right, y down, one unit per pixel).
pub trait Surface {
    /// Width and height of the drawable area.
    fn size(&self) -> Vec2;

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Fill a closed polygon using the even-odd rule.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);

    /// Stroke a straight segment with butt caps.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// Software rasterizer backed by an 8-bit RGBA image with straight alpha.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    image: RgbaImage,
}

impl PixelSurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Reallocate to a new size. Existing pixels are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Read a single pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Pixel range covered by a bounding box, clipped to the image.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(w as f32 - 1.0);
        let y1 = max.y.ceil().min(h as f32 - 1.0);
        if !(x0 <= x1 && y0 <= y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Source-over blend of `color` scaled by `coverage` into one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let src_a = color.a * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let dst_a = dst.0[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let mix = |s: u8, d: u8| {
            let c = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        *dst = Pixel([
            mix(color.r, dst.0[0]),
            mix(color.g, dst.0[1]),
            mix(color.b, dst.0[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.image.width() as f32, self.image.height() as f32)
    }

    fn clear(&mut self) {
        self.image.fill(0);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if !(radius > 0.0) {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(center - reach, center + reach) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let pixel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = radius + 0.5 - pixel.distance(center);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = points
            .iter()
            .fold((points[0], points[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };
        const SAMPLES: [Vec2; 4] = [
            Vec2::new(0.25, 0.25),
            Vec2::new(0.75, 0.25),
            Vec2::new(0.25, 0.75),
            Vec2::new(0.75, 0.75),
        ];
        for y in y0..=y1 {
            for x in x0..=x1 {
                let origin = Vec2::new(x as f32, y as f32);
                let hits = SAMPLES
                    .iter()
                    .filter(|s| contains_point(points, origin + **s))
                    .count();
                if hits > 0 {
                    self.blend(x, y, color, hits as f32 / SAMPLES.len() as f32);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let segment = to - from;
        let length_sq = segment.length_squared();
        if length_sq <= f32::EPSILON || !(width > 0.0) {
            return;
        }
        let half = width * 0.5;
        let reach = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(from.min(to) - reach, from.max(to) + reach) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let pixel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = (pixel - from).dot(segment) / length_sq;
                if !(0.0..=1.0).contains(&t) {
                    continue;
                }
                let distance = pixel.distance(from + segment * t);
                let coverage = half + 0.5 - distance;
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

/// Even-odd point-in-polygon test.
fn contains_point(points: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A drawing operation captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
}

/// A surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Everything drawn since the last [`take`](Self::take).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
