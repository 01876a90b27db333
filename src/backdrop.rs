//! Backdrop builder and windowed runner

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::color::Rgb;
use crate::error::RunError;
use crate::field::{FieldConfig, ParticleField};
use crate::gpu::{BackgroundUniforms, GpuState};
use crate::gradient::{GradientCycle, DEFAULT_CHANGE_INTERVAL};
use crate::input::{Input, KeyCode};
use crate::particle::ParticleType;
use crate::render_loop::RenderLoop;
use crate::surface::PixelSurface;

/// Upper bound for the particle count keys.
pub const MAX_PARTICLES: usize = 1000;
const COUNT_STEP: usize = 50;
const SPEED_RANGE: (f32, f32) = (0.2, 2.0);
const OPACITY_RANGE: (f32, f32) = (0.1, 1.0);

/// Seconds between window title FPS refreshes.
const TITLE_REFRESH: f32 = 0.5;

/// A backdrop window builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
#[derive(Debug, Clone)]
pub struct Backdrop {
    config: FieldConfig,
    seed: Option<u64>,
    gradient_interval: f32,
    title: String,
    window_size: (u32, u32),
}

impl Backdrop {
    /// Create a backdrop with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            seed: None,
            gradient_interval: DEFAULT_CHANGE_INTERVAL,
            title: "Backdrop".to_string(),
            window_size: (1280, 720),
        }
    }

    /// Set the particle type.
    pub fn with_particle_type(mut self, particle_type: ParticleType) -> Self {
        self.config.particle_type = particle_type;
        self
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config.count = count;
        self
    }

    /// Set the speed multiplier (1.0 is normal speed).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.config.speed = speed.max(0.0);
        self
    }

    /// Set the global opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.config.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the particle color.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.config.color = color;
        self
    }

    /// Seed the random generators so runs are repeatable.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seconds between automatic gradient changes.
    pub fn with_gradient_interval(mut self, seconds: f32) -> Self {
        self.gradient_interval = seconds;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Build the frame driver for a surface of the given size.
    ///
    /// This is what [`run`](Self::run) uses internally; it is public for
    /// hosts that present frames some other way.
    pub fn render_loop(&self, width: f32, height: f32) -> RenderLoop {
        let config = self.config.clone();
        match self.seed {
            Some(seed) => RenderLoop::new(
                ParticleField::with_seed(config, width, height, seed),
                GradientCycle::with_seed(self.gradient_interval, seed.wrapping_add(1)),
            ),
            None => RenderLoop::new(
                ParticleField::new(config, width, height),
                GradientCycle::new(self.gradient_interval),
            ),
        }
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        info!(
            particle_type = %self.config.particle_type,
            count = self.config.count,
            "starting backdrop"
        );

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

/// What the host should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    Continue,
    Quit,
}

/// Apply one key binding to the running backdrop.
pub(crate) fn apply_key(render_loop: &mut RenderLoop, key: KeyCode) -> Control {
    match key {
        KeyCode::Escape => return Control::Quit,
        KeyCode::G => render_loop.change_gradient(),
        KeyCode::R => {
            render_loop.randomize_all();
            debug!(config = ?render_loop.field().config(), "randomized");
        }
        KeyCode::Space => {
            let active = render_loop.field_mut().toggle_active();
            debug!(active, "toggled particles");
        }
        KeyCode::C => {
            let field = render_loop.field_mut();
            field.randomize_color();
            debug!(color = %field.config().color, "new particle color");
        }
        KeyCode::Key1 | KeyCode::Key2 | KeyCode::Key3 | KeyCode::Key4 | KeyCode::Key5 => {
            let particle_type = match key {
                KeyCode::Key1 => ParticleType::Bubbles,
                KeyCode::Key2 => ParticleType::Stars,
                KeyCode::Key3 => ParticleType::Lines,
                KeyCode::Key4 => ParticleType::Snowflakes,
                _ => ParticleType::Mixed,
            };
            render_loop.field_mut().set_type(particle_type);
            debug!(%particle_type, "particle type");
        }
        KeyCode::Up | KeyCode::Down => {
            let field = render_loop.field_mut();
            let count = field.config().count;
            let count = if key == KeyCode::Up {
                (count + COUNT_STEP).min(MAX_PARTICLES)
            } else {
                count.saturating_sub(COUNT_STEP)
            };
            field.set_count(count);
            debug!(count, "particle count");
        }
        KeyCode::Right | KeyCode::Left => {
            let field = render_loop.field_mut();
            let step = if key == KeyCode::Right { 0.1 } else { -0.1 };
            let speed = step_tenth(field.config().speed, step, SPEED_RANGE);
            field.set_speed(speed);
            debug!(speed, "particle speed");
        }
        KeyCode::W | KeyCode::S => {
            let field = render_loop.field_mut();
            let step = if key == KeyCode::W { 0.1 } else { -0.1 };
            let opacity = step_tenth(field.config().opacity, step, OPACITY_RANGE);
            field.set_opacity(opacity);
            debug!(opacity, "particle opacity");
        }
    }
    Control::Continue
}

fn step_tenth(value: f32, step: f32, (min, max): (f32, f32)) -> f32 {
    (((value + step) * 10.0).round() / 10.0).clamp(min, max)
}

struct Running {
    window: Arc<Window>,
    gpu: GpuState,
    render_loop: RenderLoop,
    pixels: PixelSurface,
    last_title_update: f32,
}

struct App {
    settings: Backdrop,
    input: Input,
    running: Option<Running>,
    error: Option<RunError>,
}

impl App {
    fn new(settings: Backdrop) -> Self {
        Self {
            settings,
            input: Input::new(),
            running: None,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let (width, height) = self.settings.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(window.clone()))?;

        let size = window.inner_size();
        let render_loop = self
            .settings
            .render_loop(size.width as f32, size.height as f32);
        let pixels = PixelSurface::new(size.width, size.height);

        info!(width = size.width, height = size.height, "window ready");
        window.request_redraw();

        self.running = Some(Running {
            window,
            gpu,
            render_loop,
            pixels,
            last_title_update: 0.0,
        });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: RunError) {
        error!(error = %e, "backdrop stopped");
        self.error = Some(e);
        event_loop.exit();
    }
}

impl Running {
    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.gpu.resize(size);
        self.pixels.resize(size.width, size.height);
        self.render_loop
            .field_mut()
            .resize(size.width as f32, size.height as f32);
        self.window.request_redraw();
    }

    /// Render one frame. Returns false when rendering cannot continue.
    fn redraw(&mut self, input: &mut Input, title: &str) -> bool {
        let keys: Vec<KeyCode> = input.pressed_keys().collect();
        input.begin_frame();
        for key in keys {
            if apply_key(&mut self.render_loop, key) == Control::Quit {
                return false;
            }
        }

        if self.pixels.width() == 0 || self.pixels.height() == 0 {
            return true;
        }

        self.render_loop.field_mut().set_pointer(input.pointer());
        self.render_loop.frame(&mut self.pixels);
        self.gpu.upload(&self.pixels);

        let background = self.render_loop.background();
        let uniforms = BackgroundUniforms::new(
            background.current(),
            background.offset(),
            self.gpu.config.width,
            self.gpu.config.height,
        );

        match self.gpu.render(&uniforms) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.gpu.resize(PhysicalSize {
                    width: self.gpu.config.width,
                    height: self.gpu.config.height,
                });
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                return false;
            }
            Err(e) => warn!(error = %e, "dropped frame"),
        }

        let time = self.render_loop.time();
        if time.elapsed() - self.last_title_update >= TITLE_REFRESH {
            self.last_title_update = time.elapsed();
            self.window
                .set_title(&format!("{} - {:.0} FPS", title, time.fps()));
        }

        self.window.request_redraw();
        true
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_none() {
            if let Err(e) = self.start(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        let Some(running) = &mut self.running else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                running.resize(physical_size);
            }
            WindowEvent::RedrawRequested => {
                if !running.redraw(&mut self.input, &self.settings.title) {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}
