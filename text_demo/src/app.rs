//! Text overlay demo application
//!
//! A colored cube spins one degree per tick at 30 ticks per second while timed
//! text lines scroll off the top-left corner of the window.

use std::time::{Duration, Instant};

use glfw::{Action, Key, WindowEvent};
use simple_draw_text::foundation::math::{look_at, perspective, rotation, Point3};
use simple_draw_text::prelude::*;

use crate::cube::Cube;
use crate::error::DemoResult;
use crate::overlay_pass::OverlayPass;
use crate::window::Window;

const TICKS_PER_SECOND: u32 = 30;
const FIRST_TICK_DELAY: Duration = Duration::from_millis(10);
const DEGREES_PER_TICK: f32 = 1.0;

// GL objects are released in their Drop impls, so `window` (and its context) goes last
pub struct TextDemoApp {
    cube: Cube,
    overlay_pass: OverlayPass,
    surface: SoftwareSurface,
    text: SimpleDrawText,
    timer: FrameTimer,
    rotation_degrees: f32,
    window: Window,
}

impl TextDemoApp {
    pub fn new(config: TextOverlayConfig) -> DemoResult<Self> {
        config.validate()?;
        let (width, height) = (config.screen_width, config.screen_height);

        log::info!("Creating window...");
        let window = Window::new(
            "Draw simple text...",
            width,
            height,
            i32::try_from(width / 3).unwrap_or(0),
            i32::try_from(height / 3).unwrap_or(0),
        )?;

        let cube = Cube::new()?;
        let overlay_pass = OverlayPass::new()?;
        let (fb_width, fb_height) = window.framebuffer_size();
        let mut text = SimpleDrawText::new(config);
        text.set_screen_size(fb_width, fb_height);

        Ok(Self {
            cube,
            overlay_pass,
            surface: SoftwareSurface::new(fb_width, fb_height),
            text,
            timer: FrameTimer::new(TICKS_PER_SECOND, Instant::now(), FIRST_TICK_DELAY),
            rotation_degrees: 0.0,
            window,
        })
    }

    fn initialize(&mut self) {
        log::info!("Initializing text demo...");

        self.text.add_text("Overlay text demo", LineDuration::Forever);
        for i in 0..10 {
            self.text.add_text(format!("{i}. Hello there :D"), 500 * i);
        }

        let (width, height) = self.window.framebuffer_size();
        self.apply_viewport(width, height);

        unsafe {
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
        }
    }

    /// Scene projection lives on the overlay surface's projection stack, so text
    /// drawing pushes and pops around it exactly as it would on a fixed-function context
    #[allow(clippy::cast_precision_loss)]
    fn apply_viewport(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.text.set_screen_size(width, height);

        let aspect = if height > 0 { width as f32 / height as f32 } else { 1.0 };
        let state = self.surface.state_mut();
        state.set_mode(MatrixMode::Projection);
        state.load_identity();
        state.mult(&perspective(45.0, aspect, 1.0, 50.0));
        state.mult(&look_at(Point3::new(0.0, 0.0, 10.0), Point3::origin(), Vec3::y()));
        state.set_mode(MatrixMode::Modelview);

        unsafe {
            gl::Viewport(
                0,
                0,
                i32::try_from(width).unwrap_or(i32::MAX),
                i32::try_from(height).unwrap_or(i32::MAX),
            );
        }
        log::debug!("Viewport set to {}x{}", width, height);
    }

    pub fn run(&mut self) -> DemoResult<()> {
        self.initialize();
        log::info!("Starting main loop");

        while !self.window.should_close() {
            let wait = self.timer.until_next(Instant::now());
            self.window.wait_events_timeout(wait.as_secs_f64());

            for event in self.window.flush_events() {
                self.handle_event(event);
            }

            if self.timer.poll(Instant::now()) {
                self.rotation_degrees = (self.rotation_degrees + DEGREES_PER_TICK) % 360.0;
                self.render_frame();
            }
        }

        log::info!(
            "Text demo finished after {} ticks ({:.1} ticks/s)",
            self.timer.tick_count(),
            self.timer.average_rate(Instant::now())
        );
        Ok(())
    }

    fn handle_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                log::info!("Escape pressed, closing");
                self.window.set_should_close(true);
            }
            WindowEvent::FramebufferSize(width, height) if width > 0 && height > 0 => {
                self.apply_viewport(width.unsigned_abs(), height.unsigned_abs());
            }
            _ => {}
        }
    }

    fn render_frame(&mut self) {
        let state = self.surface.state_mut();
        state.load_identity();
        state.mult(&rotation(self.rotation_degrees, Vec3::new(1.0, 1.0, 0.0)));
        let mvp = state.model_view_projection();

        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
        self.cube.draw(&mvp);

        self.surface.clear(Color::BLACK, 0.0);
        self.text.draw_text(&mut self.surface, "Hello", 250, 550, Color::RED);
        self.text.render(&mut self.surface);
        if let Some(err) = self.surface.take_error() {
            log::error!("Overlay left the matrix stacks unbalanced: {}", err);
        }
        self.overlay_pass.draw(&self.surface);

        self.window.swap_buffers();
    }
}
