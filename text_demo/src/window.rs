//! GLFW window with an OpenGL 3.3 core context

use glfw::Context;

use crate::error::{DemoError, DemoResult};

/// GLFW window wrapper owning the GL context
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Create a window at (`x`, `y`), make its context current and load GL entry points
    pub fn new(title: &str, width: u32, height: u32, x: i32, y: i32) -> DemoResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| DemoError::WindowInit(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::DoubleBuffer(true));
        glfw.window_hint(glfw::WindowHint::DepthBits(Some(24)));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(DemoError::WindowCreation)?;

        window.set_pos(x, y);
        window.make_current();
        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        gl::load_with(|symbol| window.get_proc_address(symbol));

        log::info!("Created {}x{} window with OpenGL 3.3 core context", width, height);

        Ok(Self { glfw, window, events })
    }

    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Block until an event arrives or `timeout_secs` passes
    pub fn wait_events_timeout(&mut self, timeout_secs: f64) {
        self.glfw.wait_events_timeout(timeout_secs);
    }

    pub fn flush_events(&self) -> Vec<glfw::WindowEvent> {
        glfw::flush_messages(&self.events).map(|(_, event)| event).collect()
    }

    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0).unsigned_abs(), height.max(0).unsigned_abs())
    }

    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}
