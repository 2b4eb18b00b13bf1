//! Window management using GLFW
//!
//! Provides cross-platform window creation and event handling for Vulkan.
//! The bootstrap orchestrator talks to the window through the
//! [`WindowProvider`] trait so tests can substitute a fake windowing layer;
//! [`GlfwWindow`] is the production implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing subsystem could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The native window could not be created
    #[error("window creation failed")]
    CreationFailed,

    /// Any other windowing-layer failure
    #[error("windowing error: {0}")]
    Backend(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Window creation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Client-area width in pixels
    pub width: u32,
    /// Client-area height in pixels
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
}

/// Interface the bootstrap requires from the windowing layer
///
/// The provider owns the native window and the windowing subsystem behind
/// it. Dropping the provider destroys the window and then shuts the
/// subsystem down, in that order, which is why the bootstrap keeps the
/// provider alive until after the Vulkan instance has been destroyed.
pub trait WindowProvider: Sized {
    /// Initialize the windowing subsystem and create the window
    fn create(config: &WindowConfig) -> WindowResult<Self>;

    /// Instance extensions the windowing layer needs for presentation
    fn required_instance_extensions(&self) -> WindowResult<Vec<String>>;

    /// Check if the window should close
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Poll for window events
    fn poll_events(&mut self);

    /// Current client-area size in pixels
    fn size(&self) -> (u32, u32);
}

/// GLFW window wrapper with proper resource management
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Drain events received since the last [`WindowProvider::poll_events`]
    pub fn flush_events(&self) -> glfw::FlushedMessages<(f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events)
    }

    /// Current framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width as u32, height as u32)
    }
}

impl WindowProvider for GlfwWindow {
    fn create(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw =
            glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;

        // Configure for Vulkan (no OpenGL context)
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_framebuffer_size_polling(true);

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or_else(|| {
                WindowError::Backend("failed to get required instance extensions".to_string())
            })
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width as u32, height as u32)
    }
}
