//! Instance bootstrap orchestration
//!
//! Runs the linear bring-up sequence: create the window, snapshot driver
//! capabilities, negotiate validation layers, validate required extensions,
//! create the instance, and register diagnostics. There are no retries;
//! every fatal failure unwinds whatever was already constructed before the
//! error reaches the caller. Teardown is the exact reverse of bring-up.

use ash::vk;
use thiserror::Error;

use crate::capabilities::{
    negotiate_layers, validate_extensions, AvailableCapabilities, MissingExtension,
};
use crate::config::BootstrapConfig;
use crate::driver::{AshDriver, DriverError, GraphicsDriver, InstanceRequest};
use crate::window::{GlfwWindow, WindowError, WindowProvider};

/// The diagnostic layer requested when validation is enabled
pub const VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// The instance extension the diagnostic messenger requires
pub const DEBUG_UTILS_EXTENSION: &str = "VK_EXT_debug_utils";

/// Bootstrap errors, in the order the steps can fail
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Windowing subsystem or window creation failed
    #[error("window initialization failed: {0}")]
    WindowInit(#[from] WindowError),

    /// The Vulkan library could not be loaded
    #[error("driver load failed: {0}")]
    DriverLoad(#[source] DriverError),

    /// The driver could not enumerate its extensions or layers
    #[error("capability query failed: {0}")]
    CapabilityQuery(#[source] DriverError),

    /// A required instance extension is absent from the driver
    #[error(transparent)]
    MissingExtension(#[from] MissingExtension),

    /// The driver rejected instance creation; the native status is preserved
    #[error("instance creation failed: {0}")]
    InstanceCreation(#[source] DriverError),
}

/// A ready instance: the window, the driver handle, and optional diagnostics
///
/// The instance is valid only while the window live at its creation is also
/// live; both are owned here and torn down together. Ownership is single:
/// [`Instance::shutdown`] consumes the value, so a second shutdown cannot be
/// expressed.
pub struct Instance<W: WindowProvider, D: GraphicsDriver> {
    driver: D,
    capabilities: AvailableCapabilities,
    messenger: Option<D::Messenger>,
    handle: Option<D::Instance>,
    window: Option<W>,
}

/// The production instance type: GLFW window, ash driver
pub type VulkanInstance = Instance<GlfwWindow, AshDriver>;

/// Load the Vulkan library and bootstrap with the production window layer
pub fn bootstrap_vulkan(config: &BootstrapConfig) -> Result<VulkanInstance, BootstrapError> {
    let driver = AshDriver::load().map_err(BootstrapError::DriverLoad)?;
    bootstrap::<GlfwWindow, _>(driver, config)
}

/// Bring up a window and a graphics instance from a configuration
///
/// Fatal steps unwind in reverse construction order before returning; the
/// one non-fatal step is diagnostic registration, which degrades to "no
/// diagnostics" with a log line.
pub fn bootstrap<W: WindowProvider, D: GraphicsDriver>(
    driver: D,
    config: &BootstrapConfig,
) -> Result<Instance<W, D>, BootstrapError> {
    log::info!(
        "Creating window {}x{} \"{}\"",
        config.window.width,
        config.window.height,
        config.window.title
    );
    let window = W::create(&config.window)?;

    // The extension request is fixed from here on: whatever presentation
    // needs, plus debug utils when validation is on.
    let mut extensions = window.required_instance_extensions()?;
    if config.validation && !extensions.iter().any(|name| name == DEBUG_UTILS_EXTENSION) {
        extensions.push(DEBUG_UTILS_EXTENSION.to_string());
    }

    let capabilities =
        AvailableCapabilities::query(&driver).map_err(BootstrapError::CapabilityQuery)?;
    for extension in &capabilities.extensions {
        log::debug!("Available instance extension: {}", extension);
    }

    let layers = if config.validation {
        negotiate_layers(&[VALIDATION_LAYER.to_string()], &capabilities.layers)
    } else {
        Vec::new()
    };

    // Mandatory gate: the driver's create call may silently accept an
    // extension list it cannot honor.
    validate_extensions(&extensions, &capabilities.extensions)?;

    let request = InstanceRequest {
        application_name: config.application_name.clone(),
        application_version: config.application_version,
        engine_name: config.engine_name.clone(),
        engine_version: config.engine_version,
        api_version: config.api_version,
        extensions,
        layers,
    };

    let handle = driver
        .create_instance(&request)
        .map_err(BootstrapError::InstanceCreation)?;
    log::info!("Graphics instance created");

    let messenger = if config.validation {
        let severity = vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
            | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR;
        let types = vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE;

        match driver.register_messenger(&handle, severity, types) {
            Ok(messenger) => Some(messenger),
            Err(error) => {
                log::warn!("Diagnostics unavailable, continuing without: {}", error);
                None
            }
        }
    } else {
        None
    };

    Ok(Instance {
        driver,
        capabilities,
        messenger,
        handle: Some(handle),
        window: Some(window),
    })
}

impl<W: WindowProvider, D: GraphicsDriver> Instance<W, D> {
    /// The window this instance presents to
    pub fn window(&self) -> &W {
        self.window.as_ref().unwrap()
    }

    /// Mutable access to the window
    pub fn window_mut(&mut self) -> &mut W {
        self.window.as_mut().unwrap()
    }

    /// The raw driver instance handle
    pub fn handle(&self) -> &D::Instance {
        self.handle.as_ref().unwrap()
    }

    /// The capability snapshot taken during bootstrap
    pub fn capabilities(&self) -> &AvailableCapabilities {
        &self.capabilities
    }

    /// Whether the diagnostic messenger was registered
    pub fn has_diagnostics(&self) -> bool {
        self.messenger.is_some()
    }

    /// Forward of [`WindowProvider::should_close`]
    pub fn should_close(&self) -> bool {
        self.window().should_close()
    }

    /// Forward of [`WindowProvider::poll_events`]
    pub fn poll_events(&mut self) {
        self.window_mut().poll_events();
    }

    /// Tear everything down, in the fixed order
    ///
    /// Consuming `self` makes a second shutdown unrepresentable; the actual
    /// work happens in `Drop` so that an instance abandoned without an
    /// explicit shutdown is still released correctly.
    pub fn shutdown(self) {
        log::info!("Shutting down graphics instance");
    }
}

impl<W: WindowProvider, D: GraphicsDriver> Drop for Instance<W, D> {
    fn drop(&mut self) {
        // Fixed teardown order: messenger, instance, window, windowing
        // subsystem. The window must outlive the instance that was created
        // against it.
        if let Some(handle) = self.handle.as_ref() {
            if let Some(mut messenger) = self.messenger.take() {
                self.driver.destroy_messenger(handle, &mut messenger);
            }
        }
        if let Some(mut handle) = self.handle.take() {
            self.driver.destroy_instance(&mut handle);
        }
        self.window = None;
    }
}
