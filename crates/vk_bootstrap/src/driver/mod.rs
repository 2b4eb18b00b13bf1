//! Graphics driver interface
//!
//! The bootstrap orchestrator never calls Vulkan directly; it goes through
//! the [`GraphicsDriver`] trait so the driver can be swapped for a
//! recording fake in tests. [`AshDriver`] in [`vulkan`] is the production
//! implementation over a loaded `ash::Entry`. Both the driver binding and
//! the windowing subsystem carry process-wide state, so they are modeled as
//! explicit values passed by reference rather than ambient globals.

use ash::vk;
use thiserror::Error;

pub mod vulkan;

pub use vulkan::AshDriver;

/// Driver-level errors
#[derive(Error, Debug)]
pub enum DriverError {
    /// Vulkan API call returned a non-success status
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),

    /// The Vulkan library could not be loaded
    #[error("failed to load Vulkan: {0}")]
    Load(String),

    /// A name string contained an interior NUL and cannot cross the C boundary
    #[error("invalid name string: {0:?}")]
    InvalidName(String),
}

/// Diagnostic messenger registration errors
///
/// Registration failure is the one non-fatal error in the bring-up path:
/// callers log it and continue without diagnostics.
#[derive(Error, Debug)]
pub enum DiagnosticError {
    /// The driver does not expose the debug-utils registration entry point
    #[error("driver does not expose vkCreateDebugUtilsMessengerEXT")]
    UnsupportedByDriver,

    /// Vulkan API call returned a non-success status
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),
}

/// Everything the driver needs to create an instance
///
/// Built once per bootstrap and never mutated afterwards. Name strings are
/// ordinary Rust strings here; the driver implementation owns the
/// null-terminated conversion at the C boundary.
#[derive(Debug, Clone)]
pub struct InstanceRequest {
    /// Application name
    pub application_name: String,
    /// Application version (major, minor, patch)
    pub application_version: (u32, u32, u32),
    /// Engine name
    pub engine_name: String,
    /// Engine version (major, minor, patch)
    pub engine_version: (u32, u32, u32),
    /// Requested Vulkan API version (major, minor, patch)
    pub api_version: (u32, u32, u32),
    /// Instance extensions to enable, in request order
    pub extensions: Vec<String>,
    /// Instance layers to enable
    pub layers: Vec<String>,
}

/// Capability provider and instance factory
///
/// Enumeration reflects current driver state and is re-queried on every
/// bootstrap; implementations must propagate non-success enumeration
/// statuses rather than returning partial results.
pub trait GraphicsDriver {
    /// Handle type for a created instance
    type Instance;
    /// Handle type for a registered diagnostic messenger
    type Messenger;

    /// Enumerate the instance extensions the driver offers
    fn enumerate_extensions(&self) -> Result<Vec<String>, DriverError>;

    /// Enumerate the instance layers the driver offers
    fn enumerate_layers(&self) -> Result<Vec<String>, DriverError>;

    /// Create an instance from a validated request
    fn create_instance(&self, request: &InstanceRequest) -> Result<Self::Instance, DriverError>;

    /// Destroy an instance created by [`GraphicsDriver::create_instance`]
    fn destroy_instance(&self, instance: &mut Self::Instance);

    /// Register the diagnostic messenger on an instance
    ///
    /// The registration entry point is not part of the driver's stable core
    /// API; implementations resolve it dynamically and return
    /// [`DiagnosticError::UnsupportedByDriver`] when the lookup comes back
    /// empty.
    fn register_messenger(
        &self,
        instance: &Self::Instance,
        severity: vk::DebugUtilsMessageSeverityFlagsEXT,
        types: vk::DebugUtilsMessageTypeFlagsEXT,
    ) -> Result<Self::Messenger, DiagnosticError>;

    /// Destroy a messenger registered on `instance`
    fn destroy_messenger(&self, instance: &Self::Instance, messenger: &mut Self::Messenger);
}
