//! # vk_bootstrap
//!
//! Vulkan instance bring-up for windowed applications.
//!
//! This crate owns the one-time sequence that takes a process from nothing
//! to a ready-to-render Vulkan instance: it creates a native window, asks
//! the windowing layer which instance extensions presentation needs,
//! negotiates optional validation layers against what the driver actually
//! offers, verifies that every required extension is present, creates the
//! instance, and wires up the debug-utils diagnostic messenger when
//! validation is enabled. Teardown runs in the exact reverse order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vk_bootstrap::{bootstrap_vulkan, BootstrapConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     vk_bootstrap::foundation::logging::init();
//!
//!     let config = BootstrapConfig::new("My Renderer")
//!         .with_window_size(1280, 720)
//!         .with_validation(true);
//!
//!     let mut instance = bootstrap_vulkan(&config)?;
//!     while !instance.should_close() {
//!         instance.poll_events();
//!     }
//!     instance.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bootstrap;
pub mod capabilities;
pub mod config;
pub mod driver;
pub mod foundation;
pub mod window;

pub use bootstrap::{bootstrap, bootstrap_vulkan, BootstrapError, Instance, VulkanInstance};
pub use capabilities::{AvailableCapabilities, MissingExtension};
pub use config::{BootstrapConfig, Config, ConfigError};
pub use driver::{AshDriver, DiagnosticError, DriverError, GraphicsDriver, InstanceRequest};
pub use window::{GlfwWindow, WindowConfig, WindowError, WindowProvider};
