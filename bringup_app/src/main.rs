//! Window bring-up demo
//!
//! Opens a window, brings up a Vulkan instance against it, lists what the
//! driver offered, and idles until the window is closed.

use vk_bootstrap::{bootstrap_vulkan, BootstrapConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    vk_bootstrap::foundation::logging::init();

    let config = BootstrapConfig::new("My Vulkan Renderer")
        .with_window_size(1280, 720)
        .with_api_version(1, 1, 0);

    log::info!("Bootstrapping graphics instance...");
    let mut instance = bootstrap_vulkan(&config)?;
    log::info!(
        "Instance ready (diagnostics: {})",
        if instance.has_diagnostics() { "on" } else { "off" }
    );

    for extension in &instance.capabilities().extensions {
        log::info!("Instance extension: {}", extension);
    }

    while !instance.should_close() {
        instance.poll_events();
    }

    instance.shutdown();
    Ok(())
}
