//! Instance capability negotiation
//!
//! A capability snapshot is taken from the driver at the start of every
//! bootstrap; nothing here is cached because negotiation must reflect the
//! driver state at bring-up time. Layers degrade gracefully when missing,
//! required extensions do not.

use thiserror::Error;

use crate::driver::{DriverError, GraphicsDriver};

/// What the driver offers, at a point in time
#[derive(Debug, Clone, Default)]
pub struct AvailableCapabilities {
    /// Instance extensions the driver reports
    pub extensions: Vec<String>,
    /// Instance layers the driver reports
    pub layers: Vec<String>,
}

impl AvailableCapabilities {
    /// Snapshot the driver's instance extensions and layers
    pub fn query<D: GraphicsDriver>(driver: &D) -> Result<Self, DriverError> {
        let extensions = driver.enumerate_extensions()?;
        let layers = driver.enumerate_layers()?;
        Ok(Self { extensions, layers })
    }
}

/// A required instance extension the driver does not offer
#[derive(Error, Debug, PartialEq, Eq)]
#[error("required instance extension not available: {0}")]
pub struct MissingExtension(pub String);

/// Intersect the desired layer set against what the driver offers
///
/// Returns `desired` unchanged when every entry is available, otherwise the
/// empty set: a missing diagnostic layer is an expected outcome on machines
/// without the SDK installed, never a bootstrap failure. Logs one line per
/// layer checked.
pub fn negotiate_layers(desired: &[String], available: &[String]) -> Vec<String> {
    let mut all_present = true;

    for layer in desired {
        if available.iter().any(|name| name == layer) {
            log::info!("Found layer {}", layer);
        } else {
            log::warn!("Could not find layer {}", layer);
            all_present = false;
        }
    }

    if all_present {
        desired.to_vec()
    } else {
        Vec::new()
    }
}

/// Confirm every required extension is offered by the driver
///
/// The driver's create call is not guaranteed to reject an extension list
/// it cannot honor, so this check is mandatory before a bootstrap may be
/// considered ready. Fails on the first missing name in request order, so
/// a given shortfall always reports the same extension.
pub fn validate_extensions(
    required: &[String],
    available: &[String],
) -> Result<(), MissingExtension> {
    for extension in required {
        if !available.iter().any(|name| name == extension) {
            return Err(MissingExtension(extension.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// Every subset pair over a small universe: negotiate returns the
    /// desired set iff it is a subset of the available set, else nothing.
    #[test]
    fn negotiate_is_all_or_nothing_over_every_subset_pair() {
        let universe = ["layer_a", "layer_b", "layer_c"];

        for desired_bits in 0u32..8 {
            for available_bits in 0u32..8 {
                let desired: Vec<String> = universe
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| desired_bits & (1 << i) != 0)
                    .map(|(_, name)| name.to_string())
                    .collect();
                let available: Vec<String> = universe
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| available_bits & (1 << i) != 0)
                    .map(|(_, name)| name.to_string())
                    .collect();

                let negotiated = negotiate_layers(&desired, &available);
                let is_subset = desired_bits & !available_bits == 0;
                if is_subset {
                    assert_eq!(negotiated, desired);
                } else {
                    assert!(negotiated.is_empty());
                }
            }
        }
    }

    #[test]
    fn validate_succeeds_iff_required_is_subset() {
        let available = names(&["VK_KHR_surface", "VK_KHR_xcb_surface", "VK_EXT_debug_utils"]);

        assert!(validate_extensions(&names(&["VK_KHR_surface"]), &available).is_ok());
        assert!(validate_extensions(&[], &available).is_ok());
        assert!(validate_extensions(&available, &available).is_ok());
        assert!(validate_extensions(&names(&["VK_KHR_wayland_surface"]), &available).is_err());
    }

    #[test]
    fn validate_names_first_missing_in_request_order() {
        let available = names(&["VK_KHR_surface"]);
        let required = names(&["VK_KHR_surface", "VK_EXT_missing_one", "VK_EXT_missing_two"]);

        let error = validate_extensions(&required, &available).unwrap_err();
        assert_eq!(error, MissingExtension("VK_EXT_missing_one".to_string()));
    }

    /// Scenario from the win32 bring-up: debug utils absent from the driver.
    #[test]
    fn missing_debug_utils_is_reported_by_name() {
        let available = names(&["VK_KHR_surface", "VK_KHR_win32_surface"]);
        let required = names(&[
            "VK_KHR_surface",
            "VK_KHR_win32_surface",
            "VK_EXT_debug_utils",
        ]);

        let error = validate_extensions(&required, &available).unwrap_err();
        assert_eq!(error.0, "VK_EXT_debug_utils");
    }

    /// No layers installed at all: negotiation yields the empty set.
    #[test]
    fn missing_validation_layer_degrades_to_empty_set() {
        let desired = names(&["VK_LAYER_KHRONOS_validation"]);
        let negotiated = negotiate_layers(&desired, &[]);
        assert!(negotiated.is_empty());
    }

    #[test]
    fn present_validation_layer_is_kept() {
        let desired = names(&["VK_LAYER_KHRONOS_validation"]);
        let available = names(&["VK_LAYER_KHRONOS_validation", "VK_LAYER_LUNARG_api_dump"]);
        assert_eq!(negotiate_layers(&desired, &available), desired);
    }
}
