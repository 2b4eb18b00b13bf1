//! ash-backed driver implementation
//!
//! Owns the loaded Vulkan entry point and the C-boundary marshalling:
//! null-terminated name strings, packed version numbers, and the dynamic
//! lookup of the debug-utils registration entry point.

use std::ffi::{c_char, CStr, CString};

use ash::extensions::ext::DebugUtils;
use ash::vk;

use super::{DiagnosticError, DriverError, GraphicsDriver, InstanceRequest};

/// Production driver over a loaded `ash::Entry`
pub struct AshDriver {
    entry: ash::Entry,
}

impl AshDriver {
    /// Load the Vulkan library
    pub fn load() -> Result<Self, DriverError> {
        let entry = unsafe { ash::Entry::load() }
            .map_err(|e| DriverError::Load(format!("{:?}", e)))?;
        Ok(Self { entry })
    }

    /// Access the raw entry point
    pub fn entry(&self) -> &ash::Entry {
        &self.entry
    }
}

/// Registered debug messenger together with the loader that can destroy it
pub struct AshMessenger {
    loader: DebugUtils,
    handle: vk::DebugUtilsMessengerEXT,
}

impl GraphicsDriver for AshDriver {
    type Instance = ash::Instance;
    type Messenger = AshMessenger;

    fn enumerate_extensions(&self) -> Result<Vec<String>, DriverError> {
        let properties = self
            .entry
            .enumerate_instance_extension_properties(None)
            .map_err(DriverError::Api)?;

        Ok(properties
            .iter()
            .map(|ext| {
                let name = unsafe { CStr::from_ptr(ext.extension_name.as_ptr()) };
                name.to_string_lossy().into_owned()
            })
            .collect())
    }

    fn enumerate_layers(&self) -> Result<Vec<String>, DriverError> {
        let properties = self
            .entry
            .enumerate_instance_layer_properties()
            .map_err(DriverError::Api)?;

        Ok(properties
            .iter()
            .map(|layer| {
                let name = unsafe { CStr::from_ptr(layer.layer_name.as_ptr()) };
                name.to_string_lossy().into_owned()
            })
            .collect())
    }

    fn create_instance(&self, request: &InstanceRequest) -> Result<ash::Instance, DriverError> {
        let app_name = to_cstring(&request.application_name)?;
        let engine_name = to_cstring(&request.engine_name)?;
        let extension_names = to_cstrings(&request.extensions)?;
        let layer_names = to_cstrings(&request.layers)?;

        let extension_ptrs: Vec<*const c_char> =
            extension_names.iter().map(|name| name.as_ptr()).collect();
        let layer_ptrs: Vec<*const c_char> =
            layer_names.iter().map(|name| name.as_ptr()).collect();

        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name)
            .application_version(pack_version(request.application_version))
            .engine_name(&engine_name)
            .engine_version(pack_version(request.engine_version))
            .api_version(pack_version(request.api_version));

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs)
            .enabled_layer_names(&layer_ptrs);

        unsafe { self.entry.create_instance(&create_info, None) }.map_err(DriverError::Api)
    }

    fn destroy_instance(&self, instance: &mut ash::Instance) {
        unsafe { instance.destroy_instance(None) };
    }

    fn register_messenger(
        &self,
        instance: &ash::Instance,
        severity: vk::DebugUtilsMessageSeverityFlagsEXT,
        types: vk::DebugUtilsMessageTypeFlagsEXT,
    ) -> Result<AshMessenger, DiagnosticError> {
        // vkCreateDebugUtilsMessengerEXT is extension-provided; resolve it
        // before touching the loader so an absent extension degrades to
        // UnsupportedByDriver instead of a call through a null pointer.
        const CREATE_FN: &[u8] = b"vkCreateDebugUtilsMessengerEXT\0";
        let lookup = unsafe {
            (self.entry.static_fn().get_instance_proc_addr)(
                instance.handle(),
                CREATE_FN.as_ptr().cast(),
            )
        };
        if lookup.is_none() {
            return Err(DiagnosticError::UnsupportedByDriver);
        }

        let loader = DebugUtils::new(&self.entry, instance);
        let create_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(severity)
            .message_type(types)
            .pfn_user_callback(Some(debug_callback));

        let handle = unsafe { loader.create_debug_utils_messenger(&create_info, None) }
            .map_err(DiagnosticError::Api)?;

        Ok(AshMessenger { loader, handle })
    }

    fn destroy_messenger(&self, _instance: &ash::Instance, messenger: &mut AshMessenger) {
        unsafe {
            messenger
                .loader
                .destroy_debug_utils_messenger(messenger.handle, None);
        }
    }
}

/// Pack a (major, minor, patch) triple the way the driver's versioning macro does
pub(crate) fn pack_version((major, minor, patch): (u32, u32, u32)) -> u32 {
    vk::make_api_version(0, major, minor, patch)
}

fn to_cstring(name: &str) -> Result<CString, DriverError> {
    CString::new(name).map_err(|_| DriverError::InvalidName(name.to_string()))
}

fn to_cstrings(names: &[String]) -> Result<Vec<CString>, DriverError> {
    names.iter().map(|name| to_cstring(name)).collect()
}

/// Debug callback for driver-emitted diagnostic messages
///
/// Always returns `vk::FALSE` so logging never aborts the triggering call.
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    let callback_data = *callback_data;
    let message = CStr::from_ptr(callback_data.p_message).to_string_lossy();

    if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::ERROR {
        log::error!("[Vulkan] {:?} - {}", message_type, message);
    } else if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::WARNING {
        log::warn!("[Vulkan] {:?} - {}", message_type, message);
    } else {
        log::debug!("[Vulkan] {:?} - {}", message_type, message);
    }

    vk::FALSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_version_matches_vulkan_macro() {
        assert_eq!(pack_version((1, 0, 0)), vk::make_api_version(0, 1, 0, 0));
        assert_eq!(pack_version((1, 3, 204)), vk::make_api_version(0, 1, 3, 204));
        // major.minor.patch occupy distinct bit ranges
        assert_ne!(pack_version((1, 2, 0)), pack_version((2, 1, 0)));
    }

    #[test]
    fn to_cstrings_preserves_request_order() {
        let names = vec![
            "VK_KHR_surface".to_string(),
            "VK_KHR_xcb_surface".to_string(),
            "VK_EXT_debug_utils".to_string(),
        ];
        let converted = to_cstrings(&names).unwrap();
        let round_tripped: Vec<&str> = converted
            .iter()
            .map(|name| name.to_str().unwrap())
            .collect();
        assert_eq!(
            round_tripped,
            ["VK_KHR_surface", "VK_KHR_xcb_surface", "VK_EXT_debug_utils"]
        );
    }

    #[test]
    fn interior_nul_is_rejected() {
        let names = vec!["VK_KHR\0_surface".to_string()];
        let result = to_cstrings(&names);
        assert!(matches!(result, Err(DriverError::InvalidName(_))));
    }
}
