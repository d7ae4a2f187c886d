use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "unknown";

/// Processor and firmware currently reported by the device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConfig {
    pub processor: String,
    pub firmware_name: String,
    pub firmware_version: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            processor: UNKNOWN.to_string(),
            firmware_name: String::new(),
            firmware_version: String::new(),
        }
    }
}

impl DeviceConfig {
    pub fn set_processor(&mut self, processor: impl Into<String>) {
        self.processor = processor.into();
    }

    pub fn set_firmware(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.firmware_name = name.into();
        self.firmware_version = version.into();
    }

    /// Known processor names are shown upper case, `unknown` as is
    pub fn processor_display(&self) -> String {
        if self.processor == UNKNOWN {
            self.processor.clone()
        } else {
            self.processor.to_uppercase()
        }
    }

    pub fn firmware_display(&self) -> String {
        if self.firmware_version.is_empty() {
            UNKNOWN.to_string()
        } else {
            format!("{} {}", self.firmware_name, self.firmware_version)
        }
    }

    pub fn display(&self) -> ConfigDisplay {
        ConfigDisplay {
            processor: self.processor_display(),
            firmware: self.firmware_display(),
        }
    }
}

/// Device configuration as last shown to the user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigDisplay {
    pub processor: String,
    pub firmware: String,
}
