use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use thiserror::Error;

pub const DEFAULT_SOCKET_RESOURCE: &str = "download.ws";
pub const DEFAULT_INVENTORY_PATH: &str = "/firmware.json";
pub const DEFAULT_INFO_PATH: &str = "/otainfo.json";
pub const DEFAULT_OVERLAY_CLEAR_DELAY_MS: u64 = 5000;
pub const DEFAULT_WAITING_MESSAGE: &str = "Please wait ...";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid console configuration: {0}")]
    Invalid(String),
}

/// Console settings handed over by the shell on initialization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Resource name of the upgrade WebSocket, relative to the page
    #[validate(min_length = 1)]
    pub socket_resource: String,
    #[validate(min_length = 1)]
    pub inventory_path: String,
    /// Flat `target id -> text` mapping shown on the about page
    #[validate(min_length = 1)]
    pub info_path: String,
    /// Time the final status stays readable before the overlay goes away
    #[validate(minimum = 1)]
    #[validate(maximum = 60000)]
    pub overlay_clear_delay_ms: u64,
    pub status_target: String,
    pub progress_target: String,
    pub waiting_message: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            socket_resource: DEFAULT_SOCKET_RESOURCE.to_string(),
            inventory_path: DEFAULT_INVENTORY_PATH.to_string(),
            info_path: DEFAULT_INFO_PATH.to_string(),
            overlay_clear_delay_ms: DEFAULT_OVERLAY_CLEAR_DELAY_MS,
            status_target: "status".to_string(),
            progress_target: "percent".to_string(),
            waiting_message: DEFAULT_WAITING_MESSAGE.to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn checked(self) -> Result<Self, ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(self)
    }
}
