use serde::{Deserialize, Serialize};

use crate::types::*;

/// Trait for types that can handle error messages
///
/// This allows HTTP helper functions to work with Model without directly depending on it.
pub trait ModelErrorHandler {
    fn set_error(&mut self, error: String);
}

/// Application Model - the complete state
/// Also serves as the ViewModel when serialized
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    pub config: ConsoleConfig,
    pub page_url: String,

    // Device state
    pub device: DeviceConfig,
    pub config_display: ConfigDisplay,

    // Firmware inventory and the tables rendered from it
    pub inventory: Inventory,
    pub template: Option<TemplateGroup>,
    pub schema: BindingSchema,
    pub tables: Vec<RenderGroup>,

    // Upgrade workflow
    pub session: UpgradeSession,

    // Page elements addressed by the device protocol
    pub targets: UiTargets,

    // WebSocket state
    pub connection: ConnectionState,

    // UI state
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl Model {
    /// Start a loading operation (sets is_loading=true, clears error)
    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    /// Stop loading and clear error
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.error_message = None;
    }

    /// Set an error message and stop loading
    pub fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.error_message = Some(error);
    }

    /// Set an error message, stop loading, and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Re-derive the shown device configuration and mirror it into the
    /// `processor` and `firmware` targets
    pub fn show_config(&mut self) {
        self.config_display = self.device.display();
        self.targets
            .set_content("processor", self.config_display.processor.clone());
        self.targets
            .set_content("firmware", self.config_display.firmware.clone());
    }

    /// Mirror the session status line into the status target
    pub fn show_status(&mut self) {
        let status = self.session.status_line().to_string();
        self.targets.set_content(&self.config.status_target, status);
    }

    /// Re-render the firmware tables. Without a template this is a no-op.
    pub fn render_tables(&mut self) {
        match &self.template {
            Some(template) => {
                self.tables = render_tables(template, &self.inventory, &self.schema);
            }
            None => log::debug!("No firmware table template registered, skipping render"),
        }
    }
}

impl ModelErrorHandler for Model {
    fn set_error(&mut self, error: String) {
        Model::set_error(self, error)
    }
}
