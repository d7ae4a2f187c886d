use serde::{Deserialize, Serialize};

use crate::commands::socket::SocketOutput;
use crate::commands::timer::TimerOutput;
use crate::types::*;

/// Firmware inventory and table events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    /// Table markup the inventory is rendered into
    SetTemplate {
        template: TemplateGroup,
        schema: BindingSchema,
    },
    /// `family -> [image]` mapping embedded in the page
    Loaded { json: String },
    /// Bare image list rendered as one table under `family`
    ListLoaded { family: String, json: String },
    /// Fetch the mapping from the configured inventory path
    Fetch,

    #[serde(skip)]
    FetchResponse(Result<serde_json::Value, String>),
}

/// Device information events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum InfoEvent {
    /// Fetch the info mapping from the configured info path
    Fetch,

    #[serde(skip)]
    FetchResponse(Result<serde_json::Value, String>),
}

/// Firmware upgrade workflow events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UpgradeEvent {
    /// A firmware form was submitted
    Submit(FormSubmission),

    #[serde(skip)]
    SubmitResponse(Result<(), String>),
    #[serde(skip)]
    OverlayTimer(TimerOutput),
}

/// Device WebSocket events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Connect,
    /// Page is going away; close the socket on purpose
    Disconnect,
    /// Text frame received from the device
    Frame { text: String },
    Closed { code: u16 },

    #[serde(skip)]
    ConnectResponse(SocketOutput),
}

/// UI events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Elements of the page the protocol may address
    RegisterTargets(Vec<TargetSpec>),
    /// Reset every checkbox to the indeterminate state
    NeutralizeCheckboxes,
    ClearError,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Initialize {
        page_url: String,
        config: Option<ConsoleConfig>,
    },
    Inventory(InventoryEvent),
    Info(InfoEvent),
    Upgrade(UpgradeEvent),
    Socket(SocketEvent),
    Ui(UiEvent),
}
