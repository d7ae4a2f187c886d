mod info;
mod inventory;
mod protocol;
mod ui;
mod upgrade;
mod websocket;

use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::types::ConsoleConfig;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Initialize { page_url, config } => initialize(page_url, config, model),
        Event::Inventory(event) => inventory::handle(event, model),
        Event::Info(event) => info::handle(event, model),
        Event::Upgrade(event) => upgrade::handle(event, model),
        Event::Socket(event) => websocket::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}

/// Page loaded: take over the configuration, show what is known about the
/// device and connect to it
fn initialize(
    page_url: String,
    config: Option<ConsoleConfig>,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.page_url = page_url;
    if let Some(config) = config {
        match config.checked() {
            Ok(config) => model.config = config,
            Err(e) => {
                log::error!("{e}, keeping defaults");
                model.set_error(e.to_string());
            }
        }
    }
    model.show_config();

    Command::all([render(), websocket::connect(model)])
}
