use crux_core::{render::render, Command};
use serde_json::Value;

use crate::events::{Event, InventoryEvent};
use crate::http_get;
use crate::model::Model;
use crate::types::Inventory;
use crate::Effect;

/// Handle firmware inventory events
pub fn handle(event: InventoryEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        InventoryEvent::SetTemplate { template, schema } => {
            model.template = Some(template);
            model.schema = schema;
            model.render_tables();
            render()
        }

        InventoryEvent::Loaded { json } => {
            let inventory = Inventory::ingest(&parse_payload(&json));
            show_inventory(inventory, model)
        }

        InventoryEvent::ListLoaded { family, json } => {
            let inventory = Inventory::from_list(&family, &parse_payload(&json));
            show_inventory(inventory, model)
        }

        InventoryEvent::Fetch => {
            let path = model.config.inventory_path.clone();
            http_get!(Inventory, InventoryEvent, model, &path, FetchResponse, Value)
        }

        InventoryEvent::FetchResponse(Ok(raw)) => {
            model.stop_loading();
            show_inventory(Inventory::ingest(&raw), model)
        }
        InventoryEvent::FetchResponse(Err(e)) => {
            log::error!("{e}");
            model.set_error_and_render(e)
        }
    }
}

/// Malformed payloads render as an empty inventory
fn parse_payload(json: &str) -> Value {
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::warn!("Firmware inventory is not valid JSON: {e}");
        Value::Null
    })
}

fn show_inventory(inventory: Inventory, model: &mut Model) -> Command<Effect, Event> {
    log::debug!(
        "Firmware inventory with {} families",
        inventory.families().len()
    );
    model.inventory = inventory;
    model.render_tables();
    render()
}
