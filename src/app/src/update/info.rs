use crux_core::{render::render, Command};
use serde_json::Value;

use crate::events::{Event, InfoEvent};
use crate::http_get;
use crate::model::Model;
use crate::types::field_text;
use crate::Effect;

/// Handle device information events
pub fn handle(event: InfoEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        InfoEvent::Fetch => {
            let path = model.config.info_path.clone();
            http_get!(Info, InfoEvent, model, &path, FetchResponse, Value)
        }

        InfoEvent::FetchResponse(Ok(info)) => {
            model.stop_loading();
            show_info(&info, model);
            render()
        }
        InfoEvent::FetchResponse(Err(e)) => {
            log::error!("{e}");
            model.set_error_and_render(e)
        }
    }
}

/// Every key names the target that shows its value
fn show_info(info: &Value, model: &mut Model) {
    match info.as_object() {
        Some(entries) => {
            for (id, value) in entries {
                model.targets.set_content(id, field_text(value));
            }
        }
        None => log::warn!("Device info is not a mapping, ignoring it"),
    }
}
