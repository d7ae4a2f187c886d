use crux_core::{render::render, Command};

use crate::events::{Event, UiEvent};
use crate::model::Model;
use crate::update_field;
use crate::Effect;

/// Handle UI-related events (target registration, checkbox reset, clear messages)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::RegisterTargets(specs) => {
            log::debug!("Registering {} UI targets", specs.len());
            model.targets.register(specs);
            model.show_config();
            render()
        }
        UiEvent::NeutralizeCheckboxes => {
            model.targets.neutralize_checkboxes();
            render()
        }
        UiEvent::ClearError => update_field!(model.error_message, None),
    }
}
