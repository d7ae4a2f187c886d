use crux_core::{render::render, Command};
use serde_json::Value;

use crate::events::Event;
use crate::model::Model;
use crate::types::{
    decode_frame, field_text, is_checked, percent_of, result_message, Field, ResultCode,
    TargetKind,
};
use crate::Effect;

use super::upgrade::schedule_overlay_clear;

/// Apply one device frame to the model.
///
/// Fields are independent of each other. Status fragments of the frame are
/// joined into one status line; configuration is re-displayed once.
pub fn handle_frame(text: &str, model: &mut Model) -> Command<Effect, Event> {
    let message = match decode_frame(text) {
        Ok(message) => message,
        Err(e) => {
            log::warn!("Dropping device frame: {e}");
            return Command::done();
        }
    };

    let mut status = Vec::new();
    let mut config_changed = false;
    let mut pending_clear = None;

    for field in message.fields {
        match field {
            Field::Result(code) => {
                match ResultCode::from_code(code) {
                    Some(result) if result.is_success() => log::info!("Firmware upgrade done"),
                    _ => log::warn!("Firmware upgrade failed with result {code}"),
                }
                status.push(result_message(code));
                pending_clear = Some(model.session.record_result());
            }
            Field::Counter { name, value } => status.push(format!("{name}: {value}")),
            Field::Processor(processor) => {
                model.device.set_processor(processor);
                config_changed = true;
            }
            Field::Firmware { name, version } => {
                model.device.set_firmware(name, version);
                config_changed = true;
            }
            Field::Target { id, value } => apply_to_target(model, &id, &value),
        }
    }

    if !status.is_empty() {
        model.session.set_status(&status);
        model.show_status();
    }
    if config_changed {
        model.show_config();
    }

    match pending_clear {
        Some(generation) => Command::all([
            render(),
            schedule_overlay_clear(generation, model.config.overlay_clear_delay_ms),
        ]),
        None => render(),
    }
}

fn apply_to_target(model: &mut Model, id: &str, value: &Value) {
    match model.targets.kind(id) {
        Some(TargetKind::ProgressBar) => match percent_of(value) {
            Some(percent) => {
                model.session.record_progress(percent);
                model.targets.set_fill(id, percent);
            }
            None => log::warn!("Ignoring non-numeric progress {value} for {id}"),
        },
        Some(TargetKind::Checkbox) => model.targets.set_checked(id, is_checked(value)),
        Some(TargetKind::Input | TargetKind::Display) => {
            model.targets.set_content(id, field_text(value))
        }
        None => log::debug!("No target for device field {id}"),
    }
}
