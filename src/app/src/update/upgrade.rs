use crux_core::{render::render, Command};

use crate::commands::timer::TimerOutput;
use crate::events::{Event, UpgradeEvent};
use crate::form_post;
use crate::model::Model;
use crate::types::{FormSubmission, UpgradePhase};
use crate::{Effect, TimerCmd};

/// Handle firmware upgrade workflow events
pub fn handle(event: UpgradeEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UpgradeEvent::Submit(submission) => submit(submission, model),

        UpgradeEvent::SubmitResponse(Ok(())) => {
            log::debug!("Firmware upgrade request accepted");
            Command::done()
        }
        UpgradeEvent::SubmitResponse(Err(e)) => {
            log::error!("{e}");
            // Once the device reports progress the request outcome no longer matters
            if model.session.phase() == UpgradePhase::Submitting {
                abort_upgrade(model, &e);
            }
            model.set_error_and_render(e)
        }

        UpgradeEvent::OverlayTimer(TimerOutput::Fired { id }) => {
            if model.session.clear_overlay(id) {
                render()
            } else {
                log::debug!("Ignoring stale overlay clear {id}");
                Command::done()
            }
        }
        UpgradeEvent::OverlayTimer(TimerOutput::Cancelled { id }) => {
            log::debug!("Overlay clear {id} cancelled");
            Command::done()
        }
    }
}

/// Start an upgrade for a `download` submission. Every other submission
/// belongs to the browser.
fn submit(submission: FormSubmission, model: &mut Model) -> Command<Effect, Event> {
    if !submission.is_upgrade() {
        log::debug!(
            "Leaving '{}' submission to the browser",
            submission.submitter.value
        );
        return Command::done();
    }

    log::info!("Starting firmware upgrade via {}", submission.action);
    model.clear_error();
    let pre_empted = model.session.begin(&model.config.waiting_message);
    model.targets.set_fill(&model.config.progress_target, 0);
    model.show_status();

    let request = form_post!(Upgrade, UpgradeEvent, model, &submission.action, SubmitResponse, "Firmware upgrade",
        body_form: &submission.body(),
        on_error: { abort_upgrade(model, "Firmware upgrade request could not be built") }
    );

    let mut commands = vec![render(), request];
    if let Some(generation) = pre_empted {
        commands.push(cancel_overlay_clear(generation));
    }
    Command::all(commands)
}

/// The upgrade never reached the device: back to idle with `status` shown
fn abort_upgrade(model: &mut Model, status: &str) {
    model.session.abort(status);
    model.show_status();
}

/// Schedule the overlay clear of cooldown `generation`
pub fn schedule_overlay_clear(generation: u32, millis: u64) -> Command<Effect, Event> {
    TimerCmd::start(generation, millis)
        .build()
        .then_send(|output| Event::Upgrade(UpgradeEvent::OverlayTimer(output)))
}

fn cancel_overlay_clear(generation: u32) -> Command<Effect, Event> {
    TimerCmd::cancel(generation)
        .build()
        .then_send(|output| Event::Upgrade(UpgradeEvent::OverlayTimer(output)))
}
