use super::*;
use crate::events::{InfoEvent, InventoryEvent, SocketEvent, UiEvent, UpgradeEvent};
use crux_core::App as _;
use serde_json::json;
use std::collections::BTreeMap;

const PAGE_URL: &str = "https://otgw.local/firmware.html";

fn frame(model: &mut Model, value: serde_json::Value) -> Vec<Effect> {
    let mut command = App.update(
        Event::Socket(SocketEvent::Frame {
            text: value.to_string(),
        }),
        model,
    );
    command.effects().collect()
}

fn download(action: &str) -> FormSubmission {
    FormSubmission {
        action: action.to_string(),
        fields: BTreeMap::from([("pic".to_string(), "pic16f88".to_string())]),
        submitter: Submitter {
            name: "action".to_string(),
            value: DOWNLOAD_ACTION.to_string(),
        },
    }
}

fn submit(model: &mut Model, submission: FormSubmission) -> Vec<Effect> {
    let mut command = App.update(Event::Upgrade(UpgradeEvent::Submit(submission)), model);
    command.effects().collect()
}

fn timer_starts(effects: Vec<Effect>) -> Vec<(u32, u64)> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Timer(request) => match request.operation {
                TimerOperation::Start { id, millis } => Some((id, millis)),
                TimerOperation::Cancel { .. } => None,
            },
            _ => None,
        })
        .collect()
}

fn timer_cancels(effects: &[Effect]) -> Vec<u32> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Timer(request) => match request.operation {
                TimerOperation::Cancel { id } => Some(id),
                TimerOperation::Start { .. } => None,
            },
            _ => None,
        })
        .collect()
}

fn registered(specs: &[(&str, TargetKind)]) -> Model {
    let mut model = Model::default();
    let _ = App.update(
        Event::Ui(UiEvent::RegisterTargets(
            specs
                .iter()
                .map(|(id, kind)| TargetSpec {
                    id: id.to_string(),
                    kind: *kind,
                })
                .collect(),
        )),
        &mut model,
    );
    model
}

#[test]
fn test_initialize_opens_socket_next_to_page() {
    let mut model = Model::default();

    let mut command = App.update(
        Event::Initialize {
            page_url: PAGE_URL.to_string(),
            config: None,
        },
        &mut model,
    );

    let urls: Vec<String> = command
        .effects()
        .filter_map(|effect| match effect {
            Effect::Socket(request) => match request.operation {
                SocketOperation::Open { url } => Some(url),
                SocketOperation::Close => None,
            },
            _ => None,
        })
        .collect();

    assert_eq!(urls, ["wss://otgw.local/download.ws"]);
    assert_eq!(model.connection, ConnectionState::Connecting);
    assert_eq!(model.config_display.processor, "unknown");
}

#[test]
fn test_initialize_with_invalid_config_keeps_defaults() {
    let mut model = Model::default();
    let config = ConsoleConfig {
        overlay_clear_delay_ms: 0,
        ..Default::default()
    };

    let _command = App.update(
        Event::Initialize {
            page_url: PAGE_URL.to_string(),
            config: Some(config),
        },
        &mut model,
    );

    assert_eq!(model.config, ConsoleConfig::default());
    assert!(model.error_message.is_some());
}

#[test]
fn test_socket_open_failure_counts_as_lost() {
    let mut model = Model {
        connection: ConnectionState::Connecting,
        ..Default::default()
    };

    let _command = App.update(
        Event::Socket(SocketEvent::ConnectResponse(SocketOutput::Error {
            message: "refused".to_string(),
        })),
        &mut model,
    );

    assert!(model.connection.is_lost());
}

#[test]
fn test_going_away_close_is_not_lost() {
    let mut model = Model {
        connection: ConnectionState::Open,
        ..Default::default()
    };

    let _command = App.update(Event::Socket(SocketEvent::Closed { code: 1001 }), &mut model);
    assert!(!model.connection.is_lost());

    let _command = App.update(Event::Socket(SocketEvent::Closed { code: 1006 }), &mut model);
    assert!(model.connection.is_lost());
}

#[test]
fn test_disconnect_closes_socket_without_banner() {
    let mut model = Model {
        connection: ConnectionState::Open,
        ..Default::default()
    };

    let mut command = App.update(Event::Socket(SocketEvent::Disconnect), &mut model);

    assert!(command.effects().any(|e| matches!(
        e,
        Effect::Socket(request) if request.operation == SocketOperation::Close
    )));
    assert_eq!(model.connection, ConnectionState::Closed);
    assert!(!model.connection.is_lost());
}

#[test]
fn test_result_frame_shows_message() {
    let mut model = Model::default();

    frame(&mut model, json!({"result": 9}));

    assert_eq!(model.session.status_line(), "Too many retries");
}

#[test]
fn test_counters_are_joined_in_frame_order() {
    let mut model = Model::default();

    frame(&mut model, json!({"errors": 3, "retries": 1}));

    assert_eq!(model.session.status_line(), "errors: 3, retries: 1");
}

#[test]
fn test_status_is_mirrored_into_status_target() {
    let mut model = registered(&[("status", TargetKind::Display)]);

    frame(&mut model, json!({"result": 0}));

    assert_eq!(model.targets.content("status"), Some("Success"));
}

#[test]
fn test_unknown_processor_shown_literally() {
    let mut model = registered(&[("processor", TargetKind::Display)]);

    frame(&mut model, json!({"processor": "unknown"}));
    assert_eq!(model.targets.content("processor"), Some("unknown"));

    frame(&mut model, json!({"processor": "pic16f1847"}));
    assert_eq!(model.targets.content("processor"), Some("PIC16F1847"));
}

#[test]
fn test_firmware_version_updates_display() {
    let mut model = registered(&[("firmware", TargetKind::Display)]);

    frame(&mut model, json!({"firmware": ["gateway", "5.1"]}));

    assert_eq!(model.targets.content("firmware"), Some("gateway 5.1"));
}

#[test]
fn test_malformed_frame_leaves_model_unchanged() {
    let mut model = registered(&[("status", TargetKind::Display)]);
    frame(&mut model, json!({"errors": 1}));
    let before = model.clone();

    let mut command = App.update(
        Event::Socket(SocketEvent::Frame {
            text: "{not json".to_string(),
        }),
        &mut model,
    );

    assert_eq!(command.effects().count(), 0);
    assert_eq!(model, before);
}

#[test]
fn test_frame_updates_registered_targets_by_kind() {
    let mut model = registered(&[
        ("percent", TargetKind::ProgressBar),
        ("enabled", TargetKind::Checkbox),
        ("interval", TargetKind::Input),
    ]);

    frame(
        &mut model,
        json!({"percent": 42.6, "enabled": 1, "interval": 30, "unbound": "x"}),
    );

    assert_eq!(model.targets.get("percent").and_then(|t| t.fill_percent), Some(43));
    assert_eq!(model.targets.get("enabled").and_then(|t| t.checked), Some(true));
    assert_eq!(model.targets.content("interval"), Some("30"));
    assert!(model.targets.get("unbound").is_none());
}

#[test]
fn test_download_submission_posts_form() {
    let mut model = Model::default();

    let effects = submit(&mut model, download("firmware.html"));

    assert!(effects.iter().any(|e| matches!(e, Effect::Http(_))));
    assert!(model.session.is_busy());
    assert!(model.session.overlay().is_visible());
    assert_eq!(model.session.status_line(), DEFAULT_WAITING_MESSAGE);
}

#[test]
fn test_other_submission_is_left_to_browser() {
    let mut model = Model::default();
    let mut submission = download("settings.html");
    submission.submitter.value = "save".to_string();

    let effects = submit(&mut model, submission);

    assert!(effects.is_empty());
    assert_eq!(model.session.phase(), UpgradePhase::Idle);
    assert!(!model.session.overlay().is_visible());
}

#[test]
fn test_failed_post_aborts_submitting_session() {
    let mut model = Model::default();
    submit(&mut model, download("firmware.html"));

    let _command = App.update(
        Event::Upgrade(UpgradeEvent::SubmitResponse(Err(
            "Firmware upgrade failed: HTTP 500".to_string(),
        ))),
        &mut model,
    );

    assert_eq!(model.session.phase(), UpgradePhase::Idle);
    assert!(!model.session.overlay().is_visible());
    assert!(model.error_message.is_some());
}

#[test]
fn test_result_schedules_single_overlay_clear() {
    let mut model = Model::default();
    submit(&mut model, download("firmware.html"));

    let starts = timer_starts(frame(&mut model, json!({"percent": 100, "result": 0})));

    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].1, DEFAULT_OVERLAY_CLEAR_DELAY_MS);
    assert!(model.session.overlay().is_visible());
}

#[test]
fn test_overlay_clears_when_timer_fires() {
    let mut model = Model::default();
    submit(&mut model, download("firmware.html"));
    let mut command = App.update(
        Event::Socket(SocketEvent::Frame {
            text: json!({"result": 0}).to_string(),
        }),
        &mut model,
    );

    let mut timer = command
        .effects()
        .find_map(|effect| match effect {
            Effect::Timer(request) => Some(request),
            _ => None,
        })
        .expect("overlay clear scheduled");
    let TimerOperation::Start { id, .. } = timer.operation else {
        panic!("expected a timer start");
    };
    timer
        .resolve(TimerOutput::Fired { id })
        .expect("timer resolves");

    for event in command.events() {
        let _ = App.update(event, &mut model);
    }

    assert_eq!(model.session.phase(), UpgradePhase::Idle);
    assert!(!model.session.overlay().is_visible());
}

#[test]
fn test_new_upgrade_pre_empts_pending_clear() {
    let mut model = Model::default();
    submit(&mut model, download("firmware.html"));
    let starts = timer_starts(frame(&mut model, json!({"result": 0})));
    let (stale, _) = starts[0];

    let effects = submit(&mut model, download("firmware.html"));
    assert_eq!(timer_cancels(&effects), [stale]);

    let _ = App.update(
        Event::Upgrade(UpgradeEvent::OverlayTimer(TimerOutput::Fired { id: stale })),
        &mut model,
    );

    assert!(model.session.is_busy());
    assert!(model.session.overlay().is_visible());
    assert_eq!(model.session.overlay().shown_count(), 1);
}

#[test]
fn test_inventory_renders_tables_from_template() {
    let mut model = Model::default();
    let template = TemplateGroup {
        id: Some("filelist".to_string()),
        title: Some(TemplateElement::default()),
        elements: Vec::new(),
        rows: vec![TemplateRow {
            elements: vec![
                TemplateElement {
                    kind: TargetKind::Input,
                    binding: Some("name".to_string()),
                    ..Default::default()
                },
                TemplateElement {
                    binding: Some("version".to_string()),
                    ..Default::default()
                },
            ],
        }],
    };

    let _ = App.update(
        Event::Inventory(InventoryEvent::SetTemplate {
            template,
            schema: BindingSchema::grouped(),
        }),
        &mut model,
    );
    let _ = App.update(
        Event::Inventory(InventoryEvent::Loaded {
            json: json!({
                "X": [{"name": "a", "version": "1.2"}, {"name": "b", "version": "1.10"}],
                "Y": [{"name": "c", "version": "2"}]
            })
            .to_string(),
        }),
        &mut model,
    );

    assert_eq!(model.tables.len(), 2);
    let first = &model.tables[0];
    assert_eq!(first.id.as_deref(), Some("filelist"));
    assert_eq!(first.title_text(), Some("X"));
    assert_eq!(first.rows[0].elements[0].value, "X/b");
    assert_eq!(first.rows[1].elements[0].value, "X/a");
    assert_eq!(model.tables[1].id, None);
    assert_eq!(model.tables[1].rows[0].elements[1].content, "2");
}

#[test]
fn test_invalid_inventory_json_renders_nothing() {
    let mut model = Model::default();

    let _ = App.update(
        Event::Inventory(InventoryEvent::Loaded {
            json: "[1, 2".to_string(),
        }),
        &mut model,
    );

    assert!(model.inventory.is_empty());
    assert!(model.tables.is_empty());
}

#[test]
fn test_inventory_fetch_sets_loading() {
    let mut model = Model::default();

    let mut command = App.update(Event::Inventory(InventoryEvent::Fetch), &mut model);

    assert!(model.is_loading);
    assert!(command.effects().any(|e| matches!(e, Effect::Http(_))));
}

#[test]
fn test_submission_without_pending_clear_cancels_nothing() {
    let mut model = Model::default();

    let effects = submit(&mut model, download("firmware.html"));

    assert!(timer_cancels(&effects).is_empty());
}

#[test]
fn test_info_fetch_requests_info_path() {
    let mut model = Model::default();

    let mut command = App.update(Event::Info(InfoEvent::Fetch), &mut model);

    assert!(model.is_loading);
    assert!(command.effects().any(|e| matches!(e, Effect::Http(_))));
}

#[test]
fn test_info_response_fills_targets_by_id() {
    let mut model = registered(&[
        ("hostname", TargetKind::Display),
        ("uptime", TargetKind::Display),
    ]);
    model.is_loading = true;

    let _ = App.update(
        Event::Info(InfoEvent::FetchResponse(Ok(json!({
            "hostname": "otgw",
            "uptime": 3600,
            "unregistered": "x"
        })))),
        &mut model,
    );

    assert!(!model.is_loading);
    assert_eq!(model.targets.content("hostname"), Some("otgw"));
    assert_eq!(model.targets.content("uptime"), Some("3600"));
    assert!(model.targets.get("unregistered").is_none());
}

#[test]
fn test_info_response_that_is_not_a_mapping_is_ignored() {
    let mut model = registered(&[("hostname", TargetKind::Display)]);

    let _ = App.update(
        Event::Info(InfoEvent::FetchResponse(Ok(json!(["otgw"])))),
        &mut model,
    );

    assert_eq!(model.targets.content("hostname"), Some(""));
    assert_eq!(model.error_message, None);
}

#[test]
fn test_info_fetch_failure_sets_error() {
    let mut model = Model::default();

    let _ = App.update(
        Event::Info(InfoEvent::FetchResponse(Err(
            "FetchResponse failed: HTTP 404".to_string(),
        ))),
        &mut model,
    );

    assert_eq!(
        model.error_message.as_deref(),
        Some("FetchResponse failed: HTTP 404")
    );
}

#[test]
fn test_neutralize_checkboxes_resets_checked_state() {
    let mut model = registered(&[
        ("enabled", TargetKind::Checkbox),
        ("override", TargetKind::Checkbox),
        ("interval", TargetKind::Input),
    ]);
    frame(&mut model, json!({"enabled": 1, "override": 0, "interval": 30}));

    let _ = App.update(Event::Ui(UiEvent::NeutralizeCheckboxes), &mut model);

    assert_eq!(model.targets.get("enabled").and_then(|t| t.checked), None);
    assert_eq!(model.targets.get("override").and_then(|t| t.checked), None);
    assert_eq!(model.targets.content("interval"), Some("30"));
}

#[test]
fn test_clear_error() {
    let mut model = Model {
        error_message: Some("Some error".to_string()),
        ..Default::default()
    };

    let _command = App.update(Event::Ui(UiEvent::ClearError), &mut model);

    assert_eq!(model.error_message, None);
}
