/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.connection, ConnectionState::Open)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.connection, ConnectionState::Open;
///     model.error_message, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

// Re-export http_helpers functions for macro use
pub use crate::http_helpers::{
    action_url, build_url, check_response_status, extract_error_message, is_response_success,
    map_http_error, parse_json_response, process_json_response, process_status_response, BASE_URL,
};

/// Macro for simple HTTP GET requests expecting JSON response.
/// Sets the loading state and renders alongside the request.
/// Requires domain parameters for event wrapping.
///
/// # Example
/// ```ignore
/// http_get!(Inventory, InventoryEvent, model, "/firmware.json", FetchResponse, serde_json::Value)
/// ```
#[macro_export]
macro_rules! http_get {
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $response_type:ty) => {{
        $model.start_loading();
        crux_core::Command::all([
            crux_core::render::render(),
            $crate::HttpCmd::get($crate::build_url($endpoint))
                .build()
                .then_send(|result| {
                    let event_result: Result<$response_type, String> =
                        $crate::process_json_response(stringify!($response_event), result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
        ])
    }};
}

/// Macro for form-encoded POST requests expecting a status-only response.
/// The optional `on_error` block runs when the request cannot be built,
/// before the error is set on the model.
///
/// # Example
/// ```ignore
/// form_post!(Upgrade, UpgradeEvent, model, &submission.action, SubmitResponse, "Upgrade",
///     body_form: &submission.body(),
///     on_error: { abort_upgrade(model, "Upgrade request failed") }
/// )
/// ```
#[macro_export]
macro_rules! form_post {
    ($domain:ident, $domain_event:ident, $model:expr, $action_path:expr, $response_event:ident, $action:expr, body_form: $body:expr, on_error: $on_error:block) => {{
        match $crate::HttpCmd::post($crate::action_url($action_path)).body_form($body) {
            Ok(builder) => builder.build().then_send(|result| {
                let event_result = $crate::process_status_response($action, result);
                $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                    event_result,
                ))
            }),
            Err(e) => {
                $on_error
                $crate::http_helpers::handle_request_error($model, $action, e)
            }
        }
    }};

    ($domain:ident, $domain_event:ident, $model:expr, $action_path:expr, $response_event:ident, $action:expr, body_form: $body:expr) => {{
        $crate::form_post!($domain, $domain_event, $model, $action_path, $response_event, $action,
            body_form: $body,
            on_error: {}
        )
    }};
}
