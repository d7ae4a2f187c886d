//! HTTP helper functions for Crux Core
//!
//! This module extracts common HTTP response handling logic from macros
//! into debuggable, testable functions.

use crux_http::Response;

/// Base URL for requests to the device web server.
///
/// NOTE: `crux_http` requires absolute URLs and rejects relative paths
/// (`RelativeUrlWithoutBase` error). The shell strips this prefix before
/// calling `fetch()`, so requests stay relative to the page.
pub const BASE_URL: &str = "https://relative";

/// Constructs the full address from a given endpoint.
///
/// # Example
/// ```
/// use otgw_ui_core::http_helpers::build_url;
/// let url = build_url("/firmware.json");
/// assert_eq!(url, "https://relative/firmware.json");
/// ```
pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Address of a form action: absolute actions are kept, relative ones are
/// prefixed like every other endpoint.
///
/// ```
/// use otgw_ui_core::http_helpers::action_url;
/// assert_eq!(action_url("firmware.html"), "https://relative/firmware.html");
/// assert_eq!(action_url("http://otgw/firmware.html"), "http://otgw/firmware.html");
/// ```
pub fn action_url(action: &str) -> String {
    if action.contains("://") {
        action.to_string()
    } else if action.starts_with('/') {
        build_url(action)
    } else {
        build_url(&format!("/{action}"))
    }
}

/// Validates HTTP response.
///
/// Returns `true` if the response status is 2xx.
pub fn is_response_success(response: &Response<Vec<u8>>) -> bool {
    response.status().is_success()
}

/// Extracts error message from HTTP response.
pub fn extract_error_message(action: &str, response: &mut Response<Vec<u8>>) -> String {
    let status = response.status().to_string();

    match response.take_body() {
        Some(body) if !body.is_empty() => match String::from_utf8(body) {
            Ok(msg) => format!("{action} failed: {msg}"),
            Err(e) => format!("{action} failed: HTTP {status} (Invalid UTF-8: {e})"),
        },
        Some(_) => format!("{action} failed: HTTP {status} (Empty body)"),
        None => format!("{action} failed: HTTP {status} (No body)"),
    }
}

/// Parse JSON from response body.
///
/// Returns error if response is not successful or JSON parsing fails.
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<T, String> {
    if !is_response_success(response) {
        return Err(extract_error_message(action, response));
    }

    match response.take_body() {
        Some(body) => {
            serde_json::from_slice(&body).map_err(|e| format!("{action}: JSON parse error: {e}"))
        }
        None => Err(format!("{action}: Empty response body")),
    }
}

/// Check response status only (no body parsing).
///
/// The device answers form posts with a redirect; any 2xx/3xx that reaches
/// the core counts as accepted.
pub fn check_response_status(action: &str, response: &mut Response<Vec<u8>>) -> Result<(), String> {
    if is_response_success(response) || response.status().is_redirection() {
        Ok(())
    } else {
        Err(extract_error_message(action, response))
    }
}

/// Map a transport error to a user facing message
pub fn map_http_error(action: &str, error: crux_http::HttpError) -> String {
    format!("{action} failed: {error}")
}

/// Process HTTP response result and check status only (no JSON parsing)
pub fn process_status_response(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<(), String> {
    match result {
        Ok(mut response) => check_response_status(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

/// Process HTTP response result and parse JSON
pub fn process_json_response<T: serde::de::DeserializeOwned>(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<T, String> {
    match result {
        Ok(mut response) => parse_json_response(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

/// Handle request creation error - sets error message and returns render command
///
/// This is used when building an HTTP request fails (e.g., form serialization error).
pub fn handle_request_error<M, E>(
    model: &mut M,
    action: &str,
    error: impl std::fmt::Display,
) -> crux_core::Command<crate::Effect, E>
where
    M: crate::model::ModelErrorHandler,
    E: Send + 'static,
{
    model.set_error(format!("Failed to create {action} request: {error}"));
    crux_core::render::render()
}
