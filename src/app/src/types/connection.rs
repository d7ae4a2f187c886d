use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Close code of a page navigating away, not worth a warning
pub const CLOSE_GOING_AWAY: u16 = 1001;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("page URL has no scheme: {0}")]
    MissingScheme(String),
    #[error("unsupported page scheme: {0}")]
    UnsupportedScheme(String),
}

/// Lifecycle of the device WebSocket
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Open,
    /// Closed unexpectedly; nothing reconnects until the page is reloaded
    Lost { code: u16 },
}

impl ConnectionState {
    pub fn is_lost(&self) -> bool {
        matches!(self, Self::Lost { .. })
    }

    /// State after the socket closed with `code`
    pub fn closed_with(code: u16) -> Self {
        if code == CLOSE_GOING_AWAY {
            Self::Closed
        } else {
            Self::Lost { code }
        }
    }
}

/// WebSocket URL of `resource` next to the page at `page_url`.
///
/// The scheme follows the page (`http` to `ws`, `https` to `wss`); query and
/// fragment are dropped along with the last path segment.
///
/// `page_url` is expected to be the browser's `location.href`, an absolute
/// URL the browser already normalized. Only the scheme is checked; the
/// authority (including any userinfo or port) is carried over verbatim.
///
/// ```
/// use otgw_ui_core::types::socket_url;
/// assert_eq!(
///     socket_url("https://otgw.local/fw/upgrade.html?x=1", "download.ws").unwrap(),
///     "wss://otgw.local/fw/download.ws"
/// );
/// ```
pub fn socket_url(page_url: &str, resource: &str) -> Result<String, ConnectionError> {
    let (scheme, rest) = page_url
        .split_once("://")
        .ok_or_else(|| ConnectionError::MissingScheme(page_url.to_string()))?;
    let ws_scheme = match scheme.to_ascii_lowercase().as_str() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(ConnectionError::UnsupportedScheme(other.to_string())),
    };

    let location = rest.split(['?', '#']).next().unwrap_or_default();
    let base = match location.rfind('/') {
        Some(end) => &location[..=end],
        None => location,
    };
    let separator = if base.ends_with('/') { "" } else { "/" };

    Ok(format!("{ws_scheme}://{base}{separator}{resource}"))
}
