use crux_core::{render::render, Command};

use crate::commands::socket::SocketOutput;
use crate::events::{Event, SocketEvent};
use crate::model::Model;
use crate::types::{socket_url, ConnectionState};
use crate::update_field;
use crate::{Effect, SocketCmd};

use super::protocol::handle_frame;

/// Close code the browser reports when a socket could not be established
const CLOSE_ABNORMAL: u16 = 1006;

/// Handle device WebSocket events
pub fn handle(event: SocketEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SocketEvent::Connect => connect(model),
        SocketEvent::Disconnect => disconnect(model),

        SocketEvent::ConnectResponse(SocketOutput::Opened) => {
            log::info!("Device socket open");
            update_field!(model.connection, ConnectionState::Open)
        }
        SocketEvent::ConnectResponse(SocketOutput::Closed) => {
            update_field!(model.connection, ConnectionState::Closed)
        }
        SocketEvent::ConnectResponse(SocketOutput::Error { message }) => {
            log::error!("Device socket failed: {message}");
            update_field!(
                model.connection,
                ConnectionState::closed_with(CLOSE_ABNORMAL)
            )
        }

        SocketEvent::Frame { text } => handle_frame(&text, model),

        SocketEvent::Closed { code } => {
            let state = ConnectionState::closed_with(code);
            if state.is_lost() {
                log::warn!("Device socket closed with code {code}");
            }
            update_field!(model.connection, state)
        }
    }
}

/// Ask the shell to open the upgrade socket next to the current page
pub fn connect(model: &mut Model) -> Command<Effect, Event> {
    if model.connection == ConnectionState::Open || model.connection == ConnectionState::Connecting
    {
        return Command::done();
    }

    match socket_url(&model.page_url, &model.config.socket_resource) {
        Ok(url) => {
            log::debug!("Connecting to {url}");
            model.connection = ConnectionState::Connecting;
            Command::all([
                render(),
                SocketCmd::open(url)
                    .build()
                    .then_send(|output| Event::Socket(SocketEvent::ConnectResponse(output))),
            ])
        }
        Err(e) => model.set_error_and_render(format!("Cannot connect to the device: {e}")),
    }
}

fn disconnect(model: &mut Model) -> Command<Effect, Event> {
    if model.connection == ConnectionState::Closed {
        return Command::done();
    }

    model.connection = ConnectionState::Closed;
    Command::all([
        render(),
        SocketCmd::close()
            .build()
            .then_send(|output| Event::Socket(SocketEvent::ConnectResponse(output))),
    ])
}
