//! Device WebSocket command definitions.
//!
//! The Shell owns the actual socket. The Core asks it to open or close the
//! connection; frames and close events come back as `SocketEvent`s.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operations that the Shell needs to perform on the device socket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SocketOperation {
    Open { url: String },
    Close,
}

// What the shell reports back for an operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SocketOutput {
    Opened,
    Closed,
    Error { message: String },
}

impl Operation for SocketOperation {
    type Output = SocketOutput;
}

/// Command-based socket API
pub struct Socket<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Socket<Effect, Event>
where
    Effect: Send + From<crux_core::Request<SocketOperation>> + 'static,
    Event: Send + 'static,
{
    /// Open the socket at `url`
    pub fn open(url: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(SocketOperation::Open { url: url.into() })
    }

    pub fn close() -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(SocketOperation::Close)
    }
}

/// Request builder for socket operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: SocketOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<SocketOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: SocketOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = SocketOutput>> {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
