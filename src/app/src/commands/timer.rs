//! Delayed task command definitions.
//!
//! A timer is identified by the id the Core picks. Cancelling a timer that
//! already fired is harmless; the Core ignores outputs for ids it no longer
//! waits on.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOperation {
    Start { id: u32, millis: u64 },
    Cancel { id: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOutput {
    Fired { id: u32 },
    Cancelled { id: u32 },
}

impl Operation for TimerOperation {
    type Output = TimerOutput;
}

/// Command-based timer API
pub struct Timer<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Timer<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TimerOperation>> + 'static,
    Event: Send + 'static,
{
    /// Fire once after `millis`
    pub fn start(id: u32, millis: u64) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(TimerOperation::Start { id, millis })
    }

    pub fn cancel(id: u32) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(TimerOperation::Cancel { id })
    }
}

/// Request builder for timer operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: TimerOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TimerOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: TimerOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = TimerOutput>> {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
