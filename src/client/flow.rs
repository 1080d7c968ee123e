use std::marker::PhantomData;

use crate::parser::{parse_response, ParsedResponse};
use crate::transport::{Connect, Connection, Stream};
use crate::{Config, Result};

use super::call::Call;

pub mod state {
    pub trait Named {
        fn name() -> &'static str;
    }

    macro_rules! flow_state {
        ($n:tt) => {
            pub struct $n(());
            impl Named for $n {
                fn name() -> &'static str {
                    stringify!($n)
                }
            }
        };
    }

    flow_state!(Connected);
    flow_state!(HeadersSent);
    flow_state!(BodySent);
    flow_state!(AwaitingResponse);
    flow_state!(Parsed);
}
use self::state::*;

/// One request on its own connection, with the lifecycle stage as type parameter.
pub struct Flow<S: Stream, State> {
    inner: Inner<S>,
    _ph: PhantomData<State>,
}

// pub(crate) for tests to inspect state
pub(crate) struct Inner<S: Stream> {
    pub call: Call,
    pub connection: Connection<S>,
}

/// Where a flow goes once the headers are written.
pub enum SendHeadersResult<S: Stream> {
    /// The request has a body still to be sent.
    SendBody(Flow<S, HeadersSent>),
    /// The request is complete.
    AwaitResponse(Flow<S, AwaitingResponse>),
}

impl<S: Stream, State: Named> Flow<S, State> {
    fn wrap(inner: Inner<S>) -> Flow<S, State> {
        Flow {
            inner,
            _ph: PhantomData,
        }
    }

    fn transition<State2: Named>(self) -> Flow<S, State2> {
        trace!("{} -> {}", State::name(), State2::name());
        Flow::wrap(self.inner)
    }

    pub fn call(&self) -> &Call {
        &self.inner.call
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &Inner<S> {
        &self.inner
    }
}

// //////////////////////////////////////////////////////////////////////////////////////////// CONNECTED

impl<S: Stream> Flow<S, Connected> {
    /// Open the connection for an idle call.
    pub fn connect<C>(call: Call, connector: &C, config: &Config) -> Result<Self>
    where
        C: Connect<Stream = S>,
    {
        let connection = Connection::open(connector, call.host(), call.port(), config)?;

        trace!("Idle -> {}", Connected::name());

        Ok(Flow::wrap(Inner { call, connection }))
    }

    /// Write request line and headers, including the blank line that ends them.
    pub fn send_headers(mut self) -> Result<SendHeadersResult<S>> {
        let head = self.inner.call.head();

        debug!(
            "Send {} {} to {}:{}",
            self.inner.call.method(),
            self.inner.call.target(),
            self.inner.call.host(),
            self.inner.call.port()
        );

        self.inner.connection.send_all(&head)?;

        let flow: Flow<S, HeadersSent> = self.transition();

        let result = if flow.inner.call.body().is_some() {
            SendHeadersResult::SendBody(flow)
        } else {
            SendHeadersResult::AwaitResponse(flow.transition())
        };

        Ok(result)
    }
}

// //////////////////////////////////////////////////////////////////////////////////////////// HEADERS SENT

impl<S: Stream> Flow<S, HeadersSent> {
    pub fn send_body(mut self) -> Result<Flow<S, BodySent>> {
        let body = self.inner.call.body().unwrap_or_default();

        self.inner.connection.send_all(body)?;

        Ok(self.transition())
    }
}

// //////////////////////////////////////////////////////////////////////////////////////////// BODY SENT

impl<S: Stream> Flow<S, BodySent> {
    pub fn proceed(self) -> Flow<S, AwaitingResponse> {
        self.transition()
    }
}

// //////////////////////////////////////////////////////////////////////////////////////////// AWAITING RESPONSE

impl<S: Stream> Flow<S, AwaitingResponse> {
    /// Block until the peer closes the connection, then parse what it sent.
    pub fn receive(mut self) -> Result<(ParsedResponse, Flow<S, Parsed>)> {
        let raw = self.inner.connection.receive_all()?;
        let parsed = parse_response(&raw)?;

        debug!("Response status: {}", parsed.code);

        Ok((parsed, self.transition()))
    }
}

// //////////////////////////////////////////////////////////////////////////////////////////// PARSED

impl<S: Stream> Flow<S, Parsed> {
    pub fn close(self) {
        trace!("{} -> Closed", Parsed::name());
        self.inner.connection.close();
    }
}
