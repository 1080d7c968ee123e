//! HTTP/1.1 client
//!
//! Every request opens its own connection, sends the request, reads until
//! the server closes the connection and parses what arrived. Nothing is
//! reused between requests and nothing is retried.
//!
//! The [`Flow`] object encodes the lifecycle of one request using state
//! variables, for example `Flow<S, HeadersSent>` for a request whose headers
//! are written but whose body is not. A [`Call`] is the idle request, before
//! any connection exists.
//!
//! ```text
//!          ┌──────────────────┐
//!          │       Idle       │  Call
//!          └──────────────────┘
//!                    │
//!                    ▼
//!          ┌──────────────────┐
//!          │    Connected     │
//!          └──────────────────┘
//!                    │
//!                    ▼
//!          ┌──────────────────┐
//!       ┌──│   HeadersSent    │
//!       │  └──────────────────┘
//!       │            │ POST
//!       │            ▼
//!   GET │  ┌──────────────────┐
//!       │  │     BodySent     │
//!       │  └──────────────────┘
//!       │            │
//!       │            ▼
//!       │  ┌──────────────────┐
//!       └─▶│ AwaitingResponse │
//!          └──────────────────┘
//!                    │
//!                    ▼
//!          ┌──────────────────┐
//!          │      Parsed      │
//!          └──────────────────┘
//!                    │
//!                    ▼
//!                 Closed
//! ```
//!
//! A failure in any state drops the flow, which closes the connection.
//!
//! # Example
//!
//! ```no_run
//! use barehttp::Client;
//!
//! let client = Client::new();
//!
//! let res = client.get("http://example.test/index.html")?;
//! println!("{}: {:?}", res.code(), res.body());
//!
//! let res = client.post("http://example.test/form", &[("name", "Jane")])?;
//! assert_eq!(res.code(), 200);
//! # Ok::<(), barehttp::Error>(())
//! ```

mod call;
pub use call::{encode_form, Call};

mod flow;
pub use flow::{state, Flow, SendHeadersResult};


use crate::transport::{Connect, TcpConnector};
use crate::{Config, Method, Response, Result};

/// Performs GET and POST requests, one connection per request.
#[derive(Debug, Clone, Default)]
pub struct Client<C = TcpConnector> {
    connector: C,
    config: Config,
}

impl Client<TcpConnector> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Client {
            connector: TcpConnector,
            config,
        }
    }
}

impl<C: Connect> Client<C> {
    /// Use another way of opening connections than plain TCP.
    pub fn with_connector(connector: C, config: Config) -> Self {
        Client { connector, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get(&self, url: &str) -> Result<Response> {
        self.request(Method::Get, url, &[])
    }

    /// POST `params` form encoded. An empty slice sends an empty body.
    pub fn post(&self, url: &str, params: &[(&str, &str)]) -> Result<Response> {
        self.request(Method::Post, url, params)
    }

    /// Dispatch on a method name.
    ///
    /// Only the exact string `"POST"` makes a POST, every other name makes
    /// a GET (see [`Method::from_command`]). `params` are only sent for POST.
    pub fn command(&self, url: &str, method: &str, params: &[(&str, &str)]) -> Result<Response> {
        match Method::from_command(method) {
            Method::Post => self.post(url, params),
            Method::Get => self.get(url),
        }
    }

    pub fn request(&self, method: Method, url: &str, params: &[(&str, &str)]) -> Result<Response> {
        let call = Call::new(method, url, params, &self.config)?;
        self.run(call)
    }

    fn run(&self, call: Call) -> Result<Response> {
        let flow = Flow::connect(call, &self.connector, &self.config)?;

        let flow = match flow.send_headers()? {
            SendHeadersResult::SendBody(flow) => flow.send_body()?.proceed(),
            SendHeadersResult::AwaitResponse(flow) => flow,
        };

        let (parsed, flow) = flow.receive()?;

        flow.close();

        Ok(parsed.into())
    }
}
