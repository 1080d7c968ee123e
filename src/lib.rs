//! Minimal http 1.1 client written directly on tcp sockets.
//!
//! Requests are formatted by hand, sent over a fresh connection and the
//! response is read until the server hangs up. Plain http only: no tls,
//! no keep-alive, no chunked bodies, no redirects.
//!
//! ```no_run
//! use barehttp::{Client, Config};
//! use std::time::Duration;
//!
//! let client = Client::with_config(Config::new().timeout(Some(Duration::from_secs(10))));
//! let res = client.command("http://example.test/", "GET", &[])?;
//! println!("{}", res);
//! # Ok::<(), barehttp::Error>(())
//! ```

#[macro_use]
extern crate log;

mod error;
pub use error::Error;
pub(crate) use error::Result;

mod config;
pub use config::{Config, DEFAULT_PORT, DEFAULT_USER_AGENT};

mod method;
pub use method::Method;

pub mod header;

pub mod transport;

mod parser;
pub use parser::{parse_response, ParsedResponse, MAX_RESPONSE_HEADERS};

mod response;
pub use response::Response;

pub mod client;
pub use client::Client;
