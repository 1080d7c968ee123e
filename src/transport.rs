//! Blocking socket transport.
//!
//! A [`Connect`] opens one [`Stream`] per request. The stream is handed to a
//! [`Connection`], which owns it for the duration of the request and closes
//! it exactly once: either through [`Connection::close`] or, on any early
//! return, when the connection is dropped.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use crate::{Config, Error, Result};

/// Size of each read from the socket.
const READ_CHUNK: usize = 1024;

/// Opens streams to a remote host.
pub trait Connect {
    type Stream: Stream;

    fn connect(&self, host: &str, port: u16, config: &Config) -> io::Result<Self::Stream>;
}

/// A byte stream that can be told to disconnect.
pub trait Stream: Read + Write {
    fn disconnect(&mut self) -> io::Result<()>;
}

/// Plain TCP, resolving the host with the system resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connect for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, host: &str, port: u16, config: &Config) -> io::Result<TcpStream> {
        let stream = match config.connect_timeout {
            None => TcpStream::connect((host, port))?,
            Some(timeout) => {
                let mut last_err = None;
                let mut connected = None;

                for addr in (host, port).to_socket_addrs()? {
                    match TcpStream::connect_timeout(&addr, timeout) {
                        Ok(s) => {
                            connected = Some(s);
                            break;
                        }
                        Err(e) => last_err = Some(e),
                    }
                }

                match connected {
                    Some(s) => s,
                    None => {
                        return Err(last_err.unwrap_or_else(|| {
                            io::Error::new(ErrorKind::NotFound, "host resolved to no addresses")
                        }))
                    }
                }
            }
        };

        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;

        Ok(stream)
    }
}

impl Stream for TcpStream {
    fn disconnect(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            // The peer beat us to it.
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            r => r,
        }
    }
}

/// Exclusive owner of the stream used by one request.
pub struct Connection<S: Stream> {
    stream: S,
    closed: bool,
}

impl<S: Stream> Connection<S> {
    pub fn open<C>(connector: &C, host: &str, port: u16, config: &Config) -> Result<Self>
    where
        C: Connect<Stream = S>,
    {
        debug!("Connect to {}:{}", host, port);

        let stream = connector
            .connect(host, port, config)
            .map_err(|source| Error::Connection {
                host: host.to_string(),
                port,
                source,
            })?;

        Ok(Connection::wrap(stream))
    }

    pub(crate) fn wrap(stream: S) -> Self {
        Connection {
            stream,
            closed: false,
        }
    }

    /// Write all of `text` as utf-8 and flush.
    pub fn send_all(&mut self, text: &str) -> Result<()> {
        self.stream.write_all(text.as_bytes()).map_err(Error::Send)?;
        self.stream.flush().map_err(Error::Send)?;

        trace!("Sent {} bytes", text.len());

        Ok(())
    }

    /// Read until the peer closes the connection and decode the result as utf-8.
    pub fn receive_all(&mut self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; READ_CHUNK];

        loop {
            let n = match self.stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Receive(e)),
            };
            buffer.extend_from_slice(&chunk[..n]);
        }

        trace!("Received {} bytes", buffer.len());

        Ok(String::from_utf8(buffer)?)
    }

    pub fn close(mut self) {
        self.do_close();
    }

    fn do_close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        debug!("Close connection");

        if let Err(e) = self.stream.disconnect() {
            warn!("Failed to close connection: {}", e);
        }
    }
}

impl<S: Stream> Drop for Connection<S> {
    fn drop(&mut self) {
        self.do_close();
    }
}
