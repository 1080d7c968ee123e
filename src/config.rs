use std::time::Duration;

/// User agent sent when nothing else is configured.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:47.0) Gecko/20100101 Firefox/47.0";

/// Port used when the url has none. There is no https, so no 443.
pub const DEFAULT_PORT: u16 = 80;

/// Settings shared by every request made through a [`Client`](crate::Client).
///
/// The defaults reproduce a plain blocking client: no timeouts anywhere,
/// which means a peer that never closes the connection blocks the caller
/// forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) user_agent: String,
    pub(crate) default_port: u16,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) read_timeout: Option<Duration>,
    pub(crate) write_timeout: Option<Duration>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Set connect, read and write timeout in one go.
    pub fn timeout(self, timeout: Option<Duration>) -> Self {
        self.connect_timeout(timeout)
            .read_timeout(timeout)
            .write_timeout(timeout)
    }

    pub fn get_user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn get_default_port(&self) -> u16 {
        self.default_port
    }

    pub fn get_connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn get_read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    pub fn get_write_timeout(&self) -> Option<Duration> {
        self.write_timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_port: DEFAULT_PORT,
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
        }
    }
}
