use url::form_urlencoded;
use url::{Host, Url};

use crate::header::build_headers;
use crate::{Config, Error, Method, Result};

/// Everything needed to perform one request, derived from method, url and form params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    method: Method,
    host: String,
    port: u16,
    target: String,
    headers: String,
    body: Option<String>,
}

impl Call {
    pub fn new(
        method: Method,
        url: &str,
        params: &[(&str, &str)],
        config: &Config,
    ) -> Result<Self> {
        let written_port = has_written_port(url);
        let url = Url::parse(url)?;

        // Hostname as used for the Host header, ipv6 in brackets.
        let host_header = url
            .host_str()
            .ok_or_else(|| Error::InvalidUrl(format!("{} has no host", url)))?
            .to_string();

        let host = match url.host() {
            Some(Host::Ipv6(addr)) => addr.to_string(),
            _ => host_header.clone(),
        };

        // url drops a written port equal to the scheme default.
        let port = match url.port() {
            Some(port) => port,
            None if written_port => url.port_or_known_default().unwrap_or(config.default_port),
            None => config.default_port,
        };

        let mut target = match url.path() {
            "" => "/".to_string(),
            path => path.to_string(),
        };
        if let Some(query) = url.query() {
            target.push('?');
            target.push_str(query);
        }

        let body = method.has_request_body().then(|| encode_form(params));

        let headers = build_headers(
            method,
            &host_header,
            &config.user_agent,
            body.as_ref().map(|b| b.len()),
        );

        Ok(Call {
            method,
            host,
            port,
            target,
            headers,
            body,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Host to connect to.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The request-target of the request line.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn headers(&self) -> &str {
        &self.headers
    }

    /// Form encoded body. Always `Some` for POST, even without params.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Request line, headers and the blank line ending them.
    pub fn head(&self) -> String {
        format!(
            "{} {} HTTP/1.1\r\n{}\r\n",
            self.method, self.target, self.headers
        )
    }
}

/// Whether the authority of `raw` ends in `:digits`.
fn has_written_port(raw: &str) -> bool {
    let Some((_, rest)) = raw.trim().split_once("//") else {
        return false;
    };

    let authority = rest
        .split(|c: char| matches!(c, '/' | '?' | '#' | '\\'))
        .next()
        .unwrap_or_default();

    // Skip userinfo and ipv6 literals, they may hold ':' too.
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let after_host = match host_port.rfind(']') {
        Some(i) => &host_port[i + 1..],
        None => host_port,
    };

    match after_host.rsplit_once(':') {
        Some((_, digits)) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Encode params as `application/x-www-form-urlencoded`, keeping their order.
pub fn encode_form(params: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

#[cfg(test)]
mod test {
    use super::*;

    fn call(method: Method, url: &str) -> Call {
        Call::new(method, url, &[], &Config::default()).unwrap()
    }

    #[test]
    fn empty_path_is_slash() {
        assert_eq!(call(Method::Get, "http://q.test").target(), "/");
        assert_eq!(call(Method::Get, "http://q.test/").target(), "/");
        // Non-special schemes keep an empty path.
        assert_eq!(call(Method::Get, "foo://q.test").target(), "/");
    }

    #[test]
    fn path_and_query() {
        let c = call(Method::Get, "http://q.test/a/b?x=1&y=2#frag");
        assert_eq!(c.target(), "/a/b?x=1&y=2");
    }

    #[test]
    fn default_port_is_80() {
        assert_eq!(call(Method::Get, "http://q.test/").port(), 80);
        // No scheme based inference.
        assert_eq!(call(Method::Get, "https://q.test/").port(), 80);
        assert_eq!(call(Method::Get, "http://q.test:8080/").port(), 8080);
    }

    #[test]
    fn written_port_is_kept() {
        assert_eq!(call(Method::Get, "https://q.test:443/").port(), 443);
        assert_eq!(call(Method::Get, "http://u:p@q.test:80/x").port(), 80);
        assert_eq!(call(Method::Get, "http://[::1]:80/").port(), 80);

        let config = Config::new().default_port(8000);
        let c = Call::new(Method::Get, "http://q.test:80/", &[], &config).unwrap();
        assert_eq!(c.port(), 80);

        // Empty port is no port.
        let c = Call::new(Method::Get, "http://q.test:/", &[], &config).unwrap();
        assert_eq!(c.port(), 8000);
    }

    #[test]
    fn written_port_detection() {
        assert!(has_written_port("http://q.test:80"));
        assert!(has_written_port("http://q.test:80/a:1?b=:2#:3"));
        assert!(!has_written_port("http://q.test/a:1"));
        assert!(!has_written_port("http://user:pw@q.test/"));
        assert!(!has_written_port("http://[::1]/"));
        assert!(!has_written_port("q.test:80"));
    }

    #[test]
    fn configured_default_port() {
        let config = Config::new().default_port(8000);
        let c = Call::new(Method::Get, "http://q.test/", &[], &config).unwrap();
        assert_eq!(c.port(), 8000);
    }

    #[test]
    fn ipv6_host() {
        let c = call(Method::Get, "http://[::1]:9000/");
        assert_eq!(c.host(), "::1");
        assert!(c.headers().contains("Host: [::1]\r\n"));
    }

    #[test]
    fn host_header_has_no_port() {
        let c = call(Method::Get, "http://Q.Test:8080/x");
        assert_eq!(c.host(), "q.test");
        assert!(c.headers().contains("Host: q.test\r\n"));
    }

    #[test]
    fn get_head() {
        let c = Call::new(Method::Get, "http://q.test/p", &[], &Config::new().user_agent("ua"))
            .unwrap();

        assert_eq!(
            c.head(),
            "GET /p HTTP/1.1\r\n\
             User-Agent: ua\r\n\
             Accept: */*\r\n\
             Connection: close\r\n\
             Host: q.test\r\n\
             \r\n"
        );
        assert_eq!(c.body(), None);
    }

    #[test]
    fn get_ignores_params() {
        let c = Call::new(Method::Get, "http://q.test/", &[("a", "1")], &Config::default())
            .unwrap();
        assert_eq!(c.body(), None);
        assert_eq!(c.target(), "/");
    }

    #[test]
    fn post_body_and_length() {
        let params = [("name", "Jane Doe"), ("lang", "rust&c"), ("é", "1")];
        let c = Call::new(Method::Post, "http://q.test/f", &params, &Config::default()).unwrap();

        let body = c.body().unwrap();
        assert_eq!(body, "name=Jane+Doe&lang=rust%26c&%C3%A9=1");
        assert!(c
            .headers()
            .contains(&format!("Content-Length: {}\r\n", body.len())));
    }

    #[test]
    fn post_without_params() {
        let c = call(Method::Post, "http://q.test/f");
        assert_eq!(c.body(), Some(""));
        assert!(c.headers().contains("Content-Length: 0\r\n"));
        assert!(c
            .headers()
            .contains("Content-Type: application/x-www-form-urlencoded\r\n"));
    }

    #[test]
    fn form_order_is_kept() {
        assert_eq!(encode_form(&[("b", "2"), ("a", "1")]), "b=2&a=1");
        assert_eq!(encode_form(&[]), "");
    }

    #[test]
    fn relative_url() {
        let r = Call::new(Method::Get, "q.test/x", &[], &Config::default());
        assert!(matches!(r, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn url_without_host() {
        let r = Call::new(Method::Get, "mailto:me@q.test", &[], &Config::default());
        assert!(matches!(r, Err(Error::InvalidUrl(_))));
    }
}
