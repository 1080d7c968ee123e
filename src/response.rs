use std::fmt;

use crate::parser::{decompose_headers, ParsedResponse};

/// The outcome of a request.
///
/// Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    code: u16,
    headers: Vec<String>,
    body: Option<String>,
}

impl Response {
    pub fn new(code: u16, body: Option<String>) -> Self {
        Response {
            code,
            headers: vec![],
            body,
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// The body, or `None` if the response had none.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Raw header lines in the order received.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Value of the first header named `name`, compared case-insensitively.
    ///
    /// Lines that are not `name: value` are passed over.
    pub fn header(&self, name: &str) -> Option<String> {
        decompose_headers(&self.headers)
            .into_iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn into_body(self) -> Option<String> {
        self.body
    }
}

impl From<ParsedResponse> for Response {
    fn from(value: ParsedResponse) -> Self {
        Response {
            code: value.code,
            headers: value.headers,
            body: value.body,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Response (Code = {}):\n{}", self.code, self.body().unwrap_or(""))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse_response;

    #[test]
    fn from_parsed() {
        let parsed =
            parse_response("HTTP/1.1 201 Created\r\nLocation: /a/1\r\n\r\ncreated").unwrap();
        let r = Response::from(parsed);

        assert_eq!(r.code(), 201);
        assert_eq!(r.body(), Some("created"));
        assert_eq!(r.headers(), ["Location: /a/1".to_string()]);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let parsed = parse_response(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nX-Seq: 1\r\nx-seq: 2\r\n\r\n",
        )
        .unwrap();
        let r = Response::from(parsed);

        assert_eq!(r.header("content-type").as_deref(), Some("text/html"));
        assert_eq!(r.header("X-SEQ").as_deref(), Some("1"));
        assert_eq!(r.header("missing"), None);
    }

    #[test]
    fn header_lookup_past_folded_line() {
        let parsed = parse_response(
            "HTTP/1.1 200 OK\r\nX-Long: first\r\n  continued\r\nServer: mock\r\n\r\nok",
        )
        .unwrap();
        let r = Response::from(parsed);

        assert_eq!(r.headers()[1], "continued");
        assert_eq!(r.header("server").as_deref(), Some("mock"));
        assert_eq!(r.header("x-long").as_deref(), Some("first"));
    }

    #[test]
    fn display() {
        let r = Response::new(200, Some("hello".into()));
        assert_eq!(r.to_string(), "Response (Code = 200):\nhello");

        let r = Response::new(404, None);
        assert_eq!(r.to_string(), "Response (Code = 404):\n");
    }

    #[test]
    fn absent_and_empty_body_differ() {
        assert_ne!(Response::new(200, None), Response::new(200, Some(String::new())));
        assert_eq!(Response::new(200, Some(String::new())).body(), Some(""));
    }
}
