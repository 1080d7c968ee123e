use std::fmt;

use crate::Method;

/// Content type of every request body this client sends.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Content types a request body may be declared as.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[FORM_URLENCODED];

/// Format a single `name: value\r\n` header line.
pub fn header_line(name: &str, value: impl fmt::Display) -> String {
    format!("{}: {}\r\n", name, value)
}

/// Assemble the header block for a request.
///
/// The base headers always come first and in this order: `User-Agent`,
/// `Accept`, `Connection`, `Host`. A POST appends `Content-Length` and
/// `Content-Type`. Every line ends in CRLF, but the blank line closing the
/// header section is left to the caller.
pub fn build_headers(
    method: Method,
    host: &str,
    user_agent: &str,
    content_length: Option<usize>,
) -> String {
    let mut headers = String::new();

    headers.push_str(&header_line("User-Agent", user_agent));
    headers.push_str(&header_line("Accept", "*/*"));
    headers.push_str(&header_line("Connection", "close"));
    headers.push_str(&header_line("Host", host));

    if method.has_request_body() {
        headers.push_str(&header_line("Content-Length", content_length.unwrap_or(0)));
        headers.push_str(&header_line("Content-Type", FORM_URLENCODED));
    }

    headers
}
