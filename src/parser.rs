use httparse::EMPTY_HEADER;

use crate::{Error, Result};

/// Max number of headers decomposed by [`decompose_headers`].
pub const MAX_RESPONSE_HEADERS: usize = 128;

const HEAD_END: &str = "\r\n\r\n";
const CRLF: &str = "\r\n";

/// A response split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub code: u16,
    /// Header lines as received, trimmed, without key/value decomposition.
    pub headers: Vec<String>,
    /// `None` when there is no body, which is not the same as an empty body.
    pub body: Option<String>,
}

/// Split a complete response text into status code, header lines and body.
///
/// The text is cut at the first blank line. If there is none, everything is
/// taken to be status line and headers and the body is absent. Only the
/// status line must be well formed: its second whitespace separated token is
/// the status code.
pub fn parse_response(raw: &str) -> Result<ParsedResponse> {
    let (head, tail) = match raw.split_once(HEAD_END) {
        Some((head, tail)) => (head, Some(tail)),
        None => {
            debug!("Response has no end of headers");
            (raw, None)
        }
    };

    let mut lines = head.split(CRLF);

    // split() always yields at least one item.
    let status_line = lines.next().unwrap_or_default().trim();
    let code = parse_status_code(status_line)?;

    let headers = lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    // An all-whitespace body is no body.
    let body = tail
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from);

    Ok(ParsedResponse {
        code,
        headers,
        body,
    })
}

fn parse_status_code(status_line: &str) -> Result<u16> {
    let mut tokens = status_line.split_whitespace();

    // HTTP version
    tokens.next();

    let Some(token) = tokens.next() else {
        return Err(Error::MalformedResponse(format!(
            "status line without status code: {:?}",
            status_line
        )));
    };

    match token.parse::<i64>() {
        Ok(n) => u16::try_from(n).map_err(|_| {
            Error::MalformedResponse(format!("status code out of range: {:?}", token))
        }),
        Err(_) => Err(Error::MalformedResponse(format!(
            "status code is not a number: {:?}",
            token
        ))),
    }
}

/// Decompose raw header lines into `(name, value)` pairs.
///
/// Each line is parsed on its own. Lines that are not `name: value`, such as
/// folded continuations, are skipped. At most [`MAX_RESPONSE_HEADERS`] pairs
/// are returned.
pub(crate) fn decompose_headers(lines: &[String]) -> Vec<(String, String)> {
    lines
        .iter()
        .filter_map(|line| match decompose_line(line) {
            Ok(pair) => Some(pair),
            Err(e) => {
                debug!("Skip header line {:?}: {}", line, e);
                None
            }
        })
        .take(MAX_RESPONSE_HEADERS)
        .collect()
}

fn decompose_line(line: &str) -> Result<(String, String)> {
    let block = format!("{}{}", line, HEAD_END);

    let mut headers = [EMPTY_HEADER; 1];

    match httparse::parse_headers(block.as_bytes(), &mut headers)? {
        httparse::Status::Complete((_, [h])) => {
            let value = String::from_utf8_lossy(h.value).into_owned();
            Ok((h.name.to_string(), value))
        }
        _ => Err(Error::MalformedResponse("not a single header line".into())),
    }
}
