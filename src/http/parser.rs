use std::path::Path;

use bytes::Bytes;

use crate::http::request::{resource_under, Method, Request};

/// Turns one received byte buffer into a [`Request`].
///
/// The first line must split on single spaces into exactly three tokens
/// (method, target, version); anything else yields the invalid marker.
/// Parsing never aborts once the request line is well-formed — missing POST
/// metadata is carried as defaults and surfaces later as a 400, not here.
pub fn parse_request(buf: &[u8], root: &Path) -> Request {
    // Everything up to the first line terminator, or the whole buffer when
    // the terminator is absent.
    let line_end = find(buf, b"\r\n").unwrap_or(buf.len());
    let tokens: Vec<&[u8]> = buf[..line_end].split(|&b| b == b' ').collect();

    if tokens.len() != 3 {
        return Request::invalid();
    }

    let method = Method::from_token(tokens[0]);
    let raw_target = String::from_utf8_lossy(tokens[1]).into_owned();
    let version = String::from_utf8_lossy(tokens[2]).into_owned();

    // Home page
    let target = if raw_target == "/" {
        "/index.html".to_string()
    } else {
        raw_target
    };
    let resource = resource_under(root, &target);

    let mut request = Request {
        method,
        target,
        resource,
        version,
        body: None,
        content_type: None,
        content_length: 0,
        valid: true,
    };

    if method == Method::Post {
        // Each field comes from an independent pattern search over the raw
        // buffer rather than a structured header parse. The body is taken
        // as everything after the first blank line, which assumes the body
        // itself contains no \r\n\r\n.
        request.content_length = scan_header(buf, b"Content-Length:")
            .and_then(|v| std::str::from_utf8(v).ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);

        request.content_type = scan_header(buf, b"Content-Type:")
            .map(|v| String::from_utf8_lossy(v).trim().to_string());

        request.body = find(buf, b"\r\n\r\n")
            .map(|at| Bytes::copy_from_slice(&buf[at + 4..]))
            .filter(|body| !body.is_empty());
    }

    request
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Value of the first `name`-prefixed line, i.e. the bytes between the
/// pattern and the next line terminator. Case-sensitive by design.
fn scan_header<'a>(buf: &'a [u8], name: &[u8]) -> Option<&'a [u8]> {
    let start = find(buf, name)? + name.len();
    let rest = &buf[start..];
    let end = find(rest, b"\r\n")?;
    Some(&rest[..end])
}
