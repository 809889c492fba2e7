use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;

/// HTTP request methods.
///
/// Only GET and POST are served. Any other token on an otherwise
/// well-formed request line is carried as `Unsupported` and rejected with
/// 400 during response building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
    /// POST - Submit data to a resource
    Post,
    /// Anything else - parsed, never served
    Unsupported,
}

impl Method {
    /// Recognizes a method token byte-exactly; `b"get"` is `Unsupported`.
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => Method::Get,
            b"POST" => Method::Post,
            _ => Method::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Unsupported => "UNSUPPORTED",
        }
    }
}

/// Represents one parsed client request.
///
/// Constructed once per received byte buffer and immutable afterwards.
/// When `valid` is false the parser left every other field at its default;
/// consumers must reset to [`Request::canonical`] before touching them.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, or unsupported)
    pub method: Method,
    /// Normalized request target, e.g. "/index.html" (the bare "/" is
    /// already mapped to "/index.html")
    pub target: String,
    /// The target joined under the document root, e.g. "webroot/index.html"
    pub resource: PathBuf,
    /// HTTP version token, echoed verbatim into the response
    pub version: String,
    /// Request body, POST only
    pub body: Option<Bytes>,
    /// Content-Type header value, POST only
    pub content_type: Option<String>,
    /// Content-Length header value, POST only, 0 when absent
    pub content_length: usize,
    /// False when the request line does not split into exactly three tokens
    pub valid: bool,
}

impl Request {
    /// Marker value for a request line that could not be parsed.
    pub fn invalid() -> Self {
        Self {
            method: Method::Unsupported,
            target: String::new(),
            resource: PathBuf::new(),
            version: String::new(),
            body: None,
            content_type: None,
            content_length: 0,
            valid: false,
        }
    }

    /// The safe default a malformed request is reset to before response
    /// headers are built: `GET / HTTP/1.1`, no body, no metadata.
    pub fn canonical(root: &Path) -> Self {
        Self {
            method: Method::Get,
            target: "/".to_string(),
            resource: resource_under(root, "/"),
            version: "HTTP/1.1".to_string(),
            body: None,
            content_type: None,
            content_length: 0,
            valid: true,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.method.as_str(),
            self.target,
            self.version
        )
    }
}

/// Prefixes a root-relative target with the document root. The target keeps
/// its leading slash, mirroring plain byte concatenation: `webroot` + `/a`
/// becomes `webroot/a`.
pub fn resource_under(root: &Path, target: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", root.display(), target))
}
