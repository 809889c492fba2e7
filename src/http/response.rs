use std::path::PathBuf;

use anyhow::Context;
use bytes::Bytes;

use crate::config::Config;
use crate::http::body::{Body, ChunkCursor};
use crate::http::mime;
use crate::http::request::{Method, Request};
use crate::http::resolver::{Resolution, Resolver};

/// HTTP status codes this server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 300 Moved Permanently (reserved, never produced)
    MovedPermanently,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::MovedPermanently => 300,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
        }
    }
}

const PAGE_400: &[u8] = b"<html>\
<head><title>400 Bad Request</title></head>\
<body><h1 style=\"text-align: center\">Bad Request 400</h1>\
<p style=\"text-align: center\">bad request to the server!</p></body>\
</html>";

const PAGE_403: &[u8] = b"<html>\
<head><title>403 Forbidden</title></head>\
<body><h1 style=\"text-align: center\">Forbidden 403</h1>\
<p style=\"text-align: center\">Action Forbidden</p></body>\
</html>";

const PAGE_404: &[u8] = b"<html>\
<head><title>404 Not Found</title></head>\
<body><h1 style=\"text-align: center\">File Not Found! 404</h1>\
<p style=\"text-align: center\">The requested file was not found.</p></body>\
</html>";

/// The fixed HTML blob served for an error status. Opaque content, keyed
/// by code only.
pub fn error_page(status: StatusCode) -> &'static [u8] {
    match status {
        StatusCode::Forbidden => PAGE_403,
        StatusCode::NotFound => PAGE_404,
        _ => PAGE_400,
    }
}

/// The server's reply to one request.
///
/// `content_length` always equals the total bytes the body will produce,
/// decided at construction time from the filesystem.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    /// Version token echoed from the request
    pub version: String,
    pub content_type: &'static str,
    pub content_length: u64,
    /// Connection mode advertised to the client
    pub connection: &'static str,
    /// Seconds advertised in the Keep-Alive header
    pub keep_alive_secs: u64,
    pub body: Body,
}

/// Builds responses from parsed requests.
///
/// Holds the immutable pieces the decision needs: the document root, the
/// resolver with its forbidden set, the chunking threshold, and the
/// keep-alive value to advertise. The status tables and error pages are
/// static data; nothing here mutates after construction.
#[derive(Debug)]
pub struct ResponseBuilder {
    root: PathBuf,
    resolver: Resolver,
    chunk_size: usize,
    keep_alive_secs: u64,
}

impl ResponseBuilder {
    pub fn new(cfg: &Config) -> Self {
        Self {
            root: cfg.root_dir.clone(),
            resolver: Resolver::new(cfg.forbidden_set()),
            chunk_size: cfg.chunk_size,
            keep_alive_secs: cfg.idle_timeout_secs,
        }
    }

    /// Decides the status code and assembles headers and body.
    ///
    /// First matching rule wins: malformed line → 400, missing resource →
    /// 404, traversal or deny-listed → 403, GET → 200, POST with complete
    /// metadata → 200 else 400, any other method → 400.
    ///
    /// The only failure path is a servable file whose extension has no MIME
    /// mapping (or a filesystem race on an existing file); the caller drops
    /// the connection rather than answering.
    pub async fn build(&self, request: &Request) -> anyhow::Result<Response> {
        if !request.valid {
            // Reset to canonical defaults so header construction never
            // touches fields the parser left unset.
            let request = Request::canonical(&self.root);
            return Ok(self.error_response(StatusCode::BadRequest, &request.version));
        }

        match self
            .resolver
            .classify(&request.target, &request.resource)
            .await
        {
            Resolution::Missing => {
                Ok(self.error_response(StatusCode::NotFound, &request.version))
            }
            Resolution::Traversal | Resolution::Forbidden => {
                Ok(self.error_response(StatusCode::Forbidden, &request.version))
            }
            Resolution::Ok => match request.method {
                Method::Get => self.resource_response(request).await,
                Method::Post => {
                    let metadata_complete = request
                        .content_type
                        .as_deref()
                        .is_some_and(|value| !value.is_empty())
                        && request.content_length != 0;
                    if metadata_complete {
                        self.resource_response(request).await
                    } else {
                        Ok(self.error_response(StatusCode::BadRequest, &request.version))
                    }
                }
                Method::Unsupported => {
                    Ok(self.error_response(StatusCode::BadRequest, &request.version))
                }
            },
        }
    }

    fn error_response(&self, status: StatusCode, version: &str) -> Response {
        let page = error_page(status);
        Response {
            status,
            version: version.to_string(),
            content_type: "text/html",
            content_length: page.len() as u64,
            connection: "keep-alive",
            keep_alive_secs: self.keep_alive_secs,
            body: Body::Full(Bytes::from_static(page)),
        }
    }

    async fn resource_response(&self, request: &Request) -> anyhow::Result<Response> {
        let content_type = mime::for_path(&request.resource).with_context(|| {
            format!(
                "no content type mapping for {}",
                request.resource.display()
            )
        })?;

        let size = tokio::fs::metadata(&request.resource)
            .await
            .with_context(|| format!("stat {}", request.resource.display()))?
            .len();

        let body = if size > self.chunk_size as u64 {
            Body::Chunked(ChunkCursor::open(&request.resource, size, self.chunk_size).await?)
        } else {
            Body::Full(Bytes::from(tokio::fs::read(&request.resource).await?))
        };

        Ok(Response {
            status: StatusCode::Ok,
            version: request.version.clone(),
            content_type,
            content_length: size,
            connection: "keep-alive",
            keep_alive_secs: self.keep_alive_secs,
            body,
        })
    }
}
