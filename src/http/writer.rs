use std::io;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::body::Body;
use crate::http::response::Response;

/// Serializes the status line and header block. The header set is fixed:
/// Content-Length, Content-Type, Keep-Alive, Connection, in that order.
pub fn serialize_headers(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    buf.extend_from_slice(format!("Content-Length: {}\r\n", resp.content_length).as_bytes());
    buf.extend_from_slice(format!("Content-Type: {}\r\n", resp.content_type).as_bytes());
    buf.extend_from_slice(format!("Keep-Alive: timeout={}\r\n", resp.keep_alive_secs).as_bytes());
    buf.extend_from_slice(format!("Connection: {}\r\n", resp.connection).as_bytes());

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Owns one response on its way out: the serialized header block plus the
/// body source.
pub struct ResponseWriter {
    header: Vec<u8>,
    body: Body,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        let header = serialize_headers(&response);
        Self {
            header,
            body: response.body,
        }
    }

    /// Sends the header block, then drains the body. A chunked body is
    /// written back-to-back until the cursor is exhausted, within this one
    /// write attempt.
    pub async fn write_to_stream(mut self, stream: &mut TcpStream) -> io::Result<()> {
        stream.write_all(&self.header).await?;

        match &mut self.body {
            Body::Full(data) => stream.write_all(data).await?,
            Body::Chunked(cursor) => {
                while let Some(chunk) = cursor.next_chunk().await? {
                    stream.write_all(&chunk).await?;
                }
            }
        }

        stream.flush().await
    }
}
