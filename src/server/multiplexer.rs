use std::collections::{HashMap, VecDeque};
use std::future::poll_fn;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::task::Poll;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::parser::parse_request;
use crate::http::response::{Response, ResponseBuilder};
use crate::http::writer::ResponseWriter;
use crate::server::connection::Connection;

/// Identity of one accepted socket in the registry.
pub type ConnId = u64;

/// What one readiness pass surfaced.
enum Event {
    /// The listener can accept a new client
    Incoming(TcpStream, SocketAddr),
    /// An open connection has bytes to read
    Readable(ConnId),
    /// A connection with a queued response can be written to
    Writable(ConnId),
    /// Periodic idle-connection sweep
    Tick,
}

/// Single-task readiness loop over the listener and every open connection.
///
/// All connection state lives here: the open-socket registry keyed by
/// [`ConnId`] and the queue of responses awaiting write readiness. At most
/// one response is in flight per socket, since a connection is read-drained
/// fully before its response is queued. The loop suspends only at the
/// readiness poll; parse, build, and send each run to completion, so a
/// stalled peer or slow disk delays every other connection for that
/// duration. That latency trade-off is inherent to the design.
pub struct Multiplexer {
    listener: TcpListener,
    connections: HashMap<ConnId, Connection>,
    pending: VecDeque<(ConnId, Response)>,
    next_id: ConnId,
    builder: ResponseBuilder,
    root: PathBuf,
    recv_buffer_size: usize,
    idle_timeout: Duration,
}

impl Multiplexer {
    pub fn new(listener: TcpListener, cfg: &Config) -> Self {
        Self {
            listener,
            connections: HashMap::new(),
            pending: VecDeque::new(),
            next_id: 0,
            builder: ResponseBuilder::new(cfg),
            root: cfg.root_dir.clone(),
            recv_buffer_size: cfg.recv_buffer_size,
            idle_timeout: cfg.idle_timeout(),
        }
    }

    /// Drives the loop until the owning future is dropped (the process
    /// interrupt cancels it from `main`). Every socket, including the
    /// listener, is released exactly once when `self` drops, pending
    /// writes included.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut sweep = tokio::time::interval(Duration::from_secs(1));

        loop {
            let event = tokio::select! {
                event = self.next_event() => event?,
                _ = sweep.tick() => Event::Tick,
            };

            match event {
                Event::Incoming(stream, peer) => self.accept(stream, peer),
                Event::Readable(id) => self.read_ready(id).await,
                Event::Writable(id) => self.write_ready(id).await,
                Event::Tick => self.drop_idle(),
            }
        }
    }

    /// One readiness pass: the listener is checked first, then reads, then
    /// pending writes, so within a pass incoming requests drain before
    /// queued responses go out. Order across connections is whatever the
    /// map iteration yields.
    async fn next_event(&self) -> io::Result<Event> {
        poll_fn(|cx| {
            if let Poll::Ready(result) = self.listener.poll_accept(cx) {
                let (stream, peer) = result?;
                return Poll::Ready(Ok(Event::Incoming(stream, peer)));
            }

            for (&id, conn) in &self.connections {
                if conn.stream.poll_read_ready(cx).is_ready() {
                    return Poll::Ready(Ok(Event::Readable(id)));
                }
            }

            for (id, _) in &self.pending {
                if let Some(conn) = self.connections.get(id) {
                    if conn.stream.poll_write_ready(cx).is_ready() {
                        return Poll::Ready(Ok(Event::Writable(*id)));
                    }
                }
            }

            Poll::Pending
        })
        .await
    }

    fn accept(&mut self, stream: TcpStream, peer: SocketAddr) {
        let id = self.next_id;
        self.next_id += 1;

        debug!("accepted connection from {peer}");
        self.connections.insert(id, Connection::new(stream, peer));
    }

    /// One bounded receive per readiness signal. An empty read means the
    /// peer closed; the connection leaves the registry with no response
    /// attempt. A request split across reads larger than the buffer is not
    /// reassembled — each receive is parsed as a complete request, a known
    /// approximation.
    async fn read_ready(&mut self, id: ConnId) {
        let Some(conn) = self.connections.get_mut(&id) else {
            return;
        };
        let peer = conn.peer;

        let mut buf = vec![0u8; self.recv_buffer_size];
        match conn.stream.try_read(&mut buf) {
            Ok(0) => {
                debug!("peer {peer} closed the connection");
                self.close(id);
            }
            Ok(received) => {
                conn.touch();
                let request = parse_request(&buf[..received], &self.root);

                match self.builder.build(&request).await {
                    Ok(response) => {
                        info!("{peer} \"{request}\" -> {}", response.status.as_u16());
                        self.pending.push_back((id, response));
                    }
                    Err(err) => {
                        warn!("dropping {peer}: {err:#}");
                        self.close(id);
                    }
                }
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                // Spurious readiness, nothing to do
            }
            Err(err) => {
                debug!("read error from {peer}: {err}");
                self.close(id);
            }
        }
    }

    /// Transmits the queued response for this socket in full: header block,
    /// then every body chunk back-to-back. A transport failure mid-send
    /// costs this one response and nothing else; the entry is dequeued
    /// either way.
    async fn write_ready(&mut self, id: ConnId) {
        let Some(at) = self.pending.iter().position(|(owner, _)| *owner == id) else {
            return;
        };
        let Some((_, response)) = self.pending.remove(at) else {
            return;
        };
        let Some(conn) = self.connections.get_mut(&id) else {
            return;
        };

        if let Err(err) = ResponseWriter::new(response)
            .write_to_stream(&mut conn.stream)
            .await
        {
            debug!("send to {} failed: {err}", conn.peer);
        }
        conn.touch();
    }

    /// Removes the connection from the registry and drops any response
    /// still queued for it. Dropping the entry closes the socket and, for
    /// a chunked response, the file handle behind the cursor.
    fn close(&mut self, id: ConnId) {
        if let Some(conn) = self.connections.remove(&id) {
            debug!("closing connection from {}", conn.peer);
        }
        self.pending.retain(|(owner, _)| *owner != id);
    }

    /// Enforces the per-connection idle timeout set at accept time.
    fn drop_idle(&mut self) {
        let expired: Vec<ConnId> = self
            .connections
            .iter()
            .filter(|(_, conn)| conn.idle_for() >= self.idle_timeout)
            .map(|(&id, _)| id)
            .collect();

        for id in expired {
            debug!("idle timeout");
            self.close(id);
        }
    }
}
