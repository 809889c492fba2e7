use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::TcpStream;

/// One accepted client socket plus the bookkeeping the multiplexer keeps
/// for it. Dropping a `Connection` releases the socket.
pub struct Connection {
    pub stream: TcpStream,
    pub peer: SocketAddr,
    last_active: Instant,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Self {
            stream,
            peer,
            last_active: Instant::now(),
        }
    }

    /// Marks the connection as active now.
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }
}
