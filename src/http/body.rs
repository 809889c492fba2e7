use std::io;
use std::path::Path;

use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Response payload: fully materialized for small resources, streamed from
/// disk for large ones.
#[derive(Debug)]
pub enum Body {
    Full(Bytes),
    Chunked(ChunkCursor),
}

/// Lazy, forward-only, non-restartable cursor over a file's bytes.
///
/// Yields `len / chunk_size` chunks of exactly `chunk_size` bytes followed
/// by the remainder; an exact multiple produces full chunks only. The byte
/// count is fixed at construction and never recomputed mid-stream. The
/// file handle is released when the cursor is dropped, whether exhausted
/// or abandoned by a torn-down connection.
#[derive(Debug)]
pub struct ChunkCursor {
    file: File,
    remaining: u64,
    chunk_size: usize,
}

impl ChunkCursor {
    pub async fn open(path: &Path, len: u64, chunk_size: usize) -> io::Result<Self> {
        let file = File::open(path).await?;
        Ok(Self {
            file,
            remaining: len,
            chunk_size,
        })
    }

    /// The next chunk in sequence, or `None` once the cursor is exhausted.
    pub async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let take = (self.chunk_size as u64).min(self.remaining) as usize;
        let mut chunk = vec![0u8; take];
        self.file.read_exact(&mut chunk).await?;
        self.remaining -= take as u64;

        Ok(Some(Bytes::from(chunk)))
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}
