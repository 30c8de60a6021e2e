use std::fmt;
use std::io::{Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};

use crate::config::Decoration;
use crate::error::RelayError;
use crate::relay::chunk::{process_chunk, ChunkStatus, CHUNK_SIZE};

/// Which of the child's output streams a channel carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// Counters for one channel, reported when the relay finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub chunks: u64,
    pub bytes: u64,
}

/// One relayed stream: the read end of the child's pipe, the decoration,
/// and the destination it is forwarded to.
///
/// The source is released exactly once, when the channel closes. A closed
/// channel never touches the destination again.
pub struct StreamChannel<R, W> {
    kind: StreamKind,
    source: Option<R>,
    decoration: Decoration,
    sink: W,
    buf: Box<[u8]>,
    stats: ChannelStats,
}

impl<R, W> StreamChannel<R, W>
where
    R: Read + AsRawFd,
    W: Write,
{
    pub fn new(kind: StreamKind, source: R, decoration: Decoration, sink: W) -> Self {
        Self {
            kind,
            source: Some(source),
            decoration,
            sink,
            buf: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
            stats: ChannelStats::default(),
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Descriptor to wait on, or `None` once closed.
    pub fn raw_fd(&self) -> Option<RawFd> {
        self.source.as_ref().map(AsRawFd::as_raw_fd)
    }

    pub fn stats(&self) -> ChannelStats {
        self.stats
    }

    /// Forwards one chunk. Closes the channel on end-of-stream.
    ///
    /// Calling this on a closed channel is a no-op that reports `Closed`.
    pub fn pump(&mut self) -> Result<ChunkStatus, RelayError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(ChunkStatus::Closed);
        };

        let status = process_chunk(&self.decoration, source, &mut self.sink, &mut self.buf)
            .map_err(|source| RelayError::Io {
                stream: self.kind,
                source,
            })?;

        match status {
            ChunkStatus::Closed => {
                tracing::debug!(stream = %self.kind, "end of stream");
                self.close();
            }
            ChunkStatus::Active(0) => {}
            ChunkStatus::Active(n) => {
                self.stats.chunks += 1;
                self.stats.bytes += n as u64;
                tracing::trace!(stream = %self.kind, bytes = n, "forwarded chunk");
            }
        }
        Ok(status)
    }

    /// Releases the source descriptor. Idempotent.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            tracing::debug!(stream = %self.kind, "channel closed");
        }
    }

    /// Consumes the channel and returns its destination.
    pub fn into_sink(self) -> W {
        self.sink
    }
}
