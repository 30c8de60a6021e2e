//! One read in, one decorated write sequence out.
//!
//! Framing happens at the granularity of a single `read(2)`, not at line
//! boundaries. A line the child writes may be split across two chunks, and
//! each half gets its own prefix and suffix. This keeps the relay
//! non-blocking and cheap; the cost is that interleaving with the other
//! stream is only approximately line-aligned.

use std::io::{self, Read, Write};

use crate::config::Decoration;

/// Size of the per-channel scratch buffer.
pub const CHUNK_SIZE: usize = 4096;

/// Result of framing one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    /// The source reported end-of-stream; nothing was written.
    Closed,
    /// `n` payload bytes were forwarded (0 on a spurious wakeup).
    Active(usize),
}

/// Reads once from `source` and forwards what was read to `destination`,
/// wrapped in `decoration`.
///
/// Short writes are re-issued until every byte is out. A write that accepts
/// zero bytes is treated as a hard error rather than retried forever. Any
/// read or write error is returned as-is; bytes already written stay
/// written.
pub fn process_chunk<R, W>(
    decoration: &Decoration,
    source: &mut R,
    destination: &mut W,
    buf: &mut [u8],
) -> io::Result<ChunkStatus>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let n = loop {
        match source.read(buf) {
            Ok(n) => break n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            // Readiness was reported but the pipe is empty again.
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(ChunkStatus::Active(0)),
            Err(e) => return Err(e),
        }
    };

    if n == 0 {
        return Ok(ChunkStatus::Closed);
    }

    if !decoration.prefix.is_empty() {
        destination.write_all(&decoration.prefix)?;
    }
    destination.write_all(&buf[..n])?;
    if !decoration.suffix.is_empty() {
        destination.write_all(&decoration.suffix)?;
    }
    destination.flush()?;

    Ok(ChunkStatus::Active(n))
}
