//! Forwarding of the child's stdout and stderr with decoration.

pub mod channel;
pub mod chunk;
pub mod mux;

pub use channel::{ChannelStats, StreamChannel, StreamKind};
pub use chunk::{process_chunk, ChunkStatus, CHUNK_SIZE};
pub use mux::{run_loop, wait_readable, Readiness, RelayStats, POLL_TIMEOUT};
