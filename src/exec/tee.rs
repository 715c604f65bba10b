// src/exec/tee.rs

//! Drain a child stream into an owned buffer, relaying each chunk as it is
//! read.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::trace;

use super::sink::{Sink, relay};

const CHUNK_SIZE: usize = 8 * 1024;

/// Read `reader` to EOF. Every chunk is written to `sink` (if any) before
/// the next read, then appended to the returned buffer.
///
/// A failing sink does not stop the drain: the child must never block on a
/// full pipe because our own console went away.
pub async fn tee<R>(mut reader: R, sink: Option<Sink>, stream: &'static str) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut captured = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut relaying = sink.is_some();

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        if relaying {
            if let Some(sink) = sink.as_ref() {
                if let Err(err) = relay(sink, &chunk[..n]) {
                    trace!(stream, error = %err, "relay sink failed; buffering only");
                    relaying = false;
                }
            }
        }
        captured.extend_from_slice(&chunk[..n]);
    }

    Ok(captured)
}

/// Run [`tee`] on its own task so stdout and stderr drain concurrently.
pub fn spawn_tee<R>(
    reader: Option<R>,
    sink: Option<Sink>,
    stream: &'static str,
) -> Option<JoinHandle<std::io::Result<Vec<u8>>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    reader.map(|r| tokio::spawn(async move { tee(r, sink, stream).await }))
}

/// Wait for a tee task, treating a missing stream as empty output.
pub async fn join_tee(handle: Option<JoinHandle<std::io::Result<Vec<u8>>>>) -> std::io::Result<Vec<u8>> {
    match handle {
        None => Ok(Vec::new()),
        Some(h) => h.await.map_err(std::io::Error::other)?,
    }
}
