// src/exec/sink.rs

//! Destinations for relayed child output.
//!
//! The executor never touches the process-wide stdout/stderr directly. It
//! writes to the handles in [`OutputSinks`], which production code points at
//! the real streams and tests point at [`SharedBuffer`]s.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// A writer shared between the caller and the executor's tee tasks.
pub type Sink = Arc<Mutex<dyn Write + Send>>;

/// Where teed stdout and stderr bytes go.
#[derive(Clone)]
pub struct OutputSinks {
    pub stdout: Sink,
    pub stderr: Sink,
}

impl OutputSinks {
    /// Relay to this process's own standard streams.
    pub fn inherit() -> Self {
        Self {
            stdout: Arc::new(Mutex::new(io::stdout())),
            stderr: Arc::new(Mutex::new(io::stderr())),
        }
    }

    /// Relay into two in-memory buffers, returned alongside the sinks.
    pub fn buffered() -> (Self, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::new();
        let err = SharedBuffer::new();
        let sinks = Self {
            stdout: Arc::new(Mutex::new(out.clone())),
            stderr: Arc::new(Mutex::new(err.clone())),
        };
        (sinks, out, err)
    }
}

impl std::fmt::Debug for OutputSinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSinks").finish_non_exhaustive()
    }
}

/// Write `bytes` to `sink` and flush, so output shows up as it arrives.
pub(crate) fn relay(sink: &Sink, bytes: &[u8]) -> io::Result<()> {
    let mut writer = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    writer.write_all(bytes)?;
    writer.flush()
}

/// A cloneable in-memory writer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
