//! # JSON-Lines Output
//!
//! Port implementation that serializes each item as one line of JSON.

use std::io::Write;

use parking_lot::Mutex;
use serde::Serialize;

use mlac_operator::{Port, PortError};

/// Writes each emitted item as a single JSON line.
pub struct JsonLinesPort<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesPort<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer, e.g. to inspect a buffer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<T, W> Port<T> for JsonLinesPort<W>
where
    T: Serialize,
    W: Write + Send,
{
    fn send(&self, item: T) -> Result<(), PortError> {
        let line = serde_json::to_string(&item).map_err(|e| PortError::Rejected(e.to_string()))?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|e| PortError::Rejected(e.to_string()))
    }
}
