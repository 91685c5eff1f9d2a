//! Diagnostic log seam used by the error normalizer.
//!
//! Every failed request produces two lines: the raw transport failure and a one-line summary.
//! Where those lines go is up to the [`DiagnosticLog`] implementation. Writes are best-effort and
//! cannot fail from the caller's point of view.

use crate::constants::DIAGNOSTIC_TARGET;
use std::sync::Mutex;

/// A sink for diagnostic lines.
pub trait DiagnosticLog: Send + Sync {
    fn write(&self, line: &str);
}

/// Forwards diagnostic lines to `tracing` at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl DiagnosticLog for TracingLog {
    fn write(&self, line: &str) {
        tracing::error!(target: DIAGNOSTIC_TARGET, "{}", line);
    }
}

/// Keeps diagnostic lines in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.lines.lock() {
            Ok(mut lines) => lines.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl DiagnosticLog for MemoryLog {
    fn write(&self, line: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line.to_owned()),
            Err(poisoned) => poisoned.into_inner().push(line.to_owned()),
        }
    }
}
