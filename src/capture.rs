//! In-memory capture for asserting on log output
//!
//! `LineCapture` records everything written to it plus the sequence of
//! `write`/`flush` calls, so tests can check both content and delivery.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::sink::SharedSink;

/// A call received by a [`LineCapture`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// `write` with the number of bytes accepted
    Write(usize),
    Flush,
}

#[derive(Debug, Default)]
struct Captured {
    data: Vec<u8>,
    events: Vec<CaptureEvent>,
}

/// Writer that keeps its output in memory
///
/// Clones share the same buffer; hand one clone to a sink and keep another to
/// read back what was logged.
#[derive(Debug, Clone, Default)]
pub struct LineCapture {
    inner: Arc<Mutex<Captured>>,
}

impl LineCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink writing into this capture
    pub fn sink(&self) -> SharedSink {
        SharedSink::labeled(self.clone(), "capture")
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&inner.data).into_owned()
    }

    /// Captured output split on `\n`, without terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Every `write`/`flush` call, in the order received
    pub fn events(&self) -> Vec<CaptureEvent> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .clone()
    }

    /// Number of `write` calls received
    pub fn write_count(&self) -> usize {
        self.count(|event| matches!(event, CaptureEvent::Write(_)))
    }

    /// Number of `flush` calls received
    pub fn flush_count(&self) -> usize {
        self.count(|event| matches!(event, CaptureEvent::Flush))
    }

    fn count(&self, pred: impl Fn(&CaptureEvent) -> bool) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .iter()
            .filter(|event| pred(*event))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .data
            .is_empty()
    }

    /// Drop captured output and reset the counters
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *inner = Captured::default();
    }
}

impl Write for LineCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.events.push(CaptureEvent::Write(buf.len()));
        inner.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.events.push(CaptureEvent::Flush);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_through_sink() {
        let capture = LineCapture::new();
        let sink = capture.sink();

        sink.write_line("one").unwrap();
        sink.write_line("two").unwrap();

        assert_eq!(capture.contents(), "one\ntwo\n");
        assert_eq!(capture.lines(), vec!["one", "two"]);
        assert_eq!(
            capture.events(),
            vec![
                CaptureEvent::Write(4),
                CaptureEvent::Flush,
                CaptureEvent::Write(4),
                CaptureEvent::Flush,
            ]
        );
        assert_eq!(capture.write_count(), 2);
        assert_eq!(capture.flush_count(), 2);
    }

    #[test]
    fn test_clear_resets_everything() {
        let capture = LineCapture::new();
        capture.sink().write_line("gone").unwrap();
        capture.clear();

        assert!(capture.is_empty());
        assert!(capture.events().is_empty());
    }
}
