//! Phase-machine-guarded streaming sink.

use std::fmt::Display;
use std::time::Duration;

use bytes::Bytes;
use futures::{Sink, SinkExt};
use strand_core::{RenderError, RenderPhase, TimingContext};

use crate::flush::{FlushController, FlushPolicy};

/// Wall-clock budget for one streaming render. Fixed policy: when the
/// deadline fires, in-flight rendering is abandoned and the response body
/// is closed without further writes.
pub const RENDER_DEADLINE: Duration = Duration::from_secs(10);

/// Streaming sink that enforces shell-first ordering.
///
/// Every write is a transition of the [`RenderPhase`] machine; writes in an
/// illegal order return errors instead of producing interleaved output.
/// Generic over the underlying byte sink so the same driver runs against an
/// HTTP response body or an in-memory channel in tests.
pub struct StreamingSink<S, E>
where
    S: Sink<Bytes, Error = E> + Unpin,
    E: Display,
{
    inner: Option<S>,
    phase: RenderPhase,
    timing: TimingContext,
    flush: FlushController,
    pending: Vec<u8>,
    sections_sent: Vec<String>,
}

impl<S, E> StreamingSink<S, E>
where
    S: Sink<Bytes, Error = E> + Unpin,
    E: Display,
{
    /// Create a new streaming sink.
    pub fn new(sink: S, timing: TimingContext) -> Self {
        Self {
            inner: Some(sink),
            phase: RenderPhase::NotStarted,
            timing,
            flush: FlushController::default(),
            pending: Vec::new(),
            sections_sent: Vec::new(),
        }
    }

    /// Set the flush policy.
    pub fn with_flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.flush = FlushController::new(policy);
        self
    }

    /// Set the buffer threshold that forces a flush regardless of policy.
    pub fn with_max_buffer(mut self, bytes: usize) -> Self {
        let policy = self.flush.policy();
        self.flush = FlushController::new(policy).with_max_buffer(bytes);
        self
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    /// Timing recorded so far.
    pub fn timing(&self) -> &TimingContext {
        &self.timing
    }

    /// Names of sections written so far, in order.
    pub fn sections_sent(&self) -> &[String] {
        &self.sections_sent
    }

    /// Send the shell. Must be the first write.
    pub async fn send_shell(&mut self, html: &str) -> Result<(), RenderError> {
        self.phase.advance(RenderPhase::ShellReady)?;
        self.buffer(html.as_bytes());
        if self.flush.policy().flush_after_shell() {
            self.flush().await?;
        }
        self.timing.mark("shell_sent");
        Ok(())
    }

    /// Send a named section. The shell must have been sent first.
    pub async fn send_section(&mut self, name: &str, html: &str) -> Result<(), RenderError> {
        if self.phase == RenderPhase::NotStarted {
            return Err(RenderError::ShellNotSent);
        }
        self.phase.advance(RenderPhase::Streaming)?;

        self.timing.mark_section_start(name);
        self.buffer(html.as_bytes());
        if self.flush.policy().flush_after_section() || self.flush.should_flush() {
            self.flush().await?;
        }
        self.timing.mark_section_sent(name);
        self.sections_sent.push(name.to_string());
        Ok(())
    }

    /// Write the closing bytes, flush everything, and close the stream.
    pub async fn complete(&mut self, closing: &str) -> Result<(), RenderError> {
        self.phase.advance(RenderPhase::AllReady)?;
        self.buffer(closing.as_bytes());
        self.flush().await?;

        if let Some(mut inner) = self.inner.take() {
            inner
                .close()
                .await
                .map_err(|e| RenderError::Stream(e.to_string()))?;
        }
        self.timing.mark("completed");
        Ok(())
    }

    /// Abandon the render at the deadline. Pending bytes are discarded and
    /// the underlying stream is dropped, closing the response body.
    pub fn abort(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        let _ = self.phase.advance(RenderPhase::Aborted);
        self.pending.clear();
        self.inner = None;
        self.timing.mark("aborted");
    }

    /// Fail the render. Like [`abort`](Self::abort), but records the
    /// failed phase so callers can distinguish deadline from error.
    pub fn fail(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        let _ = self.phase.advance(RenderPhase::Failed);
        self.pending.clear();
        self.inner = None;
    }

    /// Flush buffered bytes to the underlying sink.
    pub async fn flush(&mut self) -> Result<(), RenderError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| RenderError::Stream("stream already closed".to_string()))?;

        let chunk = Bytes::from(std::mem::take(&mut self.pending));
        inner
            .send(chunk)
            .await
            .map_err(|e| RenderError::Stream(e.to_string()))?;
        self.flush.reset();
        Ok(())
    }

    fn buffer(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        self.flush.add_bytes(bytes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::executor::block_on;
    use futures::StreamExt;

    type TestSink = StreamingSink<mpsc::UnboundedSender<Bytes>, mpsc::SendError>;

    fn test_sink() -> (TestSink, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded();
        (StreamingSink::new(tx, TimingContext::new()), rx)
    }

    fn collect(rx: mpsc::UnboundedReceiver<Bytes>) -> Vec<u8> {
        block_on(rx.collect::<Vec<_>>())
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_stream_equals_spliced_document() {
        let (sink, rx) = test_sink();
        let mut sink = sink.with_flush_policy(FlushPolicy::AfterEachSection);

        block_on(async {
            sink.send_shell("<html><div id=\"root\">").await.unwrap();
            sink.send_section("hero", "<section>hero</section>").await.unwrap();
            sink.send_section("reviews", "<section>reviews</section>")
                .await
                .unwrap();
            sink.complete("</div></html>").await.unwrap();
        });

        assert_eq!(sink.phase(), RenderPhase::AllReady);
        assert_eq!(sink.sections_sent(), ["hero", "reviews"]);
        assert_eq!(
            collect(rx),
            b"<html><div id=\"root\"><section>hero</section><section>reviews</section></div></html>"
        );
    }

    #[test]
    fn test_section_before_shell_is_rejected() {
        let (mut sink, _rx) = test_sink();
        let err = block_on(sink.send_section("hero", "<p>x</p>")).unwrap_err();
        assert!(matches!(err, RenderError::ShellNotSent));
        assert_eq!(sink.phase(), RenderPhase::NotStarted);
    }

    #[test]
    fn test_double_shell_is_rejected() {
        let (mut sink, _rx) = test_sink();
        block_on(sink.send_shell("<html>")).unwrap();
        let err = block_on(sink.send_shell("<html>")).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTransition { .. }));
    }

    #[test]
    fn test_writes_after_complete_are_rejected() {
        let (mut sink, _rx) = test_sink();
        block_on(async {
            sink.send_shell("<html>").await.unwrap();
            sink.complete("</html>").await.unwrap();
        });
        let err = block_on(sink.send_section("late", "<p>x</p>")).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTransition { .. }));
    }

    #[test]
    fn test_abort_writes_nothing_further() {
        let (mut sink, rx) = test_sink();
        block_on(sink.send_shell("<html>")).unwrap();
        sink.abort();
        assert_eq!(sink.phase(), RenderPhase::Aborted);

        // Channel is closed; only the shell made it out.
        assert_eq!(collect(rx), b"<html>");

        let err = block_on(sink.send_section("hero", "<p>x</p>")).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTransition { .. }));
    }

    #[test]
    fn test_abort_is_idempotent() {
        let (mut sink, _rx) = test_sink();
        block_on(sink.send_shell("<html>")).unwrap();
        sink.abort();
        sink.abort();
        assert_eq!(sink.phase(), RenderPhase::Aborted);
    }

    #[test]
    fn test_manual_policy_coalesces_until_flush() {
        let (sink, rx) = test_sink();
        let mut sink = sink.with_flush_policy(FlushPolicy::Manual);

        block_on(async {
            sink.send_shell("<html>").await.unwrap();
            sink.send_section("hero", "<p>hero</p>").await.unwrap();
            sink.flush().await.unwrap();
            sink.complete("</html>").await.unwrap();
        });

        // Everything arrives, in order, regardless of chunk boundaries.
        assert_eq!(collect(rx), b"<html><p>hero</p></html>");
    }

    #[test]
    fn test_fail_closes_stream() {
        let (mut sink, rx) = test_sink();
        block_on(sink.send_shell("<html>")).unwrap();
        sink.fail();
        assert_eq!(sink.phase(), RenderPhase::Failed);
        assert_eq!(collect(rx), b"<html>");
    }
}
