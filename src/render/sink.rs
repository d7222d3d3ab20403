//! Output sink adapter with a sticky error latch.

use std::io::Write;

use crate::error::Error;

use super::escape::escape_into;

/// Bookkeeping shared by every write of a render pass.
#[derive(Debug, Default)]
pub(crate) struct OutputState {
    /// Byte count of the most recent write; zero until something is written.
    pub(crate) last_write_len: usize,
    /// Newlines written by [`OutputSink::line_break`] since the last other write.
    pub(crate) trailing_breaks: usize,
    /// First error of the pass. Once set, every write becomes a no-op.
    pub(crate) error: Option<Error>,
}

impl OutputState {
    pub(crate) fn reset(&mut self) {
        self.last_write_len = 0;
        self.trailing_breaks = 0;
        self.error = None;
    }
}

/// A writer paired with the pass's [`OutputState`].
///
/// Short-lived: built for the duration of one node event.
pub(crate) struct OutputSink<'a, W: Write + ?Sized> {
    out: &'a mut W,
    state: &'a mut OutputState,
}

impl<'a, W: Write + ?Sized> OutputSink<'a, W> {
    pub(crate) fn new(out: &'a mut W, state: &'a mut OutputState) -> Self {
        Self { out, state }
    }

    #[inline]
    pub(crate) fn is_failed(&self) -> bool {
        self.state.error.is_some()
    }

    /// Latch `err` unless an earlier error is already latched.
    pub(crate) fn fail(&mut self, err: Error) {
        if self.state.error.is_none() {
            self.state.error = Some(err);
        }
    }

    /// Write literal bytes.
    pub(crate) fn emit(&mut self, bytes: &[u8]) {
        if self.is_failed() || bytes.is_empty() {
            return;
        }
        match self.out.write_all(bytes) {
            Ok(()) => {
                self.state.last_write_len = bytes.len();
                self.state.trailing_breaks = 0;
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Write `text` with `&`, `<` and `>` replaced by entities.
    pub(crate) fn escape(&mut self, text: &[u8]) {
        if self.is_failed() || text.is_empty() {
            return;
        }
        match escape_into(self.out, text) {
            Ok(written) => {
                self.state.last_write_len = written;
                self.state.trailing_breaks = 0;
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Write a newline if anything has been written in this pass.
    ///
    /// Suppresses the blank line a leading block separator would otherwise
    /// put at the very top of the output.
    pub(crate) fn line_break(&mut self) {
        if self.state.last_write_len > 0 {
            self.emit(b"\n");
            if !self.is_failed() {
                self.state.trailing_breaks += 1;
            }
        }
    }

    /// True when the output currently ends in a blank line.
    #[inline]
    pub(crate) fn at_blank_line(&self) -> bool {
        self.state.trailing_breaks >= 2
    }
}
