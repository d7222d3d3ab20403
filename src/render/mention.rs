//! Slack mention translation.
//!
//! Rewrites `@here`-style tokens into Slack's `<!here>` syntax. The
//! substituted token is written verbatim; the text around it still goes
//! through the escaper.

use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::sync::LazyLock;

use regex::bytes::Regex;
use tracing::trace;

use crate::error::{Error, Result};

use super::sink::OutputSink;

/// Pattern used when mention translation is enabled without a custom one.
///
/// Matches Slack's broadcast mentions when the `@` is not glued to a
/// preceding word (so `user@here.com` is left alone).
pub const DEFAULT_MENTION_PATTERN: &str = r"\B@(?P<mention>here|channel|everyone)\b";

/// Capture group every mention pattern must define.
pub const MENTION_GROUP: &str = "mention";

const MENTION_TEMPLATE: &[u8] = b"<!${mention}>";

/// Retained scratch capacity; larger buffers are shrunk on checkin.
const MAX_RETAINED_CAPACITY: usize = 4096;
const MAX_POOLED_BUFFERS: usize = 4;

static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_MENTION_PATTERN).unwrap());

/// Compile a mention pattern and check it exposes the `mention` group.
pub fn compile_mention_pattern(pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern)?;
    if !regex
        .capture_names()
        .any(|name| name == Some(MENTION_GROUP))
    {
        return Err(Error::MissingMentionGroup);
    }
    Ok(regex)
}

/// The compiled default pattern.
pub(crate) fn default_pattern() -> Regex {
    DEFAULT_PATTERN.clone()
}

/// Free list of byte buffers reused across substitutions.
///
/// Owned by a single translator, which is owned by a single renderer, so a
/// buffer is never visible to two render passes at once.
#[derive(Debug, Default)]
struct ScratchPool {
    free: Vec<Vec<u8>>,
}

impl ScratchPool {
    fn checkout(&mut self) -> ScratchBuffer<'_> {
        let buf = self.free.pop().unwrap_or_else(|| Vec::with_capacity(128));
        ScratchBuffer { buf, pool: self }
    }

    fn checkin(&mut self, mut buf: Vec<u8>) {
        buf.clear();
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            buf.shrink_to(MAX_RETAINED_CAPACITY);
        }
        if self.free.len() < MAX_POOLED_BUFFERS {
            self.free.push(buf);
        }
    }
}

/// A checked-out scratch buffer; returned to its pool, cleared, on drop.
struct ScratchBuffer<'p> {
    buf: Vec<u8>,
    pool: &'p mut ScratchPool,
}

impl Deref for ScratchBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for ScratchBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for ScratchBuffer<'_> {
    fn drop(&mut self) {
        self.pool.checkin(std::mem::take(&mut self.buf));
    }
}

/// Substitutes mention tokens in text leaves.
#[derive(Debug)]
pub(crate) struct MentionTranslator {
    pattern: Regex,
    scratch: ScratchPool,
}

impl MentionTranslator {
    pub(crate) fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            scratch: ScratchPool::default(),
        }
    }

    /// Escape `text` into `sink`, writing `<!name>` for every mention.
    pub(crate) fn translate<W: Write + ?Sized>(
        &mut self,
        sink: &mut OutputSink<'_, W>,
        text: &[u8],
    ) {
        if sink.is_failed() {
            return;
        }

        let mut matches = self.pattern.captures_iter(text).peekable();
        if matches.peek().is_none() {
            sink.escape(text);
            return;
        }

        let mut buf = self.scratch.checkout();
        let mut offset = 0;

        for caps in matches {
            let Some(whole) = caps.get(0) else {
                continue;
            };

            buf.clear();
            caps.expand(MENTION_TEMPLATE, &mut *buf);
            trace!(
                mention = %bstr::BStr::new(buf.as_slice()),
                at = whole.start(),
                "substituting mention"
            );

            sink.escape(&text[offset..whole.start()]);
            sink.emit(buf.as_slice());
            offset = whole.end();

            if sink.is_failed() {
                return;
            }
        }

        sink.escape(&text[offset..]);
    }

    #[cfg(test)]
    fn pooled_buffers(&self) -> usize {
        self.scratch.free.len()
    }
}
