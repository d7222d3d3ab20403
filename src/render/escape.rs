//! HTML-entity escaping for mrkdwn text.
//!
//! Slack treats `&`, `<` and `>` as control characters: angle brackets open
//! links and mentions, ampersands start entities. Everything else is passed
//! through byte for byte.

use std::io::{self, Write};

/// Entity written in place of a control byte, or `None` for plain bytes.
#[inline]
fn entity_for(byte: u8) -> Option<&'static [u8]> {
    match byte {
        b'&' => Some(b"&amp;"),
        b'<' => Some(b"&lt;"),
        b'>' => Some(b"&gt;"),
        _ => None,
    }
}

/// Escape `text` into `out`, returning the number of bytes written.
///
/// Scans once with `memchr3` and writes the maximal unescaped run between
/// control bytes in a single call, so plain text costs one write. The first
/// write error aborts the scan; bytes already written stay written.
pub fn escape_into<W: Write + ?Sized>(out: &mut W, text: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    let mut start = 0;

    for pos in memchr::memchr3_iter(b'&', b'<', b'>', text) {
        if start < pos {
            out.write_all(&text[start..pos])?;
            written += pos - start;
        }
        if let Some(entity) = entity_for(text[pos]) {
            out.write_all(entity)?;
            written += entity.len();
        }
        start = pos + 1;
    }

    if start < text.len() {
        out.write_all(&text[start..])?;
        written += text.len() - start;
    }

    Ok(written)
}

/// Escape `text` into a freshly allocated buffer.
///
/// # Examples
///
/// ```
/// use slackdown::escape;
///
/// assert_eq!(escape(b"a < b && c"), b"a &lt; b &amp;&amp; c");
/// assert_eq!(escape(b"plain"), b"plain");
/// ```
pub fn escape(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + text.len() / 8);
    // Writing into a Vec cannot fail.
    let _ = escape_into(&mut out, text);
    out
}

/// Decode the entities produced by [`escape`].
///
/// Only `&amp;`, `&lt;` and `&gt;` are recognized; any other `&` sequence is
/// copied unchanged.
///
/// # Examples
///
/// ```
/// use slackdown::unescape_entities;
///
/// assert_eq!(unescape_entities(b"&lt;@here&gt; &amp; co"), b"<@here> & co");
/// assert_eq!(unescape_entities(b"&nbsp;"), b"&nbsp;");
/// ```
pub fn unescape_entities(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut start = 0;

    for pos in memchr::memchr_iter(b'&', text) {
        if pos < start {
            continue;
        }
        let rest = &text[pos..];
        let (decoded, len) = if rest.starts_with(b"&amp;") {
            (b'&', 5)
        } else if rest.starts_with(b"&lt;") {
            (b'<', 4)
        } else if rest.starts_with(b"&gt;") {
            (b'>', 4)
        } else {
            continue;
        };
        out.extend_from_slice(&text[start..pos]);
        out.push(decoded);
        start = pos + len;
    }

    out.extend_from_slice(&text[start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Writer that records every individual write call.
    #[derive(Default)]
    struct WriteLog {
        writes: Vec<Vec<u8>>,
    }

    impl Write for WriteLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Writer that accepts `budget` writes and then fails.
    struct FailAfter {
        budget: usize,
        accepted: Vec<u8>,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.budget -= 1;
            self.accepted.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape(b"<a href>"), b"&lt;a href&gt;");
        assert_eq!(escape(b"Tom & Jerry"), b"Tom &amp; Jerry");
        assert_eq!(escape(b"&&"), b"&amp;&amp;");
    }

    #[test]
    fn test_escape_leaves_markup_alone() {
        assert_eq!(escape(b"*bold* _it_ ~del~ `code`"), b"*bold* _it_ ~del~ `code`");
    }

    #[test]
    fn test_escape_multibyte_text() {
        let text = "naïve <café> ☕".as_bytes();
        assert_eq!(escape(text), "naïve &lt;café&gt; ☕".as_bytes());
    }

    #[test]
    fn test_escape_writes_maximal_runs() {
        let mut log = WriteLog::default();
        let n = escape_into(&mut log, b"ab<cd>ef").unwrap();
        assert_eq!(n, b"ab&lt;cd&gt;ef".len());
        assert_eq!(
            log.writes,
            vec![
                b"ab".to_vec(),
                b"&lt;".to_vec(),
                b"cd".to_vec(),
                b"&gt;".to_vec(),
                b"ef".to_vec(),
            ]
        );
    }

    #[test]
    fn test_escape_plain_text_is_one_write() {
        let mut log = WriteLog::default();
        escape_into(&mut log, b"nothing special here").unwrap();
        assert_eq!(log.writes.len(), 1);
    }

    #[test]
    fn test_escape_empty_writes_nothing() {
        let mut log = WriteLog::default();
        assert_eq!(escape_into(&mut log, b"").unwrap(), 0);
        assert!(log.writes.is_empty());
    }

    #[test]
    fn test_escape_stops_at_first_error() {
        let mut sink = FailAfter {
            budget: 2,
            accepted: Vec::new(),
        };
        let err = escape_into(&mut sink, b"a<b>c").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(sink.accepted, b"a&lt;");
    }

    #[test]
    fn test_unescape_ignores_unknown_entities() {
        assert_eq!(unescape_entities(b"&quot;&amp"), b"&quot;&amp");
        assert_eq!(unescape_entities(b"&&lt;"), b"&<");
    }

    proptest! {
        #[test]
        fn prop_escape_is_identity_without_control_chars(
            s in "[^&<>]{0,64}"
        ) {
            prop_assert_eq!(escape(s.as_bytes()), s.as_bytes().to_vec());
        }

        #[test]
        fn prop_escape_then_unescape_round_trips(
            parts in prop::collection::vec(
                prop_oneof![
                    Just("&".to_string()),
                    Just("<".to_string()),
                    Just(">".to_string()),
                    Just("&amp;".to_string()),
                    "[a-z ]{0,6}",
                ],
                0..16
            )
        ) {
            let text = parts.concat();
            let escaped = escape(text.as_bytes());
            prop_assert!(!escaped.contains(&b'<'));
            prop_assert!(!escaped.contains(&b'>'));
            prop_assert_eq!(unescape_entities(&escaped), text.into_bytes());
        }
    }
}
