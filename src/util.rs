//! Input decoding helpers.

use std::borrow::Cow;

/// Decode Markdown source bytes to a string.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (e.g. from a `--encoding` flag)
/// 3. Falls back to Windows-1252 (common in files pasted out of old editors)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8 without
/// a BOM.
///
/// # Examples
///
/// ```
/// use slackdown::decode_text;
///
/// assert_eq!(decode_text(b"**bold**", None), "**bold**");
/// assert_eq!(decode_text(b"caf\xe9", None), "caf\u{e9}");
/// ```
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_borrows() {
        let decoded = decode_text("héllo".as_bytes(), None);
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded, "héllo");
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBF# Title", None), "# Title");
    }

    #[test]
    fn test_decode_uses_hint() {
        // 0xE9 is 'é' in Windows-1252 and 'ι' in ISO-8859-7
        assert_eq!(decode_text(b"\xE9", Some("iso-8859-7")), "\u{3B9}");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        assert_eq!(decode_text(b"\x93quoted\x94", None), "\u{201C}quoted\u{201D}");
    }

    #[test]
    fn test_decode_unknown_hint_falls_back() {
        assert_eq!(decode_text(b"caf\xE9", Some("not-an-encoding")), "café");
    }
}
