//! Renderer configuration.

use regex::bytes::Regex;

use crate::error::Result;
use crate::render::mention::{compile_mention_pattern, default_pattern};

/// Configuration for a [`Renderer`](crate::Renderer).
///
/// The default renders plain text through the escaper only. Mention
/// translation is opt-in.
///
/// ```
/// use slackdown::{Options, convert_with};
///
/// let options = Options::new().with_mention_translation();
/// assert_eq!(convert_with("hi @here", &options).unwrap(), "hi <!here>\n\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    mention_translation: bool,
    mention_pattern: Option<Regex>,
}

impl Options {
    /// Create options with every feature off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable `@mention` to `<!mention>` translation in text.
    pub fn with_mention_translation(mut self) -> Self {
        self.mention_translation = true;
        self
    }

    /// Use a custom mention pattern instead of the default
    /// (`here`, `channel`, `everyone`). The pattern must define a
    /// `mention` capture group; the whole match is replaced by
    /// `<!` + group + `>`.
    ///
    /// Setting a pattern does not by itself enable translation.
    pub fn with_mention_pattern(mut self, pattern: &str) -> Result<Self> {
        self.mention_pattern = Some(compile_mention_pattern(pattern)?);
        Ok(self)
    }

    /// Turn mention translation on or off.
    pub fn mention_translation(&mut self, enabled: bool) -> &mut Self {
        self.mention_translation = enabled;
        self
    }

    pub fn mention_translation_enabled(&self) -> bool {
        self.mention_translation
    }

    /// The pattern translation uses when enabled.
    pub(crate) fn resolved_mention_pattern(&self) -> Option<Regex> {
        if !self.mention_translation {
            return None;
        }
        Some(
            self.mention_pattern
                .clone()
                .unwrap_or_else(default_pattern),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_is_plain() {
        let options = Options::default();
        assert!(!options.mention_translation_enabled());
        assert!(options.resolved_mention_pattern().is_none());
    }

    #[test]
    fn test_translation_uses_default_pattern() {
        let options = Options::new().with_mention_translation();
        let pattern = options.resolved_mention_pattern().unwrap();
        assert!(pattern.is_match(b"@channel"));
    }

    #[test]
    fn test_custom_pattern_needs_enabling() {
        let mut options = Options::new()
            .with_mention_pattern(r"@(?P<mention>[a-z]+)")
            .unwrap();
        assert!(options.resolved_mention_pattern().is_none());

        options.mention_translation(true);
        let pattern = options.resolved_mention_pattern().unwrap();
        assert!(pattern.is_match(b"@anyone"));
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let err = Options::new().with_mention_pattern("@(").unwrap_err();
        assert!(matches!(err, Error::InvalidMentionPattern(_)));
    }
}
