//! Error types for slackdown operations.

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur while rendering a document to mrkdwn.
///
/// Rendering errors are sticky: the renderer keeps the first one it sees and
/// hands out clones, so the type is `Clone` and I/O errors are shared behind
/// an [`Arc`].
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[source] Arc<io::Error>),

    #[error("unknown node type: {0}")]
    UnknownNode(&'static str),

    #[error("invalid mention pattern: {0}")]
    InvalidMentionPattern(#[from] regex::Error),

    #[error("mention pattern has no `mention` capture group")]
    MissingMentionGroup,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl Error {
    /// Whether the error came from the output sink.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
