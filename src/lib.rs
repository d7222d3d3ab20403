//! # slackdown
//!
//! Render Markdown into Slack's mrkdwn dialect.
//!
//! Markdown is parsed with [comrak]; the resulting tree is walked depth-first
//! and every `(node, entering)` event is handed to a [`Renderer`], which
//! writes mrkdwn straight into any [`std::io::Write`].
//!
//! ## Quick Start
//!
//! ```
//! use slackdown::convert;
//!
//! assert_eq!(convert("**bold text**").unwrap(), "*bold text*\n\n");
//! assert_eq!(convert("~~del text~~").unwrap(), "~del text~\n\n");
//! assert_eq!(convert("* a\n* b\n").unwrap(), " - a\n - b\n\n");
//! ```
//!
//! ## Mentions
//!
//! Broadcast mentions (`@here`, `@channel`, `@everyone`) can be rewritten to
//! Slack's `<!here>` form:
//!
//! ```
//! use slackdown::{Options, convert_with};
//!
//! let options = Options::new().with_mention_translation();
//! assert_eq!(
//!     convert_with("@channel release is out", &options).unwrap(),
//!     "<!channel> release is out\n\n"
//! );
//! ```
//!
//! ## Driving the renderer yourself
//!
//! [`Renderer`] keeps list, table and error state across events and can be
//! [`reset`](Renderer::reset) and reused for the next document:
//!
//! ```
//! use comrak::{Arena, parse_document};
//! use slackdown::{Renderer, default_parse_options};
//!
//! let mut renderer = Renderer::new();
//! for doc in ["# One\n", "# Two\n"] {
//!     let arena = Arena::new();
//!     let root = parse_document(&arena, doc, &default_parse_options());
//!     let mut out = Vec::new();
//!     renderer.render_into(&mut out, root).unwrap();
//!     assert!(out.starts_with(b"*"));
//!     renderer.reset();
//! }
//! ```
//!
//! [comrak]: https://docs.rs/comrak

pub mod document;
pub mod error;
pub mod options;
pub mod render;
pub(crate) mod util;
pub mod walk;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use document::{
    convert, convert_into, convert_with, default_parse_options, render_document,
    render_document_into,
};
pub use error::{Error, Result};
pub use options::Options;
pub use render::{
    DEFAULT_MENTION_PATTERN, Renderer, RendererState, compile_mention_pattern, escape,
    escape_into, unescape_entities,
};
pub use util::decode_text;
pub use walk::{WalkStatus, walk};
