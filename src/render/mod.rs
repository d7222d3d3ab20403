//! mrkdwn rendering.
//!
//! The renderer turns comrak traversal events into Slack's mrkdwn. The
//! pieces, leaves first:
//!
//! - [`escape`]: entity escaping for `&`, `<` and `>`
//! - `mention`: optional `@here` to `<!here>` substitution
//! - `sink`: the writer adapter with the sticky error latch
//! - `table`: the table cell lookup table
//! - [`renderer`]: the per-node state machine
//!
//! ## Output shape
//!
//! | Markdown | mrkdwn |
//! |---|---|
//! | `# Title` | `*Title*` |
//! | `**bold**` | `*bold*` |
//! | `~~gone~~` | `~gone~` |
//! | `[text](url)` | `<url\|text>` |
//! | `* item` | ` - item` |
//! | `1. item` | ` 1. item` |
//!
//! Tables are flattened: header cells become `_*Header*_ *|*` and body rows
//! start with `• `. Emphasis, quotes, images, rules and raw HTML produce no
//! markup of their own.

pub mod escape;
pub(crate) mod mention;
pub mod renderer;
pub(crate) mod sink;
pub(crate) mod table;

pub use escape::{escape, escape_into, unescape_entities};
pub use mention::{DEFAULT_MENTION_PATTERN, MENTION_GROUP, compile_mention_pattern};
pub use renderer::{Renderer, RendererState};
