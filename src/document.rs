//! Document-level entry points: parse Markdown, render mrkdwn.

use std::io::Write;

use comrak::nodes::AstNode;
use comrak::{Arena, parse_document};
use tracing::debug;

use crate::error::Result;
use crate::options::Options;
use crate::render::Renderer;

/// Parser options the renderer is written against.
///
/// Enables the GitHub extensions with a mrkdwn counterpart:
/// strikethrough, tables and bare-URL autolinks. Extensions that produce
/// other node types (footnotes, task lists, ...) make rendering fail with
/// [`Error::UnknownNode`](crate::Error::UnknownNode).
pub fn default_parse_options() -> comrak::Options<'static> {
    let mut options = comrak::Options::default();
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    options
}

/// Render an already-parsed document into a new buffer.
pub fn render_document<'a>(root: &'a AstNode<'a>, options: &Options) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    render_document_into(&mut buf, root, options)?;
    Ok(buf)
}

/// Render an already-parsed document into `out`.
///
/// Bytes written before a failure stay in `out`.
pub fn render_document_into<'a, W: Write + ?Sized>(
    out: &mut W,
    root: &'a AstNode<'a>,
    options: &Options,
) -> Result<()> {
    Renderer::with_options(options).render_into(out, root)
}

/// Convert Markdown to mrkdwn with default options.
///
/// ```
/// assert_eq!(slackdown::convert("# Head1\n").unwrap(), "*Head1*\n");
/// assert_eq!(
///     slackdown::convert("[google.at](http://www.google.at)").unwrap(),
///     "<http://www.google.at|google.at>\n\n"
/// );
/// ```
pub fn convert(markdown: &str) -> Result<String> {
    convert_with(markdown, &Options::default())
}

/// Convert Markdown to mrkdwn.
pub fn convert_with(markdown: &str, options: &Options) -> Result<String> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &default_parse_options());
    let bytes = render_document(root, options)?;
    debug!(input = markdown.len(), output = bytes.len(), "converted document");

    // Escaping only splits text at ASCII bytes, so the output stays UTF-8.
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
}

/// Convert Markdown to mrkdwn, writing into `out`.
pub fn convert_into<W: Write + ?Sized>(out: &mut W, markdown: &str, options: &Options) -> Result<()> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &default_parse_options());
    render_document_into(out, root, options)
}
