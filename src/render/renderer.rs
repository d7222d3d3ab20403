//! The node renderer: comrak events in, mrkdwn bytes out.

use std::collections::HashMap;
use std::io::Write;

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::walk::{WalkStatus, walk};

use super::mention::MentionTranslator;
use super::sink::{OutputSink, OutputState};
use super::table::{CellEvent, cell_step};

const BOLD_TAG: &[u8] = b"*";
const STRIKE_TAG: &[u8] = b"~";
const ITEM_TAG: &[u8] = b"-";
const CODE_TAG: &[u8] = b"`";
const CODE_BLOCK_TAG: &[u8] = b"```";
const LINK_OPEN_TAG: &[u8] = b"<";
const LINK_CLOSE_TAG: &[u8] = b">";
const PIPE: &[u8] = b"|";
const SPACE: &[u8] = b" ";
const INDENT: &[u8] = b"   ";

/// Mutable state of one render session.
///
/// Lives across every node event of a document. [`Renderer::reset`] returns
/// it to its initial state for the next document.
#[derive(Debug, Default)]
pub struct RendererState {
    output: OutputState,
    list_depth: usize,
    /// Next ordinal of each open ordered list, keyed by nesting depth.
    ordinals: HashMap<usize, usize>,
    table_row_starting: bool,
}

impl RendererState {
    /// Byte count of the most recent write.
    pub fn last_write_len(&self) -> usize {
        self.output.last_write_len
    }

    /// Current list nesting depth; 0 outside any list.
    pub fn list_depth(&self) -> usize {
        self.list_depth
    }

    /// Next ordinal of the ordered list open at `depth`, if any.
    pub fn ordinal(&self, depth: usize) -> Option<usize> {
        self.ordinals.get(&depth).copied()
    }

    /// Number of ordered lists currently open.
    pub fn open_ordered_lists(&self) -> usize {
        self.ordinals.len()
    }

    pub fn table_row_starting(&self) -> bool {
        self.table_row_starting
    }

    pub fn error(&self) -> Option<&Error> {
        self.output.error.as_ref()
    }

    fn reset(&mut self) {
        self.output.reset();
        self.list_depth = 0;
        self.ordinals.clear();
        self.table_row_starting = false;
    }
}

/// Renders comrak documents to Slack mrkdwn.
///
/// A renderer is driven one `(node, entering)` event at a time, either by
/// [`render`](Self::render) / [`render_into`](Self::render_into) or by an
/// external walker calling [`render_node`](Self::render_node). Errors are
/// sticky: after the first failed write or unknown node, nothing more is
/// written until [`reset`](Self::reset).
///
/// One renderer serves one document at a time; use one per thread for
/// parallel rendering.
///
/// ```
/// use comrak::{Arena, parse_document};
/// use slackdown::{Renderer, default_parse_options};
///
/// let arena = Arena::new();
/// let root = parse_document(&arena, "~~old~~ **new**", &default_parse_options());
///
/// let mut renderer = Renderer::new();
/// let out = renderer.render(root);
/// assert!(renderer.err().is_none());
/// assert_eq!(out, b"~old~ *new*\n\n");
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    state: RendererState,
    mentions: Option<MentionTranslator>,
}

impl Renderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options.
    pub fn with_options(options: &Options) -> Self {
        Self {
            state: RendererState::default(),
            mentions: options.resolved_mention_pattern().map(MentionTranslator::new),
        }
    }

    /// The error that stopped the last render, if any.
    ///
    /// Check this after every render: a non-`None` value means the output
    /// is truncated.
    pub fn err(&self) -> Option<&Error> {
        self.state.error()
    }

    /// Clear all session state, including a sticky error.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn state(&self) -> &RendererState {
        &self.state
    }

    /// Render a whole document into a new buffer.
    ///
    /// Rendering errors do not discard the output; inspect
    /// [`err`](Self::err) to find out whether it is complete.
    pub fn render<'a>(&mut self, root: &'a AstNode<'a>) -> Vec<u8> {
        let mut buf = Vec::new();
        if self.render_into(&mut buf, root).is_err() {
            debug!(bytes = buf.len(), "returning truncated output");
        }
        buf
    }

    /// Render a whole document into `out`.
    ///
    /// Returns the sticky error, which is also available from
    /// [`err`](Self::err) until the next reset.
    pub fn render_into<'a, W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        root: &'a AstNode<'a>,
    ) -> Result<()> {
        debug!(
            mentions = self.mentions.is_some(),
            "rendering document"
        );
        let status = walk(root, |node, entering| self.render_node(out, node, entering));

        match self.err() {
            Some(err) => {
                warn!(error = %err, "render stopped early");
                Err(err.clone())
            }
            None => {
                debug!(terminated = status == WalkStatus::Terminate, "render finished");
                Ok(())
            }
        }
    }

    /// Handle a single traversal event.
    ///
    /// Returns [`WalkStatus::Terminate`] once an error has been latched,
    /// telling the walker to stop.
    pub fn render_node<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        node: &AstNode<'_>,
        entering: bool,
    ) -> WalkStatus {
        if self.state.output.error.is_some() {
            return WalkStatus::Terminate;
        }

        let Renderer { state, mentions } = self;
        let RendererState {
            output,
            list_depth,
            ordinals,
            table_row_starting,
        } = state;
        let mut sink = OutputSink::new(out, output);

        let ast = node.data.borrow();
        match &ast.value {
            NodeValue::Text(text) => {
                if entering {
                    match mentions {
                        Some(translator) => translator.translate(&mut sink, text.as_bytes()),
                        None => sink.escape(text.as_bytes()),
                    }
                }
            }

            NodeValue::Code(code) => {
                if entering {
                    sink.emit(CODE_TAG);
                    sink.escape(code.literal.as_bytes());
                    sink.emit(CODE_TAG);
                }
            }

            NodeValue::CodeBlock(block) => {
                if entering {
                    sink.emit(CODE_BLOCK_TAG);
                    sink.escape(block.literal.as_bytes());
                    sink.emit(CODE_BLOCK_TAG);
                    sink.line_break();
                    sink.line_break();
                }
            }

            NodeValue::Heading(_) => {
                sink.emit(BOLD_TAG);
                if !entering {
                    sink.line_break();
                }
            }

            // One marker per event: the opening and closing `*` / `~` come
            // from the entering and leaving visits respectively.
            NodeValue::Strong => sink.emit(BOLD_TAG),
            NodeValue::Strikethrough => sink.emit(STRIKE_TAG),

            NodeValue::Paragraph => {
                if !entering {
                    if !parent_is_item(node) {
                        sink.line_break();
                    }
                    sink.line_break();
                }
            }

            NodeValue::List(list) => {
                let ordered = list.list_type == ListType::Ordered;
                if entering {
                    *list_depth += 1;
                    if ordered {
                        ordinals.insert(*list_depth, 1);
                    }
                } else {
                    if ordered {
                        ordinals.remove(&*list_depth);
                    }
                    *list_depth = list_depth.saturating_sub(1);
                    if *list_depth == 0 {
                        sink.line_break();
                    }
                }
            }

            NodeValue::Item(list) => {
                if entering {
                    sink.emit(SPACE);
                    for _ in 1..*list_depth {
                        sink.emit(INDENT);
                    }
                    if list.list_type == ListType::Ordered {
                        let next = ordinals.entry(*list_depth).or_insert(1);
                        let label = format!("{}{}", next, delimiter(&list.delimiter));
                        sink.emit(label.as_bytes());
                        *next += 1;
                    } else {
                        sink.emit(ITEM_TAG);
                    }
                    sink.emit(SPACE);
                }
            }

            NodeValue::Link(link) => {
                if entering {
                    sink.emit(LINK_OPEN_TAG);
                    if !link.url.is_empty() {
                        sink.emit(link.url.as_bytes());
                        sink.emit(PIPE);
                    }
                } else {
                    sink.emit(LINK_CLOSE_TAG);
                }
            }

            NodeValue::TableRow(_) => {
                // A preceding block already left a blank line.
                if entering && !sink.at_blank_line() {
                    sink.line_break();
                }
                *table_row_starting = entering;
            }

            NodeValue::TableCell => {
                let step = cell_step(CellEvent {
                    header: parent_is_header_row(node),
                    entering,
                    row_starting: *table_row_starting,
                });
                for bytes in step.emit {
                    sink.emit(bytes);
                }
                if step.clears_row_start {
                    *table_row_starting = false;
                }
            }

            NodeValue::Document
            | NodeValue::Emph
            | NodeValue::BlockQuote
            | NodeValue::SoftBreak
            | NodeValue::LineBreak
            | NodeValue::Image(_)
            | NodeValue::ThematicBreak
            | NodeValue::HtmlBlock(_)
            | NodeValue::HtmlInline(_)
            | NodeValue::Table(_) => {}

            other => sink.fail(Error::UnknownNode(other.xml_node_name())),
        }

        if sink.is_failed() {
            WalkStatus::Terminate
        } else {
            WalkStatus::GoToNext
        }
    }
}

fn delimiter(delim: &ListDelimType) -> char {
    match delim {
        ListDelimType::Period => '.',
        ListDelimType::Paren => ')',
    }
}

fn parent_is_item(node: &AstNode<'_>) -> bool {
    node.parent()
        .is_some_and(|parent| matches!(parent.data.borrow().value, NodeValue::Item(_)))
}

fn parent_is_header_row(node: &AstNode<'_>) -> bool {
    node.parent()
        .is_some_and(|parent| matches!(parent.data.borrow().value, NodeValue::TableRow(true)))
}
