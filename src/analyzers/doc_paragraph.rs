//! Finds loose paragraphs in documentation comments that should be wrapped
//! in explicit paragraph markers.
//!
//! The finder is a single-pass state machine over the flattened token
//! stream of one documentation element. A blank line (two newline tokens
//! with only whitespace between them) separates paragraphs; block-level
//! tags already separate content and reset the scan.

use log::debug;

use crate::core::cancellation::CancellationToken;
use crate::core::errors::Result;
use crate::core::{Finding, FindingKind, Span};
use crate::syntax::doc::{DocComment, DocNode, TextTokenKind};

/// Container elements whose children are scanned for loose paragraphs.
const CONTAINER_TAGS: [&str; 3] = ["summary", "remarks", "returns"];

/// Tags that structure their content themselves; hitting one restarts the
/// scan from scratch after it.
const BLOCK_LEVEL_TAGS: [&str; 4] = ["code", "list", "para", "inheritdoc"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    BeforeParagraph,
    Paragraph,
    NewLine,
    WhitespaceAfterNewLine,
    WhitespaceBetweenParagraphs,
}

/// Outcome of one scan over a documentation element's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParagraphScan {
    /// No blank-line-separated loose text.
    None,
    /// First paragraph and the loose text following the first blank line
    /// (stop-on-first-match mode).
    First { first: Span, second: Span },
    /// Every paragraph found: the leading paragraph followed by each loose
    /// one, in source order (exhaustive mode). Always has at least two
    /// entries.
    All(Vec<Span>),
}

/// Reports one finding per `summary`/`remarks`/`returns` element that
/// contains a loose second paragraph, spanning from the start of the first
/// paragraph to the end of the second.
pub fn analyze_doc_comment(comment: &DocComment, token: &CancellationToken) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();

    for node in &comment.content {
        token.ensure()?;

        let DocNode::Element(element) = node else {
            continue;
        };

        if !CONTAINER_TAGS.iter().any(|tag| element.has_tag(tag)) {
            continue;
        }

        if element.children.is_empty() {
            continue;
        }

        if let ParagraphScan::First { first, second } =
            find_paragraph_spans(&element.children, true, token)?
        {
            findings.push(Finding::new(
                FindingKind::AddParagraphToDocComment,
                Span::from_bounds(first, second),
            ));
        }
    }

    Ok(findings)
}

/// Scans the content of one documentation element for blank-line-separated
/// paragraphs.
///
/// With `stop_on_first_match` the scan returns the first
/// (paragraph, loose paragraph) pair it completes; otherwise it keeps
/// going and returns every paragraph span in source order.
pub fn find_paragraph_spans(
    nodes: &[DocNode],
    stop_on_first_match: bool,
    token: &CancellationToken,
) -> Result<ParagraphScan> {
    let mut state = State::BeforeParagraph;
    // Start of the current (first) paragraph and its end at the last seen
    // blank-line boundary.
    let mut index: Option<u32> = None;
    let mut end_index: Option<u32> = None;
    // Start of the in-progress second paragraph.
    let mut index2: Option<u32> = None;
    // Span of the most recent content token or node.
    let mut last: Option<Span> = None;
    let mut spans: Vec<Span> = Vec::new();
    // Whether the current leading paragraph is not yet in `spans`
    // (exhaustive mode); set again after each block-level reset.
    let mut first_pending = true;

    for node in nodes {
        token.ensure()?;

        match node {
            DocNode::Element(element) => {
                if is_block_level(&element.start_tag) {
                    reset(
                        &mut state,
                        &mut index,
                        &mut end_index,
                        &mut index2,
                        &mut last,
                        &mut first_pending,
                    );
                    continue;
                }

                if element.tags_mismatched() {
                    debug!(
                        "mismatched doc tags <{}>...</{}>, aborting scan",
                        element.start_tag, element.end_tag
                    );
                    return Ok(ParagraphScan::None);
                }

                content_node(node.span(), &mut state, &mut index, &mut index2, &mut last);
            }
            DocNode::EmptyElement { tag, span } => {
                if is_block_level(tag) {
                    reset(
                        &mut state,
                        &mut index,
                        &mut end_index,
                        &mut index2,
                        &mut last,
                        &mut first_pending,
                    );
                    continue;
                }

                content_node(*span, &mut state, &mut index, &mut index2, &mut last);
            }
            DocNode::Text(run) => {
                for text_token in &run.tokens {
                    token.ensure()?;

                    match text_token.kind {
                        TextTokenKind::Literal => match state {
                            State::BeforeParagraph => {
                                if !text_token.is_blank() {
                                    state = State::Paragraph;
                                    index = Some(text_token.span.start);
                                    last = Some(text_token.span);
                                }
                            }
                            State::Paragraph => {
                                last = Some(text_token.span);
                            }
                            State::NewLine => {
                                if text_token.is_blank() {
                                    state = State::WhitespaceAfterNewLine;
                                } else {
                                    state = State::Paragraph;
                                    last = Some(text_token.span);
                                }
                            }
                            State::WhitespaceAfterNewLine => {
                                if !text_token.is_blank() {
                                    state = State::Paragraph;
                                    last = Some(text_token.span);
                                }
                            }
                            State::WhitespaceBetweenParagraphs => {
                                if !text_token.is_blank() {
                                    state = State::Paragraph;
                                    index2 = Some(text_token.span.start);
                                    last = Some(text_token.span);
                                }
                            }
                        },
                        TextTokenKind::Newline => match state {
                            State::BeforeParagraph | State::WhitespaceBetweenParagraphs => {}
                            State::Paragraph => {
                                state = State::NewLine;
                            }
                            State::NewLine | State::WhitespaceAfterNewLine => {
                                // Blank line: the boundary that closes the
                                // current paragraph.
                                if let (Some(start1), Some(end1), Some(start2), Some(last_span)) =
                                    (index, end_index, index2, last)
                                {
                                    let first = Span::new(start1, end1);
                                    let second = Span::new(start2, last_span.end);

                                    if stop_on_first_match {
                                        return Ok(ParagraphScan::First { first, second });
                                    }

                                    if first_pending {
                                        spans.push(first);
                                        first_pending = false;
                                    }
                                    spans.push(second);
                                    index = Some(start2);
                                    index2 = None;
                                }

                                if let Some(last_span) = last {
                                    end_index = Some(last_span.end);
                                }
                                last = None;
                                state = State::WhitespaceBetweenParagraphs;
                            }
                        },
                    }
                }
            }
        }
    }

    // A second paragraph still open at the end of the content closes at the
    // last content token.
    if let (Some(start1), Some(end1), Some(start2), Some(last_span)) =
        (index, end_index, index2, last)
    {
        let first = Span::new(start1, end1);
        let second = Span::new(start2, last_span.end);

        if stop_on_first_match {
            return Ok(ParagraphScan::First { first, second });
        }

        if first_pending {
            spans.push(first);
        }
        spans.push(second);
    }

    if spans.is_empty() {
        Ok(ParagraphScan::None)
    } else {
        Ok(ParagraphScan::All(spans))
    }
}

fn is_block_level(tag: &str) -> bool {
    BLOCK_LEVEL_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
}

/// A block-level tag discards all in-progress tracking; completed spans in
/// exhaustive mode survive.
fn reset(
    state: &mut State,
    index: &mut Option<u32>,
    end_index: &mut Option<u32>,
    index2: &mut Option<u32>,
    last: &mut Option<Span>,
    first_pending: &mut bool,
) {
    *state = State::BeforeParagraph;
    *index = None;
    *end_index = None;
    *index2 = None;
    *last = None;
    *first_pending = true;
}

/// An inline element or empty element is paragraph content.
fn content_node(
    span: Span,
    state: &mut State,
    index: &mut Option<u32>,
    index2: &mut Option<u32>,
    last: &mut Option<Span>,
) {
    match state {
        State::BeforeParagraph => {
            *state = State::Paragraph;
            *index = Some(span.start);
            *last = Some(span);
        }
        State::Paragraph => {
            *last = Some(span);
        }
        State::NewLine | State::WhitespaceAfterNewLine => {
            *state = State::Paragraph;
            *last = Some(span);
        }
        State::WhitespaceBetweenParagraphs => {
            *state = State::Paragraph;
            *index2 = Some(span.start);
            *last = Some(span);
        }
    }
}
