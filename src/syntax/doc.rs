//! Documentation-comment content nodes.
//!
//! A documentation block is a flat, source-ordered sequence of inline
//! nodes: tagged elements (with separate start/end tags), self-closing
//! elements, and text runs decomposed into literal and newline tokens.

use crate::core::Span;

/// One structured comment attached to a declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct DocComment {
    pub content: Vec<DocNode>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DocNode {
    Element(DocElement),
    EmptyElement { tag: String, span: Span },
    Text(TextRun),
}

impl DocNode {
    pub fn span(&self) -> Span {
        match self {
            DocNode::Element(element) => element.span,
            DocNode::EmptyElement { span, .. } => *span,
            DocNode::Text(run) => run.span,
        }
    }
}

/// `<tag>...</tag>` with its nested content.
#[derive(Clone, Debug, PartialEq)]
pub struct DocElement {
    pub start_tag: String,
    pub end_tag: String,
    pub children: Vec<DocNode>,
    pub span: Span,
}

impl DocElement {
    pub fn has_tag(&self, name: &str) -> bool {
        self.start_tag.eq_ignore_ascii_case(name)
    }

    /// Start and end tag names disagree (recoverable parse state).
    pub fn tags_mismatched(&self) -> bool {
        !self.start_tag.eq_ignore_ascii_case(&self.end_tag)
    }
}

/// A run of text tokens between elements.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub tokens: Vec<TextToken>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextToken {
    pub kind: TextTokenKind,
    pub text: String,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTokenKind {
    Literal,
    Newline,
}

impl TextToken {
    /// Empty or whitespace-only literal content.
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_comparison_is_case_insensitive() {
        let element = DocElement {
            start_tag: "Summary".to_string(),
            end_tag: "SUMMARY".to_string(),
            children: Vec::new(),
            span: Span::new(0, 10),
        };
        assert!(element.has_tag("summary"));
        assert!(!element.tags_mismatched());

        let broken = DocElement {
            end_tag: "remarks".to_string(),
            ..element
        };
        assert!(broken.tags_mismatched());
    }

    #[test]
    fn blank_detection_covers_empty_and_whitespace() {
        let blank = TextToken {
            kind: TextTokenKind::Literal,
            text: "   \t ".to_string(),
            span: Span::new(0, 5),
        };
        let empty = TextToken {
            kind: TextTokenKind::Literal,
            text: String::new(),
            span: Span::new(5, 5),
        };
        let text = TextToken {
            kind: TextTokenKind::Literal,
            text: " words ".to_string(),
            span: Span::new(5, 12),
        };
        assert!(blank.is_blank());
        assert!(empty.is_blank());
        assert!(!text.is_blank());
    }
}
