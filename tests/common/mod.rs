// Test utility module for sharplift integration tests
#![allow(dead_code)]

use std::collections::HashMap;

use sharplift::semantic::{Constant, SemanticModel, TypeInfo};
use sharplift::syntax::doc::{DocElement, DocNode, TextRun, TextToken, TextTokenKind};
use sharplift::syntax::expr::{BinaryOp, Expr, ExprKind, Literal};
use sharplift::Span;

/// Installs the env_logger test backend so `RUST_LOG=debug` surfaces the
/// analyzers' skip-path traces; repeated calls are no-ops.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// --- expression builders -------------------------------------------------
//
// Spans are synthesized as if the expression were written out left to
// right; only relative ordering matters to the analyzers.

pub fn ident(name: &str, start: u32) -> Expr {
    Expr::new(
        ExprKind::Identifier(name.to_string()),
        Span::new(start, start + name.len() as u32),
    )
}

pub fn null_at(start: u32) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Null), Span::new(start, start + 4))
}

pub fn int_lit(value: i64, start: u32) -> Expr {
    let len = value.to_string().len() as u32;
    Expr::new(
        ExprKind::Literal(Literal::Int(value)),
        Span::new(start, start + len),
    )
}

pub fn member(receiver: Expr, name: &str) -> Expr {
    let span = Span::new(
        receiver.span.start,
        receiver.span.end + 1 + name.len() as u32,
    );
    Expr::new(
        ExprKind::Member {
            receiver: Box::new(receiver),
            name: name.to_string(),
        },
        span,
    )
}

pub fn invoke0(callee: Expr) -> Expr {
    let span = Span::new(callee.span.start, callee.span.end + 2);
    Expr::new(
        ExprKind::Invocation {
            callee: Box::new(callee),
            arguments: Vec::new(),
        },
        span,
    )
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = Span::new(left.span.start, right.span.end);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

/// `expr != null`, with the literal placed right after the operand.
pub fn not_null_check(expr: Expr) -> Expr {
    let literal = null_at(expr.span.end + 4);
    binary(BinaryOp::Ne, expr, literal)
}

/// `expr == null`.
pub fn null_check(expr: Expr) -> Expr {
    let literal = null_at(expr.span.end + 4);
    binary(BinaryOp::Eq, expr, literal)
}

// --- documentation builders ----------------------------------------------

pub fn literal_token(text: &str, start: u32) -> TextToken {
    TextToken {
        kind: TextTokenKind::Literal,
        text: text.to_string(),
        span: Span::new(start, start + text.len() as u32),
    }
}

pub fn newline_token(start: u32) -> TextToken {
    TextToken {
        kind: TextTokenKind::Newline,
        text: "\n".to_string(),
        span: Span::new(start, start + 1),
    }
}

pub fn text_run(tokens: Vec<TextToken>) -> DocNode {
    let span = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
        _ => Span::new(0, 0),
    };
    DocNode::Text(TextRun { tokens, span })
}

pub fn element(tag: &str, children: Vec<DocNode>, span: Span) -> DocNode {
    DocNode::Element(DocElement {
        start_tag: tag.to_string(),
        end_tag: tag.to_string(),
        children,
        span,
    })
}

/// Nodes for `first\n\nsecond` starting at `start`, plus the spans of the
/// two paragraphs.
pub fn two_paragraph_text(first: &str, second: &str, start: u32) -> (Vec<DocNode>, Span, Span) {
    let first_token = literal_token(first, start);
    let newline_a = newline_token(first_token.span.end);
    let newline_b = newline_token(newline_a.span.end);
    let second_token = literal_token(second, newline_b.span.end);

    let first_span = first_token.span;
    let second_span = second_token.span;
    let nodes = vec![text_run(vec![
        first_token,
        newline_a,
        newline_b,
        second_token,
    ])];
    (nodes, first_span, second_span)
}

// --- semantic model stub -------------------------------------------------

/// Oracle answering type queries by identifier name; literals resolve to
/// constants.
#[derive(Default)]
pub struct IdentModel {
    types: HashMap<String, TypeInfo>,
    expression_tree_spans: Vec<Span>,
    directive_spans: Vec<Span>,
}

impl IdentModel {
    pub fn with_type(mut self, name: &str, info: TypeInfo) -> Self {
        self.types.insert(name.to_string(), info);
        self
    }

    pub fn with_expression_tree(mut self, span: Span) -> Self {
        self.expression_tree_spans.push(span);
        self
    }

    pub fn with_directive(mut self, span: Span) -> Self {
        self.directive_spans.push(span);
        self
    }
}

impl SemanticModel for IdentModel {
    fn type_of(&self, expr: &Expr) -> Option<TypeInfo> {
        match &expr.kind {
            ExprKind::Identifier(name) => self.types.get(name).copied(),
            _ => None,
        }
    }

    fn constant_of(&self, expr: &Expr) -> Option<Constant> {
        match &expr.kind {
            ExprKind::Literal(Literal::Int(value)) => Some(Constant::Int(*value)),
            ExprKind::Literal(Literal::Null) => Some(Constant::Null),
            _ => None,
        }
    }

    fn in_expression_tree(&self, span: Span) -> bool {
        self.expression_tree_spans.iter().any(|s| s.contains(span))
    }

    fn contains_directives(&self, span: Span) -> bool {
        self.directive_spans.iter().any(|s| span.contains(*s))
    }
}
