//! Shared types produced and consumed by every analyzer: source spans,
//! findings, and the finding-kind taxonomy.

pub mod cancellation;
pub mod errors;

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` within one compilation unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span covering everything from `first.start` to `last.end`.
    pub const fn from_bounds(first: Span, last: Span) -> Self {
        Self {
            start: first.start,
            end: last.end,
        }
    }

    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub const fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub const fn overlaps(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The closed set of diagnostics the engines can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    AddParagraphToDocComment,
    UseConditionalAccess,
    DeclareEnumMemberWithZeroValue,
    CompositeEnumValueContainsUndefinedFlag,
    DeclareEnumValueAsCombinationOfNames,
    DuplicateEnumValue,
}

impl FindingKind {
    pub fn id(&self) -> &'static str {
        match self {
            FindingKind::AddParagraphToDocComment => "add-paragraph-to-doc-comment",
            FindingKind::UseConditionalAccess => "use-conditional-access",
            FindingKind::DeclareEnumMemberWithZeroValue => "declare-enum-member-with-zero-value",
            FindingKind::CompositeEnumValueContainsUndefinedFlag => {
                "composite-enum-value-contains-undefined-flag"
            }
            FindingKind::DeclareEnumValueAsCombinationOfNames => {
                "declare-enum-value-as-combination-of-names"
            }
            FindingKind::DuplicateEnumValue => "duplicate-enum-value",
        }
    }
}

/// One diagnostic: kind, primary span, optional auxiliary spans and
/// free-form message arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub span: Span,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_spans: Vec<Span>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Finding {
    pub fn new(kind: FindingKind, span: Span) -> Self {
        Self {
            kind,
            span,
            related_spans: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_related_span(mut self, span: Span) -> Self {
        self.related_spans.push(span);
        self
    }

    pub fn message(&self) -> String {
        match self.kind {
            FindingKind::AddParagraphToDocComment => {
                "Add paragraph to documentation comment".to_string()
            }
            FindingKind::UseConditionalAccess => "Use conditional access".to_string(),
            FindingKind::DeclareEnumMemberWithZeroValue => {
                "Declare enum member with zero value".to_string()
            }
            FindingKind::CompositeEnumValueContainsUndefinedFlag => format!(
                "Composite enum value contains undefined flag {}",
                self.args.first().map(String::as_str).unwrap_or("?")
            ),
            FindingKind::DeclareEnumValueAsCombinationOfNames => {
                "Declare enum value as combination of names".to_string()
            }
            FindingKind::DuplicateEnumValue => "Duplicate enum value".to_string(),
        }
    }
}

/// Orders findings by source position, the order hosts render them in.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by_key(|f| (f.span.start, f.span.end, f.kind.id()));
}

/// Renders findings as the JSON document hosts consume.
pub fn findings_to_json(findings: &[Finding]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(findings)
}
