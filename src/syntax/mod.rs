//! Abstract syntax model consumed by the analysis engines.
//!
//! The hosting compiler owns the real syntax tree; analyzers see this
//! reduced, immutable form: expressions and statements with byte spans, and
//! documentation-comment content nodes with their decomposed text tokens.

pub mod doc;
pub mod equivalence;
pub mod expr;

pub use doc::{DocComment, DocElement, DocNode, TextRun, TextToken, TextTokenKind};
pub use equivalence::are_equivalent;
pub use expr::{BinaryOp, Expr, ExprKind, IfStatement, Literal, Pattern, Statement};
