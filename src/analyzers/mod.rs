//! The analysis engines.
//!
//! Each engine is a pure, synchronous function from one syntax shape (plus
//! the semantic oracle where needed) to zero or more findings. Engines
//! never fail except under cooperative cancellation; unresolvable input
//! degrades to "no finding".

pub mod conditional_access;
pub mod doc_paragraph;
pub mod enum_flags;

pub use conditional_access::{analyze_expression, analyze_if_statement};
pub use doc_paragraph::{analyze_doc_comment, find_paragraph_spans, ParagraphScan};
pub use enum_flags::{analyze_enum, decompose};
