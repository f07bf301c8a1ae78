//! Syntax-level lint engine for C#-shaped source trees.
//!
//! Three analyzer families run over host-provided syntax and semantic
//! snapshots: paragraph detection in XML documentation comments,
//! collapsing of null-guarded member chains into conditional access, and
//! flags-enum hygiene (zero members, undefined flags, value decomposition,
//! duplicates). Hosts lower their own parse trees into the node types
//! under [`syntax`] and [`semantic`], then drive [`engine::AnalysisEngine`].

pub mod analyzers;
pub mod config;
pub mod core;
pub mod engine;
pub mod semantic;
pub mod syntax;

pub use self::config::AnalyzerConfig;
pub use self::core::cancellation::CancellationToken;
pub use self::core::errors::{Error, Result};
pub use self::core::{findings_to_json, Finding, FindingKind, Span};
pub use self::engine::{AnalysisEngine, SourceUnit};
pub use self::semantic::{EmptySemanticModel, SemanticModel};
