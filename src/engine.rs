//! Analysis driver.
//!
//! Hosts hand the engine pre-built [`SourceUnit`]s (one per file or
//! compilation member) plus a [`SemanticModel`]; the engine runs every
//! enabled analyzer over each unit and returns findings in source order.
//! Units are independent, so batch analysis fans out across a rayon pool.

use rayon::prelude::*;

use crate::analyzers::{analyze_doc_comment, analyze_enum, analyze_expression, analyze_if_statement};
use crate::config::AnalyzerConfig;
use crate::core::cancellation::CancellationToken;
use crate::core::errors::Result;
use crate::core::{sort_findings, Finding, FindingKind};
use crate::semantic::enums::EnumSnapshot;
use crate::semantic::SemanticModel;
use crate::syntax::doc::DocComment;
use crate::syntax::expr::{Expr, IfStatement};

/// Everything extracted from one source file that the analyzers consume.
#[derive(Clone, Debug, Default)]
pub struct SourceUnit {
    pub doc_comments: Vec<DocComment>,
    pub expressions: Vec<Expr>,
    pub if_statements: Vec<IfStatement>,
    pub enums: Vec<EnumSnapshot>,
}

pub struct AnalysisEngine {
    config: AnalyzerConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes one unit; findings come back sorted by position.
    pub fn analyze_unit(
        &self,
        unit: &SourceUnit,
        model: &dyn SemanticModel,
        token: &CancellationToken,
    ) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        if self.config.enabled(FindingKind::AddParagraphToDocComment) {
            for comment in &unit.doc_comments {
                findings.extend(analyze_doc_comment(comment, token)?);
            }
        }

        if self.config.enabled(FindingKind::UseConditionalAccess) {
            for expr in &unit.expressions {
                findings.extend(analyze_expression(expr, model, token)?);
            }
            for if_statement in &unit.if_statements {
                findings.extend(analyze_if_statement(if_statement, model, token)?);
            }
        }

        for snapshot in &unit.enums {
            // Enum checks run as a bundle; disabled kinds are filtered out.
            let enum_findings = analyze_enum(snapshot, token)?;
            findings.extend(
                enum_findings
                    .into_iter()
                    .filter(|f| self.config.enabled(f.kind)),
            );
        }

        sort_findings(&mut findings);
        Ok(findings)
    }

    /// Analyzes a batch of units in parallel, preserving unit order in the
    /// combined result. Findings within each unit stay position-sorted.
    pub fn analyze_units(
        &self,
        units: &[SourceUnit],
        model: &(dyn SemanticModel + Sync),
        token: &CancellationToken,
    ) -> Result<Vec<Finding>> {
        let per_unit: Result<Vec<Vec<Finding>>> = units
            .par_iter()
            .map(|unit| self.analyze_unit(unit, model, token))
            .collect();

        Ok(per_unit?.into_iter().flatten().collect())
    }
}
