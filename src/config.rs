//! Analyzer configuration.
//!
//! Every diagnostic is enabled by default; a TOML file (or struct built in
//! code) turns individual diagnostics off. Unknown keys are rejected so a
//! typo never silently re-enables a rule.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::FindingKind;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnalyzerConfig {
    pub add_paragraph_to_doc_comment: bool,
    pub use_conditional_access: bool,
    pub declare_enum_member_with_zero_value: bool,
    pub composite_enum_value_contains_undefined_flag: bool,
    pub declare_enum_value_as_combination_of_names: bool,
    pub duplicate_enum_value: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            add_paragraph_to_doc_comment: true,
            use_conditional_access: true,
            declare_enum_member_with_zero_value: true,
            composite_enum_value_contains_undefined_flag: true,
            declare_enum_value_as_combination_of_names: true,
            duplicate_enum_value: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn enabled(&self, kind: FindingKind) -> bool {
        match kind {
            FindingKind::AddParagraphToDocComment => self.add_paragraph_to_doc_comment,
            FindingKind::UseConditionalAccess => self.use_conditional_access,
            FindingKind::DeclareEnumMemberWithZeroValue => {
                self.declare_enum_member_with_zero_value
            }
            FindingKind::CompositeEnumValueContainsUndefinedFlag => {
                self.composite_enum_value_contains_undefined_flag
            }
            FindingKind::DeclareEnumValueAsCombinationOfNames => {
                self.declare_enum_value_as_combination_of_names
            }
            FindingKind::DuplicateEnumValue => self.duplicate_enum_value,
        }
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("failed to parse analyzer configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}
