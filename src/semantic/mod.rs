//! The semantic oracle seam.
//!
//! The hosting compiler owns symbol and type resolution; analyzers ask it
//! narrow questions through [`SemanticModel`]. Every answer is optional:
//! an unresolvable lookup degrades to "no finding", never an error.

pub mod enums;

use crate::core::Span;
use crate::syntax::expr::Expr;

/// Resolved type facts an analyzer can act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub is_reference_type: bool,
    pub is_nullable_value_type: bool,
    pub is_pointer: bool,
    pub is_error: bool,
}

impl TypeInfo {
    pub fn reference() -> Self {
        Self {
            is_reference_type: true,
            ..Self::default()
        }
    }

    pub fn nullable_value() -> Self {
        Self {
            is_nullable_value_type: true,
            ..Self::default()
        }
    }

    pub fn value() -> Self {
        Self::default()
    }

    pub fn pointer() -> Self {
        Self {
            is_pointer: true,
            ..Self::default()
        }
    }

    pub fn error() -> Self {
        Self {
            is_error: true,
            ..Self::default()
        }
    }

    /// Types that admit a null-conditional access without changing
    /// semantics.
    pub fn is_reference_or_nullable(&self) -> bool {
        !self.is_error && (self.is_reference_type || self.is_nullable_value_type)
    }
}

/// A compile-time constant value.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(String),
}

impl Constant {
    pub fn is_null(&self) -> bool {
        matches!(self, Constant::Null)
    }
}

/// The operator symbol a binary expression resolves to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperatorInfo {
    /// A user-defined overload rather than the built-in operator.
    pub is_user_defined: bool,
    /// The declaring type is the boolean type itself.
    pub declaring_type_is_boolean: bool,
    /// The declaring type exposes an implicit conversion to boolean.
    pub declaring_type_converts_to_boolean: bool,
}

/// Type-resolution oracle for one compilation unit.
///
/// `type_of` and `constant_of` are the load-bearing queries; the rest
/// default to the most permissive answer so lightweight hosts only
/// implement what they resolve.
pub trait SemanticModel {
    /// Static type of an expression, if it resolves.
    fn type_of(&self, expr: &Expr) -> Option<TypeInfo>;

    /// Compile-time constant value of an expression, if any.
    fn constant_of(&self, expr: &Expr) -> Option<Constant>;

    /// Resolved operator of a binary expression, when overload resolution
    /// picked a user-defined operator.
    fn operator_of(&self, _expr: &Expr) -> Option<OperatorInfo> {
        None
    }

    /// Whether the span sits inside a lambda converted to an
    /// expression-tree type.
    fn in_expression_tree(&self, _span: Span) -> bool {
        false
    }

    /// Whether the span contains preprocessor directives.
    fn contains_directives(&self, _span: Span) -> bool {
        false
    }
}

/// Model that resolves nothing; mismatched lookups yield no findings.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySemanticModel;

impl SemanticModel for EmptySemanticModel {
    fn type_of(&self, _expr: &Expr) -> Option<TypeInfo> {
        None
    }

    fn constant_of(&self, _expr: &Expr) -> Option<Constant> {
        None
    }
}
