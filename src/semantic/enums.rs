//! Ordered enum member snapshots.
//!
//! The enum member source hands the flags analyzer one immutable snapshot
//! per enum type: every named member in declaration order, with its
//! resolved constant (normalized to raw unsigned 64-bit) and the shape of
//! its initializer expression. Snapshots are rebuilt per analysis pass.

use crate::core::Span;

/// Underlying integral storage of an enum type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegralKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
}

impl IntegralKind {
    /// Largest representable value, as the raw unsigned bit pattern used
    /// for flag arithmetic. Signed kinds are bounded by their signed max.
    pub fn max_value(&self) -> u64 {
        match self {
            IntegralKind::I8 => i8::MAX as u64,
            IntegralKind::U8 => u8::MAX as u64,
            IntegralKind::I16 => i16::MAX as u64,
            IntegralKind::U16 => u16::MAX as u64,
            IntegralKind::I32 => i32::MAX as u64,
            IntegralKind::U32 => u32::MAX as u64,
            IntegralKind::I64 => i64::MAX as u64,
            IntegralKind::U64 => u64::MAX,
        }
    }

    pub fn fits(&self, value: u64) -> bool {
        value <= self.max_value()
    }
}

/// Shape of a member's declared initializer expression.
#[derive(Clone, Debug, PartialEq)]
pub enum InitializerKind {
    /// A bare numeric literal (parentheses stripped).
    NumericLiteral,
    /// A direct reference to another member's name.
    NameReference(String),
    /// Any other expression; records whether a numeric literal occurs
    /// anywhere inside it.
    Other { contains_numeric_literal: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Initializer {
    pub kind: InitializerKind,
    pub span: Span,
}

impl Initializer {
    /// Initializers the combination-of-names diagnostic can target: a
    /// numeric literal, or an expression containing one.
    pub fn spells_out_a_number(&self) -> bool {
        match &self.kind {
            InitializerKind::NumericLiteral => true,
            InitializerKind::NameReference(_) => false,
            InitializerKind::Other {
                contains_numeric_literal,
            } => *contains_numeric_literal,
        }
    }
}

/// One named enum member; `ordinal` reflects declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub ordinal: usize,
    /// Resolved constant, normalized to the raw unsigned 64-bit pattern.
    /// `None` when the constant does not resolve.
    pub value: Option<u64>,
    /// `None` for implicit successor values.
    pub initializer: Option<Initializer>,
    /// Whole member declaration.
    pub span: Span,
}

impl EnumMember {
    /// More than one bit set.
    pub fn has_composite_value(&self) -> bool {
        self.value.is_some_and(|v| v.count_ones() > 1)
    }

    /// Set bits of the value, as single-bit values in ascending order.
    pub fn value_bits(&self) -> Vec<u64> {
        let Some(value) = self.value else {
            return Vec::new();
        };
        (0..64)
            .map(|i| 1u64 << i)
            .filter(|bit| value & bit != 0)
            .collect()
    }
}

/// Complete declaration-ordered member list of one enum type.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumSnapshot {
    pub name: String,
    pub storage: IntegralKind,
    pub has_flags_attribute: bool,
    pub members: Vec<EnumMember>,
    /// Span of the enum's identifier token.
    pub identifier_span: Span,
}

impl EnumSnapshot {
    /// Whether some declared member (at any position) has exactly this
    /// value.
    pub fn contains_value(&self, value: u64) -> bool {
        self.members.iter().any(|m| m.value == Some(value))
    }

    pub fn all_values_resolved(&self) -> bool {
        self.members.iter().all(|m| m.value.is_some())
    }
}
