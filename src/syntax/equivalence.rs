//! Structural expression equivalence.
//!
//! Two expressions are equivalent when they spell the same thing:
//! parentheses are transparent, identifiers compare by exact name, and
//! spans are ignored. This is the relation used both to classify a null
//! guard and to locate its re-reference in the dependent operand.

use crate::syntax::expr::{Expr, ExprKind};

pub fn are_equivalent(a: &Expr, b: &Expr) -> bool {
    let a = a.walk_down_parens();
    let b = b.walk_down_parens();

    match (&a.kind, &b.kind) {
        (ExprKind::Identifier(left), ExprKind::Identifier(right)) => left == right,
        (ExprKind::Literal(left), ExprKind::Literal(right)) => left == right,
        (
            ExprKind::Member {
                receiver: ra,
                name: na,
            },
            ExprKind::Member {
                receiver: rb,
                name: nb,
            },
        ) => na == nb && are_equivalent(ra, rb),
        (
            ExprKind::ElementAccess {
                receiver: ra,
                arguments: aa,
            },
            ExprKind::ElementAccess {
                receiver: rb,
                arguments: ab,
            },
        ) => are_equivalent(ra, rb) && all_equivalent(aa, ab),
        (
            ExprKind::Invocation {
                callee: ca,
                arguments: aa,
            },
            ExprKind::Invocation {
                callee: cb,
                arguments: ab,
            },
        ) => are_equivalent(ca, cb) && all_equivalent(aa, ab),
        (
            ExprKind::Binary {
                op: oa,
                left: la,
                right: ra,
            },
            ExprKind::Binary {
                op: ob,
                left: lb,
                right: rb,
            },
        ) => oa == ob && are_equivalent(la, lb) && are_equivalent(ra, rb),
        (ExprKind::LogicalNot(la), ExprKind::LogicalNot(lb)) => are_equivalent(la, lb),
        (ExprKind::IsType { expr: ea, ty: ta }, ExprKind::IsType { expr: eb, ty: tb }) => {
            ta == tb && are_equivalent(ea, eb)
        }
        (
            ExprKind::IsPattern {
                expr: ea,
                pattern: pa,
            },
            ExprKind::IsPattern {
                expr: eb,
                pattern: pb,
            },
        ) => pa == pb && are_equivalent(ea, eb),
        (ExprKind::AsType { expr: ea, ty: ta }, ExprKind::AsType { expr: eb, ty: tb }) => {
            ta == tb && are_equivalent(ea, eb)
        }
        _ => false,
    }
}

fn all_equivalent(a: &[Expr], b: &[Expr]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| are_equivalent(x, y))
}
