//! Collapses null-guard + dependent-access pairs into one conditional
//! access.
//!
//! Two shapes are recognized: a `&&`/`||` chain where one operand
//! null-checks an expression and the next operand re-references it as the
//! root of a member or element access, and the single-statement
//! `if (x != null) x.M();` form.
//!
//! Operand chains are flattened and scanned right to left with a
//! two-element window; the first fixable window wins and the scan stops
//! (the host re-invokes analysis after a fix is applied).

use log::debug;

use crate::core::cancellation::CancellationToken;
use crate::core::errors::Result;
use crate::core::{Finding, FindingKind, Span};
use crate::semantic::SemanticModel;
use crate::syntax::equivalence::are_equivalent;
use crate::syntax::expr::{BinaryOp, Expr, ExprKind, IfStatement, Pattern, Statement};

/// Scans an expression tree for collapsible `&&`/`||` chains and reports
/// one finding per top-most chain at most.
pub fn analyze_expression(
    expr: &Expr,
    model: &dyn SemanticModel,
    token: &CancellationToken,
) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    walk(expr, None, model, token, &mut findings)?;
    Ok(findings)
}

fn walk(
    expr: &Expr,
    parent_logical: Option<BinaryOp>,
    model: &dyn SemanticModel,
    token: &CancellationToken,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    match &expr.kind {
        ExprKind::Binary { op, left, right } if matches!(op, BinaryOp::And | BinaryOp::Or) => {
            // Only the top-most node of a same-operator chain is analyzed;
            // nested nodes are covered by the chain flattening.
            if parent_logical != Some(*op) {
                if let Some(finding) = analyze_chain(expr, *op, model, token)? {
                    findings.push(finding);
                }
            }
            walk(left, Some(*op), model, token, findings)?;
            walk(right, Some(*op), model, token, findings)?;
        }
        ExprKind::Parenthesized(inner) => {
            // Parentheses are transparent when deciding chain membership.
            walk(inner, parent_logical, model, token, findings)?;
        }
        _ => {
            for child in expr.children() {
                walk(child, None, model, token, findings)?;
            }
        }
    }
    Ok(())
}

fn analyze_chain(
    chain: &Expr,
    op: BinaryOp,
    model: &dyn SemanticModel,
    token: &CancellationToken,
) -> Result<Option<Finding>> {
    // Conditional access has no expression-tree representation.
    if model.in_expression_tree(chain.span) {
        debug!("skipping chain inside expression tree at {:?}", chain.span);
        return Ok(None);
    }

    let mut operands = Vec::new();
    flatten_operands(chain, op, &mut operands);

    let Some((left, right)) = find_fixable_window(&operands, op, model, token)? else {
        return Ok(None);
    };

    // A `||` that resolves to a user-defined operator can only be folded
    // when its declaring type behaves like a boolean.
    if op == BinaryOp::Or {
        if let Some(operator) = model.operator_of(chain) {
            if operator.is_user_defined
                && !operator.declaring_type_is_boolean
                && !operator.declaring_type_converts_to_boolean
            {
                debug!("user-defined `|` operator without boolean semantics");
                return Ok(None);
            }
        }
    }

    Ok(Some(Finding::new(
        FindingKind::UseConditionalAccess,
        Span::new(left.span.start, right.span.end),
    )))
}

/// Collects the non-binary leaf operands of a same-operator chain in
/// source order, looking through parentheses.
fn flatten_operands<'a>(expr: &'a Expr, op: BinaryOp, out: &mut Vec<&'a Expr>) {
    match &expr.kind {
        ExprKind::Binary {
            op: node_op,
            left,
            right,
        } if *node_op == op => {
            flatten_operands(left, op, out);
            flatten_operands(right, op, out);
        }
        ExprKind::Parenthesized(inner) => flatten_operands(inner, op, out),
        _ => out.push(expr),
    }
}

/// Slides a two-element window right to left over the operand list and
/// returns the first (guard, dependent) pair that can collapse.
fn find_fixable_window<'a>(
    operands: &[&'a Expr],
    op: BinaryOp,
    model: &dyn SemanticModel,
    token: &CancellationToken,
) -> Result<Option<(&'a Expr, &'a Expr)>> {
    for pair in operands.windows(2).rev() {
        token.ensure()?;

        let [left, right] = pair else {
            continue;
        };

        let window = Span::new(left.span.start, right.span.end);
        if model.contains_directives(window) {
            continue;
        }

        if is_fixable(left, right, op, model) {
            return Ok(Some((*left, *right)));
        }
    }

    Ok(None)
}

fn is_fixable(left: &Expr, right: &Expr, op: BinaryOp, model: &dyn SemanticModel) -> bool {
    // `&&` pairs with a not-null guard, `||` with a null guard.
    let checking_not_null = op == BinaryOp::And;

    let Some(guarded) = null_check_target(left, checking_not_null) else {
        return false;
    };

    let Some(guarded_type) = model.type_of(guarded) else {
        return false;
    };

    if !guarded_type.is_reference_or_nullable() {
        return false;
    }

    if !validate_right_expression(right, op, model) {
        return false;
    }

    let is_nullable = guarded_type.is_nullable_value_type;

    find_conditionally_accessible(guarded, right, is_nullable, model).is_some()
}

/// Classifies an operand as a null check and returns the guarded
/// expression.
///
/// Accepted styles: `x != null` / `x is not null` for a not-null guard,
/// `x == null` / `x is null` for a null guard (comparisons in either
/// operand order).
pub fn null_check_target(expr: &Expr, checking_not_null: bool) -> Option<&Expr> {
    let expr = expr.walk_down_parens();

    match &expr.kind {
        ExprKind::Binary {
            op: BinaryOp::Ne,
            left,
            right,
        } if checking_not_null => null_comparand(left, right),
        ExprKind::Binary {
            op: BinaryOp::Eq,
            left,
            right,
        } if !checking_not_null => null_comparand(left, right),
        ExprKind::IsPattern {
            expr: inner,
            pattern: Pattern::NotNull,
        } if checking_not_null => Some(inner.walk_down_parens()),
        ExprKind::IsPattern {
            expr: inner,
            pattern: Pattern::Null,
        } if !checking_not_null => Some(inner.walk_down_parens()),
        _ => None,
    }
}

fn null_comparand<'a>(left: &'a Expr, right: &'a Expr) -> Option<&'a Expr> {
    let left = left.walk_down_parens();
    let right = right.walk_down_parens();

    if right.is_null_literal() && !left.is_null_literal() {
        Some(left)
    } else if left.is_null_literal() && !right.is_null_literal() {
        Some(right)
    } else {
        None
    }
}

/// Shape table of dependent operands that are safe to fold, per operator.
fn validate_right_expression(right: &Expr, op: BinaryOp, model: &dyn SemanticModel) -> bool {
    match op {
        BinaryOp::And => match &right.kind {
            ExprKind::Binary {
                op: BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge | BinaryOp::Eq,
                right: comparand,
                ..
            } => {
                // `x.P == c` stays true only when `c` is a non-null
                // compile-time constant (`x?.P` yields null for null `x`).
                model
                    .constant_of(comparand.walk_down_parens())
                    .is_some_and(|constant| !constant.is_null())
            }
            ExprKind::Binary {
                op: BinaryOp::Ne,
                right: comparand,
                ..
            } => comparand.walk_down_parens().is_null_literal(),
            ExprKind::Member { .. }
            | ExprKind::Invocation { .. }
            | ExprKind::ElementAccess { .. }
            | ExprKind::LogicalNot(_)
            | ExprKind::IsType { .. }
            | ExprKind::IsPattern { .. }
            | ExprKind::AsType { .. } => true,
            _ => false,
        },
        BinaryOp::Or => matches!(
            right.kind,
            ExprKind::Member { .. }
                | ExprKind::Invocation { .. }
                | ExprKind::ElementAccess { .. }
                | ExprKind::LogicalNot(_)
        ),
        _ => false,
    }
}

/// Finds the node inside `right` that re-references the guarded expression
/// as the root of an access chain: the rewrite anchor.
///
/// The search descends the leftmost-child spine of `right` (after
/// unwrapping one logical-not) and checks candidates innermost first. The
/// anchor must sit directly under a member or element access whose type is
/// not a pointer. For a nullable guard the anchor is the enclosing
/// `.Value` access, which itself must be further accessed.
pub fn find_conditionally_accessible<'a>(
    guarded: &Expr,
    right: &'a Expr,
    is_nullable: bool,
    model: &dyn SemanticModel,
) -> Option<&'a Expr> {
    let right = match &right.kind {
        ExprKind::LogicalNot(operand) => operand.as_ref(),
        _ => right,
    };

    let spine = right.leftmost_spine();

    for i in (1..spine.len()).rev() {
        let node = spine[i];
        let parent = spine[i - 1];

        if !guarded.same_kind(node) {
            continue;
        }

        if !matches!(
            parent.kind,
            ExprKind::Member { .. } | ExprKind::ElementAccess { .. }
        ) {
            continue;
        }

        if model.type_of(parent).is_some_and(|t| t.is_pointer) {
            continue;
        }

        if !are_equivalent(guarded, node) {
            continue;
        }

        if !is_nullable {
            return Some(node);
        }

        // Nullable guard: `x != null && x.Value.M()` folds to `x?.M()`,
        // so the anchor is the `.Value` access and it must be accessed
        // further.
        if let ExprKind::Member { name, .. } = &parent.kind {
            if name == "Value"
                && i >= 2
                && matches!(
                    spine[i - 2].kind,
                    ExprKind::Member { .. } | ExprKind::ElementAccess { .. }
                )
            {
                return Some(parent);
            }
        }

        return None;
    }

    None
}

/// The `if (x != null) x.M();` shape: a simple `if` whose single statement
/// invokes a member on the guarded expression.
pub fn analyze_if_statement(
    if_statement: &IfStatement,
    model: &dyn SemanticModel,
    token: &CancellationToken,
) -> Result<Vec<Finding>> {
    token.ensure()?;

    if !if_statement.is_simple() {
        return Ok(Vec::new());
    }

    if model.contains_directives(if_statement.span) {
        return Ok(Vec::new());
    }

    let Some(guarded) = null_check_target(&if_statement.condition, true) else {
        return Ok(Vec::new());
    };

    let Some(receiver) = member_invocation_receiver(if_statement.single_non_block_statement())
    else {
        return Ok(Vec::new());
    };

    let Some(guarded_type) = model.type_of(guarded) else {
        return Ok(Vec::new());
    };

    if guarded_type.is_error {
        return Ok(Vec::new());
    }

    // For a nullable guard the statement must go through `.Value`.
    let receiver = if guarded_type.is_nullable_value_type {
        match &receiver.kind {
            ExprKind::Member { receiver, name } if name == "Value" => receiver,
            _ => return Ok(Vec::new()),
        }
    } else {
        receiver
    };

    if !are_equivalent(guarded, receiver) {
        return Ok(Vec::new());
    }

    if model.in_expression_tree(if_statement.span) {
        return Ok(Vec::new());
    }

    Ok(vec![Finding::new(
        FindingKind::UseConditionalAccess,
        if_statement.span,
    )])
}

/// Receiver of a `receiver.Name(args);` statement, if the statement has
/// exactly that shape.
fn member_invocation_receiver(statement: Option<&Statement>) -> Option<&Expr> {
    let Statement::Expression { expr, .. } = statement? else {
        return None;
    };

    let ExprKind::Invocation { callee, .. } = &expr.kind else {
        return None;
    };

    match &callee.kind {
        ExprKind::Member { receiver, .. } => Some(receiver.as_ref()),
        _ => None,
    }
}
