//! Expression and statement nodes.
//!
//! Nodes are immutable and carry half-open byte spans assigned by the host.
//! Dispatch over node shapes is a match on [`ExprKind`]; there is no parent
//! pointer, so analyses that need ancestry walk down from a root instead.

use crate::core::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    Literal(Literal),
    /// `receiver.name`
    Member {
        receiver: Box<Expr>,
        name: String,
    },
    /// `receiver[args]`
    ElementAccess {
        receiver: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// `callee(args)`
    Invocation {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `!operand`
    LogicalNot(Box<Expr>),
    Parenthesized(Box<Expr>),
    /// `expr is Type`
    IsType {
        expr: Box<Expr>,
        ty: String,
    },
    /// `expr is pattern`
    IsPattern {
        expr: Box<Expr>,
        pattern: Pattern,
    },
    /// `expr as Type`
    AsType {
        expr: Box<Expr>,
        ty: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `&&`
    And,
    /// `||`
    Or,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    BitAnd,
    BitOr,
    Add,
    Sub,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// `is null`
    Null,
    /// `is not null`
    NotNull,
    /// `is Type ...`
    Type(String),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Strips any number of enclosing parentheses.
    pub fn walk_down_parens(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Parenthesized(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(Literal::Null))
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Identifier(_) | ExprKind::Literal(_) => Vec::new(),
            ExprKind::Member { receiver, .. } => vec![receiver.as_ref()],
            ExprKind::ElementAccess {
                receiver,
                arguments,
            } => {
                let mut children = vec![receiver.as_ref()];
                children.extend(arguments.iter());
                children
            }
            ExprKind::Invocation { callee, arguments } => {
                let mut children = vec![callee.as_ref()];
                children.extend(arguments.iter());
                children
            }
            ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::LogicalNot(operand) => vec![operand.as_ref()],
            ExprKind::Parenthesized(inner) => vec![inner.as_ref()],
            ExprKind::IsType { expr, .. }
            | ExprKind::IsPattern { expr, .. }
            | ExprKind::AsType { expr, .. } => vec![expr.as_ref()],
        }
    }

    /// The child whose first token is also this node's first token, if any.
    ///
    /// Parenthesized and logical-not nodes contribute no leftmost child:
    /// their own first token (`(`, `!`) precedes the nested expression.
    pub fn leftmost_child(&self) -> Option<&Expr> {
        match &self.kind {
            ExprKind::Member { receiver, .. } | ExprKind::ElementAccess { receiver, .. } => {
                Some(receiver.as_ref())
            }
            ExprKind::Invocation { callee, .. } => Some(callee.as_ref()),
            ExprKind::Binary { left, .. } => Some(left.as_ref()),
            ExprKind::IsType { expr, .. }
            | ExprKind::IsPattern { expr, .. }
            | ExprKind::AsType { expr, .. } => Some(expr.as_ref()),
            _ => None,
        }
    }

    /// Chain of nodes sharing this node's first token, outermost first.
    pub fn leftmost_spine(&self) -> Vec<&Expr> {
        let mut spine = vec![self];
        let mut current = self;
        while let Some(child) = current.leftmost_child() {
            spine.push(child);
            current = child;
        }
        spine
    }

    /// Whether two nodes have the same shape tag (binary nodes also compare
    /// their operator, mirroring per-operator syntax kinds).
    pub fn same_kind(&self, other: &Expr) -> bool {
        match (&self.kind, &other.kind) {
            (ExprKind::Binary { op: a, .. }, ExprKind::Binary { op: b, .. }) => a == b,
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Expression { expr: Expr, span: Span },
    Block { statements: Vec<Statement>, span: Span },
    Other { span: Span },
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Expression { span, .. }
            | Statement::Block { span, .. }
            | Statement::Other { span } => *span,
        }
    }
}

/// An `if` statement; `else if` chains arrive as nested statements.
#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Statement,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

impl IfStatement {
    /// An `if` with no `else` clause.
    pub fn is_simple(&self) -> bool {
        self.else_branch.is_none()
    }

    /// The then-branch statement, looking through a single-statement block.
    pub fn single_non_block_statement(&self) -> Option<&Statement> {
        match &self.then_branch {
            Statement::Block { statements, .. } => match statements.as_slice() {
                [only] if !matches!(only, Statement::Block { .. }) => Some(only),
                _ => None,
            },
            statement => Some(statement),
        }
    }
}
