//! Statement traversal helpers.

use crate::parser::{Expr, ExprKind, Statement};

/// Calls `f` for each statement and its nested statements, parents first.
pub fn walk_statements(statements: &[Statement], f: &mut dyn FnMut(&Statement)) {
    for statement in statements {
        f(statement);
        for children in statement.kind.children() {
            walk_statements(children, f);
        }
    }
}

/// Calls `f` for `expr` and every sub-expression, outermost first.
pub fn walk_expr(expr: &Expr, f: &mut dyn FnMut(&Expr)) {
    f(expr);
    match &expr.kind {
        ExprKind::Call { args, .. } | ExprKind::New { args, .. } => {
            for arg in &args.positional {
                walk_expr(arg, f);
            }
            for option in &args.options {
                walk_expr(&option.value, f);
            }
        }
        ExprKind::MethodCall { receiver, args, .. } => {
            walk_expr(receiver, f);
            for arg in &args.positional {
                walk_expr(arg, f);
            }
            for option in &args.options {
                walk_expr(&option.value, f);
            }
        }
        ExprKind::Member { receiver, .. } => walk_expr(receiver, f),
        ExprKind::Index { base, indices } => {
            walk_expr(base, f);
            for index in indices {
                walk_expr(index, f);
            }
        }
        ExprKind::Unary { operand, .. } => walk_expr(operand, f),
        ExprKind::Binary { lhs, rhs, .. } => {
            walk_expr(lhs, f);
            walk_expr(rhs, f);
        }
        ExprKind::Paren(inner) => walk_expr(inner, f),
        ExprKind::Number(_)
        | ExprKind::Str(_)
        | ExprKind::Variable(_)
        | ExprKind::Field(_)
        | ExprKind::StarLabel(_)
        | ExprKind::Missing => {}
    }
}
