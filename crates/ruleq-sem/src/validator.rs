//! Post-parse semantic validation (spec §4.3).
//!
//! A single post-order traversal of the AST, checking the three structural
//! rules the parser's grammar can't express on its own: `in`/`not in`'s
//! right-hand shape, `co`/`sw`/`ew`'s operand types, and `pr`'s operand
//! shape. Everything the validator accepts is then safe to evaluate without
//! panicking (spec §3 I1) — anything it can't decide at compile time (e.g.
//! whether an identifier will resolve to an array at runtime) is deferred
//! to the evaluator, which degrades to `false` instead of erroring.

use ruleq_par::{AstNode, BinaryOp, UnaryOp, Value};
use ruleq_util::{CompileError, CompileResult, Span};

/// Runs semantic validation over a parsed AST, returning it unchanged on
/// success (validation never rewrites the tree) or the first structural
/// violation found.
pub fn validate(ast: &AstNode) -> CompileResult<()> {
    match ast {
        AstNode::Literal(_) | AstNode::Identifier(_) | AstNode::PropertyPath(_) | AstNode::ArrayLiteral(_) => {
            Ok(())
        }
        AstNode::Unary { op, child } => {
            validate(child)?;
            if *op == UnaryOp::Pr {
                check_presence_operand(child)?;
            }
            Ok(())
        }
        AstNode::Binary { op, left, right } => {
            validate(left)?;
            validate(right)?;
            match op {
                BinaryOp::In | BinaryOp::NotIn => check_membership_operand(right),
                BinaryOp::Co | BinaryOp::Sw | BinaryOp::Ew => {
                    check_string_operand(left)?;
                    check_string_operand(right)
                }
                _ => Ok(()),
            }
        }
    }
}

/// `in`/`not in`: a *literal* right-hand side must be an array. An
/// identifier/path right-hand side is left for the evaluator, since it may
/// resolve to a context array at runtime (§4.3).
fn check_membership_operand(right: &AstNode) -> CompileResult<()> {
    match right {
        AstNode::ArrayLiteral(_) => Ok(()),
        AstNode::Literal(_) => Err(CompileError::invalid_in_operand(unknown_span())),
        AstNode::Identifier(_) | AstNode::PropertyPath(_) => Ok(()),
        AstNode::Unary { .. } | AstNode::Binary { .. } => Err(CompileError::invalid_in_operand(unknown_span())),
    }
}

/// `co`/`sw`/`ew`: a literal operand must be a string; non-literal
/// operands (identifiers/paths) are deferred to runtime (§4.3, §4.4).
fn check_string_operand(operand: &AstNode) -> CompileResult<()> {
    match operand {
        AstNode::Literal(Value::String(_)) => Ok(()),
        AstNode::Literal(_) => Err(CompileError::invalid_string_operator(unknown_span())),
        _ => Ok(()),
    }
}

/// `pr`: the operand must be an identifier or property path (§4.3).
fn check_presence_operand(operand: &AstNode) -> CompileResult<()> {
    match operand {
        AstNode::Identifier(_) | AstNode::PropertyPath(_) => Ok(()),
        _ => Err(CompileError::invalid_presence_operator(unknown_span())),
    }
}

/// Semantic errors reference a node deep inside an already-parsed tree,
/// which does not retain per-node source spans (only tokens do, during
/// lexing/parsing). The stable error kind plus message already identify
/// the exact rule that failed, so a zero-width placeholder is used here
/// rather than threading spans through every AST variant for a second time.
fn unknown_span() -> Span {
    Span::point(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleq_par::parse;

    fn check(source: &str) -> CompileResult<()> {
        validate(&parse(source).unwrap())
    }

    #[test]
    fn in_with_array_literal_is_valid() {
        assert!(check(r#"color in ["red","green"]"#).is_ok());
    }

    #[test]
    fn in_with_non_array_literal_is_rejected() {
        assert!(check(r#"color in "red""#).is_err());
    }

    #[test]
    fn in_with_identifier_right_hand_defers_to_runtime() {
        assert!(check("color in allowed_colors").is_ok());
    }

    #[test]
    fn co_with_string_literal_is_valid() {
        assert!(check(r#"email co "@example.com""#).is_ok());
    }

    #[test]
    fn co_with_non_string_literal_is_rejected() {
        assert!(check("code co 42").is_err());
    }

    #[test]
    fn co_with_identifier_operand_defers_to_runtime() {
        assert!(check("email co domain").is_ok());
    }

    #[test]
    fn pr_over_identifier_is_valid() {
        assert!(check("status pr").is_ok());
    }

    #[test]
    fn pr_over_property_path_is_valid() {
        assert!(check("user.profile.age pr").is_ok());
    }

    #[test]
    fn pr_over_a_literal_is_rejected() {
        // The grammar only allows Operand "pr", and a literal is a valid
        // Operand, so this must be caught by the validator, not the parser.
        assert!(check("5 pr").is_err());
    }

    #[test]
    fn datetime_operators_accept_any_operand_shape() {
        assert!(check(r#"created_at dq "2024-07-09T19:12:00Z""#).is_ok());
        assert!(check("created_at dq now").is_ok());
    }

    #[test]
    fn nested_logical_expression_validates_every_subtree() {
        assert!(check(r#"(a in ["x"]) and not (b co "y") or c pr"#).is_ok());
        assert!(check(r#"(a in "x") and b pr"#).is_err());
    }
}
