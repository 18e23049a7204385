//! Property tests for spec §8 P8 (`not` > `and` > `or`).

use proptest::prelude::*;
use ruleq_lex::keyword;
use ruleq_par::{parse, AstNode, BinaryOp, UnaryOp};

fn leaf(name: &str) -> String {
    format!("{name} pr")
}

fn not_a_keyword() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_filter("must not collide with a reserved keyword", |s| keyword(s).is_none())
}

proptest! {
    #[test]
    fn or_is_the_loosest_binder(a in not_a_keyword(), b in not_a_keyword(), c in not_a_keyword()) {
        let source = format!("{} or {} and {}", leaf(&a), leaf(&b), leaf(&c));
        let ast = parse(&source).unwrap();
        match ast {
            AstNode::Binary { op: BinaryOp::Or, right, .. } => {
                prop_assert!(
                    matches!(*right, AstNode::Binary { op: BinaryOp::And, .. }),
                    "expected the right side of the top-level `or` to be an `and` node"
                );
            }
            other => prop_assert!(false, "expected top-level or, got {other:?}"),
        }
    }

    #[test]
    fn not_binds_tighter_than_and(a in not_a_keyword(), b in not_a_keyword()) {
        let source = format!("not {} and {}", leaf(&a), leaf(&b));
        let ast = parse(&source).unwrap();
        match ast {
            AstNode::Binary { op: BinaryOp::And, left, .. } => {
                prop_assert!(
                    matches!(*left, AstNode::Unary { op: UnaryOp::Not, .. }),
                    "expected the left side of the top-level `and` to be a `not` node"
                );
            }
            other => prop_assert!(false, "expected top-level and, got {other:?}"),
        }
    }

    #[test]
    fn and_is_left_associative(a in not_a_keyword(), b in not_a_keyword(), c in not_a_keyword()) {
        let source = format!("{} and {} and {}", leaf(&a), leaf(&b), leaf(&c));
        let ast = parse(&source).unwrap();
        match ast {
            AstNode::Binary { op: BinaryOp::And, left, .. } => {
                prop_assert!(
                    matches!(*left, AstNode::Binary { op: BinaryOp::And, .. }),
                    "expected the left side to be the nested `and` of a left-associative chain"
                );
            }
            other => prop_assert!(false, "expected left-associative and, got {other:?}"),
        }
    }
}
