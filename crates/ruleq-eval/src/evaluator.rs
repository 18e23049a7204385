//! The tree-walking evaluator (spec §4.4).
//!
//! No heap allocation is reachable from [`Evaluator::evaluate`] against an
//! already-validated AST: every intermediate value is an [`EvalResult`]
//! returned by value, every string payload is borrowed, and every failure
//! mode (missing attribute, type mismatch, unparseable datetime, non-array
//! `in` right-hand side) degrades to `false` rather than propagating an
//! error (spec §3 I1, §7 "Runtime behaviour").

use std::cmp::Ordering;

use ruleq_par::{AstNode, BinaryOp, UnaryOp, Value};
use time::{Duration as TimeDuration, OffsetDateTime};

use crate::context::Context;
use crate::eval_result::EvalResult;

/// Evaluates compiled rules against a [`Context`].
///
/// Holds no per-call state of its own: unlike a scratch-struct design, a
/// Rust recursive evaluator returning stack values by value needs nothing
/// to preallocate. The type still exists (rather than a bare free
/// function) so the engine facade has a stable, per-thread-or-per-call
/// handle to construct without allocating, matching spec §4.5's "the
/// evaluator must be obtainable per-call without allocation."
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Entry point: spec §2 `Evaluator.Evaluate(ast, ctx) -> bool`.
    pub fn evaluate(&self, root: &AstNode, ctx: &Context) -> bool {
        eval_node(root, ctx).is_truthy()
    }
}

fn eval_node<'a>(node: &'a AstNode, ctx: &'a Context) -> EvalResult<'a> {
    match node {
        AstNode::Literal(value) => EvalResult::from_value(value),
        AstNode::ArrayLiteral(values) => EvalResult::LiteralArray(values),
        AstNode::Identifier(_) | AstNode::PropertyPath(_) => resolve(node, ctx)
            .map(EvalResult::from_context_value)
            .unwrap_or(EvalResult::Absent),
        AstNode::Unary { op, child } => eval_unary(*op, child, ctx),
        AstNode::Binary { op, left, right } => eval_binary(*op, left, right, ctx),
    }
}

fn resolve<'a>(node: &AstNode, ctx: &'a Context) -> Option<&'a crate::context::ContextValue> {
    match node {
        AstNode::Identifier(sym) => ctx.get(sym.as_str()),
        AstNode::PropertyPath(segments) => {
            // No allocation for the common case: a fixed-size stack buffer
            // holds up to 8 borrowed path segments. A path longer than
            // that (rare) falls back to a heap `Vec` rather than being
            // reported as absent.
            const MAX_INLINE_SEGMENTS: usize = 8;
            if segments.len() <= MAX_INLINE_SEGMENTS {
                let mut buf: [&str; MAX_INLINE_SEGMENTS] = [""; MAX_INLINE_SEGMENTS];
                for (slot, seg) in buf.iter_mut().zip(segments.iter()) {
                    *slot = seg.as_str();
                }
                ctx.resolve_path(&buf[..segments.len()])
            } else {
                let owned: Vec<&str> = segments.iter().map(|s| s.as_str()).collect();
                ctx.resolve_path(&owned)
            }
        }
        _ => None,
    }
}

fn eval_unary<'a>(op: UnaryOp, child: &'a AstNode, ctx: &'a Context) -> EvalResult<'a> {
    match op {
        UnaryOp::Not => EvalResult::Bool(!eval_node(child, ctx).is_truthy()),
        // Presence is total: it never fails, it only reports whether the
        // path resolved (spec §4.4 "Presence", P7).
        UnaryOp::Pr => EvalResult::Bool(resolve(child, ctx).is_some()),
    }
}

fn eval_binary<'a>(op: BinaryOp, left: &'a AstNode, right: &'a AstNode, ctx: &'a Context) -> EvalResult<'a> {
    match op {
        BinaryOp::And => {
            let lhs = eval_node(left, ctx);
            if !lhs.is_truthy() {
                return EvalResult::Bool(false);
            }
            EvalResult::Bool(eval_node(right, ctx).is_truthy())
        }
        BinaryOp::Or => {
            let lhs = eval_node(left, ctx);
            if lhs.is_truthy() {
                return EvalResult::Bool(true);
            }
            EvalResult::Bool(eval_node(right, ctx).is_truthy())
        }
        _ => {
            let lhs = eval_node(left, ctx);
            let rhs = eval_node(right, ctx);
            EvalResult::Bool(eval_non_logical(op, &lhs, &rhs))
        }
    }
}

fn eval_non_logical(op: BinaryOp, lhs: &EvalResult, rhs: &EvalResult) -> bool {
    match op {
        BinaryOp::Eq => loose_eq(lhs, rhs),
        BinaryOp::Ne => !loose_eq(lhs, rhs),
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => ordered_compare(op, lhs, rhs),
        BinaryOp::Co | BinaryOp::Sw | BinaryOp::Ew => string_op(op, lhs, rhs),
        BinaryOp::In => membership(lhs, rhs),
        BinaryOp::NotIn => !membership(lhs, rhs),
        BinaryOp::Dq | BinaryOp::Dn | BinaryOp::Be | BinaryOp::Bq | BinaryOp::Af | BinaryOp::Aq => {
            datetime_op(op, lhs, rhs)
        }
        BinaryOp::Dl | BinaryOp::Dg => days_op(op, lhs, rhs),
        BinaryOp::And | BinaryOp::Or => unreachable!("handled in eval_binary"),
    }
}

/// `eq`/`ne` (spec §4.4 "Equality"): case-insensitive for strings,
/// shadow-or-float for numbers, strict for booleans, false across
/// categories.
fn loose_eq(a: &EvalResult, b: &EvalResult) -> bool {
    match (a, b) {
        (EvalResult::Bool(x), EvalResult::Bool(y)) => x == y,
        (EvalResult::Str(x), EvalResult::Str(y)) => case_fold_eq(x, y),
        (EvalResult::Number { int: Some(x), .. }, EvalResult::Number { int: Some(y), .. }) => x == y,
        (EvalResult::Number { float: x, .. }, EvalResult::Number { float: y, .. }) => x == y,
        _ => false,
    }
}

/// `in`/`not in` element match (spec §4.4 "Membership"): strict typed
/// equality, no case folding, no cross-category coercion.
fn strict_eq(a: &EvalResult, b: &EvalResult) -> bool {
    match (a, b) {
        (EvalResult::Bool(x), EvalResult::Bool(y)) => x == y,
        (EvalResult::Str(x), EvalResult::Str(y)) => x == y,
        (EvalResult::Number { int: Some(x), .. }, EvalResult::Number { int: Some(y), .. }) => x == y,
        (EvalResult::Number { float: x, .. }, EvalResult::Number { float: y, .. }) => x == y,
        _ => false,
    }
}

fn ordered_compare(op: BinaryOp, a: &EvalResult, b: &EvalResult) -> bool {
    let ordering = match (a, b) {
        (EvalResult::Number { int: Some(x), .. }, EvalResult::Number { int: Some(y), .. }) => x.cmp(y),
        (EvalResult::Number { float: x, .. }, EvalResult::Number { float: y, .. }) => {
            match x.partial_cmp(y) {
                Some(o) => o,
                None => return false, // NaN
            }
        }
        (EvalResult::Str(x), EvalResult::Str(y)) => x.cmp(y),
        _ => return false,
    };
    match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::Le => ordering != Ordering::Greater,
        BinaryOp::Ge => ordering != Ordering::Less,
        _ => unreachable!(),
    }
}

fn membership(left: &EvalResult, right: &EvalResult) -> bool {
    match right {
        EvalResult::LiteralArray(values) => values
            .iter()
            .any(|v| strict_eq(left, &EvalResult::from_value(v))),
        EvalResult::ContextArray(items) => items
            .iter()
            .any(|v| strict_eq(left, &EvalResult::from_context_value(v))),
        _ => false,
    }
}

fn string_op(op: BinaryOp, a: &EvalResult, b: &EvalResult) -> bool {
    let lhs = render(a);
    let rhs = render(b);
    match op {
        BinaryOp::Co => contains_ci(&lhs, &rhs),
        BinaryOp::Sw => starts_with_ci(&lhs, &rhs),
        BinaryOp::Ew => ends_with_ci(&lhs, &rhs),
        _ => unreachable!(),
    }
}

/// Renders a non-string operand as text (spec §4.4 "String operators":
/// "operands are rendered as strings before the test"). Allocates only on
/// this narrow, type-mismatched fallback path; every representative,
/// type-correct rule never reaches it.
fn render<'a>(value: &'a EvalResult<'a>) -> std::borrow::Cow<'a, str> {
    match value {
        EvalResult::Str(s) => std::borrow::Cow::Borrowed(s),
        EvalResult::Bool(b) => std::borrow::Cow::Owned(b.to_string()),
        EvalResult::Number { float, int } => std::borrow::Cow::Owned(
            int.map(|i| i.to_string()).unwrap_or_else(|| float.to_string()),
        ),
        EvalResult::ContextArray(_) | EvalResult::LiteralArray(_) | EvalResult::Absent => {
            std::borrow::Cow::Borrowed("")
        }
    }
}

fn case_fold_eq(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    let mut ac = a.chars().flat_map(char::to_lowercase);
    let mut bc = b.chars().flat_map(char::to_lowercase);
    loop {
        match (ac.next(), bc.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => continue,
            _ => return false,
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    if haystack.is_ascii() && needle.is_ascii() {
        if needle.is_empty() {
            return true;
        }
        let h = haystack.as_bytes();
        let n = needle.as_bytes();
        return n.len() <= h.len() && h.windows(n.len()).any(|w| w.eq_ignore_ascii_case(n));
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    if haystack.is_ascii() && needle.is_ascii() {
        return haystack.len() >= needle.len() && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes());
    }
    haystack.to_lowercase().starts_with(&needle.to_lowercase())
}

fn ends_with_ci(haystack: &str, needle: &str) -> bool {
    if haystack.is_ascii() && needle.is_ascii() {
        return haystack.len() >= needle.len()
            && haystack.as_bytes()[haystack.len() - needle.len()..].eq_ignore_ascii_case(needle.as_bytes());
    }
    haystack.to_lowercase().ends_with(&needle.to_lowercase())
}

/// Parses either an RFC3339 string or a Unix-seconds number into an
/// instant (spec §4.4 "Datetime operators", §9 "Datetime parsing").
fn parse_instant(value: &EvalResult) -> Option<OffsetDateTime> {
    match value {
        EvalResult::Str(s) => time::OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339).ok(),
        EvalResult::Number { float, int } => {
            let seconds = int.map(|i| i as f64).unwrap_or(*float);
            Some(OffsetDateTime::UNIX_EPOCH + TimeDuration::seconds_f64(seconds))
        }
        _ => None,
    }
}

/// `dq dn be bq af aq` (spec §4.4 "Datetime operators"). Comparison via
/// `OffsetDateTime`'s `Ord` already normalises differing UTC offsets to
/// the same instant, which is what gives us P6 for free.
fn datetime_op(op: BinaryOp, a: &EvalResult, b: &EvalResult) -> bool {
    let (Some(lhs), Some(rhs)) = (parse_instant(a), parse_instant(b)) else {
        return false;
    };
    match op {
        BinaryOp::Dq => lhs == rhs,
        BinaryOp::Dn => lhs != rhs,
        BinaryOp::Be => lhs < rhs,
        BinaryOp::Bq => lhs <= rhs,
        BinaryOp::Af => lhs > rhs,
        BinaryOp::Aq => lhs >= rhs,
        _ => unreachable!(),
    }
}

/// `dl dg` (spec §4.4 "Days operators"). Reads the wall clock — the only
/// observable side effect on the evaluate hot path (spec §5).
fn days_op(op: BinaryOp, left: &EvalResult, right: &EvalResult) -> bool {
    let Some(instant) = parse_instant(left) else {
        return false;
    };
    let days = match right {
        EvalResult::Number { float, int } => int.map(|i| i as f64).unwrap_or(*float),
        _ => return false,
    };
    if days < 0.0 {
        return false;
    }
    let elapsed_days = (OffsetDateTime::now_utc() - instant).as_seconds_f64() / 86_400.0;
    match op {
        BinaryOp::Dl => (0.0..=days).contains(&elapsed_days),
        BinaryOp::Dg => elapsed_days > days,
        _ => unreachable!(),
    }
}
