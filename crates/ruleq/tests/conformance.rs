//! Table-driven conformance harness covering the engine's concrete
//! end-to-end scenarios.

use ruleq::{Context, ContextValue, Engine};

struct Scenario {
    name: &'static str,
    rule: &'static str,
    build_context: fn(&mut Context),
    expected: bool,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "simple_equality",
            rule: "x eq 10",
            build_context: |c| {
                c.insert("x", 10i64);
            },
            expected: true,
        },
        Scenario {
            name: "nested_and",
            rule: "user.profile.age ge 18 and user.status eq \"active\"",
            build_context: |c| {
                let mut profile = rustc_hash::FxHashMap::default();
                profile.insert("age".to_string(), ContextValue::I64(25));
                let mut user = rustc_hash::FxHashMap::default();
                user.insert("profile".to_string(), ContextValue::Map(profile));
                user.insert("status".to_string(), ContextValue::string("active"));
                c.insert("user", ContextValue::Map(user));
            },
            expected: true,
        },
        Scenario {
            name: "membership_miss",
            rule: r#"color in ["red","green","blue"]"#,
            build_context: |c| {
                c.insert("color", "yellow");
            },
            expected: false,
        },
        Scenario {
            name: "big_integer_precision",
            rule: "x gt 9223372036854775806",
            build_context: |c| {
                c.insert("x", 9223372036854775807i64);
            },
            expected: true,
        },
        Scenario {
            name: "case_insensitive_suffix",
            rule: r#"email ew ".COM""#,
            build_context: |c| {
                c.insert("email", "user@site.com");
            },
            expected: true,
        },
        Scenario {
            name: "timezone_normalised_equality",
            rule: r#"created_at dq "2024-07-09T19:12:00-03:00""#,
            build_context: |c| {
                c.insert("created_at", "2024-07-09T22:12:00Z");
            },
            expected: true,
        },
        Scenario {
            name: "not_over_parenthesised_eq",
            rule: r#"not (status eq "inactive")"#,
            build_context: |c| {
                c.insert("status", "active");
            },
            expected: true,
        },
        Scenario {
            name: "missing_attribute_is_false_not_error",
            rule: "missing.attr eq 10",
            build_context: |_| {},
            expected: false,
        },
        // Fixture table beyond the eight scenarios named in spec §8.
        Scenario {
            name: "string_prefix_match",
            rule: r#"name sw "Mr""#,
            build_context: |c| {
                c.insert("name", "mrs. Smith");
            },
            expected: true,
        },
        Scenario {
            name: "presence_over_false_value_is_still_true",
            rule: "flag pr",
            build_context: |c| {
                c.insert("flag", false);
            },
            expected: true,
        },
        Scenario {
            name: "presence_over_absent_path_is_false",
            rule: "flag pr",
            build_context: |_| {},
            expected: false,
        },
        Scenario {
            name: "not_in_inverts_membership",
            rule: r#"color not in ["red","green","blue"]"#,
            build_context: |c| {
                c.insert("color", "yellow");
            },
            expected: true,
        },
        Scenario {
            name: "or_short_circuits_on_truthy_left",
            rule: "a or b",
            build_context: |c| {
                c.insert("a", true);
            },
            expected: true,
        },
        Scenario {
            name: "precedence_not_binds_tighter_than_and_and_or",
            rule: "not a and b or c",
            build_context: |c| {
                c.insert("a", true);
                c.insert("b", true);
                c.insert("c", true);
            },
            // `(not a) and b or c` => `(false and true) or true` => true.
            expected: true,
        },
        Scenario {
            name: "days_less_than_or_equal_future_instant_is_false",
            rule: r#"created_at dl 30"#,
            build_context: |c| {
                c.insert("created_at", "2999-01-01T00:00:00Z");
            },
            expected: false,
        },
    ]
}

#[test]
fn conformance_table() {
    let engine = Engine::new();
    let mut failures = Vec::new();
    for scenario in scenarios() {
        let mut ctx = Context::new();
        (scenario.build_context)(&mut ctx);
        match engine.evaluate(scenario.rule, &ctx) {
            Ok(actual) if actual == scenario.expected => {}
            Ok(actual) => failures.push(format!(
                "{}: expected {}, got {}",
                scenario.name, scenario.expected, actual
            )),
            Err(e) => failures.push(format!("{}: unexpected compile error {:?}", scenario.name, e)),
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn add_query_surfaces_compile_errors_eagerly() {
    let engine = Engine::new();
    assert!(engine.add_query("").is_err());
    assert!(engine.add_query("x eq").is_err());
    assert!(engine.add_query("(x eq 1").is_err());
    assert!(engine.add_query("x eq 1 y eq 2").is_err());
}

#[test]
fn compiled_handle_round_trips_through_evaluate_compiled() {
    let engine = Engine::new();
    let rule = engine.compile_rule("x eq 10").unwrap();
    let mut ctx = Context::new();
    ctx.insert("x", 10i64);
    assert!(engine.evaluate_compiled(&rule, &ctx));
}
