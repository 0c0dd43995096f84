// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use proptest::prelude::*;
use yare::parameterized;

fn hook(command: &str) -> HookDescriptor {
    HookDescriptor::new(command)
}

fn commands(hooks: &[&HookDescriptor]) -> Vec<String> {
    hooks.iter().map(|h| h.command.clone()).collect()
}

fn sample_registry() -> HookRegistry {
    HookRegistry::new()
        .with_rule(
            HookEvent::PostToolUse,
            MatcherRule::new(
                "Write|Edit|MultiEdit",
                vec![hook("fmt.sh"), hook("types.sh").with_asyncable(true)],
            )
            .unwrap(),
        )
        .with_rule(
            HookEvent::PostToolUse,
            MatcherRule::new("Read", vec![hook("knowledge.sh")]).unwrap(),
        )
        .with_rule(
            HookEvent::PostToolUse,
            MatcherRule::new("Edit|Read", vec![hook("rules.sh")]).unwrap(),
        )
        .with_rule(
            HookEvent::Stop,
            MatcherRule::any(vec![hook("todos.sh").with_asyncable(true)]),
        )
}

#[parameterized(
    exact_first = { "Write|Edit|MultiEdit", "Write", true },
    exact_last = { "Write|Edit|MultiEdit", "MultiEdit", true },
    substring_rejected = { "Write|Edit|MultiEdit", "Edi", false },
    superstring_rejected = { "Write|Edit|MultiEdit", "Editor", false },
    prefix_alternative_rejected = { "Write|Edit|MultiEdit", "MultiEditX", false },
    case_sensitive = { "Read", "read", false },
    single = { "Task", "Task", true },
)]
fn matcher_whole_string(pattern: &str, discriminator: &str, expected: bool) {
    let matcher = Matcher::new(pattern).unwrap();
    assert_eq!(matcher.is_match(discriminator), expected);
}

#[test]
fn test_matcher_rejects_invalid_pattern() {
    assert!(Matcher::new("Write|(").is_err());
}

#[test]
fn test_rule_without_matcher_matches_everything() {
    let rule = MatcherRule::any(vec![hook("a")]);
    assert!(rule.matches(Some("Write")));
    assert!(rule.matches(None));
    assert_eq!(rule.pattern(), None);
}

#[test]
fn test_empty_pattern_matches_everything() {
    let rule = MatcherRule::new("", vec![hook("a")]).unwrap();
    assert!(rule.matches(Some("Anything")));
}

#[test]
fn test_rule_with_matcher_needs_discriminator() {
    let rule = MatcherRule::new("Write", vec![hook("a")]).unwrap();
    assert!(!rule.matches(None));
    assert_eq!(rule.pattern(), Some("Write"));
}

#[test]
fn test_route_concatenates_in_registry_order() {
    let registry = sample_registry();

    let routed = registry.route(HookEvent::PostToolUse, Some("Edit"));
    assert_eq!(commands(&routed), vec!["fmt.sh", "types.sh", "rules.sh"]);

    let routed = registry.route(HookEvent::PostToolUse, Some("Read"));
    assert_eq!(commands(&routed), vec!["knowledge.sh", "rules.sh"]);
}

#[test]
fn test_route_no_match_is_empty() {
    let registry = sample_registry();
    assert!(registry.route(HookEvent::PostToolUse, Some("Grep")).is_empty());
    assert!(registry.route(HookEvent::PostToolUse, None).is_empty());
}

#[test]
fn test_route_stop_ignores_discriminator() {
    let registry = sample_registry();
    let routed = registry.route(HookEvent::Stop, None);
    assert_eq!(commands(&routed), vec!["todos.sh"]);
}

#[test]
fn test_route_is_idempotent() {
    let registry = sample_registry();
    let first = registry.route(HookEvent::PostToolUse, Some("Edit"));
    let second = registry.route(HookEvent::PostToolUse, Some("Edit"));
    assert_eq!(first, second);
}

#[test]
fn test_hook_counts() {
    let registry = sample_registry();
    assert_eq!(registry.hook_count(HookEvent::PostToolUse), 4);
    assert_eq!(registry.hook_count(HookEvent::Stop), 1);
    assert_eq!(HookRegistry::new().hook_count(HookEvent::Stop), 0);
}

#[test]
fn test_runnable_hooks_excludes_self_and_empty() {
    let hooks = [
        hook("uv run lint.py"),
        hook("/usr/local/bin/hookrelay post-tool-use --tool Write"),
        hook("   "),
        hook("hookrelay stop"),
    ];

    let runnable = runnable_hooks(HookEvent::PostToolUse, hooks.iter());
    assert_eq!(commands(&runnable), vec!["uv run lint.py", "hookrelay stop"]);

    let runnable = runnable_hooks(HookEvent::Stop, hooks.iter());
    assert_eq!(
        commands(&runnable),
        vec![
            "uv run lint.py",
            "/usr/local/bin/hookrelay post-tool-use --tool Write"
        ]
    );
}

#[test]
fn test_runnable_hooks_is_idempotent() {
    let hooks = [hook("a.sh"), hook("hookrelay post-tool-use"), hook("b.sh")];

    let once = runnable_hooks(HookEvent::PostToolUse, hooks.iter());
    let twice = runnable_hooks(HookEvent::PostToolUse, once.iter().copied());
    assert_eq!(once, twice);
}

proptest! {
    #[test]
    fn route_equals_union_of_matching_rules(
        rule_tools in proptest::collection::vec(
            proptest::collection::vec("[A-C][a-c]{0,2}", 1..4),
            0..6,
        ),
        discriminator in "[A-C][a-c]{0,2}",
    ) {
        let mut registry = HookRegistry::new();
        let mut expected = Vec::new();

        for (i, tools) in rule_tools.iter().enumerate() {
            let pattern = tools.join("|");
            let hooks = vec![hook(&format!("rule{}-a", i)), hook(&format!("rule{}-b", i))];
            if tools.iter().any(|t| t == &discriminator) {
                expected.extend(hooks.iter().map(|h| h.command.clone()));
            }
            registry = registry.with_rule(HookEvent::PostToolUse, MatcherRule::new(&pattern, hooks).unwrap());
        }

        let routed = registry.route(HookEvent::PostToolUse, Some(&discriminator));
        prop_assert_eq!(commands(&routed), expected);
    }
}
