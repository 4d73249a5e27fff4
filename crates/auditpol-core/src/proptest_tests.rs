//! Property-based tests for auditpol-core types.
//!
//! These tests use proptest to verify codec invariants across many randomly
//! generated rules and documents.

use proptest::prelude::*;

use crate::codec::{decode_policy, decode_rules, encode_policy, encode_rules};
use crate::{GroupResources, Level, PolicyDocument, PolicyRule, Stage};

/// Strategy for generating identifiers such as users, verbs and paths.
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9:./-]{0,16}"
}

fn level_strategy() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::None),
        Just(Level::Metadata),
        Just(Level::Request),
        Just(Level::RequestResponse),
    ]
}

fn stage_strategy() -> impl Strategy<Value = Stage> {
    prop_oneof![
        Just(Stage::RequestReceived),
        Just(Stage::ResponseStarted),
        Just(Stage::ResponseComplete),
        Just(Stage::Panic),
    ]
}

fn group_resources_strategy() -> impl Strategy<Value = GroupResources> {
    (
        prop::option::of(word_strategy()),
        prop::collection::vec(word_strategy(), 0..3),
    )
        .prop_map(|(group, resources)| GroupResources {
            group: group.unwrap_or_default(),
            resources,
            resource_names: Vec::new(),
        })
}

/// Strategy for generating PolicyRule.
fn rule_strategy() -> impl Strategy<Value = PolicyRule> {
    (
        level_strategy(),
        prop::collection::vec(word_strategy(), 0..3),
        prop::collection::vec(word_strategy(), 0..3),
        prop::collection::vec(group_resources_strategy(), 0..2),
        prop::collection::vec(stage_strategy(), 0..2),
    )
        .prop_map(|(level, users, verbs, resources, stages)| {
            let mut rule = PolicyRule::new(level).with_users(users).with_verbs(verbs);
            rule.resources = resources;
            rule.omit_stages = stages;
            rule
        })
}

proptest! {
    /// Rule lists survive encoding with order intact.
    #[test]
    fn rules_roundtrip_in_order(rules in prop::collection::vec(rule_strategy(), 0..8)) {
        let bytes = encode_rules(&rules).unwrap();
        let decoded = decode_rules(&bytes).unwrap();
        prop_assert_eq!(decoded, rules);
    }

    /// Documents survive encoding, type metadata included.
    #[test]
    fn policy_roundtrip_keeps_type_meta(
        name in word_strategy(),
        rules in prop::collection::vec(rule_strategy(), 0..8),
    ) {
        let mut policy = PolicyDocument::new().with_rules(rules);
        policy.set_name(name);
        let stamped = policy.clone().with_type_meta();

        let decoded = decode_policy(&encode_policy(&stamped).unwrap()).unwrap();
        prop_assert_eq!(&decoded, &stamped);

        let unstamped = decode_policy(&encode_policy(&policy).unwrap()).unwrap();
        prop_assert_eq!(unstamped, policy);
    }
}
