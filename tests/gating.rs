//! Parent-gating tests across all three drivers.

mod common;

use confgate::core::key::Key;
use confgate::drivers::ConfigDriver;
use confgate::relation::RelationMap;

fn key(raw: &str) -> Key {
    Key::parse(raw).unwrap()
}

// ============================================================================
// Visibility decisions
// ============================================================================

#[test]
fn intersecting_parent_value_reveals_key() {
    let relation = common::relation_with("enabled", &["1", "2"]);
    let (_, driver) = common::tree_driver(relation);

    driver.set(&key("10_bind_block"), "1,3").unwrap();
    driver.set(&key("10_enabled"), "yes").unwrap();

    assert_eq!(
        driver.get(&key("10_enabled"), false).unwrap().as_deref(),
        Some("yes")
    );
}

#[test]
fn disjoint_parent_value_hides_key() {
    let relation = common::relation_with("enabled", &["1", "2"]);
    let (_, driver) = common::tree_driver(relation);

    driver.set(&key("10_bind_block"), "4").unwrap();
    driver.set(&key("10_enabled"), "yes").unwrap();

    assert_eq!(driver.get(&key("10_enabled"), false).unwrap(), None);
}

#[test]
fn ignore_block_always_bypasses_gating() {
    let relation = common::relation_with("enabled", &["1", "2"]);
    let (_, driver) = common::tree_driver(relation);

    driver.set(&key("10_bind_block"), "4").unwrap();
    driver.set(&key("10_enabled"), "yes").unwrap();

    assert_eq!(
        driver.get(&key("10_enabled"), true).unwrap().as_deref(),
        Some("yes")
    );
}

#[test]
fn absent_parent_hides_key() {
    let relation = common::relation_with("enabled", &["1"]);
    let (store, driver) = common::tree_driver(relation);

    driver.set(&key("10_enabled"), "yes").unwrap();
    let before = store.len();

    assert_eq!(driver.get(&key("10_enabled"), false).unwrap(), None);
    // The gated read must not have touched the requested key.
    assert_eq!(store.len(), before);
}

#[test]
fn empty_parent_value_hides_key() {
    let relation = common::relation_with("enabled", &["1"]);
    let (_, driver) = common::tree_driver(relation);

    driver.set(&key("10_bind_block"), "").unwrap();
    driver.set(&key("10_enabled"), "yes").unwrap();

    assert_eq!(driver.get(&key("10_enabled"), false).unwrap(), None);
}

#[test]
fn unrelated_suffix_passes_trivially() {
    let relation = common::relation_with("enabled", &["1"]);
    let (_, driver) = common::tree_driver(relation);

    driver.set(&key("10_other"), "v").unwrap();
    assert_eq!(
        driver.get(&key("10_other"), false).unwrap().as_deref(),
        Some("v")
    );
}

#[test]
fn non_numeric_lead_passes_trivially() {
    let relation = common::relation_with("enabled", &["1"]);
    let (_, driver) = common::tree_driver(relation);

    driver.set(&key("app_enabled"), "v").unwrap();
    assert_eq!(
        driver.get(&key("app_enabled"), false).unwrap().as_deref(),
        Some("v")
    );
}

#[test]
fn empty_relation_disables_gating() {
    let (_, driver) = common::tree_driver(RelationMap::empty());

    driver.set(&key("10_enabled"), "v").unwrap();
    assert_eq!(
        driver.get(&key("10_enabled"), false).unwrap().as_deref(),
        Some("v")
    );
}

#[test]
fn membership_is_exact_string_comparison() {
    // "01" and "1" are different members even though numerically equal.
    let relation = common::relation_with("enabled", &["01"]);
    let (_, driver) = common::tree_driver(relation);

    driver.set(&key("10_bind_block"), "1").unwrap();
    driver.set(&key("10_enabled"), "yes").unwrap();
    assert_eq!(driver.get(&key("10_enabled"), false).unwrap(), None);
}

// ============================================================================
// Mutations are never gated
// ============================================================================

#[test]
fn set_delete_children_ignore_gating() {
    let relation = common::relation_with("feature_x", &["on"]);
    let (_, driver) = common::tree_driver(relation);

    // Module 7 is disabled: no bind_block at all.
    assert!(driver.set(&key("7_feature_x"), "v1").unwrap());
    assert_eq!(driver.get(&key("7_feature_x"), false).unwrap(), None);

    let children = driver.children(&key("7_feature")).unwrap();
    assert_eq!(children, vec!["7_feature_x"]);

    assert!(driver.delete(&key("7_feature_x")).unwrap());
}

// ============================================================================
// Memoized parent value
// ============================================================================

#[test]
fn parent_value_is_memoized_per_driver_instance() {
    let relation = common::relation_with("enabled", &["on"]);
    let (store, driver) = common::tree_driver(relation);

    driver.set(&key("10_bind_block"), "on").unwrap();
    driver.set(&key("10_enabled"), "v").unwrap();
    assert_eq!(
        driver.get(&key("10_enabled"), false).unwrap().as_deref(),
        Some("v")
    );

    // The parent flips to a disabling value, but this driver instance
    // already memoized it; only a new instance observes the change.
    driver.set(&key("10_bind_block"), "off").unwrap();
    assert_eq!(
        driver.get(&key("10_enabled"), false).unwrap().as_deref(),
        Some("v")
    );

    let fresh = common::tree_driver_over(store, common::relation_with("enabled", &["on"]));
    assert_eq!(fresh.get(&key("10_enabled"), false).unwrap(), None);
}

// ============================================================================
// Gating on the flat and hybrid drivers
// ============================================================================

#[test]
fn flat_driver_gates_reads() {
    let relation = common::relation_with("enabled", &["1", "2"]);
    let (_, driver) = common::flat_driver(relation);

    driver.set(&key("10_bind_block"), "1,3").unwrap();
    driver.set(&key("10_enabled"), "yes").unwrap();
    assert_eq!(
        driver.get(&key("10_enabled"), false).unwrap().as_deref(),
        Some("yes")
    );

    let relation = common::relation_with("enabled", &["1", "2"]);
    let (_, driver) = common::flat_driver(relation);
    driver.set(&key("10_bind_block"), "4").unwrap();
    driver.set(&key("10_enabled"), "yes").unwrap();
    assert_eq!(driver.get(&key("10_enabled"), false).unwrap(), None);
    assert_eq!(
        driver.get(&key("10_enabled"), true).unwrap().as_deref(),
        Some("yes")
    );
}

#[test]
fn hybrid_driver_resolves_parent_through_agent_first() {
    let relation = common::relation_with("enabled", &["on"]);
    let (agent, _, driver) = common::hybrid_driver(relation);

    // Parent exists only in the agent snapshot; value comes from there too.
    agent.publish("/config/10/bind/block", "on");
    agent.publish("/config/10/enabled", "v");

    assert_eq!(
        driver.get(&key("10_enabled"), false).unwrap().as_deref(),
        Some("v")
    );
}

#[test]
fn hybrid_driver_falls_back_to_tree_for_parent() {
    let relation = common::relation_with("enabled", &["on"]);
    let (agent, _, driver) = common::hybrid_driver(relation);

    driver.set(&key("10_bind_block"), "off").unwrap();
    agent.publish("/config/10/enabled", "v");

    assert_eq!(driver.get(&key("10_enabled"), false).unwrap(), None);
    assert_eq!(
        driver.get(&key("10_enabled"), true).unwrap().as_deref(),
        Some("v")
    );
}
