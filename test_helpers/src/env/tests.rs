//! Unit tests for environment guards.

use super::{clear_prefix, lock, remove_var, set_var, set_vars};
use std::env;

fn current(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[test]
fn set_var_restores_absent_key() {
    let key = "CASCADE_HELPERS_ABSENT";
    let _held = lock();
    let guard = set_var(key, "temporary");
    assert_eq!(current(key).as_deref(), Some("temporary"));
    drop(guard);
    assert_eq!(current(key), None);
}

#[test]
fn remove_var_restores_original() {
    let key = "CASCADE_HELPERS_ORIGINAL";
    let _held = lock();
    let outer = set_var(key, "original");
    let inner = remove_var(key);
    assert_eq!(current(key), None);
    drop(inner);
    assert_eq!(current(key).as_deref(), Some("original"));
    drop(outer);
    assert_eq!(current(key), None);
}

#[test]
fn scopes_unwind_repeated_keys() {
    let key = "CASCADE_HELPERS_REPEAT";
    let scope = set_vars([(key, "first"), (key, "second")]);
    assert_eq!(scope.len(), 2);
    assert_eq!(current(key).as_deref(), Some("second"));
    drop(scope);
    assert_eq!(current(key), None);
}

#[test]
fn clear_prefix_hides_matching_keys() {
    let _held = lock();
    let _a = set_var("CASCADE_HELPERS_CLEAR_A", "a");
    let _b = set_var("CASCADE_HELPERS_CLEAR_B", "b");
    let scope = clear_prefix("CASCADE_HELPERS_CLEAR_");
    assert_eq!(scope.len(), 2);
    assert_eq!(current("CASCADE_HELPERS_CLEAR_A"), None);
    drop(scope);
    assert_eq!(current("CASCADE_HELPERS_CLEAR_B").as_deref(), Some("b"));
}
