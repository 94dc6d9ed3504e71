//! Open-state of the surrounding tree view.
//!
//! The set of expanded node keys is an explicit immutable value threaded
//! through rendering; updates are pure functions returning a new set rather
//! than mutating a shared one. The query core may supply keys to open (the
//! ancestors of every match) but never owns or persists this state.

use std::collections::BTreeSet;

use crate::context::{self, Context};

/// How a set of keys is applied to the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenerMode {
    /// Insert the keys.
    Open,
    /// Remove the keys.
    Close,
    /// Remove each key that is present, insert each that is absent.
    Toggle,
}

/// Applies `keys` to `current` under `mode`, returning the new open set.
/// `current` is never mutated.
pub fn set_open<I, S>(current: &BTreeSet<String>, keys: I, mode: OpenerMode) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut open = current.clone();
    for key in keys {
        let key = key.into();
        match mode {
            OpenerMode::Open => {
                open.insert(key);
            }
            OpenerMode::Close => {
                open.remove(&key);
            }
            OpenerMode::Toggle => {
                if !open.remove(&key) {
                    open.insert(key);
                }
            }
        }
    }
    open
}

/// Initial open set for a freshly displayed tree: every kind and tag group
/// plus the root node itself.
pub fn initial_open(context: &Context) -> BTreeSet<String> {
    let mut open = BTreeSet::new();
    context::gather_kinds_and_tags(context, &mut open);
    open.insert(context.uid.clone());
    open
}

#[test]
fn test_toggle_flips_membership() {
    let current: BTreeSet<String> = ["a".to_string(), "b".to_string()].into();
    let next = set_open(&current, ["b", "c"], OpenerMode::Toggle);
    assert!(next.contains("a"));
    assert!(!next.contains("b"));
    assert!(next.contains("c"));
    // the input set is untouched
    assert!(current.contains("b"));
}
