use super::{is_bounded_update, is_expansion};
use crate::{LabelType, QBAFramework};
use anyhow::Result;
use log::debug;
use std::collections::HashSet;

fn all_with_consistency<'a, T, I>(
    initial: &QBAFramework<T>,
    updates: I,
    arg1: &T,
    arg2: &T,
    expected: bool,
) -> Result<bool>
where
    T: LabelType + 'a,
    I: IntoIterator<Item = &'a QBAFramework<T>>,
{
    for (i, update) in updates.into_iter().enumerate() {
        if update.are_strength_consistent(initial, arg1, arg2)? != expected {
            debug!(
                "update {} is {} with the initial framework on ({}, {})",
                i,
                if expected { "not consistent" } else { "consistent" },
                arg1,
                arg2
            );
            return Ok(false);
        }
    }
    Ok(true)
}

fn bounded_updates<'a, T>(
    initial: &QBAFramework<T>,
    collection: &'a [QBAFramework<T>],
    epsilon: f64,
    mutable_args: &HashSet<T>,
) -> Result<Vec<&'a QBAFramework<T>>>
where
    T: LabelType,
{
    let mut updates = Vec::new();
    for update in collection {
        if is_bounded_update(initial, update, epsilon, mutable_args)? {
            updates.push(update);
        }
    }
    Ok(updates)
}

/// Checks whether every framework of the collection is strength consistent with the initial one on two arguments.
///
/// An error is returned if a topic argument is missing from a framework or if a framework is cyclic.
pub fn is_general_robust_consistent<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
) -> Result<bool>
where
    T: LabelType,
{
    all_with_consistency(initial, collection, arg1, arg2, true)
}

/// Checks whether every framework of the collection is strength inconsistent with the initial one on two arguments.
pub fn is_general_robust_inconsistent<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
) -> Result<bool>
where
    T: LabelType,
{
    all_with_consistency(initial, collection, arg1, arg2, false)
}

/// Same as [`is_general_robust_consistent`], ignoring the frameworks that are not [expansions](is_expansion) of the initial one.
pub fn is_expansion_robust_consistent<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
) -> Result<bool>
where
    T: LabelType,
{
    let expansions = collection.iter().filter(|u| is_expansion(initial, *u));
    all_with_consistency(initial, expansions, arg1, arg2, true)
}

/// Same as [`is_general_robust_inconsistent`], ignoring the frameworks that are not [expansions](is_expansion) of the initial one.
pub fn is_expansion_robust_inconsistent<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
) -> Result<bool>
where
    T: LabelType,
{
    let expansions = collection.iter().filter(|u| is_expansion(initial, *u));
    all_with_consistency(initial, expansions, arg1, arg2, false)
}

/// Same as [`is_general_robust_consistent`], ignoring the frameworks that are not [bounded updates](is_bounded_update) of the initial one.
///
/// An error is also returned if a mutable argument does not belong to the initial framework.
pub fn is_bounded_update_robust_consistent<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
    epsilon: f64,
    mutable_args: &HashSet<T>,
) -> Result<bool>
where
    T: LabelType,
{
    let updates = bounded_updates(initial, collection, epsilon, mutable_args)?;
    all_with_consistency(initial, updates, arg1, arg2, true)
}

/// Same as [`is_general_robust_inconsistent`], ignoring the frameworks that are not [bounded updates](is_bounded_update) of the initial one.
pub fn is_bounded_update_robust_inconsistent<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
    epsilon: f64,
    mutable_args: &HashSet<T>,
) -> Result<bool>
where
    T: LabelType,
{
    let updates = bounded_updates(initial, collection, epsilon, mutable_args)?;
    all_with_consistency(initial, updates, arg1, arg2, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QbafError;

    fn initial() -> QBAFramework<&'static str> {
        QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap()
    }

    fn with_isolated_argument() -> QBAFramework<&'static str> {
        let mut f = initial();
        f.add_argument("d", 1.).unwrap();
        f
    }

    fn with_attacker_of_c() -> QBAFramework<&'static str> {
        let mut f = initial();
        f.add_argument("e", 3.).unwrap();
        f.add_attack_relation(&"e", &"c").unwrap();
        f
    }

    fn with_weaker_a_and_attacker_of_c() -> QBAFramework<&'static str> {
        let mut f = with_attacker_of_c();
        f.modify_initial_strength(&"a", 1.).unwrap();
        f
    }

    fn with_stronger_b() -> QBAFramework<&'static str> {
        let mut f = initial();
        f.modify_initial_strength(&"b", 1.2).unwrap();
        f
    }

    #[test]
    fn test_empty_collection() {
        let f = initial();
        assert!(is_general_robust_consistent(&f, &[], &"b", &"c").unwrap());
        assert!(is_general_robust_inconsistent(&f, &[], &"b", &"c").unwrap());
        assert!(is_expansion_robust_consistent(&f, &[], &"b", &"c").unwrap());
        assert!(is_bounded_update_robust_inconsistent(&f, &[], &"b", &"c", 0.5, &HashSet::new()).unwrap());
    }

    #[test]
    fn test_general_robust_consistency() {
        let f = initial();
        let collection = vec![f.clone(), with_isolated_argument()];
        assert!(is_general_robust_consistent(&f, &collection, &"b", &"c").unwrap());
        assert!(!is_general_robust_inconsistent(&f, &collection, &"b", &"c").unwrap());
        let collection = vec![f.clone(), with_isolated_argument(), with_attacker_of_c()];
        assert!(!is_general_robust_consistent(&f, &collection, &"b", &"c").unwrap());
        assert!(!is_general_robust_inconsistent(&f, &collection, &"b", &"c").unwrap());
    }

    #[test]
    fn test_general_robust_inconsistency() {
        let f = initial();
        let collection = vec![with_attacker_of_c(), with_weaker_a_and_attacker_of_c()];
        assert!(is_general_robust_inconsistent(&f, &collection, &"b", &"c").unwrap());
        assert!(!is_general_robust_consistent(&f, &collection, &"b", &"c").unwrap());
    }

    #[test]
    fn test_expansion_robustness() {
        let f = initial();
        let collection = vec![with_isolated_argument(), with_weaker_a_and_attacker_of_c()];
        assert!(!is_general_robust_consistent(&f, &collection, &"b", &"c").unwrap());
        assert!(is_expansion_robust_consistent(&f, &collection, &"b", &"c").unwrap());
        let collection = vec![with_attacker_of_c(), with_weaker_a_and_attacker_of_c(), with_stronger_b()];
        assert!(is_expansion_robust_inconsistent(&f, &collection, &"b", &"c").unwrap());
        assert!(!is_expansion_robust_consistent(&f, &collection, &"b", &"c").unwrap());
    }

    #[test]
    fn test_initial_framework_is_not_an_inconsistent_expansion() {
        let f = initial();
        assert!(!is_expansion_robust_inconsistent(&f, &[f.clone()], &"b", &"c").unwrap());
        assert!(!is_expansion_robust_inconsistent(&f, &[with_attacker_of_c(), f.clone()], &"b", &"c").unwrap());
    }

    #[test]
    fn test_bounded_update_robustness() {
        let f = initial();
        let mutable = HashSet::from(["b"]);
        let collection = vec![with_isolated_argument(), with_stronger_b()];
        assert!(!is_general_robust_inconsistent(&f, &collection, &"b", &"c").unwrap());
        assert!(is_bounded_update_robust_inconsistent(&f, &collection, &"b", &"c", 0.5, &mutable).unwrap());
        assert!(!is_bounded_update_robust_consistent(&f, &collection, &"b", &"c", 0.5, &mutable).unwrap());
        assert!(is_bounded_update_robust_consistent(&f, &collection, &"b", &"c", 0.1, &mutable).unwrap());
    }

    #[test]
    fn test_missing_topic() {
        let f = initial();
        let collection = vec![with_attacker_of_c()];
        let err = is_general_robust_consistent(&f, &collection, &"b", &"e").unwrap_err();
        assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::NotFound { .. })));
        let err = is_bounded_update_robust_consistent(&f, &collection, &"b", &"c", 0.5, &HashSet::from(["z"]))
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::NotFound { .. })));
    }
}
