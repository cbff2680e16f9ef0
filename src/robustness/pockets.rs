use crate::explanations::check_contains_all;
use crate::utils::MAX_COMBINATION_ARGUMENTS;
use crate::{LabelType, QBAFramework, QbafError};
use anyhow::{Context, Result};
use log::{debug, info};
use permutator::Combination;
use std::collections::HashSet;

/// Returns the arguments that the frameworks of the collection add to the initial one.
///
/// Arguments are listed in the order they are first met in the collection.
pub fn new_arguments<T>(initial: &QBAFramework<T>, collection: &[QBAFramework<T>]) -> Vec<T>
where
    T: LabelType,
{
    let mut seen = HashSet::new();
    collection
        .iter()
        .flat_map(|u| u.argument_set().iter_labels())
        .filter(|a| !initial.contains_argument(a) && seen.insert(*a))
        .cloned()
        .collect()
}

fn check_topics<T>(initial: &QBAFramework<T>, arg1: &T, arg2: &T) -> Result<()>
where
    T: LabelType,
{
    check_contains_all(initial, &[arg1, arg2], "the initial framework")
        .context("invalid topic arguments")
}

/// Checks whether a set of new arguments is a pocket of consistency on two arguments.
///
/// The set is a pocket if every framework of the collection made of the initial arguments
/// plus a subset of the pocket is strength consistent with the initial framework.
/// Frameworks that miss an initial argument, or add an argument outside the pocket, are ignored.
///
/// An error is returned if a topic argument does not belong to the initial framework, or if a framework is cyclic.
///
/// # Example
///
/// ```
/// # use quabaf::QBAFramework;
/// # use quabaf::robustness::is_pocket;
/// # use std::collections::HashSet;
/// let initial = QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap();
/// let mut update = initial.clone();
/// update.add_argument("e", 3.).unwrap();
/// update.add_attack_relation(&"e", &"c").unwrap();
/// assert!(is_pocket(&initial, &[update.clone()], &HashSet::new(), &"b", &"c").unwrap());
/// assert!(!is_pocket(&initial, &[update], &HashSet::from(["e"]), &"b", &"c").unwrap());
/// ```
pub fn is_pocket<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    pocket: &HashSet<T>,
    arg1: &T,
    arg2: &T,
) -> Result<bool>
where
    T: LabelType,
{
    check_topics(initial, arg1, arg2)?;
    for (i, update) in collection.iter().enumerate() {
        let covered = initial
            .argument_set()
            .iter_labels()
            .all(|a| update.contains_argument(a));
        let within_pocket = update
            .argument_set()
            .iter_labels()
            .all(|a| initial.contains_argument(a) || pocket.contains(a));
        if covered && within_pocket && !initial.are_strength_consistent(update, arg1, arg2)? {
            debug!("update {} breaks the pocket {:?}", i, pocket);
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns the pockets of consistency on two arguments, among the subsets of the [new arguments](new_arguments).
///
/// Pockets are listed by increasing size.
/// In addition to the errors of [`is_pocket`], an error is returned if there are too many new arguments.
pub fn pockets_of_consistency<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
) -> Result<Vec<HashSet<T>>>
where
    T: LabelType,
{
    check_topics(initial, arg1, arg2)?;
    let new_args = new_arguments(initial, collection);
    if new_args.len() > MAX_COMBINATION_ARGUMENTS {
        return Err(QbafError::InvalidValue(format!(
            "too many new arguments to search for pockets ({} > {})",
            new_args.len(),
            MAX_COMBINATION_ARGUMENTS
        ))
        .into());
    }
    info!(
        "searching pockets of consistency for ({}, {}) among {} new arguments",
        arg1,
        arg2,
        new_args.len()
    );
    let mut pockets = Vec::new();
    let empty = HashSet::new();
    if is_pocket(initial, collection, &empty, arg1, arg2)? {
        pockets.push(empty);
    }
    for size in 1..=new_args.len() {
        for subset in new_args.combination(size) {
            let subset = subset.into_iter().cloned().collect::<HashSet<T>>();
            if is_pocket(initial, collection, &subset, arg1, arg2)? {
                pockets.push(subset);
            }
        }
    }
    info!("found {} pockets", pockets.len());
    Ok(pockets)
}

/// Pairs each pocket of consistency with each new argument outside of it.
///
/// The new argument of a pair is a candidate explanation of the updates leaving the pocket.
/// Errors are the ones of [`pockets_of_consistency`].
pub fn explanations_of_updates<T>(
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
) -> Result<Vec<(HashSet<T>, T)>>
where
    T: LabelType,
{
    let new_args = new_arguments(initial, collection);
    let pockets = pockets_of_consistency(initial, collection, arg1, arg2)?;
    Ok(pockets
        .into_iter()
        .flat_map(|p| {
            new_args
                .iter()
                .filter(|a| !p.contains(*a))
                .map(|a| (p.clone(), a.clone()))
                .collect::<Vec<_>>()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_new_arguments() {
        let f = initial();
        let collection = vec![with_attacker_of_c(), f.clone(), with_isolated_argument(), with_attacker_of_c()];
        assert_eq!(vec!["e", "d"], new_arguments(&f, &collection));
        assert!(new_arguments(&f, &[f.clone()]).is_empty());
    }

    #[test]
    fn test_is_pocket() {
        let f = initial();
        let collection = vec![with_isolated_argument(), with_attacker_of_c()];
        assert!(is_pocket(&f, &collection, &HashSet::new(), &"b", &"c").unwrap());
        assert!(is_pocket(&f, &collection, &HashSet::from(["d"]), &"b", &"c").unwrap());
        assert!(!is_pocket(&f, &collection, &HashSet::from(["e"]), &"b", &"c").unwrap());
        assert!(!is_pocket(&f, &collection, &HashSet::from(["d", "e"]), &"b", &"c").unwrap());
    }

    #[test]
    fn test_pockets_of_consistency() {
        let f = initial();
        let collection = vec![with_isolated_argument(), with_attacker_of_c()];
        let expected: Vec<HashSet<&str>> = vec![HashSet::new(), HashSet::from(["d"])];
        assert_eq!(expected, pockets_of_consistency(&f, &collection, &"b", &"c").unwrap());
    }

    #[test]
    fn test_explanations_of_updates() {
        let f = initial();
        let collection = vec![with_isolated_argument(), with_attacker_of_c()];
        let expected = vec![
            (HashSet::new(), "d"),
            (HashSet::new(), "e"),
            (HashSet::from(["d"]), "e"),
        ];
        assert_eq!(expected, explanations_of_updates(&f, &collection, &"b", &"c").unwrap());
        assert!(explanations_of_updates(&f, &[f.clone()], &"b", &"c").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_topic() {
        let f = initial();
        let err = pockets_of_consistency(&f, &[with_attacker_of_c()], &"b", &"e").unwrap_err();
        assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::NotFound { .. })));
    }
}
