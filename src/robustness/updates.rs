use crate::{LabelType, QBAFramework, QbafError};
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Checks whether a framework is an expansion of an initial one.
///
/// The update must contain all the arguments, attacks and supports of the initial framework,
/// and the arguments of the initial framework must keep their initial strengths.
pub fn is_expansion<T>(initial: &QBAFramework<T>, update: &QBAFramework<T>) -> bool
where
    T: LabelType,
{
    initial.argument_set().iter_labels().all(|a| {
        update.contains_argument(a)
            && matches!(
                (initial.initial_strength(a), update.initial_strength(a)),
                (Ok(s0), Ok(s1)) if s0 == s1
            )
    }) && initial
        .attack_relations()
        .is_subset(update.attack_relations())
        && initial
            .support_relations()
            .is_subset(update.support_relations())
}

/// Checks whether a framework is a bounded update of an initial one.
///
/// The update must have the same arguments, attacks and supports as the initial framework.
/// The initial strengths of the mutable arguments may change by strictly less than `epsilon`;
/// the ones of the other arguments must not change.
///
/// An error is returned if a mutable argument does not belong to the initial framework.
///
/// # Example
///
/// ```
/// # use quabaf::QBAFramework;
/// # use quabaf::robustness::is_bounded_update;
/// # use std::collections::HashSet;
/// let initial = QBAFramework::new(&["a", "b"], &[1., 1.], &[("a", "b")], &[]).unwrap();
/// let mut update = initial.clone();
/// update.modify_initial_strength(&"a", 1.25).unwrap();
/// assert!(is_bounded_update(&initial, &update, 0.5, &HashSet::from(["a"])).unwrap());
/// assert!(!is_bounded_update(&initial, &update, 0.5, &HashSet::from(["b"])).unwrap());
/// ```
pub fn is_bounded_update<T>(
    initial: &QBAFramework<T>,
    update: &QBAFramework<T>,
    epsilon: f64,
    mutable_args: &HashSet<T>,
) -> Result<bool>
where
    T: LabelType,
{
    if let Some(a) = mutable_args.iter().find(|a| !initial.contains_argument(a)) {
        return Err(QbafError::not_found(a, "the initial framework"))
            .context("invalid mutable arguments");
    }
    if initial.arguments() != update.arguments()
        || initial.attack_relations() != update.attack_relations()
        || initial.support_relations() != update.support_relations()
    {
        return Ok(false);
    }
    for arg in initial.argument_set().iter_labels() {
        let delta = (update.initial_strength(arg)? - initial.initial_strength(arg)?).abs();
        let allowed = if mutable_args.contains(arg) {
            delta < epsilon
        } else {
            delta == 0.
        };
        if !allowed {
            return Ok(false);
        }
    }
    Ok(true)
}
