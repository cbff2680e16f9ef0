use super::{is_bounded_update, is_expansion};
use crate::{ExplanationKind, LabelType, QBAFramework};
use anyhow::Result;
use log::debug;
use std::collections::HashSet;

fn is_minimal_explanation_for_all<'a, T, I>(
    kind: ExplanationKind,
    explanation: &HashSet<T>,
    initial: &QBAFramework<T>,
    updates: I,
    arg1: &T,
    arg2: &T,
) -> Result<bool>
where
    T: LabelType + 'a,
    I: IntoIterator<Item = &'a QBAFramework<T>>,
{
    for (i, update) in updates.into_iter().enumerate() {
        if !initial
            .minimal_explanations(kind, update, arg1, arg2)?
            .contains(explanation)
        {
            debug!(
                "{:?} is not a minimal {} explanation for update {}",
                explanation, kind, i
            );
            return Ok(false);
        }
    }
    Ok(true)
}

/// Checks whether a set of arguments is a minimal explanation of the given kind
/// of the strength inconsistency on two arguments between the initial framework and every framework of the collection.
///
/// The initial framework is the one the minimal explanations are computed on
/// (see [`QBAFramework::minimal_explanations`]).
/// An error is returned under the same conditions as the minimal explanation search.
///
/// # Example
///
/// ```
/// # use quabaf::{ExplanationKind, QBAFramework};
/// # use quabaf::robustness::is_general_robust_explanation;
/// # use std::collections::HashSet;
/// let initial = QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap();
/// let mut update = initial.clone();
/// update.add_argument("e", 3.).unwrap();
/// update.add_attack_relation(&"e", &"c").unwrap();
/// assert!(is_general_robust_explanation(
///     ExplanationKind::CSI,
///     &HashSet::from(["e"]),
///     &initial,
///     &[update],
///     &"b",
///     &"c"
/// )
/// .unwrap());
/// ```
pub fn is_general_robust_explanation<T>(
    kind: ExplanationKind,
    explanation: &HashSet<T>,
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
) -> Result<bool>
where
    T: LabelType,
{
    is_minimal_explanation_for_all(kind, explanation, initial, collection, arg1, arg2)
}

/// Same as [`is_general_robust_explanation`], ignoring the frameworks that are not [expansions](is_expansion) of the initial one.
pub fn is_expansion_robust_explanation<T>(
    kind: ExplanationKind,
    explanation: &HashSet<T>,
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
) -> Result<bool>
where
    T: LabelType,
{
    let expansions = collection.iter().filter(|u| is_expansion(initial, *u));
    is_minimal_explanation_for_all(kind, explanation, initial, expansions, arg1, arg2)
}

/// Same as [`is_general_robust_explanation`], ignoring the frameworks that are not [bounded updates](is_bounded_update) of the initial one.
///
/// An error is also returned if a mutable argument does not belong to the initial framework.
#[allow(clippy::too_many_arguments)]
pub fn is_bounded_update_robust_explanation<T>(
    kind: ExplanationKind,
    explanation: &HashSet<T>,
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
    let mut updates = Vec::new();
    for update in collection {
        if is_bounded_update(initial, update, epsilon, mutable_args)? {
            updates.push(update);
        }
    }
    is_minimal_explanation_for_all(kind, explanation, initial, updates, arg1, arg2)
}
