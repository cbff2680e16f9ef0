use crate::contributions::{removal_contribution, Contributor};
use crate::{ExplanationKind, LabelType, QBAFramework};
use anyhow::Result;
use log::{debug, trace};
use std::collections::HashSet;

/// Sums the absolute removal contributions of the arguments in the symmetric difference of two sets to both topic arguments.
///
/// Arguments of the initial framework are measured in it; the other ones in the update.
fn influence_of_difference<T>(
    initial: &QBAFramework<T>,
    update: &QBAFramework<T>,
    set1: &HashSet<T>,
    set2: &HashSet<T>,
    arg1: &T,
    arg2: &T,
) -> Result<f64>
where
    T: LabelType,
{
    let mut influence = 0.;
    for arg in set1.symmetric_difference(set2) {
        let framework = if initial.contains_argument(arg) {
            initial
        } else {
            update
        };
        for topic in [arg1, arg2] {
            // an argument has no contribution to itself
            if topic == arg {
                continue;
            }
            influence += removal_contribution(framework, topic, &Contributor::Single(arg.clone()))?.abs();
        }
    }
    Ok(influence)
}

/// Checks whether a set of arguments is close enough to a minimal explanation for every framework of the collection.
///
/// For each update, some minimal explanation of the given kind (computed on the initial framework, as in
/// [`is_general_robust_explanation`](super::is_general_robust_explanation)) must differ from the given set
/// by arguments whose total influence is at most `epsilon`.
/// The influence of an argument is the sum of the absolute values of its [removal contributions](removal_contribution)
/// to both topic arguments, measured in the initial framework if it belongs to it, else in the update.
///
/// An error is returned under the conditions of the minimal explanation search,
/// or if the set contains an argument that belongs neither to the initial framework nor to an update.
///
/// # Example
///
/// ```
/// # use quabaf::{ExplanationKind, QBAFramework};
/// # use quabaf::robustness::is_contribution_robust_explanation;
/// # use std::collections::HashSet;
/// let initial = QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap();
/// let mut update = initial.clone();
/// update.add_argument("e", 3.).unwrap();
/// update.add_attack_relation(&"e", &"c").unwrap();
/// let collection = [update];
/// let explanation = HashSet::from(["a"]);
/// assert!(is_contribution_robust_explanation(ExplanationKind::CSI, &explanation, &initial, &collection, &"b", &"c", 7.).unwrap());
/// assert!(!is_contribution_robust_explanation(ExplanationKind::CSI, &explanation, &initial, &collection, &"b", &"c", 6.5).unwrap());
/// ```
pub fn is_contribution_robust_explanation<T>(
    kind: ExplanationKind,
    explanation: &HashSet<T>,
    initial: &QBAFramework<T>,
    collection: &[QBAFramework<T>],
    arg1: &T,
    arg2: &T,
    epsilon: f64,
) -> Result<bool>
where
    T: LabelType,
{
    for (i, update) in collection.iter().enumerate() {
        let mut close_enough = false;
        for minimal in initial.minimal_explanations(kind, update, arg1, arg2)? {
            let influence = influence_of_difference(initial, update, &minimal, explanation, arg1, arg2)?;
            trace!("influence of the difference between {:?} and {:?}: {}", minimal, explanation, influence);
            if influence <= epsilon {
                close_enough = true;
                break;
            }
        }
        if !close_enough {
            debug!(
                "{:?} is too far from the minimal {} explanations for update {}",
                explanation, kind, i
            );
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QbafError;

    fn initial() -> QBAFramework<&'static str> {
        QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap()
    }

    fn with_attacker_of_c() -> QBAFramework<&'static str> {
        let mut f = initial();
        f.add_argument("e", 3.).unwrap();
        f.add_attack_relation(&"e", &"c").unwrap();
        f
    }

    #[test]
    fn test_influence_of_difference() {
        let (f, u) = (initial(), with_attacker_of_c());
        let e = HashSet::from(["e"]);
        assert_eq!(0., influence_of_difference(&f, &u, &e, &e, &"b", &"c").unwrap());
        assert_eq!(3., influence_of_difference(&f, &u, &e, &HashSet::new(), &"b", &"c").unwrap());
        assert_eq!(7., influence_of_difference(&f, &u, &e, &HashSet::from(["a"]), &"b", &"c").unwrap());
        assert_eq!(4., influence_of_difference(&f, &u, &HashSet::from(["a", "c"]), &HashSet::new(), &"b", &"c").unwrap());
    }

    #[test]
    fn test_minimal_explanation_is_robust() {
        let f = initial();
        let collection = vec![with_attacker_of_c()];
        for kind in [ExplanationKind::SSI, ExplanationKind::CSI, ExplanationKind::NSI] {
            assert!(is_contribution_robust_explanation(kind, &HashSet::from(["e"]), &f, &collection, &"b", &"c", 0.).unwrap());
        }
    }

    #[test]
    fn test_epsilon_bound() {
        let f = initial();
        let collection = vec![with_attacker_of_c()];
        let a = HashSet::from(["a"]);
        assert!(is_contribution_robust_explanation(ExplanationKind::NSI, &a, &f, &collection, &"b", &"c", 7.).unwrap());
        assert!(!is_contribution_robust_explanation(ExplanationKind::NSI, &a, &f, &collection, &"b", &"c", 6.9).unwrap());
        assert!(is_contribution_robust_explanation(ExplanationKind::NSI, &HashSet::new(), &f, &collection, &"b", &"c", 3.).unwrap());
        assert!(!is_contribution_robust_explanation(ExplanationKind::NSI, &HashSet::new(), &f, &collection, &"b", &"c", 2.).unwrap());
    }

    #[test]
    fn test_empty_collection() {
        let f = initial();
        assert!(is_contribution_robust_explanation(ExplanationKind::CSI, &HashSet::from(["z"]), &f, &[], &"b", &"c", 0.).unwrap());
    }

    #[test]
    fn test_unknown_argument() {
        let f = initial();
        let err = is_contribution_robust_explanation(
            ExplanationKind::CSI,
            &HashSet::from(["z"]),
            &f,
            &[with_attacker_of_c()],
            &"b",
            &"c",
            1.,
        )
        .unwrap_err();
        assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::NotFound { .. })));
    }
}
