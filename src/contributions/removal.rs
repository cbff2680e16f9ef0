use super::{check_contribution_arguments, Contributor};
use crate::{restrict, LabelType, QBAFramework};
use anyhow::Result;
use log::trace;
use std::collections::HashSet;

/// Computes the removal-based contribution of some arguments to the final strength of a topic argument.
///
/// This is the final strength of the topic minus its final strength once the contributors are removed from the framework.
///
/// An error is returned if the topic or a contributor does not exist,
/// if the topic is one of the contributors, or if the framework is cyclic.
pub fn removal_contribution<T>(
    framework: &QBAFramework<T>,
    topic: &T,
    contributor: &Contributor<T>,
) -> Result<f64>
where
    T: LabelType,
{
    let contributors = contributor.to_set();
    check_contribution_arguments(framework, topic, &contributors)?;
    let remaining = framework
        .argument_set()
        .iter_labels()
        .filter(|a| !contributors.contains(*a))
        .cloned()
        .collect::<HashSet<T>>();
    let with_contributors = framework.final_strength(topic)?;
    let without_contributors = restrict(framework, &remaining)?.final_strength(topic)?;
    trace!(
        "strength of {} with and without {:?}: {} and {}",
        topic,
        contributors,
        with_contributors,
        without_contributors
    );
    Ok(with_contributors - without_contributors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QbafError;

    fn framework() -> QBAFramework<&'static str> {
        QBAFramework::new(&["a", "b", "c"], &[2., 1., 1.], &[("b", "a")], &[("c", "b")]).unwrap()
    }

    #[test]
    fn test_removal() {
        let f = framework();
        assert_eq!(-2., removal_contribution(&f, &"a", &Contributor::Single("b")).unwrap());
        assert_eq!(-1., removal_contribution(&f, &"a", &Contributor::Single("c")).unwrap());
        assert_eq!(0., removal_contribution(&f, &"b", &Contributor::Single("a")).unwrap());
    }

    #[test]
    fn test_removal_of_a_set() {
        let f = framework();
        assert_eq!(
            -2.,
            removal_contribution(&f, &"a", &Contributor::Set(vec!["b", "c"])).unwrap()
        );
    }

    #[test]
    fn test_self_contribution() {
        let f = framework();
        let err = removal_contribution(&f, &"a", &Contributor::Set(vec!["a", "b"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QbafError>(),
            Some(QbafError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_cyclic_framework() {
        let mut f = framework();
        f.add_attack_relation(&"a", &"c").unwrap();
        let err = removal_contribution(&f, &"b", &Contributor::Single("a")).unwrap_err();
        assert_eq!(Some(&QbafError::Cyclic), err.downcast_ref::<QbafError>());
    }
}
