use crate::{Argument, LabelType, QBAFramework};
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Returns the restriction of a framework to a subset of its arguments.
///
/// The restriction keeps the arguments of the subset with their initial strengths and descriptions,
/// the attacks and supports between them, the semantics and the disjointness requirement of the framework.
///
/// An error is returned if an argument of the subset does not belong to the framework.
///
/// # Example
///
/// ```
/// # use quabaf::{restrict, QBAFramework};
/// # use std::collections::HashSet;
/// let framework = QBAFramework::new(
///     &["a", "b", "c"],
///     &[0.5, 0.1, 0.9],
///     &[("b", "a"), ("c", "b")],
///     &[("c", "a")],
/// )
/// .unwrap();
/// let restricted = restrict(&framework, &HashSet::from(["a", "c"])).unwrap();
/// assert_eq!(HashSet::from(["a", "c"]), restricted.arguments());
/// assert!(restricted.attack_relations().is_empty());
/// assert!(restricted.contains_support_relation(&"c", &"a"));
/// ```
pub fn restrict<T>(framework: &QBAFramework<T>, arguments: &HashSet<T>) -> Result<QBAFramework<T>>
where
    T: LabelType,
{
    for arg in arguments {
        framework
            .argument_id(arg)
            .context("cannot restrict a framework to arguments it does not contain")?;
    }
    let kept = framework
        .argument_set()
        .iter()
        .filter(|a| arguments.contains(a.label()))
        .collect::<Vec<&Argument<T>>>();
    let labels = kept.iter().map(|a| a.label().clone()).collect::<Vec<T>>();
    let strengths = kept
        .iter()
        .map(|a| framework.initial_strength_by_id(a.id()))
        .collect::<Vec<f64>>();
    let kept_relations = |relations: &crate::RelationIndex<T>| {
        relations
            .iter()
            .filter(|(agent, patient)| arguments.contains(*agent) && arguments.contains(*patient))
            .map(|(agent, patient)| (agent.clone(), patient.clone()))
            .collect::<Vec<(T, T)>>()
    };
    let mut restricted = QBAFramework::new_with_semantics(
        &labels,
        &strengths,
        &kept_relations(framework.attack_relations()),
        &kept_relations(framework.support_relations()),
        framework.disjoint_relations(),
        framework.semantics().clone(),
    )?;
    for arg in kept.iter().filter(|a| !a.description().is_empty()) {
        restricted.set_argument_description(arg.label(), arg.description())?;
    }
    Ok(restricted)
}
