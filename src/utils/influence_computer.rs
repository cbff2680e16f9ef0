use crate::{LabelType, QBAFramework};
use std::collections::HashSet;

/// Computes the arguments that influence, directly or not, some target arguments.
///
/// An argument influences another one if there is a path of attacks and supports from the former to the latter
/// in the union of the relations of the frameworks.
/// The targets are included in the result.
pub(crate) fn influencers_of<T>(frameworks: &[&QBAFramework<T>], targets: &[&T]) -> HashSet<T>
where
    T: LabelType,
{
    let mut influencers = targets.iter().map(|t| (*t).clone()).collect::<HashSet<T>>();
    let mut to_process = influencers.iter().cloned().collect::<Vec<T>>();
    while let Some(current) = to_process.pop() {
        for framework in frameworks {
            framework
                .attack_relations()
                .agents(&current)
                .chain(framework.support_relations().agents(&current))
                .for_each(|agent| {
                    if influencers.insert(agent.clone()) {
                        to_process.push(agent.clone());
                    }
                });
        }
    }
    influencers
}
