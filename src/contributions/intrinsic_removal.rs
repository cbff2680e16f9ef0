use super::{check_contribution_arguments, removal_contribution, Contributor};
use crate::{LabelType, QBAFramework};
use anyhow::Result;

/// Computes the intrinsic removal-based contribution of some arguments to the final strength of a topic argument.
///
/// The attacks and supports toward the contributors are first removed from the framework,
/// so that only their initial strengths and outgoing relations matter;
/// the result is then the removal-based contribution computed on this modified framework.
///
/// Errors are the same as for [`removal_contribution`](super::removal_contribution).
pub fn intrinsic_removal_contribution<T>(
    framework: &QBAFramework<T>,
    topic: &T,
    contributor: &Contributor<T>,
) -> Result<f64>
where
    T: LabelType,
{
    let contributors = contributor.to_set();
    check_contribution_arguments(framework, topic, &contributors)?;
    let mut stripped = framework.clone();
    for c in contributors.iter() {
        for attacker in framework.attackers_of(c)? {
            stripped.remove_attack_relation(&attacker, c);
        }
        for supporter in framework.supporters_of(c)? {
            stripped.remove_support_relation(&supporter, c);
        }
    }
    removal_contribution(&stripped, topic, contributor)
}
