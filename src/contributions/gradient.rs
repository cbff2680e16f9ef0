use super::check_contribution_arguments;
use crate::{LabelType, QBAFramework};
use anyhow::Result;
use std::collections::HashSet;

/// The step used to approximate derivatives.
///
/// Near a bound only one-sided differences fit: the forward one is tried first since it also covers a contributor sitting at the lower bound, the backward one covers the upper bound.
pub const GRADIENT_STEP: f64 = 1.4901161193847656e-08;

/// Computes the gradient-based contribution of an argument to the final strength of a topic argument.
///
/// This is an approximation of the derivative of the final strength of the topic with respect to the initial strength of the contributor.
/// A central difference is used when both steps stay within the bounds of the semantics;
/// otherwise a forward difference is used if possible, or a backward one.
///
/// Errors are the same as for [`removal_contribution`](super::removal_contribution).
///
/// # Example
///
/// ```
/// # use quabaf::QBAFramework;
/// # use quabaf::contributions::gradient_contribution;
/// let framework = QBAFramework::new(&["a", "b", "c"], &[2., 1., 1.], &[("b", "a")], &[("c", "b")]).unwrap();
/// assert!((gradient_contribution(&framework, &"a", &"b").unwrap() + 1.).abs() < 1e-6);
/// ```
pub fn gradient_contribution<T>(framework: &QBAFramework<T>, topic: &T, contributor: &T) -> Result<f64>
where
    T: LabelType,
{
    check_contribution_arguments(framework, topic, &HashSet::from([contributor.clone()]))?;
    let initial_strength = framework.initial_strength(contributor)?;
    let topic_strength_with = |strength: f64| -> Result<f64> {
        let mut modified = framework.clone();
        modified.modify_initial_strength(contributor, strength)?;
        modified.final_strength(topic)
    };
    let within_bounds =
        |strength: f64| strength >= framework.min_strength() && strength <= framework.max_strength();
    let (lower, upper) = (
        initial_strength - GRADIENT_STEP,
        initial_strength + GRADIENT_STEP,
    );
    if within_bounds(lower) && within_bounds(upper) {
        Ok((topic_strength_with(upper)? - topic_strength_with(lower)?) / (2. * GRADIENT_STEP))
    } else if within_bounds(upper) {
        Ok((topic_strength_with(upper)? - framework.final_strength(topic)?) / GRADIENT_STEP)
    } else {
        Ok((framework.final_strength(topic)? - topic_strength_with(lower)?) / GRADIENT_STEP)
    }
}
