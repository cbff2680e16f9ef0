use super::{check_contribution_arguments, Contributor};
use crate::utils::MAX_COMBINATION_ARGUMENTS;
use crate::{restrict, LabelType, QBAFramework, QbafError};
use anyhow::{Context, Result};
use log::trace;
use permutator::Combination;
use std::collections::HashSet;

/// Computes the Shapley-based contribution of some arguments to the final strength of a topic argument.
///
/// The players are the arguments other than the topic and the contributors, plus the contributors taken as a single coalition.
/// The contribution is the Shapley value of this coalition, where the value of a set of players is the final strength of
/// the topic in the restriction of the framework to the topic and these players.
///
/// Errors are the same as for [`removal_contribution`](super::removal_contribution);
/// in addition, an error is returned if there are too many players.
pub fn shapley_contribution<T>(
    framework: &QBAFramework<T>,
    topic: &T,
    contributor: &Contributor<T>,
) -> Result<f64>
where
    T: LabelType,
{
    let contributors = contributor.to_set();
    check_contribution_arguments(framework, topic, &contributors)?;
    let mut players = framework
        .argument_set()
        .iter_labels()
        .filter(|a| *a != topic && !contributors.contains(*a))
        .map(|a| vec![a.clone()])
        .collect::<Vec<Vec<T>>>();
    players.push(contributors.into_iter().collect());
    let contributor_index = players.len() - 1;
    shapley_value(framework, topic, &players, contributor_index)
}

/// Computes the Shapley-based contribution of a block of a partition of the arguments to the final strength of a topic argument.
///
/// The players are the blocks of the partition, which must cover all the arguments except the topic.
/// The contributors must form one of these blocks.
///
/// In addition to the errors of [`shapley_contribution`], an error is returned if the partition is invalid
/// or if the contributors do not form a block.
///
/// # Example
///
/// ```
/// # use quabaf::QBAFramework;
/// # use quabaf::contributions::{shapley_contribution_with_partition, Contributor};
/// let framework = QBAFramework::new(&["a", "b", "c"], &[2., 1., 1.], &[("b", "a")], &[("c", "b")]).unwrap();
/// let partition = vec![vec!["b", "c"]];
/// let contribution = shapley_contribution_with_partition(
///     &framework,
///     &"a",
///     &Contributor::Set(vec!["b", "c"]),
///     &partition,
/// )
/// .unwrap();
/// assert_eq!(-2., contribution);
/// ```
pub fn shapley_contribution_with_partition<T>(
    framework: &QBAFramework<T>,
    topic: &T,
    contributor: &Contributor<T>,
    partition: &[Vec<T>],
) -> Result<f64>
where
    T: LabelType,
{
    let contributors = contributor.to_set();
    check_contribution_arguments(framework, topic, &contributors)?;
    check_partition(framework, topic, partition).context("invalid partition")?;
    let contributor_index = partition
        .iter()
        .position(|block| block.iter().cloned().collect::<HashSet<T>>() == contributors)
        .ok_or_else(|| {
            QbafError::InvalidValue("the contributors must form a block of the partition".to_string())
        })?;
    shapley_value(framework, topic, partition, contributor_index)
}

fn check_partition<T>(framework: &QBAFramework<T>, topic: &T, partition: &[Vec<T>]) -> Result<()>
where
    T: LabelType,
{
    let mut covered = HashSet::new();
    for block in partition {
        if block.is_empty() {
            return Err(QbafError::InvalidValue("a block is empty".to_string()).into());
        }
        for arg in block {
            if !framework.contains_argument(arg) {
                return Err(QbafError::not_found(arg, "the framework").into());
            }
            if arg == topic {
                return Err(QbafError::InvalidValue(format!(
                    "the topic argument {} cannot belong to a block",
                    topic
                ))
                .into());
            }
            if !covered.insert(arg) {
                return Err(QbafError::InvalidValue(format!(
                    "argument {} belongs to more than one block",
                    arg
                ))
                .into());
            }
        }
    }
    if covered.len() + 1 != framework.n_arguments() {
        return Err(QbafError::InvalidValue(
            "the blocks must cover all the arguments except the topic".to_string(),
        )
        .into());
    }
    Ok(())
}

fn factorial(n: usize) -> f64 {
    (1..=n).map(|i| i as f64).product()
}

fn shapley_value<T>(
    framework: &QBAFramework<T>,
    topic: &T,
    players: &[Vec<T>],
    contributor_index: usize,
) -> Result<f64>
where
    T: LabelType,
{
    let others = (0..players.len())
        .filter(|i| *i != contributor_index)
        .collect::<Vec<usize>>();
    if others.len() > MAX_COMBINATION_ARGUMENTS {
        return Err(QbafError::InvalidValue(format!(
            "too many players to compute a Shapley value ({} > {})",
            players.len(),
            MAX_COMBINATION_ARGUMENTS
        ))
        .into());
    }
    let n_players = players.len();
    let mut value = marginal_gain(framework, topic, players, contributor_index, &[])?
        * factorial(n_players - 1)
        / factorial(n_players);
    for size in 1..=others.len() {
        let weight = factorial(size) * factorial(n_players - 1 - size) / factorial(n_players);
        for coalition in others.combination(size) {
            value += weight * marginal_gain(framework, topic, players, contributor_index, &coalition)?;
        }
    }
    Ok(value)
}

fn marginal_gain<T>(
    framework: &QBAFramework<T>,
    topic: &T,
    players: &[Vec<T>],
    contributor_index: usize,
    coalition: &[&usize],
) -> Result<f64>
where
    T: LabelType,
{
    let mut arguments = coalition
        .iter()
        .flat_map(|i| players[**i].iter().cloned())
        .collect::<HashSet<T>>();
    arguments.insert(topic.clone());
    let without_contributors = restrict(framework, &arguments)?.final_strength(topic)?;
    arguments.extend(players[contributor_index].iter().cloned());
    let with_contributors = restrict(framework, &arguments)?.final_strength(topic)?;
    trace!(
        "marginal gain of {:?} for coalition {:?}: {}",
        players[contributor_index],
        coalition,
        with_contributors - without_contributors
    );
    Ok(with_contributors - without_contributors)
}
