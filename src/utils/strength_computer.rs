use crate::{ArgumentSet, LabelType, QBAFramework, QbafError, RelationIndex, StrengthSemantics};
use anyhow::Result;
use log::debug;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Resolved,
}

struct Influencers {
    attackers: Vec<Vec<usize>>,
    supporters: Vec<Vec<usize>>,
}

impl Influencers {
    fn of<T>(framework: &QBAFramework<T>) -> Self
    where
        T: LabelType,
    {
        let args = framework.argument_set();
        let n = args.max_id().map(|m| m + 1).unwrap_or(0);
        let mut attackers = vec![vec![]; n];
        let mut supporters = vec![vec![]; n];
        let fill = |relations: &RelationIndex<T>, by_patient: &mut [Vec<usize>]| {
            relations.iter().for_each(|(agent, patient)| {
                if let (Ok(a), Ok(p)) = (args.get_argument_index(agent), args.get_argument_index(patient)) {
                    by_patient[p].push(a);
                }
            })
        };
        fill(framework.attack_relations(), &mut attackers);
        fill(framework.support_relations(), &mut supporters);
        Influencers {
            attackers,
            supporters,
        }
    }

    fn len(&self) -> usize {
        self.attackers.len()
    }

    fn iter_influencers_of(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.attackers[id]
            .iter()
            .chain(self.supporters[id].iter())
            .copied()
    }
}

/// Computes an order of the arguments such that each argument appears after all its attackers and supporters.
///
/// Returns `None` if the framework is cyclic.
pub(crate) fn topological_order<T>(framework: &QBAFramework<T>) -> Option<Vec<usize>>
where
    T: LabelType,
{
    topological_order_with(framework.argument_set(), &Influencers::of(framework))
}

fn topological_order_with<T>(args: &ArgumentSet<T>, influencers: &Influencers) -> Option<Vec<usize>>
where
    T: LabelType,
{
    let mut marks = vec![Mark::Unvisited; influencers.len()];
    let mut order = Vec::with_capacity(args.len());
    for root in args.iter().map(|a| a.id()) {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::Visiting;
        let mut stack = vec![(root, influencers.iter_influencers_of(root))];
        while let Some((current, children)) = stack.last_mut() {
            let current = *current;
            match children.next() {
                Some(child) => match marks[child] {
                    Mark::Unvisited => {
                        marks[child] = Mark::Visiting;
                        stack.push((child, influencers.iter_influencers_of(child)));
                    }
                    Mark::Visiting => return None,
                    Mark::Resolved => {}
                },
                None => {
                    marks[current] = Mark::Resolved;
                    order.push(current);
                    stack.pop();
                }
            }
        }
    }
    Some(order)
}

/// Computes the final strengths of the arguments of a framework.
///
/// The returned vector is indexed by argument ids; values at the ids of removed arguments are meaningless.
/// An error is returned if the framework is cyclic.
pub(crate) fn compute_final_strengths<T>(framework: &QBAFramework<T>) -> Result<Vec<f64>>
where
    T: LabelType,
{
    let influencers = Influencers::of(framework);
    let order = topological_order_with(framework.argument_set(), &influencers)
        .ok_or(QbafError::Cyclic)?;
    debug!("computing the final strengths of {} arguments", order.len());
    let semantics = framework.semantics();
    let (min, max) = (semantics.min_strength(), semantics.max_strength());
    let mut strengths = vec![f64::NAN; influencers.len()];
    let sorted_strengths = |ids: &[usize], strengths: &[f64]| {
        let mut values = ids.iter().map(|i| strengths[*i]).collect::<Vec<f64>>();
        values.sort_unstable_by(f64::total_cmp);
        values
    };
    for id in order {
        let attacker_strengths = sorted_strengths(&influencers.attackers[id], &strengths);
        let supporter_strengths = sorted_strengths(&influencers.supporters[id], &strengths);
        let aggregate = semantics.aggregate(&attacker_strengths, &supporter_strengths);
        strengths[id] = semantics
            .influence(framework.initial_strength_by_id(id), aggregate)
            .clamp(min, max);
    }
    Ok(strengths)
}
