use crate::{LabelType, QBAFramework, QbafError};
use anyhow::Result;
use std::cmp::Ordering;
use std::collections::HashSet;

pub(crate) fn check_contains_all<T>(framework: &QBAFramework<T>, args: &[&T], role: &str) -> Result<()>
where
    T: LabelType,
{
    match args.iter().find(|a| !framework.contains_argument(a)) {
        Some(missing) => Err(QbafError::not_found(*missing, role).into()),
        None => Ok(()),
    }
}

pub(crate) fn check_within_union<T>(
    framework: &QBAFramework<T>,
    other: &QBAFramework<T>,
    set: &HashSet<T>,
) -> Result<()>
where
    T: LabelType,
{
    match set
        .iter()
        .find(|a| !framework.contains_argument(a) && !other.contains_argument(a))
    {
        Some(a) => Err(QbafError::TypeValue(format!(
            "argument {} belongs to none of the frameworks",
            a
        ))
        .into()),
        None => Ok(()),
    }
}

fn compare_strengths(s1: f64, s2: f64) -> Ordering {
    s1.partial_cmp(&s2).unwrap_or_else(|| s1.total_cmp(&s2))
}

impl<T> QBAFramework<T>
where
    T: LabelType,
{
    /// Checks whether the two frameworks order the final strengths of two arguments in the same way.
    ///
    /// The frameworks are strength consistent if `arg1` is stronger (resp. weaker, equally strong) than `arg2`
    /// in this framework and in the other one.
    /// The result does not depend on the framework the method is called on.
    ///
    /// An error is returned if an argument is missing from a framework, or if a framework is cyclic.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::QBAFramework;
    /// let f0 = QBAFramework::new(&["a", "b", "c"], &[1., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap();
    /// let mut f1 = f0.clone();
    /// f1.add_argument("e", 3.).unwrap();
    /// f1.add_attack_relation(&"e", &"c").unwrap();
    /// assert!(f0.are_strength_consistent(&f1, &"a", &"b").unwrap());
    /// assert!(!f0.are_strength_consistent(&f1, &"b", &"c").unwrap());
    /// assert!(f0.are_strength_consistent(&f1, &"e", &"c").is_err());
    /// ```
    pub fn are_strength_consistent(
        &self,
        other: &QBAFramework<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<bool> {
        check_contains_all(self, &[arg1, arg2], "the framework")?;
        check_contains_all(other, &[arg1, arg2], "the other framework")?;
        let ordering = |framework: &QBAFramework<T>| -> Result<Ordering> {
            Ok(compare_strengths(
                framework.final_strength(arg1)?,
                framework.final_strength(arg2)?,
            ))
        };
        Ok(ordering(self)? == ordering(other)?)
    }

    /// Builds the reversal of this framework to the other one for a set of arguments.
    ///
    /// The arguments of the set take their initial strengths and their outgoing attacks and supports from the other framework;
    /// the ones that are not part of the other framework are dropped.
    /// Arguments outside the set keep the initial strengths and outgoing relations of this framework.
    /// Relations toward dropped arguments are dropped too.
    ///
    /// The reversal uses the semantics of this framework, and requires disjoint relations iff both frameworks do.
    ///
    /// An error is returned if the set contains an argument belonging to none of the frameworks.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::QBAFramework;
    /// # use std::collections::HashSet;
    /// let f0 = QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap();
    /// let f1 = QBAFramework::new(
    ///     &["a", "b", "c", "e"],
    ///     &[1., 1., 5., 3.],
    ///     &[("a", "c"), ("e", "c")],
    ///     &[("a", "b")],
    /// )
    /// .unwrap();
    /// assert_eq!(f1, f1.reversal(&f0, &HashSet::new()).unwrap());
    /// assert_eq!(f0, f1.reversal(&f0, &HashSet::from(["a", "e"])).unwrap());
    /// ```
    pub fn reversal(&self, other: &QBAFramework<T>, set: &HashSet<T>) -> Result<QBAFramework<T>> {
        check_within_union(self, other, set)?;
        let source_of = |label: &T| {
            if set.contains(label) {
                other
            } else {
                self
            }
        };
        let labels = self
            .argument_set()
            .iter_labels()
            .chain(
                other
                    .argument_set()
                    .iter_labels()
                    .filter(|l| !self.contains_argument(l)),
            )
            .filter(|l| source_of(*l).contains_argument(l))
            .cloned()
            .collect::<Vec<T>>();
        let kept = labels.iter().collect::<HashSet<&T>>();
        let kept = &kept;
        let strengths = labels
            .iter()
            .map(|l| source_of(l).initial_strength(l))
            .collect::<Result<Vec<f64>>>()?;
        let reversed_relations = |attacks: bool| {
            labels
                .iter()
                .flat_map(|agent| {
                    let source = source_of(agent);
                    let relations = if attacks {
                        source.attack_relations()
                    } else {
                        source.support_relations()
                    };
                    relations
                        .patients(agent)
                        .filter(move |p| kept.contains(p))
                        .map(move |p| (agent.clone(), p.clone()))
                })
                .collect::<Vec<(T, T)>>()
        };
        let mut reversed = QBAFramework::new_with_semantics(
            &labels,
            &strengths,
            &reversed_relations(true),
            &reversed_relations(false),
            self.disjoint_relations() && other.disjoint_relations(),
            self.semantics().clone(),
        )?;
        for label in &labels {
            let description = source_of(label).argument_set().get_argument(label)?.description();
            if !description.is_empty() {
                reversed.set_argument_description(label, description)?;
            }
        }
        Ok(reversed)
    }
}
