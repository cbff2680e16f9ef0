use super::consistency::check_contains_all;
use crate::utils::{influencers_of, MAX_COMBINATION_ARGUMENTS};
use crate::{ExplanationKind, LabelType, QBAFramework, QbafError};
use anyhow::Result;
use log::{debug, info, trace};
use permutator::Combination;
use std::collections::HashSet;

impl<T> QBAFramework<T>
where
    T: LabelType,
{
    fn differs_on(&self, other: &QBAFramework<T>, label: &T) -> Result<bool> {
        if !self.contains_argument(label) || !other.contains_argument(label) {
            return Ok(true);
        }
        Ok(self.initial_strength(label)? != other.initial_strength(label)?
            || self.final_strength(label)? != other.final_strength(label)?
            || self.attack_relations().patient_set(label)
                != other.attack_relations().patient_set(label)
            || self.support_relations().patient_set(label)
                != other.support_relations().patient_set(label))
    }

    /// Returns the arguments that may appear in a minimal explanation of the strength inconsistency on two arguments.
    ///
    /// These are the arguments that influence `arg1` or `arg2` through the attacks and supports of either framework
    /// (the two topic arguments included), and that differ between the frameworks:
    /// they belong to only one framework, or have different initial strengths, final strengths, attacked or supported arguments.
    ///
    /// Arguments are listed in the order of this framework, followed by the arguments only the other framework contains.
    /// An error is returned if a topic argument is missing from a framework or if a framework is cyclic.
    pub fn explanation_candidates(
        &self,
        other: &QBAFramework<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<Vec<T>> {
        check_contains_all(self, &[arg1, arg2], "the framework")?;
        check_contains_all(other, &[arg1, arg2], "the other framework")?;
        let influencers = influencers_of(&[self, other], &[arg1, arg2]);
        let mut candidates = Vec::new();
        let labels = self.argument_set().iter_labels().chain(
            other
                .argument_set()
                .iter_labels()
                .filter(|l| !self.contains_argument(l)),
        );
        for label in labels {
            if influencers.contains(label) && self.differs_on(other, label)? {
                candidates.push(label.clone());
            }
        }
        Ok(candidates)
    }

    /// Returns the minimal explanations of a given kind for the strength inconsistency between this framework and the other one.
    ///
    /// If the frameworks are strength consistent on the two arguments, the only minimal explanation is the empty set.
    /// Else, the subsets of the [candidates](Self::explanation_candidates) are checked by increasing size,
    /// skipping the supersets of explanations found so far.
    /// The order of the explanations is not significant.
    ///
    /// This search is exponential in the number of candidates;
    /// an error is returned if there are too many of them.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::{ExplanationKind, QBAFramework};
    /// # use std::collections::HashSet;
    /// let f0 = QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap();
    /// let f1 = QBAFramework::new(
    ///     &["a", "b", "c", "e"],
    ///     &[1., 1., 5., 3.],
    ///     &[("a", "c"), ("e", "c")],
    ///     &[("a", "b")],
    /// )
    /// .unwrap();
    /// let explanations = f1.minimal_explanations(ExplanationKind::SSI, &f0, &"b", &"c").unwrap();
    /// assert_eq!(2, explanations.len());
    /// assert!(explanations.contains(&HashSet::from(["a"])));
    /// assert!(explanations.contains(&HashSet::from(["e"])));
    /// ```
    pub fn minimal_explanations(
        &self,
        kind: ExplanationKind,
        other: &QBAFramework<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<Vec<HashSet<T>>> {
        let empty = HashSet::new();
        if self.is_explanation(kind, other, &empty, arg1, arg2)? {
            return Ok(vec![empty]);
        }
        let candidates = self.explanation_candidates(other, arg1, arg2)?;
        if candidates.len() > MAX_COMBINATION_ARGUMENTS {
            return Err(QbafError::InvalidValue(format!(
                "too many candidate arguments to search for minimal explanations ({} > {})",
                candidates.len(),
                MAX_COMBINATION_ARGUMENTS
            ))
            .into());
        }
        info!(
            "searching minimal {} explanations for ({}, {}) among {} candidate arguments",
            kind,
            arg1,
            arg2,
            candidates.len()
        );
        let mut explanations: Vec<HashSet<T>> = Vec::new();
        for size in 1..=candidates.len() {
            for subset in candidates.combination(size) {
                let subset = subset.into_iter().cloned().collect::<HashSet<T>>();
                if explanations.iter().any(|e| e.is_subset(&subset)) {
                    continue;
                }
                trace!("checking {:?}", subset);
                if self.is_explanation(kind, other, &subset, arg1, arg2)? {
                    debug!("found a minimal {} explanation: {:?}", kind, subset);
                    explanations.push(subset);
                }
            }
        }
        info!("found {} minimal {} explanations", explanations.len(), kind);
        Ok(explanations)
    }

    /// Returns the minimal sufficient explanations (see [`minimal_explanations`](Self::minimal_explanations)).
    pub fn minimal_ssi_explanations(
        &self,
        other: &QBAFramework<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<Vec<HashSet<T>>> {
        self.minimal_explanations(ExplanationKind::SSI, other, arg1, arg2)
    }

    /// Returns the minimal counterfactual explanations (see [`minimal_explanations`](Self::minimal_explanations)).
    pub fn minimal_csi_explanations(
        &self,
        other: &QBAFramework<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<Vec<HashSet<T>>> {
        self.minimal_explanations(ExplanationKind::CSI, other, arg1, arg2)
    }

    /// Returns the minimal necessary explanations (see [`minimal_explanations`](Self::minimal_explanations)).
    pub fn minimal_nsi_explanations(
        &self,
        other: &QBAFramework<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<Vec<HashSet<T>>> {
        self.minimal_explanations(ExplanationKind::NSI, other, arg1, arg2)
    }
}
