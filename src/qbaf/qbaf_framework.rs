use super::framework_config::FrameworkConfig;
use super::semantics::{BuiltinSemantics, Semantics, StrengthSemantics};
use crate::utils::strength_computer;
use crate::{ArgumentSet, LabelType, QbafError, RelationIndex};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A Quantitative Bipolar Argumentation Framework.
///
/// A QBAF is made of arguments, each one having an initial strength, and of two relations between them: attacks and supports.
/// The final strength of each argument is computed from its initial strength and the final strengths of its attackers and supporters,
/// following a gradual semantics (see [`BuiltinSemantics`] and [`FrameworkConfig`]).
///
/// Final strengths are computed on demand and kept until the framework is modified.
/// They are only defined for acyclic frameworks.
///
/// # Example
///
/// ```
/// # use quabaf::QBAFramework;
/// let mut framework = QBAFramework::new(
///     &["a", "b", "c"],
///     &[1., 1., 5.],
///     &[("a", "c")],
///     &[("a", "b")],
/// )
/// .unwrap();
/// assert_eq!(4., framework.final_strength(&"c").unwrap());
/// assert_eq!(2., framework.final_strength(&"b").unwrap());
/// framework.add_argument("e", 3.).unwrap();
/// framework.add_attack_relation(&"e", &"c").unwrap();
/// assert_eq!(1., framework.final_strength(&"c").unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct QBAFramework<T>
where
    T: LabelType,
{
    arguments: ArgumentSet<T>,
    initial_strengths: Vec<f64>,
    attack_relations: RelationIndex<T>,
    support_relations: RelationIndex<T>,
    disjoint_relations: bool,
    semantics: Semantics,
    final_strengths: RefCell<Option<Rc<Vec<f64>>>>,
}

impl<T> QBAFramework<T>
where
    T: LabelType,
{
    /// Builds a QBAF using the basic model and disjoint relations.
    ///
    /// The initial strengths are given in the same order as the argument labels.
    ///
    /// # Arguments
    ///
    /// * `labels` - the argument labels
    /// * `initial_strengths` - the initial strengths of the arguments
    /// * `attacks` - the attacks, as `(attacker, attacked)` pairs
    /// * `supports` - the supports, as `(supporter, supported)` pairs
    pub fn new(
        labels: &[T],
        initial_strengths: &[f64],
        attacks: &[(T, T)],
        supports: &[(T, T)],
    ) -> Result<Self> {
        Self::new_with_config(
            labels,
            initial_strengths,
            attacks,
            supports,
            FrameworkConfig::default(),
        )
    }

    /// Builds a QBAF with a custom configuration.
    ///
    /// An error is returned if the configuration is invalid,
    /// if the number of labels and strengths differ, if a label is repeated,
    /// if a strength is out of the bounds of the semantics,
    /// if a relation involves an unknown argument,
    /// or if attacks and supports overlap while relations are required to be disjoint.
    pub fn new_with_config(
        labels: &[T],
        initial_strengths: &[f64],
        attacks: &[(T, T)],
        supports: &[(T, T)],
        config: FrameworkConfig,
    ) -> Result<Self> {
        let semantics = config.resolve_semantics()?;
        Self::new_with_semantics(
            labels,
            initial_strengths,
            attacks,
            supports,
            config.disjoint_relations(),
            semantics,
        )
    }

    pub(crate) fn new_with_semantics(
        labels: &[T],
        initial_strengths: &[f64],
        attacks: &[(T, T)],
        supports: &[(T, T)],
        disjoint_relations: bool,
        semantics: Semantics,
    ) -> Result<Self> {
        if labels.len() != initial_strengths.len() {
            return Err(QbafError::InvalidValue(format!(
                "got {} arguments and {} initial strengths",
                labels.len(),
                initial_strengths.len()
            ))
            .into());
        }
        let arguments = ArgumentSet::new_with_labels(labels);
        if arguments.len() != labels.len() {
            return Err(QbafError::InvalidValue("argument labels must be unique".to_string()).into());
        }
        labels
            .iter()
            .zip(initial_strengths.iter())
            .try_for_each(|(l, s)| check_strength(&semantics, l, *s))?;
        for (agent, patient) in attacks.iter().chain(supports.iter()) {
            for arg in [agent, patient] {
                if !arguments.contains(arg) {
                    return Err(QbafError::not_found(arg, "the framework")).with_context(|| {
                        format!("cannot add a relation from {} to {}", agent, patient)
                    });
                }
            }
        }
        let attack_relations = RelationIndex::new_read_only(attacks);
        let support_relations = RelationIndex::new_read_only(supports);
        if disjoint_relations && !attack_relations.is_disjoint(&support_relations) {
            return Err(QbafError::InvalidValue(
                "attack and support relations must be disjoint".to_string(),
            )
            .into());
        }
        Ok(QBAFramework {
            arguments,
            initial_strengths: initial_strengths.to_vec(),
            attack_relations,
            support_relations,
            disjoint_relations,
            semantics,
            final_strengths: RefCell::new(None),
        })
    }

    /// Returns the set of arguments of this framework.
    pub fn argument_set(&self) -> &ArgumentSet<T> {
        &self.arguments
    }

    /// Returns a copy of the argument labels.
    pub fn arguments(&self) -> HashSet<T> {
        self.arguments.iter_labels().cloned().collect()
    }

    /// Returns the number of arguments.
    pub fn n_arguments(&self) -> usize {
        self.arguments.len()
    }

    /// Returns `true` iff an argument has this label.
    pub fn contains_argument(&self, label: &T) -> bool {
        self.arguments.contains(label)
    }

    pub(crate) fn argument_id(&self, label: &T) -> Result<usize> {
        self.arguments
            .get_argument_index(label)
            .map_err(|_| QbafError::not_found(label, "the framework").into())
    }

    /// Returns the initial strength of an argument.
    pub fn initial_strength(&self, label: &T) -> Result<f64> {
        self.argument_id(label).map(|id| self.initial_strengths[id])
    }

    pub(crate) fn initial_strength_by_id(&self, id: usize) -> f64 {
        self.initial_strengths[id]
    }

    /// Returns a copy of the initial strengths.
    pub fn initial_strengths(&self) -> HashMap<T, f64> {
        self.arguments
            .iter()
            .map(|a| (a.label().clone(), self.initial_strengths[a.id()]))
            .collect()
    }

    fn final_strength_values(&self) -> Result<Rc<Vec<f64>>> {
        if let Some(values) = self.final_strengths.borrow().as_ref() {
            return Ok(Rc::clone(values));
        }
        let values = Rc::new(strength_computer::compute_final_strengths(self)?);
        *self.final_strengths.borrow_mut() = Some(Rc::clone(&values));
        Ok(values)
    }

    /// Returns the final strength of an argument.
    ///
    /// An error is returned if the argument does not exist or if the framework is cyclic.
    pub fn final_strength(&self, label: &T) -> Result<f64> {
        let id = self.argument_id(label)?;
        Ok(self.final_strength_values()?[id])
    }

    /// Returns a copy of the final strengths.
    ///
    /// An error is returned if the framework is cyclic.
    pub fn final_strengths(&self) -> Result<HashMap<T, f64>> {
        let values = self.final_strength_values()?;
        Ok(self
            .arguments
            .iter()
            .map(|a| (a.label().clone(), values[a.id()]))
            .collect())
    }

    /// Returns the attacks, as a read-only relation set.
    pub fn attack_relations(&self) -> &RelationIndex<T> {
        &self.attack_relations
    }

    /// Returns the supports, as a read-only relation set.
    pub fn support_relations(&self) -> &RelationIndex<T> {
        &self.support_relations
    }

    /// Returns `true` iff `attacker` attacks `attacked`.
    pub fn contains_attack_relation(&self, attacker: &T, attacked: &T) -> bool {
        self.attack_relations.contains(attacker, attacked)
    }

    /// Returns `true` iff `supporter` supports `supported`.
    pub fn contains_support_relation(&self, supporter: &T, supported: &T) -> bool {
        self.support_relations.contains(supporter, supported)
    }

    fn neighbors(
        &self,
        label: &T,
        neighbors: impl Fn(&T) -> HashSet<T>,
    ) -> Result<HashSet<T>> {
        self.argument_id(label)?;
        Ok(neighbors(label))
    }

    /// Returns the arguments attacked by an argument.
    pub fn attacked_by(&self, attacker: &T) -> Result<HashSet<T>> {
        self.neighbors(attacker, |a| self.attack_relations.patient_set(a))
    }

    /// Returns the attackers of an argument.
    pub fn attackers_of(&self, attacked: &T) -> Result<HashSet<T>> {
        self.neighbors(attacked, |a| self.attack_relations.agent_set(a))
    }

    /// Returns the arguments supported by an argument.
    pub fn supported_by(&self, supporter: &T) -> Result<HashSet<T>> {
        self.neighbors(supporter, |a| self.support_relations.patient_set(a))
    }

    /// Returns the supporters of an argument.
    pub fn supporters_of(&self, supported: &T) -> Result<HashSet<T>> {
        self.neighbors(supported, |a| self.support_relations.agent_set(a))
    }

    /// Returns `true` iff no argument influences itself through attacks and supports.
    pub fn is_acyclic(&self) -> bool {
        strength_computer::topological_order(self).is_some()
    }

    /// Returns `true` iff attacks and supports must be disjoint.
    pub fn disjoint_relations(&self) -> bool {
        self.disjoint_relations
    }

    /// Sets whether attacks and supports must be disjoint.
    ///
    /// An error is returned when requiring disjointness while a relation is both an attack and a support.
    pub fn set_disjoint_relations(&mut self, disjoint_relations: bool) -> Result<()> {
        if disjoint_relations && !self.attack_relations.is_disjoint(&self.support_relations) {
            return Err(QbafError::InvalidValue(
                "attack and support relations are not disjoint".to_string(),
            )
            .into());
        }
        self.disjoint_relations = disjoint_relations;
        Ok(())
    }

    /// Returns the semantics used by this framework.
    pub fn semantics(&self) -> &Semantics {
        &self.semantics
    }

    /// Returns the built-in semantics used by this framework, or `None` if it uses a custom one.
    pub fn semantics_name(&self) -> Option<BuiltinSemantics> {
        self.semantics.builtin()
    }

    /// Returns the lowest strength allowed by the semantics.
    pub fn min_strength(&self) -> f64 {
        self.semantics.min_strength()
    }

    /// Returns the highest strength allowed by the semantics.
    pub fn max_strength(&self) -> f64 {
        self.semantics.max_strength()
    }

    fn invalidate_final_strengths(&mut self) {
        *self.final_strengths.get_mut() = None;
    }

    /// Adds a new argument to this framework.
    ///
    /// If an argument with the same label exists, nothing is done.
    /// An error is returned if the strength is out of the bounds of the semantics.
    pub fn add_argument(&mut self, label: T, initial_strength: f64) -> Result<()> {
        if self.arguments.contains(&label) {
            return Ok(());
        }
        check_strength(&self.semantics, &label, initial_strength)?;
        self.arguments.new_argument(label);
        self.initial_strengths.push(initial_strength);
        self.invalidate_final_strengths();
        Ok(())
    }

    /// Adds a new argument with a description to this framework.
    ///
    /// If an argument with the same label exists, nothing is done.
    pub fn add_argument_with_description(
        &mut self,
        label: T,
        initial_strength: f64,
        description: &str,
    ) -> Result<()> {
        if self.arguments.contains(&label) {
            return Ok(());
        }
        self.add_argument(label.clone(), initial_strength)?;
        self.arguments.set_description(&label, description)
    }

    /// Sets the description of an argument.
    pub fn set_argument_description(&mut self, label: &T, description: &str) -> Result<()> {
        self.argument_id(label)?;
        self.arguments.set_description(label, description)
    }

    /// Removes an argument from this framework.
    ///
    /// An error is returned if the argument does not exist or if it is still involved in an attack or a support.
    pub fn remove_argument(&mut self, label: &T) -> Result<()> {
        self.argument_id(label)?;
        if self.attack_relations.involves(label) || self.support_relations.involves(label) {
            return Err(QbafError::InvalidValue(format!(
                "argument {} is involved in attacks or supports",
                label
            )))
            .with_context(|| format!("cannot remove argument {}", label));
        }
        self.arguments.remove_argument(label)?;
        self.invalidate_final_strengths();
        Ok(())
    }

    /// Sets the initial strength of an argument.
    pub fn modify_initial_strength(&mut self, label: &T, initial_strength: f64) -> Result<()> {
        let id = self.argument_id(label)?;
        check_strength(&self.semantics, label, initial_strength)?;
        self.initial_strengths[id] = initial_strength;
        self.invalidate_final_strengths();
        Ok(())
    }

    fn check_new_relation(
        &self,
        agent: &T,
        patient: &T,
        other_relations: &RelationIndex<T>,
    ) -> Result<()> {
        self.argument_id(agent)?;
        self.argument_id(patient)?;
        if self.disjoint_relations && other_relations.contains(agent, patient) {
            return Err(QbafError::InvalidValue(
                "attack and support relations must be disjoint".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Adds an attack.
    ///
    /// Adding an existing attack has no effect.
    /// An error is returned if an argument does not exist or if the relation is a support while relations must be disjoint.
    pub fn add_attack_relation(&mut self, attacker: &T, attacked: &T) -> Result<()> {
        self.check_new_relation(attacker, attacked, &self.support_relations)
            .with_context(|| format!("cannot add an attack from {} to {}", attacker, attacked))?;
        if self.attack_relations.insert(attacker, attacked) {
            self.invalidate_final_strengths();
        }
        Ok(())
    }

    /// Removes an attack.
    ///
    /// Removing an attack that does not exist has no effect.
    pub fn remove_attack_relation(&mut self, attacker: &T, attacked: &T) {
        if self.attack_relations.delete(attacker, attacked) {
            self.invalidate_final_strengths();
        }
    }

    /// Adds a support.
    ///
    /// Adding an existing support has no effect.
    /// An error is returned if an argument does not exist or if the relation is an attack while relations must be disjoint.
    pub fn add_support_relation(&mut self, supporter: &T, supported: &T) -> Result<()> {
        self.check_new_relation(supporter, supported, &self.attack_relations)
            .with_context(|| format!("cannot add a support from {} to {}", supporter, supported))?;
        if self.support_relations.insert(supporter, supported) {
            self.invalidate_final_strengths();
        }
        Ok(())
    }

    /// Removes a support.
    ///
    /// Removing a support that does not exist has no effect.
    pub fn remove_support_relation(&mut self, supporter: &T, supported: &T) {
        if self.support_relations.delete(supporter, supported) {
            self.invalidate_final_strengths();
        }
    }
}

fn check_strength<T>(semantics: &Semantics, label: &T, strength: f64) -> Result<()>
where
    T: LabelType,
{
    if strength.is_nan() {
        return Err(QbafError::TypeValue(format!(
            "the initial strength of argument {} is not a number",
            label
        ))
        .into());
    }
    if !semantics.is_within_bounds(strength) {
        return Err(QbafError::InvalidValue(format!(
            "the initial strength of argument {} ({}) is out of the bounds [{}, {}]",
            label,
            strength,
            semantics.min_strength(),
            semantics.max_strength()
        ))
        .into());
    }
    Ok(())
}

impl<T> PartialEq for QBAFramework<T>
where
    T: LabelType,
{
    fn eq(&self, other: &Self) -> bool {
        self.arguments.len() == other.arguments.len()
            && self.arguments.iter().all(|a| {
                other
                    .initial_strength(a.label())
                    .map(|s| s == self.initial_strengths[a.id()])
                    .unwrap_or(false)
            })
            && self.attack_relations == other.attack_relations
            && self.support_relations == other.support_relations
    }
}
