use crate::{LabelType, QbafError};
use anyhow::Result;
use std::collections::{HashMap, HashSet};

/// A set of relations (attacks or supports) between arguments.
///
/// Each relation is an ordered pair `(agent, patient)`.
/// In addition to the set of pairs, the index maintains the patients of each agent and the agents of each patient,
/// allowing constant-time neighborhood queries.
///
/// The relation sets owned by a [`QBAFramework`](crate::QBAFramework) are read-only:
/// the framework exposes them for queries, but [`add`](Self::add) and [`remove`](Self::remove) fail on them.
/// Relations of a framework are changed through the framework itself.
///
/// Two relation sets are equal if they contain the same pairs.
#[derive(Clone, Debug)]
pub struct RelationIndex<T>
where
    T: LabelType,
{
    relations: HashSet<(T, T)>,
    patients: HashMap<T, HashSet<T>>,
    agents: HashMap<T, HashSet<T>>,
    read_only: bool,
}

impl<T> Default for RelationIndex<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self {
            relations: HashSet::new(),
            patients: HashMap::new(),
            agents: HashMap::new(),
            read_only: false,
        }
    }
}

impl<T> RelationIndex<T>
where
    T: LabelType,
{
    /// Builds a new, mutable, relation set given its pairs.
    ///
    /// Repeated pairs are considered once.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::RelationIndex;
    /// let relations = RelationIndex::new_with_relations(&[("a", "b"), ("a", "c"), ("a", "b")]);
    /// assert_eq!(2, relations.len());
    /// assert!(relations.contains(&"a", &"c"));
    /// ```
    pub fn new_with_relations(pairs: &[(T, T)]) -> Self {
        let mut index = Self::default();
        pairs.iter().for_each(|(agent, patient)| {
            index.insert(agent, patient);
        });
        index
    }

    pub(crate) fn new_read_only(pairs: &[(T, T)]) -> Self {
        let mut index = Self::new_with_relations(pairs);
        index.read_only = true;
        index
    }

    /// Adds a relation.
    ///
    /// Adding an existing relation has no effect.
    /// An error is returned if this relation set is owned by a framework.
    pub fn add(&mut self, agent: &T, patient: &T) -> Result<()> {
        self.check_writable()?;
        self.insert(agent, patient);
        Ok(())
    }

    /// Removes a relation.
    ///
    /// Removing a relation that does not exist has no effect.
    /// An error is returned if this relation set is owned by a framework.
    pub fn remove(&mut self, agent: &T, patient: &T) -> Result<()> {
        self.check_writable()?;
        self.delete(agent, patient);
        Ok(())
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(QbafError::Permission(
                "the relations of a framework must be changed through the framework".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Returns `true` iff the relation set is owned by a framework.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub(crate) fn insert(&mut self, agent: &T, patient: &T) -> bool {
        if !self.relations.insert((agent.clone(), patient.clone())) {
            return false;
        }
        self.patients
            .entry(agent.clone())
            .or_default()
            .insert(patient.clone());
        self.agents
            .entry(patient.clone())
            .or_default()
            .insert(agent.clone());
        true
    }

    pub(crate) fn delete(&mut self, agent: &T, patient: &T) -> bool {
        if !self.relations.remove(&(agent.clone(), patient.clone())) {
            return false;
        }
        remove_from_neighborhood(&mut self.patients, agent, patient);
        remove_from_neighborhood(&mut self.agents, patient, agent);
        true
    }

    /// Returns `true` iff the relation `(agent, patient)` belongs to this set.
    pub fn contains(&self, agent: &T, patient: &T) -> bool {
        self.patients
            .get(agent)
            .map(|p| p.contains(patient))
            .unwrap_or(false)
    }

    /// Returns `true` iff the argument is the agent or the patient of a relation.
    pub fn involves(&self, argument: &T) -> bool {
        self.patients.contains_key(argument) || self.agents.contains_key(argument)
    }

    /// Iterates over the patients of the relations whose agent is the one provided.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::RelationIndex;
    /// let relations = RelationIndex::new_with_relations(&[("a", "b"), ("a", "c"), ("b", "c")]);
    /// let mut patients = relations.patients(&"a").copied().collect::<Vec<_>>();
    /// patients.sort_unstable();
    /// assert_eq!(vec!["b", "c"], patients);
    /// assert_eq!(0, relations.patients(&"c").count());
    /// ```
    pub fn patients<'a>(&'a self, agent: &T) -> impl Iterator<Item = &'a T> + 'a {
        self.patients.get(agent).into_iter().flat_map(|p| p.iter())
    }

    /// Iterates over the agents of the relations whose patient is the one provided.
    pub fn agents<'a>(&'a self, patient: &T) -> impl Iterator<Item = &'a T> + 'a {
        self.agents.get(patient).into_iter().flat_map(|a| a.iter())
    }

    /// Returns the set of patients of an agent.
    pub fn patient_set(&self, agent: &T) -> HashSet<T> {
        self.patients(agent).cloned().collect()
    }

    /// Returns the set of agents of a patient.
    pub fn agent_set(&self, patient: &T) -> HashSet<T> {
        self.agents(patient).cloned().collect()
    }

    /// Returns `true` iff the two relation sets share no pair.
    pub fn is_disjoint(&self, other: &RelationIndex<T>) -> bool {
        self.relations.is_disjoint(&other.relations)
    }

    /// Returns `true` iff all the pairs of this set belong to the other one.
    pub fn is_subset(&self, other: &RelationIndex<T>) -> bool {
        self.relations.is_subset(&other.relations)
    }

    /// Iterates over the pairs of this set, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        self.relations.iter().map(|(a, p)| (a, p))
    }

    /// Returns a copy of the pairs of this set.
    pub fn relations(&self) -> HashSet<(T, T)> {
        self.relations.clone()
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Returns `true` iff the set has no pair.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

fn remove_from_neighborhood<T>(neighborhoods: &mut HashMap<T, HashSet<T>>, key: &T, value: &T)
where
    T: LabelType,
{
    if let Some(neighbors) = neighborhoods.get_mut(key) {
        neighbors.remove(value);
        if neighbors.is_empty() {
            neighborhoods.remove(key);
        }
    }
}

impl<T> PartialEq for RelationIndex<T>
where
    T: LabelType,
{
    fn eq(&self, other: &Self) -> bool {
        self.relations == other.relations
    }
}

impl<T> Eq for RelationIndex<T> where T: LabelType {}
