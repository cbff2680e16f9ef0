use crate::QbafError;
use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// The trait for argument labels.
///
/// Arguments may be labeled by any type implementing some traits.
/// This trait is used to combine them.
pub trait LabelType: Clone + Debug + Display + Eq + Hash {}
impl<T: Clone + Debug + Display + Eq + Hash> LabelType for T {}

/// Handles a single argument.
///
/// Each argument has a label, an optional description and an identifier which is unique in an argument set.
/// The label must be a [`LabelType`].
///
/// Equality and hashing only depend on the label:
/// two arguments sharing a label but not their description are considered equal.
///
/// Arguments are built by [`ArgumentSet`] objects.
///
/// [`LabelType`]: trait.LabelType.html
/// [`ArgumentSet`]: struct.ArgumentSet.html
#[derive(Clone, Debug)]
pub struct Argument<T: LabelType> {
    id: usize,
    label: T,
    description: String,
}

impl<T> Argument<T>
where
    T: LabelType,
{
    /// Returns the label of the argument.
    ///
    /// Example
    ///
    /// ```
    /// # use quabaf::{Argument, LabelType};
    /// fn describe_argument<T: LabelType>(a: &Argument<T>) {
    ///     println!("argument with id {} has the label {}", a.id(), a.label());
    /// }
    /// ```
    pub fn label(&self) -> &T {
        &self.label
    }

    /// Returns the id of the argument.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the description of the argument.
    ///
    /// Arguments without description return an empty string.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl<T> PartialEq for Argument<T>
where
    T: LabelType,
{
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl<T> Eq for Argument<T> where T: LabelType {}

impl<T> Hash for Argument<T>
where
    T: LabelType,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state)
    }
}

impl<T> Display for Argument<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Handles the set of arguments of a QBAF.
///
/// Arguments are stored in an arena: each one receives an id equal to the number of arguments
/// added before it, and ids of removed arguments are never given again.
#[derive(Clone, Debug)]
pub struct ArgumentSet<T>
where
    T: LabelType,
{
    arguments: Vec<Option<Argument<T>>>,
    label_to_id: HashMap<T, usize>,
    n_removed: usize,
}

impl<T> Default for ArgumentSet<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self {
            arguments: Vec::new(),
            label_to_id: HashMap::new(),
            n_removed: 0,
        }
    }
}

impl<T> ArgumentSet<T>
where
    T: LabelType,
{
    /// Builds a new argument set given the labels of the arguments.
    ///
    /// Each argument will be assigned an id equal to its index in the provided slice of argument labels.
    /// If a label appears multiple times, the first occurrence is the only one that is considered.
    ///
    /// # Arguments
    ///
    /// * `labels` - the argument labels
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert_eq!(3, arguments.len());
    /// ```
    pub fn new_with_labels(labels: &[T]) -> Self {
        let mut argument_set = ArgumentSet {
            arguments: Vec::with_capacity(labels.len()),
            label_to_id: HashMap::with_capacity(labels.len()),
            n_removed: 0,
        };
        labels.iter().for_each(|l| {
            argument_set.new_argument(l.clone());
        });
        argument_set
    }

    /// Adds a new argument to this set and returns its id.
    ///
    /// The id of the new argument is the previous maximal id plus one.
    /// If an argument with the same label is already defined, no argument is added and the id of the existing one is returned.
    pub fn new_argument(&mut self, label: T) -> usize {
        *self.label_to_id.entry(label.clone()).or_insert_with(|| {
            self.arguments.push(Some(Argument {
                id: self.arguments.len(),
                label,
                description: String::new(),
            }));
            self.arguments.len() - 1
        })
    }

    /// Removes an argument from this set.
    ///
    /// The argument id will not be attributed to new arguments.
    pub fn remove_argument(&mut self, label: &T) -> Result<Argument<T>> {
        let removed = self
            .label_to_id
            .remove(label)
            .and_then(|id| self.arguments[id].take())
            .ok_or_else(|| QbafError::not_found(label, "the argument set"))?;
        self.n_removed += 1;
        Ok(removed)
    }

    /// Sets the description of an argument.
    pub fn set_description(&mut self, label: &T, description: &str) -> Result<()> {
        let id = self.get_argument_index(label)?;
        if let Some(arg) = self.arguments[id].as_mut() {
            arg.description = description.to_string();
        }
        Ok(())
    }

    /// Returns the number of arguments in the set.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert_eq!(3, arguments.len());
    /// ```
    pub fn len(&self) -> usize {
        self.arguments.len() - self.n_removed
    }

    /// Returns the maximal argument id given so far, or `None` if no argument has been added yet.
    ///
    /// This id may refer to a removed argument.
    pub fn max_id(&self) -> Option<usize> {
        self.arguments.len().checked_sub(1)
    }

    /// Returns `true` iff the set has no argument.
    pub fn is_empty(&self) -> bool {
        self.arguments.len() == self.n_removed
    }

    /// Returns `true` iff an argument has this label.
    pub fn contains(&self, label: &T) -> bool {
        self.label_to_id.contains_key(label)
    }

    /// Returns the unique index associated to an argument label.
    ///
    /// If no such label exists, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `label` - the argument label
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert_eq!(0, arguments.get_argument_index(&labels[0]).unwrap());
    /// assert_eq!(2, arguments.get_argument_index(&labels[2]).unwrap());
    /// ```
    pub fn get_argument_index(&self, label: &T) -> Result<usize> {
        self.label_to_id
            .get(label)
            .copied()
            .ok_or_else(|| QbafError::not_found(label, "the argument set").into())
    }

    /// Returns the argument associated to an argument label.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert!(arguments.get_argument(&"a").is_ok());
    /// assert!(arguments.get_argument(&"d").is_err());
    /// ```
    pub fn get_argument(&self, label: &T) -> Result<&Argument<T>> {
        self.label_to_id
            .get(label)
            .and_then(|i| self.arguments[*i].as_ref())
            .ok_or_else(|| QbafError::not_found(label, "the argument set").into())
    }

    /// Returns the argument with the corresponding id, or `None` if the id is unknown or refers to a removed argument.
    pub fn get_argument_by_id(&self, id: usize) -> Option<&Argument<T>> {
        self.arguments.get(id).and_then(|o| o.as_ref())
    }

    /// Returns an iterator to the arguments, in increasing order of ids.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert_eq!(3, arguments.iter().count());
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &Argument<T>> + '_ {
        self.arguments.iter().filter_map(|o| o.as_ref())
    }

    /// Returns an iterator to the labels of the arguments, in increasing order of ids.
    pub fn iter_labels(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|a| a.label())
    }
}
