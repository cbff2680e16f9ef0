//! Contribution functions, measuring how much some arguments contribute to the final strength of a topic argument.
//!
//! # Example
//!
//! ```
//! # use quabaf::QBAFramework;
//! # use quabaf::contributions::{removal_contribution, shapley_contribution, Contributor};
//! let framework = QBAFramework::new(&["a", "b", "c"], &[2., 1., 1.], &[("b", "a")], &[("c", "b")]).unwrap();
//! assert_eq!(-2., removal_contribution(&framework, &"a", &Contributor::Single("b")).unwrap());
//! assert_eq!(-1.5, shapley_contribution(&framework, &"a", &Contributor::Single("b")).unwrap());
//! ```

mod gradient;
pub use gradient::gradient_contribution;
pub use gradient::GRADIENT_STEP;

mod intrinsic_removal;
pub use intrinsic_removal::intrinsic_removal_contribution;

mod removal;
pub use removal::removal_contribution;

mod shapley;
pub use shapley::shapley_contribution;
pub use shapley::shapley_contribution_with_partition;

use crate::{LabelType, QBAFramework, QbafError};
use anyhow::{Context, Result};
use std::collections::HashSet;

/// The argument, or set of arguments, whose contribution is measured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Contributor<T>
where
    T: LabelType,
{
    /// A single argument
    Single(T),
    /// A set of arguments, considered together
    Set(Vec<T>),
}

impl<T> Contributor<T>
where
    T: LabelType,
{
    /// Returns the set of arguments of this contributor.
    pub fn to_set(&self) -> HashSet<T> {
        match self {
            Contributor::Single(a) => HashSet::from([a.clone()]),
            Contributor::Set(v) => v.iter().cloned().collect(),
        }
    }
}

pub(crate) fn check_contribution_arguments<T>(
    framework: &QBAFramework<T>,
    topic: &T,
    contributors: &HashSet<T>,
) -> Result<()>
where
    T: LabelType,
{
    let context = || format!("cannot compute a contribution to {}", topic);
    if !framework.contains_argument(topic) {
        return Err(QbafError::not_found(topic, "the framework")).with_context(context);
    }
    if contributors.is_empty() {
        return Err(QbafError::InvalidValue("no contributor was given".to_string()))
            .with_context(context);
    }
    if let Some(c) = contributors.iter().find(|c| !framework.contains_argument(c)) {
        return Err(QbafError::not_found(c, "the framework")).with_context(context);
    }
    if contributors.contains(topic) {
        return Err(QbafError::InvalidOperation(format!(
            "argument {} cannot contribute to itself",
            topic
        )))
        .with_context(context);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_of(res: Result<()>) -> QbafError {
        res.unwrap_err().downcast_ref::<QbafError>().unwrap().clone()
    }

    #[test]
    fn test_contributor_to_set() {
        assert_eq!(HashSet::from(["a"]), Contributor::Single("a").to_set());
        assert_eq!(HashSet::from(["a", "b"]), Contributor::Set(vec!["a", "b", "a"]).to_set());
    }

    #[test]
    fn test_check_contribution_arguments() {
        let framework = QBAFramework::new(&["a", "b"], &[1., 1.], &[], &[]).unwrap();
        assert!(check_contribution_arguments(&framework, &"a", &HashSet::from(["b"])).is_ok());
        assert!(matches!(
            error_of(check_contribution_arguments(&framework, &"a", &HashSet::from(["a", "b"]))),
            QbafError::InvalidOperation(_)
        ));
        assert!(matches!(
            error_of(check_contribution_arguments(&framework, &"z", &HashSet::from(["b"]))),
            QbafError::NotFound { .. }
        ));
        assert!(matches!(
            error_of(check_contribution_arguments(&framework, &"a", &HashSet::from(["z"]))),
            QbafError::NotFound { .. }
        ));
        assert!(matches!(
            error_of(check_contribution_arguments(&framework, &"a", &HashSet::new())),
            QbafError::InvalidValue(_)
        ));
    }
}
