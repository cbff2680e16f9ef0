use super::consistency::check_within_union;
use crate::{LabelType, QBAFramework, QbafError};
use anyhow::{Context, Result};
use std::collections::HashSet;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The kinds of explanations of strength inconsistencies.
///
/// Let `QBF'` be the framework the explanation methods are called on, and `QBF` the other one.
/// When they are not strength consistent on two arguments, a set of arguments `E` explains this inconsistency if:
///
/// * (SSI) reverting all the arguments but `E` to `QBF` keeps the inconsistency: the changes on `E` are sufficient;
/// * (NSI) reverting `E` to `QBF` removes the inconsistency: the changes on `E` are necessary;
/// * (CSI) both conditions hold.
///
/// When the frameworks are consistent, the only explanation is the empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
pub enum ExplanationKind {
    /// Sufficient Strength Inconsistency explanations
    SSI,
    /// Counterfactual Strength Inconsistency explanations
    CSI,
    /// Necessary Strength Inconsistency explanations
    NSI,
}

impl TryFrom<&str> for ExplanationKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_ascii_uppercase().parse::<ExplanationKind>().map_err(|_| {
            QbafError::InvalidValue(format!(r#"undefined explanation kind "{}""#, value)).into()
        })
    }
}

impl<T> QBAFramework<T>
where
    T: LabelType,
{
    fn is_consistent_after_reversal(
        &self,
        other: &QBAFramework<T>,
        set: &HashSet<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<bool> {
        let reversed = self.reversal(other, set)?;
        other.are_strength_consistent(&reversed, arg1, arg2)
    }

    /// Checks whether a set of arguments is a sufficient explanation of the strength inconsistency
    /// between this framework and the other one on two arguments.
    ///
    /// See [`ExplanationKind`] for more information.
    ///
    /// An error is returned if the set contains arguments that belong to none of the frameworks,
    /// if the topic arguments are missing from a framework, or if a framework is cyclic.
    pub fn is_ssi_explanation(
        &self,
        other: &QBAFramework<T>,
        set: &HashSet<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<bool> {
        check_within_union(self, other, set)?;
        if self.are_strength_consistent(other, arg1, arg2)? {
            return Ok(set.is_empty());
        }
        let complement = self
            .arguments()
            .union(&other.arguments())
            .filter(|a| !set.contains(*a))
            .cloned()
            .collect::<HashSet<T>>();
        Ok(!self.is_consistent_after_reversal(other, &complement, arg1, arg2)?)
    }

    /// Checks whether a set of arguments is a necessary explanation of the strength inconsistency
    /// between this framework and the other one on two arguments.
    ///
    /// See [`ExplanationKind`] for more information.
    pub fn is_nsi_explanation(
        &self,
        other: &QBAFramework<T>,
        set: &HashSet<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<bool> {
        check_within_union(self, other, set)?;
        if self.are_strength_consistent(other, arg1, arg2)? {
            return Ok(set.is_empty());
        }
        self.is_consistent_after_reversal(other, set, arg1, arg2)
    }

    /// Checks whether a set of arguments is a counterfactual explanation of the strength inconsistency
    /// between this framework and the other one on two arguments.
    ///
    /// See [`ExplanationKind`] for more information.
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
    /// assert!(f1.is_csi_explanation(&f0, &HashSet::from(["a", "e"]), &"b", &"c").unwrap());
    /// assert!(!f1.is_csi_explanation(&f0, &HashSet::from(["a"]), &"b", &"c").unwrap());
    /// ```
    pub fn is_csi_explanation(
        &self,
        other: &QBAFramework<T>,
        set: &HashSet<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<bool> {
        Ok(self.is_nsi_explanation(other, set, arg1, arg2)?
            && self.is_ssi_explanation(other, set, arg1, arg2)?)
    }

    /// Checks whether a set of arguments is an explanation of the given kind.
    pub fn is_explanation(
        &self,
        kind: ExplanationKind,
        other: &QBAFramework<T>,
        set: &HashSet<T>,
        arg1: &T,
        arg2: &T,
    ) -> Result<bool> {
        let result = match kind {
            ExplanationKind::SSI => self.is_ssi_explanation(other, set, arg1, arg2),
            ExplanationKind::CSI => self.is_csi_explanation(other, set, arg1, arg2),
            ExplanationKind::NSI => self.is_nsi_explanation(other, set, arg1, arg2),
        };
        result.with_context(|| format!("while checking a {} explanation", kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn qbfa() -> QBAFramework<&'static str> {
        QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap()
    }

    fn qbfe() -> QBAFramework<&'static str> {
        QBAFramework::new(
            &["a", "b", "c", "e"],
            &[1., 1., 5., 3.],
            &[("a", "c"), ("e", "c")],
            &[("a", "b")],
        )
        .unwrap()
    }

    macro_rules! test_for_kind {
        ($kind:expr, $suffix:ident) => {
            paste::item! {
                #[test]
                fn [< test_consistent_frameworks_ $suffix >] () {
                    let (fa, fe) = (qbfa(), qbfe());
                    assert!(fe.is_explanation($kind, &fa, &HashSet::new(), &"a", &"b").unwrap());
                    assert!(!fe.is_explanation($kind, &fa, &HashSet::from(["a"]), &"a", &"b").unwrap());
                    assert!(fe.is_explanation($kind, &fa, &HashSet::new(), &"b", &"b").unwrap());
                }

                #[test]
                fn [< test_empty_set_on_inconsistency_ $suffix >] () {
                    let (fa, fe) = (qbfa(), qbfe());
                    assert!(!fe.is_explanation($kind, &fa, &HashSet::new(), &"b", &"c").unwrap());
                }

                #[test]
                fn [< test_unknown_topic_ $suffix >] () {
                    let (fa, fe) = (qbfa(), qbfe());
                    let err = fe.is_explanation($kind, &fa, &HashSet::new(), &"e", &"c").unwrap_err();
                    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::NotFound { .. })));
                }

                #[test]
                fn [< test_set_outside_frameworks_ $suffix >] () {
                    let (fa, fe) = (qbfa(), qbfe());
                    let err = fe.is_explanation($kind, &fa, &HashSet::from(["z"]), &"b", &"c").unwrap_err();
                    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::TypeValue(_))));
                }
            }
        };
    }

    test_for_kind!(ExplanationKind::SSI, ssi);
    test_for_kind!(ExplanationKind::CSI, csi);
    test_for_kind!(ExplanationKind::NSI, nsi);

    #[test]
    fn test_ssi() {
        let (fa, fe) = (qbfa(), qbfe());
        assert!(fe.is_ssi_explanation(&fa, &HashSet::from(["a"]), &"b", &"c").unwrap());
        assert!(fe.is_ssi_explanation(&fa, &HashSet::from(["e"]), &"b", &"c").unwrap());
        assert!(!fe.is_ssi_explanation(&fa, &HashSet::from(["b", "c"]), &"b", &"c").unwrap());
        assert!(fa.is_ssi_explanation(&fe, &HashSet::from(["e"]), &"b", &"c").unwrap());
        assert!(!fa.is_ssi_explanation(&fe, &HashSet::from(["a"]), &"b", &"c").unwrap());
    }

    #[test]
    fn test_nsi() {
        let (fa, fe) = (qbfa(), qbfe());
        assert!(fe.is_nsi_explanation(&fa, &HashSet::from(["a", "e"]), &"b", &"c").unwrap());
        assert!(!fe.is_nsi_explanation(&fa, &HashSet::from(["a"]), &"b", &"c").unwrap());
        assert!(!fe.is_nsi_explanation(&fa, &HashSet::from(["e"]), &"b", &"c").unwrap());
        assert!(fa.is_nsi_explanation(&fe, &HashSet::from(["e"]), &"b", &"c").unwrap());
    }

    #[test]
    fn test_csi() {
        let (fa, fe) = (qbfa(), qbfe());
        assert!(fe.is_csi_explanation(&fa, &HashSet::from(["a", "e"]), &"b", &"c").unwrap());
        assert!(!fe.is_csi_explanation(&fa, &HashSet::from(["e"]), &"b", &"c").unwrap());
        assert!(fa.is_csi_explanation(&fe, &HashSet::from(["e"]), &"b", &"c").unwrap());
    }

    #[test]
    fn test_kind_names() {
        for kind in ExplanationKind::iter() {
            assert_eq!(kind, ExplanationKind::try_from(kind.as_ref()).unwrap());
        }
        assert_eq!(ExplanationKind::NSI, ExplanationKind::try_from("nsi").unwrap());
        assert!(ExplanationKind::try_from("XSI").is_err());
    }
}
