//! Explanations of the strength inconsistencies between two frameworks.
//!
//! Two frameworks are strength consistent on two arguments if they order their final strengths in the same way.
//! This module provides the comparison of frameworks, the reversal of a framework toward another one,
//! and the computation of the sets of arguments explaining an inconsistency.

mod consistency;
pub(crate) use consistency::check_contains_all;

mod explanation_kind;
pub use explanation_kind::ExplanationKind;

mod minimal_explanations_computer;
