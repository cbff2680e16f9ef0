//! Quabaf is a reasoner for Quantitative Bipolar Argumentation Frameworks (QBAFs).
//!
//! A QBAF is a set of arguments with initial strengths, related by attacks and supports.
//! This library computes the final strengths of the arguments under gradual semantics,
//! compares the strengths of arguments in different frameworks, explains why two frameworks disagree
//! (sufficient, counterfactual and necessary strength inconsistency explanations),
//! measures the contribution of arguments to the strength of others and checks the robustness of these results.
//!
//! # Example
//!
//! ```
//! # use quabaf::QBAFramework;
//! # use std::collections::HashSet;
//! let initial = QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap();
//! let updated = QBAFramework::new(
//!     &["a", "b", "c", "e"],
//!     &[1., 1., 5., 3.],
//!     &[("a", "c"), ("e", "c")],
//!     &[("a", "b")],
//! )
//! .unwrap();
//! assert!(!updated.are_strength_consistent(&initial, &"b", &"c").unwrap());
//! let explanations = updated.minimal_csi_explanations(&initial, &"b", &"c").unwrap();
//! assert_eq!(vec![HashSet::from(["a", "e"])], explanations);
//! ```

#![warn(missing_docs)]

pub mod contributions;

mod error;
pub use error::QbafError;

pub mod explanations;
pub use explanations::ExplanationKind;

pub mod qbaf;
pub use qbaf::{
    Argument, ArgumentSet, BuiltinSemantics, CustomSemantics, FrameworkConfig, LabelType,
    QBAFramework, RelationIndex, Semantics, StrengthSemantics,
};

pub mod robustness;

pub mod utils;
pub use utils::restrict;
