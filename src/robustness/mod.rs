//! Robustness checks over collections of frameworks.
//!
//! An initial framework is compared to each framework of a collection of possible updates.
//! The collections are given by the caller; the checks may be restricted to the updates
//! that are [expansions](is_expansion) or [bounded updates](is_bounded_update) of the initial framework.
//! All the checks hold vacuously on an empty collection.
//! The module also looks for the pockets of consistency, the sets of new arguments the collection may add
//! without breaking the consistency with the initial framework.
//!
//! # Example
//!
//! ```
//! # use quabaf::QBAFramework;
//! # use quabaf::robustness::{is_expansion, is_general_robust_inconsistent};
//! let initial = QBAFramework::new(&["a", "b", "c"], &[2., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap();
//! let mut update = initial.clone();
//! update.add_argument("e", 3.).unwrap();
//! update.add_attack_relation(&"e", &"c").unwrap();
//! assert!(is_expansion(&initial, &update));
//! assert!(is_general_robust_inconsistent(&initial, &[update], &"b", &"c").unwrap());
//! ```

mod contribution_robust_explanations;
pub use contribution_robust_explanations::is_contribution_robust_explanation;

mod pockets;
pub use pockets::explanations_of_updates;
pub use pockets::is_pocket;
pub use pockets::new_arguments;
pub use pockets::pockets_of_consistency;

mod robust_consistency;
pub use robust_consistency::is_bounded_update_robust_consistent;
pub use robust_consistency::is_bounded_update_robust_inconsistent;
pub use robust_consistency::is_expansion_robust_consistent;
pub use robust_consistency::is_expansion_robust_inconsistent;
pub use robust_consistency::is_general_robust_consistent;
pub use robust_consistency::is_general_robust_inconsistent;

mod robust_explanations;
pub use robust_explanations::is_bounded_update_robust_explanation;
pub use robust_explanations::is_expansion_robust_explanation;
pub use robust_explanations::is_general_robust_explanation;

mod updates;
pub use updates::is_bounded_update;
pub use updates::is_expansion;
