//! Miscellaneous components used in the library.

mod influence_computer;
pub(crate) use influence_computer::influencers_of;

mod restriction;
pub use restriction::restrict;

pub(crate) mod strength_computer;

/// The maximal number of elements among which subsets are enumerated.
pub(crate) const MAX_COMBINATION_ARGUMENTS: usize = 64;
