use crate::QbafError;
use anyhow::{Context, Result};
use std::fmt::Debug;
use std::rc::Rc;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A function aggregating the final strengths of the attackers (first slice) and the supporters (second slice) of an argument.
pub type AggregationFunction = Rc<dyn Fn(&[f64], &[f64]) -> f64>;

/// A function combining the initial strength of an argument (first parameter) with the aggregation of its attackers and supporters.
pub type InfluenceFunction = Rc<dyn Fn(f64, f64) -> f64>;

/// The trait for the gradual semantics used to compute final strengths.
///
/// The final strength of an argument is `influence(initial, aggregate(attackers, supporters))`,
/// clamped into `[min_strength, max_strength]`.
///
/// The slices given to [`aggregate`](Self::aggregate) are sorted in increasing order,
/// so the result only depends on the multisets of strengths.
pub trait StrengthSemantics {
    /// Aggregates the final strengths of the attackers and the supporters of an argument.
    fn aggregate(&self, attacker_strengths: &[f64], supporter_strengths: &[f64]) -> f64;

    /// Combines the initial strength of an argument with the aggregate of its attackers and supporters.
    fn influence(&self, initial_strength: f64, aggregate: f64) -> f64;

    /// The lowest strength an argument may have.
    fn min_strength(&self) -> f64;

    /// The highest strength an argument may have.
    fn max_strength(&self) -> f64;

    /// Returns `true` iff the strength lies within the bounds of the semantics.
    fn is_within_bounds(&self, strength: f64) -> bool {
        strength >= self.min_strength() && strength <= self.max_strength()
    }
}

/// The built-in gradual semantics.
///
/// Each variant is associated with the name used to refer to it.
///
/// # Example
///
/// ```
/// # use quabaf::BuiltinSemantics;
/// let semantics = BuiltinSemantics::try_from("DFQuAD_model").unwrap();
/// assert_eq!(BuiltinSemantics::Dfquad, semantics);
/// assert_eq!("DFQuAD_model", semantics.to_string());
/// assert!(BuiltinSemantics::try_from("unknown_model").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
pub enum BuiltinSemantics {
    /// Sum aggregation, simple influence: `w - Σatt + Σsup`
    #[strum(serialize = "basic_model")]
    Basic,
    /// Sum aggregation, 2-Max(1) influence
    #[strum(serialize = "QuadraticEnergy_model")]
    QuadraticEnergy,
    /// Product aggregation, 1-Max(1) influence
    #[strum(serialize = "SquaredDFQuAD_model")]
    SquaredDfquad,
    /// Top aggregation, Euler-based influence
    #[strum(serialize = "EulerBasedTop_model")]
    EulerBasedTop,
    /// Sum aggregation, Euler-based influence
    #[strum(serialize = "EulerBased_model")]
    EulerBased,
    /// Product aggregation, linear(1) influence; strengths lie in `[0, 1]`
    #[strum(serialize = "DFQuAD_model")]
    Dfquad,
}

impl TryFrom<&str> for BuiltinSemantics {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        BuiltinSemantics::from_str(value)
            .map_err(|_| QbafError::InvalidValue(format!(r#"undefined semantics "{}""#, value)))
            .context("while reading a semantics name")
    }
}

impl StrengthSemantics for BuiltinSemantics {
    fn aggregate(&self, attacker_strengths: &[f64], supporter_strengths: &[f64]) -> f64 {
        match self {
            BuiltinSemantics::Basic
            | BuiltinSemantics::QuadraticEnergy
            | BuiltinSemantics::EulerBased => sum_aggregation(attacker_strengths, supporter_strengths),
            BuiltinSemantics::SquaredDfquad | BuiltinSemantics::Dfquad => {
                product_aggregation(attacker_strengths, supporter_strengths)
            }
            BuiltinSemantics::EulerBasedTop => top_aggregation(attacker_strengths, supporter_strengths),
        }
    }

    fn influence(&self, initial_strength: f64, aggregate: f64) -> f64 {
        match self {
            BuiltinSemantics::Basic => simple_influence(initial_strength, aggregate),
            BuiltinSemantics::QuadraticEnergy => p_max_influence(initial_strength, aggregate, 2, 1.),
            BuiltinSemantics::SquaredDfquad => p_max_influence(initial_strength, aggregate, 1, 1.),
            BuiltinSemantics::EulerBasedTop | BuiltinSemantics::EulerBased => {
                euler_based_influence(initial_strength, aggregate)
            }
            BuiltinSemantics::Dfquad => linear_influence(initial_strength, aggregate, 1.),
        }
    }

    fn min_strength(&self) -> f64 {
        match self {
            BuiltinSemantics::Dfquad => 0.,
            _ => f64::MIN,
        }
    }

    fn max_strength(&self) -> f64 {
        match self {
            BuiltinSemantics::Dfquad => 1.,
            _ => f64::MAX,
        }
    }
}

/// Sum of the supporters minus sum of the attackers.
pub fn sum_aggregation(attacker_strengths: &[f64], supporter_strengths: &[f64]) -> f64 {
    supporter_strengths.iter().sum::<f64>() - attacker_strengths.iter().sum::<f64>()
}

/// `Π(1 - att) - Π(1 - sup)`
pub fn product_aggregation(attacker_strengths: &[f64], supporter_strengths: &[f64]) -> f64 {
    let complement_product = |s: &[f64]| s.iter().map(|x| 1. - x).product::<f64>();
    complement_product(attacker_strengths) - complement_product(supporter_strengths)
}

/// Strongest supporter minus strongest attacker, both floored at zero.
pub fn top_aggregation(attacker_strengths: &[f64], supporter_strengths: &[f64]) -> f64 {
    let top = |s: &[f64]| s.iter().copied().fold(0., f64::max);
    top(supporter_strengths) - top(attacker_strengths)
}

/// `w + s`
pub fn simple_influence(initial_strength: f64, aggregate: f64) -> f64 {
    initial_strength + aggregate
}

/// Linear influence with a conservativeness parameter `k`.
pub fn linear_influence(initial_strength: f64, aggregate: f64, k: f64) -> f64 {
    initial_strength - initial_strength / k * f64::max(0., -aggregate)
        + (1. - initial_strength) / k * f64::max(0., aggregate)
}

/// The p-Max(k) influence.
pub fn p_max_influence(initial_strength: f64, aggregate: f64, p: i32, k: f64) -> f64 {
    let h = |x: f64| {
        let pos = f64::max(0., x).powi(p);
        pos / (1. + pos)
    };
    initial_strength - initial_strength * h(-aggregate / k)
        + (1. - initial_strength) * h(aggregate / k)
}

/// The Euler-based influence.
pub fn euler_based_influence(initial_strength: f64, aggregate: f64) -> f64 {
    1. - (1. - initial_strength * initial_strength)
        / (1. + initial_strength * aggregate.exp())
}

/// A semantics given by user-defined functions and bounds.
#[derive(Clone)]
pub struct CustomSemantics {
    aggregation_function: AggregationFunction,
    influence_function: InfluenceFunction,
    min_strength: f64,
    max_strength: f64,
}

impl CustomSemantics {
    /// Builds a custom semantics.
    ///
    /// An error is returned if a bound is NaN or if the lower bound is greater than the upper one.
    ///
    /// # Example
    ///
    /// ```
    /// # use quabaf::{CustomSemantics, StrengthSemantics};
    /// # use std::rc::Rc;
    /// let semantics = CustomSemantics::new(
    ///     Rc::new(|att: &[f64], sup: &[f64]| sup.len() as f64 - att.len() as f64),
    ///     Rc::new(|w: f64, s: f64| w + s / 2.),
    ///     -10.,
    ///     10.,
    /// )
    /// .unwrap();
    /// assert_eq!(1.5, semantics.influence(1., semantics.aggregate(&[], &[0.2])));
    /// ```
    pub fn new(
        aggregation_function: AggregationFunction,
        influence_function: InfluenceFunction,
        min_strength: f64,
        max_strength: f64,
    ) -> Result<Self> {
        if min_strength.is_nan() || max_strength.is_nan() {
            return Err(QbafError::TypeValue("strength bounds must be numbers".to_string()).into());
        }
        if min_strength > max_strength {
            return Err(QbafError::InvalidValue(format!(
                "the minimal strength ({}) is greater than the maximal one ({})",
                min_strength, max_strength
            ))
            .into());
        }
        Ok(Self {
            aggregation_function,
            influence_function,
            min_strength,
            max_strength,
        })
    }
}

impl Debug for CustomSemantics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomSemantics")
            .field("min_strength", &self.min_strength)
            .field("max_strength", &self.max_strength)
            .finish_non_exhaustive()
    }
}

impl StrengthSemantics for CustomSemantics {
    fn aggregate(&self, attacker_strengths: &[f64], supporter_strengths: &[f64]) -> f64 {
        (self.aggregation_function)(attacker_strengths, supporter_strengths)
    }

    fn influence(&self, initial_strength: f64, aggregate: f64) -> f64 {
        (self.influence_function)(initial_strength, aggregate)
    }

    fn min_strength(&self) -> f64 {
        self.min_strength
    }

    fn max_strength(&self) -> f64 {
        self.max_strength
    }
}

/// The semantics of a framework: either a built-in one or a custom one.
#[derive(Clone, Debug)]
pub enum Semantics {
    /// A built-in semantics
    Builtin(BuiltinSemantics),
    /// A user-defined semantics
    Custom(CustomSemantics),
}

impl Default for Semantics {
    fn default() -> Self {
        Semantics::Builtin(BuiltinSemantics::Basic)
    }
}

impl Semantics {
    /// Returns the built-in semantics, or `None` for custom ones.
    pub fn builtin(&self) -> Option<BuiltinSemantics> {
        match self {
            Semantics::Builtin(b) => Some(*b),
            Semantics::Custom(_) => None,
        }
    }
}

impl StrengthSemantics for Semantics {
    fn aggregate(&self, attacker_strengths: &[f64], supporter_strengths: &[f64]) -> f64 {
        match self {
            Semantics::Builtin(b) => b.aggregate(attacker_strengths, supporter_strengths),
            Semantics::Custom(c) => c.aggregate(attacker_strengths, supporter_strengths),
        }
    }

    fn influence(&self, initial_strength: f64, aggregate: f64) -> f64 {
        match self {
            Semantics::Builtin(b) => b.influence(initial_strength, aggregate),
            Semantics::Custom(c) => c.influence(initial_strength, aggregate),
        }
    }

    fn min_strength(&self) -> f64 {
        match self {
            Semantics::Builtin(b) => b.min_strength(),
            Semantics::Custom(c) => c.min_strength(),
        }
    }

    fn max_strength(&self) -> f64 {
        match self {
            Semantics::Builtin(b) => b.max_strength(),
            Semantics::Custom(c) => c.max_strength(),
        }
    }
}
