use super::semantics::{
    AggregationFunction, BuiltinSemantics, CustomSemantics, InfluenceFunction, Semantics,
};
use crate::QbafError;
use anyhow::Result;
use std::fmt::Debug;

/// The options used to build a [`QBAFramework`](crate::QBAFramework).
///
/// The semantics is given either by its name or by a complete set of custom functions and bounds, not both.
/// If none is given, the basic model is used.
///
/// # Example
///
/// ```
/// # use quabaf::{BuiltinSemantics, FrameworkConfig, QBAFramework};
/// let config = FrameworkConfig::default()
///     .with_semantics(BuiltinSemantics::Dfquad)
///     .with_disjoint_relations(false);
/// let framework = QBAFramework::new_with_config(
///     &["a", "b"],
///     &[0.5, 0.5],
///     &[("a", "b")],
///     &[("a", "b")],
///     config,
/// )
/// .unwrap();
/// assert_eq!(0.5, framework.final_strength(&"b").unwrap());
/// ```
#[derive(Clone)]
pub struct FrameworkConfig {
    disjoint_relations: bool,
    semantics: Option<BuiltinSemantics>,
    aggregation_function: Option<AggregationFunction>,
    influence_function: Option<InfluenceFunction>,
    min_strength: Option<f64>,
    max_strength: Option<f64>,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            disjoint_relations: true,
            semantics: None,
            aggregation_function: None,
            influence_function: None,
            min_strength: None,
            max_strength: None,
        }
    }
}

impl Debug for FrameworkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameworkConfig")
            .field("disjoint_relations", &self.disjoint_relations)
            .field("semantics", &self.semantics)
            .field("aggregation_function", &self.aggregation_function.is_some())
            .field("influence_function", &self.influence_function.is_some())
            .field("min_strength", &self.min_strength)
            .field("max_strength", &self.max_strength)
            .finish()
    }
}

impl FrameworkConfig {
    /// Sets whether attacks and supports must be disjoint (default is `true`).
    pub fn with_disjoint_relations(mut self, disjoint_relations: bool) -> Self {
        self.disjoint_relations = disjoint_relations;
        self
    }

    /// Sets the built-in semantics to use.
    pub fn with_semantics(mut self, semantics: BuiltinSemantics) -> Self {
        self.semantics = Some(semantics);
        self
    }

    /// Sets the aggregation function of a custom semantics.
    pub fn with_aggregation_function(mut self, f: AggregationFunction) -> Self {
        self.aggregation_function = Some(f);
        self
    }

    /// Sets the influence function of a custom semantics.
    pub fn with_influence_function(mut self, f: InfluenceFunction) -> Self {
        self.influence_function = Some(f);
        self
    }

    /// Sets the minimal strength of a custom semantics.
    pub fn with_min_strength(mut self, min_strength: f64) -> Self {
        self.min_strength = Some(min_strength);
        self
    }

    /// Sets the maximal strength of a custom semantics.
    pub fn with_max_strength(mut self, max_strength: f64) -> Self {
        self.max_strength = Some(max_strength);
        self
    }

    /// Returns whether attacks and supports must be disjoint.
    pub fn disjoint_relations(&self) -> bool {
        self.disjoint_relations
    }

    /// Checks the semantics options and returns the semantics they describe.
    pub fn resolve_semantics(&self) -> Result<Semantics> {
        let custom_parts = [
            self.aggregation_function.is_some(),
            self.influence_function.is_some(),
            self.min_strength.is_some(),
            self.max_strength.is_some(),
        ];
        if let Some(semantics) = self.semantics {
            if custom_parts.iter().any(|p| *p) {
                return Err(QbafError::InvalidValue(format!(
                    "the {} semantics cannot be combined with custom functions or bounds",
                    semantics
                ))
                .into());
            }
            return Ok(Semantics::Builtin(semantics));
        }
        match (
            &self.aggregation_function,
            &self.influence_function,
            self.min_strength,
            self.max_strength,
        ) {
            (None, None, None, None) => Ok(Semantics::default()),
            (Some(aggregation), Some(influence), Some(min), Some(max)) => Ok(Semantics::Custom(
                CustomSemantics::new(aggregation.clone(), influence.clone(), min, max)?,
            )),
            _ => Err(QbafError::InvalidValue(
                "a custom semantics requires an aggregation function, an influence function, a minimal and a maximal strength"
                    .to_string(),
            )
            .into()),
        }
    }
}
