//! This module contains the main material used to define Quantitative Bipolar Argumentation Frameworks.

mod arguments;
pub use arguments::Argument;
pub use arguments::ArgumentSet;
pub use arguments::LabelType;

mod framework_config;
pub use framework_config::FrameworkConfig;

mod qbaf_framework;
pub use qbaf_framework::QBAFramework;

mod relations;
pub use relations::RelationIndex;

mod semantics;
pub use semantics::euler_based_influence;
pub use semantics::linear_influence;
pub use semantics::p_max_influence;
pub use semantics::product_aggregation;
pub use semantics::simple_influence;
pub use semantics::sum_aggregation;
pub use semantics::top_aggregation;
pub use semantics::AggregationFunction;
pub use semantics::BuiltinSemantics;
pub use semantics::CustomSemantics;
pub use semantics::InfluenceFunction;
pub use semantics::Semantics;
pub use semantics::StrengthSemantics;
