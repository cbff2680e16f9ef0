mod common;

use quabaf::qbaf::{simple_influence, sum_aggregation};
use quabaf::{BuiltinSemantics, FrameworkConfig, QBAFramework, QbafError};
use std::collections::HashMap;
use std::rc::Rc;
use strum::IntoEnumIterator;

fn triangle() -> QBAFramework<&'static str> {
    QBAFramework::new(&["a", "b", "c"], &[1., 1., 5.], &[("a", "c")], &[("a", "b")]).unwrap()
}

fn with_semantics(semantics: BuiltinSemantics) -> QBAFramework<&'static str> {
    QBAFramework::new_with_config(
        &["a", "b", "c", "d"],
        &[0.1, 0.1, 0.5, 0.3],
        &[("a", "c"), ("d", "c")],
        &[("a", "b")],
        FrameworkConfig::default().with_semantics(semantics),
    )
    .unwrap()
}

#[test]
fn test_basic_model_scenario() {
    common::init_logger();
    let mut f = triangle();
    assert_eq!(
        HashMap::from([("a", 1.), ("b", 2.), ("c", 4.)]),
        f.final_strengths().unwrap()
    );
    f.add_argument("e", 3.).unwrap();
    f.add_attack_relation(&"e", &"c").unwrap();
    assert_eq!(
        HashMap::from([("a", 1.), ("b", 2.), ("c", 1.), ("e", 3.)]),
        f.final_strengths().unwrap()
    );
    f.remove_attack_relation(&"e", &"c");
    f.remove_argument(&"e").unwrap();
    assert_eq!(triangle(), f);
    assert_eq!(4., f.final_strength(&"c").unwrap());
}

#[test]
fn test_builtin_semantics_differ() {
    common::init_logger();
    let strengths = BuiltinSemantics::iter()
        .map(|s| (s, with_semantics(s).final_strengths().unwrap()))
        .collect::<HashMap<_, _>>();
    assert_ne!(strengths[&BuiltinSemantics::Basic], strengths[&BuiltinSemantics::QuadraticEnergy]);
    assert_ne!(strengths[&BuiltinSemantics::SquaredDfquad], strengths[&BuiltinSemantics::Dfquad]);
    assert_ne!(strengths[&BuiltinSemantics::EulerBasedTop], strengths[&BuiltinSemantics::EulerBased]);
}

#[test]
fn test_builtin_semantics_names() {
    common::init_logger();
    for s in BuiltinSemantics::iter() {
        assert_eq!(Some(s), with_semantics(s).semantics_name());
        assert_eq!(s, BuiltinSemantics::try_from(s.as_ref()).unwrap());
    }
    let err = BuiltinSemantics::try_from("incorrect_model").unwrap_err();
    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::InvalidValue(_))));
}

#[test]
fn test_quadratic_energy_values() {
    common::init_logger();
    let f = QBAFramework::new_with_config(
        &["a", "b", "c", "d"],
        &[1., 2., 1., 1.],
        &[("c", "a"), ("d", "c")],
        &[("c", "b")],
        FrameworkConfig::default().with_semantics(BuiltinSemantics::QuadraticEnergy),
    )
    .unwrap();
    common::assert_close(0.5, f.final_strength(&"c").unwrap(), 1e-12);
    common::assert_close(0.8, f.final_strength(&"a").unwrap(), 1e-12);
    common::assert_close(1.8, f.final_strength(&"b").unwrap(), 1e-12);
}

#[test]
fn test_dfquad_stays_within_bounds() {
    common::init_logger();
    let f = with_semantics(BuiltinSemantics::Dfquad);
    assert_eq!(0., f.min_strength());
    assert_eq!(1., f.max_strength());
    for s in f.final_strengths().unwrap().values() {
        assert!((0. ..=1.).contains(s));
    }
    let err = QBAFramework::new_with_config(
        &["a"],
        &[1.5],
        &[],
        &[],
        FrameworkConfig::default().with_semantics(BuiltinSemantics::Dfquad),
    )
    .unwrap_err();
    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::InvalidValue(_))));
}

#[test]
fn test_custom_semantics() {
    common::init_logger();
    let config = || {
        FrameworkConfig::default()
            .with_aggregation_function(Rc::new(sum_aggregation))
            .with_influence_function(Rc::new(simple_influence))
            .with_min_strength(-10.)
            .with_max_strength(10.)
    };
    let custom = QBAFramework::new_with_config(&["a", "b", "c"], &[1., 1., 5.], &[("a", "c")], &[("a", "b")], config())
        .unwrap();
    assert_eq!(triangle().final_strengths().unwrap(), custom.final_strengths().unwrap());
    assert_eq!(None, custom.semantics_name());
    let inverted = QBAFramework::new_with_config(
        &["a", "b", "c"],
        &[1., 1., 5.],
        &[("a", "c")],
        &[("a", "b")],
        config().with_influence_function(Rc::new(|w: f64, s: f64| w - s)),
    )
    .unwrap();
    assert_ne!(triangle().final_strengths().unwrap(), inverted.final_strengths().unwrap());
    let err = QBAFramework::new_with_config(
        &["a"],
        &[1.],
        &[],
        &[],
        config().with_semantics(BuiltinSemantics::Basic),
    )
    .unwrap_err();
    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::InvalidValue(_))));
}

#[test]
fn test_cyclic_framework() {
    common::init_logger();
    let mut f = triangle();
    f.add_attack_relation(&"c", &"a").unwrap();
    assert!(!f.is_acyclic());
    let err = f.final_strength(&"b").unwrap_err();
    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::Cyclic)));
    f.remove_attack_relation(&"c", &"a");
    assert!(f.is_acyclic());
    assert_eq!(2., f.final_strength(&"b").unwrap());
}
