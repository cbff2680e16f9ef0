mod common;

use quabaf::contributions::{
    gradient_contribution, intrinsic_removal_contribution, removal_contribution,
    shapley_contribution, shapley_contribution_with_partition, Contributor,
};
use quabaf::{BuiltinSemantics, FrameworkConfig, QBAFramework, QbafError};

fn framework() -> QBAFramework<&'static str> {
    QBAFramework::new(&["a", "b", "c"], &[2., 1., 1.], &[("b", "a")], &[("c", "b")]).unwrap()
}

#[test]
fn test_removal() {
    common::init_logger();
    let f = framework();
    assert_eq!(-2., removal_contribution(&f, &"a", &Contributor::Single("b")).unwrap());
    assert_eq!(-1., removal_contribution(&f, &"a", &Contributor::Single("c")).unwrap());
    assert_eq!(0., removal_contribution(&f, &"b", &Contributor::Single("a")).unwrap());
}

#[test]
fn test_intrinsic_removal() {
    common::init_logger();
    let f = framework();
    assert_eq!(-1., intrinsic_removal_contribution(&f, &"a", &Contributor::Single("b")).unwrap());
    assert_eq!(-1., intrinsic_removal_contribution(&f, &"a", &Contributor::Single("c")).unwrap());
    assert_eq!(0., intrinsic_removal_contribution(&f, &"b", &Contributor::Single("a")).unwrap());
}

#[test]
fn test_shapley() {
    common::init_logger();
    let mut f = framework();
    let expected = [("a", "b", -1.5), ("a", "c", -0.5), ("b", "a", 0.)];
    for (topic, contributor, value) in expected {
        common::assert_close(value, shapley_contribution(&f, &topic, &Contributor::Single(contributor)).unwrap(), 1e-12);
    }
    f.add_argument("d", 0.).unwrap();
    for (topic, contributor, value) in expected {
        common::assert_close(value, shapley_contribution(&f, &topic, &Contributor::Single(contributor)).unwrap(), 1e-12);
    }
    let partition = vec![vec!["b"], vec!["c", "d"]];
    common::assert_close(
        -1.5,
        shapley_contribution_with_partition(&f, &"a", &Contributor::Single("b"), &partition).unwrap(),
        1e-12,
    );
}

#[test]
fn test_gradient() {
    common::init_logger();
    let f = framework();
    common::assert_close(-1., gradient_contribution(&f, &"a", &"b").unwrap(), 1e-6);
    common::assert_close(-1., gradient_contribution(&f, &"a", &"c").unwrap(), 1e-6);
    let f = QBAFramework::new_with_config(
        &["a", "b", "c", "d", "e"],
        &[0.5, 0., 0., 0., 0.5],
        &[("b", "e"), ("c", "e")],
        &[("a", "b"), ("a", "c"), ("a", "d"), ("d", "e")],
        FrameworkConfig::default().with_semantics(BuiltinSemantics::Dfquad),
    )
    .unwrap();
    common::assert_close(0., gradient_contribution(&f, &"e", &"a").unwrap(), 1e-7);
}

#[test]
fn test_contribution_errors() {
    common::init_logger();
    let f = framework();
    let err = removal_contribution(&f, &"a", &Contributor::Single("a")).unwrap_err();
    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::InvalidOperation(_))));
    let err = shapley_contribution(&f, &"a", &Contributor::Set(vec!["b", "a"])).unwrap_err();
    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::InvalidOperation(_))));
    let err = gradient_contribution(&f, &"z", &"a").unwrap_err();
    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::NotFound { .. })));
    let err = intrinsic_removal_contribution(&f, &"a", &Contributor::Single("z")).unwrap_err();
    assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::NotFound { .. })));
}
