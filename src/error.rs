use thiserror::Error;

/// The kinds of failures raised by the library.
///
/// Fallible functions return [`anyhow::Result`]; when the failure comes from the library itself,
/// the root cause of the error is a `QbafError` that can be recovered with [`anyhow::Error::downcast_ref`].
///
/// # Example
///
/// ```
/// # use quabaf::{QBAFramework, QbafError};
/// let framework = QBAFramework::new(&["a"], &[1.0], &[], &[]).unwrap();
/// let err = framework.final_strength(&"b").unwrap_err();
/// assert!(matches!(err.downcast_ref::<QbafError>(), Some(QbafError::NotFound { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QbafError {
    /// A value of the wrong kind was provided (NaN strength, set of arguments outside the frameworks, ...).
    #[error("type error: {0}")]
    TypeValue(String),
    /// A value was provided that breaks an invariant of the frameworks.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// An argument is missing from a framework.
    #[error(r#"no such argument "{argument}" in {framework}"#)]
    NotFound {
        /// the missing argument
        argument: String,
        /// the framework in which the argument was looked for
        framework: String,
    },
    /// Final strengths were requested on a framework with a cycle.
    #[error("final strengths are not defined for cyclic frameworks")]
    Cyclic,
    /// A read-only relation set was mutated.
    #[error("permission denied: {0}")]
    Permission(String),
    /// The requested operation makes no sense for the provided arguments.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl QbafError {
    pub(crate) fn not_found<T: std::fmt::Display>(argument: &T, framework: &str) -> Self {
        QbafError::NotFound {
            argument: argument.to_string(),
            framework: framework.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_downcast_through_context() {
        let res: anyhow::Result<()> =
            Err(QbafError::Cyclic).context("while computing final strengths");
        let err = res.unwrap_err();
        assert_eq!(Some(&QbafError::Cyclic), err.downcast_ref::<QbafError>());
    }

    #[test]
    fn test_not_found_message() {
        let err = QbafError::not_found(&"d", "the other framework");
        assert_eq!(
            r#"no such argument "d" in the other framework"#,
            err.to_string()
        );
    }
}
