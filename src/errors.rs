use std::fmt;

use thiserror::Error;

/// Error when planning a build.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
    #[error(transparent)]
    ConfigurationConflict(#[from] ConfigurationConflict),
}

/// An identifier was rejected by the dependency oracle, either when
/// canonicalizing it or when looking up its prerequisites.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("invalid identifier {identifier:?}: {reason}")]
pub struct InvalidIdentifier {
    pub identifier: String,
    pub reason: String,
}

impl InvalidIdentifier {
    pub fn new(identifier: impl Into<String>, reason: impl fmt::Display) -> InvalidIdentifier {
        InvalidIdentifier {
            identifier: identifier.into(),
            reason: reason.to_string(),
        }
    }
}

/// Options that contradict each other or can not be resolved.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigurationConflict {
    #[error("{option} must not be empty")]
    EmptyGenerator { option: &'static str },
    #[error("{option} must not be empty")]
    EmptySuffix { option: &'static str },
    #[error("{option} {suffix:?} contains whitespace, ':' or '/'")]
    InvalidSuffix {
        option: &'static str,
        suffix: String,
    },
    #[error("{wdl_option} and {dtz_option} are both {suffix:?}, but wdl and dtz tables are both generated")]
    AmbiguousSuffix {
        wdl_option: &'static str,
        dtz_option: &'static str,
        suffix: String,
    },
    #[error("threads must be at least 1")]
    ZeroThreads,
}
