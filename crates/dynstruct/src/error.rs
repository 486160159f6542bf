// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types.

use thiserror::Error;

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Find(#[from] FindError),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A field spec could not be realized into a type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("cannot assemble {kind} field '{field}': {reason}")]
    TypeAssembly {
        field: String,
        kind: &'static str,
        reason: String,
    },
}

impl BuildError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::TypeAssembly { field, .. } => field,
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("path separator must not be empty")]
    EmptySeparator,
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// A value could not be wrapped in an accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("value is nil")]
    Nil,
    #[error("value of kind {found} has no fields")]
    NotNavigable { found: String },
}

/// A navigation step or leaf lookup failed. `key` is the path the error is
/// recorded under.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("field name {name} does not exist (key: {key})")]
    MissingField { key: String, name: String },
    #[error("error in name: {name}, key: {key}: {source}")]
    NotNavigable {
        key: String,
        name: String,
        #[source]
        source: AccessError,
    },
}

impl NavigationError {
    /// Path key the error was recorded under.
    pub fn key(&self) -> &str {
        match self {
            Self::MissingField { key, .. } | Self::NotNavigable { key, .. } => key,
        }
    }
}

/// Aggregate of every navigation error recorded in a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.errors))]
pub struct FindError {
    pub errors: Vec<NavigationError>,
}

impl FindError {
    /// Whether any recorded error is tagged with `key`.
    pub fn references(&self, key: &str) -> bool {
        self.errors.iter().any(|e| e.key() == key)
    }
}

pub(crate) fn join_messages(errors: &[NavigationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_display() {
        let err = BuildError::TypeAssembly {
            field: "lookup".into(),
            kind: "map",
            reason: "key type seq<int64> is not comparable".into(),
        };
        assert_eq!(err.field(), "lookup");
        assert_eq!(
            err.to_string(),
            "cannot assemble map field 'lookup': key type seq<int64> is not comparable"
        );
    }

    #[test]
    fn test_find_error_joins_messages() {
        let err = FindError {
            errors: vec![
                NavigationError::MissingField {
                    key: "a.x".into(),
                    name: "x".into(),
                },
                NavigationError::NotNavigable {
                    key: "b".into(),
                    name: "b".into(),
                    source: AccessError::Nil,
                },
            ],
        };
        assert!(err.references("a.x"));
        assert!(!err.references("a"));
        assert_eq!(
            err.to_string(),
            "field name x does not exist (key: a.x)\nerror in name: b, key: b: value is nil"
        );
    }

    #[test]
    fn test_crate_error_from() {
        let err: Error = ConfigError::EmptySeparator.into();
        assert!(matches!(err, Error::Config(ConfigError::EmptySeparator)));
        assert_eq!(err.to_string(), "path separator must not be empty");
    }
}
