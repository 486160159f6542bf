// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Path navigation over nested objects.
//!
//! A [`Navigator`] session declares paths with [`Navigator::descend`] and leaf
//! fields with [`Navigator::find`], then materializes everything at once with
//! [`Navigator::to_map`]:
//!
//! ```rust
//! use dynstruct::{DynamicValue, Navigator, ValueAccessor};
//!
//! let c: DynamicValue = vec![("c".to_string(), 5i64)].into_iter().collect();
//! let b: DynamicValue = vec![("b".to_string(), c)].into_iter().collect();
//! let root: DynamicValue = vec![("a".to_string(), b)].into_iter().collect();
//!
//! let mut nav = Navigator::<ValueAccessor>::from_value(root).unwrap();
//! let found = nav.descend(["a", "b"]).find(["c"]).to_map().unwrap();
//! assert_eq!(found.get("a.b.c"), Some(&DynamicValue::I64(5)));
//! ```
//!
//! # Error handling
//!
//! Nothing fails eagerly. A segment that cannot be resolved, or a leaf that
//! does not exist, is recorded under its path key. Once any error is recorded
//! `descend` and `find` become no-ops and `to_map` keeps failing with the
//! aggregated error until [`Navigator::reset`].
//!
//! # Caching
//!
//! Each resolved path prefix keeps its accessor in an index arena for the
//! rest of the session, so descending into `a.b` and later `a.b.c` resolves
//! `a` and `a.b` once.
//!
//! Keys are plain separator-joined strings, so a field whose name contains
//! the separator shares its key with the nested path spelled the same way:
//! after `descend(["a", "b"])`, `descend(["a.b"])` reuses the cached `a.b`
//! accessor instead of resolving a field named `"a.b"`. Pick a separator that
//! no field name contains.

use crate::accessor::Accessor;
use crate::config::{NavigatorConfig, DEFAULT_SEPARATOR};
use crate::error::{join_messages, ConfigError, FindError, NavigationError};
use std::collections::HashMap;
use std::fmt;

/// Arena slot of the root accessor.
const ROOT_SLOT: usize = 0;

/// Key of a cached accessor: the root, or the separator-joined segments that
/// lead to it.
///
/// The root is a distinct variant, so no field name can collide with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKey {
    /// The session root.
    Root,
    /// Separator-joined segment names.
    Path(String),
}

impl PathKey {
    fn join(&self, segment: &str, separator: &str) -> Self {
        match self {
            Self::Root => Self::Path(segment.to_string()),
            Self::Path(path) => Self::Path(format!("{}{}{}", path, separator, segment)),
        }
    }

    /// Result-map key of `leaf` under this path.
    fn qualify(&self, leaf: &str, separator: &str) -> String {
        match self {
            Self::Root => leaf.to_string(),
            Self::Path(path) => format!("{}{}{}", path, separator, leaf),
        }
    }

    /// True for the root key.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "<root>"),
            Self::Path(path) => write!(f, "{}", path),
        }
    }
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    /// Positioned at the root, no errors.
    Root,
    /// Positioned below the root, no errors.
    Navigating,
    /// At least one error recorded; only `reset` leaves this state.
    Errored,
}

/// Navigation session over an [`Accessor`] root.
///
/// Single-threaded: every method that changes the session takes `&mut self`.
#[derive(Debug)]
pub struct Navigator<A: Accessor> {
    separator: String,
    /// Accessor arena; the root lives at [`ROOT_SLOT`] and survives resets.
    accessors: Vec<A>,
    slots: HashMap<PathKey, usize>,
    pending: HashMap<PathKey, Vec<String>>,
    errors: HashMap<String, Vec<NavigationError>>,
    current: PathKey,
}

impl<A: Accessor> Navigator<A> {
    /// Session with the default `"."` separator.
    pub fn new(root: A) -> Self {
        Self::from_parts(root, DEFAULT_SEPARATOR.to_string())
    }

    /// Session with a custom separator. Empty separators are rejected.
    pub fn with_separator(root: A, separator: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_config(root, &NavigatorConfig::new(separator))
    }

    /// Session using the separator from `config`, validated first.
    pub fn with_config(root: A, config: &NavigatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(root, config.separator.clone()))
    }

    /// Wrap `value` as the root and start a session with the default separator.
    pub fn from_value(value: A::Value) -> crate::Result<Self> {
        Ok(Self::new(A::wrap(value)?))
    }

    fn from_parts(root: A, separator: String) -> Self {
        let mut nav = Self {
            separator,
            accessors: vec![root],
            slots: HashMap::new(),
            pending: HashMap::new(),
            errors: HashMap::new(),
            current: PathKey::Root,
        };
        nav.reset();
        nav
    }

    /// Drop every cached accessor, pending leaf and error; keep only the root.
    pub fn reset(&mut self) -> &mut Self {
        self.accessors.truncate(ROOT_SLOT + 1);
        self.slots.clear();
        self.slots.insert(PathKey::Root, ROOT_SLOT);
        self.pending.clear();
        self.pending.insert(PathKey::Root, Vec::new());
        self.errors.clear();
        self.current = PathKey::Root;
        self
    }

    /// Walk from the root through `names`, caching an accessor per prefix, and
    /// make the last resolved prefix current.
    ///
    /// An empty `names` makes the root current. No-op once any error exists.
    pub fn descend<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.has_error() {
            return self;
        }

        self.current = PathKey::Root;
        for name in names {
            let name = name.as_ref();
            let next = self.current.join(name, &self.separator);

            if self.slots.contains_key(&next) {
                log::trace!("[navigator] reuse accessor for {}", next);
            } else {
                match self.resolve(name, &next) {
                    Ok(accessor) => {
                        log::trace!("[navigator] cache accessor for {}", next);
                        self.accessors.push(accessor);
                        self.slots.insert(next.clone(), self.accessors.len() - 1);
                    }
                    Err(err) => {
                        self.record(err);
                        break;
                    }
                }
            }

            self.pending.entry(next.clone()).or_default();
            self.current = next;
        }
        self
    }

    /// Queue leaf fields under the current path. Checked only by `to_map`.
    pub fn find<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.has_error() {
            return self;
        }

        self.pending
            .entry(self.current.clone())
            .or_default()
            .extend(names.into_iter().map(|n| n.as_ref().to_string()));
        self
    }

    /// Resolve every queued leaf into a flat map keyed by qualified path.
    ///
    /// Leaves under the root are keyed by their bare name. A missing leaf stops
    /// the remaining leaves of its path; other paths are still tried. Any error
    /// fails the whole call, and the errors stay recorded.
    pub fn to_map(&mut self) -> Result<HashMap<String, A::Value>, FindError> {
        if self.has_error() {
            return Err(self.failure());
        }

        let mut resolved = HashMap::new();
        let mut missing = Vec::new();
        for (key, leaves) in &self.pending {
            let Some(accessor) = self.accessor(key) else {
                continue;
            };
            for leaf in leaves {
                let qualified = key.qualify(leaf, &self.separator);
                let value = if accessor.has(leaf) {
                    accessor.get(leaf)
                } else {
                    None
                };
                match value {
                    Some(value) => {
                        resolved.insert(qualified, value);
                    }
                    None => {
                        missing.push(NavigationError::MissingField {
                            key: qualified,
                            name: leaf.clone(),
                        });
                        break;
                    }
                }
            }
        }

        for err in missing {
            self.record(err);
        }
        if self.has_error() {
            return Err(self.failure());
        }
        Ok(resolved)
    }

    /// True once any error is recorded.
    pub fn has_error(&self) -> bool {
        self.errors.values().any(|errs| !errs.is_empty())
    }

    /// Every recorded error message, one per line, in unspecified order.
    pub fn error_message(&self) -> String {
        join_messages(&self.failure().errors)
    }

    /// Every recorded error, in unspecified order.
    pub fn errors(&self) -> impl Iterator<Item = &NavigationError> {
        self.errors.values().flatten()
    }

    /// Errors recorded under `key`.
    pub fn errors_for(&self, key: &str) -> &[NavigationError] {
        self.errors.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Separator joining path segments.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Key reached by the last successful `descend`.
    pub fn current_key(&self) -> &PathKey {
        &self.current
    }

    /// Current session state.
    pub fn state(&self) -> NavigatorState {
        if self.has_error() {
            NavigatorState::Errored
        } else if self.current.is_root() {
            NavigatorState::Root
        } else {
            NavigatorState::Navigating
        }
    }

    fn accessor(&self, key: &PathKey) -> Option<&A> {
        self.slots.get(key).and_then(|&slot| self.accessors.get(slot))
    }

    /// Read `name` from the current accessor and wrap it.
    fn resolve(&self, name: &str, next: &PathKey) -> Result<A, NavigationError> {
        let key = next.to_string();
        let value = self
            .accessor(&self.current)
            .and_then(|parent| parent.get(name))
            .ok_or_else(|| NavigationError::MissingField {
                key: key.clone(),
                name: name.to_string(),
            })?;
        A::wrap(value).map_err(|source| NavigationError::NotNavigable {
            key,
            name: name.to_string(),
            source,
        })
    }

    fn record(&mut self, err: NavigationError) {
        log::debug!("[navigator] {}", err);
        self.errors.entry(err.key().to_string()).or_default().push(err);
    }

    fn failure(&self) -> FindError {
        FindError {
            errors: self.errors().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::ValueAccessor;
    use crate::error::AccessError;
    use crate::value::DynamicValue;

    fn record<V: Into<DynamicValue>>(fields: Vec<(&str, V)>) -> DynamicValue {
        fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// `{a: {b: {c: 5, d: "x"}, n: 1}, top: true}`
    fn sample_graph() -> DynamicValue {
        let b = DynamicValue::Struct(
            [
                ("c".to_string(), DynamicValue::I64(5)),
                ("d".to_string(), DynamicValue::from("x")),
            ]
            .into_iter()
            .collect(),
        );
        let a = DynamicValue::Struct(
            [
                ("b".to_string(), b),
                ("n".to_string(), DynamicValue::I64(1)),
            ]
            .into_iter()
            .collect(),
        );
        DynamicValue::Struct(
            [
                ("a".to_string(), a),
                ("top".to_string(), DynamicValue::Bool(true)),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn navigator() -> Navigator<ValueAccessor> {
        Navigator::from_value(sample_graph()).expect("root")
    }

    #[test]
    fn test_nested_lookup() {
        let mut nav = navigator();
        let found = nav.descend(["a", "b"]).find(["c"]).to_map().expect("map");
        assert_eq!(found.len(), 1);
        assert_eq!(found.get("a.b.c"), Some(&DynamicValue::I64(5)));
    }

    #[test]
    fn test_root_leaves_use_bare_names() {
        let mut nav = navigator();
        nav.find(["top"]).descend(["a"]).find(["n"]);
        let found = nav.to_map().expect("map");
        assert_eq!(found.get("top"), Some(&DynamicValue::Bool(true)));
        assert_eq!(found.get("a.n"), Some(&DynamicValue::I64(1)));
    }

    #[test]
    fn test_empty_descend_returns_to_root() {
        let mut nav = navigator();
        nav.descend(["a"]);
        assert_eq!(nav.state(), NavigatorState::Navigating);
        nav.descend(Vec::<String>::new()).find(["top"]);
        assert_eq!(nav.state(), NavigatorState::Root);
        assert!(nav.to_map().expect("map").contains_key("top"));
    }

    #[test]
    fn test_prefix_accessors_are_cached() {
        let mut nav = navigator();
        nav.descend(["a", "b"]);
        assert_eq!(nav.accessors.len(), 3);

        nav.descend(["a"]).descend(["a", "b"]);
        assert_eq!(nav.accessors.len(), 3);
        assert_eq!(nav.current_key(), &PathKey::Path("a.b".into()));
    }

    #[test]
    fn test_pending_leaves_survive_repeat_descend() {
        let mut nav = navigator();
        nav.descend(["a", "b"]).find(["c"]);
        nav.descend(["a"]).find(["n"]);
        nav.descend(["a", "b"]).find(["d"]);

        let found = nav.to_map().expect("map");
        assert_eq!(found.len(), 3);
        assert_eq!(found.get("a.b.d"), Some(&DynamicValue::from("x")));
    }

    #[test]
    fn test_unresolvable_segment_short_circuits() {
        let mut nav = navigator();
        nav.descend(["a", "n", "deeper"]);
        assert!(nav.has_error());
        assert_eq!(nav.state(), NavigatorState::Errored);
        assert_eq!(
            nav.errors_for("a.n"),
            &[NavigationError::NotNavigable {
                key: "a.n".into(),
                name: "n".into(),
                source: AccessError::NotNavigable {
                    found: "int64".into()
                },
            }]
        );
        // Processing stopped at the failing segment.
        assert!(nav.errors_for("a.n.deeper").is_empty());

        let cached = nav.accessors.len();
        nav.descend(["a", "b"]).find(["c"]);
        assert_eq!(nav.accessors.len(), cached);
        assert!(nav.pending.values().all(Vec::is_empty));

        let err = nav.to_map().expect_err("errored session");
        assert!(err.references("a.n"));
    }

    #[test]
    fn test_absent_segment_is_missing_field() {
        let mut nav = navigator();
        nav.descend(["nope"]);
        assert!(matches!(
            nav.errors_for("nope"),
            [NavigationError::MissingField { name, .. }] if name == "nope"
        ));
    }

    #[test]
    fn test_missing_leaf_stops_only_its_key() {
        let mut nav = navigator();
        nav.find(["top", "ghost"])
            .descend(["a"])
            .find(["n", "missing", "also_missing"]);

        let err = nav.to_map().expect_err("missing leaves");
        assert_eq!(err.errors.len(), 2);
        assert!(err.references("ghost"));
        assert!(err.references("a.missing"));
        assert!(!err.references("a.also_missing"));

        let again = nav.to_map().expect_err("still failing");
        assert_eq!(again.errors.len(), 2);
    }

    #[test]
    fn test_reset_recovers() {
        let mut nav = navigator();
        nav.descend(["zzz"]);
        assert!(nav.to_map().is_err());

        nav.reset();
        assert!(!nav.has_error());
        assert_eq!(nav.error_message(), "");
        let found = nav.descend(["a", "b"]).find(["c"]).to_map().expect("map");
        assert_eq!(found.get("a.b.c"), Some(&DynamicValue::I64(5)));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let fresh = navigator();

        let mut used = navigator();
        used.descend(["a", "b"]).find(["c", "x"]);
        let _ = used.to_map();
        used.reset();
        let once = (
            used.accessors.len(),
            used.slots.clone(),
            used.pending.clone(),
            used.errors.clone(),
            used.current.clone(),
        );
        used.reset();
        let twice = (
            used.accessors.len(),
            used.slots.clone(),
            used.pending.clone(),
            used.errors.clone(),
            used.current.clone(),
        );

        assert_eq!(once, twice);
        assert_eq!(once.0, fresh.accessors.len());
        assert_eq!(once.1, fresh.slots);
        assert_eq!(once.2, fresh.pending);
        assert_eq!(once.3, fresh.errors);
        assert_eq!(once.4, fresh.current);
    }

    #[test]
    fn test_custom_separator() {
        let mut nav =
            Navigator::with_separator(ValueAccessor::wrap(sample_graph()).expect("root"), "/")
                .expect("separator");
        assert_eq!(nav.separator(), "/");
        let found = nav.descend(["a", "b"]).find(["c"]).to_map().expect("map");
        assert!(found.contains_key("a/b/c"));
    }

    #[test]
    fn test_empty_separator_rejected() {
        let root = ValueAccessor::wrap(sample_graph()).expect("root");
        assert!(matches!(
            Navigator::with_separator(root, ""),
            Err(ConfigError::EmptySeparator)
        ));
    }

    #[test]
    fn test_from_value_rejects_scalars() {
        let err = Navigator::<ValueAccessor>::from_value(DynamicValue::I64(3)).expect_err("scalar");
        assert!(matches!(
            err,
            crate::Error::Access(AccessError::NotNavigable { .. })
        ));
    }

    #[test]
    fn test_field_named_like_root() {
        let root = record(vec![("!", record(vec![("v", 7i64)]))]);
        let mut nav = Navigator::<ValueAccessor>::from_value(root).expect("root");
        nav.find(["!"]).descend(["!"]).find(["v"]);

        let found = nav.to_map().expect("map");
        assert_eq!(found.get("!.v"), Some(&DynamicValue::I64(7)));
        assert!(found.get("!").is_some_and(|v| v.get_field("v").is_some()));
    }

    #[test]
    fn test_error_message_lists_everything() {
        let mut nav = navigator();
        nav.find(["ghost"]).descend(["a"]).find(["phantom"]);
        let _ = nav.to_map();

        let message = nav.error_message();
        assert_eq!(message.lines().count(), 2);
        assert!(message.contains("field name ghost does not exist"));
        assert!(message.contains("key: a.phantom"));
    }

    /// `{"a.b": {x: 1}, a: {b: {y: 2}}}`
    fn dotted_graph() -> DynamicValue {
        let nested = DynamicValue::Struct(
            [("b".to_string(), record(vec![("y", 2i64)]))]
                .into_iter()
                .collect(),
        );
        DynamicValue::Struct(
            [
                ("a.b".to_string(), record(vec![("x", 1i64)])),
                ("a".to_string(), nested),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn test_dotted_field_shares_key_with_nested_path() {
        let mut nav = Navigator::<ValueAccessor>::from_value(dotted_graph()).expect("root");
        nav.descend(["a", "b"]);
        nav.descend(["a.b"]).find(["x"]);

        // The cached `a` -> `b` accessor answers for the dotted field.
        let err = nav.to_map().expect_err("collision");
        assert!(err.references("a.b.x"));
    }

    #[test]
    fn test_dotted_field_reachable_with_other_separator() {
        let root = ValueAccessor::wrap(dotted_graph()).expect("root");
        let mut nav = Navigator::with_separator(root, "/").expect("separator");
        nav.descend(["a", "b"]).find(["y"]);
        nav.descend(["a.b"]).find(["x"]);
        let found = nav.to_map().expect("map");

        assert_eq!(found.get("a/b/y"), Some(&DynamicValue::I64(2)));
        assert_eq!(found.get("a.b/x"), Some(&DynamicValue::I64(1)));
    }
}
