// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field access over arbitrary objects.
//!
//! The [`Navigator`](crate::Navigator) only ever talks to an [`Accessor`]: it
//! asks whether a field exists, reads it, and wraps nested values into new
//! accessors as it descends. [`ValueAccessor`] is the implementation for
//! [`DynamicValue`] object graphs.

use crate::dynamic_struct::DynamicStruct;
use crate::error::AccessError;
use crate::value::DynamicValue;
use std::collections::HashMap;

/// Named-field access over one object.
pub trait Accessor: Sized {
    /// Value type returned for fields.
    type Value;

    /// Wrap a value so its fields can be accessed.
    ///
    /// Fails when the value has no named fields (a scalar, a sequence, nil).
    fn wrap(value: Self::Value) -> Result<Self, AccessError>;

    /// Whether the object has a field named `name`.
    fn has(&self, name: &str) -> bool;

    /// Value of the field named `name`, if present.
    fn get(&self, name: &str) -> Option<Self::Value>;
}

/// [`Accessor`] over a [`DynamicValue::Struct`], looking through references.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAccessor {
    fields: HashMap<String, DynamicValue>,
}

impl ValueAccessor {
    /// Accessor over a built instance.
    pub fn from_instance(instance: &DynamicStruct) -> Result<Self, AccessError> {
        Self::wrap(instance.value().clone())
    }

    /// Number of accessible fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Accessor for ValueAccessor {
    type Value = DynamicValue;

    fn wrap(value: DynamicValue) -> Result<Self, AccessError> {
        match value {
            DynamicValue::Struct(fields) => Ok(Self { fields }),
            DynamicValue::Ref(inner) => Self::wrap(*inner),
            DynamicValue::Null => Err(AccessError::Nil),
            other => Err(AccessError::NotNavigable {
                found: other.kind_name().to_string(),
            }),
        }
    }

    fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<DynamicValue> {
        self.fields.get(name).cloned()
    }
}

impl TryFrom<DynamicValue> for ValueAccessor {
    type Error = AccessError;

    fn try_from(value: DynamicValue) -> Result<Self, Self::Error> {
        Self::wrap(value)
    }
}
