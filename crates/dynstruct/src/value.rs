// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic value types.

use crate::type_descriptor::{PrimitiveKind, TypeDescriptor, TypeKind};
use std::collections::HashMap;

/// A dynamic value that can hold any value of a runtime-assembled type.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),

    // Composites
    Map(Vec<(DynamicValue, DynamicValue)>),
    Struct(HashMap<String, DynamicValue>),
    Sequence(Vec<DynamicValue>),
    Ref(Box<DynamicValue>),

    // Nil func, chan, interface or pointer.
    Null,
}

impl DynamicValue {
    /// Zero value of a type.
    ///
    /// Structs are zeroed field by field; funcs, chans, interfaces and
    /// pointers are `Null`.
    pub fn zero(desc: &TypeDescriptor) -> Self {
        match &desc.kind {
            TypeKind::Primitive(p) => Self::zero_primitive(*p),
            TypeKind::Struct(fields) => {
                let mut map = HashMap::with_capacity(fields.len());
                for field in fields {
                    map.insert(field.name.clone(), Self::zero(&field.type_desc));
                }
                Self::Struct(map)
            }
            TypeKind::Map(_) => Self::Map(Vec::new()),
            TypeKind::Sequence(_) => Self::Sequence(Vec::new()),
            TypeKind::Func(_) | TypeKind::Chan(_) | TypeKind::Interface | TypeKind::Pointer(_) => {
                Self::Null
            }
        }
    }

    fn zero_primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Bool => Self::Bool(false),
            PrimitiveKind::U8 => Self::U8(0),
            PrimitiveKind::U16 => Self::U16(0),
            PrimitiveKind::U32 => Self::U32(0),
            PrimitiveKind::U64 => Self::U64(0),
            PrimitiveKind::I8 => Self::I8(0),
            PrimitiveKind::I16 => Self::I16(0),
            PrimitiveKind::I32 => Self::I32(0),
            PrimitiveKind::I64 => Self::I64(0),
            PrimitiveKind::F32 => Self::F32(0.0),
            PrimitiveKind::F64 => Self::F64(0.0),
            PrimitiveKind::Char => Self::Char('\0'),
            PrimitiveKind::String => Self::String(String::new()),
        }
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::U32(_) => "uint32",
            Self::U64(_) => "uint64",
            Self::I8(_) => "int8",
            Self::I16(_) => "int16",
            Self::I32(_) => "int32",
            Self::I64(_) => "int64",
            Self::F32(_) => "float32",
            Self::F64(_) => "float64",
            Self::Char(_) => "char",
            Self::String(_) => "string",
            Self::Map(_) => "map",
            Self::Struct(_) => "struct",
            Self::Sequence(_) => "sequence",
            Self::Ref(_) => "pointer",
            Self::Null => "nil",
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u8.
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::U8(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::F32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as sequence.
    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Follow references until a non-reference value.
    pub fn deref(&self) -> &DynamicValue {
        let mut current = self;
        while let Self::Ref(inner) = current {
            current = inner;
        }
        current
    }

    /// Try to get struct field, looking through references.
    pub fn get_field(&self, name: &str) -> Option<&DynamicValue> {
        match self.deref() {
            Self::Struct(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Try to get mutable struct field, looking through references.
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut DynamicValue> {
        match self {
            Self::Ref(inner) => inner.get_field_mut(name),
            Self::Struct(fields) => fields.get_mut(name),
            _ => None,
        }
    }

    /// Set struct field. Returns `false` if this is not a struct.
    pub fn set_field(&mut self, name: impl Into<String>, value: DynamicValue) -> bool {
        match self {
            Self::Ref(inner) => inner.set_field(name, value),
            Self::Struct(fields) => {
                fields.insert(name.into(), value);
                true
            }
            _ => false,
        }
    }
}

// Conversion traits
macro_rules! impl_from_primitive {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for DynamicValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from_primitive!(bool, Bool);
impl_from_primitive!(u8, U8);
impl_from_primitive!(u16, U16);
impl_from_primitive!(u32, U32);
impl_from_primitive!(u64, U64);
impl_from_primitive!(i8, I8);
impl_from_primitive!(i16, I16);
impl_from_primitive!(i32, I32);
impl_from_primitive!(i64, I64);
impl_from_primitive!(f32, F32);
impl_from_primitive!(f64, F64);
impl_from_primitive!(char, Char);
impl_from_primitive!(String, String);

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<DynamicValue>> FromIterator<(String, V)> for DynamicValue {
    /// Collects named values into a `Struct`.
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self::Struct(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}
