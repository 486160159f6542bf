// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sample values and the types they stand for.
//!
//! The builder takes a field's type from a sample value rather than from an
//! explicit declaration. Anything implementing [`Sample`] can be passed.

use crate::dynamic_struct::DynamicStruct;
use crate::type_descriptor::{FieldDescriptor, PrimitiveKind, TypeDescriptor};
use crate::value::DynamicValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Sample string value.
pub const SAMPLE_STRING: &str = "";
/// Sample int value.
pub const SAMPLE_INT: i64 = 1;
/// Sample byte value.
pub const SAMPLE_BYTE: u8 = 1;
/// Sample float32 value.
pub const SAMPLE_FLOAT32: f32 = 1.1;
/// Sample float64 value.
pub const SAMPLE_FLOAT64: f64 = 1.1;
/// Sample bool value.
pub const SAMPLE_BOOL: bool = false;

/// A value whose runtime type can be extracted.
pub trait Sample {
    /// The type of this sample, or `None` when it cannot be determined
    /// (an untyped nil).
    fn sample_type(&self) -> Option<Arc<TypeDescriptor>>;
}

macro_rules! impl_sample_primitive {
    ($ty:ty, $kind:ident) => {
        impl Sample for $ty {
            fn sample_type(&self) -> Option<Arc<TypeDescriptor>> {
                Some(Arc::new(TypeDescriptor::scalar(PrimitiveKind::$kind)))
            }
        }
    };
}

impl_sample_primitive!(bool, Bool);
impl_sample_primitive!(u8, U8);
impl_sample_primitive!(u16, U16);
impl_sample_primitive!(u32, U32);
impl_sample_primitive!(u64, U64);
impl_sample_primitive!(i8, I8);
impl_sample_primitive!(i16, I16);
impl_sample_primitive!(i32, I32);
impl_sample_primitive!(i64, I64);
impl_sample_primitive!(f32, F32);
impl_sample_primitive!(f64, F64);
impl_sample_primitive!(char, Char);
impl_sample_primitive!(String, String);
impl_sample_primitive!(str, String);

impl<T: Sample + ?Sized> Sample for &T {
    fn sample_type(&self) -> Option<Arc<TypeDescriptor>> {
        (**self).sample_type()
    }
}

impl<T: Sample + Default> Sample for Vec<T> {
    fn sample_type(&self) -> Option<Arc<TypeDescriptor>> {
        let element = T::default().sample_type()?;
        Some(Arc::new(TypeDescriptor::sequence_of(element)))
    }
}

impl<K: Sample + Default, V: Sample + Default, S> Sample for HashMap<K, V, S> {
    fn sample_type(&self) -> Option<Arc<TypeDescriptor>> {
        let key = K::default().sample_type()?;
        let value = V::default().sample_type()?;
        Some(Arc::new(TypeDescriptor::map_of(key, value)))
    }
}

impl Sample for TypeDescriptor {
    fn sample_type(&self) -> Option<Arc<TypeDescriptor>> {
        Some(Arc::new(self.clone()))
    }
}

impl Sample for Arc<TypeDescriptor> {
    fn sample_type(&self) -> Option<Arc<TypeDescriptor>> {
        Some(self.clone())
    }
}

impl Sample for DynamicStruct {
    fn sample_type(&self) -> Option<Arc<TypeDescriptor>> {
        Some(self.type_descriptor())
    }
}

impl Sample for DynamicValue {
    /// Composite values are typed from their first element; empty
    /// composites and `Null` have no determinable type on their own.
    ///
    /// Inside a `Struct` a zeroed field still has a type: `Null` is `any`,
    /// an empty sequence is `seq<any>` and an empty map is `map<any, any>`.
    /// A zero-initialized instance's value is therefore always a record
    /// sample.
    fn sample_type(&self) -> Option<Arc<TypeDescriptor>> {
        let kind = match self {
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::Char(_) => PrimitiveKind::Char,
            Self::String(_) => PrimitiveKind::String,
            Self::Map(entries) => {
                let (key, value) = entries.first()?;
                return Some(Arc::new(TypeDescriptor::map_of(
                    key.sample_type()?,
                    value.sample_type()?,
                )));
            }
            Self::Sequence(items) => {
                let element = items.first()?.sample_type()?;
                return Some(Arc::new(TypeDescriptor::sequence_of(element)));
            }
            Self::Struct(fields) => return Some(record_type(fields)),
            Self::Ref(inner) => {
                return Some(Arc::new(TypeDescriptor::pointer_to(inner.sample_type()?)));
            }
            Self::Null => return None,
        };
        Some(Arc::new(TypeDescriptor::scalar(kind)))
    }
}

/// Anonymous record type of a struct value, fields sorted by name.
fn record_type(fields: &HashMap<String, DynamicValue>) -> Arc<TypeDescriptor> {
    let mut entries: Vec<(&String, &DynamicValue)> = fields.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let descriptors = entries
        .into_iter()
        .map(|(name, value)| FieldDescriptor::new(name.clone(), field_type(value)))
        .collect();
    Arc::new(TypeDescriptor::struct_of("", descriptors))
}

/// Type of a record field's value; anything undeterminable falls back to `any`.
fn field_type(value: &DynamicValue) -> Arc<TypeDescriptor> {
    let erased = || Arc::new(TypeDescriptor::erased());
    match value {
        DynamicValue::Sequence(items) if items.is_empty() => {
            Arc::new(TypeDescriptor::sequence_of(erased()))
        }
        DynamicValue::Map(entries) if entries.is_empty() => {
            Arc::new(TypeDescriptor::map_of(erased(), erased()))
        }
        DynamicValue::Struct(fields) => record_type(fields),
        DynamicValue::Ref(inner) => Arc::new(TypeDescriptor::pointer_to(field_type(inner))),
        other => other.sample_type().unwrap_or_else(erased),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_descriptor::TypeKind;

    #[test]
    fn test_primitive_samples() {
        assert_eq!(
            SAMPLE_INT.sample_type().map(|t| t.kind.clone()),
            Some(TypeKind::Primitive(PrimitiveKind::I64))
        );
        assert_eq!(
            SAMPLE_STRING.sample_type().map(|t| t.to_string()),
            Some("string".to_string())
        );
        assert_eq!(
            SAMPLE_BYTE.sample_type().map(|t| t.to_string()),
            Some("uint8".to_string())
        );
    }

    #[test]
    fn test_container_samples() {
        let seq: Vec<f32> = Vec::new();
        assert_eq!(
            seq.sample_type().map(|t| t.to_string()),
            Some("seq<float32>".to_string())
        );

        let map: HashMap<String, bool> = HashMap::new();
        assert_eq!(
            map.sample_type().map(|t| t.to_string()),
            Some("map<string, bool>".to_string())
        );
    }

    #[test]
    fn test_dynamic_value_samples() {
        assert!(DynamicValue::Null.sample_type().is_none());
        assert!(DynamicValue::Sequence(Vec::new()).sample_type().is_none());

        let seq = DynamicValue::from(vec![1i64, 2, 3]);
        assert_eq!(
            seq.sample_type().map(|t| t.to_string()),
            Some("seq<int64>".to_string())
        );

        let by_ref = DynamicValue::Ref(Box::new(DynamicValue::from(true)));
        assert_eq!(
            by_ref.sample_type().map(|t| t.to_string()),
            Some("*bool".to_string())
        );

        let record: DynamicValue = vec![("b".to_string(), 1u8), ("a".to_string(), 2u8)]
            .into_iter()
            .collect();
        let record_type = record.sample_type().expect("struct type");
        let names: Vec<_> = record_type
            .fields()
            .map(|f| f.iter().map(|f| f.name.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_zeroed_record_fields_are_typed() {
        let record = DynamicValue::Struct(
            [
                ("n".to_string(), DynamicValue::I64(0)),
                ("xs".to_string(), DynamicValue::Sequence(Vec::new())),
                ("labels".to_string(), DynamicValue::Map(Vec::new())),
                ("callback".to_string(), DynamicValue::Null),
            ]
            .into_iter()
            .collect(),
        );
        let record_type = record.sample_type().expect("record type");
        let rendered: Vec<String> = record_type
            .fields()
            .map(|f| f.iter().map(|f| format!("{}: {}", f.name, f.type_desc)).collect())
            .unwrap_or_default();
        assert_eq!(
            rendered,
            vec!["callback: any", "labels: map<any, any>", "n: int64", "xs: seq<any>"]
        );
    }
}
