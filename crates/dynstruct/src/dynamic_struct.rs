// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Instances produced by [`DynamicStructBuilder`](crate::DynamicStructBuilder).

use crate::type_descriptor::{FieldDescriptor, TypeDescriptor};
use crate::value::DynamicValue;
use std::fmt::Write as _;
use std::sync::Arc;

/// A zero-initialized instance of a runtime-assembled record type.
///
/// By-reference instances (from `build`) hold `Ref(Struct(..))` and report a
/// pointer-to-record descriptor; by-value instances (from `build_non_ptr`)
/// hold the `Struct` directly.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicStruct {
    record: Arc<TypeDescriptor>,
    by_ref: bool,
    value: DynamicValue,
}

impl DynamicStruct {
    pub(crate) fn new(record: Arc<TypeDescriptor>, by_ref: bool) -> Self {
        let zero = DynamicValue::zero(&record);
        let value = if by_ref {
            DynamicValue::Ref(Box::new(zero))
        } else {
            zero
        };
        Self {
            record,
            by_ref,
            value,
        }
    }

    /// Cosmetic type name.
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// The record type, without any reference wrapper.
    pub fn record_type(&self) -> &Arc<TypeDescriptor> {
        &self.record
    }

    /// Type of this instance: the record type, or a pointer to it.
    pub fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        if self.by_ref {
            Arc::new(TypeDescriptor::pointer_to(self.record.clone()))
        } else {
            self.record.clone()
        }
    }

    /// True when built by reference.
    pub fn is_ptr(&self) -> bool {
        self.by_ref
    }

    /// Number of fields.
    pub fn num_field(&self) -> usize {
        self.fields().len()
    }

    /// Fields in realized order (unspecified).
    pub fn fields(&self) -> &[FieldDescriptor] {
        self.record.fields().unwrap_or_default()
    }

    /// Field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.record.field(name)
    }

    /// Instance value, a `Ref` when built by reference.
    pub fn value(&self) -> &DynamicValue {
        &self.value
    }

    /// Mutable instance value.
    pub fn value_mut(&mut self) -> &mut DynamicValue {
        &mut self.value
    }

    /// Consume the instance, returning its value.
    pub fn into_value(self) -> DynamicValue {
        self.value
    }

    /// Human-readable definition of the record type, fields sorted by name.
    ///
    /// ```text
    /// struct DynamicStruct {
    ///     age: int64 `json:"age"`
    ///     name: string
    /// }
    /// ```
    pub fn definition(&self) -> String {
        let mut fields: Vec<&FieldDescriptor> = self.fields().iter().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = format!("struct {} {{\n", self.name());
        for field in fields {
            let _ = write!(out, "    {}: {}", field.name, field.type_desc);
            if !field.tag.is_empty() {
                let _ = write!(out, " `{}`", field.tag);
            }
            out.push('\n');
        }
        out.push('}');
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::DynamicStructBuilder;
    use crate::value::DynamicValue;

    #[test]
    fn test_by_ref_and_by_value() {
        let mut builder = DynamicStructBuilder::new();
        builder.add_int("n");

        let by_ref = builder.build().expect("build");
        assert!(by_ref.is_ptr());
        assert!(by_ref.type_descriptor().is_pointer());
        assert!(matches!(by_ref.value(), DynamicValue::Ref(_)));
        assert_eq!(by_ref.value().get_field("n"), Some(&DynamicValue::I64(0)));

        let by_value = builder.build_non_ptr().expect("build");
        assert!(!by_value.is_ptr());
        assert!(by_value.type_descriptor().is_struct());
        assert!(matches!(by_value.value(), DynamicValue::Struct(_)));
    }

    #[test]
    fn test_value_mut() {
        let mut builder = DynamicStructBuilder::new();
        builder.add_string("name");

        let mut instance = builder.build().expect("build");
        assert!(instance.value_mut().set_field("name", "ada".into()));
        assert_eq!(
            instance.value().get_field("name").and_then(DynamicValue::as_str),
            Some("ada")
        );
    }

    #[test]
    fn test_definition() {
        let mut builder = DynamicStructBuilder::new();
        builder
            .add_string("name")
            .add_int_with_tag("age", "json:\"age\"")
            .add_map("attrs", "", 0u8);

        let instance = builder.build_non_ptr().expect("build");
        assert_eq!(
            instance.definition(),
            "struct DynamicStruct {\n    age: int64 `json:\"age\"`\n    attrs: map<string, uint8>\n    name: string\n}"
        );
    }
}
