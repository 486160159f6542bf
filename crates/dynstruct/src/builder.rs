// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder for runtime-assembled record types.
//!
//! Field specs live in an unordered registry keyed by name. Re-adding a name
//! overwrites its spec. Nothing is validated until [`DynamicStructBuilder::build`]
//! or [`DynamicStructBuilder::build_non_ptr`], which realize every spec into a
//! [`TypeDescriptor`] and may fail with [`BuildError::TypeAssembly`].
//!
//! Field order in the built type follows registry iteration and is therefore
//! unspecified.

use crate::config::DEFAULT_STRUCT_NAME;
use crate::dynamic_struct::DynamicStruct;
use crate::error::BuildError;
use crate::sample::{
    Sample, SAMPLE_BOOL, SAMPLE_BYTE, SAMPLE_FLOAT32, SAMPLE_FLOAT64, SAMPLE_INT, SAMPLE_STRING,
};
use crate::type_descriptor::{ChanDir, FieldDescriptor, TypeDescriptor};
use std::collections::HashMap;
use std::sync::Arc;

/// Sample type recorded at add time. `None` is an undeterminable sample.
type SampleType = Option<Arc<TypeDescriptor>>;

/// Kind of a field spec and its kind-specific parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Primitive type of the sample.
    Scalar(SampleType),
    /// `map<K, V>` from key and value samples.
    Map {
        key: SampleType,
        value: SampleType,
    },
    /// Fixed-arity callable.
    Func {
        inputs: Vec<SampleType>,
        outputs: Vec<SampleType>,
    },
    /// Channel endpoint.
    Chan {
        dir: ChanDir,
        element: SampleType,
    },
    /// Copy of a record sample's type.
    Struct {
        sample: SampleType,
        by_ref: bool,
    },
    /// `seq<E>` from an element sample.
    Sequence(SampleType),
    /// Type-erased `any`.
    Interface {
        by_ref: bool,
    },
}

impl FieldKind {
    /// Short label used in errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Map { .. } => "map",
            Self::Func { .. } => "func",
            Self::Chan { .. } => "chan",
            Self::Struct { .. } => "struct",
            Self::Sequence(_) => "slice",
            Self::Interface { .. } => "interface",
        }
    }

    /// Realize this spec into a concrete type.
    fn realize(&self) -> Result<Arc<TypeDescriptor>, String> {
        let desc = match self {
            Self::Scalar(sample) => return required(sample, "sample"),
            Self::Map { key, value } => {
                let key = required(key, "key sample")?;
                if !key.is_comparable() {
                    return Err(format!("key type {} is not comparable", key));
                }
                TypeDescriptor::map_of(key, required(value, "value sample")?)
            }
            Self::Func { inputs, outputs } => {
                let inputs = inputs
                    .iter()
                    .enumerate()
                    .map(|(i, s)| required(s, &format!("input sample #{}", i)))
                    .collect::<Result<Vec<_>, _>>()?;
                let outputs = outputs
                    .iter()
                    .enumerate()
                    .map(|(i, s)| required(s, &format!("output sample #{}", i)))
                    .collect::<Result<Vec<_>, _>>()?;
                TypeDescriptor::func_of(inputs, outputs)
            }
            Self::Chan { dir, element } => {
                TypeDescriptor::chan_of(*dir, required(element, "element sample")?)
            }
            Self::Struct { sample, by_ref } => {
                let sample = required(sample, "record sample")?;
                let record = sample.elem().unwrap_or(&sample);
                let Some(fields) = record.fields() else {
                    return Err(format!("sample of type {} is not a record", sample));
                };
                // Rebuilt field by field, so the result is a new anonymous type.
                let copy = Arc::new(TypeDescriptor::struct_of("", fields.to_vec()));
                return Ok(by_reference(copy, *by_ref));
            }
            Self::Sequence(element) => TypeDescriptor::sequence_of(required(element, "element sample")?),
            Self::Interface { by_ref } => {
                return Ok(by_reference(Arc::new(TypeDescriptor::erased()), *by_ref));
            }
        };
        Ok(Arc::new(desc))
    }
}

fn required(sample: &SampleType, what: &str) -> Result<Arc<TypeDescriptor>, String> {
    sample
        .clone()
        .ok_or_else(|| format!("{} has no determinable type", what))
}

fn by_reference(desc: Arc<TypeDescriptor>, by_ref: bool) -> Arc<TypeDescriptor> {
    if by_ref {
        Arc::new(TypeDescriptor::pointer_to(desc))
    } else {
        desc
    }
}

/// A registered field: its kind and an opaque metadata tag.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Kind and samples.
    pub kind: FieldKind,
    /// Opaque metadata, copied into the field descriptor.
    pub tag: String,
}

/// Builder for runtime record types.
///
/// ```rust
/// use dynstruct::DynamicStructBuilder;
///
/// let mut builder = DynamicStructBuilder::new();
/// builder
///     .add_string("name")
///     .add_int_with_tag("age", r#"json:"age""#)
///     .add_slice("scores", 0.0f64);
///
/// let instance = builder.build_non_ptr().unwrap();
/// assert_eq!(instance.num_field(), 3);
/// assert_eq!(instance.field("age").map(|f| f.tag.as_str()), Some(r#"json:"age""#));
/// ```
#[derive(Debug, Clone)]
pub struct DynamicStructBuilder {
    fields: HashMap<String, FieldSpec>,
    name: String,
}

impl Default for DynamicStructBuilder {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! scalar_adders {
    ($(($add:ident, $add_with_tag:ident, $sample:expr, $what:literal)),* $(,)?) => {
        $(
            #[doc = concat!("Add a ", $what, " field.")]
            pub fn $add(&mut self, name: impl Into<String>) -> &mut Self {
                self.$add_with_tag(name, "")
            }

            #[doc = concat!("Add a ", $what, " field with a tag.")]
            pub fn $add_with_tag(
                &mut self,
                name: impl Into<String>,
                tag: impl Into<String>,
            ) -> &mut Self {
                self.add_scalar_with_tag(name, $sample, tag)
            }
        )*
    };
}

impl DynamicStructBuilder {
    /// Create an empty builder named [`DEFAULT_STRUCT_NAME`].
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            name: DEFAULT_STRUCT_NAME.to_string(),
        }
    }

    fn add(&mut self, name: impl Into<String>, kind: FieldKind, tag: impl Into<String>) -> &mut Self {
        let name = name.into();
        log::trace!("[builder] add {} field '{}'", kind.label(), name);
        self.fields.insert(
            name,
            FieldSpec {
                kind,
                tag: tag.into(),
            },
        );
        self
    }

    scalar_adders!(
        (add_string, add_string_with_tag, SAMPLE_STRING, "string"),
        (add_int, add_int_with_tag, SAMPLE_INT, "int"),
        (add_byte, add_byte_with_tag, SAMPLE_BYTE, "byte"),
        (add_float32, add_float32_with_tag, SAMPLE_FLOAT32, "float32"),
        (add_float64, add_float64_with_tag, SAMPLE_FLOAT64, "float64"),
        (add_bool, add_bool_with_tag, SAMPLE_BOOL, "bool"),
    );

    /// Add a field typed after `sample`.
    pub fn add_scalar(&mut self, name: impl Into<String>, sample: impl Sample) -> &mut Self {
        self.add_scalar_with_tag(name, sample, "")
    }

    /// Like [`add_scalar`](Self::add_scalar), with a tag.
    pub fn add_scalar_with_tag(
        &mut self,
        name: impl Into<String>,
        sample: impl Sample,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.add(name, FieldKind::Scalar(sample.sample_type()), tag)
    }

    /// Add a map field from a key sample and an element sample.
    pub fn add_map(&mut self, name: impl Into<String>, key: impl Sample, value: impl Sample) -> &mut Self {
        self.add_map_with_tag(name, key, value, "")
    }

    /// Like [`add_map`](Self::add_map), with a tag.
    pub fn add_map_with_tag(
        &mut self,
        name: impl Into<String>,
        key: impl Sample,
        value: impl Sample,
        tag: impl Into<String>,
    ) -> &mut Self {
        let kind = FieldKind::Map {
            key: key.sample_type(),
            value: value.sample_type(),
        };
        self.add(name, kind, tag)
    }

    /// Add a func field. Argument and return types follow the samples in
    /// order. Variadic signatures are not supported.
    pub fn add_func(
        &mut self,
        name: impl Into<String>,
        inputs: &[&dyn Sample],
        outputs: &[&dyn Sample],
    ) -> &mut Self {
        self.add_func_with_tag(name, inputs, outputs, "")
    }

    /// Like [`add_func`](Self::add_func), with a tag.
    pub fn add_func_with_tag(
        &mut self,
        name: impl Into<String>,
        inputs: &[&dyn Sample],
        outputs: &[&dyn Sample],
        tag: impl Into<String>,
    ) -> &mut Self {
        let kind = FieldKind::Func {
            inputs: inputs.iter().map(|s| s.sample_type()).collect(),
            outputs: outputs.iter().map(|s| s.sample_type()).collect(),
        };
        self.add(name, kind, tag)
    }

    /// Add a bidirectional chan field.
    pub fn add_chan_both(&mut self, name: impl Into<String>, element: impl Sample) -> &mut Self {
        self.add_chan_both_with_tag(name, element, "")
    }

    /// Like [`add_chan_both`](Self::add_chan_both), with a tag.
    pub fn add_chan_both_with_tag(
        &mut self,
        name: impl Into<String>,
        element: impl Sample,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.add_chan(name, ChanDir::Both, element, tag)
    }

    /// Add a receive-only chan field.
    pub fn add_chan_recv(&mut self, name: impl Into<String>, element: impl Sample) -> &mut Self {
        self.add_chan_recv_with_tag(name, element, "")
    }

    /// Like [`add_chan_recv`](Self::add_chan_recv), with a tag.
    pub fn add_chan_recv_with_tag(
        &mut self,
        name: impl Into<String>,
        element: impl Sample,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.add_chan(name, ChanDir::Recv, element, tag)
    }

    /// Add a send-only chan field.
    pub fn add_chan_send(&mut self, name: impl Into<String>, element: impl Sample) -> &mut Self {
        self.add_chan_send_with_tag(name, element, "")
    }

    /// Like [`add_chan_send`](Self::add_chan_send), with a tag.
    pub fn add_chan_send_with_tag(
        &mut self,
        name: impl Into<String>,
        element: impl Sample,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.add_chan(name, ChanDir::Send, element, tag)
    }

    fn add_chan(
        &mut self,
        name: impl Into<String>,
        dir: ChanDir,
        element: impl Sample,
        tag: impl Into<String>,
    ) -> &mut Self {
        let kind = FieldKind::Chan {
            dir,
            element: element.sample_type(),
        };
        self.add(name, kind, tag)
    }

    /// Add a struct field whose type copies the fields of `sample`'s record
    /// type (a pointer to a record is accepted too).
    ///
    /// The copy keeps every field's name, type and tag but is a new type,
    /// distinct from the sample's. A [`DynamicValue`](crate::value::DynamicValue)
    /// sample is typed from its contents, so zeroed fields come out as `any`,
    /// `seq<any>` or `map<any, any>`; pass the [`DynamicStruct`] itself to keep
    /// the exact field types.
    pub fn add_struct(&mut self, name: impl Into<String>, sample: impl Sample, by_ref: bool) -> &mut Self {
        self.add_struct_with_tag(name, sample, by_ref, "")
    }

    /// Like [`add_struct`](Self::add_struct), with a tag.
    pub fn add_struct_with_tag(
        &mut self,
        name: impl Into<String>,
        sample: impl Sample,
        by_ref: bool,
        tag: impl Into<String>,
    ) -> &mut Self {
        let kind = FieldKind::Struct {
            sample: sample.sample_type(),
            by_ref,
        };
        self.add(name, kind, tag)
    }

    /// Shorthand for `add_struct(name, sample, true)`.
    pub fn add_struct_ptr(&mut self, name: impl Into<String>, sample: impl Sample) -> &mut Self {
        self.add_struct(name, sample, true)
    }

    /// Like [`add_struct_ptr`](Self::add_struct_ptr), with a tag.
    pub fn add_struct_ptr_with_tag(
        &mut self,
        name: impl Into<String>,
        sample: impl Sample,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.add_struct_with_tag(name, sample, true, tag)
    }

    /// Add a sequence field of `element`'s type.
    pub fn add_slice(&mut self, name: impl Into<String>, element: impl Sample) -> &mut Self {
        self.add_slice_with_tag(name, element, "")
    }

    /// Like [`add_slice`](Self::add_slice), with a tag.
    pub fn add_slice_with_tag(
        &mut self,
        name: impl Into<String>,
        element: impl Sample,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.add(name, FieldKind::Sequence(element.sample_type()), tag)
    }

    /// Add a type-erased field.
    pub fn add_interface(&mut self, name: impl Into<String>, by_ref: bool) -> &mut Self {
        self.add_interface_with_tag(name, by_ref, "")
    }

    /// Like [`add_interface`](Self::add_interface), with a tag.
    pub fn add_interface_with_tag(
        &mut self,
        name: impl Into<String>,
        by_ref: bool,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.add(name, FieldKind::Interface { by_ref }, tag)
    }

    /// Remove a field. Absent names are ignored.
    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.fields.remove(name);
        self
    }

    /// Check if a field named `name` is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of registered fields.
    pub fn num_field(&self) -> usize {
        self.fields.len()
    }

    /// Registered spec for `name`.
    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Cosmetic name given to built types.
    pub fn struct_name(&self) -> &str {
        &self.name
    }

    /// Set the cosmetic name of built types. Does not affect layout.
    pub fn set_struct_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Build a by-reference instance from the current specs.
    pub fn build(&self) -> Result<DynamicStruct, BuildError> {
        self.build_with(true)
    }

    /// Build a by-value instance from the current specs.
    pub fn build_non_ptr(&self) -> Result<DynamicStruct, BuildError> {
        self.build_with(false)
    }

    fn build_with(&self, by_ref: bool) -> Result<DynamicStruct, BuildError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, spec) in &self.fields {
            let assembly_error = |reason: String| BuildError::TypeAssembly {
                field: name.clone(),
                kind: spec.kind.label(),
                reason,
            };
            if name.is_empty() {
                return Err(assembly_error("field name is empty".to_string()));
            }
            let type_desc = spec.kind.realize().map_err(assembly_error)?;
            fields.push(FieldDescriptor::new(name.clone(), type_desc).with_tag(spec.tag.clone()));
        }

        let record = Arc::new(TypeDescriptor::struct_of(self.name.clone(), fields));
        log::debug!(
            "[builder] built {} with {} fields (by_ref={})",
            self.name,
            self.fields.len(),
            by_ref
        );
        Ok(DynamicStruct::new(record, by_ref))
    }
}
