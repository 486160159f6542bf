// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.
//!
//! A [`TypeDescriptor`] is composed from a closed set of constructors:
//! scalar-of, map-of, func-of, chan-of, struct-of, sequence-of, erased and
//! pointer-to. Nothing here depends on compile-time reflection.

use std::fmt;
use std::sync::Arc;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    String,
}

impl PrimitiveKind {
    /// Canonical type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::Char => "char",
            Self::String => "string",
        }
    }
}

/// Direction of a message-passing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// Send and receive.
    Both,
    /// Receive only.
    Recv,
    /// Send only.
    Send,
}

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Primitive type.
    Primitive(PrimitiveKind),
    /// Keyed mapping.
    Map(MapDescriptor),
    /// Callable with a fixed signature.
    Func(FuncDescriptor),
    /// Directional endpoint.
    Chan(ChanDescriptor),
    /// Struct with named fields.
    Struct(Vec<FieldDescriptor>),
    /// Sequence (dynamic length).
    Sequence(SequenceDescriptor),
    /// Type-erased value, holds anything.
    Interface,
    /// Reference to another type.
    Pointer(Arc<TypeDescriptor>),
}

/// A complete type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Type name (empty for anonymous types).
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Anonymous primitive type.
    pub fn scalar(kind: PrimitiveKind) -> Self {
        Self::new("", TypeKind::Primitive(kind))
    }

    /// Anonymous mapping from `key` to `value`.
    pub fn map_of(key: Arc<TypeDescriptor>, value: Arc<TypeDescriptor>) -> Self {
        Self::new("", TypeKind::Map(MapDescriptor { key, value }))
    }

    /// Anonymous callable signature.
    pub fn func_of(inputs: Vec<Arc<TypeDescriptor>>, outputs: Vec<Arc<TypeDescriptor>>) -> Self {
        Self::new("", TypeKind::Func(FuncDescriptor { inputs, outputs }))
    }

    /// Anonymous endpoint carrying `element`.
    pub fn chan_of(dir: ChanDir, element: Arc<TypeDescriptor>) -> Self {
        Self::new("", TypeKind::Chan(ChanDescriptor { dir, element }))
    }

    /// Create a struct type descriptor.
    pub fn struct_of(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(name, TypeKind::Struct(fields))
    }

    /// Anonymous dynamic sequence of `element`.
    pub fn sequence_of(element: Arc<TypeDescriptor>) -> Self {
        Self::new("", TypeKind::Sequence(SequenceDescriptor::new(element)))
    }

    /// Fully type-erased type.
    pub fn erased() -> Self {
        Self::new("", TypeKind::Interface)
    }

    /// Reference to `inner`.
    pub fn pointer_to(inner: Arc<TypeDescriptor>) -> Self {
        Self::new("", TypeKind::Pointer(inner))
    }

    /// Check if this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    /// Check if this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// Check if this is a pointer type.
    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    /// Pointee of a pointer type.
    pub fn elem(&self) -> Option<&Arc<TypeDescriptor>> {
        match &self.kind {
            TypeKind::Pointer(inner) => Some(inner),
            _ => None,
        }
    }

    /// Get fields if this is a struct.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match &self.kind {
            TypeKind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    /// Whether values of this type can be compared for equality, and so can
    /// be used as mapping keys.
    pub fn is_comparable(&self) -> bool {
        match &self.kind {
            TypeKind::Primitive(_)
            | TypeKind::Chan(_)
            | TypeKind::Interface
            | TypeKind::Pointer(_) => true,
            TypeKind::Map(_) | TypeKind::Func(_) | TypeKind::Sequence(_) => false,
            TypeKind::Struct(fields) => fields.iter().all(|f| f.type_desc.is_comparable()),
        }
    }

    /// Short name of the kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            TypeKind::Primitive(p) => p.type_name(),
            TypeKind::Map(_) => "map",
            TypeKind::Func(_) => "func",
            TypeKind::Chan(_) => "chan",
            TypeKind::Struct(_) => "struct",
            TypeKind::Sequence(_) => "sequence",
            TypeKind::Interface => "interface",
            TypeKind::Pointer(_) => "pointer",
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[Arc<TypeDescriptor>]) -> fmt::Result {
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", t)?;
    }
    Ok(())
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Primitive(p) => write!(f, "{}", p.type_name()),
            TypeKind::Map(m) => write!(f, "map<{}, {}>", m.key, m.value),
            TypeKind::Func(func) => {
                write!(f, "fn(")?;
                write_list(f, &func.inputs)?;
                write!(f, ")")?;
                if !func.outputs.is_empty() {
                    write!(f, " -> (")?;
                    write_list(f, &func.outputs)?;
                    write!(f, ")")?;
                }
                Ok(())
            }
            TypeKind::Chan(c) => match c.dir {
                ChanDir::Both => write!(f, "chan {}", c.element),
                ChanDir::Recv => write!(f, "<-chan {}", c.element),
                ChanDir::Send => write!(f, "chan<- {}", c.element),
            },
            TypeKind::Struct(fields) => {
                if !self.name.is_empty() {
                    return write!(f, "{}", self.name);
                }
                write!(f, "struct {{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", field.name, field.type_desc)?;
                }
                write!(f, " }}")
            }
            TypeKind::Sequence(seq) => write!(f, "seq<{}>", seq.element_type),
            TypeKind::Interface => write!(f, "any"),
            TypeKind::Pointer(inner) => write!(f, "*{}", inner),
        }
    }
}

/// Field descriptor for struct members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Field type.
    pub type_desc: Arc<TypeDescriptor>,
    /// Opaque metadata, carried verbatim.
    pub tag: String,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, type_desc: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            type_desc,
            tag: String::new(),
        }
    }

    /// Attach a metadata tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// Mapping type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDescriptor {
    /// Key type.
    pub key: Arc<TypeDescriptor>,
    /// Element type.
    pub value: Arc<TypeDescriptor>,
}

/// Callable signature. Always fixed-arity.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDescriptor {
    /// Parameter types.
    pub inputs: Vec<Arc<TypeDescriptor>>,
    /// Result types.
    pub outputs: Vec<Arc<TypeDescriptor>>,
}

/// Endpoint type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ChanDescriptor {
    /// Endpoint direction.
    pub dir: ChanDir,
    /// Element type.
    pub element: Arc<TypeDescriptor>,
}

/// Sequence type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDescriptor {
    /// Element type.
    pub element_type: Arc<TypeDescriptor>,
}

impl SequenceDescriptor {
    /// Create sequence descriptor.
    pub fn new(element_type: Arc<TypeDescriptor>) -> Self {
        Self { element_type }
    }
}
