// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dynstruct - runtime record types and path navigation
//!
//! Two independent tools for working with data whose shape is only known at
//! runtime:
//!
//! - **Type builder**: [`DynamicStructBuilder`] collects field specs (scalars,
//!   maps, funcs, chans, nested structs, sequences, type-erased fields) and
//!   assembles them into a record [`TypeDescriptor`] plus a zero-initialized
//!   [`DynamicStruct`] instance.
//! - **Path navigator**: [`Navigator`] walks named fields through nested
//!   objects via an [`Accessor`], caches an accessor per path prefix, defers
//!   errors, and returns a flat map from dotted path to value.
//!
//! ## Quick Start
//!
//! ```rust
//! use dynstruct::{DynamicStructBuilder, DynamicValue, Navigator, ValueAccessor};
//!
//! let mut inner = DynamicStructBuilder::new();
//! inner.add_int("port").add_string("host");
//! let inner = inner.build().unwrap();
//!
//! let mut outer = DynamicStructBuilder::new();
//! outer.add_struct("server", &inner, false).add_bool("debug");
//! let config = outer.build().unwrap();
//!
//! let mut nav = Navigator::new(ValueAccessor::from_instance(&config).unwrap());
//! let found = nav.descend(["server"]).find(["port", "host"]).to_map().unwrap();
//! assert_eq!(found.get("server.port"), Some(&DynamicValue::I64(0)));
//! ```
//!
//! ## Threading
//!
//! Builders and navigators are plain mutable values with no internal
//! synchronization. Use one per thread.

pub mod accessor;
pub mod builder;
pub mod config;
pub mod dynamic_struct;
pub mod error;
pub mod navigator;
pub mod sample;
pub mod type_descriptor;
pub mod value;

pub use accessor::{Accessor, ValueAccessor};
pub use builder::{DynamicStructBuilder, FieldKind, FieldSpec};
pub use config::{NavigatorConfig, DEFAULT_SEPARATOR, DEFAULT_STRUCT_NAME};
pub use dynamic_struct::DynamicStruct;
pub use error::{
    AccessError, BuildError, ConfigError, Error, FindError, NavigationError, Result,
};
pub use navigator::{Navigator, NavigatorState, PathKey};
pub use sample::{
    Sample, SAMPLE_BOOL, SAMPLE_BYTE, SAMPLE_FLOAT32, SAMPLE_FLOAT64, SAMPLE_INT, SAMPLE_STRING,
};
pub use type_descriptor::{
    ChanDescriptor, ChanDir, FieldDescriptor, FuncDescriptor, MapDescriptor, PrimitiveKind,
    SequenceDescriptor, TypeDescriptor, TypeKind,
};
pub use value::DynamicValue;
