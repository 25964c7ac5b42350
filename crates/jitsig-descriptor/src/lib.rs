#![forbid(unsafe_code)]

//! JVM type descriptors as they show up in JIT compilation logs and
//! disassembler output.
//!
//! Everything in this crate is pure text processing: no type is ever loaded
//! or checked for existence. See `jitsig-model` for the type oracle.

mod descriptor;
mod error;
mod expand;
mod primitive;

pub use crate::descriptor::{
    parse_descriptor_list, parse_field_descriptor, parse_method_descriptor, MethodDescriptor,
    TypeDescriptor,
};
pub use crate::error::{Error, Result};
pub use crate::expand::expand_descriptor;
pub use crate::primitive::{code_for_name, is_primitive, PrimitiveKind};
