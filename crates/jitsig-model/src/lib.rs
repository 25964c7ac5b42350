#![forbid(unsafe_code)]

//! Contracts between the signature resolver and the outside world.
//!
//! The resolver never loads classes itself. It asks a [`TypeOracle`] for type
//! identity and assignability, a [`Metamodel`] for declared members and a
//! [`ParseDictionary`] for the id tables of a structured compilation log.
//! In-memory implementations of the oracle and the dictionary live here too;
//! they back the tests and small tools that have no classpath to scan.

mod dictionary;
mod error;
mod handle;
mod member;
mod memory;
mod metamodel;
pub mod modifiers;
mod stub;

pub use crate::dictionary::{
    DictionaryEntry, EntryKind, MemoryDictionary, ParseDictionary, ATTR_ARGS, ATTR_ARGUMENTS,
    ATTR_HOLDER, ATTR_NAME, ATTR_RETURN,
};
pub use crate::error::ModelError;
pub use crate::handle::{ClassProvider, TypeHandle, TypeOracle};
pub use crate::member::{CandidateMember, GenericsMap, ResolvedSignature};
pub use crate::memory::MemoryTypeOracle;
pub use crate::metamodel::{ClassHandle, Metamodel};
pub use crate::stub::{ClassStub, MethodStub};
