#![forbid(unsafe_code)]

//! Resolves the loosely structured method signatures found in JIT compilation
//! logs and disassembler output to declared members.
//!
//! The pipeline is: split or look up the raw text ([`split_log_signature`],
//! [`SignatureParts`], [`lookup_dictionary_signature`]), resolve every type
//! through the oracle ([`resolve_type_list`]), then either match parameter
//! lists ([`match_parameters`]) or, when only a fragment is known, rank
//! candidate lines ([`score_best_line`]). [`SignatureResolver`] ties the steps
//! to a [`jitsig_model::TypeOracle`] and a [`jitsig_model::Metamodel`].

mod dictionary;
mod error;
mod generics;
mod matcher;
mod metamodel;
mod parts;
mod resolver;
mod scorer;
mod split;
pub mod text;
mod type_list;

pub use crate::dictionary::{lookup_dictionary_signature, lookup_type, DictionarySignature};
pub use crate::error::{Result, SignatureError};
pub use crate::generics::{substitute_type_variable, types_equal_modulo_generics};
pub use crate::matcher::match_parameters;
pub use crate::metamodel::MemoryMetamodel;
pub use crate::parts::SignatureParts;
pub use crate::resolver::SignatureResolver;
pub use crate::scorer::{find_best_match_for_member_signature, score_best_line, BestMatch};
pub use crate::split::{split_log_signature, unescape_angle_brackets, LogSignature};
pub use crate::type_list::{
    resolve_descriptor, resolve_parameter_name, resolve_parameter_names, resolve_type_list,
};
