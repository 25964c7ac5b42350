use jitsig_descriptor::{code_for_name, parse_descriptor_list, TypeDescriptor};
use jitsig_model::{TypeHandle, TypeOracle};

use crate::error::{Result, SignatureError};
use crate::text::{
    array_bracket_count, param_type_without_array_brackets, split_top_level, strip_generics,
};

/// Resolves a parameter blob to oracle handles, in declaration order.
///
/// Two spellings are accepted: descriptor form (`(III[Ljava/lang/String;)`)
/// and comma separated names (`int, java.lang.String[], T...`). A blob that
/// parses as descriptors is treated as descriptors.
pub fn resolve_type_list(oracle: &dyn TypeOracle, blob: &str) -> Result<Vec<TypeHandle>> {
    let blob = blob.trim();
    match parse_descriptor_list(blob) {
        Ok(descriptors) => descriptors
            .iter()
            .map(|descriptor| resolve_descriptor(oracle, descriptor))
            .collect(),
        Err(_) => {
            let inner = blob
                .strip_prefix('(')
                .and_then(|inner| inner.strip_suffix(')'))
                .unwrap_or(blob);
            resolve_parameter_names(oracle, inner)
        }
    }
}

/// Primitives map straight to a handle; everything else goes through the oracle.
pub fn resolve_descriptor(
    oracle: &dyn TypeOracle,
    descriptor: &TypeDescriptor,
) -> Result<TypeHandle> {
    if descriptor.is_primitive() {
        return Ok(TypeHandle::new(descriptor.clone()));
    }
    oracle
        .resolve(&descriptor.to_binary_name())
        .ok_or_else(|| SignatureError::unknown_type(&descriptor.to_string()))
}

pub fn resolve_parameter_names(oracle: &dyn TypeOracle, names: &str) -> Result<Vec<TypeHandle>> {
    split_top_level(names, ',')
        .into_iter()
        .map(|token| resolve_parameter_name(oracle, token))
        .collect()
}

/// Resolves one declared parameter type such as `java.util.List<T>[]` or
/// `int...`. Varargs resolve to the equivalent array type.
pub fn resolve_parameter_name(oracle: &dyn TypeOracle, token: &str) -> Result<TypeHandle> {
    let stripped = strip_generics(token.trim());
    let (base, is_varargs) = match stripped.strip_suffix("...") {
        Some(base) => (base, true),
        None => (stripped.as_str(), false),
    };

    let depth = array_bracket_count(base) + usize::from(is_varargs);
    let element = param_type_without_array_brackets(base).trim();

    let lookup = if depth == 0 {
        element.to_string()
    } else {
        let mut name = "[".repeat(depth);
        match code_for_name(element) {
            Ok(code) => name.push(code),
            Err(_) => {
                name.push('L');
                name.push_str(element);
                name.push(';');
            }
        }
        name
    };

    oracle
        .resolve(&lookup)
        .ok_or_else(|| SignatureError::unknown_type(token))
}
