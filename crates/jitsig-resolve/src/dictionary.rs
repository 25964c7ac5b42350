use jitsig_descriptor::expand_descriptor;
use jitsig_model::{
    EntryKind, ParseDictionary, ATTR_ARGS, ATTR_ARGUMENTS, ATTR_HOLDER, ATTR_NAME, ATTR_RETURN,
};

/// The textual pieces a method id expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySignature {
    pub class_name: String,
    pub member_name: String,
    pub return_type: String,
    pub arg_types: Vec<String>,
}

/// Expands a type or klass id to a canonical type name (`I` -> `int`,
/// `java/util/ArrayList` -> `java.util.ArrayList`).
pub fn lookup_type(dict: &dyn ParseDictionary, id: &str) -> Option<String> {
    let entry = dict
        .entry(EntryKind::Type, id)
        .or_else(|| dict.entry(EntryKind::Klass, id))?;
    let name = entry.attr(ATTR_NAME)?;
    Some(expand_descriptor(&name.replace('/', ".")))
}

/// Follows a method id through its holder, return and argument ids.
///
/// Any missing id makes the whole lookup miss. Argument ids come from
/// `arguments`, or `args` when that is absent; a method with neither takes no
/// arguments.
pub fn lookup_dictionary_signature(
    dict: &dyn ParseDictionary,
    method_id: &str,
) -> Option<DictionarySignature> {
    let Some(method) = dict.entry(EntryKind::Method, method_id) else {
        tracing::debug!(method_id, "no method entry");
        return None;
    };

    let member_name = method.attr(ATTR_NAME)?.to_string();

    let holder = method.attr(ATTR_HOLDER)?;
    let Some(class_name) = dict
        .entry(EntryKind::Klass, holder)
        .and_then(|klass| klass.attr(ATTR_NAME))
    else {
        tracing::debug!(method_id, holder, "no klass entry for holder");
        return None;
    };

    let return_id = method.attr(ATTR_RETURN)?;
    let Some(return_type) = lookup_type(dict, return_id) else {
        tracing::debug!(method_id, return_id, "no type entry for return type");
        return None;
    };

    let mut arg_types = Vec::new();
    let arg_ids = method
        .attr(ATTR_ARGUMENTS)
        .or_else(|| method.attr(ATTR_ARGS))
        .unwrap_or("");
    for arg_id in arg_ids.split_whitespace() {
        let Some(arg_type) = lookup_type(dict, arg_id) else {
            tracing::debug!(method_id, arg_id, "no type entry for argument");
            return None;
        };
        arg_types.push(arg_type);
    }

    Some(DictionarySignature {
        class_name: class_name.replace('/', "."),
        member_name,
        return_type,
        arg_types,
    })
}
