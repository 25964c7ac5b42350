use std::borrow::Cow;

use jitsig_model::GenericsMap;

use crate::text::param_type_without_array_brackets;

/// Replaces a type variable with its erasure, keeping array brackets:
/// `U[]` with `U -> java.lang.Object` becomes `java.lang.Object[]`.
pub fn substitute_type_variable<'a>(type_name: &'a str, generics: &GenericsMap) -> Cow<'a, str> {
    let base = param_type_without_array_brackets(type_name);
    match generics.get(base) {
        Some(concrete) => Cow::Owned(format!("{concrete}{}", &type_name[base.len()..])),
        None => Cow::Borrowed(type_name),
    }
}

/// Compares a declared type name with one parsed from a generic declaration.
///
/// Compilers log erased signatures, so `<T> T[] copyOf(U[], ...)` shows up as
/// `Object[] copyOf(Object[], ...)`. A single substitution step through
/// `generics` is enough to line those up; no inference is attempted.
pub fn types_equal_modulo_generics(known: &str, parsed: &str, generics: &GenericsMap) -> bool {
    if known == parsed {
        return true;
    }
    match substitute_type_variable(parsed, generics) {
        Cow::Owned(substituted) => substituted == known,
        Cow::Borrowed(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generics(pairs: &[(&str, &str)]) -> GenericsMap {
        pairs
            .iter()
            .map(|(var, ty)| (var.to_string(), ty.to_string()))
            .collect()
    }

    #[test]
    fn literal_equality_needs_no_map() {
        assert!(types_equal_modulo_generics("int", "int", &GenericsMap::new()));
        assert!(!types_equal_modulo_generics("int", "long", &GenericsMap::new()));
    }

    #[test]
    fn type_variables_are_substituted_once() {
        let map = generics(&[("U", "java.lang.Object")]);
        assert!(types_equal_modulo_generics("java.lang.Object[]", "U[]", &map));
        assert!(!types_equal_modulo_generics(
            "java.lang.Object[]",
            "U[]",
            &GenericsMap::new()
        ));
        assert!(types_equal_modulo_generics("java.lang.Object", "U", &map));
        assert!(!types_equal_modulo_generics("java.lang.Object[]", "U", &map));
        assert!(types_equal_modulo_generics("java.lang.Object[][]", "U[][]", &map));
    }

    #[test]
    fn substitution_leaves_concrete_types_alone() {
        let map = generics(&[("T", "java.lang.Number")]);
        assert_eq!(substitute_type_variable("int[]", &map), "int[]");
        assert_eq!(substitute_type_variable("T[]", &map), "java.lang.Number[]");
        assert_eq!(substitute_type_variable("Tx", &map), "Tx");
    }
}
