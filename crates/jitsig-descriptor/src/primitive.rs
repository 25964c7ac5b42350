use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Void,
}

/// Descriptor letter and source name for every primitive kind.
static PRIMITIVES: [(PrimitiveKind, char, &str); 9] = [
    (PrimitiveKind::Byte, 'B', "byte"),
    (PrimitiveKind::Char, 'C', "char"),
    (PrimitiveKind::Double, 'D', "double"),
    (PrimitiveKind::Float, 'F', "float"),
    (PrimitiveKind::Int, 'I', "int"),
    (PrimitiveKind::Long, 'J', "long"),
    (PrimitiveKind::Short, 'S', "short"),
    (PrimitiveKind::Boolean, 'Z', "boolean"),
    (PrimitiveKind::Void, 'V', "void"),
];

impl PrimitiveKind {
    pub fn all() -> impl Iterator<Item = PrimitiveKind> {
        PRIMITIVES.iter().map(|(kind, _, _)| *kind)
    }

    pub fn from_code(code: char) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(kind, _, _)| *kind)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(_, _, n)| *n == name)
            .map(|(kind, _, _)| *kind)
    }

    pub fn code(self) -> char {
        PRIMITIVES[self as usize].1
    }

    pub fn name(self) -> &'static str {
        PRIMITIVES[self as usize].2
    }
}

pub fn is_primitive(name: &str) -> bool {
    PrimitiveKind::from_name(name).is_some()
}

/// Maps a source-level primitive name (`int`) to its descriptor letter (`I`).
pub fn code_for_name(name: &str) -> Result<char> {
    PrimitiveKind::from_name(name)
        .map(PrimitiveKind::code)
        .ok_or_else(|| Error::UnknownPrimitive(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for kind in PrimitiveKind::all() {
            assert_eq!(PrimitiveKind::from_code(kind.code()), Some(kind));
            assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn code_for_name_rejects_reference_types() {
        assert_eq!(code_for_name("long").unwrap(), 'J');
        assert_eq!(
            code_for_name("java.lang.Long"),
            Err(Error::UnknownPrimitive("java.lang.Long".to_string()))
        );
        assert!(!is_primitive("Integer"));
    }
}
