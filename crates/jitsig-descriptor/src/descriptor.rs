use std::fmt;

use crate::error::{Error, Result};
use crate::primitive::PrimitiveKind;

/// A resolved JVM type in canonical form.
///
/// `Array` always has `depth >= 1` and never wraps another `Array`; use
/// [`TypeDescriptor::array`] to build one so nested arrays collapse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Reference(String),
    Array {
        element: Box<TypeDescriptor>,
        depth: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<TypeDescriptor>,
    pub return_type: TypeDescriptor,
}

impl TypeDescriptor {
    /// A reference type; internal (`java/lang/String`) names are normalised to
    /// binary (`java.lang.String`) names.
    pub fn reference(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.contains('/') {
            TypeDescriptor::Reference(name.replace('/', "."))
        } else {
            TypeDescriptor::Reference(name)
        }
    }

    pub fn array(element: TypeDescriptor, depth: usize) -> Self {
        if depth == 0 {
            return element;
        }
        match element {
            TypeDescriptor::Array {
                element,
                depth: inner,
            } => TypeDescriptor::Array {
                element,
                depth: inner + depth,
            },
            element => TypeDescriptor::Array {
                element: Box::new(element),
                depth,
            },
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TypeDescriptor::Array { depth, .. } => *depth,
            _ => 0,
        }
    }

    /// The innermost non-array type.
    pub fn element(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::Array { element, .. } => element,
            other => other,
        }
    }

    /// Strips one array dimension; `None` for non-array types.
    pub fn component_type(&self) -> Option<TypeDescriptor> {
        match self {
            TypeDescriptor::Array { element, depth } => {
                Some(TypeDescriptor::array((**element).clone(), depth - 1))
            }
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeDescriptor::Array { .. })
    }

    /// The JVM binary form: `[[I`, `[Ljava.lang.String;`, `java.lang.String`, `int`.
    pub fn to_binary_name(&self) -> String {
        match self {
            TypeDescriptor::Primitive(kind) => kind.name().to_string(),
            TypeDescriptor::Reference(name) => name.clone(),
            TypeDescriptor::Array { element, depth } => {
                let mut out = "[".repeat(*depth);
                match element.as_ref() {
                    TypeDescriptor::Primitive(kind) => out.push(kind.code()),
                    other => {
                        out.push('L');
                        out.push_str(&other.to_binary_name());
                        out.push(';');
                    }
                }
                out
            }
        }
    }

    /// Parses any of the textual spellings a log may use for a single type:
    /// canonical (`int[][]`, `java.lang.String`), binary array
    /// (`[Ljava.lang.String;`) or internal (`java/lang/String`).
    pub fn parse_name(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidTypeName(name.to_string()));
        }

        if name.starts_with('[') {
            return parse_field_descriptor(name);
        }

        if let Some(base) = name.strip_suffix("[]") {
            let base = Self::parse_name(base)?;
            if base == TypeDescriptor::Primitive(PrimitiveKind::Void) {
                return Err(Error::InvalidTypeName(name.to_string()));
            }
            return Ok(TypeDescriptor::array(base, 1));
        }

        if let Some(kind) = PrimitiveKind::from_name(name) {
            return Ok(TypeDescriptor::Primitive(kind));
        }

        if name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | ';' | '[' | ']' | '(' | ')' | ','))
        {
            return Err(Error::InvalidTypeName(name.to_string()));
        }

        Ok(TypeDescriptor::reference(name))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => f.write_str(kind.name()),
            TypeDescriptor::Reference(name) => f.write_str(name),
            TypeDescriptor::Array { element, depth } => {
                write!(f, "{element}")?;
                for _ in 0..*depth {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}

pub fn parse_field_descriptor(desc: &str) -> Result<TypeDescriptor> {
    let (ty, rest) = parse_field_type(desc)?;
    if !rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }
    Ok(ty)
}

/// Parses a run of field descriptors such as `(III[Ljava/lang/String;)`.
///
/// The surrounding parentheses are optional; an empty list is valid.
pub fn parse_descriptor_list(blob: &str) -> Result<Vec<TypeDescriptor>> {
    let mut rest = blob
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(blob);

    let mut types = Vec::new();
    while !rest.is_empty() {
        let (ty, tail) = parse_field_type(rest)?;
        types.push(ty);
        rest = tail;
    }
    Ok(types)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let Some(body) = desc.strip_prefix('(') else {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    };
    let Some(close) = body.find(')') else {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    };

    let params = parse_descriptor_list(&body[..close])?;

    let return_part = &body[close + 1..];
    let return_type = match return_part {
        "" => return Err(Error::InvalidDescriptor(desc.to_string())),
        "V" => TypeDescriptor::Primitive(PrimitiveKind::Void),
        other => parse_field_descriptor(other)?,
    };

    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

fn parse_field_type(input: &str) -> Result<(TypeDescriptor, &str)> {
    let depth = input.chars().take_while(|c| *c == '[').count();
    let rest = &input[depth..];

    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return Err(Error::InvalidDescriptor(input.to_string()));
    };

    let (element, tail) = match first {
        'L' => {
            let Some(end) = rest.find(';') else {
                return Err(Error::InvalidDescriptor(input.to_string()));
            };
            let name = &rest[1..end];
            if name.is_empty() {
                return Err(Error::InvalidDescriptor(input.to_string()));
            }
            (TypeDescriptor::reference(name), &rest[end + 1..])
        }
        c => match PrimitiveKind::from_code(c) {
            Some(PrimitiveKind::Void) | None => {
                return Err(Error::InvalidDescriptor(input.to_string()))
            }
            Some(kind) => (TypeDescriptor::Primitive(kind), chars.as_str()),
        },
    };

    Ok((TypeDescriptor::array(element, depth), tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> TypeDescriptor {
        TypeDescriptor::reference("java.lang.String")
    }

    #[test]
    fn parse_field_descriptor_primitives_and_arrays() {
        assert_eq!(
            parse_field_descriptor("I").unwrap(),
            TypeDescriptor::Primitive(PrimitiveKind::Int)
        );
        assert_eq!(
            parse_field_descriptor("[[Ljava/lang/String;").unwrap(),
            TypeDescriptor::array(string(), 2)
        );
    }

    #[test]
    fn parse_descriptor_list_mixes_primitives_and_references() {
        let types = parse_descriptor_list("(III[Ljava/lang/String;)").unwrap();
        assert_eq!(
            types,
            vec![
                TypeDescriptor::Primitive(PrimitiveKind::Int),
                TypeDescriptor::Primitive(PrimitiveKind::Int),
                TypeDescriptor::Primitive(PrimitiveKind::Int),
                TypeDescriptor::array(string(), 1),
            ]
        );
        assert!(parse_descriptor_list("()").unwrap().is_empty());
        assert!(parse_descriptor_list("(int)").is_err());
        assert!(parse_descriptor_list("(Ljava/lang/String)").is_err());
    }

    #[test]
    fn parse_method_descriptor_basic() {
        let desc = parse_method_descriptor("(ILjava/lang/String;)[I").unwrap();
        assert_eq!(
            desc.params,
            vec![TypeDescriptor::Primitive(PrimitiveKind::Int), string()]
        );
        assert_eq!(
            desc.return_type,
            TypeDescriptor::array(TypeDescriptor::Primitive(PrimitiveKind::Int), 1)
        );

        let void = parse_method_descriptor("()V").unwrap();
        assert!(void.params.is_empty());
        assert_eq!(void.return_type, TypeDescriptor::Primitive(PrimitiveKind::Void));
        assert!(parse_method_descriptor("(V)V").is_err());
        assert!(parse_method_descriptor("(I)").is_err());
    }

    #[test]
    fn nested_arrays_collapse() {
        let inner = TypeDescriptor::array(TypeDescriptor::Primitive(PrimitiveKind::Long), 1);
        let outer = TypeDescriptor::array(inner, 2);
        assert_eq!(outer.depth(), 3);
        assert_eq!(outer.element(), &TypeDescriptor::Primitive(PrimitiveKind::Long));
        assert_eq!(outer.to_string(), "long[][][]");
        assert_eq!(outer.to_binary_name(), "[[[J");
        assert_eq!(
            outer.component_type().unwrap().to_string(),
            "long[][]"
        );
        assert_eq!(TypeDescriptor::array(string(), 0), string());
    }

    #[test]
    fn parse_name_accepts_every_spelling() {
        let expected = TypeDescriptor::array(string(), 1);
        assert_eq!(TypeDescriptor::parse_name("java.lang.String[]").unwrap(), expected);
        assert_eq!(TypeDescriptor::parse_name("[Ljava.lang.String;").unwrap(), expected);
        assert_eq!(TypeDescriptor::parse_name("[Ljava/lang/String;").unwrap(), expected);
        assert_eq!(TypeDescriptor::parse_name("java/lang/String").unwrap(), string());
        assert_eq!(
            TypeDescriptor::parse_name("[[I").unwrap().to_string(),
            "int[][]"
        );
        assert!(TypeDescriptor::parse_name("java.util.List<T>").is_err());
        assert!(TypeDescriptor::parse_name("void[]").is_err());
        assert!(TypeDescriptor::parse_name("").is_err());
    }

    #[test]
    fn canonical_rendering_round_trips() {
        for text in ["int", "java.lang.Object", "byte[][]", "java.util.Map$Entry[]"] {
            let ty = TypeDescriptor::parse_name(text).unwrap();
            assert_eq!(ty.to_string(), text);
            assert_eq!(TypeDescriptor::parse_name(&ty.to_binary_name()).unwrap(), ty);
        }
    }
}
