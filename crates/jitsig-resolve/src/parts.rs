use jitsig_descriptor::{expand_descriptor, parse_descriptor_list, parse_method_descriptor};
use jitsig_model::{modifiers, GenericsMap};

use crate::error::{Result, SignatureError};
use crate::split::{split_log_signature, unescape_angle_brackets};
use crate::text::{split_top_level, strip_generics, type_is_varargs, varargs_to_array};

const OBJECT: &str = "java.lang.Object";
const CONSTRUCTOR_NAME: &str = "<init>";

/// The textual pieces of a member signature, before any type is resolved.
///
/// Parameter and return types are source-level names (`int[]`,
/// `java.lang.String`, possibly a type variable such as `T[]`). A trailing
/// varargs `...` is stored as `[]` with `is_varargs` set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureParts {
    pub class_name: String,
    pub member_name: String,
    pub modifier: u16,
    pub param_types: Vec<String>,
    pub return_type: String,
    pub generics: GenericsMap,
    pub is_varargs: bool,
}

impl SignatureParts {
    /// From a compilation log signature, e.g.
    /// `java/lang/String valueOf (I)Ljava/lang/String;`.
    pub fn from_log_compilation_signature(line: &str) -> Result<Self> {
        let normalized = line.trim().replace('/', ".");
        let split = split_log_signature(&normalized).map_err(|_| SignatureError::parse(line))?;

        let param_types = match parse_descriptor_list(&split.params) {
            Ok(descriptors) => descriptors.iter().map(ToString::to_string).collect(),
            Err(_) => {
                let inner = &split.params[1..split.params.len() - 1];
                split_top_level(inner, ',')
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            }
        };

        let class_name = split.class_name.trim().to_string();
        let member_name = member_name(&class_name, split.member_name.trim());
        Ok(Self::with_params(
            class_name,
            member_name,
            param_types,
            expand_descriptor(split.return_type.trim()),
        ))
    }

    /// From a disassembler member declaration, e.g.
    /// `public static <T extends java.lang.Object> T[] copyOf(T[], int);`.
    ///
    /// `class_name` is the declaring class; disassemblers leave it implicit.
    pub fn from_bytecode_signature(class_name: &str, line: &str) -> Result<Self> {
        let unescaped = unescape_angle_brackets(line);
        let text = unescaped.trim().trim_end_matches(';').trim_end();

        let (Some(open), Some(close)) = (text.find('('), text.rfind(')')) else {
            return Err(SignatureError::parse(line));
        };
        if close < open {
            return Err(SignatureError::parse(line));
        }

        let mut tokens = split_top_level(&text[..open], ' ').into_iter().peekable();

        let mut modifier = 0u16;
        while let Some(token) = tokens.peek() {
            match modifiers::from_keyword(token) {
                Some(bit) => modifier |= bit,
                None if *token == "default" => {}
                None => break,
            }
            tokens.next();
        }

        let mut generics = GenericsMap::new();
        if let Some(decl) = tokens.next_if(|token| token.starts_with('<')) {
            generics = parse_type_parameters(decl);
        }

        let rest: Vec<&str> = tokens.collect();
        let (return_type, name) = match rest.as_slice() {
            [return_type, name] => (strip_generics(return_type), *name),
            // Constructors have no return type.
            [name] => ("void".to_string(), *name),
            _ => return Err(SignatureError::parse(line)),
        };

        let member_name = if name == class_name {
            name.to_string()
        } else {
            let simple = name.rsplit('.').next().unwrap_or(name);
            member_name(class_name, simple)
        };

        let param_types = split_top_level(&text[open + 1..close], ',')
            .into_iter()
            .map(strip_generics)
            .collect();

        let mut parts = Self::with_params(class_name.to_string(), member_name, param_types, return_type);
        parts.modifier = modifier;
        parts.generics = generics;
        Ok(parts)
    }

    /// From a disassembler comment such as
    /// `java/lang/String.valueOf:(I)Ljava/lang/String;` or
    /// `java/util/ArrayList."<init>":()V`.
    pub fn from_bytecode_comment(comment: &str) -> Result<Self> {
        let Some((member_ref, descriptor)) = comment.trim().split_once(':') else {
            return Err(SignatureError::parse(comment));
        };
        let Some((owner, name)) = member_ref.trim().rsplit_once('.') else {
            return Err(SignatureError::parse(comment));
        };

        let class_name = owner.replace('/', ".");
        let name = name.trim_matches('"');
        let descriptor = parse_method_descriptor(descriptor.trim())?;

        Ok(Self {
            member_name: member_name(&class_name, name),
            param_types: descriptor.params.iter().map(ToString::to_string).collect(),
            return_type: descriptor.return_type.to_string(),
            class_name,
            ..Self::default()
        })
    }

    /// From already separated pieces, as found in a log's id dictionary.
    pub fn from_parts(
        class_name: &str,
        member: &str,
        return_type: &str,
        arg_types: &[String],
    ) -> Self {
        Self::with_params(
            class_name.to_string(),
            member_name(class_name, member),
            arg_types.to_vec(),
            return_type.to_string(),
        )
    }

    fn with_params(
        class_name: String,
        member_name: String,
        param_types: Vec<String>,
        return_type: String,
    ) -> Self {
        let is_varargs = param_types.last().is_some_and(|last| type_is_varargs(last));
        Self {
            class_name,
            member_name,
            param_types: param_types.iter().map(|ty| varargs_to_array(ty)).collect(),
            return_type,
            is_varargs,
            ..Self::default()
        }
    }
}

fn member_name(class_name: &str, name: &str) -> String {
    if name == CONSTRUCTOR_NAME {
        class_name.to_string()
    } else {
        name.to_string()
    }
}

/// `<T extends java.lang.Comparable<? super T>, U>` to `{T: java.lang.Comparable, U: java.lang.Object}`.
fn parse_type_parameters(decl: &str) -> GenericsMap {
    let inner = decl
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(decl);

    split_top_level(inner, ',')
        .into_iter()
        .filter_map(|param| {
            let (name, bound) = match param.split_once(" extends ") {
                Some((name, bounds)) => {
                    let first = split_top_level(bounds, '&').into_iter().next();
                    let bound = first.map(strip_generics).unwrap_or_else(|| OBJECT.to_string());
                    (name.trim(), bound)
                }
                None => (param.trim(), OBJECT.to_string()),
            };
            (!name.is_empty()).then(|| (name.to_string(), bound))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn log_signature_with_descriptor_params() {
        let parts =
            SignatureParts::from_log_compilation_signature("java/lang/String valueOf (I)Ljava/lang/String;")
                .unwrap();
        assert_eq!(parts.class_name, "java.lang.String");
        assert_eq!(parts.member_name, "valueOf");
        assert_eq!(parts.param_types, strings(&["int"]));
        assert_eq!(parts.return_type, "java.lang.String");
        assert!(!parts.is_varargs);
    }

    #[test]
    fn log_signature_with_named_params() {
        let parts = SignatureParts::from_log_compilation_signature(
            "java.lang.String format (java.lang.String, java.lang.Object...)java.lang.String",
        )
        .unwrap();
        assert_eq!(
            parts.param_types,
            strings(&["java.lang.String", "java.lang.Object[]"])
        );
        assert!(parts.is_varargs);
    }

    #[test]
    fn log_signature_constructor_is_named_after_its_class() {
        let parts =
            SignatureParts::from_log_compilation_signature("java.util.ArrayList &lt;init&gt; (I)V").unwrap();
        assert_eq!(parts.member_name, "java.util.ArrayList");
        assert_eq!(parts.return_type, "void");
    }

    #[test]
    fn bytecode_signature_with_generics() {
        let parts = SignatureParts::from_bytecode_signature(
            "java.util.Arrays",
            "public static <T extends java.lang.Object, U extends java.lang.Object> T[] copyOf(U[], int, java.lang.Class<? extends T[]>);",
        )
        .unwrap();

        assert_eq!(parts.modifier, modifiers::ACC_PUBLIC | modifiers::ACC_STATIC);
        assert_eq!(parts.member_name, "copyOf");
        assert_eq!(parts.return_type, "T[]");
        assert_eq!(parts.param_types, strings(&["U[]", "int", "java.lang.Class"]));
        assert_eq!(
            parts.generics,
            GenericsMap::from([
                ("T".to_string(), "java.lang.Object".to_string()),
                ("U".to_string(), "java.lang.Object".to_string()),
            ])
        );
    }

    #[test]
    fn bytecode_signature_bounds_and_varargs() {
        let parts = SignatureParts::from_bytecode_signature(
            "java.util.Collections",
            "public static <T extends java.lang.Comparable<? super T>, E> void sort(java.util.List<T>, E...) throws java.lang.Exception;",
        );
        // `throws` follows the closing parenthesis; only the declaration part matters.
        let parts = parts.unwrap();
        assert_eq!(
            parts.generics,
            GenericsMap::from([
                ("E".to_string(), "java.lang.Object".to_string()),
                ("T".to_string(), "java.lang.Comparable".to_string()),
            ])
        );
        assert_eq!(parts.param_types, strings(&["java.util.List", "E[]"]));
        assert!(parts.is_varargs);
        assert_eq!(parts.return_type, "void");
    }

    #[test]
    fn bytecode_signature_constructor() {
        let parts = SignatureParts::from_bytecode_signature(
            "java.util.ArrayList",
            "public java.util.ArrayList(int);",
        )
        .unwrap();
        assert_eq!(parts.member_name, "java.util.ArrayList");
        assert_eq!(parts.return_type, "void");
        assert_eq!(parts.param_types, strings(&["int"]));
    }

    #[test]
    fn bytecode_signature_rejects_fields() {
        assert!(SignatureParts::from_bytecode_signature("Foo", "private int count;").is_err());
        assert!(SignatureParts::from_bytecode_signature("Foo", "public a b c();").is_err());
    }

    #[test]
    fn bytecode_comment_with_quoted_constructor() {
        let parts = SignatureParts::from_bytecode_comment("java/util/ArrayList.\"<init>\":(I)V").unwrap();
        assert_eq!(parts.class_name, "java.util.ArrayList");
        assert_eq!(parts.member_name, "java.util.ArrayList");
        assert_eq!(parts.param_types, strings(&["int"]));
        assert_eq!(parts.return_type, "void");

        let parts =
            SignatureParts::from_bytecode_comment("java/lang/String.valueOf:(Ljava/lang/Object;)Ljava/lang/String;")
                .unwrap();
        assert_eq!(parts.member_name, "valueOf");
        assert_eq!(parts.param_types, strings(&["java.lang.Object"]));

        assert!(SignatureParts::from_bytecode_comment("valueOf:(I)V").is_err());
        assert!(SignatureParts::from_bytecode_comment("java/lang/String.valueOf").is_err());
    }
}
