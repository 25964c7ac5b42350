use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::handle::TypeHandle;
use crate::modifiers;

/// Type variable name to the concrete type it erases to (`T` -> `java.lang.Object`).
pub type GenericsMap = BTreeMap<String, String>;

/// A declared method as the metamodel knows it. Read-only for the resolver.
///
/// Constructors are named after their owning class, the way disassemblers
/// print them, rather than `<init>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateMember {
    pub class_name: String,
    pub name: String,
    /// Method modifier bits, already masked with [`modifiers::METHOD_MODIFIERS`].
    pub modifier: u16,
    pub param_types: Vec<String>,
    pub return_type: String,
    pub is_varargs: bool,
}

impl CandidateMember {
    pub fn is_constructor(&self) -> bool {
        self.name == self.class_name
    }
}

impl fmt::Display for CandidateMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keywords = modifiers::to_keywords(self.modifier);
        if !keywords.is_empty() {
            write!(f, "{keywords} ")?;
        }
        if self.is_constructor() {
            write!(f, "{}(", self.name)?;
        } else {
            write!(f, "{} {}.{}(", self.return_type, self.class_name, self.name)?;
        }
        for (idx, param) in self.param_types.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            let is_last = idx + 1 == self.param_types.len();
            match param.strip_suffix("[]") {
                Some(component) if is_last && self.is_varargs => write!(f, "{component}...")?,
                _ => f.write_str(param)?,
            }
        }
        f.write_str(")")
    }
}

/// A query signature whose types have all been resolved through the oracle.
///
/// Built once per lookup and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSignature {
    pub class_name: String,
    pub member_name: String,
    pub modifier: u16,
    pub params: Vec<TypeHandle>,
    pub return_type: TypeHandle,
    pub generics: GenericsMap,
    pub is_varargs: bool,
}
