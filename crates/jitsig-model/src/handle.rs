use std::fmt;

use jitsig_descriptor::TypeDescriptor;

use crate::stub::ClassStub;

/// A type the oracle has vouched for.
///
/// Two handles are equal exactly when they denote the same type, regardless of
/// how the name was spelled in the log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeHandle(TypeDescriptor);

impl TypeHandle {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self(descriptor)
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.0
    }

    /// Canonical source-level name (`int[]`, `java.lang.String`).
    pub fn name(&self) -> String {
        self.0.to_string()
    }

    pub fn is_array(&self) -> bool {
        self.0.is_array()
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Authoritative source of type identity and subtyping.
///
/// Backends may read class files offline or ask a live runtime; callers must
/// not assume which.
pub trait TypeOracle: Send + Sync {
    /// Resolves a canonical (`int[]`), binary (`[I`, `[Ljava.lang.String;`) or
    /// internal (`java/lang/String`) name. `None` when the type is unknown.
    fn resolve(&self, name: &str) -> Option<TypeHandle>;

    /// Whether a value of type `from` can be stored in a slot of type `to`.
    fn is_assignable(&self, from: &TypeHandle, to: &TypeHandle) -> bool;

    fn component_type(&self, ty: &TypeHandle) -> Option<TypeHandle> {
        ty.descriptor().component_type().map(TypeHandle::new)
    }
}

/// On-demand class loading used to grow a metamodel with classes the log
/// references but never declared.
pub trait ClassProvider: Send + Sync {
    fn lookup_class(&self, binary_name: &str) -> Option<ClassStub>;
}
