use crate::error::ModelError;
use crate::member::{CandidateMember, ResolvedSignature};

/// A class the metamodel has registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassHandle {
    name: String,
}

impl ClassHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Registry of known classes and their declared members.
///
/// Implementations own their locking: `get_or_register_class` may be called
/// concurrently for the same class and must behave as an idempotent upsert.
pub trait Metamodel: Send + Sync {
    /// Looks up an already registered class without loading anything.
    fn find_class(&self, name: &str) -> Option<ClassHandle>;

    /// Returns the registered class, loading and registering it first when the
    /// metamodel has not seen it yet.
    fn get_or_register_class(&self, name: &str) -> Result<ClassHandle, ModelError>;

    /// The declared member matching `signature`, if any.
    ///
    /// With `exact` set, parameter types must be identical; otherwise each
    /// declared parameter only has to be assignable from the query type.
    /// Return types are always compared exactly.
    fn find_member(&self, signature: &ResolvedSignature, exact: bool) -> Option<CandidateMember>;
}
