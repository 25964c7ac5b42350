use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jitsig_descriptor::parse_method_descriptor;
use jitsig_model::modifiers::{ACC_VARARGS, METHOD_MODIFIERS};
use jitsig_model::{
    CandidateMember, ClassHandle, ClassProvider, ClassStub, MemoryTypeOracle, Metamodel,
    ModelError, ResolvedSignature, TypeHandle, TypeOracle,
};
use parking_lot::RwLock;

use crate::matcher::match_parameters;

#[derive(Debug)]
struct MetaMember {
    member: CandidateMember,
    params: Vec<TypeHandle>,
    return_type: TypeHandle,
}

#[derive(Debug)]
struct MetaClass {
    members: Vec<MetaMember>,
}

impl MetaClass {
    fn from_stub(stub: &ClassStub) -> Self {
        let class_name = stub.binary_name.replace('/', ".");
        let members = stub
            .methods
            .iter()
            .filter(|method| method.name != "<clinit>")
            .filter_map(|method| {
                let descriptor = match parse_method_descriptor(&method.descriptor) {
                    Ok(descriptor) => descriptor,
                    Err(err) => {
                        tracing::warn!(
                            class = %class_name,
                            method = %method.name,
                            error = %err,
                            "skipping method with invalid descriptor"
                        );
                        return None;
                    }
                };
                let params: Vec<TypeHandle> =
                    descriptor.params.into_iter().map(TypeHandle::new).collect();
                let return_type = TypeHandle::new(descriptor.return_type);
                let name = if method.name == "<init>" {
                    class_name.clone()
                } else {
                    method.name.clone()
                };

                Some(MetaMember {
                    member: CandidateMember {
                        class_name: class_name.clone(),
                        name,
                        modifier: method.access_flags & METHOD_MODIFIERS,
                        param_types: params.iter().map(TypeHandle::name).collect(),
                        return_type: return_type.name(),
                        is_varargs: method.access_flags & ACC_VARARGS != 0,
                    },
                    params,
                    return_type,
                })
            })
            .collect();

        Self { members }
    }
}

/// A [`Metamodel`] that registers classes from a [`ClassProvider`] on first
/// use and matches members through a [`TypeOracle`].
///
/// Registration is an upsert under a write lock; concurrent requests for the
/// same class register it once.
pub struct MemoryMetamodel {
    oracle: Arc<dyn TypeOracle>,
    provider: Arc<dyn ClassProvider>,
    classes: RwLock<HashMap<String, Arc<MetaClass>>>,
    registrations: AtomicUsize,
}

impl MemoryMetamodel {
    pub fn new(oracle: Arc<dyn TypeOracle>, provider: Arc<dyn ClassProvider>) -> Self {
        Self {
            oracle,
            provider,
            classes: RwLock::new(HashMap::new()),
            registrations: AtomicUsize::new(0),
        }
    }

    /// Uses the same in-memory oracle for types and class stubs.
    pub fn from_oracle(oracle: Arc<MemoryTypeOracle>) -> Self {
        Self::new(oracle.clone(), oracle)
    }

    /// Registers `stub`, replacing any earlier registration of the same class.
    pub fn register_class(&self, stub: &ClassStub) -> ClassHandle {
        let name = stub.binary_name.replace('/', ".");
        let class = Arc::new(MetaClass::from_stub(stub));
        self.classes.write().insert(name.clone(), class);
        ClassHandle::new(name)
    }

    pub fn class_count(&self) -> usize {
        self.classes.read().len()
    }

    /// Classes loaded on demand through the provider so far.
    pub fn registration_count(&self) -> usize {
        self.registrations.load(Ordering::Relaxed)
    }

    /// The declared members of a registered class, in declaration order.
    pub fn members(&self, class_name: &str) -> Vec<CandidateMember> {
        self.classes
            .read()
            .get(class_name)
            .map(|class| {
                class
                    .members
                    .iter()
                    .map(|meta| meta.member.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for MemoryMetamodel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryMetamodel")
            .field("class_count", &self.class_count())
            .field("registrations", &self.registration_count())
            .finish_non_exhaustive()
    }
}

impl Metamodel for MemoryMetamodel {
    fn find_class(&self, name: &str) -> Option<ClassHandle> {
        self.classes
            .read()
            .contains_key(name)
            .then(|| ClassHandle::new(name))
    }

    fn get_or_register_class(&self, name: &str) -> Result<ClassHandle, ModelError> {
        if let Some(handle) = self.find_class(name) {
            return Ok(handle);
        }

        let stub = self
            .provider
            .lookup_class(name)
            .ok_or_else(|| ModelError::ClassNotFound {
                name: name.to_string(),
            })?;
        let class = MetaClass::from_stub(&stub);

        let mut classes = self.classes.write();
        if let Entry::Vacant(slot) = classes.entry(name.to_string()) {
            tracing::debug!(class = name, members = class.members.len(), "registered class");
            slot.insert(Arc::new(class));
            self.registrations.fetch_add(1, Ordering::Relaxed);
        }
        Ok(ClassHandle::new(name))
    }

    fn find_member(&self, signature: &ResolvedSignature, exact: bool) -> Option<CandidateMember> {
        let class = self.classes.read().get(&signature.class_name).cloned()?;

        class
            .members
            .iter()
            .filter(|meta| {
                meta.member.name == signature.member_name
                    && meta.return_type == signature.return_type
            })
            .find(|meta| {
                match_parameters(
                    self.oracle.as_ref(),
                    meta.member.is_varargs,
                    &meta.params,
                    &signature.params,
                    exact,
                )
            })
            .map(|meta| meta.member.clone())
    }
}
