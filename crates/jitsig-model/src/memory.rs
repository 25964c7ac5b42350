use std::collections::{HashMap, HashSet};

use jitsig_descriptor::{PrimitiveKind, TypeDescriptor};

use crate::handle::{ClassProvider, TypeHandle, TypeOracle};
use crate::modifiers::{ACC_PUBLIC, ACC_STATIC, ACC_VARARGS};
use crate::stub::ClassStub;

const OBJECT: &str = "java.lang.Object";

/// Interfaces every array type implements.
const ARRAY_INTERFACES: [&str; 2] = ["java.lang.Cloneable", "java.io.Serializable"];

/// A [`TypeOracle`] over a fixed set of class stubs.
///
/// Primitives always resolve; reference types resolve when a stub with that
/// binary name was added; arrays resolve when their element type does.
#[derive(Debug, Clone, Default)]
pub struct MemoryTypeOracle {
    classes: HashMap<String, ClassStub>,
}

impl MemoryTypeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small slice of `java.base`, enough for resolver tests that do not
    /// need a real JDK.
    pub fn with_minimal_jdk() -> Self {
        const PS: u16 = ACC_PUBLIC | ACC_STATIC;

        let mut this = Self::new();

        this.add_class(
            ClassStub::new(OBJECT)
                .with_super(None)
                .with_method("<init>", "()V", ACC_PUBLIC)
                .with_method("hashCode", "()I", ACC_PUBLIC)
                .with_method("equals", "(Ljava/lang/Object;)Z", ACC_PUBLIC)
                .with_method("toString", "()Ljava/lang/String;", ACC_PUBLIC),
        );
        this.add_class(ClassStub::interface("java.lang.Cloneable"));
        this.add_class(ClassStub::interface("java.io.Serializable"));
        this.add_class(ClassStub::interface("java.lang.CharSequence"));
        this.add_class(ClassStub::interface("java.lang.Comparable"));
        this.add_class(
            ClassStub::new("java.lang.String")
                .with_interfaces(&[
                    "java.io.Serializable",
                    "java.lang.Comparable",
                    "java.lang.CharSequence",
                ])
                .with_method("<init>", "([C)V", ACC_PUBLIC)
                .with_method("length", "()I", ACC_PUBLIC)
                .with_method("charAt", "(I)C", ACC_PUBLIC)
                .with_method("valueOf", "(I)Ljava/lang/String;", PS)
                .with_method("valueOf", "(Ljava/lang/Object;)Ljava/lang/String;", PS)
                .with_method(
                    "format",
                    "(Ljava/lang/String;[Ljava/lang/Object;)Ljava/lang/String;",
                    PS | ACC_VARARGS,
                ),
        );
        this.add_class(
            ClassStub::new("java.lang.Number").with_interfaces(&["java.io.Serializable"]),
        );
        this.add_class(
            ClassStub::new("java.lang.Integer")
                .with_super(Some("java.lang.Number"))
                .with_interfaces(&["java.lang.Comparable"])
                .with_method("valueOf", "(I)Ljava/lang/Integer;", PS)
                .with_method("parseInt", "(Ljava/lang/String;)I", PS)
                .with_method("intValue", "()I", ACC_PUBLIC),
        );
        this.add_class(ClassStub::new("java.lang.Class"));
        this.add_class(ClassStub::interface("java.util.Collection"));
        this.add_class(
            ClassStub::interface("java.util.List").with_interfaces(&["java.util.Collection"]),
        );
        this.add_class(
            ClassStub::new("java.util.AbstractList").with_interfaces(&["java.util.List"]),
        );
        this.add_class(
            ClassStub::new("java.util.ArrayList")
                .with_super(Some("java.util.AbstractList"))
                .with_interfaces(&[
                    "java.util.List",
                    "java.lang.Cloneable",
                    "java.io.Serializable",
                ])
                .with_method("<init>", "()V", ACC_PUBLIC)
                .with_method("<init>", "(I)V", ACC_PUBLIC)
                .with_method("add", "(Ljava/lang/Object;)Z", ACC_PUBLIC)
                .with_method("add", "(ILjava/lang/Object;)V", ACC_PUBLIC)
                .with_method("size", "()I", ACC_PUBLIC),
        );
        this.add_class(
            ClassStub::new("java.util.Arrays")
                .with_method(
                    "copyOf",
                    "([Ljava/lang/Object;ILjava/lang/Class;)[Ljava/lang/Object;",
                    PS,
                )
                .with_method("copyOf", "([II)[I", PS)
                .with_method(
                    "asList",
                    "([Ljava/lang/Object;)Ljava/util/List;",
                    PS | ACC_VARARGS,
                ),
        );

        this
    }

    /// Adds or replaces the stub for `stub.binary_name`.
    pub fn add_class(&mut self, stub: ClassStub) {
        self.classes.insert(stub.binary_name.clone(), stub);
    }

    pub fn contains(&self, binary_name: &str) -> bool {
        self.classes.contains_key(binary_name)
    }

    fn is_subclass(&self, from: &str, to: &str) -> bool {
        let mut pending = vec![from];
        let mut seen = HashSet::new();
        while let Some(name) = pending.pop() {
            if name == to {
                return true;
            }
            if !seen.insert(name) {
                continue;
            }
            let Some(stub) = self.classes.get(name) else {
                continue;
            };
            pending.extend(stub.super_binary_name.as_deref());
            pending.extend(stub.interfaces.iter().map(String::as_str));
        }
        false
    }

    fn is_descriptor_assignable(&self, from: &TypeDescriptor, to: &TypeDescriptor) -> bool {
        if from == to {
            return true;
        }
        match (from, to) {
            (TypeDescriptor::Primitive(_), _) | (_, TypeDescriptor::Primitive(_)) => false,
            (_, TypeDescriptor::Reference(target)) if target == OBJECT => true,
            (TypeDescriptor::Array { .. }, TypeDescriptor::Reference(target)) => {
                ARRAY_INTERFACES.contains(&target.as_str())
            }
            (TypeDescriptor::Reference(source), TypeDescriptor::Reference(target)) => {
                self.is_subclass(source, target)
            }
            (TypeDescriptor::Array { .. }, TypeDescriptor::Array { .. }) => {
                match (from.component_type(), to.component_type()) {
                    (Some(from), Some(to)) if !from.is_primitive() && !to.is_primitive() => {
                        self.is_descriptor_assignable(&from, &to)
                    }
                    _ => false,
                }
            }
            (TypeDescriptor::Reference(_), TypeDescriptor::Array { .. }) => false,
        }
    }
}

impl TypeOracle for MemoryTypeOracle {
    fn resolve(&self, name: &str) -> Option<TypeHandle> {
        let descriptor = TypeDescriptor::parse_name(name).ok()?;
        let known = match descriptor.element() {
            TypeDescriptor::Primitive(PrimitiveKind::Void) => !descriptor.is_array(),
            TypeDescriptor::Primitive(_) => true,
            TypeDescriptor::Reference(binary_name) => self.contains(binary_name),
            TypeDescriptor::Array { .. } => false,
        };
        known.then(|| TypeHandle::new(descriptor))
    }

    fn is_assignable(&self, from: &TypeHandle, to: &TypeHandle) -> bool {
        self.is_descriptor_assignable(from.descriptor(), to.descriptor())
    }
}

impl ClassProvider for MemoryTypeOracle {
    fn lookup_class(&self, binary_name: &str) -> Option<ClassStub> {
        self.classes.get(binary_name).cloned()
    }
}
