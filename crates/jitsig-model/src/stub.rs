use serde::{Deserialize, Serialize};

use crate::modifiers::{ACC_ABSTRACT, ACC_INTERFACE, ACC_PUBLIC};

/// Minimal class model handed out by a [`crate::ClassProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStub {
    /// Binary name, e.g. `java.util.ArrayList`.
    pub binary_name: String,
    #[serde(default)]
    pub access_flags: u16,
    #[serde(default)]
    pub super_binary_name: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodStub>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodStub {
    pub name: String,
    /// JVM method descriptor, e.g. `(ILjava/lang/Object;)V`.
    pub descriptor: String,
    #[serde(default)]
    pub access_flags: u16,
}

impl ClassStub {
    pub fn new(binary_name: impl Into<String>) -> Self {
        Self {
            binary_name: binary_name.into(),
            access_flags: ACC_PUBLIC,
            super_binary_name: Some("java.lang.Object".to_string()),
            interfaces: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_super(mut self, super_binary_name: Option<&str>) -> Self {
        self.super_binary_name = super_binary_name.map(str::to_string);
        self
    }

    pub fn with_interfaces(mut self, interfaces: &[&str]) -> Self {
        self.interfaces = interfaces.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_method(mut self, name: &str, descriptor: &str, access_flags: u16) -> Self {
        self.methods.push(MethodStub {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags,
        });
        self
    }

    pub fn interface(binary_name: impl Into<String>) -> Self {
        Self {
            access_flags: ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
            super_binary_name: None,
            ..Self::new(binary_name)
        }
    }
}
