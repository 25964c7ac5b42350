use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidDescriptor(String),
    InvalidTypeName(String),
    UnknownPrimitive(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDescriptor(desc) => write!(f, "invalid descriptor: {desc}"),
            Error::InvalidTypeName(name) => write!(f, "invalid type name: {name}"),
            Error::UnknownPrimitive(name) => write!(f, "{name} is not a primitive type"),
        }
    }
}

impl std::error::Error for Error {}
