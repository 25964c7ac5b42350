use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("class not found: {name}")]
    ClassNotFound { name: String },
}
