use thiserror::Error;

pub type Result<T, E = SignatureError> = std::result::Result<T, E>;

/// Failures the resolver reports to its caller.
///
/// Misses (unknown dictionary ids, members the metamodel does not declare) are
/// `None` results instead; they are routine while ingesting a log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The text does not have the shape of a signature.
    #[error("could not parse signature: '{line}'")]
    Parse { line: String },
    /// The oracle does not know a type named in the signature.
    #[error("could not resolve type '{token}'")]
    UnknownType { token: String },
    #[error(transparent)]
    Descriptor(#[from] jitsig_descriptor::Error),
}

impl SignatureError {
    pub(crate) fn parse(line: &str) -> Self {
        SignatureError::Parse {
            line: line.to_string(),
        }
    }

    pub(crate) fn unknown_type(token: &str) -> Self {
        SignatureError::UnknownType {
            token: token.to_string(),
        }
    }
}
