use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("missing required argument '{name}'")]
    MissingArgument { name: &'static str },
    #[error("invalid client id '{0}'")]
    InvalidClientId(String),
    #[error("invalid modality '{0}'")]
    InvalidModality(String),
    #[error("{value} is not a valid MRN: {reason}")]
    InvalidMrn { value: String, reason: &'static str },
    #[error("unknown metadata field '{0}'")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
