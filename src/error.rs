use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Invalid image payload: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    Transport(String),

    #[error("Failed to build chat request: {0}")]
    RequestBuild(#[from] async_openai::error::OpenAIError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Self::Config(s) => Self::Config(s.clone()),
            Self::ModelLoad(s) => Self::ModelLoad(s.clone()),
            Self::Decode(s) => Self::Decode(s.clone()),
            Self::Validation(s) => Self::Validation(s.clone()),
            Self::Inference(s) => Self::Inference(s.clone()),
            Self::Upstream { status, body } => Self::Upstream {
                status: *status,
                body: body.clone(),
            },
            Self::Transport(s) => Self::Transport(s.clone()),
            Self::Internal(s) => Self::Internal(s.clone()),
            // For errors that can't be cloned, convert to string representation
            Self::RequestBuild(e) => Self::Internal(format!("Failed to build chat request: {}", e)),
            Self::Yaml(e) => Self::Internal(format!("YAML error: {}", e)),
            Self::Io(e) => Self::Internal(format!("IO error: {}", e)),
            Self::AddrParse(e) => Self::Internal(format!("Address parse error: {}", e)),
        }
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable name reported to clients in the `type` field of error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigError",
            Self::ModelLoad(_) => "StartupError",
            Self::Decode(_) => "DecodeError",
            Self::Validation(_) => "ValidationError",
            Self::Inference(_) => "InferenceError",
            Self::Upstream { .. } => "UpstreamError",
            Self::Transport(_) => "TransportError",
            Self::RequestBuild(_) => "RequestBuildError",
            Self::Yaml(_) => "YamlError",
            Self::Io(_) => "IoError",
            Self::AddrParse(_) => "AddrParseError",
            Self::Internal(_) => "InternalError",
        }
    }
}
