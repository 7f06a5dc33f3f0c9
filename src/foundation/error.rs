pub type SketchResult<T> = Result<T, SketchError>;

#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported encoder: {0}")]
    UnsupportedEncoder(String),

    #[error("encoder fault: {0}")]
    EncoderFault(String),

    #[error("malformed entity {index} in layer '{layer}'")]
    MalformedEntity { layer: String, index: usize },

    #[error("recorder state error: {0}")]
    State(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unsupported_encoder(msg: impl Into<String>) -> Self {
        Self::UnsupportedEncoder(msg.into())
    }

    pub fn encoder_fault(msg: impl Into<String>) -> Self {
        Self::EncoderFault(msg.into())
    }

    pub fn malformed_entity(layer: impl Into<String>, index: usize) -> Self {
        Self::MalformedEntity {
            layer: layer.into(),
            index,
        }
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
