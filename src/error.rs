pub type SiluetResult<T> = Result<T, SiluetError>;

#[derive(thiserror::Error, Debug)]
pub enum SiluetError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("comparison error: {0}")]
    Comparison(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SiluetError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn comparison(msg: impl Into<String>) -> Self {
        Self::Comparison(msg.into())
    }
}
