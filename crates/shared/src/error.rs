use thiserror::Error;

#[derive(Debug, Error)]
pub enum CubeError {
    #[error("connection failed: {0}")]
    ConnectFailed(String),

    #[error("invalid move script: {0}")]
    InvalidScript(String),
}
