use std::io;
use thiserror::Error;

pub type ResultAzCli<T> = Result<T, ErrorAzCli>;

#[derive(Debug, Error)]
pub enum ErrorAzCli {
    #[error("Azure CLI (az) executable not found. Install it to manage contexts.")]
    AzNotInstalled,
    #[error("Not signed in to the Azure CLI. Run `az login` first.")]
    NotLoggedIn,
    #[error("Azure CLI exited with code {code:?}: {stderr}")]
    CommandFailure { code: Option<i32>, stderr: String },
    #[error("Failed to decode Azure CLI output: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Failed to launch Azure CLI: {0}")]
    Io(#[from] io::Error),
}
