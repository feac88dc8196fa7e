//! Error types for the command line interface

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Natusfera API error
    Api(natusfera_client::NatusferaError),
    /// Failed to write results
    Output(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::Output(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

impl From<natusfera_client::NatusferaError> for CliError {
    fn from(e: natusfera_client::NatusferaError) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Output(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Output(e.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
