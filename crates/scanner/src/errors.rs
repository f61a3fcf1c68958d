use alloy_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("The node returned no latest block header")]
    HeadNotFound,
    #[error("No transfers observed in range")]
    NoTransfers,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing {0} in env")]
    MissingApiKey(&'static str),
    #[error("The API key is empty")]
    EmptyApiKey,
    #[error("Invalid RPC url: {0}")]
    InvalidRpcUrl(#[from] url::ParseError),
}

/// Error raised while decoding a single log payload.
pub type DecodeError = alloy_sol_types::Error;
