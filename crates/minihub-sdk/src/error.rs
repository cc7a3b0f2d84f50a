//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC error from the fullnode
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing required field in an on-chain object or event
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Field present but not decodable into the expected type
    #[error("Invalid field `{field}`: {reason}")]
    InvalidField {
        /// Field name
        field: String,
        /// What went wrong
        reason: String,
    },

    /// Object is not of the expected Move type
    #[error("Unexpected object type: expected {expected}, found {found}")]
    UnexpectedType {
        /// Expected struct name
        expected: String,
        /// Type reported by the node
        found: String,
    },

    /// Transaction build error
    #[error("Transaction build error: {0}")]
    TxBuild(String),
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<minihub_primitives::AddressError> for SdkError {
    fn from(e: minihub_primitives::AddressError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}
