// Dispatch error module
// Request-level failures and the status codes they map to

use thiserror::Error;

/// Failure while handling a currency request
///
/// `Display` is the exact message reported in the JSON body.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Body is absent or not valid JSON
    #[error("Invalid JSON format")]
    InvalidJson,
    /// A required field is missing, empty, zero, or of the wrong type
    #[error("Missing required fields")]
    MissingFields,
    /// A record with the same id is already stored
    #[error("Currency already exists")]
    AlreadyExists,
    /// Well-formed lookup for an unknown id
    #[error("Currency not found")]
    CurrencyNotFound,
    /// GET path matched no route
    #[error("Record not found")]
    RecordNotFound,
    /// POST/PUT path matched no route
    #[error("Endpoint not found")]
    EndpointNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl DispatchError {
    pub const fn status(self) -> u16 {
        match self {
            Self::InvalidJson | Self::MissingFields => 400,
            Self::AlreadyExists => 409,
            Self::CurrencyNotFound | Self::RecordNotFound | Self::EndpointNotFound => 404,
            Self::MethodNotAllowed => 405,
        }
    }
}
