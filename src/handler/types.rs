// Response body types
// JSON payloads returned by the currency routes

use serde::Serialize;

use super::error::DispatchError;

/// `{status, message}` body used by errors and POST success
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: u16,
    pub message: String,
}

impl StatusMessage {
    pub fn new(status: u16, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

impl From<DispatchError> for StatusMessage {
    fn from(err: DispatchError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

/// `{status, description}` body used by PUT
#[derive(Debug, Serialize)]
pub struct StatusDescription {
    pub status: u16,
    pub description: &'static str,
}

/// PUT reports every failure with this body, whatever the real cause.
/// The HTTP status line still carries the real code.
pub const PUT_REJECTED: StatusDescription = StatusDescription {
    status: 501,
    description: "Currency CAN NOT be added.",
};

pub const PUT_ACCEPTED: StatusDescription = StatusDescription {
    status: 201,
    description: "New currency added.",
};

#[derive(Debug, Serialize)]
pub struct RateBody {
    pub rate: f64,
}

#[derive(Debug, Serialize)]
pub struct ExchangeBody {
    pub exchange: f64,
}
