//! Currency route handlers
//!
//! Each handler runs with exclusive access to the store and returns a
//! status plus serialized JSON body.

use serde::Serialize;
use serde_json::Value;

use super::error::DispatchError;
use super::types::{ExchangeBody, RateBody, StatusMessage, PUT_ACCEPTED, PUT_REJECTED};
use crate::logger;
use crate::routing::Params;
use crate::store::{CurrencyRecord, CurrencyStore};

/// Status and JSON text produced by a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

const INTERNAL_ERROR_BODY: &str = r#"{"status":500,"message":"Internal server error"}"#;

/// Serialize a body into a reply
pub fn json_reply<T: Serialize + ?Sized>(status: u16, body: &T) -> Reply {
    match serde_json::to_string(body) {
        Ok(json) => Reply { status, body: json },
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            Reply {
                status: 500,
                body: INTERNAL_ERROR_BODY.to_string(),
            }
        }
    }
}

/// Reply for a failure, `{status, message}` shaped
pub fn error_reply(err: DispatchError) -> Reply {
    json_reply(err.status(), &StatusMessage::from(err))
}

/// GET /currency
pub fn list_currencies(store: &mut CurrencyStore, _: &Params<'_>, _: Option<&str>) -> Reply {
    json_reply(200, store.list())
}

/// GET /currency/{id}
pub fn show_currency(store: &mut CurrencyStore, params: &Params<'_>, _: Option<&str>) -> Reply {
    match find(store, params) {
        Some(record) => json_reply(200, &record.summary()),
        None => error_reply(DispatchError::CurrencyNotFound),
    }
}

/// GET /rate/{id}
pub fn show_rate(store: &mut CurrencyStore, params: &Params<'_>, _: Option<&str>) -> Reply {
    match find(store, params) {
        Some(record) => json_reply(200, &RateBody { rate: record.rate }),
        None => error_reply(DispatchError::CurrencyNotFound),
    }
}

/// GET /rate/{id}/{amount}
pub fn exchange(store: &mut CurrencyStore, params: &Params<'_>, _: Option<&str>) -> Reply {
    let Some(record) = find(store, params) else {
        return error_reply(DispatchError::CurrencyNotFound);
    };
    // The pattern only admits digit strings, which always parse
    let Some(amount) = params.get(1).and_then(|raw| raw.parse::<f64>().ok()) else {
        return error_reply(DispatchError::RecordNotFound);
    };
    json_reply(
        200,
        &ExchangeBody {
            exchange: amount * record.rate,
        },
    )
}

/// POST /currency
pub fn create_currency(store: &mut CurrencyStore, _: &Params<'_>, body: Option<&str>) -> Reply {
    match insert_from_body(store, body) {
        Ok(()) => json_reply(201, &StatusMessage::new(201, "Currency added successfully")),
        Err(err) => error_reply(err),
    }
}

/// PUT /currency
///
/// Same validation as POST; error bodies are always `PUT_REJECTED`.
pub fn put_currency(store: &mut CurrencyStore, _: &Params<'_>, body: Option<&str>) -> Reply {
    match insert_from_body(store, body) {
        Ok(()) => json_reply(201, &PUT_ACCEPTED),
        Err(err) => json_reply(err.status(), &PUT_REJECTED),
    }
}

fn find<'s>(store: &'s CurrencyStore, params: &Params<'_>) -> Option<&'s CurrencyRecord> {
    params.get(0).and_then(|id| store.lookup(id))
}

/// Parse, validate and insert a new record
fn insert_from_body(store: &mut CurrencyStore, body: Option<&str>) -> Result<(), DispatchError> {
    let value: Value =
        serde_json::from_str(body.unwrap_or_default()).map_err(|_| DispatchError::InvalidJson)?;
    let record = record_from_json(&value).ok_or(DispatchError::MissingFields)?;

    if store.lookup(&record.id).is_some() {
        logger::log_debug(&format!("Rejected duplicate currency: {}", record.id));
        return Err(DispatchError::AlreadyExists);
    }

    logger::log_debug(&format!("Currency added: {}", record.id));
    store.insert(record);
    Ok(())
}

/// Extract a complete record from a JSON object
///
/// Missing, null, empty-string, zero and wrongly typed fields all count as absent.
fn record_from_json(value: &Value) -> Option<CurrencyRecord> {
    let object = value.as_object()?;
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    };

    let record = CurrencyRecord {
        id: text("id")?,
        name: text("name")?,
        symbol: text("symbol")?,
        rate: object.get("rate").and_then(Value::as_f64)?,
        description: text("description")?,
    };
    record.is_complete().then_some(record)
}
