//! Request dispatch module
//!
//! Maps `(method, path, body)` to a JSON reply using an ordered route table,
//! independent of any transport. Results are handed to a [`Responder`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::currency::{self, error_reply, Reply};
use super::error::DispatchError;
use crate::routing::{Params, PathPattern, Segment};
use crate::store::CurrencyStore;

/// Content type attached to every dispatcher reply
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Sink for a finished response
pub trait Responder {
    fn send(&mut self, status: u16, headers: &[(&str, &str)], body: String);
}

/// Responder that keeps the response for later inspection
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedResponse {
    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl Responder for CapturedResponse {
    fn send(&mut self, status: u16, headers: &[(&str, &str)], body: String) {
        self.status = status;
        self.headers = headers
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.body = body;
    }
}

type Handler = fn(&mut CurrencyStore, &Params<'_>, Option<&str>) -> Reply;

struct Route {
    method: &'static str,
    pattern: PathPattern,
    handler: Handler,
}

/// Route table, tried in order
const ROUTES: &[Route] = &[
    Route {
        method: "GET",
        pattern: PathPattern::new(&[Segment::Literal("currency")]),
        handler: currency::list_currencies,
    },
    Route {
        method: "GET",
        pattern: PathPattern::new(&[Segment::Literal("currency"), Segment::Word]),
        handler: currency::show_currency,
    },
    Route {
        method: "GET",
        pattern: PathPattern::new(&[Segment::Literal("rate"), Segment::Word]),
        handler: currency::show_rate,
    },
    Route {
        method: "GET",
        pattern: PathPattern::new(&[Segment::Literal("rate"), Segment::Word, Segment::Amount]),
        handler: currency::exchange,
    },
    Route {
        method: "POST",
        pattern: PathPattern::new(&[Segment::Literal("currency")]),
        handler: currency::create_currency,
    },
    Route {
        method: "PUT",
        pattern: PathPattern::new(&[Segment::Literal("currency")]),
        handler: currency::put_currency,
    },
];

/// Currency request dispatcher
///
/// Owns the store. Each request runs under one lock acquisition, so the
/// duplicate check and the insert of a create are never interleaved with
/// another request.
#[derive(Debug)]
pub struct Dispatcher {
    store: Mutex<CurrencyStore>,
}

impl Dispatcher {
    pub const fn new(store: CurrencyStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Handle one request and pass the result to `responder`
    pub fn dispatch<R: Responder + ?Sized>(
        &self,
        method: &str,
        path: &str,
        body: Option<&str>,
        responder: &mut R,
    ) {
        let reply = self.route(method, path, body);
        responder.send(
            reply.status,
            &[("Content-Type", CONTENT_TYPE_JSON)],
            reply.body,
        );
    }

    /// Copy of the stored records, in order
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<crate::store::CurrencyRecord> {
        self.lock().list().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn route(&self, method: &str, path: &str, body: Option<&str>) -> Reply {
        let mut store = self.lock();
        for route in ROUTES.iter().filter(|r| r.method == method) {
            if let Some(params) = route.pattern.match_path(path) {
                return (route.handler)(&mut store, &params, body);
            }
        }
        error_reply(fallback(method))
    }

    fn lock(&self) -> MutexGuard<'_, CurrencyStore> {
        // Handlers never panic mid-update, so a poisoned store is still consistent
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Error for a request no route accepted
fn fallback(method: &str) -> DispatchError {
    match method {
        "GET" => DispatchError::RecordNotFound,
        "POST" | "PUT" => DispatchError::EndpointNotFound,
        _ => DispatchError::MethodNotAllowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    const GBP: &str = r#"{"id":"GBP","name":"Pound Sterling","symbol":"£","rate":1.17,"description":"The currency of the United Kingdom."}"#;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(CurrencyStore::seeded())
    }

    fn call(d: &Dispatcher, method: &str, path: &str, body: Option<&str>) -> (u16, Value) {
        let mut resp = CapturedResponse::default();
        d.dispatch(method, path, body, &mut resp);
        assert_eq!(resp.header("content-type"), Some("application/json"));
        let value = serde_json::from_str(&resp.body).expect("body is JSON");
        (resp.status, value)
    }

    #[test]
    fn test_list_currencies() {
        let (status, body) = call(&dispatcher(), "GET", "/currency", None);
        assert_eq!(status, 200);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["id"], "USD");
        assert_eq!(list[1]["id"], "EUR");
        assert_eq!(list[1]["rate"], json!(0.85));
    }

    #[test]
    fn test_get_seeded_currencies() {
        let d = dispatcher();
        let (status, body) = call(&d, "GET", "/currency/USD", None);
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "name": "United States Dollar",
                "symbol": "$",
                "description": "The primary currency of the United States and many other countries."
            })
        );

        let (status, body) = call(&d, "GET", "/currency/EUR", None);
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "name": "Euro",
                "symbol": "€",
                "description": "The official currency of many European countries."
            })
        );
    }

    #[test]
    fn test_get_unknown_currency() {
        let (status, body) = call(&dispatcher(), "GET", "/currency/XYZ", None);
        assert_eq!(status, 404);
        assert_eq!(body, json!({"status": 404, "message": "Currency not found"}));
    }

    #[test]
    fn test_get_rate() {
        let d = dispatcher();
        let (status, body) = call(&d, "GET", "/rate/EUR", None);
        assert_eq!(status, 200);
        assert_eq!(body, json!({"rate": 0.85}));

        let (status, body) = call(&d, "GET", "/rate/XYZ", None);
        assert_eq!(status, 404);
        assert_eq!(body["message"], "Currency not found");
    }

    #[test]
    fn test_exchange() {
        let d = dispatcher();
        let (status, body) = call(&d, "GET", "/rate/EUR/10", None);
        assert_eq!(status, 200);
        assert_eq!(body["exchange"].as_f64(), Some(8.5));

        let (status, body) = call(&d, "GET", "/rate/USD/0", None);
        assert_eq!(status, 200);
        assert_eq!(body["exchange"].as_f64(), Some(0.0));

        let (status, body) = call(&d, "GET", "/rate/USD/2.5", None);
        assert_eq!(status, 200);
        assert_eq!(body["exchange"].as_f64(), Some(2.5));

        let (status, body) = call(&d, "GET", "/rate/XYZ/10", None);
        assert_eq!(status, 404);
        assert_eq!(body["message"], "Currency not found");
    }

    #[test]
    fn test_unmatched_get_paths() {
        let d = dispatcher();
        for path in [
            "/unknown/path",
            "/currency/",
            "/currency/USD/extra",
            "/rate/EUR/-1",
            "/rate/EUR/1.",
            "/",
        ] {
            let (status, body) = call(&d, "GET", path, None);
            assert_eq!(status, 404, "{path}");
            assert_eq!(body, json!({"status": 404, "message": "Record not found"}));
        }
    }

    #[test]
    fn test_post_creates_currency() {
        let d = dispatcher();
        let (status, body) = call(&d, "POST", "/currency", Some(GBP));
        assert_eq!(status, 201);
        assert_eq!(
            body,
            json!({"status": 201, "message": "Currency added successfully"})
        );

        let (status, body) = call(&d, "GET", "/currency/GBP", None);
        assert_eq!(status, 200);
        assert_eq!(body["name"], "Pound Sterling");
        assert_eq!(body["symbol"], "£");

        let (_, body) = call(&d, "GET", "/currency", None);
        assert_eq!(body.as_array().unwrap()[2]["id"], "GBP");
    }

    #[test]
    fn test_post_duplicate_leaves_store_unchanged() {
        let d = dispatcher();
        let duplicate = r#"{"id":"USD","name":"Fake","symbol":"F","rate":3,"description":"Fake dollar"}"#;
        let (status, body) = call(&d, "POST", "/currency", Some(duplicate));
        assert_eq!(status, 409);
        assert_eq!(body, json!({"status": 409, "message": "Currency already exists"}));

        let (_, body) = call(&d, "GET", "/currency/USD", None);
        assert_eq!(body["name"], "United States Dollar");
        let usd_count = d.snapshot().iter().filter(|r| r.id == "USD").count();
        assert_eq!(usd_count, 1);
    }

    #[test]
    fn test_post_invalid_json() {
        let d = dispatcher();
        let (status, body) = call(&d, "POST", "/currency", Some("{"));
        assert_eq!(status, 400);
        assert_eq!(body, json!({"status": 400, "message": "Invalid JSON format"}));

        let (status, body) = call(&d, "POST", "/currency", None);
        assert_eq!(status, 400);
        assert_eq!(body["message"], "Invalid JSON format");
    }

    #[test]
    fn test_post_missing_fields() {
        let d = dispatcher();
        let zero_rate = r#"{"id":"ZRO","name":"Zero","symbol":"0","rate":0,"description":"Nothing"}"#;
        let (status, body) = call(&d, "POST", "/currency", Some(zero_rate));
        assert_eq!(status, 400);
        assert_eq!(body, json!({"status": 400, "message": "Missing required fields"}));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn test_put_creates_currency() {
        let d = dispatcher();
        let (status, body) = call(&d, "PUT", "/currency", Some(GBP));
        assert_eq!(status, 201);
        assert_eq!(body, json!({"status": 201, "description": "New currency added."}));
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn test_put_failures_report_501_body() {
        let d = dispatcher();
        let rejected = json!({"status": 501, "description": "Currency CAN NOT be added."});

        let (status, body) = call(&d, "PUT", "/currency", Some(r#"{"id":"GBP"}"#));
        assert_eq!(status, 400);
        assert_eq!(body, rejected);

        let (status, body) = call(&d, "PUT", "/currency", Some("not json"));
        assert_eq!(status, 400);
        assert_eq!(body, rejected);

        call(&d, "PUT", "/currency", Some(GBP));
        let (status, body) = call(&d, "PUT", "/currency", Some(GBP));
        assert_eq!(status, 409);
        assert_eq!(body, rejected);
    }

    #[test]
    fn test_post_put_unknown_endpoint() {
        let d = dispatcher();
        for method in ["POST", "PUT"] {
            let (status, body) = call(&d, method, "/currency/USD", Some(GBP));
            assert_eq!(status, 404);
            assert_eq!(body, json!({"status": 404, "message": "Endpoint not found"}));
        }
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn test_method_not_allowed() {
        let d = dispatcher();
        for method in ["DELETE", "PATCH", "HEAD", "get"] {
            let (status, body) = call(&d, method, "/currency", None);
            assert_eq!(status, 405, "{method}");
            assert_eq!(body, json!({"status": 405, "message": "Method not allowed"}));
        }
    }

    #[test]
    fn test_concurrent_creates_keep_ids_unique() {
        let d = Arc::new(dispatcher());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let d = Arc::clone(&d);
                std::thread::spawn(move || {
                    let mut resp = CapturedResponse::default();
                    d.dispatch("POST", "/currency", Some(GBP), &mut resp);
                    resp.status
                })
            })
            .collect();

        let statuses: Vec<u16> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(statuses.iter().filter(|s| **s == 201).count(), 1);
        assert_eq!(statuses.iter().filter(|s| **s == 409).count(), 7);
        assert_eq!(d.len(), 3);
    }
}
