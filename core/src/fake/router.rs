//! Resolution of dispatched calls to registered fake responses.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, StripeError};
use crate::object::{coerce, StripeObject};
use crate::params::Params;

use super::recorder::CallRecorder;

type Handler = dyn Fn(&Params) -> Value + Send + Sync;

/// What a fake returns when its method identifier is dispatched.
#[derive(Clone)]
pub enum FakeResponse {
    /// A plain payload, coerced on every dispatch.
    Payload(Value),
    /// An already coerced object, returned unchanged.
    Object(StripeObject),
    /// Called with the normalized parameters; its result is coerced.
    Handler(Arc<Handler>),
}

impl FakeResponse {
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&Params) -> Value + Send + Sync + 'static,
    {
        FakeResponse::Handler(Arc::new(f))
    }

    fn produce(&self, params: &Params) -> Result<StripeObject> {
        match self {
            FakeResponse::Payload(payload) => coerce(payload.clone()),
            FakeResponse::Object(object) => Ok(object.clone()),
            FakeResponse::Handler(handler) => coerce(handler(params)),
        }
    }
}

impl fmt::Debug for FakeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FakeResponse::Payload(payload) => f.debug_tuple("Payload").field(payload).finish(),
            FakeResponse::Object(object) => f.debug_tuple("Object").field(object).finish(),
            FakeResponse::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl From<Value> for FakeResponse {
    fn from(payload: Value) -> Self {
        FakeResponse::Payload(payload)
    }
}

impl From<StripeObject> for FakeResponse {
    fn from(object: StripeObject) -> Self {
        FakeResponse::Object(object)
    }
}

/// Registry of fake responses plus the log of every dispatched call.
#[derive(Debug, Default)]
pub struct FakeRouter {
    registrations: Mutex<IndexMap<String, FakeResponse>>,
    recorder: CallRecorder,
}

impl FakeRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a response. Re-registering a key replaces its response and
    /// keeps its original position in the wildcard scan order.
    pub fn register(&self, method: impl Into<String>, response: FakeResponse) {
        self.registrations.lock().insert(method.into(), response);
    }

    pub fn is_registered(&self, method: &str) -> bool {
        self.registrations.lock().contains_key(method)
    }

    pub fn recorder(&self) -> &CallRecorder {
        &self.recorder
    }

    /// Record the call, then resolve it: exact key first, then wildcard keys
    /// in registration order.
    pub fn resolve(&self, method: &str, params: Params) -> Result<StripeObject> {
        self.recorder.record(method, params.clone());

        // Clone the response out so handlers run without the registry locked.
        let response = self.lookup(method);
        match response {
            Some(response) => {
                debug!(method, "dispatching fake");
                response.produce(&params)
            }
            None => {
                warn!(method, "no fake registered");
                Err(StripeError::FakeNotRegistered {
                    method: method.to_string(),
                })
            }
        }
    }

    fn lookup(&self, method: &str) -> Option<FakeResponse> {
        let registrations = self.registrations.lock();
        if let Some(response) = registrations.get(method) {
            return Some(response.clone());
        }
        registrations
            .iter()
            .filter(|(key, _)| key.contains('*'))
            .find(|(key, _)| wildcard_matches(key, method))
            .map(|(_, response)| response.clone())
    }
}

/// Anchored glob match where `*` matches any run of characters and every
/// other character is literal.
pub fn wildcard_matches(pattern: &str, method: &str) -> bool {
    let escaped: Vec<String> = pattern.split('*').map(regex::escape).collect();
    let source = format!("^{}$", escaped.join(".*"));
    match Regex::new(&source) {
        Ok(regex) => regex.is_match(method),
        Err(err) => {
            warn!(pattern, %err, "unusable wildcard pattern");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wildcard_is_anchored() {
        assert!(wildcard_matches("customers.*", "customers.create"));
        assert!(wildcard_matches("*.create", "prices.create"));
        assert!(!wildcard_matches("customers.*", "xcustomers.create"));
        assert!(!wildcard_matches("customers.c*", "customers.retrieve"));
    }

    #[test]
    fn dots_in_pattern_are_literal() {
        assert!(!wildcard_matches("customers.*", "customersXcreate"));
        assert!(wildcard_matches("customers.*", "customers."));
    }

    #[test]
    fn exact_beats_wildcard_regardless_of_order() {
        let router = FakeRouter::new();
        router.register("customers.*", json!({"id": "cus_wild"}).into());
        router.register("customers.create", json!({"id": "cus_exact"}).into());

        let created = router.resolve("customers.create", Params::new()).unwrap();
        assert_eq!(created.id(), Some("cus_exact"));
        let fetched = router.resolve("customers.retrieve", Params::new()).unwrap();
        assert_eq!(fetched.id(), Some("cus_wild"));
    }

    #[test]
    fn first_matching_wildcard_wins() {
        let router = FakeRouter::new();
        router.register("customers.*", json!({"id": "cus_first"}).into());
        router.register("*.retrieve", json!({"id": "cus_second"}).into());
        let object = router.resolve("customers.retrieve", Params::new()).unwrap();
        assert_eq!(object.id(), Some("cus_first"));
    }

    #[test]
    fn reregistering_keeps_position_and_replaces_value() {
        let router = FakeRouter::new();
        router.register("customers.*", json!({"id": "cus_a"}).into());
        router.register("*.retrieve", json!({"id": "cus_b"}).into());
        router.register("customers.*", json!({"id": "cus_c"}).into());
        let object = router.resolve("customers.retrieve", Params::new()).unwrap();
        assert_eq!(object.id(), Some("cus_c"));
    }

    #[test]
    fn unresolved_call_is_still_recorded() {
        let router = FakeRouter::new();
        let err = router.resolve("customers.retrieve", Params::new()).unwrap_err();
        assert_eq!(err.to_string(), "no fake registered for method customers.retrieve");
        assert_eq!(router.recorder().call_count("customers.retrieve"), 1);
    }

    #[test]
    fn object_responses_are_returned_unchanged() {
        let router = FakeRouter::new();
        let object = coerce(json!({"id": "zzz_1", "object": "thing"})).unwrap();
        router.register("things.retrieve", object.clone().into());
        assert_eq!(router.resolve("things.retrieve", Params::new()).unwrap(), object);
    }

    #[test]
    fn handler_receives_params() {
        let router = FakeRouter::new();
        router.register(
            "customers.create",
            FakeResponse::handler(|params| json!({"id": "cus_1", "email": params["email"]})),
        );
        let mut params = Params::new();
        params.insert("email".into(), json!("dyn@example.com"));
        let object = router.resolve("customers.create", params).unwrap();
        assert_eq!(object.str("email"), Some("dyn@example.com"));
        assert_eq!(object.object_type(), Some("customer"));
    }

    #[test]
    fn non_object_payload_is_a_coercion_error() {
        let router = FakeRouter::new();
        router.register("customers.create", json!("oops").into());
        let err = router.resolve("customers.create", Params::new()).unwrap_err();
        assert!(matches!(err, StripeError::Coercion(_)));
    }
}
