//! Per-method log of dispatched calls.

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::params::Params;

/// Records the parameter payload of every dispatched call, keyed by the exact
/// method identifier, in call order.
#[derive(Debug, Default)]
pub struct CallRecorder {
    calls: Mutex<IndexMap<String, Vec<Params>>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, method: &str, params: Params) {
        self.calls
            .lock()
            .entry(method.to_string())
            .or_default()
            .push(params);
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().get(method).map_or(0, Vec::len)
    }

    /// Parameters of the `index`-th call (zero-based), if there was one.
    pub fn get_call(&self, method: &str, index: usize) -> Option<Params> {
        self.calls
            .lock()
            .get(method)
            .and_then(|calls| calls.get(index))
            .cloned()
    }

    pub fn calls(&self, method: &str) -> Vec<Params> {
        self.calls.lock().get(method).cloned().unwrap_or_default()
    }

    /// Identifiers that have been called, in first-call order.
    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().keys().cloned().collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: serde_json::Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn records_in_call_order() {
        let recorder = CallRecorder::new();
        recorder.record("customers.create", params(json!({"n": 1})));
        recorder.record("customers.create", params(json!({"n": 2})));

        assert_eq!(recorder.call_count("customers.create"), 2);
        assert_eq!(recorder.get_call("customers.create", 0).unwrap()["n"], 1);
        assert_eq!(recorder.get_call("customers.create", 1).unwrap()["n"], 2);
        assert!(recorder.get_call("customers.create", 2).is_none());
    }

    #[test]
    fn lookups_are_exact() {
        let recorder = CallRecorder::new();
        recorder.record("customers.create", Params::new());
        assert!(recorder.was_called("customers.create"));
        assert!(!recorder.was_called("customers.*"));
        assert_eq!(recorder.call_count("customers.update"), 0);
    }

    #[test]
    fn methods_keep_first_call_order() {
        let recorder = CallRecorder::new();
        recorder.record("prices.create", Params::new());
        recorder.record("customers.create", Params::new());
        recorder.record("prices.create", Params::new());
        assert_eq!(recorder.methods(), vec!["prices.create", "customers.create"]);
    }

    #[test]
    fn clear_discards_everything() {
        let recorder = CallRecorder::new();
        recorder.record("customers.create", Params::new());
        recorder.clear();
        assert!(!recorder.was_called("customers.create"));
        assert!(recorder.methods().is_empty());
    }
}
