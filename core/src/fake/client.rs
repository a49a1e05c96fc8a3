use serde_json::Value;
use tracing::warn;

use crate::api::StripeApi;
use crate::error::Result;
use crate::method::MethodId;
use crate::object::StripeObject;
use crate::params::{normalize_args, Params};

use super::fixtures::{self, ResourceKind};
use super::router::{FakeResponse, FakeRouter};

/// In-process stand-in for the Stripe API.
///
/// Register responses with [`fake`](Self::fake), hand the client to the code
/// under test (it implements [`StripeApi`]), then assert on the recorded
/// calls. Create one per test.
#[derive(Debug, Default)]
pub struct FakeClient {
    router: FakeRouter,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client that answers every resource with freshly generated fixtures:
    /// `all`/`search`/`allSources` return a one-item list, `delete` and
    /// `deleteSource` return a deleted envelope, anything else a single object.
    pub fn with_fixture_defaults() -> Self {
        let client = Self::new();

        // Bank accounts share the `customers` resource, so their wildcard has
        // to precede `customers.*` in the scan order.
        let bank = ResourceKind::BankAccount;
        client.fake("customers.allSources", list_handler(bank));
        client.fake("customers.deleteSource", deleted_handler(bank));
        client.fake("customers.*Source", object_handler(bank));

        for kind in ResourceKind::ALL.iter().copied().filter(|k| *k != bank) {
            let resource = kind.resource();
            client.fake(format!("{resource}.all"), list_handler(kind));
            client.fake(format!("{resource}.search"), list_handler(kind));
            client.fake(format!("{resource}.delete"), deleted_handler(kind));
            client.fake(format!("{resource}.*"), object_handler(kind));
        }
        client
    }

    /// Register the response for a method identifier (`*` allowed within
    /// either segment). Identifiers without exactly two dot-separated
    /// segments are logged and ignored.
    pub fn fake(&self, method: impl Into<String>, response: impl Into<FakeResponse>) -> &Self {
        self.register(method.into(), response.into());
        self
    }

    /// Register several responses at once, merging into existing ones.
    pub fn fake_many<I, K, R>(&self, fakes: I) -> &Self
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<FakeResponse>,
    {
        for (method, response) in fakes {
            self.register(method.into(), response.into());
        }
        self
    }

    fn register(&self, method: String, response: FakeResponse) {
        if let Err(err) = MethodId::parse(&method) {
            warn!(%err, "ignoring fake registration");
            return;
        }
        self.router.register(method, response);
    }

    pub fn is_faked(&self, method: &str) -> bool {
        self.router.is_registered(method)
    }

    /// Dispatch a call with an already normalized payload.
    pub fn resolve(&self, method: &str, params: Params) -> Result<StripeObject> {
        self.router.resolve(method, params)
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.router.recorder().was_called(method)
    }

    pub fn was_called_times(&self, method: &str, times: usize) -> bool {
        self.call_count(method) == times
    }

    /// True if any recorded call to `method` had exactly these parameters.
    pub fn was_called_with(&self, method: &str, params: &Value) -> bool {
        self.router
            .recorder()
            .calls(method)
            .into_iter()
            .any(|call| Value::Object(call) == *params)
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.router.recorder().call_count(method)
    }

    pub fn get_call(&self, method: &str, index: usize) -> Option<Params> {
        self.router.recorder().get_call(method, index)
    }

    pub fn calls(&self, method: &str) -> Vec<Params> {
        self.router.recorder().calls(method)
    }

    pub fn called_methods(&self) -> Vec<String> {
        self.router.recorder().methods()
    }

    /// Forget recorded calls. Registrations stay.
    pub fn clear_calls(&self) {
        self.router.recorder().clear();
    }

    /// # Panics
    /// Panics if `method` was never dispatched.
    #[track_caller]
    pub fn assert_called(&self, method: &str) {
        assert!(
            self.was_called(method),
            "expected {method} to be called, recorded calls: {:?}",
            self.called_methods()
        );
    }

    /// # Panics
    /// Panics if `method` was dispatched at least once.
    #[track_caller]
    pub fn assert_not_called(&self, method: &str) {
        assert!(
            !self.was_called(method),
            "expected {method} not to be called, but it was called {} time(s)",
            self.call_count(method)
        );
    }

    /// # Panics
    /// Panics unless `method` was dispatched exactly `times` times.
    #[track_caller]
    pub fn assert_called_times(&self, method: &str, times: usize) {
        let count = self.call_count(method);
        assert_eq!(count, times, "expected {method} to be called {times} time(s), got {count}");
    }

    /// # Panics
    /// Panics unless some call to `method` had exactly `params`.
    #[track_caller]
    pub fn assert_called_with(&self, method: &str, params: &Value) {
        assert!(
            self.was_called_with(method, params),
            "expected {method} to be called with {params}, recorded: {:?}",
            self.calls(method)
        );
    }
}

fn object_handler(kind: ResourceKind) -> FakeResponse {
    FakeResponse::handler(move |_| fixtures::generate(kind, Value::Null))
}

fn list_handler(kind: ResourceKind) -> FakeResponse {
    FakeResponse::handler(move |_| {
        fixtures::list(kind, vec![fixtures::generate(kind, Value::Null)])
    })
}

fn deleted_handler(kind: ResourceKind) -> FakeResponse {
    FakeResponse::handler(move |_| fixtures::deleted(kind, &fixtures::new_id(kind)))
}

impl StripeApi for FakeClient {
    fn request(&self, resource: &str, action: &str, args: &[Value]) -> Result<StripeObject> {
        let method = MethodId::parse(&format!("{resource}.{action}"))?;
        self.router.resolve(&method.to_string(), normalize_args(args))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::StripeError;

    #[test]
    fn proxy_call_shape_reaches_the_router() {
        let fake = FakeClient::new();
        fake.fake("customers.create", json!({"id": "cus_1"}));

        let object = fake
            .resource("customers")
            .call("create", &[json!({"email": "a@example.com"})])
            .unwrap();

        assert_eq!(object.id(), Some("cus_1"));
        fake.assert_called_with("customers.create", &json!({"email": "a@example.com"}));
    }

    #[test]
    fn arbitrary_actions_are_forwarded() {
        let fake = FakeClient::new();
        fake.fake("paymentIntents.*", json!({"id": "pi_1", "status": "succeeded"}));
        let object = fake
            .resource("paymentIntents")
            .call("someFutureAction", &[json!("pi_1")])
            .unwrap();
        assert_eq!(object.str("status"), Some("succeeded"));
        assert!(fake.was_called("paymentIntents.someFutureAction"));
    }

    #[test]
    fn fake_many_merges_and_chains() {
        let fake = FakeClient::new();
        fake.fake("prices.create", json!({"id": "price_old"}))
            .fake_many([
                ("prices.create", json!({"id": "price_new"})),
                ("products.create", json!({"id": "prod_1"})),
            ]);
        assert!(fake.is_faked("products.create"));
        let price = fake.resource("prices").create(json!({})).unwrap();
        assert_eq!(price.id(), Some("price_new"));
    }

    #[test]
    fn malformed_identifiers_are_rejected() {
        let fake = FakeClient::new();
        fake.fake("customers", json!({"id": "cus_1"}))
            .fake("customers.create.extra", json!({"id": "cus_1"}))
            .fake("customers.", json!({"id": "cus_1"}));
        assert!(!fake.is_faked("customers"));
        assert!(!fake.is_faked("customers.create.extra"));
        assert!(!fake.is_faked("customers."));

        fake.fake("customers.*", json!({"id": "cus_1"}));
        let err = fake.resource("customers.sources").call("create", &[]).unwrap_err();
        assert!(matches!(err, StripeError::InvalidMethod(raw) if raw == "customers.sources.create"));
        assert!(fake.resource("customers").call("", &[]).is_err());
        assert!(fake.called_methods().is_empty());
    }

    #[test]
    fn was_called_times_counts_exactly() {
        let fake = FakeClient::new();
        fake.fake("prices.retrieve", json!({"id": "price_1"}));
        assert!(fake.was_called_times("prices.retrieve", 0));

        fake.resource("prices").retrieve("price_1").unwrap();
        fake.resource("prices").retrieve("price_1").unwrap();
        assert!(fake.was_called_times("prices.retrieve", 2));
        assert!(!fake.was_called_times("prices.retrieve", 1));
        assert!(!fake.was_called_times("prices.retrieve", 3));
    }

    #[test]
    fn clear_calls_keeps_registrations() {
        let fake = FakeClient::new();
        fake.fake("customers.create", json!({"id": "cus_1"}));
        fake.resource("customers").create(json!({})).unwrap();
        fake.clear_calls();
        fake.assert_not_called("customers.create");
        assert!(fake.resource("customers").create(json!({})).is_ok());
    }

    #[test]
    fn fixture_defaults_cover_every_resource() {
        let fake = FakeClient::with_fixture_defaults();

        let customer = fake.resource("customers").retrieve("cus_x").unwrap();
        assert_eq!(customer.object_type(), Some("customer"));

        let list = fake.resource("prices").all(json!({})).unwrap();
        assert_eq!(list.object_type(), Some("list"));

        let deleted = fake.resource("products").delete("prod_x").unwrap();
        assert_eq!(deleted.bool("deleted"), Some(true));

        let source = fake
            .resource("customers")
            .call("createSource", &[json!("cus_x"), json!({"source": "btok_1"})])
            .unwrap();
        assert_eq!(source.object_type(), Some("bank_account"));

        let account = fake
            .resource("financialConnectionsAccounts")
            .call("refresh", &[json!("fca_1"), json!({"features": ["balance"]})])
            .unwrap();
        assert_eq!(account.object_type(), Some("financial_connections.account"));
    }

    #[test]
    fn unregistered_resource_fails_with_method_name() {
        let fake = FakeClient::with_fixture_defaults();
        let err = fake.resource("refunds").create(json!({})).unwrap_err();
        assert!(matches!(err, StripeError::FakeNotRegistered { method } if method == "refunds.create"));
    }
}
