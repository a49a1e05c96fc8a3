//! Typed services over the real REST client against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port with a shared `FakeClient`, then
//! drives `StripeClient` over real HTTP using ureq. Validates that request
//! building, URL routing and response parsing agree end to end.

use std::sync::Arc;

use serde_json::json;
use stripe_typed::fake::{fixtures, FakeClient, FakeResponse};
use stripe_typed::services::StripeServices;
use stripe_typed::types::{CustomerParams, ListParams, SubscriptionItemParams, SubscriptionParams};
use stripe_typed::{
    ClientConfig, HttpMethod, HttpRequest, HttpResponse, StripeApi, StripeClient, StripeError,
    Transport,
};

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data, letting the client map them.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> stripe_typed::Result<HttpResponse> {
        let result = match req.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&req.path);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(&req.path);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&req.path);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                let body = req.body.clone().unwrap_or_default();
                builder.send(body.as_bytes())
            }
        };
        let mut response = result.map_err(|e| StripeError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn start_server(fake: Arc<FakeClient>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            stripe_mock_server::run(listener, fake).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn services_round_trip_through_http() {
    // Step 1: start the server with fixture defaults plus one echoing fake.
    let fake = Arc::new(FakeClient::with_fixture_defaults());
    fake.fake(
        "customers.create",
        FakeResponse::handler(|params| {
            fixtures::customer(json!({"id": "cus_http", "email": params["email"]}))
        }),
    );
    let base_url = start_server(fake.clone());

    let client = StripeClient::new(
        ClientConfig::new("sk_test_roundtrip").with_api_base(&base_url),
        UreqTransport::new(),
    );
    let services = StripeServices::new(&client);

    // Step 2: create echoes the submitted email.
    let customer = services
        .customers()
        .create(&CustomerParams::new().email("http@example.com").metadata("source", "test"))
        .unwrap();
    assert_eq!(customer.id, "cus_http");
    assert_eq!(customer.email.as_deref(), Some("http@example.com"));
    fake.assert_called_with(
        "customers.create",
        &json!({"email": "http@example.com", "metadata": {"source": "test"}}),
    );

    // Step 3: retrieve routes the id through the path.
    let fetched = services.customers().get("cus_http").unwrap();
    assert_eq!(fetched.object, "customer");
    fake.assert_called_times("customers.retrieve", 1);

    // Step 4: list sends its params as a query string.
    let prices = services.prices().list(&ListParams::new().limit(5)).unwrap();
    assert_eq!(prices.data.len(), 1);
    fake.assert_called_with("prices.all", &json!({"limit": "5"}));

    // Step 5: nested form parameters survive the trip.
    let subscription = services
        .subscriptions()
        .create(
            &SubscriptionParams::new()
                .customer("cus_http")
                .item(SubscriptionItemParams::price("price_1").quantity(2)),
        )
        .unwrap();
    assert!(subscription.is_active());
    let call = fake.get_call("subscriptions.create", 0).unwrap();
    assert_eq!(call["items"][0]["price"], "price_1");
    assert_eq!(call["items"][0]["quantity"], "2");

    // Step 6: delete parses the deleted envelope.
    let deleted = services.products().delete("prod_old").unwrap();
    assert!(deleted.deleted);

    // Step 7: an unregistered method surfaces as NotFound naming it.
    let err = client.resource("refunds").create(json!({"charge": "ch_1"})).unwrap_err();
    assert!(matches!(&err, StripeError::NotFound { message } if message.contains("refunds.create")));
    fake.assert_called_times("refunds.create", 1);
}
