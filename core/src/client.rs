//! REST request builder and response parser for the Stripe API.
//!
//! # Design
//! `StripeClient` keeps the build/parse split: `build_request` turns a
//! `resource.action` call into an `HttpRequest`, `parse_response` turns the
//! `HttpResponse` back into a `StripeObject`. The round trip in between is
//! done by the host-supplied `Transport`, so both halves stay deterministic
//! and are tested without a network.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::api::StripeApi;
use crate::config::ClientConfig;
use crate::error::{Result, StripeError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::object::{coerce, StripeObject};
use crate::params::{encode_form, leading_identifiers, Params};
use crate::routes;
use crate::types::Event;
use crate::webhook;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Live Stripe client over a host transport.
#[derive(Debug, Clone)]
pub struct StripeClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> StripeClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request for one call. Leading string arguments are the
    /// identifiers in the URL; the first object argument after them is the
    /// payload.
    pub fn build_request(
        &self,
        resource: &str,
        action: &str,
        args: &[Value],
    ) -> Result<HttpRequest> {
        let ids = leading_identifiers(args);
        let params = request_params(&args[ids.len()..]);
        let route = routes::route(resource, action, &ids)?;

        let mut headers = vec![(
            "authorization".to_string(),
            format!("Bearer {}", self.config.api_key),
        )];
        if let Some(version) = &self.config.api_version {
            headers.push(("stripe-version".to_string(), version.clone()));
        }

        let url = format!("{}{}", self.config.api_base, route.path);
        let encoded = encode_form(&params);
        let request = match route.method {
            HttpMethod::Post => {
                headers.push(("content-type".to_string(), FORM_CONTENT_TYPE.to_string()));
                HttpRequest {
                    method: route.method,
                    path: url,
                    headers,
                    body: Some(encoded),
                }
            }
            HttpMethod::Get | HttpMethod::Delete => HttpRequest {
                method: route.method,
                path: if encoded.is_empty() { url } else { format!("{url}?{encoded}") },
                headers,
                body: None,
            },
        };

        debug!(
            method = request.method.as_str(),
            path = %route.path,
            "built stripe request for {resource}.{action}"
        );
        Ok(request)
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<StripeObject> {
        check_status(&response)?;
        let payload: Value = serde_json::from_str(&response.body)
            .map_err(|e| StripeError::Deserialization(e.to_string()))?;
        coerce(payload)
    }

    /// Verify a webhook delivery with the configured endpoint secret and
    /// tolerance, then parse the event.
    pub fn construct_event(&self, payload: &str, signature_header: &str) -> Result<Event> {
        let secret = self
            .config
            .webhook_secret
            .as_deref()
            .ok_or_else(|| StripeError::Config("webhook secret is not configured".to_string()))?;
        webhook::construct_event(
            payload,
            signature_header,
            secret,
            self.config.webhook_tolerance_secs,
        )
    }
}

impl<T: Transport> StripeApi for StripeClient<T> {
    fn request(&self, resource: &str, action: &str, args: &[Value]) -> Result<StripeObject> {
        let request = self.build_request(resource, action, args)?;
        let response = self.transport.execute(request)?;
        self.parse_response(response)
    }
}

fn request_params(rest: &[Value]) -> Params {
    rest.iter()
        .find_map(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}

/// Map non-success status codes to the appropriate `StripeError` variant.
fn check_status(response: &HttpResponse) -> Result<()> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    let envelope = serde_json::from_str::<ErrorEnvelope>(&response.body).ok();
    match (response.status, envelope) {
        (404, Some(envelope)) => Err(StripeError::NotFound {
            message: envelope.error.message,
        }),
        (404, None) => Err(StripeError::NotFound {
            message: response.body.clone(),
        }),
        (status, Some(envelope)) => Err(StripeError::Api {
            status,
            kind: envelope.error.kind,
            code: envelope.error.code,
            message: envelope.error.message,
        }),
        (status, None) => Err(StripeError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client() -> StripeClient<fn(HttpRequest) -> Result<HttpResponse>> {
        fn unused(_: HttpRequest) -> Result<HttpResponse> {
            Err(StripeError::Transport("no network in unit tests".to_string()))
        }
        StripeClient::new(
            ClientConfig::new("sk_test_123").with_api_base("http://localhost:12111"),
            unused as fn(HttpRequest) -> Result<HttpResponse>,
        )
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn create_posts_form_body() {
        let req = client()
            .build_request("customers", "create", &[json!({"email": "a@example.com", "metadata": {"plan": "pro"}})])
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:12111/v1/customers");
        assert_eq!(req.header("authorization"), Some("Bearer sk_test_123"));
        assert_eq!(req.header("content-type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            req.body.as_deref(),
            Some("email=a%40example.com&metadata%5Bplan%5D=pro")
        );
    }

    #[test]
    fn retrieve_uses_identifier_in_path() {
        let req = client().build_request("customers", "retrieve", &[json!("cus_1")]).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:12111/v1/customers/cus_1");
        assert!(req.body.is_none());
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn list_params_go_to_query_string() {
        let req = client().build_request("prices", "all", &[json!({"limit": 3})]).unwrap();
        assert_eq!(req.path, "http://localhost:12111/v1/prices?limit=3");
    }

    #[test]
    fn source_payload_follows_both_identifiers() {
        let req = client()
            .build_request(
                "customers",
                "verifySource",
                &[json!("cus_1"), json!("ba_1"), json!({"amounts": [32, 45]})],
            )
            .unwrap();
        assert_eq!(req.path, "http://localhost:12111/v1/customers/cus_1/sources/ba_1/verify");
        assert_eq!(req.body.as_deref(), Some("amounts%5B0%5D=32&amounts%5B1%5D=45"));
    }

    #[test]
    fn identifiers_are_percent_encoded() {
        let req = client()
            .build_request("customers", "retrieve", &[json!("cus_1/sources")])
            .unwrap();
        assert_eq!(req.path, "http://localhost:12111/v1/customers/cus_1%2Fsources");

        let req = client().build_request("customers", "retrieve", &[json!("cus 1?x=y")]).unwrap();
        assert_eq!(req.path, "http://localhost:12111/v1/customers/cus%201%3Fx%3Dy");
    }

    #[test]
    fn construct_event_uses_configured_secret() {
        const PAYLOAD: &str =
            r#"{"id":"evt_1","object":"event","type":"invoice.paid","data":{"object":{"id":"in_1"}}}"#;
        let header = webhook::sign(PAYLOAD, "whsec_abc", chrono::Utc::now().timestamp()).unwrap();

        let configured = StripeClient::new(
            ClientConfig::new("sk_test_123")
                .with_webhook_secret("whsec_abc")
                .with_webhook_tolerance(60),
            client().transport,
        );
        let event = configured.construct_event(PAYLOAD, &header).unwrap();
        assert_eq!(event.event_type, "invoice.paid");

        let err = client().construct_event(PAYLOAD, &header).unwrap_err();
        assert!(matches!(err, StripeError::Config(message) if message.contains("webhook secret")));
    }

    #[test]
    fn construct_event_applies_configured_tolerance() {
        const PAYLOAD: &str = r#"{"id":"evt_1","object":"event","type":"invoice.paid"}"#;
        let signed_at = chrono::Utc::now().timestamp() - 120;
        let header = webhook::sign(PAYLOAD, "whsec_abc", signed_at).unwrap();
        let config = ClientConfig::new("sk_test_123").with_webhook_secret("whsec_abc");

        let strict =
            StripeClient::new(config.clone().with_webhook_tolerance(60), client().transport);
        assert!(matches!(strict.construct_event(PAYLOAD, &header), Err(StripeError::Signature(_))));

        let lenient = StripeClient::new(config, client().transport);
        assert_eq!(lenient.construct_event(PAYLOAD, &header).unwrap().id, "evt_1");
    }

    #[test]
    fn api_version_header_is_optional() {
        let pinned = StripeClient::new(
            ClientConfig::new("sk_test_123").with_api_version("2024-06-20"),
            client().transport,
        );
        let req = pinned.build_request("customers", "all", &[]).unwrap();
        assert_eq!(req.header("stripe-version"), Some("2024-06-20"));
        assert_eq!(req.path, "https://api.stripe.com/v1/customers");

        let req = client().build_request("customers", "all", &[]).unwrap();
        assert!(req.header("stripe-version").is_none());
    }

    #[test]
    fn missing_identifier_is_an_error() {
        let err = client().build_request("customers", "retrieve", &[]).unwrap_err();
        assert!(matches!(err, StripeError::MissingIdentifier { method } if method == "customers.retrieve"));
    }

    #[test]
    fn parse_success_coerces() {
        let object = client()
            .parse_response(response(200, r#"{"id":"cus_1","email":"a@example.com"}"#))
            .unwrap();
        assert_eq!(object.object_type(), Some("customer"));
        assert_eq!(object.str("email"), Some("a@example.com"));
    }

    #[test]
    fn parse_not_found_uses_envelope_message() {
        let err = client()
            .parse_response(response(
                404,
                r#"{"error":{"type":"invalid_request_error","code":"resource_missing","message":"No such customer: 'cus_x'"}}"#,
            ))
            .unwrap_err();
        assert!(matches!(err, StripeError::NotFound { message } if message.contains("cus_x")));
    }

    #[test]
    fn parse_api_error() {
        let err = client()
            .parse_response(response(
                402,
                r#"{"error":{"type":"card_error","code":"card_declined","message":"Your card was declined."}}"#,
            ))
            .unwrap_err();
        match err {
            StripeError::Api { status, kind, code, .. } => {
                assert_eq!(status, 402);
                assert_eq!(kind, "card_error");
                assert_eq!(code.as_deref(), Some("card_declined"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_non_envelope_error() {
        let err = client().parse_response(response(502, "bad gateway")).unwrap_err();
        assert!(matches!(err, StripeError::Http { status: 502, .. }));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_response(response(200, "not json")).unwrap_err();
        assert!(matches!(err, StripeError::Deserialization(_)));
    }

    #[test]
    fn request_goes_through_transport() {
        let transport = |req: HttpRequest| -> Result<HttpResponse> {
            assert_eq!(req.path, "http://localhost:12111/v1/products/prod_1");
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: r#"{"id":"prod_1","name":"Widget"}"#.to_string(),
            })
        };
        let client = StripeClient::new(
            ClientConfig::new("sk_test_123").with_api_base("http://localhost:12111"),
            transport,
        );
        let product = client.resource("products").retrieve("prod_1").unwrap();
        assert_eq!(product.object_type(), Some("product"));
    }
}
