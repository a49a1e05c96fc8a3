//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Form bodies are decoded before comparison, so the vectors state payloads
//! as JSON and stay independent of key order.

use pretty_assertions::assert_eq;
use serde_json::Value;
use stripe_typed::params::decode_form;
use stripe_typed::{
    ClientConfig, HttpMethod, HttpRequest, HttpResponse, Result, StripeClient, StripeError,
};

type NoTransport = fn(HttpRequest) -> Result<HttpResponse>;

fn no_transport(_: HttpRequest) -> Result<HttpResponse> {
    Err(StripeError::Transport("vectors never hit the network".to_string()))
}

fn client(base_url: &str, api_key: &str) -> StripeClient<NoTransport> {
    StripeClient::new(
        ClientConfig::new(api_key).with_api_base(base_url),
        no_transport as NoTransport,
    )
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();
    let api_key = vectors["api_key"].as_str().unwrap();
    let c = client(base_url, api_key);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let args = case["args"].as_array().unwrap();
        let expected = &case["expected_request"];

        let req = c
            .build_request(
                case["resource"].as_str().unwrap(),
                case["action"].as_str().unwrap(),
                args,
            )
            .unwrap();

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{base_url}{}", expected["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(
            req.header("authorization"),
            Some(format!("Bearer {api_key}").as_str()),
            "{name}: auth"
        );

        match (&req.body, &expected["body"]) {
            (None, Value::Null) => {}
            (Some(body), expected_body @ Value::Object(_)) => {
                assert_eq!(Value::Object(decode_form(body)), *expected_body, "{name}: body");
            }
            (body, expected_body) => panic!("{name}: body {body:?}, expected {expected_body}"),
        }
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let c = client("http://localhost:12111", "sk_test_vectors");

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["response"]["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["response"]["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_response(response);

        match (&case["expected"]["ok"], case["expected"]["error"].as_str()) {
            (expected @ Value::Object(_), None) => {
                assert_eq!(result.unwrap().to_value(), *expected, "{name}");
            }
            (Value::Null, Some(kind)) => {
                let err = result.unwrap_err();
                let matched = match kind {
                    "not_found" => matches!(err, StripeError::NotFound { .. }),
                    "api" => matches!(err, StripeError::Api { .. }),
                    "http" => matches!(err, StripeError::Http { .. }),
                    other => panic!("{name}: unknown error kind {other}"),
                };
                assert!(matched, "{name}: got {err:?}");
            }
            _ => panic!("{name}: malformed vector"),
        }
    }
}
