//! HTTP front for a `FakeClient`.
//!
//! Requests to `/v1/...` are mapped back to `resource.action` calls with
//! `routes::resolve_path` and dispatched through the fake, so any client that
//! speaks Stripe's REST dialect can run against registered fakes. The
//! `/_fake` endpoints register responses and expose recorded calls.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use stripe_typed::fake::FakeClient;
use stripe_typed::params::{decode_form, Params};
use stripe_typed::{routes, HttpMethod, MethodId, StripeApi, StripeError};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

pub const DEFAULT_PORT: u16 = 12111;

pub type SharedFake = Arc<FakeClient>;

pub fn app(fake: SharedFake) -> Router {
    Router::new()
        .route("/v1/{*path}", any(dispatch))
        .route("/_fake/fakes/{method}", post(register_fake))
        .route("/_fake/calls/{method}", get(recorded_calls))
        .route("/_fake/calls", delete(clear_calls))
        .with_state(fake)
}

pub async fn run(listener: TcpListener, fake: SharedFake) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "stripe mock server listening");
    }
    axum::serve(listener, app(fake)).await
}

async fn dispatch(
    State(fake): State<SharedFake>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let http_method = match &method {
        &Method::GET => HttpMethod::Get,
        &Method::POST => HttpMethod::Post,
        &Method::DELETE => HttpMethod::Delete,
        other => {
            return error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                "invalid_request_error",
                format!("unsupported HTTP method {other}"),
            )
        }
    };
    let Some(call) = routes::resolve_path(http_method, uri.path()) else {
        return error_response(
            StatusCode::NOT_FOUND,
            "invalid_request_error",
            format!("Unrecognized request URL ({method}: {})", uri.path()),
        );
    };

    let params = match request_params(uri.query(), &headers, &body) {
        Ok(params) => params,
        Err(message) => {
            return error_response(StatusCode::BAD_REQUEST, "invalid_request_error", message)
        }
    };
    let mut args: Vec<Value> = call.ids.iter().cloned().map(Value::String).collect();
    args.push(Value::Object(params));

    debug!(method = %call.method, ids = ?call.ids, "dispatching request");
    match fake.request(call.method.resource(), call.method.action(), &args) {
        Ok(object) => Json(object.to_value()).into_response(),
        Err(err @ StripeError::FakeNotRegistered { .. }) => {
            error_response(StatusCode::NOT_FOUND, "invalid_request_error", err.to_string())
        }
        Err(err) => {
            warn!(method = %call.method, %err, "fake failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "api_error", err.to_string())
        }
    }
}

/// Query string parameters overlaid with the body, form-encoded or JSON.
fn request_params(query: Option<&str>, headers: &HeaderMap, body: &str) -> Result<Params, String> {
    let mut params = query.map(decode_form).unwrap_or_default();
    if body.trim().is_empty() {
        return Ok(params);
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    let body_params = if is_json {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err("JSON body must be an object".to_string()),
            Err(e) => return Err(format!("invalid JSON body: {e}")),
        }
    } else {
        decode_form(body)
    };
    params.extend(body_params);
    Ok(params)
}

fn error_response(status: StatusCode, kind: &str, message: String) -> Response {
    let body = json!({
        "error": {
            "type": kind,
            "message": message,
        }
    });
    (status, Json(body)).into_response()
}

async fn register_fake(
    State(fake): State<SharedFake>,
    Path(method): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    if let Err(err) = MethodId::parse(&method) {
        return error_response(StatusCode::BAD_REQUEST, "invalid_request_error", err.to_string());
    }
    if !payload.is_object() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_request_error",
            "fake payload must be a JSON object".to_string(),
        );
    }
    info!(%method, "registered fake");
    fake.fake(method.clone(), payload);
    (StatusCode::CREATED, Json(json!({ "registered": method }))).into_response()
}

#[derive(Debug, Serialize)]
struct RecordedCalls {
    method: String,
    count: usize,
    calls: Vec<Params>,
}

async fn recorded_calls(
    State(fake): State<SharedFake>,
    Path(method): Path<String>,
) -> Json<RecordedCalls> {
    let calls = fake.calls(&method);
    Json(RecordedCalls {
        count: calls.len(),
        method,
        calls,
    })
}

async fn clear_calls(State(fake): State<SharedFake>) -> StatusCode {
    fake.clear_calls();
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn query_and_form_body_are_merged() {
        let params = request_params(
            Some("expand[]=customer"),
            &HeaderMap::new(),
            "email=a%40example.com&metadata[plan]=pro",
        )
        .unwrap();
        assert_eq!(
            Value::Object(params),
            json!({"expand": ["customer"], "email": "a@example.com", "metadata": {"plan": "pro"}})
        );
    }

    #[test]
    fn json_body_keeps_types() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let params = request_params(None, &headers, r#"{"amount": 2000, "confirm": true}"#).unwrap();
        assert_eq!(params["amount"], 2000);
        assert_eq!(params["confirm"], true);
    }

    #[test]
    fn json_body_must_be_an_object() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(request_params(None, &headers, "[1,2]").is_err());
        assert!(request_params(None, &headers, "{").is_err());
    }

    #[test]
    fn empty_request_has_no_params() {
        let params = request_params(None, &HeaderMap::new(), "").unwrap();
        assert!(params.is_empty());
    }
}
