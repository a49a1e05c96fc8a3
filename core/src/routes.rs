//! Mapping between method identifiers and Stripe REST URLs.
//!
//! `route` is used by `StripeClient` to build requests; `resolve_path` is its
//! inverse, used by the mock server to turn an incoming request back into the
//! method identifier a fake is registered under.

use crate::error::{Result, StripeError};
use crate::http::HttpMethod;
use crate::method::MethodId;

const FINANCIAL_CONNECTIONS_RESOURCE: &str = "financialConnectionsAccounts";
const FINANCIAL_CONNECTIONS_PATH: &str = "financial_connections/accounts";

/// An HTTP method and a path relative to the API base (always `/v1/...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
}

/// A request resolved back to the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCall {
    pub method: MethodId,
    pub ids: Vec<String>,
}

/// Build the route for `resource.action` given the call's identifiers. Each
/// identifier is percent-encoded into a single path segment.
pub fn route(resource: &str, action: &str, ids: &[String]) -> Result<Route> {
    let base = format!("/v1/{}", resource_path(resource));
    let missing = || StripeError::MissingIdentifier {
        method: format!("{resource}.{action}"),
    };
    let segment = |index: usize| {
        ids.get(index)
            .map(|id| urlencoding::encode(id).into_owned())
            .ok_or_else(missing)
    };
    let id = || segment(0);
    let source = || segment(1);

    let (method, path) = match action {
        "all" => (HttpMethod::Get, base),
        "create" => (HttpMethod::Post, base),
        "search" => (HttpMethod::Get, format!("{base}/search")),
        "retrieve" => (HttpMethod::Get, format!("{base}/{}", id()?)),
        "update" => (HttpMethod::Post, format!("{base}/{}", id()?)),
        "delete" => (HttpMethod::Delete, format!("{base}/{}", id()?)),
        "cancel" if resource == "subscriptions" => {
            (HttpMethod::Delete, format!("{base}/{}", id()?))
        }
        "allSources" => (HttpMethod::Get, format!("{base}/{}/sources", id()?)),
        "createSource" => (HttpMethod::Post, format!("{base}/{}/sources", id()?)),
        "retrieveSource" => (HttpMethod::Get, format!("{base}/{}/sources/{}", id()?, source()?)),
        "updateSource" => (HttpMethod::Post, format!("{base}/{}/sources/{}", id()?, source()?)),
        "deleteSource" => (HttpMethod::Delete, format!("{base}/{}/sources/{}", id()?, source()?)),
        "verifySource" => (
            HttpMethod::Post,
            format!("{base}/{}/sources/{}/verify", id()?, source()?),
        ),
        other => (HttpMethod::Post, format!("{base}/{}/{}", id()?, camel_to_snake(other))),
    };
    Ok(Route { method, path })
}

/// Resolve an incoming request path (with or without a leading slash, without
/// a query string) to the method identifier and identifiers it carries.
/// Identifier segments are percent-decoded.
pub fn resolve_path(method: HttpMethod, path: &str) -> Option<ResolvedCall> {
    let path = path.trim_matches('/');
    let rest = path.strip_prefix("v1/")?;

    let (resource, rest) = match rest.strip_prefix(FINANCIAL_CONNECTIONS_PATH) {
        Some(tail) if tail.is_empty() || tail.starts_with('/') => {
            (FINANCIAL_CONNECTIONS_RESOURCE.to_string(), tail)
        }
        _ => {
            let (segment, tail) = rest.split_once('/').unwrap_or((rest, ""));
            (snake_to_camel(segment), tail)
        }
    };
    if resource.is_empty() {
        return None;
    }
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    let (action, ids): (String, Vec<&str>) = match (method, segments.as_slice()) {
        (HttpMethod::Get, []) => ("all".into(), vec![]),
        (HttpMethod::Post, []) => ("create".into(), vec![]),
        (HttpMethod::Get, ["search"]) => ("search".into(), vec![]),
        (HttpMethod::Get, [id]) => ("retrieve".into(), vec![*id]),
        (HttpMethod::Post, [id]) => ("update".into(), vec![*id]),
        (HttpMethod::Delete, [id]) if resource == "subscriptions" => ("cancel".into(), vec![*id]),
        (HttpMethod::Delete, [id]) => ("delete".into(), vec![*id]),
        (HttpMethod::Get, [id, "sources"]) => ("allSources".into(), vec![*id]),
        (HttpMethod::Post, [id, "sources"]) => ("createSource".into(), vec![*id]),
        (HttpMethod::Get, [id, "sources", source]) => ("retrieveSource".into(), vec![*id, *source]),
        (HttpMethod::Post, [id, "sources", source]) => ("updateSource".into(), vec![*id, *source]),
        (HttpMethod::Delete, [id, "sources", source]) => {
            ("deleteSource".into(), vec![*id, *source])
        }
        (HttpMethod::Post, [id, "sources", source, "verify"]) => {
            ("verifySource".into(), vec![*id, *source])
        }
        (HttpMethod::Post, [id, action]) => (snake_to_camel(action), vec![*id]),
        _ => return None,
    };

    let ids = ids
        .into_iter()
        .map(|id| urlencoding::decode(id).map(|decoded| decoded.into_owned()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;
    Some(ResolvedCall {
        method: MethodId::new(resource, action),
        ids,
    })
}

/// URL segment for a resource name, e.g. `paymentIntents` -> `payment_intents`.
pub fn resource_path(resource: &str) -> String {
    if resource == FINANCIAL_CONNECTIONS_RESOURCE {
        return FINANCIAL_CONNECTIONS_PATH.to_string();
    }
    camel_to_snake(resource)
}

fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
