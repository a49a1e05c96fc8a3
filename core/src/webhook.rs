//! Webhook signature verification.
//!
//! Stripe signs each delivery with a `Stripe-Signature` header of the form
//! `t=<unix seconds>,v1=<hex hmac>[,v1=...]`. The HMAC-SHA256 is computed
//! with the endpoint secret over `"<t>.<raw body>"`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::{Result, StripeError};
use crate::object::coerce;
use crate::types::{Event, StripeResource};

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_SCHEME: &str = "v1";

/// Verify `signature_header` against the raw `payload` and parse the event.
///
/// `tolerance_secs` bounds how far the signed timestamp may be from now; `0`
/// disables the timestamp check.
pub fn construct_event(
    payload: &str,
    signature_header: &str,
    secret: &str,
    tolerance_secs: u64,
) -> Result<Event> {
    let now = chrono::Utc::now().timestamp();
    verify_header(payload, signature_header, secret, tolerance_secs, now)?;
    let value = serde_json::from_str(payload)
        .map_err(|e| StripeError::Deserialization(format!("webhook payload: {e}")))?;
    Event::from_object(&coerce(value)?)
}

/// Check the header at the given `now` (unix seconds).
pub fn verify_header(
    payload: &str,
    signature_header: &str,
    secret: &str,
    tolerance_secs: u64,
    now: i64,
) -> Result<()> {
    let header = parse_header(signature_header).inspect_err(|err| warn!(%err, "rejected webhook"))?;

    let expected = compute_signature(payload, secret, header.timestamp)?;
    let matched = header
        .signatures
        .iter()
        .filter_map(|candidate| hex::decode(candidate).ok())
        .any(|candidate| bool::from(expected.as_slice().ct_eq(candidate.as_slice())));
    if !matched {
        warn!(timestamp = header.timestamp, "webhook signature mismatch");
        return Err(StripeError::Signature(
            "no signature matches the expected signature for the payload".to_string(),
        ));
    }

    if tolerance_secs > 0 && now.abs_diff(header.timestamp) > tolerance_secs {
        warn!(timestamp = header.timestamp, now, "webhook timestamp outside tolerance");
        return Err(StripeError::Signature(format!(
            "timestamp {} outside the tolerance of {tolerance_secs}s",
            header.timestamp
        )));
    }
    Ok(())
}

/// Build a valid `Stripe-Signature` header, for tests and local tooling.
pub fn sign(payload: &str, secret: &str, timestamp: i64) -> Result<String> {
    let signature = compute_signature(payload, secret, timestamp)?;
    Ok(format!("t={timestamp},{SIGNATURE_SCHEME}={}", hex::encode(signature)))
}

fn compute_signature(payload: &str, secret: &str, timestamp: i64) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| StripeError::Signature(e.to_string()))?;
    mac.update(format!("{timestamp}.{payload}").as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_header(header: &str) -> Result<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for item in header.split(',') {
        let Some((key, value)) = item.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse::<i64>().ok(),
            SIGNATURE_SCHEME => signatures.push(value.to_string()),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        StripeError::Signature("unable to extract timestamp from header".to_string())
    })?;
    if signatures.is_empty() {
        return Err(StripeError::Signature(format!(
            "no {SIGNATURE_SCHEME} signatures found in header"
        )));
    }
    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}
