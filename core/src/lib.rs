//! Typed mapping layer over the Stripe REST API, plus an in-process fake.
//!
//! # Overview
//! Services (`services::StripeServices`) turn typed request builders into
//! `resource.action` calls on a `StripeApi` client and parse the returned
//! `StripeObject` into DTOs. Two clients implement `StripeApi`:
//!
//! - `StripeClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values; a host-supplied `Transport` does the round trip.
//! - `fake::FakeClient` records every call and answers from registered
//!   responses, so application code is tested without a network.
//!
//! # Design
//! - Dispatch goes through `StripeApi::request(resource, action, args)`, so any
//!   action name reaches the client, including ones no service wraps.
//! - Raw payloads are coerced into `StripeObject`, inferring the `object` tag
//!   from the id prefix when it is missing.
//! - Webhook deliveries are verified with `webhook::construct_event`.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod fake;
pub mod http;
pub mod method;
pub mod object;
pub mod params;
pub mod routes;
pub mod services;
pub mod types;
pub mod webhook;

pub use api::{ResourceProxy, StripeApi};
pub use client::StripeClient;
pub use config::ClientConfig;
pub use error::{Result, StripeError};
pub use fake::FakeClient;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use method::{Method, MethodId};
pub use object::{coerce, StripeObject};
pub use params::Params;
pub use services::StripeServices;
