//! Fake Stripe client for tests.
//!
//! # Overview
//! `FakeClient` implements `StripeApi`, so services run against it unchanged.
//! Every dispatched call is first recorded, then resolved against the
//! registered responses: exact `resource.action` keys win, then wildcard keys
//! such as `customers.*` in registration order. A call with no match fails
//! with `StripeError::FakeNotRegistered` naming the method; it still counts
//! as a recorded call.
//!
//! ```
//! use serde_json::json;
//! use stripe_typed::fake::FakeClient;
//! use stripe_typed::services::StripeServices;
//! use stripe_typed::types::CustomerParams;
//!
//! let fake = FakeClient::new();
//! fake.fake("customers.create", json!({"id": "cus_test123", "email": "john@example.com"}));
//!
//! let customer = StripeServices::new(&fake)
//!     .customers()
//!     .create(&CustomerParams::new().email("john@example.com"))
//!     .unwrap();
//!
//! assert_eq!(customer.id, "cus_test123");
//! fake.assert_called("customers.create");
//! ```

mod client;
pub mod fixtures;
mod recorder;
mod router;

pub use client::FakeClient;
pub use fixtures::ResourceKind;
pub use recorder::CallRecorder;
pub use router::{wildcard_matches, FakeResponse, FakeRouter};
