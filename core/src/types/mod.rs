//! Typed DTOs and request builders for Stripe resources.
//!
//! # Design
//! Field names are Stripe's wire names, so `from_object` is a plain serde
//! conversion and `to_value` reproduces the wire shape. Every field carries a
//! serde default: fixtures and fakes routinely omit attributes a live
//! response would include, and parsing must not fail on that.
//!
//! Request builders serialize with `skip_serializing_if = "Option::is_none"`
//! so only the fields a caller set are sent.

mod customer;
mod expandable;
mod invoice;
mod payment_intent;
mod payment_method;
mod price;
mod product;
mod subscription;
mod webhook;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StripeError};
use crate::object::StripeObject;

pub use customer::{Customer, CustomerParams};
pub use expandable::{Expandable, HasId};
pub use invoice::{Invoice, InvoiceParams};
pub use payment_intent::{PaymentIntent, PaymentIntentParams, SetupIntent, SetupIntentParams};
pub use payment_method::{
    BankAccount, BankAccountParams, BillingDetails, Card, FinancialConnectionsAccount,
    PaymentMethod, PaymentMethodParams,
};
pub use price::{Price, PriceParams, Recurring};
pub use product::{Product, ProductParams};
pub use subscription::{
    PhaseItem, SchedulePhase, Subscription, SubscriptionItem, SubscriptionItemParams,
    SubscriptionParams, SubscriptionSchedule, SubscriptionScheduleParams,
};
pub use webhook::{Event, EventData, WebhookEndpoint, WebhookEndpointParams};

/// Key/value metadata attached to most Stripe objects.
pub type Metadata = BTreeMap<String, String>;

/// A typed Stripe object that can be parsed from and written back to its
/// dynamic representation.
pub trait StripeResource: Serialize + DeserializeOwned {
    /// The wire value of the `object` tag.
    const OBJECT: &'static str;

    fn from_object(object: &StripeObject) -> Result<Self> {
        serde_json::from_value(object.to_value())
            .map_err(|e| StripeError::Deserialization(format!("{}: {e}", Self::OBJECT)))
    }

    fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| StripeError::Serialization(e.to_string()))
    }
}

/// Stripe's paginated list envelope, also used for search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default = "list_object")]
    pub object: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

fn list_object() -> String {
    "list".to_string()
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            object: list_object(),
            data: Vec::new(),
            has_more: false,
            url: String::new(),
            next_page: None,
        }
    }
}

impl<T: StripeResource> StripeResource for List<T> {
    const OBJECT: &'static str = "list";
}

/// The envelope returned by delete calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deleted {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}

impl StripeResource for Deleted {
    const OBJECT: &'static str = "deleted";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: Option<String>,
    pub country: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn line1(mut self, line1: impl Into<String>) -> Self {
        self.line1 = Some(line1.into());
        self
    }

    pub fn line2(mut self, line2: impl Into<String>) -> Self {
        self.line2 = Some(line2.into());
        self
    }

    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// Pagination and filter parameters for `all` calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
    #[serde(flatten)]
    pub filters: BTreeMap<String, Value>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    pub fn ending_before(mut self, id: impl Into<String>) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    pub fn expand(mut self, path: impl Into<String>) -> Self {
        self.expand.push(path.into());
        self
    }

    /// Resource-specific filter, e.g. `customer` or `status`.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::object::coerce;
    use crate::params::to_params;

    #[test]
    fn list_parses_typed_items() {
        let object = coerce(json!({
            "object": "list",
            "data": [{"id": "cus_1", "email": "a@example.com"}],
            "has_more": true,
            "url": "/v1/customers",
        }))
        .unwrap();
        let list: List<Customer> = object.parse().unwrap();
        assert!(list.has_more);
        assert_eq!(list.data[0].id, "cus_1");
        assert_eq!(list.data[0].object, "customer");
    }

    #[test]
    fn deleted_envelope_parses() {
        let object = coerce(json!({"id": "prod_1", "object": "product", "deleted": true})).unwrap();
        let deleted: Deleted = object.parse().unwrap();
        assert!(deleted.deleted);
        assert_eq!(deleted.id, "prod_1");
    }

    #[test]
    fn list_params_flatten_filters() {
        let params = ListParams::new()
            .limit(10)
            .filter("customer", "cus_1")
            .expand("data.customer");
        let params = to_params(&params).unwrap();
        assert_eq!(
            serde_json::Value::Object(params),
            json!({"limit": 10, "customer": "cus_1", "expand": ["data.customer"]})
        );
    }

    #[test]
    fn parse_reports_the_target_type() {
        let object = coerce(json!({"id": "cus_1", "balance": "not a number"})).unwrap();
        let err = object.parse::<Customer>().unwrap_err();
        assert!(matches!(err, StripeError::Deserialization(msg) if msg.starts_with("customer:")));
    }
}
