use serde::{Deserialize, Serialize};

use super::{
    Customer, Expandable, Invoice, List, Metadata, PaymentMethod, Price, StripeResource,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub id: String,
    pub object: String,
    pub billing_cycle_anchor: i64,
    pub cancel_at: Option<i64>,
    pub cancel_at_period_end: bool,
    pub canceled_at: Option<i64>,
    pub collection_method: String,
    pub created: i64,
    pub currency: String,
    pub current_period_end: i64,
    pub current_period_start: i64,
    pub customer: Expandable<Customer>,
    pub default_payment_method: Option<Expandable<PaymentMethod>>,
    pub items: List<SubscriptionItem>,
    pub latest_invoice: Option<Expandable<Invoice>>,
    pub livemode: bool,
    pub metadata: Metadata,
    pub schedule: Option<Expandable<SubscriptionSchedule>>,
    pub start_date: i64,
    pub status: String,
    pub trial_end: Option<i64>,
    pub trial_start: Option<i64>,
}

impl Subscription {
    /// `active` or `trialing`.
    pub fn is_active(&self) -> bool {
        matches!(self.status.as_str(), "active" | "trialing")
    }
}

impl StripeResource for Subscription {
    const OBJECT: &'static str = "subscription";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionItem {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub metadata: Metadata,
    pub price: Price,
    pub quantity: Option<u64>,
    pub subscription: String,
}

impl StripeResource for SubscriptionItem {
    const OBJECT: &'static str = "subscription_item";
}

/// One item of a subscription create/update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionItemParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

impl SubscriptionItemParams {
    pub fn price(price: impl Into<String>) -> Self {
        Self {
            price: Some(price.into()),
            ..Self::default()
        }
    }

    /// Refer to an existing item, e.g. to swap its price on update.
    pub fn existing(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SubscriptionItemParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_behavior: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proration_behavior: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl SubscriptionParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn item(mut self, item: SubscriptionItemParams) -> Self {
        self.items.push(item);
        self
    }

    pub fn default_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.default_payment_method = Some(payment_method.into());
        self
    }

    pub fn trial_period_days(mut self, days: u32) -> Self {
        self.trial_period_days = Some(days);
        self
    }

    pub fn cancel_at_period_end(mut self, cancel: bool) -> Self {
        self.cancel_at_period_end = Some(cancel);
        self
    }

    pub fn collection_method(mut self, method: impl Into<String>) -> Self {
        self.collection_method = Some(method.into());
        self
    }

    pub fn payment_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.payment_behavior = Some(behavior.into());
        self
    }

    pub fn proration_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.proration_behavior = Some(behavior.into());
        self
    }

    pub fn expand(mut self, path: impl Into<String>) -> Self {
        self.expand.push(path.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionSchedule {
    pub id: String,
    pub object: String,
    pub canceled_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created: i64,
    pub customer: Expandable<Customer>,
    pub end_behavior: String,
    pub livemode: bool,
    pub metadata: Metadata,
    pub phases: Vec<SchedulePhase>,
    pub released_at: Option<i64>,
    pub status: String,
    pub subscription: Option<Expandable<Subscription>>,
}

impl StripeResource for SubscriptionSchedule {
    const OBJECT: &'static str = "subscription_schedule";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulePhase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    pub items: Vec<PhaseItem>,
}

impl SchedulePhase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, price: impl Into<String>, quantity: u64) -> Self {
        self.items.push(PhaseItem {
            price: price.into(),
            quantity: Some(quantity),
        });
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn end_date(mut self, end_date: i64) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseItem {
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionScheduleParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// Create the schedule from an existing subscription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_subscription: Option<String>,
    /// Unix timestamp, or `now`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_behavior: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<SchedulePhase>,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl SubscriptionScheduleParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn from_subscription(mut self, subscription: impl Into<String>) -> Self {
        self.from_subscription = Some(subscription.into());
        self
    }

    pub fn start_now(mut self) -> Self {
        self.start_date = Some(serde_json::Value::from("now"));
        self
    }

    pub fn start_date(mut self, timestamp: i64) -> Self {
        self.start_date = Some(serde_json::Value::from(timestamp));
        self
    }

    pub fn end_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.end_behavior = Some(behavior.into());
        self
    }

    pub fn phase(mut self, phase: SchedulePhase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::params::to_params;

    #[test]
    fn items_serialize_as_array_of_objects() {
        let params = SubscriptionParams::new()
            .customer("cus_1")
            .item(SubscriptionItemParams::price("price_1").quantity(2));
        let value = serde_json::Value::Object(to_params(&params).unwrap());
        assert_eq!(value["items"], json!([{"price": "price_1", "quantity": 2}]));
    }

    #[test]
    fn schedule_start_accepts_now_or_timestamp() {
        let now = to_params(&SubscriptionScheduleParams::new().start_now()).unwrap();
        assert_eq!(now["start_date"], "now");
        let at = to_params(&SubscriptionScheduleParams::new().start_date(1_700_000_000)).unwrap();
        assert_eq!(at["start_date"], 1_700_000_000);
    }

    #[test]
    fn trialing_counts_as_active() {
        let sub = Subscription {
            status: "trialing".into(),
            ..Subscription::default()
        };
        assert!(sub.is_active());
    }
}
