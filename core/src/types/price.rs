use serde::{Deserialize, Serialize};

use super::{Expandable, Metadata, Product, StripeResource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub id: String,
    pub object: String,
    pub active: bool,
    pub billing_scheme: String,
    pub created: i64,
    pub currency: String,
    pub livemode: bool,
    pub lookup_key: Option<String>,
    pub metadata: Metadata,
    pub nickname: Option<String>,
    pub product: Expandable<Product>,
    pub recurring: Option<Recurring>,
    pub tax_behavior: Option<String>,
    #[serde(rename = "type")]
    pub price_type: String,
    pub unit_amount: Option<i64>,
    pub unit_amount_decimal: Option<String>,
}

impl Price {
    pub fn is_recurring(&self) -> bool {
        self.recurring.is_some()
    }
}

impl StripeResource for Price {
    const OBJECT: &'static str = "price";
}

/// Billing interval of a recurring price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recurring {
    pub interval: String,
    pub interval_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
}

impl Recurring {
    pub fn new(interval: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            interval_count: 1,
            usage_type: None,
        }
    }

    pub fn interval_count(mut self, count: u32) -> Self {
        self.interval_count = count;
        self
    }

    pub fn usage_type(mut self, usage_type: impl Into<String>) -> Self {
        self.usage_type = Some(usage_type.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurring>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_behavior: Option<String>,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl PriceParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Amount in the currency's smallest unit.
    pub fn unit_amount(mut self, amount: i64) -> Self {
        self.unit_amount = Some(amount);
        self
    }

    pub fn recurring(mut self, recurring: Recurring) -> Self {
        self.recurring = Some(recurring);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn lookup_key(mut self, key: impl Into<String>) -> Self {
        self.lookup_key = Some(key.into());
        self
    }

    pub fn tax_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.tax_behavior = Some(behavior.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
