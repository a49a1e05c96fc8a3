use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Address, Customer, Expandable, Metadata, StripeResource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethod {
    pub id: String,
    pub object: String,
    pub billing_details: BillingDetails,
    pub card: Option<Card>,
    pub created: i64,
    pub customer: Option<Expandable<Customer>>,
    pub livemode: bool,
    pub metadata: Metadata,
    #[serde(rename = "type")]
    pub method_type: String,
}

impl StripeResource for PaymentMethod {
    const OBJECT: &'static str = "payment_method";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingDetails {
    pub address: Option<Address>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub brand: String,
    pub country: Option<String>,
    pub exp_month: u32,
    pub exp_year: u32,
    pub fingerprint: Option<String>,
    pub funding: String,
    pub last4: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentMethodParams {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub method_type: Option<String>,
    /// Raw card/bank details, keyed by the payment method type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_details: Option<BillingDetails>,
    /// Customer to attach to, used by `attach`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl PaymentMethodParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method_type(mut self, kind: impl Into<String>) -> Self {
        self.method_type = Some(kind.into());
        self
    }

    pub fn card(mut self, card: Value) -> Self {
        self.card = Some(card);
        self
    }

    pub fn billing_details(mut self, details: BillingDetails) -> Self {
        self.billing_details = Some(details);
        self
    }

    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A bank account attached to a customer as a payment source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankAccount {
    pub id: String,
    pub object: String,
    pub account_holder_name: Option<String>,
    pub account_holder_type: Option<String>,
    pub bank_name: Option<String>,
    pub country: String,
    pub currency: String,
    pub customer: Option<Expandable<Customer>>,
    pub fingerprint: Option<String>,
    pub last4: String,
    pub metadata: Metadata,
    pub routing_number: Option<String>,
    pub status: String,
}

impl BankAccount {
    pub fn is_verified(&self) -> bool {
        self.status == "verified"
    }
}

impl StripeResource for BankAccount {
    const OBJECT: &'static str = "bank_account";
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BankAccountParams {
    /// Bank account token (`btok_...`), used on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_type: Option<String>,
    /// Micro-deposit amounts in cents, used on verify.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amounts: Vec<i64>,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl BankAccountParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, token: impl Into<String>) -> Self {
        self.source = Some(token.into());
        self
    }

    pub fn account_holder_name(mut self, name: impl Into<String>) -> Self {
        self.account_holder_name = Some(name.into());
        self
    }

    pub fn account_holder_type(mut self, kind: impl Into<String>) -> Self {
        self.account_holder_type = Some(kind.into());
        self
    }

    pub fn amounts(mut self, amounts: Vec<i64>) -> Self {
        self.amounts = amounts;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// An external account linked through Financial Connections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialConnectionsAccount {
    pub id: String,
    pub object: String,
    pub account_holder: Option<Value>,
    pub balance: Option<Value>,
    pub category: String,
    pub created: i64,
    pub display_name: Option<String>,
    pub institution_name: String,
    pub last4: Option<String>,
    pub livemode: bool,
    pub permissions: Vec<String>,
    pub status: String,
    pub subcategory: String,
    pub supported_payment_method_types: Vec<String>,
}

impl StripeResource for FinancialConnectionsAccount {
    const OBJECT: &'static str = "financial_connections.account";
}
