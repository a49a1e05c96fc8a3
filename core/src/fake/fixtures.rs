//! Default response payloads for fakes.
//!
//! Every payload mirrors Stripe's documented wire shape, carries an explicit
//! `object` tag and gets a fresh random identifier with the resource's
//! canonical prefix. Overrides are merged shallowly: a top-level key in the
//! override replaces the default value wholesale, nested objects included.

use chrono::Utc;
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// The resource kinds fixtures can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Customer,
    Product,
    Price,
    Subscription,
    SubscriptionSchedule,
    WebhookEndpoint,
    PaymentIntent,
    SetupIntent,
    PaymentMethod,
    BankAccount,
    FinancialConnectionsAccount,
    Invoice,
    Event,
}

impl ResourceKind {
    pub const ALL: &'static [ResourceKind] = &[
        ResourceKind::Customer,
        ResourceKind::Product,
        ResourceKind::Price,
        ResourceKind::Subscription,
        ResourceKind::SubscriptionSchedule,
        ResourceKind::WebhookEndpoint,
        ResourceKind::PaymentIntent,
        ResourceKind::SetupIntent,
        ResourceKind::PaymentMethod,
        ResourceKind::BankAccount,
        ResourceKind::FinancialConnectionsAccount,
        ResourceKind::Invoice,
        ResourceKind::Event,
    ];

    /// Identifier prefix, without the trailing underscore.
    pub fn prefix(&self) -> &'static str {
        match self {
            ResourceKind::Customer => "cus",
            ResourceKind::Product => "prod",
            ResourceKind::Price => "price",
            ResourceKind::Subscription => "sub",
            ResourceKind::SubscriptionSchedule => "sub_sched",
            ResourceKind::WebhookEndpoint => "we",
            ResourceKind::PaymentIntent => "pi",
            ResourceKind::SetupIntent => "seti",
            ResourceKind::PaymentMethod => "pm",
            ResourceKind::BankAccount => "ba",
            ResourceKind::FinancialConnectionsAccount => "fca",
            ResourceKind::Invoice => "in",
            ResourceKind::Event => "evt",
        }
    }

    /// Wire value of the `object` tag.
    pub fn object(&self) -> &'static str {
        match self {
            ResourceKind::Customer => "customer",
            ResourceKind::Product => "product",
            ResourceKind::Price => "price",
            ResourceKind::Subscription => "subscription",
            ResourceKind::SubscriptionSchedule => "subscription_schedule",
            ResourceKind::WebhookEndpoint => "webhook_endpoint",
            ResourceKind::PaymentIntent => "payment_intent",
            ResourceKind::SetupIntent => "setup_intent",
            ResourceKind::PaymentMethod => "payment_method",
            ResourceKind::BankAccount => "bank_account",
            ResourceKind::FinancialConnectionsAccount => "financial_connections.account",
            ResourceKind::Invoice => "invoice",
            ResourceKind::Event => "event",
        }
    }

    /// Resource segment of the method identifiers serving this kind. Bank
    /// accounts are customer sources, so they dispatch under `customers`.
    pub fn resource(&self) -> &'static str {
        match self {
            ResourceKind::Customer | ResourceKind::BankAccount => "customers",
            ResourceKind::Product => "products",
            ResourceKind::Price => "prices",
            ResourceKind::Subscription => "subscriptions",
            ResourceKind::SubscriptionSchedule => "subscriptionSchedules",
            ResourceKind::WebhookEndpoint => "webhookEndpoints",
            ResourceKind::PaymentIntent => "paymentIntents",
            ResourceKind::SetupIntent => "setupIntents",
            ResourceKind::PaymentMethod => "paymentMethods",
            ResourceKind::FinancialConnectionsAccount => "financialConnectionsAccounts",
            ResourceKind::Invoice => "invoices",
            ResourceKind::Event => "events",
        }
    }

    /// Path of the list endpoint, as reported in list envelopes.
    pub fn list_url(&self) -> &'static str {
        match self {
            ResourceKind::Customer => "/v1/customers",
            ResourceKind::Product => "/v1/products",
            ResourceKind::Price => "/v1/prices",
            ResourceKind::Subscription => "/v1/subscriptions",
            ResourceKind::SubscriptionSchedule => "/v1/subscription_schedules",
            ResourceKind::WebhookEndpoint => "/v1/webhook_endpoints",
            ResourceKind::PaymentIntent => "/v1/payment_intents",
            ResourceKind::SetupIntent => "/v1/setup_intents",
            ResourceKind::PaymentMethod => "/v1/payment_methods",
            ResourceKind::BankAccount => "/v1/customers/sources",
            ResourceKind::FinancialConnectionsAccount => "/v1/financial_connections/accounts",
            ResourceKind::Invoice => "/v1/invoices",
            ResourceKind::Event => "/v1/events",
        }
    }
}

/// A fresh random identifier, e.g. `cus_4f1c9a0b2d3e5f`.
pub fn new_id(kind: ResourceKind) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", kind.prefix(), &suffix[..14])
}

/// A complete default payload for `kind` with `overrides` merged on top.
/// Non-object overrides (including `Value::Null`) are ignored.
pub fn generate(kind: ResourceKind, overrides: Value) -> Value {
    let mut payload = defaults(kind);
    if let Value::Object(overrides) = overrides {
        for (key, value) in overrides {
            payload.insert(key, value);
        }
    }
    Value::Object(payload)
}

/// Wrap payloads in a list envelope.
pub fn list(kind: ResourceKind, items: Vec<Value>) -> Value {
    json!({
        "object": "list",
        "data": items,
        "has_more": false,
        "url": kind.list_url(),
    })
}

/// The envelope Stripe returns from a delete.
pub fn deleted(kind: ResourceKind, id: &str) -> Value {
    json!({
        "id": id,
        "object": kind.object(),
        "deleted": true,
    })
}

pub fn customer(overrides: Value) -> Value {
    generate(ResourceKind::Customer, overrides)
}

pub fn product(overrides: Value) -> Value {
    generate(ResourceKind::Product, overrides)
}

pub fn price(overrides: Value) -> Value {
    generate(ResourceKind::Price, overrides)
}

pub fn subscription(overrides: Value) -> Value {
    generate(ResourceKind::Subscription, overrides)
}

pub fn subscription_schedule(overrides: Value) -> Value {
    generate(ResourceKind::SubscriptionSchedule, overrides)
}

pub fn webhook_endpoint(overrides: Value) -> Value {
    generate(ResourceKind::WebhookEndpoint, overrides)
}

pub fn payment_intent(overrides: Value) -> Value {
    generate(ResourceKind::PaymentIntent, overrides)
}

pub fn setup_intent(overrides: Value) -> Value {
    generate(ResourceKind::SetupIntent, overrides)
}

pub fn payment_method(overrides: Value) -> Value {
    generate(ResourceKind::PaymentMethod, overrides)
}

pub fn bank_account(overrides: Value) -> Value {
    generate(ResourceKind::BankAccount, overrides)
}

pub fn financial_connections_account(overrides: Value) -> Value {
    generate(ResourceKind::FinancialConnectionsAccount, overrides)
}

pub fn invoice(overrides: Value) -> Value {
    generate(ResourceKind::Invoice, overrides)
}

pub fn event(overrides: Value) -> Value {
    generate(ResourceKind::Event, overrides)
}

fn defaults(kind: ResourceKind) -> Map<String, Value> {
    let now = Utc::now().timestamp();
    let id = new_id(kind);
    let payload = match kind {
        ResourceKind::Customer => json!({
            "id": id,
            "object": "customer",
            "address": null,
            "balance": 0,
            "created": now,
            "currency": "usd",
            "default_source": null,
            "delinquent": false,
            "description": null,
            "email": "customer@example.com",
            "invoice_prefix": "A1B2C3D4",
            "livemode": false,
            "metadata": {},
            "name": "Test Customer",
            "phone": null,
            "preferred_locales": [],
            "tax_exempt": "none",
        }),
        ResourceKind::Product => json!({
            "id": id,
            "object": "product",
            "active": true,
            "created": now,
            "default_price": null,
            "description": null,
            "images": [],
            "livemode": false,
            "metadata": {},
            "name": "Test Product",
            "statement_descriptor": null,
            "tax_code": null,
            "unit_label": null,
            "updated": now,
            "url": null,
        }),
        ResourceKind::Price => json!({
            "id": id,
            "object": "price",
            "active": true,
            "billing_scheme": "per_unit",
            "created": now,
            "currency": "usd",
            "livemode": false,
            "lookup_key": null,
            "metadata": {},
            "nickname": null,
            "product": new_id(ResourceKind::Product),
            "recurring": {
                "interval": "month",
                "interval_count": 1,
                "usage_type": "licensed",
            },
            "tax_behavior": "unspecified",
            "type": "recurring",
            "unit_amount": 2000,
            "unit_amount_decimal": "2000",
        }),
        ResourceKind::Subscription => {
            let item_price = price(Value::Null);
            json!({
                "id": id,
                "object": "subscription",
                "billing_cycle_anchor": now,
                "cancel_at": null,
                "cancel_at_period_end": false,
                "canceled_at": null,
                "collection_method": "charge_automatically",
                "created": now,
                "currency": "usd",
                "current_period_end": now + 30 * 24 * 60 * 60,
                "current_period_start": now,
                "customer": new_id(ResourceKind::Customer),
                "default_payment_method": null,
                "items": {
                    "object": "list",
                    "data": [{
                        "id": format!("si_{}", &Uuid::new_v4().simple().to_string()[..14]),
                        "object": "subscription_item",
                        "created": now,
                        "metadata": {},
                        "price": item_price,
                        "quantity": 1,
                        "subscription": id,
                    }],
                    "has_more": false,
                    "url": format!("/v1/subscription_items?subscription={id}"),
                },
                "latest_invoice": null,
                "livemode": false,
                "metadata": {},
                "schedule": null,
                "start_date": now,
                "status": "active",
                "trial_end": null,
                "trial_start": null,
            })
        }
        ResourceKind::SubscriptionSchedule => json!({
            "id": id,
            "object": "subscription_schedule",
            "canceled_at": null,
            "completed_at": null,
            "created": now,
            "customer": new_id(ResourceKind::Customer),
            "end_behavior": "release",
            "livemode": false,
            "metadata": {},
            "phases": [{
                "start_date": now,
                "end_date": now + 30 * 24 * 60 * 60,
                "items": [{"price": new_id(ResourceKind::Price), "quantity": 1}],
            }],
            "released_at": null,
            "status": "not_started",
            "subscription": null,
        }),
        ResourceKind::WebhookEndpoint => json!({
            "id": id,
            "object": "webhook_endpoint",
            "api_version": null,
            "application": null,
            "created": now,
            "description": null,
            "enabled_events": ["*"],
            "livemode": false,
            "metadata": {},
            "secret": format!("whsec_{}", Uuid::new_v4().simple()),
            "status": "enabled",
            "url": "https://example.com/webhooks/stripe",
        }),
        ResourceKind::PaymentIntent => json!({
            "id": id,
            "object": "payment_intent",
            "amount": 2000,
            "amount_capturable": 0,
            "amount_received": 0,
            "canceled_at": null,
            "cancellation_reason": null,
            "capture_method": "automatic",
            "client_secret": format!("{id}_secret_{}", &Uuid::new_v4().simple().to_string()[..10]),
            "confirmation_method": "automatic",
            "created": now,
            "currency": "usd",
            "customer": null,
            "description": null,
            "last_payment_error": null,
            "latest_charge": null,
            "livemode": false,
            "metadata": {},
            "next_action": null,
            "payment_method": null,
            "payment_method_types": ["card"],
            "receipt_email": null,
            "setup_future_usage": null,
            "status": "requires_payment_method",
        }),
        ResourceKind::SetupIntent => json!({
            "id": id,
            "object": "setup_intent",
            "cancellation_reason": null,
            "client_secret": format!("{id}_secret_{}", &Uuid::new_v4().simple().to_string()[..10]),
            "created": now,
            "customer": null,
            "description": null,
            "last_setup_error": null,
            "livemode": false,
            "metadata": {},
            "next_action": null,
            "payment_method": null,
            "payment_method_types": ["card"],
            "status": "requires_payment_method",
            "usage": "off_session",
        }),
        ResourceKind::PaymentMethod => json!({
            "id": id,
            "object": "payment_method",
            "billing_details": {
                "address": null,
                "email": null,
                "name": null,
                "phone": null,
            },
            "card": {
                "brand": "visa",
                "country": "US",
                "exp_month": 12,
                "exp_year": 2034,
                "fingerprint": "Xt5EWLLDS7FJjR1c",
                "funding": "credit",
                "last4": "4242",
            },
            "created": now,
            "customer": null,
            "livemode": false,
            "metadata": {},
            "type": "card",
        }),
        ResourceKind::BankAccount => json!({
            "id": id,
            "object": "bank_account",
            "account_holder_name": "Jane Austen",
            "account_holder_type": "individual",
            "bank_name": "STRIPE TEST BANK",
            "country": "US",
            "currency": "usd",
            "customer": new_id(ResourceKind::Customer),
            "fingerprint": "1JWtPxqbdX5Gamtc",
            "last4": "6789",
            "metadata": {},
            "routing_number": "110000000",
            "status": "new",
        }),
        ResourceKind::FinancialConnectionsAccount => json!({
            "id": id,
            "object": "financial_connections.account",
            "account_holder": {"type": "customer", "customer": new_id(ResourceKind::Customer)},
            "balance": null,
            "category": "cash",
            "created": now,
            "display_name": "Sample Checking Account",
            "institution_name": "StripeBank",
            "last4": "6789",
            "livemode": false,
            "permissions": ["payment_method"],
            "status": "active",
            "subcategory": "checking",
            "supported_payment_method_types": ["us_bank_account"],
        }),
        ResourceKind::Invoice => json!({
            "id": id,
            "object": "invoice",
            "amount_due": 2000,
            "amount_paid": 0,
            "amount_remaining": 2000,
            "billing_reason": "manual",
            "collection_method": "charge_automatically",
            "created": now,
            "currency": "usd",
            "customer": new_id(ResourceKind::Customer),
            "due_date": null,
            "hosted_invoice_url": null,
            "invoice_pdf": null,
            "livemode": false,
            "metadata": {},
            "number": null,
            "paid": false,
            "status": "draft",
            "subscription": null,
            "subtotal": 2000,
            "total": 2000,
        }),
        ResourceKind::Event => json!({
            "id": id,
            "object": "event",
            "api_version": "2024-06-20",
            "created": now,
            "data": {"object": customer(Value::Null)},
            "livemode": false,
            "pending_webhooks": 0,
            "type": "customer.created",
        }),
    };
    match payload {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn every_kind_has_prefixed_id_and_object_tag() {
        for kind in ResourceKind::ALL {
            let payload = generate(*kind, Value::Null);
            let id = payload["id"].as_str().unwrap();
            assert!(id.starts_with(&format!("{}_", kind.prefix())), "{kind:?}: {id}");
            assert_eq!(payload["object"], kind.object(), "{kind:?}");
        }
    }

    #[test]
    fn ids_are_fresh_per_call() {
        assert_ne!(customer(Value::Null)["id"], customer(Value::Null)["id"]);
    }

    #[test]
    fn explicit_id_wins() {
        let payload = customer(json!({"id": "cus_fixed", "email": "x@example.com"}));
        assert_eq!(payload["id"], "cus_fixed");
        assert_eq!(payload["email"], "x@example.com");
        assert_eq!(payload["name"], "Test Customer");
    }

    #[test]
    fn nested_override_replaces_whole_value() {
        let payload = price(json!({"recurring": {"interval": "year"}}));
        assert_eq!(payload["recurring"], json!({"interval": "year"}));
    }

    #[test]
    fn list_envelope_shape() {
        let payload = list(ResourceKind::Price, vec![price(Value::Null)]);
        assert_eq!(payload["object"], "list");
        assert_eq!(payload["has_more"], false);
        assert_eq!(payload["url"], "/v1/prices");
        assert_eq!(payload["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn deleted_envelope_shape() {
        assert_eq!(
            deleted(ResourceKind::Product, "prod_1"),
            json!({"id": "prod_1", "object": "product", "deleted": true})
        );
    }
}
