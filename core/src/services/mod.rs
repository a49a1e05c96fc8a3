//! Per-resource services.
//!
//! # Design
//! Each method issues exactly one call through `StripeApi` and parses the
//! result into a DTO. Services borrow the client, so the same code runs
//! against `StripeClient` in production and `FakeClient` in tests.

mod customers;
mod financial_connections;
mod invoices;
mod payments;
mod products;
mod subscriptions;
mod webhook_endpoints;

use serde::Serialize;
use serde_json::Value;

use crate::api::StripeApi;
use crate::error::Result;
use crate::method::Method;
use crate::params::to_params;
use crate::types::StripeResource;

pub use customers::{BankAccountService, CustomerService};
pub use financial_connections::FinancialConnectionsService;
pub use invoices::InvoiceService;
pub use payments::{PaymentIntentService, PaymentMethodService, SetupIntentService};
pub use products::{PriceService, ProductService};
pub use subscriptions::{SubscriptionScheduleService, SubscriptionService};
pub use webhook_endpoints::WebhookEndpointService;

/// Entry point that hands out one service per resource.
pub struct StripeServices<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> StripeServices<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn customers(&self) -> CustomerService<'a, C> {
        CustomerService::new(self.client)
    }

    pub fn bank_accounts(&self) -> BankAccountService<'a, C> {
        BankAccountService::new(self.client)
    }

    pub fn products(&self) -> ProductService<'a, C> {
        ProductService::new(self.client)
    }

    pub fn prices(&self) -> PriceService<'a, C> {
        PriceService::new(self.client)
    }

    pub fn subscriptions(&self) -> SubscriptionService<'a, C> {
        SubscriptionService::new(self.client)
    }

    pub fn subscription_schedules(&self) -> SubscriptionScheduleService<'a, C> {
        SubscriptionScheduleService::new(self.client)
    }

    pub fn payment_intents(&self) -> PaymentIntentService<'a, C> {
        PaymentIntentService::new(self.client)
    }

    pub fn setup_intents(&self) -> SetupIntentService<'a, C> {
        SetupIntentService::new(self.client)
    }

    pub fn payment_methods(&self) -> PaymentMethodService<'a, C> {
        PaymentMethodService::new(self.client)
    }

    pub fn financial_connections(&self) -> FinancialConnectionsService<'a, C> {
        FinancialConnectionsService::new(self.client)
    }

    pub fn invoices(&self) -> InvoiceService<'a, C> {
        InvoiceService::new(self.client)
    }

    pub fn webhook_endpoints(&self) -> WebhookEndpointService<'a, C> {
        WebhookEndpointService::new(self.client)
    }
}

fn invoke<C, T>(client: &C, method: Method, args: &[Value]) -> Result<T>
where
    C: StripeApi + ?Sized,
    T: StripeResource,
{
    client.dispatch(method, args)?.parse()
}

fn body<P: Serialize>(params: &P) -> Result<Value> {
    Ok(Value::Object(to_params(params)?))
}

fn id(id: &str) -> Value {
    Value::from(id)
}

fn search_query(query: &str) -> Value {
    serde_json::json!({ "query": query })
}
