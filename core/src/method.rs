//! Method identifiers: the `resource.action` strings that connect services,
//! the fake client and the REST router.

use std::fmt;

use crate::error::{Result, StripeError};

/// A parsed `resource.action` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodId {
    resource: String,
    action: String,
}

impl MethodId {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// Parse `resource.action`. Exactly two non-empty segments are required.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(resource), Some(action), None) if !resource.is_empty() && !action.is_empty() => {
                Ok(Self::new(resource, action))
            }
            _ => Err(StripeError::InvalidMethod(raw.to_string())),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}

macro_rules! methods {
    ($($variant:ident => $id:literal,)+) => {
        /// Every method identifier the services dispatch, for compile-time
        /// checked call sites. The fake client only ever sees the string form.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Method {
            $($variant,)+
        }

        impl Method {
            pub const ALL: &'static [Method] = &[$(Method::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Method::$variant => $id,)+
                }
            }
        }
    };
}

methods! {
    CustomersCreate => "customers.create",
    CustomersRetrieve => "customers.retrieve",
    CustomersUpdate => "customers.update",
    CustomersDelete => "customers.delete",
    CustomersAll => "customers.all",
    CustomersSearch => "customers.search",
    CustomersCreateSource => "customers.createSource",
    CustomersRetrieveSource => "customers.retrieveSource",
    CustomersUpdateSource => "customers.updateSource",
    CustomersDeleteSource => "customers.deleteSource",
    CustomersAllSources => "customers.allSources",
    CustomersVerifySource => "customers.verifySource",
    ProductsCreate => "products.create",
    ProductsRetrieve => "products.retrieve",
    ProductsUpdate => "products.update",
    ProductsDelete => "products.delete",
    ProductsAll => "products.all",
    ProductsSearch => "products.search",
    PricesCreate => "prices.create",
    PricesRetrieve => "prices.retrieve",
    PricesUpdate => "prices.update",
    PricesAll => "prices.all",
    PricesSearch => "prices.search",
    SubscriptionsCreate => "subscriptions.create",
    SubscriptionsRetrieve => "subscriptions.retrieve",
    SubscriptionsUpdate => "subscriptions.update",
    SubscriptionsCancel => "subscriptions.cancel",
    SubscriptionsResume => "subscriptions.resume",
    SubscriptionsAll => "subscriptions.all",
    SubscriptionsSearch => "subscriptions.search",
    SubscriptionSchedulesCreate => "subscriptionSchedules.create",
    SubscriptionSchedulesRetrieve => "subscriptionSchedules.retrieve",
    SubscriptionSchedulesUpdate => "subscriptionSchedules.update",
    SubscriptionSchedulesCancel => "subscriptionSchedules.cancel",
    SubscriptionSchedulesRelease => "subscriptionSchedules.release",
    SubscriptionSchedulesAll => "subscriptionSchedules.all",
    WebhookEndpointsCreate => "webhookEndpoints.create",
    WebhookEndpointsRetrieve => "webhookEndpoints.retrieve",
    WebhookEndpointsUpdate => "webhookEndpoints.update",
    WebhookEndpointsDelete => "webhookEndpoints.delete",
    WebhookEndpointsAll => "webhookEndpoints.all",
    PaymentIntentsCreate => "paymentIntents.create",
    PaymentIntentsRetrieve => "paymentIntents.retrieve",
    PaymentIntentsUpdate => "paymentIntents.update",
    PaymentIntentsConfirm => "paymentIntents.confirm",
    PaymentIntentsCapture => "paymentIntents.capture",
    PaymentIntentsCancel => "paymentIntents.cancel",
    PaymentIntentsAll => "paymentIntents.all",
    PaymentIntentsSearch => "paymentIntents.search",
    SetupIntentsCreate => "setupIntents.create",
    SetupIntentsRetrieve => "setupIntents.retrieve",
    SetupIntentsUpdate => "setupIntents.update",
    SetupIntentsConfirm => "setupIntents.confirm",
    SetupIntentsCancel => "setupIntents.cancel",
    SetupIntentsAll => "setupIntents.all",
    PaymentMethodsCreate => "paymentMethods.create",
    PaymentMethodsRetrieve => "paymentMethods.retrieve",
    PaymentMethodsUpdate => "paymentMethods.update",
    PaymentMethodsAttach => "paymentMethods.attach",
    PaymentMethodsDetach => "paymentMethods.detach",
    PaymentMethodsAll => "paymentMethods.all",
    FinancialConnectionsAccountsRetrieve => "financialConnectionsAccounts.retrieve",
    FinancialConnectionsAccountsAll => "financialConnectionsAccounts.all",
    FinancialConnectionsAccountsDisconnect => "financialConnectionsAccounts.disconnect",
    FinancialConnectionsAccountsRefresh => "financialConnectionsAccounts.refresh",
    InvoicesCreate => "invoices.create",
    InvoicesRetrieve => "invoices.retrieve",
    InvoicesUpdate => "invoices.update",
    InvoicesFinalize => "invoices.finalize",
    InvoicesPay => "invoices.pay",
    InvoicesVoid => "invoices.void",
    InvoicesAll => "invoices.all",
}

impl Method {
    pub fn resource(&self) -> &'static str {
        let id = self.as_str();
        id.split_once('.').map_or(id, |(resource, _)| resource)
    }

    pub fn action(&self) -> &'static str {
        let id = self.as_str();
        id.split_once('.').map_or(id, |(_, action)| action)
    }

    pub fn id(&self) -> MethodId {
        MethodId::new(self.resource(), self.action())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_two_segments() {
        let id = MethodId::parse("paymentIntents.confirm").unwrap();
        assert_eq!(id.resource(), "paymentIntents");
        assert_eq!(id.action(), "confirm");
        assert_eq!(id.to_string(), "paymentIntents.confirm");
    }

    #[test]
    fn parse_rejects_wrong_segment_counts() {
        for raw in ["customers", "customers.create.extra", ".create", "customers.", ""] {
            let err = MethodId::parse(raw).unwrap_err();
            assert!(matches!(err, StripeError::InvalidMethod(_)), "{raw}");
        }
    }

    #[test]
    fn every_constant_is_a_valid_identifier() {
        for method in Method::ALL {
            let parsed = MethodId::parse(method.as_str()).unwrap();
            assert_eq!(parsed, method.id());
        }
    }

    #[test]
    fn constant_splits_into_resource_and_action() {
        assert_eq!(Method::PricesUpdate.resource(), "prices");
        assert_eq!(Method::PricesUpdate.action(), "update");
        assert_eq!(String::from(Method::CustomersCreate), "customers.create");
    }
}
