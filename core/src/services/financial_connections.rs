use serde_json::json;

use crate::api::StripeApi;
use crate::error::Result;
use crate::method::Method;
use crate::types::{FinancialConnectionsAccount, List, ListParams};

use super::{body, id, invoke};

/// Accounts linked through Financial Connections. Accounts are created by
/// the client-side flow, so there is no `create`.
pub struct FinancialConnectionsService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> FinancialConnectionsService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn get(&self, account_id: &str) -> Result<FinancialConnectionsAccount> {
        invoke(self.client, Method::FinancialConnectionsAccountsRetrieve, &[id(account_id)])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<FinancialConnectionsAccount>> {
        invoke(self.client, Method::FinancialConnectionsAccountsAll, &[body(params)?])
    }

    pub fn disconnect(&self, account_id: &str) -> Result<FinancialConnectionsAccount> {
        invoke(self.client, Method::FinancialConnectionsAccountsDisconnect, &[id(account_id)])
    }

    /// Request fresh data for the given features (`balance`, `ownership`,
    /// `transactions`).
    pub fn refresh(
        &self,
        account_id: &str,
        features: &[&str],
    ) -> Result<FinancialConnectionsAccount> {
        invoke(
            self.client,
            Method::FinancialConnectionsAccountsRefresh,
            &[id(account_id), json!({ "features": features })],
        )
    }
}
