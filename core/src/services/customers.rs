use crate::api::StripeApi;
use crate::error::Result;
use crate::method::Method;
use crate::types::{
    BankAccount, BankAccountParams, Customer, CustomerParams, Deleted, List, ListParams,
};

use super::{body, id, invoke, search_query};

pub struct CustomerService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> CustomerService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &CustomerParams) -> Result<Customer> {
        invoke(self.client, Method::CustomersCreate, &[body(params)?])
    }

    pub fn get(&self, customer_id: &str) -> Result<Customer> {
        invoke(self.client, Method::CustomersRetrieve, &[id(customer_id)])
    }

    pub fn update(&self, customer_id: &str, params: &CustomerParams) -> Result<Customer> {
        invoke(self.client, Method::CustomersUpdate, &[id(customer_id), body(params)?])
    }

    pub fn delete(&self, customer_id: &str) -> Result<Deleted> {
        invoke(self.client, Method::CustomersDelete, &[id(customer_id)])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<Customer>> {
        invoke(self.client, Method::CustomersAll, &[body(params)?])
    }

    /// Search with Stripe's query language, e.g. `email:'a@example.com'`.
    pub fn search(&self, query: &str) -> Result<List<Customer>> {
        invoke(self.client, Method::CustomersSearch, &[search_query(query)])
    }
}

/// Bank accounts attached to a customer as payment sources.
pub struct BankAccountService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> BankAccountService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Attach a tokenized bank account (`params.source`) to a customer.
    pub fn create(&self, customer_id: &str, params: &BankAccountParams) -> Result<BankAccount> {
        invoke(self.client, Method::CustomersCreateSource, &[id(customer_id), body(params)?])
    }

    pub fn get(&self, customer_id: &str, bank_account_id: &str) -> Result<BankAccount> {
        invoke(
            self.client,
            Method::CustomersRetrieveSource,
            &[id(customer_id), id(bank_account_id)],
        )
    }

    pub fn update(
        &self,
        customer_id: &str,
        bank_account_id: &str,
        params: &BankAccountParams,
    ) -> Result<BankAccount> {
        invoke(
            self.client,
            Method::CustomersUpdateSource,
            &[id(customer_id), id(bank_account_id), body(params)?],
        )
    }

    /// Verify with the two micro-deposit amounts (`params.amounts`).
    pub fn verify(
        &self,
        customer_id: &str,
        bank_account_id: &str,
        params: &BankAccountParams,
    ) -> Result<BankAccount> {
        invoke(
            self.client,
            Method::CustomersVerifySource,
            &[id(customer_id), id(bank_account_id), body(params)?],
        )
    }

    pub fn delete(&self, customer_id: &str, bank_account_id: &str) -> Result<Deleted> {
        invoke(
            self.client,
            Method::CustomersDeleteSource,
            &[id(customer_id), id(bank_account_id)],
        )
    }

    pub fn list(&self, customer_id: &str) -> Result<List<BankAccount>> {
        invoke(
            self.client,
            Method::CustomersAllSources,
            &[id(customer_id), serde_json::json!({"object": "bank_account"})],
        )
    }
}
