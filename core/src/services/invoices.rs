use crate::api::StripeApi;
use crate::error::Result;
use crate::method::Method;
use crate::types::{Invoice, InvoiceParams, List, ListParams};

use super::{body, id, invoke};

pub struct InvoiceService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> InvoiceService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &InvoiceParams) -> Result<Invoice> {
        invoke(self.client, Method::InvoicesCreate, &[body(params)?])
    }

    pub fn get(&self, invoice_id: &str) -> Result<Invoice> {
        invoke(self.client, Method::InvoicesRetrieve, &[id(invoice_id)])
    }

    pub fn update(&self, invoice_id: &str, params: &InvoiceParams) -> Result<Invoice> {
        invoke(self.client, Method::InvoicesUpdate, &[id(invoice_id), body(params)?])
    }

    /// Move a draft invoice to `open`.
    pub fn finalize(&self, invoice_id: &str) -> Result<Invoice> {
        invoke(self.client, Method::InvoicesFinalize, &[id(invoice_id)])
    }

    pub fn pay(&self, invoice_id: &str, params: &InvoiceParams) -> Result<Invoice> {
        invoke(self.client, Method::InvoicesPay, &[id(invoice_id), body(params)?])
    }

    pub fn void(&self, invoice_id: &str) -> Result<Invoice> {
        invoke(self.client, Method::InvoicesVoid, &[id(invoice_id)])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<Invoice>> {
        invoke(self.client, Method::InvoicesAll, &[body(params)?])
    }
}
