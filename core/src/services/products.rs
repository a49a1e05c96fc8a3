use crate::api::StripeApi;
use crate::error::Result;
use crate::method::Method;
use crate::types::{Deleted, List, ListParams, Price, PriceParams, Product, ProductParams};

use super::{body, id, invoke, search_query};

pub struct ProductService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> ProductService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &ProductParams) -> Result<Product> {
        invoke(self.client, Method::ProductsCreate, &[body(params)?])
    }

    pub fn get(&self, product_id: &str) -> Result<Product> {
        invoke(self.client, Method::ProductsRetrieve, &[id(product_id)])
    }

    pub fn update(&self, product_id: &str, params: &ProductParams) -> Result<Product> {
        invoke(self.client, Method::ProductsUpdate, &[id(product_id), body(params)?])
    }

    /// Only products without prices can be deleted; archive the rest with
    /// `update(id, &ProductParams::new().active(false))`.
    pub fn delete(&self, product_id: &str) -> Result<Deleted> {
        invoke(self.client, Method::ProductsDelete, &[id(product_id)])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<Product>> {
        invoke(self.client, Method::ProductsAll, &[body(params)?])
    }

    pub fn search(&self, query: &str) -> Result<List<Product>> {
        invoke(self.client, Method::ProductsSearch, &[search_query(query)])
    }
}

/// Prices cannot be deleted; deactivate them with `update`.
pub struct PriceService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> PriceService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &PriceParams) -> Result<Price> {
        invoke(self.client, Method::PricesCreate, &[body(params)?])
    }

    pub fn get(&self, price_id: &str) -> Result<Price> {
        invoke(self.client, Method::PricesRetrieve, &[id(price_id)])
    }

    pub fn update(&self, price_id: &str, params: &PriceParams) -> Result<Price> {
        invoke(self.client, Method::PricesUpdate, &[id(price_id), body(params)?])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<Price>> {
        invoke(self.client, Method::PricesAll, &[body(params)?])
    }

    pub fn search(&self, query: &str) -> Result<List<Price>> {
        invoke(self.client, Method::PricesSearch, &[search_query(query)])
    }
}
