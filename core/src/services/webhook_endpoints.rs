use crate::api::StripeApi;
use crate::error::Result;
use crate::method::Method;
use crate::types::{Deleted, List, ListParams, WebhookEndpoint, WebhookEndpointParams};

use super::{body, id, invoke};

pub struct WebhookEndpointService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> WebhookEndpointService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// The returned endpoint carries the signing `secret`; it is not
    /// returned again by `get`.
    pub fn create(&self, params: &WebhookEndpointParams) -> Result<WebhookEndpoint> {
        invoke(self.client, Method::WebhookEndpointsCreate, &[body(params)?])
    }

    pub fn get(&self, endpoint_id: &str) -> Result<WebhookEndpoint> {
        invoke(self.client, Method::WebhookEndpointsRetrieve, &[id(endpoint_id)])
    }

    pub fn update(
        &self,
        endpoint_id: &str,
        params: &WebhookEndpointParams,
    ) -> Result<WebhookEndpoint> {
        invoke(
            self.client,
            Method::WebhookEndpointsUpdate,
            &[id(endpoint_id), body(params)?],
        )
    }

    pub fn delete(&self, endpoint_id: &str) -> Result<Deleted> {
        invoke(self.client, Method::WebhookEndpointsDelete, &[id(endpoint_id)])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<WebhookEndpoint>> {
        invoke(self.client, Method::WebhookEndpointsAll, &[body(params)?])
    }
}
