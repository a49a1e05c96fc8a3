//! The call surface shared by the real and fake clients.
//!
//! # Design
//! Services are written against `StripeApi` and never know which client they
//! hold. `client.resource("customers").call("create", &[params])` has the same
//! shape as the vendor SDK's `client.customers.create(params)`; any action
//! name is accepted and forwarded as `resource.action`.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::method::Method;
use crate::object::StripeObject;

/// A client that can execute `resource.action` calls.
pub trait StripeApi {
    /// Execute one call. `args` are the positional arguments the SDK would
    /// receive, e.g. `[id, params]` for an update.
    fn request(&self, resource: &str, action: &str, args: &[Value]) -> Result<StripeObject>;

    /// A proxy bound to one resource.
    fn resource<'a>(&'a self, name: &str) -> ResourceProxy<'a, Self> {
        ResourceProxy::new(self, name)
    }

    /// Execute a call through one of the `Method` constants.
    fn dispatch(&self, method: Method, args: &[Value]) -> Result<StripeObject> {
        self.request(method.resource(), method.action(), args)
    }
}

impl<T: StripeApi + ?Sized> StripeApi for &T {
    fn request(&self, resource: &str, action: &str, args: &[Value]) -> Result<StripeObject> {
        (**self).request(resource, action, args)
    }
}

impl<T: StripeApi + ?Sized> StripeApi for Arc<T> {
    fn request(&self, resource: &str, action: &str, args: &[Value]) -> Result<StripeObject> {
        (**self).request(resource, action, args)
    }
}

/// A resource-scoped view of a client.
pub struct ResourceProxy<'a, C: ?Sized> {
    client: &'a C,
    resource: String,
}

impl<'a, C: StripeApi + ?Sized> ResourceProxy<'a, C> {
    pub fn new(client: &'a C, resource: &str) -> Self {
        Self {
            client,
            resource: resource.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.resource
    }

    /// Forward any action to the client as `<resource>.<action>`.
    pub fn call(&self, action: &str, args: &[Value]) -> Result<StripeObject> {
        self.client.request(&self.resource, action, args)
    }

    pub fn all(&self, params: Value) -> Result<StripeObject> {
        self.call("all", &[params])
    }

    pub fn create(&self, params: Value) -> Result<StripeObject> {
        self.call("create", &[params])
    }

    pub fn retrieve(&self, id: &str) -> Result<StripeObject> {
        self.call("retrieve", &[Value::from(id)])
    }

    pub fn update(&self, id: &str, params: Value) -> Result<StripeObject> {
        self.call("update", &[Value::from(id), params])
    }

    pub fn delete(&self, id: &str) -> Result<StripeObject> {
        self.call("delete", &[Value::from(id)])
    }

    pub fn search(&self, params: Value) -> Result<StripeObject> {
        self.call("search", &[params])
    }
}
