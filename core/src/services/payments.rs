use serde_json::json;

use crate::api::StripeApi;
use crate::error::Result;
use crate::method::Method;
use crate::types::{
    List, ListParams, PaymentIntent, PaymentIntentParams, PaymentMethod, PaymentMethodParams,
    SetupIntent, SetupIntentParams,
};

use super::{body, id, invoke, search_query};

pub struct PaymentIntentService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> PaymentIntentService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &PaymentIntentParams) -> Result<PaymentIntent> {
        invoke(self.client, Method::PaymentIntentsCreate, &[body(params)?])
    }

    pub fn get(&self, intent_id: &str) -> Result<PaymentIntent> {
        invoke(self.client, Method::PaymentIntentsRetrieve, &[id(intent_id)])
    }

    pub fn update(&self, intent_id: &str, params: &PaymentIntentParams) -> Result<PaymentIntent> {
        invoke(self.client, Method::PaymentIntentsUpdate, &[id(intent_id), body(params)?])
    }

    pub fn confirm(&self, intent_id: &str, params: &PaymentIntentParams) -> Result<PaymentIntent> {
        invoke(self.client, Method::PaymentIntentsConfirm, &[id(intent_id), body(params)?])
    }

    /// Capture a `requires_capture` intent. `amount_to_capture` may be lower
    /// than the authorized amount.
    pub fn capture(&self, intent_id: &str, params: &PaymentIntentParams) -> Result<PaymentIntent> {
        invoke(self.client, Method::PaymentIntentsCapture, &[id(intent_id), body(params)?])
    }

    pub fn cancel(&self, intent_id: &str, params: &PaymentIntentParams) -> Result<PaymentIntent> {
        invoke(self.client, Method::PaymentIntentsCancel, &[id(intent_id), body(params)?])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<PaymentIntent>> {
        invoke(self.client, Method::PaymentIntentsAll, &[body(params)?])
    }

    pub fn search(&self, query: &str) -> Result<List<PaymentIntent>> {
        invoke(self.client, Method::PaymentIntentsSearch, &[search_query(query)])
    }
}

pub struct SetupIntentService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> SetupIntentService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &SetupIntentParams) -> Result<SetupIntent> {
        invoke(self.client, Method::SetupIntentsCreate, &[body(params)?])
    }

    pub fn get(&self, intent_id: &str) -> Result<SetupIntent> {
        invoke(self.client, Method::SetupIntentsRetrieve, &[id(intent_id)])
    }

    pub fn update(&self, intent_id: &str, params: &SetupIntentParams) -> Result<SetupIntent> {
        invoke(self.client, Method::SetupIntentsUpdate, &[id(intent_id), body(params)?])
    }

    pub fn confirm(&self, intent_id: &str, params: &SetupIntentParams) -> Result<SetupIntent> {
        invoke(self.client, Method::SetupIntentsConfirm, &[id(intent_id), body(params)?])
    }

    pub fn cancel(&self, intent_id: &str, params: &SetupIntentParams) -> Result<SetupIntent> {
        invoke(self.client, Method::SetupIntentsCancel, &[id(intent_id), body(params)?])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<SetupIntent>> {
        invoke(self.client, Method::SetupIntentsAll, &[body(params)?])
    }
}

pub struct PaymentMethodService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> PaymentMethodService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &PaymentMethodParams) -> Result<PaymentMethod> {
        invoke(self.client, Method::PaymentMethodsCreate, &[body(params)?])
    }

    pub fn get(&self, payment_method_id: &str) -> Result<PaymentMethod> {
        invoke(self.client, Method::PaymentMethodsRetrieve, &[id(payment_method_id)])
    }

    pub fn update(
        &self,
        payment_method_id: &str,
        params: &PaymentMethodParams,
    ) -> Result<PaymentMethod> {
        invoke(
            self.client,
            Method::PaymentMethodsUpdate,
            &[id(payment_method_id), body(params)?],
        )
    }

    pub fn attach(&self, payment_method_id: &str, customer_id: &str) -> Result<PaymentMethod> {
        invoke(
            self.client,
            Method::PaymentMethodsAttach,
            &[id(payment_method_id), json!({ "customer": customer_id })],
        )
    }

    pub fn detach(&self, payment_method_id: &str) -> Result<PaymentMethod> {
        invoke(self.client, Method::PaymentMethodsDetach, &[id(payment_method_id)])
    }

    /// Payment methods of one type (`card`, `us_bank_account`, ...) saved to
    /// a customer.
    pub fn list(&self, customer_id: &str, method_type: &str) -> Result<List<PaymentMethod>> {
        invoke(
            self.client,
            Method::PaymentMethodsAll,
            &[json!({ "customer": customer_id, "type": method_type })],
        )
    }
}
