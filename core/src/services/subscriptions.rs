use crate::api::StripeApi;
use crate::error::Result;
use crate::method::Method;
use crate::types::{
    List, ListParams, Subscription, SubscriptionParams, SubscriptionSchedule,
    SubscriptionScheduleParams,
};

use super::{body, id, invoke, search_query};

pub struct SubscriptionService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> SubscriptionService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &SubscriptionParams) -> Result<Subscription> {
        invoke(self.client, Method::SubscriptionsCreate, &[body(params)?])
    }

    pub fn get(&self, subscription_id: &str) -> Result<Subscription> {
        invoke(self.client, Method::SubscriptionsRetrieve, &[id(subscription_id)])
    }

    pub fn update(
        &self,
        subscription_id: &str,
        params: &SubscriptionParams,
    ) -> Result<Subscription> {
        invoke(
            self.client,
            Method::SubscriptionsUpdate,
            &[id(subscription_id), body(params)?],
        )
    }

    /// Cancel immediately. To cancel at period end use `update` with
    /// `cancel_at_period_end(true)`.
    pub fn cancel(&self, subscription_id: &str) -> Result<Subscription> {
        invoke(self.client, Method::SubscriptionsCancel, &[id(subscription_id)])
    }

    /// Resume a paused subscription.
    pub fn resume(&self, subscription_id: &str) -> Result<Subscription> {
        invoke(self.client, Method::SubscriptionsResume, &[id(subscription_id)])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<Subscription>> {
        invoke(self.client, Method::SubscriptionsAll, &[body(params)?])
    }

    pub fn search(&self, query: &str) -> Result<List<Subscription>> {
        invoke(self.client, Method::SubscriptionsSearch, &[search_query(query)])
    }
}

pub struct SubscriptionScheduleService<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: StripeApi + ?Sized> SubscriptionScheduleService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &SubscriptionScheduleParams) -> Result<SubscriptionSchedule> {
        invoke(self.client, Method::SubscriptionSchedulesCreate, &[body(params)?])
    }

    pub fn get(&self, schedule_id: &str) -> Result<SubscriptionSchedule> {
        invoke(self.client, Method::SubscriptionSchedulesRetrieve, &[id(schedule_id)])
    }

    pub fn update(
        &self,
        schedule_id: &str,
        params: &SubscriptionScheduleParams,
    ) -> Result<SubscriptionSchedule> {
        invoke(
            self.client,
            Method::SubscriptionSchedulesUpdate,
            &[id(schedule_id), body(params)?],
        )
    }

    /// Cancel the schedule and its subscription.
    pub fn cancel(&self, schedule_id: &str) -> Result<SubscriptionSchedule> {
        invoke(self.client, Method::SubscriptionSchedulesCancel, &[id(schedule_id)])
    }

    /// Detach the schedule, leaving the subscription running.
    pub fn release(&self, schedule_id: &str) -> Result<SubscriptionSchedule> {
        invoke(self.client, Method::SubscriptionSchedulesRelease, &[id(schedule_id)])
    }

    pub fn list(&self, params: &ListParams) -> Result<List<SubscriptionSchedule>> {
        invoke(self.client, Method::SubscriptionSchedulesAll, &[body(params)?])
    }
}
