use serde::{Deserialize, Serialize};

use crate::object::StripeObject;

use super::{
    BankAccount, Customer, Invoice, PaymentIntent, PaymentMethod, Price, Product, SetupIntent,
    Subscription, SubscriptionSchedule,
};

/// A related object that Stripe returns as its id unless the request asked
/// for it in `expand`, in which case the whole object is inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T: HasId> Expandable<T> {
    /// The related object's id, whichever form was returned.
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(object) => object.id(),
        }
    }
}

impl<T> Expandable<T> {
    pub fn is_object(&self) -> bool {
        matches!(self, Expandable::Object(_))
    }

    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(object) => Some(object),
        }
    }

    pub fn into_object(self) -> Option<T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(object) => Some(*object),
        }
    }
}

impl<T> Default for Expandable<T> {
    fn default() -> Self {
        Expandable::Id(String::new())
    }
}

impl<T> From<&str> for Expandable<T> {
    fn from(id: &str) -> Self {
        Expandable::Id(id.to_string())
    }
}

impl<T> From<String> for Expandable<T> {
    fn from(id: String) -> Self {
        Expandable::Id(id)
    }
}

/// Objects that carry a Stripe id.
pub trait HasId {
    fn id(&self) -> &str;
}

macro_rules! has_id {
    ($($ty:ty),* $(,)?) => {
        $(impl HasId for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

has_id!(
    BankAccount,
    Customer,
    Invoice,
    PaymentIntent,
    PaymentMethod,
    Price,
    Product,
    SetupIntent,
    Subscription,
    SubscriptionSchedule,
);

impl HasId for StripeObject {
    fn id(&self) -> &str {
        StripeObject::id(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_or_object_both_parse() {
        let id: Expandable<Customer> = serde_json::from_value(json!("cus_1")).unwrap();
        assert_eq!(id, Expandable::Id("cus_1".to_string()));
        assert_eq!(id.id(), "cus_1");

        let payload = json!({"id": "cus_2", "object": "customer", "email": "a@example.com"});
        let object: Expandable<Customer> = serde_json::from_value(payload).unwrap();
        assert!(object.is_object());
        assert_eq!(object.id(), "cus_2");
        assert_eq!(object.as_object().unwrap().email.as_deref(), Some("a@example.com"));
    }

    #[test]
    fn untyped_objects_use_their_id_field() {
        let charge: Expandable<StripeObject> =
            serde_json::from_value(json!({"id": "ch_1", "object": "charge"})).unwrap();
        assert_eq!(charge.id(), "ch_1");
        assert!(Expandable::<StripeObject>::default().id().is_empty());
    }
}
