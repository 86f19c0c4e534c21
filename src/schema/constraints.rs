use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::types::{BookingId, MessageId, PaymentId, PropertyId, ReviewId, UserId};
use crate::schema::entities::{
    BookingStatus, NewBooking, NewMessage, NewPayment, NewProperty, NewReview, NewUser,
};
use crate::storage::store::Store;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

// Insert-time checks. Each runs before any mutation; a returned error means
// the store was not touched.

pub fn check_new_user(store: &Store, new: &NewUser) -> Result<()> {
    if store.indexes.users_by_email.contains_key(&new.email) {
        return Err(Error::unique(format!(
            "email already registered: {}",
            new.email
        )));
    }
    Ok(())
}

pub fn check_new_property(store: &Store, new: &NewProperty) -> Result<()> {
    if !store.users.contains_key(&new.host_id) {
        return Err(Error::reference(format!("host not found: {}", new.host_id)));
    }
    if new.price_per_night.is_negative() {
        return Err(Error::check(format!(
            "price_per_night must be non-negative, got {}",
            new.price_per_night
        )));
    }
    Ok(())
}

pub fn check_new_booking(store: &Store, new: &NewBooking) -> Result<()> {
    if !store.properties.contains_key(&new.property_id) {
        return Err(Error::reference(format!(
            "property not found: {}",
            new.property_id
        )));
    }
    if !store.users.contains_key(&new.user_id) {
        return Err(Error::reference(format!("guest not found: {}", new.user_id)));
    }
    if new.end_date <= new.start_date {
        return Err(Error::check(format!(
            "end_date {} must be after start_date {}",
            new.end_date, new.start_date
        )));
    }
    if new.total_price.is_negative() {
        return Err(Error::check(format!(
            "total_price must be non-negative, got {}",
            new.total_price
        )));
    }
    Ok(())
}

pub fn check_new_payment(store: &Store, new: &NewPayment) -> Result<()> {
    if !store.bookings.contains_key(&new.booking_id) {
        return Err(Error::reference(format!(
            "booking not found: {}",
            new.booking_id
        )));
    }
    if new.amount.is_negative() {
        return Err(Error::check(format!(
            "amount must be non-negative, got {}",
            new.amount
        )));
    }
    Ok(())
}

pub fn check_new_review(store: &Store, new: &NewReview) -> Result<()> {
    if !store.properties.contains_key(&new.property_id) {
        return Err(Error::reference(format!(
            "property not found: {}",
            new.property_id
        )));
    }
    if !store.users.contains_key(&new.user_id) {
        return Err(Error::reference(format!("author not found: {}", new.user_id)));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&new.rating) {
        return Err(Error::check(format!(
            "rating must be within {}..={}, got {}",
            MIN_RATING, MAX_RATING, new.rating
        )));
    }
    Ok(())
}

pub fn check_new_message(store: &Store, new: &NewMessage) -> Result<()> {
    if !store.users.contains_key(&new.sender_id) {
        return Err(Error::reference(format!(
            "sender not found: {}",
            new.sender_id
        )));
    }
    if !store.users.contains_key(&new.recipient_id) {
        return Err(Error::reference(format!(
            "recipient not found: {}",
            new.recipient_id
        )));
    }
    Ok(())
}

/// Legal status moves: `pending -> confirmed` and `pending -> canceled`.
pub fn check_status_transition(current: BookingStatus, next: BookingStatus) -> Result<()> {
    match (current, next) {
        (BookingStatus::Pending, BookingStatus::Confirmed)
        | (BookingStatus::Pending, BookingStatus::Canceled) => Ok(()),
        _ => Err(Error::check(format!(
            "illegal status transition: {} -> {}",
            current.as_str(),
            next.as_str()
        ))),
    }
}

/// Everything a delete would take with it, computed without mutating.
///
/// Identifier sets are sorted, so the same store state always yields the
/// same plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CascadePlan {
    pub properties: Vec<PropertyId>,
    pub bookings: Vec<BookingId>,
    pub payments: Vec<PaymentId>,
    pub reviews: Vec<ReviewId>,
    pub messages: Vec<MessageId>,
}

impl CascadePlan {
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Number of dependent rows the delete would remove (root excluded).
    pub fn total(&self) -> usize {
        self.properties.len()
            + self.bookings.len()
            + self.payments.len()
            + self.reviews.len()
            + self.messages.len()
    }
}

/// Delete planning for a user.
///
/// A user with bookings as guest is protected by the restrict policy so the
/// booking history survives. Otherwise the closure covers owned properties
/// (with their bookings, those bookings' payments, and their reviews),
/// authored reviews, and messages on either end.
pub fn plan_delete_user(store: &Store, id: &UserId) -> Result<CascadePlan> {
    if !store.users.contains_key(id) {
        return Err(Error::not_found(format!("user not found: {}", id)));
    }
    if store.indexes.bookings_by_guest.cardinality(id) > 0 {
        return Err(Error::reference(format!(
            "user {} still has bookings; delete is restricted",
            id
        )));
    }

    let mut properties: BTreeSet<PropertyId> = BTreeSet::new();
    let mut bookings: BTreeSet<BookingId> = BTreeSet::new();
    let mut payments: BTreeSet<PaymentId> = BTreeSet::new();
    let mut reviews: BTreeSet<ReviewId> = BTreeSet::new();
    let mut messages: BTreeSet<MessageId> = BTreeSet::new();

    for property_id in store.indexes.properties_by_host.get(id) {
        properties.insert(*property_id);
        collect_property_dependents(store, property_id, &mut bookings, &mut payments, &mut reviews);
    }

    reviews.extend(store.indexes.reviews_by_author.get(id).iter().copied());
    messages.extend(store.indexes.messages_by_sender.get(id).iter().copied());
    messages.extend(store.indexes.messages_by_recipient.get(id).iter().copied());

    Ok(CascadePlan {
        properties: properties.into_iter().collect(),
        bookings: bookings.into_iter().collect(),
        payments: payments.into_iter().collect(),
        reviews: reviews.into_iter().collect(),
        messages: messages.into_iter().collect(),
    })
}

pub fn plan_delete_property(store: &Store, id: &PropertyId) -> Result<CascadePlan> {
    if !store.properties.contains_key(id) {
        return Err(Error::not_found(format!("property not found: {}", id)));
    }

    let mut bookings: BTreeSet<BookingId> = BTreeSet::new();
    let mut payments: BTreeSet<PaymentId> = BTreeSet::new();
    let mut reviews: BTreeSet<ReviewId> = BTreeSet::new();
    collect_property_dependents(store, id, &mut bookings, &mut payments, &mut reviews);

    Ok(CascadePlan {
        properties: Vec::new(),
        bookings: bookings.into_iter().collect(),
        payments: payments.into_iter().collect(),
        reviews: reviews.into_iter().collect(),
        messages: Vec::new(),
    })
}

pub fn plan_delete_booking(store: &Store, id: &BookingId) -> Result<CascadePlan> {
    if !store.bookings.contains_key(id) {
        return Err(Error::not_found(format!("booking not found: {}", id)));
    }

    let mut payments: BTreeSet<PaymentId> = BTreeSet::new();
    payments.extend(store.indexes.payments_by_booking.get(id).iter().copied());

    Ok(CascadePlan {
        payments: payments.into_iter().collect(),
        ..CascadePlan::default()
    })
}

fn collect_property_dependents(
    store: &Store,
    property_id: &PropertyId,
    bookings: &mut BTreeSet<BookingId>,
    payments: &mut BTreeSet<PaymentId>,
    reviews: &mut BTreeSet<ReviewId>,
) {
    for booking_id in store.indexes.bookings_by_property.get(property_id) {
        bookings.insert(*booking_id);
        payments.extend(
            store
                .indexes
                .payments_by_booking
                .get(booking_id)
                .iter()
                .copied(),
        );
    }
    reviews.extend(
        store
            .indexes
            .reviews_by_property
            .get(property_id)
            .iter()
            .copied(),
    );
}
