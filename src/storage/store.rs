use chrono::{DateTime, NaiveDate, Utc};

use crate::core::config::Config;
use crate::core::stats::{RowCounts, ScanCounts, SeekCounts};
use crate::core::types::{BookingId, MessageId, Money, PaymentId, PropertyId, ReviewId, UserId};
use crate::index::multimap::KeyIndex;
use crate::index::range::RangeIndex;
use crate::index::unique::UniqueIndex;
use crate::schema::entities::{
    Booking, Message, Payment, Property, PropertyUpdate, Review, User,
};
use crate::storage::table::Table;

/// Every secondary access path the store maintains.
///
/// One entry per contract: near-O(1) email lookup, no full scan for any
/// foreign-key fetch, ordered access by booking start date and by
/// (location, nightly price).
#[derive(Debug)]
pub struct Indexes {
    pub users_by_email: UniqueIndex<String, UserId>,
    pub properties_by_host: KeyIndex<UserId, PropertyId>,
    pub bookings_by_property: KeyIndex<PropertyId, BookingId>,
    pub bookings_by_guest: KeyIndex<UserId, BookingId>,
    pub payments_by_booking: KeyIndex<BookingId, PaymentId>,
    pub reviews_by_property: KeyIndex<PropertyId, ReviewId>,
    pub reviews_by_author: KeyIndex<UserId, ReviewId>,
    pub messages_by_sender: KeyIndex<UserId, MessageId>,
    pub messages_by_recipient: KeyIndex<UserId, MessageId>,
    pub bookings_by_start_date: RangeIndex<NaiveDate, BookingId>,
    pub properties_by_location_price: RangeIndex<(String, Money), PropertyId>,
}

impl Indexes {
    fn new(config: &Config) -> Self {
        let cap = config.initial_row_capacity;
        let track = config.collect_access_stats;
        Indexes {
            users_by_email: UniqueIndex::new(cap, track),
            properties_by_host: KeyIndex::new(cap, track),
            bookings_by_property: KeyIndex::new(cap, track),
            bookings_by_guest: KeyIndex::new(cap, track),
            payments_by_booking: KeyIndex::new(cap, track),
            reviews_by_property: KeyIndex::new(cap, track),
            reviews_by_author: KeyIndex::new(cap, track),
            messages_by_sender: KeyIndex::new(cap, track),
            messages_by_recipient: KeyIndex::new(cap, track),
            bookings_by_start_date: RangeIndex::new(track),
            properties_by_location_price: RangeIndex::new(track),
        }
    }
}

/// The six tables plus their index set.
///
/// All mutation goes through the `insert_*` / `remove_*` pairs below so a row
/// and its index entries never disagree; callers validate first and hold the
/// write lock for the whole operation.
#[derive(Debug)]
pub struct Store {
    pub users: Table<UserId, User>,
    pub properties: Table<PropertyId, Property>,
    pub bookings: Table<BookingId, Booking>,
    pub payments: Table<PaymentId, Payment>,
    pub reviews: Table<ReviewId, Review>,
    pub messages: Table<MessageId, Message>,
    pub indexes: Indexes,
}

impl Store {
    pub fn new(config: &Config) -> Self {
        let cap = config.initial_row_capacity;
        let track = config.collect_access_stats;
        Store {
            users: Table::new(cap, track),
            properties: Table::new(cap, track),
            bookings: Table::new(cap, track),
            payments: Table::new(cap, track),
            reviews: Table::new(cap, track),
            messages: Table::new(cap, track),
            indexes: Indexes::new(config),
        }
    }

    pub fn insert_user(&mut self, user: User) {
        self.indexes
            .users_by_email
            .insert(user.email.clone(), user.id);
        self.users.insert(user.id, user);
    }

    pub fn remove_user(&mut self, id: &UserId) -> Option<User> {
        let user = self.users.remove(id)?;
        self.indexes.users_by_email.remove(&user.email);
        Some(user)
    }

    pub fn insert_property(&mut self, property: Property) {
        self.indexes
            .properties_by_host
            .insert(property.host_id, property.id);
        self.indexes.properties_by_location_price.insert(
            (property.location.clone(), property.price_per_night),
            property.id,
        );
        self.properties.insert(property.id, property);
    }

    pub fn remove_property(&mut self, id: &PropertyId) -> Option<Property> {
        let property = self.properties.remove(id)?;
        self.indexes
            .properties_by_host
            .remove(&property.host_id, property.id);
        self.indexes.properties_by_location_price.remove(
            &(property.location.clone(), property.price_per_night),
            property.id,
        );
        Some(property)
    }

    /// Applies a partial update, refreshing `updated_at` and re-keying the
    /// (location, price) index when the nightly price moves.
    pub fn apply_property_update(
        &mut self,
        id: &PropertyId,
        update: PropertyUpdate,
        now: DateTime<Utc>,
    ) -> Option<Property> {
        let old_key = {
            let property = self.properties.get(id)?;
            (property.location.clone(), property.price_per_night)
        };

        let updated = {
            let property = self.properties.get_mut(id)?;
            if let Some(name) = update.name {
                property.name = name;
            }
            if let Some(description) = update.description {
                property.description = description;
            }
            if let Some(price) = update.price_per_night {
                property.price_per_night = price;
            }
            property.updated_at = now;
            property.clone()
        };

        let new_key = (updated.location.clone(), updated.price_per_night);
        if new_key != old_key {
            self.indexes
                .properties_by_location_price
                .remove(&old_key, updated.id);
            self.indexes
                .properties_by_location_price
                .insert(new_key, updated.id);
        }

        Some(updated)
    }

    pub fn insert_booking(&mut self, booking: Booking) {
        self.indexes
            .bookings_by_property
            .insert(booking.property_id, booking.id);
        self.indexes
            .bookings_by_guest
            .insert(booking.user_id, booking.id);
        self.indexes
            .bookings_by_start_date
            .insert(booking.start_date, booking.id);
        self.bookings.insert(booking.id, booking);
    }

    pub fn remove_booking(&mut self, id: &BookingId) -> Option<Booking> {
        let booking = self.bookings.remove(id)?;
        self.indexes
            .bookings_by_property
            .remove(&booking.property_id, booking.id);
        self.indexes
            .bookings_by_guest
            .remove(&booking.user_id, booking.id);
        self.indexes
            .bookings_by_start_date
            .remove(&booking.start_date, booking.id);
        Some(booking)
    }

    pub fn insert_payment(&mut self, payment: Payment) {
        self.indexes
            .payments_by_booking
            .insert(payment.booking_id, payment.id);
        self.payments.insert(payment.id, payment);
    }

    pub fn remove_payment(&mut self, id: &PaymentId) -> Option<Payment> {
        let payment = self.payments.remove(id)?;
        self.indexes
            .payments_by_booking
            .remove(&payment.booking_id, payment.id);
        Some(payment)
    }

    pub fn insert_review(&mut self, review: Review) {
        self.indexes
            .reviews_by_property
            .insert(review.property_id, review.id);
        self.indexes
            .reviews_by_author
            .insert(review.user_id, review.id);
        self.reviews.insert(review.id, review);
    }

    pub fn remove_review(&mut self, id: &ReviewId) -> Option<Review> {
        let review = self.reviews.remove(id)?;
        self.indexes
            .reviews_by_property
            .remove(&review.property_id, review.id);
        self.indexes
            .reviews_by_author
            .remove(&review.user_id, review.id);
        Some(review)
    }

    pub fn insert_message(&mut self, message: Message) {
        self.indexes
            .messages_by_sender
            .insert(message.sender_id, message.id);
        self.indexes
            .messages_by_recipient
            .insert(message.recipient_id, message.id);
        self.messages.insert(message.id, message);
    }

    pub fn remove_message(&mut self, id: &MessageId) -> Option<Message> {
        let message = self.messages.remove(id)?;
        self.indexes
            .messages_by_sender
            .remove(&message.sender_id, message.id);
        self.indexes
            .messages_by_recipient
            .remove(&message.recipient_id, message.id);
        Some(message)
    }

    pub fn row_counts(&self) -> RowCounts {
        RowCounts {
            users: self.users.len(),
            properties: self.properties.len(),
            bookings: self.bookings.len(),
            payments: self.payments.len(),
            reviews: self.reviews.len(),
            messages: self.messages.len(),
        }
    }

    pub fn scan_counts(&self) -> ScanCounts {
        ScanCounts {
            users: self.users.scan_count(),
            properties: self.properties.scan_count(),
            bookings: self.bookings.scan_count(),
            payments: self.payments.scan_count(),
            reviews: self.reviews.scan_count(),
            messages: self.messages.scan_count(),
        }
    }

    pub fn seek_counts(&self) -> SeekCounts {
        SeekCounts {
            users_by_email: self.indexes.users_by_email.seek_count(),
            properties_by_host: self.indexes.properties_by_host.seek_count(),
            bookings_by_property: self.indexes.bookings_by_property.seek_count(),
            bookings_by_guest: self.indexes.bookings_by_guest.seek_count(),
            payments_by_booking: self.indexes.payments_by_booking.seek_count(),
            reviews_by_property: self.indexes.reviews_by_property.seek_count(),
            reviews_by_author: self.indexes.reviews_by_author.seek_count(),
            messages_by_sender: self.indexes.messages_by_sender.seek_count(),
            messages_by_recipient: self.indexes.messages_by_recipient.seek_count(),
            bookings_by_start_date: self.indexes.bookings_by_start_date.seek_count(),
            properties_by_location_price: self
                .indexes
                .properties_by_location_price
                .seek_count(),
        }
    }
}
