use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime};

use chrono::{NaiveDate, Utc};
use parking_lot::{RwLock, RwLockReadGuard};

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::stats::DatabaseStats;
use crate::core::types::{BookingId, MessageId, Money, PaymentId, PropertyId, ReviewId, UserId};
use crate::schema::constraints::{self, CascadePlan};
use crate::schema::entities::{
    Booking, BookingStatus, Message, NewBooking, NewMessage, NewPayment, NewProperty, NewReview,
    NewUser, Payment, Property, PropertyUpdate, Review, User,
};
use crate::storage::store::Store;

/// The data layer facade.
///
/// One writer at a time behind a `parking_lot::RwLock`; readers take a
/// [`Snapshot`] and never block each other. Every write validates against the
/// constraint layer and maintains all indexes inside a single critical
/// section, so no caller ever observes a row without its index entries or a
/// parent without its cascade applied.
pub struct Database {
    config: Config,
    store: RwLock<Store>,
    start_time: SystemTime,
    started: Instant,
    inserts: AtomicU64,
    deletes: AtomicU64,
}

impl Database {
    pub fn open(config: Config) -> Self {
        let store = Store::new(&config);
        Database {
            config,
            store: RwLock::new(store),
            start_time: SystemTime::now(),
            started: Instant::now(),
            inserts: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-locked view for keyed lookups and the query catalog.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            store: self.store.read(),
        }
    }

    // ---- inserts ----

    pub fn create_user(&self, new: NewUser) -> Result<User> {
        let mut store = self.store.write();
        constraints::check_new_user(&store, &new)?;

        let user = User {
            id: UserId::new(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            password_hash: new.password_hash,
            phone_number: new.phone_number,
            role: new.role,
            created_at: Utc::now(),
        };
        store.insert_user(user.clone());
        self.inserts.fetch_add(1, Ordering::Relaxed);
        log::debug!("created user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub fn create_property(&self, new: NewProperty) -> Result<Property> {
        let mut store = self.store.write();
        constraints::check_new_property(&store, &new)?;

        let now = Utc::now();
        let property = Property {
            id: PropertyId::new(),
            host_id: new.host_id,
            name: new.name,
            description: new.description,
            location: new.location,
            price_per_night: new.price_per_night,
            created_at: now,
            updated_at: now,
        };
        store.insert_property(property.clone());
        self.inserts.fetch_add(1, Ordering::Relaxed);
        log::debug!("created property {} for host {}", property.id, property.host_id);
        Ok(property)
    }

    pub fn create_booking(&self, new: NewBooking) -> Result<Booking> {
        let mut store = self.store.write();
        constraints::check_new_booking(&store, &new)?;

        let booking = Booking {
            id: BookingId::new(),
            property_id: new.property_id,
            user_id: new.user_id,
            start_date: new.start_date,
            end_date: new.end_date,
            total_price: new.total_price,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        };
        store.insert_booking(booking.clone());
        self.inserts.fetch_add(1, Ordering::Relaxed);
        log::debug!("created booking {} on property {}", booking.id, booking.property_id);
        Ok(booking)
    }

    pub fn create_payment(&self, new: NewPayment) -> Result<Payment> {
        let mut store = self.store.write();
        constraints::check_new_payment(&store, &new)?;

        let payment = Payment {
            id: PaymentId::new(),
            booking_id: new.booking_id,
            amount: new.amount,
            payment_date: Utc::now(),
            payment_method: new.payment_method,
        };
        store.insert_payment(payment.clone());
        self.inserts.fetch_add(1, Ordering::Relaxed);
        log::debug!("recorded payment {} for booking {}", payment.id, payment.booking_id);
        Ok(payment)
    }

    pub fn create_review(&self, new: NewReview) -> Result<Review> {
        let mut store = self.store.write();
        constraints::check_new_review(&store, &new)?;

        let review = Review {
            id: ReviewId::new(),
            property_id: new.property_id,
            user_id: new.user_id,
            rating: new.rating,
            comment: new.comment,
            created_at: Utc::now(),
        };
        store.insert_review(review.clone());
        self.inserts.fetch_add(1, Ordering::Relaxed);
        Ok(review)
    }

    pub fn send_message(&self, new: NewMessage) -> Result<Message> {
        let mut store = self.store.write();
        constraints::check_new_message(&store, &new)?;

        let message = Message {
            id: MessageId::new(),
            sender_id: new.sender_id,
            recipient_id: new.recipient_id,
            message_body: new.message_body,
            sent_at: Utc::now(),
        };
        store.insert_message(message.clone());
        self.inserts.fetch_add(1, Ordering::Relaxed);
        Ok(message)
    }

    // ---- updates ----

    pub fn update_property(&self, id: PropertyId, update: PropertyUpdate) -> Result<Property> {
        if let Some(price) = update.price_per_night {
            if price.is_negative() {
                return Err(Error::check(format!(
                    "price_per_night must be non-negative, got {}",
                    price
                )));
            }
        }

        let mut store = self.store.write();
        store
            .apply_property_update(&id, update, Utc::now())
            .ok_or_else(|| Error::not_found(format!("property not found: {}", id)))
    }

    pub fn set_booking_status(&self, id: BookingId, next: BookingStatus) -> Result<Booking> {
        let mut store = self.store.write();
        let booking = store
            .bookings
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(format!("booking not found: {}", id)))?;

        constraints::check_status_transition(booking.status, next)?;
        booking.status = next;
        let updated = booking.clone();
        log::debug!("booking {} is now {}", updated.id, updated.status.as_str());
        Ok(updated)
    }

    // ---- delete planning ----

    /// Dependent rows a `delete_user` would remove, without removing anything.
    pub fn plan_delete_user(&self, id: UserId) -> Result<CascadePlan> {
        constraints::plan_delete_user(&self.store.read(), &id)
    }

    pub fn plan_delete_property(&self, id: PropertyId) -> Result<CascadePlan> {
        constraints::plan_delete_property(&self.store.read(), &id)
    }

    pub fn plan_delete_booking(&self, id: BookingId) -> Result<CascadePlan> {
        constraints::plan_delete_booking(&self.store.read(), &id)
    }

    // ---- deletes ----

    /// Restricted while the user has bookings as guest; otherwise removes the
    /// user and the full cascade closure in one critical section.
    pub fn delete_user(&self, id: UserId) -> Result<CascadePlan> {
        let mut store = self.store.write();
        let plan = constraints::plan_delete_user(&store, &id)?;
        Self::apply_plan(&mut store, &plan);
        store.remove_user(&id);
        self.deletes
            .fetch_add(1 + plan.total() as u64, Ordering::Relaxed);
        log::info!("deleted user {} (+{} dependent rows)", id, plan.total());
        Ok(plan)
    }

    pub fn delete_property(&self, id: PropertyId) -> Result<CascadePlan> {
        let mut store = self.store.write();
        let plan = constraints::plan_delete_property(&store, &id)?;
        Self::apply_plan(&mut store, &plan);
        store.remove_property(&id);
        self.deletes
            .fetch_add(1 + plan.total() as u64, Ordering::Relaxed);
        log::info!("deleted property {} (+{} dependent rows)", id, plan.total());
        Ok(plan)
    }

    pub fn delete_booking(&self, id: BookingId) -> Result<CascadePlan> {
        let mut store = self.store.write();
        let plan = constraints::plan_delete_booking(&store, &id)?;
        Self::apply_plan(&mut store, &plan);
        store.remove_booking(&id);
        self.deletes
            .fetch_add(1 + plan.total() as u64, Ordering::Relaxed);
        Ok(plan)
    }

    pub fn delete_payment(&self, id: PaymentId) -> Result<()> {
        let mut store = self.store.write();
        store
            .remove_payment(&id)
            .ok_or_else(|| Error::not_found(format!("payment not found: {}", id)))?;
        self.deletes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn delete_review(&self, id: ReviewId) -> Result<()> {
        let mut store = self.store.write();
        store
            .remove_review(&id)
            .ok_or_else(|| Error::not_found(format!("review not found: {}", id)))?;
        self.deletes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn delete_message(&self, id: MessageId) -> Result<()> {
        let mut store = self.store.write();
        store
            .remove_message(&id)
            .ok_or_else(|| Error::not_found(format!("message not found: {}", id)))?;
        self.deletes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    // Dependents go first so no index entry ever points at a removed parent.
    fn apply_plan(store: &mut Store, plan: &CascadePlan) {
        for id in &plan.payments {
            store.remove_payment(id);
        }
        for id in &plan.reviews {
            store.remove_review(id);
        }
        for id in &plan.messages {
            store.remove_message(id);
        }
        for id in &plan.bookings {
            store.remove_booking(id);
        }
        for id in &plan.properties {
            store.remove_property(id);
        }
    }

    // ---- monitoring ----

    pub fn stats(&self) -> DatabaseStats {
        let store = self.store.read();
        DatabaseStats {
            uptime_secs: self.started.elapsed().as_secs(),
            start_time: self.start_time,
            rows: store.row_counts(),
            table_scans: store.scan_counts(),
            index_seeks: store.seek_counts(),
            total_inserts: self.inserts.load(Ordering::Relaxed),
            total_deletes: self.deletes.load(Ordering::Relaxed),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Database::open(Config::default())
    }
}

/// Read view over the store at one point in time.
///
/// Holds the read half of the store lock; cheap to take, blocks only writers.
pub struct Snapshot<'a> {
    store: RwLockReadGuard<'a, Store>,
}

impl Snapshot<'_> {
    pub fn store(&self) -> &Store {
        &self.store
    }

    // ---- point fetches by primary key ----

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.store.users.get(&id).cloned()
    }

    pub fn get_property(&self, id: PropertyId) -> Option<Property> {
        self.store.properties.get(&id).cloned()
    }

    pub fn get_booking(&self, id: BookingId) -> Option<Booking> {
        self.store.bookings.get(&id).cloned()
    }

    pub fn get_payment(&self, id: PaymentId) -> Option<Payment> {
        self.store.payments.get(&id).cloned()
    }

    pub fn get_review(&self, id: ReviewId) -> Option<Review> {
        self.store.reviews.get(&id).cloned()
    }

    pub fn get_message(&self, id: MessageId) -> Option<Message> {
        self.store.messages.get(&id).cloned()
    }

    // ---- keyed lookups, each served by exactly one secondary index ----

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let id = self.store.indexes.users_by_email.get(email)?;
        self.store.users.get(&id).cloned()
    }

    pub fn properties_of_host(&self, host_id: UserId) -> Vec<Property> {
        let mut ids = self.store.indexes.properties_by_host.get(&host_id).to_vec();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.store.properties.get(id).cloned())
            .collect()
    }

    pub fn bookings_of_property(&self, property_id: PropertyId) -> Vec<Booking> {
        let mut ids = self
            .store
            .indexes
            .bookings_by_property
            .get(&property_id)
            .to_vec();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.store.bookings.get(id).cloned())
            .collect()
    }

    pub fn bookings_of_guest(&self, user_id: UserId) -> Vec<Booking> {
        let mut ids = self.store.indexes.bookings_by_guest.get(&user_id).to_vec();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.store.bookings.get(id).cloned())
            .collect()
    }

    pub fn payments_of_booking(&self, booking_id: BookingId) -> Vec<Payment> {
        let mut ids = self
            .store
            .indexes
            .payments_by_booking
            .get(&booking_id)
            .to_vec();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.store.payments.get(id).cloned())
            .collect()
    }

    pub fn reviews_of_property(&self, property_id: PropertyId) -> Vec<Review> {
        let mut ids = self
            .store
            .indexes
            .reviews_by_property
            .get(&property_id)
            .to_vec();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.store.reviews.get(id).cloned())
            .collect()
    }

    pub fn reviews_by_author(&self, user_id: UserId) -> Vec<Review> {
        let mut ids = self.store.indexes.reviews_by_author.get(&user_id).to_vec();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.store.reviews.get(id).cloned())
            .collect()
    }

    pub fn messages_sent_by(&self, user_id: UserId) -> Vec<Message> {
        let mut ids = self.store.indexes.messages_by_sender.get(&user_id).to_vec();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.store.messages.get(id).cloned())
            .collect()
    }

    pub fn messages_received_by(&self, user_id: UserId) -> Vec<Message> {
        let mut ids = self
            .store
            .indexes
            .messages_by_recipient
            .get(&user_id)
            .to_vec();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.store.messages.get(id).cloned())
            .collect()
    }

    /// Bookings whose stay interval intersects `[from, to)`.
    ///
    /// Served by the start-date B-tree: candidates start before `to`, the end
    /// bound is checked per candidate. Results ordered (start_date, id).
    pub fn bookings_overlapping(&self, from: NaiveDate, to: NaiveDate) -> Vec<Booking> {
        let candidates = self.store.indexes.bookings_by_start_date.range(..to);
        let mut hits: Vec<Booking> = candidates
            .iter()
            .filter_map(|id| self.store.bookings.get(id))
            .filter(|booking| booking.end_date > from)
            .cloned()
            .collect();
        hits.sort_by_key(|booking| (booking.start_date, booking.id));
        hits
    }

    /// Properties in `location` with a nightly price inside `[min, max]`,
    /// ordered (price, id). Served by the composite (location, price) B-tree.
    pub fn properties_in_location(&self, location: &str, min: Money, max: Money) -> Vec<Property> {
        let ids = self
            .store
            .indexes
            .properties_by_location_price
            .range((location.to_string(), min)..=(location.to_string(), max));
        let mut hits: Vec<Property> = ids
            .iter()
            .filter_map(|id| self.store.properties.get(id).cloned())
            .collect();
        hits.sort_by(|a, b| (a.price_per_night, a.id).cmp(&(b.price_per_night, b.id)));
        hits
    }
}
