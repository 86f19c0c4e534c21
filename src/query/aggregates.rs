use std::collections::HashMap;

use crate::core::types::PropertyId;
use crate::query::rows::{RatedProperty, UserBookingCount};
use crate::storage::store::Store;

/// Booking count per user, zero included, ordered (count desc, user id asc).
pub fn booking_count_by_user(store: &Store) -> Vec<UserBookingCount> {
    let mut rows: Vec<UserBookingCount> = store
        .users
        .scan()
        .map(|user| UserBookingCount {
            user_id: user.id,
            name: user.full_name(),
            email: user.email.clone(),
            booking_count: store.indexes.bookings_by_guest.cardinality(&user.id) as u64,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.booking_count
            .cmp(&a.booking_count)
            .then(a.user_id.cmp(&b.user_id))
    });
    rows
}

/// Users whose booking count is strictly above `min`, same ordering as
/// [`booking_count_by_user`]. A user with exactly `min` bookings is excluded.
pub fn users_with_booking_count_above(store: &Store, min: u64) -> Vec<UserBookingCount> {
    let mut rows = booking_count_by_user(store);
    rows.retain(|row| row.booking_count > min);
    rows
}

/// Properties whose mean review rating is strictly above `threshold`,
/// computed by grouping all reviews once. Zero-review properties have no
/// defined mean and are excluded. Ordered by property id.
pub fn properties_above_rating_threshold(store: &Store, threshold: f64) -> Vec<RatedProperty> {
    let mut totals: HashMap<PropertyId, (u64, u64)> = HashMap::new();
    for review in store.reviews.scan() {
        let entry = totals.entry(review.property_id).or_insert((0, 0));
        entry.0 += review.rating as u64;
        entry.1 += 1;
    }

    let mut rows: Vec<RatedProperty> = store
        .properties
        .scan()
        .filter_map(|property| {
            let (sum, count) = totals.get(&property.id).copied()?;
            let average = sum as f64 / count as f64;
            if average > threshold {
                Some(RatedProperty {
                    property_id: property.id,
                    property_name: property.name.clone(),
                    location: property.location.clone(),
                    review_count: count,
                    average_rating: average,
                })
            } else {
                None
            }
        })
        .collect();
    rows.sort_by_key(|row| row.property_id);
    rows
}

/// Same result as [`properties_above_rating_threshold`], evaluated the other
/// way around: one per-property index probe instead of one grouped pass.
/// The two stay interchangeable; tests hold them to identical output.
pub fn properties_above_rating_threshold_correlated(
    store: &Store,
    threshold: f64,
) -> Vec<RatedProperty> {
    let mut rows: Vec<RatedProperty> = store
        .properties
        .scan()
        .filter_map(|property| {
            let review_ids = store.indexes.reviews_by_property.get(&property.id);
            if review_ids.is_empty() {
                return None;
            }
            let mut sum = 0u64;
            let mut count = 0u64;
            for review_id in review_ids {
                if let Some(review) = store.reviews.get(review_id) {
                    sum += review.rating as u64;
                    count += 1;
                }
            }
            let average = sum as f64 / count as f64;
            if average > threshold {
                Some(RatedProperty {
                    property_id: property.id,
                    property_name: property.name.clone(),
                    location: property.location.clone(),
                    review_count: count,
                    average_rating: average,
                })
            } else {
                None
            }
        })
        .collect();
    rows.sort_by_key(|row| row.property_id);
    rows
}
