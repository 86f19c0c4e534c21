use crate::query::rows::{
    BookingSummary, BookingWithGuest, PropertyReviewRow, UserBookingRow, UserSummary,
};
use crate::schema::entities::BookingStatus;
use crate::storage::store::Store;

/// Bookings in `status` paired with their guest, inner-join semantics:
/// a booking whose guest row is missing is excluded rather than nulled.
/// Ordered by booking id.
pub fn bookings_with_guest(store: &Store, status: BookingStatus) -> Vec<BookingWithGuest> {
    let mut rows: Vec<BookingWithGuest> = store
        .bookings
        .scan()
        .filter(|booking| booking.status == status)
        .filter_map(|booking| {
            let guest = store.users.get(&booking.user_id)?;
            Some(BookingWithGuest {
                booking_id: booking.id,
                property_id: booking.property_id,
                start_date: booking.start_date,
                end_date: booking.end_date,
                total_price: booking.total_price,
                status: booking.status,
                guest_id: guest.id,
                guest_name: guest.full_name(),
                guest_email: guest.email.clone(),
            })
        })
        .collect();
    rows.sort_by_key(|row| row.booking_id);
    rows
}

/// Every property with each of its reviews, left-join semantics: a property
/// with no reviews still yields one row with the review columns absent.
/// Ordered by property name ascending (property id, then review id, on ties).
pub fn properties_with_reviews(store: &Store) -> Vec<PropertyReviewRow> {
    let mut properties: Vec<_> = store.properties.scan().collect();
    properties.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));

    let mut rows = Vec::new();
    for property in properties {
        let mut review_ids = store.indexes.reviews_by_property.get(&property.id).to_vec();
        review_ids.sort();

        if review_ids.is_empty() {
            rows.push(PropertyReviewRow {
                property_id: property.id,
                property_name: property.name.clone(),
                location: property.location.clone(),
                review_id: None,
                rating: None,
                comment: None,
            });
            continue;
        }

        for review_id in review_ids {
            if let Some(review) = store.reviews.get(&review_id) {
                rows.push(PropertyReviewRow {
                    property_id: property.id,
                    property_name: property.name.clone(),
                    location: property.location.clone(),
                    review_id: Some(review.id),
                    rating: Some(review.rating),
                    comment: Some(review.comment.clone()),
                });
            }
        }
    }
    rows
}

/// Full-outer pairing of users and bookings in one pass: every user appears
/// (with an absent booking side if they have none), then any booking whose
/// guest row is missing is appended with an absent user side. While
/// referential integrity holds the second group is empty; the semantics are
/// kept for stores populated without constraint checks.
/// Ordered by (user id, booking id), orphaned bookings last by booking id.
pub fn users_and_bookings(store: &Store) -> Vec<UserBookingRow> {
    let mut users: Vec<_> = store.users.scan().collect();
    users.sort_by_key(|user| user.id);

    let mut rows = Vec::new();
    for user in users {
        let summary = UserSummary {
            id: user.id,
            name: user.full_name(),
            email: user.email.clone(),
        };

        let mut booking_ids = store.indexes.bookings_by_guest.get(&user.id).to_vec();
        booking_ids.sort();

        if booking_ids.is_empty() {
            rows.push(UserBookingRow {
                user: Some(summary),
                booking: None,
            });
            continue;
        }

        for booking_id in booking_ids {
            if let Some(booking) = store.bookings.get(&booking_id) {
                rows.push(UserBookingRow {
                    user: Some(summary.clone()),
                    booking: Some(summarize(booking)),
                });
            }
        }
    }

    // Unmatched right side: bookings pointing at no user row.
    let mut orphans: Vec<_> = store
        .bookings
        .scan()
        .filter(|booking| !store.users.contains_key(&booking.user_id))
        .collect();
    orphans.sort_by_key(|booking| booking.id);
    for booking in orphans {
        rows.push(UserBookingRow {
            user: None,
            booking: Some(summarize(booking)),
        });
    }

    rows
}

fn summarize(booking: &crate::schema::entities::Booking) -> BookingSummary {
    BookingSummary {
        id: booking.id,
        property_id: booking.property_id,
        start_date: booking.start_date,
        end_date: booking.end_date,
        status: booking.status,
    }
}
