use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::types::{BookingId, Money, PropertyId, ReviewId, UserId};
use crate::schema::entities::BookingStatus;

/// Booking joined to its guest (inner join, so the guest is always present).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWithGuest {
    pub booking_id: BookingId,
    pub property_id: PropertyId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Money,
    pub status: BookingStatus,
    pub guest_id: UserId,
    pub guest_name: String,
    pub guest_email: String,
}

/// One row per (property, review); review columns absent for
/// properties nobody has reviewed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyReviewRow {
    pub property_id: PropertyId,
    pub property_name: String,
    pub location: String,
    pub review_id: Option<ReviewId>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub id: BookingId,
    pub property_id: PropertyId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
}

/// Full-outer pairing of users and bookings: either side may be absent,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBookingRow {
    pub user: Option<UserSummary>,
    pub booking: Option<BookingSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBookingCount {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub booking_count: u64,
}

/// Per-property booking count with both ranking schemes over
/// (count desc, id asc): `rank` shares values across ties and leaves gaps,
/// `position` is the strict 1-based sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBookingRank {
    pub property_id: PropertyId,
    pub property_name: String,
    pub booking_count: u64,
    pub rank: u64,
    pub position: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedProperty {
    pub property_id: PropertyId,
    pub property_name: String,
    pub location: String,
    pub review_count: u64,
    pub average_rating: f64,
}
