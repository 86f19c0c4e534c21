pub mod aggregates;
pub mod joins;
pub mod ranking;
pub mod rows;

pub use aggregates::{
    booking_count_by_user, properties_above_rating_threshold,
    properties_above_rating_threshold_correlated, users_with_booking_count_above,
};
pub use joins::{bookings_with_guest, properties_with_reviews, users_and_bookings};
pub use ranking::property_booking_rank;

use serde::Serialize;

use crate::core::error::Result;

/// Serialize a result set to a JSON array, one object per row.
pub fn export_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
