use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Point-in-time statistics for monitoring a [`Database`](crate::core::database::Database).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStats {
    // General info
    pub uptime_secs: u64,
    pub start_time: SystemTime,

    // Row counts
    pub rows: RowCounts,

    // Access-path metrics
    pub table_scans: ScanCounts,
    pub index_seeks: SeekCounts,

    // Write metrics
    pub total_inserts: u64,
    pub total_deletes: u64,
}

/// Live row count per table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowCounts {
    pub users: usize,
    pub properties: usize,
    pub bookings: usize,
    pub payments: usize,
    pub reviews: usize,
    pub messages: usize,
}

/// Full-table scans observed per table since startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanCounts {
    pub users: u64,
    pub properties: u64,
    pub bookings: u64,
    pub payments: u64,
    pub reviews: u64,
    pub messages: u64,
}

impl ScanCounts {
    pub fn total(&self) -> u64 {
        self.users + self.properties + self.bookings + self.payments + self.reviews + self.messages
    }
}

/// Keyed lookups served per secondary index since startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeekCounts {
    pub users_by_email: u64,
    pub properties_by_host: u64,
    pub bookings_by_property: u64,
    pub bookings_by_guest: u64,
    pub payments_by_booking: u64,
    pub reviews_by_property: u64,
    pub reviews_by_author: u64,
    pub messages_by_sender: u64,
    pub messages_by_recipient: u64,
    pub bookings_by_start_date: u64,
    pub properties_by_location_price: u64,
}

impl SeekCounts {
    pub fn total(&self) -> u64 {
        self.users_by_email
            + self.properties_by_host
            + self.bookings_by_property
            + self.bookings_by_guest
            + self.payments_by_booking
            + self.reviews_by_property
            + self.reviews_by_author
            + self.messages_by_sender
            + self.messages_by_recipient
            + self.bookings_by_start_date
            + self.properties_by_location_price
    }
}
