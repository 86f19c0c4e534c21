use crate::query::rows::PropertyBookingRank;
use crate::storage::store::Store;

/// Booking count per property with two parallel rankings over
/// (count desc, property id asc):
///
/// - `rank`: tied counts share a rank and the next distinct count skips by
///   the tie-group size, so counts [5, 5, 3, 1] rank [1, 1, 3, 4];
/// - `position`: strict 1-based sequence with the property id as the
///   deterministic tie-break, so the same counts number [1, 2, 3, 4].
pub fn property_booking_rank(store: &Store) -> Vec<PropertyBookingRank> {
    let mut rows: Vec<PropertyBookingRank> = store
        .properties
        .scan()
        .map(|property| PropertyBookingRank {
            property_id: property.id,
            property_name: property.name.clone(),
            booking_count: store.indexes.bookings_by_property.cardinality(&property.id) as u64,
            rank: 0,
            position: 0,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.booking_count
            .cmp(&a.booking_count)
            .then(a.property_id.cmp(&b.property_id))
    });

    let mut previous_count = None;
    let mut current_rank = 0u64;
    for (idx, row) in rows.iter_mut().enumerate() {
        let position = idx as u64 + 1;
        if previous_count != Some(row.booking_count) {
            current_rank = position;
            previous_count = Some(row.booking_count);
        }
        row.rank = current_rank;
        row.position = position;
    }

    rows
}
