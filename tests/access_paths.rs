//! Counter-based proof that keyed lookups stay on their index.
//!
//! Every assertion works off scan/seek deltas instead of plan text: a keyed
//! lookup must leave every table scan counter where it was, at small and at
//! larger volume alike.

use chrono::NaiveDate;

use staybase::core::config::Config;
use staybase::core::stats::DatabaseStats;
use staybase::core::types::{BookingId, Money, PropertyId, UserId};
use staybase::query;
use staybase::schema::entities::{
    NewBooking, NewMessage, NewPayment, NewProperty, NewReview, NewUser, PaymentMethod, Role,
};
use staybase::Database;

struct Seeded {
    users: Vec<UserId>,
    properties: Vec<PropertyId>,
    bookings: Vec<BookingId>,
}

fn money(text: &str) -> Money {
    text.parse().unwrap()
}

/// `n` hosts each with one property; every host books their neighbor's
/// property, pays it, reviews it, and messages the neighbor.
fn seed_volume(db: &Database, n: usize) -> Seeded {
    let mut users = Vec::with_capacity(n);
    let mut properties = Vec::with_capacity(n);
    let mut bookings = Vec::with_capacity(n);

    for i in 0..n {
        let user = db
            .create_user(NewUser {
                first_name: format!("User{}", i),
                last_name: "Load".to_string(),
                email: format!("user{}@load.test", i),
                password_hash: "hash".to_string(),
                phone_number: None,
                role: Role::Host,
            })
            .unwrap();
        users.push(user.id);

        let property = db
            .create_property(NewProperty {
                host_id: user.id,
                name: format!("Listing {}", i),
                description: String::new(),
                location: format!("city{}", i % 10),
                price_per_night: Money::from_cents(5_000 + (i as i64 % 50) * 100),
            })
            .unwrap();
        properties.push(property.id);
    }

    for i in 0..n {
        let guest = users[i];
        let property = properties[(i + 1) % n];
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
            + chrono::Days::new((i % 300) as u64);
        let booking = db
            .create_booking(NewBooking {
                property_id: property,
                user_id: guest,
                start_date: start,
                end_date: start + chrono::Days::new(3),
                total_price: money("210.00"),
            })
            .unwrap();
        bookings.push(booking.id);

        db.create_payment(NewPayment {
            booking_id: booking.id,
            amount: money("210.00"),
            payment_method: PaymentMethod::Stripe,
        })
        .unwrap();

        db.create_review(NewReview {
            property_id: property,
            user_id: guest,
            rating: 1 + (i % 5) as u8,
            comment: String::new(),
        })
        .unwrap();

        db.send_message(NewMessage {
            sender_id: guest,
            recipient_id: users[(i + 1) % n],
            message_body: "hello".to_string(),
        })
        .unwrap();
    }

    Seeded {
        users,
        properties,
        bookings,
    }
}

fn assert_no_new_scans(before: &DatabaseStats, after: &DatabaseStats) {
    assert_eq!(
        before.table_scans.total(),
        after.table_scans.total(),
        "a keyed lookup fell back to a full scan"
    );
}

fn exercise_keyed_lookups(db: &Database, seeded: &Seeded, probe: usize) {
    let snapshot = db.snapshot();

    let before = db.stats();
    let found = snapshot.find_user_by_email(&format!("user{}@load.test", probe));
    assert!(found.is_some());
    let after = db.stats();
    assert_no_new_scans(&before, &after);
    assert_eq!(
        after.index_seeks.users_by_email,
        before.index_seeks.users_by_email + 1
    );

    let before = db.stats();
    assert_eq!(snapshot.properties_of_host(seeded.users[probe]).len(), 1);
    assert_eq!(
        snapshot.bookings_of_property(seeded.properties[probe]).len(),
        1
    );
    assert_eq!(snapshot.bookings_of_guest(seeded.users[probe]).len(), 1);
    assert_eq!(
        snapshot.payments_of_booking(seeded.bookings[probe]).len(),
        1
    );
    assert_eq!(
        snapshot.reviews_of_property(seeded.properties[probe]).len(),
        1
    );
    assert_eq!(snapshot.reviews_by_author(seeded.users[probe]).len(), 1);
    assert_eq!(snapshot.messages_sent_by(seeded.users[probe]).len(), 1);
    assert_eq!(
        snapshot.messages_received_by(seeded.users[probe]).len(),
        1
    );
    let after = db.stats();
    assert_no_new_scans(&before, &after);
    assert_eq!(
        after.index_seeks.total(),
        before.index_seeks.total() + 8,
        "each foreign-key lookup should cost exactly one seek"
    );

    let before = db.stats();
    let window_start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let hits = snapshot.bookings_overlapping(window_start, window_start + chrono::Days::new(30));
    assert!(!hits.is_empty());
    let in_city = snapshot.properties_in_location("city0", money("0.00"), money("200.00"));
    assert!(!in_city.is_empty());
    let after = db.stats();
    assert_no_new_scans(&before, &after);
    assert_eq!(
        after.index_seeks.bookings_by_start_date,
        before.index_seeks.bookings_by_start_date + 1
    );
    assert_eq!(
        after.index_seeks.properties_by_location_price,
        before.index_seeks.properties_by_location_price + 1
    );
}

#[test]
fn keyed_lookups_never_scan_at_small_volume() {
    let db = Database::open(Config::default());
    let seeded = seed_volume(&db, 50);
    exercise_keyed_lookups(&db, &seeded, 13);
}

#[test]
fn keyed_lookups_never_scan_as_volume_grows() {
    let db = Database::open(Config::default());
    let seeded = seed_volume(&db, 500);
    exercise_keyed_lookups(&db, &seeded, 441);
}

#[test]
fn full_scans_are_visible_to_the_counters() {
    let db = Database::open(Config::default());
    let _seeded = seed_volume(&db, 20);

    let before = db.stats();
    {
        let snapshot = db.snapshot();
        let rows = query::booking_count_by_user(snapshot.store());
        assert_eq!(rows.len(), 20);
    }
    let after = db.stats();

    // the aggregate really does scan the users table, proving the counters
    // would catch a keyed lookup doing the same
    assert_eq!(after.table_scans.users, before.table_scans.users + 1);
}

#[test]
fn disabled_stats_leave_all_counters_at_zero() {
    let db = Database::open(Config {
        collect_access_stats: false,
        ..Config::default()
    });
    let seeded = seed_volume(&db, 10);

    let snapshot = db.snapshot();
    snapshot.find_user_by_email("user3@load.test");
    snapshot.bookings_of_guest(seeded.users[3]);
    query::booking_count_by_user(snapshot.store());
    drop(snapshot);

    let stats = db.stats();
    assert_eq!(stats.table_scans.total(), 0);
    assert_eq!(stats.index_seeks.total(), 0);
}
