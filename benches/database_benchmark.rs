use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use chrono::NaiveDate;
use staybase::core::types::Money;
use staybase::query;
use staybase::schema::entities::{BookingStatus, NewBooking, NewProperty, NewUser, Role};
use staybase::Database;

/// Helper to create a populated database
fn seeded_database(n: usize) -> Database {
    let db = Database::default();
    let mut rng = rand::thread_rng();

    let mut users = Vec::with_capacity(n);
    let mut properties = Vec::with_capacity(n);
    for i in 0..n {
        let user = db
            .create_user(NewUser {
                first_name: format!("User{}", i),
                last_name: "Bench".to_string(),
                email: format!("user{}@bench.test", i),
                password_hash: "hash".to_string(),
                phone_number: None,
                role: Role::Host,
            })
            .unwrap();
        let property = db
            .create_property(NewProperty {
                host_id: user.id,
                name: format!("Listing {}", i),
                description: "bench".to_string(),
                location: format!("city{}", i % 20),
                price_per_night: Money::from_cents(rng.gen_range(3_000..30_000)),
            })
            .unwrap();
        users.push(user.id);
        properties.push(property.id);
    }

    for i in 0..n * 2 {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
            + chrono::Days::new(rng.gen_range(0..300));
        let booking = db
            .create_booking(NewBooking {
                property_id: properties[rng.gen_range(0..n)],
                user_id: users[rng.gen_range(0..n)],
                start_date: start,
                end_date: start + chrono::Days::new(rng.gen_range(1..14)),
                total_price: Money::from_cents(rng.gen_range(10_000..200_000)),
            })
            .unwrap();
        if i % 2 == 0 {
            db.set_booking_status(booking.id, BookingStatus::Confirmed)
                .unwrap();
        }
    }

    db
}

/// Benchmark single row insertion
fn bench_single_insert(c: &mut Criterion) {
    let db = Database::default();

    c.bench_function("single_user_insert", |b| {
        let mut id = 0u64;
        b.iter(|| {
            db.create_user(NewUser {
                first_name: "Bench".to_string(),
                last_name: "User".to_string(),
                email: format!("bench{}@insert.test", id),
                password_hash: "hash".to_string(),
                phone_number: None,
                role: Role::Guest,
            })
            .unwrap();
            id += 1;
        });
    });
}

/// Benchmark the read catalog at growing store sizes
fn bench_query_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_catalog");

    for size in [100, 1_000].iter() {
        let db = seeded_database(*size);

        group.bench_with_input(
            BenchmarkId::new("confirmed_bookings", size),
            size,
            |b, _| {
                b.iter(|| {
                    let snapshot = db.snapshot();
                    black_box(query::bookings_with_guest(
                        snapshot.store(),
                        BookingStatus::Confirmed,
                    ))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("booking_count_by_user", size),
            size,
            |b, _| {
                b.iter(|| {
                    let snapshot = db.snapshot();
                    black_box(query::booking_count_by_user(snapshot.store()))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("property_booking_rank", size),
            size,
            |b, _| {
                b.iter(|| {
                    let snapshot = db.snapshot();
                    black_box(query::property_booking_rank(snapshot.store()))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("rating_threshold", size),
            size,
            |b, _| {
                b.iter(|| {
                    let snapshot = db.snapshot();
                    black_box(query::properties_above_rating_threshold(
                        snapshot.store(),
                        4.0,
                    ))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark cascade planning on a connected store
fn bench_delete_planning(c: &mut Criterion) {
    let db = seeded_database(1_000);
    let snapshot = db.snapshot();
    let store = snapshot.store();
    let property_id = store.properties.scan().next().unwrap().id;
    drop(snapshot);

    c.bench_function("plan_delete_property", |b| {
        b.iter(|| black_box(db.plan_delete_property(property_id).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_single_insert,
    bench_query_catalog,
    bench_delete_planning
);
criterion_main!(benches);
