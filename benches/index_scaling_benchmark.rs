use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use chrono::NaiveDate;
use staybase::core::types::{Money, UserId};
use staybase::schema::entities::{NewBooking, NewProperty, NewUser, Role};
use staybase::Database;

fn seeded_database(n: usize) -> (Database, Vec<UserId>) {
    let db = Database::default();
    let mut users = Vec::with_capacity(n);

    for i in 0..n {
        let user = db
            .create_user(NewUser {
                first_name: format!("User{}", i),
                last_name: "Scale".to_string(),
                email: format!("user{}@scale.test", i),
                password_hash: "hash".to_string(),
                phone_number: None,
                role: Role::Host,
            })
            .unwrap();
        let property = db
            .create_property(NewProperty {
                host_id: user.id,
                name: format!("Listing {}", i),
                description: String::new(),
                location: format!("city{}", i % 25),
                price_per_night: Money::from_cents(4_000 + (i as i64 % 100) * 100),
            })
            .unwrap();

        let start =
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Days::new((i % 330) as u64);
        db.create_booking(NewBooking {
            property_id: property.id,
            user_id: user.id,
            start_date: start,
            end_date: start + chrono::Days::new(4),
            total_price: Money::from_cents(80_000),
        })
        .unwrap();

        users.push(user.id);
    }

    (db, users)
}

/// Email point lookup: the unique hash index against a deliberate full scan.
/// The index side should stay flat while the scan side grows with n.
fn bench_email_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("email_lookup");

    for size in [100, 1_000, 10_000].iter() {
        let (db, _) = seeded_database(*size);
        let mut rng = rand::thread_rng();

        group.bench_with_input(BenchmarkId::new("indexed", size), size, |b, &n| {
            b.iter(|| {
                let email = format!("user{}@scale.test", rng.gen_range(0..n));
                let snapshot = db.snapshot();
                black_box(snapshot.find_user_by_email(&email))
            });
        });

        group.bench_with_input(BenchmarkId::new("full_scan", size), size, |b, &n| {
            b.iter(|| {
                let email = format!("user{}@scale.test", rng.gen_range(0..n));
                let snapshot = db.snapshot();
                black_box(
                    snapshot
                        .store()
                        .users
                        .scan()
                        .find(|user| user.email == email)
                        .cloned(),
                )
            });
        });
    }

    group.finish();
}

/// Foreign-key posting lookup at growing volume
fn bench_fk_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("bookings_of_guest");

    for size in [100, 1_000, 10_000].iter() {
        let (db, users) = seeded_database(*size);
        let mut rng = rand::thread_rng();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &n| {
            b.iter(|| {
                let guest = users[rng.gen_range(0..n)];
                let snapshot = db.snapshot();
                black_box(snapshot.bookings_of_guest(guest))
            });
        });
    }

    group.finish();
}

/// Start-date range probe for a 2-week availability window
fn bench_overlap_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("bookings_overlapping");

    for size in [100, 1_000, 10_000].iter() {
        let (db, _) = seeded_database(*size);
        let mut rng = rand::thread_rng();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                    + chrono::Days::new(rng.gen_range(0..300));
                let snapshot = db.snapshot();
                black_box(snapshot.bookings_overlapping(from, from + chrono::Days::new(14)))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_email_lookup,
    bench_fk_lookup,
    bench_overlap_lookup
);
criterion_main!(benches);
