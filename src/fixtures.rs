//! Canonical sample dataset for the test-suite and benches.
//!
//! Two hosts with four listings, four guests with booking counts 1 / 3 / 4 / 0
//! across all three statuses, payments over all three methods, and a review
//! spread that straddles the 4.0 mean-rating threshold.

use chrono::NaiveDate;

use crate::core::database::Database;
use crate::core::types::Money;
use crate::schema::entities::{
    Booking, BookingStatus, Message, NewBooking, NewMessage, NewPayment, NewProperty, NewReview,
    NewUser, Payment, PaymentMethod, Property, Review, Role, User,
};

#[derive(Debug, Clone)]
pub struct SampleData {
    pub admin: User,
    /// `[ana, bruno]`
    pub hosts: Vec<User>,
    /// `[carla, diego, eva, fred]`; fred never books.
    pub guests: Vec<User>,
    /// `[alfama, baixa, cliff, douro]`; douro has no reviews.
    pub properties: Vec<Property>,
    pub bookings: Vec<Booking>,
    pub payments: Vec<Payment>,
    pub reviews: Vec<Review>,
    pub messages: Vec<Message>,
}

fn user(first: &str, last: &str, email: &str, role: Role) -> NewUser {
    NewUser {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        password_hash: format!("$argon2id$stub${}", first),
        phone_number: None,
        role,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn money(text: &str) -> Money {
    text.parse().unwrap()
}

/// Populate `db` and hand back every created row, in creation order.
pub fn seed(db: &Database) -> SampleData {
    let admin = db
        .create_user(user("Olga", "Martins", "olga@staybase.test", Role::Admin))
        .unwrap();

    let ana = db
        .create_user(user("Ana", "Reis", "ana@staybase.test", Role::Host))
        .unwrap();
    let bruno = db
        .create_user(user("Bruno", "Costa", "bruno@staybase.test", Role::Host))
        .unwrap();

    let carla = db
        .create_user(user("Carla", "Nunes", "carla@staybase.test", Role::Guest))
        .unwrap();
    let diego = db
        .create_user(user("Diego", "Lopes", "diego@staybase.test", Role::Guest))
        .unwrap();
    let eva = db
        .create_user(user("Eva", "Silva", "eva@staybase.test", Role::Guest))
        .unwrap();
    let fred = db
        .create_user(user("Fred", "Gomes", "fred@staybase.test", Role::Guest))
        .unwrap();

    let alfama = db
        .create_property(NewProperty {
            host_id: ana.id,
            name: "Alfama Loft".to_string(),
            description: "Rooftop loft over the old town".to_string(),
            location: "lisbon".to_string(),
            price_per_night: money("120.00"),
        })
        .unwrap();
    let baixa = db
        .create_property(NewProperty {
            host_id: ana.id,
            name: "Baixa Studio".to_string(),
            description: "Compact studio by the river".to_string(),
            location: "lisbon".to_string(),
            price_per_night: money("80.00"),
        })
        .unwrap();
    let cliff = db
        .create_property(NewProperty {
            host_id: bruno.id,
            name: "Cliff House".to_string(),
            description: "Sea view, steep stairs".to_string(),
            location: "porto".to_string(),
            price_per_night: money("150.00"),
        })
        .unwrap();
    let douro = db
        .create_property(NewProperty {
            host_id: bruno.id,
            name: "Douro Flat".to_string(),
            description: "Two bedrooms near the bridge".to_string(),
            location: "porto".to_string(),
            price_per_night: money("90.00"),
        })
        .unwrap();

    // (guest, property, start, end, total, final status)
    let booking_specs = [
        (&carla, &alfama, date(2025, 6, 1), date(2025, 6, 5), "480.00", BookingStatus::Confirmed),
        (&diego, &cliff, date(2025, 6, 3), date(2025, 6, 7), "600.00", BookingStatus::Confirmed),
        (&diego, &alfama, date(2025, 7, 10), date(2025, 7, 12), "240.00", BookingStatus::Pending),
        (&diego, &douro, date(2025, 7, 1), date(2025, 7, 4), "270.00", BookingStatus::Canceled),
        (&eva, &douro, date(2025, 6, 10), date(2025, 6, 14), "360.00", BookingStatus::Confirmed),
        (&eva, &baixa, date(2025, 6, 20), date(2025, 6, 22), "160.00", BookingStatus::Confirmed),
        (&eva, &cliff, date(2025, 8, 1), date(2025, 8, 8), "1050.00", BookingStatus::Pending),
        (&eva, &alfama, date(2025, 8, 15), date(2025, 8, 18), "360.00", BookingStatus::Canceled),
    ];

    let mut bookings = Vec::new();
    for (guest, property, start, end, total, status) in booking_specs {
        let mut booking = db
            .create_booking(NewBooking {
                property_id: property.id,
                user_id: guest.id,
                start_date: start,
                end_date: end,
                total_price: money(total),
            })
            .unwrap();
        if status != BookingStatus::Pending {
            booking = db.set_booking_status(booking.id, status).unwrap();
        }
        bookings.push(booking);
    }

    let payment_specs = [
        (0usize, "480.00", PaymentMethod::CreditCard),
        (1, "600.00", PaymentMethod::Paypal),
        (4, "360.00", PaymentMethod::Stripe),
        (5, "160.00", PaymentMethod::CreditCard),
    ];
    let mut payments = Vec::new();
    for (booking_idx, amount, method) in payment_specs {
        payments.push(
            db.create_payment(NewPayment {
                booking_id: bookings[booking_idx].id,
                amount: money(amount),
                payment_method: method,
            })
            .unwrap(),
        );
    }

    // alfama averages 4.67, cliff 3.67, baixa 3.00, douro stays unreviewed
    let review_specs = [
        (&carla, &alfama, 5u8, "Perfect stay"),
        (&diego, &alfama, 5u8, "Would come back"),
        (&eva, &alfama, 4u8, "Lovely view, thin walls"),
        (&carla, &cliff, 4u8, "Great host"),
        (&diego, &cliff, 4u8, "Those stairs though"),
        (&eva, &cliff, 3u8, "A bit far from town"),
        (&eva, &baixa, 3u8, "Fine for a night"),
    ];
    let mut reviews = Vec::new();
    for (author, property, rating, comment) in review_specs {
        reviews.push(
            db.create_review(NewReview {
                property_id: property.id,
                user_id: author.id,
                rating,
                comment: comment.to_string(),
            })
            .unwrap(),
        );
    }

    let message_specs = [
        (&carla, &ana, "Is early check-in possible?"),
        (&ana, &carla, "Sure, from noon on"),
        (&eva, &bruno, "Does the flat have a crib?"),
    ];
    let mut messages = Vec::new();
    for (sender, recipient, body) in message_specs {
        messages.push(
            db.send_message(NewMessage {
                sender_id: sender.id,
                recipient_id: recipient.id,
                message_body: body.to_string(),
            })
            .unwrap(),
        );
    }

    SampleData {
        admin,
        hosts: vec![ana, bruno],
        guests: vec![carla, diego, eva, fred],
        properties: vec![alfama, baixa, cliff, douro],
        bookings,
        payments,
        reviews,
        messages,
    }
}
