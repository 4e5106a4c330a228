//! Offer tiers listed for every event.
//!
//! The registration page shows three tiers. Their seat allowances are derived from the
//! event's available seats: general admission can use all of them, while VIP and student
//! tiers are capped at a fifth and three tenths respectively (rounded down).

use crate::model::{EventRecord, OfferCreate, OfferId};

pub const DEFAULT_CURRENCY: &str = "RWF";
pub const VIP_PRICE: u64 = 25_000;

/// The standard offers for `event`, in display order.
pub fn standard_offers(event: &EventRecord) -> Vec<OfferCreate> {
    let seats = event.available_seats;
    vec![
        offer(
            "general",
            "General Admission",
            "Standard access to the event",
            0,
            seats,
            &["Event access", "Welcome kit", "Networking opportunities"],
        ),
        offer(
            "vip",
            "VIP Access",
            "Premium experience with additional benefits",
            VIP_PRICE,
            seats / 5,
            &[
                "Priority seating",
                "VIP lounge access",
                "Premium catering",
                "Meet & greet with speakers",
            ],
        ),
        offer(
            "student",
            "Student Discount",
            "Special pricing for students",
            0,
            (u64::from(seats) * 3 / 10) as u32,
            &[
                "Event access",
                "Student networking session",
                "Career guidance",
            ],
        ),
    ]
}

fn offer(
    id: &str,
    name: &str,
    description: &str,
    unit_price: u64,
    remaining: u32,
    benefits: &[&str],
) -> OfferCreate {
    OfferCreate {
        id: OfferId::from(id),
        name: name.to_string(),
        description: description.to_string(),
        unit_price,
        currency: DEFAULT_CURRENCY.to_string(),
        remaining,
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
    }
}
