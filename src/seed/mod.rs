//! Synthetic data generation for the seed workflow.
//!
//! Everything here is pure in-memory generation; the transactional insert
//! lives in `db::repositories::seed`. Every free-text value is clamped to
//! the destination column's declared length before it ever reaches the
//! database, so oversized fake data is clipped instead of rejected.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::company::en::{Buzzword, CatchPhrase};
use fake::faker::internet::en::{FreeEmail, Password};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Deserialize;

pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PASSWORD_LEN: usize = 64;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_PAYMENT_INFO_LEN: usize = 255;
pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_ZIP_LEN: usize = 10;
pub const PASSCODE_LEN: usize = 8;

const BOOKING_STATUSES: &[&str] = &["pending", "confirmed", "cancelled"];
const CARD_BRANDS: &[&str] = &["Visa", "Mastercard", "Amex"];

/// Requested row counts for one seed run. Absent fields fall back to the
/// `[seed]` section of config.toml.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedRequest {
    pub user_count: Option<u32>,
    pub bundle_count: Option<u32>,
    pub experience_count: Option<u32>,
    pub booking_count: Option<u32>,
    pub review_count: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    pub user_count: u32,
    pub bundle_count: u32,
    pub experience_count: u32,
    pub booking_count: u32,
    pub review_count: u32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            user_count: 20,
            bundle_count: 10,
            experience_count: 15,
            booking_count: 40,
            review_count: 25,
        }
    }
}

impl SeedOptions {
    #[must_use]
    pub fn with_request(self, req: &SeedRequest) -> Self {
        Self {
            user_count: req.user_count.unwrap_or(self.user_count),
            bundle_count: req.bundle_count.unwrap_or(self.bundle_count),
            experience_count: req.experience_count.unwrap_or(self.experience_count),
            booking_count: req.booking_count.unwrap_or(self.booking_count),
            review_count: req.review_count.unwrap_or(self.review_count),
        }
    }
}

/// One generated user together with its single payment method and referral.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub payment_info: String,
    pub card_number: i64,
    pub cvv: i32,
    pub billing_zip: String,
    pub passcode: String,
}

#[derive(Debug, Clone)]
pub struct NewBundle {
    pub name: String,
    pub description: String,
    pub total_price: f64,
}

#[derive(Debug, Clone)]
pub struct NewExperience {
    pub bundle_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i32,
    pub experience_id: i32,
    pub booking_date: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: i32,
    pub experience_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: String,
}

/// A complete in-memory seed run, ready for transactional insertion.
///
/// Bookings and reviews only ever reference ids in `1..=user_count` and
/// `1..=experience_count`; the seeder resets sequences before inserting,
/// so those are exactly the ids the fresh rows will get.
#[derive(Debug, Clone)]
pub struct SeedBatch {
    pub users: Vec<NewUser>,
    pub bundles: Vec<NewBundle>,
    pub experiences: Vec<NewExperience>,
    pub bookings: Vec<NewBooking>,
    pub reviews: Vec<NewReview>,
}

impl SeedBatch {
    #[must_use]
    pub fn generate(options: SeedOptions) -> Self {
        let mut rng = rand::rng();
        let mut seen_emails = HashSet::new();

        let users = (0..options.user_count)
            .map(|i| generate_user(&mut rng, i, &mut seen_emails))
            .collect();

        let bundles = (0..options.bundle_count)
            .map(|_| NewBundle {
                name: clamp(CatchPhrase().fake(), MAX_TITLE_LEN),
                description: Paragraph(1..3).fake(),
                total_price: round_cents(rng.random_range(250.0..50_000.0)),
            })
            .collect();

        let experiences = (0..options.experience_count)
            .map(|i| NewExperience {
                // Roughly every other experience belongs to a bundle.
                bundle_id: (options.bundle_count > 0 && i % 2 == 0)
                    .then(|| (i % options.bundle_count) as i32 + 1),
                title: clamp(
                    format!("{} {}", Buzzword().fake::<String>(), Buzzword().fake::<String>()),
                    MAX_TITLE_LEN,
                ),
                description: Paragraph(1..3).fake(),
                location: clamp(CityName().fake(), MAX_TITLE_LEN),
                price: round_cents(rng.random_range(50.0..5_000.0)),
            })
            .collect();

        let today = chrono::Utc::now().date_naive();
        let bookings = if options.user_count == 0 || options.experience_count == 0 {
            Vec::new()
        } else {
            (0..options.booking_count)
                .map(|_| NewBooking {
                    user_id: rng.random_range(1..=options.user_count as i32),
                    experience_id: rng.random_range(1..=options.experience_count as i32),
                    booking_date: (today
                        + chrono::Duration::days(rng.random_range(-30_i64..60)))
                    .to_string(),
                    status: BOOKING_STATUSES[rng.random_range(0..BOOKING_STATUSES.len())]
                        .to_string(),
                })
                .collect()
        };

        let now = chrono::Utc::now().to_rfc3339();
        let reviews = if options.user_count == 0 || options.experience_count == 0 {
            Vec::new()
        } else {
            (0..options.review_count)
                .map(|_| NewReview {
                    user_id: rng.random_range(1..=options.user_count as i32),
                    experience_id: rng.random_range(1..=options.experience_count as i32),
                    rating: rng.random_range(1..=5),
                    comment: Sentence(3..12).fake(),
                    created_at: now.clone(),
                })
                .collect()
        };

        Self {
            users,
            bundles,
            experiences,
            bookings,
            reviews,
        }
    }
}

fn generate_user(rng: &mut impl Rng, index: u32, seen_emails: &mut HashSet<String>) -> NewUser {
    let mut email: String = FreeEmail().fake();
    if !seen_emails.insert(email.clone()) {
        // The schema requires unique emails; disambiguate collisions.
        email = format!("user{index}.{email}");
        seen_emails.insert(email.clone());
    }

    let card_number = rng.random_range(4_000_000_000_000_000_i64..5_000_000_000_000_000);
    let brand = CARD_BRANDS[rng.random_range(0..CARD_BRANDS.len())];

    NewUser {
        email: clamp(email, MAX_EMAIL_LEN),
        password: clamp(Password(8..20).fake(), MAX_PASSWORD_LEN),
        first_name: clamp(FirstName().fake(), MAX_NAME_LEN),
        last_name: clamp(LastName().fake(), MAX_NAME_LEN),
        phone: clamp(PhoneNumber().fake(), MAX_PHONE_LEN),
        payment_info: clamp(
            format!("{brand} ending {}", card_number % 10_000),
            MAX_PAYMENT_INFO_LEN,
        ),
        card_number,
        cvv: rng.random_range(100..=999),
        billing_zip: clamp(format!("{:05}", rng.random_range(0..=99_999)), MAX_ZIP_LEN),
        passcode: generate_passcode(rng),
    }
}

/// 8-character alphanumeric referral code.
pub fn generate_passcode(rng: &mut impl Rng) -> String {
    rng.sample_iter(Alphanumeric)
        .take(PASSCODE_LEN)
        .map(char::from)
        .collect()
}

/// Truncate to at most `max` characters, never rejecting oversized input.
#[must_use]
pub fn clamp(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        s
    } else {
        s.chars().take(max).collect()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_leaves_short_values_alone() {
        assert_eq!(clamp("hello".to_string(), 20), "hello");
    }

    #[test]
    fn clamp_truncates_instead_of_rejecting() {
        let long = "x".repeat(400);
        assert_eq!(clamp(long, MAX_EMAIL_LEN).chars().count(), MAX_EMAIL_LEN);

        // Multi-byte input must not be split mid-character.
        let accents = "é".repeat(30);
        assert_eq!(clamp(accents, 10), "é".repeat(10));
    }

    #[test]
    fn passcodes_are_eight_alphanumeric_chars() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let code = generate_passcode(&mut rng);
            assert_eq!(code.len(), PASSCODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn batch_honors_requested_counts() {
        let batch = SeedBatch::generate(SeedOptions {
            user_count: 5,
            bundle_count: 2,
            experience_count: 3,
            booking_count: 7,
            review_count: 4,
        });

        assert_eq!(batch.users.len(), 5);
        assert_eq!(batch.bundles.len(), 2);
        assert_eq!(batch.experiences.len(), 3);
        assert_eq!(batch.bookings.len(), 7);
        assert_eq!(batch.reviews.len(), 4);
    }

    #[test]
    fn batch_emails_are_unique_and_within_limits() {
        let batch = SeedBatch::generate(SeedOptions {
            user_count: 50,
            ..SeedOptions::default()
        });

        let emails: HashSet<_> = batch.users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), batch.users.len());

        for user in &batch.users {
            assert!(user.email.chars().count() <= MAX_EMAIL_LEN);
            assert!(user.password.chars().count() <= MAX_PASSWORD_LEN);
            assert!(user.phone.chars().count() <= MAX_PHONE_LEN);
            assert_eq!(user.passcode.len(), PASSCODE_LEN);
        }
    }

    #[test]
    fn foreign_keys_stay_inside_the_generated_set() {
        let options = SeedOptions {
            user_count: 4,
            bundle_count: 3,
            experience_count: 6,
            booking_count: 20,
            review_count: 10,
        };
        let batch = SeedBatch::generate(options);

        for booking in &batch.bookings {
            assert!((1..=4).contains(&booking.user_id));
            assert!((1..=6).contains(&booking.experience_id));
        }
        for review in &batch.reviews {
            assert!((1..=4).contains(&review.user_id));
            assert!((1..=6).contains(&review.experience_id));
        }
        for experience in &batch.experiences {
            if let Some(bundle_id) = experience.bundle_id {
                assert!((1..=3).contains(&bundle_id));
            }
        }
    }

    #[test]
    fn zero_users_means_no_dependent_rows() {
        let batch = SeedBatch::generate(SeedOptions {
            user_count: 0,
            bundle_count: 2,
            experience_count: 2,
            booking_count: 10,
            review_count: 10,
        });

        assert!(batch.users.is_empty());
        assert!(batch.bookings.is_empty());
        assert!(batch.reviews.is_empty());
    }

    #[test]
    fn request_overrides_fall_back_to_defaults() {
        let options = SeedOptions::default().with_request(&SeedRequest {
            user_count: Some(3),
            bundle_count: None,
            experience_count: None,
            booking_count: Some(0),
            review_count: None,
        });

        assert_eq!(options.user_count, 3);
        assert_eq!(options.bundle_count, 10);
        assert_eq!(options.booking_count, 0);
    }
}
