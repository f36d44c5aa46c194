pub mod prelude;

pub mod bookings;
pub mod bundle_experiences;
pub mod bundles;
pub mod experience_schedules;
pub mod experience_tags;
pub mod experiences;
pub mod payment_methods;
pub mod payments;
pub mod referrals;
pub mod reviews;
pub mod tags;
pub mod users;
