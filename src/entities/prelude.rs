pub use super::bookings::Entity as Bookings;
pub use super::bundle_experiences::Entity as BundleExperiences;
pub use super::bundles::Entity as Bundles;
pub use super::experience_schedules::Entity as ExperienceSchedules;
pub use super::experience_tags::Entity as ExperienceTags;
pub use super::experiences::Entity as Experiences;
pub use super::payment_methods::Entity as PaymentMethods;
pub use super::payments::Entity as Payments;
pub use super::referrals::Entity as Referrals;
pub use super::reviews::Entity as Reviews;
pub use super::tags::Entity as Tags;
pub use super::users::Entity as Users;
