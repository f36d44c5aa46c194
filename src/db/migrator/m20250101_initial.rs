use crate::entities::prelude::*;
use crate::entities::{bundles, payment_methods, referrals, users};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Baseline fixtures replayed on every reset: three named accounts the
/// mobile client's login screen can always fall back to, plus the city
/// starter bundles.
const FIXTURE_USERS: &[(&str, &str, &str, &str, &str)] = &[
    ("red@example.com", "password1", "Red", "Ruby", "1234567890"),
    ("blue@example.com", "password2", "Blue", "Sapphire", "0987654321"),
    ("green@example.com", "password3", "Green", "Emerald", "1122334455"),
];

const FIXTURE_CARDS: &[(i64, i32, &str)] = &[
    (4_111_111_111_111_111, 123, "90210"),
    (4_242_424_242_424_242, 456, "10001"),
    (4_000_056_655_665_556, 789, "60601"),
];

const FIXTURE_PASSCODES: &[&str] = &["ABC12345", "DEF45678", "GHI78901"];

const FIXTURE_BUNDLES: &[(&str, &str, f64)] = &[
    (
        "NYC Adventure",
        "Explore the best of New York City with this exciting bundle.",
        299.99,
    ),
    (
        "LA Experience",
        "Discover the glamour and beauty of Los Angeles.",
        399.99,
    ),
    (
        "Windy City Wonders",
        "Experience the charm and culture of Chicago.",
        249.99,
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(PaymentMethods)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Referrals)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Bundles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Experiences)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Bookings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Reviews)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Payments)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(ExperienceSchedules)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Tags)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(ExperienceTags)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(BundleExperiences)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Fixture users with one payment method and one referral each.
        // Relies on fresh sequences: user ids come out as 1, 2, 3.
        for (i, (email, password, first, last, phone)) in FIXTURE_USERS.iter().enumerate() {
            let insert = Query::insert()
                .into_table(Users)
                .columns([
                    users::Column::Email,
                    users::Column::Password,
                    users::Column::FirstName,
                    users::Column::LastName,
                    users::Column::Phone,
                    users::Column::PaymentInfo,
                    users::Column::Admin,
                ])
                .values_panic([
                    (*email).into(),
                    (*password).into(),
                    (*first).into(),
                    (*last).into(),
                    (*phone).into(),
                    format!("Visa ending {}", FIXTURE_CARDS[i].0 % 10_000).into(),
                    false.into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;

            let user_id = i as i32 + 1;
            let (card_number, cvv, zip) = FIXTURE_CARDS[i];
            let insert = Query::insert()
                .into_table(PaymentMethods)
                .columns([
                    payment_methods::Column::UserId,
                    payment_methods::Column::CardNumber,
                    payment_methods::Column::Cvv,
                    payment_methods::Column::BillingZip,
                ])
                .values_panic([user_id.into(), card_number.into(), cvv.into(), zip.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;

            let insert = Query::insert()
                .into_table(Referrals)
                .columns([referrals::Column::UserId, referrals::Column::Passcode])
                .values_panic([user_id.into(), FIXTURE_PASSCODES[i].into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        for (name, description, total_price) in FIXTURE_BUNDLES {
            let insert = Query::insert()
                .into_table(Bundles)
                .columns([
                    bundles::Column::Name,
                    bundles::Column::Description,
                    bundles::Column::TotalPrice,
                ])
                .values_panic([
                    (*name).into(),
                    (*description).into(),
                    (*total_price).into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse-dependency order so foreign keys never dangle mid-drop.
        manager
            .drop_table(Table::drop().table(BundleExperiences).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExperienceTags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExperienceSchedules).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Experiences).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bundles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Referrals).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentMethods).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
