use anyhow::Result;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, Set, Statement, TransactionTrait,
};

use crate::entities::{
    bookings, bundles, experiences, payment_methods, prelude::*, referrals, reviews, users,
};
use crate::seed::SeedBatch;

/// Wipe order doubles as the Postgres TRUNCATE list. Children come first so
/// the sqlite path (plain DELETEs, foreign keys enforced) never dangles.
const WIPE_ORDER: &[&str] = &[
    "experience_tags",
    "bundle_experiences",
    "reviews",
    "payments",
    "bookings",
    "experience_schedules",
    "payment_methods",
    "referrals",
    "experiences",
    "tags",
    "bundles",
    "users",
];

/// Tables with an auto-increment primary key; their counters restart at 1 on
/// every seed run so ids are deterministic.
const SEQUENCE_TABLES: &[&str] = &[
    "users",
    "payment_methods",
    "referrals",
    "bundles",
    "experiences",
    "bookings",
    "reviews",
    "payments",
    "experience_schedules",
    "tags",
];

pub struct SeedRepository {
    conn: DatabaseConnection,
}

impl SeedRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Replace the database's contents with `batch`, atomically.
    ///
    /// Truncate, sequence reset and every insert share one transaction; any
    /// failure rolls the whole run back and leaves the previous contents
    /// untouched.
    pub async fn reseed(&self, batch: &SeedBatch) -> Result<()> {
        let txn = self.conn.begin().await?;

        wipe_all(&txn).await?;
        reset_sequences(&txn).await?;
        insert_batch(&txn, batch).await?;

        txn.commit().await?;
        Ok(())
    }
}

async fn wipe_all<C: ConnectionTrait>(conn: &C) -> Result<()> {
    let backend = conn.get_database_backend();

    if backend == DbBackend::Postgres {
        // CASCADE removes dependent rows transitively; no manual ordering
        // needed, but we pass the full list so empty tables stay cheap.
        let sql = format!("TRUNCATE {} CASCADE", WIPE_ORDER.join(", "));
        conn.execute(Statement::from_string(backend, sql)).await?;
    } else {
        for table in WIPE_ORDER {
            conn.execute(Statement::from_string(
                backend,
                format!("DELETE FROM {table}"),
            ))
            .await?;
        }
    }

    Ok(())
}

async fn reset_sequences<C: ConnectionTrait>(conn: &C) -> Result<()> {
    let backend = conn.get_database_backend();

    if backend == DbBackend::Postgres {
        for table in SEQUENCE_TABLES {
            conn.execute(Statement::from_string(
                backend,
                format!("ALTER SEQUENCE {table}_id_seq RESTART WITH 1"),
            ))
            .await?;
        }
    } else {
        // sqlite only materializes sqlite_sequence once an AUTOINCREMENT
        // table has been written to.
        let exists = conn
            .query_one(Statement::from_string(
                backend,
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'"
                    .to_string(),
            ))
            .await?;

        if exists.is_some() {
            for table in SEQUENCE_TABLES {
                conn.execute(Statement::from_string(
                    backend,
                    format!("DELETE FROM sqlite_sequence WHERE name = '{table}'"),
                ))
                .await?;
            }
        }
    }

    Ok(())
}

async fn insert_batch<C: ConnectionTrait>(conn: &C, batch: &SeedBatch) -> Result<()> {
    if !batch.users.is_empty() {
        let models: Vec<users::ActiveModel> = batch
            .users
            .iter()
            .map(|u| users::ActiveModel {
                email: Set(u.email.clone()),
                password: Set(u.password.clone()),
                first_name: Set(u.first_name.clone()),
                last_name: Set(u.last_name.clone()),
                phone: Set(u.phone.clone()),
                payment_info: Set(u.payment_info.clone()),
                admin: Set(false),
                ..Default::default()
            })
            .collect();
        Users::insert_many(models).exec(conn).await?;

        // Sequences were just reset, so user ids are exactly 1..=N in
        // insertion order.
        let cards: Vec<payment_methods::ActiveModel> = batch
            .users
            .iter()
            .enumerate()
            .map(|(i, u)| payment_methods::ActiveModel {
                user_id: Set(i as i32 + 1),
                card_number: Set(u.card_number),
                cvv: Set(u.cvv),
                billing_zip: Set(u.billing_zip.clone()),
                ..Default::default()
            })
            .collect();
        PaymentMethods::insert_many(cards).exec(conn).await?;

        let codes: Vec<referrals::ActiveModel> = batch
            .users
            .iter()
            .enumerate()
            .map(|(i, u)| referrals::ActiveModel {
                user_id: Set(i as i32 + 1),
                passcode: Set(u.passcode.clone()),
                ..Default::default()
            })
            .collect();
        Referrals::insert_many(codes).exec(conn).await?;
    }

    if !batch.bundles.is_empty() {
        let models: Vec<bundles::ActiveModel> = batch
            .bundles
            .iter()
            .map(|b| bundles::ActiveModel {
                name: Set(b.name.clone()),
                description: Set(b.description.clone()),
                total_price: Set(b.total_price),
                ..Default::default()
            })
            .collect();
        Bundles::insert_many(models).exec(conn).await?;
    }

    if !batch.experiences.is_empty() {
        let models: Vec<experiences::ActiveModel> = batch
            .experiences
            .iter()
            .map(|e| experiences::ActiveModel {
                bundle_id: Set(e.bundle_id),
                title: Set(e.title.clone()),
                description: Set(e.description.clone()),
                location: Set(e.location.clone()),
                price: Set(e.price),
                ..Default::default()
            })
            .collect();
        Experiences::insert_many(models).exec(conn).await?;
    }

    if !batch.bookings.is_empty() {
        let models: Vec<bookings::ActiveModel> = batch
            .bookings
            .iter()
            .map(|b| bookings::ActiveModel {
                user_id: Set(b.user_id),
                experience_id: Set(b.experience_id),
                booking_date: Set(b.booking_date.clone()),
                status: Set(b.status.clone()),
                ..Default::default()
            })
            .collect();
        Bookings::insert_many(models).exec(conn).await?;
    }

    if !batch.reviews.is_empty() {
        let models: Vec<reviews::ActiveModel> = batch
            .reviews
            .iter()
            .map(|r| reviews::ActiveModel {
                user_id: Set(r.user_id),
                experience_id: Set(r.experience_id),
                rating: Set(r.rating),
                comment: Set(r.comment.clone()),
                created_at: Set(r.created_at.clone()),
                ..Default::default()
            })
            .collect();
        Reviews::insert_many(models).exec(conn).await?;
    }

    Ok(())
}
